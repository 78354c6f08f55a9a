//! Visual encoding: archetype colors and attribute-to-size scales.
//!
//! Both scales are computed once from the loaded graph before first render
//! and never change afterwards; filtering and search only touch opacity.

use super::types::GraphData;

/// Color for archetypes missing from the fixed table, including "Unknown".
pub const FALLBACK_COLOR: &str = "#757575";

/// Node radius range in pixels.
const RADIUS_RANGE: (f64, f64) = (6.0, 22.0);
/// Link stroke width range in pixels.
const LINK_WIDTH_RANGE: (f64, f64) = (1.5, 6.0);

/// Resolve an archetype to its display color.
///
/// This is the single color source for every surface that renders an
/// archetype (ring, body, legend swatch, detail badge), so the fallback is
/// applied identically everywhere.
pub fn archetype_color(archetype: &str) -> &'static str {
	match archetype {
		"Builder" => "#1976d2",
		"Designer" => "#7b1fa2",
		"Researcher" => "#2e7d32",
		"Communicator" => "#e65100",
		"Strategist" => "#00838f",
		_ => FALLBACK_COLOR,
	}
}

/// Linear mapping from a data domain onto a pixel range, clamped at the
/// range ends. A zero-width domain maps every input to the range start.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl LinearScale {
	/// Create a scale over `domain` producing values in `range`.
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Map `value` into the range.
	pub fn scale(&self, value: f64) -> f64 {
		let span = self.domain.1 - self.domain.0;
		if span <= 0.0 {
			return self.range.0;
		}
		let t = ((value - self.domain.0) / span).clamp(0.0, 1.0);
		self.range.0 + t * (self.range.1 - self.range.0)
	}
}

/// Precomputed scales for one dataset.
#[derive(Clone, Debug)]
pub struct Encoding {
	radius: LinearScale,
	link_width: LinearScale,
}

impl Encoding {
	/// Build the radius and link-width scales from the loaded graph.
	///
	/// Degenerate domains (all-zero collaboration counts, all-one weights)
	/// fall back to a width-one domain so single-node and uniform graphs
	/// still produce finite sizes.
	pub fn new(data: &GraphData) -> Self {
		let max_collab = data
			.nodes
			.iter()
			.map(|n| n.collab_count)
			.max()
			.unwrap_or(0)
			.max(1);
		let max_weight = data.links.iter().map(|l| l.weight).fold(1.0_f64, f64::max);
		Self {
			radius: LinearScale::new((0.0, max_collab as f64), RADIUS_RANGE),
			link_width: LinearScale::new((1.0, max_weight), LINK_WIDTH_RANGE),
		}
	}

	/// Node radius for a collaboration count.
	pub fn node_radius(&self, collab_count: u32) -> f64 {
		self.radius.scale(collab_count as f64)
	}

	/// Link stroke width for a weight.
	pub fn link_width(&self, weight: f64) -> f64 {
		self.link_width.scale(weight)
	}
}
