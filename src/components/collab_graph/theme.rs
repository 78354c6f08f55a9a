//! Visual theming for the collaboration graph canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Parse a CSS color string: hex (`#RRGGBB`) or `rgb()`/`rgba()`
	/// functional notation. Anything else resolves to neutral gray.
	pub fn parse(color_str: &str) -> Color {
		if color_str.starts_with('#') && color_str.len() == 7 {
			let r = u8::from_str_radix(&color_str[1..3], 16).unwrap_or(128);
			let g = u8::from_str_radix(&color_str[3..5], 16).unwrap_or(128);
			let b = u8::from_str_radix(&color_str[5..7], 16).unwrap_or(128);
			Color::rgb(r, g, b)
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums
				.first()
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let g = nums
				.get(1)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let b = nums
				.get(2)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(128);
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(r, g, b, a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Style values for the canvas scene. Archetype colors come from
/// [`super::encoding::archetype_color`]; everything chrome-level lives here.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background fill.
	pub background: Color,
	/// Link stroke color; its alpha is replaced per frame by the smoothed
	/// filter-state opacity.
	pub link: Color,
	/// Link opacity with no filter active.
	pub link_alpha: f64,
	/// Uniform link opacity while any filter is active.
	pub link_dim_alpha: f64,
	/// Node body fill opacity.
	pub body_alpha: f64,
	/// Node body stroke.
	pub body_stroke: Color,
	pub body_stroke_width: f64,
	/// Opacity for nodes excluded by the active filters. Dimmed, never
	/// removed: they stay simulated and interactive.
	pub node_dim_alpha: f64,
	/// Baseline outer-ring opacity and stroke width.
	pub ring_alpha: f64,
	pub ring_width: f64,
	/// Ring opacity and width while the node matches the search term.
	pub ring_highlight_alpha: f64,
	pub ring_highlight_width: f64,
	/// Gap between the node body and the ring stroke.
	pub ring_offset: f64,
	/// Label text color.
	pub label: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(22, 27, 34),
			link: Color::rgb(140, 160, 180),
			link_alpha: 0.6,
			link_dim_alpha: 0.1,
			body_alpha: 0.9,
			body_stroke: Color::rgba(255, 255, 255, 0.85),
			body_stroke_width: 1.5,
			node_dim_alpha: 0.15,
			ring_alpha: 0.25,
			ring_width: 3.0,
			ring_highlight_alpha: 0.85,
			ring_highlight_width: 5.0,
			ring_offset: 3.0,
			label: Color::rgb(220, 226, 232),
		}
	}
}
