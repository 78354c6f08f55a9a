//! Interaction and visual state for the collaboration graph.
//!
//! Bundles the force simulation with the pan/zoom transform, drag and pan
//! tracking, and per-node smoothed opacities so filter and highlight
//! changes fade over a short duration instead of snapping.

use super::encoding::Encoding;
use super::filter::{FilterState, NodeVisual};
use super::simulation::{RESIZE_ALPHA, Simulation};
use super::theme::Theme;
use super::types::{GraphData, GraphError, GraphNode};

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.2;
/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Pointer travel (screen px) below which a press-release counts as a click
/// rather than a drag.
pub const CLICK_SLOP: f64 = 4.0;

/// Exponential smoothing speed for opacity/ring transitions. Reaches ~95%
/// of the target in roughly a quarter second at 60fps.
const FADE_SPEED: f64 = 12.0;

/// Pan and zoom transform applied to the entire scene. Updating it never
/// perturbs node positions or the simulation.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to `MIN_ZOOM..=MAX_ZOOM`.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	/// Set once the pointer travels past the click slop.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

/// Smoothed per-node presentation values.
///
/// Targets are set by [`GraphState::apply_filter`]; the frame loop eases
/// the current values toward them with exponential smoothing, which gives
/// natural ease-out transitions for dimming and highlight rings.
#[derive(Clone, Debug)]
pub struct VisualState {
	node_alpha: Vec<f64>,
	node_alpha_target: Vec<f64>,
	ring_emphasis: Vec<f64>,
	ring_emphasis_target: Vec<f64>,
	link_alpha: f64,
	link_alpha_target: f64,
}

impl VisualState {
	fn new(node_count: usize, theme: &Theme) -> Self {
		Self {
			node_alpha: vec![1.0; node_count],
			node_alpha_target: vec![1.0; node_count],
			ring_emphasis: vec![0.0; node_count],
			ring_emphasis_target: vec![0.0; node_count],
			link_alpha: theme.link_alpha,
			link_alpha_target: theme.link_alpha,
		}
	}

	/// Ease current values toward their targets.
	fn tick(&mut self, dt: f64) {
		let factor = 1.0 - (-FADE_SPEED * dt).exp();
		for (value, target) in self
			.node_alpha
			.iter_mut()
			.zip(&self.node_alpha_target)
			.chain(self.ring_emphasis.iter_mut().zip(&self.ring_emphasis_target))
		{
			*value += (target - *value) * factor;
		}
		self.link_alpha += (self.link_alpha_target - self.link_alpha) * factor;
	}

	/// Current opacity for a node group.
	pub fn node_alpha(&self, index: usize) -> f64 {
		self.node_alpha.get(index).copied().unwrap_or(1.0)
	}

	/// Current highlight-ring emphasis for a node, 0 (baseline) to 1.
	pub fn ring_emphasis(&self, index: usize) -> f64 {
		self.ring_emphasis.get(index).copied().unwrap_or(0.0)
	}

	/// Current uniform link opacity.
	pub fn link_alpha(&self) -> f64 {
		self.link_alpha
	}
}

/// Core state combining the physics simulation with interaction tracking
/// and smoothed visual values. Created once when the component mounts,
/// then mutated each frame by the animation loop.
pub struct GraphState {
	/// Input nodes in payload order; immutable after load.
	pub nodes: Vec<GraphNode>,
	pub sim: Simulation,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub visual: VisualState,
	pub width: f64,
	pub height: f64,
}

impl GraphState {
	/// Build state for a loaded graph. The encoding is computed here, once,
	/// and baked into the simulation bodies; nothing rescales afterward.
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		theme: &Theme,
	) -> Result<Self, GraphError> {
		let encoding = Encoding::new(data);
		let sim = Simulation::new(data, &encoding, width, height)?;
		Ok(Self {
			nodes: data.nodes.clone(),
			sim,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			visual: VisualState::new(data.nodes.len(), theme),
			width,
			height,
		})
	}

	/// Map screen coordinates to graph coordinates through the inverse
	/// view transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position, if any. Later nodes draw on
	/// top, so the last hit wins.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for (index, node) in self.sim.nodes().iter().enumerate() {
			let (dx, dy) = (node.x - gx, node.y - gy);
			if (dx * dx + dy * dy).sqrt() <= node.radius + 2.0 {
				found = Some(index);
			}
		}
		found
	}

	/// Zoom by `factor` anchored at a screen position, clamping the scale.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Recompute every node's visibility and highlight from `filter` and
	/// set the transition targets. Called on each filter input event.
	pub fn apply_filter(&mut self, filter: &FilterState, theme: &Theme) {
		for (index, node) in self.nodes.iter().enumerate() {
			let visual = NodeVisual::compute(node, filter);
			self.visual.node_alpha_target[index] = if visual.visible {
				1.0
			} else {
				theme.node_dim_alpha
			};
			self.visual.ring_emphasis_target[index] = if visual.search_hit { 1.0 } else { 0.0 };
		}
		// Links dim uniformly whenever any filter is active; endpoint
		// visibility is deliberately not consulted.
		self.visual.link_alpha_target = if filter.is_active() {
			theme.link_dim_alpha
		} else {
			theme.link_alpha
		};
	}

	/// Advance the simulation and the visual transitions by one frame.
	pub fn tick(&mut self, dt: f64) {
		self.sim.tick();
		self.visual.tick(dt);
	}

	/// Thread a new viewport size through: retarget the centering force
	/// and briefly reheat so the layout re-settles. Zoom/pan, filter
	/// targets, and selection are untouched.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.sim.set_center(width / 2.0, height / 2.0);
		self.sim.kick(RESIZE_ALPHA);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::collab_graph::simulation::Phase;
	use crate::components::collab_graph::types::GraphLink;

	fn state() -> GraphState {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: 1,
					name: "Ada Lovelace".into(),
					department: "Engineering".into(),
					archetype: "Builder".into(),
					capabilities: vec![],
					capability_count: 0,
					collab_count: 5,
				},
				GraphNode {
					id: 2,
					name: "Alan Turing".into(),
					department: "Research".into(),
					archetype: "Researcher".into(),
					capabilities: vec![],
					capability_count: 0,
					collab_count: 0,
				},
			],
			links: vec![GraphLink {
				source: 1,
				target: 2,
				weight: 2.0,
			}],
		};
		GraphState::new(&data, 800.0, 600.0, &Theme::default()).unwrap()
	}

	#[test]
	fn zoom_is_clamped_to_the_fixed_scale_range() {
		let mut state = state();
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, 0.5);
		}
		assert!((state.transform.k - MIN_ZOOM).abs() < 1e-9);
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, 2.0);
		}
		assert!((state.transform.k - MAX_ZOOM).abs() < 1e-9);
	}

	#[test]
	fn zoom_never_touches_node_positions() {
		let mut state = state();
		let before: Vec<(f64, f64)> = state.sim.nodes().iter().map(|n| (n.x, n.y)).collect();
		state.zoom_at(100.0, 100.0, 1.5);
		for (node, (x, y)) in state.sim.nodes().iter().zip(before) {
			assert_eq!((node.x, node.y), (x, y));
		}
	}

	#[test]
	fn screen_to_graph_inverts_the_transform() {
		let mut state = state();
		state.transform = ViewTransform {
			x: 40.0,
			y: -25.0,
			k: 2.0,
		};
		let (gx, gy) = state.screen_to_graph(140.0, 75.0);
		assert!((gx - 50.0).abs() < 1e-9);
		assert!((gy - 50.0).abs() < 1e-9);
	}

	#[test]
	fn filter_sets_dim_and_highlight_targets() {
		let theme = Theme::default();
		let mut state = state();
		let filter = FilterState {
			search: "ada".into(),
			..FilterState::default()
		};
		state.apply_filter(&filter, &theme);
		assert!((state.visual.node_alpha_target[0] - 1.0).abs() < 1e-9);
		assert!((state.visual.node_alpha_target[1] - theme.node_dim_alpha).abs() < 1e-9);
		assert!((state.visual.ring_emphasis_target[0] - 1.0).abs() < 1e-9);
		assert!((state.visual.ring_emphasis_target[1]).abs() < 1e-9);
		assert!((state.visual.link_alpha_target - theme.link_dim_alpha).abs() < 1e-9);

		state.apply_filter(&FilterState::default(), &theme);
		assert!((state.visual.node_alpha_target[1] - 1.0).abs() < 1e-9);
		assert!((state.visual.link_alpha_target - theme.link_alpha).abs() < 1e-9);
	}

	#[test]
	fn opacity_transitions_ease_instead_of_snapping() {
		let theme = Theme::default();
		let mut state = state();
		state.apply_filter(
			&FilterState {
				department: "Engineering".into(),
				..FilterState::default()
			},
			&theme,
		);
		state.tick(0.016);
		let partial = state.visual.node_alpha(1);
		assert!(partial < 1.0 && partial > theme.node_dim_alpha);
		for _ in 0..600 {
			state.tick(0.016);
		}
		assert!((state.visual.node_alpha(1) - theme.node_dim_alpha).abs() < 0.01);
	}

	#[test]
	fn resize_recenter_leaves_filter_targets_alone() {
		let theme = Theme::default();
		let mut state = state();
		let filter = FilterState {
			search: "ada".into(),
			..FilterState::default()
		};
		state.apply_filter(&filter, &theme);
		let targets = state.visual.node_alpha_target.clone();

		state.resize(1200.0, 900.0);
		assert_eq!((state.width, state.height), (1200.0, 900.0));
		assert_eq!(state.sim.phase(), Phase::Settling);
		assert_eq!(state.visual.node_alpha_target, targets);
	}

	#[test]
	fn hit_test_respects_radius_and_transform() {
		let mut state = state();
		let (x, y, r) = {
			let n = &state.sim.nodes()[0];
			(n.x, n.y, n.radius)
		};
		assert_eq!(state.node_at_position(x, y), Some(0));
		assert_eq!(state.node_at_position(x + r + 10.0, y + r + 10.0), None);

		// Panning moves the scene under the pointer.
		state.transform.x = 50.0;
		assert_eq!(state.node_at_position(x + 50.0, y), Some(0));
	}
}
