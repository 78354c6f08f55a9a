//! Force-directed layout engine.
//!
//! Owns the per-node position, velocity, and pin state, and advances them
//! one tick per animation frame. Four forces compose additively each tick:
//! a spring pulling linked nodes toward a fixed separation, all-pairs
//! repulsion, a pull toward the viewport center, and pairwise collision
//! resolution using each node's visual radius plus a margin.
//!
//! Temperature control follows the familiar alpha model: forces are scaled
//! by a decaying energy value, and once it drops below the cutoff (with a
//! zero target) the simulation goes [`Phase::Idle`] and ticks become no-ops
//! until a drag or resize reheats it.

use std::collections::HashMap;
use std::f64::consts::TAU;

use super::encoding::Encoding;
use super::types::{GraphData, GraphError};

/// Target separation for linked nodes. Fixed, not derived from weight.
const LINK_DISTANCE: f64 = 100.0;
const LINK_STRENGTH: f64 = 0.08;
/// All-pairs repulsion strength; negative repels.
const CHARGE_STRENGTH: f64 = -300.0;
const CENTER_STRENGTH: f64 = 0.05;
/// Padding added to the visual radius when resolving collisions.
const COLLIDE_MARGIN: f64 = 2.0;

/// Energy cutoff below which the simulation idles.
const ALPHA_MIN: f64 = 0.001;
/// Per-tick convergence rate toward the alpha target (1 - 0.001^(1/300)).
const ALPHA_DECAY: f64 = 0.0228;
/// Fraction of velocity retained each tick.
const VELOCITY_DECAY: f64 = 0.6;
/// Radius of the initial seeding circle around the center.
const SEED_RADIUS: f64 = 120.0;

/// Alpha target held while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;
/// Energy injected when the viewport is resized.
pub const RESIZE_ALPHA: f64 = 0.3;

/// Simulation lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Cooled below the cutoff; ticks do nothing.
	Idle,
	/// Actively integrating toward equilibrium.
	Settling,
}

/// Simulation-owned body for one graph node.
#[derive(Clone, Debug)]
pub struct SimNode {
	/// Id of the graph node this body belongs to.
	pub id: u64,
	/// Current position.
	pub x: f64,
	/// Current position.
	pub y: f64,
	/// Velocity, internal to the engine.
	pub vx: f64,
	/// Velocity, internal to the engine.
	pub vy: f64,
	/// Pinned position; present only while the node is being dragged.
	pub fx: Option<f64>,
	/// Pinned position; present only while the node is being dragged.
	pub fy: Option<f64>,
	/// Visual radius from the encoding; collision radius adds the margin.
	pub radius: f64,
}

impl SimNode {
	fn pinned(&self) -> bool {
		self.fx.is_some()
	}
}

/// A link resolved to node indices. The original ids stay alongside the
/// resolved references for the link's whole lifetime.
#[derive(Clone, Debug)]
pub struct SimLink {
	/// Source node id as given in the payload.
	pub source_id: u64,
	/// Target node id as given in the payload.
	pub target_id: u64,
	/// Resolved index of the source node.
	pub source: usize,
	/// Resolved index of the target node.
	pub target: usize,
	/// Stroke width from the encoding, resolved once.
	pub width: f64,
}

/// The force simulation over one loaded graph.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	alpha: f64,
	alpha_target: f64,
	phase: Phase,
	center: (f64, f64),
}

impl Simulation {
	/// Build a simulation for `data`, seeding nodes on a circle around the
	/// viewport center. Fails on a link whose endpoint id does not resolve.
	pub fn new(
		data: &GraphData,
		encoding: &Encoding,
		width: f64,
		height: f64,
	) -> Result<Self, GraphError> {
		let center = (width / 2.0, height / 2.0);
		let count = data.nodes.len().max(1);

		let nodes: Vec<SimNode> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = i as f64 * TAU / count as f64;
				SimNode {
					id: node.id,
					x: center.0 + SEED_RADIUS * angle.cos(),
					y: center.1 + SEED_RADIUS * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					fx: None,
					fy: None,
					radius: encoding.node_radius(node.collab_count),
				}
			})
			.collect();

		let id_to_idx: HashMap<u64, usize> =
			nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();

		let mut links = Vec::with_capacity(data.links.len());
		for (index, link) in data.links.iter().enumerate() {
			let resolve = |id: u64| {
				id_to_idx
					.get(&id)
					.copied()
					.ok_or(GraphError::UnknownNode { index, id })
			};
			links.push(SimLink {
				source_id: link.source,
				target_id: link.target,
				source: resolve(link.source)?,
				target: resolve(link.target)?,
				width: encoding.link_width(link.weight),
			});
		}

		Ok(Self {
			nodes,
			links,
			alpha: 1.0,
			alpha_target: 0.0,
			phase: Phase::Settling,
			center,
		})
	}

	/// Node bodies in payload order.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Resolved links in payload order.
	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	/// Current lifecycle state.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Current energy value.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Retarget the centering force, e.g. after a viewport resize.
	pub fn set_center(&mut self, cx: f64, cy: f64) {
		self.center = (cx, cy);
	}

	/// Hold the energy at `target` so the simulation keeps settling while
	/// an interaction (a drag) is in progress.
	pub fn reheat_target(&mut self, target: f64) {
		self.alpha_target = target;
		self.phase = Phase::Settling;
	}

	/// Drop the energy target back to zero so the simulation cools
	/// naturally once the interaction ends.
	pub fn cool(&mut self) {
		self.alpha_target = 0.0;
	}

	/// Inject a one-off burst of energy, e.g. on resize.
	pub fn kick(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
		self.phase = Phase::Settling;
	}

	/// Pin a node to a fixed position. While pinned the node's position is
	/// treated as external input: forces still act on its neighbors, but
	/// the node itself does not move.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.fx = Some(x);
			node.fy = Some(y);
		}
	}

	/// Release a pinned node back to free placement.
	pub fn unpin(&mut self, index: usize) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.fx = None;
			node.fy = None;
		}
	}

	/// Advance one tick. Returns false when idle (positions untouched).
	pub fn tick(&mut self) -> bool {
		if self.phase == Phase::Idle || self.nodes.is_empty() {
			return false;
		}

		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;
		if self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN {
			self.phase = Phase::Idle;
			return false;
		}

		self.apply_link_force();
		self.apply_charge();
		self.apply_center();
		self.integrate();
		self.apply_collisions();
		true
	}

	/// Spring toward the fixed target separation along each link.
	fn apply_link_force(&mut self) {
		for link in &self.links {
			let (sx, sy) = (self.nodes[link.source].x, self.nodes[link.source].y);
			let (tx, ty) = (self.nodes[link.target].x, self.nodes[link.target].y);
			let (dx, dy) = (tx - sx, ty - sy);
			let dist = (dx * dx + dy * dy).sqrt().max(1.0);

			let pull = (dist - LINK_DISTANCE) * LINK_STRENGTH * self.alpha;
			let (fx, fy) = (dx / dist * pull, dy / dist * pull);

			let source = &mut self.nodes[link.source];
			source.vx += fx;
			source.vy += fy;
			let target = &mut self.nodes[link.target];
			target.vx -= fx;
			target.vy -= fy;
		}
	}

	/// All-pairs repulsion, inverse-square falloff.
	fn apply_charge(&mut self) {
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let (dx, dy) = (
					self.nodes[j].x - self.nodes[i].x,
					self.nodes[j].y - self.nodes[i].y,
				);
				let dist_sq = (dx * dx + dy * dy).max(1.0);
				let dist = dist_sq.sqrt();

				let force = CHARGE_STRENGTH * self.alpha / dist_sq;
				let (fx, fy) = (dx / dist * force, dy / dist * force);

				self.nodes[i].vx += fx;
				self.nodes[i].vy += fy;
				self.nodes[j].vx -= fx;
				self.nodes[j].vy -= fy;
			}
		}
	}

	/// Pull every node toward the viewport center.
	fn apply_center(&mut self) {
		let (cx, cy) = self.center;
		for node in &mut self.nodes {
			node.vx += (cx - node.x) * CENTER_STRENGTH * self.alpha;
			node.vy += (cy - node.y) * CENTER_STRENGTH * self.alpha;
		}
	}

	/// Apply velocities with decay. Pinned nodes are fixed input for the
	/// tick: position reasserted, velocity zeroed.
	fn integrate(&mut self) {
		for node in &mut self.nodes {
			if let (Some(fx), Some(fy)) = (node.fx, node.fy) {
				node.x = fx;
				node.y = fy;
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				node.vx *= VELOCITY_DECAY;
				node.vy *= VELOCITY_DECAY;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
	}

	/// Separate overlapping pairs by their collision radii. Pinned nodes do
	/// not move; the full correction goes to the free node.
	fn apply_collisions(&mut self) {
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let min_dist = self.nodes[i].radius + self.nodes[j].radius + 2.0 * COLLIDE_MARGIN;
				let (dx, dy) = (
					self.nodes[j].x - self.nodes[i].x,
					self.nodes[j].y - self.nodes[i].y,
				);
				let dist = (dx * dx + dy * dy).sqrt().max(0.01);
				if dist >= min_dist {
					continue;
				}

				let overlap = min_dist - dist;
				let (ux, uy) = (dx / dist, dy / dist);
				match (self.nodes[i].pinned(), self.nodes[j].pinned()) {
					(true, true) => {}
					(true, false) => {
						self.nodes[j].x += ux * overlap;
						self.nodes[j].y += uy * overlap;
					}
					(false, true) => {
						self.nodes[i].x -= ux * overlap;
						self.nodes[i].y -= uy * overlap;
					}
					(false, false) => {
						let half = overlap / 2.0;
						self.nodes[i].x -= ux * half;
						self.nodes[i].y -= uy * half;
						self.nodes[j].x += ux * half;
						self.nodes[j].y += uy * half;
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::collab_graph::types::{GraphLink, GraphNode};

	fn node(id: u64, collab_count: u32) -> GraphNode {
		GraphNode {
			id,
			name: format!("Person {id}"),
			department: "Engineering".into(),
			archetype: "Builder".into(),
			capabilities: vec![],
			capability_count: 0,
			collab_count,
		}
	}

	fn two_node_graph() -> GraphData {
		GraphData {
			nodes: vec![node(1, 5), node(2, 0)],
			links: vec![GraphLink {
				source: 1,
				target: 2,
				weight: 2.0,
			}],
		}
	}

	fn build(data: &GraphData) -> Simulation {
		let encoding = Encoding::new(data);
		Simulation::new(data, &encoding, 800.0, 600.0).unwrap()
	}

	#[test]
	fn links_resolve_to_indices_and_keep_ids() {
		let sim = build(&two_node_graph());
		let link = &sim.links()[0];
		assert_eq!((link.source, link.target), (0, 1));
		assert_eq!((link.source_id, link.target_id), (1, 2));
		assert!(link.width > 0.0);
	}

	#[test]
	fn dangling_link_fails_construction() {
		let mut data = two_node_graph();
		data.links[0].target = 42;
		let encoding = Encoding::new(&data);
		match Simulation::new(&data, &encoding, 800.0, 600.0) {
			Err(GraphError::UnknownNode { id: 42, .. }) => {}
			other => panic!("expected UnknownNode, got {:?}", other.map(|_| ())),
		}
	}

	#[test]
	fn alpha_decays_until_idle() {
		let mut sim = build(&two_node_graph());
		assert_eq!(sim.phase(), Phase::Settling);
		for _ in 0..10_000 {
			if !sim.tick() {
				break;
			}
		}
		assert_eq!(sim.phase(), Phase::Idle);
		assert!(sim.alpha() < ALPHA_MIN);
		// Idle ticks are no-ops.
		let snapshot: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();
		assert!(!sim.tick());
		for (node, (x, y)) in sim.nodes().iter().zip(snapshot) {
			assert_eq!((node.x, node.y), (x, y));
		}
	}

	#[test]
	fn kick_resumes_an_idle_simulation() {
		let mut sim = build(&two_node_graph());
		while sim.tick() {}
		sim.kick(RESIZE_ALPHA);
		assert_eq!(sim.phase(), Phase::Settling);
		assert!(sim.tick());
	}

	#[test]
	fn reheat_target_keeps_the_simulation_warm() {
		let mut sim = build(&two_node_graph());
		sim.reheat_target(DRAG_ALPHA_TARGET);
		for _ in 0..2_000 {
			sim.tick();
		}
		// Alpha converges to the target instead of cooling past the cutoff.
		assert_eq!(sim.phase(), Phase::Settling);
		assert!((sim.alpha() - DRAG_ALPHA_TARGET).abs() < 0.01);
		sim.cool();
		for _ in 0..10_000 {
			if !sim.tick() {
				break;
			}
		}
		assert_eq!(sim.phase(), Phase::Idle);
	}

	#[test]
	fn pinned_node_is_fixed_input() {
		let mut sim = build(&two_node_graph());
		sim.pin(0, 100.0, 100.0);
		for _ in 0..50 {
			sim.tick();
		}
		let pinned = &sim.nodes()[0];
		assert_eq!((pinned.x, pinned.y), (100.0, 100.0));
		assert_eq!((pinned.vx, pinned.vy), (0.0, 0.0));
		// The free neighbor is pulled toward the pinned position.
		let free = &sim.nodes()[1];
		let dist = ((free.x - 100.0).powi(2) + (free.y - 100.0).powi(2)).sqrt();
		assert!(dist < 400.0);
	}

	#[test]
	fn unpin_clears_both_pin_fields() {
		let mut sim = build(&two_node_graph());
		sim.pin(0, 50.0, 60.0);
		assert!(sim.nodes()[0].fx.is_some() && sim.nodes()[0].fy.is_some());
		sim.unpin(0);
		assert!(sim.nodes()[0].fx.is_none() && sim.nodes()[0].fy.is_none());
		// The simulation keeps adjusting the released node.
		sim.kick(RESIZE_ALPHA);
		assert!(sim.tick());
	}

	#[test]
	fn collision_separates_overlapping_nodes() {
		let data = GraphData {
			nodes: vec![node(1, 0), node(2, 0)],
			links: vec![],
		};
		let mut sim = build(&data);
		// Force both bodies onto the same spot, then let one tick resolve it.
		sim.nodes[0].x = 400.0;
		sim.nodes[0].y = 300.0;
		sim.nodes[1].x = 401.0;
		sim.nodes[1].y = 300.0;
		sim.tick();
		let (a, b) = (&sim.nodes()[0], &sim.nodes()[1]);
		let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		let min_dist = a.radius + b.radius + 2.0 * COLLIDE_MARGIN;
		assert!(dist >= min_dist - 1e-6, "dist {dist} < min {min_dist}");
	}

	#[test]
	fn set_center_retargets_the_pull() {
		let data = GraphData {
			nodes: vec![node(1, 0)],
			links: vec![],
		};
		let mut sim = build(&data);
		sim.set_center(0.0, 0.0);
		sim.kick(1.0);
		let before = {
			let n = &sim.nodes()[0];
			(n.x * n.x + n.y * n.y).sqrt()
		};
		for _ in 0..200 {
			sim.tick();
		}
		let after = {
			let n = &sim.nodes()[0];
			(n.x * n.x + n.y * n.y).sqrt()
		};
		assert!(after < before, "node did not move toward the new center");
	}

	#[test]
	fn single_node_stays_finite() {
		let data = GraphData {
			nodes: vec![node(1, 0)],
			links: vec![],
		};
		let mut sim = build(&data);
		for _ in 0..500 {
			sim.tick();
		}
		let n = &sim.nodes()[0];
		assert!(n.x.is_finite() && n.y.is_finite());
	}

	#[test]
	fn empty_graph_ticks_are_noops() {
		let data = GraphData::default();
		let mut sim = build(&data);
		assert!(!sim.tick());
	}
}
