//! Text search and category filtering.
//!
//! Filter inputs are captured as one immutable [`FilterState`] value,
//! rebuilt on every input event and fed to the pure [`NodeVisual::compute`]
//! mapping. Nothing here touches the simulation: filtering is expressed
//! purely as per-node visibility and highlight flags that the renderer
//! turns into opacity.

use super::types::GraphNode;

/// Snapshot of the filter inputs. An empty string means "any".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
	/// Case-insensitive substring matched against node names.
	pub search: String,
	/// Exact department match.
	pub department: String,
	/// Exact archetype match.
	pub archetype: String,
}

impl FilterState {
	/// Whether any filter input is non-empty. Drives the uniform link
	/// dimming: links are never filtered per endpoint.
	pub fn is_active(&self) -> bool {
		!self.search.is_empty() || !self.department.is_empty() || !self.archetype.is_empty()
	}
}

/// Per-node outcome of applying a [`FilterState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeVisual {
	/// Node passes all active filters; renders at full opacity when true,
	/// dimmed (but still simulated and interactive) when false.
	pub visible: bool,
	/// Name contains the non-empty search term. Independent of the
	/// category filters; drives the emphasized highlight ring.
	pub search_hit: bool,
}

impl NodeVisual {
	/// Apply `filter` to one node.
	pub fn compute(node: &GraphNode, filter: &FilterState) -> Self {
		let search = filter.search.to_lowercase();
		let name_matches = search.is_empty() || node.name.to_lowercase().contains(&search);

		let department_matches =
			filter.department.is_empty() || node.department == filter.department;
		let archetype_matches = filter.archetype.is_empty() || node.archetype == filter.archetype;

		Self {
			visible: name_matches && department_matches && archetype_matches,
			search_hit: !search.is_empty() && node.name.to_lowercase().contains(&search),
		}
	}
}
