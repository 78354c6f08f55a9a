//! DOM overlay chrome layered over the canvas: filter bar, color legend,
//! hover tooltip, detail side panel, and the empty-graph placeholder.
//!
//! Styling is class-based and owned by the page; only positions and
//! archetype colors are set inline because they are data-driven.

use leptos::prelude::*;

use super::encoding::archetype_color;
use super::types::GraphNode;

/// Pointer-to-tooltip gap in pixels.
pub const TOOLTIP_OFFSET: f64 = 14.0;
/// Assumed tooltip box size used for edge clamping.
const TOOLTIP_WIDTH: f64 = 240.0;
const TOOLTIP_HEIGHT: f64 = 170.0;

/// How many capabilities the hover tooltip lists before truncating.
const TOOLTIP_CAPABILITY_LIMIT: usize = 3;

/// Tooltip placement relative to the pointer, flipped to the opposite side
/// of the pointer when the default position would cross the container's
/// right or bottom edge.
pub fn tooltip_position(
	pointer_x: f64,
	pointer_y: f64,
	container_width: f64,
	container_height: f64,
) -> (f64, f64) {
	let mut x = pointer_x + TOOLTIP_OFFSET;
	if x + TOOLTIP_WIDTH > container_width {
		x = pointer_x - TOOLTIP_OFFSET - TOOLTIP_WIDTH;
	}
	let mut y = pointer_y + TOOLTIP_OFFSET;
	if y + TOOLTIP_HEIGHT > container_height {
		y = pointer_y - TOOLTIP_OFFSET - TOOLTIP_HEIGHT;
	}
	(x, y)
}

/// Transient hover panel: name, categories, a capability preview, and the
/// collaboration count. Position tracks the pointer.
#[component]
pub fn NodeTooltip(
	node: GraphNode,
	pointer_x: f64,
	pointer_y: f64,
	container_width: f64,
	container_height: f64,
) -> impl IntoView {
	let (x, y) = tooltip_position(pointer_x, pointer_y, container_width, container_height);
	let capabilities = if node.capabilities.is_empty() {
		"none".to_string()
	} else {
		node.capabilities
			.iter()
			.take(TOOLTIP_CAPABILITY_LIMIT)
			.cloned()
			.collect::<Vec<_>>()
			.join(", ")
	};

	view! {
		<div class="graph-tooltip" style=format!("left: {x}px; top: {y}px;")>
			<div class="graph-tooltip-name">{node.name.clone()}</div>
			<div class="graph-tooltip-meta">
				{format!("{} · {}", node.archetype, node.department)}
			</div>
			<div class="graph-tooltip-capabilities">
				{format!("Capabilities: {capabilities}")}
			</div>
			<div class="graph-tooltip-collabs">
				{format!("{} collaborations", node.collab_count)}
			</div>
		</div>
	}
}

/// Persistent side panel with the full details of the selected person.
/// Single-panel state: the caller replaces its content on every selection.
#[component]
pub fn DetailPanel(node: GraphNode, on_close: Callback<()>) -> impl IntoView {
	let color = archetype_color(&node.archetype);
	let profile_href = format!("/profile/{}", node.id);

	view! {
		<div class="graph-detail-panel">
			<button class="graph-detail-close" on:click=move |_| on_close.run(())>
				"×"
			</button>
			<h2 class="graph-detail-name">{node.name.clone()}</h2>
			<span
				class="graph-archetype-badge"
				style=format!("background-color: {color};")
			>
				{node.archetype.clone()}
			</span>
			<div class="graph-detail-department">{node.department.clone()}</div>
			<div class="graph-detail-capabilities">
				<h3>{format!("Capabilities ({})", node.capability_count)}</h3>
				{if node.capabilities.is_empty() {
					view! { <p class="graph-detail-empty">"No capabilities listed."</p> }
						.into_any()
				} else {
					view! {
						<ul>
							{node
								.capabilities
								.iter()
								.map(|c| view! { <li>{c.clone()}</li> })
								.collect_view()}
						</ul>
					}
					.into_any()
				}}
			</div>
			<div class="graph-detail-collabs">
				{format!("{} collaborations", node.collab_count)}
			</div>
			<a class="graph-detail-profile" href=profile_href>
				"View Full Profile"
			</a>
		</div>
	}
}

/// Color legend for the archetypes present in the loaded graph. Swatches
/// resolve through the same fallback rule as the canvas.
#[component]
pub fn Legend(archetypes: Vec<String>) -> impl IntoView {
	view! {
		<div class="graph-legend">
			<h3>"Archetypes"</h3>
			{archetypes
				.into_iter()
				.map(|archetype| {
					let color = archetype_color(&archetype);
					view! {
						<div class="graph-legend-entry">
							<span
								class="graph-legend-swatch"
								style=format!("background-color: {color};")
							></span>
							<span>{archetype}</span>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Search input plus department and archetype selectors. Selector options
/// come from the distinct values of the loaded graph; the empty value
/// means "any".
#[component]
pub fn FilterBar(
	search: RwSignal<String>,
	department: RwSignal<String>,
	archetype: RwSignal<String>,
	departments: Vec<String>,
	archetypes: Vec<String>,
) -> impl IntoView {
	view! {
		<div class="graph-filter-bar">
			<input
				type="text"
				class="graph-filter-search"
				placeholder="Search by name..."
				prop:value=move || search.get()
				on:input=move |ev| search.set(event_target_value(&ev))
			/>
			<select
				class="graph-filter-department"
				prop:value=move || department.get()
				on:change=move |ev| department.set(event_target_value(&ev))
			>
				<option value="">"All Departments"</option>
				{departments
					.into_iter()
					.map(|d| view! { <option value=d.clone()>{d.clone()}</option> })
					.collect_view()}
			</select>
			<select
				class="graph-filter-archetype"
				prop:value=move || archetype.get()
				on:change=move |ev| archetype.set(event_target_value(&ev))
			>
				<option value="">"All Archetypes"</option>
				{archetypes
					.into_iter()
					.map(|a| view! { <option value=a.clone()>{a.clone()}</option> })
					.collect_view()}
			</select>
		</div>
	}
}

/// Placeholder shown instead of the canvas when the graph has no nodes.
#[component]
pub fn EmptyGraphNotice() -> impl IntoView {
	view! {
		<div class="graph-empty-notice">
			<p>"No collaboration data yet."</p>
			<p class="graph-empty-hint">
				"The network appears once people have shared a team."
			</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	#[test]
	fn tooltip_sits_beside_the_pointer_in_open_space() {
		let (x, y) = tooltip_position(100.0, 100.0, W, H);
		assert_eq!((x, y), (100.0 + TOOLTIP_OFFSET, 100.0 + TOOLTIP_OFFSET));
	}

	#[test]
	fn tooltip_flips_left_at_the_right_edge() {
		let (x, _) = tooltip_position(W - 20.0, 100.0, W, H);
		assert!(x + TOOLTIP_WIDTH <= W);
		assert!(x < W - 20.0);
	}

	#[test]
	fn tooltip_flips_up_at_the_bottom_edge() {
		let (_, y) = tooltip_position(100.0, H - 10.0, W, H);
		assert!(y + TOOLTIP_HEIGHT <= H);
		assert!(y < H - 10.0);
	}

	#[test]
	fn tooltip_never_overflows_the_corner() {
		let (x, y) = tooltip_position(W - 1.0, H - 1.0, W, H);
		assert!(x + TOOLTIP_WIDTH <= W);
		assert!(y + TOOLTIP_HEIGHT <= H);
	}
}
