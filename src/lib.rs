//! collab-graph: interactive visualization of a collaboration network.
//!
//! This crate provides a WASM-based graph visualization that renders
//! people and their shared-team collaborations with physics-based layout,
//! pan/zoom, dragging, hover tooltips, filtering, and a detail panel.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

pub mod components;

pub use components::collab_graph::{
	CollabGraphCanvas, EmptyGraphNotice, GraphData, GraphError, GraphLink, GraphNode,
};

/// Endpoint supplying the graph payload.
const DATA_URL: &str = "/graph/data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("collab-graph: logging initialized");
}

/// Fetch, parse, and validate the graph payload. Called exactly once per
/// page lifecycle; there is no retry policy.
async fn fetch_graph_data() -> Result<GraphData, GraphError> {
	let window = web_sys::window().ok_or_else(|| GraphError::Fetch("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_str(DATA_URL))
		.await
		.map_err(|e| GraphError::Fetch(format!("{e:?}")))?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| GraphError::Fetch("response was not a Response".into()))?;
	if !response.ok() {
		return Err(GraphError::Fetch(format!("status {}", response.status())));
	}
	let text = JsFuture::from(
		response
			.text()
			.map_err(|e| GraphError::Fetch(format!("{e:?}")))?,
	)
	.await
	.map_err(|e| GraphError::Fetch(format!("{e:?}")))?;
	let text = text
		.as_string()
		.ok_or_else(|| GraphError::Fetch("response body was not text".into()))?;

	let data = GraphData::from_json(&text)?;
	info!(
		"collab-graph: loaded {} nodes, {} links",
		data.nodes.len(),
		data.links.len()
	);
	Ok(data)
}

/// Main application component.
///
/// Starts the one-shot data fetch and renders the visualization once the
/// payload arrives. A fetch, parse, or validation failure is logged and
/// leaves the visualization unrendered; an empty graph renders an
/// explanatory placeholder instead of a scene.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph: RwSignal<Option<GraphData>> = RwSignal::new(None);
	spawn_local(async move {
		match fetch_graph_data().await {
			Ok(data) => graph.set(Some(data)),
			Err(e) => error!("collab-graph: {e}"),
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Collaboration Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			{move || {
				graph
					.get()
					.map(|data| {
						if data.nodes.is_empty() {
							view! { <EmptyGraphNotice /> }.into_any()
						} else {
							view! { <CollabGraphCanvas data=data fullscreen=true /> }.into_any()
						}
					})
			}}
			<div class="graph-overlay">
				<h1>"Collaboration Network"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Scroll to zoom. Drag background to pan."
				</p>
			</div>
		</div>
	}
}
