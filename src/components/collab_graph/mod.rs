//! Collaboration network visualization component.
//!
//! Renders an interactive force-directed graph of people and their
//! collaboration edges on an HTML canvas with:
//! - Physics-based node positioning via a force simulation with an
//!   explicit idle/settling lifecycle
//! - Pan, zoom, and node dragging interactions
//! - Hover tooltips and a click-to-open detail side panel
//! - Text search and department/archetype filtering expressed as smooth
//!   opacity transitions
//! - A color legend keyed by archetype
//!
//! # Example
//!
//! ```ignore
//! use collab_graph::{CollabGraphCanvas, GraphData};
//!
//! let data: GraphData = serde_json::from_str(payload)?;
//! data.validate()?;
//!
//! view! { <CollabGraphCanvas data=data fullscreen=true /> }
//! ```

mod component;
pub mod encoding;
pub mod filter;
mod panels;
mod render;
pub mod simulation;
mod state;
pub mod theme;
mod types;

pub use component::CollabGraphCanvas;
pub use panels::EmptyGraphNotice;
pub use types::{GraphData, GraphError, GraphLink, GraphNode};
