//! UI components.

pub mod collab_graph;
