//! Graph data structures for the collaboration network payload.
//!
//! The payload is fetched once at startup and is immutable afterwards; the
//! simulation keeps its own position state in [`super::simulation::SimNode`]
//! rather than mutating these structs.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating the graph payload.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The graph data request failed or returned a non-success status.
	#[error("graph data fetch failed: {0}")]
	Fetch(String),
	/// The payload was not valid JSON for the expected shape.
	#[error("graph data parse failed: {0}")]
	Parse(#[from] serde_json::Error),
	/// A link references a node id that is not present in `nodes`.
	/// Fatal for the dataset: dropping the edge silently would mask
	/// upstream data bugs.
	#[error("link {index} references unknown node id {id}")]
	UnknownNode {
		/// Position of the offending link in the payload.
		index: usize,
		/// The id that did not resolve.
		id: u64,
	},
}

/// A person in the collaboration network.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Stable unique key. Used to reference nodes in links and to address
	/// the person's profile page.
	pub id: u64,
	/// Full display name.
	pub name: String,
	/// Department name; free-form category.
	pub department: String,
	/// Collaboration-style category. Values outside the fixed set
	/// (including "Unknown") fall back to a neutral color.
	pub archetype: String,
	/// Capability names, truncated upstream; `capability_count` carries the
	/// full total.
	#[serde(default)]
	pub capabilities: Vec<String>,
	/// Total number of capabilities, independent of `capabilities.len()`.
	#[serde(default)]
	pub capability_count: u32,
	/// Weighted collaboration degree; drives node radius.
	#[serde(default)]
	pub collab_count: u32,
}

impl GraphNode {
	/// First whitespace token of the name, used as the on-canvas label.
	pub fn first_name(&self) -> &str {
		self.name.split_whitespace().next().unwrap_or("")
	}
}

/// A collaboration edge between two people.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node id.
	pub source: u64,
	/// Target node id.
	pub target: u64,
	/// Number of shared teams, always >= 1 upstream; drives link width.
	pub weight: f64,
}

/// Complete graph payload: ordered nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse and validate a JSON payload.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		let data: GraphData = serde_json::from_str(text)?;
		data.validate()?;
		Ok(data)
	}

	/// Check that every link endpoint resolves to a node id.
	pub fn validate(&self) -> Result<(), GraphError> {
		let ids: HashSet<u64> = self.nodes.iter().map(|n| n.id).collect();
		for (index, link) in self.links.iter().enumerate() {
			for id in [link.source, link.target] {
				if !ids.contains(&id) {
					return Err(GraphError::UnknownNode { index, id });
				}
			}
		}
		Ok(())
	}

	/// Distinct department names, deduplicated and sorted. Computed once
	/// from the loaded graph to populate the department filter.
	pub fn distinct_departments(&self) -> Vec<String> {
		Self::distinct(self.nodes.iter().map(|n| n.department.as_str()))
	}

	/// Distinct archetype names, deduplicated and sorted. Populates both
	/// the archetype filter and the color legend.
	pub fn distinct_archetypes(&self) -> Vec<String> {
		Self::distinct(self.nodes.iter().map(|n| n.archetype.as_str()))
	}

	fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
		let mut out: Vec<String> = values
			.collect::<HashSet<_>>()
			.into_iter()
			.map(str::to_string)
			.collect();
		out.sort();
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode {
					id: 1,
					name: "Ada Lovelace".into(),
					department: "Engineering".into(),
					archetype: "Builder".into(),
					capabilities: vec!["Rust".into(), "Compilers".into()],
					capability_count: 4,
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
		}
	}

	#[test]
	fn parses_payload_shape() {
		let json = r#"{
			"nodes": [
				{"id": 1, "name": "Ada Lovelace", "department": "Engineering",
				 "archetype": "Builder", "capabilities": ["Rust"],
				 "capability_count": 3, "collab_count": 5},
				{"id": 2, "name": "Alan Turing", "department": "Research",
				 "archetype": "Researcher", "capabilities": [],
				 "capability_count": 0, "collab_count": 0}
			],
			"links": [{"source": 1, "target": 2, "weight": 2}]
		}"#;
		let data = GraphData::from_json(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.nodes[0].capability_count, 3);
		assert!((data.links[0].weight - 2.0).abs() < f64::EPSILON);
	}

	#[test]
	fn unknown_json_fields_are_ignored() {
		// The endpoint also emits per-link team names; nothing here
		// consumes them.
		let json = r#"{
			"nodes": [{"id": 1, "name": "Ada", "department": "E",
			           "archetype": "Builder"}],
			"links": []
		}"#;
		let data = GraphData::from_json(json).unwrap();
		assert!(data.nodes[0].capabilities.is_empty());
		assert_eq!(data.nodes[0].collab_count, 0);
	}

	#[test]
	fn dangling_link_is_fatal() {
		let mut data = sample();
		data.links.push(GraphLink {
			source: 1,
			target: 99,
			weight: 1.0,
		});
		match data.validate() {
			Err(GraphError::UnknownNode { index, id }) => {
				assert_eq!(index, 1);
				assert_eq!(id, 99);
			}
			other => panic!("expected UnknownNode, got {other:?}"),
		}
	}

	#[test]
	fn first_name_is_leading_token() {
		let data = sample();
		assert_eq!(data.nodes[0].first_name(), "Ada");
		let nameless = GraphNode {
			name: "   ".into(),
			..data.nodes[0].clone()
		};
		assert_eq!(nameless.first_name(), "");
	}

	#[test]
	fn distinct_lists_are_sorted_and_deduped() {
		let mut data = sample();
		data.nodes.push(GraphNode {
			id: 3,
			name: "Grace Hopper".into(),
			department: "Engineering".into(),
			archetype: "Builder".into(),
			capabilities: vec![],
			capability_count: 0,
			collab_count: 1,
		});
		assert_eq!(data.distinct_departments(), vec!["Engineering", "Research"]);
		assert_eq!(data.distinct_archetypes(), vec!["Builder", "Researcher"]);
	}
}
