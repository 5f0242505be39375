//! Wire types for the graph endpoint.
//!
//! Response format, example:
//!
//! ```json
//! {
//!   "status": "OK",
//!   "nodes": [ { "id": "26288-1", "type": "concept", "group": 6 } ],
//!   "links": [ { "source": "26288-1", "target": "V", "relation": "related" } ],
//!   "labels": { "26288-1": "Monetary policy" }
//! }
//! ```

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

/// Node category as reported by the backend. Unrecognized values are kept
/// renderable via [`NodeKind::Other`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Concept,
	Descriptor,
	Thsys,
	#[serde(other)]
	Other,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	pub group: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub relation: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphPayload {
	pub status: String,
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
	#[serde(default)]
	pub labels: HashMap<String, String>,
}

#[derive(Debug, Error)]
pub enum PayloadError {
	#[error("duplicate node id: {0}")]
	DuplicateNode(String),
	#[error("link references unknown node id: {0}")]
	UnknownNode(String),
}

impl GraphPayload {
	pub fn is_ok(&self) -> bool {
		self.status == "OK"
	}

	/// Checks the payload invariants: node ids unique, every link endpoint
	/// present among the nodes.
	pub fn validate(&self) -> Result<(), PayloadError> {
		let mut ids = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(PayloadError::DuplicateNode(node.id.clone()));
			}
		}
		for link in &self.links {
			for endpoint in [&link.source, &link.target] {
				if !ids.contains(endpoint.as_str()) {
					return Err(PayloadError::UnknownNode(endpoint.clone()));
				}
			}
		}
		Ok(())
	}

	/// Display label for a node id, falling back to the raw id.
	pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
		self.labels.get(id).map(String::as_str).unwrap_or(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> GraphPayload {
		serde_json::from_value(serde_json::json!({
			"status": "OK",
			"nodes": [
				{"id": "A", "type": "concept", "group": 1},
				{"id": "V", "type": "thsys", "group": 0}
			],
			"links": [
				{"source": "A", "target": "V", "relation": "related"}
			],
			"labels": {"A": "Apple"}
		}))
		.unwrap()
	}

	#[test]
	fn decodes_example_payload() {
		let payload = sample();
		assert!(payload.is_ok());
		assert_eq!(payload.nodes.len(), 2);
		assert_eq!(payload.nodes[0].kind, NodeKind::Concept);
		assert_eq!(payload.nodes[1].kind, NodeKind::Thsys);
		assert_eq!(payload.nodes[1].group, 0);
		assert_eq!(payload.links.len(), 1);
		assert_eq!(payload.links[0].relation, "related");
	}

	#[test]
	fn labels_map_and_relation_are_optional() {
		let payload: GraphPayload = serde_json::from_value(serde_json::json!({
			"status": "OK",
			"nodes": [{"id": "A", "type": "descriptor", "group": 2}],
			"links": []
		}))
		.unwrap();
		assert!(payload.labels.is_empty());

		let link: GraphLink =
			serde_json::from_value(serde_json::json!({"source": "A", "target": "B"})).unwrap();
		assert_eq!(link.relation, "");
	}

	#[test]
	fn unknown_kind_maps_to_other() {
		let node: GraphNode = serde_json::from_value(serde_json::json!({
			"id": "X", "type": "document", "group": 3
		}))
		.unwrap();
		assert_eq!(node.kind, NodeKind::Other);
	}

	#[test]
	fn label_resolution_falls_back_to_id() {
		let payload = sample();
		assert_eq!(payload.label_for("A"), "Apple");
		assert_eq!(payload.label_for("V"), "V");
	}

	#[test]
	fn validate_accepts_consistent_payload() {
		assert!(sample().validate().is_ok());
	}

	#[test]
	fn validate_rejects_dangling_link() {
		let payload: GraphPayload = serde_json::from_value(serde_json::json!({
			"status": "OK",
			"nodes": [{"id": "A", "type": "concept", "group": 1}],
			"links": [{"source": "A", "target": "missing"}]
		}))
		.unwrap();
		assert!(matches!(
			payload.validate(),
			Err(PayloadError::UnknownNode(id)) if id == "missing"
		));
	}

	#[test]
	fn validate_rejects_duplicate_node_id() {
		let payload: GraphPayload = serde_json::from_value(serde_json::json!({
			"status": "OK",
			"nodes": [
				{"id": "A", "type": "concept", "group": 1},
				{"id": "A", "type": "descriptor", "group": 2}
			],
			"links": []
		}))
		.unwrap();
		assert!(matches!(
			payload.validate(),
			Err(PayloadError::DuplicateNode(id)) if id == "A"
		));
	}
}
