//! Visual policy: what each node and link looks like, independent of the
//! simulation engine and of the DOM.

use super::types::{GraphNode, GraphPayload, NodeKind};

pub const LINK_STROKE: &str = "black";
pub const LINK_STROKE_WIDTH: &str = "1";
pub const NODE_FILL: &str = "#AAA";

/// Descriptor markers render smaller than category and concept nodes.
pub fn node_radius(kind: NodeKind) -> f64 {
	if kind == NodeKind::Descriptor { 5.0 } else { 10.0 }
}

pub fn label_font_size(kind: NodeKind) -> &'static str {
	if kind == NodeKind::Descriptor {
		"12px"
	} else {
		"15px"
	}
}

/// Offset of the label anchor from the node center, sized so the text
/// clears the marker.
pub fn label_offset(kind: NodeKind) -> (f64, f64) {
	if kind == NodeKind::Descriptor {
		(-2.0, -6.0)
	} else {
		(-5.0, -12.0)
	}
}

/// Thesaurus-system nodes show their category number; everything else shows
/// the resolved label.
pub fn label_text(node: &GraphNode, payload: &GraphPayload) -> String {
	if node.kind == NodeKind::Thsys {
		node.group.to_string()
	} else {
		payload.label_for(&node.id).to_owned()
	}
}
