//! SVG element binding for the graph view. Everything here is recreated on
//! every render; [`reposition`] only touches geometry attributes.

use web_sys::{Document, Element};

use super::scene;
use super::state::RenderState;
use super::types::GraphPayload;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Handles to the created primitives, indexed like the payload arrays.
pub struct Layers {
	pub links: Vec<Element>,
	pub nodes: Vec<Element>,
	pub labels: Vec<Element>,
}

pub fn clear(surface: &Element) {
	while let Some(child) = surface.first_child() {
		let _ = surface.remove_child(&child);
	}
}

fn layer(document: &Document, surface: &Element, class: &str) -> Option<Element> {
	let group = document.create_element_ns(Some(SVG_NS), "g").ok()?;
	let _ = group.set_attribute("class", class);
	let _ = surface.append_child(&group);
	Some(group)
}

pub fn build(
	document: &Document,
	surface: &Element,
	payload: &GraphPayload,
	state: &RenderState,
) -> Option<Layers> {
	// Creation order is the z-order: links under nodes under labels.
	let link_layer = layer(document, surface, "z-c-rel-link")?;
	let mut links = Vec::with_capacity(state.links.len());
	for _ in &state.links {
		let line = document.create_element_ns(Some(SVG_NS), "line").ok()?;
		let _ = line.set_attribute("stroke", scene::LINK_STROKE);
		let _ = line.set_attribute("stroke-width", scene::LINK_STROKE_WIDTH);
		let _ = link_layer.append_child(&line);
		links.push(line);
	}

	let node_layer = layer(document, surface, "z-c-node")?;
	let mut nodes = Vec::with_capacity(payload.nodes.len());
	for node in &payload.nodes {
		let circle = document.create_element_ns(Some(SVG_NS), "circle").ok()?;
		let _ = circle.set_attribute("r", &scene::node_radius(node.kind).to_string());
		let _ = circle.set_attribute("fill", scene::NODE_FILL);
		// tooltip with the raw id
		let title = document.create_element_ns(Some(SVG_NS), "title").ok()?;
		title.set_text_content(Some(&node.id));
		let _ = circle.append_child(&title);
		let _ = node_layer.append_child(&circle);
		nodes.push(circle);
	}

	let label_layer = layer(document, surface, "z-c-label")?;
	let mut labels = Vec::with_capacity(payload.nodes.len());
	for node in &payload.nodes {
		let text = document.create_element_ns(Some(SVG_NS), "text").ok()?;
		text.set_text_content(Some(&scene::label_text(node, payload)));
		let _ = text.set_attribute("font-size", scene::label_font_size(node.kind));
		let _ = label_layer.append_child(&text);
		labels.push(text);
	}

	Some(Layers {
		links,
		nodes,
		labels,
	})
}

/// Applies the current simulation positions to all three layers.
pub fn reposition(layers: &Layers, state: &RenderState) {
	for (line, &(source, target)) in layers.links.iter().zip(&state.links) {
		let (x1, y1) = state.node_position(source);
		let (x2, y2) = state.node_position(target);
		let _ = line.set_attribute("x1", &x1.to_string());
		let _ = line.set_attribute("y1", &y1.to_string());
		let _ = line.set_attribute("x2", &x2.to_string());
		let _ = line.set_attribute("y2", &y2.to_string());
	}
	for (i, text) in layers.labels.iter().enumerate() {
		let (x, y) = state.node_position(i);
		let (dx, dy) = scene::label_offset(state.kinds[i]);
		let _ = text.set_attribute("x", &(x + dx).to_string());
		let _ = text.set_attribute("y", &(y + dy).to_string());
	}
	for (i, circle) in layers.nodes.iter().enumerate() {
		let (x, y) = state.node_position(i);
		let _ = circle.set_attribute("cx", &x.to_string());
		let _ = circle.set_attribute("cy", &y.to_string());
	}
}
