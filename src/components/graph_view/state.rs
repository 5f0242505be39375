//! Per-render state: drawing geometry, layout force policy, and the
//! resolved graph the simulation runs on. Rebuilt from scratch for every
//! render; nothing survives across calls.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::sim::{AxisTarget, LayoutForces, Ring, SimNode, Simulation};
use super::types::{GraphPayload, NodeKind};

const MARGIN: f64 = 20.0;
const PLACEMENT_INSET: f64 = 50.0;

const CHARGE_DESCRIPTOR: f64 = -40.0;
const CHARGE_DEFAULT: f64 = -200.0;
const COLLIDE_RADIUS: f64 = 25.0;
const RING_RADIUS: f64 = 50.0;
const RING_STRENGTH: f64 = 15.0;
// Layout experiment carried over from the graph view this replaces; only
// active when the view opts in.
const AXIS_STRENGTH_DESCRIPTOR: (f64, f64) = (-2.0, -10.0);

/// Usable drawing area derived from the declared surface dimensions.
#[derive(Clone, Copy, Debug)]
pub struct Geometry {
	pub width: f64,
	pub height: f64,
	pub center_x: f64,
	pub center_y: f64,
	pub placement_radius: f64,
}

impl Geometry {
	pub fn from_surface(surface_width: f64, surface_height: f64) -> Self {
		let width = surface_width - MARGIN;
		let height = surface_height - MARGIN;
		Self {
			width,
			height,
			center_x: width / 2.0,
			center_y: height / 2.0,
			placement_radius: (width.min(height) / 2.0 - PLACEMENT_INSET).max(0.0),
		}
	}
}

fn charge_for(kind: NodeKind) -> f64 {
	// category nodes repel each other harder than descriptors
	if kind == NodeKind::Descriptor {
		CHARGE_DESCRIPTOR
	} else {
		CHARGE_DEFAULT
	}
}

fn ring_strength_for(kind: NodeKind) -> f64 {
	// descriptors stay off the inner ring and get pushed outward by charge
	if kind == NodeKind::Descriptor {
		0.0
	} else {
		RING_STRENGTH
	}
}

fn axis_strength_for(kind: NodeKind) -> (f64, f64) {
	if kind == NodeKind::Descriptor {
		AXIS_STRENGTH_DESCRIPTOR
	} else {
		(0.0, 0.0)
	}
}

pub struct RenderState {
	pub kinds: Vec<NodeKind>,
	/// Links resolved to node indices via the per-render id map; the wire
	/// objects keep their id strings.
	pub links: Vec<(usize, usize)>,
	sim: Simulation,
}

impl RenderState {
	pub fn new(payload: &GraphPayload, geometry: &Geometry, axis_pull: bool) -> Self {
		let mut id_to_idx = HashMap::new();
		let mut bodies = Vec::with_capacity(payload.nodes.len());
		for (i, node) in payload.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / payload.nodes.len() as f64;
			let mut body = SimNode::at(
				geometry.center_x + geometry.placement_radius * angle.cos(),
				geometry.center_y + geometry.placement_radius * angle.sin(),
			);
			body.charge = charge_for(node.kind);
			body.ring_strength = ring_strength_for(node.kind);
			if axis_pull {
				body.axis_strength = axis_strength_for(node.kind);
			}
			bodies.push(body);
			id_to_idx.insert(node.id.clone(), i);
		}

		let mut links = Vec::with_capacity(payload.links.len());
		for link in &payload.links {
			if let (Some(&source), Some(&target)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				links.push((source, target));
			}
		}

		let forces = LayoutForces {
			collide_radius: COLLIDE_RADIUS,
			ring: Ring {
				radius: RING_RADIUS,
				cx: geometry.center_x,
				cy: geometry.center_y,
			},
			axis: axis_pull.then_some(AxisTarget {
				cx: geometry.center_x,
				cy: geometry.center_y,
			}),
		};
		let sim = Simulation::new(bodies, &links, forces);
		let kinds = payload.nodes.iter().map(|n| n.kind).collect();
		Self { kinds, links, sim }
	}

	pub fn tick(&mut self) -> bool {
		self.sim.tick()
	}

	pub fn node_position(&self, index: usize) -> (f64, f64) {
		let node = &self.sim.nodes()[index];
		(node.x, node.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn payload() -> GraphPayload {
		serde_json::from_value(serde_json::json!({
			"status": "OK",
			"nodes": [
				{"id": "A", "type": "concept", "group": 1},
				{"id": "D", "type": "descriptor", "group": 2},
				{"id": "V", "type": "thsys", "group": 0}
			],
			"links": [
				{"source": "A", "target": "V", "relation": "related"},
				{"source": "D", "target": "A"}
			],
			"labels": {"A": "Apple"}
		}))
		.unwrap()
	}

	#[test]
	fn geometry_derives_from_surface_dimensions() {
		let geo = Geometry::from_surface(600.0, 500.0);
		assert_eq!(geo.width, 580.0);
		assert_eq!(geo.height, 480.0);
		assert_eq!(geo.center_x, 290.0);
		assert_eq!(geo.center_y, 240.0);
		assert_eq!(geo.placement_radius, 190.0);
	}

	#[test]
	fn charge_policy_per_kind() {
		assert_eq!(charge_for(NodeKind::Descriptor), -40.0);
		assert_eq!(charge_for(NodeKind::Concept), -200.0);
		assert_eq!(charge_for(NodeKind::Thsys), -200.0);
	}

	#[test]
	fn ring_policy_excludes_descriptors() {
		assert_eq!(ring_strength_for(NodeKind::Descriptor), 0.0);
		assert_eq!(ring_strength_for(NodeKind::Concept), 15.0);
	}

	#[test]
	fn links_resolve_to_node_indices() {
		let geo = Geometry::from_surface(600.0, 500.0);
		let state = RenderState::new(&payload(), &geo, false);
		assert_eq!(state.links, vec![(0, 2), (1, 0)]);
		assert_eq!(state.kinds[1], NodeKind::Descriptor);
	}

	#[test]
	fn nodes_seed_on_the_placement_circle() {
		let geo = Geometry::from_surface(600.0, 500.0);
		let state = RenderState::new(&payload(), &geo, false);
		for i in 0..3 {
			let (x, y) = state.node_position(i);
			let r = (x - geo.center_x).hypot(y - geo.center_y);
			assert!((r - geo.placement_radius).abs() < 1e-9);
		}
	}
}
