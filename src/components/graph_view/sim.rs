//! Force simulation driving the graph layout.
//!
//! Velocity-based integration with a decaying alpha schedule. The engine
//! knows nothing about wire or DOM types: nodes carry positions, velocities
//! and per-node force coefficients, links are index pairs. Forces applied
//! per tick, in order: link attraction, many-body charge, collision,
//! radial ring pull, optional axis pulls.

const ALPHA_MIN: f64 = 0.001;
const ALPHA_DECAY_TICKS: f64 = 300.0;
const VELOCITY_DECAY: f64 = 0.6;
const LINK_DISTANCE: f64 = 30.0;
const COLLIDE_STRENGTH: f64 = 0.7;
const DISTANCE_MIN2: f64 = 1.0;

/// A simulated body. Coefficients default to zero (force inactive for this
/// node) and are assigned by the caller.
#[derive(Clone, Debug)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Many-body strength; negative repels.
	pub charge: f64,
	/// Pull toward the layout ring.
	pub ring_strength: f64,
	/// Per-axis pull toward the axis target, when one is configured.
	pub axis_strength: (f64, f64),
}

impl SimNode {
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			charge: 0.0,
			ring_strength: 0.0,
			axis_strength: (0.0, 0.0),
		}
	}
}

/// Circle that ring-pulled nodes are attracted to.
#[derive(Clone, Copy, Debug)]
pub struct Ring {
	pub radius: f64,
	pub cx: f64,
	pub cy: f64,
}

/// Target point for the optional per-axis pulls.
#[derive(Clone, Copy, Debug)]
pub struct AxisTarget {
	pub cx: f64,
	pub cy: f64,
}

/// Global force configuration; per-node strengths live on [`SimNode`].
#[derive(Clone, Copy, Debug)]
pub struct LayoutForces {
	pub collide_radius: f64,
	pub ring: Ring,
	pub axis: Option<AxisTarget>,
}

#[derive(Clone, Debug)]
struct SpringLink {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SpringLink>,
	forces: LayoutForces,
	alpha: f64,
	alpha_decay: f64,
	jiggle_seed: u32,
}

/// Tiny deterministic displacement to break exact-overlap degeneracies.
fn jiggle(seed: &mut u32) -> f64 {
	*seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
	(f64::from(*seed) / f64::from(u32::MAX) - 0.5) * 1e-6
}

impl Simulation {
	pub fn new(nodes: Vec<SimNode>, links: &[(usize, usize)], forces: LayoutForces) -> Self {
		let mut degree = vec![0usize; nodes.len()];
		for &(source, target) in links {
			degree[source] += 1;
			degree[target] += 1;
		}
		// Spring strength and velocity split follow the endpoint degrees, so
		// heavily connected nodes move less per link.
		let links = links
			.iter()
			.map(|&(source, target)| SpringLink {
				source,
				target,
				strength: 1.0 / degree[source].min(degree[target]).max(1) as f64,
				bias: degree[source] as f64 / (degree[source] + degree[target]).max(1) as f64,
			})
			.collect();

		Self {
			nodes,
			links,
			forces,
			alpha: 1.0,
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / ALPHA_DECAY_TICKS),
			jiggle_seed: 1,
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn active(&self) -> bool {
		self.alpha >= ALPHA_MIN
	}

	/// Advances the simulation one step. Returns whether it is still active;
	/// once settled, further calls are no-ops.
	pub fn tick(&mut self) -> bool {
		if !self.active() {
			return false;
		}
		self.alpha += (0.0 - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_charges();
		self.apply_collisions();
		self.apply_ring();
		self.apply_axis();

		for node in &mut self.nodes {
			node.vx *= VELOCITY_DECAY;
			node.vy *= VELOCITY_DECAY;
			node.x += node.vx;
			node.y += node.vy;
		}
		self.active()
	}

	fn apply_links(&mut self) {
		for link in &self.links {
			let (s, t) = (link.source, link.target);
			// Measure between projected positions so the spring reacts to
			// velocity built up this tick.
			let mut x = self.nodes[t].x + self.nodes[t].vx - self.nodes[s].x - self.nodes[s].vx;
			let mut y = self.nodes[t].y + self.nodes[t].vy - self.nodes[s].y - self.nodes[s].vy;
			if x == 0.0 {
				x = jiggle(&mut self.jiggle_seed);
			}
			if y == 0.0 {
				y = jiggle(&mut self.jiggle_seed);
			}
			let len = (x * x + y * y).sqrt();
			let k = (len - LINK_DISTANCE) / len * self.alpha * link.strength;
			x *= k;
			y *= k;
			self.nodes[t].vx -= x * link.bias;
			self.nodes[t].vy -= y * link.bias;
			self.nodes[s].vx += x * (1.0 - link.bias);
			self.nodes[s].vy += y * (1.0 - link.bias);
		}
	}

	fn apply_charges(&mut self) {
		let n = self.nodes.len();
		let mut acc = vec![(0.0f64, 0.0f64); n];
		for i in 0..n {
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				let mut d2 = dx * dx + dy * dy;
				if d2 == 0.0 {
					dx = jiggle(&mut self.jiggle_seed);
					dy = jiggle(&mut self.jiggle_seed);
					d2 = dx * dx + dy * dy;
				}
				if d2 < DISTANCE_MIN2 {
					// Distance floor keeps near-coincident nodes from
					// catapulting each other.
					d2 = (DISTANCE_MIN2 * d2).sqrt();
				}
				let w = self.nodes[j].charge * self.alpha / d2;
				acc[i].0 += dx * w;
				acc[i].1 += dy * w;
			}
		}
		for (node, (ax, ay)) in self.nodes.iter_mut().zip(acc) {
			node.vx += ax;
			node.vy += ay;
		}
	}

	fn apply_collisions(&mut self) {
		let r = self.forces.collide_radius;
		let rsum = 2.0 * r;
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let mut x =
					self.nodes[i].x + self.nodes[i].vx - self.nodes[j].x - self.nodes[j].vx;
				let mut y =
					self.nodes[i].y + self.nodes[i].vy - self.nodes[j].y - self.nodes[j].vy;
				let mut l = x * x + y * y;
				if l >= rsum * rsum {
					continue;
				}
				if x == 0.0 {
					x = jiggle(&mut self.jiggle_seed);
					l += x * x;
				}
				if y == 0.0 {
					y = jiggle(&mut self.jiggle_seed);
					l += y * y;
				}
				l = l.sqrt();
				let sep = (rsum - l) / l * COLLIDE_STRENGTH;
				// Uniform radii, even split.
				x *= sep * 0.5;
				y *= sep * 0.5;
				self.nodes[i].vx += x;
				self.nodes[i].vy += y;
				self.nodes[j].vx -= x;
				self.nodes[j].vy -= y;
			}
		}
	}

	fn apply_ring(&mut self) {
		let ring = self.forces.ring;
		for node in &mut self.nodes {
			if node.ring_strength == 0.0 {
				continue;
			}
			let mut dx = node.x - ring.cx;
			let mut dy = node.y - ring.cy;
			if dx == 0.0 {
				dx = 1e-6;
			}
			if dy == 0.0 {
				dy = 1e-6;
			}
			let r = (dx * dx + dy * dy).sqrt();
			let k = (ring.radius - r) * node.ring_strength * self.alpha / r;
			node.vx += dx * k;
			node.vy += dy * k;
		}
	}

	fn apply_axis(&mut self) {
		let Some(axis) = self.forces.axis else {
			return;
		};
		for node in &mut self.nodes {
			node.vx += (axis.cx - node.x) * node.axis_strength.0 * self.alpha;
			node.vy += (axis.cy - node.y) * node.axis_strength.1 * self.alpha;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn forces() -> LayoutForces {
		LayoutForces {
			collide_radius: 0.0,
			ring: Ring {
				radius: 50.0,
				cx: 0.0,
				cy: 0.0,
			},
			axis: None,
		}
	}

	fn settle(sim: &mut Simulation) -> usize {
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000, "simulation failed to settle");
		}
		ticks
	}

	fn distance(sim: &Simulation, a: usize, b: usize) -> f64 {
		let (na, nb) = (&sim.nodes()[a], &sim.nodes()[b]);
		(na.x - nb.x).hypot(na.y - nb.y)
	}

	#[test]
	fn settles_on_the_alpha_schedule() {
		let nodes = vec![SimNode::at(0.0, 0.0), SimNode::at(100.0, 0.0)];
		let mut sim = Simulation::new(nodes, &[(0, 1)], forces());
		let ticks = settle(&mut sim);
		assert!((250..=350).contains(&ticks), "settled after {ticks} ticks");
		assert!(!sim.active());
		assert!(!sim.tick());
	}

	#[test]
	fn link_pulls_toward_neutral_length() {
		let nodes = vec![SimNode::at(0.0, 0.0), SimNode::at(200.0, 0.0)];
		let mut sim = Simulation::new(nodes, &[(0, 1)], forces());
		settle(&mut sim);
		let d = distance(&sim, 0, 1);
		assert!((d - 30.0).abs() < 15.0, "settled link length {d}");
	}

	#[test]
	fn charge_repels_and_scales_with_strength() {
		let run = |charge: f64| {
			let mut nodes = vec![SimNode::at(0.0, 0.0), SimNode::at(10.0, 0.0)];
			for node in &mut nodes {
				node.charge = charge;
			}
			let mut sim = Simulation::new(nodes, &[], forces());
			settle(&mut sim);
			distance(&sim, 0, 1)
		};
		let weak = run(-40.0);
		let strong = run(-200.0);
		assert!(weak > 10.0);
		assert!(strong > weak);
	}

	#[test]
	fn collision_enforces_separation() {
		let nodes = vec![SimNode::at(0.0, 0.0), SimNode::at(10.0, 0.0)];
		let mut layout = forces();
		layout.collide_radius = 25.0;
		let mut sim = Simulation::new(nodes, &[], layout);
		settle(&mut sim);
		// Separation overshoots the contact distance because nothing pulls
		// back once the overlap is resolved.
		let d = distance(&sim, 0, 1);
		assert!(d > 40.0 && d < 120.0, "separated to {d}");
	}

	#[test]
	fn ring_attracts_to_configured_radius() {
		let mut node = SimNode::at(300.0, 100.0);
		node.ring_strength = 1.0;
		let layout = LayoutForces {
			collide_radius: 0.0,
			ring: Ring {
				radius: 50.0,
				cx: 100.0,
				cy: 100.0,
			},
			axis: None,
		};
		let mut sim = Simulation::new(vec![node], &[], layout);
		settle(&mut sim);
		let n = &sim.nodes()[0];
		let r = (n.x - 100.0).hypot(n.y - 100.0);
		assert!((r - 50.0).abs() < 20.0, "settled at radius {r}");
	}

	#[test]
	fn axis_pull_is_inert_unless_configured() {
		let mut node = SimNode::at(200.0, 200.0);
		node.axis_strength = (1.0, 1.0);
		let mut sim = Simulation::new(vec![node.clone()], &[], forces());
		settle(&mut sim);
		let stayed = &sim.nodes()[0];
		assert_eq!((stayed.x, stayed.y), (200.0, 200.0));

		let mut layout = forces();
		layout.axis = Some(AxisTarget { cx: 0.0, cy: 0.0 });
		let mut sim = Simulation::new(vec![node], &[], layout);
		settle(&mut sim);
		let pulled = &sim.nodes()[0];
		assert!(pulled.x < 200.0 && pulled.y < 200.0);
	}
}
