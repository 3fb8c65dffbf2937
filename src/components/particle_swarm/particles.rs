//! Particle state and the initial ring/disk layout.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use super::config::SwarmConfig;
use super::theme::Color;

/// Layer index carried by interior disk particles.
pub const INTERIOR_LAYER: i32 = -1;

/// A single orbiting particle.
///
/// The orientation is kept as a unit vector (`angle_cos`, `angle_sin`) and
/// advanced by composing a fixed rotation each frame. `offset` is an elastic
/// displacement layered on top of the ideal orbit position.
#[derive(Clone, Debug)]
pub struct Particle {
	pub angle_cos: f64,
	pub angle_sin: f64,
	/// Per-frame angular step in radians.
	pub angular_speed: f64,
	pub orbit_radius: f64,
	pub offset: DVec2,
	pub offset_velocity: DVec2,
	pub size: f64,
	pub base_opacity: f64,
	pub opacity: f64,
	/// Ring index, or [`INTERIOR_LAYER`].
	pub layer: i32,
	pub is_repelled: bool,
	/// Drawn coordinate, recomputed every frame.
	pub position: DVec2,
	/// Own tint for tinted palettes; `None` uses the palette fill.
	pub color: Option<Color>,
}

impl Particle {
	fn at_angle(angle: f64, orbit_radius: f64, angular_speed: f64, layer: i32) -> Self {
		Self {
			angle_cos: angle.cos(),
			angle_sin: angle.sin(),
			angular_speed,
			orbit_radius,
			offset: DVec2::ZERO,
			offset_velocity: DVec2::ZERO,
			size: 0.0,
			base_opacity: 0.0,
			opacity: 0.0,
			layer,
			is_repelled: false,
			position: DVec2::ZERO,
			color: None,
		}
	}

	/// Unit orientation vector.
	pub fn direction(&self) -> DVec2 {
		DVec2::new(self.angle_cos, self.angle_sin)
	}

	pub fn is_interior(&self) -> bool {
		self.layer == INTERIOR_LAYER
	}
}

/// Lays out every ring followed by the interior disk.
pub fn layout<R: Rng + ?Sized>(config: &SwarmConfig, rng: &mut R) -> Vec<Particle> {
	let mut particles = Vec::with_capacity(config.particle_count());

	for (layer, &count) in config.ring_counts.iter().enumerate() {
		let ring_radius = config.base_radius + layer as f64 * config.ring_spacing;
		let phase = layer as f64 * config.ring_phase_step;
		let gain = 1.0 + layer as f64 * config.layer_speed_gain;

		for j in 0..count {
			let angle = TAU * j as f64 / count as f64 + phase;
			let radius = ring_radius + (rng.r#gen::<f64>() - 0.5) * config.radius_jitter;
			let speed = config.speed.at(rng.r#gen()) * gain * config.global_speed_factor;
			let mut p = Particle::at_angle(angle, radius, speed, layer as i32);
			p.size = config.ring_size.at(rng.r#gen());
			finish(&mut p, config, rng);
			particles.push(p);
		}
	}

	for _ in 0..config.interior_count() {
		particles.push(interior_particle(config, rng));
	}

	particles
}

/// One disk-fill particle. The `sqrt` keeps density uniform per unit area.
pub fn interior_particle<R: Rng + ?Sized>(config: &SwarmConfig, rng: &mut R) -> Particle {
	let radius = config.base_radius * rng.r#gen::<f64>().sqrt();
	let angle = rng.r#gen::<f64>() * TAU;
	let speed = config.speed.at(rng.r#gen()) * config.global_speed_factor;
	let mut p = Particle::at_angle(angle, radius, speed, INTERIOR_LAYER);
	p.size = config.interior_size.at(rng.r#gen());
	finish(&mut p, config, rng);
	p
}

fn finish<R: Rng + ?Sized>(p: &mut Particle, config: &SwarmConfig, rng: &mut R) {
	p.base_opacity = config.base_opacity.at(rng.r#gen());
	p.color = config.palette.sample(rng);
}
