//! The particle field: swarm state, the per-frame update rule, and lifecycle.
//!
//! Each particle's drawn position is split into an ideal orbit (pure
//! rotation about the center) and an elastic offset. Only the offset is
//! touched by the pointer; it is a damped spring pulled back to zero, so the
//! swarm always relaxes into its ring/disk layout once the pointer leaves.

use glam::DVec2;
use log::{debug, info};
use rand::Rng;

use super::config::SwarmConfig;
use super::error::SwarmError;
use super::input::InputEvent;
use super::particles::{self, Particle};
use super::render;
use super::surface::Surface;
use super::types::{Lifecycle, Pointer, Viewport};

/// A mounted swarm bound to one drawing surface.
pub struct ParticleField<S: Surface> {
	surface: S,
	config: SwarmConfig,
	particles: Vec<Particle>,
	center: DVec2,
	viewport: Viewport,
	pointer: Pointer,
	device_pixel_ratio: f64,
	scroll_progress: f64,
	frame_count: u64,
	lifecycle: Lifecycle,
}

impl<S: Surface> ParticleField<S> {
	/// Validates the configuration, sizes the surface, lays out the
	/// particles, and enters [`Lifecycle::Running`].
	pub fn new<R: Rng + ?Sized>(
		surface: S,
		viewport: Viewport,
		config: SwarmConfig,
		rng: &mut R,
	) -> Result<Self, SwarmError> {
		config.validate()?;
		let device_pixel_ratio = surface.device_pixel_ratio();
		let mut field = Self {
			surface,
			config,
			particles: Vec::new(),
			center: DVec2::ZERO,
			viewport,
			pointer: Pointer::default(),
			device_pixel_ratio,
			scroll_progress: 0.0,
			frame_count: 0,
			lifecycle: Lifecycle::Uninitialized,
		};
		field.start(rng)?;
		Ok(field)
	}

	fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SwarmError> {
		self.resize(self.viewport)?;
		self.particles = particles::layout(&self.config, rng);
		self.lifecycle = Lifecycle::Running;
		info!(
			"swarm: started with {} particles at dpr {}",
			self.particles.len(),
			self.device_pixel_ratio
		);
		Ok(())
	}

	/// Applies one queued input event.
	pub fn apply(&mut self, event: InputEvent) -> Result<(), SwarmError> {
		match event {
			InputEvent::PointerMove { x, y } => {
				self.pointer = Pointer {
					position: DVec2::new(x, y),
					active: true,
				}
			}
			InputEvent::PointerLeave => self.pointer.active = false,
			InputEvent::Scroll { progress } => self.set_scroll_progress(progress),
			InputEvent::Resize(viewport) => self.resize(viewport)?,
		}
		Ok(())
	}

	/// Reconfigures the surface and recomputes the center.
	pub fn resize(&mut self, viewport: Viewport) -> Result<(), SwarmError> {
		self.viewport = viewport;
		self.surface.configure(viewport)?;
		self.center = self.config.centering.center(viewport);
		debug!(
			"swarm: resized to {}x{}, center ({:.1}, {:.1})",
			viewport.width, viewport.height, self.center.x, self.center.y
		);
		Ok(())
	}

	/// Stores page scroll progress, clamped to [0, 1]. Non-finite input resets it.
	pub fn set_scroll_progress(&mut self, progress: f64) {
		self.scroll_progress = if progress.is_finite() {
			progress.clamp(0.0, 1.0)
		} else {
			0.0
		};
	}

	/// Vertical shift applied to every orbit from page scroll.
	pub fn scroll_offset(&self) -> f64 {
		self.config
			.scroll_drift
			.map_or(0.0, |drift| self.scroll_progress * drift * self.viewport.height)
	}

	/// Advances every particle by one frame.
	pub fn update(&mut self) {
		self.frame_count += 1;

		let SwarmConfig {
			repulsion_radius,
			repulsion_force,
			repulsion_scale,
			return_force,
			dampening,
			idle_opacity,
			opacity_ease,
			..
		} = self.config;
		let radius_sq = repulsion_radius * repulsion_radius;
		let pointer = self.pointer;
		let center = self.center + DVec2::new(0.0, self.scroll_offset());

		for p in &mut self.particles {
			let (sin_d, cos_d) = p.angular_speed.sin_cos();
			let (cos, sin) = (p.angle_cos, p.angle_sin);
			p.angle_cos = cos * cos_d - sin * sin_d;
			p.angle_sin = sin * cos_d + cos * sin_d;

			let orbit = center + p.direction() * p.orbit_radius;
			let current = orbit + p.offset;

			p.is_repelled = false;
			if pointer.active {
				let away = current - pointer.position;
				let dist_sq = away.length_squared();
				if dist_sq < radius_sq && dist_sq > 0.0 {
					let dist = dist_sq.sqrt();
					let strength = (repulsion_radius - dist) / repulsion_radius * repulsion_force;
					p.offset_velocity += away / dist * strength * repulsion_scale;
					p.is_repelled = true;
				}
			}

			if !p.is_repelled {
				p.offset_velocity -= p.offset * return_force;
			}

			p.offset_velocity *= dampening;
			p.offset += p.offset_velocity;
			p.position = orbit + p.offset;

			let target = p.base_opacity * if p.is_repelled { 1.0 } else { idle_opacity };
			p.opacity = match opacity_ease {
				Some(rate) => p.opacity + (target - p.opacity) * rate,
				None => target,
			};
		}
	}

	/// Draws the current state.
	pub fn render(&mut self) -> Result<(), SwarmError> {
		render::render(
			&mut self.surface,
			&self.particles,
			&self.config.palette,
			&self.config.links,
			self.frame_count,
		)
	}

	/// Runs one scheduled frame: drains `events`, updates, and draws.
	///
	/// Returns whether the host should schedule another frame. A disposed
	/// field ignores the events and neither updates nor draws.
	pub fn frame<I>(&mut self, events: I) -> Result<bool, SwarmError>
	where
		I: IntoIterator<Item = InputEvent>,
	{
		if self.lifecycle != Lifecycle::Running {
			return Ok(false);
		}
		for event in events {
			self.apply(event)?;
		}
		self.update();
		self.render()?;
		Ok(true)
	}

	/// Stops the field. Returns `false` if it was already disposed.
	pub fn dispose(&mut self) -> bool {
		if self.lifecycle == Lifecycle::Disposed {
			return false;
		}
		self.lifecycle = Lifecycle::Disposed;
		self.surface.clear();
		info!("swarm: disposed after {} frames", self.frame_count);
		true
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn center(&self) -> DVec2 {
		self.center
	}

	pub fn pointer(&self) -> Pointer {
		self.pointer
	}

	pub fn device_pixel_ratio(&self) -> f64 {
		self.device_pixel_ratio
	}

	pub fn frame_count(&self) -> u64 {
		self.frame_count
	}

	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	#[cfg(test)]
	pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}
}
