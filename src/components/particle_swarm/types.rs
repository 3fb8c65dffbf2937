//! Small value types shared between the field and its host.

use glam::DVec2;

/// Display size of the drawing surface in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Backing-store size for a device pixel ratio, rounded down.
	pub fn backing_size(&self, dpr: f64) -> (u32, u32) {
		(
			(self.width * dpr).max(0.0) as u32,
			(self.height * dpr).max(0.0) as u32,
		)
	}
}

/// Last known pointer position and whether it currently repels particles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
	pub position: DVec2,
	pub active: bool,
}

/// Lifecycle of a mounted swarm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
	#[default]
	Uninitialized,
	/// Particles are laid out and every completed frame schedules the next.
	Running,
	/// Terminal: no frame may run or draw.
	Disposed,
}
