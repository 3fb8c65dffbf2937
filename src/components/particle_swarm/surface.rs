//! Drawing-surface contract the swarm renders against.
//!
//! The browser implementation lives in `canvas`; tests use the recording
//! surface below.

use glam::DVec2;

use super::error::SwarmError;
use super::theme::Color;
use super::types::Viewport;

/// A 2D raster surface addressed in CSS pixels.
pub trait Surface {
	/// Device pixel ratio the backing store is scaled by.
	fn device_pixel_ratio(&self) -> f64;

	/// Resizes the backing store to `viewport * dpr`, sets the display size,
	/// and resets the transform to a plain `dpr` scale.
	fn configure(&mut self, viewport: Viewport) -> Result<(), SwarmError>;

	/// Clears the whole surface.
	fn clear(&mut self);

	/// Flat circle.
	fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color)
	-> Result<(), SwarmError>;

	/// Circle of radius `outer_radius` filled with a radial gradient running
	/// from `inner` at `inner_radius` to `outer` at `outer_radius`.
	fn fill_radial(
		&mut self,
		center: DVec2,
		inner_radius: f64,
		outer_radius: f64,
		inner: Color,
		outer: Color,
	) -> Result<(), SwarmError>;

	/// Straight segment in a single color.
	fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color)
	-> Result<(), SwarmError>;

	/// Straight segment whose color blends from `start` to `end`.
	fn stroke_gradient_line(
		&mut self,
		from: DVec2,
		to: DVec2,
		width: f64,
		start: Color,
		end: Color,
	) -> Result<(), SwarmError>;
}

#[cfg(test)]
pub(crate) mod recording {
	use super::*;

	/// One recorded draw call.
	#[derive(Clone, Debug, PartialEq)]
	pub enum Command {
		Configure(Viewport),
		Clear,
		Circle { center: DVec2, radius: f64, color: Color },
		Radial { center: DVec2, outer_radius: f64, inner: Color },
		Line { from: DVec2, to: DVec2 },
	}

	/// Surface that records every call instead of drawing.
	#[derive(Debug)]
	pub struct RecordingSurface {
		pub dpr: f64,
		pub commands: Vec<Command>,
		/// Makes every line stroke fail, as a lost context would.
		pub fail_lines: bool,
	}

	impl RecordingSurface {
		pub fn new(dpr: f64) -> Self {
			Self {
				dpr,
				commands: Vec::new(),
				fail_lines: false,
			}
		}

		pub fn lines(&self) -> usize {
			self.commands
				.iter()
				.filter(|c| matches!(c, Command::Line { .. }))
				.count()
		}

		pub fn clears(&self) -> usize {
			self.commands
				.iter()
				.filter(|c| matches!(c, Command::Clear))
				.count()
		}
	}

	impl Surface for RecordingSurface {
		fn device_pixel_ratio(&self) -> f64 {
			self.dpr
		}

		fn configure(&mut self, viewport: Viewport) -> Result<(), SwarmError> {
			self.commands.push(Command::Configure(viewport));
			Ok(())
		}

		fn clear(&mut self) {
			self.commands.push(Command::Clear);
		}

		fn fill_circle(
			&mut self,
			center: DVec2,
			radius: f64,
			color: Color,
		) -> Result<(), SwarmError> {
			self.commands.push(Command::Circle {
				center,
				radius,
				color,
			});
			Ok(())
		}

		fn fill_radial(
			&mut self,
			center: DVec2,
			_inner_radius: f64,
			outer_radius: f64,
			inner: Color,
			_outer: Color,
		) -> Result<(), SwarmError> {
			self.commands.push(Command::Radial {
				center,
				outer_radius,
				inner,
			});
			Ok(())
		}

		fn stroke_line(
			&mut self,
			from: DVec2,
			to: DVec2,
			_width: f64,
			_color: Color,
		) -> Result<(), SwarmError> {
			if self.fail_lines {
				return Err(SwarmError::Draw("stroke rejected".into()));
			}
			self.commands.push(Command::Line { from, to });
			Ok(())
		}

		fn stroke_gradient_line(
			&mut self,
			from: DVec2,
			to: DVec2,
			_width: f64,
			_start: Color,
			_end: Color,
		) -> Result<(), SwarmError> {
			self.commands.push(Command::Line { from, to });
			Ok(())
		}
	}
}
