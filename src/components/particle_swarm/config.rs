//! Swarm configuration.
//!
//! One record drives both shipped variants: the reusable widget (tinted
//! particles, touch captured by the canvas, static center) and the hero
//! backdrop (solid particles, passive touch, scroll drift, responsive
//! centering, debounced resize). All values are fixed once a field is built.

use serde::Deserialize;

use super::error::SwarmError;
use super::theme::{LinkStyle, Palette};
use super::types::Viewport;
use glam::DVec2;

/// Upper bound on particles a single field will lay out.
pub const MAX_PARTICLES: usize = 20_000;

/// Where the swarm's center sits inside the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CenterPolicy {
	/// Always the middle of the viewport.
	#[default]
	Middle,
	/// Below `breakpoint` CSS pixels wide the center is horizontally
	/// centered and pushed down to 55% height; at or above it, the center
	/// moves right to two thirds of the width.
	Responsive { breakpoint: f64 },
}

impl CenterPolicy {
	/// Center point for a viewport. Zero-sized viewports yield the origin.
	pub fn center(&self, viewport: Viewport) -> DVec2 {
		let (w, h) = (viewport.width, viewport.height);
		match *self {
			CenterPolicy::Middle => DVec2::new(w / 2.0, h / 2.0),
			CenterPolicy::Responsive { breakpoint } if w < breakpoint => {
				DVec2::new(w / 2.0, h * 0.55)
			}
			CenterPolicy::Responsive { .. } => DVec2::new(w / 1.5, h / 2.0),
		}
	}
}

/// How touch input interacts with page scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchMode {
	/// The canvas owns touches: listeners are non-passive and cancel the
	/// browser default, so dragging over the swarm does not scroll.
	#[default]
	Exclusive,
	/// Listeners are passive; the page keeps scrolling under a finger.
	Passive,
}

impl TouchMode {
	pub fn passive(self) -> bool {
		matches!(self, TouchMode::Passive)
	}
}

/// Which element receives mouse move/leave listeners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerScope {
	#[default]
	Canvas,
	/// Track the mouse across the whole window, e.g. when content overlays
	/// the canvas.
	Window,
}

/// DOM node a pointer listener is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenTarget {
	Canvas,
	Window,
	/// The `<html>` element.
	DocumentElement,
}

impl PointerScope {
	/// Receiver of `mousemove`.
	pub fn move_target(self) -> ListenTarget {
		match self {
			PointerScope::Canvas => ListenTarget::Canvas,
			PointerScope::Window => ListenTarget::Window,
		}
	}

	/// Receiver of `mouseleave`. The window never gets `mouseleave`, so
	/// leaving the page is observed on the root element.
	pub fn leave_target(self) -> ListenTarget {
		match self {
			PointerScope::Canvas => ListenTarget::Canvas,
			PointerScope::Window => ListenTarget::DocumentElement,
		}
	}
}

/// Inclusive-exclusive `[min, min + range)` sampling range.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Span {
	pub min: f64,
	pub range: f64,
}

impl Span {
	pub const fn new(min: f64, range: f64) -> Self {
		Self { min, range }
	}

	/// Maps a unit sample `u` in [0, 1) into the span.
	pub fn at(&self, u: f64) -> f64 {
		self.min + u * self.range
	}
}

/// Complete swarm configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
	/// Particle count per ring, innermost first.
	pub ring_counts: Vec<usize>,
	/// Interior disk count as a fraction of the ring total (floored).
	pub interior_ratio: f64,
	pub base_radius: f64,
	/// Radius added per ring index.
	pub ring_spacing: f64,
	/// Angular phase added per ring index, in radians.
	pub ring_phase_step: f64,
	/// Full width of the uniform radius perturbation on rings.
	pub radius_jitter: f64,
	/// Unscaled per-frame angular step, in radians.
	pub speed: Span,
	/// Extra speed per ring index: `1 + layer * layer_speed_gain`.
	pub layer_speed_gain: f64,
	pub global_speed_factor: f64,
	pub ring_size: Span,
	pub interior_size: Span,
	pub base_opacity: Span,

	pub repulsion_radius: f64,
	pub repulsion_force: f64,
	/// Multiplier on each repulsion impulse.
	pub repulsion_scale: f64,
	pub return_force: f64,
	/// Per-frame velocity decay, strictly inside (0, 1).
	pub dampening: f64,

	/// Opacity multiplier while a particle is not repelled.
	pub idle_opacity: f64,
	/// `None` snaps opacity to its target each frame; `Some(rate)` eases.
	pub opacity_ease: Option<f64>,

	pub palette: Palette,
	pub links: LinkStyle,

	pub touch: TouchMode,
	pub pointer_scope: PointerScope,
	pub centering: CenterPolicy,
	/// Vertical drift at full page scroll, as a fraction of viewport height.
	/// `None` disables scroll coupling.
	pub scroll_drift: Option<f64>,
	/// Trailing-edge debounce for window resizes.
	pub resize_debounce_ms: Option<u32>,
}

impl Default for SwarmConfig {
	fn default() -> Self {
		Self::widget()
	}
}

impl SwarmConfig {
	/// Reusable widget look: colored particles, canvas-scoped input.
	pub fn widget() -> Self {
		Self {
			ring_counts: vec![200, 150, 150],
			interior_ratio: 0.5,
			base_radius: 100.0,
			ring_spacing: 20.0,
			ring_phase_step: 0.5,
			radius_jitter: 15.0,
			speed: Span::new(0.002, 0.006),
			layer_speed_gain: 0.3,
			global_speed_factor: 0.5,
			ring_size: Span::new(1.0, 1.5),
			interior_size: Span::new(1.0, 1.5),
			base_opacity: Span::new(0.3, 0.5),
			repulsion_radius: 40.0,
			repulsion_force: 100.0,
			repulsion_scale: 1.0,
			return_force: 0.01,
			dampening: 0.7,
			idle_opacity: 0.6,
			opacity_ease: None,
			palette: Palette::frost(),
			links: LinkStyle::default(),
			touch: TouchMode::Exclusive,
			pointer_scope: PointerScope::Canvas,
			centering: CenterPolicy::Middle,
			scroll_drift: None,
			resize_debounce_ms: None,
		}
	}

	/// Hero backdrop look: softer physics, eased opacity, scroll drift.
	pub fn hero() -> Self {
		Self {
			ring_spacing: 25.0,
			ring_phase_step: 0.3,
			radius_jitter: 20.0,
			speed: Span::new(0.001, 0.004),
			layer_speed_gain: 0.2,
			global_speed_factor: 0.6,
			ring_size: Span::new(1.2, 1.5),
			interior_size: Span::new(1.2, 0.8),
			base_opacity: Span::new(0.4, 0.4),
			repulsion_radius: 50.0,
			repulsion_force: 120.0,
			repulsion_scale: 0.4,
			return_force: 0.008,
			dampening: 0.85,
			idle_opacity: 0.7,
			opacity_ease: Some(0.12),
			palette: Palette::sky(),
			links: LinkStyle::sparse(),
			touch: TouchMode::Passive,
			pointer_scope: PointerScope::Window,
			centering: CenterPolicy::Responsive { breakpoint: 768.0 },
			scroll_drift: Some(0.3),
			resize_debounce_ms: Some(200),
			..Self::widget()
		}
	}

	fn ring_total(&self) -> Option<usize> {
		self.ring_counts
			.iter()
			.try_fold(0usize, |acc, &n| acc.checked_add(n))
	}

	/// Number of interior disk particles.
	pub fn interior_count(&self) -> usize {
		let rings = self.ring_total().unwrap_or(usize::MAX);
		(rings as f64 * self.interior_ratio).floor() as usize
	}

	/// Total particle count after layout, or `None` if it overflows.
	pub fn checked_particle_count(&self) -> Option<usize> {
		self.ring_total()?.checked_add(self.interior_count())
	}

	/// Total particle count after layout. Saturates on overflow; `validate`
	/// rejects such configs.
	pub fn particle_count(&self) -> usize {
		self.checked_particle_count().unwrap_or(usize::MAX)
	}

	/// Rejects values that would make the simulation diverge or divide by zero.
	pub fn validate(&self) -> Result<(), SwarmError> {
		let invalid = |msg: String| Err(SwarmError::InvalidConfig(msg));
		if !(self.dampening > 0.0 && self.dampening < 1.0) {
			return invalid(format!("dampening {} must lie in (0, 1)", self.dampening));
		}
		if !(self.repulsion_radius > 0.0) {
			return invalid(format!(
				"repulsion_radius {} must be positive",
				self.repulsion_radius
			));
		}
		if self.base_radius < 0.0 || self.ring_spacing < 0.0 || self.radius_jitter < 0.0 {
			return invalid("ring geometry must be non-negative".into());
		}
		if !(self.interior_ratio >= 0.0 && self.interior_ratio <= 1.0) {
			return invalid(format!(
				"interior_ratio {} must lie in [0, 1]",
				self.interior_ratio
			));
		}
		match self.checked_particle_count() {
			Some(n) if n <= MAX_PARTICLES => {}
			_ => return invalid(format!("more than {MAX_PARTICLES} particles")),
		}
		// The offset spring has trace 1 + d - d*k and determinant d.
		let limit = 2.0 * (1.0 + self.dampening) / self.dampening;
		if !(self.return_force > 0.0 && self.return_force < limit) {
			return invalid(format!(
				"return_force {} must lie in (0, {limit})",
				self.return_force
			));
		}
		let scalars = [
			("base_radius", self.base_radius),
			("ring_spacing", self.ring_spacing),
			("ring_phase_step", self.ring_phase_step),
			("radius_jitter", self.radius_jitter),
			("layer_speed_gain", self.layer_speed_gain),
			("global_speed_factor", self.global_speed_factor),
			("repulsion_force", self.repulsion_force),
			("repulsion_scale", self.repulsion_scale),
			("idle_opacity", self.idle_opacity),
		];
		let spans = [
			("speed", self.speed),
			("ring_size", self.ring_size),
			("interior_size", self.interior_size),
			("base_opacity", self.base_opacity),
		];
		let non_finite = scalars.into_iter().find(|(_, v)| !v.is_finite()).or_else(|| {
			spans
				.into_iter()
				.find(|(_, s)| !(s.min.is_finite() && s.range.is_finite()))
				.map(|(name, s)| (name, s.min + s.range))
		});
		if let Some((name, value)) = non_finite {
			return invalid(format!("{name} must be finite, got {value}"));
		}
		if let Some(drift) = self.scroll_drift {
			if !drift.is_finite() {
				return invalid(format!("scroll_drift {drift} must be finite"));
			}
		}
		if self.links.interval == 0 || self.links.stride == 0 {
			return invalid("links.interval and links.stride must be non-zero".into());
		}
		if let Some(rate) = self.opacity_ease {
			if !(rate > 0.0 && rate <= 1.0) {
				return invalid(format!("opacity_ease {rate} must lie in (0, 1]"));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_are_valid() {
		SwarmConfig::widget().validate().unwrap();
		SwarmConfig::hero().validate().unwrap();
	}

	#[test]
	fn interior_is_half_the_rings_floored() {
		let config = SwarmConfig {
			ring_counts: vec![3, 4, 4],
			..SwarmConfig::widget()
		};
		assert_eq!(config.interior_count(), 5);
		assert_eq!(config.particle_count(), 16);
		assert_eq!(SwarmConfig::widget().particle_count(), 750);
	}

	#[test]
	fn rejects_unstable_dampening() {
		for dampening in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
			let config = SwarmConfig {
				dampening,
				..SwarmConfig::widget()
			};
			assert!(matches!(
				config.validate(),
				Err(SwarmError::InvalidConfig(_))
			));
		}
	}

	#[test]
	fn rejects_unstable_return_force() {
		// dampening 0.7 puts the bound at 2 * 1.7 / 0.7, about 4.86
		for return_force in [0.0, -0.01, 4.9, 6.0, f64::NAN, f64::INFINITY] {
			let config = SwarmConfig {
				return_force,
				..SwarmConfig::widget()
			};
			assert!(matches!(
				config.validate(),
				Err(SwarmError::InvalidConfig(_))
			));
		}
		let config = SwarmConfig {
			return_force: 4.8,
			..SwarmConfig::widget()
		};
		config.validate().unwrap();
	}

	#[test]
	fn rejects_non_finite_forces_and_spans() {
		let configs = [
			SwarmConfig {
				repulsion_force: f64::INFINITY,
				..SwarmConfig::widget()
			},
			SwarmConfig {
				repulsion_scale: f64::NAN,
				..SwarmConfig::hero()
			},
			SwarmConfig {
				global_speed_factor: f64::NEG_INFINITY,
				..SwarmConfig::widget()
			},
			SwarmConfig {
				speed: Span::new(0.001, f64::NAN),
				..SwarmConfig::widget()
			},
			SwarmConfig {
				base_opacity: Span::new(f64::INFINITY, 0.0),
				..SwarmConfig::hero()
			},
		];
		for config in configs {
			assert!(config.validate().is_err());
		}
	}

	#[test]
	fn huge_particle_counts_are_rejected_without_overflow() {
		let config = SwarmConfig {
			interior_ratio: 1e30,
			..SwarmConfig::widget()
		};
		assert!(config.validate().is_err());
		assert_eq!(config.particle_count(), usize::MAX);

		let config = SwarmConfig {
			ring_counts: vec![usize::MAX, 1],
			interior_ratio: 0.0,
			..SwarmConfig::widget()
		};
		assert_eq!(config.checked_particle_count(), None);
		assert!(config.validate().is_err());

		let config = SwarmConfig {
			ring_counts: vec![MAX_PARTICLES, 1],
			interior_ratio: 0.0,
			..SwarmConfig::widget()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn rejects_zero_link_interval() {
		let mut config = SwarmConfig::hero();
		config.links.interval = 0;
		assert!(config.validate().is_err());
	}

	#[test]
	fn leave_is_never_bound_to_the_window() {
		for scope in [PointerScope::Canvas, PointerScope::Window] {
			assert_ne!(scope.leave_target(), ListenTarget::Window);
		}
		assert_eq!(PointerScope::Window.move_target(), ListenTarget::Window);
		assert_eq!(
			PointerScope::Window.leave_target(),
			ListenTarget::DocumentElement
		);
		assert_eq!(PointerScope::Canvas.leave_target(), ListenTarget::Canvas);
	}

	#[test]
	fn responsive_center_switches_at_breakpoint() {
		let policy = CenterPolicy::Responsive { breakpoint: 768.0 };
		assert_eq!(
			policy.center(Viewport::new(500.0, 1000.0)),
			DVec2::new(250.0, 550.0)
		);
		assert_eq!(
			policy.center(Viewport::new(1200.0, 800.0)),
			DVec2::new(800.0, 400.0)
		);
		assert_eq!(policy.center(Viewport::new(0.0, 0.0)), DVec2::ZERO);
	}

	#[test]
	fn partial_json_falls_back_to_widget_defaults() {
		let config: SwarmConfig =
			serde_json::from_str(r#"{"ring_counts":[10,10],"touch":"passive"}"#).unwrap();
		assert_eq!(config.ring_counts, vec![10, 10]);
		assert_eq!(config.touch, TouchMode::Passive);
		assert_eq!(config.dampening, 0.7);
		assert_eq!(config.links.interval, 10);
	}
}
