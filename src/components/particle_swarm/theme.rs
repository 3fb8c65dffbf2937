//! Visual styling for the swarm.
//!
//! Two palettes cover the shipped looks: a tinted one where every particle
//! carries its own colour and is painted with radial gradients, and a solid
//! one where all particles share a colour and are painted with flat fills.

use rand::Rng;
use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Shift each channel up by a random amount below `spread`, saturating at 255.
	pub fn jitter<R: Rng + ?Sized>(self, spread: [u8; 3], rng: &mut R) -> Self {
		let mut channel = |base: u8, spread: u8| {
			let delta = (rng.r#gen::<f64>() * spread as f64) as u8;
			base.saturating_add(delta)
		};
		Self {
			r: channel(self.r, spread[0]),
			g: channel(self.g, spread[1]),
			b: channel(self.b, spread[2]),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// An extra translucent circle drawn around a repelled particle.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Halo {
	/// Halo radius as a multiple of the particle size.
	pub radius_scale: f64,
	/// Halo alpha as a multiple of the particle's current opacity.
	pub alpha_scale: f64,
	/// Halo color; tinted palettes ignore this and use the particle's own.
	pub color: Color,
}

/// How particle colors are chosen and painted.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Palette {
	/// Each particle draws its own tint at creation and is painted with a
	/// radial gradient fading to transparent at its edge.
	Tinted {
		base: Color,
		spread: [u8; 3],
		/// Gradient halo from the particle edge outwards.
		glow: Halo,
	},
	/// All particles share `fill` and are painted flat.
	Solid {
		fill: Color,
		halos: Vec<Halo>,
		/// Stroke color for connective lines.
		link: Color,
	},
}

impl Palette {
	/// Blue-white tints with a single gradient glow.
	pub fn frost() -> Self {
		Palette::Tinted {
			base: Color::rgb(180, 210, 255),
			spread: [30, 30, 30],
			glow: Halo {
				radius_scale: 3.0,
				alpha_scale: 0.4,
				color: Color::rgb(180, 210, 255),
			},
		}
	}

	/// Single sky blue with two stacked halos.
	pub fn sky() -> Self {
		Palette::Solid {
			fill: Color::rgb(120, 180, 255),
			halos: vec![
				Halo {
					radius_scale: 1.8,
					alpha_scale: 0.3,
					color: Color::rgb(150, 200, 255),
				},
				Halo {
					radius_scale: 2.5,
					alpha_scale: 0.15,
					color: Color::rgb(180, 220, 255),
				},
			],
			link: Color::rgba(120, 180, 255, 0.08),
		}
	}

	/// Per-particle color for a freshly laid out particle, if this palette tints.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Color> {
		match self {
			Palette::Tinted { base, spread, .. } => Some(base.jitter(*spread, rng)),
			Palette::Solid { .. } => None,
		}
	}
}

/// Faint lines drawn between sampled neighbouring particles.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LinkStyle {
	/// Lines are drawn on frames where `frame_count % interval == 0`.
	pub interval: u64,
	/// Every `stride`-th particle starts lines.
	pub stride: usize,
	/// How many following particles each start point is tested against.
	pub lookahead: usize,
	/// Squared on-screen distance below which a line is drawn.
	pub max_distance_sq: f64,
	pub width: f64,
	/// Endpoint alpha for tinted palettes.
	pub alpha: f64,
}

impl Default for LinkStyle {
	fn default() -> Self {
		Self {
			interval: 10,
			stride: 15,
			lookahead: 2,
			max_distance_sq: 900.0,
			width: 0.5,
			alpha: 0.04,
		}
	}
}

impl LinkStyle {
	/// Sparser, slightly longer lines used on the hero page.
	pub fn sparse() -> Self {
		Self {
			interval: 15,
			stride: 20,
			lookahead: 3,
			max_distance_sq: 1200.0,
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn jitter_saturates_at_white() {
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..200 {
			let c = Color::rgb(180, 210, 255).jitter([30, 30, 30], &mut rng);
			assert!((180..210).contains(&c.r));
			assert!((210..240).contains(&c.g));
			assert_eq!(c.b, 255);
		}
	}

	#[test]
	fn solid_palette_does_not_tint() {
		let mut rng = StdRng::seed_from_u64(1);
		assert!(Palette::sky().sample(&mut rng).is_none());
		assert!(Palette::frost().sample(&mut rng).is_some());
	}

	#[test]
	fn css_keeps_fractional_alpha() {
		assert_eq!(
			Color::rgb(120, 180, 255).with_alpha(0.25).to_css(),
			"rgba(120, 180, 255, 0.25)"
		);
	}

	#[test]
	fn palette_deserializes_from_tagged_json() {
		let palette: Palette = serde_json::from_str(
			r#"{"kind":"solid","fill":{"r":1,"g":2,"b":3},"halos":[],"link":{"r":4,"g":5,"b":6,"a":0.1}}"#,
		)
		.unwrap();
		match palette {
			Palette::Solid { fill, link, .. } => {
				assert_eq!(fill, Color::rgb(1, 2, 3));
				assert_eq!(link.a, 0.1);
			}
			Palette::Tinted { .. } => panic!("expected solid palette"),
		}
	}
}
