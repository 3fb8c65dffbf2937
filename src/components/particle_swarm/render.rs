//! Per-frame drawing of the swarm.
//!
//! Two passes:
//! 1. Particle bodies, plus halos for repelled particles
//! 2. Every `links.interval` frames, faint lines between sampled neighbours

use super::error::SwarmError;
use super::particles::Particle;
use super::surface::Surface;
use super::theme::{Halo, LinkStyle, Palette};

/// Clears the surface and draws every particle, then the link pass when due.
pub fn render<S: Surface>(
	surface: &mut S,
	particles: &[Particle],
	palette: &Palette,
	links: &LinkStyle,
	frame_count: u64,
) -> Result<(), SwarmError> {
	surface.clear();

	for p in particles {
		draw_particle(surface, p, palette)?;
	}

	if frame_count % links.interval == 0 {
		draw_links(surface, particles, palette, links)?;
	}

	Ok(())
}

fn draw_particle<S: Surface>(
	surface: &mut S,
	p: &Particle,
	palette: &Palette,
) -> Result<(), SwarmError> {
	let alpha = p.opacity;

	match palette {
		Palette::Tinted { base, glow, .. } => {
			let color = p.color.unwrap_or(*base);
			surface.fill_radial(
				p.position,
				0.0,
				p.size,
				color.with_alpha(alpha),
				color.with_alpha(0.0),
			)?;
			if p.is_repelled {
				let Halo {
					radius_scale,
					alpha_scale,
					..
				} = *glow;
				surface.fill_radial(
					p.position,
					p.size,
					p.size * radius_scale,
					color.with_alpha(alpha * alpha_scale),
					color.with_alpha(0.0),
				)?;
			}
		}
		Palette::Solid { fill, halos, .. } => {
			surface.fill_circle(p.position, p.size, fill.with_alpha(alpha))?;
			if p.is_repelled {
				for halo in halos {
					surface.fill_circle(
						p.position,
						p.size * halo.radius_scale,
						halo.color.with_alpha(alpha * halo.alpha_scale),
					)?;
				}
			}
		}
	}

	Ok(())
}

/// Samples every `stride`-th particle against its next `lookahead`
/// neighbours instead of testing all pairs.
fn draw_links<S: Surface>(
	surface: &mut S,
	particles: &[Particle],
	palette: &Palette,
	links: &LinkStyle,
) -> Result<(), SwarmError> {
	for (i, a) in particles.iter().enumerate().step_by(links.stride) {
		for b in particles.iter().skip(i + 1).take(links.lookahead) {
			if a.position.distance_squared(b.position) >= links.max_distance_sq {
				continue;
			}
			match palette {
				Palette::Tinted { base, .. } => surface.stroke_gradient_line(
					a.position,
					b.position,
					links.width,
					a.color.unwrap_or(*base).with_alpha(links.alpha),
					b.color.unwrap_or(*base).with_alpha(links.alpha),
				)?,
				Palette::Solid { link, .. } => {
					surface.stroke_line(a.position, b.position, links.width, *link)?
				}
			}
		}
	}
	Ok(())
}
