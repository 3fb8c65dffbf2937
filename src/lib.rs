//! swarm-canvas: pointer-reactive particle swarm for a portfolio hero.
//!
//! This crate provides a WASM canvas component that animates several hundred
//! orbiting particles, pushes them away from the pointer, and springs them
//! back into their rings.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Pulled in for its `js` feature so `rand` can seed from the browser.
use getrandom as _;

pub mod components;

pub use components::particle_swarm::{
	ParticleField, ParticleSwarm, Surface, SwarmConfig, SwarmError, SwarmHost,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("swarm-canvas: logging initialized");
}

/// Load a configuration override from a script element with id="swarm-config".
/// Fields left out of the JSON take the widget preset's values.
fn load_config() -> Option<SwarmConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("swarm-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_config(&json_text) {
		Ok(config) => {
			info!(
				"swarm-canvas: loaded config for {} particles",
				config.particle_count()
			);
			Some(config)
		}
		Err(e) => {
			warn!("swarm-canvas: ignoring swarm config: {}", e);
			None
		}
	}
}

#[derive(Debug, thiserror::Error)]
enum ConfigError {
	#[error("malformed JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error(transparent)]
	Invalid(#[from] SwarmError),
}

fn parse_config(json_text: &str) -> Result<SwarmConfig, ConfigError> {
	let config: SwarmConfig = serde_json::from_str(json_text)?;
	config.validate()?;
	Ok(config)
}

/// Main application component.
/// Renders the hero backdrop, using the page's config override if present.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_else(SwarmConfig::hero);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particle Swarm" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="swarm-hero" style="position: relative; min-height: 100vh; overflow: hidden;">
			<ParticleSwarm config=config />
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_override_merges_with_defaults() {
		let config = parse_config(r#"{"ring_counts":[50,50],"dampening":0.8}"#).unwrap();
		assert_eq!(config.particle_count(), 150);
		assert_eq!(config.dampening, 0.8);
	}

	#[test]
	fn config_override_is_validated() {
		assert!(matches!(
			parse_config(r#"{"dampening":2.0}"#),
			Err(ConfigError::Invalid(_))
		));
		assert!(matches!(
			parse_config("{not json"),
			Err(ConfigError::Json(_))
		));
	}

	#[test]
	fn oversized_override_is_rejected() {
		assert!(matches!(
			parse_config(r#"{"interior_ratio":1e30}"#),
			Err(ConfigError::Invalid(_))
		));
		assert!(matches!(
			parse_config(r#"{"return_force":6.0}"#),
			Err(ConfigError::Invalid(_))
		));
	}
}
