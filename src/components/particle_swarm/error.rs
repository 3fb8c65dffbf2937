//! Error type shared by the swarm engine and its canvas host.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced while mounting or animating a swarm.
#[derive(Debug, Error)]
pub enum SwarmError {
	/// The canvas could not hand out a 2D rendering context.
	#[error("2D drawing surface unavailable: {0}")]
	SurfaceUnavailable(String),
	/// The configuration would make the simulation unstable or undefined.
	#[error("invalid swarm configuration: {0}")]
	InvalidConfig(String),
	/// A drawing call failed mid-frame.
	#[error("draw call failed: {0}")]
	Draw(String),
	/// The browser environment (window, document) is missing a piece.
	#[error("browser environment unavailable: {0}")]
	Environment(String),
}

impl SwarmError {
	/// Wraps a JS exception raised by a canvas call.
	pub fn from_js(err: JsValue) -> Self {
		Self::Draw(describe_js(&err))
	}
}

/// Best-effort string form of a thrown JS value.
pub(crate) fn describe_js(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
