//! Pointer-reactive particle swarm rendered on an HTML canvas.
//!
//! Several hundred particles orbit a center on concentric rings plus a
//! uniformly filled interior disk:
//! - Orbits advance by incremental rotation, never by re-deriving angles
//! - The pointer pushes nearby particles outward; a damped spring returns them
//! - Faint connective lines are drawn on a sparse subset every few frames
//!
//! The simulation ([`ParticleField`]) is independent of the browser and draws
//! through the [`Surface`] trait. [`SwarmHost`] binds it to a real canvas and
//! the DOM, and the [`ParticleSwarm`] component ties that to a Leptos mount.
//!
//! # Example
//!
//! ```ignore
//! use swarm_canvas::{ParticleSwarm, SwarmConfig};
//!
//! view! { <ParticleSwarm config=SwarmConfig::hero() /> }
//! ```

mod canvas;
mod component;
pub mod config;
mod error;
mod field;
mod host;
mod input;
mod particles;
mod render;
mod surface;
pub mod theme;
mod types;

pub use canvas::CanvasSurface;
pub use component::ParticleSwarm;
pub use config::SwarmConfig;
pub use error::SwarmError;
pub use field::ParticleField;
pub use host::SwarmHost;
pub use input::{InputEvent, InputQueue};
pub use particles::Particle;
pub use surface::Surface;
pub use theme::{Color, Palette};
pub use types::{Lifecycle, Pointer, Viewport};
