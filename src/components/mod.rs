//! UI components.

pub mod particle_swarm;
