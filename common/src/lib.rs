//! Common utilities for the atom visualizer
//!
//! This crate provides the shared window/GPU setup and the orbital camera used to
//! project the atom scene onto the screen.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;
