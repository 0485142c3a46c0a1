//! Atomic Physics Visualizer Core
//!
//! The simulation and state core behind the atom visualizer:
//!
//! - **Photon physics**: wavelength/frequency/energy conversions and
//!   photon-atom interaction classification
//! - **Reference data**: electron shells, energy levels, transitions and
//!   radioactive decay tables
//! - **Simulation store**: the single mutable aggregate holding photon and
//!   decay state, with change notifications
//! - **Decay scheduler**: time-warped stochastic radioactive decay
//! - **Photon source & particle animator**: drive absorption events and
//!   self-terminating particle lifetimes against the store

pub mod photon;
pub mod elements;
pub mod decay_data;
pub mod particles;
pub mod store;
pub mod scheduler;
pub mod interaction;
pub mod animation;
pub mod config;
pub mod format;

/// Physical constants (CODATA 2018 exact values)
pub mod constants {
    /// Planck constant in J·s
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-34;

    /// Speed of light in m/s
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

    /// One electron volt in joules
    pub const ELECTRON_VOLT: f64 = 1.602176634e-19;

    /// Seconds in a Julian year (365.25 days)
    pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;
}
