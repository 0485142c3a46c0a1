//! Simulation settings and preset tables

use std::env;
use std::time::Duration;

/// Environment variable selecting the starting atom
pub const ENV_ATOM: &str = "ATOM_LAB_ATOM";
/// Environment variable overriding the years-per-second time warp
pub const ENV_TIME_SPEED: &str = "ATOM_LAB_TIME_SPEED";
/// Environment variable switching on input clamping (`1`/`true`)
pub const ENV_STRICT: &str = "ATOM_LAB_STRICT";

/// Time-warp presets in simulated years per real second
pub const TIME_SPEEDS: [(f64, &str); 7] = [
    (1.0, "1 year/sec"),
    (100.0, "100 years/sec"),
    (1_000.0, "1K years/sec"),
    (100_000.0, "100K years/sec"),
    (1_000_000.0, "1M years/sec"),
    (100_000_000.0, "100M years/sec"),
    (1_000_000_000.0, "1B years/sec"),
];

/// Quick-pick wavelengths in nm
pub const WAVELENGTH_PRESETS: [(&str, f64); 8] = [
    ("X-ray", 0.1),
    ("UV", 100.0),
    ("Violet", 400.0),
    ("Blue", 470.0),
    ("Green", 520.0),
    ("Yellow", 580.0),
    ("Red", 650.0),
    ("IR", 900.0),
];

/// Smallest wavelength accepted under [`InputPolicy::Clamp`], in nm
pub const MIN_WAVELENGTH: f64 = 1e-6;

/// How the store treats out-of-range numeric input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPolicy {
    /// Values are stored as given; non-physical input yields degenerate physics
    #[default]
    Permissive,
    /// Wavelength floored at [`MIN_WAVELENGTH`], intensity clamped to [0, 1],
    /// time speed floored at 0
    Clamp,
}

impl InputPolicy {
    pub fn wavelength(&self, wavelength: f64) -> f64 {
        match self {
            InputPolicy::Permissive => wavelength,
            InputPolicy::Clamp => wavelength.max(MIN_WAVELENGTH),
        }
    }

    pub fn intensity(&self, intensity: f64) -> f64 {
        match self {
            InputPolicy::Permissive => intensity,
            InputPolicy::Clamp => intensity.clamp(0.0, 1.0),
        }
    }

    pub fn time_speed(&self, years_per_second: f64) -> f64 {
        match self {
            InputPolicy::Permissive => years_per_second,
            InputPolicy::Clamp => years_per_second.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub initial_atom: String,
    /// nm
    pub wavelength: f64,
    pub intensity: f64,
    /// Simulated years per real second
    pub time_speed: f64,
    pub tick_interval: Duration,
    pub input_policy: InputPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_atom: "iron".to_string(),
            wavelength: 500.0,
            intensity: 0.5,
            time_speed: 1_000_000.0,
            tick_interval: Duration::from_millis(100),
            input_policy: InputPolicy::Permissive,
        }
    }
}

impl SimConfig {
    /// Defaults overridden by `ATOM_LAB_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from `lookup`; unparsable values are logged and skipped
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(atom) = lookup(ENV_ATOM) {
            let atom = atom.trim();
            if atom.is_empty() {
                log::warn!("{} is empty, keeping {}", ENV_ATOM, self.initial_atom);
            } else {
                self.initial_atom = atom.to_lowercase();
            }
        }

        if let Some(raw) = lookup(ENV_TIME_SPEED) {
            match raw.trim().parse::<f64>() {
                Ok(speed) if speed.is_finite() && speed >= 0.0 => self.time_speed = speed,
                _ => log::warn!("Ignoring {}={:?}: expected a non-negative number", ENV_TIME_SPEED, raw),
            }
        }

        if let Some(raw) = lookup(ENV_STRICT) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.input_policy = InputPolicy::Clamp,
                "0" | "false" | "no" | "off" => self.input_policy = InputPolicy::Permissive,
                _ => log::warn!("Ignoring {}={:?}: expected a boolean", ENV_STRICT, raw),
            }
        }

        log::debug!("Simulation config: {:?}", self);
        self
    }
}

/// Label of the time-speed preset closest to `years_per_second`
pub fn time_speed_label(years_per_second: f64) -> &'static str {
    TIME_SPEEDS
        .iter()
        .min_by(|a, b| {
            let da = (a.0.max(1e-12).ln() - years_per_second.max(1e-12).ln()).abs();
            let db = (b.0.max(1e-12).ln() - years_per_second.max(1e-12).ln()).abs();
            da.total_cmp(&db)
        })
        .map(|(_, label)| *label)
        .unwrap_or("custom")
}
