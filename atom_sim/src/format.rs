//! Human-readable formatting for the info panels

/// Slider range of the logarithmic wavelength control, in nm
pub const SLIDER_MIN_WAVELENGTH: f64 = 0.1;
pub const SLIDER_MAX_WAVELENGTH: f64 = 1000.0;
/// Slider positions run from 0 to this value
pub const SLIDER_STEPS: f64 = 100.0;

/// Energy in eV, switching to keV above 1000 eV
pub fn format_energy(ev: f64) -> String {
    if ev >= 1000.0 {
        format!("{:.2} keV", ev / 1000.0)
    } else {
        format!("{:.2} eV", ev)
    }
}

/// Wavelength in nm, scaled to pm, μm or mm where it reads better
pub fn format_wavelength(nm: f64) -> String {
    if nm < 1.0 {
        format!("{:.2} pm", nm * 1000.0)
    } else if nm < 1000.0 {
        format!("{:.1} nm", nm)
    } else if nm < 1e6 {
        format!("{:.2} μm", nm / 1000.0)
    } else {
        format!("{:.2} mm", nm / 1e6)
    }
}

pub fn format_years(years: f64) -> String {
    if years < 1000.0 {
        format!("{:.0} years", years)
    } else if years < 1e6 {
        format!("{:.1}K years", years / 1e3)
    } else if years < 1e9 {
        format!("{:.1}M years", years / 1e6)
    } else {
        format!("{:.2}B years", years / 1e9)
    }
}

/// Frequency in Hz with an SI prefix
pub fn format_frequency(hz: f64) -> String {
    const PREFIXES: [(f64, &str); 5] = [(1e18, "EHz"), (1e15, "PHz"), (1e12, "THz"), (1e9, "GHz"), (1e6, "MHz")];
    PREFIXES
        .iter()
        .find(|(scale, _)| hz >= *scale)
        .map(|(scale, unit)| format!("{:.2} {}", hz / scale, unit))
        .unwrap_or_else(|| format!("{:.2e} Hz", hz))
}

/// Slider position (0..=100) to wavelength on a log scale
pub fn slider_to_wavelength(position: f64) -> f64 {
    let t = (position / SLIDER_STEPS).clamp(0.0, 1.0);
    let (lo, hi) = (SLIDER_MIN_WAVELENGTH.log10(), SLIDER_MAX_WAVELENGTH.log10());
    10f64.powf(lo + t * (hi - lo))
}

/// Inverse of [`slider_to_wavelength`], clamped to the slider range
pub fn wavelength_to_slider(nm: f64) -> f64 {
    let (lo, hi) = (SLIDER_MIN_WAVELENGTH.log10(), SLIDER_MAX_WAVELENGTH.log10());
    let t = (nm.max(f64::MIN_POSITIVE).log10() - lo) / (hi - lo);
    t.clamp(0.0, 1.0) * SLIDER_STEPS
}
