//! Photon physics
//!
//! Pure conversions between wavelength, frequency and photon energy, the
//! visible-spectrum colour approximation, and photon-atom interaction
//! classification. Wavelengths are in nanometres, energies in electron volts.

use crate::constants::{ELECTRON_VOLT, PLANCK_CONSTANT, SPEED_OF_LIGHT};
use crate::elements::{AtomEnergyData, Transition};

/// Maximum |E_photon - E_transition| for a photon to excite an electron (eV)
pub const EXCITATION_TOLERANCE: f64 = 0.1;

/// Default matching window used when listing candidate transitions (eV)
pub const TRANSITION_SEARCH_TOLERANCE: f64 = 0.2;

/// Outcome of a photon meeting an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionType {
    #[default]
    None,
    Excitation,
    Photoelectric,
}

impl InteractionType {
    pub fn label(&self) -> &'static str {
        match self {
            InteractionType::None => "No Interaction",
            InteractionType::Excitation => "Electron Excitation",
            InteractionType::Photoelectric => "Photoelectric Effect",
        }
    }
}

/// Convert wavelength (nm) to frequency (Hz)
pub fn wavelength_to_frequency(wavelength: f64) -> f64 {
    SPEED_OF_LIGHT / (wavelength * 1e-9)
}

/// Convert frequency (Hz) to photon energy (eV)
pub fn frequency_to_energy(frequency: f64) -> f64 {
    PLANCK_CONSTANT * frequency / ELECTRON_VOLT
}

/// Photon energy (eV) for a wavelength (nm): E = hc/λ
pub fn wavelength_to_energy(wavelength: f64) -> f64 {
    frequency_to_energy(wavelength_to_frequency(wavelength))
}

/// Wavelength (nm) of a photon with the given energy (eV); inverse of
/// [`wavelength_to_energy`]
pub fn energy_to_wavelength(energy: f64) -> f64 {
    let frequency = energy * ELECTRON_VOLT / PLANCK_CONSTANT;
    SPEED_OF_LIGHT / frequency * 1e9
}

/// Approximate RGB colour (each channel in [0, 1]) of light at `wavelength` nm.
///
/// Piecewise-linear over the visible bands with an intensity fade towards both
/// edges of vision. Ultraviolet is drawn as a fixed violet and infrared as a
/// fixed dark red; neither is a physical colour.
pub fn wavelength_to_rgb(wavelength: f64) -> [f32; 3] {
    let w = wavelength;
    let (r, g, b) = if (380.0..440.0).contains(&w) {
        (-(w - 440.0) / (440.0 - 380.0), 0.0, 1.0)
    } else if (440.0..490.0).contains(&w) {
        (0.0, (w - 440.0) / (490.0 - 440.0), 1.0)
    } else if (490.0..510.0).contains(&w) {
        (0.0, 1.0, -(w - 510.0) / (510.0 - 490.0))
    } else if (510.0..580.0).contains(&w) {
        ((w - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if (580.0..645.0).contains(&w) {
        (1.0, -(w - 645.0) / (645.0 - 580.0), 0.0)
    } else if (645.0..=780.0).contains(&w) {
        (1.0, 0.0, 0.0)
    } else if w < 380.0 {
        (0.5, 0.0, 1.0)
    } else {
        (0.5, 0.0, 0.0)
    };

    let factor = if (380.0..420.0).contains(&w) {
        0.3 + 0.7 * (w - 380.0) / (420.0 - 380.0)
    } else if (700.0..=780.0).contains(&w) {
        0.3 + 0.7 * (780.0 - w) / (780.0 - 700.0)
    } else {
        1.0
    };

    [(r * factor) as f32, (g * factor) as f32, (b * factor) as f32]
}

/// True when some allowed transition lies strictly within
/// [`EXCITATION_TOLERANCE`] of the photon energy
pub fn can_excite_electron(photon_energy: f64, atom: &AtomEnergyData) -> bool {
    atom.allowed_transitions
        .iter()
        .any(|t| (t.energy - photon_energy).abs() < EXCITATION_TOLERANCE)
}

/// True when the photon carries at least the ionization energy (work function)
pub fn can_cause_photoelectric_effect(photon_energy: f64, atom: &AtomEnergyData) -> bool {
    photon_energy >= atom.ionization_energy
}

/// Classify a photon-atom interaction.
///
/// Ejection is checked before excitation: a photon above the ionization energy
/// is photoelectric even if it also happens to match a transition.
pub fn determine_interaction_type(photon_energy: f64, atom: &AtomEnergyData) -> InteractionType {
    if can_cause_photoelectric_effect(photon_energy, atom) {
        InteractionType::Photoelectric
    } else if can_excite_electron(photon_energy, atom) {
        InteractionType::Excitation
    } else {
        InteractionType::None
    }
}

/// Like [`determine_interaction_type`], but an atom without energy data never
/// interacts
pub fn classify(photon_energy: f64, atom: Option<&AtomEnergyData>) -> InteractionType {
    atom.map_or(InteractionType::None, |data| {
        determine_interaction_type(photon_energy, data)
    })
}

/// Kinetic energy of a photoelectron: KE = hf - Φ, never negative
pub fn calculate_kinetic_energy(photon_energy: f64, work_function: f64) -> f64 {
    (photon_energy - work_function).max(0.0)
}

/// All transitions whose energy lies strictly within `tolerance` of the photon
/// energy, in table order. Near-duplicate lines are all returned.
pub fn find_possible_transitions(
    photon_energy: f64,
    atom: &AtomEnergyData,
    tolerance: f64,
) -> Vec<&Transition> {
    atom.allowed_transitions
        .iter()
        .filter(|t| (t.energy - photon_energy).abs() < tolerance)
        .collect()
}

/// Characteristic emission lines (nm) of an element
pub fn emission_wavelengths(atom: &AtomEnergyData) -> Vec<f64> {
    atom.allowed_transitions.iter().map(|t| t.wavelength).collect()
}

/// Named band of the electromagnetic spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavelengthRegion {
    GammaRay,
    XRay,
    Ultraviolet,
    Violet,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Infrared,
    Microwave,
    Radio,
}

impl WavelengthRegion {
    pub fn name(&self) -> &'static str {
        match self {
            WavelengthRegion::GammaRay => "Gamma Ray",
            WavelengthRegion::XRay => "X-Ray",
            WavelengthRegion::Ultraviolet => "Ultraviolet",
            WavelengthRegion::Violet => "Violet",
            WavelengthRegion::Blue => "Blue",
            WavelengthRegion::Green => "Green",
            WavelengthRegion::Yellow => "Yellow",
            WavelengthRegion::Orange => "Orange",
            WavelengthRegion::Red => "Red",
            WavelengthRegion::Infrared => "Infrared",
            WavelengthRegion::Microwave => "Microwave",
            WavelengthRegion::Radio => "Radio",
        }
    }
}

/// Upper bounds (exclusive, nm) of each band, in ascending order
const REGION_BOUNDS: [(f64, WavelengthRegion); 11] = [
    (0.01, WavelengthRegion::GammaRay),
    (10.0, WavelengthRegion::XRay),
    (380.0, WavelengthRegion::Ultraviolet),
    (450.0, WavelengthRegion::Violet),
    (495.0, WavelengthRegion::Blue),
    (570.0, WavelengthRegion::Green),
    (590.0, WavelengthRegion::Yellow),
    (620.0, WavelengthRegion::Orange),
    (750.0, WavelengthRegion::Red),
    (1e6, WavelengthRegion::Infrared),
    (1e9, WavelengthRegion::Microwave),
];

/// Spectrum band containing `wavelength` nm
pub fn wavelength_region(wavelength: f64) -> WavelengthRegion {
    REGION_BOUNDS
        .iter()
        .find(|(upper, _)| wavelength < *upper)
        .map_or(WavelengthRegion::Radio, |(_, region)| *region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{find_atom, HYDROGEN_ENERGY};

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn visible_and_uv_photon_energies() {
        assert!(close(wavelength_to_energy(500.0), 2.48, 0.1));
        assert!(close(wavelength_to_energy(200.0), 6.20, 0.1));
    }

    #[test]
    fn energy_wavelength_round_trip() {
        for &wavelength in &[1e-4, 0.1, 121.6, 550.0, 5_000.0, 1e7] {
            let back = energy_to_wavelength(wavelength_to_energy(wavelength));
            assert!(
                ((back - wavelength) / wavelength).abs() < 1e-9,
                "{} nm came back as {}",
                wavelength,
                back
            );
        }
        assert!(close(energy_to_wavelength(wavelength_to_energy(550.0)), 550.0, 1e-3));
    }

    #[test]
    fn frequency_of_green_light() {
        let f = wavelength_to_frequency(500.0);
        assert!(close(f / 1e14, 5.99585, 1e-4));
    }

    #[test]
    fn rgb_bands_and_edges() {
        assert_eq!(wavelength_to_rgb(650.0), [1.0, 0.0, 0.0]);
        assert_eq!(wavelength_to_rgb(500.0), [0.0, 1.0, 0.5]);
        // Deep UV and IR use fixed tints
        assert_eq!(wavelength_to_rgb(100.0), [0.5, 0.0, 1.0]);
        assert_eq!(wavelength_to_rgb(900.0), [0.5, 0.0, 0.0]);
        // 380 nm sits at the start of the violet ramp, faded to 30%
        let [r, g, b] = wavelength_to_rgb(380.0);
        assert!(close(r as f64, 0.3, 1e-6));
        assert_eq!(g, 0.0);
        assert!(close(b as f64, 0.3, 1e-6));
        // Red fades out towards 780 nm
        let [r, _, _] = wavelength_to_rgb(780.0);
        assert!(close(r as f64, 0.3, 1e-6));
        for w in (300..900).step_by(7) {
            for channel in wavelength_to_rgb(w as f64) {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn photoelectric_takes_precedence_over_excitation() {
        let hydrogen = &HYDROGEN_ENERGY;
        assert_eq!(determine_interaction_type(15.0, hydrogen), InteractionType::Photoelectric);
        // Exactly at the ionization energy still ejects
        assert_eq!(determine_interaction_type(13.6, hydrogen), InteractionType::Photoelectric);

        // A line above the work function: both checks pass, ejection wins
        let overlapping = AtomEnergyData {
            symbol: "X",
            ground_state_energy: -5.0,
            ionization_energy: 5.0,
            energy_levels: &[],
            allowed_transitions: &[Transition {
                from_shell: 2,
                to_shell: 1,
                wavelength: 242.8,
                energy: 5.1,
            }],
        };
        assert!(can_excite_electron(5.1, &overlapping));
        assert_eq!(determine_interaction_type(5.1, &overlapping), InteractionType::Photoelectric);
    }

    #[test]
    fn excitation_and_none() {
        let hydrogen = &HYDROGEN_ENERGY;
        let lyman_alpha = hydrogen.allowed_transitions[0];
        assert_eq!(
            determine_interaction_type(lyman_alpha.energy, hydrogen),
            InteractionType::Excitation
        );
        assert_eq!(determine_interaction_type(5.0, hydrogen), InteractionType::None);
    }

    #[test]
    fn excitation_tolerance_is_exclusive() {
        let hydrogen = &HYDROGEN_ENERGY;
        assert!(can_excite_electron(10.2 + 0.09, hydrogen));
        assert!(!can_excite_electron(10.2 + 0.1 + 1e-9, hydrogen));
    }

    #[test]
    fn missing_energy_data_never_interacts() {
        let radon = find_atom("radon-222").unwrap();
        assert!(radon.energy_data.is_none());
        assert_eq!(classify(100.0, radon.energy_data), InteractionType::None);
        assert_eq!(classify(15.0, Some(&HYDROGEN_ENERGY)), InteractionType::Photoelectric);
    }

    #[test]
    fn kinetic_energy_is_never_negative() {
        assert_eq!(calculate_kinetic_energy(5.0, 7.9), 0.0);
        assert_eq!(calculate_kinetic_energy(0.0, 0.0), 0.0);
        assert!(close(calculate_kinetic_energy(15.0, 13.6), 1.4, 1e-12));
        for e in 0..50 {
            for phi in 0..50 {
                let ke = calculate_kinetic_energy(e as f64 * 0.5, phi as f64 * 0.5);
                assert!(ke >= 0.0);
            }
        }
    }

    #[test]
    fn possible_transitions_keep_duplicates() {
        let oxygen = find_atom("oxygen").unwrap().energy_data.unwrap();
        // The two near-IR lines (1.59 and 1.47 eV) both match a 1.53 eV photon
        let matches = find_possible_transitions(1.53, oxygen, TRANSITION_SEARCH_TOLERANCE);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|t| t.from_shell == 3 && t.to_shell == 2));
        assert!(find_possible_transitions(100.0, oxygen, TRANSITION_SEARCH_TOLERANCE).is_empty());
    }

    #[test]
    fn emission_lines_follow_table_order() {
        assert_eq!(
            emission_wavelengths(&HYDROGEN_ENERGY),
            vec![121.6, 102.6, 656.3, 486.1, 434.0]
        );
    }

    #[test]
    fn region_boundaries_are_exclusive_above() {
        assert_eq!(wavelength_region(0.001), WavelengthRegion::GammaRay);
        assert_eq!(wavelength_region(0.01), WavelengthRegion::XRay);
        assert_eq!(wavelength_region(10.0), WavelengthRegion::Ultraviolet);
        assert_eq!(wavelength_region(379.9), WavelengthRegion::Ultraviolet);
        assert_eq!(wavelength_region(380.0), WavelengthRegion::Violet);
        assert_eq!(wavelength_region(450.0), WavelengthRegion::Blue);
        assert_eq!(wavelength_region(495.0), WavelengthRegion::Green);
        assert_eq!(wavelength_region(570.0), WavelengthRegion::Yellow);
        assert_eq!(wavelength_region(590.0), WavelengthRegion::Orange);
        assert_eq!(wavelength_region(620.0), WavelengthRegion::Red);
        assert_eq!(wavelength_region(750.0), WavelengthRegion::Infrared);
        assert_eq!(wavelength_region(1e6), WavelengthRegion::Microwave);
        assert_eq!(wavelength_region(1e9), WavelengthRegion::Radio);
        assert_eq!(wavelength_region(656.3).name(), "Red");
    }
}
