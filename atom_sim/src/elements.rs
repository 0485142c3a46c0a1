//! Atom reference data
//!
//! Electron shell geometry, spectroscopic energy levels and allowed
//! transitions for every atom the visualizer can display. All tables are
//! `'static` and never change after the program starts.

/// Base orbit radius in scene units
pub const BOHR_RADIUS: f32 = 5.0;

/// Angular velocity of the innermost shell (rad/s); outer shells scale by 1/n²
pub const BASE_ANGULAR_VELOCITY: f32 = 0.45;

/// Atoms served by the stable-atom listing
pub const STABLE_ATOM_KEYS: [&str; 6] = ["hydrogen", "helium", "carbon", "oxygen", "iron", "gold"];

/// A ring of electrons orbiting the nucleus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronShell {
    pub electrons: u32,
    pub radius: f32,
    pub angular_velocity: f32,
    pub tilt: f32,
}

/// Shell `n` holding `electrons`, at `radius` Bohr radii and tilted by `tilt` rad
macro_rules! shell {
    ($n:expr, $electrons:expr, $radius:expr, $tilt:expr) => {
        ElectronShell {
            electrons: $electrons,
            radius: BOHR_RADIUS * $radius,
            angular_velocity: BASE_ANGULAR_VELOCITY / (($n * $n) as f32),
            tilt: $tilt,
        }
    };
}

/// Orbital angular momentum label of an energy level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subshell {
    S,
    P,
    D,
    F,
}

impl Subshell {
    pub fn label(&self) -> char {
        match self {
            Subshell::S => 's',
            Subshell::P => 'p',
            Subshell::D => 'd',
            Subshell::F => 'f',
        }
    }
}

/// An occupied energy level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyLevel {
    /// Principal quantum number n (1, 2, 3, ...)
    pub shell: u32,
    pub subshell: Subshell,
    /// Energy in eV (negative, relative to ionization)
    pub energy: f64,
    pub electrons: u32,
}

/// An allowed radiative transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from_shell: u32,
    pub to_shell: u32,
    /// Wavelength in nm
    pub wavelength: f64,
    /// Energy in eV
    pub energy: f64,
}

/// Spectroscopic data for one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomEnergyData {
    pub symbol: &'static str,
    /// Lowest energy state in eV
    pub ground_state_energy: f64,
    /// Work function (energy to remove an electron) in eV
    pub ionization_energy: f64,
    pub energy_levels: &'static [EnergyLevel],
    pub allowed_transitions: &'static [Transition],
}

impl AtomEnergyData {
    /// Energy levels sorted from most to least bound
    pub fn levels_by_energy(&self) -> Vec<EnergyLevel> {
        let mut levels = self.energy_levels.to_vec();
        levels.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        levels
    }
}

/// Everything needed to draw and simulate one atom or isotope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomProfile {
    /// Catalog key, e.g. `"iron"` or `"uranium-238"`
    pub key: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub atomic_number: u32,
    pub neutrons: u32,
    pub is_radioactive: bool,
    pub shells: &'static [ElectronShell],
    pub energy_data: Option<&'static AtomEnergyData>,
}

impl AtomProfile {
    /// Electron count of the neutral atom
    pub fn total_electrons(&self) -> u32 {
        self.shells.iter().map(|s| s.electrons).sum()
    }

    pub fn mass_number(&self) -> u32 {
        self.atomic_number + self.neutrons
    }
}

macro_rules! level {
    ($n:expr, $sub:ident, $energy:expr, $electrons:expr) => {
        EnergyLevel {
            shell: $n,
            subshell: Subshell::$sub,
            energy: $energy,
            electrons: $electrons,
        }
    };
}

macro_rules! transition {
    ($from:expr => $to:expr, $wavelength:expr, $energy:expr) => {
        Transition {
            from_shell: $from,
            to_shell: $to,
            wavelength: $wavelength,
            energy: $energy,
        }
    };
}

// ============================================================================
// Energy levels (approximations based on spectroscopic data)
// ============================================================================

pub static HYDROGEN_ENERGY: AtomEnergyData = AtomEnergyData {
    symbol: "H",
    ground_state_energy: -13.6,
    ionization_energy: 13.6,
    energy_levels: &[level!(1, S, -13.6, 1)],
    allowed_transitions: &[
        // Lyman series (UV)
        transition!(2 => 1, 121.6, 10.2),
        transition!(3 => 1, 102.6, 12.1),
        // Balmer series (visible)
        transition!(3 => 2, 656.3, 1.89),
        transition!(4 => 2, 486.1, 2.55),
        transition!(5 => 2, 434.0, 2.86),
    ],
};

pub static HELIUM_ENERGY: AtomEnergyData = AtomEnergyData {
    symbol: "He",
    ground_state_energy: -24.6,
    ionization_energy: 24.6,
    energy_levels: &[level!(1, S, -24.6, 2)],
    allowed_transitions: &[
        transition!(2 => 1, 58.4, 21.2),
        transition!(3 => 2, 587.6, 2.11),
        transition!(4 => 2, 471.3, 2.63),
    ],
};

pub static CARBON_ENERGY: AtomEnergyData = AtomEnergyData {
    symbol: "C",
    ground_state_energy: -11.3,
    ionization_energy: 11.3,
    energy_levels: &[
        level!(1, S, -11.3, 2),
        level!(2, S, -4.6, 2),
        level!(2, P, -3.2, 2),
    ],
    allowed_transitions: &[
        transition!(2 => 1, 165.7, 7.48),
        transition!(3 => 2, 247.9, 5.0),
    ],
};

pub static OXYGEN_ENERGY: AtomEnergyData = AtomEnergyData {
    symbol: "O",
    ground_state_energy: -13.6,
    ionization_energy: 13.6,
    energy_levels: &[
        level!(1, S, -13.6, 2),
        level!(2, S, -5.2, 2),
        level!(2, P, -3.1, 4),
    ],
    allowed_transitions: &[
        transition!(2 => 1, 130.4, 9.5),
        // Near IR pair
        transition!(3 => 2, 777.4, 1.59),
        transition!(3 => 2, 844.6, 1.47),
    ],
};

pub static IRON_ENERGY: AtomEnergyData = AtomEnergyData {
    symbol: "Fe",
    ground_state_energy: -7.9,
    ionization_energy: 7.9,
    energy_levels: &[
        level!(1, S, -7.9, 2),
        level!(2, S, -4.8, 2),
        level!(2, P, -4.2, 6),
        level!(3, S, -2.3, 2),
        level!(3, P, -1.8, 6),
        level!(3, D, -1.2, 6),
        level!(4, S, -0.6, 2),
    ],
    allowed_transitions: &[
        transition!(2 => 1, 248.3, 4.99),
        transition!(3 => 2, 371.9, 3.33),
        transition!(4 => 3, 438.4, 2.83),
        transition!(4 => 3, 527.0, 2.35),
    ],
};

pub static GOLD_ENERGY: AtomEnergyData = AtomEnergyData {
    symbol: "Au",
    ground_state_energy: -9.2,
    ionization_energy: 9.2,
    energy_levels: &[
        level!(1, S, -9.2, 2),
        level!(2, S, -5.5, 2),
        level!(2, P, -4.9, 6),
        level!(3, S, -3.2, 2),
        level!(3, P, -2.8, 6),
        level!(3, D, -2.1, 10),
        level!(4, S, -1.5, 2),
        level!(4, P, -1.2, 6),
        level!(4, D, -0.8, 10),
        level!(5, S, -0.5, 2),
        level!(5, P, -0.3, 6),
        level!(6, S, -0.1, 1),
    ],
    allowed_transitions: &[
        transition!(2 => 1, 242.8, 5.1),
        transition!(3 => 2, 267.6, 4.63),
        transition!(4 => 3, 627.8, 1.98),
    ],
};

// ============================================================================
// Shell layouts (ground-state occupancy per principal shell)
// ============================================================================

const LIGHT_TWO_SHELL_TILTS: (f32, f32) = (0.15, -0.25);

static CARBON_SHELLS: [ElectronShell; 2] = [
    shell!(1, 2, 1.0, LIGHT_TWO_SHELL_TILTS.0),
    shell!(2, 4, 1.8, LIGHT_TWO_SHELL_TILTS.1),
];

static NITROGEN_SHELLS: [ElectronShell; 2] = [
    shell!(1, 2, 1.0, LIGHT_TWO_SHELL_TILTS.0),
    shell!(2, 5, 1.8, LIGHT_TWO_SHELL_TILTS.1),
];

static OXYGEN_SHELLS: [ElectronShell; 2] = [
    shell!(1, 2, 1.0, LIGHT_TWO_SHELL_TILTS.0),
    shell!(2, 6, 1.8, LIGHT_TWO_SHELL_TILTS.1),
];

static NEON_SHELLS: [ElectronShell; 2] = [
    shell!(1, 2, 1.0, LIGHT_TWO_SHELL_TILTS.0),
    shell!(2, 8, 1.8, LIGHT_TWO_SHELL_TILTS.1),
];

static SODIUM_SHELLS: [ElectronShell; 3] = [
    shell!(1, 2, 1.0, 0.15),
    shell!(2, 8, 1.8, -0.25),
    shell!(3, 1, 2.6, 0.35),
];

/// Transition metals share iron's four-shell geometry
macro_rules! transition_metal_shells {
    ($third:expr) => {
        [
            shell!(1, 2, 1.0, 0.15),
            shell!(2, 8, 1.8, -0.25),
            shell!(3, $third, 2.6, 0.35),
            shell!(4, 2, 3.6, -0.45),
        ]
    };
}

static IRON_SHELLS: [ElectronShell; 4] = transition_metal_shells!(14);
static COBALT_SHELLS: [ElectronShell; 4] = transition_metal_shells!(15);
static NICKEL_SHELLS: [ElectronShell; 4] = transition_metal_shells!(16);

static GOLD_SHELLS: [ElectronShell; 6] = [
    shell!(1, 2, 0.8, 0.1),
    shell!(2, 8, 1.4, -0.2),
    shell!(3, 18, 2.0, 0.3),
    shell!(4, 32, 2.8, -0.4),
    shell!(5, 18, 3.6, 0.5),
    shell!(6, 1, 4.4, -0.6),
];

/// Heavy elements with six occupied shells (n = 1..6)
macro_rules! heavy_shells {
    ($sixth:expr) => {
        [
            shell!(1, 2, 0.8, 0.1),
            shell!(2, 8, 1.4, -0.2),
            shell!(3, 18, 2.0, 0.3),
            shell!(4, 32, 2.8, -0.4),
            shell!(5, 18, 3.6, 0.5),
            shell!(6, $sixth, 4.4, -0.6),
        ]
    };
}

/// Actinide-region elements with seven occupied shells
macro_rules! actinide_shells {
    ($fifth:expr, $sixth:expr) => {
        [
            shell!(1, 2, 0.8, 0.1),
            shell!(2, 8, 1.4, -0.2),
            shell!(3, 18, 2.0, 0.3),
            shell!(4, 32, 2.8, -0.4),
            shell!(5, $fifth, 3.6, 0.5),
            shell!(6, $sixth, 4.4, -0.6),
            shell!(7, 2, 5.2, 0.7),
        ]
    };
}

static LEAD_SHELLS: [ElectronShell; 6] = heavy_shells!(4);
static BISMUTH_SHELLS: [ElectronShell; 6] = heavy_shells!(5);
static POLONIUM_SHELLS: [ElectronShell; 6] = heavy_shells!(6);
static RADON_SHELLS: [ElectronShell; 6] = heavy_shells!(8);
static RADIUM_SHELLS: [ElectronShell; 7] = actinide_shells!(18, 8);
static THORIUM_SHELLS: [ElectronShell; 7] = actinide_shells!(18, 10);
static PROTACTINIUM_SHELLS: [ElectronShell; 7] = actinide_shells!(20, 9);
static URANIUM_SHELLS: [ElectronShell; 7] = actinide_shells!(21, 9);

// ============================================================================
// Catalog
// ============================================================================

macro_rules! atom {
    ($key:expr, $name:expr, $symbol:expr, $z:expr, $n:expr, $shells:expr, $energy:expr) => {
        atom!($key, $name, $symbol, $z, $n, $shells, $energy, false)
    };
    ($key:expr, $name:expr, $symbol:expr, $z:expr, $n:expr, $shells:expr, $energy:expr, $radioactive:expr) => {
        AtomProfile {
            key: $key,
            name: $name,
            symbol: $symbol,
            atomic_number: $z,
            neutrons: $n,
            is_radioactive: $radioactive,
            shells: $shells,
            energy_data: $energy,
        }
    };
}

/// Every atom and isotope the visualizer knows about
pub static ATOMS: &[AtomProfile] = &[
    // Stable elements with full spectroscopic data
    atom!("hydrogen", "Hydrogen", "H", 1, 0, &[shell!(1, 1, 1.0, 0.0)], Some(&HYDROGEN_ENERGY)),
    atom!("helium", "Helium", "He", 2, 2, &[shell!(1, 2, 1.0, 0.0)], Some(&HELIUM_ENERGY)),
    atom!("carbon", "Carbon", "C", 6, 6, &CARBON_SHELLS, Some(&CARBON_ENERGY)),
    atom!("oxygen", "Oxygen", "O", 8, 8, &OXYGEN_SHELLS, Some(&OXYGEN_ENERGY)),
    atom!("iron", "Iron", "Fe", 26, 30, &IRON_SHELLS, Some(&IRON_ENERGY)),
    atom!("gold", "Gold", "Au", 79, 118, &GOLD_SHELLS, Some(&GOLD_ENERGY)),
    // Uranium series
    atom!("uranium-238", "Uranium-238", "U", 92, 146, &URANIUM_SHELLS, None, true),
    atom!("thorium-234", "Thorium-234", "Th", 90, 144, &THORIUM_SHELLS, None, true),
    atom!("protactinium-234", "Protactinium-234", "Pa", 91, 143, &PROTACTINIUM_SHELLS, None, true),
    atom!("uranium-234", "Uranium-234", "U", 92, 142, &URANIUM_SHELLS, None, true),
    atom!("thorium-230", "Thorium-230", "Th", 90, 140, &THORIUM_SHELLS, None, true),
    atom!("radium-226", "Radium-226", "Ra", 88, 138, &RADIUM_SHELLS, None, true),
    atom!("radon-222", "Radon-222", "Rn", 86, 136, &RADON_SHELLS, None, true),
    atom!("polonium-218", "Polonium-218", "Po", 84, 134, &POLONIUM_SHELLS, None, true),
    atom!("lead-214", "Lead-214", "Pb", 82, 132, &LEAD_SHELLS, None, true),
    atom!("bismuth-214", "Bismuth-214", "Bi", 83, 131, &BISMUTH_SHELLS, None, true),
    atom!("polonium-214", "Polonium-214", "Po", 84, 130, &POLONIUM_SHELLS, None, true),
    atom!("lead-210", "Lead-210", "Pb", 82, 128, &LEAD_SHELLS, None, true),
    atom!("bismuth-210", "Bismuth-210", "Bi", 83, 127, &BISMUTH_SHELLS, None, true),
    atom!("polonium-210", "Polonium-210", "Po", 84, 126, &POLONIUM_SHELLS, None, true),
    atom!("lead-206", "Lead-206", "Pb", 82, 124, &LEAD_SHELLS, None),
    // Radiocarbon; same electron structure as carbon
    atom!("carbon-14", "Carbon-14", "C", 6, 8, &CARBON_SHELLS, Some(&CARBON_ENERGY), true),
    atom!("nitrogen-14", "Nitrogen-14", "N", 7, 7, &NITROGEN_SHELLS, None),
    // Medical/industrial gamma source
    atom!("cobalt-60", "Cobalt-60", "Co", 27, 33, &COBALT_SHELLS, None, true),
    atom!("nickel-60m", "Nickel-60*", "Ni", 28, 32, &NICKEL_SHELLS, None, true),
    atom!("nickel-60", "Nickel-60", "Ni", 28, 32, &NICKEL_SHELLS, None),
    // Positron emitter
    atom!("sodium-22", "Sodium-22", "Na", 11, 11, &SODIUM_SHELLS, None, true),
    atom!("neon-22", "Neon-22", "Ne", 10, 12, &NEON_SHELLS, None),
];

/// Case-insensitive lookup by catalog key
pub fn find_atom(key: &str) -> Option<&'static AtomProfile> {
    ATOMS.iter().find(|atom| atom.key.eq_ignore_ascii_case(key))
}

/// The stable-atom listing, in display order
pub fn stable_atoms() -> Vec<&'static AtomProfile> {
    STABLE_ATOM_KEYS.iter().filter_map(|key| find_atom(key)).collect()
}

/// Catalog key of `atom`, found by identity rather than by name
pub fn key_of(atom: &AtomProfile) -> Option<&'static str> {
    ATOMS
        .iter()
        .find(|candidate| std::ptr::eq(*candidate, atom))
        .map(|candidate| candidate.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photon::wavelength_to_energy;

    #[test]
    fn shell_populations_match_atomic_number() {
        for atom in ATOMS {
            assert_eq!(
                atom.total_electrons(),
                atom.atomic_number,
                "{} has {} electrons in its shells",
                atom.key,
                atom.total_electrons()
            );
        }
    }

    #[test]
    fn catalog_keys_are_unique() {
        for (i, a) in ATOMS.iter().enumerate() {
            for b in &ATOMS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn transitions_satisfy_planck_relation() {
        for atom in ATOMS {
            let Some(data) = atom.energy_data else { continue };
            for t in data.allowed_transitions {
                let expected = wavelength_to_energy(t.wavelength);
                assert!(
                    ((t.energy - expected) / expected).abs() < 0.03,
                    "{}: {} nm listed as {} eV, hc/λ gives {:.3}",
                    atom.key,
                    t.wavelength,
                    t.energy,
                    expected
                );
            }
        }
    }

    #[test]
    fn energy_data_is_self_consistent() {
        for atom in ATOMS {
            let Some(data) = atom.energy_data else { continue };
            assert_eq!(data.symbol, atom.symbol);
            assert!(data.ground_state_energy < 0.0);
            assert!(data.ionization_energy > 0.0);
            assert!(data.energy_levels.iter().all(|l| l.shell >= 1));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_atom("IRON").map(|a| a.symbol), Some("Fe"));
        assert_eq!(find_atom("Uranium-238").map(|a| a.mass_number()), Some(238));
        assert!(find_atom("unobtainium").is_none());
    }

    #[test]
    fn stable_listing_has_six_atoms() {
        let keys: Vec<_> = stable_atoms().iter().map(|a| a.key).collect();
        assert_eq!(keys, STABLE_ATOM_KEYS.to_vec());
        assert!(stable_atoms().iter().all(|a| !a.is_radioactive));
    }

    #[test]
    fn key_of_uses_identity() {
        let gold = find_atom("gold").unwrap();
        assert_eq!(key_of(gold), Some("gold"));

        // A copy has the same contents but is not a catalog entry
        let copy = *gold;
        assert_eq!(key_of(&copy), None);

        // Same-element isotopes share name prefixes and shells, but not keys
        let u238 = find_atom("uranium-238").unwrap();
        let u234 = find_atom("uranium-234").unwrap();
        assert_eq!(key_of(u238), Some("uranium-238"));
        assert_eq!(key_of(u234), Some("uranium-234"));
    }

    #[test]
    fn levels_sorted_most_bound_first() {
        let levels = GOLD_ENERGY.levels_by_energy();
        assert_eq!(levels.first().map(|l| l.energy), Some(-9.2));
        assert_eq!(levels.last().map(|l| l.subshell.label()), Some('s'));
        assert!(levels.windows(2).all(|w| w[0].energy <= w[1].energy));
    }
}
