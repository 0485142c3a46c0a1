//! Radioactive decay reference data
//!
//! Decay modes per isotope: type, branching ratio, half-life, released
//! energy and the daughter nuclide. Modes are listed dominant branch first.

use crate::constants::SECONDS_PER_YEAR;
use crate::elements::{find_atom, AtomProfile};

/// Kind of nuclear decay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecayType {
    Alpha,
    BetaMinus,
    BetaPlus,
    Gamma,
}

impl DecayType {
    pub fn name(&self) -> &'static str {
        match self {
            DecayType::Alpha => "Alpha (α)",
            DecayType::BetaMinus => "Beta⁻ (β⁻)",
            DecayType::BetaPlus => "Beta⁺ (β⁺)",
            DecayType::Gamma => "Gamma (γ)",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DecayType::Alpha => "α",
            DecayType::BetaMinus => "β⁻",
            DecayType::BetaPlus => "β⁺",
            DecayType::Gamma => "γ",
        }
    }

    /// Display colour of the emitted particle
    pub fn color(&self) -> [f32; 3] {
        match self {
            DecayType::Alpha => [1.0, 0.8, 0.0],
            DecayType::BetaMinus => [0.0, 0.8, 1.0],
            DecayType::BetaPlus => [1.0, 0.4, 1.0],
            DecayType::Gamma => [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayMode {
    pub decay_type: DecayType,
    /// Branching ratio in [0, 1]
    pub probability: f64,
    /// Half-life in seconds
    pub half_life: f64,
    pub half_life_display: &'static str,
    /// Energy released in MeV
    pub energy_released: f64,
    /// Catalog key of the resulting nuclide
    pub daughter_key: &'static str,
    pub daughter_symbol: &'static str,
    pub daughter_name: &'static str,
    pub description: &'static str,
}

impl DecayMode {
    pub fn half_life_years(&self) -> f64 {
        self.half_life / SECONDS_PER_YEAR
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadioactiveIsotope {
    pub key: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub mass_number: u32,
    pub atomic_number: u32,
    pub neutrons: u32,
    pub is_radioactive: bool,
    pub decay_modes: &'static [DecayMode],
}

impl RadioactiveIsotope {
    /// The dominant (first listed) decay branch
    pub fn primary_decay(&self) -> Option<&'static DecayMode> {
        self.decay_modes.first()
    }

    /// The branch with the highest branching ratio; ties keep table order
    pub fn most_probable_decay(&self) -> Option<&'static DecayMode> {
        self.decay_modes.iter().fold(None, |best: Option<&'static DecayMode>, mode| match best {
            Some(b) if b.probability >= mode.probability => Some(b),
            _ => Some(mode),
        })
    }

    /// The matching entry in the atom catalog
    pub fn atom(&self) -> Option<&'static AtomProfile> {
        find_atom(self.key)
    }
}

macro_rules! mode {
    (
        $ty:ident, $prob:expr, $half_life:expr, $display:expr, $mev:expr,
        $daughter:expr, $dsym:expr, $dname:expr, $desc:expr
    ) => {
        DecayMode {
            decay_type: DecayType::$ty,
            probability: $prob,
            half_life: $half_life,
            half_life_display: $display,
            energy_released: $mev,
            daughter_key: $daughter,
            daughter_symbol: $dsym,
            daughter_name: $dname,
            description: $desc,
        }
    };
}

macro_rules! isotope {
    ($key:expr, $sym:expr, $name:expr, $z:expr, $n:expr, [$($mode:expr),* $(,)?]) => {
        RadioactiveIsotope {
            key: $key,
            symbol: $sym,
            name: $name,
            mass_number: $z + $n,
            atomic_number: $z,
            neutrons: $n,
            is_radioactive: !(&[$($mode),*] as &[DecayMode]).is_empty(),
            decay_modes: &[$($mode),*],
        }
    };
}

pub static ISOTOPES: &[RadioactiveIsotope] = &[
    // Uranium-238 series
    isotope!("uranium-238", "U", "Uranium-238", 92, 146, [mode!(
        Alpha, 1.0, 1.41e17, "4.5 billion years", 4.27,
        "thorium-234", "Th", "Thorium-234",
        "Emits an alpha particle (2 protons + 2 neutrons), transforming into Thorium-234"
    )]),
    isotope!("thorium-234", "Th", "Thorium-234", 90, 144, [mode!(
        BetaMinus, 1.0, 2.08e6, "24.1 days", 0.27,
        "protactinium-234", "Pa", "Protactinium-234",
        "A neutron converts to a proton, emitting an electron and an antineutrino"
    )]),
    isotope!("protactinium-234", "Pa", "Protactinium-234", 91, 143, [mode!(
        BetaMinus, 0.9984, 70.2, "1.17 minutes", 2.27,
        "uranium-234", "U", "Uranium-234",
        "Beta decay back to uranium, two mass units lighter than where the chain began"
    )]),
    isotope!("uranium-234", "U", "Uranium-234", 92, 142, [mode!(
        Alpha, 1.0, 7.747e12, "245,500 years", 4.86,
        "thorium-230", "Th", "Thorium-230",
        "Emits an alpha particle, transforming into Thorium-230"
    )]),
    isotope!("thorium-230", "Th", "Thorium-230", 90, 140, [mode!(
        Alpha, 1.0, 2.379e12, "75,400 years", 4.77,
        "radium-226", "Ra", "Radium-226",
        "Emits an alpha particle, transforming into Radium-226"
    )]),
    isotope!("radium-226", "Ra", "Radium-226", 88, 138, [mode!(
        Alpha, 1.0, 5.05e10, "1,600 years", 4.87,
        "radon-222", "Rn", "Radon-222",
        "Emits an alpha particle, producing the radioactive noble gas Radon-222"
    )]),
    isotope!("radon-222", "Rn", "Radon-222", 86, 136, [mode!(
        Alpha, 1.0, 3.3035e5, "3.8 days", 5.59,
        "polonium-218", "Po", "Polonium-218",
        "Emits an alpha particle, transforming into Polonium-218"
    )]),
    isotope!("polonium-218", "Po", "Polonium-218", 84, 134, [mode!(
        Alpha, 0.9998, 185.9, "3.1 minutes", 6.11,
        "lead-214", "Pb", "Lead-214",
        "Emits an alpha particle, transforming into Lead-214"
    )]),
    isotope!("lead-214", "Pb", "Lead-214", 82, 132, [mode!(
        BetaMinus, 1.0, 1608.0, "26.8 minutes", 1.02,
        "bismuth-214", "Bi", "Bismuth-214",
        "A neutron converts to a proton, transforming into Bismuth-214"
    )]),
    isotope!("bismuth-214", "Bi", "Bismuth-214", 83, 131, [mode!(
        BetaMinus, 0.9998, 1194.0, "19.9 minutes", 3.27,
        "polonium-214", "Po", "Polonium-214",
        "A neutron converts to a proton, transforming into Polonium-214"
    )]),
    isotope!("polonium-214", "Po", "Polonium-214", 84, 130, [mode!(
        Alpha, 1.0, 1.643e-4, "164 microseconds", 7.83,
        "lead-210", "Pb", "Lead-210",
        "Emits an alpha particle almost instantly, transforming into Lead-210"
    )]),
    isotope!("lead-210", "Pb", "Lead-210", 82, 128, [mode!(
        BetaMinus, 1.0, 7.006e8, "22.2 years", 0.064,
        "bismuth-210", "Bi", "Bismuth-210",
        "A low-energy beta decay, transforming into Bismuth-210"
    )]),
    isotope!("bismuth-210", "Bi", "Bismuth-210", 83, 127, [mode!(
        BetaMinus, 1.0, 4.33e5, "5.0 days", 1.16,
        "polonium-210", "Po", "Polonium-210",
        "A neutron converts to a proton, transforming into Polonium-210"
    )]),
    isotope!("polonium-210", "Po", "Polonium-210", 84, 126, [mode!(
        Alpha, 1.0, 1.20e7, "138 days", 5.41,
        "lead-206", "Pb", "Lead-206",
        "Emits an alpha particle, ending the chain at stable Lead-206"
    )]),
    isotope!("lead-206", "Pb", "Lead-206", 82, 124, []),
    // Radiocarbon dating
    isotope!("carbon-14", "C", "Carbon-14", 6, 8, [mode!(
        BetaMinus, 1.0, 1.81e11, "5,730 years", 0.156,
        "nitrogen-14", "N", "Nitrogen-14",
        "A neutron converts to a proton, emitting an electron and turning carbon into nitrogen"
    )]),
    isotope!("nitrogen-14", "N", "Nitrogen-14", 7, 7, []),
    // Beta decay followed by prompt gamma emission
    isotope!("cobalt-60", "Co", "Cobalt-60", 27, 33, [
        mode!(
            BetaMinus, 0.999, 1.66e8, "5.27 years", 0.318,
            "nickel-60m", "Ni", "Nickel-60*",
            "Beta decay leaves Nickel-60 in an excited nuclear state"
        ),
        mode!(
            Gamma, 1.0, 1.66e8, "5.27 years", 2.50,
            "nickel-60", "Ni", "Nickel-60",
            "The excited nucleus releases two gamma rays (1.17 and 1.33 MeV)"
        ),
    ]),
    isotope!("nickel-60m", "Ni", "Nickel-60*", 28, 32, [mode!(
        Gamma, 1.0, 7.0e-13, "< 1 picosecond", 2.50,
        "nickel-60", "Ni", "Nickel-60",
        "The excited nucleus drops to its ground state by emitting gamma rays"
    )]),
    isotope!("nickel-60", "Ni", "Nickel-60", 28, 32, []),
    // Positron emission
    isotope!("sodium-22", "Na", "Sodium-22", 11, 11, [mode!(
        BetaPlus, 0.90, 8.21e7, "2.6 years", 2.84,
        "neon-22", "Ne", "Neon-22",
        "A proton converts to a neutron, emitting a positron and a neutrino"
    )]),
    isotope!("neon-22", "Ne", "Neon-22", 10, 12, []),
];

/// Case-insensitive lookup by catalog key
pub fn find_isotope(key: &str) -> Option<&'static RadioactiveIsotope> {
    ISOTOPES.iter().find(|iso| iso.key.eq_ignore_ascii_case(key))
}

/// Dominant decay branch of the isotope at `key`, if it decays at all
pub fn primary_decay(key: &str) -> Option<&'static DecayMode> {
    find_isotope(key).and_then(|iso| iso.primary_decay())
}

/// Isotopes that decay, in table order
pub fn radioactive_isotopes() -> impl Iterator<Item = &'static RadioactiveIsotope> {
    ISOTOPES.iter().filter(|iso| iso.is_radioactive)
}
