//! Photon source
//!
//! While the light shines on the atom, photons are absorbed at a rate set by
//! the beam intensity. What an absorption does depends on the store's current
//! interaction classification.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::elements::AtomProfile;
use crate::particles::{random_direction, EjectedElectron, EmittedPhoton, ExcitedElectron, ParticleId};
use crate::photon::{calculate_kinetic_energy, find_possible_transitions, InteractionType, TRANSITION_SEARCH_TOLERANCE};
use crate::store::SimulationStore;

/// Absorptions per second at full intensity
pub const ABSORPTIONS_PER_SECOND: f64 = 4.0;

/// Upper bound on simultaneously excited electrons
pub const MAX_EXCITED_ELECTRONS: usize = 8;

/// Absorptions handled in one update at most, whatever the frame time
const MAX_ABSORPTIONS_PER_UPDATE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorption {
    Ejected(ParticleId),
    Excited(ParticleId),
    /// The photon passed through without effect
    Ignored,
}

/// Index of the outermost shell still holding an electron once `ionized`
/// electrons have been stripped from the outside in
pub fn outermost_bound_shell(atom: &AtomProfile, ionized: u32) -> Option<usize> {
    let mut to_strip = ionized;
    for (index, shell) in atom.shells.iter().enumerate().rev() {
        if to_strip < shell.electrons {
            return Some(index);
        }
        to_strip -= shell.electrons;
    }
    None
}

#[derive(Debug, Default)]
pub struct PhotonSource {
    accumulator: f64,
    absorbed: u64,
}

impl PhotonSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total absorptions that had an effect
    pub fn absorbed(&self) -> u64 {
        self.absorbed
    }

    fn is_shining(store: &SimulationStore) -> bool {
        let photon = store.photon();
        photon.photon_mode_enabled && photon.is_light_on
    }

    /// Advance by `dt` seconds and absorb every photon that arrives
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        store: &mut SimulationStore,
        dt: f64,
        rng: &mut R,
        now: f64,
    ) -> Vec<Absorption> {
        if !Self::is_shining(store) {
            self.accumulator = 0.0;
            return Vec::new();
        }

        self.accumulator += dt.max(0.0) * ABSORPTIONS_PER_SECOND * store.photon().intensity.max(0.0);

        let mut results = Vec::new();
        while self.accumulator >= 1.0 && results.len() < MAX_ABSORPTIONS_PER_UPDATE {
            self.accumulator -= 1.0;
            results.push(self.absorb(store, rng, now));
        }
        // Drop any backlog beyond the per-update cap
        self.accumulator = self.accumulator.min(1.0);
        results
    }

    /// Absorb a single photon at the current wavelength
    pub fn absorb<R: Rng + ?Sized>(
        &mut self,
        store: &mut SimulationStore,
        rng: &mut R,
        now: f64,
    ) -> Absorption {
        if !Self::is_shining(store) {
            return Absorption::Ignored;
        }
        let atom = store.current_atom();
        let Some(data) = atom.energy_data else {
            return Absorption::Ignored;
        };
        let energy = store.photon().photon_energy();

        let result = match store.photon().current_effect {
            InteractionType::Photoelectric => {
                let Some(shell_index) = outermost_bound_shell(atom, store.photon().ionization_count) else {
                    log::debug!("{} is fully ionized", atom.name);
                    return Absorption::Ignored;
                };
                let electron = EjectedElectron {
                    id: store.next_particle_id(),
                    direction: random_direction(rng),
                    kinetic_energy: calculate_kinetic_energy(energy, data.ionization_energy),
                    shell_index,
                    created_at: now,
                };
                if !store.add_ejected_electron(electron) {
                    return Absorption::Ignored;
                }
                store.increment_ionization();
                Absorption::Ejected(electron.id)
            }
            InteractionType::Excitation => {
                if store.photon().excited_electrons.len() >= MAX_EXCITED_ELECTRONS {
                    return Absorption::Ignored;
                }
                let candidates = find_possible_transitions(energy, data, TRANSITION_SEARCH_TOLERANCE);
                let Some(transition) = candidates.choose(rng).copied() else {
                    return Absorption::Ignored;
                };
                let last_shell = atom.shells.len().saturating_sub(1);
                let electron = ExcitedElectron {
                    id: store.next_particle_id(),
                    transition: *transition,
                    shell_index: (transition.to_shell as usize).saturating_sub(1).min(last_shell),
                    created_at: now,
                };
                if !store.add_excited_electron(electron) {
                    return Absorption::Ignored;
                }
                Absorption::Excited(electron.id)
            }
            InteractionType::None => Absorption::Ignored,
        };

        if result != Absorption::Ignored {
            self.absorbed += 1;
        }
        result
    }
}

/// Drop an excited electron back to its shell, emitting a photon at the
/// transition's wavelength. Returns the new photon's id.
pub fn relax_electron<R: Rng + ?Sized>(
    store: &mut SimulationStore,
    id: ParticleId,
    rng: &mut R,
    now: f64,
) -> Option<ParticleId> {
    let electron = store
        .photon()
        .excited_electrons
        .iter()
        .find(|e| e.id == id)
        .copied()?;
    store.remove_excited_electron(id);

    let photon = EmittedPhoton {
        id: store.next_particle_id(),
        direction: random_direction(rng),
        wavelength: electron.transition.wavelength,
        created_at: now,
    };
    store.add_emitted_photon(photon).then_some(photon.id)
}
