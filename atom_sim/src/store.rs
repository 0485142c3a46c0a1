//! Simulation state store
//!
//! The single owner of mutable simulation state. Every change goes through a
//! named operation which applies completely before its notifications are
//! queued; consumers read state by reference and react to [`StoreEvent`]s
//! drained with [`SimulationStore::drain_events`].

use crate::config::{InputPolicy, SimConfig};
use crate::decay_data::{find_isotope, DecayMode, DecayType, RadioactiveIsotope};
use crate::elements::{find_atom, key_of, AtomProfile, ATOMS};
use crate::particles::{
    DecayParticle, EjectedElectron, EmittedPhoton, ExcitedElectron, Particle, ParticleId,
    ParticleKind,
};
use crate::photon::{classify, wavelength_to_energy, InteractionType};

/// Atom used when the configured starting atom does not exist
const FALLBACK_ATOM: &str = "iron";

#[derive(Debug, Clone, PartialEq)]
pub struct PhotonState {
    /// nm
    pub wavelength: f64,
    /// 0 to 1
    pub intensity: f64,
    pub is_light_on: bool,
    pub photon_mode_enabled: bool,
    pub current_effect: InteractionType,
    pub excited_electrons: Vec<ExcitedElectron>,
    pub ejected_electrons: Vec<EjectedElectron>,
    pub emitted_photons: Vec<EmittedPhoton>,
    /// Electrons permanently removed from the current atom
    pub ionization_count: u32,
    pub show_energy_diagram: bool,
    pub show_spectrum: bool,
    pub show_calculations: bool,
}

impl PhotonState {
    fn new(wavelength: f64, intensity: f64) -> Self {
        Self {
            wavelength,
            intensity,
            is_light_on: false,
            photon_mode_enabled: false,
            current_effect: InteractionType::None,
            excited_electrons: Vec::new(),
            ejected_electrons: Vec::new(),
            emitted_photons: Vec::new(),
            ionization_count: 0,
            show_energy_diagram: true,
            show_spectrum: true,
            show_calculations: false,
        }
    }

    /// Photon energy of the current wavelength in eV
    pub fn photon_energy(&self) -> f64 {
        wavelength_to_energy(self.wavelength)
    }

    pub fn particle_count(&self) -> usize {
        self.excited_electrons.len() + self.ejected_electrons.len() + self.emitted_photons.len()
    }

    fn clear_particles(&mut self) -> bool {
        let had_particles = self.particle_count() > 0;
        self.excited_electrons.clear();
        self.ejected_electrons.clear();
        self.emitted_photons.clear();
        had_particles
    }
}

/// Append-only record of one parent to daughter transition
#[derive(Debug, Clone, PartialEq)]
pub struct DecayEvent {
    pub id: u64,
    pub decay_type: DecayType,
    pub parent_name: String,
    pub daughter_name: String,
    /// MeV
    pub energy_released: f64,
    /// Presentation-clock seconds
    pub timestamp: f64,
}

impl DecayEvent {
    pub fn new(id: u64, parent: &AtomProfile, mode: &DecayMode, timestamp: f64) -> Self {
        Self {
            id,
            decay_type: mode.decay_type,
            parent_name: parent.name.to_string(),
            daughter_name: mode.daughter_name.to_string(),
            energy_released: mode.energy_released,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecayState {
    pub decay_mode_enabled: bool,
    pub auto_decay_enabled: bool,
    pub is_decaying: bool,
    pub current_decay_type: Option<DecayType>,
    /// 0 to 1 while a decay animation plays
    pub decay_progress: f64,
    pub active_particles: Vec<DecayParticle>,
    pub decay_history: Vec<DecayEvent>,
    pub original_atom_key: Option<&'static str>,
    pub simulated_years: f64,
    /// Simulated years per real second
    pub time_speed: f64,
}

impl DecayState {
    fn new(time_speed: f64) -> Self {
        Self {
            decay_mode_enabled: false,
            auto_decay_enabled: false,
            is_decaying: false,
            current_decay_type: None,
            decay_progress: 0.0,
            active_particles: Vec::new(),
            decay_history: Vec::new(),
            original_atom_key: None,
            simulated_years: 0.0,
            time_speed,
        }
    }

    /// Drop any in-flight decay; history is untouched
    fn settle(&mut self) -> bool {
        let had_particles = !self.active_particles.is_empty();
        self.is_decaying = false;
        self.current_decay_type = None;
        self.decay_progress = 0.0;
        self.active_particles.clear();
        had_particles
    }
}

/// Change notifications, queued in the order the changes were made
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    AtomChanged { key: &'static str },
    WavelengthChanged(f64),
    IntensityChanged(f64),
    LightToggled(bool),
    EffectChanged(InteractionType),
    IonizationChanged(u32),
    ParticleAdded(Particle),
    ParticleRemoved { kind: ParticleKind, id: ParticleId },
    /// All photon-effect particles were dropped at once
    PhotonParticlesCleared,
    /// All decay particles were dropped at once
    DecayParticlesCleared,
    PhotonModeToggled(bool),
    DecayModeToggled(bool),
    AutoDecayToggled(bool),
    DecayTriggered { decay_type: DecayType, daughter_key: &'static str },
    DecayProgress(f64),
    DecayCompleted,
    DecayReset,
    SimulatedTimeAdvanced(f64),
    TimeSpeedChanged(f64),
    DisplayChanged,
}

/// Owner of all simulation state.
///
/// Notifications accumulate until [`drain_events`](Self::drain_events) is
/// called, so a frame loop should drain once per frame. Repeated progress and
/// simulated-time notifications collapse into the latest value while queued.
pub struct SimulationStore {
    current_atom: &'static AtomProfile,
    photon: PhotonState,
    decay: DecayState,
    policy: InputPolicy,
    /// Time speed restored by `reset_decay`
    default_time_speed: f64,
    next_id: u64,
    events: Vec<StoreEvent>,
}

impl Default for SimulationStore {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

impl SimulationStore {
    pub fn new(config: &SimConfig) -> Self {
        let current_atom = find_atom(&config.initial_atom)
            .or_else(|| {
                log::warn!("Unknown starting atom '{}', using {}", config.initial_atom, FALLBACK_ATOM);
                find_atom(FALLBACK_ATOM)
            })
            .unwrap_or(&ATOMS[0]);
        let policy = config.input_policy;
        let default_time_speed = policy.time_speed(config.time_speed);

        log::info!("Simulation store starting with {}", current_atom.name);
        Self {
            current_atom,
            photon: PhotonState::new(policy.wavelength(config.wavelength), policy.intensity(config.intensity)),
            decay: DecayState::new(default_time_speed),
            policy,
            default_time_speed,
            next_id: 1,
            events: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn current_atom(&self) -> &'static AtomProfile {
        self.current_atom
    }

    pub fn photon(&self) -> &PhotonState {
        &self.photon
    }

    pub fn decay(&self) -> &DecayState {
        &self.decay
    }

    pub fn input_policy(&self) -> InputPolicy {
        self.policy
    }

    /// Electrons still bound to the current atom
    pub fn remaining_electrons(&self) -> u32 {
        self.current_atom
            .total_electrons()
            .saturating_sub(self.photon.ionization_count)
    }

    /// Decay table entry of the current atom, if it is a decaying isotope
    pub fn current_isotope(&self) -> Option<&'static RadioactiveIsotope> {
        find_isotope(self.current_atom.key).filter(|iso| iso.is_radioactive)
    }

    /// Take every notification queued since the last drain
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    /// Allocate an id for a new particle or decay event
    pub fn next_particle_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    // ------------------------------------------------------------------
    // Atom and photon operations
    // ------------------------------------------------------------------

    /// Switch to the atom at `key`. Unknown keys leave the state untouched.
    pub fn set_atom(&mut self, key: &str) -> bool {
        let Some(atom) = find_atom(key) else {
            log::warn!("set_atom: unknown atom '{}'", key);
            return false;
        };

        self.current_atom = atom;
        self.photon.ionization_count = 0;
        self.photon.clear_particles();

        let mut events = vec![
            StoreEvent::AtomChanged { key: atom.key },
            StoreEvent::IonizationChanged(0),
            StoreEvent::PhotonParticlesCleared,
        ];

        if self.decay.decay_mode_enabled {
            self.decay.settle();
            self.decay.decay_history.clear();
            self.decay.original_atom_key = Some(atom.key);
            events.push(StoreEvent::DecayParticlesCleared);
        } else {
            // A hand-picked atom starts a new chain on the next enable
            self.decay.original_atom_key = None;
        }

        if let Some(effect) = self.refresh_effect() {
            events.push(StoreEvent::EffectChanged(effect));
        }

        log::info!("Atom set to {}", atom.name);
        self.events.extend(events);
        true
    }

    pub fn set_wavelength(&mut self, wavelength: f64) {
        self.photon.wavelength = self.policy.wavelength(wavelength);
        self.events.push(StoreEvent::WavelengthChanged(self.photon.wavelength));
        self.publish_effect();
    }

    pub fn set_intensity(&mut self, intensity: f64) {
        self.photon.intensity = self.policy.intensity(intensity);
        self.events.push(StoreEvent::IntensityChanged(self.photon.intensity));
    }

    pub fn toggle_light(&mut self) {
        self.photon.is_light_on = !self.photon.is_light_on;
        self.events.push(StoreEvent::LightToggled(self.photon.is_light_on));
        self.publish_effect();
    }

    /// Record one more removed electron. Callers check
    /// [`remaining_electrons`](Self::remaining_electrons) first.
    pub fn increment_ionization(&mut self) {
        self.photon.ionization_count += 1;
        self.events.push(StoreEvent::IonizationChanged(self.photon.ionization_count));
    }

    /// Restore the electron population and drop photon-effect particles
    pub fn reset_atom(&mut self) {
        self.photon.ionization_count = 0;
        self.photon.clear_particles();
        self.events.extend([StoreEvent::IonizationChanged(0), StoreEvent::PhotonParticlesCleared]);
    }

    pub fn toggle_photon_mode(&mut self) {
        let enabled = !self.photon.photon_mode_enabled;
        self.photon.photon_mode_enabled = enabled;
        let mut events = vec![StoreEvent::PhotonModeToggled(enabled)];
        if !enabled && self.photon.clear_particles() {
            events.push(StoreEvent::PhotonParticlesCleared);
        }
        self.events.extend(events);
        self.publish_effect();
    }

    pub fn toggle_energy_diagram(&mut self) {
        self.photon.show_energy_diagram = !self.photon.show_energy_diagram;
        self.events.push(StoreEvent::DisplayChanged);
    }

    pub fn toggle_spectrum(&mut self) {
        self.photon.show_spectrum = !self.photon.show_spectrum;
        self.events.push(StoreEvent::DisplayChanged);
    }

    pub fn toggle_calculations(&mut self) {
        self.photon.show_calculations = !self.photon.show_calculations;
        self.events.push(StoreEvent::DisplayChanged);
    }

    // ------------------------------------------------------------------
    // Photon particle lists
    // ------------------------------------------------------------------

    /// Returns false if a particle with the same id is already listed
    pub fn add_excited_electron(&mut self, electron: ExcitedElectron) -> bool {
        if self.photon.excited_electrons.iter().any(|e| e.id == electron.id) {
            log::debug!("Duplicate excited electron {}", electron.id);
            return false;
        }
        self.photon.excited_electrons.push(electron);
        self.events.push(StoreEvent::ParticleAdded(Particle::ExcitedElectron(electron)));
        true
    }

    pub fn remove_excited_electron(&mut self, id: ParticleId) -> bool {
        let removed = remove_by_id(&mut self.photon.excited_electrons, |e| e.id == id);
        self.publish_removal(removed, ParticleKind::ExcitedElectron, id)
    }

    pub fn add_ejected_electron(&mut self, electron: EjectedElectron) -> bool {
        if self.photon.ejected_electrons.iter().any(|e| e.id == electron.id) {
            log::debug!("Duplicate ejected electron {}", electron.id);
            return false;
        }
        self.photon.ejected_electrons.push(electron);
        self.events.push(StoreEvent::ParticleAdded(Particle::EjectedElectron(electron)));
        true
    }

    pub fn remove_ejected_electron(&mut self, id: ParticleId) -> bool {
        let removed = remove_by_id(&mut self.photon.ejected_electrons, |e| e.id == id);
        self.publish_removal(removed, ParticleKind::EjectedElectron, id)
    }

    pub fn add_emitted_photon(&mut self, photon: EmittedPhoton) -> bool {
        if self.photon.emitted_photons.iter().any(|p| p.id == photon.id) {
            log::debug!("Duplicate emitted photon {}", photon.id);
            return false;
        }
        self.photon.emitted_photons.push(photon);
        self.events.push(StoreEvent::ParticleAdded(Particle::EmittedPhoton(photon)));
        true
    }

    pub fn remove_emitted_photon(&mut self, id: ParticleId) -> bool {
        let removed = remove_by_id(&mut self.photon.emitted_photons, |p| p.id == id);
        self.publish_removal(removed, ParticleKind::EmittedPhoton, id)
    }

    // ------------------------------------------------------------------
    // Decay operations
    // ------------------------------------------------------------------

    pub fn toggle_decay_mode(&mut self) {
        let enabled = !self.decay.decay_mode_enabled;
        self.decay.decay_mode_enabled = enabled;

        let mut events = vec![StoreEvent::DecayModeToggled(enabled)];
        if enabled {
            // Keep the chain's starting atom across a disable/enable. Identity
            // lookup, so same-named isotopes cannot be confused.
            if self.decay.original_atom_key.is_none() {
                self.decay.original_atom_key = key_of(self.current_atom);
            }
        } else if self.decay.is_decaying || !self.decay.active_particles.is_empty() {
            self.decay.settle();
            events.push(StoreEvent::DecayParticlesCleared);
        }

        log::debug!(
            "Decay mode {} (original atom: {:?})",
            if enabled { "enabled" } else { "disabled" },
            self.decay.original_atom_key
        );
        self.events.extend(events);
    }

    pub fn toggle_auto_decay(&mut self) {
        self.decay.auto_decay_enabled = !self.decay.auto_decay_enabled;
        self.events.push(StoreEvent::AutoDecayToggled(self.decay.auto_decay_enabled));
    }

    /// Turn the current atom into the daughter at `daughter_key`.
    ///
    /// Rejected while a decay is already playing, and for unknown daughters.
    pub fn trigger_decay(&mut self, decay_type: DecayType, daughter_key: &str, event: DecayEvent) -> bool {
        if self.decay.is_decaying {
            log::warn!("trigger_decay: {} decay still in progress", self.current_atom.name);
            return false;
        }
        let Some(daughter) = find_atom(daughter_key) else {
            log::warn!("trigger_decay: unknown daughter '{}'", daughter_key);
            return false;
        };

        log::info!(
            "{} decay: {} -> {}",
            decay_type.name(),
            self.current_atom.name,
            daughter.name
        );

        self.current_atom = daughter;
        self.decay.is_decaying = true;
        self.decay.current_decay_type = Some(decay_type);
        self.decay.decay_progress = 0.0;
        self.decay.decay_history.push(event);

        self.events.extend([
            StoreEvent::AtomChanged { key: daughter.key },
            StoreEvent::DecayTriggered { decay_type, daughter_key: daughter.key },
        ]);
        self.publish_effect();
        true
    }

    pub fn add_decay_particle(&mut self, particle: DecayParticle) -> bool {
        if self.decay.active_particles.iter().any(|p| p.id == particle.id) {
            log::debug!("Duplicate decay particle {}", particle.id);
            return false;
        }
        self.decay.active_particles.push(particle);
        self.events.push(StoreEvent::ParticleAdded(Particle::DecayParticle(particle)));
        true
    }

    pub fn remove_decay_particle(&mut self, id: ParticleId) -> bool {
        let removed = remove_by_id(&mut self.decay.active_particles, |p| p.id == id);
        self.publish_removal(removed, ParticleKind::DecayParticle, id)
    }

    pub fn set_decay_progress(&mut self, progress: f64) {
        self.decay.decay_progress = progress.clamp(0.0, 1.0);
        self.push_latest(StoreEvent::DecayProgress(self.decay.decay_progress));
    }

    /// End the current decay animation. History is kept.
    pub fn complete_decay(&mut self) {
        let had_particles = self.decay.settle();
        if had_particles {
            self.events.push(StoreEvent::DecayParticlesCleared);
        }
        self.events.push(StoreEvent::DecayCompleted);
    }

    /// Return to the atom captured when decay mode was enabled and start the
    /// decay record over. Only the mode flag and the captured atom survive;
    /// auto-decay turns off and the time speed goes back to its configured
    /// value. Without a captured atom the current atom stays.
    pub fn reset_decay(&mut self) {
        let mut events = Vec::new();

        let original = self.decay.original_atom_key.and_then(find_atom);
        if let Some(atom) = original {
            if !std::ptr::eq(atom, self.current_atom) {
                self.current_atom = atom;
                self.photon.ionization_count = 0;
                self.photon.clear_particles();
                events.extend([
                    StoreEvent::AtomChanged { key: atom.key },
                    StoreEvent::IonizationChanged(0),
                    StoreEvent::PhotonParticlesCleared,
                ]);
            }
        }

        if !self.decay.active_particles.is_empty() {
            events.push(StoreEvent::DecayParticlesCleared);
        }
        let fresh = DecayState {
            decay_mode_enabled: self.decay.decay_mode_enabled,
            original_atom_key: self.decay.original_atom_key,
            ..DecayState::new(self.default_time_speed)
        };
        let previous = std::mem::replace(&mut self.decay, fresh);
        if previous.auto_decay_enabled {
            events.push(StoreEvent::AutoDecayToggled(false));
        }
        if previous.time_speed != self.decay.time_speed {
            events.push(StoreEvent::TimeSpeedChanged(self.decay.time_speed));
        }
        events.push(StoreEvent::DecayReset);

        log::info!("Decay reset to {}", self.current_atom.name);
        self.events.extend(events);
        self.publish_effect();
    }

    /// Advance the simulated clock. Non-positive or non-finite steps are ignored
    /// so the clock never runs backwards.
    pub fn add_simulated_time(&mut self, years: f64) {
        if !(years.is_finite() && years > 0.0) {
            return;
        }
        self.decay.simulated_years += years;
        self.push_latest(StoreEvent::SimulatedTimeAdvanced(self.decay.simulated_years));
    }

    pub fn set_time_speed(&mut self, years_per_second: f64) {
        self.decay.time_speed = self.policy.time_speed(years_per_second);
        self.events.push(StoreEvent::TimeSpeedChanged(self.decay.time_speed));
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Recompute the interaction classification; `Some` if it changed
    fn refresh_effect(&mut self) -> Option<InteractionType> {
        let effect = if self.photon.is_light_on && self.photon.photon_mode_enabled {
            classify(self.photon.photon_energy(), self.current_atom.energy_data)
        } else {
            InteractionType::None
        };

        if effect == self.photon.current_effect {
            return None;
        }
        self.photon.current_effect = effect;
        Some(effect)
    }

    fn publish_effect(&mut self) {
        if let Some(effect) = self.refresh_effect() {
            log::debug!("Interaction is now {}", effect.label());
            self.events.push(StoreEvent::EffectChanged(effect));
        }
    }

    /// Queue `event`, replacing the newest queued event if it is the same kind
    fn push_latest(&mut self, event: StoreEvent) {
        match self.events.last_mut() {
            Some(last) if std::mem::discriminant(last) == std::mem::discriminant(&event) => *last = event,
            _ => self.events.push(event),
        }
    }

    fn publish_removal(&mut self, removed: bool, kind: ParticleKind, id: ParticleId) -> bool {
        if removed {
            self.events.push(StoreEvent::ParticleRemoved { kind, id });
        }
        removed
    }
}

fn remove_by_id<T, F: Fn(&T) -> bool>(list: &mut Vec<T>, matches: F) -> bool {
    let before = list.len();
    list.retain(|item| !matches(item));
    list.len() != before
}
