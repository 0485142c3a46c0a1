//! Particle lifetimes
//!
//! Every particle added to the store plays for a fixed time and then removes
//! itself. Animations belong to a photon or a decay group; clearing that part
//! of the store cancels the whole group so no stale timer touches the store.

use rand::Rng;

use crate::decay_data::DecayType;
use crate::interaction::relax_electron;
use crate::particles::{Particle, ParticleId, ParticleKind};
use crate::scheduler::CancelToken;
use crate::store::{SimulationStore, StoreEvent};

/// Seconds an electron stays excited before relaxing
pub const EXCITED_LIFETIME: f64 = 2.0;
pub const EJECTED_LIFETIME: f64 = 3.0;
pub const PHOTON_LIFETIME: f64 = 1.5;
pub const ALPHA_LIFETIME: f64 = 4.0;
pub const BETA_LIFETIME: f64 = 3.5;
pub const GAMMA_LIFETIME: f64 = 2.5;

/// How long `particle` plays, in seconds
pub fn lifetime(particle: &Particle) -> f64 {
    match particle {
        Particle::ExcitedElectron(_) => EXCITED_LIFETIME,
        Particle::EjectedElectron(_) => EJECTED_LIFETIME,
        Particle::EmittedPhoton(_) => PHOTON_LIFETIME,
        Particle::DecayParticle(p) => match p.decay_type {
            DecayType::Alpha => ALPHA_LIFETIME,
            DecayType::BetaMinus | DecayType::BetaPlus => BETA_LIFETIME,
            DecayType::Gamma => GAMMA_LIFETIME,
        },
    }
}

#[derive(Debug, Clone)]
struct Animation {
    id: ParticleId,
    kind: ParticleKind,
    started_at: f64,
    duration: f64,
    token: CancelToken,
}

impl Animation {
    fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }
}

pub struct ParticleAnimator {
    animations: Vec<Animation>,
    photon_group: CancelToken,
    decay_group: CancelToken,
}

impl Default for ParticleAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleAnimator {
    pub fn new() -> Self {
        Self {
            animations: Vec::new(),
            photon_group: CancelToken::new(),
            decay_group: CancelToken::new(),
        }
    }

    pub fn active(&self) -> usize {
        self.animations.len()
    }

    /// Progress in [0, 1] of the animation for `id`, if it is playing
    pub fn progress_of(&self, id: ParticleId, now: f64) -> Option<f64> {
        self.animations
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.progress(now))
    }

    /// React to store notifications: start, drop or cancel animations
    pub fn handle_events(&mut self, events: &[StoreEvent], now: f64) {
        for event in events {
            match event {
                StoreEvent::ParticleAdded(particle) => self.start(particle, now),
                StoreEvent::ParticleRemoved { id, .. } => self.animations.retain(|a| a.id != *id),
                StoreEvent::PhotonParticlesCleared => self.cancel_photon_group(),
                StoreEvent::DecayParticlesCleared => self.cancel_decay_group(),
                _ => {}
            }
        }
    }

    fn start(&mut self, particle: &Particle, now: f64) {
        let kind = particle.kind();
        let token = if kind.is_photon_effect() {
            self.photon_group.clone()
        } else {
            self.decay_group.clone()
        };
        self.animations.push(Animation {
            id: particle.id(),
            kind,
            started_at: now,
            duration: lifetime(particle),
            token,
        });
    }

    pub fn cancel_photon_group(&mut self) {
        self.photon_group.cancel();
        self.photon_group = CancelToken::new();
        self.prune();
    }

    pub fn cancel_decay_group(&mut self) {
        self.decay_group.cancel();
        self.decay_group = CancelToken::new();
        self.prune();
    }

    fn prune(&mut self) {
        let before = self.animations.len();
        self.animations.retain(|a| !a.token.is_cancelled());
        let dropped = before - self.animations.len();
        if dropped > 0 {
            log::debug!("Cancelled {} particle animations", dropped);
        }
    }

    /// Finish every animation that has run its course at time `now`
    pub fn update<R: Rng + ?Sized>(&mut self, store: &mut SimulationStore, rng: &mut R, now: f64) {
        self.prune();

        let (finished, playing): (Vec<_>, Vec<_>) = self
            .animations
            .drain(..)
            .partition(|a| now - a.started_at >= a.duration);
        self.animations = playing;

        for animation in finished {
            match animation.kind {
                ParticleKind::ExcitedElectron => {
                    relax_electron(store, animation.id, rng, now);
                }
                ParticleKind::EjectedElectron => {
                    store.remove_ejected_electron(animation.id);
                }
                ParticleKind::EmittedPhoton => {
                    store.remove_emitted_photon(animation.id);
                }
                ParticleKind::DecayParticle => {
                    store.remove_decay_particle(animation.id);
                }
            }
        }

        if store.decay().is_decaying {
            if store.decay().active_particles.is_empty() {
                store.complete_decay();
            } else {
                let progress = self
                    .animations
                    .iter()
                    .filter(|a| a.kind == ParticleKind::DecayParticle)
                    .map(|a| a.progress(now))
                    .fold(f64::INFINITY, f64::min);
                if progress.is_finite() && progress != store.decay().decay_progress {
                    store.set_decay_progress(progress);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::decay_data::primary_decay;
    use crate::interaction::{Absorption, PhotonSource};
    use crate::scheduler::fire_decay;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_with(atom: &str) -> SimulationStore {
        SimulationStore::new(&SimConfig {
            initial_atom: atom.to_string(),
            ..SimConfig::default()
        })
    }

    fn pump(animator: &mut ParticleAnimator, store: &mut SimulationStore, now: f64) {
        let events = store.drain_events();
        animator.handle_events(&events, now);
    }

    #[test]
    fn decay_completes_when_particle_finishes() {
        let mut store = store_with("uranium-238");
        let mut animator = ParticleAnimator::new();
        let mut rng = StdRng::seed_from_u64(21);

        assert!(fire_decay(&mut store, primary_decay("uranium-238").unwrap(), &mut rng, 0.0));
        pump(&mut animator, &mut store, 0.0);
        assert_eq!(animator.active(), 1);

        animator.update(&mut store, &mut rng, 2.0);
        assert!(store.decay().is_decaying);
        assert!((store.decay().decay_progress - 0.5).abs() < 1e-9);

        animator.update(&mut store, &mut rng, ALPHA_LIFETIME);
        assert!(!store.decay().is_decaying);
        assert!(store.decay().active_particles.is_empty());
        assert_eq!(store.decay().decay_history.len(), 1);
        assert_eq!(animator.active(), 0);
    }

    #[test]
    fn excited_electron_relaxes_into_photon() {
        let mut store = store_with("hydrogen");
        store.set_wavelength(486.1);
        store.toggle_photon_mode();
        store.toggle_light();
        let mut animator = ParticleAnimator::new();
        let mut rng = StdRng::seed_from_u64(22);

        let outcome = PhotonSource::new().absorb(&mut store, &mut rng, 0.0);
        assert!(matches!(outcome, Absorption::Excited(_)));
        pump(&mut animator, &mut store, 0.0);

        animator.update(&mut store, &mut rng, EXCITED_LIFETIME);
        assert!(store.photon().excited_electrons.is_empty());
        assert_eq!(store.photon().emitted_photons.len(), 1);

        // The photon registers on the next pump and expires on its own
        pump(&mut animator, &mut store, EXCITED_LIFETIME);
        animator.update(&mut store, &mut rng, EXCITED_LIFETIME + PHOTON_LIFETIME);
        assert_eq!(store.photon().particle_count(), 0);
    }

    #[test]
    fn atom_change_cancels_photon_animations() {
        let mut store = store_with("hydrogen");
        store.set_wavelength(50.0);
        store.toggle_photon_mode();
        store.toggle_light();
        let mut animator = ParticleAnimator::new();
        let mut rng = StdRng::seed_from_u64(23);

        PhotonSource::new().absorb(&mut store, &mut rng, 0.0);
        pump(&mut animator, &mut store, 0.0);
        assert_eq!(animator.active(), 1);

        store.set_atom("gold");
        pump(&mut animator, &mut store, 0.5);
        assert_eq!(animator.active(), 0);
    }

    #[test]
    fn decay_mode_off_cancels_decay_animations() {
        let mut store = store_with("uranium-238");
        store.toggle_decay_mode();
        let mut animator = ParticleAnimator::new();
        let mut rng = StdRng::seed_from_u64(24);

        fire_decay(&mut store, primary_decay("uranium-238").unwrap(), &mut rng, 0.0);
        pump(&mut animator, &mut store, 0.0);

        store.toggle_decay_mode();
        pump(&mut animator, &mut store, 1.0);
        assert_eq!(animator.active(), 0);

        // Nothing left to fire against the store
        animator.update(&mut store, &mut rng, 10.0);
        assert!(!store.decay().is_decaying);
        assert_eq!(store.current_atom().key, "thorium-234");
    }

    #[test]
    fn lifetimes_by_decay_type() {
        use crate::particles::DecayParticle;
        use glam::Vec3;

        let particle = |decay_type| {
            Particle::DecayParticle(DecayParticle {
                id: ParticleId(1),
                decay_type,
                direction: Vec3::Y,
                energy: 1.0,
                created_at: 0.0,
            })
        };
        assert_eq!(lifetime(&particle(DecayType::Alpha)), ALPHA_LIFETIME);
        assert_eq!(lifetime(&particle(DecayType::BetaPlus)), BETA_LIFETIME);
        assert_eq!(lifetime(&particle(DecayType::Gamma)), GAMMA_LIFETIME);
    }
}
