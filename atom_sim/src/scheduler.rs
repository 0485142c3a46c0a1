//! Automatic radioactive decay
//!
//! One representative atom either decays or doesn't on each tick. The chance
//! of decaying within a tick follows from the half-life and the simulated
//! time the tick covers: `P = 1 - exp(-ln2 / t½ · Δyears)`.

use rand::Rng;
use std::cell::Cell;
use std::f64::consts::LN_2;
use std::rc::Rc;
use std::time::Duration;

use crate::decay_data::DecayMode;
use crate::particles::{random_direction, DecayParticle};
use crate::store::{DecayEvent, SimulationStore};

/// Shared cancellation flag for a group of scheduled work
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// λ = ln 2 / t½, per year
pub fn decay_constant(half_life_years: f64) -> f64 {
    LN_2 / half_life_years
}

/// Probability that one atom decays within `delta_years`
pub fn decay_probability(half_life_years: f64, delta_years: f64) -> f64 {
    1.0 - (-decay_constant(half_life_years) * delta_years).exp()
}

/// Outcome of a single scheduler tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub delta_years: f64,
    pub probability: f64,
    pub sample: f64,
    pub decayed: bool,
}

/// Decay `store`'s current atom through `mode` and launch its particle.
///
/// Returns false, adding nothing, when the store refuses the transition.
pub fn fire_decay<R: Rng + ?Sized>(
    store: &mut SimulationStore,
    mode: &DecayMode,
    rng: &mut R,
    now: f64,
) -> bool {
    let event_id = store.next_particle_id().0;
    let event = DecayEvent::new(event_id, store.current_atom(), mode, now);
    if !store.trigger_decay(mode.decay_type, mode.daughter_key, event) {
        return false;
    }

    let particle = DecayParticle {
        id: store.next_particle_id(),
        decay_type: mode.decay_type,
        direction: random_direction(rng),
        energy: mode.energy_released,
        created_at: now,
    };
    store.add_decay_particle(particle)
}

pub struct DecayScheduler {
    tick_interval: f64,
    accumulator: f64,
    run: Option<CancelToken>,
    ticks: u64,
}

impl DecayScheduler {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval: tick_interval.as_secs_f64().max(1e-3),
            accumulator: 0.0,
            run: None,
            ticks: 0,
        }
    }

    /// Whether auto-decay should be ticking for the store's current state
    pub fn should_run(store: &SimulationStore) -> bool {
        let decay = store.decay();
        decay.decay_mode_enabled
            && decay.auto_decay_enabled
            && !decay.is_decaying
            && store
                .current_isotope()
                .is_some_and(|iso| iso.primary_decay().is_some())
    }

    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|token| !token.is_cancelled())
    }

    /// Token of the current run, cancelled when the run stops
    pub fn run_token(&self) -> Option<CancelToken> {
        self.run.clone()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by `dt` real seconds, firing every tick that falls due.
    ///
    /// Returns true if a decay was triggered.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        store: &mut SimulationStore,
        dt: f64,
        rng: &mut R,
        now: f64,
    ) -> bool {
        if !Self::should_run(store) {
            self.stop();
            return false;
        }

        if self.run.is_none() {
            log::info!("Auto-decay started for {}", store.current_atom().name);
            self.run = Some(CancelToken::new());
        }

        self.accumulator += dt.max(0.0);
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            if let Some(report) = self.tick(store, self.tick_interval, rng, now) {
                if report.decayed {
                    // The store is now decaying; the next update stops this run
                    return true;
                }
            }
        }
        false
    }

    /// Run one tick covering `elapsed` real seconds
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        store: &mut SimulationStore,
        elapsed: f64,
        rng: &mut R,
        now: f64,
    ) -> Option<TickReport> {
        let mode = store.current_isotope()?.primary_decay()?;
        self.ticks += 1;

        let delta_years = elapsed * store.decay().time_speed;
        store.add_simulated_time(delta_years);

        let probability = decay_probability(mode.half_life_years(), delta_years);
        let sample: f64 = rng.gen();
        let decayed = sample < probability && fire_decay(store, mode, rng, now);

        if decayed {
            log::debug!(
                "Tick {}: decayed (p = {:.4}, sample = {:.4}) after {:.3e} simulated years",
                self.ticks,
                probability,
                sample,
                store.decay().simulated_years
            );
        }

        Some(TickReport {
            delta_years,
            probability,
            sample,
            decayed,
        })
    }

    /// Cancel the current run and forget partial tick time
    pub fn stop(&mut self) {
        if let Some(token) = self.run.take() {
            token.cancel();
            log::info!("Auto-decay stopped after {} ticks", self.ticks);
        }
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::decay_data::primary_decay;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn auto_decay_store(atom: &str, time_speed: f64) -> SimulationStore {
        let mut store = SimulationStore::new(&SimConfig {
            initial_atom: atom.to_string(),
            time_speed,
            ..SimConfig::default()
        });
        store.toggle_decay_mode();
        store.toggle_auto_decay();
        store
    }

    #[test]
    fn one_half_life_gives_even_odds() {
        assert!((decay_probability(1.0, 1.0) - 0.5).abs() < 1e-12);
        assert!((decay_probability(5730.0, 2.0 * 5730.0) - 0.75).abs() < 1e-12);
        assert_eq!(decay_probability(10.0, 0.0), 0.0);
    }

    #[test]
    fn probability_grows_with_elapsed_time() {
        let mut last = 0.0;
        for years in [1.0, 10.0, 100.0, 1000.0] {
            let p = decay_probability(100.0, years);
            assert!(p > last && p < 1.0);
            last = p;
        }
    }

    #[test]
    fn tick_advances_simulated_time() {
        let mut store = auto_decay_store("uranium-238", 1000.0);
        let mut scheduler = DecayScheduler::new(Duration::from_millis(100));
        let mut rng = StdRng::seed_from_u64(1);

        let report = scheduler.tick(&mut store, 0.1, &mut rng, 0.0).unwrap();
        assert!((report.delta_years - 100.0).abs() < 1e-9);
        assert!((store.decay().simulated_years - 100.0).abs() < 1e-9);
        // Uranium-238 is not going anywhere in a century
        assert!(!report.decayed);
    }

    #[test]
    fn short_half_life_decays_on_first_tick() {
        // Polonium-214 lasts microseconds; a tick covers a full year
        let mut store = auto_decay_store("polonium-214", 10.0);
        let mut scheduler = DecayScheduler::new(Duration::from_millis(100));
        let mut rng = StdRng::seed_from_u64(2);

        assert!(scheduler.update(&mut store, 0.1, &mut rng, 3.0));
        assert_eq!(store.current_atom().key, "lead-210");
        assert!(store.decay().is_decaying);
        assert_eq!(store.decay().active_particles.len(), 1);

        let event = store.decay().decay_history.last().unwrap();
        assert_eq!(event.parent_name, "Polonium-214");
        assert_eq!(event.daughter_name, "Lead-210");
        assert_eq!(event.timestamp, 3.0);
    }

    #[test]
    fn stops_while_decaying_and_resumes_fresh() {
        let mut store = auto_decay_store("polonium-214", 10.0);
        let mut scheduler = DecayScheduler::new(Duration::from_millis(100));
        let mut rng = StdRng::seed_from_u64(3);

        scheduler.update(&mut store, 0.1, &mut rng, 0.0);
        let token = scheduler.run_token().unwrap();

        // Decay in progress: the run is cancelled and no time accrues
        let years = store.decay().simulated_years;
        assert!(!scheduler.update(&mut store, 5.0, &mut rng, 0.5));
        assert!(token.is_cancelled());
        assert!(!scheduler.is_running());
        assert_eq!(store.decay().simulated_years, years);

        // Lead-210 picks up with a new run
        store.complete_decay();
        scheduler.update(&mut store, 0.05, &mut rng, 1.0);
        assert!(scheduler.is_running());
        assert_eq!(store.decay().simulated_years, years);
    }

    #[test]
    fn paused_time_is_not_replayed() {
        let mut store = auto_decay_store("uranium-238", 1.0);
        let mut scheduler = DecayScheduler::new(Duration::from_millis(100));
        let mut rng = StdRng::seed_from_u64(4);

        scheduler.update(&mut store, 0.09, &mut rng, 0.0);
        store.toggle_auto_decay();
        scheduler.update(&mut store, 10.0, &mut rng, 0.0);
        store.toggle_auto_decay();
        scheduler.update(&mut store, 0.05, &mut rng, 0.0);

        assert_eq!(scheduler.ticks(), 0);
        assert_eq!(store.decay().simulated_years, 0.0);
    }

    #[test]
    fn idle_for_stable_atoms() {
        let mut store = auto_decay_store("lead-206", 1e9);
        let mut scheduler = DecayScheduler::new(Duration::from_millis(100));
        let mut rng = StdRng::seed_from_u64(5);

        assert!(!scheduler.update(&mut store, 10.0, &mut rng, 0.0));
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.ticks(), 0);
    }

    #[test]
    fn fire_decay_adds_nothing_when_rejected() {
        let mut store = auto_decay_store("uranium-238", 1.0);
        let mode = primary_decay("uranium-238").unwrap();
        let mut rng = StdRng::seed_from_u64(6);

        assert!(fire_decay(&mut store, mode, &mut rng, 0.0));
        assert!(!fire_decay(&mut store, mode, &mut rng, 0.0));
        assert_eq!(store.decay().active_particles.len(), 1);
        assert_eq!(store.decay().decay_history.len(), 1);
    }

    #[test]
    fn cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
