//! End-to-end simulation scenarios
//!
//! Drives the store, scheduler, photon source and animator together the way
//! the visualizer's frame loop does.

use atom_sim::animation::ParticleAnimator;
use atom_sim::config::SimConfig;
use atom_sim::decay_data::{find_isotope, DecayType};
use atom_sim::elements::find_atom;
use atom_sim::interaction::{Absorption, PhotonSource};
use atom_sim::particles::{DecayParticle, EjectedElectron, EmittedPhoton, ExcitedElectron, ParticleId};
use atom_sim::photon::{energy_to_wavelength, InteractionType};
use atom_sim::scheduler::{decay_probability, DecayScheduler};
use atom_sim::store::{DecayEvent, SimulationStore};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn store_with(atom: &str) -> SimulationStore {
    SimulationStore::new(&SimConfig {
        initial_atom: atom.to_string(),
        ..SimConfig::default()
    })
}

fn uranium_alpha_event() -> DecayEvent {
    DecayEvent {
        id: 1,
        decay_type: DecayType::Alpha,
        parent_name: "Uranium-238".to_string(),
        daughter_name: "Thorium-234".to_string(),
        energy_released: 4.27,
        timestamp: 12.5,
    }
}

#[test]
fn scenario_a_switching_atoms_resets_photon_state() {
    env_logger::builder().is_test(true).try_init().ok();

    let mut store = SimulationStore::default();
    assert_eq!(store.current_atom().key, "iron");
    assert!(!store.current_atom().is_radioactive);

    store.toggle_photon_mode();
    store.increment_ionization();
    let id = store.next_particle_id();
    store.add_emitted_photon(EmittedPhoton {
        id,
        direction: Vec3::Y,
        wavelength: 527.0,
        created_at: 0.0,
    });

    assert!(store.set_atom("hydrogen"));
    let photon = store.photon();
    assert_eq!(store.current_atom().key, "hydrogen");
    assert_eq!(photon.ionization_count, 0);
    assert!(photon.excited_electrons.is_empty());
    assert!(photon.ejected_electrons.is_empty());
    assert!(photon.emitted_photons.is_empty());
}

#[test]
fn scenario_b_photoelectric_ejection_counts_electrons() {
    env_logger::builder().is_test(true).try_init().ok();

    let mut store = store_with("carbon");
    let ionization = find_atom("carbon").unwrap().energy_data.unwrap().ionization_energy;

    store.toggle_photon_mode();
    store.set_wavelength(energy_to_wavelength(ionization + 5.0));
    store.toggle_light();
    assert_eq!(store.photon().current_effect, InteractionType::Photoelectric);

    let mut source = PhotonSource::new();
    let mut rng = StdRng::seed_from_u64(100);
    let total = store.current_atom().total_electrons();

    for step in 1..=total + 4 {
        let before = store.photon().ionization_count;
        let outcome = source.absorb(&mut store, &mut rng, step as f64);
        let after = store.photon().ionization_count;

        match outcome {
            Absorption::Ejected(_) => assert_eq!(after, before + 1),
            _ => assert_eq!(after, before),
        }
        assert!(after <= total);
    }
    assert_eq!(store.photon().ionization_count, total);
    assert_eq!(store.remaining_electrons(), 0);
}

#[test]
fn scenario_c_alpha_decay_of_uranium() {
    let mut store = store_with("uranium-238");
    let history_before = store.decay().decay_history.len();

    assert!(store.trigger_decay(DecayType::Alpha, "thorium-234", uranium_alpha_event()));

    let decay = store.decay();
    assert_eq!(store.current_atom().key, "thorium-234");
    assert!(decay.is_decaying);
    assert_eq!(decay.current_decay_type, Some(DecayType::Alpha));
    assert_eq!(decay.decay_progress, 0.0);
    assert_eq!(decay.decay_history.len(), history_before + 1);
    assert_eq!(decay.decay_history.last(), Some(&uranium_alpha_event()));
}

#[test]
fn scenario_d_completing_decay_keeps_history() {
    let mut store = store_with("uranium-238");
    store.trigger_decay(DecayType::Alpha, "thorium-234", uranium_alpha_event());

    store.complete_decay();

    let decay = store.decay();
    assert!(!decay.is_decaying);
    assert_eq!(decay.current_decay_type, None);
    assert!(decay.active_particles.is_empty());
    assert_eq!(decay.decay_history, vec![uranium_alpha_event()]);
    assert_eq!(store.current_atom().key, "thorium-234");
}

#[test]
fn scenario_e_one_half_life_is_a_coin_flip() {
    assert!((decay_probability(1.0, 1.0) - 0.5).abs() < 1e-12);
}

#[test]
fn scenario_e_tick_spanning_one_half_life() {
    let half_life = find_isotope("uranium-238")
        .and_then(|iso| iso.primary_decay())
        .unwrap()
        .half_life_years();

    // One second of real time covers exactly one half-life
    let mut store = store_with("uranium-238");
    store.set_time_speed(half_life);
    let mut scheduler = DecayScheduler::new(Duration::from_secs(1));
    let mut rng = StdRng::seed_from_u64(500);

    let report = scheduler.tick(&mut store, 1.0, &mut rng, 0.0).unwrap();
    assert!((report.delta_years - half_life).abs() <= half_life * 1e-12);
    assert!((report.probability - 0.5).abs() < 1e-9);
    assert_eq!(report.decayed, report.sample < report.probability);
    assert!((store.decay().simulated_years - half_life).abs() <= half_life * 1e-12);
    assert_eq!(scheduler.ticks(), 1);
}

#[test]
fn list_sizes_match_adds_minus_removes() {
    let mut store = store_with("gold");
    let transition = find_atom("hydrogen").unwrap().energy_data.unwrap().allowed_transitions[0];
    let mut rng = StdRng::seed_from_u64(200);
    let mut live_excited: Vec<ParticleId> = Vec::new();
    let mut live_ejected: Vec<ParticleId> = Vec::new();
    let mut live_emitted: Vec<ParticleId> = Vec::new();
    let mut live_decay: Vec<ParticleId> = Vec::new();

    for _ in 0..1000 {
        match rng.gen_range(0..8) {
            0 => {
                let electron = EjectedElectron {
                    id: store.next_particle_id(),
                    direction: Vec3::X,
                    kinetic_energy: 0.5,
                    shell_index: 5,
                    created_at: 0.0,
                };
                assert!(store.add_ejected_electron(electron));
                live_ejected.push(electron.id);
            }
            1 if !live_ejected.is_empty() => {
                let id = live_ejected.swap_remove(rng.gen_range(0..live_ejected.len()));
                assert!(store.remove_ejected_electron(id));
            }
            2 => {
                let electron = ExcitedElectron {
                    id: store.next_particle_id(),
                    transition,
                    shell_index: 1,
                    created_at: 0.0,
                };
                assert!(store.add_excited_electron(electron));
                live_excited.push(electron.id);
            }
            3 if !live_excited.is_empty() => {
                let id = live_excited.swap_remove(rng.gen_range(0..live_excited.len()));
                assert!(store.remove_excited_electron(id));
            }
            4 => {
                let photon = EmittedPhoton {
                    id: store.next_particle_id(),
                    direction: Vec3::Y,
                    wavelength: 656.3,
                    created_at: 0.0,
                };
                assert!(store.add_emitted_photon(photon));
                live_emitted.push(photon.id);
            }
            5 if !live_emitted.is_empty() => {
                let id = live_emitted.swap_remove(rng.gen_range(0..live_emitted.len()));
                assert!(store.remove_emitted_photon(id));
            }
            6 => {
                let particle = DecayParticle {
                    id: store.next_particle_id(),
                    decay_type: DecayType::Gamma,
                    direction: Vec3::Z,
                    energy: 1.0,
                    created_at: 0.0,
                };
                assert!(store.add_decay_particle(particle));
                live_decay.push(particle.id);
            }
            7 if !live_decay.is_empty() => {
                let id = live_decay.swap_remove(rng.gen_range(0..live_decay.len()));
                assert!(store.remove_decay_particle(id));
            }
            _ => {}
        }

        let photon = store.photon();
        assert_eq!(photon.excited_electrons.len(), live_excited.len());
        assert_eq!(photon.ejected_electrons.len(), live_ejected.len());
        assert_eq!(photon.emitted_photons.len(), live_emitted.len());
        assert_eq!(store.decay().active_particles.len(), live_decay.len());
    }

    // Removing an id twice is refused and leaves the lists alone
    if let Some(&id) = live_emitted.first() {
        assert!(store.remove_emitted_photon(id));
        assert!(!store.remove_emitted_photon(id));
        assert_eq!(store.photon().emitted_photons.len(), live_emitted.len() - 1);
    }
}

#[test]
fn auto_decay_walks_the_radon_chain() {
    env_logger::builder().is_test(true).try_init().ok();

    let config = SimConfig {
        initial_atom: "radon-222".to_string(),
        time_speed: 1e9,
        ..SimConfig::default()
    };
    let mut store = SimulationStore::new(&config);
    store.toggle_decay_mode();
    store.toggle_auto_decay();

    let mut scheduler = DecayScheduler::new(config.tick_interval);
    let mut animator = ParticleAnimator::new();
    let mut rng = StdRng::seed_from_u64(300);

    // A billion years per second outpaces every half-life below uranium-234
    let dt = 0.05;
    let mut clock = 0.0;
    while clock < 120.0 && store.current_atom().key != "lead-206" {
        clock += dt;
        let events = store.drain_events();
        animator.handle_events(&events, clock);
        scheduler.update(&mut store, dt, &mut rng, clock);
        let events = store.drain_events();
        animator.handle_events(&events, clock);
        animator.update(&mut store, &mut rng, clock);
    }

    let history: Vec<_> = store
        .decay()
        .decay_history
        .iter()
        .map(|e| e.daughter_name.as_str())
        .collect();
    assert_eq!(
        history,
        vec!["Polonium-218", "Lead-214", "Bismuth-214", "Polonium-214", "Lead-210", "Bismuth-210", "Polonium-210", "Lead-206"]
    );
    assert_eq!(store.decay().original_atom_key, Some("radon-222"));

    // Let the last particle finish, then go back to the start
    for _ in 0..100 {
        clock += dt;
        let events = store.drain_events();
        animator.handle_events(&events, clock);
        animator.update(&mut store, &mut rng, clock);
    }
    assert!(!store.decay().is_decaying);
    assert!(!DecayScheduler::should_run(&store));

    store.reset_decay();
    assert_eq!(store.current_atom().key, "radon-222");
    assert!(store.decay().decay_history.is_empty());
    assert!(!store.decay().auto_decay_enabled);
    assert_eq!(store.decay().time_speed, config.time_speed);
}

#[test]
fn excitation_below_ionization_and_none_between_lines() {
    let mut store = store_with("hydrogen");
    store.toggle_photon_mode();
    store.toggle_light();

    store.set_wavelength(434.0);
    assert_eq!(store.photon().current_effect, InteractionType::Excitation);

    store.set_wavelength(550.0);
    assert_eq!(store.photon().current_effect, InteractionType::None);

    store.set_wavelength(90.0);
    assert_eq!(store.photon().current_effect, InteractionType::Photoelectric);

    let mut source = PhotonSource::new();
    let mut rng = StdRng::seed_from_u64(400);
    store.set_wavelength(550.0);
    assert!(source.update(&mut store, 5.0, &mut rng, 0.0).iter().all(|o| *o == Absorption::Ignored));
    assert_eq!(store.photon().particle_count(), 0);
}
