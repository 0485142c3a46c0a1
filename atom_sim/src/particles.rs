//! Transient particle records
//!
//! Each particle kind carries only the fields it needs. Timestamps are
//! presentation-clock seconds.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

use crate::decay_data::DecayType;
use crate::elements::Transition;

/// Store-assigned particle identifier, unique for the store's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

impl std::fmt::Display for ParticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    ExcitedElectron,
    EjectedElectron,
    EmittedPhoton,
    DecayParticle,
}

impl ParticleKind {
    /// Photon-interaction particles, as opposed to decay products
    pub fn is_photon_effect(&self) -> bool {
        !matches!(self, ParticleKind::DecayParticle)
    }
}

/// An electron raised to a higher shell, waiting to relax
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExcitedElectron {
    pub id: ParticleId,
    pub transition: Transition,
    /// Shell index (0-based) the electron jumped from
    pub shell_index: usize,
    pub created_at: f64,
}

/// An electron knocked out of the atom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EjectedElectron {
    pub id: ParticleId,
    pub direction: Vec3,
    /// Kinetic energy in eV
    pub kinetic_energy: f64,
    pub shell_index: usize,
    pub created_at: f64,
}

/// A photon released when an excited electron relaxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmittedPhoton {
    pub id: ParticleId,
    pub direction: Vec3,
    /// Wavelength in nm
    pub wavelength: f64,
    pub created_at: f64,
}

/// Alpha, beta or gamma radiation leaving the nucleus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayParticle {
    pub id: ParticleId,
    pub decay_type: DecayType,
    pub direction: Vec3,
    /// Energy released in MeV
    pub energy: f64,
    pub created_at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Particle {
    ExcitedElectron(ExcitedElectron),
    EjectedElectron(EjectedElectron),
    EmittedPhoton(EmittedPhoton),
    DecayParticle(DecayParticle),
}

impl Particle {
    pub fn id(&self) -> ParticleId {
        match self {
            Particle::ExcitedElectron(p) => p.id,
            Particle::EjectedElectron(p) => p.id,
            Particle::EmittedPhoton(p) => p.id,
            Particle::DecayParticle(p) => p.id,
        }
    }

    pub fn kind(&self) -> ParticleKind {
        match self {
            Particle::ExcitedElectron(_) => ParticleKind::ExcitedElectron,
            Particle::EjectedElectron(_) => ParticleKind::EjectedElectron,
            Particle::EmittedPhoton(_) => ParticleKind::EmittedPhoton,
            Particle::DecayParticle(_) => ParticleKind::DecayParticle,
        }
    }

    pub fn created_at(&self) -> f64 {
        match self {
            Particle::ExcitedElectron(p) => p.created_at,
            Particle::EjectedElectron(p) => p.created_at,
            Particle::EmittedPhoton(p) => p.created_at,
            Particle::DecayParticle(p) => p.created_at,
        }
    }
}

/// Unit vector from a polar angle in [0, π] and an azimuth in [0, 2π).
///
/// Sampling both angles uniformly clusters directions near the poles; that
/// is acceptable for a visual effect.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let polar = rng.gen_range(0.0..=PI);
    let azimuth = rng.gen_range(0.0..2.0 * PI);
    Vec3::new(
        polar.sin() * azimuth.cos(),
        polar.sin() * azimuth.sin(),
        polar.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_directions_are_unit_vectors() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = random_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn particle_dispatch_by_tag() {
        let photon = Particle::EmittedPhoton(EmittedPhoton {
            id: ParticleId(3),
            direction: Vec3::X,
            wavelength: 656.3,
            created_at: 1.5,
        });
        assert_eq!(photon.id(), ParticleId(3));
        assert_eq!(photon.kind(), ParticleKind::EmittedPhoton);
        assert_eq!(photon.created_at(), 1.5);
        assert!(photon.kind().is_photon_effect());
        assert!(!ParticleKind::DecayParticle.is_photon_effect());
    }
}
