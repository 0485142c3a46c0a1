//! Atom scene, painted with egui shapes projected through the orbital camera

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke};
use glam::{Quat, Vec2, Vec3};

use atom_sim::animation::lifetime;
use atom_sim::elements::{AtomProfile, ElectronShell};
use atom_sim::particles::Particle;
use atom_sim::photon::wavelength_to_rgb;
use atom_sim::store::SimulationStore;
use common::Camera3D;

const ORBIT_SEGMENTS: usize = 96;
const NUCLEON_RADIUS: f32 = 0.45;
const ELECTRON_RADIUS: f32 = 0.35;
/// Distance travelled by an outgoing particle over its lifetime
const ESCAPE_DISTANCE: f32 = 40.0;
/// Where the photon beam starts, relative to the nucleus
const BEAM_ORIGIN: Vec3 = Vec3::new(-45.0, 6.0, 0.0);

const PROTON_COLOR: Color32 = Color32::from_rgb(230, 80, 70);
const NEUTRON_COLOR: Color32 = Color32::from_rgb(120, 140, 200);
const ELECTRON_COLOR: Color32 = Color32::from_rgb(90, 200, 255);
const EXCITED_COLOR: Color32 = Color32::from_rgb(255, 240, 120);
const ORBIT_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 80, 120, 90);

fn rgb_color(rgb: [f32; 3]) -> Color32 {
    Color32::from_rgb((rgb[0] * 255.0) as u8, (rgb[1] * 255.0) as u8, (rgb[2] * 255.0) as u8)
}

/// Point on `shell` at angle `theta`, in world space
fn orbit_point(shell: &ElectronShell, theta: f32) -> Vec3 {
    let flat = Vec3::new(shell.radius * theta.cos(), 0.0, shell.radius * theta.sin());
    Quat::from_rotation_x(shell.tilt) * flat
}

/// Shapes tagged with depth so far geometry is painted first
struct DepthSorted {
    shapes: Vec<(f32, Shape)>,
}

impl DepthSorted {
    fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    fn push(&mut self, depth: f32, shape: Shape) {
        self.shapes.push((depth, shape));
    }

    fn paint(mut self, painter: &Painter) {
        self.shapes.sort_by(|a, b| b.0.total_cmp(&a.0));
        painter.extend(self.shapes.into_iter().map(|(_, shape)| shape));
    }
}

pub struct AtomScene {
    pub camera: Camera3D,
    time: f32,
}

impl AtomScene {
    pub fn new(aspect_ratio: f32) -> Self {
        let mut camera = Camera3D::new(aspect_ratio);
        camera.max_distance = 120.0;
        camera.distance = 70.0;
        camera.update_orbital();
        Self { camera, time: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }

    fn project(&self, rect: Rect, point: Vec3) -> Option<(Pos2, f32, f32)> {
        let viewport = Vec2::new(rect.width(), rect.height());
        let screen = self.camera.project(point, viewport)?;
        let pos = Pos2::new(rect.min.x + screen.position.x, rect.min.y + screen.position.y);
        Some((pos, screen.depth, screen.scale))
    }

    fn sphere(&self, out: &mut DepthSorted, rect: Rect, center: Vec3, radius: f32, color: Color32) {
        if let Some((pos, depth, scale)) = self.project(rect, center) {
            out.push(depth, Shape::circle_filled(pos, (radius * scale).max(1.5), color));
        }
    }

    /// Paint the whole scene for the store's current state at presentation time `now`
    pub fn paint(&self, painter: &Painter, rect: Rect, store: &SimulationStore, now: f64) {
        let atom = store.current_atom();
        let mut shapes = DepthSorted::new();

        self.paint_nucleus(&mut shapes, rect, atom);
        self.paint_shells(&mut shapes, rect, atom, store.photon().ionization_count);
        if store.photon().photon_mode_enabled && store.photon().is_light_on {
            self.paint_beam(&mut shapes, rect, store);
        }
        self.paint_particles(&mut shapes, rect, store, now);

        shapes.paint(painter);
    }

    fn paint_nucleus(&self, out: &mut DepthSorted, rect: Rect, atom: &AtomProfile) {
        // Pack nucleons on a golden-angle spiral inside a sphere
        let count = atom.mass_number().clamp(1, 60);
        let packing = NUCLEON_RADIUS * 1.6 * (count as f32).cbrt();
        let golden = std::f32::consts::PI * (3.0 - 5f32.sqrt());
        let protons_shown = (atom.atomic_number as f32 / atom.mass_number().max(1) as f32 * count as f32).round() as u32;

        for i in 0..count {
            let y = 1.0 - 2.0 * (i as f32 + 0.5) / count as f32;
            let ring = (1.0 - y * y).sqrt();
            let theta = golden * i as f32 + self.time * 0.2;
            let shell = ((i % 3) as f32 + 1.0) / 3.0;
            let pos = Vec3::new(ring * theta.cos(), y, ring * theta.sin()) * packing * shell;
            let color = if i < protons_shown { PROTON_COLOR } else { NEUTRON_COLOR };
            self.sphere(out, rect, pos, NUCLEON_RADIUS, color);
        }
    }

    fn paint_shells(&self, out: &mut DepthSorted, rect: Rect, atom: &AtomProfile, ionized: u32) {
        let mut to_strip = ionized;

        for shell in atom.shells.iter().rev() {
            let ring: Vec<_> = (0..=ORBIT_SEGMENTS)
                .filter_map(|i| {
                    let theta = i as f32 / ORBIT_SEGMENTS as f32 * std::f32::consts::TAU;
                    self.project(rect, orbit_point(shell, theta))
                })
                .collect();
            for pair in ring.windows(2) {
                let depth = (pair[0].1 + pair[1].1) * 0.5;
                out.push(depth, Shape::line_segment([pair[0].0, pair[1].0], Stroke::new(1.0, ORBIT_COLOR)));
            }

            // Ionized electrons leave from the outermost shells first
            let stripped = to_strip.min(shell.electrons);
            to_strip -= stripped;
            let bound = shell.electrons - stripped;
            for e in 0..bound {
                let phase = e as f32 / shell.electrons.max(1) as f32 * std::f32::consts::TAU;
                let theta = phase + self.time * shell.angular_velocity;
                self.sphere(out, rect, orbit_point(shell, theta), ELECTRON_RADIUS, ELECTRON_COLOR);
            }
        }
    }

    fn paint_beam(&self, out: &mut DepthSorted, rect: Rect, store: &SimulationStore) {
        let photon = store.photon();
        let [r, g, b] = wavelength_to_rgb(photon.wavelength);
        let alpha = (photon.intensity.clamp(0.0, 1.0) * 200.0) as u8 + 40;
        let color = Color32::from_rgba_unmultiplied((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, alpha);

        if let (Some(start), Some(end)) = (self.project(rect, BEAM_ORIGIN), self.project(rect, Vec3::ZERO)) {
            out.push(end.1, Shape::line_segment([start.0, end.0], Stroke::new(3.0, color)));
        }

        // Photon packets travelling down the beam
        for k in 0..4 {
            let t = ((self.time * 0.8 + k as f32 * 0.25) % 1.0).abs();
            self.sphere(out, rect, BEAM_ORIGIN * (1.0 - t), 0.3, color);
        }
    }

    fn paint_particles(&self, out: &mut DepthSorted, rect: Rect, store: &SimulationStore, now: f64) {
        let atom = store.current_atom();
        let photon = store.photon();
        let particles = photon
            .excited_electrons
            .iter()
            .map(|p| Particle::ExcitedElectron(*p))
            .chain(photon.ejected_electrons.iter().map(|p| Particle::EjectedElectron(*p)))
            .chain(photon.emitted_photons.iter().map(|p| Particle::EmittedPhoton(*p)))
            .chain(store.decay().active_particles.iter().map(|p| Particle::DecayParticle(*p)));

        for particle in particles {
            let t = ((now - particle.created_at()) / lifetime(&particle)).clamp(0.0, 1.0) as f32;
            match particle {
                Particle::ExcitedElectron(e) => {
                    let Some(shell) = atom.shells.get(e.shell_index) else { continue };
                    // Hover just outside the home shell, pulsing
                    let lifted = ElectronShell {
                        radius: shell.radius * 1.35,
                        ..*shell
                    };
                    let theta = e.id.0 as f32 + self.time * shell.angular_velocity * 2.0;
                    let pulse = 1.0 + 0.3 * (self.time * 8.0).sin();
                    self.sphere(out, rect, orbit_point(&lifted, theta), ELECTRON_RADIUS * pulse, EXCITED_COLOR);
                }
                Particle::EjectedElectron(e) => {
                    let start = atom
                        .shells
                        .get(e.shell_index)
                        .map(|s| s.radius)
                        .unwrap_or(0.0);
                    let speed = 1.0 + (e.kinetic_energy as f32).sqrt() * 0.3;
                    let pos = e.direction * (start + ESCAPE_DISTANCE * t * speed);
                    self.sphere(out, rect, pos, ELECTRON_RADIUS, ELECTRON_COLOR);
                }
                Particle::EmittedPhoton(p) => {
                    let color = rgb_color(wavelength_to_rgb(p.wavelength));
                    let pos = p.direction * ESCAPE_DISTANCE * t;
                    self.sphere(out, rect, pos, 0.3, color);
                }
                Particle::DecayParticle(p) => {
                    let color = rgb_color(p.decay_type.color());
                    let pos = p.direction * ESCAPE_DISTANCE * t;
                    let fade = 1.0 - 0.5 * t;
                    self.sphere(out, rect, pos, 0.6 * fade + 0.2, color);
                    // Short trail back toward the nucleus
                    if let (Some(head), Some(tail)) = (
                        self.project(rect, pos),
                        self.project(rect, p.direction * (ESCAPE_DISTANCE * t - 4.0).max(0.0)),
                    ) {
                        out.push(head.1, Shape::line_segment([tail.0, head.0], Stroke::new(2.0, color.gamma_multiply(0.5))));
                    }
                }
            }
        }
    }
}
