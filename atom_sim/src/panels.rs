//! Control and info panels
//!
//! Panels read store state and call store operations; they hold no state of
//! their own.

use egui::{Color32, Context, RichText, Sense, Stroke, Vec2};
use rand::Rng;

use atom_sim::config::{time_speed_label, TIME_SPEEDS, WAVELENGTH_PRESETS};
use atom_sim::decay_data::radioactive_isotopes;
use atom_sim::elements::{stable_atoms, AtomEnergyData};
use atom_sim::format::{format_energy, format_wavelength, format_years, slider_to_wavelength, wavelength_to_slider, SLIDER_STEPS};
use atom_sim::photon::{emission_wavelengths, wavelength_region, wavelength_to_rgb, InteractionType};
use atom_sim::scheduler::fire_decay;
use atom_sim::store::SimulationStore;

const ACCENT: Color32 = Color32::from_rgb(100, 200, 255);
const HEADER: Color32 = Color32::from_rgb(255, 200, 100);

fn rgb(rgb: [f32; 3]) -> Color32 {
    Color32::from_rgb((rgb[0] * 255.0) as u8, (rgb[1] * 255.0) as u8, (rgb[2] * 255.0) as u8)
}

fn effect_color(effect: InteractionType) -> Color32 {
    match effect {
        InteractionType::None => Color32::GRAY,
        InteractionType::Excitation => Color32::YELLOW,
        InteractionType::Photoelectric => Color32::from_rgb(255, 120, 80),
    }
}

/// Atom picker and status line along the top of the window
pub fn draw_atom_selector(ctx: &Context, store: &mut SimulationStore) {
    egui::TopBottomPanel::top("atom_selector").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            let current = store.current_atom();
            ui.label(RichText::new("Atom:").strong());
            for atom in stable_atoms() {
                let selected = std::ptr::eq(atom, current);
                if ui.selectable_label(selected, format!("{} {}", atom.symbol, atom.name)).clicked() && !selected {
                    store.set_atom(atom.key);
                }
            }

            ui.separator();
            egui::ComboBox::from_id_source("isotope_picker")
                .selected_text(if current.is_radioactive { current.name } else { "Radioactive…" })
                .show_ui(ui, |ui| {
                    for iso in radioactive_isotopes() {
                        if ui.selectable_label(iso.key == current.key, iso.name).clicked() {
                            store.set_atom(iso.key);
                        }
                    }
                });

            ui.separator();
            ui.label(format!(
                "Z = {}  N = {}  A = {}",
                current.atomic_number,
                current.neutrons,
                current.mass_number()
            ));
            ui.label(format!(
                "e⁻ {}/{}",
                store.remaining_electrons(),
                current.total_electrons()
            ));
        });
    });
}

/// Light source, wavelength and display toggles
pub fn draw_photon_controls(ctx: &Context, store: &mut SimulationStore) {
    egui::Window::new("💡 Photon Lab")
        .default_pos([12.0, 60.0])
        .resizable(false)
        .show(ctx, |ui| {
            let enabled = store.photon().photon_mode_enabled;
            if ui
                .button(if enabled { "Disable photon mode" } else { "Enable photon mode" })
                .clicked()
            {
                store.toggle_photon_mode();
            }
            if !store.photon().photon_mode_enabled {
                ui.label(RichText::new("Shine light on the atom to excite or ionize it").italics());
                return;
            }

            ui.separator();
            let light_on = store.photon().is_light_on;
            let light_label = if light_on { "🔦 Light ON" } else { "🔦 Light OFF" };
            if ui.selectable_label(light_on, light_label).clicked() {
                store.toggle_light();
            }

            let wavelength = store.photon().wavelength;
            let mut position = wavelength_to_slider(wavelength);
            ui.horizontal(|ui| {
                ui.label("λ");
                let slider = egui::Slider::new(&mut position, 0.0..=SLIDER_STEPS).show_value(false);
                if ui.add(slider).changed() {
                    store.set_wavelength(slider_to_wavelength(position));
                }
                let swatch = rgb(wavelength_to_rgb(wavelength));
                ui.label(RichText::new(format_wavelength(wavelength)).color(swatch).monospace());
            });

            ui.horizontal_wrapped(|ui| {
                for (name, preset) in WAVELENGTH_PRESETS {
                    if ui.small_button(name).clicked() {
                        store.set_wavelength(preset);
                    }
                }
            });

            let mut intensity = store.photon().intensity;
            if ui
                .add(egui::Slider::new(&mut intensity, 0.0..=1.0).text("Intensity"))
                .changed()
            {
                store.set_intensity(intensity);
            }

            ui.separator();
            ui.horizontal(|ui| {
                let mut diagram = store.photon().show_energy_diagram;
                if ui.checkbox(&mut diagram, "Levels").changed() {
                    store.toggle_energy_diagram();
                }
                let mut spectrum = store.photon().show_spectrum;
                if ui.checkbox(&mut spectrum, "Spectrum").changed() {
                    store.toggle_spectrum();
                }
                let mut calculations = store.photon().show_calculations;
                if ui.checkbox(&mut calculations, "Math").changed() {
                    store.toggle_calculations();
                }
            });

            if ui.button("↺ Reset atom").clicked() {
                store.reset_atom();
            }
        });
}

/// Photon energy, classification and ionization readout
pub fn draw_photon_info(ctx: &Context, store: &SimulationStore) {
    if !store.photon().photon_mode_enabled {
        return;
    }
    let photon = store.photon();
    let atom = store.current_atom();

    egui::Window::new("Photon Info")
        .default_pos([12.0, 380.0])
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("photon_info").num_columns(2).show(ui, |ui| {
                ui.label("Energy");
                ui.label(RichText::new(format_energy(photon.photon_energy())).monospace());
                ui.end_row();

                ui.label("Region");
                ui.label(wavelength_region(photon.wavelength).name());
                ui.end_row();

                ui.label("Effect");
                ui.label(
                    RichText::new(photon.current_effect.label())
                        .strong()
                        .color(effect_color(photon.current_effect)),
                );
                ui.end_row();

                ui.label("Ionized");
                ui.label(format!("{} of {}", photon.ionization_count, atom.total_electrons()));
                ui.end_row();

                ui.label("In flight");
                ui.label(format!(
                    "{} excited, {} ejected, {} photons",
                    photon.excited_electrons.len(),
                    photon.ejected_electrons.len(),
                    photon.emitted_photons.len()
                ));
                ui.end_row();
            });

            match atom.energy_data {
                Some(data) => {
                    if photon.show_energy_diagram {
                        ui.separator();
                        draw_energy_levels(ui, data, photon.photon_energy());
                    }
                    if photon.show_spectrum {
                        ui.separator();
                        draw_spectrum(ui, data, photon.wavelength);
                    }
                }
                None => {
                    ui.label(RichText::new(format!("No spectroscopic data for {}", atom.name)).italics());
                }
            }
        });
}

/// Energy levels as horizontal bars, with the photon energy as an arrow from the ground state
fn draw_energy_levels(ui: &mut egui::Ui, data: &AtomEnergyData, photon_energy: f64) {
    ui.label(RichText::new("Energy levels").color(HEADER));
    let (response, painter) = ui.allocate_painter(Vec2::new(240.0, 140.0), Sense::hover());
    let rect = response.rect;

    let ground = data.ground_state_energy;
    let span = (-ground).max(1e-6);
    let to_y = |energy: f64| {
        let t = ((energy - ground) / span).clamp(0.0, 1.0) as f32;
        rect.bottom() - 8.0 - t * (rect.height() - 16.0)
    };

    // Ionization threshold at 0 eV
    painter.line_segment(
        [egui::pos2(rect.left(), to_y(0.0)), egui::pos2(rect.right(), to_y(0.0))],
        Stroke::new(1.0, Color32::from_rgb(255, 120, 80)),
    );
    for level in data.levels_by_energy() {
        let y = to_y(level.energy);
        painter.line_segment(
            [egui::pos2(rect.left() + 40.0, y), egui::pos2(rect.right() - 20.0, y)],
            Stroke::new(1.5, Color32::LIGHT_GRAY),
        );
        painter.text(
            egui::pos2(rect.left() + 2.0, y),
            egui::Align2::LEFT_CENTER,
            format!("{}{}", level.shell, level.subshell.label()),
            egui::FontId::monospace(10.0),
            Color32::LIGHT_GRAY,
        );
    }

    let arrow_top = to_y(ground + photon_energy);
    painter.arrow(
        egui::pos2(rect.right() - 10.0, to_y(ground)),
        egui::vec2(0.0, arrow_top - to_y(ground)),
        Stroke::new(2.0, ACCENT),
    );
}

/// Visible band with the atom's emission lines and the beam wavelength marked
fn draw_spectrum(ui: &mut egui::Ui, data: &AtomEnergyData, beam: f64) {
    const LOW: f64 = 380.0;
    const HIGH: f64 = 780.0;

    ui.label(RichText::new("Emission spectrum").color(HEADER));
    let (response, painter) = ui.allocate_painter(Vec2::new(240.0, 36.0), Sense::hover());
    let rect = response.rect;
    let to_x = |nm: f64| rect.left() + ((nm - LOW) / (HIGH - LOW)) as f32 * rect.width();

    painter.rect_filled(rect, 2.0, Color32::from_gray(12));
    for line in emission_wavelengths(data) {
        if (LOW..=HIGH).contains(&line) {
            let x = to_x(line);
            painter.line_segment(
                [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                Stroke::new(2.0, rgb(wavelength_to_rgb(line))),
            );
        }
    }
    if (LOW..=HIGH).contains(&beam) {
        let x = to_x(beam);
        painter.line_segment(
            [egui::pos2(x, rect.top() - 2.0), egui::pos2(x, rect.bottom() + 2.0)],
            Stroke::new(1.0, Color32::WHITE),
        );
    }

    let outside = emission_wavelengths(data)
        .into_iter()
        .filter(|l| !(LOW..=HIGH).contains(l))
        .map(format_wavelength)
        .collect::<Vec<_>>();
    if !outside.is_empty() {
        ui.label(RichText::new(format!("Outside visible: {}", outside.join(", "))).small());
    }
}

/// Decay mode, manual triggers, auto-decay, time warp and history
pub fn draw_decay_controls<R: Rng + ?Sized>(ctx: &Context, store: &mut SimulationStore, rng: &mut R, now: f64) {
    egui::Window::new("☢ Decay Lab")
        .default_pos([12.0, 640.0])
        .resizable(false)
        .show(ctx, |ui| {
            let enabled = store.decay().decay_mode_enabled;
            if ui
                .button(if enabled { "Disable decay mode" } else { "Enable decay mode" })
                .clicked()
            {
                store.toggle_decay_mode();
            }
            if !store.decay().decay_mode_enabled {
                return;
            }

            let Some(isotope) = store.current_isotope() else {
                ui.label(RichText::new("Stable atom").strong());
                ui.label(format!(
                    "{} does not undergo radioactive decay.",
                    store.current_atom().name
                ));
                draw_reset_and_history(ui, store);
                return;
            };

            ui.separator();
            let decaying = store.decay().is_decaying;
            for mode in isotope.decay_modes {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(mode.decay_type.name()).strong().color(rgb(mode.decay_type.color())));
                        ui.label(format!("{:.2}%", mode.probability * 100.0));
                    });
                    ui.label(format!("→ {}  ·  t½ {}  ·  {:.3} MeV", mode.daughter_name, mode.half_life_display, mode.energy_released));
                    ui.label(RichText::new(mode.description).small().italics());
                    let trigger = ui.add_enabled(!decaying, egui::Button::new("Trigger decay"));
                    if trigger.clicked() {
                        fire_decay(store, mode, rng, now);
                    }
                });
            }

            if decaying {
                let progress = store.decay().decay_progress as f32;
                ui.add(egui::ProgressBar::new(progress).text("Decaying…"));
            }

            ui.separator();
            let mut auto = store.decay().auto_decay_enabled;
            if ui.checkbox(&mut auto, "Auto-decay").changed() {
                store.toggle_auto_decay();
            }

            let speed = store.decay().time_speed;
            egui::ComboBox::from_label("Time warp")
                .selected_text(time_speed_label(speed))
                .show_ui(ui, |ui| {
                    for (preset, label) in TIME_SPEEDS {
                        if ui.selectable_label(preset == speed, label).clicked() {
                            store.set_time_speed(preset);
                        }
                    }
                });
            ui.label(format!("Simulated: {}", format_years(store.decay().simulated_years)));

            draw_reset_and_history(ui, store);
        });
}

fn draw_reset_and_history(ui: &mut egui::Ui, store: &mut SimulationStore) {
    ui.separator();
    if ui.button("🔄 Reset to original isotope").clicked() {
        store.reset_decay();
    }

    let history = &store.decay().decay_history;
    if history.is_empty() {
        return;
    }
    ui.collapsing(format!("History ({})", history.len()), |ui| {
        egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
            for event in history.iter().rev() {
                ui.label(format!(
                    "{} {} → {}  ({:.2} MeV, t = {:.1}s)",
                    event.decay_type.symbol(),
                    event.parent_name,
                    event.daughter_name,
                    event.energy_released,
                    event.timestamp
                ));
            }
        });
    });
}
