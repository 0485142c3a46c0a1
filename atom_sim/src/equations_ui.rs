//! Equations sidebar
//!
//! Shows the physics behind whichever mode is active, with the live values
//! of the current simulation plugged in.

use egui::{Color32, Context, FontFamily, FontId, RichText};

use atom_sim::format::{format_energy, format_frequency, format_wavelength, format_years};
use atom_sim::photon::{calculate_kinetic_energy, wavelength_to_frequency};
use atom_sim::scheduler::{decay_constant, decay_probability};
use atom_sim::store::SimulationStore;

pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

pub const PHOTON_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Photon Energy",
        formula: "E = hf = hc / λ",
        description: "Energy carried by a single photon",
    },
    Equation {
        name: "Photoelectric Effect",
        formula: "KE = hf - Φ",
        description: "Ejected electron keeps the energy above the work function",
    },
    Equation {
        name: "Atomic Transition",
        formula: "ΔE = E_upper - E_lower = hc / λ",
        description: "Only photons matching a level gap are absorbed",
    },
    Equation {
        name: "Hydrogen Levels",
        formula: "E_n = -13.6 eV / n²",
        description: "Bohr model energy of shell n",
    },
];

pub const PHOTON_VARIABLES: &[(&str, &str)] = &[
    ("h", "Planck constant (6.626×10⁻³⁴ J·s)"),
    ("c", "Speed of light (2.998×10⁸ m/s)"),
    ("f", "Photon frequency"),
    ("λ", "Wavelength"),
    ("Φ", "Work function (ionization energy)"),
    ("KE", "Kinetic energy of the ejected electron"),
    ("n", "Principal quantum number"),
];

pub const DECAY_EQUATIONS: &[Equation] = &[
    Equation {
        name: "Decay Constant",
        formula: "λ = ln 2 / t½",
        description: "Probability of decay per unit time",
    },
    Equation {
        name: "Decay Probability",
        formula: "P(Δt) = 1 - e^(-λΔt)",
        description: "Chance one atom decays within Δt",
    },
    Equation {
        name: "Remaining Nuclei",
        formula: "N(t) = N₀ · (½)^(t / t½)",
        description: "Fraction left after time t",
    },
    Equation {
        name: "Alpha Decay",
        formula: "ᴬ_Z X → ᴬ⁻⁴_(Z-2) Y + ⁴₂He",
        description: "Nucleus loses two protons and two neutrons",
    },
    Equation {
        name: "Beta Decay",
        formula: "n → p + e⁻ + ν̄ₑ",
        description: "A neutron turns into a proton",
    },
];

pub const DECAY_VARIABLES: &[(&str, &str)] = &[
    ("t½", "Half-life"),
    ("λ", "Decay constant"),
    ("Δt", "Simulated time per tick"),
    ("N₀", "Initial number of nuclei"),
    ("A", "Mass number"),
    ("Z", "Atomic number"),
];

pub fn draw_equations_sidebar(ctx: &Context, store: &SimulationStore, tick_seconds: f64) {
    let decay_mode = store.decay().decay_mode_enabled;
    let (title, equations, variables) = if decay_mode {
        ("Radioactive Decay", DECAY_EQUATIONS, DECAY_VARIABLES)
    } else {
        ("Photon Interactions", PHOTON_EQUATIONS, PHOTON_VARIABLES)
    };

    egui::SidePanel::right("equations_panel")
        .min_width(280.0)
        .max_width(350.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new(title).color(Color32::from_rgb(100, 200, 255)));
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.collapsing(RichText::new("📐 Equations").strong(), |ui| {
                    for eq in equations {
                        draw_equation(ui, eq);
                        ui.add_space(6.0);
                    }
                });

                ui.collapsing(RichText::new("📖 Variables").strong(), |ui| {
                    egui::Grid::new("variables_grid")
                        .num_columns(2)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for (symbol, meaning) in variables {
                                ui.label(RichText::new(*symbol).monospace().color(Color32::LIGHT_GREEN));
                                ui.label(*meaning);
                                ui.end_row();
                            }
                        });
                });

                if store.photon().show_calculations || decay_mode {
                    ui.add_space(8.0);
                    ui.label(RichText::new("Live values").strong().color(Color32::from_rgb(255, 200, 100)));
                    if decay_mode {
                        draw_decay_values(ui, store, tick_seconds);
                    } else {
                        draw_photon_values(ui, store);
                    }
                }
            });
        });
}

fn draw_equation(ui: &mut egui::Ui, eq: &Equation) {
    ui.group(|ui| {
        ui.label(RichText::new(eq.name).strong().color(Color32::YELLOW));
        ui.label(
            RichText::new(eq.formula)
                .font(FontId::new(16.0, FontFamily::Monospace))
                .color(Color32::from_rgb(200, 220, 255)),
        );
        ui.label(RichText::new(eq.description).small().italics());
    });
}

fn value_row(ui: &mut egui::Ui, name: &str, value: String) {
    ui.label(RichText::new(name).monospace().color(Color32::LIGHT_GREEN));
    ui.label(value);
    ui.end_row();
}

fn draw_photon_values(ui: &mut egui::Ui, store: &SimulationStore) {
    let photon = store.photon();
    let energy = photon.photon_energy();

    egui::Grid::new("photon_values").num_columns(2).show(ui, |ui| {
        value_row(ui, "λ", format_wavelength(photon.wavelength));
        value_row(ui, "f = c/λ", format_frequency(wavelength_to_frequency(photon.wavelength)));
        value_row(ui, "E = hc/λ", format_energy(energy));
        if let Some(data) = store.current_atom().energy_data {
            value_row(ui, "Φ", format_energy(data.ionization_energy));
            value_row(
                ui,
                "KE = E - Φ",
                format_energy(calculate_kinetic_energy(energy, data.ionization_energy)),
            );
        } else {
            value_row(ui, "Φ", "no spectroscopic data".to_string());
        }
    });
}

fn draw_decay_values(ui: &mut egui::Ui, store: &SimulationStore, tick_seconds: f64) {
    let Some(mode) = store.current_isotope().and_then(|iso| iso.primary_decay()) else {
        ui.label(RichText::new("Stable: nothing to decay").italics());
        return;
    };
    let half_life = mode.half_life_years();
    let per_tick = tick_seconds * store.decay().time_speed;

    egui::Grid::new("decay_values").num_columns(2).show(ui, |ui| {
        value_row(ui, "t½", mode.half_life_display.to_string());
        value_row(ui, "λ", format!("{:.3e} / year", decay_constant(half_life)));
        value_row(ui, "Δt", format_years(per_tick));
        value_row(ui, "P(Δt)", format!("{:.4}%", decay_probability(half_life, per_tick) * 100.0));
    });
}
