// src/gui/components/stats_panel.rs
//
// Stat cards + top-area bars. Recomputed from the cache every frame.

use eframe::egui::{self, ProgressBar, RichText};

use crate::{gui::app::App, stats};

/// Per-school bars shown in the collapsible chart section.
const CHART_BARS: usize = 20;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(rows) = app.session.cache().rows() else {
        ui.label("No data yet. Pick a kecamatan and press SCRAPE.");
        return;
    };
    let Some(st) = stats::compute_stats(&rows) else {
        ui.label("The last scrape returned no rows.");
        return;
    };

    ui.horizontal_wrapped(|ui| {
        card(ui, "Schools", st.total_schools.to_string());
        card(ui, "Students", st.total_students.to_string());
        card(ui, "Male", st.total_male.to_string());
        card(ui, "Female", st.total_female.to_string());
        card(ui, "Avg / school", st.avg_students.to_string());
        card(ui, "Avg male / school", st.avg_male.to_string());
        card(ui, "Avg female / school", st.avg_female.to_string());
    });

    if !st.by_area.is_empty() {
        ui.add_space(6.0);
        ui.label(RichText::new("Students per kecamatan").strong());
        let max = st.by_area.iter().map(|a| a.total).fold(0.0, f64::max).max(1.0);
        for a in &st.by_area {
            ui.horizontal(|ui| {
                ui.add_sized([120.0, 18.0], egui::Label::new(a.area.as_str()).truncate());
                ui.add(
                    ProgressBar::new((a.total / max) as f32)
                        .desired_width(260.0)
                        .text(format!("{} (M {} / F {})", a.total, a.male, a.female)),
                );
            });
        }
    }

    egui::CollapsingHeader::new("Male students per school")
        .id_salt("chart")
        .show(ui, |ui| {
            let series = stats::chart_series(&rows);
            let max = series.iter().map(|p| p.male).fold(0.0, f64::max).max(1.0);
            for p in series.iter().take(CHART_BARS) {
                ui.horizontal(|ui| {
                    ui.add_sized([200.0, 16.0], egui::Label::new(p.school.as_str()).truncate());
                    ui.add(ProgressBar::new((p.male / max) as f32).desired_width(200.0).text(p.male.to_string()));
                });
            }
            if series.len() > CHART_BARS {
                ui.weak(format!("... {} more", series.len() - CHART_BARS));
            }
        });

    if st.has_geo {
        let pts = stats::geo_points(&rows);
        ui.weak(format!("{} schools with coordinates", pts.len()));
    }
}

fn card(ui: &mut egui::Ui, title: &str, value: String) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.weak(title);
            ui.heading(value);
        });
    });
}
