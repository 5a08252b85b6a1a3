// src/gui/components/action_buttons.rs

use eframe::egui;
use crate::{
    config::options::ExportFormat,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    // --- Format + column layout + output folder ---
    ui.horizontal(|ui| {
        ui.label("Format:");
        let before = app.format;
        for f in ExportFormat::ALL {
            ui.selectable_value(&mut app.format, f, f.ext().to_uppercase());
        }
        if app.format != before {
            logf!("UI: Export format -> {}", app.format);
            if !app.session.options().export.is_local(app.format) {
                app.status(format!("{} will be requested from the {} source", app.format, app.session.source_name()));
            }
        }

        ui.separator();
        ui.checkbox(&mut app.selected_only, "Selected columns only");
        ui.checkbox(&mut app.session.options_mut().export.full_download, "Full dataset")
            .on_hover_text("Download every row for the kecamatan instead of exporting the preview result");

        ui.separator();
        ui.label("Output:");
        ui.add(egui::TextEdit::singleline(&mut app.out_dir_text)
            .font(egui::TextStyle::Monospace)
            .desired_width(180.0));
    });

    // Actions: Scrape / Preview / Download
    ui.horizontal(|ui| {
        let red = egui::Color32::from_rgb(220, 30, 30);
        let black = egui::Color32::BLACK;

        let button_scrape = ui.add(
            egui::Button::new(
                egui::RichText::new("SCRAPE")
                .color(black)
                .strong())
            .fill(red));
        if button_scrape.clicked() {
            actions::scrape(app);
        }

        let preview_label = if app.show_preview { "Hide preview" } else { "Preview" };
        if ui.button(preview_label).clicked() {
            actions::preview(app);
        }

        if ui.button("Download").clicked() {
            actions::export(app);
        }

        ui.label(app.status_text());
    });
}
