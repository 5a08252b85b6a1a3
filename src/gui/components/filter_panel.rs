// src/gui/components/filter_panel.rs
//
// Left panel: locked region, kecamatan with autocomplete, limit, field picks.

use eframe::egui::{self, DragValue, TextEdit};

use crate::{
    config::consts::{MAX_LIMIT, MIN_LIMIT},
    fields,
    gui::app::App,
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Filter");
    ui.add_space(4.0);

    egui::Grid::new("region").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
        // Region is fixed for this deployment; shown, not editable
        let mut prov = app.session.filter.provinsi.clone();
        let mut kab = app.session.filter.kabkota.clone();
        ui.label("Provinsi");
        ui.add_enabled(false, TextEdit::singleline(&mut prov));
        ui.end_row();
        ui.label("Kab/Kota");
        ui.add_enabled(false, TextEdit::singleline(&mut kab));
        ui.end_row();

        ui.label("Kecamatan");
        let resp = ui.add(TextEdit::singleline(&mut app.session.filter.area_name).hint_text("e.g. Ambarawa"));
        if resp.changed() {
            logd!("UI: area -> {:?}", app.session.filter.area_name);
            app.refresh_preview();
        }
        ui.end_row();

        ui.label("Limit");
        let mut limit = app.session.filter.limit;
        if ui.add(DragValue::new(&mut limit).range(MIN_LIMIT..=MAX_LIMIT)).changed() {
            app.session.filter.set_limit(limit);
            logd!("UI: limit -> {}", app.session.filter.limit);
            app.refresh_preview();
        }
        ui.end_row();
    });

    suggestions(ui, app);

    ui.separator();
    ui.label(egui::RichText::new("Output columns").strong());

    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.small_button("Defaults").clicked() {
            app.session.filter.clear_selection();
            for f in fields::defaults() {
                let _ = app.session.filter.select(f.key);
            }
            changed = true;
        }
        if ui.small_button("All").clicked() {
            for f in fields::all() {
                let _ = app.session.filter.select(f.key);
            }
            changed = true;
        }
        if ui.small_button("None").clicked() {
            app.session.filter.clear_selection();
            changed = true;
        }
    });

    egui::ScrollArea::vertical().id_salt("field_picks").show(ui, |ui| {
        for f in fields::all() {
            let mut on = app.session.filter.is_selected(f.key);
            if ui.checkbox(&mut on, f.label).changed() {
                if let Err(e) = app.session.filter.set_selected(f.key, on) {
                    loge!("UI: select {}: {e}", f.key);
                }
                changed = true;
            }
        }
    });

    if changed {
        logd!("UI: fields -> {:?}", app.session.filter.selected_keys());
        app.refresh_preview();
    }
}

/// Clickable matches under the kecamatan box. Hidden once the text is an exact match.
fn suggestions(ui: &mut egui::Ui, app: &mut App) {
    let typed = app.session.filter.area().to_lowercase();
    let picks: Vec<String> = app.session.suggestions().into_iter().map(str::to_string).collect();
    if picks.is_empty() || picks.iter().any(|p| p.to_lowercase() == typed) {
        return;
    }
    ui.group(|ui| {
        for p in picks {
            if ui.selectable_label(false, p.as_str()).clicked() {
                logd!("UI: picked area {p}");
                app.session.filter.area_name = p;
                app.refresh_preview();
            }
        }
    });
}
