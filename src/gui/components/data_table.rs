// src/gui/components/data_table.rs
//
// Preview table: first rows of the cached result, `No` first.
// Purely a view; never touches the cache.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::{fields::NO, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(p) = app.preview.as_ref() else {
        ui.label("Nothing to preview for the current filter. Run a scrape or press Preview.");
        return;
    };

    ui.label(format!("Showing {} of {} rows", p.rows.len(), p.total));

    let avail_h = ui.available_height();
    egui::ScrollArea::horizontal()
        .id_salt("preview_hscroll")
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .min_scrolled_height(0.0)
                .max_scroll_height(avail_h)
                .id_salt("preview_table");
            for c in &p.columns {
                let col = if c.key == NO {
                    Column::exact(40.0)
                } else {
                    Column::initial(140.0).resizable(true).clip(true).at_least(40.0)
                };
                table = table.column(col);
            }

            table
                .header(24.0, |mut header| {
                    for c in &p.columns {
                        header.col(|ui| {
                            ui.style_mut().wrap_mode = Some(TextWrapMode::Truncate);
                            ui.label(RichText::new(c.header).strong());
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, p.rows.len(), |mut row| {
                        let Some(cells) = p.rows.get(row.index()) else { return };
                        for (ci, cell) in cells.iter().enumerate() {
                            row.col(|ui| {
                                if ci == 0 {
                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                        ui.label(cell.as_str());
                                    });
                                } else {
                                    ui.label(cell.as_str());
                                }
                            });
                        }
                    });
                });
        });
}
