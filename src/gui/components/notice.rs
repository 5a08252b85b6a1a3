// src/gui/components/notice.rs
//
// Modal-ish alert for the last action's outcome. OK dismisses it.

use eframe::egui::{self, Align2, Color32, RichText};

use crate::{gui::app::App, notice::NoticeLevel};

pub fn draw(ctx: &egui::Context, app: &mut App) {
    let Some(n) = app.notice.as_ref() else { return };

    let color = match n.level {
        NoticeLevel::Success => Color32::from_rgb(30, 150, 60),
        NoticeLevel::Info => Color32::from_rgb(40, 110, 200),
        NoticeLevel::Warning => Color32::from_rgb(200, 140, 0),
        NoticeLevel::Error => Color32::from_rgb(200, 40, 40),
    };

    let mut close = false;
    egui::Window::new(RichText::new(n.level.title()).color(color).strong())
        .id(egui::Id::new("notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(n.message.as_str());
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                close = true;
            }
        });

    if close {
        app.notice = None;
    }
}
