// src/gui/app.rs
use std::{
    error::Error,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use eframe::egui;

use crate::{
    config::options::{AppOptions, ExportFormat},
    notice::Notice,
    session::{Preview, Session},
};

use super::components;

pub fn run(native: eframe::NativeOptions, options: AppOptions) -> Result<(), Box<dyn Error>> {
    let session = Session::from_options(options)?;
    eframe::run_native(
        "SD Scraper - Kab. Semarang",
        native,
        Box::new(|_cc| Ok(Box::new(App::new(session)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub session: Session,

    // export bar
    pub format: ExportFormat,
    pub selected_only: bool,
    pub out_dir_text: String,

    // preview table, rebuilt from the cache on demand
    pub preview: Option<Preview>,
    pub show_preview: bool,

    // status/progress + pending alert
    pub status: Arc<Mutex<String>>,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(mut session: Session) -> Self {
        let n = session.load_areas();
        let status = if n == 0 {
            logw!("Init: no area list from {} source", session.source_name());
            s!("Area list unavailable; type the kecamatan by hand")
        } else {
            s!("Idle")
        };
        logf!("Init: {} areas, source={}", n, session.source_name());

        let export = &session.options().export;
        let format = export.format;
        let out_dir_text = export.out_dir.to_string_lossy().into_owned();

        Self {
            session,
            format,
            selected_only: false,
            out_dir_text,
            preview: None,
            show_preview: false,
            status: Arc::new(Mutex::new(status)),
            notice: None,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn out_dir(&self) -> PathBuf {
        let t = self.out_dir_text.trim();
        if t.is_empty() { self.session.options().export.out_dir.clone() } else { PathBuf::from(t) }
    }

    /// Rebuild the preview if it is showing and the cache has rows for the current filter.
    pub fn refresh_preview(&mut self) {
        if !self.show_preview { return; }
        if self.session.cached_rows().is_none() {
            self.preview = None;
            return;
        }
        self.preview = self.session.preview().ok();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("SD/MI Kab. Semarang");
                ui.separator();
                ui.label(format!("source: {}", self.session.source_name()));
            });
        });

        egui::SidePanel::left("filters")
            .resizable(false)
            .min_width(260.0)
            .show(ctx, |ui| {
                components::filter_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::action_buttons::draw(ui, self);

            ui.separator();

            components::stats_panel::draw(ui, self);

            if self.show_preview {
                ui.separator();
                components::data_table::draw(ui, self);
            }
        });

        components::notice::draw(ctx, self);
    }
}
