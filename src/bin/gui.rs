// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use sd_scrape::{config::options::AppOptions, gui, log::{self, LogConfig}};
use eframe::egui::ViewportBuilder;

fn main() {
    // No console on Windows, so logs go to .store/debug.log
    if let Err(e) = log::init(&LogConfig::gui_default()) {
        eprintln!("Logging disabled: {e}");
    }

    let app_options = match AppOptions::load(None) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("SD Scraper - Kab. Semarang")
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, app_options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
