// src/gui/actions/scrape.rs
//
// Both actions block the UI thread until the source answers, so a second
// click can't start an overlapping fetch into the one cache slot.
use crate::{
    gui::app::App,
    gui::progress::GuiProgress,
    notice::{notice_for, Notice},
};

/// Forced fetch for the current filter.
pub fn scrape(app: &mut App) {
    logf!("Scrape: Begin area={:?} fields={:?}", app.session.filter.area(), app.session.filter.selected_keys());
    let mut prog = GuiProgress::new(app.status.clone());

    let res = app.session.start_scrape(&mut prog);
    app.notice = Some(notice_for(&res, |rows| format!("Scrape finished: {} rows.", rows.len())));
    if let Ok(rows) = &res {
        logf!("Scrape: OK rows={}", rows.len());
        app.refresh_preview();
    }
}

/// Show/hide the preview. Showing reuses the cache, fetching only on a miss.
pub fn preview(app: &mut App) {
    if app.show_preview {
        app.show_preview = false;
        return;
    }

    match app.session.preview() {
        Ok(p) => {
            app.status(format!("Preview: {} of {} rows", p.rows.len(), p.total));
            if p.total == 0 {
                app.notice = Some(Notice::info("The source has no schools for this filter."));
            }
            app.preview = Some(p);
            app.show_preview = true;
        }
        Err(e) => {
            app.notice = Some(Notice::from_error(&e));
        }
    }
}
