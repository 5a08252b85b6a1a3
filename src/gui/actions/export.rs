// src/gui/actions/export.rs
use crate::{
    export::ColumnSpec,
    file::DirSink,
    gui::app::App,
    notice::notice_for,
};

/// Save the current result in the chosen format into the output folder.
pub fn export(app: &mut App) {
    let spec = if app.selected_only { app.session.selected_columns() } else { ColumnSpec::Canonical };
    let mut sink = DirSink::new(app.out_dir());
    logf!(
        "Export: format={} selected_only={} full={} dir={}",
        app.format,
        app.selected_only,
        app.session.options().export.full_download,
        sink.dir().display()
    );

    let res = app.session.export(app.format, &spec, &mut sink);
    match &res {
        Ok(saved) => app.status(format!("Saved {}", saved.location)),
        Err(e) => app.status(e.user_message()),
    }
    app.notice = Some(notice_for(&res, |saved| format!("Saved {} ({} bytes).", saved.file_name, saved.bytes)));
}
