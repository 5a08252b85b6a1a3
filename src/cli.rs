// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, Table};

use crate::config::{consts::PREVIEW_ROWS, options::{AppOptions, ExportFormat, SourceMode}};
use crate::export::ColumnSpec;
use crate::fields;
use crate::file::DirSink;
use crate::filter::suggest;
use crate::log::{self, LogConfig};
use crate::progress::Progress;
use crate::session::Session;
use crate::stats::Stats;

#[derive(Parser, Debug)]
#[command(name = "sd_scrape", version, about = "Preview, summarize and export SD/MI school records (Kab. Semarang)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: ./sd_scrape.toml if present).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Use the built-in mock data instead of the backend.
    #[arg(long, global = true)]
    pub mock: bool,

    /// Backend base URL (overrides config and SD_SCRAPE_BASE_URL).
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List selectable fields.
    Fields,
    /// List kecamatan names, or suggestions for a partial name.
    Areas {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Fetch rows and print the first few.
    Preview {
        #[command(flatten)]
        query: QueryArgs,
        /// Rows to print.
        #[arg(long, default_value_t = PREVIEW_ROWS)]
        rows: usize,
    },
    /// Fetch rows and print summary numbers.
    Stats {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Fetch rows and write a CSV/TSV/XLSX file.
    Export {
        #[command(flatten)]
        query: QueryArgs,
        /// csv, tsv or xlsx (default from config).
        #[arg(long)]
        format: Option<ExportFormat>,
        /// Output directory, or a file path.
        #[arg(short, long, value_name = "PATH")]
        out: Option<String>,
        /// Only the selected fields instead of the fixed report layout.
        #[arg(long)]
        selected_columns: bool,
        /// Every row for the kecamatan (backend download), not just `--limit`.
        #[arg(long)]
        full: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Kecamatan to query.
    #[arg(short = 'k', long = "area")]
    pub area: String,
    /// Fields by key, label or backend name; comma separated. Default: registry defaults.
    #[arg(short = 'f', long = "field", value_delimiter = ',')]
    pub fields: Vec<String>,
    /// Max rows (1..=5000).
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Prints progress to stderr.
struct CliProgress;

impl Progress for CliProgress {
    fn begin(&mut self, what: &str) { eprintln!("Scraping {what} ..."); }
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
    fn finish(&mut self, rows: usize) { eprintln!("Done: {rows} rows"); }
    fn failed(&mut self, msg: &str) { eprintln!("Failed: {msg}"); }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    log::init(&LogConfig::from_verbosity(cli.verbose)).wrap_err("logging setup")?;

    let mut options = AppOptions::load(cli.config.as_deref())?;
    if cli.mock {
        options.source.mode = SourceMode::Mock;
    }
    if let Some(url) = &cli.base_url {
        options.source.base_url = url.trim_end_matches('/').to_string();
    }
    logd!("Options: {options:?}");

    match cli.command {
        Command::Fields => {
            print_fields();
            Ok(())
        }
        Command::Areas { query } => {
            let mut session = Session::from_options(options)?;
            session.load_areas();
            let list: Vec<&str> = match &query {
                Some(q) => suggest(q, session.areas()),
                None => session.areas().iter().map(String::as_str).collect(),
            };
            if list.is_empty() {
                eprintln!("No area names available.");
            }
            for a in list {
                println!("{a}");
            }
            Ok(())
        }
        Command::Preview { query, rows } => {
            let mut session = session_for(options, &query)?;
            session.start_scrape(&mut CliProgress).map_err(report)?;
            let p = session.preview().map_err(report)?;
            let mut table = styled_table(p.columns.iter().map(|c| c.header));
            for r in p.rows.iter().take(rows) {
                table.add_row(r);
            }
            println!("{table}");
            println!("Showing {} of {} rows", rows.min(p.rows.len()), p.total);
            Ok(())
        }
        Command::Stats { query } => {
            let mut session = session_for(options, &query)?;
            session.start_scrape(&mut CliProgress).map_err(report)?;
            match session.stats() {
                Some(st) => print_stats(&st),
                None => println!("No rows."),
            }
            Ok(())
        }
        Command::Export { query, format, out, selected_columns, full } => {
            let format = format.unwrap_or(options.export.format);
            options.export.full_download |= full;
            let mut sink = DirSink::for_target(out.as_deref().unwrap_or(""), &options.export.out_dir);
            let mut session = session_for(options, &query)?;
            let spec = if selected_columns { session.selected_columns() } else { ColumnSpec::Canonical };
            let saved = session.export(format, &spec, &mut sink).map_err(report)?;
            println!("Saved {} ({} bytes)", saved.location, saved.bytes);
            Ok(())
        }
    }
}

fn session_for(options: AppOptions, q: &QueryArgs) -> Result<Session> {
    let mut session = Session::from_options(options)?;
    session.filter.area_name = q.area.clone();
    if !q.fields.is_empty() {
        let names: Vec<&str> = q.fields.iter().map(|f| f.trim()).filter(|f| !f.is_empty()).collect();
        session.filter = session.filter.clone().with_fields(&names)?;
    }
    if let Some(limit) = q.limit {
        session.filter.limit = limit; // validated, not clamped
    }
    Ok(session)
}

/// User-facing message first, detail in the chain.
fn report(err: crate::Error) -> color_eyre::Report {
    let msg = err.user_message();
    eyre!(err).wrap_err(msg)
}

fn styled_table<I, S>(headers: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<Cell>,
{
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(headers);
    table
}

fn print_fields() {
    let mut table = styled_table(["Key", "Label", "Backend", "Default"]);
    for f in fields::all() {
        table.add_row(vec![f.key, f.label, f.backend, if f.default_selected { "yes" } else { "" }]);
    }
    println!("{table}");
}

fn print_stats(st: &Stats) {
    let mut table = styled_table(["", "Value"]);
    table.add_row(vec![s!("Schools"), st.total_schools.to_string()]);
    table.add_row(vec![s!("Students"), st.total_students.to_string()]);
    table.add_row(vec![s!("Male"), st.total_male.to_string()]);
    table.add_row(vec![s!("Female"), st.total_female.to_string()]);
    table.add_row(vec![s!("Avg students / school"), st.avg_students.to_string()]);
    table.add_row(vec![s!("Avg male / school"), st.avg_male.to_string()]);
    table.add_row(vec![s!("Avg female / school"), st.avg_female.to_string()]);
    table.add_row(vec![s!("Coordinates"), s!(if st.has_geo { "yes" } else { "no" })]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("{table}");

    if st.by_area.is_empty() { return; }
    let mut areas = styled_table(["Kecamatan", "Male", "Female", "Total"]);
    for a in &st.by_area {
        areas.add_row(vec![a.area.clone(), a.male.to_string(), a.female.to_string(), a.total.to_string()]);
    }
    println!("{areas}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_flags_parse() {
        let cli = Cli::try_parse_from([
            "sd_scrape", "export", "-k", "Bawen", "-f", "npsn,nama_sekolah", "--full", "--format", "xlsx", "--mock",
        ])
        .unwrap();
        assert!(cli.mock);
        match cli.command {
            Command::Export { query, format, full, selected_columns, .. } => {
                assert_eq!(query.area, "Bawen");
                assert_eq!(query.fields, ["npsn", "nama_sekolah"]);
                assert_eq!(format, Some(ExportFormat::Xlsx));
                assert!(full);
                assert!(!selected_columns);
            }
            other => panic!("parsed as {other:?}"),
        }
    }
}
