// benches/pipeline.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use sd_scrape::{
    config::{consts::{KABKOTA, MOCK_MAX_ROWS, PROVINSI}, options::ExportFormat},
    export::{self, ColumnSpec},
    fields,
    process::process,
    source::mock_rows,
    stats::compute_stats,
};

fn bench_pipeline(c: &mut Criterion) {
    // Empty area spreads rows over several kecamatan, so the sort has work to do.
    let raw = mock_rows("", PROVINSI, KABKOTA, MOCK_MAX_ROWS);
    let selected: Vec<_> = fields::defaults().collect();

    c.bench_function("process_500", |b| {
        b.iter(|| {
            let rows = process(black_box(raw.clone()), &selected);
            black_box(rows.len())
        })
    });

    let rows = process(raw.clone(), &selected);

    c.bench_function("stats_500", |b| {
        b.iter(|| black_box(compute_stats(black_box(&rows))))
    });

    c.bench_function("render_csv_500", |b| {
        b.iter(|| {
            let bytes = export::render(black_box(&rows), &ColumnSpec::Canonical, ExportFormat::Csv);
            black_box(bytes.map(|b| b.len()).unwrap_or(0))
        })
    });

    c.bench_function("render_xlsx_500", |b| {
        b.iter(|| {
            let bytes = export::render(black_box(&rows), &ColumnSpec::Canonical, ExportFormat::Xlsx);
            black_box(bytes.map(|b| b.len()).unwrap_or(0))
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
