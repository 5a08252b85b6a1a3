// src/fields.rs
//! Field registry: the fixed, ordered set of columns a school record can carry.
//!
//! `key` is the stable identifier used in rows and cache keys, `backend` is the
//! name the data source expects in a query payload, `label` is for headers.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub backend: &'static str,
    pub default_selected: bool,
}

const fn f(key: &'static str, label: &'static str, backend: &'static str, default_selected: bool) -> FieldSpec {
    FieldSpec { key, label, backend, default_selected }
}

/// Registry order. Selected-column exports follow this, never selection order.
pub static FIELDS: &[FieldSpec] = &[
    f("nama_sekolah",    "Nama Sekolah",           "Nama Sekolah",           true),
    f("kelurahan",       "Kelurahan",              "Kelurahan",              false),
    f("npsn",            "NPSN",                   "NPSN",                   true),
    f("status",          "Status",                 "Status",                 false),
    f("kepala_sekolah",  "Kepala Sekolah",         "Kepala Sekolah",         false),
    f("alamat",          "Alamat",                 "Alamat",                 true),
    f("telepon",         "Telepon",                "Telepon",                false),
    f("email",           "Email",                  "Email",                  false),
    f("website",         "Website",                "Website",                false),
    f("yayasan",         "Yayasan",                "Yayasan",                false),
    f("siswa_laki",      "Jumlah Siswa Laki-laki", "Jumlah Siswa Laki-laki", true),
    f("siswa_perempuan", "Jumlah Siswa Perempuan", "Jumlah Siswa Perempuan", true),
    // Not scraped; synthesized or passed through when a source has them
    f("jumlah_siswa",    "Jumlah Siswa",           "jumlah_siswa",           true),
    f("kecamatan",       "Kecamatan",              "kecamatan",              true),
    f("kabkota",         "Kab/Kota",               "kabkota",                true),
    f("provinsi",        "Provinsi",               "provinsi",               true),
    f("latitude",        "Latitude",               "latitude",               false),
    f("longitude",       "Longitude",              "longitude",              false),
];

/// Synthetic 1-based position column.
pub const NO: &str = "No";

// Keys with a role in post-processing and stats
pub const AREA: &str = "kecamatan";
pub const NAME: &str = "nama_sekolah";
pub const TOTAL: &str = "jumlah_siswa";
pub const MALE: &str = "siswa_laki";
pub const FEMALE: &str = "siswa_perempuan";
pub const LAT: &str = "latitude";
pub const LON: &str = "longitude";

/// Tie-break order for the row sort. First unequal field decides.
pub const SORT_PRIORITY: &[&str] = &[
    AREA, NAME, "npsn", "status", "kepala_sekolah", "alamat",
    "telepon", "email", "website", "yayasan", MALE, FEMALE,
];

/// Fixed export layout (after `No`).
pub const CANONICAL_COLUMNS: &[&str] = &[
    NAME, "kelurahan", "npsn", "status", "kepala_sekolah", "alamat",
    "telepon", "email", "website", "yayasan", MALE, FEMALE,
];

pub fn all() -> &'static [FieldSpec] { FIELDS }

pub fn get(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Match a column name coming back from a source against key, backend name or
/// label (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static FieldSpec> {
    let name = name.trim();
    get(name).or_else(|| {
        FIELDS.iter().find(|f| {
            f.backend.eq_ignore_ascii_case(name)
                || f.key.eq_ignore_ascii_case(name)
                || f.label.eq_ignore_ascii_case(name)
        })
    })
}

pub fn defaults() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|f| f.default_selected)
}

/// Header text for a column key. Unknown keys are their own label.
pub fn label(key: &str) -> &str {
    if key == NO { return NO; }
    get(key).map(|f| f.label).unwrap_or(key)
}
