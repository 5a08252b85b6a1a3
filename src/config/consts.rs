// src/config/consts.rs

// Remote backend
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const HTTP_TIMEOUT_SECS: u64 = 300; // detail scrapes drive a browser per school
pub const ENV_BASE_URL: &str = "SD_SCRAPE_BASE_URL";
pub const ENV_MOCK: &str = "SD_SCRAPE_MOCK";

// Region (locked in the filter form)
pub const PROVINSI: &str = "Jawa Tengah";
pub const KABKOTA: &str = "Kab. Semarang";

// Filter
pub const DEFAULT_LIMIT: u32 = 200;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 5000;
pub const MAX_SUGGESTIONS: usize = 10;

// Preview + stats
pub const PREVIEW_ROWS: usize = 50;
pub const TOP_AREAS: usize = 12;
pub const UNKNOWN_AREA: &str = "—";

// Mock source
pub const MOCK_MAX_ROWS: usize = 500;
pub const MOCK_AREAS: &[&str] = &[
    "Banyubiru", "Ambarawa", "Bawen", "Ungaran Barat",
    "Ungaran Timur", "Bringin", "Bergas", "Bancak",
];
pub const KECAMATAN_KAB_SEMARANG: &[&str] = &[
    "Ambarawa", "Bancak", "Bandungan", "Banyubiru", "Bawen", "Bergas", "Bringin",
    "Getasan", "Jambu", "Kaliwungu", "Pabelan", "Pringapus", "Sumowono", "Suruh",
    "Susukan", "Tengaran", "Tuntang", "Ungaran Barat", "Ungaran Timur",
];

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE_STEM: &str = "sd-kab-semarang";
pub const FILE_PREFIX: &str = "data_sd_";
pub const SHEET_NAME: &str = "Data";
pub const XLSX_MIN_WIDTH: usize = 10;
pub const XLSX_WIDTH_PAD: usize = 2;

// Local state
pub const LOG_FILE: &str = ".store/debug.log";
pub const CONFIG_FILE: &str = "sd_scrape.toml";
