// tests/cache_key.rs
//
// Laws of the cache key and the post-processor, checked over generated input.

use proptest::prelude::*;
use proptest::sample::subsequence;

use sd_scrape::data::{Row, Value};
use sd_scrape::fields::{self, FieldSpec, FEMALE, MALE, NO, TOTAL};
use sd_scrape::filter::FilterParams;
use sd_scrape::process::process;

fn selection_and_shuffle() -> impl Strategy<Value = (Vec<&'static str>, Vec<&'static str>)> {
    let keys: Vec<&'static str> = fields::all().iter().map(|f| f.key).collect();
    let n = keys.len();
    subsequence(keys, 1..=n).prop_flat_map(|sel| (Just(sel.clone()), Just(sel).prop_shuffle()))
}

fn raw_row() -> impl Strategy<Value = Row> {
    (
        prop::sample::select(vec!["Bawen", "bawen", "Ambarawa", "", "Tuntang"]),
        prop::sample::select(vec!["SD Negeri 1", "sd negeri 1", "MI Al Huda", "SD Negeri 10"]),
        prop::option::of(0i64..400),
        prop::option::of(0i64..200),
    )
        .prop_map(|(area, name, total, male)| {
            let mut r = Row::new();
            r.insert("kecamatan", area);
            r.insert("Nama Sekolah", name);
            if let Some(t) = total { r.insert("Jumlah Siswa", Value::Int(t)); }
            if let Some(m) = male { r.insert("Jumlah Siswa Laki-laki", Value::Int(m)); }
            r
        })
}

/// Rows tagged with their input position so outputs can be traced back.
fn raw_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(raw_row(), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.insert("seq", i as i64);
                r
            })
            .collect()
    })
}

fn selected() -> Vec<&'static FieldSpec> {
    ["kecamatan", "nama_sekolah"].iter().filter_map(|k| fields::get(k)).collect()
}

proptest! {
    #[test]
    fn key_is_order_independent((a, b) in selection_and_shuffle(), area in "[A-Za-z ]{1,12}") {
        let pa = FilterParams::default().with_area(area.clone()).with_fields(&a).unwrap();
        let pb = FilterParams::default().with_area(format!(" {area} ")).with_fields(&b).unwrap();
        prop_assert_eq!(pa.cache_key(), pb.cache_key());
    }

    #[test]
    fn numbering_is_position(raw in raw_rows()) {
        let out = process(raw, &selected());
        for (i, r) in out.iter().enumerate() {
            prop_assert_eq!(r.get(NO), Some(&Value::Int(i as i64 + 1)));
        }
    }

    #[test]
    fn processing_twice_changes_nothing(raw in raw_rows()) {
        let once = process(raw, &selected());
        let twice = process(once.clone(), &selected());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn enrichment_respects_sources(raw in raw_rows()) {
        let out = process(raw.clone(), &selected());
        for r in &out {
            let src = raw.iter().find(|s| s.get("seq") == r.get("seq")).unwrap();
            let total = r.number(TOTAL).unwrap();
            let male = r.number(MALE).unwrap();
            let female = r.number(FEMALE).unwrap();

            match src.number("Jumlah Siswa") {
                Some(t) => prop_assert_eq!(total, t),
                None => prop_assert!((80.0..=200.0).contains(&total)),
            }
            match src.number("Jumlah Siswa Laki-laki") {
                Some(m) => prop_assert_eq!(male, m),
                None => prop_assert!(0.0 <= male && male <= total),
            }
            prop_assert_eq!(female, total - male);
        }
    }
}
