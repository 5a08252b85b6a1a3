// src/filter.rs
//! Filter state: region, area name, selected fields, limit.
//! Produces the query payload and the cache key for a query.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{consts::*, options::FilterDefaults};
use crate::error::ValidationError;
use crate::fields::{self, FieldSpec};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterParams {
    pub provinsi: String,
    pub kabkota: String,
    pub area_name: String,
    /// Registry keys. A set, so selection order never leaks anywhere.
    selected: BTreeSet<&'static str>,
    pub limit: u32,
}

impl Default for FilterParams {
    fn default() -> Self { Self::new(&FilterDefaults::default()) }
}

impl FilterParams {
    /// Region from `defaults`, registry default selection, empty area.
    pub fn new(defaults: &FilterDefaults) -> Self {
        Self {
            provinsi: defaults.provinsi.clone(),
            kabkota: defaults.kabkota.clone(),
            area_name: s!(),
            selected: fields::defaults().map(|f| f.key).collect(),
            limit: defaults.limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area_name = area.into();
        self
    }

    /// Replace the selection. Names go through `fields::resolve`.
    pub fn with_fields<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self, ValidationError> {
        self.selected.clear();
        for n in names {
            self.select(n.as_ref())?;
        }
        Ok(self)
    }

    pub fn select(&mut self, name: &str) -> Result<(), ValidationError> {
        let f = lookup(name)?;
        self.selected.insert(f.key);
        Ok(())
    }

    pub fn deselect(&mut self, name: &str) -> Result<(), ValidationError> {
        let f = lookup(name)?;
        self.selected.remove(f.key);
        Ok(())
    }

    /// Checkbox semantics: select when `on`, deselect otherwise.
    pub fn set_selected(&mut self, name: &str, on: bool) -> Result<(), ValidationError> {
        if on { self.select(name) } else { self.deselect(name) }
    }

    pub fn clear_selection(&mut self) { self.selected.clear(); }

    #[inline]
    pub fn is_selected(&self, key: &str) -> bool { self.selected.contains(key) }

    /// Clamped into `MIN_LIMIT..=MAX_LIMIT`.
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
    }

    /// Selected fields in registry order.
    pub fn selected_fields(&self) -> Vec<&'static FieldSpec> {
        fields::all().iter().filter(|f| self.selected.contains(f.key)).collect()
    }

    pub fn selected_keys(&self) -> Vec<&'static str> {
        self.selected_fields().into_iter().map(|f| f.key).collect()
    }

    #[inline]
    pub fn area(&self) -> &str { self.area_name.trim() }

    /// Checks done before anything goes to a data source.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.area().is_empty() {
            return Err(ValidationError::MissingAreaName);
        }
        if self.selected.is_empty() {
            return Err(ValidationError::NoFieldsSelected);
        }
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&self.limit) {
            return Err(ValidationError::LimitOutOfRange { value: self.limit, min: MIN_LIMIT, max: MAX_LIMIT });
        }
        Ok(())
    }

    pub fn payload(&self) -> QueryPayload {
        QueryPayload {
            provinsi: self.provinsi.clone(),
            kabkota: self.kabkota.clone(),
            kecamatan: s!(self.area()),
            fields: self.selected_fields().iter().map(|f| s!(f.backend)).collect(),
            limit: Some(self.limit),
        }
    }

    /// Everything that changes the result, with field names sorted.
    /// `serde_json::Map` keeps object keys ordered, so equal content gives equal text.
    pub fn cache_key(&self) -> CacheKey {
        let mut backends: Vec<&str> = self.selected_fields().iter().map(|f| f.backend).collect();
        backends.sort_unstable();
        let key = serde_json::json!({
            "provinsi": self.provinsi.trim(),
            "kabkota": self.kabkota.trim(),
            "kecamatan": self.area(),
            "fields": backends,
            "limit": self.limit,
        });
        CacheKey(key.to_string())
    }
}

fn lookup(name: &str) -> Result<&'static FieldSpec, ValidationError> {
    fields::resolve(name).ok_or_else(|| ValidationError::UnknownField(s!(name)))
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str { &self.0 }
}

/// Body of `POST /preview` and `POST /download`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryPayload {
    pub provinsi: String,
    pub kabkota: String,
    pub kecamatan: String,
    /// Backend names, registry order.
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Autocomplete: prefix matches first, then substring matches, both in list
/// order, at most `MAX_SUGGESTIONS`. Empty query suggests nothing.
pub fn suggest<'a>(query: &str, areas: &'a [String]) -> Vec<&'a str> {
    let q = query.trim().to_lowercase();
    if q.is_empty() { return Vec::new(); }

    let lower: Vec<(usize, String)> = areas.iter().map(|a| a.to_lowercase()).enumerate().collect();
    let prefix = lower.iter().filter(|(_, a)| a.starts_with(&q));
    let contains = lower.iter().filter(|(_, a)| !a.starts_with(&q) && a.contains(&q));

    prefix
        .chain(contains)
        .take(MAX_SUGGESTIONS)
        .map(|(i, _)| areas[*i].as_str())
        .collect()
}
