use crate::catalog::Catalog;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Marker substring identifying generated placeholder values; values that
/// contain it are never counted as duplicates.
pub const PLACEHOLDER_MARKER: &str = "TODO";

/// Single-character values ("×", "·", …) recur legitimately and are
/// excluded from duplicate grouping.
const MAX_IGNORED_VALUE_CHARS: usize = 1;

static PARAM_RE: OnceLock<Regex> = OnceLock::new();

fn param_re() -> &'static Regex {
    PARAM_RE.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap())
}

// ---------------------------------------------------------------------------
// Key diff
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyDiff {
    pub missing_in_target: Vec<String>,
    pub missing_in_base: Vec<String>,
}

impl KeyDiff {
    pub fn is_empty(&self) -> bool {
        self.missing_in_target.is_empty() && self.missing_in_base.is_empty()
    }
}

/// Symmetric key difference. Each side is ordered by the catalog the keys
/// came from, so identical inputs always yield identical output.
pub fn missing_keys(base: &Catalog, target: &Catalog) -> KeyDiff {
    KeyDiff {
        missing_in_target: base
            .message_keys()
            .filter(|k| !target.contains_key(k))
            .cloned()
            .collect(),
        missing_in_base: target
            .message_keys()
            .filter(|k| !base.contains_key(k))
            .cloned()
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Duplicate values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub value: String,
    pub keys: Vec<String>,
}

/// Groups of 2+ keys sharing an identical value, in first-occurrence order.
///
/// Empty or whitespace-only values, single-character values, and generated
/// placeholders are not duplicates.
pub fn duplicate_value_groups(catalog: &Catalog) -> Vec<DuplicateGroup> {
    let mut by_value: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (key, value) in catalog.message_entries() {
        let trimmed = value.trim();
        if trimmed.chars().count() <= MAX_IGNORED_VALUE_CHARS {
            continue;
        }
        if value.contains(PLACEHOLDER_MARKER) {
            continue;
        }
        by_value.entry(value.as_str()).or_default().push(key.clone());
    }

    by_value
        .into_iter()
        .filter(|(_, keys)| keys.len() >= 2)
        .map(|(value, keys)| DuplicateGroup {
            value: value.to_string(),
            keys,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parameter consistency
// ---------------------------------------------------------------------------

/// Parameter names (`{name}`) embedded in a message, collapsed to a set.
pub fn extract_parameters(value: &str) -> BTreeSet<String> {
    param_re()
        .captures_iter(value)
        .map(|c| c[1].to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterMismatch {
    pub key: String,
    pub base_params: BTreeSet<String>,
    pub target_params: BTreeSet<String>,
}

/// For every key present in both catalogs, report the key and both
/// parameter sets whenever the sets differ. Never auto-resolved: neither
/// side is assumed correct.
pub fn parameter_mismatches(base: &Catalog, target: &Catalog) -> Vec<ParameterMismatch> {
    let mut mismatches = Vec::new();
    for (key, base_value) in base.message_entries() {
        let Some(target_value) = target.get(key) else {
            continue;
        };
        let base_params = extract_parameters(base_value);
        let target_params = extract_parameters(target_value);
        if base_params != target_params {
            mismatches.push(ParameterMismatch {
                key: key.clone(),
                base_params,
                target_params,
            });
        }
    }
    mismatches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
