use crate::catalog::Catalog;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

static SNAKE_CASE_RE: OnceLock<Regex> = OnceLock::new();
static ACRONYM_BOUNDARY_RE: OnceLock<Regex> = OnceLock::new();
static CAMEL_BOUNDARY_RE: OnceLock<Regex> = OnceLock::new();
static UNDERSCORE_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn snake_case_re() -> &'static Regex {
    SNAKE_CASE_RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap())
}

pub fn is_snake_case(key: &str) -> bool {
    snake_case_re().is_match(key)
}

/// snake_case rendition of a camelCase or PascalCase key, offered as a
/// rename suggestion. Keys are never renamed automatically.
pub fn suggest_snake_case(key: &str) -> String {
    let acronym = ACRONYM_BOUNDARY_RE.get_or_init(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
    let camel = CAMEL_BOUNDARY_RE.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
    let runs = UNDERSCORE_RUN_RE.get_or_init(|| Regex::new(r"_+").unwrap());

    let s = acronym.replace_all(key, "${1}_${2}");
    let s = camel.replace_all(&s, "${1}_${2}");
    let s = s.to_lowercase();
    let s = runs.replace_all(&s, "_");
    s.trim_matches('_').to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct NamingViolation {
    pub key: String,
    pub suggestion: String,
}

/// Keys failing the snake_case rule, in catalog order, metadata excluded.
pub fn violations(catalog: &Catalog) -> Vec<NamingViolation> {
    catalog
        .message_keys()
        .filter(|k| !is_snake_case(k))
        .map(|k| NamingViolation {
            key: k.clone(),
            suggestion: suggest_snake_case(k),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn valid_keys() {
        for key in ["save", "save_changes", "page_404", "a", "x1_y2"] {
            assert!(is_snake_case(key), "expected valid: {key}");
        }
    }

    #[test]
    fn invalid_keys() {
        for key in ["", "userName", "SaveChanges", "_save", "1st_item", "save-now", "SAVE"] {
            assert!(!is_snake_case(key), "expected invalid: {key}");
        }
    }

    #[test]
    fn suggestions() {
        assert_eq!(suggest_snake_case("userName"), "user_name");
        assert_eq!(suggest_snake_case("SaveChanges"), "save_changes");
        assert_eq!(suggest_snake_case("already_snake"), "already_snake");
        assert_eq!(suggest_snake_case("double__underscore"), "double_underscore");
        assert_eq!(suggest_snake_case("_leading"), "leading");
    }

    #[test]
    fn violations_exclude_metadata_and_keep_order() {
        let entries: IndexMap<String, String> = [
            ("$schema", "x"),
            ("userName", "Name"),
            ("save", "Save"),
            ("DeleteAll", "Delete all"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let catalog = Catalog::from_entries("en.json", entries);

        let found = violations(&catalog);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].key, "userName");
        assert_eq!(found[0].suggestion, "user_name");
        assert_eq!(found[1].key, "DeleteAll");
        assert_eq!(found[1].suggestion, "delete_all");
    }
}
