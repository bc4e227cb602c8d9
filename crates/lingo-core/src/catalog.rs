use crate::error::{LingoError, Result};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Reserved schema-identifier key. Excluded from diffing, naming, and
/// duplicate checks, and pinned first when a catalog is sorted.
pub const METADATA_KEY: &str = "$schema";

/// One locale's message catalog: an ordered key → text mapping loaded from
/// a flat JSON object file.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub path: PathBuf,
    entries: IndexMap<String, String>,
}

impl Catalog {
    /// Parse the file at `path` into a catalog, preserving declaration order.
    ///
    /// Distinguishes three failures: a missing path, malformed JSON (with
    /// the parser's line and column), and well-formed JSON that is not a
    /// flat string-to-string object.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LingoError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| LingoError::Syntax {
                path: path.to_path_buf(),
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            })?;

        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(LingoError::Schema {
                    path: path.to_path_buf(),
                    reason: format!("top level is {}, expected an object", json_type_name(&other)),
                });
            }
        };

        let mut entries = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            match value {
                serde_json::Value::String(text) => {
                    entries.insert(key, text);
                }
                other => {
                    return Err(LingoError::Schema {
                        path: path.to_path_buf(),
                        reason: format!(
                            "value of '{}' is {}, expected a string",
                            key,
                            json_type_name(&other)
                        ),
                    });
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn from_entries(path: impl Into<PathBuf>, entries: IndexMap<String, String>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys in declaration order, metadata key included.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Message keys in declaration order, metadata key excluded.
    pub fn message_keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys().filter(|k| k.as_str() != METADATA_KEY)
    }

    /// Message entries in declaration order, metadata key excluded.
    pub fn message_entries(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter().filter(|(k, _)| k.as_str() != METADATA_KEY)
    }

    pub fn message_count(&self) -> usize {
        self.message_keys().count()
    }

    /// Value of the metadata key, if present.
    pub fn schema(&self) -> Option<&str> {
        self.get(METADATA_KEY)
    }

    /// Copy with message keys sorted alphabetically and the metadata key
    /// (if present) pinned first. Idempotent.
    pub fn sorted(&self) -> Self {
        let mut entries = IndexMap::with_capacity(self.entries.len());
        if let Some(schema) = self.entries.get(METADATA_KEY) {
            entries.insert(METADATA_KEY.to_string(), schema.clone());
        }
        let mut rest: Vec<(String, String)> = self
            .message_entries()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        rest.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, value) in rest {
            entries.insert(key, value);
        }
        Self {
            path: self.path.clone(),
            entries,
        }
    }

    /// Pretty JSON in the catalog's declaration order, non-ASCII text
    /// verbatim, with a trailing newline.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(&self.entries)?;
        out.push('\n');
        Ok(out)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_preserves_declaration_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "en.json", r#"{"zebra": "Z", "apple": "A", "mango": "M"}"#);
        let catalog = Catalog::load(&path).unwrap();
        let keys: Vec<&String> = catalog.keys().collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LingoError::FileNotFound(_)));
    }

    #[test]
    fn load_malformed_json_reports_location() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "en.json", "{\n  \"save\": \"Save\",\n}");
        let err = Catalog::load(&path).unwrap_err();
        match err {
            LingoError::Syntax { line, column, .. } => {
                assert_eq!(line, 3);
                assert!(column > 0);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "en.json", r#"["save", "delete"]"#);
        let err = Catalog::load(&path).unwrap_err();
        match err {
            LingoError::Schema { reason, .. } => assert!(reason.contains("an array")),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_nested_value() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "en.json", r#"{"save": {"label": "Save"}}"#);
        let err = Catalog::load(&path).unwrap_err();
        match err {
            LingoError::Schema { reason, .. } => {
                assert!(reason.contains("'save'"));
                assert!(reason.contains("an object"));
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn message_keys_exclude_metadata() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "en.json",
            r#"{"$schema": "https://inlang.com/schema", "save": "Save"}"#,
        );
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.message_count(), 1);
        assert_eq!(catalog.schema(), Some("https://inlang.com/schema"));
        let keys: Vec<&String> = catalog.message_keys().collect();
        assert_eq!(keys, ["save"]);
    }

    #[test]
    fn sorted_pins_metadata_first() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "en.json",
            r#"{"delete": "Delete", "$schema": "x", "apple": "A"}"#,
        );
        let sorted = Catalog::load(&path).unwrap().sorted();
        let keys: Vec<&String> = sorted.keys().collect();
        assert_eq!(keys, ["$schema", "apple", "delete"]);
    }

    #[test]
    fn sorted_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "en.json", r#"{"b": "B", "a": "A", "c": "C"}"#);
        let once = Catalog::load(&path).unwrap().sorted();
        let twice = once.sorted();
        assert_eq!(
            once.to_json_string().unwrap(),
            twice.to_json_string().unwrap()
        );
    }

    #[test]
    fn to_json_keeps_non_ascii_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "sv.json", r#"{"save": "Spara ändringar"}"#);
        let out = Catalog::load(&path).unwrap().to_json_string().unwrap();
        assert!(out.contains("Spara ändringar"));
        assert!(!out.contains("\\u"));
        assert!(out.ends_with('\n'));
    }
}
