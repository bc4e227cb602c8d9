use crate::catalog::Catalog;
use crate::error::{LingoError, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

static USAGE_RE: OnceLock<Regex> = OnceLock::new();

// Matches message accessor calls like `m.save_changes(...)`.
fn usage_re() -> &'static Regex {
    USAGE_RE.get_or_init(|| Regex::new(r"\bm\.([a-z][a-z0-9_]*)\b").unwrap())
}

/// Where a message key is referenced in source.
#[derive(Debug, Clone, Serialize)]
pub struct UsageSite {
    pub file: PathBuf,
    pub line: usize,
}

/// Every key referenced in the scanned tree, with its reference sites.
#[derive(Debug, Default)]
pub struct UsageIndex {
    sites: BTreeMap<String, Vec<UsageSite>>,
}

impl UsageIndex {
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.sites.keys()
    }

    pub fn sites(&self, key: &str) -> &[UsageSite] {
        self.sites.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Scan `dir` recursively for `m.key` references in files whose extension
/// is in `extensions`. Unreadable files are skipped, not fatal.
pub fn scan(dir: &Path, extensions: &[String]) -> Result<UsageIndex> {
    if !dir.exists() {
        return Err(LingoError::FileNotFound(dir.to_path_buf()));
    }

    let mut index = UsageIndex::default();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let matches_ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| x == e));
        if !matches_ext {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        for (line_no, line) in content.lines().enumerate() {
            for cap in usage_re().captures_iter(line) {
                index
                    .sites
                    .entry(cap[1].to_string())
                    .or_default()
                    .push(UsageSite {
                        file: entry.path().to_path_buf(),
                        line: line_no + 1,
                    });
            }
        }
    }
    Ok(index)
}

/// A key referenced in code but defined in no catalog.
#[derive(Debug, Clone, Serialize)]
pub struct UndefinedKey {
    pub key: String,
    pub file: PathBuf,
    pub line: usize,
    pub site_count: usize,
}

#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub defined: usize,
    pub used: usize,
    /// Defined but never referenced: cleanup candidates.
    pub unused: Vec<String>,
    /// Referenced but missing from every catalog: breaks at runtime.
    pub undefined: Vec<UndefinedKey>,
}

/// Reconcile the union of catalog keys against the scanned references.
pub fn usage_report(catalogs: &[&Catalog], index: &UsageIndex) -> UsageReport {
    let defined: BTreeSet<&String> = catalogs.iter().flat_map(|c| c.message_keys()).collect();
    let used: BTreeSet<&String> = index.keys().collect();

    let unused = defined
        .difference(&used)
        .map(|k| (*k).clone())
        .collect();

    let undefined = used
        .difference(&defined)
        .map(|key| {
            let sites = index.sites(key);
            let first = &sites[0];
            UndefinedKey {
                key: (*key).clone(),
                file: first.file.clone(),
                line: first.line,
                site_count: sites.len(),
            }
        })
        .collect();

    UsageReport {
        defined: defined.len(),
        used: used.len(),
        unused,
        undefined,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use tempfile::TempDir;

    fn catalog(pairs: &[(&str, &str)]) -> Catalog {
        let entries: IndexMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Catalog::from_entries("test.json", entries)
    }

    fn exts() -> Vec<String> {
        vec!["svelte".to_string()]
    }

    #[test]
    fn scan_collects_sites_with_line_numbers() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("pages")).unwrap();
        std::fs::write(
            dir.path().join("pages/home.svelte"),
            "<h1>{m.welcome()}</h1>\n<button>{m.save_changes()}</button>\n",
        )
        .unwrap();

        let index = scan(dir.path(), &exts()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.sites("welcome")[0].line, 1);
        assert_eq!(index.sites("save_changes")[0].line, 2);
    }

    #[test]
    fn scan_ignores_other_extensions() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "m.not_a_reference()").unwrap();
        let index = scan(dir.path(), &exts()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn scan_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = scan(&dir.path().join("nope"), &exts()).unwrap_err();
        assert!(matches!(err, LingoError::FileNotFound(_)));
    }

    #[test]
    fn report_splits_unused_and_undefined() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("app.svelte"),
            "{m.save()} {m.ghost_key()}\n",
        )
        .unwrap();
        let index = scan(dir.path(), &exts()).unwrap();

        let base = catalog(&[("save", "Save"), ("delete", "Delete")]);
        let target = catalog(&[("save", "Spara"), ("delete", "Radera")]);
        let report = usage_report(&[&base, &target], &index);

        assert_eq!(report.defined, 2);
        assert_eq!(report.used, 2);
        assert_eq!(report.unused, ["delete"]);
        assert_eq!(report.undefined.len(), 1);
        assert_eq!(report.undefined[0].key, "ghost_key");
        assert_eq!(report.undefined[0].line, 1);
    }

    #[test]
    fn metadata_key_never_counts_as_unused() {
        let index = UsageIndex::default();
        let base = catalog(&[("$schema", "x")]);
        let report = usage_report(&[&base], &index);
        assert_eq!(report.defined, 0);
        assert!(report.unused.is_empty());
    }
}
