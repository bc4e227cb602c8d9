use crate::catalog::Catalog;
use crate::error::{LingoError, Result};
use crate::naming::{self, NamingViolation};
use serde::Serialize;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Suffix appended to the destination path for the pre-write backup copy.
pub const BACKUP_SUFFIX: &str = ".backup";

#[derive(Debug, Clone, Default, Serialize)]
pub struct AddReport {
    pub added: Vec<String>,
    pub skipped: Vec<NamingViolation>,
}

impl AddReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.skipped.is_empty()
    }
}

/// Insert a placeholder entry for each of `keys` not already present.
/// Candidates failing the snake_case rule are skipped and reported rather
/// than written.
pub fn add_missing(catalog: &mut Catalog, keys: &[String], placeholder: &str) -> AddReport {
    let mut report = AddReport::default();
    for key in keys {
        if catalog.contains_key(key) {
            continue;
        }
        if !naming::is_snake_case(key) {
            report.skipped.push(NamingViolation {
                key: key.clone(),
                suggestion: naming::suggest_snake_case(key),
            });
            continue;
        }
        catalog.insert(key.clone(), placeholder.to_string());
        report.added.push(key.clone());
    }
    report
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(BACKUP_SUFFIX);
    PathBuf::from(os)
}

/// Serialize `catalog` and replace the file at `path` with it.
///
/// Order of effects: serialize, copy any existing file to its backup path,
/// then atomically persist a tempfile over the destination. A failure at
/// any step leaves the destination byte-identical to its pre-call content;
/// the backup may remain as a forensic artifact.
pub fn save(catalog: &Catalog, path: &Path) -> Result<()> {
    let data = catalog
        .to_json_string()
        .map_err(|e| LingoError::WriteFailed {
            path: path.to_path_buf(),
            reason: format!("serialization failed: {e}"),
        })?;

    if path.exists() {
        std::fs::copy(path, backup_path(path)).map_err(|e| LingoError::WriteFailed {
            path: path.to_path_buf(),
            reason: format!("backup copy failed: {e}"),
        })?;
    }

    atomic_write(path, data.as_bytes()).map_err(|e| LingoError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write `data` to `path` via a tempfile in the same directory, so a failed
/// write never leaves a partial destination.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
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

    #[test]
    fn add_missing_appends_placeholders() {
        let mut target = catalog(&[("save", "Save")]);
        let keys = vec!["delete".to_string(), "cancel".to_string()];
        let report = add_missing(&mut target, &keys, "[TODO: translate]");
        assert_eq!(report.added, ["delete", "cancel"]);
        assert!(report.skipped.is_empty());
        assert_eq!(target.get("delete"), Some("[TODO: translate]"));
        // Existing entries keep their position; new ones append after.
        let all: Vec<&String> = target.keys().collect();
        assert_eq!(all, ["save", "delete", "cancel"]);
    }

    #[test]
    fn add_missing_skips_invalid_names() {
        let mut target = catalog(&[]);
        let keys = vec!["userName".to_string(), "delete".to_string()];
        let report = add_missing(&mut target, &keys, "[TODO: translate]");
        assert_eq!(report.added, ["delete"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].key, "userName");
        assert_eq!(report.skipped[0].suggestion, "user_name");
        assert!(!target.contains_key("userName"));
    }

    #[test]
    fn add_missing_leaves_existing_values_alone() {
        let mut target = catalog(&[("save", "Spara")]);
        let keys = vec!["save".to_string()];
        let report = add_missing(&mut target, &keys, "[TODO: translate]");
        assert!(report.is_empty());
        assert_eq!(target.get("save"), Some("Spara"));
    }

    #[test]
    fn save_creates_backup_of_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sv.json");
        std::fs::write(&path, "{\n  \"save\": \"Spara\"\n}\n").unwrap();

        let mut cat = Catalog::load(&path).unwrap();
        cat.insert("delete".to_string(), "Radera".to_string());
        save(&cat, &path).unwrap();

        let backup = std::fs::read_to_string(backup_path(&path)).unwrap();
        assert_eq!(backup, "{\n  \"save\": \"Spara\"\n}\n");
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Radera"));
    }

    #[test]
    fn save_to_fresh_path_skips_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.json");
        save(&catalog(&[("save", "Save")]), &path).unwrap();
        assert!(path.exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn failed_backup_leaves_destination_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sv.json");
        let original = "{\n  \"save\": \"Spara\"\n}\n";
        std::fs::write(&path, original).unwrap();
        // A directory at the backup path makes the copy fail.
        std::fs::create_dir(backup_path(&path)).unwrap();

        let err = save(&catalog(&[("save", "Save")]), &path).unwrap_err();
        assert!(matches!(err, LingoError::WriteFailed { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn save_writes_non_ascii_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sv.json");
        save(&catalog(&[("save", "Spara ändringar")]), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Spara ändringar"));
        assert!(written.ends_with('\n'));
    }
}
