use std::path::{Path, PathBuf};

/// Directories probed (relative to each ancestor of cwd) when no explicit
/// location is given.
const PROBE_DIRS: &[&str] = &["messages", "apps/web/messages", "frontend/apps/web/messages"];

pub struct CatalogPaths {
    pub base: PathBuf,
    pub target: PathBuf,
}

pub struct Overrides<'a> {
    pub base: Option<&'a Path>,
    pub target: Option<&'a Path>,
    pub messages_dir: Option<&'a Path>,
    pub base_locale: &'a str,
    pub target_locale: &'a str,
}

/// Resolve the catalog file pair.
///
/// Priority:
/// 1. `--base` / `--target` flags (or their env vars)
/// 2. `--messages-dir` joined with `<locale>.json`
/// 3. Walk upward from cwd probing the known messages directories
/// 4. Fall back to `messages/<locale>.json` (the load step reports the
///    missing file with its path)
pub fn resolve(overrides: &Overrides) -> CatalogPaths {
    let base_name = format!("{}.json", overrides.base_locale);
    let target_name = format!("{}.json", overrides.target_locale);

    let dir = match (overrides.base, overrides.target) {
        (Some(_), Some(_)) => PathBuf::new(),
        _ => overrides
            .messages_dir
            .map(Path::to_path_buf)
            .or_else(|| find_messages_dir(&base_name, &target_name))
            .unwrap_or_else(|| PathBuf::from("messages")),
    };

    let paths = CatalogPaths {
        base: overrides
            .base
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.join(&base_name)),
        target: overrides
            .target
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.join(&target_name)),
    };

    tracing::debug!(
        base = %paths.base.display(),
        target = %paths.target.display(),
        "resolved catalog paths"
    );
    paths
}

/// Walk upward from cwd looking for a probe directory that holds both
/// locale files.
fn find_messages_dir(base_name: &str, target_name: &str) -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut dir = cwd;
    loop {
        for probe in PROBE_DIRS {
            let candidate = dir.join(probe);
            if candidate.join(base_name).exists() && candidate.join(target_name).exists() {
                return Some(candidate);
            }
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => return None,
        }
    }
}
