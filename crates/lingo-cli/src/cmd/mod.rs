pub mod add_missing;
pub mod check;
pub mod fix;
pub mod sort;
pub mod usage;
pub mod validate;

use lingo_core::diff::{DuplicateGroup, ParameterMismatch};
use std::collections::BTreeSet;
use std::path::Path;

/// What a command found, mapped to the process exit code in `main`:
/// clean (or warnings only) → 0, error-class findings → 1. Fatal failures
/// bubble up as `Err` and exit 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Clean,
    IssuesFound,
}

const GROUP_LIMIT: usize = 5;
const GROUP_KEY_LIMIT: usize = 3;

fn fmt_params(params: &BTreeSet<String>) -> String {
    if params.is_empty() {
        return "(none)".to_string();
    }
    params
        .iter()
        .map(|p| format!("{{{p}}}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_duplicate_section(path: &Path, groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        return;
    }
    let key_total: usize = groups.iter().map(|g| g.keys.len()).sum();
    println!(
        "\nDuplicate values in {} ({} groups, {} keys), consider consolidating:",
        path.display(),
        groups.len(),
        key_total
    );
    for group in groups.iter().take(GROUP_LIMIT) {
        println!("   \"{}\" ({} keys):", group.value, group.keys.len());
        crate::output::print_capped(&group.keys, GROUP_KEY_LIMIT);
    }
    if groups.len() > GROUP_LIMIT {
        println!("   ... and {} more groups", groups.len() - GROUP_LIMIT);
    }
}

fn print_mismatch_section(mismatches: &[ParameterMismatch]) {
    if mismatches.is_empty() {
        return;
    }
    println!("\nParameter mismatches ({}):", mismatches.len());
    for m in mismatches {
        println!(
            "   - {}: base {} vs target {}",
            m.key,
            fmt_params(&m.base_params),
            fmt_params(&m.target_params)
        );
    }
}
