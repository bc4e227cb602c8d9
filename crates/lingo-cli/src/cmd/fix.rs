use crate::cmd::Outcome;
use crate::locate::CatalogPaths;
use crate::output;
use lingo_core::catalog::Catalog;
use lingo_core::naming::NamingViolation;
use lingo_core::{diff, naming, write};
use std::path::Path;

pub fn run(
    paths: &CatalogPaths,
    placeholder: &str,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<Outcome> {
    let base = Catalog::load(&paths.base)?;
    let mut target = Catalog::load(&paths.target)?;

    let key_diff = diff::missing_keys(&base, &target);
    let add = write::add_missing(&mut target, &key_diff.missing_in_target, placeholder);
    let base_naming = naming::violations(&base);
    let target_naming = naming::violations(&target);
    let sorted = target.sorted();

    if json {
        output::print_json(&serde_json::json!({
            "added": add.added,
            "skipped": add.skipped,
            "base_naming": base_naming,
            "target_naming": target_naming,
            "dry_run": dry_run,
        }))?;
    } else {
        for key in &add.added {
            println!("  + {key}");
        }
        for v in &add.skipped {
            println!("  ! skipped '{}': not snake_case (suggestion: {})", v.key, v.suggestion);
        }
        print_naming_section(&paths.base, &base_naming);
        print_naming_section(&paths.target, &target_naming);
    }

    if dry_run {
        if !json {
            println!("[dry run] {} not modified", paths.target.display());
        }
    } else {
        write::save(&sorted, &paths.target)?;
        if !json {
            println!(
                "Wrote {} ({} keys added, sorted)",
                paths.target.display(),
                add.added.len()
            );
        }
    }

    let has_violations = !base_naming.is_empty() || !target_naming.is_empty();
    Ok(if has_violations {
        Outcome::IssuesFound
    } else {
        Outcome::Clean
    })
}

/// Renames would silently orphan translated values, so they stay manual.
fn print_naming_section(path: &Path, violations: &[NamingViolation]) {
    if violations.is_empty() {
        return;
    }
    println!(
        "\nNaming violations in {} ({}, manual rename required):",
        path.display(),
        violations.len()
    );
    for v in violations {
        println!("   - {} -> {}", v.key, v.suggestion);
    }
}
