use crate::cmd::Outcome;
use crate::locate::CatalogPaths;
use crate::output;
use lingo_core::catalog::Catalog;
use lingo_core::{diff, write};

pub fn run(
    paths: &CatalogPaths,
    placeholder: &str,
    sort: bool,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<Outcome> {
    let base = Catalog::load(&paths.base)?;
    let mut target = Catalog::load(&paths.target)?;

    let key_diff = diff::missing_keys(&base, &target);
    let report = write::add_missing(&mut target, &key_diff.missing_in_target, placeholder);
    let catalog = if sort { target.sorted() } else { target };

    if json {
        output::print_json(&serde_json::json!({
            "added": report.added,
            "skipped": report.skipped,
            "dry_run": dry_run,
        }))?;
    } else {
        if report.is_empty() {
            println!("No missing keys.");
        }
        for key in &report.added {
            println!("  + {key}");
        }
        for v in &report.skipped {
            println!("  ! skipped '{}': not snake_case (suggestion: {})", v.key, v.suggestion);
        }
    }

    if dry_run {
        if !json {
            println!("[dry run] {} not modified", paths.target.display());
        }
        return Ok(Outcome::Clean);
    }

    if !report.added.is_empty() || sort {
        write::save(&catalog, &paths.target)?;
        if !json {
            println!(
                "Wrote {} ({} keys added)",
                paths.target.display(),
                report.added.len()
            );
        }
    }

    Ok(Outcome::Clean)
}
