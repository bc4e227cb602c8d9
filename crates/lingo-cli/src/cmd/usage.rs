use crate::cmd::Outcome;
use crate::locate::CatalogPaths;
use crate::output;
use lingo_core::catalog::Catalog;
use lingo_core::usage;
use std::path::Path;

pub fn run(
    paths: &CatalogPaths,
    scan_dir: &Path,
    extensions: &[String],
    limit: usize,
    json: bool,
) -> anyhow::Result<Outcome> {
    let base = Catalog::load(&paths.base)?;
    let target = Catalog::load(&paths.target)?;
    let index = usage::scan(scan_dir, extensions)?;
    let report = usage::usage_report(&[&base, &target], &index);

    if json {
        output::print_json(&report)?;
    } else {
        println!("Defined keys: {}", report.defined);
        println!("Used in code: {}", report.used);

        if report.unused.is_empty() {
            println!("\nAll defined keys are referenced.");
        } else {
            println!("\nUnused keys ({} cleanup candidates):", report.unused.len());
            output::print_capped(&report.unused, limit);
        }

        if report.undefined.is_empty() {
            println!("\nAll referenced keys exist in the catalogs.");
        } else {
            println!(
                "\nUndefined keys ({} referenced in code but in no catalog):",
                report.undefined.len()
            );
            for u in report.undefined.iter().take(limit) {
                println!("   - {} ({}:{})", u.key, u.file.display(), u.line);
                if u.site_count > 1 {
                    println!("     ... and {} more reference(s)", u.site_count - 1);
                }
            }
            if report.undefined.len() > limit {
                println!("   ... and {} more", report.undefined.len() - limit);
            }
        }
    }

    Ok(if report.undefined.is_empty() {
        Outcome::Clean
    } else {
        Outcome::IssuesFound
    })
}
