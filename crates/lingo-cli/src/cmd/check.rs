use crate::cmd::{print_duplicate_section, print_mismatch_section, Outcome};
use crate::locate::CatalogPaths;
use crate::output;
use lingo_core::catalog::Catalog;
use lingo_core::report::CheckReport;

const KEY_LIST_LIMIT: usize = 10;

pub fn run(paths: &CatalogPaths, json: bool) -> anyhow::Result<Outcome> {
    let base = Catalog::load(&paths.base)?;
    let target = Catalog::load(&paths.target)?;
    let report = CheckReport::build(&base, &target);

    if json {
        output::print_json(&report)?;
    } else {
        print_human(&report, paths);
    }

    Ok(if report.has_errors() {
        Outcome::IssuesFound
    } else {
        Outcome::Clean
    })
}

fn print_human(report: &CheckReport, paths: &CatalogPaths) {
    println!("{}: {} keys", paths.base.display(), report.base_count);
    println!("{}: {} keys", paths.target.display(), report.target_count);

    if !report.keys.missing_in_target.is_empty() {
        println!(
            "\nMissing in {} ({} keys):",
            paths.target.display(),
            report.keys.missing_in_target.len()
        );
        output::print_capped(&report.keys.missing_in_target, KEY_LIST_LIMIT);
    }

    if !report.keys.missing_in_base.is_empty() {
        println!(
            "\nMissing in {} ({} keys):",
            paths.base.display(),
            report.keys.missing_in_base.len()
        );
        output::print_capped(&report.keys.missing_in_base, KEY_LIST_LIMIT);
    }

    print_duplicate_section(&paths.base, &report.base_duplicates);
    print_duplicate_section(&paths.target, &report.target_duplicates);
    print_mismatch_section(&report.parameter_mismatches);

    if report.has_errors() {
        if !report.keys.is_empty() {
            println!("\nRun 'lingo add-missing' to insert placeholder entries.");
        }
    } else if report.has_warnings() {
        println!("\nNo missing keys; duplicate values are advisory.");
    } else {
        println!("\nCatalogs are synchronized.");
    }
}
