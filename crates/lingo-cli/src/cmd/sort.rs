use crate::cmd::Outcome;
use crate::locate::CatalogPaths;
use crate::output;
use lingo_core::catalog::Catalog;
use lingo_core::write;

pub fn run(paths: &CatalogPaths, dry_run: bool, json: bool) -> anyhow::Result<Outcome> {
    let target = Catalog::load(&paths.target)?;
    let sorted = target.sorted();
    // IndexMap equality ignores order, so compare the serialized form.
    let changed = target.to_json_string()? != sorted.to_json_string()?;

    if json {
        output::print_json(&serde_json::json!({
            "changed": changed,
            "dry_run": dry_run,
        }))?;
    }

    if dry_run {
        if !json {
            if changed {
                println!("[dry run] would sort {}", paths.target.display());
            } else {
                println!("[dry run] {} already sorted", paths.target.display());
            }
        }
        return Ok(Outcome::Clean);
    }

    if changed {
        write::save(&sorted, &paths.target)?;
        if !json {
            println!(
                "Sorted {} ({} keys)",
                paths.target.display(),
                sorted.message_count()
            );
        }
    } else if !json {
        println!("{} already sorted", paths.target.display());
    }

    Ok(Outcome::Clean)
}
