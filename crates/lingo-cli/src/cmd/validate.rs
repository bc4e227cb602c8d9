use crate::cmd::{print_duplicate_section, print_mismatch_section, Outcome};
use crate::locate::CatalogPaths;
use crate::output;
use lingo_core::catalog::Catalog;
use lingo_core::compile::{Compiler, ShellCompiler};
use lingo_core::naming::NamingViolation;
use lingo_core::report::{self, ValidationReport};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn run(
    paths: &CatalogPaths,
    compile_command: Option<&str>,
    compile_timeout: u64,
    json: bool,
) -> anyhow::Result<Outcome> {
    let base = Catalog::load(&paths.base)?;
    let target = Catalog::load(&paths.target)?;

    let compiler = compile_command.map(|command| ShellCompiler {
        command: command.to_string(),
        cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        timeout: Duration::from_secs(compile_timeout),
    });
    let report = report::run_validation(
        &base,
        &target,
        compiler.as_ref().map(|c| c as &dyn Compiler),
    );

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

fn print_human(report: &ValidationReport, paths: &CatalogPaths) {
    print_naming_section(&paths.base, &report.base_naming);
    print_naming_section(&paths.target, &report.target_naming);
    print_mismatch_section(&report.parameter_mismatches);

    if let Some(compile) = &report.compile {
        if compile.passed {
            println!("\nCompile check passed ({} ms)", compile.duration_ms);
        } else {
            println!("\nCompile check FAILED ({} ms):", compile.duration_ms);
            for line in compile.output.lines() {
                println!("   {line}");
            }
        }
    }

    print_duplicate_section(&paths.base, &report.base_duplicates);
    print_duplicate_section(&paths.target, &report.target_duplicates);

    let errors = report.base_naming.len()
        + report.target_naming.len()
        + report.parameter_mismatches.len()
        + report.compile.as_ref().map_or(0, |c| usize::from(!c.passed));
    let warnings = report.base_duplicates.len() + report.target_duplicates.len();

    if errors == 0 && warnings == 0 {
        println!("All checks passed.");
    } else {
        println!("\n{errors} error(s), {warnings} warning group(s)");
    }
}

fn print_naming_section(path: &Path, violations: &[NamingViolation]) {
    if violations.is_empty() {
        return;
    }
    println!(
        "\nInvalid naming in {} ({} keys):",
        path.display(),
        violations.len()
    );
    for v in violations {
        println!("   - {} -> {}", v.key, v.suggestion);
    }
}
