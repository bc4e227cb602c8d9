mod cmd;
mod locate;
mod output;

use clap::{Parser, Subcommand};
use cmd::Outcome;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "lingo",
    about = "Message catalog reconciliation — keep a pair of locale files in sync",
    version,
    propagate_version = true
)]
struct Cli {
    /// Base (authoritative) catalog file (default: auto-detect)
    #[arg(long, global = true, env = "LINGO_BASE")]
    base: Option<PathBuf>,

    /// Target catalog file (default: auto-detect)
    #[arg(long, global = true, env = "LINGO_TARGET")]
    target: Option<PathBuf>,

    /// Directory holding the catalog files (default: walk up from cwd)
    #[arg(long, global = true, env = "LINGO_MESSAGES_DIR")]
    messages_dir: Option<PathBuf>,

    /// Base locale, resolved as <messages-dir>/<locale>.json
    #[arg(long, global = true, default_value = "en")]
    base_locale: String,

    /// Target locale, resolved as <messages-dir>/<locale>.json
    #[arg(long, global = true, default_value = "sv")]
    target_locale: String,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report missing keys, duplicate values, and parameter mismatches
    Check,

    /// Insert placeholder entries for keys missing from the target catalog
    AddMissing {
        /// Placeholder value for inserted keys
        #[arg(long, default_value = "[TODO: translate]")]
        placeholder: String,

        /// Also sort keys before writing
        #[arg(long)]
        sort: bool,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Add missing keys, sort, and report naming-convention fixes
    Fix {
        /// Placeholder value for inserted keys
        #[arg(long, default_value = "[TODO: translate]")]
        placeholder: String,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Rewrite the target catalog with keys sorted ($schema stays first)
    Sort {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Run naming, duplicate, and parameter checks, plus an optional compile step
    Validate {
        /// Shell command that compiles the catalogs (check skipped when absent)
        #[arg(long)]
        compile_command: Option<String>,

        /// Timeout for the compile command, in seconds
        #[arg(long, default_value = "60")]
        compile_timeout: u64,
    },

    /// Reconcile catalog keys against m.key references in source files
    Usage {
        /// Directory to scan for source files
        #[arg(long, default_value = "src")]
        scan: PathBuf,

        /// File extensions to scan (repeatable)
        #[arg(long = "ext", default_value = "svelte")]
        extensions: Vec<String>,

        /// Maximum entries to print per category
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let paths = locate::resolve(&locate::Overrides {
        base: cli.base.as_deref(),
        target: cli.target.as_deref(),
        messages_dir: cli.messages_dir.as_deref(),
        base_locale: &cli.base_locale,
        target_locale: &cli.target_locale,
    });

    let result = match cli.command {
        Commands::Check => cmd::check::run(&paths, cli.json),
        Commands::AddMissing {
            placeholder,
            sort,
            dry_run,
        } => cmd::add_missing::run(&paths, &placeholder, sort, dry_run, cli.json),
        Commands::Fix {
            placeholder,
            dry_run,
        } => cmd::fix::run(&paths, &placeholder, dry_run, cli.json),
        Commands::Sort { dry_run } => cmd::sort::run(&paths, dry_run, cli.json),
        Commands::Validate {
            compile_command,
            compile_timeout,
        } => cmd::validate::run(&paths, compile_command.as_deref(), compile_timeout, cli.json),
        Commands::Usage {
            scan,
            extensions,
            limit,
        } => cmd::usage::run(&paths, &scan, &extensions, limit, cli.json),
    };

    match result {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::IssuesFound) => ExitCode::from(1),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
