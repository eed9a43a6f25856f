use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, MultiSelect};
use humansize::{format_size, BINARY};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use logless::cleaner::{CleanError, CleanReport, EntryKind, ExclusionSet, FileSystem, LocalFs, TreeCleaner};
use logless::Config;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Remove console.log statements from JavaScript, TypeScript, Vue, Svelte and Rust sources",
    long_about = None
)]
struct Args {
    /// Project directory to clean (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Directory name to skip at any depth (repeatable)
    #[arg(long, short, value_name = "NAME")]
    exclude: Vec<String>,

    /// Do not exclude node_modules by default
    #[arg(long)]
    no_default_excludes: bool,

    /// Do not prompt for exclusions or confirmation
    #[arg(long, short)]
    yes: bool,

    /// Report what would be removed without rewriting any file
    #[arg(long)]
    dry_run: bool,

    /// Log every directory and list each modified file
    #[arg(long, short)]
    verbose: bool,

    /// Config file (defaults to <config dir>/logless/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::fmt;

    let default_filter = if verbose { "logless=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Offer the root's immediate subdirectories for exclusion.
/// Returns `None` if the user cancelled.
fn select_exclusions(root: &Path, excluded: &ExclusionSet) -> Result<Option<Vec<String>>> {
    let candidates: Vec<String> = LocalFs
        .list_entries(root)?
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Dir)
        .filter_map(|entry| entry.name.into_string().ok())
        .filter(|name| !excluded.contains(name))
        .collect();

    if candidates.is_empty() {
        return Ok(Some(Vec::new()));
    }

    let selection = MultiSelect::new()
        .with_prompt("Select the directories to exclude from cleaning")
        .items(&candidates)
        .interact_opt()
        .context("Failed to read directory selection")?;

    Ok(selection.map(|indices| indices.into_iter().map(|i| candidates[i].clone()).collect()))
}

fn confirm_clean(root: &Path, excluded: &ExclusionSet) -> Result<bool> {
    let skipped = if excluded.is_empty() {
        "nothing".to_string()
    } else {
        excluded.names().join(", ")
    };

    let prompt = format!(
        "Remove all console.log statements under {} (excluding {})? This cannot be undone.",
        root.display(),
        skipped
    );

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn print_summary(report: &CleanReport, dry_run: bool, verbose: bool) {
    if verbose {
        for path in &report.modified {
            println!("  - {}", path.display());
        }
    }

    println!(
        "Scanned {} files in {} directories ({} excluded)",
        report.files_scanned, report.dirs_visited, report.dirs_excluded
    );

    if report.is_clean() {
        println!("{}", "No console.log statements found.".green());
        return;
    }

    let verb = if dry_run { "Would remove" } else { "Removed" };
    println!(
        "{} {} console.log statements from {} files ({})",
        verb,
        report.statements_removed.to_string().bold(),
        report.files_modified.to_string().bold(),
        format_size(report.bytes_removed, BINARY)
    );

    if dry_run {
        println!("Dry run mode: No files were modified.");
    } else {
        println!("{}", "LogLess: Cleaned up console.log statements.".green());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match LocalFs.kind(&args.path)? {
        Some(EntryKind::Dir) => {}
        Some(_) => return Err(CleanError::NotADirectory { path: args.path }.into()),
        None => return Err(CleanError::DirectoryNotFound { path: args.path }.into()),
    }

    let mut excluded = config.exclusions(!args.no_default_excludes);
    excluded.extend(args.exclude.iter().cloned());

    let interactive = !args.yes && io::stdin().is_terminal();

    if interactive && args.exclude.is_empty() {
        match select_exclusions(&args.path, &excluded)? {
            Some(names) => excluded.extend(names),
            None => {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    if !args.yes && !args.dry_run && config.confirm {
        if !interactive {
            bail!("Refusing to rewrite files without confirmation; pass --yes to skip the prompt");
        }
        if !confirm_clean(&args.path, &excluded)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let report = TreeCleaner::local()
        .with_dry_run(args.dry_run)
        .clean(&args.path, &excluded)
        .with_context(|| format!("Cleaning {} failed", args.path.display()))?;

    print_summary(&report, args.dry_run, args.verbose);

    Ok(())
}
