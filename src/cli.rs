//! Command-line interface for echocheck.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{self, LintConfig};
use crate::report;
use crate::rules::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Structural redundancy linter for PHP codebases.
///
/// Echocheck flags code that repeats what already exists: subclass methods
/// identical to the method they override, and array deduplication calls
/// that the surrounding counting call makes redundant. Findings are
/// advisory suggestions, not build blockers.
#[derive(Parser)]
#[command(name = "echocheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a file or directory
    #[command(visible_alias = "check")]
    Lint(LintArgs),
    /// Write a starter configuration file
    Init(InitArgs),
}

/// Arguments for the lint command.
#[derive(Parser)]
pub struct LintArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Exit non-zero when advisory findings are present
    #[arg(long)]
    pub fail_on_advisory: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "echocheck.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Run the lint command.
pub fn run_lint(args: &LintArgs) -> anyhow::Result<i32> {
    let config = load_config(args)?;
    let files = collect_php_files(&args.path);
    let result = Runner::new(config).run(&files)?;

    let shown = args.path.to_string_lossy();
    match args.format.as_str() {
        "pretty" => report::write_pretty(&shown, &result),
        "json" => report::write_json(&shown, &result)?,
        other => anyhow::bail!("unknown output format: {}", other),
    }

    let failed = result.has_errors() || (args.fail_on_advisory && !result.diagnostics.is_empty());
    Ok(if failed { EXIT_FAILED } else { EXIT_SUCCESS })
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }
    std::fs::write(&args.output, config::CONFIG_TEMPLATE)?;
    println!("wrote {}", args.output.display());
    Ok(EXIT_SUCCESS)
}

fn load_config(args: &LintArgs) -> anyhow::Result<LintConfig> {
    if let Some(path) = &args.config {
        return LintConfig::parse_file(path);
    }
    let dir = if args.path.is_dir() {
        args.path.clone()
    } else {
        args.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    };
    match LintConfig::discover(&dir) {
        Some(found) => LintConfig::parse_file(found),
        None => Ok(LintConfig::default()),
    }
}

/// Collect PHP files under a path, sorted for deterministic output.
pub fn collect_php_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("php"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}
