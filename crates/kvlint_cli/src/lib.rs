#[macro_use]
mod macros;
mod panic_hook;

pub use self::panic_hook::*;

use anyhow::{Context, Result};
use kvlint_config::Config;
use kvlint_core::{Details, FieldOrder, FileSystem, Linter};
use log::info;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Everything a single run needs, already merged from flags.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The JSON validation results, `-` for stdin.
    pub results: PathBuf,
    /// Where to write the report, stdout if `None`.
    pub output: Option<PathBuf>,
    pub field_order: Option<FieldOrder>,
    pub base_dir: Option<PathBuf>,
    pub no_global_config: bool,
}

pub fn run(opts: &RunOptions) -> Result<()> {
    let config = Config::new(opts.no_global_config)?;
    let details = read_details(&opts.results)?;
    if details.is_empty() {
        lint_warn!("`{}` holds no validation results", opts.results.display());
    }

    let field_order = opts.field_order.unwrap_or(config.report.field_order);
    let sources = match opts.base_dir.as_ref().or_else(|| config.report.base_dir.as_ref()) {
        Some(base) => FileSystem::with_base(base),
        None => FileSystem::new(),
    };

    let linter = Linter::new(sources).field_order(field_order);
    let errors = linter.lint_errors(&details)?;
    info!(
        "{} diagnostics across {} validated files",
        errors.len(),
        details.len()
    );

    let mut report = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    if !report.is_empty() {
        report.push('\n');
    } else if let Some(path) = &opts.output {
        lint_note!("no diagnostics, `{}` will be empty", path.display());
    }
    write_report(opts.output.as_deref(), report.as_bytes())
}

/// Load the validation results keyed by file.
pub fn read_details(path: &Path) -> Result<Details> {
    let source = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read validation results from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read validation results `{}`", path.display()))?
    };
    parse_details(&source)
        .with_context(|| format!("invalid validation results `{}`", path.display()))
}

pub fn parse_details(source: &str) -> Result<Details> {
    Ok(serde_json::from_str(source)?)
}

fn write_report(output: Option<&Path>, report: &[u8]) -> Result<()> {
    match output {
        Some(path) => fs::write(path, report)
            .with_context(|| format!("failed to write report to `{}`", path.display())),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(report)?;
            lock.flush()?;
            Ok(())
        }
    }
}
