use kvlint_cli::{lint_err, RunOptions};
use kvlint_core::FieldOrder;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "kvlint",
    about = "Report validation results as file:line:column diagnostics"
)]
pub(crate) struct Options {
    /// A JSON file mapping each manifest to its validation results, `-` reads stdin.
    #[structopt(default_value = "-", parse(from_os_str))]
    results: PathBuf,
    /// Write the report to this file instead of stdout.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// How fields sharing a position are ordered, either "lexical" or "first-seen".
    #[structopt(long)]
    field_order: Option<FieldOrder>,
    /// Resolve relative manifest names against this directory.
    #[structopt(long, parse(from_os_str))]
    base_dir: Option<PathBuf>,
    /// Do not look for a config in the user's config directory.
    #[structopt(long)]
    no_global_config: bool,
    /// Log what the linter is doing to stderr.
    #[structopt(short, long)]
    verbose: bool,
}

fn main() {
    #[cfg(not(debug_assertions))]
    std::panic::set_hook(Box::new(kvlint_cli::panic_hook));

    let opt = Options::from_args();

    let filter = if opt.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let run = RunOptions {
        results: opt.results,
        output: opt.output,
        field_order: opt.field_order,
        base_dir: opt.base_dir,
        no_global_config: opt.no_global_config,
    };

    if let Err(err) = kvlint_cli::run(&run) {
        lint_err!("{:#}", err);
        std::process::exit(1);
    }
}
