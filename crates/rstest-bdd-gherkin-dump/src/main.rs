//! Command-line dumper for Gherkin feature files.
//!
//! Prints the parsed document, the token stream or the resolved steps of
//! each file on stdout. Diagnostics go to stderr.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use rstest_bdd_gherkin_dump::Dumper;
use rstest_bdd_gherkin_dump::collect_feature_files;
use rstest_bdd_gherkin_dump::config::{DumpConfig, LogLevel, OutputFormat};
use rstest_bdd_gherkin_dump::error::DumpError;
use rstest_bdd_gherkin_dump::logging::init_logging;

/// Dump how Gherkin feature files are lexed and parsed.
#[derive(Parser, Debug)]
#[command(name = "gherkin-dump", version, about)]
struct Args {
    /// Language for files without a `# language:` directive.
    #[arg(long)]
    language: Option<String>,

    /// JSON keyword table replacing the built-in languages.
    #[arg(long, value_name = "FILE")]
    keywords: Option<PathBuf>,

    /// Output format (json, tokens, steps).
    #[arg(long, default_value = "json")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Feature files or directories containing them.
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&DumpConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    let dumper = match Dumper::new(&config) {
        Ok(dumper) => dumper,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    info!(
        version = env!("CARGO_PKG_VERSION"),
        language = dumper.language(),
        "starting gherkin-dump"
    );

    match run(&dumper, &args.paths) {
        Ok(0) => {}
        Ok(failed) => {
            tracing::error!(failed, "some feature files could not be dumped");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "dump aborted");
            std::process::exit(1);
        }
    }
}

fn build_config(args: &Args) -> Result<DumpConfig, DumpError> {
    let config = DumpConfig::from_env()?;
    Ok(config
        .apply_overrides(args.log_level, args.language.clone(), args.keywords.clone())
        .with_format(args.format))
}

/// Dump every file under `paths`, returning how many failed.
fn run(dumper: &Dumper, paths: &[PathBuf]) -> eyre::Result<usize> {
    let files = collect_feature_files(paths)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0;
    for path in &files {
        info!(path = %path.display(), "dumping");
        if let Err(e) = dumper.dump_file(path, &mut out) {
            tracing::error!(path = %path.display(), error = %e, "failed to dump feature");
            failed += 1;
        }
    }
    out.flush()?;
    Ok(failed)
}
