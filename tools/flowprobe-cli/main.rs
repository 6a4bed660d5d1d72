use clap::Parser;
use flowprobe::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit code when the test specification itself cannot be loaded.
const EXIT_FATAL: u8 = 2;

/// Workflow unit tester: runs declarative tests against an n8n-style engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the test specification (YAML, usually `*.utn8n`)
    suite: PathBuf,

    /// Command prefix that starts the engine CLI (e.g. "n8n" or "docker exec <cid> n8n")
    #[arg(long = "n8n", env = "N8N_CLI", default_value = "n8n")]
    engine_prefix: String,

    /// Timeout in seconds for webhook calls
    #[arg(long, default_value_t = 30)]
    webhook_timeout: u64,

    /// Log engine and command output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let suite = match TestSuite::from_file(&cli.suite) {
        Ok(suite) => suite,
        Err(e) => return exit_with_error(&e.to_string()),
    };
    info!(
        workflows = suite.workflows.len(),
        tests = suite.test_count(),
        "loaded test specification"
    );

    let config = RunnerConfig::default()
        .with_engine_prefix(cli.engine_prefix)
        .with_webhook_timeout(Duration::from_secs(cli.webhook_timeout));
    let runner = match TestRunner::from_config(&config) {
        Ok(runner) => runner,
        Err(e) => return exit_with_error(&e.to_string()),
    };

    let start = Instant::now();
    let tally = runner.run_suite(&suite, &mut ConsoleReporter);
    info!(elapsed = ?start.elapsed(), passed = tally.passed, total = tally.total, "suite finished");

    if tally.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "flowprobe=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ExitCode {
    eprintln!("\nError: {}", message);
    ExitCode::from(EXIT_FATAL)
}
