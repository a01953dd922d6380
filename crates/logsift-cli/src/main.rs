//! logsift - CI build log triage CLI
//!
//! Fetches the Jenkins log of every configured target and reports either a
//! stage-level infrastructure failure or a rerun-adjusted pytest summary.
//!
//! ## Exit status
//!
//! - `0`: every target was processed (individual targets may have failed)
//! - `1`: the target configuration could not be loaded
//! - `2`: invalid arguments, including missing `JENKINS_USER` / `JENKINS_TOKEN`

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use logsift_core::reporting::{render_json, render_target_report};
use logsift_core::{
    load_targets, BatchAnalyzer, LogClassifier, ReportSink, StageFailureDetector, TargetReport,
    DEFAULT_PATTERNS_FILE,
};
use logsift_jenkins::{JenkinsClient, JenkinsConfig};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "logsift")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Analyze logs from Jenkins builds for pytest results or stage failures",
    long_about = None
)]
struct Cli {
    /// Base URL of the Jenkins instance
    jenkins_url: String,

    /// Path to the JSON target configuration file
    config_file: PathBuf,

    /// Path to the JSON file with stage failure patterns
    #[arg(long, default_value = DEFAULT_PATTERNS_FILE)]
    error_patterns: PathBuf,

    /// Jenkins user name
    #[arg(long, env = "JENKINS_USER", hide_env_values = true)]
    jenkins_user: String,

    /// Jenkins API token
    #[arg(long, env = "JENKINS_TOKEN", hide_env_values = true)]
    jenkins_token: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Report output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Writes each target report as soon as the batch produces it.
struct ConsoleReporter<W> {
    out: W,
    format: ReportFormat,
}

impl<W: Write> ConsoleReporter<W> {
    fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }
}

impl<W: Write> ReportSink for ConsoleReporter<W> {
    fn emit(&mut self, report: &TargetReport) {
        let rendered = match self.format {
            ReportFormat::Text => render_target_report(report),
            ReportFormat::Json => match render_json(report) {
                Ok(json) => json + "\n",
                Err(e) => {
                    warn!(index = report.index, error = %e, "Failed to serialize report");
                    return;
                }
            },
        };
        if let Err(e) = self.out.write_all(rendered.as_bytes()) {
            warn!(index = report.index, error = %e, "Failed to write report");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    logsift_core::init_tracing(cli.json_logs, level);

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let entries = load_targets(&cli.config_file).context("Failed to load target configuration")?;
    if entries.is_empty() {
        println!("No analysis targets found.");
        return Ok(());
    }

    let detector = StageFailureDetector::load(&cli.error_patterns);

    let config = JenkinsConfig::new(&cli.jenkins_url, &cli.jenkins_user, &cli.jenkins_token)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = JenkinsClient::new(config).context("Failed to create Jenkins client")?;

    let analyzer = BatchAnalyzer::new(client, LogClassifier::new(detector));
    let mut reporter = ConsoleReporter::new(std::io::stdout().lock(), cli.format);
    let summary = analyzer.run_all(&entries, &mut reporter).await;

    info!(
        targets = entries.len(),
        classified = summary.classified,
        stage_failures = summary.stage_failures,
        skipped = summary.skipped,
        failed = summary.failed,
        "Analysis complete"
    );
    Ok(())
}
