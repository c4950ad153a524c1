use anyhow::Context;
use chrono::Utc;
use clap::{ArgAction, CommandFactory, Parser};
use grep_pdf_core::{
    CancellationToken, ErrorPolicy, LopdfExtractor, OutputFormat, Reporter, ScanCoordinator,
    ScanOptions, ScanReport, ScanStatus,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_USAGE: u8 = 1;
const EXIT_SCAN_ERROR: u8 = 2;
const EXIT_PARTIAL: u8 = 3;
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "grep-pdf",
    version,
    about = "Search the text rows of every PDF under a directory for a literal substring."
)]
struct Cli {
    /// Directory to scan recursively
    #[arg(long, env = "GREP_PDF_DIR", default_value = ".")]
    dir: String,

    /// Search text (case-sensitive, literal)
    #[arg(long, default_value = "")]
    text: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Show only HIT lines
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    only_hit: bool,

    /// Print every matching line with its page and line number
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Log each document as it is opened
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Skip unreadable documents instead of stopping
    #[arg(long, default_value_t = false)]
    keep_going: bool,
}

impl Cli {
    fn scan_root(&self) -> PathBuf {
        if self.dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.dir)
        }
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            search_text: self.text.clone(),
            verbose: self.verbose,
            only_hit: self.only_hit,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            error_policy: if self.keep_going {
                ErrorPolicy::BestEffort
            } else {
                ErrorPolicy::FailFast
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.text.is_empty() {
        let _ = Cli::command().write_help(&mut io::stderr());
        return ExitCode::from(EXIT_USAGE);
    }

    init_tracing(cli.debug);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        "grep-pdf boot"
    );

    match run(&cli) {
        Ok(report) => ExitCode::from(exit_code(&report)),
        Err(error) => {
            error!(error = %error, "scan failed");
            eprintln!("grep-pdf: {error:#}");
            ExitCode::from(EXIT_SCAN_ERROR)
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("grep_pdf=debug,grep_pdf_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<ScanReport> {
    let cancel = CancellationToken::new();
    register_signals(&cancel).context("failed to install signal handlers")?;

    let root = cli.scan_root();
    let options = cli.scan_options();
    let format = options.format;
    let coordinator = ScanCoordinator::new(LopdfExtractor, options).with_cancellation(cancel);

    let mut reporter = Reporter::new(io::stdout().lock(), format);
    let report = coordinator
        .run(&root, &mut reporter)
        .with_context(|| format!("scan of {} failed", root.display()))?;

    if report.status == ScanStatus::Cancelled {
        warn!(
            documents_scanned = report.documents_scanned,
            "scan cancelled"
        );
    }

    Ok(report)
}

/// First signal requests cancellation, a second one exits immediately.
#[cfg(unix)]
fn register_signals(cancel: &CancellationToken) -> io::Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};

    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register_conditional_shutdown(
            signal,
            i32::from(EXIT_CANCELLED),
            cancel.flag(),
        )?;
        signal_hook::flag::register(signal, cancel.flag())?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn register_signals(_cancel: &CancellationToken) -> io::Result<()> {
    Ok(())
}

fn exit_code(report: &ScanReport) -> u8 {
    match report.status {
        ScanStatus::Cancelled => EXIT_CANCELLED,
        ScanStatus::Completed if !report.skipped_files.is_empty() => EXIT_PARTIAL,
        ScanStatus::Completed => 0,
    }
}
