use clap::ArgMatches;
use colored::Colorize;
use pager::Pager;
use seointel_core::analysis::execute_analysis;
use seointel_core::analyzer::schema::report_schema;
use seointel_core::analyzer::{AnalysisInput, ReportSource};
use seointel_core::config::Settings;
use seointel_core::report::{self, ReportFormat};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Normalize a user-supplied target, adding `https://` when no scheme is
/// given. Returns `None` for blank or unparseable input.
pub fn normalize_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Try to parse as-is
    if let Ok(url) = Url::parse(trimmed)
        && url.host_str().is_some()
    {
        return Some(trimmed.to_string());
    }

    // Try adding https://
    let with_scheme = format!("https://{}", trimmed);
    match Url::parse(&with_scheme) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => Some(with_scheme),
        _ => None,
    }
}

/// Expand a leading `~` in an output path
pub fn resolve_output_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Run one analysis and render it. On failure returns the message to show
/// the user: the descriptive text for configuration problems, the generic
/// one for everything else.
pub async fn produce_report(
    source: &dyn ReportSource,
    input: &AnalysisInput,
    format: ReportFormat,
    show_spinner: bool,
) -> Result<String, String> {
    let audit = execute_analysis(source, input, show_spinner)
        .await
        .map_err(|e| e.user_message())?;

    report::render(format, &input.url, &audit).map_err(|e| format!("Failed to render report: {}", e))
}

/// True when stdout carries a JSON or Markdown report, which must stay
/// parseable: no banner, no preamble.
pub fn stdout_is_report_only(format: ReportFormat, output: Option<&Path>) -> bool {
    format != ReportFormat::Text && output.is_none()
}

/// Report format chosen on the `analyze` command line
pub fn selected_format(args: &ArgMatches) -> ReportFormat {
    args.get_one::<String>("format")
        .and_then(|name| ReportFormat::from_name(name))
        .unwrap_or(ReportFormat::Text)
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings and errors)
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Log to a file; the terminal belongs to the dashboard while it runs
fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

pub async fn handle_analyze(args: &ArgMatches, quiet: bool) {
    init_logging();

    let raw_url = args.get_one::<String>("url").map(String::as_str).unwrap_or_default();
    let Some(url) = normalize_target(raw_url) else {
        eprintln!("{} Invalid URL '{}'", "✗".red().bold(), raw_url);
        std::process::exit(1);
    };

    let mut input = AnalysisInput::new(url);
    if let Some(location) = args.get_one::<String>("location") {
        input = input.with_location(location.as_str());
    }
    if let Some(industry) = args.get_one::<String>("industry") {
        input = input.with_industry(industry.as_str());
    }

    let format = selected_format(args);
    let output = args.get_one::<PathBuf>("output").map(|p| resolve_output_path(p));
    let preamble = !quiet && !stdout_is_report_only(format, output.as_deref());

    let settings = Settings::from_env();
    let analyzer = match settings.analyzer() {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e.user_message());
            std::process::exit(1);
        }
    };

    if preamble {
        println!("{} Target:   {}", "→".blue(), input.url.bright_white());
        println!("{} Location: {}", "→".blue(), input.location_or_default());
        println!("{} Industry: {}\n", "→".blue(), input.industry_or_default());
    }

    // Files get plain text
    if output.is_some() {
        colored::control::set_override(false);
    }

    let rendered = match produce_report(&analyzer, &input, format, !quiet).await {
        Ok(rendered) => rendered,
        Err(message) => {
            colored::control::unset_override();
            eprintln!("{} {}", "✗".red().bold(), message);
            std::process::exit(1);
        }
    };

    match output {
        Some(path) => {
            colored::control::unset_override();
            if let Err(e) = report::save_report(&rendered, &path) {
                eprintln!("{} Failed to save report to {}: {}", "✗".red().bold(), path.display(), e);
                std::process::exit(1);
            }
            info!("Report written to {}", path.display());
            println!("{} Report saved to {}", "✓".green().bold(), path.display().to_string().bright_white());
        }
        None if format == ReportFormat::Text => {
            Pager::with_pager("less -R").setup();
            print!("{}", rendered);
        }
        None => println!("{}", rendered),
    }
}

pub async fn handle_ui() {
    let settings = Settings::from_env();

    if let Some(path) = settings.tui_log.as_deref()
        && let Err(e) = init_file_logging(Path::new(path))
    {
        eprintln!("{} Cannot open log file {}: {}", "⚠".yellow(), path, e);
    }

    let analyzer = match settings.analyzer() {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
    };

    let source: Arc<dyn ReportSource> = Arc::new(analyzer);
    let handle = Handle::current();

    match tokio::task::spawn_blocking(move || seointel_tui::run(source, handle)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error running TUI: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn handle_schema() {
    println!("{}", report_schema());
}

