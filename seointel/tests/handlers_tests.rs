use async_trait::async_trait;
use seointel::handlers::*;
use seointel_core::analyzer::{AnalysisError, AnalysisInput, ReportSource, SeoReport};
use seointel_core::report::ReportFormat;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

const FIXTURE: &str = include_str!("../../seointel-analyzer/tests/fixtures/report.json");

struct CannedSource {
    fail_with: Option<fn() -> AnalysisError>,
    calls: AtomicUsize,
}

impl CannedSource {
    fn ok() -> Self {
        Self {
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(make: fn() -> AnalysisError) -> Self {
        Self {
            fail_with: Some(make),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ReportSource for CannedSource {
    async fn request(&self, _input: &AnalysisInput) -> Result<SeoReport, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with {
            Some(make) => Err(make()),
            None => Ok(serde_json::from_str(FIXTURE).unwrap()),
        }
    }
}

#[test]
fn test_normalize_target_with_scheme() {
    assert_eq!(
        normalize_target("https://crumb.example/menu"),
        Some("https://crumb.example/menu".to_string())
    );
    assert_eq!(
        normalize_target("http://crumb.example"),
        Some("http://crumb.example".to_string())
    );
}

#[test]
fn test_normalize_target_without_scheme() {
    assert_eq!(
        normalize_target("crumb.example"),
        Some("https://crumb.example".to_string())
    );
    assert_eq!(
        normalize_target("  www.crumb.example  "),
        Some("https://www.crumb.example".to_string())
    );
}

#[test]
fn test_normalize_target_invalid() {
    assert_eq!(normalize_target(""), None);
    assert_eq!(normalize_target("   "), None);
    assert_eq!(normalize_target("not a valid url!!!"), None);
}

#[test]
fn test_structured_stdout_suppresses_preamble() {
    assert!(stdout_is_report_only(ReportFormat::Json, None));
    assert!(stdout_is_report_only(ReportFormat::Markdown, None));
    assert!(!stdout_is_report_only(ReportFormat::Text, None));
    assert!(!stdout_is_report_only(ReportFormat::Json, Some(Path::new("audit.json"))));
    assert!(!stdout_is_report_only(ReportFormat::Markdown, Some(Path::new("audit.md"))));
}

#[test]
fn test_resolve_output_path_plain() {
    assert_eq!(
        resolve_output_path(Path::new("reports/crumb.md")),
        Path::new("reports/crumb.md")
    );
}

#[test]
fn test_resolve_output_path_tilde() {
    if std::env::var("HOME").is_err() {
        return;
    }
    let resolved = resolve_output_path(Path::new("~/crumb.md"));
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with("crumb.md"));
}

#[tokio::test]
async fn test_produce_report_markdown() {
    let source = CannedSource::ok();
    let input = AnalysisInput::new("https://crumb.example");

    let rendered = produce_report(&source, &input, ReportFormat::Markdown, false)
        .await
        .unwrap();

    assert!(rendered.starts_with("# SEO Intelligence Report: crumb.example"));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_produce_report_json() {
    let source = CannedSource::ok();
    let input = AnalysisInput::new("https://crumb.example");

    let rendered = produce_report(&source, &input, ReportFormat::Json, false)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["report"]["audit"]["healthScore"], 72);
}

#[tokio::test]
async fn test_missing_credential_message_is_descriptive() {
    let source = CannedSource::failing(|| AnalysisError::MissingCredential);
    let input = AnalysisInput::new("https://crumb.example");

    let message = produce_report(&source, &input, ReportFormat::Text, false)
        .await
        .unwrap_err();
    assert!(message.contains("API_KEY"));
}

#[tokio::test]
async fn test_analysis_failure_message_is_generic() {
    let source = CannedSource::failing(|| AnalysisError::ApiError {
        status: 500,
        body: "upstream exploded".to_string(),
    });
    let input = AnalysisInput::new("https://crumb.example");

    let message = produce_report(&source, &input, ReportFormat::Text, false)
        .await
        .unwrap_err();
    assert_eq!(
        message,
        "Failed to complete analysis. Please check the URL and try again."
    );
}
