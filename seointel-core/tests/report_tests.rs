// Tests for report rendering and saving

use seointel_core::analyzer::SeoReport;
use seointel_core::analyzer::model::Source;
use seointel_core::report::{
    ReportFormat, generate_json_report, generate_markdown_report, generate_text_report, render,
    save_report,
};
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../seointel-analyzer/tests/fixtures/report.json");
const TARGET: &str = "https://crumb.example/";

fn sample_report() -> SeoReport {
    serde_json::from_str(FIXTURE).unwrap()
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_name() {
    assert_eq!(ReportFormat::from_name("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_name("JSON"), Some(ReportFormat::Json));
    assert_eq!(ReportFormat::from_name("md"), Some(ReportFormat::Markdown));
    assert_eq!(ReportFormat::from_name("Markdown"), Some(ReportFormat::Markdown));
    assert_eq!(ReportFormat::from_name("pdf"), None);
}

#[test]
fn test_every_format_renders() {
    let report = sample_report();
    for name in ReportFormat::NAMES {
        let format = ReportFormat::from_name(name).unwrap();
        let rendered = render(format, TARGET, &report).unwrap();
        assert!(!rendered.is_empty(), "{} output is empty", name);
    }
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_text_report_sections() {
    let report = sample_report();
    let text = generate_text_report(TARGET, &report);

    assert!(text.contains("SEO INTELLIGENCE REPORT"));
    assert!(text.contains("crumb.example"));
    assert!(text.contains("HTTPS Verified"));
    assert!(text.contains("15,230"));
    assert!(text.contains("No anchor"));
    assert!(text.contains("Missing meta descriptions"));
    assert!(text.contains("Foundation"));
    assert!(!text.contains("SOURCES"));
}

#[test]
fn test_text_report_empty_backlinks() {
    let mut report = sample_report();
    report.backlinks.detailed_sources.clear();
    let text = generate_text_report(TARGET, &report);
    assert!(text.contains("No specific detailed backlinks could be isolated for this report."));
}

#[test]
fn test_text_report_lists_sources() {
    let mut report = sample_report();
    report.sources.push(Source {
        title: "A very long article title about artisan bread and sourdough".to_string(),
        uri: "https://moz.example/crumb".to_string(),
    });

    let text = generate_text_report(TARGET, &report);
    assert!(text.contains("SOURCES"));
    assert!(text.contains("A very long article title about artisan ..."));
    assert!(text.contains("https://moz.example/crumb"));
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_report_structure() {
    let report = sample_report();
    let json = generate_json_report(TARGET, &report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let metadata = &value["report"]["metadata"];
    assert_eq!(metadata["generator"], "SEO Intel");
    assert_eq!(metadata["format"], "json");
    assert_eq!(metadata["model"], "gemini-3-pro-preview");
    assert_eq!(metadata["target"], TARGET);
    assert!(metadata["generated_at"].is_string());

    let audit = &value["report"]["audit"];
    assert_eq!(audit["healthScore"], 72);
    assert_eq!(audit["backlinks"]["detailedSources"][1]["type"], "nofollow");
    assert!(audit["sources"].as_array().unwrap().is_empty());
}

#[test]
fn test_json_audit_round_trips_to_report() {
    let report = sample_report();
    let json = generate_json_report(TARGET, &report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let parsed: SeoReport = serde_json::from_value(value["report"]["audit"].clone()).unwrap();
    assert_eq!(parsed, report);
}

// ============================================================================
// Markdown
// ============================================================================

#[test]
fn test_markdown_report() {
    let report = sample_report();
    let md = generate_markdown_report(TARGET, &report);

    assert!(md.starts_with("# SEO Intelligence Report: crumb.example"));
    assert!(md.contains("**Health Score:** 72/100"));
    assert!(md.contains("**HTTPS Verified**"));
    assert!(md.contains("| Domain Authority | 47 | Indexed Pages: 1,840 | ↑ Strong |"));
    assert!(md.contains("| **58** |"));
    assert!(md.contains("| No anchor |"));
    assert!(md.contains("1. **[Critical]** Missing meta descriptions"));
    assert!(!md.contains("## Sources"));
}

#[test]
fn test_markdown_sources_are_links() {
    let mut report = sample_report();
    report.sources.push(Source {
        title: "Crumb on Moz".to_string(),
        uri: "https://moz.example/crumb".to_string(),
    });

    let md = generate_markdown_report(TARGET, &report);
    assert!(md.contains("## Sources"));
    assert!(md.contains("- [Crumb on Moz](https://moz.example/crumb)"));
}

// ============================================================================
// Saving
// ============================================================================

#[test]
fn test_save_report() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("report.md");

    let content = generate_markdown_report(TARGET, &sample_report());
    save_report(&content, &path)?;

    assert_eq!(std::fs::read_to_string(&path)?, content);
    Ok(())
}

#[test]
fn test_save_report_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("report.txt");
    assert!(save_report("content", &path).is_err());
}
