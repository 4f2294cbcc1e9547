// Tests for the report presentation model

use seointel_core::analyzer::SeoReport;
use seointel_core::analyzer::model::{LinkType, Source};
use seointel_core::dashboard::*;

const FIXTURE: &str = include_str!("../../seointel-analyzer/tests/fixtures/report.json");

fn sample_report() -> SeoReport {
    serde_json::from_str(FIXTURE).unwrap()
}

#[test]
fn test_fixture_dashboard() {
    let report = sample_report();
    let view = Dashboard::from_report(&report);

    assert_eq!(view.gauge.score, 72);
    assert!((view.gauge.stroke_offset - (283.0 - 283.0 * 72.0 / 100.0)).abs() < 1e-9);
    assert!(view.https_verified);
    assert_eq!(view.cards.len(), 4);
    assert_eq!(view.competitors.len(), 2);
    assert_eq!(view.keywords.len(), 3);
    assert!(view.sources.is_empty());
}

#[test]
fn test_metric_cards() {
    let report = sample_report();
    let view = Dashboard::from_report(&report);

    let authority = &view.cards[0];
    assert_eq!(authority.title, "Domain Authority");
    assert_eq!(authority.value, "47");
    assert_eq!(authority.subtitle.as_deref(), Some("Indexed Pages: 1,840"));
    assert_eq!(authority.trend, Trend::Up);

    let backlinks = &view.cards[1];
    assert_eq!(backlinks.value, "15,230");
    assert_eq!(backlinks.subtitle.as_deref(), Some("Ref Domains: 412"));
    assert_eq!(backlinks.trend, Trend::Up);

    let vitals = &view.cards[2];
    assert_eq!(vitals.subtitle.as_deref(), Some("LCP: 2.1s"));
    assert_eq!(vitals.trend, Trend::Up);

    let mobile = &view.cards[3];
    assert_eq!(mobile.value, "YES");
    assert_eq!(mobile.trend.label(), "↑ Strong");
}

#[test]
fn test_weak_metrics_trend_down() {
    let mut report = sample_report();
    report.domain_info.authority = 40.0;
    report.backlinks.toxic_percentage = 10.0;
    report.technical.speed_score = 80.0;
    report.technical.mobile_friendly = false;

    let view = Dashboard::from_report(&report);
    for card in &view.cards {
        assert_eq!(card.trend, Trend::Down, "{} should need work", card.title);
        assert_eq!(card.trend.label(), "↓ Needs Work");
    }
    assert_eq!(view.cards[3].value, "NO");
}

#[test]
fn test_toxic_percentage_nine_is_healthy() {
    let mut report = sample_report();
    report.backlinks.toxic_percentage = 9.0;
    let view = Dashboard::from_report(&report);
    assert_eq!(view.cards[1].trend, Trend::Up);
}

#[test]
fn test_https_badge_requires_exact_secure() {
    let mut report = sample_report();
    report.domain_info.https_status = "secure".to_string();
    assert!(!Dashboard::from_report(&report).https_verified);

    report.domain_info.https_status = "Not Secure".to_string();
    assert!(!Dashboard::from_report(&report).https_verified);
}

#[test]
fn test_backlink_rows() {
    let report = sample_report();
    let view = Dashboard::from_report(&report);

    assert_eq!(view.backlinks.len(), 2);
    assert!(view.backlinks[0].highlighted);
    assert_eq!(view.backlinks[0].anchor, "best sourdough in town");
    assert!(!view.backlinks[1].highlighted);
    assert_eq!(view.backlinks[1].anchor, NO_ANCHOR);
    assert_eq!(view.backlinks[1].link_type, LinkType::Nofollow);
}

#[test]
fn test_backlink_highlight_boundary() {
    let mut report = sample_report();
    report.backlinks.detailed_sources[0].authority = 50.0;
    let view = Dashboard::from_report(&report);
    assert!(!view.backlinks[0].highlighted);
}

#[test]
fn test_keyword_meters() {
    let report = sample_report();
    let view = Dashboard::from_report(&report);

    assert_eq!(view.keywords[0].difficulty.level, Level::Low);
    assert_eq!(view.keywords[0].competition.level, Level::High);
    assert_eq!(view.keywords[1].difficulty.level, Level::Medium);
    assert_eq!(view.keywords[2].competition.level, Level::Medium);
    assert_eq!(view.keywords[1].difficulty.filled(100), 61);
}

#[test]
fn test_competitor_bars() {
    let report = sample_report();
    let view = Dashboard::from_report(&report);

    assert_eq!(view.competitors[0].label, "crumbandco.example");
    assert_eq!(view.competitors[0].value, 55.0);
    assert_eq!(view.competitor_scale(), 100.0);
}

#[test]
fn test_sources_truncated() {
    let mut report = sample_report();
    report.sources = vec![
        Source {
            title: "a".repeat(41),
            uri: "https://one.example".to_string(),
        },
        Source {
            title: "b".repeat(40),
            uri: "https://two.example".to_string(),
        },
    ];

    let view = Dashboard::from_report(&report);
    assert_eq!(view.sources[0].label, format!("{}...", "a".repeat(40)));
    assert_eq!(view.sources[1].label, "b".repeat(40));
    assert_eq!(view.sources[1].uri, "https://two.example");
}

#[test]
fn test_empty_report_sections_render() {
    let mut report = sample_report();
    report.backlinks.detailed_sources.clear();
    report.competitors.clear();
    report.keywords.clear();

    let view = Dashboard::from_report(&report);
    assert!(view.backlinks.is_empty());
    assert!(view.competitors.is_empty());
    assert_eq!(view.competitor_scale(), 100.0);
}

#[test]
fn test_gauge_offset_bounds() {
    assert_eq!(gauge_offset(0), 283.0);
    assert_eq!(gauge_offset(100), 0.0);
}
