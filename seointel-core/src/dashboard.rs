//! Presentation model for a report.
//!
//! [`Dashboard::from_report`] is a pure mapping from a [`SeoReport`] to the
//! values the front ends draw: gauge geometry, metric cards with trends,
//! meters, table rows and source links. No front end applies thresholds of
//! its own; they all live here.

use seointel_analyzer::model::{Intent, LinkType, SeoReport};
use url::Url;

/// Circumference of the health ring, in stroke units
pub const GAUGE_CIRCUMFERENCE: f64 = 283.0;
/// Domain authority strictly above this is shown as strong
pub const AUTHORITY_STRONG_ABOVE: f64 = 40.0;
/// Toxic backlink share strictly below this percentage is healthy
pub const TOXIC_HEALTHY_BELOW: f64 = 10.0;
/// Speed score strictly above this is strong
pub const SPEED_STRONG_ABOVE: f64 = 80.0;
/// Backlinks from domains with authority strictly above this are highlighted
pub const BACKLINK_HIGHLIGHT_ABOVE: f64 = 50.0;
pub const SOURCE_TITLE_MAX_CHARS: usize = 40;
pub const ELLIPSIS: &str = "...";
pub const LEVEL_HIGH_ABOVE: f64 = 70.0;
pub const LEVEL_MEDIUM_ABOVE: f64 = 40.0;

pub const NO_ANCHOR: &str = "No anchor";
pub const NO_BACKLINKS: &str =
    "No specific detailed backlinks could be isolated for this report.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    fn when(strong: bool) -> Self {
        if strong { Trend::Up } else { Trend::Down }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "↑ Strong",
            Trend::Down => "↓ Needs Work",
        }
    }
}

/// Three-step scale for 0-100 metrics such as keyword difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn of(value: f64) -> Self {
        if value > LEVEL_HIGH_ABOVE {
            Level::High
        } else if value > LEVEL_MEDIUM_ABOVE {
            Level::Medium
        } else {
            Level::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthGauge {
    pub score: u8,
    pub stroke_offset: f64,
}

impl HealthGauge {
    pub fn new(score: u8) -> Self {
        Self {
            score,
            stroke_offset: gauge_offset(score),
        }
    }

    /// Filled share of the ring, 0.0 to 1.0
    pub fn ratio(&self) -> f64 {
        1.0 - self.stroke_offset / GAUGE_CIRCUMFERENCE
    }
}

/// Stroke offset of the health ring: full circumference at 0, zero at 100.
pub fn gauge_offset(score: u8) -> f64 {
    let score = f64::from(score.min(100));
    GAUGE_CIRCUMFERENCE - (GAUGE_CIRCUMFERENCE * score) / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: Option<String>,
    pub trend: Trend,
}

/// A 0-100 value drawn as a proportional bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meter {
    pub value: f64,
    pub level: Level,
}

impl Meter {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            level: Level::of(value),
        }
    }

    pub fn percent(&self) -> f64 {
        self.value.clamp(0.0, 100.0)
    }

    /// Number of filled cells out of `width`
    pub fn filled(&self, width: u16) -> u16 {
        ((self.percent() / 100.0) * f64::from(width)).round() as u16
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacklinkRow {
    pub url: String,
    pub anchor: String,
    pub authority: f64,
    pub highlighted: bool,
    pub link_type: LinkType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRow {
    pub term: String,
    pub volume: String,
    pub difficulty: Meter,
    pub competition: Meter,
    pub cpc: String,
    pub intent: Intent,
}

/// One bar of the competitor visibility chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub label: String,
    pub uri: String,
}

/// Everything a front end needs to draw one report
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    pub report: &'a SeoReport,
    pub gauge: HealthGauge,
    pub https_verified: bool,
    pub cards: Vec<MetricCard>,
    pub originality: Meter,
    pub backlinks: Vec<BacklinkRow>,
    pub competitors: Vec<Bar>,
    pub keywords: Vec<KeywordRow>,
    pub sources: Vec<SourceLink>,
}

impl<'a> Dashboard<'a> {
    pub fn from_report(report: &'a SeoReport) -> Self {
        let domain = &report.domain_info;
        let technical = &report.technical;
        let backlinks = &report.backlinks;

        let cards = vec![
            MetricCard {
                title: "Domain Authority",
                value: format_count(domain.authority),
                subtitle: Some(format!("Indexed Pages: {}", format_count(domain.indexed_pages))),
                trend: Trend::when(domain.authority > AUTHORITY_STRONG_ABOVE),
            },
            MetricCard {
                title: "Backlinks",
                value: format_count(backlinks.total),
                subtitle: Some(format!(
                    "Ref Domains: {}",
                    format_count(backlinks.referring_domains)
                )),
                trend: backlink_trend(backlinks.toxic_percentage),
            },
            MetricCard {
                title: "Core Web Vitals",
                value: format_count(technical.speed_score),
                subtitle: Some(format!("LCP: {}", technical.core_web_vitals.lcp)),
                trend: Trend::when(technical.speed_score > SPEED_STRONG_ABOVE),
            },
            MetricCard {
                title: "Mobile Friendly",
                value: if technical.mobile_friendly { "YES" } else { "NO" }.to_string(),
                subtitle: None,
                trend: Trend::when(technical.mobile_friendly),
            },
        ];

        let backlink_rows = backlinks
            .detailed_sources
            .iter()
            .map(|link| BacklinkRow {
                url: link.url.clone(),
                anchor: if link.anchor.trim().is_empty() {
                    NO_ANCHOR.to_string()
                } else {
                    link.anchor.clone()
                },
                authority: link.authority,
                highlighted: link.authority > BACKLINK_HIGHLIGHT_ABOVE,
                link_type: link.link_type,
            })
            .collect();

        let competitors = report
            .competitors
            .iter()
            .map(|c| Bar {
                label: c.name.clone(),
                value: c.authority,
            })
            .collect();

        let keywords = report
            .keywords
            .iter()
            .map(|k| KeywordRow {
                term: k.term.clone(),
                volume: k.volume.clone(),
                difficulty: Meter::new(k.difficulty),
                competition: Meter::new(k.competition),
                cpc: k.cpc.clone(),
                intent: k.intent,
            })
            .collect();

        let sources = report
            .sources
            .iter()
            .map(|s| SourceLink {
                label: truncate_title(&s.title),
                uri: s.uri.clone(),
            })
            .collect();

        Self {
            report,
            gauge: HealthGauge::new(report.health_score),
            https_verified: domain.https_status == "Secure",
            cards,
            originality: Meter::new(report.content.originality_score),
            backlinks: backlink_rows,
            competitors,
            keywords,
            sources,
        }
    }

    /// Largest competitor authority, at least 100, for scaling chart bars
    pub fn competitor_scale(&self) -> f64 {
        self.competitors
            .iter()
            .map(|bar| bar.value)
            .fold(100.0, f64::max)
    }
}

pub fn backlink_trend(toxic_percentage: f64) -> Trend {
    Trend::when(toxic_percentage < TOXIC_HEALTHY_BELOW)
}

/// Shorten a source title to [`SOURCE_TITLE_MAX_CHARS`] characters followed
/// by [`ELLIPSIS`]. Titles at or under the limit are returned unchanged.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > SOURCE_TITLE_MAX_CHARS {
        let head: String = title.chars().take(SOURCE_TITLE_MAX_CHARS).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        title.to_string()
    }
}

/// Format a number with thousands separators and at most three decimals,
/// e.g. `15230` -> `15,230`, `0.685` -> `0.685`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Host of the analyzed site for headings, falling back to the raw input.
pub fn target_host(url: &str) -> String {
    let trimmed = url.trim();
    Url::parse(trimmed)
        .ok()
        .filter(|u| u.host_str().is_some())
        .or_else(|| Url::parse(&format!("http://{}", trimmed)).ok())
        .and_then(|u| u.host_str().map(String::from))
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_extremes() {
        assert_eq!(gauge_offset(0), GAUGE_CIRCUMFERENCE);
        assert_eq!(gauge_offset(100), 0.0);
        assert_eq!(HealthGauge::new(100).ratio(), 1.0);
        assert_eq!(HealthGauge::new(0).ratio(), 0.0);
    }

    #[test]
    fn test_gauge_midpoint_and_clamp() {
        assert!((gauge_offset(50) - 141.5).abs() < 1e-9);
        assert_eq!(gauge_offset(250), 0.0);
    }

    #[test]
    fn test_backlink_trend_boundary() {
        assert_eq!(backlink_trend(9.0), Trend::Up);
        assert_eq!(backlink_trend(9.99), Trend::Up);
        assert_eq!(backlink_trend(10.0), Trend::Down);
        assert_eq!(backlink_trend(35.0), Trend::Down);
    }

    #[test]
    fn test_truncate_title_boundary() {
        let forty = "a".repeat(40);
        assert_eq!(truncate_title(&forty), forty);

        let forty_one = format!("{}b", forty);
        assert_eq!(truncate_title(&forty_one), format!("{}...", forty));
    }

    #[test]
    fn test_truncate_title_counts_chars() {
        let title = "é".repeat(41);
        let truncated = truncate_title(&title);
        assert_eq!(truncated.chars().count(), 43);
        assert!(truncated.starts_with(&"é".repeat(40)));
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(Level::of(40.0), Level::Low);
        assert_eq!(Level::of(40.5), Level::Medium);
        assert_eq!(Level::of(70.0), Level::Medium);
        assert_eq!(Level::of(71.0), Level::High);
    }

    #[test]
    fn test_meter_filled() {
        assert_eq!(Meter::new(50.0).filled(10), 5);
        assert_eq!(Meter::new(0.0).filled(10), 0);
        assert_eq!(Meter::new(100.0).filled(20), 20);
        assert_eq!(Meter::new(130.0).filled(10), 10);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(15230.0), "15,230");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(1234567.0), "1,234,567");
        assert_eq!(format_count(0.68), "0.68");
        assert_eq!(format_count(4.5), "4.5");
        assert_eq!(format_count(-2500.0), "-2,500");
        assert_eq!(format_count(0.0), "0");
    }

    #[test]
    fn test_target_host() {
        assert_eq!(target_host("https://crumb.example/about"), "crumb.example");
        assert_eq!(target_host("crumb.example"), "crumb.example");
        assert_eq!(target_host("  www.crumb.example  "), "www.crumb.example");
    }
}
