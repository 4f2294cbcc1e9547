// Report screen: tabbed pages over the dashboard view model

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Gauge, Paragraph, Row, Table, Tabs, Wrap},
};
use seointel_core::analyzer::SeoReport;
use seointel_core::analyzer::model::{LinkType, Priority};
use seointel_core::dashboard::{
    Dashboard, Level, MetricCard, Meter, NO_BACKLINKS, Trend, format_count, target_host,
};

const METER_WIDTH: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    Market,
    Backlinks,
    Strategy,
    Sources,
}

impl Page {
    /// Pages shown for `report`; the sources page only when there are citations
    pub fn for_report(report: &SeoReport) -> Vec<Page> {
        let mut pages = vec![Page::Overview, Page::Market, Page::Backlinks, Page::Strategy];
        if !report.sources.is_empty() {
            pages.push(Page::Sources);
        }
        pages
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Market => "Competitors & Keywords",
            Page::Backlinks => "Backlinks",
            Page::Strategy => "Strategy",
            Page::Sources => "Sources",
        }
    }
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(Color::DarkGray))
}

fn trend_style(trend: Trend) -> Style {
    match trend {
        Trend::Up => Style::default().fg(Color::Green),
        Trend::Down => Style::default().fg(Color::Red),
    }
}

/// Colors for difficulty-like meters, where high is bad
fn level_color(level: Level) -> Color {
    match level {
        Level::High => Color::Red,
        Level::Medium => Color::Yellow,
        Level::Low => Color::Green,
    }
}

fn meter_line(meter: &Meter) -> Line<'static> {
    let filled = meter.filled(METER_WIDTH);
    Line::from(vec![
        Span::styled(
            "█".repeat(filled as usize),
            Style::default().fg(level_color(meter.level)),
        ),
        Span::styled(
            "░".repeat((METER_WIDTH - filled) as usize),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {}", format_count(meter.percent()))),
    ])
}

pub fn render(f: &mut Frame, area: Rect, target: &str, report: &SeoReport, page: Page, scroll: u16) {
    let view = Dashboard::from_report(report);
    let pages = Page::for_report(report);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Target + badge
            Constraint::Length(1), // Tabs
            Constraint::Min(5),    // Page
        ])
        .split(area);

    let mut target_line = vec![
        Span::styled(" ANALYSIS TARGET ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            target_host(target),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ];
    if view.https_verified {
        target_line.push(Span::raw("  "));
        target_line.push(Span::styled(
            " HTTPS Verified ",
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(target_line)), chunks[0]);

    let selected = pages.iter().position(|p| *p == page).unwrap_or(0);
    let tabs = Tabs::new(pages.iter().enumerate().map(|(i, p)| format!("{} {}", i + 1, p.title())))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[1]);

    match page {
        Page::Overview => render_overview(f, chunks[2], &view, scroll),
        Page::Market => render_market(f, chunks[2], &view),
        Page::Backlinks => render_backlinks(f, chunks[2], &view),
        Page::Strategy => render_strategy(f, chunks[2], &view, scroll),
        Page::Sources => render_sources(f, chunks[2], &view),
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &MetricCard) {
    let mut lines = vec![Line::from(Span::styled(
        card.value.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtitle) = &card.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(card.trend.label(), trend_style(card.trend))));

    f.render_widget(Paragraph::new(lines).block(bordered(card.title)), area);
}

fn render_overview(f: &mut Frame, area: Rect, view: &Dashboard, scroll: u16) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(rows[0]);

    let gauge_color = match Level::of(f64::from(view.gauge.score)) {
        Level::High => Color::Green,
        Level::Medium => Color::Yellow,
        Level::Low => Color::Red,
    };
    let gauge = Gauge::default()
        .block(bordered("Health Score"))
        .gauge_style(Style::default().fg(gauge_color).bg(Color::Black))
        .ratio(view.gauge.ratio())
        .label(format!("{}/100", view.gauge.score));
    f.render_widget(gauge, top[0]);

    for (card, area) in view.cards.iter().zip(top.iter().skip(1)) {
        render_card(f, *area, card);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    let report = view.report;
    let label = Style::default().fg(Color::DarkGray);

    let technical = &report.technical;
    let domain = &report.domain_info;
    let technical_lines = vec![
        Line::from(vec![Span::styled("LCP  ", label), Span::raw(technical.core_web_vitals.lcp.clone())]),
        Line::from(vec![Span::styled("CLS  ", label), Span::raw(technical.core_web_vitals.cls.clone())]),
        Line::from(vec![Span::styled("INP  ", label), Span::raw(technical.core_web_vitals.inp.clone())]),
        Line::from(""),
        Line::from(vec![Span::styled("Sitemap  ", label), Span::raw(technical.sitemap_status.clone())]),
        Line::from(vec![Span::styled("Robots   ", label), Span::raw(technical.robots_txt.clone())]),
        Line::from(""),
        Line::from(vec![Span::styled("Domain age  ", label), Span::raw(domain.age.clone())]),
        Line::from(vec![Span::styled("Security    ", label), Span::raw(domain.security_info.clone())]),
    ];
    f.render_widget(
        Paragraph::new(technical_lines)
            .block(bordered("Technical"))
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        columns[0],
    );

    let on_page = &report.on_page;
    let mut on_page_lines = Vec::new();
    for (title, audit) in [("Titles", &on_page.titles), ("Meta Descriptions", &on_page.meta_descriptions)] {
        on_page_lines.push(Line::from(vec![
            Span::styled(format!("{} ", title), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{} · {}", format_count(audit.count), audit.status)),
        ]));
        for issue in &audit.issues {
            on_page_lines.push(Line::from(Span::styled(format!("  • {}", issue), label)));
        }
    }
    on_page_lines.push(Line::from(vec![
        Span::styled("Headings ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "H1 {} · H2 {} · H3 {}",
            format_count(on_page.headings.h1),
            format_count(on_page.headings.h2),
            format_count(on_page.headings.h3)
        )),
    ]));
    for issue in &on_page.headings.issues {
        on_page_lines.push(Line::from(Span::styled(format!("  • {}", issue), label)));
    }
    on_page_lines.push(Line::from(vec![Span::styled("Linking  ", label), Span::raw(on_page.internal_linking.clone())]));
    on_page_lines.push(Line::from(vec![Span::styled("Alt tags ", label), Span::raw(on_page.image_alt_tags.clone())]));
    on_page_lines.push(Line::from(vec![Span::styled("Schema   ", label), Span::raw(on_page.schema_types.join(", "))]));
    f.render_widget(
        Paragraph::new(on_page_lines)
            .block(bordered("On-Page"))
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        columns[1],
    );

    let content = &report.content;
    let mut content_lines = vec![
        Line::from(vec![Span::styled("Originality ", label)]),
        meter_line_inverted(&view.originality),
        Line::from(vec![Span::styled("Topical authority ", label), Span::raw(content.topical_authority.clone())]),
        Line::from(vec![Span::styled("AI indicator ", label), Span::raw(content.ai_indicator.clone())]),
        Line::from(Span::styled("Gaps", Style::default().add_modifier(Modifier::BOLD))),
    ];
    content_lines.extend(content.gaps.iter().map(|g| Line::from(format!("  • {}", g))));
    content_lines.push(Line::from(Span::styled("Improvements", Style::default().add_modifier(Modifier::BOLD))));
    content_lines.extend(content.improvements.iter().map(|i| Line::from(format!("  • {}", i))));
    f.render_widget(
        Paragraph::new(content_lines)
            .block(bordered("Content"))
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        columns[2],
    );
}

/// Meter for scores where high is good
fn meter_line_inverted(meter: &Meter) -> Line<'static> {
    let color = match meter.level {
        Level::High => Color::Green,
        Level::Medium => Color::Yellow,
        Level::Low => Color::Red,
    };
    let filled = meter.filled(METER_WIDTH);
    Line::from(vec![
        Span::styled("█".repeat(filled as usize), Style::default().fg(color)),
        Span::styled(
            "░".repeat((METER_WIDTH - filled) as usize),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {}%", format_count(meter.percent()))),
    ])
}

fn render_market(f: &mut Frame, area: Rect, view: &Dashboard) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let data: Vec<(&str, u64)> = view
        .competitors
        .iter()
        .map(|bar| (bar.label.as_str(), bar.value.max(0.0).round() as u64))
        .collect();
    let chart = BarChart::default()
        .block(bordered("Competitor Visibility"))
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Magenta))
        .value_style(Style::default().fg(Color::Black).bg(Color::Magenta))
        .max(view.competitor_scale().round() as u64)
        .data(data.as_slice());

    let chart_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(view.competitors.len() as u16 + 2)])
        .split(columns[0]);
    f.render_widget(chart, chart_rows[0]);

    let competitor_lines: Vec<Line> = view
        .report
        .competitors
        .iter()
        .map(|c| {
            Line::from(vec![
                Span::styled(format!("{} ", c.name), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("+{} ", c.strength), Style::default().fg(Color::Green)),
                Span::styled(format!("-{}", c.gap), Style::default().fg(Color::Red)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(competitor_lines).block(bordered("Strengths & Gaps")), chart_rows[1]);

    let header = Row::new(["Keyword", "Volume", "Difficulty", "Competition", "CPC", "Intent"])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Gray));
    let rows: Vec<Row> = view
        .keywords
        .iter()
        .map(|k| {
            Row::new(vec![
                Cell::from(k.term.clone()),
                Cell::from(k.volume.clone()),
                Cell::from(meter_line(&k.difficulty)),
                Cell::from(meter_line(&k.competition)),
                Cell::from(k.cpc.clone()),
                Cell::from(k.intent.as_str()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Length(7),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(bordered("Keyword Opportunities"));
    f.render_widget(table, columns[1]);
}

fn render_backlinks(f: &mut Frame, area: Rect, view: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let backlinks = &view.report.backlinks;
    let summary = Paragraph::new(Line::from(vec![
        Span::styled("Total ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}   ", format_count(backlinks.total))),
        Span::styled("Referring domains ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}   ", format_count(backlinks.referring_domains))),
        Span::styled("Do-follow ratio ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}   ", format_count(backlinks.do_follow_ratio))),
        Span::styled("Toxic ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}%", format_count(backlinks.toxic_percentage))),
    ]))
    .block(bordered("Link Profile"));
    f.render_widget(summary, rows[0]);

    if view.backlinks.is_empty() {
        let empty = Paragraph::new(NO_BACKLINKS)
            .style(Style::default().fg(Color::DarkGray))
            .block(bordered("Backlink Sources"))
            .wrap(Wrap { trim: true });
        f.render_widget(empty, rows[1]);
        return;
    }

    let header = Row::new(["Source", "Anchor", "Authority", "Type"])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Gray));
    let table_rows: Vec<Row> = view
        .backlinks
        .iter()
        .map(|link| {
            let authority_style = if link.highlighted {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let type_style = match link.link_type {
                LinkType::Dofollow => Style::default().fg(Color::Green),
                LinkType::Nofollow => Style::default().fg(Color::DarkGray),
            };
            Row::new(vec![
                Cell::from(link.url.clone()),
                Cell::from(link.anchor.clone()),
                Cell::from(format_count(link.authority)).style(authority_style),
                Cell::from(link.link_type.as_str()).style(type_style),
            ])
        })
        .collect();
    let table = Table::new(
        table_rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(bordered("Backlink Sources"));
    f.render_widget(table, rows[1]);
}

fn render_strategy(f: &mut Frame, area: Rect, view: &Dashboard, scroll: u16) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let label = Style::default().fg(Color::DarkGray);
    let mut recommendation_lines = Vec::new();
    for rec in &view.report.recommendations {
        let priority_style = match rec.priority {
            Priority::Critical => Style::default().fg(Color::White).bg(Color::Red),
            Priority::Medium => Style::default().fg(Color::Black).bg(Color::Yellow),
            Priority::Low => Style::default().fg(Color::Black).bg(Color::Blue),
        };
        recommendation_lines.push(Line::from(vec![
            Span::styled(format!(" {} ", rec.priority), priority_style),
            Span::raw(" "),
            Span::styled(rec.issue.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        recommendation_lines.push(Line::from(vec![Span::styled("  Action ", label), Span::raw(rec.action.clone())]));
        recommendation_lines.push(Line::from(vec![Span::styled("  Impact ", label), Span::raw(rec.impact.clone())]));
        recommendation_lines.push(Line::from(vec![Span::styled("  Effort ", label), Span::raw(rec.effort.as_str())]));
        recommendation_lines.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(recommendation_lines)
            .block(bordered("Strategic Recommendations"))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        columns[0],
    );

    let mut roadmap_lines = Vec::new();
    for (idx, phase) in view.report.roadmap.iter().enumerate() {
        roadmap_lines.push(Line::from(vec![
            Span::styled(format!("{} ", idx + 1), Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
            Span::styled(phase.phase.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", phase.duration), label),
        ]));
        roadmap_lines.extend(phase.tasks.iter().map(|t| Line::from(format!("   • {}", t))));
        roadmap_lines.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(roadmap_lines)
            .block(bordered("Growth Roadmap"))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        columns[1],
    );
}

fn render_sources(f: &mut Frame, area: Rect, view: &Dashboard) {
    let lines: Vec<Line> = view
        .sources
        .iter()
        .flat_map(|source| {
            [
                Line::from(Span::styled(
                    format!("• {}", source.label),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    format!("  {}", source.uri),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines)
            .block(bordered("Verified Search Sources"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use seointel_core::analyzer::model::Source;

    const FIXTURE: &str = include_str!("../../seointel-analyzer/tests/fixtures/report.json");

    fn sample_report() -> SeoReport {
        serde_json::from_str(FIXTURE).unwrap()
    }

    fn draw(report: &SeoReport, page: Page) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, area, "https://crumb.example", report, page, 0)
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_sources_page_only_with_citations() {
        let mut report = sample_report();
        assert_eq!(Page::for_report(&report).len(), 4);

        report.sources.push(Source {
            title: "Crumb on Moz".to_string(),
            uri: "https://moz.example/crumb".to_string(),
        });
        assert_eq!(Page::for_report(&report).last(), Some(&Page::Sources));
    }

    #[test]
    fn test_every_page_renders() {
        let mut report = sample_report();
        report.sources.push(Source {
            title: "Crumb on Moz".to_string(),
            uri: "https://moz.example/crumb".to_string(),
        });

        for page in Page::for_report(&report) {
            let screen = draw(&report, page);
            assert!(screen.contains("crumb.example"), "{:?} lost the target", page);
        }
    }

    #[test]
    fn test_overview_shows_badge_and_cards() {
        let screen = draw(&sample_report(), Page::Overview);
        assert!(screen.contains("HTTPS Verified"));
        assert!(screen.contains("Domain Authority"));
        assert!(screen.contains("72/100"));
    }

    #[test]
    fn test_backlinks_page_anchor_and_empty_state() {
        let mut report = sample_report();
        assert!(draw(&report, Page::Backlinks).contains("No anchor"));

        report.backlinks.detailed_sources.clear();
        assert!(draw(&report, Page::Backlinks).contains("No specific detailed backlinks"));
    }
}
