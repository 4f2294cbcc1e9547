// Report rendering: text, json and markdown

use crate::dashboard::{self, Dashboard, Level, NO_BACKLINKS};
use colored::Colorize;
use seointel_analyzer::analyzer::MODEL;
use seointel_analyzer::model::{Priority, SeoReport};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────────────────────────";
const METER_WIDTH: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub const NAMES: &'static [&'static str] = &["text", "json", "markdown"];

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Render `report` in the requested format. `target` is the URL that was
/// analyzed.
pub fn render(format: ReportFormat, target: &str, report: &SeoReport) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(target, report)),
        ReportFormat::Json => generate_json_report(target, report),
        ReportFormat::Markdown => Ok(generate_markdown_report(target, report)),
    }
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("{}\n{}\n{}\n\n", RULE.dimmed(), title.bold().bright_cyan(), RULE.dimmed()));
}

fn trend_colored(card: &dashboard::MetricCard) -> String {
    match card.trend {
        dashboard::Trend::Up => card.trend.label().green().to_string(),
        dashboard::Trend::Down => card.trend.label().red().to_string(),
    }
}

fn meter_bar(meter: &dashboard::Meter) -> String {
    let filled = meter.filled(METER_WIDTH) as usize;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(METER_WIDTH as usize - filled)
    );
    match meter.level {
        Level::High => bar.red().to_string(),
        Level::Medium => bar.yellow().to_string(),
        Level::Low => bar.green().to_string(),
    }
}

fn priority_colored(priority: Priority) -> String {
    let tag = format!("[{}]", priority.as_str().to_uppercase());
    match priority {
        Priority::Critical => tag.red().bold().to_string(),
        Priority::Medium => tag.yellow().to_string(),
        Priority::Low => tag.blue().to_string(),
    }
}

fn bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        out.push_str(&format!("  • {}\n", item));
    }
}

pub fn generate_text_report(target: &str, report: &SeoReport) -> String {
    let view = Dashboard::from_report(report);
    let mut out = String::new();

    // Header
    out.push_str(&format!("{}\n", RULE.dimmed()));
    out.push_str(&format!("{}\n", "                           SEO INTELLIGENCE REPORT".bold()));
    out.push_str(&format!("{}\n\n", RULE.dimmed()));

    out.push_str(&format!("Target:       {}\n", dashboard::target_host(target).bright_white()));
    out.push_str(&format!("Health Score: {}/100\n", view.gauge.score.to_string().bold()));
    out.push_str(&format!("Domain Age:   {}\n", report.domain_info.age));
    if view.https_verified {
        out.push_str(&format!("Security:     {}\n", "HTTPS Verified".green()));
    } else {
        out.push_str(&format!("Security:     {}\n", report.domain_info.https_status.yellow()));
    }
    out.push_str(&format!("              {}\n\n", report.domain_info.security_info.dimmed()));

    section(&mut out, "KEY METRICS");
    for card in &view.cards {
        out.push_str(&format!(
            "  {:<18} {:>10}  {}\n",
            card.title,
            card.value.bold(),
            trend_colored(card)
        ));
        if let Some(subtitle) = &card.subtitle {
            out.push_str(&format!("  {:<18} {}\n", "", subtitle.dimmed()));
        }
    }
    out.push('\n');

    section(&mut out, "TECHNICAL");
    let vitals = &report.technical.core_web_vitals;
    out.push_str(&format!("LCP:          {}\n", vitals.lcp));
    out.push_str(&format!("CLS:          {}\n", vitals.cls));
    out.push_str(&format!("INP:          {}\n", vitals.inp));
    out.push_str(&format!("Sitemap:      {}\n", report.technical.sitemap_status));
    out.push_str(&format!("robots.txt:   {}\n\n", report.technical.robots_txt));

    section(&mut out, "ON-PAGE");
    let on_page = &report.on_page;
    for (label, audit) in [("Titles", &on_page.titles), ("Meta Descriptions", &on_page.meta_descriptions)] {
        out.push_str(&format!(
            "{} ({}): {}\n",
            label.bold(),
            dashboard::format_count(audit.count),
            audit.status
        ));
        bullets(&mut out, &audit.issues);
    }
    let headings = &on_page.headings;
    out.push_str(&format!(
        "{} H1: {}  H2: {}  H3: {}\n",
        "Headings".bold(),
        dashboard::format_count(headings.h1),
        dashboard::format_count(headings.h2),
        dashboard::format_count(headings.h3)
    ));
    bullets(&mut out, &headings.issues);
    out.push_str(&format!("Internal Linking: {}\n", on_page.internal_linking));
    out.push_str(&format!("Image Alt Tags:   {}\n", on_page.image_alt_tags));
    out.push_str(&format!("Schema Types:     {}\n\n", on_page.schema_types.join(", ")));

    section(&mut out, "CONTENT");
    out.push_str(&format!(
        "Originality:  {} {}%\n",
        meter_bar(&view.originality),
        dashboard::format_count(view.originality.percent())
    ));
    out.push_str(&format!("Topical Authority: {}\n", report.content.topical_authority));
    out.push_str(&format!("AI Indicator:      {}\n", report.content.ai_indicator));
    out.push_str("Gaps:\n");
    bullets(&mut out, &report.content.gaps);
    out.push_str("Improvements:\n");
    bullets(&mut out, &report.content.improvements);
    out.push('\n');

    section(&mut out, "BACKLINKS");
    out.push_str(&format!(
        "Do-Follow Ratio: {}   Toxic: {}%\n\n",
        dashboard::format_count(report.backlinks.do_follow_ratio),
        dashboard::format_count(report.backlinks.toxic_percentage)
    ));
    if view.backlinks.is_empty() {
        out.push_str(&format!("  {}\n", NO_BACKLINKS.dimmed()));
    }
    for row in &view.backlinks {
        let authority = dashboard::format_count(row.authority);
        let authority = if row.highlighted {
            authority.green().bold().to_string()
        } else {
            authority
        };
        out.push_str(&format!("  [{}] {}  ({})\n", authority, row.url, row.link_type));
        out.push_str(&format!("        \"{}\"\n", row.anchor));
    }
    out.push('\n');

    section(&mut out, "COMPETITORS");
    let scale = view.competitor_scale();
    for (bar, competitor) in view.competitors.iter().zip(&report.competitors) {
        let filled = ((bar.value / scale) * f64::from(METER_WIDTH)).round().max(0.0) as usize;
        out.push_str(&format!(
            "  {:<28} {} {}\n",
            bar.label,
            "█".repeat(filled.min(METER_WIDTH as usize)).bright_magenta(),
            dashboard::format_count(bar.value)
        ));
        out.push_str(&format!("    Strength: {}  Gap: {}\n", competitor.strength, competitor.gap));
    }
    out.push('\n');

    section(&mut out, "KEYWORDS");
    for row in &view.keywords {
        out.push_str(&format!("{}  [{}]\n", row.term.bold(), row.intent));
        out.push_str(&format!("  Volume: {}   CPC: {}\n", row.volume, row.cpc));
        out.push_str(&format!(
            "  Difficulty  {} {}\n",
            meter_bar(&row.difficulty),
            dashboard::format_count(row.difficulty.percent())
        ));
        out.push_str(&format!(
            "  Competition {} {}\n",
            meter_bar(&row.competition),
            dashboard::format_count(row.competition.percent())
        ));
    }
    out.push('\n');

    section(&mut out, "RECOMMENDATIONS");
    for (idx, rec) in report.recommendations.iter().enumerate() {
        out.push_str(&format!("[{}] {} {}\n", idx + 1, priority_colored(rec.priority), rec.issue.bold()));
        out.push_str(&format!("Action:       {}\n", rec.action));
        out.push_str(&format!("Impact:       {}\n", rec.impact));
        out.push_str(&format!("Effort:       {}\n", rec.effort));
        out.push_str(&format!("{}\n", THIN_RULE.dimmed()));
    }
    out.push('\n');

    section(&mut out, "ROADMAP");
    for (idx, phase) in report.roadmap.iter().enumerate() {
        out.push_str(&format!("{}. {} ({})\n", idx + 1, phase.phase.bold(), phase.duration));
        bullets(&mut out, &phase.tasks);
    }
    out.push('\n');

    if !view.sources.is_empty() {
        section(&mut out, "SOURCES");
        for source in &view.sources {
            out.push_str(&format!("  • {}\n    {}\n", source.label, source.uri.dimmed()));
        }
        out.push('\n');
    }

    // Footer
    out.push_str(&format!("{}\n", RULE.dimmed()));
    out.push_str("                              End of Report\n");
    out.push_str(&format!("{}\n", RULE.dimmed()));
    out.push_str("\nGenerated by SEO Intel. Metrics are model estimates and may be approximate.\n\n");

    out
}

pub fn generate_json_report(target: &str, report: &SeoReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "SEO Intel",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
                "model": MODEL,
                "target": target,
            },
            "audit": report,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

fn md_list(out: &mut String, items: &[String]) {
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
    out.push('\n');
}

fn md_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub fn generate_markdown_report(target: &str, report: &SeoReport) -> String {
    let view = Dashboard::from_report(report);
    let mut out = String::new();

    out.push_str(&format!("# SEO Intelligence Report: {}\n\n", dashboard::target_host(target)));
    out.push_str(&format!(
        "_Generated {} by SEO Intel v{}_\n\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        env!("CARGO_PKG_VERSION")
    ));

    out.push_str(&format!("**Health Score:** {}/100\n\n", view.gauge.score));
    if view.https_verified {
        out.push_str("**HTTPS Verified**\n\n");
    }

    out.push_str("## Key Metrics\n\n| Metric | Value | Detail | Trend |\n|---|---|---|---|\n");
    for card in &view.cards {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            card.title,
            card.value,
            card.subtitle.as_deref().unwrap_or(""),
            card.trend.label()
        ));
    }
    out.push('\n');

    out.push_str("## Technical\n\n");
    let vitals = &report.technical.core_web_vitals;
    out.push_str(&format!("- LCP: {}\n- CLS: {}\n- INP: {}\n", vitals.lcp, vitals.cls, vitals.inp));
    out.push_str(&format!("- Sitemap: {}\n", report.technical.sitemap_status));
    out.push_str(&format!("- robots.txt: {}\n\n", report.technical.robots_txt));

    out.push_str("## On-Page\n\n");
    let on_page = &report.on_page;
    for (label, audit) in [("Titles", &on_page.titles), ("Meta Descriptions", &on_page.meta_descriptions)] {
        out.push_str(&format!(
            "### {} ({}): {}\n\n",
            label,
            dashboard::format_count(audit.count),
            audit.status
        ));
        md_list(&mut out, &audit.issues);
    }
    out.push_str(&format!(
        "### Headings\n\nH1: {} / H2: {} / H3: {}\n\n",
        dashboard::format_count(on_page.headings.h1),
        dashboard::format_count(on_page.headings.h2),
        dashboard::format_count(on_page.headings.h3)
    ));
    md_list(&mut out, &on_page.headings.issues);
    out.push_str(&format!("- Internal linking: {}\n", on_page.internal_linking));
    out.push_str(&format!("- Image alt tags: {}\n", on_page.image_alt_tags));
    out.push_str(&format!("- Schema types: {}\n\n", on_page.schema_types.join(", ")));

    out.push_str("## Content\n\n");
    out.push_str(&format!(
        "- Originality: {}%\n- Topical authority: {}\n- AI indicator: {}\n\n",
        dashboard::format_count(view.originality.percent()),
        report.content.topical_authority,
        report.content.ai_indicator
    ));
    out.push_str("**Gaps**\n\n");
    md_list(&mut out, &report.content.gaps);
    out.push_str("**Improvements**\n\n");
    md_list(&mut out, &report.content.improvements);

    out.push_str("## Backlinks\n\n");
    out.push_str(&format!(
        "Do-follow ratio {}, toxic {}%\n\n",
        dashboard::format_count(report.backlinks.do_follow_ratio),
        dashboard::format_count(report.backlinks.toxic_percentage)
    ));
    if view.backlinks.is_empty() {
        out.push_str(&format!("_{}_\n\n", NO_BACKLINKS));
    } else {
        out.push_str("| URL | Anchor | Authority | Type |\n|---|---|---|---|\n");
        for row in &view.backlinks {
            let authority = dashboard::format_count(row.authority);
            let authority = if row.highlighted { format!("**{}**", authority) } else { authority };
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                md_cell(&row.url),
                md_cell(&row.anchor),
                authority,
                row.link_type
            ));
        }
        out.push('\n');
    }

    out.push_str("## Competitors\n\n| Competitor | Authority | Strength | Gap |\n|---|---|---|---|\n");
    for c in &report.competitors {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            md_cell(&c.name),
            dashboard::format_count(c.authority),
            md_cell(&c.strength),
            md_cell(&c.gap)
        ));
    }
    out.push('\n');

    out.push_str("## Keywords\n\n| Term | Volume | Difficulty | Competition | CPC | Intent |\n|---|---|---|---|---|---|\n");
    for row in &view.keywords {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            md_cell(&row.term),
            md_cell(&row.volume),
            dashboard::format_count(row.difficulty.percent()),
            dashboard::format_count(row.competition.percent()),
            md_cell(&row.cpc),
            row.intent
        ));
    }
    out.push('\n');

    out.push_str("## Recommendations\n\n");
    for (idx, rec) in report.recommendations.iter().enumerate() {
        out.push_str(&format!("{}. **[{}]** {}\n", idx + 1, rec.priority, rec.issue));
        out.push_str(&format!("   - Action: {}\n", rec.action));
        out.push_str(&format!("   - Impact: {}\n", rec.impact));
        out.push_str(&format!("   - Effort: {}\n", rec.effort));
    }
    out.push('\n');

    out.push_str("## Roadmap\n\n");
    for phase in &report.roadmap {
        out.push_str(&format!("### {} ({})\n\n", phase.phase, phase.duration));
        md_list(&mut out, &phase.tasks);
    }

    if !view.sources.is_empty() {
        out.push_str("## Sources\n\n");
        for source in &view.sources {
            out.push_str(&format!("- [{}]({})\n", source.label, source.uri));
        }
        out.push('\n');
    }

    out
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
