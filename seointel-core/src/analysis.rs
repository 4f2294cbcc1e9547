use indicatif::{ProgressBar, ProgressStyle};
use seointel_analyzer::{AnalysisError, AnalysisInput, ReportSource, SeoReport};
use std::time::Duration;

pub const LOADING_TITLE: &str = "SEO Agent at work...";

/// Progress lines shown in rotation while a request is outstanding. They are
/// cosmetic; the request is a single call.
pub const LOADING_STAGES: &[&str] = &[
    "Running technical crawlers...",
    "Fetching backlink data using Google Search...",
    "Auditing competitor keyword strategies...",
    "Synthesizing professional report...",
];

const STAGE_INTERVAL: Duration = Duration::from_secs(4);

/// Loading line for a given number of elapsed spinner ticks
pub fn loading_stage(tick: usize) -> &'static str {
    LOADING_STAGES[tick % LOADING_STAGES.len()]
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix(LOADING_TITLE);
    pb.set_message(loading_stage(0));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run one analysis of `input` against `source`, optionally with a terminal
/// spinner cycling through [`LOADING_STAGES`].
pub async fn execute_analysis(
    source: &dyn ReportSource,
    input: &AnalysisInput,
    show_spinner: bool,
) -> Result<SeoReport, AnalysisError> {
    if !show_spinner {
        return source.request(input).await;
    }

    let pb = spinner();
    let request = source.request(input);
    tokio::pin!(request);

    let mut stages = tokio::time::interval(STAGE_INTERVAL);
    // first tick completes immediately
    stages.tick().await;
    let mut stage = 0usize;

    let result = loop {
        tokio::select! {
            result = &mut request => break result,
            _ = stages.tick() => {
                stage += 1;
                pb.set_message(loading_stage(stage));
            }
        }
    };

    match &result {
        Ok(report) => pb.finish_with_message(format!("✓ Audit complete (health score {})", report.health_score)),
        Err(_) => pb.abandon_with_message("✗ Analysis interrupted"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_stage_cycles() {
        assert_eq!(loading_stage(0), LOADING_STAGES[0]);
        assert_eq!(loading_stage(3), "Synthesizing professional report...");
        assert_eq!(loading_stage(4), LOADING_STAGES[0]);
    }
}
