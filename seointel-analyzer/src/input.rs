use serde::{Deserialize, Serialize};

/// What the user asked to analyze. Only `url` is mandatory; the other two
/// fields are free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub url: String,
    pub location: String,
    pub industry: String,
}

impl AnalysisInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn location_or_default(&self) -> &str {
        non_empty_or(&self.location, "Global")
    }

    pub fn industry_or_default(&self) -> &str {
        non_empty_or(&self.industry, "General")
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
