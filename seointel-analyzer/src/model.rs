use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete SEO audit as returned by the model, plus the grounding
/// sources collected alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub health_score: u8,
    pub domain_info: DomainInfo,
    pub technical: Technical,
    pub on_page: OnPage,
    pub content: ContentAnalysis,
    pub backlinks: Backlinks,
    pub competitors: Vec<Competitor>,
    pub keywords: Vec<Keyword>,
    pub recommendations: Vec<Recommendation>,
    pub roadmap: Vec<RoadmapPhase>,
    /// Not produced by the model; filled from grounding metadata.
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub age: String,
    pub authority: f64,
    pub indexed_pages: f64,
    pub https_status: String,
    pub security_info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    pub core_web_vitals: CoreWebVitals,
    pub mobile_friendly: bool,
    pub speed_score: f64,
    pub sitemap_status: String,
    pub robots_txt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    pub lcp: String,
    pub cls: String,
    pub inp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnPage {
    pub titles: TagAudit,
    pub meta_descriptions: TagAudit,
    pub headings: Headings,
    pub internal_linking: String,
    pub image_alt_tags: String,
    pub schema_types: Vec<String>,
}

/// Audit of one kind of tag (titles, meta descriptions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAudit {
    pub status: String,
    pub count: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: f64,
    pub h2: f64,
    pub h3: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub originality_score: f64,
    pub topical_authority: String,
    pub ai_indicator: String,
    pub gaps: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlinks {
    pub total: f64,
    pub referring_domains: f64,
    pub do_follow_ratio: f64,
    pub toxic_percentage: f64,
    pub detailed_sources: Vec<BacklinkItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklinkItem {
    pub url: String,
    pub anchor: String,
    pub authority: f64,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Dofollow,
    Nofollow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub authority: f64,
    pub strength: String,
    pub gap: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub volume: String,
    pub difficulty: f64,
    pub competition: f64,
    pub cpc: String,
    pub intent: Intent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Informational,
    Transactional,
    Navigational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub issue: String,
    pub action: String,
    pub impact: String,
    pub effort: Effort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub phase: String,
    pub duration: String,
    pub tasks: Vec<String>,
}

/// A web page the model cited while producing the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

impl LinkType {
    pub const ALL: &'static [&'static str] = &["dofollow", "nofollow"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Dofollow => "dofollow",
            LinkType::Nofollow => "nofollow",
        }
    }
}

impl Intent {
    pub const ALL: &'static [&'static str] = &["Informational", "Transactional", "Navigational"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Informational => "Informational",
            Intent::Transactional => "Transactional",
            Intent::Navigational => "Navigational",
        }
    }
}

impl Priority {
    pub const ALL: &'static [&'static str] = &["Critical", "Medium", "Low"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Effort {
    pub const ALL: &'static [&'static str] = &["Low", "Medium", "High"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Low => "Low",
            Effort::Medium => "Medium",
            Effort::High => "High",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(LinkType, Intent, Priority, Effort);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(LinkType::Dofollow).unwrap(), "dofollow");
        assert_eq!(serde_json::to_value(Intent::Navigational).unwrap(), "Navigational");
        assert_eq!(serde_json::to_value(Priority::Critical).unwrap(), "Critical");
        assert_eq!(serde_json::to_value(Effort::High).unwrap(), "High");
    }

    #[test]
    fn test_enum_names_are_case_sensitive() {
        assert!(serde_json::from_str::<LinkType>("\"DoFollow\"").is_err());
        assert!(serde_json::from_str::<Intent>("\"informational\"").is_err());
    }

    #[test]
    fn test_backlink_type_field_name() {
        let item: BacklinkItem = serde_json::from_value(serde_json::json!({
            "url": "https://blog.example.org/post",
            "anchor": "great tools",
            "authority": 61,
            "type": "nofollow"
        }))
        .unwrap();
        assert_eq!(item.link_type, LinkType::Nofollow);
        assert_eq!(item.authority, 61.0);
    }

    #[test]
    fn test_all_lists_match_as_str() {
        assert_eq!(Intent::ALL[1], Intent::Transactional.as_str());
        assert_eq!(Priority::ALL[2], Priority::Low.as_str());
        assert_eq!(Effort::ALL[0], Effort::Low.to_string());
    }
}
