use crate::model::Source;
use crate::wire::GroundingChunk;

/// Title used when a web citation comes back without one.
pub const DEFAULT_SOURCE_TITLE: &str = "SEO Resource";
/// URI used when a web citation comes back without one.
pub const DEFAULT_SOURCE_URI: &str = "#";

/// Map grounding chunks onto report sources.
///
/// Chunks that do not reference a web resource are dropped. A missing or
/// blank title becomes [`DEFAULT_SOURCE_TITLE`], a missing or blank URI
/// becomes [`DEFAULT_SOURCE_URI`]. Order is preserved.
pub fn sources_from_grounding(chunks: &[GroundingChunk]) -> Vec<Source> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Source {
            title: present_or(web.title.as_deref(), DEFAULT_SOURCE_TITLE),
            uri: present_or(web.uri.as_deref(), DEFAULT_SOURCE_URI),
        })
        .collect()
}

fn present_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
