// Runtime settings resolved from the process environment.

use seointel_analyzer::analyzer::DEFAULT_BASE_URL;
use seointel_analyzer::error::Result;
use seointel_analyzer::GeminiAnalyzer;

/// Checked in order; the first non-empty value wins.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];
pub const API_BASE_VAR: &str = "SEOINTEL_API_BASE";
/// Log file for the terminal UI, which cannot log to the screen it draws on
pub const TUI_LOG_VAR: &str = "SEOINTEL_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub tui_log: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            api_key: API_KEY_VARS.iter().find_map(|&name| non_empty(name)),
            api_base: non_empty(API_BASE_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            tui_log: non_empty(TUI_LOG_VAR),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the requestor. A missing key is not an error here; it surfaces
    /// on the first request attempt.
    pub fn analyzer(&self) -> Result<GeminiAnalyzer> {
        Ok(GeminiAnalyzer::new(self.api_key.clone())?.with_base_url(&self.api_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]);
        assert_eq!(s.api_key, None);
        assert_eq!(s.api_base, DEFAULT_BASE_URL);
        assert!(!s.has_credential());
    }

    #[test]
    fn test_api_key_precedence() {
        let s = settings(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "fallback")]);
        assert_eq!(s.api_key.as_deref(), Some("primary"));

        let s = settings(&[("API_KEY", ""), ("GEMINI_API_KEY", "fallback")]);
        assert_eq!(s.api_key.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_api_base_override() {
        let s = settings(&[(API_BASE_VAR, "http://localhost:8080")]);
        assert_eq!(s.api_base, "http://localhost:8080");
    }

    #[test]
    fn test_analyzer_without_key() {
        let analyzer = settings(&[]).analyzer().unwrap();
        assert!(!analyzer.has_credential());
    }
}
