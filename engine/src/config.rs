use crate::error::WidgetError;
use crate::types::FieldWeights;
use serde::Deserialize;

/// Widget configuration passed from JavaScript as JSON.
///
/// Every field is optional; the defaults match the markup generated for the
/// documentation site.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WidgetConfig {
    /// Id of the search `<input>`
    pub search_input_id: String,
    /// Id of the dropdown panel holding the result list
    pub panel_id: String,
    /// Class toggled on the panel while it is open
    pub shown_class: String,
    /// Id prefix of each result `<li>`, followed by its 0-based index
    pub result_id_prefix: String,
    /// Cap on the number of rendered results (None renders every match)
    pub max_results: Option<usize>,
    /// Field weights for ranking (default only the content field counts)
    pub weights: FieldWeights,
    /// Console log level: trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            search_input_id: "search-bar".to_string(),
            panel_id: "search-dropdown-content".to_string(),
            shown_class: "show".to_string(),
            result_id_prefix: "result-".to_string(),
            max_results: None,
            weights: FieldWeights::from([("content".to_string(), 1.0)]),
            log_level: "info".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parse a config from JSON. An empty string yields the defaults.
    pub fn from_json(config_json: &str) -> Result<Self, WidgetError> {
        if config_json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(config_json)?)
    }

    pub fn level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = WidgetConfig::from_json("").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.search_input_id, "search-bar");
        assert_eq!(config.weights.get("content"), Some(&1.0));
        assert!(config.weights.get("title").is_none());
    }

    #[test]
    fn test_partial_config() {
        let config =
            WidgetConfig::from_json(r#"{"searchInputId": "q", "maxResults": 5, "logLevel": "debug"}"#)
                .unwrap();
        assert_eq!(config.search_input_id, "q");
        assert_eq!(config.max_results, Some(5));
        assert_eq!(config.panel_id, "search-dropdown-content");
        assert_eq!(config.level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = WidgetConfig::from_json(r#"{"searchBox": "q"}"#);
        assert!(matches!(result, Err(WidgetError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_level_falls_back_to_info() {
        let config = WidgetConfig {
            log_level: "loud".to_string(),
            ..WidgetConfig::default()
        };
        assert_eq!(config.level(), tracing::Level::INFO);
    }
}
