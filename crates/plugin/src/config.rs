//! Plugin configuration.

use serde::Deserialize;

/// Host-provided configuration for the plugin.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    /// Where the watch registry lives.
    pub database_url: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://antirecall.db".into(),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: PluginConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.database_url, "sqlite://antirecall.db");
    }

    #[test]
    fn test_camel_case_field() {
        let config: PluginConfig =
            serde_json::from_str(r#"{ "databaseUrl": "sqlite::memory:" }"#).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
    }
}
