use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Overrides [`Config::api_base`] when set.
pub const API_URL_ENV: &str = "TALLY_API_URL";

/// Stores user-configurable client preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_base")]
    pub api_base: String,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_chart_width")]
    pub chart_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: Self::default_api_base(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            currency_symbol: Self::default_currency_symbol(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            chart_width: Self::default_chart_width(),
        }
    }
}

impl Config {
    pub fn default_api_base() -> String {
        "http://localhost:8080/api".into()
    }

    pub fn default_request_timeout_secs() -> u64 {
        30
    }

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_chart_width() -> usize {
        40
    }

    /// Applies environment overrides on top of the persisted values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = std::env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            self.api_base = url;
        }
        self
    }

    /// API base without a trailing slash, ready for path joining.
    pub fn api_base_trimmed(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Keys accepted by [`Config::get_field`] and [`Config::set_field`].
    pub const KEYS: &'static [&'static str] = &[
        "api_base",
        "request_timeout_secs",
        "currency_symbol",
        "ui_color_enabled",
        "chart_width",
    ];

    pub fn get_field(&self, key: &str) -> Option<String> {
        let value = match key {
            "api_base" => self.api_base.clone(),
            "request_timeout_secs" => self.request_timeout_secs.to_string(),
            "currency_symbol" => self.currency_symbol.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "chart_width" => self.chart_width.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Parses `value` into the field named by `key`.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "api_base" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid(key, "must start with http:// or https://"));
                }
                self.api_base = value.to_string();
            }
            "request_timeout_secs" => {
                self.request_timeout_secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| invalid(key, "must be a positive whole number"))?;
            }
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(invalid(key, "cannot be empty"));
                }
                self.currency_symbol = value.to_string();
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid(key, "expected on or off")),
                };
            }
            "chart_width" => {
                self.chart_width = value
                    .parse::<usize>()
                    .ok()
                    .filter(|width| (10..=200).contains(width))
                    .ok_or_else(|| invalid(key, "must be between 10 and 200"))?;
            }
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "unknown key `{key}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid(format!("{key} {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(cfg.currency_symbol, "€");
        assert_eq!(cfg.api_base, Config::default_api_base());
        assert_eq!(cfg.chart_width, 40);
        assert!(cfg.ui_color_enabled);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = Config {
            api_base: "https://budget.example/api/".into(),
            ..Config::default()
        };
        assert_eq!(cfg.api_base_trimmed(), "https://budget.example/api");
    }

    #[test]
    fn set_field_parses_and_validates() {
        let mut cfg = Config::default();
        cfg.set_field("chart_width", "60").unwrap();
        cfg.set_field("ui_color_enabled", "off").unwrap();
        cfg.set_field("currency_symbol", " € ").unwrap();
        assert_eq!(cfg.chart_width, 60);
        assert!(!cfg.ui_color_enabled);
        assert_eq!(cfg.get_field("currency_symbol").as_deref(), Some("€"));

        assert!(cfg.set_field("chart_width", "3").is_err());
        assert!(cfg.set_field("api_base", "ftp://x").is_err());
        assert!(cfg.set_field("colour", "on").is_err());
        assert_eq!(cfg.chart_width, 60);
    }
}
