//! Configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table, the user file is merged on top key-by-key, and
//! the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [api]
//! endpoint = "https://api.nasa.gov/planetary/apod"
//! api_key = "DEMO_KEY"      # Overridden by APOD_API_KEY when set
//! # timeout_secs = 30       # Omit to use the HTTP client's default
//!
//! [range]
//! default_days = 9          # Default range: this many days ago .. today
//!
//! [theme]
//! grid_gap = "1.5rem"
//! card_min_width = "18rem"
//! modal_media_max_height = "400px"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#0b3d91"
//! accent_text = "#ffffff"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#fc3d21"
//! accent_text = "#ffffff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable that overrides `api.api_key`.
pub const API_KEY_ENV: &str = "APOD_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// APOD endpoint and credential.
    pub api: ApiConfig,
    /// Default date range.
    pub range: RangeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Layout settings for the card grid and overlay.
    pub theme: ThemeConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.endpoint must not be empty".into(),
            ));
        }
        if url::Url::parse(&self.api.endpoint).is_err() {
            return Err(ConfigError::Validation(format!(
                "api.endpoint is not a valid URL: {}",
                self.api.endpoint
            )));
        }
        if self.api.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "api.api_key must not be empty".into(),
            ));
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Replace the configured credential with `api_key` when one is given.
    ///
    /// `main` passes the value of [`API_KEY_ENV`]; empty values are ignored.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api.api_key = key;
        }
        self
    }
}

/// APOD endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the APOD endpoint, without query string.
    pub endpoint: String,
    /// Access credential sent as the `api_key` query parameter.
    pub api_key: String,
    /// Whole-request timeout in seconds. `None` keeps the client default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.nasa.gov/planetary/apod".to_string(),
            api_key: "DEMO_KEY".to_string(),
            timeout_secs: None,
        }
    }
}

/// Default date range settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeConfig {
    /// Start of the default range, in days before today.
    pub default_days: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self { default_days: 9 }
    }
}

/// Layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Gap between cards (CSS value).
    pub grid_gap: String,
    /// Minimum card width before the grid wraps (CSS value).
    pub card_min_width: String,
    /// Maximum height of an image inside the detail overlay (CSS value).
    pub modal_media_max_height: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            grid_gap: "1.5rem".to_string(),
            card_min_width: "18rem".to_string(),
            modal_media_max_height: "400px".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates, placeholders, secondary labels.
    pub text_muted: String,
    pub border: String,
    /// "View Details" buttons.
    pub accent: String,
    pub accent_text: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#0b3d91".to_string(),
            accent_text: "#ffffff".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#fc3d21".to_string(),
            accent_text: "#ffffff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Config::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`, falling back to stock defaults when
/// it does not exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# apod-gal configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# APOD API
# ---------------------------------------------------------------------------
[api]
# Endpoint queried with ?api_key=..&start_date=..&end_date=..
endpoint = "https://api.nasa.gov/planetary/apod"

# Access credential. DEMO_KEY is heavily rate limited; get a personal key at
# https://api.nasa.gov. The APOD_API_KEY environment variable takes precedence.
api_key = "DEMO_KEY"

# Whole-request timeout in seconds. Omit to keep the HTTP client's default.
# timeout_secs = 30

# ---------------------------------------------------------------------------
# Date range
# ---------------------------------------------------------------------------
[range]
# When --start/--end are omitted the range runs from this many days ago to
# today. Dates before 1995-06-16 (the first APOD) are clamped.
default_days = 9

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Gap between cards (CSS value).
grid_gap = "1.5rem"

# Minimum card width before the grid wraps to fewer columns (CSS value).
card_min_width = "18rem"

# Maximum height of the image in the detail overlay (CSS value).
modal_media_max_height = "400px"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Dates, placeholders
border = "#e0e0e0"
accent = "#0b3d91"        # Buttons
accent_text = "#ffffff"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#fc3d21"
accent_text = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-accent-text: {light_accent_text};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
        --color-accent-text: {dark_accent_text};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_accent_text = colors.light.accent_text,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_accent_text = colors.dark.accent_text,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --grid-gap: {grid_gap};
    --card-min-width: {card_min_width};
    --modal-media-max-height: {modal_media_max_height};
}}"#,
        grid_gap = theme.grid_gap,
        card_min_width = theme.card_min_width,
        modal_media_max_height = theme.modal_media_max_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.api.endpoint, "https://api.nasa.gov/planetary/apod");
        assert_eq!(config.api.api_key, "DEMO_KEY");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.range.default_days, 9);
        assert_eq!(config.theme.modal_media_max_height, "400px");
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0a0a0a");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[api]
api_key = "abc123"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.api_key, "abc123");
        // Defaults preserved
        assert_eq!(config.api.endpoint, "https://api.nasa.gov/planetary/apod");
        assert_eq!(config.range.default_days, 9);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.api.api_key, "DEMO_KEY");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"
[api]
timeout_secs = 15

[range]
default_days = 3

[colors.dark]
accent = "#123456"
"##,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.range.default_days, 3);
        assert_eq!(config.colors.dark.accent, "#123456");
        // Unspecified values should be defaults
        assert_eq!(config.colors.dark.background, "#0a0a0a");
        assert_eq!(config.api.api_key, "DEMO_KEY");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[api\nendpoint = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<Config, _> = toml::from_str("[api]\napikey = \"x\"\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<Config, _> = toml::from_str("[apii]\napi_key = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let mut config = Config::default();
        config.api.api_key = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.api.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[api]\napi_key = \"\"\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn api_key_override_replaces_configured_key() {
        let config = Config::default().with_api_key_override(Some("secret".to_string()));
        assert_eq!(config.api.api_key, "secret");
    }

    #[test]
    fn api_key_override_ignores_missing_or_blank() {
        let config = Config::default().with_api_key_override(None);
        assert_eq!(config.api.api_key, "DEMO_KEY");
        let config = Config::default().with_api_key_override(Some(" ".to_string()));
        assert_eq!(config.api.api_key, "DEMO_KEY");
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_tables() {
        let stock = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[colors.light]\ntext = \"#000\"").unwrap();
        let merged = merge_toml(stock, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
        assert_eq!(light.get("background").unwrap().as_str(), Some("#ffffff"));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: Config = toml::from_str(stock_config_toml()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.api.endpoint, defaults.api.endpoint);
        assert_eq!(config.api.api_key, defaults.api.api_key);
        assert_eq!(config.range.default_days, defaults.range.default_days);
        assert_eq!(config.theme.grid_gap, defaults.theme.grid_gap);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.accent = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-accent: #1a1a1a"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn generate_theme_css_includes_variables() {
        let css = generate_theme_css(&ThemeConfig::default());
        assert!(css.contains("--grid-gap: 1.5rem"));
        assert!(css.contains("--card-min-width: 18rem"));
        assert!(css.contains("--modal-media-max-height: 400px"));
    }
}
