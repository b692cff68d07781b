//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content directory next to the profile document and overrides the
//! stock defaults key by key.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── index.json               # Profile document
//! └── assets/                  # Copied to the output root (photo, favicon)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data = "index.json"       # Profile document, relative to the content directory
//! title = ""                # Page <title>; empty = the profile's name
//!
//! [announcements]
//! count = 5                 # Entries in the announcement feed
//! interval_ms = 4000        # Carousel rotation period
//!
//! [reveal]
//! threshold = 0.15          # Visible fraction that triggers scroll reveal
//!
//! [publications]
//! citations = false         # Access links and BibTeX toggles per entry
//! group_by_status = false   # Published / Under Review / Preprints buckets
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#5f6368"    # Venues, periods, captions
//! border = "#e3e3e3"
//! link = "#1a4d8f"
//! accent = "#f4f6fa"        # Card and announcement background
//!
//! [colors.dark]
//! background = "#121212"
//! text = "#e8e8e8"
//! text_muted = "#9aa0a6"
//! border = "#2c2c2c"
//! link = "#8ab4f8"
//! accent = "#1c1f24"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [publications]
//! citations = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::effects::{DEFAULT_CAROUSEL_INTERVAL, DEFAULT_REVEAL_THRESHOLD};
use crate::load::DEFAULT_DATA_FILE;
use crate::views::RECENT_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Profile document path, relative to the content directory.
    pub data: String,
    /// Page title. Empty means the profile's name.
    pub title: String,
    /// Announcement feed and carousel settings.
    pub announcements: AnnouncementsConfig,
    /// Scroll reveal settings.
    pub reveal: RevealConfig,
    /// Publication rendering variant.
    pub publications: PublicationsConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data: DEFAULT_DATA_FILE.to_string(),
            title: String::new(),
            announcements: AnnouncementsConfig::default(),
            reveal: RevealConfig::default(),
            publications: PublicationsConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.trim().is_empty() {
            return Err(ConfigError::Validation("data must not be empty".into()));
        }
        if self.announcements.count == 0 {
            return Err(ConfigError::Validation(
                "announcements.count must be at least 1".into(),
            ));
        }
        if self.announcements.interval_ms < 100 {
            return Err(ConfigError::Validation(
                "announcements.interval_ms must be at least 100".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        Ok(())
    }
}

/// Announcement feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnouncementsConfig {
    /// Maximum number of entries in the feed.
    pub count: usize,
    /// Carousel rotation period in milliseconds.
    pub interval_ms: u64,
}

impl AnnouncementsConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for AnnouncementsConfig {
    fn default() -> Self {
        Self {
            count: RECENT_LIMIT,
            interval_ms: DEFAULT_CAROUSEL_INTERVAL.as_millis() as u64,
        }
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of an element that must be visible before it is revealed.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
        }
    }
}

/// Publication rendering variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublicationsConfig {
    /// Render access links and BibTeX toggles.
    pub citations: bool,
    /// Bucket journals into Published / Under Review / Preprints.
    pub group_by_status: bool,
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
    /// Background color.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (venues, periods, captions).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Link color.
    pub link: String,
    /// Card and announcement background.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#5f6368".to_string(),
            border: "#e3e3e3".to_string(),
            link: "#1a4d8f".to_string(),
            accent: "#f4f6fa".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#e8e8e8".to_string(),
            text_muted: "#9aa0a6".to_string(),
            border: "#2c2c2c".to_string(),
            link: "#8ab4f8".to_string(),
            accent: "#1c1f24".to_string(),
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
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    if overlay.is_some() {
        tracing::debug!(dir = %root.display(), "applying config.toml overrides");
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Scholar Page Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content directory, next to the profile document.
# Unknown keys will cause an error.

# Profile document, relative to the content directory.
data = "index.json"

# Page <title>. Leave empty to use the profile's name.
title = ""

# ---------------------------------------------------------------------------
# Announcements
# ---------------------------------------------------------------------------
[announcements]
# Entries in the feed. Hand-written `announcements` in the document are used
# as-is; otherwise the most recent dated publications are shown.
count = 5

# Carousel rotation period, in milliseconds.
interval_ms = 4000

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element (0-1) that must be on screen before it fades in.
threshold = 0.15

# ---------------------------------------------------------------------------
# Publications
# ---------------------------------------------------------------------------
[publications]
# Show DOI/arXiv links and a "Cite" toggle with a BibTeX record per entry.
citations = false

# Split journals into Published / Under Review / Preprints by their `status`.
# Entries with any other status are left out of all three groups.
group_by_status = false

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#5f6368"    # Venues, periods, captions
border = "#e3e3e3"
link = "#1a4d8f"
accent = "#f4f6fa"        # Card and announcement background

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
text = "#e8e8e8"
text_muted = "#9aa0a6"
border = "#2c2c2c"
link = "#8ab4f8"
accent = "#1c1f24"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    fn scheme_vars(scheme: &ColorScheme, indent: &str) -> String {
        [
            ("--color-bg", &scheme.background),
            ("--color-text", &scheme.text),
            ("--color-text-muted", &scheme.text_muted),
            ("--color-border", &scheme.border),
            ("--color-link", &scheme.link),
            ("--color-accent", &scheme.accent),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }

    format!(
        ":root {{\n{light}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{dark}\n    }}\n}}",
        light = scheme_vars(&colors.light, "    "),
        dark = scheme_vars(&colors.dark, "        "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.data, "index.json");
        assert_eq!(config.title, "");
        assert_eq!(config.announcements.count, 5);
        assert_eq!(config.announcements.interval_ms, 4000);
        assert_eq!(config.reveal.threshold, 0.15);
        assert!(!config.publications.citations);
        assert!(!config.publications.group_by_status);
    }

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#121212");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[publications]
citations = true
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert!(config.publications.citations);
        // Defaults preserved
        assert!(!config.publications.group_by_status);
        assert_eq!(config.announcements.count, 5);
        assert_eq!(config.colors.light.text, "#1a1a1a");
    }

    #[test]
    fn interval_as_duration() {
        let config = AnnouncementsConfig {
            count: 3,
            interval_ms: 2500,
        };
        assert_eq!(config.interval(), Duration::from_millis(2500));
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-bg:",
            "--color-text:",
            "--color-text-muted:",
            "--color-border:",
            "--color-link:",
            "--color-accent:",
        ] {
            assert!(css.contains(var), "missing {var}");
        }
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.data, "index.json");
        assert_eq!(config.colors.light.background, "#ffffff");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
data = "profile.json"
title = "Dr. Ada Lovelace"

[announcements]
interval_ms = 6000

[colors.light]
background = "#123456"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.data, "profile.json");
        assert_eq!(config.title, "Dr. Ada Lovelace");
        assert_eq!(config.announcements.interval_ms, 6000);
        assert_eq!(config.announcements.count, 5);
        assert_eq!(config.colors.light.background, "#123456");
        assert_eq!(config.colors.dark.background, "#121212");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[reveal]
threshold = 1.5
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[announcements]
count = 5
interval_ms = 4000
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[announcements]
count = 3
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let announcements = merged.get("announcements").unwrap();
        assert_eq!(announcements.get("count").unwrap().as_integer(), Some(3));
        assert_eq!(
            announcements.get("interval_ms").unwrap().as_integer(),
            Some(4000)
        );
    }

    #[test]
    fn merge_toml_overlay_adds_and_replaces() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r##"
title = "Jane Doe"

[colors.dark]
accent = "#000000"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("title").unwrap().as_str(), Some("Jane Doe"));
        let dark = merged.get("colors").unwrap().get("dark").unwrap();
        assert_eq!(dark.get("accent").unwrap().as_str(), Some("#000000"));
        assert_eq!(dark.get("link").unwrap().as_str(), Some("#8ab4f8"));
        assert_eq!(merged.get("data").unwrap().as_str(), Some("index.json"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_color_key_rejected() {
        let toml_str = r##"
[colors.light]
link_hover = "#0b2a52"
"##;
        assert!(toml::from_str::<SiteConfig>(toml_str).is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[publications]
citation = true
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[theme]
font = "serif"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[reveal]
treshold = 0.2
"#,
        )
        .unwrap();

        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_threshold_bounds() {
        let mut config = SiteConfig::default();
        config.reveal.threshold = 0.0;
        assert!(config.validate().is_ok());
        config.reveal.threshold = 1.0;
        assert!(config.validate().is_ok());
        config.reveal.threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_announcement_count_zero() {
        let mut config = SiteConfig::default();
        config.announcements.count = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("announcements.count"));
    }

    #[test]
    fn validate_interval_too_short() {
        let mut config = SiteConfig::default();
        config.announcements.interval_ms = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_data_path() {
        let mut config = SiteConfig::default();
        config.data = "  ".to_string();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // resolve_config / stock config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[publications]
group_by_status = true
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert!(config.publications.group_by_status);
        assert_eq!(config.announcements.count, 5);
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.data, defaults.data);
        assert_eq!(config.announcements.count, defaults.announcements.count);
        assert_eq!(
            config.announcements.interval_ms,
            defaults.announcements.interval_ms
        );
        assert_eq!(config.reveal.threshold, defaults.reveal.threshold);
        assert_eq!(config.colors.light.accent, defaults.colors.light.accent);
        assert_eq!(config.colors.dark.link, defaults.colors.dark.link);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[announcements]",
            "[reveal]",
            "[publications]",
            "[colors.light]",
            "[colors.dark]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("announcements").is_some());
        assert!(val.get("reveal").is_some());
        assert!(val.get("publications").is_some());
        assert!(val.get("colors").is_some());
    }
}
