//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a `config.toml` in the content root.
//!
//! Configuration is the only source of site-wide presentation state (theme
//! mode, colors, reading rate). It is loaded once and passed explicitly to
//! whatever needs it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Simple Blog"
//! description = "Articles on modern web development"
//! base_url = ""             # Prefix for absolute links, e.g. "https://blog.example.com"
//!
//! [theme]
//! mode = "system"           # "system", "light", or "dark"
//!
//! [colors.light]
//! background = "#f9fafb"
//! surface = "#ffffff"
//! text = "#111827"
//! text_muted = "#6b7280"
//! border = "#e5e7eb"
//! accent = "#6366f1"
//!
//! [colors.dark]
//! background = "#111827"
//! surface = "#1f2937"
//! text = "#f3f4f6"
//! text_muted = "#9ca3af"
//! border = "#374151"
//! accent = "#818cf8"
//!
//! [reading]
//! words_per_minute = 200    # Used for time-left estimates and missing readingTime
//! toc_top_margin = 80       # Pixels below the viewport top where a heading becomes active
//!
//! [tags]
//! cloud_order = "popularity" # "collection", "alphabetical", "popularity", "shuffled"
//!
//! [highlight]
//! enabled = true            # Keyword highlighting in code blocks
//!
//! [processing]
//! max_processes = 4         # Max parallel page renderers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::search::TagOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
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
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown in the header and page titles.
    pub site: SiteInfo,
    /// Light/dark mode selection.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Reading speed and scroll-spy settings.
    pub reading: ReadingConfig,
    /// Tag cloud presentation.
    pub tags: TagsConfig,
    /// Code block highlighting.
    pub highlight: HighlightConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "reading.words_per_minute must be greater than 0".into(),
            ));
        }
        if self.reading.toc_top_margin < 0.0 {
            return Err(ConfigError::Validation(
                "reading.toc_top_margin must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    /// Prefix for absolute links. Empty means root-relative links.
    pub base_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Simple Blog".to_string(),
            description: "Articles on modern web development".to_string(),
            base_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow `prefers-color-scheme`.
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    /// Reading speed used for time-left estimates.
    pub words_per_minute: u32,
    /// Offset below the viewport top at which a heading counts as reached.
    pub toc_top_margin: f64,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: crate::progress::READING_RATE,
            toc_top_margin: crate::toc::DEFAULT_TOP_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    pub cloud_order: TagOrder,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            cloud_order: TagOrder::Popularity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// When false, code blocks are emitted as escaped plain text.
    pub enabled: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renderers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
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
    /// Page background.
    pub background: String,
    /// Card and panel background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Dates, captions, inactive TOC entries.
    pub text_muted: String,
    pub border: String,
    /// Links, progress bar, selected tags, active TOC entry.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f9fafb".to_string(),
            surface: "#ffffff".to_string(),
            text: "#111827".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            accent: "#6366f1".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111827".to_string(),
            surface: "#1f2937".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#374151".to_string(),
            accent: "#818cf8".to_string(),
        }
    }

    fn css_vars(&self, indent: &str) -> String {
        format!(
            "{i}--color-bg: {bg};\n{i}--color-surface: {surface};\n{i}--color-text: {text};\n{i}--color-text-muted: {muted};\n{i}--color-border: {border};\n{i}--color-accent: {accent};",
            i = indent,
            bg = self.background,
            surface = self.surface,
            text = self.text,
            muted = self.text_muted,
            border = self.border,
            accent = self.accent,
        )
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
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
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Blog Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the content root: content/config.toml
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Simple Blog"
description = "Articles on modern web development"
# Prefix for absolute links (posts.json, share URLs). Empty = root-relative.
base_url = ""

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# "system" follows the visitor's prefers-color-scheme.
# "light" or "dark" pins one scheme.
mode = "system"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#f9fafb"
surface = "#ffffff"
text = "#111827"
text_muted = "#6b7280"    # Dates, captions, inactive TOC entries
border = "#e5e7eb"
accent = "#6366f1"        # Links, progress bar, selected tags

# ---------------------------------------------------------------------------
# Colors - Dark mode
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111827"
surface = "#1f2937"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#374151"
accent = "#818cf8"

# ---------------------------------------------------------------------------
# Reading
# ---------------------------------------------------------------------------
[reading]
# Words per minute for time-left estimates and articles without readingTime.
words_per_minute = 200

# Pixels below the viewport top at which a heading becomes the active TOC entry.
toc_top_margin = 80.0

# ---------------------------------------------------------------------------
# Tags
# ---------------------------------------------------------------------------
[tags]
# Tag cloud order: "collection", "alphabetical", "popularity", "shuffled".
cloud_order = "popularity"

# ---------------------------------------------------------------------------
# Code highlighting
# ---------------------------------------------------------------------------
[highlight]
# Keyword highlighting for known languages; others fall back to plain text.
enabled = true

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renderers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties for the configured theme mode.
///
/// `System` emits light values with a `prefers-color-scheme: dark` override;
/// `Light` and `Dark` pin a single scheme.
pub fn generate_color_css(colors: &ColorConfig, mode: ThemeMode) -> String {
    match mode {
        ThemeMode::System => format!(
            ":root {{\n{light}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{dark}\n    }}\n}}",
            light = colors.light.css_vars("    "),
            dark = colors.dark.css_vars("        "),
        ),
        ThemeMode::Light => format!(":root {{\n{}\n}}", colors.light.css_vars("    ")),
        ThemeMode::Dark => format!(":root {{\n{}\n}}", colors.dark.css_vars("    ")),
    }
}
