//! Configuration file support
//!
//! Loads settings from ~/.linetint.toml (or %USERPROFILE%\.linetint.toml
//! on Windows).
//!
//! Example:
//! ```toml
//! line-numbers = true
//! tab-width = 4
//!
//! [styles]
//! Keyword = { fg = "Magenta", bold = true }
//! Comment = { fg = "BrightBlack", italic = true }
//!
//! [languages.Lua]
//! keywords = ["describe", "it"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;

use crate::error::{Result, TintError};
use crate::syntax::{Color, Style, TokenType};

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to show line numbers
    pub line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Per-token style overrides
    pub styles: Vec<(TokenType, Style)>,
    /// Extra keywords per language name
    pub extra_keywords: Vec<(String, Vec<String>)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_numbers: false,
            tab_width: 8,
            styles: Vec::new(),
            extra_keywords: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        let home = std::env::var("USERPROFILE").ok()?;

        #[cfg(not(windows))]
        let home = std::env::var("HOME").ok()?;

        Some(PathBuf::from(home).join(".linetint.toml"))
    }

    /// Load configuration from the default location, falling back to
    /// defaults if there is no config file
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|contents| Self::parse(&contents).ok())
            .unwrap_or_default()
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse TOML config contents
    pub fn parse(contents: &str) -> Result<Self> {
        let value: Value = contents
            .parse()
            .map_err(|e| TintError::Config(format!("invalid TOML: {e}")))?;
        let mut config = Config::default();

        if let Some(flag) = value.get("line-numbers").and_then(Value::as_bool) {
            config.line_numbers = flag;
        }
        if let Some(width) = value.get("tab-width").and_then(Value::as_integer) {
            config.tab_width = (width.clamp(1, 16)) as usize;
        }

        if let Some(styles) = value.get("styles").and_then(Value::as_table) {
            for (name, spec) in styles {
                let token = TokenType::from_name(name).ok_or_else(|| {
                    TintError::Config(format!("unknown token type: {name}"))
                })?;
                config.styles.push((token, parse_style(spec)?));
            }
        }

        if let Some(languages) = value.get("languages").and_then(Value::as_table) {
            for (lang, spec) in languages {
                if let Some(words) = spec.get("keywords").and_then(Value::as_array) {
                    let words: Vec<String> = words
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|s| s.to_string())
                        .collect();
                    config.extra_keywords.push((lang.clone(), words));
                }
            }
        }

        Ok(config)
    }
}

/// Parse a style table: fg/bg color names plus attribute flags
fn parse_style(spec: &Value) -> Result<Style> {
    let mut style = Style::default();
    if let Some(name) = spec.get("fg").and_then(Value::as_str) {
        style.fg = Color::from_name(name)
            .ok_or_else(|| TintError::Config(format!("unknown color: {name}")))?;
    }
    if let Some(name) = spec.get("bg").and_then(Value::as_str) {
        style.bg = Color::from_name(name)
            .ok_or_else(|| TintError::Config(format!("unknown color: {name}")))?;
    }
    if let Some(flag) = spec.get("bold").and_then(Value::as_bool) {
        style.bold = flag;
    }
    if let Some(flag) = spec.get("italic").and_then(Value::as_bool) {
        style.italic = flag;
    }
    if let Some(flag) = spec.get("underline").and_then(Value::as_bool) {
        style.underline = flag;
    }
    Ok(style)
}
