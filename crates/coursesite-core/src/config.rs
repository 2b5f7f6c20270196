//! Exporter configuration management.

use std::{fmt::Write as _, path::Path};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Settings shared by every exported page.
    #[serde(default)]
    pub site: SiteConfig,

    /// Export settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Schedule page settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Page-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Language code for the `<html lang>` attribute.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Style sheet referenced by every page, relative to the export directory.
    #[serde(default = "default_style_sheet")]
    pub style_sheet: String,

    /// Optional banner image, relative to the export directory.
    #[serde(default)]
    pub banner_image: Option<String>,

    /// Alternative text for the banner image.
    #[serde(default = "default_banner_alt")]
    pub banner_alt: String,
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Default directory for exported pages.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Schedule page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// chrono `strftime` pattern for session dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_style_sheet() -> String {
    "course_homepage_layout.css".to_string()
}

fn default_banner_alt() -> String {
    "Course banner".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_date_format() -> String {
    "%B %-d".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            style_sheet: default_style_sheet(),
            banner_image: None,
            banner_alt: default_banner_alt(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, layering `COURSESITE__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("COURSESITE").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.lang.trim().is_empty() {
            return Err(CoreError::config("site.lang cannot be empty"));
        }

        let style = self.site.style_sheet.trim();
        if style.is_empty() {
            return Err(CoreError::config("site.style_sheet cannot be empty"));
        }
        if style.starts_with('/') || style.contains("://") {
            return Err(CoreError::config(
                "site.style_sheet must be relative to the export directory",
            ));
        }

        let format = &self.schedule.date_format;
        if format.trim().is_empty() {
            return Err(CoreError::config("schedule.date_format cannot be empty"));
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(CoreError::config(format!(
                "schedule.date_format is not a valid date format: {format}"
            )));
        }

        Ok(())
    }

    /// Format a session date using the configured schedule pattern.
    pub fn format_session_date(&self, date: chrono::NaiveDate) -> String {
        let mut out = String::new();
        // Validated patterns never fail; fall back to ISO if one slipped through.
        if write!(out, "{}", date.format(&self.schedule.date_format)).is_err() {
            out = date.format("%Y-%m-%d").to_string();
        }
        out
    }
}
