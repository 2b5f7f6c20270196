//! Course record persistence.
//!
//! Records are stored as JSON, TOML, or YAML; the format is chosen from the
//! file extension.

use std::{fs, path::Path};

use tracing::debug;

use crate::{
    course::CourseRecord,
    error::{CoreError, Result},
};

/// On-disk encoding of a course record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// `.json` files.
    Json,
    /// `.toml` files.
    Toml,
    /// `.yaml` and `.yml` files.
    Yaml,
}

impl RecordFormat {
    /// Determine the record format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Determine the record format of a path.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                CoreError::codec(path, "unsupported record format (use .json, .toml or .yaml)")
            })
    }

    /// Decode a record from text in this format.
    pub fn decode(&self, text: &str) -> Result<CourseRecord> {
        let record = match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Toml => toml::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(record)
    }

    /// Encode a record as text in this format.
    pub fn encode(&self, record: &CourseRecord) -> Result<String> {
        let mut text = match self {
            Self::Json => serde_json::to_string_pretty(record)?,
            Self::Toml => toml::to_string_pretty(record)?,
            Self::Yaml => serde_yaml::to_string(record)?,
        };
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

/// Load a course record from a file.
pub fn load_record(path: &Path) -> Result<CourseRecord> {
    let format = RecordFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let record = format
        .decode(&text)
        .map_err(|e| CoreError::codec(path, e.to_string()))?;

    debug!(path = %path.display(), ?format, "loaded course record");
    Ok(record)
}

/// Save a course record to a file, creating parent directories as needed.
pub fn save_record(path: &Path, record: &CourseRecord) -> Result<()> {
    let format = RecordFormat::from_path(path)?;
    let text = format.encode(record)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;

    debug!(path = %path.display(), ?format, "saved course record");
    Ok(())
}
