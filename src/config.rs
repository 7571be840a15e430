use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ImportError;
use crate::format::Language;

pub const TOKEN_PLACEHOLDER: &str = "ADD YOUR API TOKEN HERE";
pub const COURSE_ID_PLACEHOLDER: &str = "ADD YOUR COURSE ID HERE";
pub const CSV_FILE_PLACEHOLDER: &str = "ADD YOUR CSV FILE PATH HERE";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Canvas instance host, e.g. "chalmers.instructure.com".
    pub canvas_domain: String,
    /// Canvas API token (Account -> Settings -> New access token).
    pub api_token: String,
    /// Numeric course id, visible in the Canvas course URL.
    pub course_id: String,
    /// Path to the TimeEdit CSV export.
    pub csv_file: PathBuf,
    #[serde(default)]
    pub language: Language,
    /// Hours ahead of UTC for the exported wall-clock times.
    /// CET (winter) = 1, CEST (summer) = 2.
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i64,
}

fn default_timezone_offset() -> i64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_domain: "chalmers.instructure.com".to_string(),
            api_token: TOKEN_PLACEHOLDER.to_string(),
            course_id: COURSE_ID_PLACEHOLDER.to_string(),
            csv_file: PathBuf::from(CSV_FILE_PLACEHOLDER),
            language: Language::default(),
            timezone_offset: default_timezone_offset(),
        }
    }
}

impl Config {
    /// Load and validate the configuration. A missing file gets a template
    /// written in its place so the user has something to edit.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            Config::default().save(path)?;
            anyhow::bail!(
                "no config file found; wrote a template to '{}', edit it and run again",
                path.display()
            );
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Reject values still at their template placeholders before any work
    /// happens, so a half-edited config fails up front rather than mid-run.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.api_token.is_empty() || self.api_token == TOKEN_PLACEHOLDER {
            return Err(ImportError::Configuration("api_token"));
        }
        if self.course_id.is_empty() || self.course_id == COURSE_ID_PLACEHOLDER {
            return Err(ImportError::Configuration("course_id"));
        }
        if self.csv_file.as_os_str().is_empty() || self.csv_file == Path::new(CSV_FILE_PLACEHOLDER) {
            return Err(ImportError::Configuration("csv_file"));
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        format!("https://{}/api/v1", self.canvas_domain)
    }

    pub fn context_code(&self) -> String {
        format!("course_{}", self.course_id)
    }

    pub fn calendar_url(&self) -> String {
        format!("https://{}/courses/{}/calendar", self.canvas_domain, self.course_id)
    }
}
