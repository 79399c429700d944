//! Run configuration, loaded from an optional `certgen.yaml`.
//!
//! Every field has a default, so a partial file (or no file at all) is valid:
//!
//! ```yaml
//! certificate:
//!   workshop_title: "Introduction to Data Analysis"
//!   tutors: "Dr. Ada Lovelace"
//!   date: 2025-07-17
//!   date_range: "10.04.2025 to 10.07.2025"
//! paths:
//!   roster: names.csv
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};
use crate::types::DATE_FORMAT;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "certgen.yaml";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Course-wide values shared by every certificate in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateOptions {
    pub workshop_title: String,
    pub subtitle: String,
    pub tutors: String,
    pub duration: String,
    pub contents: Vec<String>,
    /// Caller-wide certificate date, used verbatim; `None` means today as `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Free-text date range; `None` means "same as the date".
    pub date_range: Option<String>,
    pub signatory1: String,
    pub signatory2: String,
    pub location: String,
    pub id_prefix: String,
}

impl Default for CertificateOptions {
    fn default() -> Self {
        Self {
            workshop_title: "Workshop Title".to_string(),
            subtitle: String::new(),
            tutors: "Instructor".to_string(),
            duration: "Duration_hours".to_string(),
            contents: vec![
                "Content_item 1".to_string(),
                "Content_item 2".to_string(),
                "Content_item 3".to_string(),
                "Content_item 4".to_string(),
            ],
            date: None,
            date_range: None,
            signatory1: "Instructor".to_string(),
            signatory2: "Chair".to_string(),
            location: "Location".to_string(),
            id_prefix: "CERT".to_string(),
        }
    }
}

impl CertificateOptions {
    /// The caller-wide date, falling back to `today` as `YYYY-MM-DD`.
    pub fn resolved_date(&self, today: NaiveDate) -> String {
        match &self.date {
            Some(date) => date.clone(),
            None => today.format(DATE_FORMAT).to_string(),
        }
    }

    /// The configured date range, or `date` when none is set.
    pub fn resolved_date_range(&self, date: &str) -> String {
        self.date_range.clone().unwrap_or_else(|| date.to_string())
    }
}

/// Roster column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub lastname: String,
    pub name: String,
    pub completion_date: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            lastname: "Lastname".to_string(),
            name: "Name".to_string(),
            completion_date: "completion_date".to_string(),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub roster: PathBuf,
    /// Template file; `None` uses the embedded certificate template.
    pub template: Option<PathBuf>,
    /// Staging directory for `.tex` documents and renderer byproducts.
    pub tex_dir: PathBuf,
    /// Destination directory for finished artifacts.
    pub output_dir: PathBuf,
    /// File name of the combined document inside `tex_dir`.
    pub combined_document: String,
    /// File name of the combined artifact inside `output_dir`.
    pub combined_artifact: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            roster: PathBuf::from("names.csv"),
            template: None,
            tex_dir: PathBuf::from("output/tex"),
            output_dir: PathBuf::from("output/pdfs"),
            combined_document: "certificates.tex".to_string(),
            combined_artifact: "all_certificates.pdf".to_string(),
        }
    }
}

/// External typesetting command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub program: String,
    /// Arguments passed before the document file name.
    pub args: Vec<String>,
    pub artifact_extension: String,
    /// Byproducts deleted after a successful run.
    pub aux_extensions: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "xelatex".to_string(),
            args: vec!["-interaction=nonstopmode".to_string()],
            artifact_extension: "pdf".to_string(),
            aux_extensions: vec!["aux".to_string(), "log".to_string(), "out".to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Root of `certgen.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub certificate: CertificateOptions,
    pub columns: Columns,
    pub paths: Paths,
    pub engine: EngineConfig,
}

impl Config {
    /// Load a config file that must exist.
    ///
    /// Returns `CoreError::ConfigNotFound` if absent,
    /// `CoreError::ConfigParse` (with path + line context) if malformed YAML.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if it exists, otherwise fall back to [`Config::default`].
    pub fn load_or_default(path: &Path) -> Result<Self, CoreError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {}; using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Serialize to YAML (used by `certgen init`).
    pub fn to_yaml(&self) -> Result<String, CoreError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
