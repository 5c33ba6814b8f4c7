//! Job configuration: which PDFs to extract, with which prefixes, and where to.
//!
//! Loaded from a JSON file:
//!
//! ```json
//! {
//!   "base_dir": "/data/kagawa",
//!   "output_dir": "voice-navigator/images",
//!   "scale": 2.0,
//!   "inputs": [
//!     { "file": "hearing.pdf", "prefix": "hearing" },
//!     { "file": "shinki.pdf", "prefix": "shinki" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

pub const DEFAULT_SCALE: f32 = 2.0;
pub const CONFIG_DIR_NAME: &str = "pdfpages";
pub const CONFIG_FILE_NAME: &str = "jobs.json";
pub const LOCAL_CONFIG_FILE: &str = "pdfpages.json";

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

/// One PDF to extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Source PDF, relative to `base_dir` unless absolute.
    pub file: PathBuf,
    /// First segment of every output file name.
    pub prefix: String,
}

/// A batch of PDFs sharing one output directory and scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub base_dir: PathBuf,
    /// Relative to `base_dir` unless absolute.
    pub output_dir: PathBuf,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    /// Extra directory searched for the PDFium library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdfium_dir: Option<PathBuf>,
}

impl JobConfig {
    pub fn new(base_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            output_dir: output_dir.into(),
            scale: DEFAULT_SCALE,
            inputs: Vec::new(),
            pdfium_dir: None,
        }
    }

    pub fn with_input(mut self, file: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        self.inputs.push(InputSpec {
            file: file.into(),
            prefix: prefix.into(),
        });
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ExtractError::Config(e.to_string()))
    }

    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ExtractError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ExtractError::Config(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }

        Ok(())
    }

    /// Prefixes used by more than one input. Their pages overwrite each other.
    pub fn duplicate_prefixes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for input in &self.inputs {
            let prefix = input.prefix.as_str();
            if !seen.insert(prefix) && !duplicates.contains(&prefix) {
                duplicates.push(prefix);
            }
        }
        duplicates
    }

    /// Replaces the output directory with `output` taken relative to `cwd`,
    /// not to `base_dir`.
    pub fn override_output_dir(&mut self, output: &Path, cwd: &Path) {
        self.output_dir = cwd.join(output);
    }

    pub fn resolve_input(&self, input: &InputSpec) -> PathBuf {
        self.base_dir.join(&input.file)
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir)
    }
}

/// Picks the config file: `explicit` if given, else the first existing of
/// the user config directory file and `./pdfpages.json`.
pub fn locate_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let user_config =
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));

    user_config
        .into_iter()
        .chain(std::iter::once(PathBuf::from(LOCAL_CONFIG_FILE)))
        .find(|path| path.is_file())
}
