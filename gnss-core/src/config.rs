//! Configuration file management for gnss-bands.
//!
//! Reads/writes `~/.gnss-bands/config.yaml` with classifier settings
//! (match tolerance, default constellation context) and output format.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::classify::{Classifier, DEFAULT_TOLERANCE_MHZ};
use crate::types::{Constellation, GnssError};

/// Full configuration structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub tolerance_mhz: f64,
    pub context: Option<Constellation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How the host renders classification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GnssError;

    fn from_str(s: &str) -> Result<Self, GnssError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(GnssError::Config(format!("unknown output format: {other}"))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            classifier: ClassifierConfig {
                tolerance_mhz: DEFAULT_TOLERANCE_MHZ,
                context: None,
            },
            output: OutputConfig {
                format: OutputFormat::Table,
            },
        }
    }
}

impl Config {
    /// Build the classifier described by this config.
    pub fn classifier(&self) -> Result<Classifier, GnssError> {
        Ok(Classifier::new(self.classifier.tolerance_mhz)?.with_context(self.classifier.context))
    }
}

/// Get the config directory path (`~/.gnss-bands/`).
pub fn config_dir() -> PathBuf {
    dirs_home().join(".gnss-bands")
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.yaml")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load config from `~/.gnss-bands/config.yaml`.
///
/// Returns the default config if the file doesn't exist. A file that exists
/// but can't be read or holds invalid values is an error.
pub fn load_config() -> Result<Config, GnssError> {
    let path = config_file();
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(&path)?;
    parse_config(&text)
}

/// Save config to `~/.gnss-bands/config.yaml`.
pub fn save_config(config: &Config) -> Result<PathBuf, GnssError> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;

    let path = config_file();
    std::fs::write(&path, serialize_config(config))?;

    Ok(path)
}

/// Parse simple YAML-like config text. Unknown keys are ignored.
pub fn parse_config(text: &str) -> Result<Config, GnssError> {
    let mut config = Config::default();
    let mut current_section: Option<String> = None;

    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        let is_indented = line.starts_with("  ") || line.starts_with('\t');

        let Some((key, val)) = stripped.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let val = val.trim();

        if !is_indented {
            current_section = val.is_empty().then(|| key.to_string());
            continue;
        }

        match (current_section.as_deref(), key) {
            (Some("classifier"), "tolerance_mhz") => {
                if let Some(v) = parse_float_value(key, val)? {
                    // Out-of-range tolerance is rejected at load
                    Classifier::new(v)?;
                    config.classifier.tolerance_mhz = v;
                }
            }
            (Some("classifier"), "context") => {
                config.classifier.context = match parse_string_value(val) {
                    Some(v) => Some(v.parse()?),
                    None => None,
                };
            }
            (Some("output"), "format") => {
                if let Some(v) = parse_string_value(val) {
                    config.output.format = v.parse()?;
                }
            }
            _ => {}
        }
    }

    Ok(config)
}

fn parse_string_value(val: &str) -> Option<String> {
    if val == "null" || val == "~" || val.is_empty() {
        return None;
    }
    // Strip quotes
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        return Some(val[1..val.len() - 1].to_string());
    }
    Some(val.to_string())
}

/// `None` for an unset value; anything else must be a number.
fn parse_float_value(key: &str, val: &str) -> Result<Option<f64>, GnssError> {
    if val == "null" || val == "~" || val.is_empty() {
        return Ok(None);
    }
    val.parse()
        .map(Some)
        .map_err(|_| GnssError::Config(format!("invalid {key}: {val}")))
}

/// Serialize config to YAML-like text.
pub fn serialize_config(config: &Config) -> String {
    let mut lines = vec!["# gnss-bands configuration".to_string(), String::new()];

    lines.push("classifier:".into());
    lines.push(format!("  tolerance_mhz: {}", config.classifier.tolerance_mhz));
    match config.classifier.context {
        Some(c) => lines.push(format!("  context: \"{}\"", c.name())),
        None => lines.push("  context: null".into()),
    }
    lines.push(String::new());

    lines.push("output:".into());
    lines.push(format!("  format: {}", config.output.format));

    lines.join("\n") + "\n"
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
