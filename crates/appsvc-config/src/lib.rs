//! Configuration and document loading for the appsvc tools.
//!
//! A small TOML config file (output defaults) layered with `APPSVC_*`
//! environment variables, plus loaders that normalise JSON, YAML and TOML
//! input documents into a `serde_json::Value` for the schema decoder.

use std::io::Read;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Output formats the binary knows how to render.
pub const OUTPUT_FORMATS: &[&str] = &["json", "yaml", "toml"];

/// Path argument that means "read the document from stdin".
pub const STDIN_PATH: &str = "-";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported document type '{extension}' for {path}")]
    UnsupportedFormat { path: String, extension: String },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Output format when `--output` is not given.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> String {
    "json".into()
}

impl Config {
    fn validate(self) -> Result<Self, ConfigError> {
        let output = self.defaults.output.to_ascii_lowercase();
        if !OUTPUT_FORMATS.contains(&output.as_str()) {
            return Err(ConfigError::Validation {
                field: "defaults.output".into(),
                reason: format!(
                    "expected one of {}, got '{}'",
                    OUTPUT_FORMATS.join(", "),
                    self.defaults.output
                ),
            });
        }
        Ok(Self {
            defaults: Defaults { output },
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "appsvc", "appsvc").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("appsvc");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from a specific file + environment.
///
/// A missing file is not an error; figment simply skips the layer.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("APPSVC_").split("_"));

    let config: Config = figment.extract()?;
    config.validate()
}

/// Load config, falling back to defaults when it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable config");
        Config::default()
    })
}

// ── Documents ───────────────────────────────────────────────────────

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Pick a format from the file extension; stdin is always JSON.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if path.as_os_str() == STDIN_PATH {
            return Ok(Self::Json);
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
                extension,
            }),
        }
    }
}

/// Parse document text into a JSON value.
///
/// `origin` only labels errors.
pub fn parse_document(text: &str, format: DocumentFormat, origin: &str) -> Result<Value, ConfigError> {
    let path = origin.to_owned();
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|source| ConfigError::Json { path, source })
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml { path, source })
        }
        DocumentFormat::Toml => {
            toml::from_str(text).map_err(|source| ConfigError::Toml { path, source })
        }
    }
}

/// Read and parse a document from disk, or from stdin when `path` is `-`.
pub fn load_document(path: &Path) -> Result<Value, ConfigError> {
    let format = DocumentFormat::from_path(path)?;
    let origin = path.display().to_string();

    let io_err = |source| ConfigError::Io {
        path: origin.clone(),
        source,
    };

    let text = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    tracing::debug!(path = %origin, ?format, bytes = text.len(), "loaded document");
    parse_document(&text, format, &origin)
}
