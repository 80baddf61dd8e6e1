//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use appsvc_config::ConfigError;
use appsvc_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const DATA: i32 = 65;
    pub const IO: i32 = 74;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Site config ──────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(
        code(appsvc::validation),
        help("Run: appsvc schema to see field types and allowed values")
    )]
    Validation { field: String, reason: String },

    #[error("'{value}' is not a valid IPv4 address or CIDR block")]
    #[diagnostic(
        code(appsvc::invalid_network),
        help(
            "Use a dotted-quad IPv4 address such as 10.0.0.0, optionally with a /0-/32 prefix.\n\
             Field: {field}"
        )
    )]
    InvalidNetwork { value: String, field: String },

    #[error("'{mask}' is not a contiguous subnet mask")]
    #[diagnostic(
        code(appsvc::invalid_mask),
        help(
            "Subnet masks must be leading ones followed by zeros, e.g. 255.255.255.0.\n\
             Field: {field}"
        )
    )]
    InvalidMask { mask: String, field: String },

    // ── Documents ────────────────────────────────────────────────────
    #[error("Unsupported document type '{extension}' for {path}")]
    #[diagnostic(
        code(appsvc::unsupported_format),
        help("Use a .json, .yaml, .yml, or .toml file, or - to read JSON from stdin.")
    )]
    UnsupportedFormat { path: String, extension: String },

    #[error("Invalid API payload: {0}")]
    #[diagnostic(
        code(appsvc::payload),
        help("Expected a SiteConfig JSON object, an ARM resource with `properties`, or null.")
    )]
    Payload(#[source] serde_json::Error),

    #[error("Cannot read {path}")]
    #[diagnostic(code(appsvc::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(appsvc::config))]
    Config(Box<ConfigError>),

    // ── Output ───────────────────────────────────────────────────────
    #[error("Failed to render {format} output: {reason}")]
    #[diagnostic(code(appsvc::render))]
    Render { format: String, reason: String },

    #[error(transparent)]
    Write(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::UnsupportedFormat { .. } => exit_code::USAGE,
            Self::InvalidNetwork { .. }
            | Self::InvalidMask { .. }
            | Self::Payload(_)
            | Self::Config(_) => exit_code::DATA,
            Self::Io { .. } | Self::Write(_) => exit_code::IO,
            Self::Render { .. } => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let field = err.field_path().unwrap_or_else(|| "input".into());

        match err.root() {
            CoreError::InvalidNetworkLiteral { value } => CliError::InvalidNetwork {
                value: value.clone(),
                field,
            },
            CoreError::InvalidSubnetMask { mask } => CliError::InvalidMask {
                mask: mask.clone(),
                field,
            },
            CoreError::InvalidField { reason, .. } => CliError::Validation {
                field,
                reason: reason.clone(),
            },
            // `root` never returns a wrapper.
            CoreError::Field { .. } => CliError::Validation {
                field,
                reason: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnsupportedFormat { path, extension } => {
                CliError::UnsupportedFormat { path, extension }
            }
            ConfigError::Io { path, source } => CliError::Io { path, source },
            other => CliError::Config(Box::new(other)),
        }
    }
}
