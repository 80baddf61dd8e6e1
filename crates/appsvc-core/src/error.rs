// ── Core error types ──
//
// Failures raised while decoding, expanding, or flattening a site config.
// Network literal problems are raised without context by the `cidr` module
// and wrapped with the offending field path by the callers.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Network literals ─────────────────────────────────────────────
    #[error("'{value}' is not a valid IPv4 address or CIDR block")]
    InvalidNetworkLiteral { value: String },

    #[error("'{mask}' is not a contiguous subnet mask")]
    InvalidSubnetMask { mask: String },

    // ── Schema ───────────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A nested failure attributed to a field path (e.g. `ip_restriction.0`).
    #[error("Invalid value for {field}: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    pub(crate) fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Attribute this error to `field`.
    #[must_use]
    pub fn at(self, field: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all field attributions peeled off.
    pub fn root(&self) -> &CoreError {
        match self {
            Self::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Dotted path of the field the error is attributed to, if any.
    pub fn field_path(&self) -> Option<String> {
        match self {
            Self::Field { field, source } => match source.field_path() {
                Some(inner) => Some(format!("{field}.{inner}")),
                None => Some(field.clone()),
            },
            Self::InvalidField { field, .. } => Some(field.clone()),
            Self::InvalidNetworkLiteral { .. } | Self::InvalidSubnetMask { .. } => None,
        }
    }
}
