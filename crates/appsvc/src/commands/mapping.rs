//! Expand and flatten command handlers.

use serde::Serialize;
use serde_json::Value;

use appsvc_api::web;
use appsvc_core::{SiteConfig, decode_site_config, expand_site_config, flatten_site_config};

use crate::cli::{ExpandArgs, FlattenArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::output_format;

/// Key holding the user's block list in an input document.
const SITE_CONFIG_KEY: &str = "site_config";

/// Key an ARM resource envelope nests the SiteConfig body under.
const PROPERTIES_KEY: &str = "properties";

static NULL: Value = Value::Null;

#[derive(Debug, Serialize)]
struct FlattenedDocument {
    site_config: Vec<SiteConfig>,
}

// ── Document shapes ──────────────────────────────────────────────────

/// The `site_config` value of an input document; a missing key reads as null.
fn site_config_value(document: &Value) -> Result<&Value, CliError> {
    match document {
        Value::Null => Ok(&NULL),
        Value::Object(map) => Ok(map.get(SITE_CONFIG_KEY).unwrap_or(&NULL)),
        _ => Err(CliError::Validation {
            field: "document".into(),
            reason: format!("expected a table with a `{SITE_CONFIG_KEY}` key"),
        }),
    }
}

/// Parse an API payload, unwrapping an ARM resource envelope when present.
fn wire_site_config(document: Value) -> Result<Option<web::SiteConfig>, CliError> {
    let body = match document {
        Value::Object(mut map) if map.get(PROPERTIES_KEY).is_some_and(Value::is_object) => {
            map.remove(PROPERTIES_KEY).unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(body).map_err(CliError::Payload)
}

// ── Handlers ─────────────────────────────────────────────────────────

pub fn expand(args: &ExpandArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let document = appsvc_config::load_document(&args.file)?;
    let configs = decode_site_config(site_config_value(&document)?)?;
    let wire = expand_site_config(&configs)?;

    tracing::info!(
        blocks = configs.len(),
        restrictions = wire.ip_security_restrictions.as_ref().map_or(0, Vec::len),
        "expanded site_config"
    );
    output::print_output(&output::render(output_format(global), &wire)?, global.quiet)
}

pub fn flatten(args: &FlattenArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let document = appsvc_config::load_document(&args.file)?;
    let wire = wire_site_config(document)?;
    let site_config = flatten_site_config(wire.as_ref())?;

    tracing::info!(blocks = site_config.len(), "flattened SiteConfig");
    let flattened = FlattenedDocument { site_config };
    output::print_output(&output::render(output_format(global), &flattened)?, global.quiet)
}
