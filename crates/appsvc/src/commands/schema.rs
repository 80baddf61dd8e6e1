//! Schema listing.

use serde::Serialize;
use tabled::Tabled;

use appsvc_core::schema::{FieldKind, FieldSpec, SITE_CONFIG_FIELDS, field};

use crate::cli::{GlobalOpts, SchemaArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    name: &'static str,
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    kind: String,
    required: bool,
    computed: bool,
    default: String,
    allowed: String,
    #[tabled(rename = "case")]
    #[serde(rename = "case")]
    case_rule: &'static str,
}

impl From<&FieldSpec> for FieldRow {
    fn from(spec: &FieldSpec) -> Self {
        let case_rule = match (spec.ignore_case, spec.suppress_case_diff) {
            (true, _) => "insensitive",
            (false, true) => "diff-suppressed",
            (false, false) => "",
        };
        Self {
            name: spec.name,
            kind: spec.kind.to_string(),
            required: spec.required,
            computed: spec.computed,
            default: spec.default.as_ref().map(ToString::to_string).unwrap_or_default(),
            allowed: spec.allowed.join(", "),
            case_rule,
        }
    }
}

#[derive(Debug, Serialize)]
struct SchemaDocument {
    block: String,
    fields: Vec<FieldRow>,
}

fn block_fields(block: Option<&str>) -> Result<(&'static [FieldSpec], String), CliError> {
    let Some(name) = block else {
        return Ok((SITE_CONFIG_FIELDS, "site_config".into()));
    };

    match field(name).map(|spec| spec.kind) {
        Some(FieldKind::BlockList(fields)) => Ok((fields, format!("site_config.{name}"))),
        _ => Err(CliError::Validation {
            field: "--block".into(),
            reason: format!("'{name}' is not a nested block of site_config"),
        }),
    }
}

pub fn handle(args: &SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let (fields, block) = block_fields(args.block.as_deref())?;
    let doc = SchemaDocument {
        block,
        fields: fields.iter().map(FieldRow::from).collect(),
    };
    let rendered = output::render_rows(global.output, &doc, &doc.fields)?;
    output::print_output(&rendered, global.quiet)
}
