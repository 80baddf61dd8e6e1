// ── Site configuration schema ──
//
// Declares every user-facing field (type, default, allowed values, case
// rules) and decodes a generic key→value document into a typed
// `SiteConfig`. Validation happens here, once, so the field mappers in
// `crate::convert` can work on trusted values.

use std::fmt;

use serde_json::{Map, Value};
use strum::Display;

use crate::error::CoreError;
use crate::model::{DEFAULT_SUBNET_MASK, IpRestriction, Setting, SiteConfig};

use DefaultValue::{Bool as DefaultBool, Str as DefaultStr};
use FieldKind::{BlockList, Bool, String as Text, StringList};

/// A site carries at most one configuration block.
pub const MAX_SITE_CONFIGS: usize = 1;

// ── Field descriptors ──────────────────────────────────────────────

/// Value type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FieldKind {
    #[strum(to_string = "bool")]
    Bool,
    #[strum(to_string = "string")]
    String,
    #[strum(to_string = "list(string)")]
    StringList,
    #[strum(to_string = "list(block)")]
    BlockList(&'static [FieldSpec]),
}

/// Value filled in when a field is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Str(&'static str),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// One declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// The service fills the value in when the user leaves it out.
    pub computed: bool,
    pub default: Option<DefaultValue>,
    /// Closed value set; empty means free-form.
    pub allowed: &'static [&'static str],
    /// Membership in `allowed` ignores ASCII case.
    pub ignore_case: bool,
    /// Values differing only in ASCII case are treated as unchanged.
    pub suppress_case_diff: bool,
    /// `""` reads as omitted: the zero value of a plain wire enum.
    pub blank_is_unset: bool,
}

impl FieldSpec {
    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            computed: false,
            default: None,
            allowed: &[],
            ignore_case: false,
            suppress_case_diff: false,
            blank_is_unset: false,
        }
    }

    const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    const fn computed(self) -> Self {
        Self {
            computed: true,
            ..self
        }
    }

    const fn default_value(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self { allowed, ..self }
    }

    /// Case-insensitive membership and case-difference suppression.
    const fn case_insensitive(self) -> Self {
        Self {
            ignore_case: true,
            suppress_case_diff: true,
            ..self
        }
    }

    /// Exact membership, but case-only differences are not reported.
    const fn suppress_case_diff(self) -> Self {
        Self {
            suppress_case_diff: true,
            ..self
        }
    }

    const fn blank_is_unset(self) -> Self {
        Self {
            blank_is_unset: true,
            ..self
        }
    }

    fn default_str(&self) -> Option<String> {
        match self.default {
            Some(DefaultValue::Str(s)) => Some(s.to_owned()),
            _ => None,
        }
    }

    /// Whether `value` is acceptable under this field's allowed set.
    pub fn accepts(&self, value: &str) -> bool {
        self.allowed.is_empty()
            || self.allowed.iter().any(|allowed| {
                if self.ignore_case {
                    allowed.eq_ignore_ascii_case(value)
                } else {
                    *allowed == value
                }
            })
    }

    /// Whether an old and new value count as the same configuration.
    pub fn values_equivalent(&self, old: &str, new: &str) -> bool {
        if self.suppress_case_diff {
            old.eq_ignore_ascii_case(new)
        } else {
            old == new
        }
    }
}

/// Fields of one `ip_restriction` entry.
pub const IP_RESTRICTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("ip_address", Text).required(),
    FieldSpec::optional("subnet_mask", Text).default_value(DefaultStr(DEFAULT_SUBNET_MASK)),
];

/// Fields of the `site_config` block.
pub static SITE_CONFIG_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("always_on", Bool).default_value(DefaultBool(false)),
    FieldSpec::optional("default_documents", StringList),
    FieldSpec::optional("dotnet_framework_version", Text)
        .default_value(DefaultStr("v4.0"))
        .one_of(&["v2.0", "v4.0"])
        .case_insensitive(),
    FieldSpec::optional("http2_enabled", Bool).default_value(DefaultBool(false)),
    FieldSpec::optional("ip_restriction", BlockList(IP_RESTRICTION_FIELDS)).computed(),
    FieldSpec::optional("java_version", Text).one_of(&["1.7", "1.8"]),
    FieldSpec::optional("java_container", Text)
        .one_of(&["JETTY", "TOMCAT"])
        .case_insensitive(),
    FieldSpec::optional("java_container_version", Text),
    FieldSpec::optional("local_mysql_enabled", Bool).computed(),
    FieldSpec::optional("managed_pipeline_mode", Text)
        .computed()
        .one_of(&["Classic", "Integrated"])
        .case_insensitive()
        .blank_is_unset(),
    FieldSpec::optional("php_version", Text).one_of(&["5.5", "5.6", "7.0", "7.1"]),
    FieldSpec::optional("python_version", Text).one_of(&["2.7", "3.4"]),
    FieldSpec::optional("remote_debugging_enabled", Bool).default_value(DefaultBool(false)),
    FieldSpec::optional("remote_debugging_version", Text)
        .computed()
        .one_of(&["VS2012", "VS2013", "VS2015", "VS2017"])
        .case_insensitive(),
    FieldSpec::optional("scm_type", Text)
        .default_value(DefaultStr("None"))
        .one_of(&["None", "LocalGit"])
        .suppress_case_diff()
        .blank_is_unset(),
    FieldSpec::optional("use_32_bit_worker_process", Bool).computed(),
    FieldSpec::optional("websockets_enabled", Bool).computed(),
    FieldSpec::optional("ftps_state", Text)
        .computed()
        .one_of(&["AllAllowed", "Disabled", "FtpsOnly"])
        .suppress_case_diff()
        .blank_is_unset(),
    FieldSpec::optional("linux_fx_version", Text).computed(),
    FieldSpec::optional("min_tls_version", Text)
        .computed()
        .one_of(&["1.0", "1.1", "1.2"])
        .blank_is_unset(),
    FieldSpec::optional("virtual_network_name", Text),
];

/// Look up a `site_config` field by name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    SITE_CONFIG_FIELDS.iter().find(|spec| spec.name == name)
}

// ── Decoding ───────────────────────────────────────────────────────

/// Decode the `site_config` value of a document.
///
/// Accepts `null` (no configuration), a list of at most one block, or a bare
/// block (TOML `[site_config]` tables read that way).
pub fn decode_site_config(value: &Value) -> Result<Vec<SiteConfig>, CoreError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(value),
        other => {
            return Err(CoreError::invalid_field(
                "site_config",
                format!("expected a list of blocks, got {}", type_name(other)),
            ));
        }
    };

    if items.len() > MAX_SITE_CONFIGS {
        return Err(CoreError::invalid_field(
            "site_config",
            format!(
                "at most {MAX_SITE_CONFIGS} block may be given, got {}",
                items.len()
            ),
        ));
    }

    items.iter().map(decode_block).collect()
}

fn decode_block(value: &Value) -> Result<SiteConfig, CoreError> {
    let block = Block::new(value, SITE_CONFIG_FIELDS, "site_config".into())?;

    Ok(SiteConfig {
        always_on: block.bool("always_on")?,
        default_documents: block.string_list("default_documents")?,
        dotnet_framework_version: block.string("dotnet_framework_version")?,
        http2_enabled: block.bool("http2_enabled")?,
        ip_restriction: block.ip_restrictions("ip_restriction")?,
        java_version: block.string("java_version")?,
        java_container: block.string("java_container")?,
        java_container_version: block.string("java_container_version")?,
        local_mysql_enabled: block.bool("local_mysql_enabled")?,
        managed_pipeline_mode: block.string("managed_pipeline_mode")?,
        php_version: block.string("php_version")?,
        python_version: block.string("python_version")?,
        remote_debugging_enabled: block.bool("remote_debugging_enabled")?,
        remote_debugging_version: block.string("remote_debugging_version")?,
        scm_type: block.string("scm_type")?,
        use_32_bit_worker_process: block.bool("use_32_bit_worker_process")?,
        websockets_enabled: block.bool("websockets_enabled")?,
        ftps_state: block.string("ftps_state")?,
        linux_fx_version: block.string("linux_fx_version")?,
        min_tls_version: block.string("min_tls_version")?,
        virtual_network_name: block.string("virtual_network_name")?,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a block",
    }
}

/// One object being decoded against a field table.
struct Block<'a> {
    map: &'a Map<String, Value>,
    fields: &'static [FieldSpec],
    path: String,
}

impl<'a> Block<'a> {
    fn new(value: &'a Value, fields: &'static [FieldSpec], path: String) -> Result<Self, CoreError> {
        let Value::Object(map) = value else {
            return Err(CoreError::invalid_field(
                path,
                format!("expected a block, got {}", type_name(value)),
            ));
        };

        if let Some(unknown) = map
            .keys()
            .find(|key| !fields.iter().any(|spec| spec.name == key.as_str()))
        {
            return Err(CoreError::invalid_field(
                format!("{path}.{unknown}"),
                "unsupported argument",
            ));
        }

        Ok(Self { map, fields, path })
    }

    fn spec(&self, name: &str) -> Result<&'static FieldSpec, CoreError> {
        self.fields
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| CoreError::invalid_field(self.path_of(name), "field is not declared"))
    }

    fn path_of(&self, name: &str) -> String {
        format!("{}.{name}", self.path)
    }

    /// The supplied value, treating `null` as omitted.
    fn supplied(&self, spec: &FieldSpec) -> Result<Option<&'a Value>, CoreError> {
        match self.map.get(spec.name).filter(|v| !v.is_null()) {
            None if spec.required => Err(CoreError::invalid_field(
                self.path_of(spec.name),
                "required field is missing",
            )),
            other => Ok(other),
        }
    }

    fn mismatch(&self, spec: &FieldSpec, value: &Value) -> CoreError {
        CoreError::invalid_field(
            self.path_of(spec.name),
            format!("expected {}, got {}", spec.kind, type_name(value)),
        )
    }

    fn bool(&self, name: &str) -> Result<Setting<bool>, CoreError> {
        let spec = self.spec(name)?;
        let supplied = match self.supplied(spec)? {
            Some(value) => Some(value.as_bool().ok_or_else(|| self.mismatch(spec, value))?),
            None => None,
        };
        let default = match spec.default {
            Some(DefaultValue::Bool(b)) => Some(b),
            _ => None,
        };
        Ok(Setting::resolve(supplied, default))
    }

    fn string(&self, name: &str) -> Result<Setting<String>, CoreError> {
        let spec = self.spec(name)?;
        let supplied = match self.supplied(spec)? {
            Some(value) => {
                let text = value.as_str().ok_or_else(|| self.mismatch(spec, value))?;
                if text.is_empty() && spec.blank_is_unset {
                    return Ok(Setting::resolve(None, spec.default_str()));
                }
                if !spec.accepts(text) {
                    return Err(CoreError::invalid_field(
                        self.path_of(name),
                        format!(
                            "expected one of [{}], got '{text}'",
                            spec.allowed.join(", ")
                        ),
                    ));
                }
                Some(text.to_owned())
            }
            None => None,
        };
        Ok(Setting::resolve(supplied, spec.default_str()))
    }


    fn required_string(&self, name: &str) -> Result<String, CoreError> {
        self.string(name)?
            .into_value()
            .ok_or_else(|| CoreError::invalid_field(self.path_of(name), "required field is missing"))
    }

    fn string_list(&self, name: &str) -> Result<Vec<String>, CoreError> {
        let spec = self.spec(name)?;
        let Some(value) = self.supplied(spec)? else {
            return Ok(Vec::new());
        };
        let items = value.as_array().ok_or_else(|| self.mismatch(spec, value))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    CoreError::invalid_field(
                        format!("{}.{i}", self.path_of(name)),
                        format!("expected string, got {}", type_name(item)),
                    )
                })
            })
            .collect()
    }

    fn ip_restrictions(&self, name: &str) -> Result<Vec<IpRestriction>, CoreError> {
        let spec = self.spec(name)?;
        let FieldKind::BlockList(fields) = spec.kind else {
            return Err(CoreError::invalid_field(self.path_of(name), "field is not a block list"));
        };
        let Some(value) = self.supplied(spec)? else {
            return Ok(Vec::new());
        };
        let items = value.as_array().ok_or_else(|| self.mismatch(spec, value))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("{}.{i}", self.path_of(name));
                let entry = Block::new(item, fields, path.clone())?;
                let restriction = IpRestriction {
                    ip_address: entry.required_string("ip_address")?,
                    subnet_mask: entry.string("subnet_mask")?,
                };
                // Reject literals the encoder would refuse, before anything is sent.
                restriction.to_cidr().map_err(|e| e.at(path))?;
                Ok(restriction)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn every_field_has_a_unique_name() {
        for (i, spec) in SITE_CONFIG_FIELDS.iter().enumerate() {
            assert!(
                SITE_CONFIG_FIELDS[i + 1..].iter().all(|other| other.name != spec.name),
                "duplicate field {}",
                spec.name
            );
        }
        assert_eq!(SITE_CONFIG_FIELDS.len(), 21);
    }

    #[test]
    fn null_and_empty_list_decode_to_no_block() {
        assert!(decode_site_config(&Value::Null).unwrap().is_empty());
        assert!(decode_site_config(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn empty_block_gets_schema_defaults() {
        let configs = decode_site_config(&json!([{}])).unwrap();
        let config = &configs[0];

        assert_eq!(config.always_on, Setting::Default(false));
        assert_eq!(config.http2_enabled, Setting::Default(false));
        assert_eq!(config.remote_debugging_enabled, Setting::Default(false));
        assert_eq!(config.dotnet_framework_version, Setting::Default("v4.0".into()));
        assert_eq!(config.scm_type, Setting::Default("None".into()));
        assert!(config.managed_pipeline_mode.is_unset());
        assert!(config.local_mysql_enabled.is_unset());
        assert!(config.virtual_network_name.is_unset());
        assert!(config.default_documents.is_empty());
        assert!(config.ip_restriction.is_empty());
    }

    #[test]
    fn supplied_values_are_explicit() {
        let configs = decode_site_config(&json!([{
            "always_on": true,
            "default_documents": ["index.html", "default.aspx"],
            "java_container": "tomcat",
            "php_version": "7.1",
            "virtual_network_name": "vnet-app",
        }]))
        .unwrap();
        let config = &configs[0];

        assert_eq!(config.always_on, Setting::Explicit(true));
        assert_eq!(config.default_documents, vec!["index.html", "default.aspx"]);
        assert_eq!(config.java_container, Setting::Explicit("tomcat".into()));
        assert_eq!(config.php_version, Setting::Explicit("7.1".into()));
        assert_eq!(config.virtual_network_name, Setting::Explicit("vnet-app".into()));
    }

    #[test]
    fn bare_block_is_accepted() {
        let configs = decode_site_config(&json!({ "websockets_enabled": true })).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].websockets_enabled, Setting::Explicit(true));
    }

    #[test]
    fn more_than_one_block_is_rejected() {
        let err = decode_site_config(&json!([{}, {}])).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("site_config"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = decode_site_config(&json!([{ "always_off": true }])).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("site_config.always_off"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = decode_site_config(&json!([{ "always_on": "yes" }])).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidField {
                field: "site_config.always_on".into(),
                reason: "expected bool, got a string".into(),
            }
        );
    }

    #[test]
    fn allowed_values_respect_case_rules() {
        assert!(decode_site_config(&json!([{ "managed_pipeline_mode": "integrated" }])).is_ok());
        assert!(decode_site_config(&json!([{ "remote_debugging_version": "vs2017" }])).is_ok());
        assert!(decode_site_config(&json!([{ "scm_type": "localgit" }])).is_err());
        assert!(decode_site_config(&json!([{ "php_version": "8.0" }])).is_err());
        assert!(decode_site_config(&json!([{ "min_tls_version": "1.3" }])).is_err());
    }

    #[test]
    fn blank_wire_enum_reads_as_omitted() {
        let configs = decode_site_config(&json!([{
            "managed_pipeline_mode": "",
            "scm_type": "",
            "ftps_state": "",
            "min_tls_version": "",
        }]))
        .unwrap();
        let config = &configs[0];

        assert!(config.managed_pipeline_mode.is_unset());
        assert_eq!(config.scm_type, Setting::Default("None".into()));
        assert!(config.ftps_state.is_unset());
        assert!(config.min_tls_version.is_unset());

        assert!(decode_site_config(&json!([{ "php_version": "" }])).is_err());
    }

    #[test]
    fn restriction_mask_defaults_to_single_host() {
        let configs = decode_site_config(&json!([{
            "ip_restriction": [
                { "ip_address": "10.0.0.0", "subnet_mask": "255.255.255.0" },
                { "ip_address": "192.168.1.5" },
            ],
        }]))
        .unwrap();
        let restrictions = &configs[0].ip_restriction;

        assert_eq!(restrictions[0], IpRestriction::new("10.0.0.0", "255.255.255.0"));
        assert_eq!(restrictions[1], IpRestriction::host("192.168.1.5"));
    }

    #[test]
    fn restriction_requires_an_address() {
        let err = decode_site_config(&json!([{
            "ip_restriction": [{ "subnet_mask": "255.255.255.0" }],
        }]))
        .unwrap_err();
        assert_eq!(
            err.field_path().as_deref(),
            Some("site_config.ip_restriction.0.ip_address")
        );
    }

    #[test]
    fn malformed_network_literal_is_a_field_error() {
        let err = decode_site_config(&json!([{
            "ip_restriction": [
                { "ip_address": "10.0.0.1" },
                { "ip_address": "10.0.0.0", "subnet_mask": "255.0.255.0" },
            ],
        }]))
        .unwrap_err();

        assert_eq!(
            err.field_path().as_deref(),
            Some("site_config.ip_restriction.1")
        );
        assert_eq!(
            err.root(),
            &CoreError::InvalidSubnetMask {
                mask: "255.0.255.0".into()
            }
        );
    }

    #[test]
    fn case_differences_are_suppressed_per_field() {
        let pipeline = field("managed_pipeline_mode").unwrap();
        assert!(pipeline.values_equivalent("Integrated", "INTEGRATED"));

        let scm = field("scm_type").unwrap();
        assert!(scm.values_equivalent("LocalGit", "localgit"));

        let ftps = field("ftps_state").unwrap();
        assert!(ftps.values_equivalent("FtpsOnly", "ftpsonly"));

        let php = field("php_version").unwrap();
        assert!(!php.values_equivalent("7.0", "7.1"));

        let vnet = field("virtual_network_name").unwrap();
        assert!(!vnet.values_equivalent("vnet-A", "vnet-a"));
    }

    #[test]
    fn field_kinds_display_like_the_schema() {
        assert_eq!(field("always_on").unwrap().kind.to_string(), "bool");
        assert_eq!(field("default_documents").unwrap().kind.to_string(), "list(string)");
        assert_eq!(field("ip_restriction").unwrap().kind.to_string(), "list(block)");
        assert_eq!(
            field("dotnet_framework_version").unwrap().default.unwrap().to_string(),
            "v4.0"
        );
    }
}
