//! Site configuration types for the App Service management API (2018-02-01).
//!
//! All types match the JSON bodies of the `sites/{name}/config/web`
//! endpoints. Field names use camelCase via `#[serde(rename_all = "camelCase")]`.
//!
//! Scalars are `Option`-wrapped: an absent field on the wire is `None`, never a
//! zero value. The four plain enums (`managedPipelineMode`, `scmType`,
//! `ftpsState`, `minTlsVersion`) have no absent state; their zero value is the
//! empty string, modelled as an `Unspecified` variant. They sit behind
//! [`Extensible`] so values added by later service releases still decode.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::extensible::Extensible;

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

// ── Enumerations ─────────────────────────────────────────────────────

/// IIS managed pipeline mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ManagedPipelineMode {
    #[default]
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unspecified,
    Classic,
    Integrated,
}

/// Source control type attached to the site.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ScmType {
    #[default]
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unspecified,
    None,
    Dropbox,
    Tfs,
    LocalGit,
    GitHub,
    CodePlexGit,
    CodePlexHg,
    BitbucketGit,
    BitbucketHg,
    ExternalGit,
    ExternalHg,
    OneDrive,
    #[serde(rename = "VSO")]
    #[strum(serialize = "VSO")]
    Vso,
    #[serde(rename = "VSTSRM")]
    #[strum(serialize = "VSTSRM")]
    VstsRm,
}

/// FTP / FTPS access policy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum FtpsState {
    #[default]
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unspecified,
    AllAllowed,
    FtpsOnly,
    Disabled,
}

/// Minimum inbound TLS version.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum SupportedTlsVersions {
    #[default]
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Unspecified,
    #[serde(rename = "1.0")]
    #[strum(serialize = "1.0")]
    OneFullStopZero,
    #[serde(rename = "1.1")]
    #[strum(serialize = "1.1")]
    OneFullStopOne,
    #[serde(rename = "1.2")]
    #[strum(serialize = "1.2")]
    OneFullStopTwo,
}

// ── IP security restrictions ─────────────────────────────────────────

/// One inbound access rule.
///
/// The 2018-02-01 API carries the network in `ipAddress` as CIDR
/// (`a.b.c.d/n`) and expects `subnetMask` to be blank. Older payloads used a
/// bare address plus a dotted-quad mask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpSecurityRestriction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
}

// ── Site configuration ───────────────────────────────────────────────

/// Site configuration: body of `GET/PUT .../sites/{name}/config/web`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_documents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_framework_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_container_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux_fx_version: Option<String>,
    #[serde(default, rename = "http20Enabled", skip_serializing_if = "Option::is_none")]
    pub http20_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_security_restrictions: Option<Vec<IpSecurityRestriction>>,
    #[serde(default, rename = "localMySqlEnabled", skip_serializing_if = "Option::is_none")]
    pub local_mysql_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub managed_pipeline_mode: Extensible<ManagedPipelineMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub php_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_debugging_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_debugging_version: Option<String>,
    #[serde(default, rename = "use32BitWorkerProcess", skip_serializing_if = "Option::is_none")]
    pub use_32_bit_worker_process: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_sockets_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub scm_type: Extensible<ScmType>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub ftps_state: Extensible<FtpsState>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub min_tls_version: Extensible<SupportedTlsVersions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnet_name: Option<String>,
}
