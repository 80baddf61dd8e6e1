// ── User-facing site configuration ──

use serde::Serialize;

use super::setting::Setting;
use crate::cidr;
use crate::error::CoreError;

/// Mask applied by the schema when an IP restriction omits `subnet_mask`.
pub const DEFAULT_SUBNET_MASK: &str = "255.255.255.255";

/// One access-control rule as the user authors it: address plus optional mask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IpRestriction {
    pub ip_address: String,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub subnet_mask: Setting<String>,
}

impl IpRestriction {
    pub fn new(ip_address: impl Into<String>, subnet_mask: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            subnet_mask: Setting::Explicit(subnet_mask.into()),
        }
    }

    /// An address with the schema's default single-host mask.
    pub fn host(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            subnet_mask: Setting::Default(DEFAULT_SUBNET_MASK.into()),
        }
    }

    /// The mask as a string, empty when unset.
    pub fn subnet_mask(&self) -> &str {
        self.subnet_mask.as_deref().unwrap_or("")
    }

    /// The mask handed to the CIDR encoder.
    ///
    /// A schema-filled default never overrides a prefix already written into
    /// the address (`10.0.0.0/24` keeps its `/24`); an authored mask always
    /// applies.
    fn encoding_mask(&self) -> &str {
        match &self.subnet_mask {
            Setting::Default(_) if self.ip_address.contains('/') => "",
            other => other.as_deref().unwrap_or(""),
        }
    }

    /// Encode as the single CIDR string the 2018-02-01 API expects.
    pub fn to_cidr(&self) -> Result<String, CoreError> {
        cidr::encode(&self.ip_address, self.encoding_mask())
    }
}

/// The canonical site configuration block.
///
/// At most one exists per site. Scalars are [`Setting`]s so that schema
/// defaults, authored values, and "leave it to the service" stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub always_on: Setting<bool>,
    pub default_documents: Vec<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub dotnet_framework_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub http2_enabled: Setting<bool>,
    pub ip_restriction: Vec<IpRestriction>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub java_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub java_container: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub java_container_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub local_mysql_enabled: Setting<bool>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub managed_pipeline_mode: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub php_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub python_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub remote_debugging_enabled: Setting<bool>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub remote_debugging_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub scm_type: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub use_32_bit_worker_process: Setting<bool>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub websockets_enabled: Setting<bool>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub ftps_state: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub linux_fx_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub min_tls_version: Setting<String>,
    #[serde(skip_serializing_if = "Setting::is_unset")]
    pub virtual_network_name: Setting<String>,
}
