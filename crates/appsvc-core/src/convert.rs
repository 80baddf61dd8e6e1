// ── Domain ↔ wire conversions ──
//
// Expand turns the user-facing `SiteConfig` into the `appsvc_api::web`
// request body; flatten turns a response body back into the user-facing
// shape. Both are fallible only on network literals and enum narrowing;
// everything else is a field-by-field copy.

use std::str::FromStr;

use tracing::{debug, trace, warn};

use appsvc_api::{Extensible, web};

use crate::cidr;
use crate::error::CoreError;
use crate::model::{IpRestriction, Setting, SiteConfig};

// ── Helpers ────────────────────────────────────────────────────────

/// Narrow a string setting to a plain wire enum; unset becomes the zero value.
///
/// Only known values are sent. Unknown ones are kept on flatten but
/// rejected here.
fn wire_enum<E>(setting: &Setting<String>, field: &str) -> Result<Extensible<E>, CoreError>
where
    E: FromStr + Default,
{
    match setting.as_deref() {
        None => Ok(Extensible::default()),
        Some(raw) => raw
            .parse()
            .map(Extensible::Known)
            .map_err(|_| CoreError::invalid_field(field, format!("unrecognised value '{raw}'"))),
    }
}

fn expand_restriction(
    index: usize,
    restriction: &IpRestriction,
) -> Result<web::IpSecurityRestriction, CoreError> {
    let cidr = restriction
        .to_cidr()
        .map_err(|e| e.at(format!("ip_restriction.{index}")))?;

    Ok(web::IpSecurityRestriction {
        ip_address: Some(cidr),
        subnet_mask: Some(String::new()),
    })
}

fn flatten_restriction(
    index: usize,
    restriction: &web::IpSecurityRestriction,
) -> Result<IpRestriction, CoreError> {
    let legacy_mask = restriction.subnet_mask.as_deref();

    let Some(ip) = restriction.ip_address.as_deref() else {
        return Ok(IpRestriction {
            ip_address: String::new(),
            subnet_mask: legacy_mask
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
                .into(),
        });
    };

    let decoded = cidr::decode(ip, legacy_mask).map_err(|e| e.at(format!("ip_restriction.{index}")))?;
    Ok(IpRestriction {
        ip_address: decoded.ip_address,
        subnet_mask: decoded.subnet_mask.into(),
    })
}

// ── Expand ─────────────────────────────────────────────────────────

impl TryFrom<&SiteConfig> for web::SiteConfig {
    type Error = CoreError;

    fn try_from(c: &SiteConfig) -> Result<Self, Self::Error> {
        let ip_security_restrictions = c
            .ip_restriction
            .iter()
            .enumerate()
            .map(|(i, r)| expand_restriction(i, r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(web::SiteConfig {
            always_on: c.always_on.to_option(),
            default_documents: Some(c.default_documents.clone()),
            net_framework_version: c.dotnet_framework_version.to_option(),
            java_version: c.java_version.to_option(),
            java_container: c.java_container.to_option(),
            java_container_version: c.java_container_version.to_option(),
            linux_fx_version: c.linux_fx_version.to_option(),
            http20_enabled: c.http2_enabled.to_option(),
            ip_security_restrictions: Some(ip_security_restrictions),
            local_mysql_enabled: c.local_mysql_enabled.to_option(),
            managed_pipeline_mode: wire_enum(&c.managed_pipeline_mode, "managed_pipeline_mode")?,
            php_version: c.php_version.to_option(),
            python_version: c.python_version.to_option(),
            remote_debugging_enabled: c.remote_debugging_enabled.to_option(),
            remote_debugging_version: c.remote_debugging_version.to_option(),
            use_32_bit_worker_process: c.use_32_bit_worker_process.to_option(),
            web_sockets_enabled: c.websockets_enabled.to_option(),
            scm_type: wire_enum(&c.scm_type, "scm_type")?,
            ftps_state: wire_enum(&c.ftps_state, "ftps_state")?,
            min_tls_version: wire_enum(&c.min_tls_version, "min_tls_version")?,
            vnet_name: c.virtual_network_name.to_option(),
        })
    }
}

/// Expand the user's `site_config` list into the wire request body.
///
/// An empty list means "use service defaults": nothing is set except the two
/// list fields, which are always sent (as empty lists).
pub fn expand_site_config(configs: &[SiteConfig]) -> Result<web::SiteConfig, CoreError> {
    let Some(config) = configs.first() else {
        trace!("no site_config block supplied; sending service defaults");
        return Ok(web::SiteConfig {
            default_documents: Some(Vec::new()),
            ip_security_restrictions: Some(Vec::new()),
            ..web::SiteConfig::default()
        });
    };

    if configs.len() > 1 {
        warn!(count = configs.len(), "only the first site_config block is used");
    }

    trace!(
        restrictions = config.ip_restriction.len(),
        documents = config.default_documents.len(),
        "expanding site_config"
    );
    web::SiteConfig::try_from(config)
}

// ── Flatten ────────────────────────────────────────────────────────

impl TryFrom<&web::SiteConfig> for SiteConfig {
    type Error = CoreError;

    fn try_from(w: &web::SiteConfig) -> Result<Self, Self::Error> {
        let ip_restriction = w
            .ip_security_restrictions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, r)| flatten_restriction(i, r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SiteConfig {
            always_on: w.always_on.into(),
            default_documents: w.default_documents.clone().unwrap_or_default(),
            dotnet_framework_version: w.net_framework_version.clone().into(),
            http2_enabled: w.http20_enabled.into(),
            ip_restriction,
            java_version: w.java_version.clone().into(),
            java_container: w.java_container.clone().into(),
            java_container_version: w.java_container_version.clone().into(),
            local_mysql_enabled: w.local_mysql_enabled.into(),
            // Plain wire enums have no absent state: always report their string form.
            managed_pipeline_mode: Setting::Explicit(w.managed_pipeline_mode.to_string()),
            php_version: w.php_version.clone().into(),
            python_version: w.python_version.clone().into(),
            remote_debugging_enabled: w.remote_debugging_enabled.into(),
            remote_debugging_version: w.remote_debugging_version.clone().into(),
            scm_type: Setting::Explicit(w.scm_type.to_string()),
            use_32_bit_worker_process: w.use_32_bit_worker_process.into(),
            websockets_enabled: w.web_sockets_enabled.into(),
            ftps_state: Setting::Explicit(w.ftps_state.to_string()),
            linux_fx_version: w.linux_fx_version.clone().into(),
            min_tls_version: Setting::Explicit(w.min_tls_version.to_string()),
            virtual_network_name: w.vnet_name.clone().into(),
        })
    }
}

/// Flatten a wire site config into the user's list-shaped `site_config`.
///
/// `None` yields an empty list ("nothing known"), not a block of zero values.
pub fn flatten_site_config(input: Option<&web::SiteConfig>) -> Result<Vec<SiteConfig>, CoreError> {
    let Some(wire) = input else {
        debug!("SiteConfig is absent");
        return Ok(Vec::new());
    };

    Ok(vec![SiteConfig::try_from(wire)?])
}
