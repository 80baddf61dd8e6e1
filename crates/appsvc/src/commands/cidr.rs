//! CIDR conversion handlers.

use appsvc_api::web::IpSecurityRestriction;
use appsvc_core::{IpRestriction, cidr};

use crate::cli::{CidrArgs, CidrCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::output_format;

pub fn handle(args: CidrArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = output_format(global);

    let rendered = match args.command {
        CidrCommand::Encode {
            ip_address,
            subnet_mask,
        } => {
            let encoded = cidr::encode(&ip_address, subnet_mask.as_deref().unwrap_or_default())?;
            tracing::debug!(%ip_address, cidr = %encoded, "encoded restriction");
            output::render(
                format,
                &IpSecurityRestriction {
                    ip_address: Some(encoded),
                    subnet_mask: Some(String::new()),
                },
            )?
        }

        CidrCommand::Decode {
            cidr: block,
            legacy_mask,
        } => {
            let decoded = cidr::decode(&block, legacy_mask.as_deref())?;
            tracing::debug!(cidr = %block, ?decoded, "decoded restriction");
            output::render(
                format,
                &IpRestriction {
                    ip_address: decoded.ip_address,
                    subnet_mask: decoded.subnet_mask.into(),
                },
            )?
        }
    };

    output::print_output(&rendered, global.quiet)
}
