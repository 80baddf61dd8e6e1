// ── Address / mask / CIDR arithmetic ──
//
// Users write an IPv4 address and a dotted-quad mask; the 2018-02-01 API
// wants one CIDR string and a blank mask. `encode` and `decode` are the only
// two entry points the field mappers use.

use std::net::Ipv4Addr;

use crate::error::CoreError;

/// Suffix appended to a bare address to restrict a single host.
pub const SINGLE_HOST_SUFFIX: &str = "/32";

const MAX_PREFIX: u32 = 32;

/// Result of decoding a wire restriction back into address and mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRestriction {
    pub ip_address: String,
    /// `None` when the wire value carried no derivable mask.
    pub subnet_mask: Option<String>,
}

// ── Helpers ────────────────────────────────────────────────────────

fn parse_ipv4(raw: &str) -> Result<Ipv4Addr, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::InvalidNetworkLiteral { value: raw.into() })
}

/// Split `a.b.c.d/n` into its address and prefix length.
fn parse_cidr(raw: &str) -> Result<(Ipv4Addr, u32), CoreError> {
    let invalid = || CoreError::InvalidNetworkLiteral { value: raw.into() };

    let (address, prefix) = raw.trim().split_once('/').ok_or_else(invalid)?;
    let address: Ipv4Addr = address.parse().map_err(|_| invalid())?;
    let prefix: u32 = prefix.parse().map_err(|_| invalid())?;
    if prefix > MAX_PREFIX {
        return Err(invalid());
    }
    Ok((address, prefix))
}

/// Number of leading one-bits in `mask`, rejecting non-contiguous masks.
pub fn prefix_len(mask: Ipv4Addr) -> Result<u32, CoreError> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    if bits.count_ones() != ones {
        return Err(CoreError::InvalidSubnetMask {
            mask: mask.to_string(),
        });
    }
    Ok(ones)
}

/// Dotted-quad mask for a prefix length, `None` above `/32`.
pub fn mask_from_prefix(prefix: u32) -> Option<Ipv4Addr> {
    if prefix > MAX_PREFIX {
        return None;
    }
    // A shift by 32 overflows; a zero-length prefix is the all-zero mask.
    let bits = u32::MAX.checked_shl(MAX_PREFIX - prefix).unwrap_or(0);
    Some(Ipv4Addr::from(bits))
}

// ── Encode ─────────────────────────────────────────────────────────

/// Combine an address and mask into CIDR notation.
///
/// - a non-empty mask is converted to its prefix length (host bits of the
///   address are kept as written);
/// - an address that already carries `/n` passes through unchanged;
/// - a bare address becomes a single-host `/32`.
pub fn encode(ip_address: &str, subnet_mask: &str) -> Result<String, CoreError> {
    if !subnet_mask.is_empty() {
        let address = parse_ipv4(ip_address)?;
        let mask = parse_ipv4(subnet_mask)?;
        let prefix = prefix_len(mask)?;
        return Ok(format!("{address}/{prefix}"));
    }

    if ip_address.contains('/') {
        parse_cidr(ip_address)?;
        return Ok(ip_address.to_owned());
    }

    let address = parse_ipv4(ip_address)?;
    Ok(format!("{address}{SINGLE_HOST_SUFFIX}"))
}

// ── Decode ─────────────────────────────────────────────────────────

/// Split a wire `ipAddress` back into address and mask.
///
/// A value without `/` is taken as a bare address and yields no mask; `/32`
/// is never guessed. A non-empty `legacy_mask` (records written with separate
/// address and mask fields) takes precedence over the derived mask.
pub fn decode(cidr: &str, legacy_mask: Option<&str>) -> Result<DecodedRestriction, CoreError> {
    let (ip_address, derived_mask) = if cidr.contains('/') {
        let (address, prefix) = parse_cidr(cidr)?;
        (
            address.to_string(),
            mask_from_prefix(prefix).map(|m| m.to_string()),
        )
    } else {
        (cidr.to_owned(), None)
    };

    let subnet_mask = legacy_mask
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
        .or(derived_mask);

    Ok(DecodedRestriction {
        ip_address,
        subnet_mask,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn decoded(ip: &str, mask: Option<&str>) -> DecodedRestriction {
        DecodedRestriction {
            ip_address: ip.into(),
            subnet_mask: mask.map(str::to_owned),
        }
    }

    #[test]
    fn explicit_mask_round_trips() {
        let cidr = encode("10.0.0.0", "255.255.255.0").unwrap();
        assert_eq!(cidr, "10.0.0.0/24");
        assert_eq!(
            decode(&cidr, None).unwrap(),
            decoded("10.0.0.0", Some("255.255.255.0"))
        );
    }

    #[test]
    fn default_mask_round_trips_through_slash_32() {
        let cidr = encode("192.168.1.5", "255.255.255.255").unwrap();
        assert_eq!(cidr, "192.168.1.5/32");
        assert_eq!(
            decode(&cidr, None).unwrap(),
            decoded("192.168.1.5", Some("255.255.255.255"))
        );
    }

    #[test]
    fn bare_address_gains_slash_32_on_encode_only() {
        assert_eq!(encode("203.0.113.9", "").unwrap(), "203.0.113.9/32");
        assert_eq!(decode("203.0.113.9", None).unwrap(), decoded("203.0.113.9", None));
    }

    #[test]
    fn existing_cidr_passes_through() {
        assert_eq!(encode("172.16.0.0/12", "").unwrap(), "172.16.0.0/12");
    }

    #[test]
    fn host_bits_are_kept() {
        assert_eq!(encode("10.0.0.5", "255.255.255.0").unwrap(), "10.0.0.5/24");
        assert_eq!(
            decode("10.0.0.5/24", None).unwrap(),
            decoded("10.0.0.5", Some("255.255.255.0"))
        );
    }

    #[test]
    fn every_contiguous_mask_round_trips() {
        for prefix in 0..=32 {
            let mask = mask_from_prefix(prefix).unwrap();
            assert_eq!(prefix_len(mask).unwrap(), prefix);

            let cidr = encode("10.20.30.40", &mask.to_string()).unwrap();
            let back = decode(&cidr, None).unwrap();
            assert_eq!(back.subnet_mask, Some(mask.to_string()), "prefix {prefix}");
        }
    }

    #[test]
    fn zero_prefix_is_the_empty_mask() {
        assert_eq!(mask_from_prefix(0), Some(Ipv4Addr::UNSPECIFIED));
        assert_eq!(encode("0.0.0.0", "0.0.0.0").unwrap(), "0.0.0.0/0");
        assert_eq!(mask_from_prefix(33), None);
    }

    #[test]
    fn legacy_mask_overrides_derived_mask() {
        assert_eq!(
            decode("10.0.0.0/24", Some("255.255.0.0")).unwrap(),
            decoded("10.0.0.0", Some("255.255.0.0"))
        );
        assert_eq!(
            decode("10.0.0.1", Some("255.255.255.0")).unwrap(),
            decoded("10.0.0.1", Some("255.255.255.0"))
        );
    }

    #[test]
    fn blank_legacy_mask_is_ignored() {
        assert_eq!(
            decode("10.0.0.0/8", Some("")).unwrap(),
            decoded("10.0.0.0", Some("255.0.0.0"))
        );
    }

    #[test]
    fn non_contiguous_mask_is_rejected() {
        assert_eq!(
            encode("10.0.0.0", "255.0.255.0").unwrap_err(),
            CoreError::InvalidSubnetMask {
                mask: "255.0.255.0".into()
            }
        );
    }

    #[test]
    fn malformed_literals_are_rejected() {
        assert_eq!(
            encode("10.0.0.256", "255.255.255.0").unwrap_err(),
            CoreError::InvalidNetworkLiteral {
                value: "10.0.0.256".into()
            }
        );
        assert_eq!(
            encode("10.0.0.1", "255.255.255").unwrap_err(),
            CoreError::InvalidNetworkLiteral {
                value: "255.255.255".into()
            }
        );
        assert!(encode("not-an-ip", "").is_err());
        assert!(encode("10.0.0.0/33", "").is_err());
        assert!(decode("10.0.0.0/abc", None).is_err());
        assert!(decode("10.0.0/24", None).is_err());
    }
}
