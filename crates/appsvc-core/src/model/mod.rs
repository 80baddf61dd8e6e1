// ── User-facing domain model ──
//
// The shapes users author and read back. Wire shapes live in `appsvc_api`;
// `crate::convert` moves values between the two.

pub mod setting;
pub mod site_config;

pub use setting::Setting;
pub use site_config::{DEFAULT_SUBNET_MASK, IpRestriction, SiteConfig};
