// appsvc-core: Schema, CIDR translation, and mapping between the user-facing
// site_config block and the App Service wire SiteConfig.

pub mod cidr;
pub mod convert;
pub mod error;
pub mod model;
pub mod schema;

// ── Primary re-exports ──────────────────────────────────────────────
pub use convert::{expand_site_config, flatten_site_config};
pub use error::CoreError;
pub use model::{DEFAULT_SUBNET_MASK, IpRestriction, Setting, SiteConfig};
pub use schema::{FieldKind, FieldSpec, SITE_CONFIG_FIELDS, decode_site_config};
