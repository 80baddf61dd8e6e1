// appsvc-api: Wire-level types for the App Service management API (2018-02-01 site config).

pub mod extensible;
pub mod web;

pub use extensible::Extensible;
pub use web::{
    FtpsState, IpSecurityRestriction, ManagedPipelineMode, ScmType, SiteConfig,
    SupportedTlsVersions,
};
