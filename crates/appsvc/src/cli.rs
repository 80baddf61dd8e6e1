//! Clap derive structures for the `appsvc` CLI.
//!
//! Defines the command tree, global flags, and shared types. Also compiled
//! into `build.rs` for man page and completion generation, so it may only
//! depend on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// appsvc -- translate App Service site configuration between user and wire form
#[derive(Debug, Parser)]
#[command(
    name = "appsvc",
    version,
    about = "Translate App Service site configuration between user and wire form",
    long_about = "Expands a user-authored site_config block into the SiteConfig body of\n\
        the App Service management API (2018-02-01), and flattens API responses\n\
        back into site_config. IP restrictions are converted between\n\
        address + subnet mask and CIDR notation on the way.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format (defaults to the config file setting, then json)
    #[arg(long, short = 'o', env = "APPSVC_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand a site_config document into the API request body
    #[command(alias = "x")]
    Expand(ExpandArgs),

    /// Flatten an API SiteConfig body into a site_config document
    #[command(alias = "f")]
    Flatten(FlattenArgs),

    /// Show the site_config schema
    Schema(SchemaArgs),

    /// Convert between address + mask and CIDR notation
    Cidr(CidrArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Mapping ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Document with a top-level `site_config` list (.json, .yaml, .yml, .toml, or - for stdin)
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct FlattenArgs {
    /// API SiteConfig body as JSON (or an ARM resource with `properties`; - for stdin)
    pub file: PathBuf,
}

// ── Schema ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Show the fields of one nested block (e.g. ip_restriction)
    #[arg(long)]
    pub block: Option<String>,
}

// ── CIDR ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CidrArgs {
    #[command(subcommand)]
    pub command: CidrCommand,
}

#[derive(Debug, Subcommand)]
pub enum CidrCommand {
    /// Encode an address and optional dotted-quad mask as CIDR
    Encode {
        /// IPv4 address, or an existing CIDR block
        ip_address: String,

        /// Dotted-quad subnet mask (e.g. 255.255.255.0)
        subnet_mask: Option<String>,
    },

    /// Decode a CIDR block into address and dotted-quad mask
    Decode {
        /// CIDR block or bare IPv4 address
        cidr: String,

        /// Mask from a legacy record; takes precedence over the prefix
        #[arg(long)]
        legacy_mask: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
