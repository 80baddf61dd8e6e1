//! Command dispatch: bridges CLI args -> core mapping -> output formatting.

pub mod cidr;
pub mod mapping;
pub mod schema;

use clap::ValueEnum;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Expand(args) => mapping::expand(&args, global),
        Command::Flatten(args) => mapping::flatten(&args, global),
        Command::Schema(args) => schema::handle(&args, global),
        Command::Cidr(args) => cidr::handle(args, global),
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}

/// `--output`, else the config file default, else JSON.
pub fn output_format(global: &GlobalOpts) -> OutputFormat {
    if let Some(format) = global.output {
        return format;
    }

    let configured = appsvc_config::load_config_or_default().defaults.output;
    OutputFormat::from_str(&configured, true).unwrap_or_else(|_| {
        tracing::warn!(output = %configured, "unknown output format in config, using json");
        OutputFormat::Json
    })
}
