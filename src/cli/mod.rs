pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, NodeVersionArgs, OutputFormatArg};
pub use output::{OutputFormat, OutputFormatter};
