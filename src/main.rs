use zerodeploy::cli::commands::{CliArgs, Commands};
use zerodeploy::cli::handlers::{handle_detect, handle_node_version};
use zerodeploy::util::logging::{self, init_logging, parse_level};
use zerodeploy::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("zerodeploy v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, args.quiet),
        Commands::NodeVersion(node_args) => handle_node_version(node_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = logging::config_from_env();
    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
