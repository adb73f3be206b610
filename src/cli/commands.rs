use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Zero-configuration deployment inference
#[derive(Parser, Debug)]
#[command(
    name = "zerodeploy",
    about = "Infer builders and routes for a project without a deployment config",
    version,
    author,
    long_about = "zerodeploy looks at the files of a project and its package.json and derives \
                  the builders that turn it into deployable outputs and the route table that \
                  maps request paths onto those outputs."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect builders and routes for a project",
        long_about = "Scans the project directory, detects API functions, framework builds and \
                      static assets, and prints the synthesized builders and default routes.\n\n\
                      Examples:\n  \
                      zerodeploy detect\n  \
                      zerodeploy detect /path/to/project\n  \
                      zerodeploy detect --format json --tag canary"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Resolve an engines.node range to a supported Node.js version",
        long_about = "Prints the Node.js release line selected for a version range.\n\n\
                      Examples:\n  \
                      zerodeploy node-version\n  \
                      zerodeploy node-version '>=10'"
    )]
    NodeVersion(NodeVersionArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 't',
        long,
        value_name = "TAG",
        help = "Release tag appended to every builder (e.g. 'canary')"
    )]
    pub tag: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "COUNT", help = "Maximum number of files to scan")]
    pub max_files: Option<usize>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct NodeVersionArgs {
    #[arg(
        value_name = "RANGE",
        help = "Semver range as written in engines.node (omit for the default)"
    )]
    pub range: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
