//! Command handlers; each returns the process exit code

use super::commands::{DetectArgs, NodeVersionArgs};
use super::output::OutputFormatter;
use crate::config::ZeroDeployConfig;
use crate::detection::DeploymentPlanner;
use crate::fs::{ProjectScanner, ServiceError};
use crate::runtime::resolve_node_version;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub fn handle_detect(args: &DetectArgs, quiet: bool) -> i32 {
    match run_detect(args, quiet) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<ServiceError>() {
                Some(service_error) => eprintln!("{}", service_error.help_message()),
                None => error!("{:#}", e),
            }
            EXIT_FAILURE
        }
    }
}

fn run_detect(args: &DetectArgs, quiet: bool) -> Result<i32> {
    info!("Starting deployment detection");

    let project_path = match &args.project_path {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    debug!("Project path: {}", project_path.display());

    let default_config = ZeroDeployConfig::from_env()?;
    let config = ZeroDeployConfig {
        tag: args.tag.clone().or(default_config.tag.clone()),
        max_files: args.max_files.unwrap_or(default_config.max_files),
        ..default_config
    };
    if args.tag.is_some() {
        debug!("Tag overridden to: {:?}", config.tag);
    }
    config.validate()?;

    let snapshot = ProjectScanner::new(&project_path)?
        .with_max_files(config.max_files)
        .scan()?;

    let plan = DeploymentPlanner::new(config.detector_options()).plan(&snapshot);
    let output = OutputFormatter::new(args.format.into()).format(&plan)?;

    let exit_code = if plan.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    };

    // Failed plans are still rendered so callers see the diagnostics.
    if quiet && plan.is_success() && args.output.is_none() {
        return Ok(exit_code);
    }
    write_output(&output, args.output.as_deref())?;

    Ok(exit_code)
}

pub fn handle_node_version(args: &NodeVersionArgs) -> i32 {
    let version = match resolve_node_version(args.range.as_deref()) {
        Ok(version) => version,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.to_diagnostic());
            return EXIT_FAILURE;
        }
    };

    match OutputFormatter::new(args.format.into()).format_node_version(&version) {
        Ok(output) => {
            print!("{}", output);
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            EXIT_FAILURE
        }
    }
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormatArg;
    use serial_test::serial;
    use tempfile::TempDir;

    fn detect_args(path: &Path, output: &Path) -> DetectArgs {
        DetectArgs {
            project_path: Some(path.to_path_buf()),
            tag: None,
            format: OutputFormatArg::Json,
            max_files: None,
            output: Some(output.to_path_buf()),
        }
    }

    #[test]
    #[serial]
    fn test_detect_writes_output_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("api")).unwrap();
        fs::write(dir.path().join("api/users.js"), "").unwrap();
        let out = TempDir::new().unwrap();
        let out_file = out.path().join("plan.json");

        let code = handle_detect(&detect_args(dir.path(), &out_file), false);
        assert_eq!(code, EXIT_SUCCESS);

        let written = fs::read_to_string(&out_file).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["builders"][0]["use"], "@now/node");
    }

    #[test]
    #[serial]
    fn test_detect_conflict_exits_with_failure() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("api")).unwrap();
        fs::write(dir.path().join("api/user.js"), "").unwrap();
        fs::write(dir.path().join("api/user.go"), "").unwrap();
        let out = TempDir::new().unwrap();
        let out_file = out.path().join("plan.json");

        let code = handle_detect(&detect_args(dir.path(), &out_file), false);
        assert_eq!(code, EXIT_FAILURE);
        assert!(fs::read_to_string(&out_file)
            .unwrap()
            .contains("conflicting_file_path"));
    }

    #[test]
    fn test_detect_missing_path() {
        let out = TempDir::new().unwrap();
        let args = detect_args(Path::new("/nonexistent/project"), &out.path().join("x.json"));
        assert_eq!(handle_detect(&args, true), EXIT_FAILURE);
    }

    #[test]
    fn test_node_version_handler() {
        let ok = NodeVersionArgs {
            range: Some("10.x".to_string()),
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_node_version(&ok), EXIT_SUCCESS);

        let unsupported = NodeVersionArgs {
            range: Some("4.x".to_string()),
            format: OutputFormatArg::Human,
        };
        assert_eq!(handle_node_version(&unsupported), EXIT_FAILURE);
    }
}
