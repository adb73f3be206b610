//! Output formatting for multiple formats
//!
//! JSON and YAML render the serialized plan unchanged; the human format is a
//! summary for terminals.
//!
//! # Example
//!
//! ```
//! use zerodeploy::cli::output::{OutputFormat, OutputFormatter};
//! use zerodeploy::detection::service::{DeploymentPlanner, ProjectSnapshot};
//! use zerodeploy::detection::DetectorOptions;
//!
//! let snapshot = ProjectSnapshot::new(vec!["api/users.js".into()], None);
//! let plan = DeploymentPlanner::new(DetectorOptions::default()).plan(&snapshot);
//! let output = OutputFormatter::new(OutputFormat::Json).format(&plan).unwrap();
//! assert!(output.contains("@now/node"));
//! ```

use anyhow::{Context, Result};

use crate::detection::service::DeploymentPlan;
use crate::runtime::NodeVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, plan: &DeploymentPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(plan)
                .context("Failed to serialize deployment plan to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize deployment plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(plan)),
        }
    }

    pub fn format_node_version(&self, version: &NodeVersion) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(version)
                .context("Failed to serialize Node.js version to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(version).context("Failed to serialize Node.js version to YAML")
            }
            OutputFormat::Human => Ok(format!(
                "Node.js {} (range {})\n",
                version.major, version.range
            )),
        }
    }

    fn format_human(&self, plan: &DeploymentPlan) -> String {
        let mut output = String::new();

        if !plan.is_success() {
            output.push_str("\u{2717} Deployment Detection Failed\n");
            output.push_str(RULE);
            output.push_str("\n\n");
            for diagnostic in &plan.errors {
                output.push_str(&format!("  - {}\n", diagnostic));
            }
            return output;
        }

        if plan.is_noop() {
            output.push_str("\u{2713} Nothing to build\n");
            output.push_str(RULE);
            output.push_str("\n\nThe project is served as-is without builders or routes.\n");
            return output;
        }

        output.push_str("\u{2713} Deployment Detection Result\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        let builders = plan.builders.as_deref().unwrap_or_default();
        output.push_str(&format!("Builders ({}):\n", builders.len()));
        push_tree(&mut output, builders.iter().map(ToString::to_string));
        output.push('\n');

        let routes = plan.default_routes.as_deref().unwrap_or_default();
        if routes.is_empty() {
            output.push_str("Routes: (none)\n");
        } else {
            output.push_str(&format!("Routes ({}):\n", routes.len()));
            push_tree(&mut output, routes.iter().map(ToString::to_string));
        }

        if let Some(version) = &plan.node_version {
            output.push_str(&format!("\nNode.js: {} ({})\n", version.major, version.range));
        }

        output
    }
}

fn push_tree(output: &mut String, items: impl ExactSizeIterator<Item = String>) {
    let len = items.len();
    for (i, item) in items.enumerate() {
        let connector = if i + 1 == len { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item));
    }
}
