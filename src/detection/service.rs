//! Deployment planning
//!
//! [`DeploymentPlanner`] is the caller-side orchestration around the two
//! detectors:
//! 1. Builder detection over the snapshot
//! 2. Route detection over the detected builders
//! 3. Node.js version resolution when a Node-based builder is present
//!
//! The plan is all-or-nothing: as soon as a stage reports a diagnostic the
//! plan carries no builders and no routes.
//!
//! # Example
//!
//! ```
//! use zerodeploy::detection::{DeploymentPlanner, DetectorOptions};
//! use zerodeploy::detection::service::ProjectSnapshot;
//!
//! let snapshot = ProjectSnapshot::new(vec!["api/users.js".into(), "index.html".into()], None);
//! let plan = DeploymentPlanner::new(DetectorOptions::default()).plan(&snapshot);
//!
//! assert!(plan.is_success());
//! assert_eq!(plan.builders.unwrap().len(), 2);
//! ```

use super::builders::detect_builders;
use super::diagnostic::Diagnostic;
use super::routes::detect_routes;
use super::types::{BuilderDetection, BuilderSpec, DetectorOptions, RouteDetection, RouteRule};
use crate::manifest::PackageManifest;
use crate::runtime::node::{resolve_node_version, NodeVersion};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// File list and manifest of one project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSnapshot {
    pub files: Vec<String>,
    pub manifest: Option<PackageManifest>,
}

impl ProjectSnapshot {
    pub fn new(files: Vec<String>, manifest: Option<PackageManifest>) -> Self {
        Self { files, manifest }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPlan {
    pub builders: Option<Vec<BuilderSpec>>,
    pub default_routes: Option<Vec<RouteRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_version: Option<NodeVersion>,
    pub errors: Vec<Diagnostic>,
}

impl DeploymentPlan {
    fn failed(errors: Vec<Diagnostic>) -> Self {
        Self {
            errors,
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when the project needs neither builders nor routes.
    pub fn is_noop(&self) -> bool {
        self.is_success() && self.builders.is_none()
    }
}

pub struct DeploymentPlanner {
    options: DetectorOptions,
}

impl DeploymentPlanner {
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }

    pub fn plan(&self, snapshot: &ProjectSnapshot) -> DeploymentPlan {
        let start = Instant::now();
        info!(files = snapshot.files.len(), "Planning deployment");

        let builders = match detect_builders(
            &snapshot.files,
            snapshot.manifest.as_ref(),
            &self.options,
        ) {
            BuilderDetection::Builders(builders) => builders,
            BuilderDetection::Errors(errors) => {
                warn!(count = errors.len(), "Builder detection failed");
                return DeploymentPlan::failed(errors);
            }
            BuilderDetection::NoOp => {
                info!("Nothing to build");
                return DeploymentPlan::default();
            }
        };

        let routes = match detect_routes(&snapshot.files, &builders) {
            RouteDetection::Routes(routes) => Some(routes),
            RouteDetection::Conflict(diagnostic) => {
                warn!(code = %diagnostic.code, "Route detection failed");
                return DeploymentPlan::failed(vec![diagnostic]);
            }
            RouteDetection::NoOp => None,
        };

        let node_version = if builders.iter().any(|b| b.builder_id().is_node_based()) {
            let range = snapshot.manifest.as_ref().and_then(|m| m.node_engine());
            match resolve_node_version(range) {
                Ok(version) => Some(version),
                Err(e) => {
                    warn!(error = %e, "Node.js version resolution failed");
                    return DeploymentPlan::failed(vec![e.to_diagnostic()]);
                }
            }
        } else {
            None
        };

        info!(
            builders = builders.len(),
            routes = routes.as_ref().map_or(0, Vec::len),
            "Deployment planned"
        );
        debug!("Planning took {:?}", start.elapsed());

        DeploymentPlan {
            builders: Some(builders),
            default_routes: routes,
            node_version,
            errors: Vec::new(),
        }
    }
}
