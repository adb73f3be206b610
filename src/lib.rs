//! zerodeploy - zero-configuration deployment inference
//!
//! Given the file list of a project and its optional `package.json`, this
//! library derives the build steps needed to deploy it and the routing
//! table that maps incoming request paths to the produced outputs.
//!
//! # Core Concepts
//!
//! - **Builders**: a source path or glob plus the builder that consumes it
//!   (`@now/node`, `@now/next`, `@now/static`, ...)
//! - **Framework presets**: known frontend frameworks recognized from the
//!   manifest, each mapping to a builder
//! - **Routes**: ordered rewrite rules; dynamic `[name]` path segments become
//!   capture groups forwarded as query parameters
//!
//! # Example Usage
//!
//! ```
//! use zerodeploy::{detect_builders, detect_routes, DetectorOptions};
//!
//! let files = ["api/users/[id].js", "public/index.html"];
//! let detection = detect_builders(&files, None, &DetectorOptions::default());
//! let builders = detection.builders().unwrap();
//!
//! let routes = detect_routes(&files, builders);
//! let routes = routes.routes().unwrap();
//! assert_eq!(routes[0].dest.as_deref(), Some("/api/users/[id].js?id=$1"));
//! ```
//!
//! # Project Structure
//!
//! - [`detection`]: builder and route synthesis plus the deployment planner
//! - [`framework`]: framework presets
//! - [`manifest`]: lenient `package.json` model
//! - [`runtime`]: Node.js version selection
//! - [`fs`]: path helpers and the project scanner

pub mod cli;
pub mod config;
pub mod detection;
pub mod framework;
pub mod fs;
pub mod manifest;
pub mod runtime;
pub mod util;

pub use config::{ConfigError, ZeroDeployConfig};
pub use detection::{
    detect_builders, detect_routes, BuilderDetection, BuilderId, BuilderSpec, DeploymentPlan,
    DeploymentPlanner, DetectorOptions, Diagnostic, RouteDetection, RouteRule,
};
pub use framework::{FrameworkId, FrameworkPreset};
pub use fs::{ProjectScanner, ServiceError};
pub use manifest::PackageManifest;
pub use runtime::{resolve_node_version, NodeVersion, NodeVersionError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
