//! Zero-configuration detection
//!
//! [`detect_builders`] decides which builders run over which files and
//! [`detect_routes`] derives the default routing table for those builders.
//! Both are pure functions of their inputs. [`DeploymentPlanner`] chains
//! them for callers that want a single result.

pub mod builder_id;
pub mod builders;
pub mod diagnostic;
pub mod routes;
pub mod service;
pub mod shape;
pub mod types;

pub use builder_id::BuilderId;
pub use builders::detect_builders;
pub use diagnostic::Diagnostic;
pub use routes::detect_routes;
pub use service::{DeploymentPlan, DeploymentPlanner};
pub use shape::{CanonicalShape, RoutePath};
pub use types::{
    BuilderConfig, BuilderDetection, BuilderSpec, DetectorOptions, RouteDetection, RouteRule,
};
