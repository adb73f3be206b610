//! Runtime version selection for detected builders

pub mod node;

pub use node::{resolve_node_version, NodeVersion, NodeVersionError};
