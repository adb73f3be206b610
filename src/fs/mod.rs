//! Project path helpers and the directory scanner

pub mod path;
pub mod scanner;

pub use scanner::{ProjectScanner, ServiceError};
