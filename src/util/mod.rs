//! Shared helpers: structured logging and the id-enum macro

pub mod id_enum_macro;
pub mod logging;

pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
