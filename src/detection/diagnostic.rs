//! Diagnostics returned by detection instead of builders or routes
//!
//! Codes are stable identifiers that callers surface verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MISSING_BUILD_SCRIPT: &str = "missing_build_script";
pub const MISSING_FRAMEWORK_DEPENDENCY: &str = "missing_framework_dependency";
pub const CONFLICTING_FILE_PATH: &str = "conflicting_file_path";
pub const CONFLICTING_PATH_SEGMENT: &str = "conflicting_path_segment";
pub const UNSUPPORTED_NODE_VERSION: &str = "unsupported_node_version";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn missing_build_script(framework: &str, dependency: &str, command: &str) -> Self {
        Self::new(
            MISSING_BUILD_SCRIPT,
            format!(
                "Your `package.json` file lists `{}` ({}) but is missing a `build` property \
                 inside the `scripts` property. Add `\"build\": \"{}\"` so the project can be built.",
                dependency, framework, command
            ),
        )
    }

    /// Used when the manifest names no framework at all.
    pub fn missing_build_script_property() -> Self {
        Self::new(
            MISSING_BUILD_SCRIPT,
            "Your `package.json` file is missing a `build` property inside the `scripts` \
             property.",
        )
    }

    pub fn missing_framework_dependency(framework: &str, dependency: &str, command: &str) -> Self {
        Self::new(
            MISSING_FRAMEWORK_DEPENDENCY,
            format!(
                "The `build` script in your `package.json` runs `{}` ({}), but `{}` is not \
                 listed in `dependencies` or `devDependencies`.",
                command, framework, dependency
            ),
        )
    }

    pub fn conflicting_file_path(path: &str, conflicts: &[&str]) -> Self {
        let quoted: Vec<String> = conflicts.iter().map(|c| format!("\"{}\"", c)).collect();
        Self::new(
            CONFLICTING_FILE_PATH,
            format!(
                "Two or more files have conflicting paths or names. Please make sure path \
                 segments and filenames, without their extension, are unique. The path \"{}\" \
                 has conflicts with {}.",
                path,
                join_with_and(&quoted)
            ),
        )
    }

    pub fn conflicting_path_segment(segment: &str, path: &str) -> Self {
        Self::new(
            CONFLICTING_PATH_SEGMENT,
            format!(
                "The segment \"{}\" occurs more than one time in your path \"{}\". Please make \
                 sure that every segment in a path is unique.",
                segment, path
            ),
        )
    }

    pub fn unsupported_node_version(message: impl Into<String>) -> Self {
        Self::new(UNSUPPORTED_NODE_VERSION, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

fn join_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}
