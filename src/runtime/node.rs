//! Node.js version selection from `engines.node`
//!
//! Picks the newest supported major release line that the declared range
//! can be satisfied by. An empty or missing range selects the default line.

use crate::detection::diagnostic::Diagnostic;
use semver::{Version, VersionReq};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// A supported Node.js release line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeVersion {
    pub major: u64,
    pub range: &'static str,
}

impl fmt::Display for NodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.major, self.range)
    }
}

/// Supported release lines, newest first
pub const SUPPORTED_VERSIONS: &[NodeVersion] = &[
    NodeVersion {
        major: 10,
        range: "10.x",
    },
    NodeVersion {
        major: 8,
        range: "8.10.x",
    },
];

pub const DEFAULT_MAJOR: u64 = 8;

// Upper bounds of the version grid probed inside each release line
const MAX_MINOR: u64 = 40;
const MAX_PATCH: u64 = 40;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeVersionError {
    #[error("Invalid Node.js version range \"{range}\": {reason}")]
    InvalidRange { range: String, reason: String },

    #[error(
        "Found `engines.node` range \"{range}\" which does not match any supported \
         Node.js version. Supported versions: {supported}"
    )]
    Unsupported { range: String, supported: String },
}

impl NodeVersionError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::unsupported_node_version(self.to_string())
    }
}

pub fn default_version() -> NodeVersion {
    SUPPORTED_VERSIONS
        .iter()
        .copied()
        .find(|v| v.major == DEFAULT_MAJOR)
        .unwrap_or(SUPPORTED_VERSIONS[SUPPORTED_VERSIONS.len() - 1])
}

/// Resolves a declared `engines.node` range to a supported release line.
pub fn resolve_node_version(range: Option<&str>) -> Result<NodeVersion, NodeVersionError> {
    let range = match range.map(str::trim) {
        None | Some("") => {
            let version = default_version();
            debug!(major = version.major, "no engines.node declared, using default");
            return Ok(version);
        }
        Some(range) => range,
    };

    let alternatives = parse_range(range)?;
    let selected = SUPPORTED_VERSIONS
        .iter()
        .copied()
        .find(|v| alternatives.iter().any(|req| line_intersects(req, v)));

    match selected {
        Some(version) => {
            debug!(range, major = version.major, "resolved Node.js version");
            Ok(version)
        }
        None => Err(NodeVersionError::Unsupported {
            range: range.to_string(),
            supported: SUPPORTED_VERSIONS
                .iter()
                .map(|v| v.range)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Parses an npm-style range into `||` alternatives.
///
/// Space-separated comparators (`>=8 <11`) are joined with commas, the
/// form the `semver` crate expects. Hyphen ranges (`8.5.0 - 10.5.0`) become
/// an inclusive pair of bounds and bare full versions are exact, as in npm.
fn parse_range(range: &str) -> Result<Vec<VersionReq>, NodeVersionError> {
    range
        .split("||")
        .map(|alternative| {
            let normalized = join_comparators(alternative);
            VersionReq::parse(&normalized).map_err(|e| NodeVersionError::InvalidRange {
                range: range.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn join_comparators(alternative: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_op = String::new();
    for token in alternative.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^')) {
            pending_op.push_str(token);
            continue;
        }
        tokens.push(format!("{}{}", pending_op, token.trim_start_matches('v')));
        pending_op.clear();
    }

    let mut comparators: Vec<String> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match (tokens.get(i + 1).map(String::as_str), tokens.get(i + 2)) {
            (Some("-"), Some(upper)) => {
                comparators.push(format!(">={}", tokens[i]));
                comparators.push(format!("<={}", upper));
                i += 3;
            }
            _ => {
                comparators.push(exact_if_bare(&tokens[i]));
                i += 1;
            }
        }
    }

    if comparators.is_empty() {
        "*".to_string()
    } else {
        comparators.join(", ")
    }
}

/// `10.0.0` means exactly that version in npm, while `semver` reads it as a
/// caret requirement.
fn exact_if_bare(comparator: &str) -> String {
    let parts: Vec<&str> = comparator.split('.').collect();
    let is_full_version = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    if is_full_version {
        format!("={}", comparator)
    } else {
        comparator.to_string()
    }
}

fn line_intersects(req: &VersionReq, line: &NodeVersion) -> bool {
    let line_req = match VersionReq::parse(line.range) {
        Ok(req) => req,
        Err(_) => return false,
    };
    (0..=MAX_MINOR).any(|minor| {
        (0..=MAX_PATCH).any(|patch| {
            let candidate = Version::new(line.major, minor, patch);
            line_req.matches(&candidate) && req.matches(&candidate)
        })
    })
}
