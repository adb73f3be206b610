//! POSIX-style helpers for project-relative file paths
//!
//! Detection never touches the disk, so every path is handled as a plain
//! `/`-separated string relative to the project root.

use glob::{MatchOptions, Pattern};

/// Name of the manifest that carries scripts and dependencies
pub const MANIFEST_FILE: &str = "package.json";

/// Top-level directory holding serverless functions
pub const API_DIR: &str = "api";

/// Top-level directory served verbatim as static assets
pub const PUBLIC_DIR: &str = "public";

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

pub fn first_segment(path: &str) -> Option<&str> {
    segments(path).next()
}

pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Splits a file name into stem and extension (without the dot).
///
/// Leading-dot names such as `.env` have no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

pub fn extension(path: &str) -> Option<&str> {
    split_extension(basename(path)).1
}

pub fn is_under(path: &str, dir: &str) -> bool {
    path.strip_prefix(dir)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// True when any segment is hidden (`.name`).
pub fn has_hidden_segment(path: &str) -> bool {
    segments(path).any(|s| s.starts_with('.'))
}

/// True for helpers that can be imported but must not be routed: any
/// segment starting with `.` or `_`.
pub fn is_private(path: &str) -> bool {
    segments(path).any(|s| s.starts_with('.') || s.starts_with('_'))
}

/// True for TypeScript declaration files (`name.d.ts`), which hold types only.
pub fn is_type_declaration(path: &str) -> bool {
    basename(path).ends_with(".d.ts")
}

/// Returns the placeholder name of a `[name]` segment.
///
/// The extension is ignored so that `[id].js` yields `id`.
pub fn dynamic_segment_name(segment: &str) -> Option<&str> {
    let (stem, _) = split_extension(segment);
    let name = stem.strip_prefix('[')?.strip_suffix(']')?;
    if name.is_empty() || name.contains(&['[', ']', '/'][..]) {
        return None;
    }
    Some(name)
}

/// True when a builder source is a glob rather than a literal path.
///
/// `[` is deliberately not treated as a glob character because dynamic
/// route segments use brackets.
pub fn is_glob(src: &str) -> bool {
    src.contains(&['*', '?', '{'][..])
}

/// Expands a builder source glob against the project files.
///
/// Results keep the order of `files`.
pub fn expand_glob<'a>(pattern: &str, files: &'a [String]) -> Vec<&'a str> {
    let Ok(compiled) = Pattern::new(pattern) else {
        tracing::debug!(pattern, "ignoring unparsable builder source glob");
        return Vec::new();
    };
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
    files
        .iter()
        .map(String::as_str)
        .filter(|f| compiled.matches_with(f, options))
        .collect()
}

/// Normalizes a caller-supplied path: backslashes become `/`, leading `./`
/// and `/` are dropped, empty segments are removed.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let trimmed = unified.trim_start_matches("./").trim_start_matches('/');
    trimmed
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}
