//! Route synthesis
//!
//! Turns the API builders into an ordered, first-match-wins routing table.
//! Every API source gets one anchored regex; sources are validated for
//! conflicts before anything is emitted, so a conflict never yields a
//! partial table.

use super::builders::PUBLIC_GLOB;
use super::diagnostic::Diagnostic;
use super::shape::{CanonicalShape, RoutePath, Segment, ShapeSegment};
use super::types::{BuilderSpec, RouteDetection, RouteRule};
use crate::fs::path;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Answers unmatched requests under `/api` before any static fallback
pub const API_NOT_FOUND_SRC: &str = r"^/api(\/.*)?$";

pub const CATCH_ALL_SRC: &str = "/(.*)";

const DYNAMIC_CAPTURE: &str = r"([^\/]+)";

/// Synthesizes the default routes for a builder list.
pub fn detect_routes<S: AsRef<str>>(files: &[S], builders: &[BuilderSpec]) -> RouteDetection {
    if builders.is_empty() {
        return RouteDetection::NoOp;
    }

    let files: Vec<String> = files.iter().map(|f| path::normalize(f.as_ref())).collect();
    let sources = api_sources(&files, builders);
    debug!(count = sources.len(), "API sources to route");

    let routes: Vec<RoutePath> = sources.iter().map(|s| RoutePath::parse(s)).collect();
    if let Some(conflict) = find_conflict(&routes) {
        debug!(code = %conflict.code, "route conflict detected");
        return RouteDetection::Conflict(conflict);
    }

    let mut ordered: Vec<&RoutePath> = routes.iter().collect();
    ordered.sort_by(|a, b| {
        a.dynamic_count()
            .cmp(&b.dynamic_count())
            .then_with(|| b.depth().cmp(&a.depth()))
            .then_with(|| a.source.cmp(&b.source))
    });

    let mut table: Vec<RouteRule> = ordered.into_iter().map(route_for).collect();

    if !table.is_empty() {
        table.push(RouteRule::status(API_NOT_FOUND_SRC, 404));
    }

    if let Some(dest) = static_fallback(builders) {
        table.push(RouteRule::rewrite(CATCH_ALL_SRC, dest));
    }

    RouteDetection::Routes(table)
}

/// Collects the files served by API runtime builders, sorted and deduplicated.
fn api_sources(files: &[String], builders: &[BuilderSpec]) -> Vec<String> {
    let mut sources = BTreeSet::new();
    for builder in builders.iter().filter(|b| b.builder_id().is_api_runtime()) {
        let src = path::normalize(&builder.src);
        if path::is_glob(&src) {
            sources.extend(
                path::expand_glob(&src, files)
                    .into_iter()
                    .filter(|f| !path::is_private(f) && !path::is_type_declaration(f))
                    .map(str::to_string),
            );
        } else if !path::is_private(&src) && !path::is_type_declaration(&src) {
            sources.insert(src);
        }
    }
    sources.into_iter().collect()
}

/// Scans routes in path order and reports the first conflict.
fn find_conflict(routes: &[RoutePath]) -> Option<Diagnostic> {
    let mut shapes: HashMap<CanonicalShape, &str> = HashMap::new();
    // Placeholder name claimed after each shape prefix
    let mut placeholders: HashMap<Vec<ShapeSegment>, (&str, &str)> = HashMap::new();

    for route in routes {
        if let Some(name) = route.repeated_segment() {
            return Some(Diagnostic::conflicting_path_segment(name, &route.source));
        }

        let shape = route.shape();
        if let Some(existing) = shapes.get(&shape) {
            return Some(Diagnostic::conflicting_file_path(&route.source, &[*existing]));
        }

        for (i, segment) in route.segments.iter().enumerate() {
            let Segment::Dynamic(name) = segment else {
                continue;
            };
            let prefix = shape.segments[..i].to_vec();
            let (claimed, owner) = *placeholders
                .entry(prefix)
                .or_insert((name.as_str(), route.source.as_str()));
            if claimed != name.as_str() {
                return Some(Diagnostic::conflicting_file_path(&route.source, &[owner]));
            }
        }

        shapes.insert(shape, route.source.as_str());
    }
    None
}

fn route_for(route: &RoutePath) -> RouteRule {
    let mut parts: Vec<String> = Vec::with_capacity(route.segments.len());
    let mut query: Vec<String> = Vec::new();

    for (i, segment) in route.segments.iter().enumerate() {
        let is_last = i + 1 == route.segments.len();
        match segment {
            Segment::Dynamic(name) => {
                query.push(format!("{}={}", name, capture_ref(query.len() + 1)));
                parts.push(DYNAMIC_CAPTURE.to_string());
            }
            Segment::Literal(name) if is_last && !route.is_index => {
                let name = escape(name);
                let alternatives = match &route.extension {
                    Some(ext) => format!("({}|{}\\.{})", name, name, escape(ext)),
                    None => format!("({})", name),
                };
                parts.push(alternatives);
            }
            Segment::Literal(name) => parts.push(escape(name)),
        }
    }

    let mut src = format!("^/{}", parts.join("/"));
    if route.is_index {
        let index_file = match &route.extension {
            Some(ext) => format!("|\\/index\\.{}", escape(ext)),
            None => String::new(),
        };
        src.push_str(&format!("(\\/|\\/index{})?", index_file));
    }
    src.push('$');

    let mut dest = format!("/{}", route.source);
    if !query.is_empty() {
        dest.push('?');
        dest.push_str(&query.join("&"));
    }

    RouteRule::rewrite(src, dest)
}

/// Destination of the trailing catch-all, if any static builder exists.
fn static_fallback(builders: &[BuilderSpec]) -> Option<String> {
    let statics: Vec<&BuilderSpec> = builders
        .iter()
        .filter(|b| b.builder_id().is_static())
        .collect();
    if statics.is_empty() {
        return None;
    }
    if statics.iter().any(|b| b.src == PUBLIC_GLOB) {
        return Some(format!("/{}/$1", path::PUBLIC_DIR));
    }
    Some("/$1".to_string())
}

fn capture_ref(index: usize) -> String {
    format!("${}", index)
}

/// Escapes regex metacharacters in a literal path segment.
fn escape(literal: &str) -> String {
    const SPECIAL: &[char] = &[
        '\\', '[', ']', '^', '$', '.', '|', '?', '*', '+', '(', ')', '{', '}',
    ];
    let mut out = String::with_capacity(literal.len());
    for c in literal.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
