//! Canonical route shapes for API source files
//!
//! A shape is what a file looks like to the router: the extension is gone,
//! a trailing `index` collapses into its directory and every `[name]`
//! segment becomes a wildcard. Two files with equal shapes answer the same
//! requests and therefore conflict.

use crate::fs::path;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Dynamic(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match path::dynamic_segment_name(raw) {
            Some(name) => Segment::Dynamic(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Segment::Dynamic(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeSegment {
    Literal(String),
    Wildcard,
}

/// Route identity of a file, independent of extension and placeholder names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalShape {
    pub segments: Vec<ShapeSegment>,
    pub is_index: bool,
}

/// A parsed API source path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    pub source: String,
    /// Segments after index collapsing, last one without extension
    pub segments: Vec<Segment>,
    pub is_index: bool,
    pub extension: Option<String>,
}

impl RoutePath {
    pub fn parse(source: &str) -> Self {
        let raw: Vec<&str> = path::segments(source).collect();
        let (last, dirs) = match raw.split_last() {
            Some((last, dirs)) => (*last, dirs),
            None => ("", &[][..]),
        };
        let (stem, extension) = path::split_extension(last);

        let mut segments: Vec<Segment> = dirs.iter().map(|s| Segment::parse(s)).collect();
        let is_index = stem == "index";
        if !is_index {
            segments.push(match path::dynamic_segment_name(last) {
                Some(name) => Segment::Dynamic(name.to_string()),
                None => Segment::Literal(stem.to_string()),
            });
        }

        Self {
            source: source.to_string(),
            segments,
            is_index,
            extension: extension.map(str::to_string),
        }
    }

    pub fn shape(&self) -> CanonicalShape {
        CanonicalShape {
            segments: self
                .segments
                .iter()
                .map(|s| match s {
                    Segment::Literal(name) => ShapeSegment::Literal(name.clone()),
                    Segment::Dynamic(_) => ShapeSegment::Wildcard,
                })
                .collect(),
            is_index: self.is_index,
        }
    }

    /// Placeholder names in left-to-right order.
    pub fn dynamic_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Dynamic(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    pub fn dynamic_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_dynamic()).count()
    }

    /// Number of segments in the source path, including a collapsed `index`.
    pub fn depth(&self) -> usize {
        path::segments(&self.source).count()
    }

    /// First placeholder name that occurs twice in this path.
    pub fn repeated_segment(&self) -> Option<&str> {
        let names = self.dynamic_names();
        names
            .iter()
            .enumerate()
            .find(|(i, name)| names[..*i].contains(*name))
            .map(|(_, name)| *name)
    }
}
