use super::builder_id::BuilderId;
use super::diagnostic::Diagnostic;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub type BuilderConfig = BTreeMap<String, serde_json::Value>;

/// One build step: a source path or glob and the builder that consumes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderSpec {
    pub src: String,
    #[serde(rename = "use")]
    pub use_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BuilderConfig>,
}

impl BuilderSpec {
    pub fn new(src: impl Into<String>, use_: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            use_: use_.into(),
            config: None,
        }
    }

    /// A builder produced by detection, flagged with `zeroConfig`.
    pub fn zero_config(src: impl Into<String>, use_: impl Into<String>) -> Self {
        Self::new(src, use_).with_config("zeroConfig", serde_json::Value::Bool(true))
    }

    pub fn with_config(mut self, key: &str, value: serde_json::Value) -> Self {
        self.config
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value);
        self
    }

    pub fn builder_id(&self) -> BuilderId {
        BuilderId::from_use(&self.use_)
    }
}

impl fmt::Display for BuilderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.use_)
    }
}

/// One entry of the routing table; the first matching rule wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl RouteRule {
    pub fn rewrite(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: Some(dest.into()),
            status: None,
            headers: None,
        }
    }

    pub fn status(src: impl Into<String>, status: u16) -> Self {
        Self {
            src: src.into(),
            dest: None,
            status: Some(status),
            headers: None,
        }
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.src)?;
        if let Some(dest) = &self.dest {
            write!(f, " -> {}", dest)?;
        }
        if let Some(status) = self.status {
            write!(f, " [{}]", status)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorOptions {
    /// Version tag appended to every synthesized `use` (e.g. `canary`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl DetectorOptions {
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// Outcome of builder detection
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderDetection {
    Builders(Vec<BuilderSpec>),
    /// Fatal diagnostics; no builders accompany them
    Errors(Vec<Diagnostic>),
    /// Nothing routable was found; the project needs no builders
    NoOp,
}

impl BuilderDetection {
    pub fn builders(&self) -> Option<&[BuilderSpec]> {
        match self {
            Self::Builders(builders) => Some(builders),
            _ => None,
        }
    }

    pub fn errors(&self) -> Option<&[Diagnostic]> {
        match self {
            Self::Errors(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

impl Serialize for BuilderDetection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BuilderDetection", 2)?;
        state.serialize_field("builders", &self.builders())?;
        state.serialize_field("errors", &self.errors())?;
        state.end()
    }
}

/// Outcome of route detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDetection {
    Routes(Vec<RouteRule>),
    Conflict(Diagnostic),
    /// No builders were given, so there is nothing to route
    NoOp,
}

impl RouteDetection {
    pub fn routes(&self) -> Option<&[RouteRule]> {
        match self {
            Self::Routes(routes) => Some(routes),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Diagnostic> {
        match self {
            Self::Conflict(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

impl Serialize for RouteDetection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("RouteDetection", 2)?;
        state.serialize_field("defaultRoutes", &self.routes())?;
        state.serialize_field("error", &self.error())?;
        state.end()
    }
}
