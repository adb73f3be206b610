//! `package.json` model
//!
//! Only the fields that detection consumes are modelled. Anything that does
//! not deserialize into this shape is treated as if no manifest existed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engines {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub scripts: Scripts,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub engines: Engines,
}

impl PackageManifest {
    /// Parses manifest text, returning `None` for anything malformed.
    pub fn parse(content: &str) -> Option<Self> {
        match serde_json::from_str::<serde_json::Value>(content) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                warn!(error = %e, "package.json is not valid JSON, treating as absent");
                None
            }
        }
    }

    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        if !value.is_object() {
            warn!("package.json is not an object, treating as absent");
            return None;
        }
        match serde_json::from_value(value) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                warn!(error = %e, "package.json has unexpected field types, treating as absent");
                None
            }
        }
    }

    /// The build script, if declared and non-blank.
    pub fn build_script(&self) -> Option<&str> {
        self.scripts
            .build
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    pub fn node_engine(&self) -> Option<&str> {
        self.engines.node.as_deref()
    }

    pub fn with_build_script(mut self, script: impl Into<String>) -> Self {
        self.scripts.build = Some(script.into());
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), version.into());
        self
    }

    pub fn with_dev_dependency(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.dev_dependencies.insert(name.into(), version.into());
        self
    }

    pub fn with_node_engine(mut self, range: impl Into<String>) -> Self {
        self.engines.node = Some(range.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = PackageManifest::parse(
            r#"{
                "name": "site",
                "scripts": { "build": "next build", "start": "next start" },
                "dependencies": { "next": "^9.0.0", "react": "16.8.0" },
                "devDependencies": { "typescript": "3.5.0" },
                "engines": { "node": "10.x" }
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.build_script(), Some("next build"));
        assert!(manifest.has_dependency("next"));
        assert!(manifest.has_dependency("typescript"));
        assert!(!manifest.has_dependency("gatsby"));
        assert_eq!(manifest.node_engine(), Some("10.x"));
    }

    #[test]
    fn test_missing_fields_default() {
        let manifest = PackageManifest::parse("{}").unwrap();
        assert_eq!(manifest, PackageManifest::default());
        assert!(manifest.build_script().is_none());
    }

    #[test]
    fn test_blank_build_script_is_absent() {
        let manifest = PackageManifest::default().with_build_script("   ");
        assert!(manifest.build_script().is_none());
    }

    #[test]
    fn test_malformed_manifest_is_none() {
        assert!(PackageManifest::parse("not json").is_none());
        assert!(PackageManifest::parse("[1, 2]").is_none());
        assert!(PackageManifest::parse(r#"{"scripts": "build"}"#).is_none());
        assert!(PackageManifest::parse(r#"{"dependencies": {"next": 9}}"#).is_none());
    }
}
