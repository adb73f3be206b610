crate::define_id_enum! {
    /// Builder identifier as it appears in the `use` field
    BuilderId {
        Node => "@now/node" : "Node.js",
        Go => "@now/go" : "Go",
        Python => "@now/python" : "Python",
        Ruby => "@now/ruby" : "Ruby",
        Next => "@now/next" : "Next.js",
        StaticBuild => "@now/static-build" : "Static Build",
        Static => "@now/static" : "Static",
    }
}

impl BuilderId {
    /// Builder that turns an `api/` source file with this extension into a
    /// function.
    pub fn for_api_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "mjs" | "ts" => Some(Self::Node),
            "go" => Some(Self::Go),
            "py" => Some(Self::Python),
            "rb" => Some(Self::Ruby),
            _ => None,
        }
    }

    /// Parses a `use` field, dropping a trailing `@tag`.
    ///
    /// `@now/node@canary` and `@now/node` both yield `Node`.
    pub fn from_use(use_field: &str) -> Self {
        Self::from_id(strip_tag(use_field))
    }

    /// Renders the `use` field, appending `@tag` when one is given.
    pub fn with_tag(&self, tag: Option<&str>) -> String {
        match tag.map(str::trim).filter(|t| !t.is_empty()) {
            Some(tag) => format!("{}@{}", self.as_str(), tag),
            None => self.as_str().to_string(),
        }
    }

    /// Builders that turn a single source file into a function.
    pub fn is_api_runtime(&self) -> bool {
        matches!(self, Self::Node | Self::Go | Self::Python | Self::Ruby)
    }

    /// Builders whose output runs on (or is built with) Node.js.
    pub fn is_node_based(&self) -> bool {
        matches!(self, Self::Node | Self::Next | Self::StaticBuild)
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static)
    }
}

fn strip_tag(use_field: &str) -> &str {
    let scope_end = if use_field.starts_with('@') { 1 } else { 0 };
    match use_field[scope_end..].find('@') {
        Some(idx) => &use_field[..scope_end + idx],
        None => use_field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_id_serialization() {
        assert_eq!(
            serde_json::to_string(&BuilderId::Node).unwrap(),
            "\"@now/node\""
        );
        let parsed: BuilderId = serde_json::from_str("\"@now/php\"").unwrap();
        assert_eq!(parsed, BuilderId::Custom("@now/php".to_string()));
    }

    #[test]
    fn test_from_use_strips_tag() {
        assert_eq!(BuilderId::from_use("@now/node@canary"), BuilderId::Node);
        assert_eq!(BuilderId::from_use("@now/static"), BuilderId::Static);
        assert_eq!(BuilderId::from_use("@now/go@0.5.1"), BuilderId::Go);
        assert_eq!(
            BuilderId::from_use("custom-builder@1.0.0"),
            BuilderId::Custom("custom-builder".to_string())
        );
    }

    #[test]
    fn test_with_tag() {
        assert_eq!(BuilderId::Node.with_tag(Some("canary")), "@now/node@canary");
        assert_eq!(BuilderId::Static.with_tag(None), "@now/static");
        assert_eq!(BuilderId::Go.with_tag(Some("")), "@now/go");
    }

    #[test]
    fn test_api_extensions() {
        assert_eq!(BuilderId::for_api_extension("ts"), Some(BuilderId::Node));
        assert_eq!(BuilderId::for_api_extension("py"), Some(BuilderId::Python));
        assert_eq!(BuilderId::for_api_extension("html"), None);
        assert!(BuilderId::all_variants()
            .iter()
            .filter(|id| id.is_api_runtime())
            .all(|id| !id.is_static()));
    }
}
