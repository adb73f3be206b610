crate::define_id_enum! {
    /// Framework identifier for manifest-detected presets
    FrameworkId {
        NextJs => "nextjs" : "Next.js",
        Gatsby => "gatsby" : "Gatsby",
        CreateReactApp => "create-react-app" : "Create React App",
        VueCli => "vue" : "Vue.js",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_id_serialization() {
        assert_eq!(
            serde_json::to_string(&FrameworkId::NextJs).unwrap(),
            "\"nextjs\""
        );
        assert_eq!(
            serde_json::to_string(&FrameworkId::CreateReactApp).unwrap(),
            "\"create-react-app\""
        );
    }

    #[test]
    fn test_framework_id_name() {
        assert_eq!(FrameworkId::NextJs.name(), "Next.js");
        assert_eq!(FrameworkId::VueCli.name(), "Vue.js");
    }

    #[test]
    fn test_unknown_framework_deserialization() {
        let deserialized: FrameworkId = serde_json::from_str("\"svelte\"").unwrap();
        assert_eq!(deserialized, FrameworkId::Custom("svelte".to_string()));
        assert_eq!(deserialized.name(), "svelte");
    }
}
