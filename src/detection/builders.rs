//! Builder synthesis
//!
//! Classifies the project files into API functions, a framework build and
//! static assets. The produced order is API builders by path, then the
//! framework builder, then static builders; route synthesis depends on it.

use super::builder_id::BuilderId;
use super::diagnostic::Diagnostic;
use super::types::{BuilderDetection, BuilderSpec, DetectorOptions};
use crate::framework::{self, FrameworkPreset};
use crate::fs::path::{self, API_DIR, MANIFEST_FILE, PUBLIC_DIR};
use crate::manifest::PackageManifest;
use tracing::debug;

/// Glob handed to the static builder when a `public/` directory exists
pub const PUBLIC_GLOB: &str = "public/**/*";

/// Infers the builders for a project.
pub fn detect_builders<S: AsRef<str>>(
    files: &[S],
    manifest: Option<&PackageManifest>,
    options: &DetectorOptions,
) -> BuilderDetection {
    let tag = options.tag();
    let mut files: Vec<String> = files.iter().map(|f| path::normalize(f.as_ref())).collect();
    files.sort();
    files.dedup();

    let mut builders = detect_api_builders(&files, tag);
    debug!(count = builders.len(), "API builders detected");

    let build_step = manifest.and_then(|m| detect_build_step(m, tag));
    let has_build_step = build_step.is_some();
    builders.extend(build_step);

    if builders.is_empty() {
        if let Some(diagnostic) = manifest.and_then(missing_build_diagnostic) {
            debug!(code = %diagnostic.code, "manifest present but nothing to build");
            return BuilderDetection::Errors(vec![diagnostic]);
        }
    }

    if !has_build_step {
        let has_api = !builders.is_empty();
        builders.extend(detect_static_builders(&files, has_api, tag));
    }

    if builders.is_empty() {
        debug!("no builders detected");
        return BuilderDetection::NoOp;
    }

    BuilderDetection::Builders(builders)
}

fn detect_api_builders(files: &[String], tag: Option<&str>) -> Vec<BuilderSpec> {
    files
        .iter()
        .filter(|f| is_api_source(f))
        .filter_map(|f| {
            let id = path::extension(f).and_then(BuilderId::for_api_extension)?;
            Some(BuilderSpec::zero_config(f.as_str(), id.with_tag(tag)))
        })
        .collect()
}

/// True for routable function sources under `api/`.
pub fn is_api_source(file: &str) -> bool {
    path::is_under(file, API_DIR)
        && !path::is_private(file)
        && !path::is_type_declaration(file)
        && path::basename(file) != MANIFEST_FILE
        && path::extension(file).and_then(BuilderId::for_api_extension).is_some()
}

fn detect_build_step(manifest: &PackageManifest, tag: Option<&str>) -> Option<BuilderSpec> {
    if let Some(preset) = framework::detect(manifest) {
        return Some(preset_builder(preset, tag));
    }

    // A build script that names no known framework still builds something.
    if manifest.build_script().is_some() && !framework::implies_framework(manifest) {
        debug!("generic build script found, using static-build");
        return Some(BuilderSpec::zero_config(
            FrameworkPreset::ENTRY_FILE,
            BuilderId::StaticBuild.with_tag(tag),
        ));
    }
    None
}

/// A manifest that produced no builder must at least carry a build script.
fn missing_build_diagnostic(manifest: &PackageManifest) -> Option<Diagnostic> {
    framework::find_ambiguity(manifest).or_else(|| {
        manifest
            .build_script()
            .is_none()
            .then(Diagnostic::missing_build_script_property)
    })
}

fn preset_builder(preset: &FrameworkPreset, tag: Option<&str>) -> BuilderSpec {
    let spec = BuilderSpec::zero_config(FrameworkPreset::ENTRY_FILE, preset.builder.with_tag(tag));
    match preset.output_directory {
        Some(dir) => spec.with_config("outputDirectory", serde_json::Value::from(dir)),
        None => spec,
    }
}

fn detect_static_builders(files: &[String], has_api: bool, tag: Option<&str>) -> Vec<BuilderSpec> {
    let use_ = BuilderId::Static.with_tag(tag);

    if files.iter().any(|f| path::is_under(f, PUBLIC_DIR)) {
        debug!("public directory found, serving it as the static root");
        return vec![BuilderSpec::zero_config(PUBLIC_GLOB, use_)];
    }

    // Loose files only become static assets next to functions.
    if !has_api {
        return Vec::new();
    }

    let mut loose: Vec<&String> = files.iter().filter(|f| is_static_candidate(f)).collect();
    loose.sort_by(|a, b| {
        path::basename(a)
            .cmp(path::basename(b))
            .then_with(|| a.cmp(b))
    });
    debug!(count = loose.len(), "loose static files detected");

    loose
        .into_iter()
        .map(|f| BuilderSpec::zero_config(f.as_str(), use_.clone()))
        .collect()
}

fn is_static_candidate(file: &str) -> bool {
    path::first_segment(file) != Some(API_DIR)
        && file != MANIFEST_FILE
        && !path::has_hidden_segment(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::diagnostic::{MISSING_BUILD_SCRIPT, MISSING_FRAMEWORK_DEPENDENCY};

    fn srcs(detection: &BuilderDetection) -> Vec<&str> {
        detection
            .builders()
            .unwrap()
            .iter()
            .map(|b| b.src.as_str())
            .collect()
    }

    #[test]
    fn test_single_static_file_is_noop() {
        let result = detect_builders(&["index.html"], None, &DetectorOptions::default());
        assert!(result.is_noop());
    }

    #[test]
    fn test_api_with_loose_static_files() {
        let result = detect_builders(
            &["api/endpoint.js", "index.html", "favicon.ico"],
            None,
            &DetectorOptions::default(),
        );
        assert_eq!(srcs(&result), vec!["api/endpoint.js", "favicon.ico", "index.html"]);
        let builders = result.builders().unwrap();
        assert_eq!(builders[0].use_, "@now/node");
        assert_eq!(builders[1].use_, "@now/static");
    }

    #[test]
    fn test_private_and_unknown_api_files_skipped() {
        let result = detect_builders(
            &[
                "api/_lib/db.js",
                "api/.secret.js",
                "api/data.json",
                "api/users.ts",
                "api/main.go",
            ],
            None,
            &DetectorOptions::default(),
        );
        assert_eq!(srcs(&result), vec!["api/main.go", "api/users.ts"]);
    }

    #[test]
    fn test_public_directory_is_one_builder() {
        let result = detect_builders(
            &["api/users.js", "public/index.html", "public/css/site.css", "README.md"],
            None,
            &DetectorOptions::default(),
        );
        assert_eq!(srcs(&result), vec!["api/users.js", PUBLIC_GLOB]);
    }

    #[test]
    fn test_public_directory_without_api() {
        let result = detect_builders(&["public/index.html"], None, &DetectorOptions::default());
        assert_eq!(srcs(&result), vec![PUBLIC_GLOB]);
    }

    #[test]
    fn test_framework_builder_after_api() {
        let manifest = PackageManifest::default()
            .with_dependency("next", "9.0.0")
            .with_build_script("next build");
        let result = detect_builders(
            &["package.json", "pages/index.js", "api/hello.js", "public/logo.png"],
            Some(&manifest),
            &DetectorOptions::default(),
        );
        let builders = result.builders().unwrap();
        assert_eq!(builders.len(), 2);
        assert_eq!(builders[0].src, "api/hello.js");
        assert_eq!(builders[1].src, "package.json");
        assert_eq!(builders[1].use_, "@now/next");
    }

    #[test]
    fn test_missing_build_script() {
        let manifest = PackageManifest::default().with_dependency("next", "9.0.0");
        let result = detect_builders(
            &["package.json", "pages/index.js"],
            Some(&manifest),
            &DetectorOptions::default(),
        );
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, MISSING_BUILD_SCRIPT);
        assert!(result.builders().is_none());
    }

    #[test]
    fn test_missing_framework_dependency() {
        let manifest = PackageManifest::default().with_build_script("gatsby build");
        let result = detect_builders(&["package.json"], Some(&manifest), &DetectorOptions::default());
        assert_eq!(result.errors().unwrap()[0].code, MISSING_FRAMEWORK_DEPENDENCY);
    }

    #[test]
    fn test_ambiguity_suppressed_by_api_builders() {
        let manifest = PackageManifest::default().with_dependency("next", "9.0.0");
        let result = detect_builders(
            &["package.json", "api/users.js", "index.html"],
            Some(&manifest),
            &DetectorOptions::default(),
        );
        assert_eq!(srcs(&result), vec!["api/users.js", "index.html"]);
    }

    #[test]
    fn test_manifest_without_build_script_or_functions() {
        let manifest = PackageManifest::default().with_dependency("lodash", "4.0.0");
        let result = detect_builders(
            &["package.json", "index.html"],
            Some(&manifest),
            &DetectorOptions::default(),
        );
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], Diagnostic::missing_build_script_property());
    }

    #[test]
    fn test_preset_message_kept_for_missing_build_script() {
        let manifest = PackageManifest::default().with_dependency("gatsby", "2.0.0");
        let result = detect_builders(&["package.json"], Some(&manifest), &DetectorOptions::default());
        let errors = result.errors().unwrap();
        assert_eq!(errors[0].code, MISSING_BUILD_SCRIPT);
        assert!(errors[0].message.contains("gatsby"));
    }

    #[test]
    fn test_generic_build_script_uses_static_build() {
        let manifest = PackageManifest::default().with_build_script("webpack");
        let result = detect_builders(
            &["package.json", "src/index.js"],
            Some(&manifest),
            &DetectorOptions::default(),
        );
        let builders = result.builders().unwrap();
        assert_eq!(builders.len(), 1);
        assert_eq!(builders[0].use_, "@now/static-build");
    }

    #[test]
    fn test_preset_output_directory_config() {
        let manifest = PackageManifest::default()
            .with_dependency("react-scripts", "3.0.0")
            .with_build_script("react-scripts build");
        let result = detect_builders(&["package.json"], Some(&manifest), &DetectorOptions::default());
        let config = result.builders().unwrap()[0].config.clone().unwrap();
        assert_eq!(config["outputDirectory"], "build");
        assert_eq!(config["zeroConfig"], true);
    }

    #[test]
    fn test_tag_applies_to_every_builder() {
        let result = detect_builders(
            &["api/users.js", "api/main.py", "public/index.html"],
            None,
            &DetectorOptions::with_tag("canary"),
        );
        let uses: Vec<&str> = result
            .builders()
            .unwrap()
            .iter()
            .map(|b| b.use_.as_str())
            .collect();
        assert_eq!(
            uses,
            vec!["@now/python@canary", "@now/node@canary", "@now/static@canary"]
        );
    }

    #[test]
    fn test_hidden_files_not_served() {
        let result = detect_builders(
            &["api/users.js", ".gitignore", ".github/workflows/ci.yml", "about.html"],
            None,
            &DetectorOptions::default(),
        );
        assert_eq!(srcs(&result), vec!["api/users.js", "about.html"]);
    }
}
