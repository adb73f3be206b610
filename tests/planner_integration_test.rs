//! End-to-end planning over projects written to disk

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use zerodeploy::detection::diagnostic::{CONFLICTING_FILE_PATH, UNSUPPORTED_NODE_VERSION};
use zerodeploy::{DeploymentPlan, DeploymentPlanner, DetectorOptions, ProjectScanner};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn plan(root: &Path, options: DetectorOptions) -> DeploymentPlan {
    let snapshot = ProjectScanner::new(root).unwrap().scan().unwrap();
    DeploymentPlanner::new(options).plan(&snapshot)
}

#[test]
fn test_next_project_with_api() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "package.json",
        r#"{
            "scripts": {"build": "next build"},
            "dependencies": {"next": "9.0.0", "react": "16.8.0"},
            "engines": {"node": "10.x"}
        }"#,
    );
    write(dir.path(), "pages/index.js", "export default () => null");
    write(dir.path(), "api/hello.js", "module.exports = () => {}");
    write(dir.path(), "node_modules/next/package.json", "{}");

    let plan = plan(dir.path(), DetectorOptions::default());
    assert!(plan.is_success(), "{:?}", plan.errors);

    let builders = plan.builders.unwrap();
    assert_eq!(builders.len(), 2);
    assert_eq!(builders[0].src, "api/hello.js");
    assert_eq!(builders[1].use_, "@now/next");

    let routes = plan.default_routes.unwrap();
    assert_eq!(routes[0].dest.as_deref(), Some("/api/hello.js"));
    assert_eq!(plan.node_version.unwrap().major, 10);
}

#[test]
fn test_static_site_with_functions() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "index.html", "<html></html>");
    write(dir.path(), "api/[slug].go", "package handler");
    write(dir.path(), ".env", "SECRET=1");

    let plan = plan(dir.path(), DetectorOptions::with_tag("canary"));
    let builders = plan.builders.unwrap();
    let uses: Vec<&str> = builders.iter().map(|b| b.use_.as_str()).collect();
    assert_eq!(uses, vec!["@now/go@canary", "@now/static@canary"]);
    assert!(plan.node_version.is_none());

    let routes = plan.default_routes.unwrap();
    assert_eq!(routes[0].dest.as_deref(), Some("/api/[slug].go?slug=$1"));
    assert_eq!(routes.last().unwrap().src, "/(.*)");
}

#[test]
fn test_gitignored_conflict_is_not_seen() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "api/user.js", "");
    write(dir.path(), "api/user.go", "");

    let conflicted = plan(dir.path(), DetectorOptions::default());
    assert_eq!(conflicted.errors[0].code, CONFLICTING_FILE_PATH);
    assert!(conflicted.builders.is_none());

    write(dir.path(), ".gitignore", "api/user.go\n");
    let resolved = plan(dir.path(), DetectorOptions::default());
    assert!(resolved.is_success());
}

#[test]
fn test_unsupported_engine() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", r#"{"engines": {"node": "6.x"}}"#);
    write(dir.path(), "api/index.js", "");

    let plan = plan(dir.path(), DetectorOptions::default());
    assert_eq!(plan.errors.len(), 1);
    assert_eq!(plan.errors[0].code, UNSUPPORTED_NODE_VERSION);
}

#[test]
fn test_empty_project_is_noop() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# hi");

    let plan = plan(dir.path(), DetectorOptions::default());
    assert!(plan.is_noop());
}
