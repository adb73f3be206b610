//! Framework presets
//!
//! A preset pairs a framework's npm package with the CLI command its build
//! script must run. Presets are kept in a fixed priority list and detection
//! is deterministic: the first preset whose dependency is declared and whose
//! build command appears in `scripts.build` wins.

pub mod framework_id;

pub use framework_id::FrameworkId;

use crate::detection::builder_id::BuilderId;
use crate::detection::diagnostic::Diagnostic;
use crate::manifest::PackageManifest;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkPreset {
    pub id: FrameworkId,
    /// npm package that must be declared as a (dev) dependency
    pub dependency: &'static str,
    /// Command the build script must invoke
    pub build_command: &'static str,
    pub builder: BuilderId,
    /// Directory the build writes static output to, when not the builder's default
    pub output_directory: Option<&'static str>,
}

impl FrameworkPreset {
    /// Manifest the preset's builder consumes
    pub const ENTRY_FILE: &'static str = crate::fs::path::MANIFEST_FILE;

    pub fn declares_dependency(&self, manifest: &PackageManifest) -> bool {
        manifest.has_dependency(self.dependency)
    }

    pub fn invokes_cli(&self, manifest: &PackageManifest) -> bool {
        manifest
            .build_script()
            .is_some_and(|script| script_runs(script, self.build_command))
    }

    pub fn matches(&self, manifest: &PackageManifest) -> bool {
        self.declares_dependency(manifest) && self.invokes_cli(manifest)
    }
}

static PRESETS: &[FrameworkPreset] = &[
    FrameworkPreset {
        id: FrameworkId::NextJs,
        dependency: "next",
        build_command: "next build",
        builder: BuilderId::Next,
        output_directory: None,
    },
    FrameworkPreset {
        id: FrameworkId::Gatsby,
        dependency: "gatsby",
        build_command: "gatsby build",
        builder: BuilderId::StaticBuild,
        output_directory: Some("public"),
    },
    FrameworkPreset {
        id: FrameworkId::CreateReactApp,
        dependency: "react-scripts",
        build_command: "react-scripts build",
        builder: BuilderId::StaticBuild,
        output_directory: Some("build"),
    },
    FrameworkPreset {
        id: FrameworkId::VueCli,
        dependency: "@vue/cli-service",
        build_command: "vue-cli-service build",
        builder: BuilderId::StaticBuild,
        output_directory: Some("dist"),
    },
];

/// All presets in priority order.
pub fn presets() -> &'static [FrameworkPreset] {
    PRESETS
}

/// Returns the highest-priority preset matching the manifest.
pub fn detect(manifest: &PackageManifest) -> Option<&'static FrameworkPreset> {
    let preset = PRESETS.iter().find(|p| p.matches(manifest));
    if let Some(preset) = preset {
        debug!(framework = %preset.id, "framework preset matched");
    }
    preset
}

/// Reports the first preset that the manifest only half-declares.
///
/// A dependency without the build command yields `missing_build_script`;
/// the build command without the dependency yields
/// `missing_framework_dependency`.
pub fn find_ambiguity(manifest: &PackageManifest) -> Option<Diagnostic> {
    PRESETS.iter().find_map(|preset| {
        let has_dep = preset.declares_dependency(manifest);
        let runs_cli = preset.invokes_cli(manifest);
        match (has_dep, runs_cli) {
            (true, false) if manifest.build_script().is_none() => {
                Some(Diagnostic::missing_build_script(
                    &preset.id.name(),
                    preset.dependency,
                    preset.build_command,
                ))
            }
            (false, true) => Some(Diagnostic::missing_framework_dependency(
                &preset.id.name(),
                preset.dependency,
                preset.build_command,
            )),
            _ => None,
        }
    })
}

/// True when the build script implies any known framework.
pub fn implies_framework(manifest: &PackageManifest) -> bool {
    PRESETS.iter().any(|p| p.invokes_cli(manifest))
}

fn script_runs(script: &str, command: &str) -> bool {
    let words: Vec<&str> = script.split_whitespace().collect();
    let wanted: Vec<&str> = command.split_whitespace().collect();
    words.windows(wanted.len()).any(|w| w == wanted.as_slice())
}
