//! Turns a project directory into a [`ProjectSnapshot`]

use super::path::{self, MANIFEST_FILE};
use crate::detection::service::ProjectSnapshot;
use crate::manifest::PackageManifest;
use anyhow::{Context, Result};
use ignore::{overrides::OverrideBuilder, WalkBuilder};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_FILES: usize = 10_000;

/// Directories never uploaded with a deployment
pub const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Project path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Project path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl ServiceError {
    /// Returns a user-facing message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            ServiceError::PathNotFound(path) => format!(
                "Error: Project path not found\nPath: {}\n\n\
                 Help: The specified path does not exist. Please check:\n\
                 - Is the path correct?\n\
                 - Do you have permission to access it?",
                path.display()
            ),
            ServiceError::NotADirectory(path) => format!(
                "Error: Project path is not a directory\nPath: {}\n\n\
                 Help: Point zerodeploy at the project root, not a file inside it.",
                path.display()
            ),
        }
    }
}

pub struct ProjectScanner {
    root: PathBuf,
    max_files: usize,
}

impl ProjectScanner {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(ServiceError::PathNotFound(root).into());
        }
        if !root.is_dir() {
            return Err(ServiceError::NotADirectory(root).into());
        }

        let root = root
            .canonicalize()
            .context("Failed to canonicalize project path")?;

        debug!(root = %root.display(), "ProjectScanner initialized");

        Ok(Self {
            root,
            max_files: DEFAULT_MAX_FILES,
        })
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scan(&self) -> Result<ProjectSnapshot> {
        let start = Instant::now();
        info!(
            root = %self.root.display(),
            max_files = self.max_files,
            "Scanning project"
        );

        let mut override_builder = OverrideBuilder::new(&self.root);
        for excluded in EXCLUDED_DIRS {
            override_builder
                .add(&format!("!{}/", excluded))
                .context("Invalid exclusion pattern")?;
        }
        let overrides = override_builder
            .build()
            .context("Failed to build exclusion overrides")?;

        let mut files = Vec::new();
        for result in WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .require_git(false)
            .overrides(overrides)
            .build()
        {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().map_or(false, |t| t.is_file()) {
                continue;
            }

            if files.len() >= self.max_files {
                warn!(max_files = self.max_files, "Reached file limit, stopping scan");
                break;
            }

            if let Some(rel) = self.relative(entry.path()) {
                files.push(rel);
            }
        }
        files.sort();

        let manifest = self.read_manifest()?;

        info!(
            files = files.len(),
            has_manifest = manifest.is_some(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Project scan completed"
        );

        Ok(ProjectSnapshot::new(files, manifest))
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let joined = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let normalized = path::normalize(&joined);
        (!normalized.is_empty()).then_some(normalized)
    }

    fn read_manifest(&self) -> Result<Option<PackageManifest>> {
        let manifest_path = self.root.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        Ok(PackageManifest::parse(&content))
    }
}
