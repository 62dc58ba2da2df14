//! Expansion of the entries that stand for more than one file: glob patterns
//! and whole source directories

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::error::{ProjectError, ProjectResult};
use crate::utils::{constants::SOURCE_EXTENSIONS, fs::normalize};

/// A glob pattern declared relative to a base directory. The base directory
/// is always matched literally, only the pattern text can hold wildcards
#[derive(Debug, PartialEq, Eq)]
pub struct GlobPattern {
    pub base_dir: PathBuf,
    pub pattern: PathBuf,
}

impl GlobPattern {
    pub fn new<B: Into<PathBuf>, P: Into<PathBuf>>(base_dir: B, pattern: P) -> Self {
        Self {
            base_dir: base_dir.into(),
            pattern: pattern.into(),
        }
    }

    /// The pattern handed to `glob`: the escaped base directory, moved up by
    /// the leading `..` of the pattern, followed by the rest of the pattern
    pub fn to_glob(&self) -> String {
        let pattern = normalize(&self.pattern);
        if pattern.is_absolute() {
            return to_slashes(&pattern);
        }

        let mut literal = normalize(&self.base_dir);
        let mut components = pattern.components().peekable();
        while let Some(Component::ParentDir) = components.peek() {
            literal.pop();
            components.next();
        }
        let rest: PathBuf = components.collect();

        let literal = glob::Pattern::escape(&to_slashes(&literal));
        if rest.as_os_str().is_empty() {
            literal
        } else {
            format!("{}/{}", literal.trim_end_matches('/'), to_slashes(&rest))
        }
    }

    /// The matching files, in the alphabetical order `glob` yields them.
    /// Entries that can't be read are skipped
    pub fn resolve(&self) -> ProjectResult<Vec<PathBuf>> {
        let pattern = self.to_glob();

        let paths = glob::glob(&pattern).map_err(|source| ProjectError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        Ok(paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Skipping an unreadable match of '{pattern}': {e}");
                    None
                }
            })
            .collect())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SourceDir(pub PathBuf);

impl SourceDir {
    /// Every C, C++ or Objective-C source and header under the directory,
    /// sorted by path. A missing directory yields nothing
    pub fn resolve(&self) -> Vec<PathBuf> {
        if !self.0.is_dir() {
            log::info!("Source directory {:?} does not exist", self.0);
            return vec![];
        }

        WalkDir::new(&self.0)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_source_file(p))
            .collect()
    }
}

fn to_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}
