use std::{
    fs::{DirBuilder, File},
    io::Write,
    path::{Component, Path, PathBuf},
};

use color_eyre::{eyre::Context, Result};

use crate::domain::error::PathError;

use super::constants::ICON_FILE_NAME;

pub fn create_file(file_path: &Path, buff_write: &[u8]) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_directory(parent)?;
    }

    File::create(file_path)
        .with_context(|| format!("Could not create file {file_path:?}"))?
        .write_all(buff_write)
        .with_context(|| format!("Could not write to file {file_path:?}"))
}

pub fn create_directory(path_create: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .create(path_create)
        .with_context(|| format!("Could not create directory {path_create:?}"))
}

/// Gets the absolute route for an element in the system given a path P,
/// without the extended path prefix that `canonicalize` adds on Windows
pub fn get_absolute_path<P: AsRef<Path>>(p: P) -> Result<PathBuf> {
    let path = p.as_ref();
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Unable to get the absolute path for {path:?}"))?;

    let raw = canonical.to_string_lossy();
    Ok(raw
        .strip_prefix(r"\\?\")
        .map(PathBuf::from)
        .unwrap_or_else(|| canonical.clone()))
}

/// Resolves the project root: relative roots are taken from the directory
/// where the program was invoked
pub fn get_project_root_absolute_path(working_dir: &Path, root: &Path) -> Result<PathBuf> {
    let candidate = if root.is_absolute() {
        root.to_path_buf()
    } else {
        working_dir.join(root)
    };

    get_absolute_path(candidate)
}

/// Returns the path of an `icon.png` placed on the working directory, if any
pub fn find_icon(working_dir: &Path) -> Option<PathBuf> {
    let icon = working_dir.join(ICON_FILE_NAME);
    if icon.is_file() {
        log::debug!("Found a project icon at {icon:?}");
        Some(icon)
    } else {
        None
    }
}

/// Lexically normalizes a path: backslashes become forward slashes, and the
/// `.` and `..` components are collapsed. The file system isn't touched.
pub fn normalize(path: &Path) -> PathBuf {
    let unified = path.to_string_lossy().replace('\\', "/");
    let mut normalized = PathBuf::new();

    for component in Path::new(&unified).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match normalized.components().next_back() {
                    Some(Component::Normal(_)) => normalized.pop(),
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Resolves the paths declared on a project against its base directory.
///
/// When a sandbox root is set, any path that ends up outside of it is rejected.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct PathResolver {
    sandbox_root: Option<PathBuf>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sandboxed<P: AsRef<Path>>(root: P) -> Self {
        Self {
            sandbox_root: Some(normalize(root.as_ref())),
        }
    }

    pub fn sandbox_root(&self) -> Option<&Path> {
        self.sandbox_root.as_deref()
    }

    /// Joins `relative` to `base_dir` and normalizes the result. Absolute
    /// inputs only get normalized, so resolving twice gives the same path
    pub fn resolve(&self, base_dir: &Path, relative: &Path) -> Result<PathBuf, PathError> {
        if relative.as_os_str().is_empty() {
            return Err(PathError::Empty);
        }

        let relative = normalize(relative);
        let resolved = if relative.is_absolute() {
            relative
        } else {
            normalize(&base_dir.join(relative))
        };

        match self.sandbox_root {
            Some(ref root) if !resolved.starts_with(root) => Err(PathError::EscapesSandbox {
                path: resolved,
                root: root.clone(),
            }),
            _ => Ok(resolved),
        }
    }
}
