//! The failures that abort a build invocation

use std::path::PathBuf;

use thiserror::Error;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Unknown flag '{0}'. Only the flags registered on the defaults can be queried")]
    UnknownFlag(String),

    #[error("Flag '{name}' is not a {expected} flag")]
    FlagKind { name: String, expected: &'static str },

    #[error("Cyclic dependency between projects: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Invalid glob pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Project id {0} does not belong to this project graph")]
    UnknownProject(usize),

    #[error("Unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Base directory {0:?} does not exist")]
    MissingBaseDir(PathBuf),

    #[error("Base directory {0:?} must be an absolute path")]
    RelativeBaseDir(PathBuf),

    #[error("{path:?} escapes the sandbox root {root:?}")]
    EscapesSandbox { path: PathBuf, root: PathBuf },

    #[error("Found an empty path where a file or directory was expected")]
    Empty,
}

impl ProjectError {
    pub fn flag_kind(name: impl Into<String>, expected: &'static str) -> Self {
        Self::FlagKind {
            name: name.into(),
            expected,
        }
    }
}
