//! The platform and mode pair selected for one build invocation

use core::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The platforms that a project can be described for
#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Copy, Clone)]
pub enum Platform {
    #[serde(alias = "windows", alias = "win32")]
    Windows,
    #[serde(alias = "linux")]
    Linux,
    #[serde(alias = "macos", alias = "macOS", alias = "osx", alias = "OSX")]
    MacOs,
    #[serde(alias = "wasm")]
    Wasm,
    #[serde(alias = "android")]
    Android,
    #[serde(alias = "ios", alias = "iOS")]
    Ios,
}

impl Platform {
    /// The platform the current process was compiled for. Anything that isn't
    /// a desktop host of ours falls back to Linux
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// The name used by the prebuilt libraries directory layout
    pub fn system_name(&self) -> &'static str {
        match *self {
            Platform::Windows => "win32",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Wasm => "wasm",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        match *self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Wasm => "wasm",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Copy, Clone)]
pub enum BuildMode {
    #[serde(alias = "debug")]
    Debug,
    #[default]
    #[serde(alias = "release")]
    Release,
}

impl AsRef<str> for BuildMode {
    fn as_ref(&self) -> &str {
        match *self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// The (platform, mode) pair. Selected once at the start of an invocation
/// and never changed afterwards
#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Copy, Clone)]
pub struct BuildTarget {
    pub platform: Platform,
    pub mode: BuildMode,
}

impl BuildTarget {
    pub fn new(platform: Platform, mode: BuildMode) -> Self {
        Self { platform, mode }
    }

    pub fn is_debug(&self) -> bool {
        self.mode == BuildMode::Debug
    }

    /// The directory where the prebuilt libraries of `engine` live for this
    /// target: `<root>/<engine>/libraries/<system>/<mode>`
    pub fn library_dir(&self, root: &Path, engine: &str) -> PathBuf {
        root.join(engine)
            .join("libraries")
            .join(self.platform.system_name())
            .join(self.mode.as_ref())
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_dir_layout() {
        let target = BuildTarget::new(Platform::Windows, BuildMode::Debug);
        let dir = target.library_dir(Path::new("/engine"), "v8");

        assert_eq!(dir, Path::new("/engine/v8/libraries/win32/debug"));
        assert!(target.is_debug());
    }

    #[test]
    fn test_platform_aliases_from_toml() {
        #[derive(Deserialize)]
        struct Holder {
            platforms: Vec<Platform>,
        }

        let holder: Holder =
            toml::from_str(r#"platforms = ["win32", "osx", "linux", "iOS"]"#).unwrap();
        assert_eq!(
            holder.platforms,
            vec![
                Platform::Windows,
                Platform::MacOs,
                Platform::Linux,
                Platform::Ios
            ]
        );
    }
}
