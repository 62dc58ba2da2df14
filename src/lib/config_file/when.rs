//! Entries that only apply to some build targets or flag combinations
use serde::*;

use super::contents::ContentsAttribute;
use crate::domain::{
    error::ProjectResult,
    flags::FlagSet,
    target::{BuildMode, BuildTarget, Platform},
};

/// [`WhenAttribute`] - A conditional block of entries. The entries are only
/// added when every given condition holds. A block without conditions always applies
/// * `platform` - The target platform must be this one
/// * `mode` - The build mode must be this one
/// * `flag` - This boolean flag must be enabled
///
/// The rest of the keys are the ones of [`ContentsAttribute`]
///
/// ### Tests
///
/// ```rust
/// use armory_make::config_file::when::WhenAttribute;
/// use armory_make::domain::flags::{FlagSet, FlagValue};
/// use armory_make::domain::target::{BuildMode, BuildTarget, Platform};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[[when]]
///     platform = 'win32'
///     mode = 'debug'
///     defines = ['_HAS_ITERATOR_DEBUGGING=0']
///"#;
///
/// let config: WhenAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the project file");
///
/// assert_eq!(config.platform, Some(Platform::Windows));
/// assert_eq!(config.mode, Some(BuildMode::Debug));
/// assert_eq!(config.contents.defines, vec!["_HAS_ITERATOR_DEBUGGING=0"]);
///
/// let flags = FlagSet::default();
/// let windows_debug = BuildTarget::new(Platform::Windows, BuildMode::Debug);
/// let windows_release = BuildTarget::new(Platform::Windows, BuildMode::Release);
/// assert!(config.applies_to(&windows_debug, &flags).unwrap());
/// assert!(!config.applies_to(&windows_release, &flags).unwrap());
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
#[serde(from = "WhenTable", into = "WhenTable")]
pub struct WhenAttribute {
    pub platform: Option<Platform>,
    pub mode: Option<BuildMode>,
    pub flag: Option<String>,
    pub contents: ContentsAttribute,
}

/// The `[[when]]` table as written on the file, conditions and entries side
/// by side. Any other key is rejected
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WhenTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<BuildMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flag: Option<String>,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    source_dirs: Vec<String>,
    #[serde(default)]
    include_dirs: Vec<String>,
    #[serde(default)]
    libraries: Vec<String>,
    #[serde(default)]
    defines: Vec<String>,
    #[serde(default)]
    assets: Vec<String>,
    #[serde(default)]
    asset_globs: Vec<String>,
    #[serde(default)]
    shaders: Vec<String>,
}

impl From<WhenTable> for WhenAttribute {
    fn from(table: WhenTable) -> Self {
        Self {
            platform: table.platform,
            mode: table.mode,
            flag: table.flag,
            contents: ContentsAttribute {
                sources: table.sources,
                source_dirs: table.source_dirs,
                include_dirs: table.include_dirs,
                libraries: table.libraries,
                defines: table.defines,
                assets: table.assets,
                asset_globs: table.asset_globs,
                shaders: table.shaders,
            },
        }
    }
}

impl From<WhenAttribute> for WhenTable {
    fn from(when: WhenAttribute) -> Self {
        let contents = when.contents;
        Self {
            platform: when.platform,
            mode: when.mode,
            flag: when.flag,
            sources: contents.sources,
            source_dirs: contents.source_dirs,
            include_dirs: contents.include_dirs,
            libraries: contents.libraries,
            defines: contents.defines,
            assets: contents.assets,
            asset_globs: contents.asset_globs,
            shaders: contents.shaders,
        }
    }
}

impl WhenAttribute {
    /// Whether the block applies. Referencing a flag that isn't registered
    /// is an error, even when another condition already failed
    pub fn applies_to(&self, target: &BuildTarget, flags: &FlagSet) -> ProjectResult<bool> {
        let flag_enabled = match self.flag {
            Some(ref name) => flags.is_enabled(name)?,
            None => true,
        };

        Ok(flag_enabled
            && self.platform.map_or(true, |p| p == target.platform)
            && self.mode.map_or(true, |m| m == target.mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misspelled_entry_is_rejected() {
        let raw = r#"
            flag = "with_audio"
            define = ["WITH_AUDIO"]
        "#;
        let err = toml::from_str::<WhenAttribute>(raw).unwrap_err();
        assert!(err.to_string().contains("define"));
    }

    #[test]
    fn test_conditions_and_entries_share_the_table() {
        let raw = r#"
            platform = "linux"
            flag = "with_worker"
            sources = ["Sources/worker.cpp"]
            defines = ["WITH_WORKER"]
        "#;
        let when: WhenAttribute = toml::from_str(raw).unwrap();

        assert_eq!(when.platform, Some(Platform::Linux));
        assert_eq!(when.mode, None);
        assert_eq!(when.flag.as_deref(), Some("with_worker"));
        assert_eq!(when.contents.sources, vec!["Sources/worker.cpp"]);
        assert_eq!(when.contents.defines, vec!["WITH_WORKER"]);
    }
}
