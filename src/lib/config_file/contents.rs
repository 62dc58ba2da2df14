//! The entries that a project file adds to its descriptor
use serde::*;

/// [`ContentsAttribute`] - Files, libraries and symbols added to the project
/// * `sources` - Source files, relative to the project file
/// * `source_dirs` - Directories whose source and header files are all added
/// * `include_dirs` - Include directories
/// * `libraries` - Library names, archive paths or linker flags, kept verbatim
/// * `defines` - Preprocessor symbols
/// * `assets` - Asset files
/// * `asset_globs` - Glob patterns expanded when the project is built. A pattern
/// without any match is fine
/// * `shaders` - Shader sources
///
/// Every string accepts `{placeholders}`, see [`crate::utils::reader`].
///
/// ### Tests
///
/// ```rust
/// use armory_make::config_file::contents::ContentsAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[contents]
///     sources = ['Sources/main.cpp']
///     include_dirs = ['v8/include']
///     libraries = ['Dbghelp', 'winmm']
///     asset_globs = ['Assets/*.png']
///"#;
///
/// let config: ContentsAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the project file");
///
/// assert_eq!(config.sources, vec!["Sources/main.cpp"]);
/// assert_eq!(config.include_dirs, vec!["v8/include"]);
/// assert_eq!(config.libraries, vec!["Dbghelp", "winmm"]);
/// assert_eq!(config.asset_globs, vec!["Assets/*.png"]);
/// assert!(config.defines.is_empty());
/// assert!(!config.is_empty());
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ContentsAttribute {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub source_dirs: Vec<String>,
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub libraries: Vec<String>,
    #[serde(default)]
    pub defines: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub asset_globs: Vec<String>,
    #[serde(default)]
    pub shaders: Vec<String>,
}

impl ContentsAttribute {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
            && self.source_dirs.is_empty()
            && self.include_dirs.is_empty()
            && self.libraries.is_empty()
            && self.defines.is_empty()
            && self.assets.is_empty()
            && self.asset_globs.is_empty()
            && self.shaders.is_empty()
    }
}
