//! root file for the crate where the datastructures that holds the TOML
//! parsed data of the project files lives.
pub mod contents;
pub mod project;
pub mod when;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::flags::FlagValue;

use self::{contents::ContentsAttribute, project::ProjectAttribute, when::WhenAttribute};

/// ```rust
/// use armory_make::config_file::ArmoryConfigFile;
/// use armory_make::domain::flags::FlagValue;
/// use armory_make::domain::target::{BuildMode, Platform};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     [project]
///     name = 'Armory'
///     cpp_std = 'c++17'
///
///     [flags]
///     package = 'org.armory3d'
///     with_audio = true
///
///     [contents]
///     sources = [ 'Sources/main.cpp' ]
///
///     [[when]]
///     flag = 'with_audio'
///     defines = [ 'WITH_AUDIO' ]
///
///     [[when]]
///     platform = 'linux'
///     mode = 'release'
///     libraries = [ 'v8_monolith -L{root}/v8/libraries/{system}/{build}/' ]
/// "#;
///
/// let config = armory_make::config_file::armory_cfg_from_file(CONFIG_FILE_MOCK)
///     .expect("A failure happened parsing the project file");
///
/// assert_eq!(config.project.name, "Armory");
///
/// let flags: Vec<_> = config.flags.iter().collect();
/// assert_eq!(flags[0], (&"package".to_string(), &FlagValue::from("org.armory3d")));
/// assert_eq!(flags[1], (&"with_audio".to_string(), &FlagValue::from(true)));
///
/// assert_eq!(config.contents.sources, vec!["Sources/main.cpp"]);
/// assert_eq!(config.when.len(), 2);
/// assert_eq!(config.when[0].flag.as_deref(), Some("with_audio"));
/// assert_eq!(config.when[1].platform, Some(Platform::Linux));
/// assert_eq!(config.when[1].mode, Some(BuildMode::Release));
/// ```
/// The [`ArmoryConfigFile`] is the type that holds
/// the whole hierarchy of the attributes of a project file
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ArmoryConfigFile {
    pub project: ProjectAttribute,
    #[serde(default)]
    pub flags: IndexMap<String, FlagValue>,
    #[serde(default)]
    pub contents: ContentsAttribute,
    #[serde(default)]
    pub when: Vec<WhenAttribute>,
}

pub fn armory_cfg_from_file(cfg: &str) -> Result<ArmoryConfigFile, toml::de::Error> {
    toml::from_str(cfg)
}
