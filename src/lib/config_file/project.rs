//! Metadata about the described project
use serde::*;

use crate::project_model::compiler::CppStandard;

/// [`ProjectAttribute`] - Metadata about the described project
/// * `name` - The name of the project, used to report it and to name the flattened result
/// * `cpp_std` - The C++ standard level required by the project
/// * `debug_dir` - Directory, relative to the project file, where the debug runs happen
/// * `icon` - Relative path to the application icon. When missing, an `icon.png`
/// on the working directory is used if it exists
/// * `sub_projects` - Directories, relative to the project file, that hold the
/// project files of the libraries this project depends on
///
/// ### Tests
///
/// ```rust
/// use armory_make::config_file::project::ProjectAttribute;
/// use armory_make::project_model::compiler::CppStandard;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[project]
///     name = 'Armory'
///     cpp_std = 'c++17'
///     debug_dir = 'Deployment'
///     sub_projects = ['Kinc']
///"#;
///
/// let config: ProjectAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the project file");
///
/// assert_eq!(config.name, "Armory");
/// assert_eq!(config.cpp_std, Some(CppStandard::CPP17));
/// assert_eq!(config.debug_dir.as_deref(), Some("Deployment"));
/// assert_eq!(config.icon, None);
/// assert_eq!(config.sub_projects, vec!["Kinc"]);
/// ```
///
/// > Note: TOML table are toml commented (#) to allow us to parse
/// the inner attributes as the direct type that they belongs to.
/// That commented tables aren't the real TOML, they are just there
/// for testing and exemplification purposes of the inner attributes
/// of the project file.
///
/// For a test over a real example, please look at the
/// [`crate::config_file::ArmoryConfigFile`] doc-test
#[derive(Serialize, Deserialize, Debug, PartialEq, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProjectAttribute {
    pub name: String,
    pub cpp_std: Option<CppStandard>,
    pub debug_dir: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub sub_projects: Vec<String>,
}
