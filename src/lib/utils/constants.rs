//! Constant value definitions to use across the whole program

pub const PROJECT_FILE_NAME: &str = "armory.toml";
pub const ICON_FILE_NAME: &str = "icon.png";

/// The engine whose prebuilt libraries are linked by the runtime
pub const V8: &str = "v8";

/// File extensions picked when a whole source directory is added
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx", "inl", "m", "mm",
];

/// The names that can always be used as `{placeholder}` on a project file
pub mod placeholders {
    pub const ROOT: &str = "root";
    pub const SYSTEM: &str = "system";
    pub const BUILD: &str = "build";
    pub const PLATFORM: &str = "platform";
}

pub mod error_messages {
    pub const READ_CFG_FILE: &str = "Could not read the project file";
    pub const PARSE_CFG_FILE: &str = "Could not parse the project file";
    pub const FAILURE_GATHERING_PROJECT_ROOT_ABS_PATH: &str =
        "An unexpected error happened while resolving the absolute path of the project root";
    pub const FAILURE_LOADING_SUB_PROJECT: &str = "Failed to load the sub-project";
    pub const FAILURE_ASSEMBLING_FLAGS: &str = "Failed to assemble the build flags";
    pub const FAILURE_BUILDING_DESCRIPTOR: &str = "Failed to build the project descriptor";
    pub const FAILURE_FLATTENING: &str = "Failed to flatten the project graph";
    pub const FAILURE_WRITING_OUTPUT: &str = "Failed to write the flattened project";
}

pub const CONFIG_FILE_MOCK: &str = r#"
[project]
name = "Armory"
cpp_std = "c++17"
debug_dir = "Deployment"

[flags]
package = "org.armory3d"
with_audio = true
with_worker = true
with_compute = false

[contents]
sources = ["Sources/main.cpp"]
include_dirs = ["v8/include"]

[[when]]
flag = "with_audio"
defines = ["WITH_AUDIO"]

[[when]]
flag = "with_worker"
defines = ["WITH_WORKER"]
sources = ["Sources/worker.h", "Sources/worker.cpp"]

[[when]]
platform = "linux"
libraries = ["v8_monolith -L{root}/v8/libraries/{system}/{build}/"]
defines = ["KINC_NO_WAYLAND"]

[[when]]
platform = "windows"
mode = "debug"
defines = ["_HAS_ITERATOR_DEBUGGING=0", "_ITERATOR_DEBUG_LEVEL=0"]
"#;
