//! The native runtime of Armory3D, a Kinc application that embeds V8

use std::path::Path;

use crate::{
    domain::{
        error::ProjectResult,
        flags::{FlagSet, FlagValue},
        target::{BuildMode, BuildTarget, Platform},
    },
    project_model::{compiler::CppStandard, ProjectDescriptor, ProjectGraph, ProjectId},
    utils::{self, constants::V8},
};

/// The flags the runtime description reads, with their default values
pub fn default_flags() -> FlagSet {
    FlagSet::new([
        ("name", FlagValue::from("Armory")),
        ("package", FlagValue::from("org.armory3d")),
        ("with_audio", FlagValue::from(true)),
        ("with_worker", FlagValue::from(true)),
        ("with_compute", FlagValue::from(true)),
    ])
}

/// Adds the runtime project, rooted at `root`, to the graph.
///
/// `kinc` is the already described Kinc project, if the caller has one. An
/// `icon.png` found on the `working_dir` becomes the application icon
pub fn describe(
    graph: &mut ProjectGraph,
    target: &BuildTarget,
    flags: &FlagSet,
    root: &Path,
    working_dir: &Path,
    kinc: Option<ProjectId>,
) -> ProjectResult<ProjectId> {
    let mut project = ProjectDescriptor::new(flags.string("name")?, root)?;
    if let Some(kinc) = kinc {
        graph.get(kinc)?;
        project.add_sub_project(kinc);
    }

    project.set_cpp_std(CppStandard::CPP17);
    project.set_debug_dir("Deployment")?;

    if let Some(icon) = utils::fs::find_icon(working_dir) {
        project.set_found_icon(icon)?;
    }

    if flags.is_enabled("with_audio")? {
        project.add_define("WITH_AUDIO");
    }
    if flags.is_enabled("with_compute")? {
        project.add_define("WITH_COMPUTE");
    }

    project.add_source("Sources/main.cpp")?;

    if flags.is_enabled("with_worker")? {
        project.add_define("WITH_WORKER");
        project.add_source("Sources/worker.h")?;
        project.add_source("Sources/worker.cpp")?;
    }

    project.add_include_dir("v8/include")?;

    let libdir = libdir_string(target, project.base_dir());
    match target.platform {
        Platform::Windows => {
            project.add_library("Dbghelp"); // Stack walk
            project.add_library("Dwmapi"); // DWMWA_USE_IMMERSIVE_DARK_MODE
            project.add_library("winmm"); // timeGetTime for V8
            project.add_library(format!("{libdir}v8_monolith"));
            if target.mode == BuildMode::Debug {
                project.add_define("_HAS_ITERATOR_DEBUGGING=0");
                project.add_define("_ITERATOR_DEBUG_LEVEL=0");
            }
        }
        Platform::Linux => {
            project.add_library(format!("v8_monolith -L{libdir}"));
            project.add_define("KINC_NO_WAYLAND");
        }
        Platform::MacOs => {
            project.add_library("v8/libraries/macos/release/libv8_monolith.a");
        }
        Platform::Wasm | Platform::Android | Platform::Ios => {}
    }

    log::debug!("Described '{}' for {target}", project.name());
    Ok(graph.add(project))
}

/// The library directory of V8 with forward slashes and a trailing one, as
/// the linkers expect it glued to a file name or to `-L`
fn libdir_string(target: &BuildTarget, root: &Path) -> String {
    let dir = target.library_dir(root, V8);
    format!("{}/", dir.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ProjectError;
    use crate::project_model::flatten;
    use color_eyre::Result;
    use tempfile::tempdir;

    #[test]
    fn test_linux_release_with_audio_and_worker() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        let target = BuildTarget::new(Platform::Linux, BuildMode::Release);
        let mut flags = default_flags();
        flags.override_flag("with_audio", true.into())?;
        flags.override_flag("with_worker", true.into())?;
        flags.override_flag("with_compute", false.into())?;

        let mut graph = ProjectGraph::new();
        let id = describe(&mut graph, &target, &flags, root, root, None)?;
        let flat = flatten(&graph, id)?;

        assert!(flat.defines.contains("WITH_AUDIO"));
        assert!(flat.defines.contains("WITH_WORKER"));
        assert!(flat.defines.contains("KINC_NO_WAYLAND"));
        assert!(!flat.defines.contains("WITH_COMPUTE"));

        let base = utils::fs::normalize(root);
        for source in ["Sources/main.cpp", "Sources/worker.h", "Sources/worker.cpp"] {
            assert!(flat.sources.contains(&base.join(source)), "missing {source}");
        }

        let v8 = flat
            .libraries
            .iter()
            .find(|lib| lib.starts_with("v8_monolith"))
            .expect("a v8_monolith library entry");
        assert!(v8.starts_with("v8_monolith -L"));
        assert!(v8.ends_with("v8/libraries/linux/release/"));
        assert_eq!(flat.cpp_std, Some(CppStandard::CPP17));

        Ok(())
    }

    #[test]
    fn test_windows_debug_libraries() -> Result<()> {
        let temp = tempdir()?;
        let target = BuildTarget::new(Platform::Windows, BuildMode::Debug);
        let flags = default_flags();

        let mut graph = ProjectGraph::new();
        let id = describe(&mut graph, &target, &flags, temp.path(), temp.path(), None)?;
        let project = graph.get(id)?;

        assert_eq!(&project.libraries()[..3], &["Dbghelp", "Dwmapi", "winmm"]);
        assert!(project.libraries()[3].ends_with("v8/libraries/win32/debug/v8_monolith"));
        assert!(project
            .defines()
            .contains(&"_ITERATOR_DEBUG_LEVEL=0".to_string()));

        Ok(())
    }

    #[test]
    fn test_wasm_links_nothing_extra() -> Result<()> {
        let temp = tempdir()?;
        let target = BuildTarget::new(Platform::Wasm, BuildMode::Release);

        let mut graph = ProjectGraph::new();
        let id = describe(
            &mut graph,
            &target,
            &default_flags(),
            temp.path(),
            temp.path(),
            None,
        )?;

        assert!(graph.get(id)?.libraries().is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_flag_aborts_the_description() -> Result<()> {
        let temp = tempdir()?;
        let target = BuildTarget::new(Platform::Linux, BuildMode::Release);
        let flags = FlagSet::new([("name", FlagValue::from("Armory"))]);

        let mut graph = ProjectGraph::new();
        let result = describe(&mut graph, &target, &flags, temp.path(), temp.path(), None);

        assert!(matches!(result, Err(ProjectError::UnknownFlag(_))));
        assert!(graph.is_empty());
        Ok(())
    }

    #[test]
    fn test_independent_invocations_do_not_leak() -> Result<()> {
        let temp = tempdir()?;
        let linux = BuildTarget::new(Platform::Linux, BuildMode::Release);
        let windows = BuildTarget::new(Platform::Windows, BuildMode::Debug);

        let mut linux_graph = ProjectGraph::new();
        let linux_root = describe(
            &mut linux_graph,
            &linux,
            &default_flags(),
            temp.path(),
            temp.path(),
            None,
        )?;
        let mut windows_graph = ProjectGraph::new();
        let windows_root = describe(
            &mut windows_graph,
            &windows,
            &default_flags(),
            temp.path(),
            temp.path(),
            None,
        )?;

        let linux_flat = flatten(&linux_graph, linux_root)?;
        let windows_flat = flatten(&windows_graph, windows_root)?;
        assert!(!linux_flat.libraries.contains("winmm"));
        assert!(!windows_flat.defines.contains("KINC_NO_WAYLAND"));

        Ok(())
    }

    #[test]
    fn test_kinc_is_flattened_first() -> Result<()> {
        let temp = tempdir()?;
        let kinc_dir = temp.path().join("Kinc");
        utils::fs::create_directory(&kinc_dir)?;
        let target = BuildTarget::new(Platform::Linux, BuildMode::Release);

        let mut graph = ProjectGraph::new();
        let mut kinc = ProjectDescriptor::new("Kinc", &kinc_dir)?;
        kinc.add_source("Sources/kinc/system.c")?;
        let kinc = graph.add(kinc);
        let root = describe(
            &mut graph,
            &target,
            &default_flags(),
            temp.path(),
            temp.path(),
            Some(kinc),
        )?;

        let flat = flatten(&graph, root)?;
        assert_eq!(
            flat.sources.first(),
            Some(&utils::fs::normalize(&kinc_dir.join("Sources/kinc/system.c")))
        );
        Ok(())
    }
}
