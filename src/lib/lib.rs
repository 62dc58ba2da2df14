pub mod cli;
pub mod config_file;
pub mod domain;
pub mod presets;
pub mod project_model;
pub mod utils;

/// The entry point for the execution of the program.
///
/// This module existence is motivated to let us run
/// integration tests for the whole operations of the program
/// without having to do fancy work about checking the
/// data sent to stdout/stderr
pub mod worker {
    use std::path::{Path, PathBuf};
    use std::time::Instant;

    use color_eyre::{eyre::Context, Result};

    use crate::{
        cli::{
            input::{CliArgs, Command},
            output,
        },
        domain::flags::FlagSet,
        project_model,
        utils::{self, constants::error_messages, fs::PathResolver, reader},
    };

    /// The main work of the project. Runs the tasks
    /// inputted in the CLI, with `working_dir` standing for the
    /// directory where the program was invoked
    pub fn run_armory_make(cli_args: &CliArgs, working_dir: &Path) -> Result<()> {
        let abs_project_root = determine_absolute_path_of_the_project_root(cli_args, working_dir)?;
        let target = cli_args.build_target();
        log::info!("Describing {abs_project_root:?} for {target}");

        let tree = reader::load_config_tree(&abs_project_root)?;

        // Every flag is settled here, before any descriptor reads them
        let flags: FlagSet = reader::assemble_flags(&tree, &cli_args.flags)
            .with_context(|| error_messages::FAILURE_ASSEMBLING_FLAGS)?;

        let command = cli_args.command();
        if command == Command::Flags {
            return output::print_flags(&flags);
        }

        let resolver = if cli_args.sandbox {
            PathResolver::sandboxed(&abs_project_root)
        } else {
            PathResolver::new()
        };

        let flatten_ts = Instant::now();
        let (graph, root) =
            reader::build_graph(&tree, &target, &flags, working_dir, &resolver)?;
        let flat = project_model::flatten(&graph, root)
            .with_context(|| error_messages::FAILURE_FLATTENING)?;
        log::debug!(
            "Building and flattening the project graph took {:?} ms",
            flatten_ts.elapsed().as_millis()
        );

        match command {
            Command::Flatten {
                output: destination,
            } => {
                let destination = destination
                    .as_deref()
                    .map(|out| absolute_from(working_dir, out));
                output::write_flat_descriptor(&flat, destination.as_deref())
            }
            Command::Flags => Ok(()),
        }
    }

    /// Resolves the full path of the location of the project's root on the fs. If the `--root`
    /// [`CliArgs`] arg is present, it will be used as the project root path, otherwise, we will
    /// assume that the project root is exactly in the same directory from where the
    /// binary was invoked by the user
    fn determine_absolute_path_of_the_project_root(
        cli_args: &CliArgs,
        working_dir: &Path,
    ) -> Result<PathBuf> {
        let project_root = cli_args
            .root
            .as_deref()
            .map(Path::new)
            .unwrap_or(Path::new("."));

        utils::fs::get_project_root_absolute_path(working_dir, project_root)
            .with_context(|| error_messages::FAILURE_GATHERING_PROJECT_ROOT_ABS_PATH)
    }

    fn absolute_from(working_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            working_dir.join(path)
        }
    }

    #[cfg(test)]
    mod tests {
        use std::path::Path;

        use clap::Parser;
        use color_eyre::Result;
        use tempfile::tempdir;

        use crate::cli::input::CliArgs;
        use crate::domain::error::ProjectError;
        use crate::utils::{self, constants::PROJECT_FILE_NAME};

        #[test]
        fn test_relative_root_is_taken_from_the_working_dir() -> Result<()> {
            let temp = tempdir()?;
            utils::fs::create_directory(&temp.path().join("armorcore"))?;

            let cli_args = CliArgs::parse_from(["", "--root", "armorcore", "flags"]);
            let root = super::determine_absolute_path_of_the_project_root(&cli_args, temp.path())?;

            assert_eq!(root, utils::fs::get_absolute_path(temp.path().join("armorcore"))?);
            Ok(())
        }

        #[test]
        fn test_sandbox_rejects_escaping_entries() -> Result<()> {
            let temp = tempdir()?;
            let project_dir = temp.path().join("armorcore");
            utils::fs::create_file(
                &project_dir.join(PROJECT_FILE_NAME),
                br#"
                [project]
                name = "Armory"

                [contents]
                include_dirs = ["../Kinc/Sources"]
                "#,
            )?;

            let sandboxed = CliArgs::parse_from([
                "",
                "--root",
                "armorcore",
                "--sandbox",
                "flatten",
                "--output",
                "out.json",
            ]);
            let err = super::run_armory_make(&sandboxed, temp.path()).unwrap_err();
            assert!(err
                .chain()
                .any(|e| matches!(e.downcast_ref::<ProjectError>(), Some(ProjectError::Path(_)))));

            let open = CliArgs::parse_from([
                "",
                "--root",
                "armorcore",
                "flatten",
                "--output",
                "out.json",
            ]);
            super::run_armory_make(&open, temp.path())?;
            assert!(Path::new(&temp.path().join("out.json")).exists());

            Ok(())
        }
    }
}
