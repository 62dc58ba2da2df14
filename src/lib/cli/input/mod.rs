use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::target::{self, BuildMode, BuildTarget};

/// [`CliArgs`] is the command line arguments parser
///
/// #Test
/// ```rust
/// use clap::Parser;
/// use armory_make::cli::input::{CliArgs, Command, Platform};
///
/// let parser = CliArgs::parse_from(["", "-v", "flags"]);
/// assert_eq!(1, parser.verbose);
/// assert_eq!(parser.command(), Command::Flags);
///
/// let parser = CliArgs::parse_from([
///     "", "--platform", "linux", "--debug", "--flag", "with_audio=false", "flatten",
/// ]);
/// assert_eq!(parser.platform, Some(Platform::Linux));
/// assert!(parser.debug);
/// assert_eq!(parser.flags, vec![("with_audio".to_string(), "false".to_string())]);
/// assert_eq!(parser.command(), Command::Flatten { output: None });
///
/// // No command at all means flattening to the standard output
/// let parser = CliArgs::parse_from([""]);
/// assert_eq!(parser.command(), Command::Flatten { output: None });
/// ```
#[derive(Parser, Debug)]
#[command(name = "armory-make")]
#[command(author = "Armory3D")]
#[command(version = "0.3.0")]
#[command(
    about = "Describes the native builds of the Armory3D runtime",
    long_about = "Evaluates the project files of the Armory3D runtime for a platform and a build mode, \
    and flattens them into a single description for the native toolchains"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Maximum allowed verbosity level is: '-v'")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        help = "Directory holding the root project file. Defaults to the working directory"
    )]
    pub root: Option<String>,

    #[arg(short, long, value_enum, help = "Target platform. Defaults to the host one")]
    pub platform: Option<Platform>,

    #[arg(long, help = "Describe a debug build instead of a release one")]
    pub debug: bool,

    #[arg(
        long = "flag",
        value_name = "NAME=VALUE",
        value_parser = parse_flag_override,
        help = "Overrides a flag declared on the project files. Can be repeated"
    )]
    pub flags: Vec<(String, String)>,

    #[arg(long, help = "Reject any path that resolves outside of the project root")]
    pub sandbox: bool,
}

impl CliArgs {
    /// The command to run, [`Command::Flatten`] when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    pub fn build_target(&self) -> BuildTarget {
        let platform = self
            .platform
            .map(target::Platform::from)
            .unwrap_or_else(target::Platform::host);
        let mode = if self.debug {
            BuildMode::Debug
        } else {
            BuildMode::Release
        };
        BuildTarget::new(platform, mode)
    }
}

/// [`Command`] -  The core enum commands
#[derive(Subcommand, Debug, PartialEq, Eq, Clone)]
pub enum Command {
    /// Flattens the project graph and writes it as JSON
    Flatten {
        #[arg(short, long, help = "Write to this file instead of the standard output")]
        output: Option<PathBuf>,
    },
    /// Prints the flags of the invocation, once the overrides are applied
    Flags,
}

impl Default for Command {
    fn default() -> Self {
        Command::Flatten { output: None }
    }
}

/// [`Platform`] The platforms available as a command line argument
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Platform {
    #[value(alias = "win32")]
    Windows,
    Linux,
    #[value(alias = "osx")]
    Macos,
    Wasm,
    Android,
    Ios,
}

impl From<Platform> for target::Platform {
    fn from(value: Platform) -> Self {
        match value {
            Platform::Windows => target::Platform::Windows,
            Platform::Linux => target::Platform::Linux,
            Platform::Macos => target::Platform::MacOs,
            Platform::Wasm => target::Platform::Wasm,
            Platform::Android => target::Platform::Android,
            Platform::Ios => target::Platform::Ios,
        }
    }
}

fn parse_flag_override(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.trim().to_owned()))
        }
        _ => Err(format!("expected NAME=VALUE, found '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_target_from_args() {
        let args = CliArgs::parse_from(["", "--platform", "win32", "--debug", "flatten"]);
        assert_eq!(
            args.build_target(),
            BuildTarget::new(target::Platform::Windows, BuildMode::Debug)
        );

        let args = CliArgs::parse_from(["", "flags"]);
        assert_eq!(
            args.build_target(),
            BuildTarget::new(target::Platform::host(), BuildMode::Release)
        );
    }

    #[test]
    fn test_command_defaults_to_flatten() {
        let args = CliArgs::parse_from(["", "--platform", "linux"]);
        assert_eq!(args.command, None);
        assert_eq!(args.command(), Command::Flatten { output: None });

        let args = CliArgs::parse_from(["", "flatten", "-o", "build/armory.json"]);
        assert_eq!(
            args.command(),
            Command::Flatten {
                output: Some(PathBuf::from("build/armory.json"))
            }
        );
    }

    #[test]
    fn test_malformed_flag_override() {
        assert!(CliArgs::try_parse_from(["", "--flag", "with_audio", "flatten"]).is_err());
        assert!(CliArgs::try_parse_from(["", "--flag", "=true", "flatten"]).is_err());
    }
}
