use armory_make::{cli::input::CliArgs, utils::logger::config_logger, worker::run_armory_make};
use clap::Parser;
use color_eyre::{eyre::Context, Result};
use env_logger::Target;

/// The entry point for the binary generated
/// for the program
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli_args = CliArgs::parse();
    // Stdout carries the flattened project, so the logs go to stderr
    config_logger(cli_args.verbose, Target::Stderr)?;

    let working_dir =
        std::env::current_dir().with_context(|| "Unable to read the working directory")?;

    log::debug!("Launching a new armory-make program");
    run_armory_make(&cli_args, &working_dir)?;
    log::debug!("Tasks successfully finished");

    Ok(())
}
