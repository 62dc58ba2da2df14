use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use env_logger::{Builder, Target};
use log::LevelFilter;

/// [`config_logger`] The configuration for `env_logger`. `-v` enables the
/// debug records, anything above it is rejected
pub fn config_logger(verbose_level: u8, target: Target) -> Result<()> {
    let mut builder = Builder::from_default_env();

    builder
        .target(target)
        .format_indent(Some(4))
        .format_module_path(false)
        .format_timestamp_millis();

    match verbose_level {
        0 => builder.filter(None, LevelFilter::Info),
        1 => builder.filter(None, LevelFilter::Debug),
        _ => return Err(eyre!("armory-make maximum allowed verbosity level is: '-v'")),
    };

    builder
        .try_init()
        .with_context(|| "armory-make wasn't able to set up the logger")
}
