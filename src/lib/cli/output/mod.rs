//! Hands the results of an invocation to the outside world

use std::io::{self, Write};
use std::path::Path;

use color_eyre::{eyre::Context, Result};

use crate::{
    domain::flags::FlagSet,
    project_model::FlatProjectDescriptor,
    utils::{self, constants::error_messages},
};

/// Serializes the flattened project as pretty printed JSON, to `output` when
/// given, or to the standard output otherwise
pub fn write_flat_descriptor(flat: &FlatProjectDescriptor, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(flat)
        .with_context(|| error_messages::FAILURE_WRITING_OUTPUT)?;

    match output {
        Some(path) => {
            utils::fs::create_file(path, json.as_bytes())
                .with_context(|| error_messages::FAILURE_WRITING_OUTPUT)?;
            log::info!("Flattened project '{}' written to {path:?}", flat.name);
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").with_context(|| error_messages::FAILURE_WRITING_OUTPUT)
        }
    }
}

/// Prints the flags of the invocation on the standard output
pub fn print_flags(flags: &FlagSet) -> Result<()> {
    write_flags(flags, &mut io::stdout().lock())
}

/// Writes one `name = value` line per flag, in declaration order
pub fn write_flags<W: Write>(flags: &FlagSet, out: &mut W) -> Result<()> {
    for (name, value) in flags.iter() {
        writeln!(out, "{name} = {value}").with_context(|| error_messages::FAILURE_WRITING_OUTPUT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flags::FlagValue;

    #[test]
    fn test_flags_are_written_in_declaration_order() -> Result<()> {
        let mut flags = FlagSet::new([
            ("package", FlagValue::from("org.armory3d")),
            ("with_audio", FlagValue::from(true)),
            ("with_compute", FlagValue::from(false)),
        ]);
        flags.override_from_str("with_compute", "yes")?;

        let mut out = Vec::new();
        write_flags(&flags, &mut out)?;

        assert_eq!(
            String::from_utf8(out)?,
            "package = org.armory3d\nwith_audio = true\nwith_compute = true\n"
        );
        Ok(())
    }
}
