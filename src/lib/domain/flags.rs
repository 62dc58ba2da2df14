//! Named build options, registered once with their defaults and queried by name
//! from every project description

use core::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::{ProjectError, ProjectResult};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Str(String),
}

impl FlagValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Bool(b) => Some(*b),
            FlagValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Bool(_) => None,
            FlagValue::Str(s) => Some(s),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            FlagValue::Bool(_) => "boolean",
            FlagValue::Str(_) => "string",
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Str(value.to_owned())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Str(value)
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::Str(s) => write!(f, "{s}"),
        }
    }
}

/// The build options of one invocation.
///
/// Every name that may ever be queried must be present in the defaults the
/// set is created with. Overrides are only allowed on registered names, and
/// keep the kind of the default value. Descriptor builders receive a shared
/// reference, so the set can't change while descriptors are being assembled.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize)]
pub struct FlagSet {
    flags: IndexMap<String, FlagValue>,
}

impl FlagSet {
    pub fn new<I, K>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, FlagValue)>,
        K: Into<String>,
    {
        Self {
            flags: defaults
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> ProjectResult<&FlagValue> {
        self.flags
            .get(name)
            .ok_or_else(|| ProjectError::UnknownFlag(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Value of a boolean flag
    pub fn is_enabled(&self, name: &str) -> ProjectResult<bool> {
        self.get(name)?
            .as_bool()
            .ok_or_else(|| ProjectError::flag_kind(name, "boolean"))
    }

    /// Value of a string flag
    pub fn string(&self, name: &str) -> ProjectResult<&str> {
        self.get(name)?
            .as_str()
            .ok_or_else(|| ProjectError::flag_kind(name, "string"))
    }

    pub fn override_flag(&mut self, name: &str, value: FlagValue) -> ProjectResult<()> {
        let current = self
            .flags
            .get_mut(name)
            .ok_or_else(|| ProjectError::UnknownFlag(name.to_owned()))?;

        if std::mem::discriminant(current) != std::mem::discriminant(&value) {
            return Err(ProjectError::flag_kind(name, current.kind()));
        }

        log::debug!("Overriding flag '{name}': {current} -> {value}");
        *current = value;
        Ok(())
    }

    /// Overrides a flag from its textual form (ie: a command line value),
    /// parsed according to the kind of the registered default
    pub fn override_from_str(&mut self, name: &str, raw: &str) -> ProjectResult<()> {
        let value = match self.get(name)? {
            FlagValue::Bool(_) => FlagValue::Bool(
                parse_bool(raw).ok_or_else(|| ProjectError::flag_kind(name, "boolean"))?,
            ),
            FlagValue::Str(_) => FlagValue::Str(raw.to_owned()),
        };
        self.override_flag(name, value)
    }

    /// Registers the flags of `other` whose names aren't already present.
    /// Already registered names keep their current value
    pub fn merge_defaults<I, K>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, FlagValue)>,
        K: Into<String>,
    {
        for (name, value) in other {
            self.flags.entry(name.into()).or_insert(value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.flags.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio_flags() -> FlagSet {
        FlagSet::new([
            ("package", FlagValue::from("org.armory3d")),
            ("with_audio", FlagValue::from(true)),
            ("with_worker", FlagValue::from(false)),
        ])
    }

    #[test]
    fn test_unregistered_flag_is_always_an_error() {
        let small = FlagSet::new([("with_audio", FlagValue::from(true))]);
        let big = FlagSet::new((0..64).map(|i| (format!("flag_{i}"), FlagValue::from(true))));

        for flags in [small, big, FlagSet::default()] {
            assert!(matches!(
                flags.get("with_vr"),
                Err(ProjectError::UnknownFlag(name)) if name == "with_vr"
            ));
        }
    }

    #[test]
    fn test_typed_queries() {
        let flags = audio_flags();

        assert!(flags.is_enabled("with_audio").unwrap());
        assert!(!flags.is_enabled("with_worker").unwrap());
        assert_eq!(flags.string("package").unwrap(), "org.armory3d");
        assert!(matches!(
            flags.is_enabled("package"),
            Err(ProjectError::FlagKind { .. })
        ));
    }

    #[test]
    fn test_overrides_keep_the_registered_kind() {
        let mut flags = audio_flags();

        flags.override_from_str("with_worker", "on").unwrap();
        flags.override_from_str("package", "org.example").unwrap();
        assert!(flags.is_enabled("with_worker").unwrap());
        assert_eq!(flags.string("package").unwrap(), "org.example");

        assert!(flags.override_from_str("with_audio", "maybe").is_err());
        assert!(flags
            .override_flag("with_audio", FlagValue::from("true"))
            .is_err());
        assert!(matches!(
            flags.override_from_str("with_vr", "true"),
            Err(ProjectError::UnknownFlag(_))
        ));
    }

    #[test]
    fn test_merge_defaults_does_not_replace_registered_values() {
        let mut flags = audio_flags();
        flags.merge_defaults([
            ("with_audio", FlagValue::from(false)),
            ("with_compute", FlagValue::from(true)),
        ]);

        assert!(flags.is_enabled("with_audio").unwrap());
        assert!(flags.is_enabled("with_compute").unwrap());
        assert_eq!(flags.len(), 4);
    }
}
