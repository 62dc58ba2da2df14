use core::fmt;

use serde::{Deserialize, Serialize};

/// The C++ standard level that a project requests from the toolchain.
///
/// Variants are declared in ascending order, so the derived ordering tells
/// which of two levels is the newest one
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum CppStandard {
    #[serde(alias = "c++11", alias = "11")]
    CPP11,
    #[serde(alias = "c++14", alias = "14")]
    CPP14,
    #[serde(alias = "c++17", alias = "17")]
    CPP17,
    #[serde(alias = "c++20", alias = "20")]
    CPP20,
    #[serde(alias = "c++23", alias = "23")]
    CPP23,
}

impl AsRef<str> for CppStandard {
    fn as_ref(&self) -> &'static str {
        match *self {
            CppStandard::CPP11 => "c++11",
            CppStandard::CPP14 => "c++14",
            CppStandard::CPP17 => "c++17",
            CppStandard::CPP20 => "c++20",
            CppStandard::CPP23 => "c++23",
        }
    }
}

impl fmt::Display for CppStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_level_wins() {
        let levels = [CppStandard::CPP14, CppStandard::CPP20, CppStandard::CPP17];
        assert_eq!(levels.iter().max(), Some(&CppStandard::CPP20));
    }

    #[test]
    fn test_parse_spellings() {
        #[derive(Deserialize)]
        struct Holder {
            levels: Vec<CppStandard>,
        }

        let holder: Holder = toml::from_str(r#"levels = ["c++17", "20", "CPP23"]"#).unwrap();
        assert_eq!(
            holder.levels,
            vec![CppStandard::CPP17, CppStandard::CPP20, CppStandard::CPP23]
        );
    }
}
