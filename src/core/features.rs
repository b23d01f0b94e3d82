//! Optional features a plugin can be scaffolded with.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Additional extension descriptors generated next to `synthetic.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtXml {
    XlRestEndpoints,
    XlUiPlugin,
}

impl ExtXml {
    pub const ALL: [ExtXml; 2] = [ExtXml::XlRestEndpoints, ExtXml::XlUiPlugin];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtXml::XlRestEndpoints => "xl-rest-endpoints",
            ExtXml::XlUiPlugin => "xl-ui-plugin",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.xml", self.as_str())
    }
}

/// Test frameworks wired into the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestFramework {
    Karma,
    Unittest,
}

impl TestFramework {
    pub const ALL: [TestFramework; 2] = [TestFramework::Karma, TestFramework::Unittest];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestFramework::Karma => "karma",
            TestFramework::Unittest => "unittest",
        }
    }
}

macro_rules! str_enum_impls {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $ty::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        Error::validation_invalid_argument(
                            $field,
                            format!("Unknown choice '{}'", wanted),
                            Some(wanted.to_string()),
                            Some($ty::ALL.iter().map(|v| v.as_str().to_string()).collect()),
                        )
                    })
            }
        }
    };
}

str_enum_impls!(ExtXml, "extXmls");
str_enum_impls!(TestFramework, "testFrameworks");

/// Parse a list of identifiers into a set, rejecting unknown ones.
pub fn parse_set<T>(values: &[String]) -> crate::Result<BTreeSet<T>>
where
    T: FromStr<Err = Error> + Ord,
{
    values.iter().map(|v| v.parse()).collect()
}

/// Identifiers of a set, in enum order.
pub fn set_names<T: fmt::Display>(set: &BTreeSet<T>) -> Vec<String> {
    set.iter().map(ToString::to_string).collect()
}
