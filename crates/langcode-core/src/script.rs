use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LangError, LangResult};
use crate::tables::{CodeTables, ScriptRecord};

/// An ISO-15924 writing system, validated against the bundled table.
#[derive(Clone, Copy)]
pub struct Script {
    record: &'static ScriptRecord,
}

impl Script {
    /// Accepts the four-letter code in any case; it is stored title-cased.
    pub fn new(code: &str) -> LangResult<Self> {
        let normalized = titlecase(code);
        CodeTables::bundled()
            .script(&normalized)
            .map(|record| Self { record })
            .ok_or_else(|| LangError::invalid_script(code))
    }

    pub fn code(&self) -> &'static str {
        &self.record.code
    }

    pub fn name(&self) -> &'static str {
        &self.record.name
    }

    pub fn numeric(&self) -> u16 {
        self.record.numeric
    }
}

impl PartialEq for Script {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Script {}

impl Hash for Script {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Script [{}]>", self.code())
    }
}

impl FromStr for Script {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Script::new(s)
    }
}

impl TryFrom<&str> for Script {
    type Error = LangError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Script::new(value)
    }
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Script::new(&code).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn titlecase(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut output = String::with_capacity(value.len());
    output.push(first.to_ascii_uppercase());
    for ch in chars {
        output.push(ch.to_ascii_lowercase());
    }
    output
}
