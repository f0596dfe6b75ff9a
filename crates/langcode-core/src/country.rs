use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LangError, LangResult};
use crate::tables::{CodeTables, CountryRecord};

/// An ISO-3166-1 country, validated against the bundled table.
#[derive(Clone, Copy)]
pub struct Country {
    record: &'static CountryRecord,
}

impl Country {
    /// Accepts the alpha-2 code in any case.
    pub fn new(code: &str) -> LangResult<Self> {
        let alpha2 = code.to_ascii_uppercase();
        CodeTables::bundled()
            .country(&alpha2)
            .map(|record| Self { record })
            .ok_or_else(|| LangError::invalid_country(code))
    }

    pub fn alpha2(&self) -> &'static str {
        &self.record.alpha2
    }

    pub fn name(&self) -> &'static str {
        &self.record.name
    }
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.alpha2() == other.alpha2()
    }
}

impl Eq for Country {}

impl Hash for Country {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.alpha2().hash(state);
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alpha2())
    }
}

impl fmt::Debug for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Country [{}]>", self.alpha2())
    }
}

impl FromStr for Country {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::new(s)
    }
}

impl TryFrom<&str> for Country {
    type Error = LangError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Country::new(value)
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.alpha2())
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Country::new(&code).map_err(serde::de::Error::custom)
    }
}
