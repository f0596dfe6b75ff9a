//! Process-lifetime ISO code tables.
//!
//! The ISO-639-3, ISO-3166-1 and ISO-15924 tables ship with the crate as
//! tab-separated files with a header row. They are parsed once, on first
//! access, and are read-only afterwards.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use tracing::debug;

use crate::error::TableError;

/// Alpha-3 code of the undetermined language.
pub const LANGUAGE_UNDETERMINED: &str = "und";

const ISO_639_3: &str = include_str!("../data/iso-639-3.tab");
const ISO_3166_1: &str = include_str!("../data/iso-3166-1.tab");
const ISO_15924: &str = include_str!("../data/iso-15924.tab");

static BUNDLED: LazyLock<CodeTables> = LazyLock::new(|| {
    match CodeTables::from_sources(ISO_639_3, ISO_3166_1, ISO_15924) {
        Ok(tables) => tables,
        Err(err) => panic!("bundled code table is malformed: {err}"),
    }
});

/// One row of the ISO-639-3 table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageRecord {
    pub alpha3: String,
    pub alpha3b: Option<String>,
    pub alpha3t: Option<String>,
    pub alpha2: Option<String>,
    /// `I`ndividual, `M`acrolanguage or `S`pecial.
    pub scope: String,
    /// `A`ncient, `C`onstructed, `E`xtinct, `H`istorical, `L`iving or `S`pecial.
    pub language_type: String,
    pub name: String,
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryRecord {
    pub alpha2: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptRecord {
    pub code: String,
    pub numeric: u16,
    pub name: String,
}

#[derive(Debug)]
pub struct CodeTables {
    languages: Vec<LanguageRecord>,
    language_index: HashMap<String, usize>,
    countries: BTreeMap<String, CountryRecord>,
    scripts: BTreeMap<String, ScriptRecord>,
}

impl CodeTables {
    /// The tables bundled with the crate.
    pub fn bundled() -> &'static CodeTables {
        &BUNDLED
    }

    pub fn from_sources(
        languages: &str,
        countries: &str,
        scripts: &str,
    ) -> Result<Self, TableError> {
        let languages = parse_languages(languages)?;
        let mut language_index = HashMap::with_capacity(languages.len());
        for (idx, record) in languages.iter().enumerate() {
            if language_index.insert(record.alpha3.clone(), idx).is_some() {
                return Err(TableError::DuplicateKey {
                    table: "iso-639-3",
                    line: idx + 2,
                    key: record.alpha3.clone(),
                });
            }
        }

        let countries = index_by(parse_countries(countries)?, "iso-3166-1", |record| {
            record.alpha2.clone()
        })?;
        let scripts = index_by(parse_scripts(scripts)?, "iso-15924", |record| {
            record.code.clone()
        })?;

        debug!(
            languages = languages.len(),
            countries = countries.len(),
            scripts = scripts.len(),
            "loaded code tables"
        );

        Ok(Self {
            languages,
            language_index,
            countries,
            scripts,
        })
    }

    /// Every language record, in table order.
    pub fn languages(&self) -> &[LanguageRecord] {
        &self.languages
    }

    pub fn language(&self, alpha3: &str) -> Option<&LanguageRecord> {
        self.language_index
            .get(alpha3)
            .map(|idx| &self.languages[*idx])
    }

    pub fn is_language(&self, code: &str) -> bool {
        self.language_index.contains_key(code)
    }

    pub fn countries(&self) -> impl Iterator<Item = &CountryRecord> {
        self.countries.values()
    }

    pub fn country(&self, alpha2: &str) -> Option<&CountryRecord> {
        self.countries.get(alpha2)
    }

    pub fn scripts(&self) -> impl Iterator<Item = &ScriptRecord> {
        self.scripts.values()
    }

    pub fn script(&self, code: &str) -> Option<&ScriptRecord> {
        self.scripts.get(code)
    }
}

pub fn parse_languages(source: &str) -> Result<Vec<LanguageRecord>, TableError> {
    let mut records = Vec::new();
    for (line, fields) in rows("iso-639-3", source, 8)? {
        records.push(LanguageRecord {
            alpha3: key("iso-639-3", line, fields[0])?,
            alpha3b: optional(fields[1]),
            alpha3t: optional(fields[2]),
            alpha2: optional(fields[3]),
            scope: fields[4].to_string(),
            language_type: fields[5].to_string(),
            name: fields[6].to_string(),
            comment: optional(fields[7]),
        });
    }
    Ok(records)
}

pub fn parse_countries(source: &str) -> Result<Vec<CountryRecord>, TableError> {
    let mut records = Vec::new();
    for (line, fields) in rows("iso-3166-1", source, 2)? {
        records.push(CountryRecord {
            alpha2: key("iso-3166-1", line, fields[0])?,
            name: fields[1].to_string(),
        });
    }
    Ok(records)
}

pub fn parse_scripts(source: &str) -> Result<Vec<ScriptRecord>, TableError> {
    let mut records = Vec::new();
    for (line, fields) in rows("iso-15924", source, 3)? {
        let code = key("iso-15924", line, fields[0])?;
        let numeric = fields[1]
            .trim()
            .parse()
            .map_err(|_| TableError::InvalidNumber {
                table: "iso-15924",
                line,
                value: fields[1].to_string(),
            })?;
        records.push(ScriptRecord {
            code,
            numeric,
            name: fields[2].to_string(),
        });
    }
    Ok(records)
}

/// Splits a tab-separated table into `(line number, fields)` rows, skipping the
/// header and blank lines.
fn rows<'a>(
    table: &'static str,
    source: &'a str,
    columns: usize,
) -> Result<Vec<(usize, Vec<&'a str>)>, TableError> {
    let mut lines = source.lines();
    if lines.next().is_none() {
        return Err(TableError::MissingHeader { table });
    }

    let mut out = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_number = idx + 2;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != columns {
            return Err(TableError::ColumnCount {
                table,
                line: line_number,
                expected: columns,
                found: fields.len(),
            });
        }
        out.push((line_number, fields));
    }
    Ok(out)
}

fn key(table: &'static str, line: usize, value: &str) -> Result<String, TableError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TableError::EmptyKey { table, line });
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn index_by<T>(
    records: Vec<T>,
    table: &'static str,
    key_of: impl Fn(&T) -> String,
) -> Result<BTreeMap<String, T>, TableError> {
    let mut map = BTreeMap::new();
    for (idx, record) in records.into_iter().enumerate() {
        let key = key_of(&record);
        if map.contains_key(&key) {
            return Err(TableError::DuplicateKey {
                table,
                line: idx + 2,
                key,
            });
        }
        map.insert(key, record);
    }
    Ok(map)
}
