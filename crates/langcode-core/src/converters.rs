//! Converters shipped with the crate and the discovery source that advertises
//! them.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::converter::{EquivalenceConverter, LanguageConverter, LanguageReverseConverter, Triple};
use crate::error::{LangError, LangResult};
use crate::registry::{ConverterDiscovery, ConverterFactory};
use crate::tables::{CodeTables, LanguageRecord};

const BUILTIN: &[(&str, ConverterFactory)] = &[
    ("alpha2", alpha2),
    ("alpha3b", alpha3b),
    ("alpha3t", alpha3t),
    ("name", name),
    ("scope", scope),
    ("type", language_type),
    ("opensubtitles", opensubtitles),
];

/// Advertises the converters bundled with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDiscovery;

impl ConverterDiscovery for BuiltinDiscovery {
    fn entries(&self) -> Vec<(String, ConverterFactory)> {
        BUILTIN
            .iter()
            .map(|(name, factory)| (name.to_string(), *factory))
            .collect()
    }

    fn find(&self, name: &str) -> Option<ConverterFactory> {
        BUILTIN
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, factory)| *factory)
    }
}

pub fn alpha2() -> Arc<dyn LanguageConverter> {
    Arc::new(equivalence(|record| record.alpha2.as_deref(), false))
}

pub fn alpha3b() -> Arc<dyn LanguageConverter> {
    Arc::new(equivalence(|record| record.alpha3b.as_deref(), false))
}

pub fn alpha3t() -> Arc<dyn LanguageConverter> {
    Arc::new(equivalence(|record| record.alpha3t.as_deref(), false))
}

pub fn name() -> Arc<dyn LanguageConverter> {
    Arc::new(equivalence(|record| Some(record.name.as_str()), false))
}

pub fn scope() -> Arc<dyn LanguageConverter> {
    Arc::new(CategoryConverter::new(
        scope_column,
        &[("I", "individual"), ("M", "macrolanguage"), ("S", "special")],
    ))
}

pub fn language_type() -> Arc<dyn LanguageConverter> {
    Arc::new(CategoryConverter::new(
        language_type_column,
        &[
            ("A", "ancient"),
            ("C", "constructed"),
            ("E", "extinct"),
            ("H", "historical"),
            ("L", "living"),
            ("S", "special"),
        ],
    ))
}

pub fn opensubtitles() -> Arc<dyn LanguageConverter> {
    Arc::new(OpenSubtitlesConverter::new())
}

fn equivalence(
    column: impl Fn(&LanguageRecord) -> Option<&str>,
    case_sensitive: bool,
) -> EquivalenceConverter {
    let pairs = CodeTables::bundled()
        .languages()
        .iter()
        .filter_map(|record| column(record).map(|symbol| (record.alpha3.as_str(), symbol)));
    EquivalenceConverter::new(pairs, case_sensitive)
}

fn scope_column(record: &LanguageRecord) -> &str {
    &record.scope
}

fn language_type_column(record: &LanguageRecord) -> &str {
    &record.language_type
}

/// Forward-only converter from a single-letter table column to its full name.
/// Its codes are the letters that occur in the column.
struct CategoryConverter {
    column: fn(&LanguageRecord) -> &str,
    names: &'static [(&'static str, &'static str)],
    codes: BTreeSet<String>,
}

impl CategoryConverter {
    fn new(
        column: fn(&LanguageRecord) -> &str,
        names: &'static [(&'static str, &'static str)],
    ) -> Self {
        let codes = CodeTables::bundled()
            .languages()
            .iter()
            .map(|record| column(record).to_string())
            .collect();
        Self {
            column,
            names,
            codes,
        }
    }
}

impl LanguageConverter for CategoryConverter {
    fn convert(
        &self,
        alpha3: &str,
        country: Option<&str>,
        script: Option<&str>,
    ) -> LangResult<String> {
        let letter = CodeTables::bundled()
            .language(alpha3)
            .map(|record| (self.column)(record));
        letter
            .and_then(|letter| {
                self.names
                    .iter()
                    .find(|(code, _)| *code == letter)
                    .map(|(_, name)| name.to_string())
            })
            .ok_or_else(|| LangError::conversion_not_found(alpha3, country, script))
    }

    fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }
}

/// OpenSubtitles ids that differ from the ISO-639-2/B code, keyed by
/// `(alpha3b, country)`.
const TO_OPENSUBTITLES: &[(&str, Option<&str>, &str)] = &[
    ("por", Some("BR"), "pob"),
    ("gre", None, "ell"),
    ("srp", None, "scc"),
    ("srp", Some("ME"), "mne"),
];

/// Provider ids checked before falling back to alpha3b and alpha2. `mne` is
/// accepted as Serbian from Montenegro.
const FROM_OPENSUBTITLES: &[(&str, &str, Option<&str>)] = &[
    ("pob", "por", Some("BR")),
    ("pb", "por", Some("BR")),
    ("ell", "ell", None),
    ("scc", "srp", None),
    ("mne", "srp", Some("ME")),
];

/// OpenSubtitles language ids: ISO-639-2/B codes with a handful of provider
/// specific overrides, plus two-letter aliases on the way in.
struct OpenSubtitlesConverter {
    alpha3b: EquivalenceConverter,
    alpha2: EquivalenceConverter,
    codes: BTreeSet<String>,
}

impl OpenSubtitlesConverter {
    fn new() -> Self {
        let alpha3b = equivalence(|record| record.alpha3b.as_deref(), false);
        let alpha2 = equivalence(|record| record.alpha2.as_deref(), false);

        let mut codes: BTreeSet<String> = alpha2.codes().union(alpha3b.codes()).cloned().collect();
        codes.extend(
            FROM_OPENSUBTITLES
                .iter()
                .map(|(provider, _, _)| provider.to_string()),
        );

        Self {
            alpha3b,
            alpha2,
            codes,
        }
    }
}

impl LanguageConverter for OpenSubtitlesConverter {
    fn convert(
        &self,
        alpha3: &str,
        country: Option<&str>,
        script: Option<&str>,
    ) -> LangResult<String> {
        let alpha3b = self.alpha3b.convert(alpha3, country, script)?;
        let provider = TO_OPENSUBTITLES
            .iter()
            .find(|(code, provider_country, _)| *code == alpha3b && *provider_country == country)
            .map(|(_, _, provider)| provider.to_string());
        Ok(provider.unwrap_or(alpha3b))
    }

    fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }

    fn as_reverse(&self) -> Option<&dyn LanguageReverseConverter> {
        Some(self)
    }
}

impl LanguageReverseConverter for OpenSubtitlesConverter {
    fn reverse(&self, code: &str) -> LangResult<Triple> {
        let provider = FROM_OPENSUBTITLES
            .iter()
            .find(|(provider, _, _)| provider.eq_ignore_ascii_case(code));
        if let Some((_, alpha3, country)) = provider {
            let triple = Triple::new(*alpha3);
            return Ok(match country {
                Some(country) => triple.with_country(*country),
                None => triple,
            });
        }
        self.alpha3b
            .reverse(code)
            .or_else(|_| self.alpha2.reverse(code))
            .map_err(|_| LangError::reverse_not_found(code))
    }
}
