#![forbid(unsafe_code)]

//! Language, country and script identities with pluggable code schemes.
//!
//! [`Language`] bundles an ISO-639-3 language with an optional ISO-3166
//! [`Country`] and ISO-15924 [`Script`]. Codes in other schemes are reached
//! through named converters held by a [`ConverterRegistry`]; the process-wide
//! registry returned by [`converters`] discovers the bundled schemes on first
//! use and accepts new ones at runtime.

mod converter;
mod converters;
mod country;
mod error;
mod ietf;
mod language;
mod registry;
mod script;
mod tables;

pub use converter::{EquivalenceConverter, LanguageConverter, LanguageReverseConverter, Triple};
pub use converters::{
    BuiltinDiscovery, alpha2, alpha3b, alpha3t, language_type, name, opensubtitles, scope,
};
pub use country::Country;
pub use error::{CodeKind, LangError, LangResult, TableError};
pub use language::Language;
pub use registry::{
    ConverterDiscovery, ConverterFactory, ConverterRegistry, NoDiscovery, StaticDiscovery,
    converters,
};
pub use script::Script;
pub use tables::{
    CodeTables, CountryRecord, LANGUAGE_UNDETERMINED, LanguageRecord, ScriptRecord,
    parse_countries, parse_languages, parse_scripts,
};
