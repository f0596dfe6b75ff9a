use std::collections::{BTreeSet, HashMap};

use crate::error::{LangError, LangResult};

/// A canonical `(alpha3, country, script)` triple as produced by a reverse
/// conversion. Codes are raw; they are validated when a `Language` is built
/// from the triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Triple {
    pub alpha3: String,
    pub country: Option<String>,
    pub script: Option<String>,
}

impl Triple {
    pub fn new(alpha3: impl Into<String>) -> Self {
        Self {
            alpha3: alpha3.into(),
            country: None,
            script: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }
}

/// Maps a canonical triple to a code in some foreign scheme.
pub trait LanguageConverter: Send + Sync {
    /// Fails with [`LangError::ConversionNotFound`] when the scheme has no code
    /// for the triple.
    fn convert(&self, alpha3: &str, country: Option<&str>, script: Option<&str>)
    -> LangResult<String>;

    /// Every foreign code this scheme knows about.
    fn codes(&self) -> &BTreeSet<String>;

    /// Reverse capability, when the scheme has one.
    fn as_reverse(&self) -> Option<&dyn LanguageReverseConverter> {
        None
    }
}

/// A converter that can also map a foreign code back to a canonical triple.
pub trait LanguageReverseConverter: LanguageConverter {
    /// Fails with [`LangError::ReverseConversionNotFound`] for unknown codes.
    fn reverse(&self, code: &str) -> LangResult<Triple>;
}

/// One-to-one mapping between alpha-3 codes and a set of symbols.
///
/// Country and script are ignored when converting, and reverse conversion
/// yields a bare alpha-3 triple. When the mapping is case-insensitive, reverse
/// lookups fold both sides to lower case; the forward direction always returns
/// the symbol as it was given.
#[derive(Debug, Clone)]
pub struct EquivalenceConverter {
    to_symbol: HashMap<String, String>,
    from_symbol: HashMap<String, String>,
    codes: BTreeSet<String>,
    case_sensitive: bool,
}

impl EquivalenceConverter {
    pub fn new<I, A, S>(pairs: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = (A, S)>,
        A: Into<String>,
        S: Into<String>,
    {
        let mut converter = Self {
            to_symbol: HashMap::new(),
            from_symbol: HashMap::new(),
            codes: BTreeSet::new(),
            case_sensitive,
        };
        for (alpha3, symbol) in pairs {
            let alpha3 = alpha3.into();
            let symbol = symbol.into();
            let folded = converter.fold(&symbol);
            converter
                .from_symbol
                .entry(folded)
                .or_insert_with(|| alpha3.clone());
            converter.codes.insert(symbol.clone());
            converter.to_symbol.entry(alpha3).or_insert(symbol);
        }
        converter
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn fold(&self, symbol: &str) -> String {
        if self.case_sensitive {
            symbol.to_string()
        } else {
            symbol.to_lowercase()
        }
    }
}

impl LanguageConverter for EquivalenceConverter {
    fn convert(
        &self,
        alpha3: &str,
        country: Option<&str>,
        script: Option<&str>,
    ) -> LangResult<String> {
        self.to_symbol
            .get(alpha3)
            .cloned()
            .ok_or_else(|| LangError::conversion_not_found(alpha3, country, script))
    }

    fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }

    fn as_reverse(&self) -> Option<&dyn LanguageReverseConverter> {
        Some(self)
    }
}

impl LanguageReverseConverter for EquivalenceConverter {
    fn reverse(&self, code: &str) -> LangResult<Triple> {
        self.from_symbol
            .get(&self.fold(code))
            .map(|alpha3| Triple::new(alpha3.as_str()))
            .ok_or_else(|| LangError::reverse_not_found(code))
    }
}
