//! IETF-style `language-COUNTRY-Script` tags.
//!
//! The language subtag is written as the alpha-2 code when the `alpha2` scheme
//! has one and as the alpha-3 code otherwise. Country precedes script. Parsing
//! accepts exactly what serialization produces plus case variations:
//!
//! * a two-letter first subtag is resolved through the `alpha2` scheme, any
//!   other first subtag must be an ISO-639-3 code;
//! * a two-letter later subtag is a country, anything else is a script;
//! * the script, when present, is the last subtag.
//!
//! Repeated country subtags are accepted and the last one wins.

use tracing::warn;

use crate::country::Country;
use crate::error::{LangError, LangResult};
use crate::language::Language;
use crate::registry::ConverterRegistry;
use crate::script::Script;

const SHORT_FORM_SCHEME: &str = "alpha2";

impl ConverterRegistry {
    /// The tag for `language`, as used by its `Display` implementation.
    pub fn ietf(&self, language: &Language) -> String {
        let mut tag = match self.convert(language, SHORT_FORM_SCHEME) {
            Ok(alpha2) => alpha2,
            Err(LangError::ConversionNotFound { .. }) => language.alpha3().to_string(),
            Err(err) => {
                warn!(
                    alpha3 = language.alpha3(),
                    error = %err,
                    "short language form unavailable"
                );
                language.alpha3().to_string()
            }
        };
        if let Some(country) = language.country() {
            tag.push('-');
            tag.push_str(country.alpha2());
        }
        if let Some(script) = language.script() {
            tag.push('-');
            tag.push_str(script.code());
        }
        tag
    }

    /// Parses a tag produced by [`ietf`](Self::ietf), ignoring case.
    pub fn parse_ietf(&self, tag: &str) -> LangResult<Language> {
        let malformed = |remainder: &[&str]| LangError::MalformedTag {
            tag: tag.to_string(),
            remainder: remainder.iter().map(|part| part.to_string()).collect(),
        };

        let subtags: Vec<&str> = tag.split('-').collect();
        if subtags.iter().any(|part| part.is_empty()) {
            return Err(malformed(&subtags));
        }
        let Some((first, rest)) = subtags.split_first() else {
            return Err(malformed(&subtags));
        };

        let mut language = self.parse_language_subtag(first)?;
        for (idx, part) in rest.iter().enumerate() {
            if part.chars().count() == 2 {
                language.set_country(Some(Country::new(part)?));
                continue;
            }
            language.set_script(Some(Script::new(part)?));
            let remainder = &rest[idx + 1..];
            if !remainder.is_empty() {
                return Err(malformed(remainder));
            }
            break;
        }
        Ok(language)
    }

    fn parse_language_subtag(&self, subtag: &str) -> LangResult<Language> {
        let code = subtag.to_lowercase();
        if code.chars().count() != 2 {
            return Language::new(&code);
        }
        match self.from_code(&code, SHORT_FORM_SCHEME) {
            Err(LangError::ReverseConversionNotFound { .. }) => {
                Err(LangError::invalid_language(subtag))
            }
            other => other,
        }
    }
}
