use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::converter::Triple;
use crate::country::Country;
use crate::error::{LangError, LangResult};
use crate::registry::converters;
use crate::script::Script;
use crate::tables::{CodeTables, LANGUAGE_UNDETERMINED, LanguageRecord};

/// A human language: an ISO-639-3 code, optionally narrowed to a country and
/// a script.
///
/// Two languages are equal when all three parts are equal. Hashing goes
/// through the IETF form returned by `to_string`, so a language hashes like
/// its tag: `Language::new("por")?.with_country("BR")?` hashes like `"pt-BR"`.
///
/// Conversions to and from other code schemes go through the process-wide
/// [`ConverterRegistry`](crate::ConverterRegistry):
///
/// ```
/// use langcode_core::Language;
///
/// let english = Language::new("eng").unwrap();
/// assert_eq!(english.convert("alpha2").unwrap(), "en");
/// assert_eq!(Language::from_code("fre", "alpha3b").unwrap().alpha3(), "fra");
/// ```
#[derive(Clone, Copy)]
pub struct Language {
    record: &'static LanguageRecord,
    country: Option<Country>,
    script: Option<Script>,
}

impl Language {
    pub fn new(code: &str) -> LangResult<Self> {
        let record = CodeTables::bundled()
            .language(code)
            .ok_or_else(|| LangError::invalid_language(code))?;
        Ok(Self {
            record,
            country: None,
            script: None,
        })
    }

    /// Like [`new`](Self::new), but substitutes `fallback` when `code` is not a
    /// known language. The fallback itself must be valid.
    pub fn with_fallback(code: &str, fallback: &str) -> LangResult<Self> {
        if CodeTables::bundled().is_language(code) {
            Self::new(code)
        } else {
            Self::new(fallback)
        }
    }

    /// Builds a language from raw codes, validating each one.
    pub fn from_parts(code: &str, country: Option<&str>, script: Option<&str>) -> LangResult<Self> {
        let mut language = Self::new(code)?;
        language.country = country.map(Country::new).transpose()?;
        language.script = script.map(Script::new).transpose()?;
        Ok(language)
    }

    pub fn from_triple(triple: &Triple) -> LangResult<Self> {
        Self::from_parts(
            &triple.alpha3,
            triple.country.as_deref(),
            triple.script.as_deref(),
        )
    }

    /// Accepts a [`Country`] or a raw alpha-2 code.
    pub fn with_country<C>(mut self, country: C) -> LangResult<Self>
    where
        C: TryInto<Country>,
        LangError: From<C::Error>,
    {
        self.country = Some(country.try_into()?);
        Ok(self)
    }

    /// Accepts a [`Script`] or a raw ISO-15924 code.
    pub fn with_script<S>(mut self, script: S) -> LangResult<Self>
    where
        S: TryInto<Script>,
        LangError: From<S::Error>,
    {
        self.script = Some(script.try_into()?);
        Ok(self)
    }

    /// Builds a language from a code in the scheme `scheme`, using the
    /// process-wide registry.
    pub fn from_code(code: &str, scheme: &str) -> LangResult<Self> {
        converters().from_code(code, scheme)
    }

    pub fn from_ietf(tag: &str) -> LangResult<Self> {
        converters().parse_ietf(tag)
    }

    pub fn alpha3(&self) -> &'static str {
        &self.record.alpha3
    }

    /// The ISO-639-3 row behind this language.
    pub fn record(&self) -> &'static LanguageRecord {
        self.record
    }

    pub fn country(&self) -> Option<Country> {
        self.country
    }

    pub fn script(&self) -> Option<Script> {
        self.script
    }

    pub fn set_country(&mut self, country: Option<Country>) {
        self.country = country;
    }

    pub fn set_script(&mut self, script: Option<Script>) {
        self.script = script;
    }

    /// False only for the undetermined language, `und`.
    pub fn is_known(&self) -> bool {
        self.alpha3() != LANGUAGE_UNDETERMINED
    }

    /// This language's code in the scheme `scheme`, using the process-wide
    /// registry.
    pub fn convert(&self, scheme: &str) -> LangResult<String> {
        converters().convert(self, scheme)
    }

    pub fn alpha2(&self) -> LangResult<String> {
        self.convert("alpha2")
    }

    pub fn alpha3b(&self) -> LangResult<String> {
        self.convert("alpha3b")
    }

    pub fn alpha3t(&self) -> LangResult<String> {
        self.convert("alpha3t")
    }

    pub fn name(&self) -> LangResult<String> {
        self.convert("name")
    }

    pub fn scope(&self) -> LangResult<String> {
        self.convert("scope")
    }

    pub fn language_type(&self) -> LangResult<String> {
        self.convert("type")
    }

    pub fn opensubtitles(&self) -> LangResult<String> {
        self.convert("opensubtitles")
    }

    pub fn from_alpha2(code: &str) -> LangResult<Self> {
        Self::from_code(code, "alpha2")
    }

    pub fn from_alpha3b(code: &str) -> LangResult<Self> {
        Self::from_code(code, "alpha3b")
    }

    pub fn from_alpha3t(code: &str) -> LangResult<Self> {
        Self::from_code(code, "alpha3t")
    }

    pub fn from_name(name: &str) -> LangResult<Self> {
        Self::from_code(name, "name")
    }

    pub fn from_opensubtitles(code: &str) -> LangResult<Self> {
        Self::from_code(code, "opensubtitles")
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.alpha3() == other.alpha3()
            && self.country == other.country
            && self.script == other.script
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&converters().ietf(self))
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Language [{self}]>")
    }
}

impl FromStr for Language {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_ietf(s)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Language::from_ietf(&tag).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::Arc;

    use proptest::prelude::*;
    use proptest::sample::select;

    use super::Language;
    use crate::converter::{EquivalenceConverter, LanguageConverter};
    use crate::country::Country;
    use crate::error::{CodeKind, LangError};
    use crate::registry::converters;
    use crate::script::Script;
    use crate::tables::CodeTables;

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn lang(code: &str) -> Language {
        Language::new(code).expect("valid language")
    }

    fn all_alpha3() -> Vec<&'static str> {
        CodeTables::bundled()
            .languages()
            .iter()
            .map(|record| record.alpha3.as_str())
            .collect()
    }

    #[test]
    fn rejects_unknown_language() {
        let err = Language::new("zzz").expect_err("zzz is not a language");
        assert_eq!(
            err,
            LangError::InvalidCode {
                kind: CodeKind::Language,
                code: "zzz".to_string(),
            }
        );
    }

    #[test]
    fn fallback_replaces_unknown_code() {
        let language = Language::with_fallback("zzzz", "und").expect("fallback");
        assert_eq!(language, lang("und"));
        assert_eq!(Language::with_fallback("eng", "und").expect("eng"), lang("eng"));
    }

    #[test]
    fn invalid_fallback_fails() {
        let err = Language::with_fallback("zzzz", "yyyy").expect_err("both invalid");
        assert_eq!(err, LangError::invalid_language("yyyy"));
    }

    #[test]
    fn truthiness_follows_undetermined_sentinel() {
        assert!(!lang("und").is_known());
        assert!(lang("eng").is_known());
    }

    #[test]
    fn accepts_typed_or_raw_country() {
        let raw = lang("por").with_country("BR").expect("BR");
        assert_eq!(raw.country(), Some(Country::new("BR").expect("BR")));
        let typed = lang("eng").with_country(Country::new("US").expect("US")).expect("US");
        assert_eq!(typed, lang("eng").with_country("US").expect("US"));
        assert_ne!(typed, lang("eng").with_country("GB").expect("GB"));
    }

    #[test]
    fn accepts_typed_or_raw_script() {
        let raw = lang("srp").with_script("Latn").expect("Latn");
        assert_eq!(raw.script(), Some(Script::new("Latn").expect("Latn")));
        let typed = lang("srp").with_script(Script::new("Latn").expect("Latn")).expect("Latn");
        assert_eq!(raw, typed);
        assert_ne!(raw, lang("srp").with_script("Cyrl").expect("Cyrl"));
    }

    #[test]
    fn equality_covers_all_parts() {
        assert_eq!(lang("eng"), lang("eng"));
        assert_ne!(lang("fra"), lang("eng"));
        let latin = Language::from_parts("srp", Some("SR"), Some("Latn")).expect("srp");
        let cyrillic = Language::from_parts("srp", Some("SR"), Some("Cyrl")).expect("srp");
        let built = lang("srp")
            .with_country("SR")
            .and_then(|language| language.with_script("Latn"))
            .expect("srp");
        assert_eq!(latin, built);
        assert_ne!(latin, cyrillic);
        assert_ne!(Some(lang("por").with_country("BR").expect("BR")), None);
    }

    #[test]
    fn from_parts_reports_bad_country() {
        let err = Language::from_parts("fra", Some("YZ"), None).expect_err("bad country");
        assert_eq!(err, LangError::invalid_country("YZ"));
    }

    #[test]
    fn hash_follows_ietf_form() {
        assert_eq!(hash_of(&lang("fra")), hash_of("fr"));
        assert_eq!(hash_of(&lang("ace")), hash_of("ace"));
        assert_eq!(hash_of(&lang("por").with_country("BR").expect("BR")), hash_of("pt-BR"));
        assert_eq!(hash_of(&lang("srp").with_script("Cyrl").expect("Cyrl")), hash_of("sr-Cyrl"));
        let en_us_latn = Language::from_parts("eng", Some("US"), Some("Latn")).expect("en");
        assert_eq!(hash_of(&en_us_latn), hash_of("en-US-Latn"));

        let set: HashSet<Language> = [lang("fra"), lang("fra"), lang("eng")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_and_debug() {
        let language = Language::from_parts("eng", Some("US"), Some("Latn")).expect("en");
        assert_eq!(language.to_string(), "en-US-Latn");
        assert_eq!(format!("{language:?}"), "<Language [en-US-Latn]>");
        assert_eq!(lang("aaa").to_string(), "aaa");
    }

    #[test]
    fn alpha2_scheme() {
        assert_eq!(lang("eng").alpha2().expect("en"), "en");
        assert_eq!(Language::from_alpha2("en").expect("en"), lang("eng"));
        assert_eq!(Language::from_code("en", "alpha2").expect("en"), lang("eng"));
        assert!(matches!(
            Language::from_alpha2("zz"),
            Err(LangError::ReverseConversionNotFound { .. })
        ));
        assert!(matches!(
            lang("aaa").alpha2(),
            Err(LangError::ConversionNotFound { .. })
        ));
    }

    #[test]
    fn alpha3b_and_alpha3t_schemes() {
        assert_eq!(lang("fra").alpha3b().expect("fre"), "fre");
        assert_eq!(lang("fra").alpha3t().expect("fra"), "fra");
        assert_eq!(Language::from_alpha3b("fre").expect("fre"), lang("fra"));
        assert_eq!(Language::from_alpha3t("deu").expect("deu"), lang("deu"));
        assert!(matches!(
            Language::from_alpha3b("zzz"),
            Err(LangError::ReverseConversionNotFound { .. })
        ));
        assert!(matches!(
            lang("aaa").alpha3b(),
            Err(LangError::ConversionNotFound { .. })
        ));
    }

    #[test]
    fn name_scheme() {
        assert_eq!(lang("eng").name().expect("name"), "English");
        assert_eq!(Language::from_name("English").expect("eng"), lang("eng"));
        assert!(matches!(
            Language::from_name("Zzzzzzzzz"),
            Err(LangError::ReverseConversionNotFound { .. })
        ));
    }

    #[test]
    fn scope_and_type_schemes() {
        assert_eq!(lang("eng").scope().expect("scope"), "individual");
        assert_eq!(lang("und").scope().expect("scope"), "special");
        assert_eq!(lang("eng").language_type().expect("type"), "living");
        assert_eq!(lang("und").language_type().expect("type"), "special");
        let err = Language::from_code("individual", "scope").expect_err("forward only");
        assert_eq!(err, LangError::IrreversibleScheme("scope".to_string()));
    }

    #[test]
    fn opensubtitles_scheme() {
        assert_eq!(
            lang("fra").opensubtitles().expect("fre"),
            lang("fra").alpha3b().expect("fre")
        );
        let brazilian = lang("por").with_country("BR").expect("BR");
        assert_eq!(brazilian.opensubtitles().expect("pob"), "pob");
        assert_eq!(Language::from_opensubtitles("fre").expect("fre"), lang("fra"));
        assert_eq!(Language::from_opensubtitles("pob").expect("pob"), brazilian);
        assert_eq!(Language::from_opensubtitles("pb").expect("pb"), brazilian);
        assert_eq!(
            Language::from_opensubtitles("mne").expect("mne"),
            lang("srp").with_country("ME").expect("ME")
        );
        assert!(matches!(
            Language::from_opensubtitles("zzz"),
            Err(LangError::ReverseConversionNotFound { .. })
        ));
        assert!(lang("aaa").opensubtitles().is_err());
    }

    #[test]
    fn unknown_scheme_is_distinct_from_missing_conversion() {
        let err = lang("fra").convert("klingon").expect_err("no such scheme");
        assert_eq!(err, LangError::UnknownScheme("klingon".to_string()));
    }

    fn registered_test_converter() -> Arc<dyn LanguageConverter> {
        Arc::new(EquivalenceConverter::new(
            [("fra", "test1"), ("eng", "test2")],
            true,
        ))
    }

    #[test]
    fn registration_adds_and_removes_scheme() {
        let registry = converters();
        let french = lang("fra");
        assert!(matches!(french.convert("langtest"), Err(LangError::UnknownScheme(_))));
        assert!(!registry.has_reverse("langtest"));

        registry
            .register("langtest", registered_test_converter)
            .expect("register");
        assert!(registry.has_reverse("langtest"));
        assert!(registry.reverse_schemes().contains(&"langtest".to_string()));
        assert_eq!(french.convert("langtest").expect("test1"), "test1");
        assert_eq!(
            Language::from_code("test2", "langtest").expect("eng").alpha3(),
            "eng"
        );

        registry.unregister("langtest").expect("unregister");
        assert!(!registry.has_reverse("langtest"));
        assert!(matches!(
            Language::from_code("test2", "langtest"),
            Err(LangError::UnknownScheme(_))
        ));
        assert!(matches!(french.convert("langtest"), Err(LangError::UnknownScheme(_))));
    }

    #[test]
    fn serializes_as_ietf_tag() {
        let language = lang("por").with_country("BR").expect("BR");
        let json = serde_json::to_string(&language).expect("json");
        assert_eq!(json, "\"pt-BR\"");
        let back: Language = serde_json::from_str(&json).expect("language");
        assert_eq!(back, language);
        assert!(serde_json::from_str::<Language>("\"xyz-FR\"").is_err());
    }

    proptest! {
        #[test]
        fn valid_codes_keep_alpha3(code in select(all_alpha3())) {
            prop_assert_eq!(Language::new(code).expect("valid").alpha3(), code);
        }

        #[test]
        fn invalid_codes_take_fallback(
            code in "[a-z]{4,6}",
            fallback in select(all_alpha3()),
        ) {
            let language = Language::with_fallback(&code, fallback).expect("fallback");
            prop_assert_eq!(language, Language::new(fallback).expect("valid"));
        }

        #[test]
        fn equivalence_schemes_are_symmetric(
            scheme in select(vec!["alpha2", "alpha3b", "alpha3t", "name"]),
            index in any::<proptest::sample::Index>(),
        ) {
            let converter = converters().get(scheme).expect("builtin");
            let codes: Vec<&String> = converter.codes().iter().collect();
            let code = index.get(&codes).as_str();
            let language = Language::from_code(code, scheme).expect("reverse");
            prop_assert_eq!(language.convert(scheme).expect("forward"), code);
        }
    }
}
