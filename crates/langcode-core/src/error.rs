use core::convert::Infallible;
use core::fmt;

use thiserror::Error;

/// Which closed table rejected a code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeKind {
    Language,
    Country,
    Script,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::Language => f.write_str("language"),
            CodeKind::Country => f.write_str("country"),
            CodeKind::Script => f.write_str("script"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LangError {
    #[error("{code:?} is not a valid {kind} code")]
    InvalidCode { kind: CodeKind, code: String },
    #[error("no conversion for {}", describe_triple(.alpha3, .country, .script))]
    ConversionNotFound {
        alpha3: String,
        country: Option<String>,
        script: Option<String>,
    },
    #[error("no reverse conversion for {code:?}")]
    ReverseConversionNotFound { code: String },
    #[error("unknown conversion scheme {0:?}")]
    UnknownScheme(String),
    #[error("conversion scheme {0:?} is already registered")]
    DuplicateScheme(String),
    #[error("conversion scheme {0:?} is not registered")]
    SchemeNotBound(String),
    #[error("conversion scheme {0:?} has no reverse conversion")]
    IrreversibleScheme(String),
    #[error("malformed IETF tag {tag:?}: unmatched subtags {remainder:?}")]
    MalformedTag { tag: String, remainder: Vec<String> },
}

pub type LangResult<T> = Result<T, LangError>;

impl LangError {
    pub fn invalid_language(code: impl Into<String>) -> Self {
        LangError::InvalidCode {
            kind: CodeKind::Language,
            code: code.into(),
        }
    }

    pub fn invalid_country(code: impl Into<String>) -> Self {
        LangError::InvalidCode {
            kind: CodeKind::Country,
            code: code.into(),
        }
    }

    pub fn invalid_script(code: impl Into<String>) -> Self {
        LangError::InvalidCode {
            kind: CodeKind::Script,
            code: code.into(),
        }
    }

    pub fn conversion_not_found(alpha3: &str, country: Option<&str>, script: Option<&str>) -> Self {
        LangError::ConversionNotFound {
            alpha3: alpha3.to_string(),
            country: country.map(str::to_string),
            script: script.map(str::to_string),
        }
    }

    pub fn reverse_not_found(code: impl Into<String>) -> Self {
        LangError::ReverseConversionNotFound { code: code.into() }
    }
}

impl From<Infallible> for LangError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

fn describe_triple(alpha3: &str, country: &Option<String>, script: &Option<String>) -> String {
    let mut out = format!("alpha3={alpha3:?}");
    if let Some(country) = country {
        out.push_str(&format!(" country={country:?}"));
    }
    if let Some(script) = script {
        out.push_str(&format!(" script={script:?}"));
    }
    out
}

/// A bundled or caller-supplied code table that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{table}: missing header row")]
    MissingHeader { table: &'static str },
    #[error("{table}:{line}: expected {expected} columns, found {found}")]
    ColumnCount {
        table: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{table}:{line}: empty key column")]
    EmptyKey { table: &'static str, line: usize },
    #[error("{table}:{line}: invalid number {value:?}")]
    InvalidNumber {
        table: &'static str,
        line: usize,
        value: String,
    },
    #[error("{table}:{line}: duplicate key {key:?}")]
    DuplicateKey {
        table: &'static str,
        line: usize,
        key: String,
    },
}
