//! Named conversion schemes.
//!
//! A [`ConverterRegistry`] binds scheme names to converter instances. Lookups
//! that miss fall back to a [`ConverterDiscovery`] source; a discovered
//! converter is instantiated and bound before it is returned, so later lookups
//! see the same instance.
//!
//! The schemes a `Language` can be built from are exactly the reverse-capable
//! converters bound at call time (see [`ConverterRegistry::reverse_schemes`]).
//! Registering such a converter makes `from_code(code, name)` available;
//! unregistering it takes it away again.
//!
//! [`converters`] returns the process-wide registry, which discovers the
//! converters bundled with the crate. Isolated registries can be built with
//! [`ConverterRegistry::new`].

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::converter::LanguageConverter;
use crate::converters::BuiltinDiscovery;
use crate::error::{LangError, LangResult};
use crate::language::Language;

/// Builds a converter instance.
pub type ConverterFactory = fn() -> Arc<dyn LanguageConverter>;

/// Yields converter factories by scheme name.
pub trait ConverterDiscovery: Send + Sync {
    /// Every advertised `(name, factory)` pair, in advertisement order.
    fn entries(&self) -> Vec<(String, ConverterFactory)>;

    fn find(&self, name: &str) -> Option<ConverterFactory> {
        self.entries()
            .into_iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, factory)| factory)
    }
}

/// Advertises nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscovery;

impl ConverterDiscovery for NoDiscovery {
    fn entries(&self) -> Vec<(String, ConverterFactory)> {
        Vec::new()
    }
}

/// A fixed list of advertised factories.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    entries: Vec<(String, ConverterFactory)>,
}

impl StaticDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, factory: ConverterFactory) -> Self {
        self.entries.push((name.into(), factory));
        self
    }
}

impl ConverterDiscovery for StaticDiscovery {
    fn entries(&self) -> Vec<(String, ConverterFactory)> {
        self.entries.clone()
    }
}

static CONVERTERS: LazyLock<ConverterRegistry> =
    LazyLock::new(|| ConverterRegistry::new(BuiltinDiscovery));

/// The process-wide registry used by [`Language`]'s conversion methods.
pub fn converters() -> &'static ConverterRegistry {
    &CONVERTERS
}

pub struct ConverterRegistry {
    discovery: Box<dyn ConverterDiscovery>,
    bindings: Mutex<BTreeMap<String, Arc<dyn LanguageConverter>>>,
}

impl ConverterRegistry {
    pub fn new(discovery: impl ConverterDiscovery + 'static) -> Self {
        Self {
            discovery: Box::new(discovery),
            bindings: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the converter bound to `name`, discovering and binding it first
    /// when needed.
    pub fn get(&self, name: &str) -> LangResult<Arc<dyn LanguageConverter>> {
        let bound = self.bindings().get(name).cloned();
        if let Some(converter) = bound {
            return Ok(converter);
        }

        let factory = self
            .discovery
            .find(name)
            .ok_or_else(|| LangError::UnknownScheme(name.to_string()))?;
        let converter = factory();

        // Another caller may have bound the same name while the factory ran;
        // its instance wins.
        match self.bindings().entry(name.to_string()) {
            Entry::Occupied(existing) => {
                debug!(scheme = name, "scheme bound concurrently, using existing converter");
                Ok(Arc::clone(existing.get()))
            }
            Entry::Vacant(slot) => {
                debug!(
                    scheme = name,
                    reverse = converter.as_reverse().is_some(),
                    "discovered converter"
                );
                Ok(Arc::clone(slot.insert(converter)))
            }
        }
    }

    /// Instantiates `factory` and binds it to `name`. Never overwrites.
    pub fn register(&self, name: &str, factory: ConverterFactory) -> LangResult<()> {
        if self.contains(name) {
            return Err(LangError::DuplicateScheme(name.to_string()));
        }
        self.register_instance(name, factory())
    }

    /// Binds an already built converter to `name`. Never overwrites.
    pub fn register_instance(
        &self,
        name: &str,
        converter: Arc<dyn LanguageConverter>,
    ) -> LangResult<()> {
        match self.bindings().entry(name.to_string()) {
            Entry::Occupied(_) => Err(LangError::DuplicateScheme(name.to_string())),
            Entry::Vacant(slot) => {
                debug!(
                    scheme = name,
                    reverse = converter.as_reverse().is_some(),
                    "registered converter"
                );
                slot.insert(converter);
                Ok(())
            }
        }
    }

    /// Removes the binding for `name` and returns the converter it held.
    pub fn unregister(&self, name: &str) -> LangResult<Arc<dyn LanguageConverter>> {
        let removed = self
            .bindings()
            .remove(name)
            .ok_or_else(|| LangError::SchemeNotBound(name.to_string()))?;
        debug!(scheme = name, "unregistered converter");
        Ok(removed)
    }

    /// Registers every advertised converter. Fails on the first name that is
    /// already bound, so a second call only succeeds after [`clear`](Self::clear).
    pub fn load_all(&self) -> LangResult<()> {
        for (name, factory) in self.discovery.entries() {
            self.register(&name, factory)?;
        }
        Ok(())
    }

    /// Unregisters everything.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.bindings());
        debug!(count = removed.len(), "cleared converters");
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings().contains_key(name)
    }

    /// Bound scheme names, sorted.
    pub fn schemes(&self) -> Vec<String> {
        self.bindings().keys().cloned().collect()
    }

    /// Bound schemes that can construct a `Language` from a foreign code.
    pub fn reverse_schemes(&self) -> Vec<String> {
        self.bindings()
            .iter()
            .filter(|(_, converter)| converter.as_reverse().is_some())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn has_reverse(&self, name: &str) -> bool {
        self.bindings()
            .get(name)
            .is_some_and(|converter| converter.as_reverse().is_some())
    }

    /// Forward conversion of `language` through the scheme `name`.
    pub fn convert(&self, language: &Language, name: &str) -> LangResult<String> {
        let converter = self.get(name)?;
        converter.convert(
            language.alpha3(),
            language.country().map(|country| country.alpha2()),
            language.script().map(|script| script.code()),
        )
    }

    /// Builds a `Language` from a code in the scheme `name`.
    pub fn from_code(&self, code: &str, name: &str) -> LangResult<Language> {
        let converter = self.get(name)?;
        let reverse = converter
            .as_reverse()
            .ok_or_else(|| LangError::IrreversibleScheme(name.to_string()))?;
        let triple = reverse.reverse(code)?;
        Language::from_triple(&triple)
    }

    fn bindings(&self) -> MutexGuard<'_, BTreeMap<String, Arc<dyn LanguageConverter>>> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
