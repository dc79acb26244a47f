//! Font resources and the per-document font cache.
//!
//! A [`FontResource`] loads its font at most once. Loading moves it from
//! `Unloaded` to either `Loaded` or `Failed`; a failed resource answers every
//! later call with [`Error::FontUnavailable`] instead of retrying.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::FontConfig;
use crate::error::{Error, Result};
use crate::fonts::font::Font;
use crate::fonts::loader::{DictionaryLoader, FontLoader};
use crate::object::{ObjectRef, ObjectStore};

/// Load state of a font resource.
#[derive(Debug, Clone)]
pub enum FontState {
    Unloaded,
    Loaded(Arc<Font>),
    /// Reason of the first failure
    Failed(String),
}

/// A font that is loaded on first use.
#[derive(Debug)]
pub struct FontResource {
    state: Mutex<FontState>,
}

impl Default for FontResource {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResource {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FontState::Unloaded),
        }
    }

    /// Resource that is already loaded.
    pub fn loaded(font: Font) -> Self {
        Self {
            state: Mutex::new(FontState::Loaded(Arc::new(font))),
        }
    }

    pub fn state(&self) -> FontState {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Load through `loader` unless already loaded or failed.
    pub fn load(&self, loader: &dyn FontLoader, config: &FontConfig) -> Result<Arc<Font>> {
        self.load_with(|| loader.load(config))
    }

    /// Load by running `load` unless already loaded or failed.
    ///
    /// The first error is returned as is; later calls get
    /// [`Error::FontUnavailable`] with its message.
    pub fn load_with(&self, load: impl FnOnce() -> Result<Font>) -> Result<Arc<Font>> {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match &*state {
            FontState::Loaded(font) => return Ok(Arc::clone(font)),
            FontState::Failed(reason) => return Err(Error::FontUnavailable(reason.clone())),
            FontState::Unloaded => {},
        }
        match load() {
            Ok(font) => {
                let font = Arc::new(font);
                *state = FontState::Loaded(Arc::clone(&font));
                Ok(font)
            },
            Err(e) => {
                log::warn!("Font failed to load: {}", e);
                *state = FontState::Failed(e.to_string());
                Err(e)
            },
        }
    }

    /// The loaded font.
    pub fn font(&self) -> Result<Arc<Font>> {
        match self.state() {
            FontState::Loaded(font) => Ok(font),
            FontState::Failed(reason) => Err(Error::FontUnavailable(reason)),
            FontState::Unloaded => Err(Error::FontUnavailable("font has not been loaded".to_string())),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        self.font()?.decode(bytes)
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        self.font()?.encode(text)
    }

    pub fn width(&self, text: &str, size: f64) -> Result<f64> {
        Ok(self.font()?.width(text, size))
    }
}

/// Fonts of one document, keyed by font dictionary reference.
#[derive(Debug, Default)]
pub struct FontCache {
    config: FontConfig,
    resources: HashMap<ObjectRef, Arc<FontResource>>,
}

impl FontCache {
    pub fn new(config: FontConfig) -> Self {
        Self {
            config,
            resources: HashMap::new(),
        }
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Font for the dictionary at `reference`, loading it on first request.
    ///
    /// With caching disabled every call loads the font again.
    pub fn get_or_load<S: ObjectStore + ?Sized>(&mut self, store: &S, reference: ObjectRef) -> Result<Arc<Font>> {
        let config = &self.config;
        let load = || DictionaryLoader::from_reference(store, reference)?.load(config);

        if !config.cache_fonts {
            return load().map(Arc::new);
        }

        let resource = self.resources.entry(reference).or_insert_with(|| {
            log::debug!("Font cache miss for {}", reference);
            Arc::new(FontResource::new())
        });
        resource.load_with(load)
    }

    /// Cache a font built elsewhere, typically one just embedded at `reference`.
    pub fn insert(&mut self, reference: ObjectRef, font: Font) -> Arc<FontResource> {
        let resource = Arc::new(FontResource::loaded(font));
        self.resources.insert(reference, Arc::clone(&resource));
        resource
    }

    pub fn resource(&self, reference: ObjectRef) -> Option<Arc<FontResource>> {
        self.resources.get(&reference).cloned()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
