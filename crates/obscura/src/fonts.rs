//! Font catalogue: a lazily loaded, exactly-once set of parsed fonts.
//!
//! The registry moves through three states:
//! - `Uninitialized`: nothing read yet
//! - `Ready`: every source parsed; the catalogue is never mutated again
//! - `Failed`: the first parse error, cached and returned to every caller
//!
//! Concurrent first use blocks on a single load; a failure is never retried.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, OnceLock};

use obscura_common::{CaptchaError, Result};
use rand::Rng;
use rusttype::Font;

/// Fonts compiled into the binary
const EMBEDDED_FONTS: &[(&str, &[u8])] = &[
    ("DejaVuSans.ttf", include_bytes!("../assets/fonts/DejaVuSans.ttf")),
    ("DejaVuSansCondensed-Bold.ttf", include_bytes!("../assets/fonts/DejaVuSansCondensed-Bold.ttf")),
    ("DejaVuSansMono-Bold.ttf", include_bytes!("../assets/fonts/DejaVuSansMono-Bold.ttf")),
    ("DejaVuSerif-Italic.ttf", include_bytes!("../assets/fonts/DejaVuSerif-Italic.ttf")),
];

static EMBEDDED: LazyLock<Arc<FontRegistry>> = LazyLock::new(|| {
    Arc::new(FontRegistry::new(
        EMBEDDED_FONTS
            .iter()
            .map(|&(name, data)| FontSource::embedded(name, data))
            .collect(),
    ))
});

#[derive(Debug, Clone)]
enum FontData {
    Static(&'static [u8]),
    Owned(Vec<u8>),
}

/// Raw font file awaiting parsing
#[derive(Debug, Clone)]
pub struct FontSource {
    name: String,
    data: FontData,
}

impl FontSource {
    /// Font bytes compiled into the binary
    pub fn embedded(name: &str, data: &'static [u8]) -> Self {
        Self {
            name: name.to_string(),
            data: FontData::Static(data),
        }
    }

    /// Font bytes read at runtime
    pub fn owned(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            data: FontData::Owned(data),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self) -> Result<Font<'static>> {
        let font = match &self.data {
            FontData::Static(bytes) => Font::try_from_bytes(*bytes),
            FontData::Owned(bytes) => Font::try_from_vec(bytes.clone()),
        };
        font.ok_or_else(|| CaptchaError::FontLoad(format!("parse font {:?}", self.name)))
    }
}

/// Parsed fonts keyed by file name
pub struct FontCatalogue {
    names: Vec<String>,
    fonts: HashMap<String, Font<'static>>,
}

impl FontCatalogue {
    /// Parse every source; the first failure aborts the whole load.
    pub fn load(sources: &[FontSource]) -> Result<Self> {
        if sources.is_empty() {
            return Err(CaptchaError::FontLoad("no fonts available".to_string()));
        }

        let mut names = Vec::with_capacity(sources.len());
        let mut fonts = HashMap::with_capacity(sources.len());
        for source in sources {
            let font = source.parse()?;
            names.push(source.name().to_string());
            fonts.insert(source.name().to_string(), font);
        }

        Ok(Self { names, fonts })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Font names in load order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn get(&self, name: &str) -> Option<&Font<'static>> {
        self.fonts.get(name)
    }

    /// Pick a font uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Font<'static>> {
        if self.names.is_empty() {
            return Err(CaptchaError::FontLoad("no fonts available".to_string()));
        }
        let name = &self.names[rng.random_range(0..self.names.len())];
        self.fonts
            .get(name)
            .ok_or_else(|| CaptchaError::FontLoad(format!("font {name:?} missing from catalogue")))
    }
}

impl std::fmt::Debug for FontCatalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCatalogue").field("names", &self.names).finish()
    }
}

/// Observable state of a [`FontRegistry`]
#[derive(Debug)]
pub enum FontState<'a> {
    Uninitialized,
    Ready(&'a FontCatalogue),
    Failed(&'a CaptchaError),
}

/// Shared, read-only font resource with one-time initialization
pub struct FontRegistry {
    sources: Vec<FontSource>,
    state: OnceLock<Result<FontCatalogue>>,
}

impl FontRegistry {
    pub fn new(sources: Vec<FontSource>) -> Self {
        Self {
            sources,
            state: OnceLock::new(),
        }
    }

    /// The process-wide registry over the embedded font set
    pub fn embedded() -> Arc<FontRegistry> {
        Arc::clone(&EMBEDDED)
    }

    pub fn state(&self) -> FontState<'_> {
        match self.state.get() {
            None => FontState::Uninitialized,
            Some(Ok(catalogue)) => FontState::Ready(catalogue),
            Some(Err(e)) => FontState::Failed(e),
        }
    }

    /// Load on first use, then return the cached outcome
    pub fn catalogue(&self) -> Result<&FontCatalogue> {
        self.state
            .get_or_init(|| {
                let loaded = FontCatalogue::load(&self.sources);
                match &loaded {
                    Ok(catalogue) => {
                        tracing::debug!(fonts = ?catalogue.names(), "Font catalogue loaded");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Font catalogue failed to load");
                    }
                }
                loaded
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Pick a random font, loading the catalogue if needed
    pub fn select_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Font<'static>> {
        self.catalogue()?.choose(rng)
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("sources", &self.sources.len())
            .field("state", &self.state())
            .finish()
    }
}
