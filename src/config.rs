//! Configuration for font loading and text mapping.

/// What to do when a character code or Unicode scalar has no mapping in a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FallbackPolicy {
    /// Drop the unmapped unit from the output.
    Exclusion,
    /// Replace the unmapped unit with the font's default code.
    #[default]
    Substitution,
    /// Fail with a decode or encode error naming the offending unit.
    Exception,
}

/// Font processing configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FontConfig {
    /// Policy applied on decode and encode misses.
    pub fallback: FallbackPolicy,

    /// Substitute character for unmappable input.
    ///
    /// `None` picks U+0020 when the font maps it, otherwise the font's lowest code point.
    pub default_code: Option<char>,

    /// Treat recoverable CMap anomalies as errors instead of skipping them.
    pub strict_parsing: bool,

    /// Keep loaded fonts in the per-document cache.
    pub cache_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FontConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            fallback: FallbackPolicy::Substitution,
            default_code: None,
            strict_parsing: false,
            cache_fonts: true,
        }
    }

    /// Strict configuration: unmapped input is an error and CMap anomalies abort parsing.
    pub fn strict() -> Self {
        Self {
            fallback: FallbackPolicy::Exception,
            default_code: None,
            strict_parsing: true,
            cache_fonts: true,
        }
    }

    /// Set the fallback policy.
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the default substitute character.
    pub fn with_default_code(mut self, code: char) -> Self {
        self.default_code = Some(code);
        self
    }

    /// Enable or disable strict CMap parsing.
    pub fn with_strict_parsing(mut self, enable: bool) -> Self {
        self.strict_parsing = enable;
        self
    }

    /// Enable or disable font caching.
    pub fn with_cache(mut self, enable: bool) -> Self {
        self.cache_fonts = enable;
        self
    }
}
