//! Reconciled font: the character code, glyph and Unicode tables of one font and
//! the operations layout needs from it.
//!
//! A [`Font`] is built by a [`FontLoader`](super::loader::FontLoader), either from a
//! freshly parsed font program or from a font dictionary already stored in a
//! document. Whatever the source, the result has the same shape:
//!
//! - `codes`: character code (1 to 4 bytes) to Unicode, injective both ways
//! - `glyph_indexes`: Unicode to glyph identifier (glyph index for embedded
//!   programs, CID or code for stored fonts), not necessarily injective
//! - widths and kerning keyed by glyph identifier, in 1000 units per em
//!
//! Once built a font never changes, except for the set of characters that have
//! been encoded through it, which only grows.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, OnceLock};

use crate::config::{FallbackPolicy, FontConfig};
use crate::error::{Error, Result};
use crate::fonts::bimap::BiMap;
use crate::fonts::cmap::CharCode;
use crate::fonts::program::{FontFormat, FontMetrics, GlyphPair, OutlineFlavor};

/// Width used when a font has no widths at all.
const FALLBACK_AVERAGE_WIDTH: f64 = 1000.0;

/// Simple (single-byte) font subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SimpleKind {
    Type1,
    TrueType,
    MmType1,
    Type3,
}

/// Descendant font flavor of a composite (Type0) font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CompositeKind {
    /// `CIDFontType0`: CFF outlines
    Cff,
    /// `CIDFontType2`: TrueType outlines
    TrueType,
}

/// Font kind: a tagged union over one reconciliation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum FontKind {
    Simple(SimpleKind),
    Composite(CompositeKind),
}

impl FontKind {
    pub fn is_composite(self) -> bool {
        matches!(self, FontKind::Composite(_))
    }

    /// `/Subtype` of the font dictionary.
    pub fn subtype(self) -> &'static str {
        match self {
            FontKind::Simple(SimpleKind::Type1) => "Type1",
            FontKind::Simple(SimpleKind::TrueType) => "TrueType",
            FontKind::Simple(SimpleKind::MmType1) => "MMType1",
            FontKind::Simple(SimpleKind::Type3) => "Type3",
            FontKind::Composite(_) => "Type0",
        }
    }

    /// `/Subtype` of the descendant CIDFont, for composite fonts.
    pub fn cid_font_subtype(self) -> Option<&'static str> {
        match self {
            FontKind::Composite(CompositeKind::Cff) => Some("CIDFontType0"),
            FontKind::Composite(CompositeKind::TrueType) => Some("CIDFontType2"),
            FontKind::Simple(_) => None,
        }
    }

    /// Kind from a font dictionary `/Subtype`.
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "Type1" => Some(FontKind::Simple(SimpleKind::Type1)),
            "TrueType" => Some(FontKind::Simple(SimpleKind::TrueType)),
            "MMType1" => Some(FontKind::Simple(SimpleKind::MmType1)),
            "Type3" => Some(FontKind::Simple(SimpleKind::Type3)),
            "CIDFontType0" => Some(FontKind::Composite(CompositeKind::Cff)),
            "CIDFontType2" => Some(FontKind::Composite(CompositeKind::TrueType)),
            _ => None,
        }
    }
}

/// Font program carried by a font built for embedding.
#[derive(Debug, Clone)]
pub struct EmbeddedProgram {
    pub format: FontFormat,
    pub flavor: OutlineFlavor,
    /// Program bytes for `/FontFile2` or `/FontFile3`
    pub data: bytes::Bytes,
    /// Code to CID table, present when codes no longer equal glyph indices and
    /// `Identity-H` cannot be used
    pub cid_encoding: Option<BTreeMap<CharCode, u32>>,
    /// Registry, ordering and supplement of a CID-keyed program
    pub ros: Option<(String, String, i32)>,
}

/// Everything a loader produces, before configuration is applied.
#[derive(Debug, Clone)]
pub(crate) struct FontParts {
    pub name: String,
    pub kind: FontKind,
    pub codes: BiMap<CharCode, char>,
    pub glyph_indexes: HashMap<char, u32>,
    pub glyph_widths: HashMap<u32, f64>,
    pub glyph_kernings: HashMap<GlyphPair, f64>,
    /// `/DW` or `/MissingWidth`
    pub default_width: Option<f64>,
    pub metrics: FontMetrics,
    pub symbolic: bool,
    pub program: Option<EmbeddedProgram>,
}

impl FontParts {
    pub fn new(name: impl Into<String>, kind: FontKind) -> Self {
        Self {
            name: name.into(),
            kind,
            codes: BiMap::new(),
            glyph_indexes: HashMap::new(),
            glyph_widths: HashMap::new(),
            glyph_kernings: HashMap::new(),
            default_width: None,
            metrics: FontMetrics::default(),
            symbolic: false,
            program: None,
        }
    }
}

/// A loaded font.
#[derive(Debug)]
pub struct Font {
    name: String,
    kind: FontKind,
    codes: BiMap<CharCode, char>,
    glyph_indexes: HashMap<char, u32>,
    glyph_widths: HashMap<u32, f64>,
    glyph_kernings: HashMap<GlyphPair, f64>,
    default_width: Option<f64>,
    metrics: FontMetrics,
    symbolic: bool,
    default_code: Option<char>,
    fallback: FallbackPolicy,
    char_code_max_length: usize,
    program: Option<EmbeddedProgram>,
    used_codes: Mutex<BTreeSet<char>>,
    average_width: OnceLock<f64>,
}

impl Font {
    /// Finish a font from loader output.
    ///
    /// Fails with [`Error::Configuration`] when the configured default code is not
    /// mapped by the font.
    pub(crate) fn from_parts(parts: FontParts, config: &FontConfig) -> Result<Self> {
        let default_code = match config.default_code {
            Some(c) if parts.codes.contains_value(&c) => Some(c),
            Some(c) => {
                return Err(Error::Configuration(format!(
                    "default code {:?} is not mapped by font '{}'",
                    c, parts.name
                )))
            },
            None if parts.codes.contains_value(&' ') => Some(' '),
            None => parts.codes.values().min().copied(),
        };

        let char_code_max_length = parts.codes.keys().map(CharCode::len).max().unwrap_or(1);

        log::debug!(
            "Font '{}' ({:?}): {} codes, max code length {}, symbolic {}, default {:?}",
            parts.name,
            parts.kind,
            parts.codes.len(),
            char_code_max_length,
            parts.symbolic,
            default_code
        );

        Ok(Self {
            name: parts.name,
            kind: parts.kind,
            codes: parts.codes,
            glyph_indexes: parts.glyph_indexes,
            glyph_widths: parts.glyph_widths,
            glyph_kernings: parts.glyph_kernings,
            default_width: parts.default_width,
            metrics: parts.metrics,
            symbolic: parts.symbolic,
            default_code,
            fallback: config.fallback,
            char_code_max_length,
            program: parts.program,
            used_codes: Mutex::new(BTreeSet::new()),
            average_width: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FontKind {
        self.kind
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// True when Unicode values were synthesized from codes rather than known.
    pub fn is_symbolic(&self) -> bool {
        self.symbolic
    }

    /// Substitute for unmappable input under [`FallbackPolicy::Substitution`].
    ///
    /// `None` only for a font without any code; substitution then drops the input.
    pub fn default_code(&self) -> Option<char> {
        self.default_code
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Longest character code in bytes.
    pub fn char_code_max_length(&self) -> usize {
        self.char_code_max_length
    }

    /// Code to Unicode table.
    pub fn codes(&self) -> &BiMap<CharCode, char> {
        &self.codes
    }

    /// Every character the font can encode.
    pub fn code_points(&self) -> BTreeSet<char> {
        self.codes.values().copied().collect()
    }

    /// Characters encoded through this font so far.
    pub fn used_code_points(&self) -> BTreeSet<char> {
        self.used_codes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn glyph_index(&self, c: char) -> Option<u32> {
        self.glyph_indexes.get(&c).copied()
    }

    /// Width of a glyph identifier in font units, if defined.
    pub fn glyph_width(&self, glyph: u32) -> Option<f64> {
        self.glyph_widths.get(&glyph).copied()
    }

    pub fn program(&self) -> Option<&EmbeddedProgram> {
        self.program.as_ref()
    }

    pub(crate) fn glyph_kernings(&self) -> &HashMap<GlyphPair, f64> {
        &self.glyph_kernings
    }

    pub(crate) fn default_width(&self) -> Option<f64> {
        self.default_width
    }

    /// Mean of all widths, or 1000 when the font has none.
    pub fn average_width(&self) -> f64 {
        *self.average_width.get_or_init(|| {
            if self.glyph_widths.is_empty() {
                FALLBACK_AVERAGE_WIDTH
            } else {
                self.glyph_widths.values().sum::<f64>() / self.glyph_widths.len() as f64
            }
        })
    }

    // ---- decode / encode ----

    /// Character codes to text.
    ///
    /// At each position the shortest code present in the font wins. A position no
    /// code matches is handled by the fallback policy: skipped, replaced by the
    /// default code, or reported as [`Error::DecodeError`].
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let mut text = String::with_capacity(bytes.len());
        let mut i = 0;

        'outer: while i < bytes.len() {
            for len in 1..=self.char_code_max_length.min(bytes.len() - i) {
                let Some(code) = CharCode::new(&bytes[i..i + len]) else {
                    break;
                };
                if let Some(&c) = self.codes.get(&code) {
                    text.push(c);
                    i += len;
                    continue 'outer;
                }
            }

            match self.fallback {
                FallbackPolicy::Exclusion => {
                    log::trace!("Dropping unmapped byte {:#04X} at {}", bytes[i], i);
                },
                FallbackPolicy::Substitution => match self.default_code {
                    Some(c) => text.push(c),
                    None => log::trace!("No default code, dropping byte {:#04X} at {}", bytes[i], i),
                },
                FallbackPolicy::Exception => {
                    return Err(Error::DecodeError {
                        offset: i,
                        code: bytes[i],
                    })
                },
            }
            i += 1;
        }
        Ok(text)
    }

    /// Text to character codes.
    ///
    /// Control characters (below U+0020) are dropped. Characters without a code
    /// are handled by the fallback policy. Every encoded character is recorded in
    /// the used set.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(text.len() * self.char_code_max_length);
        let mut used = Vec::new();

        for (index, c) in text.chars().enumerate() {
            if (c as u32) < 0x20 {
                continue;
            }
            let (c, code) = match self.codes.get_by_value(&c) {
                Some(code) => (c, code),
                None => match self.fallback {
                    FallbackPolicy::Exclusion => continue,
                    FallbackPolicy::Substitution => {
                        match self.default_code.and_then(|d| self.codes.get_by_value(&d).map(|code| (d, code))) {
                            Some(substitute) => substitute,
                            None => continue,
                        }
                    },
                    FallbackPolicy::Exception => {
                        return Err(Error::EncodeError { character: c, index })
                    },
                },
            };
            out.extend_from_slice(code.as_bytes());
            used.push(c);
        }

        if !used.is_empty() {
            self.used_codes
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .extend(used);
        }
        Ok(out)
    }

    // ---- measurement ----

    fn unscaled_width(&self, c: char) -> f64 {
        self.glyph_index(c)
            .and_then(|g| self.glyph_width(g))
            .or(self.default_width)
            .unwrap_or_else(|| self.average_width())
    }

    /// Advance width of one character at `size`.
    pub fn width_of_char(&self, c: char, size: f64) -> f64 {
        self.unscaled_width(c) * size / 1000.0
    }

    /// Advance width of a string at `size`, without kerning.
    pub fn width(&self, text: &str, size: f64) -> f64 {
        text.chars().map(|c| self.unscaled_width(c)).sum::<f64>() * size / 1000.0
    }

    /// Kerning adjustment between two characters at `size`.
    pub fn kerning_of(&self, left: char, right: char, size: f64) -> f64 {
        match (self.glyph_index(left), self.glyph_index(right)) {
            (Some(l), Some(r)) => {
                self.glyph_kernings
                    .get(&GlyphPair::new(l, r))
                    .copied()
                    .unwrap_or(0.0)
                    * size
                    / 1000.0
            },
            _ => 0.0,
        }
    }

    /// Total kerning over every adjacent pair of `text` at `size`.
    pub fn kerning(&self, text: &str, size: f64) -> f64 {
        let chars: Vec<char> = text.chars().collect();
        chars
            .windows(2)
            .map(|pair| self.kerning_of(pair[0], pair[1], size))
            .sum()
    }

    pub fn ascent(&self, size: f64) -> f64 {
        self.metrics.ascent * size / 1000.0
    }

    pub fn descent(&self, size: f64) -> f64 {
        self.metrics.descent * size / 1000.0
    }

    /// Ascent minus descent at `size`.
    pub fn line_height(&self, size: f64) -> f64 {
        (self.metrics.ascent - self.metrics.descent) * size / 1000.0
    }
}
