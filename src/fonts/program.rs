//! Format-agnostic output of the font program parsers.
//!
//! Every parser reduces its format to a [`FormatBundle`]: the font-native code to
//! glyph index table, advance widths and kerning keyed by glyph index, and a
//! [`FontMetrics`] summary. All lengths are normalized to 1000 units per em.

use std::collections::{BTreeMap, HashMap};

use bitflags::bitflags;

/// Source format of a font program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum FontFormat {
    /// sfnt container (TrueType or OpenType)
    OpenType,
    /// Bare CFF / Type 2 program
    Cff,
    /// Adobe Font Metrics text file
    Afm,
    /// Type 1 program (PFB or PFA)
    Type1,
}

/// Outline technology inside an sfnt container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum OutlineFlavor {
    /// `glyf` quadratic outlines
    TrueType,
    /// `CFF ` cubic outlines
    Cff,
    /// Not an outline font program (AFM metrics, Type1)
    None,
}

/// What the keys of [`FormatBundle::code_to_glyph`] mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CodeSpace {
    /// Unicode scalar values (TrueType (3,1) cmap, CFF charset names)
    Unicode,
    /// Single-byte font codes (symbolic cmaps, AFM, Type1 encodings)
    Byte,
    /// Character IDs of a CID-keyed program
    Cid,
}

/// Ordered pair of glyph indices used as a kerning key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct GlyphPair {
    /// First (left) glyph
    pub left: u32,
    /// Second (right) glyph
    pub right: u32,
}

impl GlyphPair {
    /// Create a pair.
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    /// Both indices packed into one 64-bit key, left in the high half.
    pub fn packed(self) -> u64 {
        (u64::from(self.left) << 32) | u64::from(self.right)
    }
}

bitflags! {
    /// FontDescriptor `/Flags` (PDF 32000-1, Table 123).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FontFlags: u32 {
        /// All glyphs have the same width
        const FIXED_PITCH = 1 << 0;
        /// Glyphs have serifs
        const SERIF = 1 << 1;
        /// Glyphs outside the Adobe standard Latin set
        const SYMBOLIC = 1 << 2;
        /// Glyphs resemble cursive handwriting
        const SCRIPT = 1 << 3;
        /// Uses the Adobe standard Latin set
        const NONSYMBOLIC = 1 << 5;
        /// Glyphs have dominant vertical strokes that are slanted
        const ITALIC = 1 << 6;
        /// No lowercase letters
        const ALL_CAP = 1 << 16;
        /// Lowercase letters drawn as small capitals
        const SMALL_CAP = 1 << 17;
        /// Bold glyphs painted with extra pixels at small sizes
        const FORCE_BOLD = 1 << 18;
    }
}

/// Summary metrics in 1000 units per em.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FontMetrics {
    /// Typographic ascender (positive)
    pub ascent: f64,
    /// Typographic descender (negative)
    pub descent: f64,
    /// Height of flat capital letters
    pub cap_height: f64,
    /// Height of flat lowercase letters
    pub x_height: f64,
    /// Degrees counter-clockwise from vertical
    pub italic_angle: f64,
    /// Dominant vertical stem width
    pub stem_v: f64,
    /// Dominant horizontal stem width
    pub stem_h: f64,
    /// Font bounding box (llx, lly, urx, ury)
    pub bbox: [f64; 4],
    /// Monospaced font
    pub fixed_pitch: bool,
    /// Font does not use the standard Latin character set / encoding
    pub custom_encoding: bool,
    /// Weight name (`Bold`, `Regular`) when the format stores one
    pub weight: Option<String>,
    /// Underline position
    pub underline_position: f64,
    /// Underline thickness
    pub underline_thickness: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            ascent: 0.0,
            descent: 0.0,
            cap_height: 0.0,
            x_height: 0.0,
            italic_angle: 0.0,
            stem_v: 0.0,
            stem_h: 0.0,
            bbox: [0.0; 4],
            fixed_pitch: false,
            custom_encoding: false,
            weight: None,
            underline_position: -100.0,
            underline_thickness: 50.0,
        }
    }
}

impl FontMetrics {
    /// Whether the weight name marks a bold face.
    pub fn is_bold(&self) -> bool {
        self.weight.as_deref().is_some_and(|w| {
            let w = w.to_ascii_lowercase();
            w.contains("bold") || w.contains("black") || w.contains("heavy")
        })
    }

    /// StemV for the FontDescriptor, estimated from the weight when the program
    /// does not store one.
    pub fn stem_v_or_estimate(&self) -> f64 {
        if self.stem_v > 0.0 {
            self.stem_v
        } else if self.is_bold() {
            140.0
        } else {
            80.0
        }
    }

    /// Descriptor flags for this font.
    pub fn flags(&self, symbolic: bool) -> FontFlags {
        let mut flags = FontFlags::empty();
        if self.fixed_pitch {
            flags |= FontFlags::FIXED_PITCH;
        }
        if symbolic || self.custom_encoding {
            flags |= FontFlags::SYMBOLIC;
        } else {
            flags |= FontFlags::NONSYMBOLIC;
        }
        if self.italic_angle != 0.0 {
            flags |= FontFlags::ITALIC;
        }
        if self.is_bold() {
            flags |= FontFlags::FORCE_BOLD;
        }
        flags
    }

    /// Fill ascent and descent from the bounding box when the format had neither.
    pub(crate) fn ascent_descent_from_bbox(&mut self) {
        if self.ascent == 0.0 {
            self.ascent = self.bbox[3];
        }
        if self.descent == 0.0 {
            self.descent = self.bbox[1];
        }
    }
}

/// Parsed font program, reduced to the tables reconciliation needs.
#[derive(Debug, Clone)]
pub struct FormatBundle {
    /// Source format
    pub format: FontFormat,
    /// Outline technology (sfnt only)
    pub flavor: OutlineFlavor,
    /// PostScript name
    pub font_name: String,
    /// Meaning of the `code_to_glyph` keys
    pub code_space: CodeSpace,
    /// Native code to glyph index
    pub code_to_glyph: BTreeMap<u32, u32>,
    /// Glyph index to advance width
    pub glyph_widths: HashMap<u32, f64>,
    /// Glyph pair to kerning adjustment
    pub glyph_kernings: HashMap<GlyphPair, f64>,
    /// Glyph index to PostScript glyph name, when known
    pub glyph_names: HashMap<u32, String>,
    /// Number of glyphs in the program
    pub glyph_count: u32,
    /// Summary metrics
    pub metrics: FontMetrics,
    /// Registry/ordering/supplement of a CID-keyed program
    pub ros: Option<(String, String, i32)>,
    /// The program itself, for embedding
    pub data: bytes::Bytes,
}

impl FormatBundle {
    /// Empty bundle of the given format.
    pub fn new(format: FontFormat, code_space: CodeSpace) -> Self {
        Self {
            format,
            flavor: OutlineFlavor::None,
            font_name: String::new(),
            code_space,
            code_to_glyph: BTreeMap::new(),
            glyph_widths: HashMap::new(),
            glyph_kernings: HashMap::new(),
            glyph_names: HashMap::new(),
            glyph_count: 0,
            metrics: FontMetrics::default(),
            ros: None,
            data: bytes::Bytes::new(),
        }
    }

    /// Width of a glyph, if the program defines it.
    pub fn glyph_width(&self, glyph: u32) -> Option<f64> {
        self.glyph_widths.get(&glyph).copied()
    }

    /// Kerning between two glyphs (zero when unkerned).
    pub fn kerning(&self, left: u32, right: u32) -> f64 {
        self.glyph_kernings
            .get(&GlyphPair::new(left, right))
            .copied()
            .unwrap_or(0.0)
    }
}
