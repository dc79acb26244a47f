//! Legacy single-byte encodings.
//!
//! The five predefined encodings a simple font can use: StandardEncoding,
//! WinAnsiEncoding, MacRomanEncoding and the built-in encodings of the Symbol and
//! ZapfDingbats fonts. Each maps a byte code to a glyph name; names resolve to
//! Unicode through [`glyph_list`](super::glyph_list). ZapfDingbats names are not in
//! the Adobe Glyph List, so their Unicode values are derived from the code.
//!
//! Tables are built once on first use and shared read-only.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::glyph_list;

/// One of the predefined single-byte encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum LegacyEncoding {
    /// StandardEncoding
    Standard,
    /// WinAnsiEncoding
    WinAnsi,
    /// MacRomanEncoding
    MacRoman,
    /// Symbol font built-in encoding
    Symbol,
    /// ZapfDingbats font built-in encoding
    ZapfDingbats,
}

/// Code to name table plus the reverse lookup (first code wins).
struct EncodingTable {
    names: [Option<&'static str>; 256],
    codes: HashMap<&'static str, u8>,
}

impl EncodingTable {
    fn build(entries: &'static [(u8, &'static str)]) -> Self {
        let mut names = [None; 256];
        let mut codes = HashMap::with_capacity(entries.len());
        for &(code, name) in entries {
            names[code as usize] = Some(name);
            codes.entry(name).or_insert(code);
        }
        Self { names, codes }
    }
}

lazy_static! {
    static ref STANDARD: EncodingTable = EncodingTable::build(STANDARD_ENCODING);
    static ref WIN_ANSI: EncodingTable = EncodingTable::build(WIN_ANSI_ENCODING);
    static ref MAC_ROMAN: EncodingTable = EncodingTable::build(MAC_ROMAN_ENCODING);
    static ref SYMBOL: EncodingTable = EncodingTable::build(SYMBOL_ENCODING);
    static ref ZAPF_DINGBATS: EncodingTable = EncodingTable::build(ZAPF_DINGBATS_ENCODING);
}

impl LegacyEncoding {
    /// Look up an encoding by its PDF name (`/WinAnsiEncoding` without the slash).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "StandardEncoding" => Some(LegacyEncoding::Standard),
            "WinAnsiEncoding" => Some(LegacyEncoding::WinAnsi),
            "MacRomanEncoding" => Some(LegacyEncoding::MacRoman),
            "SymbolEncoding" => Some(LegacyEncoding::Symbol),
            "ZapfDingbatsEncoding" => Some(LegacyEncoding::ZapfDingbats),
            _ => None,
        }
    }

    /// Built-in encoding of a font when the document declares none.
    ///
    /// Symbol and ZapfDingbats (and their subset-prefixed or styled variants) carry
    /// their own encodings; everything else defaults to StandardEncoding.
    pub fn builtin_for(base_font: &str) -> Self {
        let name = base_font.split_once('+').map_or(base_font, |(_, rest)| rest);
        if name.starts_with("Symbol") {
            LegacyEncoding::Symbol
        } else if name.starts_with("ZapfDingbats") || name.starts_with("Dingbats") {
            LegacyEncoding::ZapfDingbats
        } else {
            LegacyEncoding::Standard
        }
    }

    fn table(self) -> &'static EncodingTable {
        match self {
            LegacyEncoding::Standard => &STANDARD,
            LegacyEncoding::WinAnsi => &WIN_ANSI,
            LegacyEncoding::MacRoman => &MAC_ROMAN,
            LegacyEncoding::Symbol => &SYMBOL,
            LegacyEncoding::ZapfDingbats => &ZAPF_DINGBATS,
        }
    }

    /// Glyph name at `code`.
    pub fn glyph_name(self, code: u8) -> Option<&'static str> {
        self.table().names[code as usize]
    }

    /// Lowest code whose glyph is `name`.
    pub fn code_for_name(self, name: &str) -> Option<u8> {
        self.table().codes.get(name).copied()
    }

    /// Unicode value of the glyph at `code`.
    pub fn unicode(self, code: u8) -> Option<char> {
        match self {
            LegacyEncoding::ZapfDingbats => {
                self.glyph_name(code)?;
                zapf_dingbats_unicode(code)
            }
            _ => self.glyph_name(code).and_then(glyph_list::name_to_unicode),
        }
    }

    /// Unicode value of a glyph name that is only meaningful in this encoding.
    ///
    /// Only ZapfDingbats has such names (`a1` .. `a206`).
    pub fn unicode_for_name(self, name: &str) -> Option<char> {
        match self {
            LegacyEncoding::ZapfDingbats => zapf_dingbats_unicode(self.code_for_name(name)?),
            _ => None,
        }
    }

    /// Byte code for a Unicode scalar, if the encoding can represent it.
    pub fn encode_char(self, c: char) -> Option<u8> {
        (0u8..=255).find(|&code| self.unicode(code) == Some(c))
    }

    /// All defined codes in ascending order with their glyph names.
    pub fn entries(self) -> impl Iterator<Item = (u8, &'static str)> {
        let table = self.table();
        (0u8..=255).filter_map(move |code| table.names[code as usize].map(|name| (code, name)))
    }
}

/// Unicode value of a ZapfDingbats code.
///
/// Most of the font sits in the Dingbats block at a fixed offset from the code; the
/// exceptions live in Miscellaneous Symbols, Geometric Shapes and Enclosed
/// Alphanumerics.
pub fn zapf_dingbats_unicode(code: u8) -> Option<char> {
    let value: u32 = match code {
        0x20 => 0x0020,
        0x25 => 0x260E,
        0x2A => 0x261B,
        0x2B => 0x261E,
        0x48 => 0x2605,
        0x6C => 0x25CF,
        0x6E => 0x25A0,
        0x73 => 0x25B2,
        0x74 => 0x25BC,
        0x75 => 0x25C6,
        0x77 => 0x25D7,
        0x21..=0x7E => 0x2700 + code as u32,
        0x80..=0x8D => 0x2768 + (code - 0x80) as u32,
        0xA8 => 0x2663,
        0xA9 => 0x2666,
        0xAA => 0x2665,
        0xAB => 0x2660,
        0xAC..=0xB5 => 0x2460 + (code - 0xAC) as u32,
        0xD5 => 0x2192,
        0xD6 => 0x2194,
        0xD7 => 0x2195,
        0xF0 => return None,
        0xA1..=0xFE => 0x26C0 + code as u32,
        _ => return None,
    };
    char::from_u32(value)
}

/// Adobe StandardEncoding (PDF 32000-1, Annex D.2).
const STANDARD_ENCODING: &[(u8, &str)] = &[
    (0x20, "space"), (0x21, "exclam"), (0x22, "quotedbl"), (0x23, "numbersign"),
    (0x24, "dollar"), (0x25, "percent"), (0x26, "ampersand"), (0x27, "quoteright"),
    (0x28, "parenleft"), (0x29, "parenright"), (0x2A, "asterisk"), (0x2B, "plus"),
    (0x2C, "comma"), (0x2D, "hyphen"), (0x2E, "period"), (0x2F, "slash"),
    (0x30, "zero"), (0x31, "one"), (0x32, "two"), (0x33, "three"),
    (0x34, "four"), (0x35, "five"), (0x36, "six"), (0x37, "seven"),
    (0x38, "eight"), (0x39, "nine"), (0x3A, "colon"), (0x3B, "semicolon"),
    (0x3C, "less"), (0x3D, "equal"), (0x3E, "greater"), (0x3F, "question"),
    (0x40, "at"), (0x41, "A"), (0x42, "B"), (0x43, "C"),
    (0x44, "D"), (0x45, "E"), (0x46, "F"), (0x47, "G"),
    (0x48, "H"), (0x49, "I"), (0x4A, "J"), (0x4B, "K"),
    (0x4C, "L"), (0x4D, "M"), (0x4E, "N"), (0x4F, "O"),
    (0x50, "P"), (0x51, "Q"), (0x52, "R"), (0x53, "S"),
    (0x54, "T"), (0x55, "U"), (0x56, "V"), (0x57, "W"),
    (0x58, "X"), (0x59, "Y"), (0x5A, "Z"), (0x5B, "bracketleft"),
    (0x5C, "backslash"), (0x5D, "bracketright"), (0x5E, "asciicircum"), (0x5F, "underscore"),
    (0x60, "quoteleft"), (0x61, "a"), (0x62, "b"), (0x63, "c"),
    (0x64, "d"), (0x65, "e"), (0x66, "f"), (0x67, "g"),
    (0x68, "h"), (0x69, "i"), (0x6A, "j"), (0x6B, "k"),
    (0x6C, "l"), (0x6D, "m"), (0x6E, "n"), (0x6F, "o"),
    (0x70, "p"), (0x71, "q"), (0x72, "r"), (0x73, "s"),
    (0x74, "t"), (0x75, "u"), (0x76, "v"), (0x77, "w"),
    (0x78, "x"), (0x79, "y"), (0x7A, "z"), (0x7B, "braceleft"),
    (0x7C, "bar"), (0x7D, "braceright"), (0x7E, "asciitilde"), (0xA1, "exclamdown"),
    (0xA2, "cent"), (0xA3, "sterling"), (0xA4, "fraction"), (0xA5, "yen"),
    (0xA6, "florin"), (0xA7, "section"), (0xA8, "currency"), (0xA9, "quotesingle"),
    (0xAA, "quotedblleft"), (0xAB, "guillemotleft"), (0xAC, "guilsinglleft"), (0xAD, "guilsinglright"),
    (0xAE, "fi"), (0xAF, "fl"), (0xB1, "endash"), (0xB2, "dagger"),
    (0xB3, "daggerdbl"), (0xB4, "periodcentered"), (0xB6, "paragraph"), (0xB7, "bullet"),
    (0xB8, "quotesinglbase"), (0xB9, "quotedblbase"), (0xBA, "quotedblright"), (0xBB, "guillemotright"),
    (0xBC, "ellipsis"), (0xBD, "perthousand"), (0xBF, "questiondown"), (0xC1, "grave"),
    (0xC2, "acute"), (0xC3, "circumflex"), (0xC4, "tilde"), (0xC5, "macron"),
    (0xC6, "breve"), (0xC7, "dotaccent"), (0xC8, "dieresis"), (0xCA, "ring"),
    (0xCB, "cedilla"), (0xCD, "hungarumlaut"), (0xCE, "ogonek"), (0xCF, "caron"),
    (0xD0, "emdash"), (0xE1, "AE"), (0xE3, "ordfeminine"), (0xE8, "Lslash"),
    (0xE9, "Oslash"), (0xEA, "OE"), (0xEB, "ordmasculine"), (0xF1, "ae"),
    (0xF5, "dotlessi"), (0xF8, "lslash"), (0xF9, "oslash"), (0xFA, "oe"),
    (0xFB, "germandbls"),
];

/// WinAnsiEncoding (Windows code page 1252).
const WIN_ANSI_ENCODING: &[(u8, &str)] = &[
    (0x20, "space"), (0x21, "exclam"), (0x22, "quotedbl"), (0x23, "numbersign"),
    (0x24, "dollar"), (0x25, "percent"), (0x26, "ampersand"), (0x27, "quotesingle"),
    (0x28, "parenleft"), (0x29, "parenright"), (0x2A, "asterisk"), (0x2B, "plus"),
    (0x2C, "comma"), (0x2D, "hyphen"), (0x2E, "period"), (0x2F, "slash"),
    (0x30, "zero"), (0x31, "one"), (0x32, "two"), (0x33, "three"),
    (0x34, "four"), (0x35, "five"), (0x36, "six"), (0x37, "seven"),
    (0x38, "eight"), (0x39, "nine"), (0x3A, "colon"), (0x3B, "semicolon"),
    (0x3C, "less"), (0x3D, "equal"), (0x3E, "greater"), (0x3F, "question"),
    (0x40, "at"), (0x41, "A"), (0x42, "B"), (0x43, "C"),
    (0x44, "D"), (0x45, "E"), (0x46, "F"), (0x47, "G"),
    (0x48, "H"), (0x49, "I"), (0x4A, "J"), (0x4B, "K"),
    (0x4C, "L"), (0x4D, "M"), (0x4E, "N"), (0x4F, "O"),
    (0x50, "P"), (0x51, "Q"), (0x52, "R"), (0x53, "S"),
    (0x54, "T"), (0x55, "U"), (0x56, "V"), (0x57, "W"),
    (0x58, "X"), (0x59, "Y"), (0x5A, "Z"), (0x5B, "bracketleft"),
    (0x5C, "backslash"), (0x5D, "bracketright"), (0x5E, "asciicircum"), (0x5F, "underscore"),
    (0x60, "grave"), (0x61, "a"), (0x62, "b"), (0x63, "c"),
    (0x64, "d"), (0x65, "e"), (0x66, "f"), (0x67, "g"),
    (0x68, "h"), (0x69, "i"), (0x6A, "j"), (0x6B, "k"),
    (0x6C, "l"), (0x6D, "m"), (0x6E, "n"), (0x6F, "o"),
    (0x70, "p"), (0x71, "q"), (0x72, "r"), (0x73, "s"),
    (0x74, "t"), (0x75, "u"), (0x76, "v"), (0x77, "w"),
    (0x78, "x"), (0x79, "y"), (0x7A, "z"), (0x7B, "braceleft"),
    (0x7C, "bar"), (0x7D, "braceright"), (0x7E, "asciitilde"), (0x80, "Euro"),
    (0x82, "quotesinglbase"), (0x83, "florin"), (0x84, "quotedblbase"), (0x85, "ellipsis"),
    (0x86, "dagger"), (0x87, "daggerdbl"), (0x88, "circumflex"), (0x89, "perthousand"),
    (0x8A, "Scaron"), (0x8B, "guilsinglleft"), (0x8C, "OE"), (0x8E, "Zcaron"),
    (0x91, "quoteleft"), (0x92, "quoteright"), (0x93, "quotedblleft"), (0x94, "quotedblright"),
    (0x95, "bullet"), (0x96, "endash"), (0x97, "emdash"), (0x98, "tilde"),
    (0x99, "trademark"), (0x9A, "scaron"), (0x9B, "guilsinglright"), (0x9C, "oe"),
    (0x9E, "zcaron"), (0x9F, "Ydieresis"), (0xA0, "space"), (0xA1, "exclamdown"),
    (0xA2, "cent"), (0xA3, "sterling"), (0xA4, "currency"), (0xA5, "yen"),
    (0xA6, "brokenbar"), (0xA7, "section"), (0xA8, "dieresis"), (0xA9, "copyright"),
    (0xAA, "ordfeminine"), (0xAB, "guillemotleft"), (0xAC, "logicalnot"), (0xAD, "hyphen"),
    (0xAE, "registered"), (0xAF, "macron"), (0xB0, "degree"), (0xB1, "plusminus"),
    (0xB2, "twosuperior"), (0xB3, "threesuperior"), (0xB4, "acute"), (0xB5, "mu"),
    (0xB6, "paragraph"), (0xB7, "periodcentered"), (0xB8, "cedilla"), (0xB9, "onesuperior"),
    (0xBA, "ordmasculine"), (0xBB, "guillemotright"), (0xBC, "onequarter"), (0xBD, "onehalf"),
    (0xBE, "threequarters"), (0xBF, "questiondown"), (0xC0, "Agrave"), (0xC1, "Aacute"),
    (0xC2, "Acircumflex"), (0xC3, "Atilde"), (0xC4, "Adieresis"), (0xC5, "Aring"),
    (0xC6, "AE"), (0xC7, "Ccedilla"), (0xC8, "Egrave"), (0xC9, "Eacute"),
    (0xCA, "Ecircumflex"), (0xCB, "Edieresis"), (0xCC, "Igrave"), (0xCD, "Iacute"),
    (0xCE, "Icircumflex"), (0xCF, "Idieresis"), (0xD0, "Eth"), (0xD1, "Ntilde"),
    (0xD2, "Ograve"), (0xD3, "Oacute"), (0xD4, "Ocircumflex"), (0xD5, "Otilde"),
    (0xD6, "Odieresis"), (0xD7, "multiply"), (0xD8, "Oslash"), (0xD9, "Ugrave"),
    (0xDA, "Uacute"), (0xDB, "Ucircumflex"), (0xDC, "Udieresis"), (0xDD, "Yacute"),
    (0xDE, "Thorn"), (0xDF, "germandbls"), (0xE0, "agrave"), (0xE1, "aacute"),
    (0xE2, "acircumflex"), (0xE3, "atilde"), (0xE4, "adieresis"), (0xE5, "aring"),
    (0xE6, "ae"), (0xE7, "ccedilla"), (0xE8, "egrave"), (0xE9, "eacute"),
    (0xEA, "ecircumflex"), (0xEB, "edieresis"), (0xEC, "igrave"), (0xED, "iacute"),
    (0xEE, "icircumflex"), (0xEF, "idieresis"), (0xF0, "eth"), (0xF1, "ntilde"),
    (0xF2, "ograve"), (0xF3, "oacute"), (0xF4, "ocircumflex"), (0xF5, "otilde"),
    (0xF6, "odieresis"), (0xF7, "divide"), (0xF8, "oslash"), (0xF9, "ugrave"),
    (0xFA, "uacute"), (0xFB, "ucircumflex"), (0xFC, "udieresis"), (0xFD, "yacute"),
    (0xFE, "thorn"), (0xFF, "ydieresis"),
];

/// MacRomanEncoding, including the Mac OS extras above 0x80.
const MAC_ROMAN_ENCODING: &[(u8, &str)] = &[
    (0x20, "space"), (0x21, "exclam"), (0x22, "quotedbl"), (0x23, "numbersign"),
    (0x24, "dollar"), (0x25, "percent"), (0x26, "ampersand"), (0x27, "quotesingle"),
    (0x28, "parenleft"), (0x29, "parenright"), (0x2A, "asterisk"), (0x2B, "plus"),
    (0x2C, "comma"), (0x2D, "hyphen"), (0x2E, "period"), (0x2F, "slash"),
    (0x30, "zero"), (0x31, "one"), (0x32, "two"), (0x33, "three"),
    (0x34, "four"), (0x35, "five"), (0x36, "six"), (0x37, "seven"),
    (0x38, "eight"), (0x39, "nine"), (0x3A, "colon"), (0x3B, "semicolon"),
    (0x3C, "less"), (0x3D, "equal"), (0x3E, "greater"), (0x3F, "question"),
    (0x40, "at"), (0x41, "A"), (0x42, "B"), (0x43, "C"),
    (0x44, "D"), (0x45, "E"), (0x46, "F"), (0x47, "G"),
    (0x48, "H"), (0x49, "I"), (0x4A, "J"), (0x4B, "K"),
    (0x4C, "L"), (0x4D, "M"), (0x4E, "N"), (0x4F, "O"),
    (0x50, "P"), (0x51, "Q"), (0x52, "R"), (0x53, "S"),
    (0x54, "T"), (0x55, "U"), (0x56, "V"), (0x57, "W"),
    (0x58, "X"), (0x59, "Y"), (0x5A, "Z"), (0x5B, "bracketleft"),
    (0x5C, "backslash"), (0x5D, "bracketright"), (0x5E, "asciicircum"), (0x5F, "underscore"),
    (0x60, "grave"), (0x61, "a"), (0x62, "b"), (0x63, "c"),
    (0x64, "d"), (0x65, "e"), (0x66, "f"), (0x67, "g"),
    (0x68, "h"), (0x69, "i"), (0x6A, "j"), (0x6B, "k"),
    (0x6C, "l"), (0x6D, "m"), (0x6E, "n"), (0x6F, "o"),
    (0x70, "p"), (0x71, "q"), (0x72, "r"), (0x73, "s"),
    (0x74, "t"), (0x75, "u"), (0x76, "v"), (0x77, "w"),
    (0x78, "x"), (0x79, "y"), (0x7A, "z"), (0x7B, "braceleft"),
    (0x7C, "bar"), (0x7D, "braceright"), (0x7E, "asciitilde"), (0x80, "Adieresis"),
    (0x81, "Aring"), (0x82, "Ccedilla"), (0x83, "Eacute"), (0x84, "Ntilde"),
    (0x85, "Odieresis"), (0x86, "Udieresis"), (0x87, "aacute"), (0x88, "agrave"),
    (0x89, "acircumflex"), (0x8A, "adieresis"), (0x8B, "atilde"), (0x8C, "aring"),
    (0x8D, "ccedilla"), (0x8E, "eacute"), (0x8F, "egrave"), (0x90, "ecircumflex"),
    (0x91, "edieresis"), (0x92, "iacute"), (0x93, "igrave"), (0x94, "icircumflex"),
    (0x95, "idieresis"), (0x96, "ntilde"), (0x97, "oacute"), (0x98, "ograve"),
    (0x99, "ocircumflex"), (0x9A, "odieresis"), (0x9B, "otilde"), (0x9C, "uacute"),
    (0x9D, "ugrave"), (0x9E, "ucircumflex"), (0x9F, "udieresis"), (0xA0, "dagger"),
    (0xA1, "degree"), (0xA2, "cent"), (0xA3, "sterling"), (0xA4, "section"),
    (0xA5, "bullet"), (0xA6, "paragraph"), (0xA7, "germandbls"), (0xA8, "registered"),
    (0xA9, "copyright"), (0xAA, "trademark"), (0xAB, "acute"), (0xAC, "dieresis"),
    (0xAD, "notequal"), (0xAE, "AE"), (0xAF, "Oslash"), (0xB0, "infinity"),
    (0xB1, "plusminus"), (0xB2, "lessequal"), (0xB3, "greaterequal"), (0xB4, "yen"),
    (0xB5, "mu"), (0xB6, "partialdiff"), (0xB7, "summation"), (0xB8, "product"),
    (0xB9, "pi"), (0xBA, "integral"), (0xBB, "ordfeminine"), (0xBC, "ordmasculine"),
    (0xBD, "Omega"), (0xBE, "ae"), (0xBF, "oslash"), (0xC0, "questiondown"),
    (0xC1, "exclamdown"), (0xC2, "logicalnot"), (0xC3, "radical"), (0xC4, "florin"),
    (0xC5, "approxequal"), (0xC6, "Delta"), (0xC7, "guillemotleft"), (0xC8, "guillemotright"),
    (0xC9, "ellipsis"), (0xCA, "space"), (0xCB, "Agrave"), (0xCC, "Atilde"),
    (0xCD, "Otilde"), (0xCE, "OE"), (0xCF, "oe"), (0xD0, "endash"),
    (0xD1, "emdash"), (0xD2, "quotedblleft"), (0xD3, "quotedblright"), (0xD4, "quoteleft"),
    (0xD5, "quoteright"), (0xD6, "divide"), (0xD7, "lozenge"), (0xD8, "ydieresis"),
    (0xD9, "Ydieresis"), (0xDA, "fraction"), (0xDB, "currency"), (0xDC, "guilsinglleft"),
    (0xDD, "guilsinglright"), (0xDE, "fi"), (0xDF, "fl"), (0xE0, "daggerdbl"),
    (0xE1, "periodcentered"), (0xE2, "quotesinglbase"), (0xE3, "quotedblbase"), (0xE4, "perthousand"),
    (0xE5, "Acircumflex"), (0xE6, "Ecircumflex"), (0xE7, "Aacute"), (0xE8, "Edieresis"),
    (0xE9, "Egrave"), (0xEA, "Iacute"), (0xEB, "Icircumflex"), (0xEC, "Idieresis"),
    (0xED, "Igrave"), (0xEE, "Oacute"), (0xEF, "Ocircumflex"), (0xF0, "apple"),
    (0xF1, "Ograve"), (0xF2, "Uacute"), (0xF3, "Ucircumflex"), (0xF4, "Ugrave"),
    (0xF5, "dotlessi"), (0xF6, "circumflex"), (0xF7, "tilde"), (0xF8, "macron"),
    (0xF9, "breve"), (0xFA, "dotaccent"), (0xFB, "ring"), (0xFC, "cedilla"),
    (0xFD, "hungarumlaut"), (0xFE, "ogonek"), (0xFF, "caron"),
];

/// Built-in encoding of the Symbol font.
const SYMBOL_ENCODING: &[(u8, &str)] = &[
    (0x20, "space"), (0x21, "exclam"), (0x22, "universal"), (0x23, "numbersign"),
    (0x24, "existential"), (0x25, "percent"), (0x26, "ampersand"), (0x27, "suchthat"),
    (0x28, "parenleft"), (0x29, "parenright"), (0x2A, "asteriskmath"), (0x2B, "plus"),
    (0x2C, "comma"), (0x2D, "minus"), (0x2E, "period"), (0x2F, "slash"),
    (0x30, "zero"), (0x31, "one"), (0x32, "two"), (0x33, "three"),
    (0x34, "four"), (0x35, "five"), (0x36, "six"), (0x37, "seven"),
    (0x38, "eight"), (0x39, "nine"), (0x3A, "colon"), (0x3B, "semicolon"),
    (0x3C, "less"), (0x3D, "equal"), (0x3E, "greater"), (0x3F, "question"),
    (0x40, "congruent"), (0x41, "Alpha"), (0x42, "Beta"), (0x43, "Chi"),
    (0x44, "Delta"), (0x45, "Epsilon"), (0x46, "Phi"), (0x47, "Gamma"),
    (0x48, "Eta"), (0x49, "Iota"), (0x4A, "theta1"), (0x4B, "Kappa"),
    (0x4C, "Lambda"), (0x4D, "Mu"), (0x4E, "Nu"), (0x4F, "Omicron"),
    (0x50, "Pi"), (0x51, "Theta"), (0x52, "Rho"), (0x53, "Sigma"),
    (0x54, "Tau"), (0x55, "Upsilon"), (0x56, "sigma1"), (0x57, "Omega"),
    (0x58, "Xi"), (0x59, "Psi"), (0x5A, "Zeta"), (0x5B, "bracketleft"),
    (0x5C, "therefore"), (0x5D, "bracketright"), (0x5E, "perpendicular"), (0x5F, "underscore"),
    (0x60, "radicalex"), (0x61, "alpha"), (0x62, "beta"), (0x63, "chi"),
    (0x64, "delta"), (0x65, "epsilon"), (0x66, "phi"), (0x67, "gamma"),
    (0x68, "eta"), (0x69, "iota"), (0x6A, "phi1"), (0x6B, "kappa"),
    (0x6C, "lambda"), (0x6D, "mu"), (0x6E, "nu"), (0x6F, "omicron"),
    (0x70, "pi"), (0x71, "theta"), (0x72, "rho"), (0x73, "sigma"),
    (0x74, "tau"), (0x75, "upsilon"), (0x76, "omega1"), (0x77, "omega"),
    (0x78, "xi"), (0x79, "psi"), (0x7A, "zeta"), (0x7B, "braceleft"),
    (0x7C, "bar"), (0x7D, "braceright"), (0x7E, "similar"), (0xA0, "Euro"),
    (0xA1, "Upsilon1"), (0xA2, "minute"), (0xA3, "lessequal"), (0xA4, "fraction"),
    (0xA5, "infinity"), (0xA6, "florin"), (0xA7, "club"), (0xA8, "diamond"),
    (0xA9, "heart"), (0xAA, "spade"), (0xAB, "arrowboth"), (0xAC, "arrowleft"),
    (0xAD, "arrowup"), (0xAE, "arrowright"), (0xAF, "arrowdown"), (0xB0, "degree"),
    (0xB1, "plusminus"), (0xB2, "second"), (0xB3, "greaterequal"), (0xB4, "multiply"),
    (0xB5, "proportional"), (0xB6, "partialdiff"), (0xB7, "bullet"), (0xB8, "divide"),
    (0xB9, "notequal"), (0xBA, "equivalence"), (0xBB, "approxequal"), (0xBC, "ellipsis"),
    (0xBD, "arrowvertex"), (0xBE, "arrowhorizex"), (0xBF, "carriagereturn"), (0xC0, "aleph"),
    (0xC1, "Ifraktur"), (0xC2, "Rfraktur"), (0xC3, "weierstrass"), (0xC4, "circlemultiply"),
    (0xC5, "circleplus"), (0xC6, "emptyset"), (0xC7, "intersection"), (0xC8, "union"),
    (0xC9, "propersuperset"), (0xCA, "reflexsuperset"), (0xCB, "notsubset"), (0xCC, "propersubset"),
    (0xCD, "reflexsubset"), (0xCE, "element"), (0xCF, "notelement"), (0xD0, "angle"),
    (0xD1, "gradient"), (0xD2, "registerserif"), (0xD3, "copyrightserif"), (0xD4, "trademarkserif"),
    (0xD5, "product"), (0xD6, "radical"), (0xD7, "dotmath"), (0xD8, "logicalnot"),
    (0xD9, "logicaland"), (0xDA, "logicalor"), (0xDB, "arrowdblboth"), (0xDC, "arrowdblleft"),
    (0xDD, "arrowdblup"), (0xDE, "arrowdblright"), (0xDF, "arrowdbldown"), (0xE0, "lozenge"),
    (0xE1, "angleleft"), (0xE2, "registersans"), (0xE3, "copyrightsans"), (0xE4, "trademarksans"),
    (0xE5, "summation"), (0xE6, "parenlefttp"), (0xE7, "parenleftex"), (0xE8, "parenleftbt"),
    (0xE9, "bracketlefttp"), (0xEA, "bracketleftex"), (0xEB, "bracketleftbt"), (0xEC, "bracelefttp"),
    (0xED, "braceleftmid"), (0xEE, "braceleftbt"), (0xEF, "braceex"), (0xF1, "angleright"),
    (0xF2, "integral"), (0xF3, "integraltp"), (0xF4, "integralex"), (0xF5, "integralbt"),
    (0xF6, "parenrighttp"), (0xF7, "parenrightex"), (0xF8, "parenrightbt"), (0xF9, "bracketrighttp"),
    (0xFA, "bracketrightex"), (0xFB, "bracketrightbt"), (0xFC, "bracerighttp"), (0xFD, "bracerightmid"),
    (0xFE, "bracerightbt"),
];

/// Built-in encoding of the ZapfDingbats font.
const ZAPF_DINGBATS_ENCODING: &[(u8, &str)] = &[
    (0x20, "space"), (0x21, "a1"), (0x22, "a2"), (0x23, "a202"),
    (0x24, "a3"), (0x25, "a4"), (0x26, "a5"), (0x27, "a119"),
    (0x28, "a118"), (0x29, "a117"), (0x2A, "a11"), (0x2B, "a12"),
    (0x2C, "a13"), (0x2D, "a14"), (0x2E, "a15"), (0x2F, "a16"),
    (0x30, "a105"), (0x31, "a17"), (0x32, "a18"), (0x33, "a19"),
    (0x34, "a20"), (0x35, "a21"), (0x36, "a22"), (0x37, "a23"),
    (0x38, "a24"), (0x39, "a25"), (0x3A, "a26"), (0x3B, "a27"),
    (0x3C, "a28"), (0x3D, "a6"), (0x3E, "a7"), (0x3F, "a8"),
    (0x40, "a9"), (0x41, "a10"), (0x42, "a29"), (0x43, "a30"),
    (0x44, "a31"), (0x45, "a32"), (0x46, "a33"), (0x47, "a34"),
    (0x48, "a35"), (0x49, "a36"), (0x4A, "a37"), (0x4B, "a38"),
    (0x4C, "a39"), (0x4D, "a40"), (0x4E, "a41"), (0x4F, "a42"),
    (0x50, "a43"), (0x51, "a44"), (0x52, "a45"), (0x53, "a46"),
    (0x54, "a47"), (0x55, "a48"), (0x56, "a49"), (0x57, "a50"),
    (0x58, "a51"), (0x59, "a52"), (0x5A, "a53"), (0x5B, "a54"),
    (0x5C, "a55"), (0x5D, "a56"), (0x5E, "a57"), (0x5F, "a58"),
    (0x60, "a59"), (0x61, "a60"), (0x62, "a61"), (0x63, "a62"),
    (0x64, "a63"), (0x65, "a64"), (0x66, "a65"), (0x67, "a66"),
    (0x68, "a67"), (0x69, "a68"), (0x6A, "a69"), (0x6B, "a70"),
    (0x6C, "a71"), (0x6D, "a72"), (0x6E, "a73"), (0x6F, "a74"),
    (0x70, "a203"), (0x71, "a75"), (0x72, "a204"), (0x73, "a76"),
    (0x74, "a77"), (0x75, "a78"), (0x76, "a79"), (0x77, "a81"),
    (0x78, "a82"), (0x79, "a83"), (0x7A, "a84"), (0x7B, "a97"),
    (0x7C, "a98"), (0x7D, "a99"), (0x7E, "a100"), (0x80, "a89"),
    (0x81, "a90"), (0x82, "a93"), (0x83, "a94"), (0x84, "a91"),
    (0x85, "a92"), (0x86, "a205"), (0x87, "a85"), (0x88, "a206"),
    (0x89, "a86"), (0x8A, "a87"), (0x8B, "a88"), (0x8C, "a95"),
    (0x8D, "a96"), (0xA1, "a101"), (0xA2, "a102"), (0xA3, "a103"),
    (0xA4, "a104"), (0xA5, "a106"), (0xA6, "a107"), (0xA7, "a108"),
    (0xA8, "a112"), (0xA9, "a111"), (0xAA, "a110"), (0xAB, "a109"),
    (0xAC, "a120"), (0xAD, "a121"), (0xAE, "a122"), (0xAF, "a123"),
    (0xB0, "a124"), (0xB1, "a125"), (0xB2, "a126"), (0xB3, "a127"),
    (0xB4, "a128"), (0xB5, "a129"), (0xB6, "a130"), (0xB7, "a131"),
    (0xB8, "a132"), (0xB9, "a133"), (0xBA, "a134"), (0xBB, "a135"),
    (0xBC, "a136"), (0xBD, "a137"), (0xBE, "a138"), (0xBF, "a139"),
    (0xC0, "a140"), (0xC1, "a141"), (0xC2, "a142"), (0xC3, "a143"),
    (0xC4, "a144"), (0xC5, "a145"), (0xC6, "a146"), (0xC7, "a147"),
    (0xC8, "a148"), (0xC9, "a149"), (0xCA, "a150"), (0xCB, "a151"),
    (0xCC, "a152"), (0xCD, "a153"), (0xCE, "a154"), (0xCF, "a155"),
    (0xD0, "a156"), (0xD1, "a157"), (0xD2, "a158"), (0xD3, "a159"),
    (0xD4, "a160"), (0xD5, "a161"), (0xD6, "a163"), (0xD7, "a164"),
    (0xD8, "a196"), (0xD9, "a165"), (0xDA, "a192"), (0xDB, "a166"),
    (0xDC, "a167"), (0xDD, "a168"), (0xDE, "a169"), (0xDF, "a170"),
    (0xE0, "a171"), (0xE1, "a172"), (0xE2, "a173"), (0xE3, "a162"),
    (0xE4, "a174"), (0xE5, "a175"), (0xE6, "a176"), (0xE7, "a177"),
    (0xE8, "a178"), (0xE9, "a179"), (0xEA, "a193"), (0xEB, "a180"),
    (0xEC, "a199"), (0xED, "a181"), (0xEE, "a200"), (0xEF, "a182"),
    (0xF1, "a201"), (0xF2, "a183"), (0xF3, "a184"), (0xF4, "a197"),
    (0xF5, "a185"), (0xF6, "a194"), (0xF7, "a198"), (0xF8, "a186"),
    (0xF9, "a195"), (0xFA, "a187"), (0xFB, "a188"), (0xFC, "a189"),
    (0xFD, "a190"), (0xFE, "a191"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_encoding() {
        let enc = LegacyEncoding::Standard;
        assert_eq!(enc.glyph_name(0x41), Some("A"));
        assert_eq!(enc.glyph_name(0x27), Some("quoteright"));
        assert_eq!(enc.unicode(0x27), Some('\u{2019}'));
        assert_eq!(enc.unicode(0xA4), Some('\u{2044}'));
        assert_eq!(enc.unicode(0xE1), Some('Æ'));
        assert_eq!(enc.glyph_name(0x80), None);
    }

    #[test]
    fn test_winansi_encoding() {
        let enc = LegacyEncoding::WinAnsi;
        assert_eq!(enc.unicode(0x80), Some('€'));
        assert_eq!(enc.unicode(0x27), Some('\''));
        assert_eq!(enc.unicode(0xE9), Some('é'));
        assert_eq!(enc.unicode(0x81), None);
        assert_eq!(enc.encode_char('€'), Some(0x80));
        // 0xA0 is also "space"; the reverse lookup keeps the first code
        assert_eq!(enc.code_for_name("space"), Some(0x20));
    }

    #[test]
    fn test_mac_roman_encoding() {
        let enc = LegacyEncoding::MacRoman;
        assert_eq!(enc.unicode(0x80), Some('Ä'));
        assert_eq!(enc.unicode(0xDB), Some('¤'));
        assert_eq!(enc.unicode(0xF0), Some('\u{F8FF}'));
        assert_eq!(enc.unicode(0xFF), Some('ˇ'));
    }

    #[test]
    fn test_symbol_encoding() {
        let enc = LegacyEncoding::Symbol;
        assert_eq!(enc.unicode(0x61), Some('α'));
        assert_eq!(enc.unicode(0x44), Some('Δ'));
        assert_eq!(enc.unicode(0x22), Some('∀'));
        assert_eq!(enc.unicode(0xF0), None);
    }

    #[test]
    fn test_zapf_dingbats_encoding() {
        let enc = LegacyEncoding::ZapfDingbats;
        assert_eq!(enc.glyph_name(0x21), Some("a1"));
        assert_eq!(enc.unicode(0x21), Some('\u{2701}'));
        assert_eq!(enc.unicode(0x48), Some('\u{2605}'));
        assert_eq!(enc.unicode(0xAC), Some('\u{2460}'));
        assert_eq!(enc.unicode(0xFE), Some('\u{27BE}'));
        assert_eq!(enc.unicode(0xF0), None);
        assert_eq!(enc.unicode_for_name("a191"), Some('\u{27BE}'));
    }

    #[test]
    fn test_from_name_and_builtin() {
        assert_eq!(
            LegacyEncoding::from_name("MacRomanEncoding"),
            Some(LegacyEncoding::MacRoman)
        );
        assert_eq!(LegacyEncoding::from_name("Identity-H"), None);
        assert_eq!(LegacyEncoding::builtin_for("ABCDEF+Symbol"), LegacyEncoding::Symbol);
        assert_eq!(LegacyEncoding::builtin_for("ZapfDingbats"), LegacyEncoding::ZapfDingbats);
        assert_eq!(LegacyEncoding::builtin_for("Helvetica"), LegacyEncoding::Standard);
    }

    #[test]
    fn test_every_named_code_resolves() {
        for enc in [
            LegacyEncoding::Standard,
            LegacyEncoding::WinAnsi,
            LegacyEncoding::MacRoman,
            LegacyEncoding::Symbol,
            LegacyEncoding::ZapfDingbats,
        ] {
            for (code, name) in enc.entries() {
                assert!(enc.unicode(code).is_some(), "{:?} {} {}", enc, code, name);
            }
        }
    }
}
