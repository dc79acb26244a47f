//! Font loaders.
//!
//! Two ways to obtain a [`Font`]:
//!
//! - [`ProgramLoader`] reconciles a freshly parsed font program for embedding. It
//!   synthesizes character codes from the program's own tables.
//! - [`DictionaryLoader`] rebuilds a font from a font dictionary already stored in
//!   a document, trusting the codes the document uses.
//!
//! Both produce the same [`Font`] core, so the rest of the crate never needs to
//! know where a font came from.

use std::collections::{BTreeMap, HashMap};

use crate::config::FontConfig;
use crate::error::{Error, Result};
use crate::fonts::cmap::{self, predefined, CMap, CharCode};
use crate::fonts::encoding::LegacyEncoding;
use crate::fonts::font::{CompositeKind, EmbeddedProgram, Font, FontKind, FontParts, SimpleKind};
use crate::fonts::glyph_list;
use crate::fonts::parsers;
use crate::fonts::program::{CodeSpace, FontFlags, FontFormat, FontMetrics, FormatBundle, OutlineFlavor};
use crate::object::{Dict, Object, ObjectRef, ObjectStore};

/// Width assumed by composite fonts without `/DW`.
const DEFAULT_CID_WIDTH: f64 = 1000.0;

/// Largest CID range accepted in a `/W` entry.
const MAX_W_RANGE: u32 = 0xFFFF;

/// Strategy that produces a loaded font.
pub trait FontLoader {
    fn load(&self, config: &FontConfig) -> Result<Font>;
}

// ---- new embedded programs ----

/// Loads a font program that is about to be embedded.
#[derive(Debug, Clone)]
pub struct ProgramLoader {
    bundle: FormatBundle,
}

impl ProgramLoader {
    pub fn new(bundle: FormatBundle) -> Self {
        Self { bundle }
    }

    /// Parse `data`, detecting its format.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(parsers::parse_any(data)?))
    }

    /// Read and parse a font file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    pub fn bundle(&self) -> &FormatBundle {
        &self.bundle
    }

    fn kind(&self) -> FontKind {
        let b = &self.bundle;
        match (b.code_space, b.format, b.flavor) {
            (CodeSpace::Byte, FontFormat::OpenType, _) => FontKind::Simple(SimpleKind::TrueType),
            (CodeSpace::Byte, _, _) => FontKind::Simple(SimpleKind::Type1),
            (_, FontFormat::OpenType, OutlineFlavor::TrueType) => {
                FontKind::Composite(CompositeKind::TrueType)
            },
            _ => FontKind::Composite(CompositeKind::Cff),
        }
    }

    fn base_parts(&self) -> FontParts {
        let b = &self.bundle;
        let name = if b.font_name.is_empty() {
            "Unnamed".to_string()
        } else {
            b.font_name.clone()
        };
        let mut parts = FontParts::new(name, self.kind());
        parts.glyph_widths = b.glyph_widths.clone();
        parts.glyph_kernings = b.glyph_kernings.clone();
        parts.metrics = b.metrics.clone();
        parts
    }

    /// Unicode-keyed program: the code of each character is its glyph index.
    ///
    /// A glyph reached from several characters keeps the first (lowest) one; the
    /// others get free codes above the highest glyph code, which makes the
    /// code-to-CID table non-identity.
    fn load_unicode(&self) -> (FontParts, Option<BTreeMap<CharCode, u32>>) {
        let b = &self.bundle;
        let mut parts = self.base_parts();
        let mut collisions = Vec::new();

        for (&unicode, &gid) in &b.code_to_glyph {
            let Some(c) = char::from_u32(unicode) else {
                log::warn!("Skipping invalid scalar {:#X} in cmap of '{}'", unicode, parts.name);
                continue;
            };
            if gid > 0xFFFF {
                log::warn!("Skipping glyph {} of '{}': beyond two-byte codes", gid, parts.name);
                continue;
            }
            match parts.codes.insert(CharCode::from_value(gid, 2), c) {
                Ok(()) => {
                    parts.glyph_indexes.insert(c, gid);
                },
                Err(_) if gid == 0 => log::debug!("Dropping duplicate .notdef mapping for {:?}", c),
                Err(_) => collisions.push((c, gid)),
            }
        }

        if collisions.is_empty() {
            return (parts, None);
        }

        log::debug!(
            "'{}': {} characters share a glyph, assigning custom codes",
            parts.name,
            collisions.len()
        );
        let mut next = parts.codes.keys().map(CharCode::value).max().map_or(0, |max| max + 1);
        for (c, gid) in collisions {
            while next <= 0xFFFF && parts.codes.contains_key(&CharCode::from_value(next, 2)) {
                next += 1;
            }
            if next > 0xFFFF {
                log::warn!("'{}': code space exhausted, dropping {:?}", parts.name, c);
                continue;
            }
            if parts.codes.insert(CharCode::from_value(next, 2), c).is_ok() {
                log::trace!("{:?} -> <{:04X}> (glyph {})", c, next, gid);
                parts.glyph_indexes.insert(c, gid);
            }
            next += 1;
        }

        let encoding = parts
            .codes
            .iter()
            .filter_map(|(code, c)| parts.glyph_indexes.get(c).map(|&gid| (*code, gid)))
            .collect();
        (parts, Some(encoding))
    }

    /// Byte-coded program: one-byte codes, Unicode from glyph names.
    fn load_bytes(&self) -> FontParts {
        let b = &self.bundle;
        let mut parts = self.base_parts();

        let unreachable = b.code_to_glyph.keys().filter(|&&code| code > 0xFF).count();
        if unreachable > 0 {
            log::debug!("'{}': {} unencoded glyphs have no byte code", parts.name, unreachable);
        }

        let entries: Vec<(u32, u32, Option<char>)> = b
            .code_to_glyph
            .iter()
            .filter(|&(&code, _)| code <= 0xFF)
            .map(|(&code, &gid)| {
                let unicode = b
                    .glyph_names
                    .get(&gid)
                    .and_then(|name| glyph_list::name_to_unicode(name));
                (code, gid, unicode)
            })
            .collect();

        parts.symbolic = entries.iter().all(|(_, _, unicode)| unicode.is_none());
        if parts.symbolic {
            log::debug!("'{}': no glyph names resolve, using code values as Unicode", parts.name);
        }

        for (code, gid, unicode) in entries {
            let c = match unicode {
                Some(c) => c,
                None if parts.symbolic => match char::from_u32(code) {
                    Some(c) => c,
                    None => continue,
                },
                None => {
                    log::debug!("'{}': code {:#04X} has no Unicode value", parts.name, code);
                    continue;
                },
            };
            match parts.codes.insert(CharCode::from_value(code, 1), c) {
                Ok(()) => {
                    parts.glyph_indexes.insert(c, gid);
                },
                Err(_) => log::debug!("'{}': {:?} already encoded, dropping code {:#04X}", parts.name, c, code),
            }
        }
        parts
    }

    /// CID-keyed program: two-byte CID codes, Unicode from the collection's UCS2 table.
    fn load_cids(&self) -> FontParts {
        let b = &self.bundle;
        let mut parts = self.base_parts();
        let ucs2 = b
            .ros
            .as_ref()
            .and_then(|(registry, ordering, _)| predefined::ucs2_for(registry, ordering));

        let entries: Vec<(CharCode, u32, Option<char>)> = b
            .code_to_glyph
            .iter()
            .filter(|&(&cid, _)| cid <= 0xFFFF)
            .map(|(&cid, &gid)| {
                let code = CharCode::from_value(cid, 2);
                let unicode = ucs2.and_then(|m| m.get(&code)).and_then(char::from_u32);
                (code, gid, unicode)
            })
            .collect();

        let symbolic = entries.iter().all(|(_, _, unicode)| unicode.is_none());
        parts.symbolic = symbolic;
        for (code, gid, unicode) in entries {
            let identity = || if symbolic { char::from_u32(code.value()) } else { None };
            let Some(c) = unicode.or_else(identity) else {
                continue;
            };
            if parts.codes.insert(code, c).is_ok() {
                parts.glyph_indexes.insert(c, gid);
            }
        }
        parts
    }
}

impl FontLoader for ProgramLoader {
    fn load(&self, config: &FontConfig) -> Result<Font> {
        let b = &self.bundle;
        let (mut parts, cid_encoding) = match b.code_space {
            CodeSpace::Unicode => self.load_unicode(),
            CodeSpace::Byte => (self.load_bytes(), None),
            CodeSpace::Cid => (self.load_cids(), None),
        };

        // AFM carries no outlines; Type1 programs are referenced by name
        if matches!(b.format, FontFormat::OpenType | FontFormat::Cff) {
            parts.program = Some(EmbeddedProgram {
                format: b.format,
                flavor: b.flavor,
                data: b.data.clone(),
                cid_encoding,
                ros: b.ros.clone(),
            });
        }

        log::info!(
            "Loaded {:?} program '{}' as {:?} with {} codes",
            b.format,
            parts.name,
            parts.kind,
            parts.codes.len()
        );
        Font::from_parts(parts, config)
    }
}

// ---- persisted fonts ----

/// Loads a font from a stored font dictionary.
pub struct DictionaryLoader<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    dict: Dict,
}

impl<'a, S: ObjectStore + ?Sized> DictionaryLoader<'a, S> {
    pub fn new(store: &'a S, dict: Dict) -> Self {
        Self { store, dict }
    }

    /// Loader for the font dictionary at `reference`.
    pub fn from_reference(store: &'a S, reference: ObjectRef) -> Result<Self> {
        let object = store.resolve(reference).ok_or(Error::ObjectNotFound(reference))?;
        let dict = object.as_dict().cloned().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: object.type_name().to_string(),
        })?;
        Ok(Self::new(store, dict))
    }

    fn name_of(&self, dict: &Dict, key: &str) -> Option<String> {
        self.store.get(dict, key).and_then(|o| o.as_name().map(str::to_string))
    }

    fn number(&self, dict: &Dict, key: &str) -> Option<f64> {
        self.store.get(dict, key).and_then(|o| o.as_number())
    }

    fn array(&self, dict: &Dict, key: &str) -> Option<Vec<Object>> {
        match self.store.get(dict, key)? {
            Object::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| self.store.follow(item).ok())
                    .collect(),
            ),
            _ => None,
        }
    }

    fn text(&self, dict: &Dict, key: &str) -> Option<String> {
        self.store
            .get(dict, key)
            .and_then(|o| o.as_string().map(|s| String::from_utf8_lossy(s).into_owned()))
    }

    /// Parse the CMap stream under `key`. A broken stream is skipped unless
    /// parsing is strict.
    fn cmap_stream(&self, dict: &Dict, key: &str, config: &FontConfig) -> Result<Option<CMap>> {
        let Some(object) = self.store.get(dict, key) else {
            return Ok(None);
        };
        let Some(data) = object.stream_data() else {
            log::warn!("/{} is a {}, not a stream", key, object.type_name());
            return Ok(None);
        };
        let parsed = if config.strict_parsing {
            cmap::parser::parse_strict(data)
        } else {
            cmap::parser::parse(data)
        };
        match parsed {
            Ok(cmap) => Ok(Some(cmap)),
            Err(e) if !config.strict_parsing => {
                log::warn!("Ignoring unreadable /{} CMap: {}", key, e);
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// `/ToUnicode` as a code table, if present and non-empty.
    fn to_unicode(&self, dict: &Dict, config: &FontConfig) -> Result<Option<BTreeMap<CharCode, char>>> {
        let Some(cmap) = self.cmap_stream(dict, "ToUnicode", config)? else {
            return Ok(None);
        };
        let table: BTreeMap<CharCode, char> = cmap
            .iter()
            .filter_map(|(code, value)| char::from_u32(value).map(|c| (code, c)))
            .collect();
        log::debug!("ToUnicode CMap '{}': {} mappings", cmap.name, table.len());
        Ok((!table.is_empty()).then_some(table))
    }

    fn descriptor(&self, dict: &Dict) -> Result<(FontMetrics, FontFlags, Option<f64>)> {
        let Some(descriptor) = self.store.get_dict(dict, "FontDescriptor")? else {
            return Ok((FontMetrics::default(), FontFlags::empty(), None));
        };
        let num = |key: &str| self.number(&descriptor, key);

        let flags = FontFlags::from_bits_truncate(num("Flags").unwrap_or(0.0) as u32);
        let mut metrics = FontMetrics {
            ascent: num("Ascent").unwrap_or(0.0),
            descent: num("Descent").unwrap_or(0.0),
            cap_height: num("CapHeight").unwrap_or(0.0),
            x_height: num("XHeight").unwrap_or(0.0),
            italic_angle: num("ItalicAngle").unwrap_or(0.0),
            stem_v: num("StemV").unwrap_or(0.0),
            stem_h: num("StemH").unwrap_or(0.0),
            fixed_pitch: flags.contains(FontFlags::FIXED_PITCH),
            custom_encoding: flags.contains(FontFlags::SYMBOLIC),
            ..FontMetrics::default()
        };
        if let Some(bbox) = self.array(&descriptor, "FontBBox") {
            for (slot, value) in metrics.bbox.iter_mut().zip(bbox.iter()) {
                *slot = value.as_number().unwrap_or(0.0);
            }
        }
        metrics.weight = match num("FontWeight") {
            Some(w) if w >= 600.0 => Some("Bold".to_string()),
            _ if flags.contains(FontFlags::FORCE_BOLD) => Some("Bold".to_string()),
            Some(_) => Some("Regular".to_string()),
            None => None,
        };
        metrics.ascent_descent_from_bbox();

        Ok((metrics, flags, num("MissingWidth")))
    }

    fn codes_from_table(parts: &mut FontParts, table: impl IntoIterator<Item = (CharCode, char)>) {
        for (code, c) in table {
            if let Err(conflict) = parts.codes.insert(code, c) {
                log::debug!("'{}': skipping {} -> {:?}: {:?}", parts.name, code, c, conflict);
            }
        }
    }

    fn load_composite(&self, config: &FontConfig, base_font: String) -> Result<Font> {
        let descendant = self
            .array(&self.dict, "DescendantFonts")
            .and_then(|fonts| fonts.into_iter().next())
            .and_then(|font| font.as_dict().cloned())
            .ok_or_else(|| Error::parse(0, format!("Type0 font '{}' has no descendant font", base_font)))?;

        let subtype = self.name_of(&descendant, "Subtype").unwrap_or_default();
        let kind = FontKind::from_subtype(&subtype)
            .filter(|k| k.is_composite())
            .ok_or_else(|| Error::UnsupportedFormat(format!("descendant font subtype '{}'", subtype)))?;

        let encoding = match self.store.get(&self.dict, "Encoding") {
            Some(Object::Name(name)) => predefined::get(&name)
                .cloned()
                .ok_or_else(|| Error::UnsupportedFormat(format!("predefined CMap '{}'", name)))?,
            Some(_) => self
                .cmap_stream(&self.dict, "Encoding", config)?
                .unwrap_or_else(|| CMap::identity("Identity-H", 0)),
            None => CMap::identity("Identity-H", 0),
        };

        let mut parts = FontParts::new(base_font, kind);
        if let Some(table) = self.to_unicode(&self.dict, config)? {
            Self::codes_from_table(&mut parts, table);
        } else {
            let ucs2 = self.store.get_dict(&descendant, "CIDSystemInfo")?.and_then(|info| {
                let registry = self.text(&info, "Registry")?;
                let ordering = self.text(&info, "Ordering")?;
                predefined::ucs2_for(&registry, &ordering)
            });
            let composed = ucs2.map(|ucs2| encoding.compose(ucs2)).unwrap_or_default();
            if composed.is_empty() {
                log::debug!("'{}': no Unicode source, using CIDs as Unicode", parts.name);
                parts.symbolic = true;
                let identity = encoding
                    .iter()
                    .filter_map(|(code, cid)| char::from_u32(cid).map(|c| (code, c)));
                Self::codes_from_table(&mut parts, identity);
            } else {
                Self::codes_from_table(&mut parts, composed);
            }
        }

        for (code, c) in parts.codes.iter() {
            if let Some(cid) = encoding.get(code) {
                parts.glyph_indexes.insert(*c, cid);
            }
        }

        if let Some(w) = self.array(&descendant, "W") {
            read_cid_widths(&w, &mut parts.glyph_widths);
        }
        parts.default_width = Some(self.number(&descendant, "DW").unwrap_or(DEFAULT_CID_WIDTH));

        let (metrics, _, _) = self.descriptor(&descendant)?;
        parts.metrics = metrics;

        Font::from_parts(parts, config)
    }

    /// Code to glyph name table for a simple font's `/Encoding`.
    ///
    /// `None` when the font has no encoding and is flagged symbolic: its codes are
    /// taken as Unicode values.
    fn simple_encoding(&self, base_font: &str, flags: FontFlags) -> Option<Vec<(u8, Option<String>, LegacyEncoding)>> {
        let builtin = LegacyEncoding::builtin_for(base_font);
        let (base, differences) = match self.store.get(&self.dict, "Encoding") {
            Some(Object::Name(name)) => (LegacyEncoding::from_name(&name).unwrap_or_else(|| {
                log::warn!("Unknown encoding /{}, using built-in encoding", name);
                builtin
            }), None),
            Some(Object::Dictionary(dict)) => {
                let base = self
                    .name_of(&dict, "BaseEncoding")
                    .and_then(|name| LegacyEncoding::from_name(&name))
                    .unwrap_or(builtin);
                (base, self.array(&dict, "Differences"))
            },
            Some(other) => {
                log::warn!("Ignoring /Encoding of type {}", other.type_name());
                (builtin, None)
            },
            None if flags.contains(FontFlags::SYMBOLIC) && builtin == LegacyEncoding::Standard => {
                return None;
            },
            None => (builtin, None),
        };

        let mut table: Vec<(u8, Option<String>, LegacyEncoding)> =
            (0u8..=255).map(|code| (code, None, base)).collect();

        if let Some(differences) = differences {
            let mut code: Option<usize> = None;
            for item in differences {
                match item {
                    Object::Integer(n) => code = usize::try_from(n).ok(),
                    Object::Name(name) => {
                        match code {
                            Some(c) if c < 256 => {
                                log::trace!("/Differences: {} -> /{}", c, name);
                                table[c].1 = Some(name);
                            },
                            Some(c) => log::warn!("/Differences code {} exceeds one byte", c),
                            None => log::warn!("/Differences name /{} without a code", name),
                        }
                        code = code.map(|c| c + 1);
                    },
                    other => log::warn!("Unexpected {} in /Differences", other.type_name()),
                }
            }
        }
        Some(table)
    }

    fn load_simple(&self, config: &FontConfig, base_font: String, kind: FontKind) -> Result<Font> {
        let (metrics, flags, missing_width) = self.descriptor(&self.dict)?;
        let mut parts = FontParts::new(base_font, kind);
        parts.metrics = metrics;
        parts.default_width = missing_width;

        if let Some(table) = self.to_unicode(&self.dict, config)? {
            Self::codes_from_table(&mut parts, table);
        } else {
            match self.simple_encoding(&parts.name, flags) {
                Some(table) => {
                    let resolved: Vec<_> = table
                        .into_iter()
                        .filter_map(|(code, difference, base)| {
                            let c = match difference {
                                Some(name) => glyph_list::name_to_unicode(&name),
                                None => base.unicode(code),
                            }?;
                            Some((CharCode::from_value(u32::from(code), 1), c))
                        })
                        .collect();
                    Self::codes_from_table(&mut parts, resolved);
                },
                None => parts.symbolic = true,
            }
        }

        if parts.codes.is_empty() {
            log::debug!("'{}': no code resolves to Unicode, using codes as Unicode", parts.name);
            parts.symbolic = true;
            let identity = (0u8..=255).map(|code| (CharCode::from_value(u32::from(code), 1), char::from(code)));
            Self::codes_from_table(&mut parts, identity);
        }

        for (code, c) in parts.codes.iter() {
            parts.glyph_indexes.insert(*c, code.value());
        }

        // Type3 widths are in glyph space
        let scale = if kind == FontKind::Simple(SimpleKind::Type3) {
            self.array(&self.dict, "FontMatrix")
                .and_then(|m| m.first().and_then(Object::as_number))
                .map_or(1.0, |a| a * 1000.0)
        } else {
            1.0
        };
        let first_char = self.number(&self.dict, "FirstChar").unwrap_or(0.0);
        match (self.array(&self.dict, "Widths"), code_of(first_char)) {
            (Some(widths), Some(first_char)) => {
                for (i, w) in widths.iter().enumerate() {
                    let Some(code) = u32::try_from(i).ok().and_then(|i| first_char.checked_add(i)) else {
                        log::warn!("'{}': /Widths runs past the code space", parts.name);
                        break;
                    };
                    if let Some(w) = w.as_number() {
                        parts.glyph_widths.insert(code, w * scale);
                    }
                }
            },
            (Some(_), None) => log::warn!("'{}': ignoring /Widths with /FirstChar {}", parts.name, first_char),
            (None, _) => {},
        }
        parts.default_width = parts.default_width.map(|w| w * scale);

        Font::from_parts(parts, config)
    }
}

impl<S: ObjectStore + ?Sized> FontLoader for DictionaryLoader<'_, S> {
    fn load(&self, config: &FontConfig) -> Result<Font> {
        let base_font = self
            .name_of(&self.dict, "BaseFont")
            .unwrap_or_else(|| "Unknown".to_string());
        let subtype = self.name_of(&self.dict, "Subtype").unwrap_or_default();
        log::debug!("Loading /{} font '{}'", subtype, base_font);

        if subtype == "Type0" {
            return self.load_composite(config, base_font);
        }
        match FontKind::from_subtype(&subtype) {
            Some(kind @ FontKind::Simple(_)) => self.load_simple(config, base_font, kind),
            _ => Err(Error::UnsupportedFormat(format!("font subtype '{}'", subtype))),
        }
    }
}

/// A PDF number as a character code or CID, if it is a non-negative integer in range.
fn code_of(n: f64) -> Option<u32> {
    (n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n)).then_some(n as u32)
}

/// Read a `/W` array: `c [w1 w2 ...]` and `c_first c_last w` entries.
fn read_cid_widths(w: &[Object], widths: &mut HashMap<u32, f64>) {
    let mut i = 0;
    while i < w.len() {
        let Some(first) = w[i].as_integer().and_then(|n| u32::try_from(n).ok()) else {
            log::warn!("Malformed /W entry at index {}", i);
            return;
        };
        match w.get(i + 1) {
            Some(Object::Array(list)) => {
                for (k, width) in list.iter().enumerate() {
                    let Some(cid) = u32::try_from(k).ok().and_then(|k| first.checked_add(k)) else {
                        log::warn!("/W list at index {} runs past the CID space", i);
                        return;
                    };
                    if let Some(width) = width.as_number() {
                        widths.insert(cid, width);
                    }
                }
                i += 2;
            },
            Some(Object::Integer(last)) => {
                let (Ok(last), Some(width)) = (u32::try_from(*last), w.get(i + 2).and_then(Object::as_number)) else {
                    log::warn!("Malformed /W range at index {}", i);
                    return;
                };
                if last < first || last - first > MAX_W_RANGE {
                    log::warn!("Ignoring /W range {}..{}", first, last);
                } else {
                    for cid in first..=last {
                        widths.insert(cid, width);
                    }
                }
                i += 3;
            },
            _ => {
                log::warn!("Malformed /W entry at index {}", i);
                return;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackPolicy;
    use crate::fonts::cmap::builder;
    use crate::fonts::parsers::truetype::tests::{cmap as cmap_table, format4, minimal_font};
    use crate::object::MemoryStore;

    fn dict(entries: Vec<(&str, Object)>) -> Dict {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn names(items: &[&str]) -> Vec<Object> {
        items.iter().map(|n| Object::name(*n)).collect()
    }

    #[test]
    fn test_unicode_program_uses_glyph_codes() {
        let sub = format4(&[(0x41, 0x42, 0u16.wrapping_sub(0x40), vec![])]);
        let data = minimal_font(cmap_table(3, 1, sub), &[0, 500, 600], 3);
        let font = ProgramLoader::from_bytes(&data).unwrap().load(&FontConfig::new()).unwrap();

        assert_eq!(font.kind(), FontKind::Composite(CompositeKind::TrueType));
        assert_eq!(font.encode("AB").unwrap(), vec![0, 1, 0, 2]);
        assert_eq!(font.decode(&[0, 2, 0, 1]).unwrap(), "BA");
        assert_eq!(font.width("AB", 10.0), 11.0);
        assert!(font.program().unwrap().cid_encoding.is_none());
        assert!(!font.is_symbolic());
    }

    #[test]
    fn test_shared_glyph_gets_custom_code() {
        // 'a' reuses glyph 1, already taken by 'A'
        let sub = format4(&[(0x41, 0x42, 0u16.wrapping_sub(0x40), vec![]), (0x61, 0x61, 0, vec![1])]);
        let data = minimal_font(cmap_table(3, 1, sub), &[0, 500, 600], 3);
        let font = ProgramLoader::from_bytes(&data).unwrap().load(&FontConfig::new()).unwrap();

        assert_eq!(font.encode("a").unwrap(), vec![0, 3]);
        assert_eq!(font.decode(&[0, 3, 0, 1]).unwrap(), "aA");
        assert_eq!(font.width_of_char('a', 1000.0), 500.0);

        let encoding = font.program().unwrap().cid_encoding.as_ref().unwrap();
        assert_eq!(encoding.get(&CharCode::from_value(3, 2)), Some(&1));
        assert_eq!(encoding.get(&CharCode::from_value(2, 2)), Some(&2));
    }

    fn byte_bundle(names: &[(u32, &str)]) -> FormatBundle {
        let mut bundle = FormatBundle::new(FontFormat::Afm, CodeSpace::Byte);
        bundle.font_name = "Test-Roman".to_string();
        for &(code, name) in names {
            bundle.code_to_glyph.insert(code, code);
            bundle.glyph_widths.insert(code, 250.0);
            if !name.is_empty() {
                bundle.glyph_names.insert(code, name.to_string());
            }
        }
        bundle
    }

    #[test]
    fn test_byte_program_resolves_names() {
        let bundle = byte_bundle(&[(0x20, "space"), (0x41, "A"), (0xC1, "Aacute"), (0x61, "A")]);
        let font = ProgramLoader::new(bundle).load(&FontConfig::new()).unwrap();

        assert_eq!(font.kind(), FontKind::Simple(SimpleKind::Type1));
        assert!(!font.is_symbolic());
        assert_eq!(font.encode("A Á").unwrap(), vec![0x41, 0x20, 0xC1]);
        // Second code for 'A' is dropped
        assert_eq!(font.codes().len(), 3);
        assert!(font.program().is_none());
    }

    #[test]
    fn test_unencoded_glyphs_are_unreachable() {
        let bundle = byte_bundle(&[(0x41, "A"), (0x7FFF, "Euro"), (0x8000, "fi")]);
        let font = ProgramLoader::new(bundle).load(&FontConfig::new()).unwrap();
        assert_eq!(font.code_points().into_iter().collect::<String>(), "A");
        assert!(font.glyph_index('€').is_none());
        assert_eq!(font.encode("A€").unwrap(), b"AA");
    }

    #[test]
    fn test_byte_program_without_names_is_symbolic() {
        let bundle = byte_bundle(&[(0x41, ""), (0x42, "")]);
        let font = ProgramLoader::new(bundle).load(&FontConfig::new()).unwrap();
        assert!(font.is_symbolic());
        assert_eq!(font.decode(b"AB").unwrap(), "AB");
        assert_eq!(font.default_code(), Some('A'));
    }

    #[test]
    fn test_cid_program_uses_collection_unicode() {
        let mut bundle = FormatBundle::new(FontFormat::Cff, CodeSpace::Cid);
        bundle.ros = Some(("Adobe".to_string(), "Japan1".to_string(), 6));
        bundle.code_to_glyph.insert(1, 1);
        bundle.code_to_glyph.insert(34, 2);
        bundle.code_to_glyph.insert(843, 3);
        let font = ProgramLoader::new(bundle).load(&FontConfig::new()).unwrap();

        assert_eq!(font.kind(), FontKind::Composite(CompositeKind::Cff));
        assert_eq!(font.decode(&[0, 34, 0x03, 0x4B, 0, 1]).unwrap(), "Aあ ");
        assert_eq!(font.glyph_index('あ'), Some(3));
        assert_eq!(font.program().unwrap().ros.as_ref().unwrap().1, "Japan1");
    }

    #[test]
    fn test_simple_dictionary_with_differences() {
        let mut store = MemoryStore::new();
        let descriptor = store.register(Object::Dictionary(dict(vec![
            ("Flags", Object::Integer(32)),
            ("Ascent", Object::Integer(718)),
            ("Descent", Object::Integer(-207)),
            ("MissingWidth", Object::Integer(333)),
        ])));
        let mut differences = vec![Object::Integer(0x61)];
        differences.extend(names(&["alpha", "beta"]));
        let font_dict = dict(vec![
            ("Subtype", Object::name("Type1")),
            ("BaseFont", Object::name("Helvetica")),
            (
                "Encoding",
                Object::Dictionary(dict(vec![
                    ("BaseEncoding", Object::name("WinAnsiEncoding")),
                    ("Differences", Object::Array(differences)),
                ])),
            ),
            ("FirstChar", Object::Integer(0x41)),
            ("Widths", Object::Array(vec![Object::Integer(667), Object::Integer(611)])),
            ("FontDescriptor", Object::Reference(descriptor)),
        ]);

        let font = DictionaryLoader::new(&store, font_dict).load(&FontConfig::new()).unwrap();
        assert_eq!(font.kind(), FontKind::Simple(SimpleKind::Type1));
        assert_eq!(font.decode(&[0x41, 0x61, 0x62, 0x80]).unwrap(), "Aαβ€");
        assert_eq!(font.width_of_char('A', 1000.0), 667.0);
        assert_eq!(font.width_of_char('Z', 1000.0), 333.0);
        assert_eq!(font.ascent(1000.0), 718.0);
        assert!(!font.is_symbolic());
    }

    #[test]
    fn test_symbolic_simple_font_without_encoding() {
        let mut store = MemoryStore::new();
        let descriptor = store.register(Object::Dictionary(dict(vec![("Flags", Object::Integer(4))])));
        let font_dict = dict(vec![
            ("Subtype", Object::name("TrueType")),
            ("BaseFont", Object::name("Wingdings")),
            ("FontDescriptor", Object::Reference(descriptor)),
        ]);
        let font = DictionaryLoader::new(&store, font_dict).load(&FontConfig::new()).unwrap();
        assert!(font.is_symbolic());
        assert_eq!(font.decode(&[0x41]).unwrap(), "A");
    }

    #[test]
    fn test_builtin_symbol_encoding() {
        let store = MemoryStore::new();
        let font_dict = dict(vec![
            ("Subtype", Object::name("Type1")),
            ("BaseFont", Object::name("Symbol")),
        ]);
        let font = DictionaryLoader::new(&store, font_dict).load(&FontConfig::new()).unwrap();
        assert_eq!(font.decode(&[0x61]).unwrap(), "α");
    }

    fn type0(store: &mut MemoryStore, encoding: Object, to_unicode: Option<String>) -> Dict {
        let descendant = store.register(Object::Dictionary(dict(vec![
            ("Subtype", Object::name("CIDFontType0")),
            (
                "CIDSystemInfo",
                Object::Dictionary(dict(vec![
                    ("Registry", Object::String(b"Adobe".to_vec())),
                    ("Ordering", Object::String(b"Japan1".to_vec())),
                    ("Supplement", Object::Integer(6)),
                ])),
            ),
            (
                "W",
                Object::Array(vec![
                    Object::Integer(34),
                    Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
                    Object::Integer(842),
                    Object::Integer(924),
                    Object::Integer(900),
                ]),
            ),
            ("DW", Object::Integer(800)),
        ])));
        let mut entries = vec![
            ("Subtype", Object::name("Type0")),
            ("BaseFont", Object::name("KozMinPr6N-Regular")),
            ("Encoding", encoding),
            ("DescendantFonts", Object::Array(vec![Object::Reference(descendant)])),
        ];
        if let Some(text) = to_unicode {
            let stream = store.register(Object::stream(Dict::new(), text.into_bytes()));
            entries.push(("ToUnicode", Object::Reference(stream)));
        }
        dict(entries)
    }

    #[test]
    fn test_composite_composes_collection_unicode() {
        let mut store = MemoryStore::new();
        let font_dict = type0(&mut store, Object::name("Identity-H"), None);
        let font = DictionaryLoader::new(&store, font_dict).load(&FontConfig::new()).unwrap();

        assert_eq!(font.kind(), FontKind::Composite(CompositeKind::Cff));
        assert_eq!(font.decode(&[0, 34, 0x03, 0x4B]).unwrap(), "Aあ");
        assert_eq!(font.width_of_char('A', 1000.0), 500.0);
        assert_eq!(font.width_of_char('B', 1000.0), 600.0);
        assert_eq!(font.width_of_char('あ', 1000.0), 900.0);
        assert_eq!(font.width_of_char('C', 1000.0), 800.0);
        assert!(!font.is_symbolic());
    }

    #[test]
    fn test_composite_to_unicode_wins() {
        let mut store = MemoryStore::new();
        let mut table = BTreeMap::new();
        table.insert(CharCode::from_value(34, 2), 'Z');
        let text = builder::build_to_unicode("Custom", &table);
        let font_dict = type0(&mut store, Object::name("Identity-H"), Some(text));
        let font = DictionaryLoader::new(&store, font_dict).load(&FontConfig::new()).unwrap();
        assert_eq!(font.decode(&[0, 34]).unwrap(), "Z");
        assert_eq!(font.glyph_index('Z'), Some(34));
        assert_eq!(font.code_points().len(), 1);
    }

    #[test]
    fn test_composite_with_embedded_encoding_cmap() {
        let mut store = MemoryStore::new();
        let mut table = BTreeMap::new();
        table.insert(CharCode::from_value(0x41, 1), 34u32);
        let encoding = store.register(Object::stream(Dict::new(), builder::build_cid("Custom-H", &table).into_bytes()));
        let font_dict = type0(&mut store, Object::Reference(encoding), None);
        let font = DictionaryLoader::new(&store, font_dict)
            .load(&FontConfig::new().with_fallback(FallbackPolicy::Exclusion))
            .unwrap();
        assert_eq!(font.decode(b"AB").unwrap(), "A");
        assert_eq!(font.encode("A").unwrap(), b"A");
    }

    #[test]
    fn test_unknown_predefined_cmap() {
        let mut store = MemoryStore::new();
        let font_dict = type0(&mut store, Object::name("UniJIS-UCS2-H"), None);
        let result = DictionaryLoader::new(&store, font_dict).load(&FontConfig::new());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_from_reference_requires_dictionary() {
        let mut store = MemoryStore::new();
        let r = store.register(Object::Integer(1));
        assert!(matches!(
            DictionaryLoader::from_reference(&store, r),
            Err(Error::InvalidObjectType { .. })
        ));
        assert!(matches!(
            DictionaryLoader::from_reference(&store, ObjectRef::new(40, 0)),
            Err(Error::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_read_cid_widths() {
        let w = vec![
            Object::Integer(1),
            Object::Array(vec![Object::Integer(250), Object::Real(312.5)]),
            Object::Integer(10),
            Object::Integer(12),
            Object::Integer(700),
        ];
        let mut widths = HashMap::new();
        read_cid_widths(&w, &mut widths);
        assert_eq!(widths.get(&2), Some(&312.5));
        assert_eq!(widths.get(&12), Some(&700.0));
        assert_eq!(widths.len(), 5);
    }

    #[test]
    fn test_read_cid_widths_stops_at_cid_limit() {
        let w = vec![
            Object::Integer(i64::from(u32::MAX)),
            Object::Array(vec![Object::Integer(500), Object::Integer(600)]),
            Object::Integer(1),
            Object::Array(vec![Object::Integer(700)]),
        ];
        let mut widths = HashMap::new();
        read_cid_widths(&w, &mut widths);
        assert_eq!(widths.get(&u32::MAX), Some(&500.0));
        assert_eq!(widths.len(), 1);
    }

    #[test]
    fn test_widths_with_out_of_range_first_char() {
        let store = MemoryStore::new();
        for first_char in [Object::Integer(i64::from(u32::MAX)), Object::Integer(-5), Object::Real(1e12)] {
            let font_dict = dict(vec![
                ("Subtype", Object::name("Type1")),
                ("BaseFont", Object::name("Helvetica")),
                ("FirstChar", first_char),
                ("Widths", Object::Array(vec![Object::Integer(500), Object::Integer(500)])),
            ]);
            let font = DictionaryLoader::new(&store, font_dict).load(&FontConfig::new()).unwrap();
            assert_eq!(font.decode(b"A").unwrap(), "A");
            assert!(font.glyph_width(0x41).is_none());
        }
    }
}
