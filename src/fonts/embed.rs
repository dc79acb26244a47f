//! Font dictionary synthesis.
//!
//! Writes the objects a document needs to use a loaded font: the FontDescriptor
//! with the embedded program, the CIDFont and Type0 dictionaries (or a simple font
//! dictionary), the encoding and the ToUnicode CMap. Objects are registered in an
//! [`ObjectStore`]; the returned reference is the top-level font dictionary.
//!
//! Only the characters encoded so far are described when there are any; a font
//! nothing has been encoded with is described completely.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::fonts::cmap::{builder, CharCode};
use crate::fonts::encoding::LegacyEncoding;
use crate::fonts::font::{CompositeKind, Font, FontKind, SimpleKind};
use crate::fonts::glyph_list;
use crate::fonts::program::{FontFormat, OutlineFlavor};
use crate::object::{Dict, Object, ObjectRef, ObjectStore};

/// Shortest run of equal widths written as a `c_first c_last w` range.
const MIN_UNIFORM_RUN: usize = 3;

/// Name of the ToUnicode CMaps we write.
const TO_UNICODE_NAME: &str = "Adobe-Identity-UCS";

fn number(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Object::Integer(value as i64)
    } else {
        Object::Real((value * 1000.0).round() / 1000.0)
    }
}

fn entry(dict: &mut Dict, key: &str, value: Object) {
    dict.insert(key.to_string(), value);
}

/// Compact CID widths into a `/W` array.
///
/// Consecutive CIDs form one entry. Within it, three or more equal widths in a
/// row are written as a range and everything else as lists.
pub fn width_runs(widths: &BTreeMap<u32, f64>) -> Vec<Object> {
    let entries: Vec<(u32, f64)> = widths.iter().map(|(&cid, &w)| (cid, w)).collect();
    let mut out = Vec::new();

    let mut start = 0;
    while start < entries.len() {
        // Consecutive block
        let mut end = start;
        while end + 1 < entries.len() && entries[end + 1].0 == entries[end].0 + 1 {
            end += 1;
        }

        let mut pending: Vec<Object> = Vec::new();
        let mut pending_start = entries[start].0;
        let mut i = start;
        while i <= end {
            let mut j = i;
            while j < end && entries[j + 1].1 == entries[i].1 {
                j += 1;
            }
            if j - i + 1 >= MIN_UNIFORM_RUN {
                if !pending.is_empty() {
                    out.push(Object::Integer(i64::from(pending_start)));
                    out.push(Object::Array(std::mem::take(&mut pending)));
                }
                out.push(Object::Integer(i64::from(entries[i].0)));
                out.push(Object::Integer(i64::from(entries[j].0)));
                out.push(number(entries[i].1));
            } else {
                for &(cid, w) in &entries[i..=j] {
                    if pending.is_empty() {
                        pending_start = cid;
                    }
                    pending.push(number(w));
                }
            }
            i = j + 1;
        }
        if !pending.is_empty() {
            out.push(Object::Integer(i64::from(pending_start)));
            out.push(Object::Array(pending));
        }
        start = end + 1;
    }
    out
}

/// Codes to describe: those used so far, or every code.
fn selected_codes(font: &Font) -> BTreeMap<CharCode, char> {
    let used = font.used_code_points();
    font.codes()
        .iter()
        .filter(|(_, c)| used.is_empty() || used.contains(c))
        .map(|(&code, &c)| (code, c))
        .collect()
}

/// Register the font program stream, if the font carries one.
fn register_program<S: ObjectStore + ?Sized>(
    font: &Font,
    composite: bool,
    store: &mut S,
) -> Option<(&'static str, ObjectRef)> {
    let program = font.program()?;
    if program.data.is_empty() {
        return None;
    }
    let mut dict = Dict::new();
    let key = match (program.format, program.flavor) {
        (FontFormat::OpenType, OutlineFlavor::TrueType) => {
            entry(&mut dict, "Length1", Object::Integer(program.data.len() as i64));
            "FontFile2"
        },
        (FontFormat::OpenType, _) => {
            entry(&mut dict, "Subtype", Object::name("OpenType"));
            "FontFile3"
        },
        (FontFormat::Cff, _) => {
            let subtype = if composite { "CIDFontType0C" } else { "Type1C" };
            entry(&mut dict, "Subtype", Object::name(subtype));
            "FontFile3"
        },
        _ => return None,
    };
    let reference = store.register(Object::stream(dict, program.data.clone()));
    log::debug!("Embedded {} bytes of '{}' as /{}", program.data.len(), font.name(), key);
    Some((key, reference))
}

fn register_descriptor<S: ObjectStore + ?Sized>(font: &Font, composite: bool, store: &mut S) -> ObjectRef {
    let metrics = font.metrics();
    let mut dict = Dict::new();
    entry(&mut dict, "Type", Object::name("FontDescriptor"));
    entry(&mut dict, "FontName", Object::name(font.name()));
    entry(&mut dict, "Flags", Object::Integer(i64::from(metrics.flags(font.is_symbolic()).bits())));
    entry(&mut dict, "FontBBox", Object::Array(metrics.bbox.iter().map(|&v| number(v)).collect()));
    entry(&mut dict, "ItalicAngle", number(metrics.italic_angle));
    entry(&mut dict, "Ascent", number(metrics.ascent));
    entry(&mut dict, "Descent", number(metrics.descent));
    entry(&mut dict, "CapHeight", number(metrics.cap_height));
    entry(&mut dict, "XHeight", number(metrics.x_height));
    entry(&mut dict, "StemV", number(metrics.stem_v_or_estimate()));
    if let Some(missing) = font.default_width().filter(|_| !composite) {
        entry(&mut dict, "MissingWidth", number(missing));
    }
    if let Some((key, program)) = register_program(font, composite, store) {
        entry(&mut dict, key, Object::Reference(program));
    }
    store.register(Object::Dictionary(dict))
}

fn register_to_unicode<S: ObjectStore + ?Sized>(codes: &BTreeMap<CharCode, char>, store: &mut S) -> ObjectRef {
    let text = builder::build_to_unicode(TO_UNICODE_NAME, codes);
    store.register(Object::stream(Dict::new(), text.into_bytes()))
}

fn system_info(registry: &str, ordering: &str, supplement: i32) -> Object {
    let mut dict = Dict::new();
    entry(&mut dict, "Registry", Object::String(registry.as_bytes().to_vec()));
    entry(&mut dict, "Ordering", Object::String(ordering.as_bytes().to_vec()));
    entry(&mut dict, "Supplement", Object::Integer(i64::from(supplement)));
    Object::Dictionary(dict)
}

/// Write the objects for `font` and return the font dictionary reference.
pub fn embed<S: ObjectStore + ?Sized>(font: &Font, store: &mut S) -> Result<ObjectRef> {
    match font.kind() {
        FontKind::Composite(kind) => Ok(embed_composite(font, kind, store)),
        FontKind::Simple(SimpleKind::Type3) => Err(Error::UnsupportedFormat(format!(
            "cannot synthesize a Type3 font dictionary for '{}'",
            font.name()
        ))),
        FontKind::Simple(kind) => Ok(embed_simple(font, kind, store)),
    }
}

fn embed_composite<S: ObjectStore + ?Sized>(font: &Font, kind: CompositeKind, store: &mut S) -> ObjectRef {
    let codes = selected_codes(font);
    let cid_encoding = font.program().and_then(|p| p.cid_encoding.as_ref());
    let cid_of = |code: &CharCode| {
        cid_encoding
            .and_then(|encoding| encoding.get(code).copied())
            .unwrap_or_else(|| code.value())
    };

    let widths: BTreeMap<u32, f64> = codes
        .iter()
        .filter_map(|(code, &c)| {
            let width = font.glyph_index(c).and_then(|g| font.glyph_width(g))?;
            Some((cid_of(code), width))
        })
        .collect();

    let descriptor = register_descriptor(font, true, store);

    let mut cid_font = Dict::new();
    entry(&mut cid_font, "Type", Object::name("Font"));
    entry(&mut cid_font, "Subtype", Object::name(font.kind().cid_font_subtype().unwrap_or("CIDFontType2")));
    entry(&mut cid_font, "BaseFont", Object::name(font.name()));
    let info = match font.program().and_then(|p| p.ros.as_ref()) {
        Some((registry, ordering, supplement)) => system_info(registry, ordering, *supplement),
        None => system_info("Adobe", "Identity", 0),
    };
    entry(&mut cid_font, "CIDSystemInfo", info);
    entry(&mut cid_font, "FontDescriptor", Object::Reference(descriptor));
    entry(&mut cid_font, "DW", number(font.default_width().unwrap_or(1000.0)));
    entry(&mut cid_font, "W", Object::Array(width_runs(&widths)));
    if kind == CompositeKind::TrueType {
        entry(&mut cid_font, "CIDToGIDMap", Object::name("Identity"));
    }
    let cid_font = store.register(Object::Dictionary(cid_font));

    let encoding = match cid_encoding {
        Some(_) => {
            let table: BTreeMap<CharCode, u32> = codes.keys().map(|code| (*code, cid_of(code))).collect();
            let name = format!("{}-Custom-H", font.name());
            let mut dict = Dict::new();
            entry(&mut dict, "Type", Object::name("CMap"));
            entry(&mut dict, "CMapName", Object::name(name.clone()));
            entry(&mut dict, "CIDSystemInfo", system_info("Adobe", "Identity", 0));
            log::debug!("'{}' needs a custom encoding CMap ({} codes)", font.name(), table.len());
            let text = builder::build_cid(&name, &table);
            Object::Reference(store.register(Object::stream(dict, text.into_bytes())))
        },
        None => Object::name("Identity-H"),
    };

    let to_unicode = register_to_unicode(&codes, store);

    let mut type0 = Dict::new();
    entry(&mut type0, "Type", Object::name("Font"));
    entry(&mut type0, "Subtype", Object::name("Type0"));
    entry(&mut type0, "BaseFont", Object::name(font.name()));
    entry(&mut type0, "Encoding", encoding);
    entry(&mut type0, "DescendantFonts", Object::Array(vec![Object::Reference(cid_font)]));
    entry(&mut type0, "ToUnicode", Object::Reference(to_unicode));

    log::info!("Synthesized Type0 font '{}' with {} codes", font.name(), codes.len());
    store.register(Object::Dictionary(type0))
}

/// `/Differences` against StandardEncoding for the given codes.
fn differences(codes: &BTreeMap<CharCode, char>) -> Vec<Object> {
    let mut out = Vec::new();
    let mut last: Option<u32> = None;
    for (code, &c) in codes {
        let name = glyph_list::glyph_name_for(c);
        let value = code.value();
        if u8::try_from(value).ok().and_then(|v| LegacyEncoding::Standard.glyph_name(v)) == Some(name.as_str()) {
            continue;
        }
        if last.map_or(true, |l| l + 1 != value) {
            out.push(Object::Integer(i64::from(value)));
        }
        out.push(Object::name(name));
        last = Some(value);
    }
    out
}

fn embed_simple<S: ObjectStore + ?Sized>(font: &Font, kind: SimpleKind, store: &mut S) -> ObjectRef {
    let codes: BTreeMap<CharCode, char> = selected_codes(font)
        .into_iter()
        .filter(|(code, _)| code.len() == 1)
        .collect();
    let first = codes.keys().next().map_or(0, CharCode::value);
    let last = codes.keys().next_back().map_or(0, CharCode::value);

    let by_code: BTreeMap<u32, char> = codes.iter().map(|(code, &c)| (code.value(), c)).collect();
    let missing = font.default_width().unwrap_or(0.0);
    let widths: Vec<Object> = (first..=last)
        .map(|code| {
            let width = by_code
                .get(&code)
                .and_then(|&c| font.glyph_index(c))
                .and_then(|g| font.glyph_width(g))
                .unwrap_or(missing);
            number(width)
        })
        .collect();

    let descriptor = register_descriptor(font, false, store);
    let to_unicode = register_to_unicode(&codes, store);

    let mut dict = Dict::new();
    entry(&mut dict, "Type", Object::name("Font"));
    entry(&mut dict, "Subtype", Object::name(FontKind::Simple(kind).subtype()));
    entry(&mut dict, "BaseFont", Object::name(font.name()));
    entry(&mut dict, "FirstChar", Object::Integer(i64::from(first)));
    entry(&mut dict, "LastChar", Object::Integer(i64::from(last)));
    entry(&mut dict, "Widths", Object::Array(widths));
    entry(&mut dict, "FontDescriptor", Object::Reference(descriptor));
    if !font.is_symbolic() {
        let differences = differences(&codes);
        if !differences.is_empty() {
            let mut encoding = Dict::new();
            entry(&mut encoding, "Type", Object::name("Encoding"));
            entry(&mut encoding, "Differences", Object::Array(differences));
            entry(&mut dict, "Encoding", Object::Dictionary(encoding));
        }
    }
    entry(&mut dict, "ToUnicode", Object::Reference(to_unicode));

    log::info!("Synthesized /{} font '{}' for codes {}..={}", FontKind::Simple(kind).subtype(), font.name(), first, last);
    store.register(Object::Dictionary(dict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontConfig;
    use crate::fonts::cmap::parser;
    use crate::fonts::loader::{FontLoader, ProgramLoader};
    use crate::fonts::parsers::truetype::tests::{cmap as cmap_table, format4, minimal_font};
    use crate::fonts::program::{CodeSpace, FormatBundle};
    use crate::object::MemoryStore;

    fn lookup(store: &MemoryStore, dict: &Dict, key: &str) -> Object {
        store.get(dict, key).unwrap()
    }

    fn truetype_font(shared_glyph: bool) -> Font {
        let mut segments = vec![(0x41, 0x43, 0u16.wrapping_sub(0x40), vec![])];
        if shared_glyph {
            segments.push((0x61, 0x61, 0, vec![1]));
        }
        let data = minimal_font(cmap_table(3, 1, format4(&segments)), &[0, 500, 500, 500], 4);
        ProgramLoader::from_bytes(&data).unwrap().load(&FontConfig::new()).unwrap()
    }

    #[test]
    fn test_width_runs() {
        let widths: BTreeMap<u32, f64> =
            [(1, 500.0), (2, 500.0), (3, 500.0), (4, 600.0), (6, 250.0), (7, 260.5)].into_iter().collect();
        assert_eq!(
            width_runs(&widths),
            vec![
                Object::Integer(1),
                Object::Integer(3),
                Object::Integer(500),
                Object::Integer(4),
                Object::Array(vec![Object::Integer(600)]),
                Object::Integer(6),
                Object::Array(vec![Object::Integer(250), Object::Real(260.5)]),
            ]
        );
    }

    #[test]
    fn test_width_runs_list_before_range() {
        let widths: BTreeMap<u32, f64> =
            [(10, 300.0), (11, 700.0), (12, 700.0), (13, 700.0)].into_iter().collect();
        assert_eq!(
            width_runs(&widths),
            vec![
                Object::Integer(10),
                Object::Array(vec![Object::Integer(300)]),
                Object::Integer(11),
                Object::Integer(13),
                Object::Integer(700),
            ]
        );
    }

    #[test]
    fn test_composite_truetype_objects() {
        let font = truetype_font(false);
        let mut store = MemoryStore::new();
        let reference = embed(&font, &mut store).unwrap();

        let type0 = store.resolve(reference).unwrap().as_dict().cloned().unwrap();
        assert_eq!(type0.get("Subtype"), Some(&Object::name("Type0")));
        assert_eq!(type0.get("Encoding"), Some(&Object::name("Identity-H")));

        let descendants = lookup(&store, &type0, "DescendantFonts");
        let cid_font = store.follow(&descendants.as_array().unwrap()[0]).unwrap();
        let cid_font = cid_font.as_dict().unwrap();
        assert_eq!(cid_font.get("Subtype"), Some(&Object::name("CIDFontType2")));
        assert_eq!(cid_font.get("CIDToGIDMap"), Some(&Object::name("Identity")));
        assert_eq!(
            cid_font.get("W"),
            Some(&Object::Array(vec![Object::Integer(1), Object::Integer(3), Object::Integer(500)]))
        );

        let descriptor = store.get_dict(cid_font, "FontDescriptor").unwrap().unwrap();
        assert_eq!(descriptor.get("Flags"), Some(&Object::Integer(32)));
        assert_eq!(descriptor.get("StemV"), Some(&Object::Integer(80)));
        let program = lookup(&store, &descriptor, "FontFile2");
        assert_eq!(program.stream_data().unwrap().len(), font.program().unwrap().data.len());

        let to_unicode = lookup(&store, &type0, "ToUnicode");
        let cmap = parser::parse(to_unicode.stream_data().unwrap()).unwrap();
        assert_eq!(cmap.get(&CharCode::from_value(1, 2)), Some('A' as u32));
    }

    #[test]
    fn test_shared_glyph_writes_encoding_cmap() {
        let font = truetype_font(true);
        let mut store = MemoryStore::new();
        let reference = embed(&font, &mut store).unwrap();
        let type0 = store.resolve(reference).unwrap().as_dict().cloned().unwrap();

        let encoding = lookup(&store, &type0, "Encoding");
        assert_eq!(encoding.as_dict().unwrap().get("Type"), Some(&Object::name("CMap")));
        let cmap = parser::parse(encoding.stream_data().unwrap()).unwrap();
        // 'a' got code 4 and still draws glyph 1
        assert_eq!(cmap.get(&CharCode::from_value(4, 2)), Some(1));
        assert_eq!(cmap.get(&CharCode::from_value(2, 2)), Some(2));
    }

    #[test]
    fn test_only_used_codes_are_described() {
        let font = truetype_font(false);
        font.encode("B").unwrap();
        let mut store = MemoryStore::new();
        let reference = embed(&font, &mut store).unwrap();
        let type0 = store.resolve(reference).unwrap().as_dict().cloned().unwrap();
        let to_unicode = lookup(&store, &type0, "ToUnicode");
        let cmap = parser::parse(to_unicode.stream_data().unwrap()).unwrap();
        assert_eq!(cmap.len(), 1);
        assert_eq!(cmap.get(&CharCode::from_value(2, 2)), Some('B' as u32));
    }

    #[test]
    fn test_simple_font_dictionary() {
        let mut bundle = FormatBundle::new(FontFormat::Afm, CodeSpace::Byte);
        bundle.font_name = "Test-Roman".to_string();
        for (code, name, width) in [(0x41, "A", 667.0), (0x42, "B", 611.0), (0x44, "Euro", 556.0)] {
            bundle.code_to_glyph.insert(code, code);
            bundle.glyph_names.insert(code, name.to_string());
            bundle.glyph_widths.insert(code, width);
        }
        let font = ProgramLoader::new(bundle).load(&FontConfig::new()).unwrap();

        let mut store = MemoryStore::new();
        let reference = embed(&font, &mut store).unwrap();
        let dict = store.resolve(reference).unwrap().as_dict().cloned().unwrap();
        assert_eq!(dict.get("Subtype"), Some(&Object::name("Type1")));
        assert_eq!(dict.get("FirstChar"), Some(&Object::Integer(0x41)));
        assert_eq!(dict.get("LastChar"), Some(&Object::Integer(0x44)));
        assert_eq!(
            dict.get("Widths"),
            Some(&Object::Array(vec![
                Object::Integer(667),
                Object::Integer(611),
                Object::Integer(0),
                Object::Integer(556),
            ]))
        );
        let encoding = dict.get("Encoding").and_then(Object::as_dict).unwrap();
        assert_eq!(
            encoding.get("Differences"),
            Some(&Object::Array(vec![Object::Integer(0x44), Object::name("Euro")]))
        );
        let descriptor = store.get_dict(&dict, "FontDescriptor").unwrap().unwrap();
        assert!(descriptor.get("FontFile").is_none());
    }

    #[test]
    fn test_type3_is_not_synthesized() {
        use crate::fonts::font::FontParts;
        let parts = FontParts::new("Glyphs", FontKind::Simple(SimpleKind::Type3));
        let font = Font::from_parts(parts, &FontConfig::new()).unwrap();
        let mut store = MemoryStore::new();
        assert!(matches!(embed(&font, &mut store), Err(Error::UnsupportedFormat(_))));
    }
}
