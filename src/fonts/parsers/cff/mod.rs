//! Compact Font Format (CFF / Type 2) parser.
//!
//! Reads the header, Name INDEX, Top DICT INDEX, String INDEX and Global Subr INDEX
//! (skipped), then the CharStrings INDEX, Private DICT(s) and charset.
//!
//! Name-keyed fonts map Unicode (via glyph names) to glyph index. When no glyph name
//! resolves to Unicode the font is symbolic and its built-in encoding supplies byte
//! codes instead. CID-keyed fonts (Top DICT has `ROS`) map CID to glyph index through
//! the charset, with per-glyph Private DICTs chosen by `FDSelect`.
//!
//! Reference: Adobe Technical Note #5176, "The Compact Font Format Specification".

mod charsets;
mod charstring;
mod dict;
mod index;

use std::collections::BTreeMap;

use self::charsets::{sid_to_string, Charset};
use self::dict::{op, Dict};
use self::index::Index;
use super::reader::ByteReader;
use crate::error::{Error, Result};
use crate::fonts::encoding::LegacyEncoding;
use crate::fonts::glyph_list;
use crate::fonts::program::{CodeSpace, FontFormat, FormatBundle, OutlineFlavor};

use self::dict::Number;

/// Width-related Private DICT values.
#[derive(Debug, Clone, Copy, Default)]
struct PrivateWidths {
    nominal: f64,
    default: f64,
    std_hw: f64,
    std_vw: f64,
}

/// Parse a bare CFF font program.
pub fn parse(data: &[u8]) -> Result<FormatBundle> {
    let mut r = ByteReader::new(data);
    let major = r.read_u8()?;
    let _minor = r.read_u8()?;
    let hdr_size = r.read_u8()?;
    let _off_size = r.read_u8()?;
    if major != 1 {
        return Err(Error::UnsupportedFormat(format!("CFF major version {}", major)));
    }
    r.seek(hdr_size as usize)?;

    let names = Index::read(&mut r, data)?;
    let top_dict_at = r.pos();
    let top_dicts = Index::read(&mut r, data)?;
    let strings = Index::read(&mut r, data)?;
    let _global_subrs = Index::read(&mut r, data)?;

    let top = Dict::parse(
        top_dicts
            .get(0)
            .ok_or_else(|| Error::parse(top_dict_at, "empty Top DICT INDEX"))?,
    )?;
    let font_name = names
        .get(0)
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .unwrap_or_default();

    let char_strings_at = top
        .int(op::CHAR_STRINGS)
        .filter(|&o| o > 0)
        .ok_or_else(|| Error::parse(top_dict_at, "Top DICT has no CharStrings"))?
        as usize;
    let char_strings = Index::read(&mut ByteReader::at(data, char_strings_at)?, data)?;
    let num_glyphs = char_strings.len();

    let scale = match top.array(op::FONT_MATRIX) {
        Some(m) if m.len() == 6 && m[0] != 0.0 => m[0] * 1000.0,
        _ => 1.0,
    };
    let is_cid = top.contains(op::ROS);

    let mut bundle = FormatBundle::new(FontFormat::Cff, CodeSpace::Unicode);
    bundle.flavor = OutlineFlavor::Cff;
    bundle.font_name = font_name;
    bundle.glyph_count = num_glyphs as u32;

    // Widths
    let privates: Vec<PrivateWidths>;
    let fd_for_glyph: Vec<u8>;
    if is_cid {
        let fd_array_at = top
            .int(op::FD_ARRAY)
            .ok_or_else(|| Error::parse(top_dict_at, "CID-keyed font without FDArray"))?
            as usize;
        let fd_array = Index::read(&mut ByteReader::at(data, fd_array_at)?, data)?;
        let mut fds = Vec::with_capacity(fd_array.len());
        for i in 0..fd_array.len() {
            let font_dict = Dict::parse(fd_array.get(i).unwrap_or_default())?;
            fds.push(read_private(data, &font_dict)?);
        }
        privates = fds;
        fd_for_glyph = match top.int(op::FD_SELECT) {
            Some(at) if at > 0 => read_fd_select(data, at as usize, num_glyphs)?,
            _ => vec![0; num_glyphs],
        };
    } else {
        privates = vec![read_private(data, &top)?];
        fd_for_glyph = vec![0; num_glyphs];
    }

    for gid in 0..num_glyphs {
        let private = privates
            .get(fd_for_glyph[gid] as usize)
            .copied()
            .unwrap_or_default();
        let cs = char_strings.get(gid).unwrap_or_default();
        let width = charstring::advance_width(cs, private.nominal, private.default) * scale;
        bundle.glyph_widths.insert(gid as u32, width);
    }

    // Charset
    let charset = Charset::read(data, top.int(op::CHARSET).unwrap_or(0), num_glyphs)?;
    if is_cid {
        bundle.code_space = CodeSpace::Cid;
        for gid in 1..num_glyphs {
            if let Some(cid) = charset.sid(gid as u16) {
                bundle.code_to_glyph.entry(u32::from(cid)).or_insert(gid as u32);
            }
        }
        if let Some([registry, ordering, supplement]) = top.get(op::ROS) {
            let name = |n: &Number| {
                sid_to_string(n.as_i32() as u16, &strings)
                    .unwrap_or_default()
                    .to_string()
            };
            bundle.ros = Some((name(registry), name(ordering), supplement.as_i32()));
        }
    } else {
        for gid in 1..num_glyphs {
            let Some(name) = charset.sid(gid as u16).and_then(|sid| sid_to_string(sid, &strings))
            else {
                continue;
            };
            if let Some(unicode) = glyph_list::name_to_unicode(name) {
                bundle
                    .code_to_glyph
                    .entry(unicode as u32)
                    .or_insert(gid as u32);
            }
            bundle.glyph_names.insert(gid as u32, name.to_string());
        }

        if bundle.code_to_glyph.is_empty() {
            log::debug!(
                "No glyph name in '{}' resolves to Unicode, using its built-in encoding",
                bundle.font_name
            );
            bundle.code_space = CodeSpace::Byte;
            bundle.code_to_glyph = read_encoding(
                data,
                top.int(op::ENCODING).unwrap_or(0),
                &bundle.glyph_names,
                num_glyphs,
            )?;
            bundle.metrics.custom_encoding = true;
        }
    }

    // Metrics
    let metrics = &mut bundle.metrics;
    if let Some(bbox) = top.array(op::FONT_BBOX).filter(|b| b.len() == 4) {
        metrics.bbox = [bbox[0] * scale, bbox[1] * scale, bbox[2] * scale, bbox[3] * scale];
    }
    metrics.italic_angle = top.number(op::ITALIC_ANGLE).unwrap_or(0.0);
    metrics.fixed_pitch = top.int(op::IS_FIXED_PITCH).unwrap_or(0) != 0;
    metrics.underline_position = top.number(op::UNDERLINE_POSITION).unwrap_or(-100.0) * scale;
    metrics.underline_thickness = top.number(op::UNDERLINE_THICKNESS).unwrap_or(50.0) * scale;
    metrics.weight = top
        .int(op::WEIGHT)
        .and_then(|sid| sid_to_string(sid as u16, &strings))
        .map(str::to_string);
    let main_private = privates.first().copied().unwrap_or_default();
    metrics.stem_h = main_private.std_hw * scale;
    metrics.stem_v = main_private.std_vw * scale;
    metrics.ascent_descent_from_bbox();
    metrics.cap_height = metrics.ascent;
    metrics.x_height = metrics.ascent * 0.5;

    bundle.data = bytes::Bytes::copy_from_slice(data);

    log::debug!(
        "Parsed CFF '{}': {} glyphs, {} mapped codes ({:?})",
        bundle.font_name,
        num_glyphs,
        bundle.code_to_glyph.len(),
        bundle.code_space
    );
    Ok(bundle)
}

/// Private DICT named by a Top or Font DICT's `Private` (size, offset) operands.
fn read_private(data: &[u8], dict: &Dict) -> Result<PrivateWidths> {
    let Some((size, offset)) = dict.pair(op::PRIVATE) else {
        return Ok(PrivateWidths::default());
    };
    let (size, offset) = (size.max(0) as usize, offset.max(0) as usize);
    let bytes = data
        .get(offset..offset + size)
        .ok_or(Error::UnexpectedEof { offset })?;
    let private = Dict::parse(bytes)?;
    Ok(PrivateWidths {
        nominal: private.number(op::NOMINAL_WIDTH_X).unwrap_or(0.0),
        default: private.number(op::DEFAULT_WIDTH_X).unwrap_or(0.0),
        std_hw: private.number(op::STD_HW).unwrap_or(0.0),
        std_vw: private.number(op::STD_VW).unwrap_or(0.0),
    })
}

/// Font DICT index for every glyph (formats 0 and 3).
fn read_fd_select(data: &[u8], offset: usize, num_glyphs: usize) -> Result<Vec<u8>> {
    let mut r = ByteReader::at(data, offset)?;
    let format = r.read_u8()?;
    match format {
        0 => Ok(r.read_bytes(num_glyphs)?.to_vec()),
        3 => {
            let n_ranges = r.read_u16()?;
            let mut fds = vec![0u8; num_glyphs];
            let mut first = r.read_u16()? as usize;
            for _ in 0..n_ranges {
                let fd = r.read_u8()?;
                let next = r.read_u16()? as usize;
                for slot in fds.iter_mut().take(next.min(num_glyphs)).skip(first) {
                    *slot = fd;
                }
                first = next;
            }
            Ok(fds)
        },
        other => Err(Error::parse(offset, format!("unknown FDSelect format {}", other))),
    }
}

/// Byte code to glyph index from the Top DICT `Encoding` operand.
fn read_encoding(
    data: &[u8],
    encoding: i32,
    glyph_names: &std::collections::HashMap<u32, String>,
    num_glyphs: usize,
) -> Result<BTreeMap<u32, u32>> {
    let mut map = BTreeMap::new();
    match encoding {
        0 => {
            for gid in 1..num_glyphs as u32 {
                let code = glyph_names
                    .get(&gid)
                    .and_then(|name| LegacyEncoding::Standard.code_for_name(name));
                if let Some(code) = code {
                    map.entry(u32::from(code)).or_insert(gid);
                }
            }
        },
        1 => log::warn!("Expert encoding is not mapped"),
        offset => {
            let offset = offset.max(0) as usize;
            let mut r = ByteReader::at(data, offset)?;
            // High bit flags supplements, which add alternate codes only
            let format = r.read_u8()? & 0x7F;
            match format {
                0 => {
                    let n_codes = r.read_u8()?;
                    for gid in 1..=u32::from(n_codes) {
                        map.entry(u32::from(r.read_u8()?)).or_insert(gid);
                    }
                },
                1 => {
                    let n_ranges = r.read_u8()?;
                    let mut gid = 1u32;
                    for _ in 0..n_ranges {
                        let first = r.read_u8()?;
                        let n_left = r.read_u8()?;
                        for code in u32::from(first)..=u32::from(first) + u32::from(n_left) {
                            map.entry(code).or_insert(gid);
                            gid += 1;
                        }
                    }
                },
                other => {
                    return Err(Error::parse(offset, format!("unknown encoding format {}", other)))
                },
            }
        },
    }
    Ok(map)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// CFF INDEX from objects.
    pub(crate) fn index(objects: &[Vec<u8>]) -> Vec<u8> {
        let mut out = (objects.len() as u16).to_be_bytes().to_vec();
        if objects.is_empty() {
            return out;
        }
        out.push(2);
        let mut offset = 1u16;
        out.extend_from_slice(&offset.to_be_bytes());
        for obj in objects {
            offset += obj.len() as u16;
            out.extend_from_slice(&offset.to_be_bytes());
        }
        for obj in objects {
            out.extend_from_slice(obj);
        }
        out
    }

    fn int5(v: i32) -> Vec<u8> {
        let mut out = vec![29];
        out.extend_from_slice(&v.to_be_bytes());
        out
    }

    /// Name-keyed CFF with a format-0 charset, one charstring per glyph
    /// (glyph 0 first) and a Private DICT with nominalWidthX 0, defaultWidthX 500.
    pub(crate) fn build_cff(
        name: &str,
        glyph_sids: &[u16],
        charstrings: &[Vec<u8>],
        extra_strings: &[&str],
    ) -> Vec<u8> {
        let private = vec![
            0x1D, 0x00, 0x00, 0x01, 0xF4, 20, // defaultWidthX 500
            139, 21, // nominalWidthX 0
        ];
        let header = [1u8, 0, 4, 2];
        let name_index = index(&[name.as_bytes().to_vec()]);
        let strings = index(
            &extra_strings
                .iter()
                .map(|s| s.as_bytes().to_vec())
                .collect::<Vec<_>>(),
        );
        let gsubrs = index(&[]);

        // Top DICT is fixed-size because every offset is a 5-byte integer
        let top_len = 6 + 6 + 11 + 11 + 3;
        let top_index_len = 2 + 1 + 4 + top_len;
        let charset_at = header.len() + name_index.len() + top_index_len + strings.len() + gsubrs.len();
        let mut charset = vec![0u8];
        for sid in glyph_sids {
            charset.extend_from_slice(&sid.to_be_bytes());
        }
        let char_strings_at = charset_at + charset.len();
        let cs_index = index(charstrings);
        let private_at = char_strings_at + cs_index.len();

        let mut top = Vec::new();
        top.extend(int5(charset_at as i32));
        top.push(15);
        top.extend(int5(char_strings_at as i32));
        top.push(17);
        top.extend(int5(private.len() as i32));
        top.extend(int5(private_at as i32));
        top.push(18);
        // FontBBox 0 -200 1000 800
        top.extend([139, 28, 0xFF, 0x38, 28, 0x03, 0xE8, 28, 0x03, 0x20, 5]);
        // ItalicAngle 0
        top.extend([139, 12, 2]);
        assert_eq!(top.len(), top_len);

        let mut out = header.to_vec();
        out.extend(name_index);
        out.extend(index(&[top]));
        out.extend(strings);
        out.extend(gsubrs);
        out.extend(charset);
        out.extend(cs_index);
        out.extend(private);
        out
    }

    #[test]
    fn test_parse_name_keyed_font() {
        // glyphs: .notdef, A (SID 34), B (35), custom "uni263A"
        let charstrings = vec![
            vec![14],            // .notdef: default width
            vec![0xF8, 0xEC, 14], // 600
            vec![0xF8, 0x4C, 14], // 440
            vec![14],
        ];
        let data = build_cff("TestFont", &[34, 35, 391], &charstrings, &["uni263A"]);
        let bundle = parse(&data).unwrap();

        assert_eq!(bundle.font_name, "TestFont");
        assert_eq!(bundle.format, FontFormat::Cff);
        assert_eq!(bundle.code_space, CodeSpace::Unicode);
        assert_eq!(bundle.glyph_count, 4);
        assert_eq!(bundle.code_to_glyph.get(&('A' as u32)), Some(&1));
        assert_eq!(bundle.code_to_glyph.get(&('B' as u32)), Some(&2));
        assert_eq!(bundle.code_to_glyph.get(&0x263A), Some(&3));
        assert_eq!(bundle.glyph_width(0), Some(500.0));
        assert_eq!(bundle.glyph_width(1), Some(600.0));
        assert_eq!(bundle.glyph_width(2), Some(440.0));
        assert_eq!(bundle.glyph_names.get(&3).map(String::as_str), Some("uni263A"));
        assert_eq!(bundle.metrics.bbox, [0.0, -200.0, 1000.0, 800.0]);
        assert_eq!(bundle.metrics.ascent, 800.0);
        assert_eq!(bundle.metrics.descent, -200.0);
    }

    #[test]
    fn test_symbolic_font_uses_builtin_encoding() {
        // Glyph names that do not resolve to Unicode
        let charstrings = vec![vec![14], vec![14], vec![14]];
        let data = build_cff("Dings", &[391, 392], &charstrings, &["g1x", "g2x"]);
        let bundle = parse(&data).unwrap();
        assert_eq!(bundle.code_space, CodeSpace::Byte);
        assert!(bundle.metrics.custom_encoding);
        // Standard encoding cannot place unknown names either
        assert!(bundle.code_to_glyph.is_empty());
    }

    #[test]
    fn test_rejects_wrong_major_version() {
        assert!(matches!(
            parse(&[2, 0, 5, 4, 0]),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_truncated_font() {
        let data = build_cff("T", &[34], &[vec![14], vec![14]], &[]);
        assert!(parse(&data[..data.len() / 2]).is_err());
    }

    #[test]
    fn test_fd_select_format3() {
        // 2 ranges: glyphs 0..2 -> FD 0, 2..5 -> FD 1, sentinel 5
        let data = [3, 0, 2, 0, 0, 0, 0, 2, 1, 0, 5];
        assert_eq!(read_fd_select(&data, 0, 5).unwrap(), vec![0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_custom_encoding_format1() {
        // one range: codes 0x41..=0x43 -> glyphs 1..=3
        let data = [0xAA, 0xBB, 1, 1, 0x41, 2];
        let map = read_encoding(&data, 2, &Default::default(), 4).unwrap();
        assert_eq!(map.get(&0x41), Some(&1));
        assert_eq!(map.get(&0x43), Some(&3));
    }
}
