//! TrueType / OpenType table reader.
//!
//! Reads the sfnt table directory and the tables needed to measure text and map
//! characters: `head`, `hhea`, `maxp`, `hmtx`, `OS/2`, `post`, `name`, `kern` and
//! `cmap`. Glyph outlines are never touched.
//!
//! # cmap selection
//!
//! 1. (3, 1) Microsoft Unicode BMP: non-symbolic, codes are Unicode
//! 2. (0, *) Unicode platform: non-symbolic, codes are Unicode
//! 3. (1, 0) Macintosh Roman: symbolic, codes are bytes
//! 4. (3, 0) Microsoft Symbol: symbolic, `0xF0xx` codes fold to their low byte
//!
//! Subtable formats 0, 4 and 6 are supported.

use std::collections::{BTreeMap, HashMap};

use super::reader::ByteReader;
use crate::error::{Error, Result};
use crate::fonts::program::{CodeSpace, FontFormat, FormatBundle, GlyphPair, OutlineFlavor};

/// One entry of the table directory.
#[derive(Debug, Clone, Copy)]
struct TableRecord {
    offset: usize,
    length: usize,
}

/// Tag to table slice index of an sfnt file.
struct TableDirectory<'a> {
    data: &'a [u8],
    tables: HashMap<[u8; 4], TableRecord>,
}

impl<'a> TableDirectory<'a> {
    fn read(data: &'a [u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);
        let mut version = r.read_tag()?;

        // Collections: use the first font
        if &version == b"ttcf" {
            r.skip(4)?;
            let num_fonts = r.read_u32()?;
            if num_fonts == 0 {
                return Err(Error::parse(8, "empty font collection"));
            }
            let first = r.read_u32()? as usize;
            r.seek(first)?;
            version = r.read_tag()?;
        }

        match &version {
            &[0x00, 0x01, 0x00, 0x00] | b"true" | b"OTTO" => {},
            _ => {
                return Err(Error::UnsupportedFormat(format!(
                    "unknown sfnt version {:02X?}",
                    version
                )))
            },
        }

        let num_tables = r.read_u16()?;
        r.skip(6)?; // searchRange, entrySelector, rangeShift

        let mut tables = HashMap::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let record_at = r.pos();
            let tag = r.read_tag()?;
            let _checksum = r.read_u32()?;
            let offset = r.read_u32()? as usize;
            let length = r.read_u32()? as usize;
            if offset.checked_add(length).map_or(true, |end| end > data.len()) {
                return Err(Error::parse(
                    record_at,
                    format!(
                        "table '{}' at {}+{} exceeds file length {}",
                        String::from_utf8_lossy(&tag),
                        offset,
                        length,
                        data.len()
                    ),
                ));
            }
            tables.insert(tag, TableRecord { offset, length });
        }

        log::trace!("sfnt directory with {} tables", tables.len());
        Ok(Self { data, tables })
    }

    fn get(&self, tag: &[u8; 4]) -> Option<&'a [u8]> {
        self.tables
            .get(tag)
            .map(|rec| &self.data[rec.offset..rec.offset + rec.length])
    }

    fn require(&self, tag: &[u8; 4]) -> Result<&'a [u8]> {
        self.get(tag)
            .ok_or_else(|| Error::MissingTable(String::from_utf8_lossy(tag).into_owned()))
    }

    fn contains(&self, tag: &[u8; 4]) -> bool {
        self.tables.contains_key(tag)
    }
}

/// Parse an sfnt font program into a format bundle.
pub fn parse(data: &[u8]) -> Result<FormatBundle> {
    let dir = TableDirectory::read(data)?;

    // head
    let head = dir.require(b"head")?;
    let mut r = ByteReader::at(head, 18)?;
    let units_per_em = r.read_u16()?;
    if units_per_em == 0 {
        return Err(Error::parse(18, "head.unitsPerEm is zero"));
    }
    let scale = 1000.0 / f64::from(units_per_em);
    r.seek(36)?;
    let bbox = [
        f64::from(r.read_i16()?) * scale,
        f64::from(r.read_i16()?) * scale,
        f64::from(r.read_i16()?) * scale,
        f64::from(r.read_i16()?) * scale,
    ];

    // hhea
    let hhea = dir.require(b"hhea")?;
    let mut r = ByteReader::at(hhea, 4)?;
    let hhea_ascender = r.read_i16()?;
    let hhea_descender = r.read_i16()?;
    r.seek(34)?;
    let num_h_metrics = r.read_u16()?;

    let num_glyphs = match dir.get(b"maxp") {
        Some(maxp) => ByteReader::at(maxp, 4)?.read_u16()?,
        None => num_h_metrics,
    };

    let mut bundle = FormatBundle::new(FontFormat::OpenType, CodeSpace::Unicode);
    bundle.glyph_count = u32::from(num_glyphs);
    bundle.flavor = if dir.contains(b"CFF ") {
        OutlineFlavor::Cff
    } else {
        OutlineFlavor::TrueType
    };
    bundle.metrics.bbox = bbox;

    // hmtx
    let hmtx = dir.require(b"hmtx")?;
    bundle.glyph_widths = read_advances(hmtx, num_h_metrics, num_glyphs, scale)?;

    // OS/2 (optional)
    let metrics = &mut bundle.metrics;
    match dir.get(b"OS/2") {
        Some(os2) => {
            let mut r = ByteReader::new(os2);
            let version = r.read_u16()?;
            r.seek(4)?;
            let weight_class = r.read_u16()?;
            r.seek(68)?;
            metrics.ascent = f64::from(r.read_i16()?) * scale;
            metrics.descent = f64::from(r.read_i16()?) * scale;
            if version >= 2 && os2.len() >= 90 {
                r.seek(86)?;
                metrics.x_height = f64::from(r.read_i16()?) * scale;
                metrics.cap_height = f64::from(r.read_i16()?) * scale;
            } else {
                metrics.x_height = 500.0;
                metrics.cap_height = 700.0;
            }
            metrics.weight = Some(if weight_class >= 700 { "Bold" } else { "Regular" }.to_string());
        },
        None => {
            log::debug!("No OS/2 table, using hhea ascender/descender");
            metrics.ascent = f64::from(hhea_ascender) * scale;
            metrics.descent = f64::from(hhea_descender) * scale;
            metrics.x_height = 500.0;
            metrics.cap_height = 700.0;
        },
    }

    // post (optional)
    if let Some(post) = dir.get(b"post") {
        let mut r = ByteReader::at(post, 4)?;
        metrics.italic_angle = r.read_fixed()?;
        metrics.underline_position = f64::from(r.read_i16()?) * scale;
        metrics.underline_thickness = f64::from(r.read_i16()?) * scale;
        metrics.fixed_pitch = r.read_u32()? != 0;
    }

    if let Some(name) = dir.get(b"name") {
        bundle.font_name = read_postscript_name(name).unwrap_or_default();
    }

    if let Some(kern) = dir.get(b"kern") {
        bundle.glyph_kernings = read_kern(kern, scale)?;
    }

    let (code_space, code_to_glyph) = read_cmap(dir.require(b"cmap")?)?;
    bundle.code_space = code_space;
    bundle.code_to_glyph = code_to_glyph;
    bundle.metrics.custom_encoding = code_space == CodeSpace::Byte;
    bundle.data = bytes::Bytes::copy_from_slice(data);

    log::debug!(
        "Parsed sfnt '{}': {} glyphs, {} mapped codes, {:?}",
        bundle.font_name,
        bundle.glyph_count,
        bundle.code_to_glyph.len(),
        bundle.code_space
    );
    Ok(bundle)
}

/// Advance widths from `hmtx`. Glyphs past `numberOfHMetrics` reuse the last advance.
fn read_advances(
    hmtx: &[u8],
    num_h_metrics: u16,
    num_glyphs: u16,
    scale: f64,
) -> Result<HashMap<u32, f64>> {
    if num_h_metrics == 0 {
        return Err(Error::parse(34, "hhea.numberOfHMetrics is zero"));
    }
    let mut widths = HashMap::with_capacity(num_glyphs as usize);
    let mut r = ByteReader::new(hmtx);
    let mut last = 0u16;
    for gid in 0..num_h_metrics {
        last = r.read_u16()?;
        r.skip(2)?; // lsb
        widths.insert(u32::from(gid), f64::from(last) * scale);
    }
    for gid in num_h_metrics..num_glyphs {
        widths.insert(u32::from(gid), f64::from(last) * scale);
    }
    Ok(widths)
}

/// PostScript name (name ID 6) from a Windows or Macintosh record.
fn read_postscript_name(name: &[u8]) -> Option<String> {
    let mut r = ByteReader::new(name);
    let _format = r.read_u16().ok()?;
    let count = r.read_u16().ok()?;
    let storage = r.read_u16().ok()? as usize;

    for _ in 0..count {
        let platform = r.read_u16().ok()?;
        let _encoding = r.read_u16().ok()?;
        let _language = r.read_u16().ok()?;
        let name_id = r.read_u16().ok()?;
        let length = r.read_u16().ok()? as usize;
        let offset = r.read_u16().ok()? as usize;
        if name_id != 6 {
            continue;
        }
        let start = storage + offset;
        let raw = name.get(start..start + length)?;
        let decoded = match platform {
            0 | 3 => {
                let units: Vec<u16> = raw
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            },
            // PostScript names are printable ASCII
            _ => raw.iter().map(|&b| b as char).collect(),
        };
        if !decoded.is_empty() {
            return Some(decoded);
        }
    }
    None
}

/// Horizontal format-0 kerning pairs from a version-0 `kern` table.
fn read_kern(kern: &[u8], scale: f64) -> Result<HashMap<GlyphPair, f64>> {
    let mut pairs = HashMap::new();
    let mut r = ByteReader::new(kern);
    let version = r.read_u16()?;
    if version != 0 {
        log::warn!("Skipping kern table version {} (only version 0 is read)", version);
        return Ok(pairs);
    }
    let n_tables = r.read_u16()?;

    for _ in 0..n_tables {
        let start = r.pos();
        let _sub_version = r.read_u16()?;
        let length = r.read_u16()? as usize;
        let coverage = r.read_u16()?;
        let format = coverage >> 8;
        let horizontal = coverage & 0x1 != 0;
        let cross_stream = coverage & 0x4 != 0;

        if format == 0 && horizontal && !cross_stream {
            let n_pairs = r.read_u16()?;
            r.skip(6)?;
            for _ in 0..n_pairs {
                let left = r.read_u16()?;
                let right = r.read_u16()?;
                let value = r.read_i16()?;
                pairs.insert(
                    GlyphPair::new(u32::from(left), u32::from(right)),
                    f64::from(value) * scale,
                );
            }
        } else {
            log::warn!("Skipping kern subtable format {} (coverage {:#06x})", format, coverage);
        }

        if length < 6 {
            break;
        }
        r.seek(start + length)?;
    }

    log::trace!("Read {} kerning pairs", pairs.len());
    Ok(pairs)
}

/// Pick a cmap subtable and read it.
fn read_cmap(cmap: &[u8]) -> Result<(CodeSpace, BTreeMap<u32, u32>)> {
    let mut r = ByteReader::new(cmap);
    let _version = r.read_u16()?;
    let num_tables = r.read_u16()?;

    let mut records = Vec::with_capacity(num_tables as usize);
    for _ in 0..num_tables {
        let platform = r.read_u16()?;
        let encoding = r.read_u16()?;
        let offset = r.read_u32()? as usize;
        records.push((platform, encoding, offset));
    }

    let find = |pred: &dyn Fn(u16, u16) -> bool| {
        records
            .iter()
            .find(|(p, e, _)| pred(*p, *e))
            .map(|&(_, _, offset)| offset)
    };

    if let Some(offset) = find(&|p, e| p == 3 && e == 1).or_else(|| find(&|p, _| p == 0)) {
        return Ok((CodeSpace::Unicode, read_subtable(cmap, offset)?));
    }
    if let Some(offset) = find(&|p, e| p == 1 && e == 0) {
        return Ok((CodeSpace::Byte, read_subtable(cmap, offset)?));
    }
    if let Some(offset) = find(&|p, e| p == 3 && e == 0) {
        let folded = read_subtable(cmap, offset)?
            .into_iter()
            .filter_map(|(code, gid)| match code {
                0xF000..=0xF0FF => Some((code & 0xFF, gid)),
                0..=0xFF => Some((code, gid)),
                _ => None,
            })
            .collect();
        return Ok((CodeSpace::Byte, folded));
    }

    Err(Error::parse(0, "no usable cmap subtable (need 3/1, 0/*, 1/0 or 3/0)"))
}

/// Read one cmap subtable at `offset` into code -> glyph index (glyph 0 omitted).
pub(crate) fn read_subtable(cmap: &[u8], offset: usize) -> Result<BTreeMap<u32, u32>> {
    let mut r = ByteReader::at(cmap, offset)?;
    let format = r.read_u16()?;
    let mut map = BTreeMap::new();

    match format {
        0 => {
            r.skip(4)?; // length, language
            let glyphs = r.read_bytes(256)?;
            for (code, &gid) in glyphs.iter().enumerate() {
                if gid != 0 {
                    map.insert(code as u32, u32::from(gid));
                }
            }
        },
        4 => read_format4(cmap, offset, &mut map)?,
        6 => {
            r.skip(4)?;
            let first = r.read_u16()?;
            let count = r.read_u16()?;
            for i in 0..count {
                let gid = r.read_u16()?;
                if gid != 0 {
                    map.insert(u32::from(first) + u32::from(i), u32::from(gid));
                }
            }
        },
        other => return Err(Error::UnsupportedCMapFormat(other)),
    }

    Ok(map)
}

/// Segment mapping to delta values.
///
/// With `idRangeOffset == 0` the glyph is `(code + idDelta) mod 65536`. Otherwise
/// `idRangeOffset` is a byte offset from its own slot into `glyphIdArray`, and a
/// non-zero entry found there is adjusted by `idDelta` the same way.
fn read_format4(cmap: &[u8], offset: usize, map: &mut BTreeMap<u32, u32>) -> Result<()> {
    let mut r = ByteReader::at(cmap, offset + 6)?;
    let seg_count_x2 = r.read_u16()? as usize;
    if seg_count_x2 % 2 != 0 {
        return Err(Error::parse(offset + 6, "odd segCountX2 in cmap format 4"));
    }
    let seg_count = seg_count_x2 / 2;

    let end_codes_at = offset + 14;
    let start_codes_at = end_codes_at + seg_count_x2 + 2; // reservedPad
    let deltas_at = start_codes_at + seg_count_x2;
    let range_offsets_at = deltas_at + seg_count_x2;

    let u16_at = |pos: usize| -> Result<u16> { ByteReader::at(cmap, pos)?.read_u16() };

    for seg in 0..seg_count {
        let end = u16_at(end_codes_at + 2 * seg)?;
        let start = u16_at(start_codes_at + 2 * seg)?;
        let delta = u16_at(deltas_at + 2 * seg)?;
        let range_offset_pos = range_offsets_at + 2 * seg;
        let range_offset = u16_at(range_offset_pos)?;

        if start > end {
            log::warn!("cmap format 4 segment {} has start {:#x} > end {:#x}", seg, start, end);
            continue;
        }

        for code in start..=end {
            if code == 0xFFFF {
                break;
            }
            let gid = if range_offset == 0 {
                code.wrapping_add(delta)
            } else {
                let addr = range_offset_pos
                    + range_offset as usize
                    + 2 * (code - start) as usize;
                match u16_at(addr)? {
                    0 => 0,
                    g => g.wrapping_add(delta),
                }
            };
            if gid != 0 {
                map.insert(u32::from(code), u32::from(gid));
            }
        }
    }

    Ok(())
}
