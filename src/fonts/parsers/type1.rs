//! Type 1 font program reader (PFB or PFA).
//!
//! Only the cleartext part of the program is read: the font name, a few metrics and
//! the `/Encoding` vector. The eexec-encrypted private part (charstrings, hints) is
//! skipped, so a Type 1 bundle carries no advance widths; those come from the PDF
//! `/Widths` array or an AFM file.
//!
//! PFB framing wraps the program in segments:
//!
//! ```text
//! 0x80 0x01 <u32 LE length> ASCII text
//! 0x80 0x02 <u32 LE length> binary (encrypted)
//! 0x80 0x03                 end of file
//! ```

use std::borrow::Cow;

use byteorder::{ByteOrder, LittleEndian};
use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::error::{Error, Result};
use crate::fonts::encoding::LegacyEncoding;
use crate::fonts::program::{CodeSpace, FontFormat, FormatBundle};

const PFB_MARKER: u8 = 0x80;
const PFB_ASCII: u8 = 0x01;
const PFB_BINARY: u8 = 0x02;
const PFB_EOF: u8 = 0x03;

lazy_static! {
    static ref RE_FONT_NAME: Regex = Regex::new(r"/FontName\s*/([^\s/\[\]{}()<>]+)").unwrap();
    static ref RE_ITALIC_ANGLE: Regex = Regex::new(r"/ItalicAngle\s+(-?[0-9.]+)").unwrap();
    static ref RE_FIXED_PITCH: Regex = Regex::new(r"/isFixedPitch\s+(true|false)").unwrap();
    static ref RE_FONT_BBOX: Regex = Regex::new(
        r"/FontBBox\s*[\[{]\s*(-?[0-9.]+)\s+(-?[0-9.]+)\s+(-?[0-9.]+)\s+(-?[0-9.]+)\s*[\]}]"
    )
    .unwrap();
    static ref RE_WEIGHT: Regex = Regex::new(r"/Weight\s*\(([^)]*)\)").unwrap();
    static ref RE_STANDARD_ENCODING: Regex =
        Regex::new(r"/Encoding\s+StandardEncoding\s+def").unwrap();
    static ref RE_DUP: Regex = Regex::new(r"^\s*dup\s+(\d+)\s*/([^\s/\[\]{}()<>]+)\s+put").unwrap();
}

/// Cleartext of a PFB or PFA program.
fn cleartext(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    if data.first() != Some(&PFB_MARKER) {
        // PFA: everything before eexec
        let end = data
            .windows(5)
            .position(|w| w == b"eexec")
            .unwrap_or(data.len());
        return Ok(Cow::Borrowed(&data[..end]));
    }

    let mut text = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        if data[pos] != PFB_MARKER {
            return Err(Error::parse(pos, "missing PFB segment marker"));
        }
        let kind = *data.get(pos + 1).ok_or(Error::UnexpectedEof { offset: pos + 1 })?;
        if kind == PFB_EOF {
            break;
        }
        let header = data
            .get(pos + 2..pos + 6)
            .ok_or(Error::UnexpectedEof { offset: pos + 2 })?;
        let len = LittleEndian::read_u32(header) as usize;
        let start = pos + 6;
        let segment = data
            .get(start..start + len)
            .ok_or(Error::UnexpectedEof { offset: start })?;
        match kind {
            PFB_ASCII => text.extend_from_slice(segment),
            PFB_BINARY => log::trace!("Skipping {} byte encrypted PFB segment", len),
            other => return Err(Error::parse(pos + 1, format!("unknown PFB segment type {}", other))),
        }
        pos = start + len;
    }
    Ok(Cow::Owned(text))
}

fn capture_str(re: &Regex, text: &[u8]) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}

fn capture_f64(re: &Regex, text: &[u8], group: usize) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(group))
        .and_then(|m| std::str::from_utf8(m.as_bytes()).ok())
        .and_then(|s| s.parse().ok())
}

/// Parse a Type 1 font program.
pub fn parse(data: &[u8]) -> Result<FormatBundle> {
    let text = cleartext(data)?;
    if !(text.starts_with(b"%!PS-AdobeFont") || text.starts_with(b"%!FontType1")) {
        return Err(Error::UnsupportedFormat("not a Type 1 font program".to_string()));
    }

    let mut bundle = FormatBundle::new(FontFormat::Type1, CodeSpace::Byte);
    bundle.font_name = capture_str(&RE_FONT_NAME, &text).unwrap_or_default();

    let encoding = read_encoding(&text);
    bundle.metrics.custom_encoding = encoding.is_some();
    let entries: Vec<(u8, String)> = match encoding {
        Some(entries) => entries,
        None => LegacyEncoding::Standard
            .entries()
            .map(|(code, name)| (code, name.to_string()))
            .collect(),
    };
    for (code, name) in entries {
        let code = u32::from(code);
        bundle.code_to_glyph.insert(code, code);
        bundle.glyph_names.insert(code, name);
    }
    bundle.glyph_count = 256;

    let metrics = &mut bundle.metrics;
    metrics.italic_angle = capture_f64(&RE_ITALIC_ANGLE, &text, 1).unwrap_or(0.0);
    metrics.fixed_pitch = capture_str(&RE_FIXED_PITCH, &text).as_deref() == Some("true");
    metrics.weight = capture_str(&RE_WEIGHT, &text);
    if let Some(caps) = RE_FONT_BBOX.captures(&text) {
        let mut bbox = [0.0; 4];
        for (i, v) in bbox.iter_mut().enumerate() {
            *v = caps
                .get(i + 1)
                .and_then(|m| std::str::from_utf8(m.as_bytes()).ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0);
        }
        metrics.bbox = bbox;
    }
    metrics.ascent_descent_from_bbox();
    metrics.cap_height = metrics.ascent;
    metrics.x_height = metrics.ascent * 0.5;

    bundle.data = bytes::Bytes::copy_from_slice(data);

    log::debug!(
        "Parsed Type 1 '{}': {} encoded glyphs",
        bundle.font_name,
        bundle.code_to_glyph.len()
    );
    Ok(bundle)
}

/// Custom `/Encoding` vector, `None` for StandardEncoding or no encoding.
fn read_encoding(text: &[u8]) -> Option<Vec<(u8, String)>> {
    if RE_STANDARD_ENCODING.is_match(text) {
        return None;
    }
    let start = text.windows(9).position(|w| w == b"/Encoding")?;

    // Entries follow one per line until the first line that is not a `dup`
    let mut entries = Vec::new();
    let mut seen_dup = false;
    for line in text[start..].split(|&b| b == b'\n' || b == b'\r').skip(1) {
        match RE_DUP.captures(line) {
            Some(caps) => {
                seen_dup = true;
                let code = std::str::from_utf8(&caps[1])
                    .ok()
                    .and_then(|s| s.parse::<u8>().ok());
                match code {
                    Some(code) => {
                        entries.push((code, String::from_utf8_lossy(&caps[2]).into_owned()))
                    },
                    None => log::warn!("Skipping out-of-range Type 1 encoding entry"),
                }
            },
            None if seen_dup => break,
            None => {
                // `0 1 255 {1 index exch /.notdef put} for` preamble lines
                if line.windows(3).any(|w| w == b"def") {
                    break;
                }
            },
        }
    }
    Some(entries)
}
