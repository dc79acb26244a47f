//! Adobe Font Metrics (AFM) reader.
//!
//! AFM files are line-oriented `Key value` text. The reader takes the global
//! metrics from the header, advance widths and names from `C`/`CH` character
//! metric lines and pair kerning from `KPX` lines. Everything else is ignored.
//!
//! The glyph index of a character is its code. Unencoded characters (`C -1`) get
//! synthetic codes counting up from 32767 so they still have a width and kerning
//! entries.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::fonts::glyph_list;
use crate::fonts::program::{CodeSpace, FontFormat, FormatBundle, GlyphPair};

/// First synthetic code handed to unencoded characters.
pub const SHORT_MAX: u32 = 32767;

lazy_static! {
    static ref RE_METRIC_FIELD: Regex = Regex::new(r"^\s*(C|CH|WX|W0X|N)\s+(.*?)\s*$").unwrap();
}

#[derive(Debug, Default)]
struct CharMetric {
    code: Option<i64>,
    width: Option<f64>,
    name: Option<String>,
}

fn parse_char_metric(line: &str) -> CharMetric {
    let mut metric = CharMetric::default();
    for field in line.split(';') {
        let Some(caps) = RE_METRIC_FIELD.captures(field) else {
            continue;
        };
        let value = &caps[2];
        match &caps[1] {
            "C" => metric.code = value.parse().ok(),
            "CH" => {
                metric.code = i64::from_str_radix(value.trim_matches(|c| c == '<' || c == '>'), 16).ok()
            },
            "WX" | "W0X" => metric.width = value.parse().ok(),
            "N" => metric.name = Some(value.to_string()),
            _ => {},
        }
    }
    metric
}

fn numbers(rest: &str) -> Vec<f64> {
    rest.split_whitespace().filter_map(|v| v.parse().ok()).collect()
}

/// Parse an AFM file.
pub fn parse(data: &[u8]) -> Result<FormatBundle> {
    let text = String::from_utf8_lossy(data);
    if !text.trim_start().starts_with("StartFontMetrics") {
        return Err(Error::UnsupportedFormat("not an AFM file".to_string()));
    }

    let mut bundle = FormatBundle::new(FontFormat::Afm, CodeSpace::Byte);
    let mut ascender = None;
    let mut descender = None;
    let mut cap_height = None;
    let mut x_height = None;
    let mut encoding_scheme = None;
    let mut name_to_code: HashMap<String, u32> = HashMap::new();
    let mut next_synthetic = SHORT_MAX;
    let mut kern_pairs: Vec<(String, String, f64)> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        let (key, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let metrics = &mut bundle.metrics;
        match key {
            "FontName" => bundle.font_name = rest.to_string(),
            "Weight" => metrics.weight = Some(rest.to_string()),
            "ItalicAngle" => metrics.italic_angle = rest.parse().unwrap_or(0.0),
            "IsFixedPitch" => metrics.fixed_pitch = rest == "true",
            "Ascender" => ascender = rest.parse().ok(),
            "Descender" => descender = rest.parse().ok(),
            "CapHeight" => cap_height = rest.parse().ok(),
            "XHeight" => x_height = rest.parse().ok(),
            "StdHW" => metrics.stem_h = rest.parse().unwrap_or(0.0),
            "StdVW" => metrics.stem_v = rest.parse().unwrap_or(0.0),
            "UnderlinePosition" => metrics.underline_position = rest.parse().unwrap_or(-100.0),
            "UnderlineThickness" => metrics.underline_thickness = rest.parse().unwrap_or(50.0),
            "EncodingScheme" => encoding_scheme = Some(rest.to_string()),
            "FontBBox" => match numbers(rest).as_slice() {
                &[llx, lly, urx, ury] => metrics.bbox = [llx, lly, urx, ury],
                _ => log::warn!("Malformed FontBBox on AFM line {}", line_no + 1),
            },
            "C" | "CH" => {
                let metric = parse_char_metric(line);
                let code = match metric.code {
                    Some(code) if (0..SHORT_MAX as i64).contains(&code) => code as u32,
                    Some(-1) if metric.name.is_some() => {
                        next_synthetic += 1;
                        next_synthetic - 1
                    },
                    _ => {
                        log::warn!("Skipping AFM character metric on line {}", line_no + 1);
                        continue;
                    },
                };
                bundle.code_to_glyph.insert(code, code);
                if let Some(width) = metric.width {
                    bundle.glyph_widths.insert(code, width);
                }
                if let Some(name) = metric.name {
                    name_to_code.entry(name.clone()).or_insert(code);
                    bundle.glyph_names.insert(code, name);
                }
            },
            "KPX" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                match parts.as_slice() {
                    &[left, right, value] => match value.parse::<f64>() {
                        Ok(v) => kern_pairs.push((left.to_string(), right.to_string(), v)),
                        Err(_) => log::warn!("Bad KPX value on AFM line {}", line_no + 1),
                    },
                    _ => log::warn!("Malformed KPX on AFM line {}", line_no + 1),
                }
            },
            _ => {},
        }
    }

    // Kerning names resolve through the character metrics, or through Unicode
    // when the glyph has no metrics line of its own
    let resolve = |name: &str| -> Option<u32> {
        name_to_code.get(name).copied().or_else(|| {
            let c = glyph_list::name_to_unicode(name)?;
            bundle
                .glyph_names
                .iter()
                .find(|(_, n)| glyph_list::name_to_unicode(n) == Some(c))
                .map(|(&code, _)| code)
        })
    };
    let mut kernings = HashMap::with_capacity(kern_pairs.len());
    for (left, right, value) in &kern_pairs {
        match (resolve(left), resolve(right)) {
            (Some(l), Some(r)) => {
                kernings.insert(GlyphPair::new(l, r), *value);
            },
            _ => log::debug!("Skipping kerning pair {} {} with unknown glyph", left, right),
        }
    }
    bundle.glyph_kernings = kernings;

    bundle.glyph_count = bundle.code_to_glyph.len() as u32;

    let metrics = &mut bundle.metrics;
    metrics.ascent = ascender.unwrap_or(metrics.bbox[3]);
    metrics.descent = descender.unwrap_or(metrics.bbox[1]);
    metrics.cap_height = cap_height.unwrap_or(metrics.ascent);
    metrics.x_height = x_height.unwrap_or(metrics.ascent * 0.5);
    metrics.custom_encoding = encoding_scheme
        .as_deref()
        .is_some_and(|scheme| scheme != "AdobeStandardEncoding");

    bundle.data = bytes::Bytes::copy_from_slice(data);

    log::debug!(
        "Parsed AFM '{}': {} characters, {} kerning pairs",
        bundle.font_name,
        bundle.code_to_glyph.len(),
        bundle.glyph_kernings.len()
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFM: &str = "StartFontMetrics 4.1
Comment Generated for tests
FontName Test-Roman
Weight Roman
ItalicAngle 0
IsFixedPitch false
FontBBox -168 -218 1000 898
UnderlinePosition -100
UnderlineThickness 50
EncodingScheme AdobeStandardEncoding
CapHeight 662
XHeight 450
Ascender 683
Descender -217
StdVW 84
StartCharMetrics 5
C 32 ; WX 250 ; N space ; B 0 0 0 0 ;
C 65 ; WX 722 ; N A ; B 15 0 706 674 ;
C 86 ; WX 722 ; N V ; B 16 -11 697 662 ;
CH <61> ; WX 444 ; N a ; B 37 -10 442 460 ;
C -1 ; WX 500 ; N Euro ;
EndCharMetrics
StartKernData
StartKernPairs 3
KPX A V -135
KPX V A -129
KPX A zcaron -10
EndKernPairs
EndKernData
EndFontMetrics
";

    #[test]
    fn test_parse_header_metrics() {
        let bundle = parse(AFM.as_bytes()).unwrap();
        assert_eq!(bundle.font_name, "Test-Roman");
        assert_eq!(bundle.format, FontFormat::Afm);
        assert_eq!(bundle.code_space, CodeSpace::Byte);
        assert_eq!(bundle.metrics.ascent, 683.0);
        assert_eq!(bundle.metrics.descent, -217.0);
        assert_eq!(bundle.metrics.cap_height, 662.0);
        assert_eq!(bundle.metrics.stem_v, 84.0);
        assert_eq!(bundle.metrics.bbox, [-168.0, -218.0, 1000.0, 898.0]);
        assert!(!bundle.metrics.custom_encoding);
    }

    #[test]
    fn test_char_metrics() {
        let bundle = parse(AFM.as_bytes()).unwrap();
        assert_eq!(bundle.glyph_width(65), Some(722.0));
        assert_eq!(bundle.glyph_width(0x61), Some(444.0));
        assert_eq!(bundle.glyph_names.get(&32).map(String::as_str), Some("space"));
        // Unencoded glyph gets the first synthetic code
        assert_eq!(bundle.glyph_names.get(&SHORT_MAX).map(String::as_str), Some("Euro"));
        assert_eq!(bundle.glyph_width(SHORT_MAX), Some(500.0));
    }

    #[test]
    fn test_kerning_pairs() {
        let bundle = parse(AFM.as_bytes()).unwrap();
        assert_eq!(bundle.kerning(65, 86), -135.0);
        assert_eq!(bundle.kerning(86, 65), -129.0);
        // zcaron has no metrics: pair skipped
        assert_eq!(bundle.glyph_kernings.len(), 2);
    }

    #[test]
    fn test_ascent_falls_back_to_bbox() {
        let afm = "StartFontMetrics 2.0\nFontName Dings\nEncodingScheme FontSpecific\nFontBBox 0 -143 981 820\nEndFontMetrics\n";
        let bundle = parse(afm.as_bytes()).unwrap();
        assert_eq!(bundle.metrics.ascent, 820.0);
        assert_eq!(bundle.metrics.descent, -143.0);
        assert!(bundle.metrics.custom_encoding);
    }

    #[test]
    fn test_rejects_non_afm() {
        assert!(parse(b"%!PS-AdobeFont-1.0").is_err());
    }
}
