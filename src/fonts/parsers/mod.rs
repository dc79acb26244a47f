//! Font program parsers.
//!
//! Each parser reduces one file format to a [`FormatBundle`]. They hold no state
//! and fail on the first structural error rather than returning partial data.

pub mod afm;
pub mod cff;
pub(crate) mod reader;
pub mod truetype;
pub mod type1;

use crate::error::{Error, Result};
use crate::fonts::program::{FontFormat, FormatBundle};

/// Guess the format of a font program from its leading bytes.
pub fn sniff(data: &[u8]) -> Option<FontFormat> {
    match data {
        [0x00, 0x01, 0x00, 0x00, ..] => Some(FontFormat::OpenType),
        [b't', b'r', b'u', b'e', ..] | [b'O', b'T', b'T', b'O', ..] | [b't', b't', b'c', b'f', ..] => {
            Some(FontFormat::OpenType)
        },
        [0x80, 0x01, ..] => Some(FontFormat::Type1),
        [b'%', b'!', ..] => Some(FontFormat::Type1),
        // CFF header: major 1, hdrSize >= 4
        [1, _, 4..=255, 1..=4, ..] => Some(FontFormat::Cff),
        _ if data.starts_with(b"StartFontMetrics") => Some(FontFormat::Afm),
        _ => None,
    }
}

/// Parse a font program of a known format.
pub fn parse(format: FontFormat, data: &[u8]) -> Result<FormatBundle> {
    match format {
        FontFormat::OpenType => truetype::parse(data),
        FontFormat::Cff => cff::parse(data),
        FontFormat::Afm => afm::parse(data),
        FontFormat::Type1 => type1::parse(data),
    }
}

/// Parse a font program, detecting its format.
pub fn parse_any(data: &[u8]) -> Result<FormatBundle> {
    let format = sniff(data).ok_or_else(|| {
        Error::UnsupportedFormat(format!(
            "unrecognized font program header {:02X?}",
            &data[..data.len().min(4)]
        ))
    })?;
    log::debug!("Detected {:?} font program", format);
    parse(format, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff() {
        assert_eq!(sniff(&[0, 1, 0, 0, 0, 5]), Some(FontFormat::OpenType));
        assert_eq!(sniff(b"OTTO\x00\x09"), Some(FontFormat::OpenType));
        assert_eq!(sniff(&[1, 0, 4, 2]), Some(FontFormat::Cff));
        assert_eq!(sniff(&[0x80, 0x01, 0, 0]), Some(FontFormat::Type1));
        assert_eq!(sniff(b"%!PS-AdobeFont-1.0"), Some(FontFormat::Type1));
        assert_eq!(sniff(b"StartFontMetrics 4.1"), Some(FontFormat::Afm));
        assert_eq!(sniff(b"<html>"), None);
    }

    #[test]
    fn test_parse_any_rejects_unknown() {
        assert!(matches!(parse_any(b"GIF89a"), Err(Error::UnsupportedFormat(_))));
    }
}
