//! Integration tests for font reconciliation.
//!
//! These tests load synthetic font programs and check:
//! - code assignment and the decode/encode bijection
//! - width, kerning and vertical metrics scaling
//! - the three fallback policies
//! - embedding and reloading through an object store

mod common;

use pdf_fonts::config::{FallbackPolicy, FontConfig};
use pdf_fonts::error::Error;
use pdf_fonts::fonts::cache::FontCache;
use pdf_fonts::fonts::{embed, CompositeKind, Font, FontKind, FontLoader, ProgramLoader, SimpleKind};
use pdf_fonts::object::{MemoryStore, ObjectStore};
use proptest::prelude::*;
use std::io::Write;

fn ascii(config: &FontConfig) -> Font {
    ProgramLoader::from_bytes(&common::ascii_font())
        .unwrap()
        .load(config)
        .unwrap()
}

fn afm(config: &FontConfig) -> Font {
    ProgramLoader::from_bytes(common::AFM.as_bytes())
        .unwrap()
        .load(config)
        .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_codes_are_glyph_ids() {
    let font = ascii(&FontConfig::new());
    assert_eq!(font.kind(), FontKind::Composite(CompositeKind::TrueType));
    assert_eq!(font.char_code_max_length(), 2);
    // 'A' is glyph 0x41 - 0x20 + 1
    assert_eq!(font.encode("A").unwrap(), vec![0, 34]);
    assert_eq!(font.glyph_index('A'), Some(34));
    assert_eq!(font.code_points().len(), 95);
    assert_eq!(font.default_code(), Some(' '));
}

#[test]
fn test_every_code_round_trips() {
    let font = ascii(&FontConfig::strict());
    for (code, &c) in font.codes().iter() {
        assert_eq!(font.decode(code.as_bytes()).unwrap(), c.to_string());
        assert_eq!(font.encode(&c.to_string()).unwrap(), code.as_bytes());
    }
}

#[test]
fn test_text_round_trip_records_usage() {
    let font = ascii(&FontConfig::new());
    let codes = font.encode("Hello, World!").unwrap();
    assert_eq!(codes.len(), 26);
    assert_eq!(font.decode(&codes).unwrap(), "Hello, World!");
    let used: String = font.used_code_points().into_iter().collect();
    assert_eq!(used, " !,HWdelor");
}

#[test]
fn test_metrics_scale_with_size() {
    let font = ascii(&FontConfig::new());
    assert_eq!(font.width_of_char('A', 1000.0), 570.0);
    assert!(approx(font.width("AA", 12.0), 13.68));
    assert_eq!(font.ascent(10.0), 8.0);
    assert_eq!(font.descent(10.0), -2.0);
    assert_eq!(font.line_height(10.0), 10.0);
    assert_eq!(font.kerning("AV", 12.0), 0.0);
}

#[test]
fn test_units_per_em_normalized() {
    let data = common::truetype(0x41, &[1], &[0, 1000], 2000);
    let font = ProgramLoader::from_bytes(&data).unwrap().load(&FontConfig::new()).unwrap();
    assert_eq!(font.width_of_char('A', 1000.0), 500.0);
    assert_eq!(font.ascent(1000.0), 800.0);
}

#[test]
fn test_encode_fallbacks() {
    let text = "Añb";
    let font = ascii(&FontConfig::new());
    assert_eq!(font.encode(text).unwrap(), vec![0, 34, 0, 1, 0, 67]);

    let font = ascii(&FontConfig::new().with_fallback(FallbackPolicy::Exclusion));
    assert_eq!(font.encode(text).unwrap(), vec![0, 34, 0, 67]);

    let font = ascii(&FontConfig::new().with_default_code('?'));
    assert_eq!(font.encode(text).unwrap(), vec![0, 34, 0, 32, 0, 67]);

    let font = ascii(&FontConfig::strict());
    assert!(matches!(
        font.encode(text),
        Err(Error::EncodeError { character: 'ñ', index: 1 })
    ));
}

#[test]
fn test_decode_fallbacks() {
    let font = ascii(&FontConfig::new());
    assert_eq!(font.decode(&[0, 34, 0xFF]).unwrap(), "A ");

    let font = ascii(&FontConfig::new().with_fallback(FallbackPolicy::Exclusion));
    assert_eq!(font.decode(&[0xFF, 0, 34]).unwrap(), "A");

    let font = ascii(&FontConfig::strict());
    match font.decode(&[0, 34, 0xFF]) {
        Err(Error::DecodeError { offset, code }) => {
            assert_eq!(offset, 2);
            assert_eq!(code, 0xFF);
        },
        other => panic!("expected DecodeError, got {:?}", other),
    }
}

#[test]
fn test_unmapped_default_code_is_rejected() {
    let result = ProgramLoader::from_bytes(&common::ascii_font())
        .unwrap()
        .load(&FontConfig::new().with_default_code('€'));
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn test_afm_font() {
    let font = afm(&FontConfig::new());
    assert_eq!(font.kind(), FontKind::Simple(SimpleKind::Type1));
    assert_eq!(font.name(), "Sample-Roman");
    assert!(!font.is_symbolic());
    assert_eq!(font.encode("AVÆ").unwrap(), vec![65, 86, 225]);
    assert!(approx(font.width("AV", 10.0), 14.44));
    assert_eq!(font.kerning("AV", 1000.0), -135.0);
    assert_eq!(font.kerning_of('T', 'o', 10.0), -0.8);
    assert_eq!(font.kerning("AVA", 1000.0), -264.0);
    // Unencoded glyphs cannot be reached
    assert_eq!(font.encode("€").unwrap(), b" ");
    assert_eq!(font.metrics().stem_v_or_estimate(), 140.0);
}

#[test]
fn test_embed_and_reload() {
    let font = ascii(&FontConfig::new());
    let codes = font.encode("Hi there").unwrap();

    let mut store = MemoryStore::new();
    let reference = embed(&font, &mut store).unwrap();

    let mut cache = FontCache::new(FontConfig::strict());
    let reloaded = cache.get_or_load(&store, reference).unwrap();
    assert_eq!(reloaded.kind(), FontKind::Composite(CompositeKind::TrueType));
    assert_eq!(reloaded.decode(&codes).unwrap(), "Hi there");
    assert_eq!(reloaded.encode("Hi there").unwrap(), codes);
    for c in "Hi ther".chars() {
        assert_eq!(reloaded.width_of_char(c, 1000.0), font.width_of_char(c, 1000.0));
    }
    assert_eq!(reloaded.ascent(1000.0), 800.0);
    assert!(!reloaded.is_symbolic());
    // Only used characters were described
    assert!(matches!(reloaded.encode("Z"), Err(Error::EncodeError { .. })));
}

#[test]
fn test_embed_simple_and_reload() {
    let font = afm(&FontConfig::new());
    let mut store = MemoryStore::new();
    let reference = embed(&font, &mut store).unwrap();

    let dict = store.resolve(reference).unwrap();
    let descriptor = store.get_dict(dict.as_dict().unwrap(), "FontDescriptor").unwrap().unwrap();
    assert_eq!(descriptor.get("StemV").and_then(|o| o.as_number()), Some(140.0));
    let flags = descriptor.get("Flags").and_then(|o| o.as_integer()).unwrap();
    assert_eq!(flags, (1 << 5) | (1 << 18));

    let mut cache = FontCache::new(FontConfig::new());
    let reloaded = cache.get_or_load(&store, reference).unwrap();
    assert_eq!(reloaded.decode(&[65, 86, 225]).unwrap(), "AVÆ");
    assert_eq!(reloaded.width_of_char('Æ', 1000.0), 889.0);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&common::ascii_font()).unwrap();
    let font = ProgramLoader::from_file(file.path()).unwrap().load(&FontConfig::new()).unwrap();
    assert_eq!(font.code_points().len(), 95);

    let missing = file.path().with_extension("missing");
    assert!(matches!(ProgramLoader::from_file(missing), Err(Error::Io(_))));
}

#[test]
fn test_font_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Font>();

    let font = std::sync::Arc::new(ascii(&FontConfig::new()));
    let handles: Vec<_> = ["ab", "cd"]
        .into_iter()
        .map(|text| {
            let font = std::sync::Arc::clone(&font);
            std::thread::spawn(move || font.encode(text).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(font.used_code_points().len(), 4);
}

proptest! {
    #[test]
    fn prop_printable_round_trip(text in "[ -~]{0,64}") {
        let font = ascii(&FontConfig::strict());
        let codes = font.encode(&text).unwrap();
        prop_assert_eq!(codes.len(), 2 * text.len());
        prop_assert_eq!(font.decode(&codes).unwrap(), text);
    }

    #[test]
    fn prop_width_scales_linearly(text in "[ -~]{0,32}", size in 0.5f64..144.0) {
        let font = ascii(&FontConfig::new());
        let at_size = font.width(&text, size);
        let per_char: f64 = text.chars().map(|c| font.width_of_char(c, size)).sum();
        prop_assert!(approx(at_size, per_char));
        prop_assert!(approx(at_size, font.width(&text, 1000.0) * size / 1000.0));
    }

    #[test]
    fn prop_exclusion_drops_exactly_the_unmappable(text in "\\PC{0,32}") {
        let font = ascii(&FontConfig::new().with_fallback(FallbackPolicy::Exclusion));
        let mappable: String = text
            .chars()
            .filter(|c| font.code_points().contains(c))
            .collect();
        prop_assert_eq!(font.encode(&text).unwrap(), font.encode(&mappable).unwrap());
    }

    #[test]
    fn prop_substitution_keeps_length(text in "\\PC{0,32}") {
        let font = ascii(&FontConfig::new());
        let printable = text.chars().filter(|&c| c as u32 >= 0x20).count();
        let codes = font.encode(&text).unwrap();
        prop_assert_eq!(codes.len(), 2 * printable);
    }

    #[test]
    fn prop_fallbacks_are_deterministic(text in "\\PC{0,32}", policy in 0usize..3) {
        let policy = [FallbackPolicy::Exclusion, FallbackPolicy::Substitution, FallbackPolicy::Exception][policy];
        let font = ascii(&FontConfig::new().with_fallback(policy));
        let first = font.encode(&text).map_err(|e| e.to_string());
        let second = font.encode(&text).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_substitution_decode_never_fails(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let font = ascii(&FontConfig::new());
        let text = font.decode(&bytes).unwrap();
        prop_assert!(text.chars().count() <= bytes.len());
    }
}
