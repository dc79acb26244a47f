//! Integration tests for CMap resources.
//!
//! Parses ToUnicode and encoding CMaps the way producers write them, composes
//! encodings with the predefined UCS2 tables, and checks the shape of written
//! CMaps.

use std::collections::BTreeMap;

use pdf_fonts::fonts::cmap::{builder, parser, predefined, CMapKind, CharCode};

const SUBSET_TO_UNICODE: &str = "%!PS-Adobe-3.0 Resource-CMap
%%DocumentNeededResources: ProcSet (CIDInit)
/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
3 beginbfchar
<0003> <0020>
<0011> <D83DDE00>
<0024> <0041>
endbfchar
2 beginbfrange
<0044> <0046> <0061>
<0050> <0052> [<0078> <0079> <007A>]
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

fn code2(v: u32) -> CharCode {
    CharCode::from_value(v, 2)
}

#[test]
fn test_subset_to_unicode() {
    let cmap = parser::parse_strict(SUBSET_TO_UNICODE.as_bytes()).unwrap();
    assert_eq!(cmap.name, "Adobe-Identity-UCS");
    assert_eq!(cmap.kind, CMapKind::Unicode);
    assert_eq!(cmap.max_code_length(), 2);
    assert_eq!(cmap.len(), 9);

    assert_eq!(cmap.get(&code2(0x03)), Some(0x20));
    assert_eq!(cmap.get(&code2(0x11)), Some(0x1F600));
    assert_eq!(cmap.get(&code2(0x24)), Some(0x41));
    assert_eq!(cmap.get(&code2(0x45)), Some(0x62));
    assert_eq!(cmap.get(&code2(0x46)), Some(0x63));
    assert_eq!(cmap.get(&code2(0x51)), Some(0x79));
    assert_eq!(cmap.get(&code2(0x47)), None);
    // One-byte codes are outside this table
    assert_eq!(cmap.get(&CharCode::from_value(0x24, 1)), None);
}

#[test]
fn test_encoding_composed_with_collection() {
    let encoding = parser::parse(
        b"/CMapName /Custom-Japan def
          1 begincodespacerange <00> <FF> endcodespacerange
          1 begincidrange <20> <7E> 1 endcidrange
          1 begincidchar <A0> 633 endcidchar",
    )
    .unwrap();
    assert_eq!(encoding.kind, CMapKind::Cid);
    assert_eq!(encoding.get(&CharCode::from_value(0x41, 1)), Some(34));

    let ucs2 = predefined::ucs2_for("Adobe", "Japan1").unwrap();
    let unicode = encoding.compose(ucs2);
    assert_eq!(unicode.len(), 96);
    assert_eq!(unicode.get(&CharCode::from_value(0x41, 1)), Some(&'A'));
    assert_eq!(unicode.get(&CharCode::from_value(0xA0, 1)), Some(&'\u{3000}'));

    assert!(predefined::ucs2_for("Acme", "Japan1").is_none());
}

#[test]
fn test_usecmap_inherits_identity() {
    let cmap = parser::parse(b"/Identity-H usecmap\n1 begincidchar <0005> 99 endcidchar").unwrap();
    assert!(cmap.is_identity());
    assert_eq!(cmap.get(&code2(5)), Some(99));
    assert_eq!(cmap.get(&code2(6)), Some(6));

    assert!(parser::parse_strict(b"/Nonexistent-H usecmap").is_err());
    assert!(parser::parse(b"/Nonexistent-H usecmap").is_ok());
}

#[test]
fn test_to_unicode_sections_are_chunked() {
    // Every other code point, so nothing compacts into a range
    let table: BTreeMap<CharCode, char> = (0..250u32)
        .map(|i| (code2(i), char::from_u32(0x4E00 + 2 * i).unwrap()))
        .collect();
    let written = builder::build_to_unicode("Chunked-UCS", &table);
    assert_eq!(written.matches("beginbfchar").count(), 3);
    assert!(written.contains("100 beginbfchar"));
    assert!(written.contains("50 beginbfchar"));
    assert!(!written.contains("beginbfrange"));

    let parsed = parser::parse_strict(written.as_bytes()).unwrap();
    assert_eq!(parsed.len(), 250);
    for (code, c) in &table {
        assert_eq!(parsed.get(code), Some(*c as u32));
    }
}

#[test]
fn test_to_unicode_ranges_and_supplementary() {
    let mut table: BTreeMap<CharCode, char> = ('a'..='z')
        .enumerate()
        .map(|(i, c)| (code2(0x100 + i as u32), c))
        .collect();
    table.insert(code2(0x200), '😀');
    table.insert(code2(0x201), '😁');

    let written = builder::build_to_unicode("Mixed-UCS", &table);
    assert!(written.contains("1 beginbfrange\n<0100> <0119> <0061>\nendbfrange"));
    // Supplementary values are never folded into ranges
    assert!(written.contains("<0200> <D83DDE00>"));
    assert!(written.contains("<0201> <D83DDE01>"));

    let parsed = parser::parse_strict(written.as_bytes()).unwrap();
    assert_eq!(parsed.get(&code2(0x119)), Some('z' as u32));
    assert_eq!(parsed.get(&code2(0x201)), Some(0x1F601));
}

#[test]
fn test_cid_ranges_split_at_byte_boundary() {
    let table: BTreeMap<CharCode, u32> = (0xFCu32..=0x103).map(|v| (code2(v), v + 1000)).collect();
    let written = builder::build_cid("Split-H", &table);
    assert!(written.contains("<00FC> <00FF> 1252"));
    assert!(written.contains("<0100> <0103> 1256"));
    assert!(written.contains("/CMapType 1 def"));

    let parsed = parser::parse_strict(written.as_bytes()).unwrap();
    assert_eq!(parsed.kind, CMapKind::Cid);
    assert_eq!(parsed.name, "Split-H");
    for (code, cid) in &table {
        assert_eq!(parsed.get(code), Some(*cid));
    }
}
