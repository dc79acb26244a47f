//! CMap stream writer.
//!
//! Produces ToUnicode (`bf`) and encoding (`cid`) CMap resources from a sorted
//! code table. Consecutive codes whose values also step by one are written as a
//! single range entry, the rest as char entries; every section holds at most 100
//! entries.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::{CMapKind, CharCode};

/// Maximum entries in one `begin...`/`end...` section.
pub const MAX_SECTION_ENTRIES: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Entry {
    Char(CharCode, u32),
    Range(CharCode, CharCode, u32),
}

/// Whether a `bf` destination may take part in a range.
fn bf_rangeable(value: u32) -> bool {
    value <= 0xFFFF && !(0xD800..=0xDFFF).contains(&value)
}

/// Hex destination of a `bf` entry, UTF-16BE with surrogate pairs above the BMP.
fn bf_destination(value: u32) -> String {
    if value <= 0xFFFF {
        format!("<{:04X}>", value)
    } else {
        let high = ((value - 0x10000) >> 10) + 0xD800;
        let low = ((value - 0x10000) & 0x3FF) + 0xDC00;
        format!("<{:04X}{:04X}>", high, low)
    }
}

fn compact(entries: &[(CharCode, u32)], kind: CMapKind) -> Vec<Entry> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < entries.len() {
        let (start, value) = entries[i];
        let mut end = i;
        while let Some(&(next, next_value)) = entries.get(end + 1) {
            let (prev, prev_value) = entries[end];
            let continues = prev.next() == Some(next)
                // Runs stay within one last-byte block
                && prev.last_byte() != 0xFF
                && prev_value.checked_add(1) == Some(next_value)
                && (kind == CMapKind::Cid
                    || (bf_rangeable(prev_value)
                        && bf_rangeable(next_value)
                        && prev_value & 0xFF != 0xFF));
            if !continues {
                break;
            }
            end += 1;
        }
        if end > i {
            out.push(Entry::Range(start, entries[end].0, value));
        } else {
            out.push(Entry::Char(start, value));
        }
        i = end + 1;
    }
    out
}

fn destination(kind: CMapKind, value: u32) -> String {
    match kind {
        CMapKind::Unicode => bf_destination(value),
        CMapKind::Cid => value.to_string(),
    }
}

/// Write a CMap resource for `table`, with `project` giving each entry's value
/// (a Unicode scalar for [`CMapKind::Unicode`], a CID otherwise).
pub fn build<V>(
    name: &str,
    kind: CMapKind,
    table: &BTreeMap<CharCode, V>,
    project: impl Fn(&V) -> u32,
) -> String {
    let entries: Vec<(CharCode, u32)> = table.iter().map(|(&c, v)| (c, project(v))).collect();
    let (ordering, cmap_type, prefix) = match kind {
        CMapKind::Unicode => ("UCS", 2, "bf"),
        CMapKind::Cid => ("Identity", 1, "cid"),
    };

    let mut cmap = String::new();
    cmap.push_str("/CIDInit /ProcSet findresource begin\n");
    cmap.push_str("12 dict begin\n");
    cmap.push_str("begincmap\n");
    cmap.push_str("/CIDSystemInfo <<\n");
    cmap.push_str("  /Registry (Adobe)\n");
    let _ = writeln!(cmap, "  /Ordering ({})", ordering);
    cmap.push_str("  /Supplement 0\n");
    cmap.push_str(">> def\n");
    let _ = writeln!(cmap, "/CMapName /{} def", name);
    let _ = writeln!(cmap, "/CMapType {} def", cmap_type);

    // One codespace per code length in use
    let mut lengths: Vec<usize> = entries.iter().map(|(c, _)| c.len()).collect();
    lengths.dedup();
    if lengths.is_empty() {
        lengths.push(2);
    }
    let _ = writeln!(cmap, "{} begincodespacerange", lengths.len());
    for len in &lengths {
        let _ = writeln!(
            cmap,
            "{} {}",
            CharCode::from_value(0, *len),
            CharCode::from_value(u32::MAX, *len)
        );
    }
    cmap.push_str("endcodespacerange\n");

    let compacted = compact(&entries, kind);
    let chars: Vec<_> = compacted
        .iter()
        .filter_map(|e| match *e {
            Entry::Char(c, v) => Some((c, v)),
            Entry::Range(..) => None,
        })
        .collect();
    let ranges: Vec<_> = compacted
        .iter()
        .filter_map(|e| match *e {
            Entry::Range(lo, hi, v) => Some((lo, hi, v)),
            Entry::Char(..) => None,
        })
        .collect();

    for chunk in chars.chunks(MAX_SECTION_ENTRIES) {
        let _ = writeln!(cmap, "{} begin{}char", chunk.len(), prefix);
        for &(code, value) in chunk {
            let _ = writeln!(cmap, "{} {}", code, destination(kind, value));
        }
        let _ = writeln!(cmap, "end{}char", prefix);
    }
    for chunk in ranges.chunks(MAX_SECTION_ENTRIES) {
        let _ = writeln!(cmap, "{} begin{}range", chunk.len(), prefix);
        for &(lo, hi, value) in chunk {
            let _ = writeln!(cmap, "{} {} {}", lo, hi, destination(kind, value));
        }
        let _ = writeln!(cmap, "end{}range", prefix);
    }

    cmap.push_str("endcmap\n");
    cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
    cmap.push_str("end\n");
    cmap.push_str("end\n");

    log::debug!(
        "Built CMap '{}': {} entries as {} chars + {} ranges",
        name,
        entries.len(),
        chars.len(),
        ranges.len()
    );
    cmap
}

/// ToUnicode CMap for a code to character table.
pub fn build_to_unicode(name: &str, table: &BTreeMap<CharCode, char>) -> String {
    build(name, CMapKind::Unicode, table, |&c| c as u32)
}

/// Encoding CMap for a code to CID table.
pub fn build_cid(name: &str, table: &BTreeMap<CharCode, u32>) -> String {
    build(name, CMapKind::Cid, table, |&cid| cid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::cmap::parser;
    use proptest::prelude::*;

    fn code2(v: u32) -> CharCode {
        CharCode::from_value(v, 2)
    }

    #[test]
    fn test_compacts_runs() {
        let table: BTreeMap<_, _> = (0x20..0x30).map(|v| (code2(v), v + 0x100)).collect();
        let text = build_cid("Test", &table);
        assert!(text.contains("1 begincidrange\n<0020> <002F> 288\nendcidrange"));
        assert!(!text.contains("begincidchar"));
        assert!(text.contains("/CMapType 1 def"));
    }

    #[test]
    fn test_bf_header_and_surrogates() {
        let mut table = BTreeMap::new();
        table.insert(code2(3), ' ');
        table.insert(code2(0x24), '\u{1D70C}');
        let text = build_to_unicode("Adobe-Identity-UCS", &table);
        assert!(text.starts_with("/CIDInit /ProcSet findresource begin\n"));
        assert!(text.contains("/Ordering (UCS)"));
        assert!(text.contains("/CMapType 2 def"));
        assert!(text.contains("<0000> <FFFF>\nendcodespacerange"));
        assert!(text.contains("<0024> <D835DF0C>"));
        assert!(text.ends_with("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n"));
    }

    #[test]
    fn test_run_breaks_at_last_byte_wrap() {
        let table: BTreeMap<_, _> = (0xFE..=0x101).map(|v| (code2(v), v)).collect();
        let entries: Vec<_> = table.iter().map(|(&c, &v)| (c, v)).collect();
        let compacted = compact(&entries, CMapKind::Cid);
        assert_eq!(
            compacted,
            vec![
                Entry::Range(code2(0xFE), code2(0xFF), 0xFE),
                Entry::Range(code2(0x100), code2(0x101), 0x100),
            ]
        );
    }

    #[test]
    fn test_sections_hold_at_most_100_entries() {
        // Every other code: no runs
        let table: BTreeMap<_, _> = (0..250u32).map(|i| (code2(i * 2), i)).collect();
        let text = build_cid("Sparse", &table);
        assert_eq!(text.matches("100 begincidchar").count(), 2);
        assert_eq!(text.matches("50 begincidchar").count(), 1);
    }

    #[test]
    fn test_mixed_code_lengths() {
        let mut table = BTreeMap::new();
        table.insert(CharCode::from_value(0x41, 1), 'A');
        table.insert(code2(0x8140), '\u{3000}');
        let text = build_to_unicode("Mixed", &table);
        assert!(text.contains("2 begincodespacerange\n<00> <FF>\n<0000> <FFFF>\n"));
    }

    fn bf_value() -> impl Strategy<Value = char> {
        prop_oneof![
            (0x20u32..0x7F).prop_map(|v| char::from_u32(v).unwrap_or(' ')),
            any::<char>(),
        ]
    }

    proptest! {
        #[test]
        fn prop_to_unicode_round_trip(
            entries in proptest::collection::btree_map(
                (1usize..=2, 0u32..0x200).prop_map(|(len, v)| CharCode::from_value(v, len)),
                bf_value(),
                0..300,
            )
        ) {
            let text = build_to_unicode("RoundTrip", &entries);
            let parsed = parser::parse_strict(text.as_bytes()).unwrap();
            let expected: BTreeMap<CharCode, u32> =
                entries.iter().map(|(&k, &c)| (k, c as u32)).collect();
            prop_assert_eq!(parsed.mappings(), &expected);
        }

        #[test]
        fn prop_cid_round_trip(
            entries in proptest::collection::btree_map(
                (0u32..0x400).prop_map(|v| CharCode::from_value(v, 2)),
                0u32..0x100,
                0..300,
            )
        ) {
            let text = build_cid("RoundTrip", &entries);
            let parsed = parser::parse_strict(text.as_bytes()).unwrap();
            prop_assert_eq!(parsed.mappings(), &entries);
        }
    }
}
