//! Predefined CMaps that a PDF can name instead of embedding.
//!
//! Covers the identity CMaps and CID-to-Unicode (UCS2) tables for the four Adobe
//! CJK character collections. The UCS2 tables are partial: they hold the ranges
//! listed below, which include the proportional ASCII block every collection
//! starts with (CIDs 1..=95).

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{CMap, CMapKind, CharCode};

/// `(first CID, last CID, first Unicode)` runs.
type CidRuns = &'static [(u16, u16, u32)];

const ADOBE_JAPAN1: CidRuns = &[
    (1, 95, 0x0020),
    (633, 633, 0x3000),
    // Hiragana ぁ..ん, then katakana ァ..ヶ
    (842, 924, 0x3041),
    (925, 1010, 0x30A1),
];

const ADOBE_GB1: CidRuns = &[(1, 95, 0x0020), (814, 814, 0x3000)];

const ADOBE_CNS1: CidRuns = &[
    (1, 95, 0x0020),
    (601, 601, 0x3000),
    // Bopomofo ㄅ..ㄩ
    (800, 836, 0x3105),
];

const ADOBE_KOREA1: CidRuns = &[(1, 95, 0x0020), (601, 601, 0x3000)];

fn ucs2(name: &str, runs: CidRuns) -> CMap {
    let mappings = runs.iter().flat_map(|&(first, last, unicode)| {
        (first..=last).map(move |cid| {
            (
                CharCode::from_value(u32::from(cid), 2),
                unicode + u32::from(cid - first),
            )
        })
    });
    let mut cmap = CMap::from_mappings(name, CMapKind::Unicode, mappings);
    cmap.codespaces.push(super::CodespaceRange {
        low: CharCode::from_value(0, 2),
        high: CharCode::from_value(0xFFFF, 2),
    });
    cmap
}

lazy_static! {
    static ref PREDEFINED: HashMap<&'static str, CMap> = {
        let mut m = HashMap::new();
        m.insert("Identity-H", CMap::identity("Identity-H", 0));
        m.insert("Identity-V", CMap::identity("Identity-V", 1));
        m.insert("Adobe-Japan1-UCS2", ucs2("Adobe-Japan1-UCS2", ADOBE_JAPAN1));
        m.insert("Adobe-GB1-UCS2", ucs2("Adobe-GB1-UCS2", ADOBE_GB1));
        m.insert("Adobe-CNS1-UCS2", ucs2("Adobe-CNS1-UCS2", ADOBE_CNS1));
        m.insert("Adobe-Korea1-UCS2", ucs2("Adobe-Korea1-UCS2", ADOBE_KOREA1));
        m
    };
}

/// Predefined CMap by name.
pub fn get(name: &str) -> Option<&'static CMap> {
    PREDEFINED.get(name)
}

/// CID-to-Unicode table for a character collection.
pub fn ucs2_for(registry: &str, ordering: &str) -> Option<&'static CMap> {
    if registry != "Adobe" {
        return None;
    }
    get(&format!("{}-{}-UCS2", registry, ordering))
}
