//! CMap tables.
//!
//! A CMap maps character codes (1 to 4 bytes, big-endian) to either Unicode scalar
//! values (`bf` mappings, as in ToUnicode streams) or CIDs (`cid` mappings, as in
//! the encoding of a composite font). This module holds the in-memory table;
//! [`parser`] reads the PostScript-like text format, [`builder`] writes it and
//! [`predefined`] provides the named CMaps a PDF may reference without embedding.
//!
//! # Example
//!
//! ```
//! use pdf_fonts::fonts::cmap::{self, CharCode};
//!
//! let data = b"1 begincodespacerange <00> <FF> endcodespacerange
//! 1 beginbfrange <41> <43> <0061> endbfrange";
//! let cmap = cmap::parser::parse(data).unwrap();
//! assert_eq!(cmap.get(&CharCode::from_value(0x42, 1)), Some(0x62));
//! ```

pub mod builder;
pub mod parser;
pub mod predefined;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A character code of 1 to 4 bytes.
///
/// Codes order first by length, then by their bytes, so all one-byte codes sort
/// before all two-byte codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharCode {
    bytes: [u8; 4],
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl CharCode {
    /// Longest code in bytes.
    pub const MAX_LEN: usize = 4;

    /// Code from its bytes; `None` when empty or longer than four bytes.
    pub fn new(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > Self::MAX_LEN {
            return None;
        }
        let mut buf = [0u8; 4];
        buf[..bytes.len()].copy_from_slice(bytes);
        Some(Self {
            bytes: buf,
            len: bytes.len() as u8,
        })
    }

    /// The low `len` bytes of `value`, big-endian. `len` is clamped to 1..=4.
    pub fn from_value(value: u32, len: usize) -> Self {
        let len = len.clamp(1, Self::MAX_LEN);
        let be = value.to_be_bytes();
        let mut buf = [0u8; 4];
        buf[..len].copy_from_slice(&be[4 - len..]);
        Self {
            bytes: buf,
            len: len as u8,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Big-endian numeric value.
    pub fn value(&self) -> u32 {
        self.as_bytes()
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    }

    /// The next code of the same length, `None` past the all-`FF` code.
    pub fn next(&self) -> Option<Self> {
        let mut next = *self;
        for i in (0..self.len()).rev() {
            let (b, carry) = next.bytes[i].overflowing_add(1);
            next.bytes[i] = b;
            if !carry {
                return Some(next);
            }
        }
        None
    }

    pub fn last_byte(&self) -> u8 {
        self.bytes[self.len() - 1]
    }

    /// Uppercase hex digits without delimiters.
    pub fn to_hex(&self) -> String {
        self.as_bytes().iter().map(|b| format!("{:02X}", b)).collect()
    }
}

impl Ord for CharCode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.len, self.bytes).cmp(&(other.len, other.bytes))
    }
}

impl PartialOrd for CharCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.to_hex())
    }
}

impl fmt::Debug for CharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// What the values of a CMap mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum CMapKind {
    /// Unicode scalar values (`bfchar` / `bfrange`)
    Unicode,
    /// Character IDs (`cidchar` / `cidrange`)
    Cid,
}

/// A `begincodespacerange` entry.
///
/// A code is inside the range when it has the same length and every byte lies
/// between the corresponding bytes of `low` and `high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodespaceRange {
    pub low: CharCode,
    pub high: CharCode,
}

impl CodespaceRange {
    pub fn contains(&self, code: &CharCode) -> bool {
        code.len() == self.low.len()
            && code
                .as_bytes()
                .iter()
                .zip(self.low.as_bytes().iter().zip(self.high.as_bytes()))
                .all(|(b, (lo, hi))| lo <= b && b <= hi)
    }
}

/// Character code to Unicode or CID table.
#[derive(Debug, Clone)]
pub struct CMap {
    /// `/CMapName`
    pub name: String,
    pub kind: CMapKind,
    /// `/WMode`: 0 horizontal, 1 vertical
    pub wmode: u8,
    pub codespaces: Vec<CodespaceRange>,
    mappings: BTreeMap<CharCode, u32>,
    /// Identity-H/V: every two-byte code maps to its own value
    identity: bool,
}

impl CMap {
    /// Empty table.
    pub fn new(name: impl Into<String>, kind: CMapKind) -> Self {
        Self {
            name: name.into(),
            kind,
            wmode: 0,
            codespaces: Vec::new(),
            mappings: BTreeMap::new(),
            identity: false,
        }
    }

    /// Two-byte identity CMap (`Identity-H` or `Identity-V`).
    pub fn identity(name: impl Into<String>, wmode: u8) -> Self {
        let mut cmap = Self::new(name, CMapKind::Cid);
        cmap.wmode = wmode;
        cmap.identity = true;
        cmap.codespaces.push(CodespaceRange {
            low: CharCode::from_value(0, 2),
            high: CharCode::from_value(0xFFFF, 2),
        });
        cmap
    }

    /// Table from explicit mappings.
    pub fn from_mappings(
        name: impl Into<String>,
        kind: CMapKind,
        mappings: impl IntoIterator<Item = (CharCode, u32)>,
    ) -> Self {
        let mut cmap = Self::new(name, kind);
        cmap.mappings.extend(mappings);
        cmap
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Add or replace a mapping, returning the previous value.
    pub fn insert(&mut self, code: CharCode, value: u32) -> Option<u32> {
        self.mappings.insert(code, value)
    }

    pub fn get(&self, code: &CharCode) -> Option<u32> {
        match self.mappings.get(code) {
            Some(&v) => Some(v),
            None if self.identity && code.len() == 2 => Some(code.value()),
            None => None,
        }
    }

    /// Number of mapped codes.
    pub fn len(&self) -> usize {
        if self.identity {
            0x10000
        } else {
            self.mappings.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All mappings in code order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (CharCode, u32)> + '_> {
        if self.identity {
            Box::new((0..=0xFFFFu32).map(|v| (CharCode::from_value(v, 2), v)))
        } else {
            Box::new(self.mappings.iter().map(|(&c, &v)| (c, v)))
        }
    }

    /// Explicit mappings, excluding the implicit identity ones.
    pub fn mappings(&self) -> &BTreeMap<CharCode, u32> {
        &self.mappings
    }

    /// Longest code this CMap can match.
    pub fn max_code_length(&self) -> usize {
        let from_codespace = self.codespaces.iter().map(|r| r.low.len()).max();
        let from_mappings = self.mappings.keys().next_back().map(CharCode::len);
        match (from_codespace, from_mappings, self.identity) {
            (_, _, true) => 2,
            (Some(a), Some(b), _) => a.max(b),
            (Some(a), None, _) | (None, Some(a), _) => a,
            (None, None, _) => 1,
        }
    }

    /// Merge a `usecmap` parent: its mappings apply where this table has none.
    pub fn use_base(&mut self, base: &CMap) {
        for (code, value) in base.mappings.iter() {
            self.mappings.entry(*code).or_insert(*value);
        }
        for range in &base.codespaces {
            if !self.codespaces.contains(range) {
                self.codespaces.push(*range);
            }
        }
        self.identity |= base.identity;
    }

    /// Code to Unicode through this code-to-CID table and a CID-to-Unicode table
    /// keyed by two-byte CIDs.
    pub fn compose(&self, cid_to_unicode: &CMap) -> BTreeMap<CharCode, char> {
        let mut out = BTreeMap::new();
        if self.identity {
            for (cid, unicode) in cid_to_unicode.iter() {
                if let Some(c) = char::from_u32(unicode) {
                    out.insert(CharCode::from_value(cid.value(), 2), c);
                }
            }
        }
        for (code, &cid) in &self.mappings {
            let unicode = cid_to_unicode
                .get(&CharCode::from_value(cid, 2))
                .and_then(char::from_u32);
            if let Some(c) = unicode {
                out.insert(*code, c);
            }
        }
        out
    }
}
