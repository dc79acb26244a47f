//! Font resources.
//!
//! Layers, leaves first:
//!
//! - [`glyph_list`] and [`encoding`]: static glyph name and single-byte encoding tables
//! - [`parsers`]: TrueType/OpenType, CFF, AFM and Type1 programs reduced to a
//!   [`FormatBundle`]
//! - [`cmap`]: CMap tables, their text format and the predefined CMaps
//! - [`bimap`]: the injective code table behind every font
//! - [`font`], [`loader`], [`embed`], [`cache`]: reconciliation of the above into a
//!   [`Font`] that maps text to codes and measures it

pub mod bimap;
pub mod cache;
pub mod cmap;
pub mod embed;
pub mod encoding;
pub mod font;
pub mod glyph_list;
pub mod loader;
pub mod parsers;
pub mod program;

pub use bimap::BiMap;
pub use cache::{FontCache, FontResource, FontState};
pub use cmap::{CMap, CMapKind, CharCode};
pub use embed::embed;
pub use encoding::LegacyEncoding;
pub use font::{CompositeKind, EmbeddedProgram, Font, FontKind, SimpleKind};
pub use loader::{DictionaryLoader, FontLoader, ProgramLoader};
pub use program::{CodeSpace, FontFlags, FontFormat, FontMetrics, FormatBundle, GlyphPair, OutlineFlavor};
