// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::unnecessary_map_or)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Fonts
//!
//! Font resource subsystem for PDF documents.
//!
//! ## Core Features
//!
//! - **Font programs**: TrueType/OpenType (`cmap` formats 0, 4, 6), bare CFF
//!   (name-keyed and CID-keyed), AFM metrics and Type1 (PFB/PFA)
//! - **CMaps**: tokenizer and interpreter for the CMap text format, predefined
//!   Identity and UCS2 CMaps, and a compacting writer (ranges, 100-entry sections)
//! - **Reconciliation**: one [`Font`](fonts::Font) model mapping character codes,
//!   CIDs, glyph indices and Unicode with collision-free code assignment
//! - **Text operations**: decode, encode, widths and kerning with configurable
//!   fallback for unmappable input
//! - **Font dictionaries**: loading from stored dictionaries through an
//!   [`ObjectStore`](object::ObjectStore) and synthesis of Type0 and simple font
//!   dictionaries for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_fonts::config::FontConfig;
//! use pdf_fonts::fonts::{embed, FontLoader, ProgramLoader};
//! use pdf_fonts::object::MemoryStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let font = ProgramLoader::from_file("DejaVuSans.ttf")?.load(&FontConfig::new())?;
//!
//! let codes = font.encode("Hello")?;
//! assert_eq!(font.decode(&codes)?, "Hello");
//! println!("width at 12pt: {}", font.width("Hello", 12.0));
//!
//! let mut store = MemoryStore::new();
//! let font_ref = embed(&font, &mut store)?;
//! println!("font dictionary: {}", font_ref);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

// Error handling
pub mod error;

// Configuration
pub mod config;

// Document object model seam
pub mod object;

// Font programs, CMaps and reconciliation
pub mod fonts;

// Re-exports
pub use config::{FallbackPolicy, FontConfig};
pub use error::{Error, Result};
pub use fonts::{Font, FontKind};
