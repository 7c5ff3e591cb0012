//! bdfconv: BDF bitmap font transcoding.
//! Emits C glyph tables and BBC BASIC codepoint listings from BDF sources.

mod error;
pub mod glyph;
pub mod line;
pub mod listing;
pub mod reader;
pub mod source;
pub mod summary;
pub mod table;

pub use error::{BdfError, Result};
pub use glyph::GlyphRecord;
pub use line::{BoundingBox, Line};
pub use listing::{write_codepoint_listing, DataAccumulator, DataLine, ListingOptions};
pub use reader::{BdfReader, RowCount};
pub use source::decode_source;
pub use summary::FontSummary;
pub use table::{symbol_name, write_glyph_table, IndexStyle, TableLayout, TableOptions};

// Test utilities
pub mod test_support;
