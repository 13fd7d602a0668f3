#![warn(rust_2018_idioms)]

//! Parsing and glyph outline loading for Adobe Type 1 fonts.

/// Reading of binary data.
pub mod binary;
pub mod encoding;
pub mod error;
pub mod glyph_info;
pub mod outline;
pub mod pdf;
/// Reading of PFB and PFA files.
pub mod pfb;
pub mod postscript;
pub mod type1;

pub use pathfinder_geometry;
pub use type1::Type1Font;
