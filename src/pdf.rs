//! Font data needed to embed a font in a PDF document.
//!
//! None of these are available for Type 1 faces yet. Every method returns
//! `FontError::NotImplemented`.

use std::io::Write;

use pathfinder_geometry::rect::RectF;

use crate::error::FontError;
use crate::type1::Type1Font;

/// Entries of the PDF font dictionary and font descriptor, and font program subsetting.
pub trait PdfEmbedding {
    /// The `BaseFont` name.
    fn name_pdf(&self) -> Result<String, FontError>;
    /// The `Widths` array, in glyph space units.
    fn widths_pdf(&self) -> Result<Vec<f32>, FontError>;
    /// A `ToUnicode` CMap stream.
    fn cmap_pdf(&self) -> Result<String, FontError>;
    fn ascender_pdf(&self) -> Result<f32, FontError>;
    fn descender_pdf(&self) -> Result<f32, FontError>;
    fn cap_height_pdf(&self) -> Result<f32, FontError>;
    fn bounding_box_pdf(&self) -> Result<RectF, FontError>;
    /// The font descriptor `Flags`.
    fn flags_pdf(&self) -> Result<u32, FontError>;
    fn italic_angle_pdf(&self) -> Result<f32, FontError>;
    fn stem_v_pdf(&self) -> Result<f32, FontError>;
    fn x_height_pdf(&self) -> Result<f32, FontError>;
    /// Restrict the font to the glyphs in `glyph_ids`.
    fn subset(&mut self, glyph_ids: &[u16]) -> Result<(), FontError>;
    /// Write the font program, as subset by `subset`.
    fn write_subset<W: Write>(&self, writer: &mut W) -> Result<(), FontError>;
}

impl PdfEmbedding for Type1Font {
    fn name_pdf(&self) -> Result<String, FontError> {
        Err(FontError::NotImplemented)
    }

    fn widths_pdf(&self) -> Result<Vec<f32>, FontError> {
        Err(FontError::NotImplemented)
    }

    fn cmap_pdf(&self) -> Result<String, FontError> {
        Err(FontError::NotImplemented)
    }

    fn ascender_pdf(&self) -> Result<f32, FontError> {
        Err(FontError::NotImplemented)
    }

    fn descender_pdf(&self) -> Result<f32, FontError> {
        Err(FontError::NotImplemented)
    }

    fn cap_height_pdf(&self) -> Result<f32, FontError> {
        Err(FontError::NotImplemented)
    }

    fn bounding_box_pdf(&self) -> Result<RectF, FontError> {
        Err(FontError::NotImplemented)
    }

    fn flags_pdf(&self) -> Result<u32, FontError> {
        Err(FontError::NotImplemented)
    }

    fn italic_angle_pdf(&self) -> Result<f32, FontError> {
        Err(FontError::NotImplemented)
    }

    fn stem_v_pdf(&self) -> Result<f32, FontError> {
        Err(FontError::NotImplemented)
    }

    fn x_height_pdf(&self) -> Result<f32, FontError> {
        Err(FontError::NotImplemented)
    }

    fn subset(&mut self, _glyph_ids: &[u16]) -> Result<(), FontError> {
        Err(FontError::NotImplemented)
    }

    fn write_subset<W: Write>(&self, _writer: &mut W) -> Result<(), FontError> {
        Err(FontError::NotImplemented)
    }
}
