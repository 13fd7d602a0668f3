//! Adobe Type 1 font faces.
//!
//! A face is built from the cleartext and private portions of a font program, see
//! [`Segments`](crate::pfb::Segments). Glyph outlines are produced on demand by running the
//! glyph's charstring.
//!
//! References:
//! - <https://adobe-type-tools.github.io/font-tech-notes/pdfs/T1_SPEC.pdf>

use log::debug;
use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::vec2f;
use rustc_hash::FxHashMap;

use crate::binary::read::ReadScope;
use crate::encoding::{standard_glyph_name, Encoding, NOTDEF};
use crate::error::{FontError, GlyphError};
use crate::glyph_info::glyph_name_to_char;
use crate::outline::{BoundingBox, OutlineBuilder, OutlineSink, Segment};
use crate::pfb::Segments;

pub mod charstring;
pub mod info;
mod outline;
mod parse;

use charstring::Outline;
pub use charstring::Seac;
pub use info::{FontSummary, PostScriptInfo, Style};

/// A named glyph program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharString {
    pub name: String,
    /// The decrypted charstring, without the `lenIV` prefix.
    pub data: Vec<u8>,
}

/// Whether a glyph may be a `seac` composite.
///
/// The glyphs a composite is made of must be simple glyphs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Composite {
    Allowed,
    Forbidden,
}

/// A loaded glyph outline.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub segments: Vec<Segment>,
    /// Bounds of the outline, including control points.
    pub bounds: RectF,
    pub advance: f32,
}

/// A parsed Type 1 font.
///
/// If the font has a glyph named `.notdef` it is glyph 0.
#[derive(Clone, Debug)]
pub struct Type1Font {
    encoding: Encoding,
    font_bbox: [f32; 4],
    font_matrix: [f32; 6],
    info: PostScriptInfo,
    stroke_width: f32,
    paint_type: i32,
    font_type: i32,
    unique_id: Option<i32>,
    char_strings: Vec<CharString>,
    subrs: Vec<Vec<u8>>,
    cmap: FxHashMap<char, u16>,
}

impl Type1Font {
    /// Read a font from the contents of a PFB or PFA file.
    pub fn parse(data: &[u8]) -> Result<Type1Font, FontError> {
        let segments = ReadScope::new(data).read::<Segments>()?;
        Type1Font::new(&segments.cleartext, &segments.private)
    }

    /// Build a font from its cleartext portion and its decrypted private portion.
    pub fn new(cleartext: &[u8], private: &[u8]) -> Result<Type1Font, FontError> {
        let mut font = parse::parse_font(cleartext, private)?;
        font.move_notdef_first();
        font.cmap = synthesize_cmap(&font.char_strings);
        Ok(font)
    }

    /// Swap the first `.notdef` glyph with glyph 0.
    fn move_notdef_first(&mut self) {
        if let Some(index) = self
            .char_strings
            .iter()
            .position(|char_string| char_string.name == NOTDEF)
        {
            self.char_strings.swap(0, index);
        }
    }

    pub fn num_glyphs(&self) -> u16 {
        // The parser rejects fonts with more glyphs than fit
        self.char_strings.len() as u16
    }

    /// Load the outline of a glyph.
    ///
    /// `seac` composites are assembled when `composite` is `Composite::Allowed`, and rejected
    /// with `GlyphError::NestedComposite` otherwise.
    pub fn load_glyph(&self, index: u16, composite: Composite) -> Result<Glyph, GlyphError> {
        let char_string = self
            .char_strings
            .get(usize::from(index))
            .ok_or(GlyphError::InvalidGlyphIndex(index))?;
        let output = charstring::execute(&char_string.data, &self.subrs)?;

        let (segments, bounds) = match output.outline {
            Outline::Drawn { segments, bounds } => (segments, bounds),
            Outline::Composite(seac) => match composite {
                Composite::Allowed => self.assemble_seac(&seac)?,
                Composite::Forbidden => return Err(GlyphError::NestedComposite),
            },
        };
        Ok(Glyph {
            segments,
            bounds,
            advance: output.advance,
        })
    }

    /// Load a glyph, assembling it if it's a composite.
    pub fn glyph(&self, index: u16) -> Result<Glyph, GlyphError> {
        self.load_glyph(index, Composite::Allowed)
    }

    /// Combine the base and accent glyphs of a `seac` composite.
    ///
    /// The accent is placed so that its left edge lines up with the left edge of the base,
    /// then moved by the accent origin.
    pub fn assemble_seac(&self, seac: &Seac) -> Result<(Vec<Segment>, RectF), GlyphError> {
        let base_index = self.seac_glyph_index(seac.base_code)?;
        let accent_index = self.seac_glyph_index(seac.accent_code)?;
        let base = self.load_glyph(base_index, Composite::Forbidden)?;
        let accent = self.load_glyph(accent_index, Composite::Forbidden)?;

        let offset = vec2f(
            base.bounds.min_x() - accent.bounds.min_x() + seac.accent_origin.x(),
            seac.accent_origin.y(),
        );
        let accent_bounds = RectF::from_points(
            accent.bounds.origin() + offset,
            accent.bounds.lower_right() + offset,
        );

        let mut segments = base.segments;
        segments.extend(
            accent
                .segments
                .into_iter()
                .map(|segment| segment.translate(offset)),
        );
        Ok((segments, base.bounds.union_rect(accent_bounds)))
    }

    fn seac_glyph_index(&self, code: i32) -> Result<u16, GlyphError> {
        let name = standard_glyph_name(code).ok_or(GlyphError::InvalidSeacCode(code))?;
        self.glyph_index_for_name(name)
            .ok_or(GlyphError::UnknownSeacGlyph(name))
    }

    /// Map a character to a glyph by way of the glyph names.
    pub fn lookup_glyph_index(&self, ch: char) -> Option<u16> {
        self.cmap.get(&ch).copied()
    }

    /// Index of the first glyph called `name`.
    pub fn glyph_index_for_name(&self, name: &str) -> Option<u16> {
        self.char_strings
            .iter()
            .position(|char_string| char_string.name == name)
            .map(|index| index as u16)
    }

    /// Map a byte code to a glyph through the font's builtin encoding.
    pub fn glyph_index_for_code(&self, code: u8) -> Option<u16> {
        self.encoding
            .glyph_name(code)
            .and_then(|name| self.glyph_index_for_name(name))
    }

    pub fn glyph_name(&self, index: u16) -> Option<&str> {
        self.char_strings
            .get(usize::from(index))
            .map(|char_string| char_string.name.as_str())
    }

    /// The advance width set by the glyph's `hsbw` or `sbw`, in font units.
    pub fn horizontal_advance(&self, index: u16) -> Result<f32, GlyphError> {
        let char_string = self
            .char_strings
            .get(usize::from(index))
            .ok_or(GlyphError::InvalidGlyphIndex(index))?;
        Ok(charstring::execute(&char_string.data, &self.subrs)?.advance)
    }

    pub fn summary(&self) -> FontSummary {
        let style = self.info.style();
        FontSummary {
            is_italic: style.is_italic,
            is_bold: style.is_bold,
            family: style.family_name,
            style: style.style_name,
            has_scalable_glyphs: true,
            has_bitmap_glyphs: false,
            has_color_glyphs: false,
        }
    }

    pub fn postscript_info(&self) -> &PostScriptInfo {
        &self.info
    }

    /// The `/FontName` of the font.
    pub fn postscript_name(&self) -> &str {
        &self.info.font_name
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// `[x_min, y_min, x_max, y_max]` in font units.
    pub fn font_bbox(&self) -> [f32; 4] {
        self.font_bbox
    }

    /// Transformation from font units to text space.
    pub fn font_matrix(&self) -> [f32; 6] {
        self.font_matrix
    }

    pub fn paint_type(&self) -> i32 {
        self.paint_type
    }

    pub fn font_type(&self) -> i32 {
        self.font_type
    }

    pub fn unique_id(&self) -> Option<i32> {
        self.unique_id
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }
}

/// Map characters to glyphs using their names. Later glyphs win.
fn synthesize_cmap(char_strings: &[CharString]) -> FxHashMap<char, u16> {
    let mut cmap = FxHashMap::default();
    for (index, char_string) in char_strings.iter().enumerate() {
        match glyph_name_to_char(&char_string.name) {
            Some(ch) => {
                cmap.insert(ch, index as u16);
            }
            None => debug!("no character for glyph name {}", char_string.name),
        }
    }
    cmap
}

impl OutlineBuilder for Type1Font {
    type Error = GlyphError;

    fn visit<S: OutlineSink>(&mut self, glyph_index: u16, sink: &mut S) -> Result<(), Self::Error> {
        let glyph = self.glyph(glyph_index)?;
        for segment in &glyph.segments {
            segment.visit(sink);
        }
        Ok(())
    }
}

impl BoundingBox for Type1Font {
    type Error = GlyphError;

    fn bounding_box(&self, glyph_id: u16) -> Result<RectF, Self::Error> {
        Ok(self.glyph(glyph_id)?.bounds)
    }
}
