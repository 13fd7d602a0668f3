mod common;

use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::{vec2f, Vector2F};

use type1_font::error::{CharStringError, FontError, GlyphError, ParseError};
use type1_font::outline::{BoundingBox, OutlineBuilder, OutlineSink, Segment};
use type1_font::pdf::PdfEmbedding;
use type1_font::type1::{Composite, FontSummary};
use type1_font::Type1Font;

use crate::common::writer::FontBuilder;

fn accented_font() -> FontBuilder {
    FontBuilder::new("Test-Regular")
        .names("Test", "Test", "Regular")
        .subr("10 vlineto 10 hlineto -10 vlineto return")
        .glyph("A", "0 500 hsbw 0 callsubr endchar")
        .glyph("acute", "0 200 hsbw 0 0 rmoveto 5 5 rlineto endchar")
        .glyph(".notdef", "0 250 hsbw endchar")
        .glyph("Aacute", "0 520 hsbw 0 2 12 65 194 seac")
}

fn parse(builder: &FontBuilder) -> Type1Font {
    Type1Font::parse(&builder.pfb()).unwrap()
}

#[derive(Default)]
struct Recorder {
    commands: Vec<String>,
}

impl OutlineSink for Recorder {
    fn move_to(&mut self, to: Vector2F) {
        self.commands.push(format!("M {} {}", to.x(), to.y()));
    }

    fn line_to(&mut self, to: Vector2F) {
        self.commands.push(format!("L {} {}", to.x(), to.y()));
    }

    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        self.commands
            .push(format!("Q {} {} {} {}", ctrl.x(), ctrl.y(), to.x(), to.y()));
    }

    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
        self.commands.push(format!(
            "C {} {} {} {} {} {}",
            ctrl.from_x(),
            ctrl.from_y(),
            ctrl.to_x(),
            ctrl.to_y(),
            to.x(),
            to.y()
        ));
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
    }
}

#[test]
fn pfa_and_pfb_agree() {
    let builder = accented_font();
    let pfa = Type1Font::parse(&builder.pfa()).unwrap();
    let pfb = Type1Font::parse(&builder.pfb()).unwrap();

    assert_eq!(pfa.postscript_name(), "Test-Regular");
    assert_eq!(pfb.postscript_name(), "Test-Regular");
    assert_eq!(pfa.num_glyphs(), 4);
    assert_eq!(pfb.num_glyphs(), 4);
    for index in 0..pfa.num_glyphs() {
        assert_eq!(pfa.glyph_name(index), pfb.glyph_name(index));
        assert_eq!(pfa.glyph(index), pfb.glyph(index));
    }
}

#[test]
fn not_a_font() {
    assert_eq!(
        Type1Font::parse(b"%!PS-Adobe-3.0\nshowpage\n").unwrap_err(),
        FontError::InvalidFontFile(ParseError::BadVersion)
    );
    assert_eq!(
        Type1Font::parse(b"").unwrap_err(),
        FontError::InvalidFontFile(ParseError::BadEof)
    );
    let builder = FontBuilder::new("NoGlyphs");
    assert_eq!(
        Type1Font::parse(&builder.pfa()).unwrap_err(),
        FontError::InvalidFontFile(ParseError::MissingValue)
    );
}

#[test]
fn unbalanced_procedures() {
    let braces = vec![b'{'; 200_000];
    assert_eq!(
        Type1Font::new(&braces, b"").unwrap_err(),
        FontError::InvalidFontFile(ParseError::MissingValue)
    );
    assert_eq!(
        Type1Font::new(&accented_font().cleartext(), &braces).unwrap_err(),
        FontError::InvalidFontFile(ParseError::MissingValue)
    );
}

#[test]
fn notdef_is_first() {
    let font = parse(&accented_font());
    assert_eq!(font.glyph_name(0), Some(".notdef"));
    assert_eq!(font.glyph_name(1), Some("acute"));
    assert_eq!(font.glyph_name(2), Some("A"));
    assert_eq!(font.glyph_name(3), Some("Aacute"));
    assert_eq!(font.glyph_name(4), None);
}

#[test]
fn characters_map_to_glyphs() {
    let font = parse(&accented_font());
    assert_eq!(font.lookup_glyph_index('A'), Some(2));
    assert_eq!(font.lookup_glyph_index('´'), Some(1));
    assert_eq!(font.lookup_glyph_index('Á'), Some(3));
    assert_eq!(font.lookup_glyph_index('B'), None);
}

#[test]
fn glyph_index_out_of_range() {
    let font = parse(&accented_font());
    assert_eq!(font.glyph(4), Err(GlyphError::InvalidGlyphIndex(4)));
    assert_eq!(
        font.horizontal_advance(u16::MAX),
        Err(GlyphError::InvalidGlyphIndex(u16::MAX))
    );
}

#[test]
fn simple_glyph() {
    let font = parse(&accented_font());
    let glyph = font.glyph(2).unwrap();
    assert_eq!(glyph.advance, 500.);
    assert_eq!(
        glyph.segments,
        [
            Segment::MoveTo(vec2f(0., 0.)),
            Segment::LineTo(vec2f(0., 10.)),
            Segment::LineTo(vec2f(10., 10.)),
            Segment::LineTo(vec2f(10., 0.)),
            Segment::Close,
        ]
    );
    assert_eq!(
        glyph.bounds,
        RectF::from_points(Vector2F::zero(), vec2f(10., 10.))
    );
}

#[test]
fn composite_glyph() {
    let font = parse(&accented_font());
    let glyph = font.glyph(3).unwrap();

    assert_eq!(glyph.advance, 520.);
    assert_eq!(
        glyph.bounds,
        RectF::from_points(Vector2F::zero(), vec2f(10., 17.))
    );
    assert_eq!(glyph.segments.len(), 8);
    assert_eq!(
        glyph.segments[5..],
        [
            Segment::MoveTo(vec2f(2., 12.)),
            Segment::LineTo(vec2f(7., 17.)),
            Segment::Close,
        ]
    );
    assert_eq!(font.horizontal_advance(3), Ok(520.));
    assert_eq!(
        font.load_glyph(3, Composite::Forbidden),
        Err(GlyphError::NestedComposite)
    );
}

#[test]
fn nested_composite() {
    let mut builder = accented_font().glyph("grave", "0 200 hsbw 0 0 rmoveto 5 5 rlineto endchar");
    // `A` becomes a composite of itself and a grave
    builder.glyphs[0].1 = "0 500 hsbw 0 0 0 65 193 seac".to_string();
    let font = parse(&builder);

    let aacute = font.glyph_index_for_name("Aacute").unwrap();
    assert_eq!(font.glyph(aacute), Err(GlyphError::NestedComposite));
    assert_eq!(font.glyph(2), Err(GlyphError::NestedComposite));
    assert_eq!(font.horizontal_advance(2), Ok(500.));
}

#[test]
fn bad_seac_codes() {
    let builder = accented_font()
        .glyph("Bacute", "0 500 hsbw 0 0 0 66 194 seac")
        .glyph("Zbroken", "0 500 hsbw 0 0 0 9999 194 seac")
        .glyph("Abroken", "0 500 hsbw 0 0 0 65 -1 seac");
    let font = parse(&builder);

    assert_eq!(
        font.glyph(font.glyph_index_for_name("Bacute").unwrap()),
        Err(GlyphError::UnknownSeacGlyph("B"))
    );
    assert_eq!(
        font.glyph(font.glyph_index_for_name("Zbroken").unwrap()),
        Err(GlyphError::InvalidSeacCode(9999))
    );
    assert_eq!(
        font.glyph(font.glyph_index_for_name("Abroken").unwrap()),
        Err(GlyphError::InvalidSeacCode(-1))
    );
}

#[test]
fn charstring_errors_propagate() {
    let builder = accented_font()
        .glyph("B", "0 500 hsbw 10 hlineto")
        .glyph("C", "0 500 hsbw 7 callsubr endchar");
    let font = parse(&builder);

    assert_eq!(
        font.glyph(font.glyph_index_for_name("B").unwrap()),
        Err(GlyphError::CharString(CharStringError::MissingEndChar))
    );
    assert_eq!(
        font.glyph(font.glyph_index_for_name("C").unwrap()),
        Err(GlyphError::CharString(
            CharStringError::InvalidSubroutineIndex
        ))
    );
}

#[test]
fn outline_visitor() {
    let mut font = parse(&accented_font());
    let mut sink = Recorder::default();
    font.visit(1, &mut sink).unwrap();
    assert_eq!(sink.commands, ["M 0 0", "L 5 5", "Z"]);

    let mut sink = Recorder::default();
    assert_eq!(
        font.visit(10, &mut sink),
        Err(GlyphError::InvalidGlyphIndex(10))
    );
    assert!(sink.commands.is_empty());

    assert_eq!(
        font.bounding_box(1),
        Ok(RectF::from_points(Vector2F::zero(), vec2f(5., 5.)))
    );
}

#[test]
fn curves() {
    let builder = FontBuilder::new("Curves")
        .glyph(".notdef", "0 250 hsbw endchar")
        .glyph("o", "20 500 hsbw 0 10 20 30 40 50 rrcurveto closepath endchar");
    let mut font = parse(&builder);
    let mut sink = Recorder::default();
    font.visit(1, &mut sink).unwrap();
    assert_eq!(sink.commands, ["M 20 0", "C 20 10 40 40 80 90", "Z"]);
}

#[test]
fn summary() {
    let mut builder = FontBuilder::new("Test-BoldItalic").names("Test", "Test Bold Italic", "Bold");
    builder.italic_angle = -11.;
    builder.glyphs.push((".notdef".to_string(), "0 250 hsbw endchar".to_string()));
    let font = parse(&builder);

    assert_eq!(
        font.summary(),
        FontSummary {
            is_italic: true,
            is_bold: true,
            family: "Test".to_string(),
            style: "Bold Italic".to_string(),
            has_scalable_glyphs: true,
            has_bitmap_glyphs: false,
            has_color_glyphs: false,
        }
    );
    let info = font.postscript_info();
    assert_eq!(info.font_name, "Test-BoldItalic");
    assert_eq!(info.italic_angle, -11.);
}

#[test]
fn style_fallbacks() {
    let cases = [
        ("Times", "Times", "Roman", "Regular"),
        ("Times", "Times-Italic", "Roman", "Italic"),
        ("", "", "Medium", "Medium"),
        ("", "Whatever", "", "Regular"),
    ];
    for (family, full, weight, style) in cases {
        let builder = FontBuilder::new("Test")
            .names(family, full, weight)
            .glyph(".notdef", "0 250 hsbw endchar");
        assert_eq!(parse(&builder).summary().style, style);
    }
}

#[test]
fn builtin_encoding() {
    let builder = accented_font().encode(0x41, "Aacute").encode(0x61, "A");
    let font = parse(&builder);
    assert_eq!(font.glyph_index_for_code(0x41), Some(3));
    assert_eq!(font.glyph_index_for_code(0x61), Some(2));
    assert_eq!(font.glyph_index_for_code(0x42), None);
    assert_eq!(font.encoding().glyph_name(0x61), Some("A"));
}

#[test]
fn font_dictionary_values() {
    let font = parse(&accented_font());
    assert_eq!(font.font_matrix(), [0.001, 0., 0., 0.001, 0., 0.]);
    assert_eq!(font.font_bbox(), [-10., -20., 1000., 900.]);
    assert_eq!(font.font_type(), 1);
    assert_eq!(font.paint_type(), 0);
    assert_eq!(font.unique_id(), Some(4000000));
    assert_eq!(font.stroke_width(), 0.);
}

#[test]
fn pdf_embedding_is_not_implemented() {
    let mut font = parse(&accented_font());
    assert_eq!(font.name_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.widths_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.cmap_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.ascender_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.descender_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.cap_height_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.bounding_box_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.flags_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.italic_angle_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.stem_v_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.x_height_pdf(), Err(FontError::NotImplemented));
    assert_eq!(font.subset(&[0, 1]), Err(FontError::NotImplemented));
    let mut output = Vec::new();
    assert_eq!(
        font.write_subset(&mut output),
        Err(FontError::NotImplemented)
    );
    assert!(output.is_empty());
}
