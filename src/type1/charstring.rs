//! Type 1 charstring interpreter.
//!
//! <https://adobe-type-tools.github.io/font-tech-notes/pdfs/T1_SPEC.pdf> (chapter 6)

use log::warn;
use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::{vec2f, Vector2F};

use crate::binary::read::{ReadCtxt, ReadScope};
use crate::binary::{I32Be, U8};
use crate::error::CharStringError;
use crate::outline::{OutlineSink, Segment};
use crate::type1::outline::Builder;

mod argstack;

use argstack::ArgumentsStack;

/// Maximum number of operands on the charstring stack.
pub(crate) const MAX_OPERANDS: usize = 48;
/// Maximum depth of nested `callsubr`.
pub(crate) const STACK_LIMIT: u8 = 10;
/// Number of points collected by a flex sequence, including the reference point.
const FLEX_POINTS: usize = 7;

/// A `seac` directive: the glyph is the composition of two standard encoded glyphs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Seac {
    /// Standard Encoding code of the base character.
    pub base_code: i32,
    /// Standard Encoding code of the accent character.
    pub accent_code: i32,
    /// Placement of the accent relative to the base, `(adx, ady)`.
    pub accent_origin: Vector2F,
}

/// What a charstring produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    Drawn {
        segments: Vec<Segment>,
        bounds: RectF,
    },
    Composite(Seac),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CharStringOutput {
    /// Horizontal advance set by `hsbw` or `sbw`.
    pub advance: f32,
    pub outline: Outline,
}

/// Points collected between `callothersubr` 1 and 0.
struct Flex {
    start: Vector2F,
    points: Vec<Vector2F>,
}

struct CharStringInterpreter<'a> {
    subrs: &'a [Vec<u8>],
    builder: Builder,
    point: Vector2F,
    advance: f32,
    contour_open: bool,
    has_endchar: bool,
    seac: Option<Seac>,
    flex: Option<Flex>,
    /// Results of `callothersubr` waiting to be moved back with `pop`.
    ps_stack: Vec<f32>,
}

/// Run a decrypted charstring program.
pub fn execute(
    char_string: &[u8],
    subrs: &[Vec<u8>],
) -> Result<CharStringOutput, CharStringError> {
    let mut interpreter = CharStringInterpreter {
        subrs,
        builder: Builder::new(),
        point: Vector2F::zero(),
        advance: 0.,
        contour_open: false,
        has_endchar: false,
        seac: None,
        flex: None,
        ps_stack: Vec::new(),
    };
    let mut stack = ArgumentsStack {
        data: &mut [0.0; MAX_OPERANDS],
        len: 0,
        max_len: MAX_OPERANDS,
    };

    interpreter.visit(char_string, 0, &mut stack)?;
    if !interpreter.has_endchar {
        return Err(CharStringError::MissingEndChar);
    }

    let outline = match interpreter.seac {
        Some(seac) => Outline::Composite(seac),
        None => {
            let (segments, bounds) = interpreter.builder.finish();
            Outline::Drawn { segments, bounds }
        }
    };
    Ok(CharStringOutput {
        advance: interpreter.advance,
        outline,
    })
}

impl CharStringInterpreter<'_> {
    fn visit(
        &mut self,
        char_string: &[u8],
        depth: u8,
        stack: &mut ArgumentsStack<'_, f32>,
    ) -> Result<(), CharStringError> {
        let mut s = ReadScope::new(char_string).ctxt();
        while s.bytes_available() {
            let op = s.read::<U8>()?;
            match op {
                operator::HORIZONTAL_STEM | operator::VERTICAL_STEM => {
                    // We are ignoring the hint operators.
                    stack.clear();
                }
                operator::VERTICAL_MOVE_TO => {
                    let [dy] = stack.take::<1>()?;
                    self.move_by(vec2f(0., dy));
                }
                operator::LINE_TO => {
                    let [dx, dy] = stack.take::<2>()?;
                    self.line_by(vec2f(dx, dy));
                }
                operator::HORIZONTAL_LINE_TO => {
                    let [dx] = stack.take::<1>()?;
                    self.line_by(vec2f(dx, 0.));
                }
                operator::VERTICAL_LINE_TO => {
                    let [dy] = stack.take::<1>()?;
                    self.line_by(vec2f(0., dy));
                }
                operator::CURVE_TO => {
                    let [dx1, dy1, dx2, dy2, dx3, dy3] = stack.take::<6>()?;
                    self.curve_by(vec2f(dx1, dy1), vec2f(dx2, dy2), vec2f(dx3, dy3));
                }
                operator::CLOSE_PATH => {
                    stack.clear();
                    self.close_contour();
                }
                operator::CALL_SUBROUTINE => {
                    if depth == STACK_LIMIT {
                        return Err(CharStringError::NestingLimitReached);
                    }

                    let index = stack.pop()?;
                    let subrs = self.subrs;
                    let subr = usize::try_from(index as i32)
                        .ok()
                        .and_then(|index| subrs.get(index))
                        .ok_or_else(|| {
                            warn!("subroutine {} out of range", index);
                            CharStringError::InvalidSubroutineIndex
                        })?;
                    self.visit(subr, depth + 1, stack)?;

                    if self.has_endchar {
                        break;
                    }
                }
                operator::RETURN => break,
                operator::ESCAPE => {
                    let op2 = s.read::<U8>()?;
                    self.visit_escape(op2, stack)?;
                    if self.has_endchar {
                        break;
                    }
                }
                operator::HSBW => {
                    let [sbx, wx] = stack.take::<2>()?;
                    self.point = vec2f(sbx, 0.);
                    self.advance = wx;
                }
                operator::ENDCHAR => {
                    stack.clear();
                    self.close_contour();
                    self.has_endchar = true;
                    break;
                }
                operator::MOVE_TO => {
                    let [dx, dy] = stack.take::<2>()?;
                    self.move_by(vec2f(dx, dy));
                }
                operator::HORIZONTAL_MOVE_TO => {
                    let [dx] = stack.take::<1>()?;
                    self.move_by(vec2f(dx, 0.));
                }
                operator::VH_CURVE_TO => {
                    let [dy1, dx2, dy2, dx3] = stack.take::<4>()?;
                    self.curve_by(vec2f(0., dy1), vec2f(dx2, dy2), vec2f(dx3, 0.));
                }
                operator::HV_CURVE_TO => {
                    let [dx1, dx2, dy2, dy3] = stack.take::<4>()?;
                    self.curve_by(vec2f(dx1, 0.), vec2f(dx2, dy2), vec2f(0., dy3));
                }
                32..=246 => stack.push(parse_int1(op))?,
                247..=250 => stack.push(parse_int2(op, &mut s)?)?,
                251..=254 => stack.push(parse_int3(op, &mut s)?)?,
                operator::LONG_INT => stack.push(s.read::<I32Be>()? as f32)?,
                _ => return Err(CharStringError::InvalidOperator),
            }
        }

        Ok(())
    }

    fn visit_escape(
        &mut self,
        op: u8,
        stack: &mut ArgumentsStack<'_, f32>,
    ) -> Result<(), CharStringError> {
        match op {
            escape_operator::DOT_SECTION
            | escape_operator::VERTICAL_STEM3
            | escape_operator::HORIZONTAL_STEM3 => {
                // We are ignoring the hint operators.
                stack.clear();
            }
            escape_operator::SEAC => {
                let [_asb, adx, ady, bchar, achar] = stack.take::<5>()?;
                self.seac = Some(Seac {
                    base_code: bchar as i32,
                    accent_code: achar as i32,
                    accent_origin: vec2f(adx, ady),
                });
                // The composite replaces the rest of the program
                self.has_endchar = true;
            }
            escape_operator::SBW => {
                let [sbx, sby, wx, _wy] = stack.take::<4>()?;
                self.point = vec2f(sbx, sby);
                self.advance = wx;
            }
            escape_operator::DIV => {
                let [num1, num2] = stack.pop_array::<2>()?;
                if num2 == 0. {
                    return Err(CharStringError::DivisionByZero);
                }
                stack.push(num1 / num2)?;
            }
            escape_operator::CALL_OTHER_SUBROUTINE => {
                let othersubr = stack.pop()? as i32;
                let count = stack.pop()?;
                let count = usize::try_from(count as i32)
                    .map_err(|_| CharStringError::InvalidArgumentsStackLength)?;
                let args = stack.pop_n(count)?;
                self.call_other_subroutine(othersubr, args)?;
            }
            escape_operator::POP => {
                let value = self
                    .ps_stack
                    .pop()
                    .ok_or(CharStringError::InvalidArgumentsStackLength)?;
                stack.push(value)?;
            }
            escape_operator::SET_CURRENT_POINT => {
                let [x, y] = stack.take::<2>()?;
                self.point = vec2f(x, y);
            }
            _ => return Err(CharStringError::UnsupportedOperator),
        }

        Ok(())
    }

    /// Handle the standard OtherSubrs. Results are left on the PostScript stack for `pop`.
    fn call_other_subroutine(&mut self, othersubr: i32, args: &[f32]) -> Result<(), CharStringError> {
        match othersubr {
            // End of flex
            0 => {
                let flex = self.flex.take().ok_or(CharStringError::InvalidFlex)?;
                if args.len() != 3 || flex.points.len() != FLEX_POINTS {
                    return Err(CharStringError::InvalidFlex);
                }
                self.start_contour(flex.start);
                // The first point is the reference point, not part of either curve
                let p = &flex.points;
                self.builder
                    .cubic_curve_to(LineSegment2F::new(p[1], p[2]), p[3]);
                self.builder
                    .cubic_curve_to(LineSegment2F::new(p[4], p[5]), p[6]);
                self.point = p[6];
                // Consumed by `pop pop setcurrentpoint`
                self.ps_stack.push(p[6].y());
                self.ps_stack.push(p[6].x());
            }
            // Start of flex
            1 => {
                self.flex = Some(Flex {
                    start: self.point,
                    points: Vec::with_capacity(FLEX_POINTS),
                });
            }
            // Add a flex point
            2 => {
                let flex = self.flex.as_mut().ok_or(CharStringError::InvalidFlex)?;
                if flex.points.len() == FLEX_POINTS {
                    return Err(CharStringError::InvalidFlex);
                }
                flex.points.push(self.point);
            }
            // Hint replacement, the argument is the subroutine to call next
            3 => {
                let &[subr] = args else {
                    return Err(CharStringError::InvalidArgumentsStackLength);
                };
                self.ps_stack.push(subr);
            }
            _ => {
                // Unknown OtherSubrs return their arguments, arg1 on top
                self.ps_stack.extend(args.iter().rev());
            }
        }

        Ok(())
    }

    fn move_by(&mut self, delta: Vector2F) {
        self.point = self.point + delta;
        // Moves inside flex only set the current point for `callothersubr` 2
        if self.flex.is_none() {
            self.close_contour();
        }
    }

    fn line_by(&mut self, delta: Vector2F) {
        self.start_contour(self.point);
        self.point = self.point + delta;
        self.builder.line_to(self.point);
    }

    fn curve_by(&mut self, d1: Vector2F, d2: Vector2F, d3: Vector2F) {
        self.start_contour(self.point);
        let ctrl1 = self.point + d1;
        let ctrl2 = ctrl1 + d2;
        self.point = ctrl2 + d3;
        self.builder
            .cubic_curve_to(LineSegment2F::new(ctrl1, ctrl2), self.point);
    }

    /// Emit the pending move if no contour is open.
    fn start_contour(&mut self, at: Vector2F) {
        if !self.contour_open {
            self.builder.move_to(at);
            self.contour_open = true;
        }
    }

    fn close_contour(&mut self) {
        if self.contour_open {
            self.builder.close();
            self.contour_open = false;
        }
    }
}

// CharString number parsing functions
fn parse_int1(op: u8) -> f32 {
    f32::from(i16::from(op) - 139)
}

fn parse_int2(op: u8, s: &mut ReadCtxt<'_>) -> Result<f32, CharStringError> {
    let b1 = s.read::<U8>()?;
    let n = (i16::from(op) - 247) * 256 + i16::from(b1) + 108;
    debug_assert!((108..=1131).contains(&n));
    Ok(f32::from(n))
}

fn parse_int3(op: u8, s: &mut ReadCtxt<'_>) -> Result<f32, CharStringError> {
    let b1 = s.read::<U8>()?;
    let n = -(i16::from(op) - 251) * 256 - i16::from(b1) - 108;
    debug_assert!((-1131..=-108).contains(&n));
    Ok(f32::from(n))
}

pub(crate) mod operator {
    pub const HORIZONTAL_STEM: u8 = 1;
    pub const VERTICAL_STEM: u8 = 3;
    pub const VERTICAL_MOVE_TO: u8 = 4;
    pub const LINE_TO: u8 = 5;
    pub const HORIZONTAL_LINE_TO: u8 = 6;
    pub const VERTICAL_LINE_TO: u8 = 7;
    pub const CURVE_TO: u8 = 8;
    pub const CLOSE_PATH: u8 = 9;
    pub const CALL_SUBROUTINE: u8 = 10;
    pub const RETURN: u8 = 11;
    pub const ESCAPE: u8 = 12;
    pub const HSBW: u8 = 13;
    pub const ENDCHAR: u8 = 14;
    pub const MOVE_TO: u8 = 21;
    pub const HORIZONTAL_MOVE_TO: u8 = 22;
    pub const VH_CURVE_TO: u8 = 30;
    pub const HV_CURVE_TO: u8 = 31;
    pub const LONG_INT: u8 = 255;
}

pub(crate) mod escape_operator {
    pub const DOT_SECTION: u8 = 0;
    pub const VERTICAL_STEM3: u8 = 1;
    pub const HORIZONTAL_STEM3: u8 = 2;
    pub const SEAC: u8 = 6;
    pub const SBW: u8 = 7;
    pub const DIV: u8 = 12;
    pub const CALL_OTHER_SUBROUTINE: u8 = 16;
    pub const POP: u8 = 17;
    pub const SET_CURRENT_POINT: u8 = 33;
}
