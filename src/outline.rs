//! Access glyph outlines.
//!
//! Outlines are produced as a list of [`Segment`]s, and can also be delivered as a series of
//! drawing instruction callbacks on implementors of the `OutlineSink` trait.
//!
//! ### Example
//!
//! Accumulate the drawing operations of a glyph into a `String`. In a real application you'd
//! probably make calls to a graphics library instead.
//!
//! ```no_run
//! use std::fmt::Write;
//!
//! use type1_font::outline::{OutlineBuilder, OutlineSink};
//! use type1_font::pathfinder_geometry::line_segment::LineSegment2F;
//! use type1_font::pathfinder_geometry::vector::Vector2F;
//! use type1_font::Type1Font;
//!
//! struct DebugVisitor {
//!     outlines: String,
//! }
//!
//! impl OutlineSink for DebugVisitor {
//!     fn move_to(&mut self, to: Vector2F) {
//!         writeln!(&mut self.outlines, "move_to({}, {})", to.x(), to.y()).unwrap();
//!     }
//!
//!     fn line_to(&mut self, to: Vector2F) {
//!         writeln!(&mut self.outlines, "line_to({}, {})", to.x(), to.y()).unwrap();
//!     }
//!
//!     fn quadratic_curve_to(&mut self, control: Vector2F, to: Vector2F) {
//!         writeln!(
//!             &mut self.outlines,
//!             "quad_to({}, {}, {}, {})",
//!             control.x(),
//!             control.y(),
//!             to.x(),
//!             to.y()
//!         )
//!         .unwrap();
//!     }
//!
//!     fn cubic_curve_to(&mut self, control: LineSegment2F, to: Vector2F) {
//!         writeln!(
//!             &mut self.outlines,
//!             "curve_to({}, {}, {}, {}, {}, {})",
//!             control.from_x(),
//!             control.from_y(),
//!             control.to_x(),
//!             control.to_y(),
//!             to.x(),
//!             to.y()
//!         )
//!         .unwrap();
//!     }
//!
//!     fn close(&mut self) {
//!         writeln!(&mut self.outlines, "close()").unwrap();
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let buffer = std::fs::read("NimbusSans-Regular.pfb")?;
//!     let mut font = Type1Font::parse(&buffer)?;
//!     let glyph_index = font.lookup_glyph_index('A').ok_or("no glyph for 'A'")?;
//!
//!     let mut sink = DebugVisitor {
//!         outlines: String::new(),
//!     };
//!     font.visit(glyph_index, &mut sink)?;
//!     println!("{}", sink.outlines);
//!     Ok(())
//! }
//! ```

use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::Vector2F;

/// Trait for visiting a glyph outline and delivering drawing commands to an `OutlineSink`.
pub trait OutlineBuilder {
    type Error: std::error::Error;

    /// Visit the glyph outlines in `self`.
    fn visit<S: OutlineSink>(&mut self, glyph_index: u16, sink: &mut S) -> Result<(), Self::Error>;
}

// `OutlineSink` is from font-kit, font-kit/src/outline.rs:
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// A trait for visiting a glyph outline
pub trait OutlineSink {
    /// Moves the pen to a point.
    fn move_to(&mut self, to: Vector2F);
    /// Draws a line to a point.
    fn line_to(&mut self, to: Vector2F);
    /// Draws a quadratic Bézier curve to a point.
    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F);
    /// Draws a cubic Bézier curve to a point.
    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F);
    /// Closes the path, returning to the first point in it.
    fn close(&mut self);
}

pub trait BoundingBox {
    type Error: std::error::Error;

    /// The bounding box of the drawn outline of `glyph_id`, in font units.
    fn bounding_box(&self, glyph_id: u16) -> Result<RectF, Self::Error>;
}

/// One drawing command of a glyph outline, in font units.
///
/// Type 1 outlines only contain straight lines and cubic curves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Segment {
    MoveTo(Vector2F),
    LineTo(Vector2F),
    /// A cubic Bézier curve: control points followed by the end point.
    CurveTo(LineSegment2F, Vector2F),
    Close,
}

impl Segment {
    /// Returns this segment moved by `offset`.
    pub fn translate(self, offset: Vector2F) -> Segment {
        match self {
            Segment::MoveTo(to) => Segment::MoveTo(to + offset),
            Segment::LineTo(to) => Segment::LineTo(to + offset),
            Segment::CurveTo(ctrl, to) => Segment::CurveTo(
                LineSegment2F::new(ctrl.from() + offset, ctrl.to() + offset),
                to + offset,
            ),
            Segment::Close => Segment::Close,
        }
    }

    /// Deliver this segment to `sink`.
    pub fn visit<S: OutlineSink>(&self, sink: &mut S) {
        match *self {
            Segment::MoveTo(to) => sink.move_to(to),
            Segment::LineTo(to) => sink.line_to(to),
            Segment::CurveTo(ctrl, to) => sink.cubic_curve_to(ctrl, to),
            Segment::Close => sink.close(),
        }
    }
}
