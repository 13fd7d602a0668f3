//! Glyph outline generation for Type 1 charstrings.

use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::{vec2f, Vector2F};

use crate::outline::{OutlineSink, Segment};

/// Records the segments of an outline along with its bounding box.
pub(crate) struct Builder {
    segments: Vec<Segment>,
    bbox: BBox,
    current: Vector2F,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct BBox {
    x_min: f32,
    y_min: f32,
    x_max: f32,
    y_max: f32,
}

impl BBox {
    fn new() -> Self {
        BBox {
            x_min: f32::MAX,
            y_min: f32::MAX,
            x_max: f32::MIN,
            y_max: f32::MIN,
        }
    }

    fn is_default(&self) -> bool {
        self.x_min == f32::MAX
            && self.y_min == f32::MAX
            && self.x_max == f32::MIN
            && self.y_max == f32::MIN
    }

    fn extend_by(&mut self, point: Vector2F) {
        self.x_min = self.x_min.min(point.x());
        self.y_min = self.y_min.min(point.y());
        self.x_max = self.x_max.max(point.x());
        self.y_max = self.y_max.max(point.y());
    }

    /// The box as a rectangle, empty outlines have a zero rectangle at the origin.
    fn to_rect(self) -> RectF {
        if self.is_default() {
            return RectF::new(Vector2F::zero(), Vector2F::zero());
        }
        RectF::from_points(
            vec2f(self.x_min, self.y_min),
            vec2f(self.x_max, self.y_max),
        )
    }
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            segments: Vec::new(),
            bbox: BBox::new(),
            current: Vector2F::zero(),
        }
    }

    pub fn finish(self) -> (Vec<Segment>, RectF) {
        (self.segments, self.bbox.to_rect())
    }
}

impl OutlineSink for Builder {
    fn move_to(&mut self, to: Vector2F) {
        self.bbox.extend_by(to);
        self.current = to;
        self.segments.push(Segment::MoveTo(to));
    }

    fn line_to(&mut self, to: Vector2F) {
        self.bbox.extend_by(to);
        self.current = to;
        self.segments.push(Segment::LineTo(to));
    }

    // Charstrings don't produce quadratic curves, they're stored as the equivalent cubic
    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        let ctrl1 = self.current + (ctrl - self.current) * (2. / 3.);
        let ctrl2 = to + (ctrl - to) * (2. / 3.);
        self.cubic_curve_to(LineSegment2F::new(ctrl1, ctrl2), to);
    }

    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
        self.bbox.extend_by(ctrl.from());
        self.bbox.extend_by(ctrl.to());
        self.bbox.extend_by(to);
        self.current = to;
        self.segments.push(Segment::CurveTo(ctrl, to));
    }

    fn close(&mut self) {
        self.segments.push(Segment::Close);
    }
}
