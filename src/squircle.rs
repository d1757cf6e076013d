//! Continuous-curvature rounded rectangle ("squircle")
//!
//! Apple's app icon corners are not circular arcs: curvature ramps up
//! smoothly from the straight edge. This module reproduces that outline with
//! the widely used PaintCode approximation, where every corner is one
//! straight edge followed by three cubic Bezier segments whose points are
//! fixed multiples of the corner radius.
//!
//! Coordinates are y-down (tiny-skia's convention): offsets from the top
//! edge are added rather than subtracted, so each corner keeps its visual
//! orientation. The outline is point-symmetric about its center.

use tiny_skia::{Path, PathBuilder, Point};

use crate::constants::geometry::CORNER_RATIO;
use crate::constants::squircle::{CP1, CP2, CP3, CP4, LIMIT_FACTOR, P1, P2, P3, P4, P5, P6, P7};

/// One drawing command of the outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
    Close,
}

/// Corner radius for a `width` x `height` box
///
/// `min(width, height) * ratio`, clipped so the straight edges never go
/// negative: the corner construction spans `LIMIT_FACTOR` radii per side.
pub fn corner_radius(width: f32, height: f32, ratio: f32) -> f32 {
    let shorter = width.min(height);
    let max_radius = shorter / 2.0;
    (shorter * ratio).min(max_radius / LIMIT_FACTOR)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Squircle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl Squircle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::with_corner_ratio(x, y, width, height, CORNER_RATIO)
    }

    pub fn with_corner_ratio(x: f32, y: f32, width: f32, height: f32, ratio: f32) -> Self {
        Squircle {
            x,
            y,
            width,
            height,
            radius: corner_radius(width, height, ratio),
        }
    }

    /// The closed outline, clockwise from the top edge
    pub fn segments(&self) -> Vec<Segment> {
        let r = self.radius;
        let left = self.x;
        let right = self.x + self.width;
        let top = self.y;
        let bottom = self.y + self.height;

        let pt = Point::from_xy;
        let cubic = |c1: Point, c2: Point, to: Point| Segment::CubicTo { c1, c2, to };

        vec![
            Segment::MoveTo(pt(left + r * P1, top)),
            // top edge, top-right corner
            Segment::LineTo(pt(right - r * P1, top)),
            cubic(
                pt(right - r * P2, top),
                pt(right - r * P3, top),
                pt(right - r * P4, top + r * CP1),
            ),
            cubic(
                pt(right - r * P6, top + r * CP3),
                pt(right - r * P7, top + r * CP4),
                pt(right - r * CP2, top + r * P5),
            ),
            cubic(pt(right, top + r * P3), pt(right, top + r * P2), pt(right, top + r * P1)),
            // right edge, bottom-right corner
            Segment::LineTo(pt(right, bottom - r * P1)),
            cubic(
                pt(right, bottom - r * P2),
                pt(right, bottom - r * P3),
                pt(right - r * CP1, bottom - r * P4),
            ),
            cubic(
                pt(right - r * CP3, bottom - r * P6),
                pt(right - r * CP4, bottom - r * P7),
                pt(right - r * P5, bottom - r * CP2),
            ),
            cubic(
                pt(right - r * P3, bottom),
                pt(right - r * P2, bottom),
                pt(right - r * P1, bottom),
            ),
            // bottom edge, bottom-left corner
            Segment::LineTo(pt(left + r * P1, bottom)),
            cubic(
                pt(left + r * P2, bottom),
                pt(left + r * P3, bottom),
                pt(left + r * P4, bottom - r * CP1),
            ),
            cubic(
                pt(left + r * P6, bottom - r * CP3),
                pt(left + r * P7, bottom - r * CP4),
                pt(left + r * CP2, bottom - r * P5),
            ),
            cubic(pt(left, bottom - r * P3), pt(left, bottom - r * P2), pt(left, bottom - r * P1)),
            // left edge, top-left corner
            Segment::LineTo(pt(left, top + r * P1)),
            cubic(pt(left, top + r * P2), pt(left, top + r * P3), pt(left + r * CP1, top + r * P4)),
            cubic(
                pt(left + r * CP3, top + r * P6),
                pt(left + r * CP4, top + r * P7),
                pt(left + r * P5, top + r * CP2),
            ),
            cubic(pt(left + r * P3, top), pt(left + r * P2, top), pt(left + r * P1, top)),
            Segment::Close,
        ]
    }

    /// Anchor points of the outline in drawing order (control points excluded)
    pub fn anchors(&self) -> Vec<Point> {
        self.segments()
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::MoveTo(p) | Segment::LineTo(p) => Some(p),
                Segment::CubicTo { to, .. } => Some(to),
                Segment::Close => None,
            })
            .collect()
    }

    /// Builds the tiny-skia path, or `None` for a degenerate (zero-size) box
    pub fn to_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        for segment in self.segments() {
            match segment {
                Segment::MoveTo(p) => pb.move_to(p.x, p.y),
                Segment::LineTo(p) => pb.line_to(p.x, p.y),
                Segment::CubicTo { c1, c2, to } => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y),
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }
}
