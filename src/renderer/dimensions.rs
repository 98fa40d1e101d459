//! Dimension annotations: extension lines, dimension lines, arrow heads and
//! measurement labels, returned as shapes tagged with a dimension layer.

use std::f64::consts::{PI, TAU};

use super::constants::*;
use super::scene::VectorShape;
use crate::model::Point;

/// Layer a dimension shape belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionLayer {
    Dimensions,
    Extensions,
    Arrows,
    Text,
}

impl DimensionLayer {
    pub fn name(self) -> &'static str {
        match self {
            DimensionLayer::Dimensions => "dimensions",
            DimensionLayer::Extensions => "extensions",
            DimensionLayer::Arrows => "arrows",
            DimensionLayer::Text => "text",
        }
    }
}

pub type DimensionShapes = Vec<(VectorShape, DimensionLayer)>;

/// Placement and sizing of a linear dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionStyle {
    /// Distance from the feature to the dimension line; the sign picks the side
    pub offset: f64,
    /// How far extension lines run past the dimension line
    pub extension_length: f64,
    pub font_size: f64,
    pub arrow_size: f64,
}

impl DimensionStyle {
    pub fn vertical() -> Self {
        Self {
            offset: DIMENSION_OFFSET_VERTICAL,
            extension_length: EXTENSION_LENGTH,
            font_size: DIMENSION_FONT_SIZE,
            arrow_size: ARROW_SIZE,
        }
    }

    /// Horizontal dimensions default to lying on the feature itself.
    pub fn horizontal() -> Self {
        Self {
            offset: DIMENSION_OFFSET_HORIZONTAL,
            extension_length: 0.0,
            ..Self::vertical()
        }
    }

    pub fn diagonal() -> Self {
        Self {
            offset: DIMENSION_OFFSET_DIAGONAL,
            ..Self::vertical()
        }
    }

    pub fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    pub fn with_extension(self, extension_length: f64) -> Self {
        Self {
            extension_length,
            ..self
        }
    }
}

/// Two V-shaped heads, at `p1` and `p2`, opening toward the line's interior.
pub fn dimension_arrows(p1: Point, p2: Point, size: f64) -> DimensionShapes {
    let angle = p1.angle_to(p2);
    let mut shapes = Vec::with_capacity(4);
    for spread in [ARROW_ANGLE, -ARROW_ANGLE] {
        shapes.push((
            VectorShape::line(p1, p1.polar(size, angle + spread)),
            DimensionLayer::Arrows,
        ));
    }
    for spread in [ARROW_ANGLE, -ARROW_ANGLE] {
        shapes.push((
            VectorShape::line(p2, p2.polar(-size, angle + spread)),
            DimensionLayer::Arrows,
        ));
    }
    shapes
}

/// Dimension for a vertical feature from `p1` to `p2`, placed `offset` to the
/// side along X.
pub fn vertical_dimension(p1: Point, p2: Point, label: &str, style: DimensionStyle) -> DimensionShapes {
    let x = p1.x;
    let (y_start, y_end) = (p1.y, p2.y);
    let ext_x = x + style.offset;
    let reach = ext_x + style.extension_length.copysign(style.offset);

    let dim_p1 = Point::new(ext_x, y_start);
    let dim_p2 = Point::new(ext_x, y_end);

    let mut shapes = vec![
        (
            VectorShape::line((x, y_start), (reach, y_start)),
            DimensionLayer::Extensions,
        ),
        (
            VectorShape::line((x, y_end), (reach, y_end)),
            DimensionLayer::Extensions,
        ),
        (VectorShape::line(dim_p1, dim_p2), DimensionLayer::Dimensions),
    ];
    shapes.extend(dimension_arrows(dim_p1, dim_p2, style.arrow_size));

    let label_pos = Point::new(
        ext_x + style.offset.signum() * style.font_size,
        (y_start + y_end) / 2.0,
    );
    shapes.push((
        VectorShape::label(label, style.font_size, label_pos),
        DimensionLayer::Text,
    ));
    shapes
}

/// Dimension for a horizontal feature. With no extension length the
/// dimension line is drawn on the feature itself.
pub fn horizontal_dimension(p1: Point, p2: Point, label: &str, style: DimensionStyle) -> DimensionShapes {
    let (x_start, x_end) = (p1.x, p2.x);
    let y = p1.y;
    let mut shapes = Vec::new();

    let dim_y = if style.extension_length > 0.0 {
        let reach = y + style.offset + style.extension_length.copysign(style.offset);
        shapes.push((
            VectorShape::line((x_start, y), (x_start, reach)),
            DimensionLayer::Extensions,
        ));
        shapes.push((
            VectorShape::line((x_end, y), (x_end, reach)),
            DimensionLayer::Extensions,
        ));
        y + style.offset
    } else {
        y
    };

    let dim_p1 = Point::new(x_start, dim_y);
    let dim_p2 = Point::new(x_end, dim_y);
    shapes.push((VectorShape::line(dim_p1, dim_p2), DimensionLayer::Dimensions));
    shapes.extend(dimension_arrows(dim_p1, dim_p2, style.arrow_size));

    let side = if style.offset > 0.0 { 1.0 } else { -1.0 };
    let label_pos = Point::new((x_start + x_end) / 2.0, dim_y + side * style.font_size);
    shapes.push((
        VectorShape::label(label, style.font_size, label_pos),
        DimensionLayer::Text,
    ));
    shapes
}

/// Dimension parallel to a slanted feature, offset along its left normal.
/// A zero-length feature produces nothing.
pub fn diagonal_dimension(p1: Point, p2: Point, label: &str, style: DimensionStyle) -> DimensionShapes {
    let d = p2 - p1;
    let length = d.x.hypot(d.y);
    if length == 0.0 {
        return Vec::new();
    }
    let perp = Point::new(-d.y / length, d.x / length);

    let dim_p1 = p1 + perp * style.offset;
    let dim_p2 = p2 + perp * style.offset;
    let overrun = perp * style.extension_length.copysign(style.offset);

    let mut shapes = vec![
        (
            VectorShape::line(p1, dim_p1 + overrun),
            DimensionLayer::Extensions,
        ),
        (
            VectorShape::line(p2, dim_p2 + overrun),
            DimensionLayer::Extensions,
        ),
        (VectorShape::line(dim_p1, dim_p2), DimensionLayer::Dimensions),
    ];
    shapes.extend(dimension_arrows(dim_p1, dim_p2, style.arrow_size));

    let mut rotation = d.y.atan2(d.x).to_degrees();
    if rotation > 90.0 {
        rotation -= 180.0;
    } else if rotation < -90.0 {
        rotation += 180.0;
    }
    shapes.push((
        VectorShape::Label {
            text: label.to_string(),
            font_size: style.font_size,
            position: dim_p1.midpoint(dim_p2) + perp * (style.font_size * 0.5),
            rotation,
        },
        DimensionLayer::Text,
    ));
    shapes
}

/// Vertex and ray end points of two lines meeting at a shared endpoint.
///
/// Lines that share no endpoint fall back to `line1.1` as the vertex with
/// rays toward `line1.0` and `line2.0`.
fn angle_vertex(line1: (Point, Point), line2: (Point, Point)) -> (Point, Point, Point) {
    let near = |a: Point, b: Point| a.distance_to(b) < VERTEX_TOLERANCE;
    let ((a1, a2), (b1, b2)) = (line1, line2);

    if near(a1, b1) {
        (a1, a2, b2)
    } else if near(a1, b2) {
        (a1, a2, b1)
    } else if near(a2, b1) {
        (a2, a1, b2)
    } else {
        // Shared end points, or no shared point at all.
        (a2, a1, b1)
    }
}

/// Arc dimension for the angle between two lines. `label` defaults to the
/// measured minor angle, e.g. `"90.0°"`.
pub fn angle_dimension(
    line1: (Point, Point),
    line2: (Point, Point),
    label: Option<&str>,
    arc_radius: f64,
    font_size: f64,
) -> DimensionShapes {
    let (vertex, ray1, ray2) = angle_vertex(line1, line2);
    let angle1 = vertex.angle_to(ray1);
    let angle2 = vertex.angle_to(ray2);

    let mut angle_deg = (angle2 - angle1).to_degrees().rem_euclid(360.0);
    if angle_deg > 180.0 {
        angle_deg = 360.0 - angle_deg;
    }
    let label = label.map_or_else(|| format!("{angle_deg:.1}°"), str::to_string);

    let mut shapes = Vec::new();
    for ray in [ray1, ray2] {
        let length = vertex.distance_to(ray);
        if length > 0.0 {
            let extended = ray + (ray - vertex) * (ANGLE_RAY_EXTENSION / length);
            shapes.push((VectorShape::line(vertex, extended), DimensionLayer::Extensions));
        }
    }

    let (mut start, mut end) = (angle1.min(angle2), angle1.max(angle2));
    if end - start > PI {
        (start, end) = (end, start + TAU);
    }

    let step = (end - start) / ANGLE_ARC_SEGMENTS as f64;
    for i in 0..ANGLE_ARC_SEGMENTS {
        let a = vertex.polar(arc_radius, start + step * i as f64);
        let b = vertex.polar(arc_radius, start + step * (i + 1) as f64);
        shapes.push((VectorShape::line(a, b), DimensionLayer::Dimensions));
    }

    let mid_angle = (start + end) / 2.0;
    let label_pos = vertex.polar(arc_radius + font_size * 1.5, mid_angle);
    shapes.push((
        VectorShape::label(label, font_size, label_pos),
        DimensionLayer::Text,
    ));
    shapes
}
