//! SVG builder: scene bounds and the scene → SVG string serializer.
//!
//! Shapes are written in drawing coordinates (+Y up) inside a single
//! `scale(1,-1)` group; the viewBox is expressed in the flipped frame.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use super::constants::*;
use super::scene::{Layer, Scene, VectorShape};
use crate::model::Point;

// ═══════════════════════════════════════════════════════════════════════
// Bounds
// ═══════════════════════════════════════════════════════════════════════

/// Axis-aligned bounding box in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    fn expand(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Bounding box of every shape in the scene plus the page margin.
pub fn compute_bounds(scene: &Scene) -> Bounds {
    let mut b = Bounds::empty();

    for (shape, _) in scene.shapes() {
        match shape {
            VectorShape::LineSegment { p1, p2 } => {
                b.include(*p1);
                b.include(*p2);
            }
            VectorShape::Rectangle {
                width,
                height,
                center,
            } => {
                b.include(Point::new(center.x - width / 2.0, center.y - height / 2.0));
                b.include(Point::new(center.x + width / 2.0, center.y + height / 2.0));
            }
            VectorShape::BezierCurve { p0, cp1, cp2, p3 } => {
                for i in 0..=BEZIER_BOUND_SAMPLES {
                    let t = i as f64 / BEZIER_BOUND_SAMPLES as f64;
                    b.include(crate::geometry::bezier::evaluate(*p0, *cp1, *cp2, *p3, t));
                }
            }
            VectorShape::Polygon {
                vertices, offset, ..
            } => {
                for v in vertices {
                    b.include(*v + *offset);
                }
            }
            VectorShape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                b.include(center.polar(*radius, *start_angle));
                b.include(center.polar(*radius, *end_angle));
                for axis in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
                    if arc_contains(*start_angle, *end_angle, axis) {
                        b.include(center.polar(*radius, axis));
                    }
                }
            }
            VectorShape::Label {
                text,
                font_size,
                position,
                ..
            } => {
                let half_w = text.chars().count() as f64 * font_size * CHAR_WIDTH_FACTOR / 2.0;
                let half_h = font_size / 2.0;
                b.include(Point::new(position.x - half_w, position.y - half_h));
                b.include(Point::new(position.x + half_w, position.y + half_h));
            }
        }
    }

    if !b.min_x.is_finite() {
        b = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        };
    }
    let bounds = b.expand(PAGE_MARGIN);
    log::debug!(
        "scene bounds ({:.2}, {:.2}) to ({:.2}, {:.2})",
        bounds.min_x,
        bounds.min_y,
        bounds.max_x,
        bounds.max_y
    );
    bounds
}

/// A zero span with distinct angles is a full turn (or several).
fn is_full_circle(start: f64, end: f64) -> bool {
    (end - start).rem_euclid(TAU) == 0.0 && end != start
}

/// Whether `angle` lies on the counter-clockwise sweep from `start` to `end`.
fn arc_contains(start: f64, end: f64, angle: f64) -> bool {
    if is_full_circle(start, end) {
        return true;
    }
    let s = start.rem_euclid(TAU);
    let e = end.rem_euclid(TAU);
    let a = angle.rem_euclid(TAU);
    if s <= e {
        s <= a && a <= e
    } else {
        a >= s || a <= e
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

struct SvgBuilder {
    elements: Vec<String>,
    bounds: Bounds,
}

impl SvgBuilder {
    fn new(bounds: Bounds) -> Self {
        Self {
            elements: Vec::new(),
            bounds,
        }
    }

    fn build(self) -> String {
        let b = self.bounds;
        let (w, h) = (b.width(), b.height());
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.3} {:.3} {:.3} {:.3}" width="{:.3}mm" height="{:.3}mm">"#,
            b.min_x, -b.max_y, w, h, w, h
        );
        svg.push('\n');
        svg.push_str(
            r#"  <defs><pattern id="diagonalHatch" patternUnits="userSpaceOnUse" width="2" height="2"><path d="M0,2 L2,0" stroke="black" stroke-width="0.3"/></pattern></defs>"#,
        );
        svg.push('\n');
        svg.push_str("  <g transform=\"scale(1,-1)\">\n");
        for el in &self.elements {
            svg.push_str("    ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("  </g>\n</svg>\n");
        svg
    }

    fn path(&mut self, d: &str, fill: &str, style: &StrokeStyle) {
        let mut el = format!(
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}""#,
            d, fill, style.color, LINE_WEIGHT
        );
        if let Some(dash) = style.dasharray {
            let _ = write!(el, r#" stroke-dasharray="{dash}""#);
        }
        el.push_str("/>");
        self.elements.push(el);
    }

    fn text(&mut self, position: Point, content: &str, size: f64, rotation: f64, fill: &str) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.elements.push(format!(
            r#"<text transform="translate({:.3} {:.3}) scale(1 -1) rotate({:.3})" font-size="{:.3}" font-family="{}" text-anchor="middle" dominant-baseline="middle" fill="{}">{}</text>"#,
            position.x, position.y, -rotation, size, FONT_FAMILY, fill, escaped
        ));
    }
}

/// Resolved stroke attributes for one shape.
struct StrokeStyle {
    color: String,
    dasharray: Option<&'static str>,
    /// Fill for filled shapes and text
    fill: String,
}

impl StrokeStyle {
    fn for_layer(layer: Option<&Layer>) -> Self {
        let black = BLACK.to_string();
        match layer {
            None => Self {
                color: black.clone(),
                dasharray: None,
                fill: black,
            },
            Some(layer) => Self {
                color: layer
                    .stroke
                    .map_or_else(|| "none".to_string(), |c| c.to_string()),
                dasharray: layer.dash.dasharray(),
                fill: layer.fill.or(layer.stroke).unwrap_or(BLACK).to_string(),
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Serializer
// ═══════════════════════════════════════════════════════════════════════

/// Render the scene to a standalone SVG document sized in millimetres.
pub fn serialize(scene: &Scene) -> String {
    let mut svg = SvgBuilder::new(compute_bounds(scene));

    for (shape, layer_name) in scene.shapes() {
        let layer = scene.layer(layer_name);
        if layer.is_some_and(|l| !l.is_visible()) {
            continue;
        }
        let style = StrokeStyle::for_layer(layer);

        match shape {
            VectorShape::LineSegment { p1, p2 } => {
                let d = format!("M {} L {}", pt(*p1), pt(*p2));
                svg.path(&d, "none", &style);
            }
            VectorShape::Rectangle {
                width,
                height,
                center,
            } => {
                let (hw, hh) = (width / 2.0, height / 2.0);
                let d = format!(
                    "M {} L {} L {} L {} Z",
                    pt(Point::new(center.x - hw, center.y - hh)),
                    pt(Point::new(center.x + hw, center.y - hh)),
                    pt(Point::new(center.x + hw, center.y + hh)),
                    pt(Point::new(center.x - hw, center.y + hh)),
                );
                svg.path(&d, "none", &style);
            }
            VectorShape::BezierCurve { p0, cp1, cp2, p3 } => {
                let d = format!("M {} C {} {} {}", pt(*p0), pt(*cp1), pt(*cp2), pt(*p3));
                svg.path(&d, "none", &style);
            }
            VectorShape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                svg.path(&arc_path(*center, *radius, *start_angle, *end_angle), "none", &style);
            }
            VectorShape::Polygon {
                vertices,
                offset,
                filled,
                pattern,
            } => {
                let Some((first, rest)) = vertices.split_first() else {
                    continue;
                };
                let mut d = format!("M {}", pt(*first + *offset));
                for v in rest {
                    let _ = write!(d, " L {}", pt(*v + *offset));
                }
                d.push_str(" Z");
                let fill = match (filled, pattern) {
                    (false, _) => "none".to_string(),
                    (true, Some(id)) => format!("url(#{id})"),
                    (true, None) => style.fill.clone(),
                };
                svg.path(&d, &fill, &style);
            }
            VectorShape::Label {
                text,
                font_size,
                position,
                rotation,
            } => {
                svg.text(*position, text, *font_size, *rotation, &style.fill);
            }
        }
    }

    svg.build()
}

fn pt(p: Point) -> String {
    format!("{:.3} {:.3}", p.x, p.y)
}

/// Path data for a counter-clockwise arc. A full circle is drawn as two
/// half arcs.
fn arc_path(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> String {
    let span = (end_angle - start_angle).rem_euclid(TAU);
    let start = center.polar(radius, start_angle);

    if is_full_circle(start_angle, end_angle) {
        let opposite = center.polar(radius, start_angle + PI);
        return format!(
            "M {} A {r:.3} {r:.3} 0 0 1 {} A {r:.3} {r:.3} 0 0 1 {}",
            pt(start),
            pt(opposite),
            pt(start),
            r = radius
        );
    }

    let end = center.polar(radius, end_angle);
    let large_arc = u8::from(span > PI);
    format!(
        "M {} A {r:.3} {r:.3} 0 {large_arc} 1 {}",
        pt(start),
        pt(end),
        r = radius
    )
}
