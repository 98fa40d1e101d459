//! Fingerboard end point, thickness taper and string clearance at the
//! body end of the fingerboard.

use std::f64::consts::FRAC_PI_2;

use crate::model::{InstrumentParameters, Point, StringClearance};

use super::neck::{join_anchor, NeckGeometry};

/// Determinants closer to zero than this mean parallel lines.
pub const PARALLEL_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerboardGeometry {
    /// Radians, from the nut end toward the body end
    pub direction_angle: f64,
    /// Underside of the fingerboard at its body end
    pub end: Point,
    pub thickness_at_end: f64,
}

impl FingerboardGeometry {
    /// Unit direction of "up through the fingerboard".
    pub fn perpendicular_angle(&self) -> f64 {
        self.direction_angle + FRAC_PI_2
    }
}

pub fn solve_fingerboard(
    params: &InstrumentParameters,
    neck: &NeckGeometry,
    neck_stop: f64,
    thickness_at_nut: f64,
    thickness_at_join: f64,
) -> FingerboardGeometry {
    let direction_angle = neck.neck_line_angle + std::f64::consts::PI;
    let end = neck.neck_end.polar(params.fingerboard_length, direction_angle);
    let thickness_at_end = thickness_at_nut
        + (thickness_at_join - thickness_at_nut) * (params.fingerboard_length / neck_stop);

    FingerboardGeometry {
        direction_angle,
        end,
        thickness_at_end,
    }
}

/// Intersection of the lines `a + s·da` and `b + t·db`, or `None` when they
/// are parallel.
pub fn line_intersection(a: Point, da: Point, b: Point, db: Point) -> Option<Point> {
    let det = da.x * db.y - da.y * db.x;
    if det.abs() <= PARALLEL_EPSILON {
        return None;
    }
    let s = ((b.x - a.x) * db.y - (b.y - a.y) * db.x) / det;
    Some(a + da * s)
}

pub fn string_clearance(
    params: &InstrumentParameters,
    neck: &NeckGeometry,
    fingerboard: &FingerboardGeometry,
) -> StringClearance {
    let anchor = join_anchor(params);
    let neck_dir = neck.neck_end - anchor;
    let neck_perpendicular = Point::new(-neck_dir.y, neck_dir.x);
    let string_dir = neck.bridge_top - neck.nut_top;

    let (nut_perpendicular_intersection, nut_to_perpendicular_distance) =
        match line_intersection(neck.nut_top, string_dir, anchor, neck_perpendicular) {
            Some(p) => (p, neck.nut_top.distance_to(p)),
            None => {
                log::warn!("string runs parallel to the neck perpendicular; clearance set to zero");
                (Point::ORIGIN, 0.0)
            }
        };

    // The string point that sits above the fingerboard end, found by the
    // same fraction along the string as the fingerboard end along the neck.
    let fb_delta = fingerboard.end - neck.neck_end;
    let t = if string_dir.x != 0.0 {
        fb_delta.x / string_dir.x
    } else if string_dir.y != 0.0 {
        fb_delta.y / string_dir.y
    } else {
        0.0
    };
    let string_at_fb_end = neck.nut_top + string_dir * t;

    let perp = fingerboard.perpendicular_angle();
    let unit_perp = Point::new(perp.cos(), perp.sin());
    let fb_top_end = fingerboard.end.polar(fingerboard.thickness_at_end, perp);

    let to_string = string_at_fb_end - fb_top_end;
    let string_height_at_fb_end = to_string.x * unit_perp.x + to_string.y * unit_perp.y;
    let fb_surface_point = string_at_fb_end - unit_perp * string_height_at_fb_end;

    StringClearance {
        nut_perpendicular_intersection,
        nut_to_perpendicular_distance,
        string_at_fb_end,
        fb_surface_point,
        string_height_at_fb_end,
    }
}
