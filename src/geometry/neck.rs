//! Neck angle and the nut / bridge / neck-end coordinate frame.

use crate::error::GeometryError;
use crate::model::{InstrumentParameters, Point};

use super::sagitta::FingerboardThickness;
use super::strings::StringAngles;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeckGeometry {
    /// Degrees between the rib line and the neck, measured at the join
    pub neck_angle: f64,
    /// Degrees
    pub fingerboard_angle: f64,
    pub nut_top: Point,
    pub bridge_top: Point,
    pub neck_end: Point,
    /// Radians, direction from the join anchor to the neck end
    pub neck_line_angle: f64,
    pub nut_draw_radius: f64,
    pub string_length: f64,
}

/// Join anchor: the fingerboard underside directly above the body join.
pub fn join_anchor(params: &InstrumentParameters) -> Point {
    Point::new(0.0, params.overstand)
}

pub fn solve_neck(
    params: &InstrumentParameters,
    angles: &StringAngles,
    thickness: &FingerboardThickness,
) -> Result<NeckGeometry, GeometryError> {
    let neck_stop = angles.neck_stop;
    let string_angle_to_ribs = angles.string_angle_to_ribs_rad.to_degrees();

    let fingerboard_angle = ((thickness.at_join - thickness.at_nut) / neck_stop)
        .atan()
        .to_degrees();
    let neck_angle = 90.0
        - (string_angle_to_ribs - angles.string_angle_to_fingerboard - fingerboard_angle);

    if !(neck_angle > 0.0 && neck_angle < 180.0) {
        return Err(GeometryError::NeckAngleOutOfRange {
            neck_angle,
            string_angle_to_ribs,
            string_angle_to_fingerboard: angles.string_angle_to_fingerboard,
            fingerboard_angle,
        });
    }

    let bridge_top = Point::new(angles.body_stop, params.arching_height + params.bridge_height);
    let nut_top = Point::new(
        -neck_stop,
        bridge_top.y - angles.string_angle_to_ribs_rad.sin() * params.vsl,
    );

    let anchor = join_anchor(params);
    let neck_angle_cos = neck_angle.to_radians().cos();
    let neck_end = Point::new(
        -neck_stop + neck_angle_cos * thickness.at_nut,
        anchor.y - neck_stop * neck_angle_cos,
    );

    let geometry = NeckGeometry {
        neck_angle,
        fingerboard_angle,
        nut_top,
        bridge_top,
        neck_end,
        neck_line_angle: anchor.angle_to(neck_end),
        nut_draw_radius: thickness.at_nut + params.string_height_nut,
        string_length: nut_top.distance_to(bridge_top),
    };
    log::debug!(
        "neck angle {:.2}°, nut at ({:.2}, {:.2}), string length {:.2}",
        geometry.neck_angle,
        nut_top.x,
        nut_top.y,
        geometry.string_length
    );
    Ok(geometry)
}
