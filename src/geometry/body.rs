//! Afterlength, string break angle over the bridge and the viol back break.

use crate::model::{BackBreak, FamilyInputs, InstrumentParameters, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyGeometry {
    /// Degrees, slope of the string between bridge and tailpiece
    pub afterlength_angle: f64,
    /// Degrees, total deflection of the string over the bridge
    pub string_break_angle: f64,
    pub back_break: Option<BackBreak>,
}

/// Where the string is anchored at the tail end of the body.
pub fn tailpiece_top(params: &InstrumentParameters) -> Point {
    Point::new(
        params.body_length,
        params.belly_edge_thickness + params.tailpiece_height,
    )
}

pub fn solve_body(
    params: &InstrumentParameters,
    bridge_top: Point,
    body_stop: f64,
    string_angle_to_ribs: f64,
) -> BodyGeometry {
    let tail = tailpiece_top(params);
    let afterlength_angle = (bridge_top.y - tail.y)
        .atan2(params.body_length - body_stop)
        .to_degrees();

    let back_break = match params.family {
        FamilyInputs::BowedBodyStop {
            break_angle,
            top_block_height,
            ..
        } => Some(back_break(params, break_angle, top_block_height)),
        _ => None,
    };

    BodyGeometry {
        afterlength_angle,
        string_break_angle: 180.0 - string_angle_to_ribs - afterlength_angle,
        back_break,
    }
}

/// The back of a viol runs flat from the tail, then angles up to the
/// shallower top block at the neck end.
fn back_break(params: &InstrumentParameters, break_angle: f64, top_block_height: f64) -> BackBreak {
    let drop = params.rib_height - top_block_height;
    let break_angle_rad = break_angle.to_radians();

    let run = if break_angle <= 0.0 {
        params.body_length
    } else {
        (drop / break_angle_rad.tan()).clamp(0.0, params.body_length)
    };

    BackBreak {
        back_break_length: params.body_length - run,
        start: Point::new(0.0, params.belly_edge_thickness - top_block_height),
        end: Point::new(run, params.belly_edge_thickness - params.rib_height),
        break_angle_rad,
    }
}
