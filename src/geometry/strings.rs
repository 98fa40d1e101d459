//! String angle solver: where the string runs relative to the ribs and the
//! fingerboard, and the resulting body stop / neck stop split.

use crate::error::GeometryError;
use crate::model::{FamilyInputs, InstrumentParameters};

/// Output of [`solve_string_angles`], identical for every family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringAngles {
    pub body_stop: f64,
    pub neck_stop: f64,
    pub string_angle_to_ribs_rad: f64,
    /// Degrees
    pub string_angle_to_fingerboard: f64,
}

/// Distance of fret `fret` (1-based) from the nut, equal temperament.
pub fn fret_position(vsl: f64, fret: u32) -> f64 {
    vsl - vsl / 2f64.powf(fret as f64 / 12.0)
}

/// Positions of frets `1..=no_frets` measured from the nut.
pub fn fret_positions(vsl: f64, no_frets: u32) -> Vec<f64> {
    (1..=no_frets).map(|fret| fret_position(vsl, fret)).collect()
}

pub fn solve_string_angles(
    params: &InstrumentParameters,
    fb_thickness_at_join: f64,
) -> Result<StringAngles, GeometryError> {
    let angles = match params.family {
        FamilyInputs::BowedFretless {
            body_stop,
            string_height_eof,
        }
        | FamilyInputs::BowedBodyStop {
            body_stop,
            string_height_eof,
            ..
        } => body_stop_driven(params, body_stop, string_height_eof, fb_thickness_at_join),
        FamilyInputs::FrettedBodyJoin {
            fret_join,
            string_height_12th_fret,
            ..
        } => fret_join_driven(params, fret_join, string_height_12th_fret, fb_thickness_at_join)?,
    };

    if !(angles.neck_stop > 0.0 && angles.neck_stop < params.vsl) {
        return Err(GeometryError::NeckStopOutOfRange {
            neck_stop: angles.neck_stop,
            vsl: params.vsl,
        });
    }

    log::debug!(
        "{}: string angle to ribs {:.3}°, body stop {:.2}, neck stop {:.2}",
        params.family.name(),
        angles.string_angle_to_ribs_rad.to_degrees(),
        angles.body_stop,
        angles.neck_stop
    );
    Ok(angles)
}

/// Vertical leg between the bridge top and the string at the body join.
fn opposite_leg(params: &InstrumentParameters, fb_thickness_at_join: f64, string_height_at_join: f64) -> f64 {
    params.arching_height + params.bridge_height
        - params.overstand
        - fb_thickness_at_join
        - string_height_at_join
}

fn string_angle_to_fingerboard(params: &InstrumentParameters, string_height_at_end: f64) -> f64 {
    ((string_height_at_end - params.string_height_nut) / params.fingerboard_length)
        .atan()
        .to_degrees()
}

fn body_stop_driven(
    params: &InstrumentParameters,
    body_stop: f64,
    string_height_eof: f64,
    fb_thickness_at_join: f64,
) -> StringAngles {
    let vsl = params.vsl;
    let string_height_at_join = (string_height_eof - params.string_height_nut)
        * ((vsl - body_stop) / params.fingerboard_length)
        + params.string_height_nut;

    let opposite = opposite_leg(params, fb_thickness_at_join, string_height_at_join);
    let angle = (opposite / body_stop).atan();
    let string_to_join = opposite.hypot(body_stop);
    let string_nut_to_join = vsl - string_to_join;

    StringAngles {
        body_stop,
        neck_stop: angle.cos() * string_nut_to_join,
        string_angle_to_ribs_rad: angle,
        string_angle_to_fingerboard: string_angle_to_fingerboard(params, string_height_eof),
    }
}

fn fret_join_driven(
    params: &InstrumentParameters,
    fret_join: u32,
    string_height_12th_fret: f64,
    fb_thickness_at_join: f64,
) -> Result<StringAngles, GeometryError> {
    let vsl = params.vsl;
    let join_position = fret_position(vsl, fret_join);
    let octave_position = fret_position(vsl, 12);
    let height_gain_per_mm = (string_height_12th_fret - params.string_height_nut) / octave_position;

    let string_height_at_join = params.string_height_nut + height_gain_per_mm * join_position;
    let hypotenuse = vsl - join_position;
    let opposite = opposite_leg(params, fb_thickness_at_join, string_height_at_join);

    let sin_value = opposite / hypotenuse;
    if !(sin_value.abs() <= 1.0) {
        return Err(GeometryError::FretJoinUnreachable {
            fret_join,
            opposite,
            hypotenuse,
            sin_value,
        });
    }
    let angle = sin_value.asin();

    let string_height_at_end = params.string_height_nut + height_gain_per_mm * params.fingerboard_length;

    Ok(StringAngles {
        body_stop: angle.cos() * hypotenuse,
        neck_stop: angle.cos() * join_position,
        string_angle_to_ribs_rad: angle,
        string_angle_to_fingerboard: string_angle_to_fingerboard(params, string_height_at_end),
    })
}
