//! Side-view geometry solver.
//!
//! Solving runs leaf first: fingerboard camber, string angles, neck, then
//! the fingerboard end and clearance, the body and the cross-section. Only
//! the string-angle and neck stages can fail.

pub mod bezier;
pub mod body;
pub mod cross_section;
pub mod fingerboard;
pub mod neck;
pub mod sagitta;
pub mod strings;

use crate::error::GeometryError;
use crate::model::{DerivedGeometry, InstrumentParameters};

/// Derive the full neck geometry from one parameter snapshot.
pub fn solve_geometry(params: &InstrumentParameters) -> Result<DerivedGeometry, GeometryError> {
    let thickness = sagitta::fingerboard_thickness(params);
    let angles = strings::solve_string_angles(params, thickness.at_join)?;
    let neck = neck::solve_neck(params, &angles, &thickness)?;
    let fb = fingerboard::solve_fingerboard(
        params,
        &neck,
        angles.neck_stop,
        thickness.at_nut,
        thickness.at_join,
    );
    let clearance = fingerboard::string_clearance(params, &neck, &fb);

    let string_angle_to_ribs = angles.string_angle_to_ribs_rad.to_degrees();
    let body = body::solve_body(params, neck.bridge_top, angles.body_stop, string_angle_to_ribs);
    let section = cross_section::solve_cross_section(params);

    let derived = DerivedGeometry {
        neck_angle: neck.neck_angle,
        neck_stop: angles.neck_stop,
        body_stop: angles.body_stop,
        string_angle_to_ribs,
        string_angle_to_ribs_rad: angles.string_angle_to_ribs_rad,
        string_angle_to_fingerboard: angles.string_angle_to_fingerboard,
        fingerboard_angle: neck.fingerboard_angle,
        sagitta_at_nut: thickness.sagitta_at_nut,
        sagitta_at_join: thickness.sagitta_at_join,
        fb_thickness_at_nut: thickness.at_nut,
        fb_thickness_at_join: thickness.at_join,
        fb_thickness_at_end: fb.thickness_at_end,
        nut_top: neck.nut_top,
        bridge_top: neck.bridge_top,
        neck_end: neck.neck_end,
        fingerboard_end: fb.end,
        neck_line_angle: neck.neck_line_angle,
        fb_direction_angle: fb.direction_angle,
        nut_draw_radius: neck.nut_draw_radius,
        string_length: neck.string_length,
        nut_relative_to_ribs: neck.nut_top.y,
        clearance,
        afterlength_angle: body.afterlength_angle,
        string_break_angle: body.string_break_angle,
        back_break: body.back_break,
        neck_block_max_width: section.neck_block_max_width,
        fret_positions: strings::fret_positions(params.vsl, params.family.fret_count()),
    };

    log::debug!(
        "solved {} ({}): neck angle {:.2}°, neck stop {:.2}, break angle {:.2}°",
        params.instrument_name,
        params.family.name(),
        derived.neck_angle,
        derived.neck_stop,
        derived.string_break_angle
    );
    Ok(derived)
}
