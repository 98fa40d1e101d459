//! Geometry solver tests: whole-instrument scenarios through the public API.

use approx::assert_abs_diff_eq;
use neckdraft::geometry::sagitta::sagitta;
use neckdraft::{
    fret_table, solve_geometry, FamilyInputs, GeometryError, InstrumentParameters,
};

/// Flat fingerboard with 5.5 / 7.5 mm thickness at nut / join.
fn flat_violin() -> InstrumentParameters {
    InstrumentParameters {
        fingerboard_radius: 0.0,
        fb_visible_height_at_nut: 5.5,
        fb_visible_height_at_join: 7.5,
        ..InstrumentParameters::default()
    }
}

fn viol() -> InstrumentParameters {
    InstrumentParameters {
        instrument_name: "Bass viol".into(),
        vsl: 690.0,
        body_length: 480.0,
        rib_height: 100.0,
        arching_height: 25.0,
        bridge_height: 80.0,
        overstand: 20.0,
        fingerboard_length: 450.0,
        fingerboard_radius: 90.0,
        fingerboard_width_at_nut: 50.0,
        fingerboard_width_at_end: 75.0,
        family: FamilyInputs::BowedBodyStop {
            body_stop: 280.0,
            string_height_eof: 7.0,
            no_frets: 7,
            break_angle: 15.0,
            top_block_height: 40.0,
        },
        ..InstrumentParameters::default()
    }
}

fn guitar() -> InstrumentParameters {
    InstrumentParameters {
        instrument_name: "Guitar".into(),
        vsl: 650.0,
        body_length: 490.0,
        rib_height: 100.0,
        arching_height: 0.0,
        bridge_height: 12.0,
        overstand: 0.0,
        fingerboard_length: 470.0,
        fingerboard_radius: 400.0,
        fingerboard_width_at_nut: 52.0,
        fingerboard_width_at_end: 60.0,
        fb_visible_height_at_nut: 5.0,
        fb_visible_height_at_join: 5.0,
        string_height_nut: 0.5,
        family: FamilyInputs::FrettedBodyJoin {
            fret_join: 12,
            no_frets: 19,
            string_height_12th_fret: 3.0,
        },
        ..InstrumentParameters::default()
    }
}

#[test]
fn violin_end_to_end() {
    let params = flat_violin();
    let derived = solve_geometry(&params).expect("violin should solve");

    assert_abs_diff_eq!(derived.string_angle_to_ribs, 7.6705, epsilon = 1e-3);
    assert_abs_diff_eq!(derived.neck_stop, 127.092, epsilon = 1e-2);
    assert_abs_diff_eq!(derived.neck_angle, 83.952, epsilon = 1e-2);
    assert!(derived.neck_angle > 78.0 && derived.neck_angle < 88.0);
    assert!(derived.neck_stop > 120.0 && derived.neck_stop < 140.0);

    assert_eq!(derived.body_stop, 195.0);
    assert_eq!(derived.fb_thickness_at_nut, 5.5);
    assert_eq!(derived.fb_thickness_at_join, 7.5);
    assert!(derived.back_break.is_none());
    assert!(derived.fret_positions.is_empty());
}

#[test]
fn string_length_equals_vsl_for_every_family() {
    for params in [InstrumentParameters::default(), viol(), guitar()] {
        let derived = solve_geometry(&params).unwrap();
        assert_abs_diff_eq!(derived.string_length, params.vsl, epsilon = 1e-9);
        assert_abs_diff_eq!(derived.nut_relative_to_ribs, derived.nut_top.y, epsilon = 0.0);
    }
}

#[test]
fn default_violin_clearance_matches_end_of_fingerboard_height() {
    let derived = solve_geometry(&InstrumentParameters::default()).unwrap();
    let clearance = &derived.clearance;

    // The string height at the fingerboard end recovers the input within a
    // tenth of a millimetre.
    assert_abs_diff_eq!(clearance.string_height_at_fb_end, 4.0, epsilon = 0.1);
    assert!(clearance.nut_to_perpendicular_distance > 0.0);
    assert!(clearance.nut_to_perpendicular_distance < derived.string_length);
    assert_abs_diff_eq!(
        clearance.fb_surface_point.distance_to(clearance.string_at_fb_end),
        clearance.string_height_at_fb_end.abs(),
        epsilon = 1e-9
    );
}

#[test]
fn fingerboard_end_lies_along_the_neck_line() {
    let params = InstrumentParameters::default();
    let derived = solve_geometry(&params).unwrap();

    assert_abs_diff_eq!(
        derived.neck_end.distance_to(derived.fingerboard_end),
        params.fingerboard_length,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        derived.fb_direction_angle - derived.neck_line_angle,
        std::f64::consts::PI,
        epsilon = 1e-12
    );
    let taper = (derived.fb_thickness_at_join - derived.fb_thickness_at_nut)
        * (params.fingerboard_length / derived.neck_stop);
    assert_abs_diff_eq!(
        derived.fb_thickness_at_end,
        derived.fb_thickness_at_nut + taper,
        epsilon = 1e-12
    );
}

#[test]
fn sagitta_grows_thickness_and_stays_inside_radius() {
    let derived = solve_geometry(&InstrumentParameters::default()).unwrap();
    assert_abs_diff_eq!(derived.sagitta_at_nut, sagitta(41.0, 24.0), epsilon = 1e-12);
    assert!(derived.sagitta_at_nut > 0.0 && derived.sagitta_at_nut <= 41.0);
    assert!(derived.sagitta_at_join > derived.sagitta_at_nut);
    assert_abs_diff_eq!(
        derived.fb_thickness_at_nut,
        4.0 + derived.sagitta_at_nut,
        epsilon = 1e-12
    );
}

#[test]
fn break_angle_identity() {
    for params in [InstrumentParameters::default(), viol()] {
        let derived = solve_geometry(&params).unwrap();
        assert_abs_diff_eq!(
            derived.string_break_angle + derived.string_angle_to_ribs + derived.afterlength_angle,
            180.0,
            epsilon = 1e-9
        );
        assert!(derived.string_break_angle > 90.0);
    }
}

#[test]
fn viol_has_back_break_and_frets() {
    let derived = solve_geometry(&viol()).unwrap();
    let back = derived.back_break.expect("viol should have a back break");

    let run = 60.0 / 15.0_f64.to_radians().tan();
    assert_abs_diff_eq!(back.back_break_length, 480.0 - run, epsilon = 0.1);
    assert_abs_diff_eq!(back.start.y, 3.5 - 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(back.end.y, 3.5 - 100.0, epsilon = 1e-9);
    assert_eq!(derived.fret_positions.len(), 7);
}

#[test]
fn guitar_derives_both_stops_from_the_fret_join() {
    let params = guitar();
    let derived = solve_geometry(&params).unwrap();

    // Joined at the octave: both halves of the string project equally.
    assert_abs_diff_eq!(derived.neck_stop, derived.body_stop, epsilon = 1e-9);
    assert!(derived.neck_stop < 325.0);
    assert_eq!(derived.fret_positions.len(), 19);
    assert_abs_diff_eq!(derived.fret_positions[11], 325.0, epsilon = 1e-9);

    let table = fret_table(&params).unwrap();
    assert_eq!(table.rows.len(), 19);
}

#[test]
fn unreachable_fret_join_is_impossible_geometry() {
    let params = InstrumentParameters {
        bridge_height: 2000.0,
        ..guitar()
    };
    let err = solve_geometry(&params).unwrap_err();
    assert!(
        matches!(err, GeometryError::FretJoinUnreachable { fret_join: 12, .. }),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().starts_with("impossible geometry"));
}

#[test]
fn neck_stop_outside_string_is_rejected() {
    // Body stop longer than the string leaves nothing for the neck.
    let params = InstrumentParameters {
        family: FamilyInputs::BowedFretless {
            body_stop: 400.0,
            string_height_eof: 4.0,
        },
        ..InstrumentParameters::default()
    };
    let err = solve_geometry(&params).unwrap_err();
    assert!(matches!(err, GeometryError::NeckStopOutOfRange { .. }));
}

#[test]
fn body_stop_sweep_keeps_neck_stop_in_range() {
    for body_stop in (150..=260).step_by(10) {
        for arching_height in [12.0, 15.0, 18.0] {
            let params = InstrumentParameters {
                arching_height,
                family: FamilyInputs::BowedFretless {
                    body_stop: body_stop as f64,
                    string_height_eof: 4.0,
                },
                ..InstrumentParameters::default()
            };
            let derived = solve_geometry(&params).unwrap();
            assert!(derived.neck_stop > 0.0 && derived.neck_stop < params.vsl);
            assert!(derived.neck_angle > 0.0 && derived.neck_angle < 180.0);
        }
    }
}
