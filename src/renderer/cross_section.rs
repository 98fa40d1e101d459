//! Cross-section of the neck at the body join, looking from the nut.

use crate::geometry::bezier;
use crate::geometry::cross_section::blend_fillet;
use crate::model::*;

use super::constants::*;
use super::dimensions::*;
use super::scene::{DashStyle, Scene, VectorShape};
use super::{serialize, Sheet, LAYER_DRAWING, LAYER_SCHEMATIC, LAYER_SCHEMATIC_DOTTED, LAYER_TEXT};

/// Render the neck cross-section at the body join as an SVG string.
pub fn render_cross_section(
    params: &InstrumentParameters,
    derived: &DerivedGeometry,
    options: &DrawingOptions,
) -> String {
    serialize(&cross_section_scene(params, derived, options))
}

pub fn cross_section_scene(
    params: &InstrumentParameters,
    derived: &DerivedGeometry,
    options: &DrawingOptions,
) -> Scene {
    let mut sheet = Sheet::new(options.show_measurements);
    sheet
        .scene
        .add_layer(LAYER_NECK, Some(NECK_FILL), None, DashStyle::Continuous);
    let overstand = params.overstand;
    let belly = params.belly_edge_thickness;
    let half_fb = params.fingerboard_width_at_end / 2.0;

    // Neck sides: the right fillet and its mirror.
    let right = blend_fillet(params);
    let left = right.map(|p| Point::new(-p.x, p.y));

    // Face fill: up the right fillet, back down the left one.
    let [p0, cp1, cp2, p3] = right;
    let up: Vec<Point> = (0..=FILLET_SAMPLES)
        .map(|i| bezier::evaluate(p0, cp1, cp2, p3, i as f64 / FILLET_SAMPLES as f64))
        .collect();
    let down = up.iter().rev().map(|p| Point::new(-p.x, p.y));
    sheet.add(
        VectorShape::Polygon {
            vertices: up.iter().copied().chain(down).collect(),
            offset: Point::ORIGIN,
            filled: true,
            pattern: None,
        },
        LAYER_NECK,
    );
    for [p0, cp1, cp2, p3] in [right, left] {
        sheet.add(VectorShape::BezierCurve { p0, cp1, cp2, p3 }, LAYER_DRAWING);
    }

    // Rib and belly lines across the join.
    let reach = half_fb.max(params.neck_width_at_top_of_ribs / 2.0) + SECTION_OVERRUN;
    sheet.line((-reach, 0.0), (reach, 0.0), LAYER_SCHEMATIC);
    sheet.line((-reach, belly), (reach, belly), LAYER_SCHEMATIC_DOTTED);

    // Fingerboard: flat visible sides under a cambered top.
    let side_top = overstand + params.fb_visible_height_at_join;
    sheet.add(
        VectorShape::Polygon {
            vertices: vec![
                Point::new(-half_fb, overstand),
                Point::new(half_fb, overstand),
                Point::new(half_fb, side_top),
                Point::new(-half_fb, side_top),
            ],
            offset: Point::ORIGIN,
            filled: true,
            pattern: Some("diagonalHatch".into()),
        },
        LAYER_DRAWING,
    );
    let radius = params.fingerboard_radius;
    if radius > half_fb {
        let crown = side_top + derived.sagitta_at_join;
        let half_angle = (half_fb / radius).asin();
        sheet.add(
            VectorShape::Arc {
                center: Point::new(0.0, crown - radius),
                radius,
                start_angle: std::f64::consts::FRAC_PI_2 - half_angle,
                end_angle: std::f64::consts::FRAC_PI_2 + half_angle,
            },
            LAYER_DRAWING,
        );
    } else {
        sheet.line((-half_fb, side_top), (half_fb, side_top), LAYER_DRAWING);
    }

    // Button on the back of the body.
    let back = belly - params.rib_height;
    let half_button = params.button_width_at_join / 2.0;
    sheet.line((-half_button, back), (half_button, back), LAYER_SCHEMATIC);

    let block = derived.neck_block_max_width / 2.0;
    sheet.annotate(horizontal_dimension(
        Point::new(-block, belly),
        Point::new(block, belly),
        &format!("{:.1}", derived.neck_block_max_width),
        DimensionStyle::horizontal(),
    ));
    sheet.annotate(horizontal_dimension(
        Point::new(-half_fb, side_top),
        Point::new(half_fb, side_top),
        &format!("{:.1}", params.fingerboard_width_at_end),
        DimensionStyle::horizontal()
            .with_offset(derived.sagitta_at_join + DIMENSION_OFFSET_VERTICAL)
            .with_extension(EXTENSION_LENGTH),
    ));
    sheet.annotate(horizontal_dimension(
        Point::new(-half_button, back),
        Point::new(half_button, back),
        &format!("{:.1}", params.button_width_at_join),
        DimensionStyle::horizontal().with_extension(EXTENSION_LENGTH),
    ));
    if overstand > 0.0 {
        sheet.annotate(vertical_dimension(
            Point::new(half_fb, 0.0),
            Point::new(half_fb, overstand),
            &format!("{:.1}", overstand),
            DimensionStyle::vertical(),
        ));
    }

    sheet.add(
        VectorShape::label(
            format!("{}: neck at body join", params.instrument_name),
            TITLE_FONT_SIZE,
            Point::new(0.0, side_top + derived.sagitta_at_join + TITLE_GAP),
        ),
        LAYER_TEXT,
    );

    log::debug!(
        "cross-section of {}: neck block width {:.2}",
        params.instrument_name,
        derived.neck_block_max_width
    );
    sheet.scene
}

const LAYER_NECK: &str = "neck";
