//! Drawing renderer: places the solved geometry on the layers of a vector
//! scene, annotates it with dimensions and serializes it to SVG.
//!
//! Coordinates are drawing millimetres with the origin on the rib line at
//! the body join; the SVG output is sized in `mm` so it prints 1:1.

mod constants;
mod cross_section;
pub mod dimensions;
mod radius_template;
pub mod scene;
mod svg_builder;

use std::f64::consts::FRAC_PI_2;

use crate::model::*;
use constants::*;
use dimensions::*;
use scene::{DashStyle, Scene, VectorShape};

pub use constants::{ARROW_SIZE, DIMENSION_FONT_SIZE, PTS_MM};
pub use cross_section::{cross_section_scene, render_cross_section};
pub use radius_template::{
    radius_template, radius_template_scene, render_radius_template, RadiusTemplate,
};
pub use svg_builder::{compute_bounds, serialize, Bounds};

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render the annotated side view of the neck and body as an SVG string.
pub fn render_drawing(
    params: &InstrumentParameters,
    derived: &DerivedGeometry,
    options: &DrawingOptions,
) -> String {
    serialize(&side_view_scene(params, derived, options))
}

/// Build the side-view scene without serializing it.
pub fn side_view_scene(
    params: &InstrumentParameters,
    derived: &DerivedGeometry,
    options: &DrawingOptions,
) -> Scene {
    let mut sheet = Sheet::new(options.show_measurements);

    draw_body(&mut sheet, params, derived);
    draw_neck(&mut sheet, params, derived);
    draw_fingerboard(&mut sheet, params, derived);
    let string_line = draw_string_and_reference(&mut sheet, derived);
    draw_afterlength(&mut sheet, params, derived, string_line);
    draw_document_text(&mut sheet, params, derived, options);
    add_measurements(&mut sheet, params, derived, string_line);

    log::debug!(
        "side view of {}: {} shapes",
        params.instrument_name,
        sheet.scene.shapes().len()
    );
    sheet.scene
}

// ═══════════════════════════════════════════════════════════════════════
// Layers
// ═══════════════════════════════════════════════════════════════════════

pub(crate) const LAYER_TEXT: &str = "text";
pub(crate) const LAYER_DRAWING: &str = "drawing";
pub(crate) const LAYER_SCHEMATIC: &str = "schematic";
pub(crate) const LAYER_SCHEMATIC_DOTTED: &str = "schematic_dotted";

/// A scene with the standard drawing layers plus the measurement switch.
pub(crate) struct Sheet {
    pub(crate) scene: Scene,
    show_measurements: bool,
}

impl Sheet {
    pub(crate) fn new(show_measurements: bool) -> Self {
        let mut scene = Scene::new();
        scene.add_layer(LAYER_TEXT, Some(TEXT_COLOR), None, DashStyle::Hidden);
        scene.add_layer(LAYER_DRAWING, None, Some(BLACK), DashStyle::Continuous);
        scene.add_layer(LAYER_SCHEMATIC, None, Some(BLACK), DashStyle::Dashed);
        scene.add_layer(LAYER_SCHEMATIC_DOTTED, None, Some(GREY), DashStyle::Dotted);

        // Hidden measurements keep their shapes on colourless layers.
        let dim = show_measurements.then_some(DIMENSION_COLOR);
        scene.add_layer(DimensionLayer::Dimensions.name(), dim, dim, DashStyle::Dashed);
        scene.add_layer(DimensionLayer::Extensions.name(), None, dim, DashStyle::Continuous);
        scene.add_layer(DimensionLayer::Arrows.name(), dim, dim, DashStyle::Continuous);

        Self {
            scene,
            show_measurements,
        }
    }

    pub(crate) fn add(&mut self, shape: VectorShape, layer: &str) {
        self.scene.add(shape, layer);
    }

    pub(crate) fn line(&mut self, p1: impl Into<Point>, p2: impl Into<Point>, layer: &str) {
        self.scene.add(VectorShape::line(p1, p2), layer);
    }

    /// Add dimension shapes; measurement labels are dropped when
    /// measurements are hidden.
    pub(crate) fn annotate(&mut self, shapes: DimensionShapes) {
        for (shape, layer) in shapes {
            if layer == DimensionLayer::Text && !self.show_measurements {
                continue;
            }
            self.scene.add(shape, layer.name());
        }
    }

    /// A bare dimension line with arrows and a label beside it.
    fn arrowed(&mut self, p1: Point, p2: Point, label: String) {
        let mut shapes = vec![(VectorShape::line(p1, p2), DimensionLayer::Dimensions)];
        shapes.extend(dimension_arrows(p1, p2, ARROW_SIZE));
        let at = Point::new(p1.x + DIMENSION_FONT_SIZE, (p1.y + p2.y) / 2.0);
        shapes.push((
            VectorShape::label(label, DIMENSION_FONT_SIZE, at),
            DimensionLayer::Text,
        ));
        self.annotate(shapes);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Side view
// ═══════════════════════════════════════════════════════════════════════

fn draw_body(sheet: &mut Sheet, params: &InstrumentParameters, derived: &DerivedGeometry) {
    let length = params.body_length;
    let belly = params.belly_edge_thickness;

    sheet.add(
        VectorShape::Rectangle {
            width: length,
            height: belly,
            center: Point::new(length / 2.0, belly / 2.0),
        },
        LAYER_DRAWING,
    );
    sheet.add(
        VectorShape::Rectangle {
            width: length,
            height: params.rib_height,
            center: Point::new(length / 2.0, belly - params.rib_height / 2.0),
        },
        LAYER_DRAWING,
    );

    let [p0, cp1, cp2, p3] = crate::geometry::bezier::quadratic_through(
        Point::new(0.0, belly),
        Point::new(derived.body_stop, params.arching_height),
        Point::new(length, belly),
    );
    sheet.add(VectorShape::BezierCurve { p0, cp1, cp2, p3 }, LAYER_SCHEMATIC);

    if let Some(back) = derived.back_break {
        sheet.line(back.start, back.end, LAYER_DRAWING);
    }
}

fn draw_neck(sheet: &mut Sheet, params: &InstrumentParameters, derived: &DerivedGeometry) {
    let bridge_x = derived.bridge_top.x;
    sheet.line(
        (bridge_x, params.arching_height),
        derived.bridge_top,
        LAYER_DRAWING,
    );

    let join_foot = Point::ORIGIN;
    let join_top = Point::new(0.0, params.overstand);
    let neck_end = derived.neck_end;
    sheet.line(join_foot, join_top, LAYER_DRAWING);
    sheet.line(join_top, neck_end, LAYER_DRAWING);

    // Quarter arc of the nut, from the neck's underside round to its axis.
    let start_angle = derived.neck_line_angle - FRAC_PI_2;
    let end_angle = start_angle + FRAC_PI_2;
    let radius = derived.nut_draw_radius;
    sheet.add(
        VectorShape::Arc {
            center: neck_end,
            radius,
            start_angle,
            end_angle,
        },
        LAYER_SCHEMATIC_DOTTED,
    );
    sheet.line(neck_end, neck_end.polar(radius, start_angle), LAYER_SCHEMATIC_DOTTED);
    sheet.line(neck_end, neck_end.polar(radius, end_angle), LAYER_SCHEMATIC_DOTTED);

    let label = format!("{:.1}°", derived.neck_angle);
    sheet.annotate(angle_dimension(
        (join_foot, join_top),
        (join_top, neck_end),
        Some(&label),
        NECK_ANGLE_ARC_RADIUS,
        DIMENSION_FONT_SIZE,
    ));
}

fn draw_fingerboard(sheet: &mut Sheet, params: &InstrumentParameters, derived: &DerivedGeometry) {
    let perp = derived.fb_direction_angle + FRAC_PI_2;
    let nut_end = derived.neck_end;
    let body_end = derived.fingerboard_end;

    let visible_nut = nut_end.polar(params.fb_visible_height_at_nut, perp);
    let visible_end = body_end.polar(params.fb_visible_height_at_join, perp);
    let top_nut = nut_end.polar(derived.fb_thickness_at_nut, perp);
    let top_end = body_end.polar(derived.fb_thickness_at_end, perp);

    sheet.add(
        VectorShape::Polygon {
            vertices: vec![nut_end, body_end, visible_end, visible_nut],
            offset: Point::ORIGIN,
            filled: true,
            pattern: Some("diagonalHatch".into()),
        },
        LAYER_DRAWING,
    );
    sheet.line(visible_nut, top_nut, LAYER_DRAWING);
    sheet.line(visible_end, top_end, LAYER_DRAWING);
    sheet.line(top_nut, top_end, LAYER_DRAWING);
}

fn draw_string_and_reference(sheet: &mut Sheet, derived: &DerivedGeometry) -> (Point, Point) {
    let reference_end = Point::new(derived.nut_top.x - REFERENCE_LINE_OVERRUN, 0.0);
    sheet.line(Point::ORIGIN, reference_end, DimensionLayer::Extensions.name());

    let string_line = (derived.nut_top, derived.bridge_top);
    sheet.line(string_line.0, string_line.1, LAYER_DRAWING);
    string_line
}

fn draw_afterlength(
    sheet: &mut Sheet,
    params: &InstrumentParameters,
    derived: &DerivedGeometry,
    string_line: (Point, Point),
) {
    let tail = crate::geometry::body::tailpiece_top(params);
    let afterlength = (tail, derived.bridge_top);
    sheet.line(afterlength.0, afterlength.1, LAYER_SCHEMATIC_DOTTED);

    if derived.string_break_angle > 0.0 {
        let label = format!("{:.1}°", derived.string_break_angle);
        sheet.annotate(angle_dimension(
            string_line,
            afterlength,
            Some(&label),
            BREAK_ANGLE_ARC_RADIUS,
            DIMENSION_FONT_SIZE,
        ));
    }

    if params.tailpiece_height > 0.0 {
        let base = Point::new(params.body_length, params.belly_edge_thickness);
        sheet.line(base, tail, LAYER_SCHEMATIC_DOTTED);

        let x = params.body_length + 20.0;
        sheet.arrowed(
            Point::new(x, base.y),
            Point::new(x, tail.y),
            format!("{:.1}", params.tailpiece_height),
        );
    }
}

fn draw_document_text(
    sheet: &mut Sheet,
    params: &InstrumentParameters,
    derived: &DerivedGeometry,
    options: &DrawingOptions,
) {
    let title_at = Point::new(
        params.body_length / 2.0,
        params.arching_height + params.bridge_height + TITLE_GAP,
    );
    sheet.add(
        VectorShape::label(params.instrument_name.as_str(), TITLE_FONT_SIZE, title_at),
        LAYER_TEXT,
    );

    if let Some(footer) = options.footer.as_deref() {
        let footer_at = Point::new(
            derived.neck_end.x,
            params.belly_edge_thickness - params.rib_height - FOOTER_GAP,
        );
        sheet.add(VectorShape::label(footer, FOOTER_FONT_SIZE, footer_at), LAYER_TEXT);
    }
}

fn add_measurements(
    sheet: &mut Sheet,
    params: &InstrumentParameters,
    derived: &DerivedGeometry,
    string_line: (Point, Point),
) {
    let nut = derived.nut_top;
    let clearance = &derived.clearance;

    if sheet.show_measurements {
        let x = nut.x - REFERENCE_LINE_OVERRUN;
        sheet.annotate(vertical_dimension(
            Point::new(x, 0.0),
            Point::new(x, nut.y),
            &format!("{:.1}", derived.nut_relative_to_ribs),
            DimensionStyle::vertical().with_offset(-DIMENSION_OFFSET_VERTICAL),
        ));
    }

    sheet.annotate(diagonal_dimension(
        string_line.0,
        string_line.1,
        &format!("{:.1}", derived.string_length),
        DimensionStyle::diagonal().with_offset(10.0),
    ));

    if clearance.nut_to_perpendicular_distance > 0.0 {
        sheet.annotate(diagonal_dimension(
            nut,
            clearance.nut_perpendicular_intersection,
            &format!("{:.1}", clearance.nut_to_perpendicular_distance),
            DimensionStyle::diagonal().with_offset(20.0),
        ));
    }

    sheet.annotate(vertical_dimension(
        clearance.fb_surface_point,
        clearance.string_at_fb_end,
        &format!("{:.1}", clearance.string_height_at_fb_end),
        DimensionStyle::vertical(),
    ));

    let neck_end = derived.neck_end;
    sheet.annotate(horizontal_dimension(
        neck_end,
        Point::new(0.0, neck_end.y),
        &format!("{:.1}", neck_end.x.abs()),
        DimensionStyle::horizontal().with_extension(EXTENSION_LENGTH),
    ));

    if params.overstand > 0.0 {
        sheet.annotate(vertical_dimension(
            Point::ORIGIN,
            Point::new(0.0, params.overstand),
            &format!("{:.1}", params.overstand),
            DimensionStyle::vertical(),
        ));
    }

    sheet.annotate(vertical_dimension(
        Point::new(derived.body_stop, 0.0),
        Point::new(derived.body_stop, params.arching_height),
        &format!("{:.1}", params.arching_height),
        DimensionStyle::vertical(),
    ));

    let bottom = params.belly_edge_thickness - params.rib_height;
    sheet.annotate(horizontal_dimension(
        Point::new(0.0, bottom),
        Point::new(derived.body_stop, bottom),
        &format!("{:.1}", derived.body_stop),
        DimensionStyle::horizontal()
            .with_offset(-15.0)
            .with_extension(EXTENSION_LENGTH),
    ));
    sheet.annotate(horizontal_dimension(
        Point::new(0.0, bottom),
        Point::new(params.body_length, bottom),
        &format!("{:.1}", params.body_length),
        DimensionStyle::horizontal()
            .with_offset(-30.0)
            .with_extension(EXTENSION_LENGTH),
    ));

    let rib_x = params.body_length + 10.0;
    sheet.arrowed(
        Point::new(rib_x, params.belly_edge_thickness),
        Point::new(rib_x, bottom),
        format!("{:.1}", params.rib_height),
    );
}
