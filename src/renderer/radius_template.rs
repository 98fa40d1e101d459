//! Fingerboard radius template: a printable gauge whose bottom edge is the
//! fingerboard camber cut into a rectangle. The flat top band carries the
//! radius as lettering.

use crate::error::GeometryError;
use crate::geometry::sagitta::sagitta;
use crate::model::{InstrumentParameters, Point};

use super::constants::*;
use super::scene::{DashStyle, Scene, VectorShape};
use super::{serialize, LAYER_DRAWING};

const LAYER_TEMPLATE: &str = "template";
const LAYER_LETTERING: &str = "lettering";

/// Template geometry in drawing coordinates: centred on x = 0, the camber
/// corners on y = 0 and the flat edge on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusTemplate {
    pub width: f64,
    pub height: f64,
    /// How far the camber rises into the template at the centre line
    pub arc_depth: f64,
    /// Centre of the camber circle, below the template
    pub arc_center: Point,
    pub radius: f64,
}

impl RadiusTemplate {
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Angles of the right and left camber corners about the arc centre.
    pub fn arc_angles(&self) -> (f64, f64) {
        let rise = -self.arc_center.y;
        let hw = self.half_width();
        (rise.atan2(hw), rise.atan2(-hw))
    }

    /// Closed outline: the top edge, then the camber from the right corner
    /// to the left one.
    pub fn outline(&self) -> Vec<Point> {
        let hw = self.half_width();
        let (right, left) = self.arc_angles();
        let mut points = vec![Point::new(-hw, self.height), Point::new(hw, self.height)];
        points.extend((0..=TEMPLATE_ARC_SAMPLES).map(|i| {
            let t = i as f64 / TEMPLATE_ARC_SAMPLES as f64;
            self.arc_center.polar(self.radius, right + t * (left - right))
        }));
        points
    }
}

/// Size the template for the fingerboard end. The template is wider than
/// the fingerboard, so a radius smaller than half its width cannot be cut.
pub fn radius_template(params: &InstrumentParameters) -> Result<RadiusTemplate, GeometryError> {
    let radius = params.fingerboard_radius;
    let width = params.fingerboard_width_at_end + TEMPLATE_WIDTH_MARGIN;
    let half_width = width / 2.0;
    if half_width >= radius {
        return Err(GeometryError::TemplateWiderThanRadius { radius, half_width });
    }

    let arc_depth = sagitta(radius, width);
    Ok(RadiusTemplate {
        width,
        height: arc_depth + TEMPLATE_FLAT_HEIGHT,
        arc_depth,
        arc_center: Point::new(0.0, arc_depth - radius),
        radius,
    })
}

/// Render the radius template as an SVG string.
pub fn render_radius_template(params: &InstrumentParameters) -> Result<String, GeometryError> {
    Ok(serialize(&radius_template_scene(params)?))
}

pub fn radius_template_scene(params: &InstrumentParameters) -> Result<Scene, GeometryError> {
    let template = radius_template(params)?;
    let mut scene = Scene::new();
    scene.add_layer(LAYER_TEMPLATE, Some(BLACK), None, DashStyle::Continuous);
    scene.add_layer(LAYER_DRAWING, None, Some(BLACK), DashStyle::Continuous);
    scene.add_layer(LAYER_LETTERING, Some(WHITE), None, DashStyle::Continuous);

    scene.add(
        VectorShape::Polygon {
            vertices: template.outline(),
            offset: Point::ORIGIN,
            filled: true,
            pattern: None,
        },
        LAYER_TEMPLATE,
    );

    // Crisp edges over the fill; the camber as a true arc.
    let hw = template.half_width();
    let h = template.height;
    scene.add(VectorShape::line((-hw, h), (hw, h)), LAYER_DRAWING);
    scene.add(VectorShape::line((hw, h), (hw, 0.0)), LAYER_DRAWING);
    scene.add(VectorShape::line((-hw, 0.0), (-hw, h)), LAYER_DRAWING);
    let (right, left) = template.arc_angles();
    scene.add(
        VectorShape::Arc {
            center: template.arc_center,
            radius: template.radius,
            start_angle: right,
            end_angle: left,
        },
        LAYER_DRAWING,
    );

    let char_height = TEMPLATE_FLAT_HEIGHT * TEMPLATE_TEXT_HEIGHT_FRACTION;
    let margin = char_height * TEMPLATE_TEXT_MARGIN_FRACTION;
    scene.add(
        VectorShape::label(
            format!("{:.0}mm", template.radius),
            char_height,
            Point::new(0.0, h - margin - char_height / 2.0),
        ),
        LAYER_LETTERING,
    );

    log::debug!(
        "radius template {:.1} x {:.2} mm, camber depth {:.2} mm",
        template.width,
        template.height,
        template.arc_depth
    );
    Ok(scene)
}
