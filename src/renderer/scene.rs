//! Vector scene: shapes placed on named layers, in drawing order.

use std::fmt;

use crate::model::Point;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashStyle {
    #[default]
    Continuous,
    Dashed,
    Dotted,
    Hidden,
}

impl DashStyle {
    /// `stroke-dasharray` value, `None` for a solid line.
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            DashStyle::Continuous => None,
            DashStyle::Dashed => Some("5,3"),
            DashStyle::Dotted => Some("1,2"),
            DashStyle::Hidden => Some("2,2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub dash: DashStyle,
}

impl Layer {
    /// A layer with neither fill nor stroke colour draws nothing.
    pub fn is_visible(&self) -> bool {
        self.fill.is_some() || self.stroke.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VectorShape {
    LineSegment {
        p1: Point,
        p2: Point,
    },
    /// Counter-clockwise from `start_angle` to `end_angle`, radians
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Rectangle {
        width: f64,
        height: f64,
        center: Point,
    },
    BezierCurve {
        p0: Point,
        cp1: Point,
        cp2: Point,
        p3: Point,
    },
    Polygon {
        vertices: Vec<Point>,
        offset: Point,
        filled: bool,
        /// Id of a `<defs>` pattern used as the fill
        pattern: Option<String>,
    },
    Label {
        text: String,
        font_size: f64,
        position: Point,
        /// Degrees, counter-clockwise
        rotation: f64,
    },
}

impl VectorShape {
    pub fn line(p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        VectorShape::LineSegment {
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    pub fn label(text: impl Into<String>, font_size: f64, position: Point) -> Self {
        VectorShape::Label {
            text: text.into(),
            font_size,
            position,
            rotation: 0.0,
        }
    }
}

/// Shapes in drawing order, each tagged with the name of its layer.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    layers: Vec<Layer>,
    shapes: Vec<(VectorShape, String)>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a layer. Re-registering a name replaces its style.
    pub fn add_layer(
        &mut self,
        name: &str,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        dash: DashStyle,
    ) {
        let layer = Layer {
            name: name.to_string(),
            fill,
            stroke,
            dash,
        };
        match self.layers.iter_mut().find(|l| l.name == name) {
            Some(existing) => *existing = layer,
            None => self.layers.push(layer),
        }
    }

    pub fn add(&mut self, shape: VectorShape, layer: &str) {
        self.shapes.push((shape, layer.to_string()));
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn shapes(&self) -> &[(VectorShape, String)] {
        &self.shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_without_colour_are_invisible() {
        let mut scene = Scene::new();
        scene.add_layer("hidden", None, None, DashStyle::Dashed);
        scene.add_layer("text", Some(Rgb(0, 0, 0)), None, DashStyle::Hidden);
        assert!(!scene.layer("hidden").unwrap().is_visible());
        assert!(scene.layer("text").unwrap().is_visible());
        assert!(scene.layer("missing").is_none());
    }

    #[test]
    fn re_registering_a_layer_replaces_it() {
        let mut scene = Scene::new();
        scene.add_layer("dimensions", None, None, DashStyle::Dashed);
        scene.add_layer("dimensions", None, Some(Rgb(255, 0, 0)), DashStyle::Dashed);
        assert_eq!(scene.layers().len(), 1);
        assert_eq!(scene.layer("dimensions").unwrap().stroke, Some(Rgb(255, 0, 0)));
    }

    #[test]
    fn shapes_keep_insertion_order() {
        let mut scene = Scene::new();
        scene.add(VectorShape::line((0.0, 0.0), (1.0, 0.0)), "drawing");
        scene.add(VectorShape::label("a", 2.0, Point::ORIGIN), "text");
        let names: Vec<&str> = scene.shapes().iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(names, ["drawing", "text"]);
    }

    #[test]
    fn colours_format_as_css() {
        assert_eq!(Rgb(255, 0, 10).to_string(), "rgb(255,0,10)");
        assert_eq!(DashStyle::Dotted.dasharray(), Some("1,2"));
        assert_eq!(DashStyle::Continuous.dasharray(), None);
    }
}
