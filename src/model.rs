//! Data model: instrument parameters in, derived geometry out.
//!
//! All lengths are millimetres and all stored angles are degrees unless the
//! field name ends in `_rad`. The drawing frame has its origin on the rib
//! line at the body join, +X toward the bridge and +Y up.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// Point
// ═══════════════════════════════════════════════════════════════════════

/// A point (or vector) in the drawing plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` in direction `angle` (radians).
    pub fn polar(self, distance: f64, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x + distance * c, self.y + distance * s)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector from `self` to `other`, in radians.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Input parameters
// ═══════════════════════════════════════════════════════════════════════

/// A complete, already range-checked parameter snapshot for one drawing.
///
/// Missing JSON fields fall back to the catalog defaults of a violin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentParameters {
    /// Name printed as the drawing title
    pub instrument_name: String,
    /// Vibrating string length, nut to bridge
    pub vsl: f64,

    // ── Body ────────────────────────────────────────────────────────
    pub body_length: f64,
    pub rib_height: f64,
    pub belly_edge_thickness: f64,
    pub arching_height: f64,
    pub bridge_height: f64,
    /// Height of the fingerboard underside above the ribs at the join
    pub overstand: f64,
    /// Height of the tailpiece attachment above the belly edge
    pub tailpiece_height: f64,

    // ── Fingerboard ─────────────────────────────────────────────────
    pub fingerboard_length: f64,
    pub fingerboard_radius: f64,
    pub fingerboard_width_at_nut: f64,
    pub fingerboard_width_at_end: f64,
    pub fb_visible_height_at_nut: f64,
    pub fb_visible_height_at_join: f64,

    // ── Strings ─────────────────────────────────────────────────────
    pub string_height_nut: f64,

    // ── Neck cross-section at the join ──────────────────────────────
    pub button_width_at_join: f64,
    pub neck_width_at_top_of_ribs: f64,
    /// How far (percent of the overstand) the neck-to-fingerboard fillet reaches
    pub fb_blend_percent: f64,

    /// Family-specific inputs, tagged by `instrument_family`
    #[serde(flatten)]
    pub family: FamilyInputs,
}

impl Default for InstrumentParameters {
    fn default() -> Self {
        Self {
            instrument_name: "My Instrument".into(),
            vsl: 325.0,
            body_length: 355.0,
            rib_height: 30.0,
            belly_edge_thickness: 3.5,
            arching_height: 15.0,
            bridge_height: 33.0,
            overstand: 12.0,
            tailpiece_height: 0.0,
            fingerboard_length: 270.0,
            fingerboard_radius: 41.0,
            fingerboard_width_at_nut: 24.0,
            fingerboard_width_at_end: 30.0,
            fb_visible_height_at_nut: 4.0,
            fb_visible_height_at_join: 6.0,
            string_height_nut: 0.6,
            button_width_at_join: 28.0,
            neck_width_at_top_of_ribs: 30.0,
            fb_blend_percent: 40.0,
            family: FamilyInputs::default(),
        }
    }
}

/// The per-family field set. Which of body stop / neck stop is an input is
/// fixed by the variant: bowed families give `body_stop`, fretted
/// instruments give `fret_join` and both stops are derived.
///
/// Serialized with an `instrument_family` tag. On input a missing or null
/// tag selects the violin family, and missing fields take the family's
/// catalog defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instrument_family", from = "FamilyFields")]
pub enum FamilyInputs {
    /// Violin family: body-stop driven, no frets.
    BowedFretless {
        body_stop: f64,
        /// String height above the end of the fingerboard
        string_height_eof: f64,
    },
    /// Viol family: body-stop driven, tied frets and a broken back.
    BowedBodyStop {
        body_stop: f64,
        string_height_eof: f64,
        no_frets: u32,
        /// Angle of the back break, degrees
        break_angle: f64,
        top_block_height: f64,
    },
    /// Guitar / mandolin family: the neck meets the body at a fret.
    FrettedBodyJoin {
        fret_join: u32,
        no_frets: u32,
        string_height_12th_fret: f64,
    },
}

impl Default for FamilyInputs {
    fn default() -> Self {
        FamilyFields::default().into()
    }
}

impl FamilyInputs {
    pub fn name(&self) -> &'static str {
        match self {
            FamilyInputs::BowedFretless { .. } => "BowedFretless",
            FamilyInputs::BowedBodyStop { .. } => "BowedBodyStop",
            FamilyInputs::FrettedBodyJoin { .. } => "FrettedBodyJoin",
        }
    }

    /// Number of frets to tabulate (zero for the violin family).
    pub fn fret_count(&self) -> u32 {
        match *self {
            FamilyInputs::BowedFretless { .. } => 0,
            FamilyInputs::BowedBodyStop { no_frets, .. }
            | FamilyInputs::FrettedBodyJoin { no_frets, .. } => no_frets,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
enum FamilyKind {
    #[default]
    BowedFretless,
    BowedBodyStop,
    FrettedBodyJoin,
}

/// Wire form of [`FamilyInputs`]: every family field, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FamilyFields {
    instrument_family: Option<FamilyKind>,
    body_stop: Option<f64>,
    string_height_eof: Option<f64>,
    no_frets: Option<u32>,
    break_angle: Option<f64>,
    top_block_height: Option<f64>,
    fret_join: Option<u32>,
    string_height_12th_fret: Option<f64>,
}

impl From<FamilyFields> for FamilyInputs {
    fn from(f: FamilyFields) -> Self {
        match f.instrument_family.unwrap_or_default() {
            FamilyKind::BowedFretless => FamilyInputs::BowedFretless {
                body_stop: f.body_stop.unwrap_or(195.0),
                string_height_eof: f.string_height_eof.unwrap_or(4.0),
            },
            FamilyKind::BowedBodyStop => FamilyInputs::BowedBodyStop {
                body_stop: f.body_stop.unwrap_or(195.0),
                string_height_eof: f.string_height_eof.unwrap_or(4.0),
                no_frets: f.no_frets.unwrap_or(7),
                break_angle: f.break_angle.unwrap_or(15.0),
                top_block_height: f.top_block_height.unwrap_or(40.0),
            },
            FamilyKind::FrettedBodyJoin => FamilyInputs::FrettedBodyJoin {
                fret_join: f.fret_join.unwrap_or(12),
                no_frets: f.no_frets.unwrap_or(20),
                string_height_12th_fret: f.string_height_12th_fret.unwrap_or(4.0),
            },
        }
    }
}

/// Presentation switches that do not affect the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingOptions {
    /// Draw measurement dimensions (lines, arrows and labels)
    pub show_measurements: bool,
    /// Footer text, typically the generator URL
    pub footer: Option<String>,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            show_measurements: true,
            footer: None,
        }
    }
}

/// One JSON request: parameters plus drawing options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingRequest {
    pub parameters: InstrumentParameters,
    pub options: DrawingOptions,
}

// ═══════════════════════════════════════════════════════════════════════
// Derived geometry
// ═══════════════════════════════════════════════════════════════════════

/// Everything the solver derives from one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedGeometry {
    pub neck_angle: f64,
    pub neck_stop: f64,
    pub body_stop: f64,
    pub string_angle_to_ribs: f64,
    pub string_angle_to_ribs_rad: f64,
    pub string_angle_to_fingerboard: f64,
    /// Slope of the fingerboard underside caused by its thickness taper
    pub fingerboard_angle: f64,

    pub sagitta_at_nut: f64,
    pub sagitta_at_join: f64,
    pub fb_thickness_at_nut: f64,
    pub fb_thickness_at_join: f64,
    pub fb_thickness_at_end: f64,

    /// Top of the string at the nut
    pub nut_top: Point,
    /// Top of the string at the bridge
    pub bridge_top: Point,
    /// Fingerboard underside at the nut end of the neck
    pub neck_end: Point,
    /// Fingerboard underside at the body end of the fingerboard
    pub fingerboard_end: Point,
    /// Direction of the neck line from the join toward the nut, radians
    pub neck_line_angle: f64,
    /// Direction from the nut toward the fingerboard end, radians
    pub fb_direction_angle: f64,
    pub nut_draw_radius: f64,
    pub string_length: f64,
    /// Height of the nut top above the rib line
    pub nut_relative_to_ribs: f64,

    pub clearance: StringClearance,

    pub afterlength_angle: f64,
    pub string_break_angle: f64,
    pub back_break: Option<BackBreak>,

    pub neck_block_max_width: f64,
    pub fret_positions: Vec<f64>,
}

/// Where the string passes over the body end of the fingerboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StringClearance {
    /// String line meets the perpendicular to the neck through the join
    pub nut_perpendicular_intersection: Point,
    pub nut_to_perpendicular_distance: f64,
    pub string_at_fb_end: Point,
    pub fb_surface_point: Point,
    /// Perpendicular string height above the fingerboard end
    pub string_height_at_fb_end: f64,
}

/// The angled section of a viol back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackBreak {
    pub back_break_length: f64,
    pub start: Point,
    pub end: Point,
    pub break_angle_rad: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_parameters_default_to_a_violin() {
        let params: InstrumentParameters = serde_json::from_str(r#"{"vsl": 330}"#).unwrap();
        assert_eq!(params.vsl, 330.0);
        assert_eq!(params.family, FamilyInputs::default());
        assert_eq!(params.bridge_height, 33.0);

        let params: InstrumentParameters =
            serde_json::from_str(r#"{"instrument_family": null, "body_stop": 190}"#).unwrap();
        assert_eq!(
            params.family,
            FamilyInputs::BowedFretless {
                body_stop: 190.0,
                string_height_eof: 4.0
            }
        );
    }

    #[test]
    fn family_fields_take_per_family_defaults() {
        let viol: InstrumentParameters =
            serde_json::from_str(r#"{"instrument_family": "BowedBodyStop"}"#).unwrap();
        assert_eq!(viol.family.fret_count(), 7);

        let guitar: InstrumentParameters =
            serde_json::from_str(r#"{"instrument_family": "FrettedBodyJoin", "fret_join": 14}"#)
                .unwrap();
        assert_eq!(
            guitar.family,
            FamilyInputs::FrettedBodyJoin {
                fret_join: 14,
                no_frets: 20,
                string_height_12th_fret: 4.0
            }
        );
    }

    #[test]
    fn unknown_family_is_rejected() {
        let err = serde_json::from_str::<InstrumentParameters>(r#"{"instrument_family": "Lute"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn serialized_parameters_carry_the_family_tag() {
        let json = serde_json::to_value(InstrumentParameters::default()).unwrap();
        assert_eq!(json["instrument_family"], "BowedFretless");
        assert_eq!(json["body_stop"], 195.0);

        let back: InstrumentParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, InstrumentParameters::default());
    }
}
