//! Error types.
//!
//! Only physically impossible geometry is an error. Degenerate but harmless
//! inputs (zero radius, parallel construction lines) are resolved where they
//! occur with a zero fallback.

pub type Result<T> = std::result::Result<T, Error>;

/// The parameters describe an instrument that cannot be built.
///
/// Every variant carries the numbers that caused the failure so the caller
/// can show them next to the offending inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error(
        "impossible geometry: string cannot reach fret {fret_join} at the body join \
         (opposite {opposite:.3} mm, hypotenuse {hypotenuse:.3} mm, sin {sin_value:.4})"
    )]
    FretJoinUnreachable {
        fret_join: u32,
        opposite: f64,
        hypotenuse: f64,
        sin_value: f64,
    },

    #[error(
        "impossible geometry: neck angle {neck_angle:.2}° is outside (0°, 180°) \
         (string to ribs {string_angle_to_ribs:.2}°, string to fingerboard \
         {string_angle_to_fingerboard:.2}°, fingerboard {fingerboard_angle:.2}°)"
    )]
    NeckAngleOutOfRange {
        neck_angle: f64,
        string_angle_to_ribs: f64,
        string_angle_to_fingerboard: f64,
        fingerboard_angle: f64,
    },

    #[error("impossible geometry: neck stop {neck_stop:.3} mm must lie in (0, {vsl:.3}) mm")]
    NeckStopOutOfRange { neck_stop: f64, vsl: f64 },

    #[error(
        "impossible geometry: fingerboard radius {radius:.1} mm must exceed half the \
         radius template width ({half_width:.1} mm)"
    )]
    TemplateWiderThanRadius { radius: f64, half_width: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Invalid parameter JSON: {0}")]
    InvalidParameters(#[from] serde_json::Error),
}
