//! Neck cross-section at the body join: the blend fillet between the neck
//! root on the ribs and the fingerboard underside.

use crate::model::{InstrumentParameters, Point};

use super::bezier::{self, FIND_T_TOLERANCE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// Right-hand fillet, from the rib line up to the fingerboard underside.
    /// The left-hand side is its mirror about X = 0.
    pub fillet: [Point; 4],
    /// Width of the neck where it passes through the belly surface
    pub neck_block_max_width: f64,
}

pub fn blend_fillet(params: &InstrumentParameters) -> [Point; 4] {
    let overstand = params.overstand;
    let blend = params.fb_blend_percent / 100.0 * overstand;

    let p0 = Point::new(params.neck_width_at_top_of_ribs / 2.0, 0.0);
    let p3 = Point::new(params.fingerboard_width_at_end / 2.0, overstand);
    [
        p0,
        Point::new(p0.x, blend),
        Point::new(p3.x, overstand - blend),
        p3,
    ]
}

pub fn solve_cross_section(params: &InstrumentParameters) -> CrossSection {
    let fillet = blend_fillet(params);
    let [p0, cp1, cp2, p3] = fillet;

    let neck_block_max_width = if params.overstand > 0.0 {
        let t = bezier::find_t_for_y(
            p0,
            cp1,
            cp2,
            p3,
            params.belly_edge_thickness,
            FIND_T_TOLERANCE,
        );
        2.0 * bezier::evaluate(p0, cp1, cp2, p3, t).x
    } else {
        // Flat fillet: the neck meets the belly at the fingerboard width.
        params.fingerboard_width_at_end
    };

    CrossSection {
        fillet,
        neck_block_max_width,
    }
}
