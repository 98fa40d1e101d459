//! Fret position table for fretted families.

use serde::Serialize;

use crate::geometry::strings::fret_positions;
use crate::model::InstrumentParameters;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FretTable {
    pub vsl: f64,
    pub rows: Vec<FretRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FretRow {
    /// 1-based fret number
    pub fret: u32,
    pub from_nut: f64,
    pub from_previous: f64,
}

/// Fret positions for the instrument, or `None` when it has no frets.
pub fn fret_table(params: &InstrumentParameters) -> Option<FretTable> {
    let count = params.family.fret_count();
    if count == 0 {
        return None;
    }

    let mut previous = 0.0;
    let rows = (1..=count)
        .zip(fret_positions(params.vsl, count))
        .map(|(fret, from_nut)| {
            let row = FretRow {
                fret,
                from_nut,
                from_previous: from_nut - previous,
            };
            previous = from_nut;
            row
        })
        .collect();

    Some(FretTable {
        vsl: params.vsl,
        rows,
    })
}
