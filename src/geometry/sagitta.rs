//! Fingerboard camber: sagitta of a circular arc and the resulting
//! fingerboard thickness.

use crate::model::InstrumentParameters;

/// Height of a circular arc of `radius` above a chord of `chord_width`.
///
/// Non-positive inputs give 0. When the chord does not fit inside the circle
/// the parabolic approximation `w² / 8r` is returned instead of failing.
pub fn sagitta(radius: f64, chord_width: f64) -> f64 {
    if radius <= 0.0 || chord_width <= 0.0 {
        return 0.0;
    }

    let half_width = chord_width / 2.0;
    if half_width >= radius {
        return chord_width * chord_width / (8.0 * radius);
    }

    radius - (radius * radius - half_width * half_width).sqrt()
}

/// Full fingerboard thickness (visible side height plus camber) at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerboardThickness {
    pub sagitta_at_nut: f64,
    pub sagitta_at_join: f64,
    pub at_nut: f64,
    pub at_join: f64,
}

pub fn fingerboard_thickness(params: &InstrumentParameters) -> FingerboardThickness {
    let sagitta_at_nut = sagitta(params.fingerboard_radius, params.fingerboard_width_at_nut);
    let sagitta_at_join = sagitta(params.fingerboard_radius, params.fingerboard_width_at_end);

    FingerboardThickness {
        sagitta_at_nut,
        sagitta_at_join,
        at_nut: params.fb_visible_height_at_nut + sagitta_at_nut,
        at_join: params.fb_visible_height_at_join + sagitta_at_join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_or_negative_inputs_give_zero() {
        assert_eq!(sagitta(0.0, 10.0), 0.0);
        assert_eq!(sagitta(100.0, 0.0), 0.0);
        assert_eq!(sagitta(-100.0, 10.0), 0.0);
        assert_eq!(sagitta(100.0, -10.0), 0.0);
    }

    #[test]
    fn known_value() {
        // 100 - sqrt(100² - 10²)
        assert_abs_diff_eq!(sagitta(100.0, 20.0), 0.50126, epsilon = 1e-4);
    }

    #[test]
    fn wide_chord_uses_parabolic_approximation() {
        assert_abs_diff_eq!(sagitta(10.0, 30.0), 11.25, epsilon = 1e-9);
    }

    #[test]
    fn non_decreasing_in_chord_width() {
        for radius in [20.0, 41.0, 100.0, 1000.0] {
            let mut previous = 0.0;
            for step in 0..=400 {
                let width = step as f64 * 0.5;
                let s = sagitta(radius, width);
                assert!(
                    s >= previous,
                    "sagitta({radius}, {width}) = {s} dropped below {previous}"
                );
                previous = s;
            }
        }
    }

    #[test]
    fn exact_branch_stays_within_radius() {
        let s = sagitta(41.0, 81.9);
        assert!((0.0..=41.0).contains(&s));
    }

    #[test]
    fn thickness_adds_camber_to_visible_height() {
        let params = InstrumentParameters::default();
        let t = fingerboard_thickness(&params);
        assert_abs_diff_eq!(t.at_nut, 4.0 + sagitta(41.0, 24.0), epsilon = 1e-12);
        assert_abs_diff_eq!(t.at_join, 6.0 + sagitta(41.0, 30.0), epsilon = 1e-12);
        assert!(t.sagitta_at_nut > 0.5 && t.sagitta_at_nut < 5.0);
    }
}
