//! Cubic Bézier evaluation and inversion.

use crate::model::Point;

/// Point on the cubic Bézier `p0 cp1 cp2 p3` at parameter `t`.
pub fn evaluate(p0: Point, cp1: Point, cp2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let w0 = mt * mt * mt;
    let w1 = 3.0 * mt * mt * t;
    let w2 = 3.0 * mt * t * t;
    let w3 = t * t * t;
    Point::new(
        w0 * p0.x + w1 * cp1.x + w2 * cp2.x + w3 * p3.x,
        w0 * p0.y + w1 * cp1.y + w2 * cp2.y + w3 * p3.y,
    )
}

pub const FIND_T_TOLERANCE: f64 = 1e-4;
const FIND_T_ITERATIONS: usize = 50;

/// Parameter at which the curve reaches `target_y`, by bisection.
///
/// The curve's Y must be monotonic in `t` over `[0, 1]`; this is not
/// checked. A target outside the curve's Y range converges to the nearer end.
pub fn find_t_for_y(
    p0: Point,
    cp1: Point,
    cp2: Point,
    p3: Point,
    target_y: f64,
    tolerance: f64,
) -> f64 {
    let increasing = p3.y >= p0.y;
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);

    for _ in 0..FIND_T_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let y = evaluate(p0, cp1, cp2, p3, mid).y;
        if (y - target_y).abs() < tolerance {
            return mid;
        }
        if (y < target_y) == increasing {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    (lo + hi) / 2.0
}

/// Cubic control points of the quadratic that starts at `p0`, passes through
/// `mid` at t = 0.5 and ends at `p2`.
pub fn quadratic_through(p0: Point, mid: Point, p2: Point) -> [Point; 4] {
    // Quadratic control point Q = 2·mid − (p0 + p2)/2, then degree elevation.
    let q = mid * 2.0 - (p0 + p2) * 0.5;
    let cp1 = p0 + (q - p0) * (2.0 / 3.0);
    let cp2 = p2 + (q - p2) * (2.0 / 3.0);
    [p0, cp1, cp2, p2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn vertical() -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(0.0, 3.0),
            Point::new(0.0, 7.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn endpoints_are_interpolated() {
        let [a, b, c, d] = vertical();
        assert_eq!(evaluate(a, b, c, d, 0.0), a);
        assert_eq!(evaluate(a, b, c, d, 1.0), d);
    }

    #[test]
    fn midpoint_of_symmetric_curve() {
        let [a, b, c, d] = vertical();
        let t = find_t_for_y(a, b, c, d, 5.0, FIND_T_TOLERANCE);
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn recovers_parameter_along_curve() {
        let [a, b, c, d] = vertical();
        for i in 0..=20 {
            let t_star = i as f64 / 20.0;
            let y = evaluate(a, b, c, d, t_star).y;
            let t = find_t_for_y(a, b, c, d, y, FIND_T_TOLERANCE);
            assert_abs_diff_eq!(t, t_star, epsilon = 1e-3);
        }
    }

    #[test]
    fn works_on_decreasing_curves() {
        let (a, b, c, d) = (
            Point::new(5.0, 10.0),
            Point::new(4.0, 8.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 0.0),
        );
        let y = evaluate(a, b, c, d, 0.3).y;
        assert_abs_diff_eq!(find_t_for_y(a, b, c, d, y, 1e-6), 0.3, epsilon = 1e-3);
    }

    #[test]
    fn quadratic_passes_through_middle_point() {
        let [a, b, c, d] = quadratic_through(
            Point::new(0.0, 3.5),
            Point::new(195.0, 15.0),
            Point::new(355.0, 3.5),
        );
        let mid = evaluate(a, b, c, d, 0.5);
        assert_abs_diff_eq!(mid.x, 195.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mid.y, 15.0, epsilon = 1e-9);
    }
}
