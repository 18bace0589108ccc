//! Vector and angle helpers used by the interaction law
//!
//! All angles are radians. `wrap_angle` is the single place where relative
//! angles are folded into `(-π, π]`; orientations themselves are never
//! wrapped by the engine.

use std::f32::consts::{PI, TAU};

use super::states::NVec2;

/// Fold an angle into `(-π, π]` by whole turns.
///
/// Large inputs are first reduced with `rem_euclid` so the adjustment loop
/// stays short; non-finite inputs are returned unchanged.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return angle;
    }
    let mut a = angle;
    if a.abs() > 4.0 * TAU {
        a = a.rem_euclid(TAU);
    }
    while a > PI {
        a -= TAU;
    }
    while a <= -PI {
        a += TAU;
    }
    a
}

/// Polar angle of `v` in `(-π, π]`
pub fn angle_of(v: &NVec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector pointing along `angle`
pub fn unit_vector(angle: f32) -> NVec2 {
    NVec2::new(angle.cos(), angle.sin())
}

/// Rotate `v` counter-clockwise by `alpha`
pub fn rotate(v: &NVec2, alpha: f32) -> NVec2 {
    let (sn, cs) = alpha.sin_cos();
    NVec2::new(v.x * cs - v.y * sn, v.x * sn + v.y * cs)
}

/// Circular mean of two headings along the shortest arc, in `[0, 2π)`.
///
/// A difference of exactly `±π` is kept as is, so `(0, π)` and `(π, 0)`
/// both give `π/2`.
pub fn middle_angle(theta1: f32, theta2: f32) -> f32 {
    let t1 = turn(theta1);
    let t2 = turn(theta2);

    let mut diff = t2 - t1;
    if diff < -PI {
        diff += TAU;
    } else if diff > PI {
        diff -= TAU;
    }

    turn(t1 + diff / 2.0)
}

// [0, 2π); rem_euclid can round up to exactly 2π for tiny negatives
fn turn(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU { 0.0 } else { a }
}

/// Unit vector along `v`, or `v` itself when it has zero length
pub fn normalize_or_keep(v: &NVec2) -> NVec2 {
    let n = v.norm();
    if n == 0.0 { *v } else { v / n }
}

/// Rescale `v` to length `max` if it is longer, keeping its direction
pub fn cap_norm(v: &NVec2, max: f32) -> NVec2 {
    if v.norm() > max {
        normalize_or_keep(v) * max
    } else {
        *v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Distance between two angles on the circle
    fn circular_gap(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn wrap_keeps_pi_and_folds_minus_pi() {
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn wrap_passes_non_finite_through() {
        assert!(wrap_angle(f32::NAN).is_nan());
        assert_eq!(wrap_angle(f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn middle_angle_takes_shortest_arc() {
        // 350° and 10° meet at 0°, not 180°
        let m = middle_angle(350f32.to_radians(), 10f32.to_radians());
        assert!(circular_gap(m, 0.0) < 1e-5, "got {m}");

        let m = middle_angle(0.0, PI);
        assert!((m - PI / 2.0).abs() < 1e-6);
        let m = middle_angle(PI, 0.0);
        assert!((m - PI / 2.0).abs() < 1e-6);

        let m = middle_angle(-PI / 2.0, -PI / 2.0);
        assert!((m - 3.0 * PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(&NVec2::new(1.0, 0.0), PI / 2.0);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_is_left_alone() {
        let z = NVec2::zeros();
        assert_eq!(normalize_or_keep(&z), z);
        assert_eq!(cap_norm(&z, 1.0), z);
    }

    #[test]
    fn cap_norm_preserves_direction() {
        let v = cap_norm(&NVec2::new(30.0, 40.0), 10.0);
        assert!((v.norm() - 10.0).abs() < 1e-5);
        assert!((v.x - 6.0).abs() < 1e-5);
        assert!((v.y - 8.0).abs() < 1e-5);

        let short = NVec2::new(1.0, 1.0);
        assert_eq!(cap_norm(&short, 10.0), short);
    }

    proptest! {
        #[test]
        fn wrap_lands_in_half_open_range(x in -1.0e4f32..1.0e4f32) {
            let w = wrap_angle(x);
            prop_assert!(w > -PI && w <= PI, "wrap({}) = {}", x, w);
        }

        #[test]
        fn wrap_is_periodic(x in -100.0f32..100.0f32, k in -20i32..20i32) {
            let shifted = x + TAU * k as f32;
            let gap = circular_gap(wrap_angle(shifted), wrap_angle(x));
            prop_assert!(gap < 1e-3, "x = {}, k = {}, gap = {}", x, k, gap);
        }

        #[test]
        fn middle_angle_is_in_turn(a in -50.0f32..50.0f32, b in -50.0f32..50.0f32) {
            let m = middle_angle(a, b);
            prop_assert!((0.0..TAU).contains(&m));
        }
    }
}
