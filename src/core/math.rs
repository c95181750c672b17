//! Small vector helpers on top of glam.
//!
//! Everything here is total: no helper returns NaN for zero-length input,
//! callers pass an explicit fallback instead.

use glam::{Quat, Vec3};

/// Rotation of `turns` half-turns (units of π) about `axis`.
#[inline]
pub fn rotation_pi(axis: Vec3, turns: f32) -> Quat {
    Quat::from_axis_angle(axis, turns * std::f32::consts::PI)
}

/// Normalize, or return `fallback` when the vector is too short to normalize.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Exponential smoothing step: move `current` toward `target` by `alpha`.
#[inline]
pub fn smooth_toward(current: Vec3, target: Vec3, alpha: f32) -> Vec3 {
    current.lerp(target, alpha.clamp(0.0, 1.0))
}

/// Any unit vector orthogonal to `v` (`v` must be unit length).
#[inline]
pub fn any_orthonormal(v: Vec3) -> Vec3 {
    v.any_orthonormal_vector()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_pi_half_turn_about_y_flips_x() {
        let q = rotation_pi(Vec3::Y, 1.0);
        let v = q * Vec3::X;
        assert!((v - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn normalize_or_uses_fallback_for_zero() {
        assert_eq!(normalize_or(Vec3::ZERO, Vec3::Y), Vec3::Y);
        assert!((normalize_or(Vec3::new(0.0, 0.0, 3.0), Vec3::Y) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn smooth_toward_never_overshoots() {
        let mut p = Vec3::ZERO;
        let target = Vec3::new(1.0, -2.0, 0.5);
        for _ in 0..200 {
            let next = smooth_toward(p, target, 0.1);
            assert!(next.distance(target) <= p.distance(target));
            p = next;
        }
        assert!(p.distance(target) < 1e-4);
    }

    #[test]
    fn any_orthonormal_is_perpendicular() {
        for v in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.6, 0.0, 0.8)] {
            let o = any_orthonormal(v);
            assert!(o.dot(v).abs() < 1e-5);
            assert!((o.length() - 1.0).abs() < 1e-5);
        }
    }
}
