use glam::Vec3;

use crate::core::math::{any_orthonormal, normalize_or};

/// Orthonormal frame at one ribbon step. `(normal, binormal, tangent)` is
/// right-handed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub tangent: Vec3,
    pub binormal: Vec3,
    pub normal: Vec3,
}

/// Frame for a raw curve derivative and the shared reference up.
///
/// A zero derivative reuses `previous` (then +Y). An up parallel to the
/// tangent, or a zero up, falls back to any binormal orthogonal to the tangent.
pub fn frame_at(derivative: Vec3, previous: Option<Vec3>, up: Vec3) -> Frame {
    let fallback = previous.unwrap_or(Vec3::Y);
    let tangent = normalize_or(derivative, normalize_or(fallback, Vec3::Y));
    let binormal = normalize_or(tangent.cross(up), any_orthonormal(tangent));
    let normal = normalize_or(binormal.cross(tangent), any_orthonormal(tangent));
    Frame { tangent, binormal, normal }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(f: &Frame) {
        for v in [f.tangent, f.binormal, f.normal] {
            assert!((v.length() - 1.0).abs() < 1e-4);
            assert!(v.is_finite());
        }
        assert!(f.tangent.dot(f.binormal).abs() < 1e-4);
        assert!(f.tangent.dot(f.normal).abs() < 1e-4);
        assert!(f.binormal.dot(f.normal).abs() < 1e-4);
        assert!((f.normal.cross(f.binormal) - f.tangent).length() < 1e-4);
    }

    #[test]
    fn normal_leans_toward_up() {
        let f = frame_at(Vec3::new(1.0, -2.0, 0.3), None, Vec3::Z);
        assert_orthonormal(&f);
        assert!(f.normal.dot(Vec3::Z) > 0.0);
    }

    #[test]
    fn tangent_parallel_to_up_still_orthonormal() {
        let f = frame_at(Vec3::Z * 5.0, None, Vec3::Z);
        assert_orthonormal(&f);
    }

    #[test]
    fn zero_derivative_reuses_previous_tangent() {
        let f = frame_at(Vec3::ZERO, Some(Vec3::X), Vec3::Z);
        assert_eq!(f.tangent, Vec3::X);
        let g = frame_at(Vec3::ZERO, None, Vec3::ZERO);
        assert_eq!(g.tangent, Vec3::Y);
        assert_orthonormal(&g);
    }
}
