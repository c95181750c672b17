//! Perspective camera and pointer rays.

use glam::{Mat4, Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray expressed in a frame rotated by `rotation` (e.g. into group space).
    pub fn rotated(&self, rotation: Quat) -> Ray {
        Ray {
            origin: rotation * self.origin,
            direction: rotation * self.direction,
        }
    }

    /// Forward intersection with `plane`, `None` when parallel or behind.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = plane.normal.dot(plane.point - self.origin) / denom;
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Camera looking at `target`, GL clip conventions like the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 13.0),
            target: Vec3::ZERO,
            fov_y_degrees: 25.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(0.01),
            self.near,
            self.far,
        )
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// NDC (x, y in -1..1, z in -1..1) to world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_proj().inverse().project_point3(ndc)
    }

    /// World-space ray from the eye through the pointer at `ndc`.
    pub fn ray(&self, ndc: Vec2) -> Ray {
        let through = self.unproject(ndc.extend(0.5));
        let direction = (through - self.position).try_normalize().unwrap_or(self.forward());
        Ray {
            origin: self.position,
            direction,
        }
    }
}
