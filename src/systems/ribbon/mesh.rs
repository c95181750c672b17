use glam::Vec3;

use crate::config::BandGeometryProps;
use crate::systems::spline::{CatmullRom, ARC_LENGTH_DIVISIONS};

use super::frames::frame_at;
use super::{INDICES_PER_SEGMENT, SEGMENTS, VERTICES_PER_STEP};

/// Thinnest band ever built, whatever the props say.
pub const MIN_THICKNESS: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RibbonParams {
    pub width: f32,
    pub thickness: f32,
    pub texture_repeats: f32,
}

impl RibbonParams {
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    pub fn half_thickness(&self) -> f32 {
        self.thickness.max(MIN_THICKNESS) * 0.5
    }
}

impl From<&BandGeometryProps> for RibbonParams {
    fn from(props: &BandGeometryProps) -> Self {
        Self {
            width: props.band_width,
            thickness: props.band_thickness,
            texture_repeats: props.texture_repeats,
        }
    }
}

impl Default for RibbonParams {
    fn default() -> Self {
        (&BandGeometryProps::default()).into()
    }
}

/// Flat vertex buffers, laid out for direct upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RibbonMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

impl RibbonMesh {
    fn with_segments(segments: usize) -> Self {
        let vertices = VERTICES_PER_STEP * (segments + 1);
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            uvs: Vec::with_capacity(vertices * 2),
            indices: Vec::with_capacity(INDICES_PER_SEGMENT * segments),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn position(&self, vertex: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[vertex * 3..vertex * 3 + 3])
    }

    pub fn normal(&self, vertex: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[vertex * 3..vertex * 3 + 3])
    }

    pub fn is_finite(&self) -> bool {
        self.positions.iter().chain(&self.normals).chain(&self.uvs).all(|v| v.is_finite())
    }

    fn push_vertex(&mut self, p: Vec3, n: Vec3, u: f32, v: f32) {
        self.positions.extend_from_slice(&p.to_array());
        self.normals.extend_from_slice(&n.to_array());
        self.uvs.extend_from_slice(&[u, v]);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RibbonMeshBuilder {
    segments: usize,
}

impl Default for RibbonMeshBuilder {
    fn default() -> Self {
        Self { segments: SEGMENTS }
    }
}

impl RibbonMeshBuilder {
    pub fn new(segments: usize) -> Self {
        Self { segments: segments.max(1) }
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Sweep the band along a spline through `samples`, spaced by arc length.
    pub fn build(&self, samples: &[Vec3], up: Vec3, params: &RibbonParams) -> RibbonMesh {
        let points = match samples {
            [] => vec![Vec3::ZERO; 2],
            [only] => vec![*only; 2],
            _ => samples.to_vec(),
        };
        let mut mesh = RibbonMesh::with_segments(self.segments);
        let Some(curve) = CatmullRom::new(points) else {
            return mesh;
        };
        let table = curve.arc_length_table(ARC_LENGTH_DIVISIONS);
        let hw = params.half_width();
        let ht = params.half_thickness();

        let mut previous = None;
        for i in 0..=self.segments {
            let u = i as f32 / self.segments as f32;
            let t = table.u_to_t(u);
            let p = curve.point(t);
            let frame = frame_at(curve.derivative(t), previous, up);
            previous = Some(frame.tangent);

            let b = frame.binormal * hw;
            let n = frame.normal * ht;
            let s = u * params.texture_repeats;
            // front top, front bottom, back bottom, back top
            mesh.push_vertex(p + b + n, frame.normal, s, 0.0);
            mesh.push_vertex(p - b + n, frame.normal, s, 1.0);
            mesh.push_vertex(p - b - n, -frame.normal, s, 1.0);
            mesh.push_vertex(p + b - n, -frame.normal, s, 0.0);
        }

        for i in 0..self.segments as u32 {
            let (a1, b1, c1, d1) = (i * 4, i * 4 + 1, (i + 1) * 4, (i + 1) * 4 + 1);
            let (a2, b2, c2, d2) = (i * 4 + 2, i * 4 + 3, (i + 1) * 4 + 2, (i + 1) * 4 + 3);
            mesh.indices.extend_from_slice(&[
                a1, b1, c1, c1, b1, d1, // front
                a2, c2, b2, b2, c2, d2, // back
                a1, c1, b2, b2, c1, d2, // top edge
                b1, a2, d1, d1, a2, c2, // bottom edge
            ]);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(n: usize) -> Vec<Vec3> {
        (0..=n)
            .map(|k| {
                let a = k as f32 / n as f32 * 2.0;
                Vec3::new(a.cos() * 2.0, a.sin() * 2.0 - 1.0, 0.2 * a)
            })
            .collect()
    }

    #[test]
    fn buffer_sizes_follow_segment_count() {
        let mesh = RibbonMeshBuilder::default().build(&arc(48), Vec3::Z, &RibbonParams::default());
        assert_eq!(mesh.vertex_count(), 212);
        assert_eq!(mesh.positions.len(), 636);
        assert_eq!(mesh.normals.len(), 636);
        assert_eq!(mesh.uvs.len(), 424);
        assert_eq!(mesh.index_count(), 1248);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn ring_offsets_match_width_and_thickness() {
        let params = RibbonParams { width: 0.4, thickness: 0.1, texture_repeats: 4.0 };
        let mesh = RibbonMeshBuilder::default().build(&arc(48), Vec3::Z, &params);
        for step in 0..=SEGMENTS {
            let v = step * 4;
            let across = mesh.position(v).distance(mesh.position(v + 1));
            let through = mesh.position(v + 1).distance(mesh.position(v + 2));
            assert!((across - 0.4).abs() < 1e-4);
            assert!((through - 0.1).abs() < 1e-4);
            // back normals mirror front normals
            assert!((mesh.normal(v) + mesh.normal(v + 2)).length() < 1e-6);
            assert!((mesh.normal(v).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn uvs_run_along_length() {
        let params = RibbonParams { texture_repeats: 3.0, ..RibbonParams::default() };
        let mesh = RibbonMeshBuilder::default().build(&arc(48), Vec3::Z, &params);
        assert_eq!(&mesh.uvs[0..8], &[0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        let last = SEGMENTS * 8;
        assert!((mesh.uvs[last] - 3.0).abs() < 1e-5);
        assert_eq!(mesh.uvs[last + 1], 0.0);
        assert_eq!(mesh.uvs[last + 3], 1.0);
    }

    #[test]
    fn thickness_is_floored() {
        let params = RibbonParams { thickness: 0.0, ..RibbonParams::default() };
        let mesh = RibbonMeshBuilder::default().build(&arc(48), Vec3::Z, &params);
        let through = mesh.position(1).distance(mesh.position(2));
        assert!((through - MIN_THICKNESS).abs() < 1e-5);
    }

    #[test]
    fn degenerate_inputs_stay_finite() {
        let builder = RibbonMeshBuilder::default();
        let params = RibbonParams::default();
        let coincident = vec![Vec3::new(1.0, 2.0, 3.0); 49];
        for mesh in [
            builder.build(&coincident, Vec3::Z, &params),
            builder.build(&coincident, Vec3::ZERO, &params),
            builder.build(&[], Vec3::Z, &params),
            builder.build(&[Vec3::ONE], Vec3::Y, &params),
            // straight up the reference axis
            builder.build(&[Vec3::ZERO, Vec3::Z, Vec3::Z * 2.0], Vec3::Z, &params),
        ] {
            assert!(mesh.is_finite());
            assert_eq!(mesh.vertex_count(), 212);
        }
    }

    #[test]
    fn front_triangles_are_not_degenerate() {
        let mesh = RibbonMeshBuilder::default().build(&arc(48), Vec3::Z, &RibbonParams::default());
        let (a, b, c) = (mesh.indices[0] as usize, mesh.indices[1] as usize, mesh.indices[2] as usize);
        let face = (mesh.position(b) - mesh.position(a)).cross(mesh.position(c) - mesh.position(a));
        assert!(face.length() > 1e-6);
    }
}
