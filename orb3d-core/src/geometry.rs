/// Mesh aggregate shared by the OBJ loader and the sphere generator
use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

use crate::bounds::BoundingBox;
use crate::transform::{Normalization, Transform};

/// Fill values used when an attribute stream is shorter than `vertices`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddingPolicy {
    pub uv_fill: Vector2<f32>,
    /// Not unit length; renderers receiving it should treat it as "no normal"
    pub normal_fill: Vector3<f32>,
}

impl Default for PaddingPolicy {
    fn default() -> Self {
        Self {
            uv_fill: Vector2::new(0.0, 0.0),
            normal_fill: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// A flat triangle list: every three consecutive entries form one triangle,
/// with position, normal and uv streams indexed in lock-step.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Homogeneous positions, `w == 1`
    pub vertices: Vec<Vector4<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Vector2<f32>>,
    /// Whether the last load supplied texture coordinates
    pub has_uv: bool,
    pub bounds: BoundingBox,
    pub center: Vector3<f32>,
    pub scale: f32,
    pub model_view: Matrix4<f32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            has_uv: false,
            bounds: BoundingBox::empty(),
            center: Vector3::zeros(),
            scale: 0.0,
            model_view: Matrix4::identity(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
            uvs: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn box_min(&self) -> Vector3<f32> {
        self.bounds.min
    }

    pub fn box_max(&self) -> Vector3<f32> {
        self.bounds.max
    }

    /// Fold a position into the bounds without adding it to the vertex stream
    pub fn fold_bounds(&mut self, position: &Vector3<f32>) {
        self.bounds.fold(position);
    }

    /// Iterate over triangles as slices of three positions
    pub fn triangles(&self) -> impl Iterator<Item = &[Vector4<f32>]> {
        self.vertices.chunks_exact(3)
    }

    /// True when all three attribute streams have the same length and form
    /// whole triangles
    pub fn is_consistent(&self) -> bool {
        self.vertices.len() % 3 == 0
            && self.normals.len() == self.vertices.len()
            && self.uvs.len() == self.vertices.len()
    }

    /// Recompute `center`, `scale` and `model_view` from the current bounds
    pub fn update_transform(&mut self) {
        let Normalization {
            center,
            scale,
            model_view,
        } = Transform::normalize(&self.bounds);
        self.center = center;
        self.scale = scale;
        self.model_view = model_view;
    }

    /// Extend short `uvs`/`normals` streams to `vertices.len()` with the
    /// default fill values
    pub fn pad_attributes(&mut self) {
        self.pad_attributes_with(&PaddingPolicy::default());
    }

    pub fn pad_attributes_with(&mut self, policy: &PaddingPolicy) {
        let len = self.vertices.len();
        if self.uvs.len() < len {
            self.uvs.resize(len, policy.uv_fill);
        }
        if self.normals.len() < len {
            self.normals.resize(len, policy.normal_fill);
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions_only(count: usize) -> Mesh {
        let mut mesh = Mesh::new();
        for i in 0..count {
            let p = Vector3::new(i as f32, 0.0, 0.0);
            mesh.fold_bounds(&p);
            mesh.vertices.push(p.push(1.0));
        }
        mesh
    }

    #[test]
    fn test_new_mesh_has_sentinel_bounds() {
        let mesh = Mesh::new();
        assert!(mesh.bounds.is_empty());
        assert_eq!(mesh.box_min(), Vector3::repeat(f32::MAX));
        assert_eq!(mesh.box_max(), Vector3::repeat(f32::MIN));
        assert_eq!(mesh.model_view, Matrix4::identity());
        assert!(mesh.is_consistent());
    }

    #[test]
    fn test_pad_fills_missing_attributes() {
        let mut mesh = positions_only(6);
        mesh.normals.push(Vector3::new(0.0, 0.0, 1.0));
        assert!(!mesh.is_consistent());

        mesh.pad_attributes();
        assert!(mesh.is_consistent());
        assert_eq!(mesh.normals[0], Vector3::new(0.0, 0.0, 1.0));
        assert!(mesh.normals[1..]
            .iter()
            .all(|n| *n == Vector3::new(1.0, 1.0, 1.0)));
        assert!(mesh.uvs.iter().all(|uv| *uv == Vector2::zeros()));
    }

    #[test]
    fn test_pad_with_custom_policy() {
        let mut mesh = positions_only(3);
        let policy = PaddingPolicy {
            uv_fill: Vector2::new(0.5, 0.5),
            normal_fill: Vector3::new(0.0, 1.0, 0.0),
        };
        mesh.pad_attributes_with(&policy);
        assert_eq!(mesh.uvs, vec![Vector2::new(0.5, 0.5); 3]);
        assert_eq!(mesh.normals, vec![Vector3::new(0.0, 1.0, 0.0); 3]);
    }

    #[test]
    fn test_pad_never_truncates() {
        let mut mesh = positions_only(3);
        mesh.uvs = vec![Vector2::new(1.0, 1.0); 4];
        mesh.pad_attributes();
        assert_eq!(mesh.uvs.len(), 4);
    }

    #[test]
    fn test_triangles_and_transform() {
        let mut mesh = positions_only(6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().count(), 2);

        mesh.update_transform();
        assert_eq!(mesh.center, Vector3::new(2.5, 0.0, 0.0));
        assert_eq!(mesh.scale, 5.0);
    }
}
