/// Transformation matrices for placing a mesh in view space
use nalgebra::{Matrix4, Vector3};
use tracing::warn;

use crate::bounds::BoundingBox;

/// Result of fitting a bounding box into a unit-extent frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub center: Vector3<f32>,
    pub scale: f32,
    pub model_view: Matrix4<f32>,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            center: Vector3::zeros(),
            scale: 0.0,
            model_view: Matrix4::identity(),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Build the matrix that moves `center` to the origin and then divides
    /// by `scale`, so `m * p == (p - center) / scale`.
    ///
    /// A non-positive or non-finite `scale` leaves the geometry unscaled.
    pub fn normalizing_matrix(center: &Vector3<f32>, scale: f32) -> Matrix4<f32> {
        let translate = Self::translation_matrix(-center.x, -center.y, -center.z);
        if scale > 0.0 && scale.is_finite() {
            let inv = 1.0 / scale;
            // Column vectors: the right-hand factor applies first
            Self::scale_matrix(inv, inv, inv) * translate
        } else {
            translate
        }
    }

    /// Derive center, scale and model-view matrix from accumulated bounds
    pub fn normalize(bounds: &BoundingBox) -> Normalization {
        if bounds.is_empty() {
            return Normalization::default();
        }

        let center = bounds.center();
        let scale = bounds.planar_extent();
        if scale <= 0.0 {
            warn!(
                "Bounding box has no extent in x or y, model view only recenters (center = {:?})",
                center
            );
        }

        Normalization {
            center,
            scale,
            model_view: Self::normalizing_matrix(&center, scale),
        }
    }

    /// Matrix for transforming normals under `model_view`: the transpose of
    /// its inverse. Singular inputs yield the identity.
    pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix4<f32> {
        model_view
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_translate_then_scale_order() {
        let center = Vector3::new(2.0, 4.0, 6.0);
        let m = Transform::normalizing_matrix(&center, 4.0);
        let p = m.transform_point(&Point3::new(6.0, 4.0, 2.0));
        assert_relative_eq!(p, Point3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn test_center_maps_to_origin() {
        let points = [Vector3::new(-2.0, 1.0, 0.0), Vector3::new(6.0, 3.0, 9.0)];
        let bounds: BoundingBox = points.iter().collect();
        let norm = Transform::normalize(&bounds);

        assert_relative_eq!(norm.scale, 8.0);
        let origin = norm.model_view.transform_point(&Point3::from(norm.center));
        assert_relative_eq!(origin, Point3::origin(), epsilon = 1e-6);

        let corner = norm.model_view.transform_point(&Point3::from(bounds.max));
        assert!(corner.x.abs() <= 0.5 + 1e-6);
        assert!(corner.y.abs() <= 0.5 + 1e-6);
    }

    #[test]
    fn test_empty_bounds_give_identity() {
        let norm = Transform::normalize(&BoundingBox::empty());
        assert_eq!(norm, Normalization::default());
        assert_eq!(norm.model_view, Matrix4::identity());
    }

    #[test]
    fn test_flat_bounds_only_recenter() {
        let points = [Vector3::new(1.0, 1.0, 0.0), Vector3::new(1.0, 1.0, 5.0)];
        let bounds: BoundingBox = points.iter().collect();
        let norm = Transform::normalize(&bounds);

        assert_eq!(norm.scale, 0.0);
        let p = norm.model_view.transform_point(&Point3::new(1.0, 1.0, 5.0));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn test_normal_matrix_of_uniform_scale() {
        let m = Transform::scale_matrix(0.5, 0.5, 0.5);
        let n = Transform::normal_matrix(&m);
        assert_relative_eq!(n, Transform::scale_matrix(2.0, 2.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_of_singular_is_identity() {
        let m = Transform::scale_matrix(0.0, 1.0, 1.0);
        assert_eq!(Transform::normal_matrix(&m), Matrix4::identity());
    }
}
