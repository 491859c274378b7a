/// Axis-aligned bounding box accumulated one point at a time
use nalgebra::Vector3;

/// Bounding box with sentinel extremes until the first point is folded in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    /// An empty box: `min` at the largest float, `max` at the smallest, so the
    /// first folded point tightens both corners.
    pub fn empty() -> Self {
        Self {
            min: Vector3::repeat(f32::MAX),
            max: Vector3::repeat(f32::MIN),
        }
    }

    /// Grow the box to contain `point`
    pub fn fold(&mut self, point: &Vector3<f32>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// True until at least one point has been folded in
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extent(&self) -> Vector3<f32> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Midpoint of the box, or the origin when empty
    pub fn center(&self) -> Vector3<f32> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.min + (self.max - self.min) / 2.0
        }
    }

    /// The larger of the x and y extents
    pub fn planar_extent(&self) -> f32 {
        let extent = self.extent();
        extent.x.max(extent.y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> FromIterator<&'a Vector3<f32>> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = &'a Vector3<f32>>>(iter: I) -> Self {
        let mut bounds = Self::empty();
        for point in iter {
            bounds.fold(point);
        }
        bounds
    }
}
