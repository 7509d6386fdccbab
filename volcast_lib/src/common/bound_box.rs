use nalgebra::{point, Point3, Vector3};

use super::Ray;

/// Axis aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Box spanning sample positions of a volume with `size` samples per axis.
    /// Samples sit on integer coordinates, so the box is `<0;size-1>`.
    pub fn from_volume_size(size: Vector3<usize>) -> BoundBox {
        let upper = size.map(|v| v.saturating_sub(1) as f32);
        BoundBox {
            lower: point![0.0, 0.0, 0.0],
            upper: upper.into(),
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        self.lower + 0.5 * self.dims()
    }

    /// Corner selected by flag, `false` is lower, `true` is upper.
    /// Used by the slab test to pick near/far plane without branching on direction.
    pub fn bound(&self, upper: bool) -> &Point3<f32> {
        if upper {
            &self.upper
        } else {
            &self.lower
        }
    }

    /// Slab test.
    /// Returns `(tmin, tmax)` of the segment inside the box, `None` if ray misses.
    ///
    /// Zero direction components are fine, reciprocal becomes infinite and
    /// comparisons with infinity still order correctly.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        // Source: An Efficient and Robust Ray–Box Intersection Algorithm. Amy Williams et al. 2004.
        let inv_dir = ray.direction.map(|d| 1.0 / d);

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for axis in 0..3 {
            let negative = inv_dir[axis] < 0.0;
            let near = (self.bound(negative)[axis] - ray.origin[axis]) * inv_dir[axis];
            let far = (self.bound(!negative)[axis] - ray.origin[axis]) * inv_dir[axis];

            if tmin > far || near > tmax {
                return None;
            }

            // NaN (origin on the plane of a parallel axis) leaves the running interval untouched
            tmin = f32::max(tmin, near);
            tmax = f32::min(tmax, far);
        }

        Some((tmin, tmax))
    }
}
