use nalgebra::{Point3, Vector3};

/// Ray cast by camera.
/// Main usecase is getting intersections with volume bounds ([`super::BoundBox::intersect`]),
/// then iterating over the intersected line segment `<tmin;tmax>` in steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
    /// Entry distance, valid only after successful intersection
    pub tmin: f32,
    /// Exit distance, valid only after successful intersection
    pub tmax: f32,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// Segment is left unset (`<0;inf>`).
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        Ray {
            origin,
            direction,
            tmin: 0.0,
            tmax: f32::INFINITY,
        }
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }
}
