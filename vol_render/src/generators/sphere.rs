use nalgebra::{Point3, Vector3};

use super::SampleGenerator;

/// Ball in the center of the volume, diameter is 80 % of the shortest side
pub struct SphereGenerator {
    sample: u16,
    center: Point3<f32>,
    radius: f32,
}

impl SphereGenerator {
    pub fn new(dims: Vector3<usize>, sample: u16) -> SphereGenerator {
        let center = dims.map(|d| (d as f32 - 1.0) / 2.0);
        let radius = 0.4 * dims.min() as f32;
        SphereGenerator {
            sample,
            center: center.into(),
            radius,
        }
    }
}

impl SampleGenerator for SphereGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16 {
        let pos = Point3::from(coords.map(|c| c as f32));
        if (pos - self.center).norm() <= self.radius {
            self.sample
        } else {
            0
        }
    }
}
