use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::common::Ray;

use super::{camera_basis, Camera};

/// Parallel projection camera.
/// All rays share the direction, origins are spread over the image plane.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// Center of the image plane
    position: Point3<f32>,
    direction: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    /// Width and height of the image plane in world units
    plane_size: Vector2<f32>,
}

impl OrthographicCamera {
    pub fn new(
        position: Point3<f32>,
        direction: Vector3<f32>,
        plane_size: Vector2<f32>,
    ) -> OrthographicCamera {
        let direction = direction.normalize();
        let (right, up) = camera_basis(&direction);
        OrthographicCamera {
            position,
            direction,
            right,
            up,
            plane_size,
        }
    }
}

impl Camera for OrthographicCamera {
    fn generate_ray(&self, ndc: Point2<f32>) -> Ray {
        let half = self.plane_size * 0.5;
        // ndc.y = -1 is the top row
        let origin = self.position + self.right * (ndc.x * half.x) - self.up * (ndc.y * half.y);
        Ray::new(origin, self.direction)
    }

    fn forward(&self) -> Vector3<f32> {
        self.direction
    }

    fn position(&self) -> Point3<f32> {
        self.position
    }
}
