use nalgebra::{vector, Point2, Point3, Vector3};

use crate::common::Ray;

mod orthographic_camera;
mod perspective_camera;

pub use orthographic_camera::OrthographicCamera;
pub use perspective_camera::PerspectiveCamera;

/// Ray generating camera, as seen by the renderer.
///
/// The renderer only reads the camera, never mutates it.
pub trait Camera {
    /// Ray passing through `ndc`, normalized device coordinates in `<-1;1>x<-1;1>`.
    /// Point \[-1,-1\] is the upper left corner of the image.
    ///
    /// Segment (`tmin`, `tmax`) of the returned ray is unset.
    fn generate_ray(&self, ndc: Point2<f32>) -> Ray;

    /// Looking direction, unit vector
    fn forward(&self) -> Vector3<f32>;

    /// Position in world coordinates
    fn position(&self) -> Point3<f32>;
}

/// Right and up vectors of a camera looking in `direction`.
/// World up is positive y, unless looking (almost) straight up or down.
fn camera_basis(direction: &Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let world_up = if direction.x.abs() < 1e-6 && direction.z.abs() < 1e-6 {
        vector![0.0, 0.0, 1.0]
    } else {
        vector![0.0, 1.0, 0.0]
    };

    let right = direction.cross(&world_up).normalize();
    let up = right.cross(direction).normalize();
    (right, up)
}
