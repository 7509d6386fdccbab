use nalgebra::{vector, Point2, Point3, Vector2, Vector3};

use crate::common::Ray;

use super::{camera_basis, Camera};

/// Pinhole ray-casting camera
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Position of the camera in world coordinates
    position: Point3<f32>,
    /// Up direction from the camera's perspective
    up: Vector3<f32>,
    /// Right direction from the camera's perspective
    right: Vector3<f32>,
    /// Direction of camera, unit vector
    direction: Vector3<f32>,
    /// Aspect ratio of image plane
    aspect: f32,
    /// Vertical Field of View in degrees
    fov_y: f32,
    /// Size of image plane, calculated from fov_y
    img_plane_size: Vector2<f32>,
    /// Direction of ray passing through pixel \[0,0\], upper left corner, in line with buffer convention
    dir_00: Vector3<f32>,
    /// Offset across the whole image plane, left to right
    du: Vector3<f32>,
    /// Offset across the whole image plane, top to bottom
    dv: Vector3<f32>,
}

impl PerspectiveCamera {
    /// Construct new camera
    ///
    /// # Arguments
    ///
    /// * `position` - Position of the camera in world coordinates
    /// * `direction` - Looking direction of the camera
    ///
    /// # Notes
    ///
    /// Default fov is 60 degrees, default aspect ratio is 1. To change it,
    /// call [`change_aspect_from_resolution`](PerspectiveCamera::change_aspect_from_resolution),
    /// [`change_fov`](PerspectiveCamera::change_fov).
    pub fn new(position: Point3<f32>, direction: Vector3<f32>) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera {
            position,
            up: vector![0.0, 1.0, 0.0],
            right: vector![1.0, 0.0, 0.0],
            direction: direction.normalize(),
            aspect: 1.0,
            fov_y: 60.0,
            img_plane_size: vector![0.0, 0.0],
            dir_00: Vector3::zeros(),
            du: Vector3::zeros(),
            dv: Vector3::zeros(),
        };
        camera.recalc_plane_size();
        camera.recalc_basis();
        camera
    }

    /// Camera at `position` looking at `target`
    pub fn look_at(position: Point3<f32>, target: Point3<f32>) -> PerspectiveCamera {
        PerspectiveCamera::new(position, target - position)
    }

    /// Changes aspect ratio to match `(width, height)` resolution
    ///
    /// # Example
    ///
    /// ```
    /// use volcast_lib::PerspectiveCamera;
    /// use nalgebra::{vector, point};
    ///
    /// let mut camera = PerspectiveCamera::new(point![0.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
    /// camera.change_aspect_from_resolution(1280, 720);
    /// ```
    pub fn change_aspect_from_resolution(&mut self, width: usize, height: usize) {
        self.aspect = (width as f32) / (height as f32);
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    /// Change vertical FoV of camera
    ///
    /// # Arguments
    ///
    /// * `vertical_fov_deg` - vertical FoV in degrees, in range `(0;180)`
    pub fn change_fov(&mut self, vertical_fov_deg: f32) {
        assert!(vertical_fov_deg > 0.0 && vertical_fov_deg < 180.0);
        self.fov_y = vertical_fov_deg;
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    fn recalc_basis(&mut self) {
        let (right, up) = camera_basis(&self.direction);
        self.right = right;
        self.up = up;
        self.recalc_dudv();
    }

    // Call when fov or aspect ratio changed
    fn recalc_plane_size(&mut self) {
        self.img_plane_size = vector![0.0, 2.0 * f32::tan(f32::to_radians(0.5 * self.fov_y))];
        self.img_plane_size.x = self.img_plane_size.y * self.aspect;
    }

    fn recalc_dudv(&mut self) {
        self.du = self.img_plane_size.x * self.right;
        self.dv = -self.img_plane_size.y * self.up; // Notice '-' sign, rows go downwards
        self.dir_00 = self.direction - 0.5 * self.du - 0.5 * self.dv;
    }
}

impl Camera for PerspectiveCamera {
    fn generate_ray(&self, ndc: Point2<f32>) -> Ray {
        let pixel_coord = (ndc.coords + vector![1.0, 1.0]) * 0.5;
        let dir = self.dir_00 + self.du * pixel_coord.x + self.dv * pixel_coord.y;
        Ray::new(self.position, dir.normalize())
    }

    fn forward(&self) -> Vector3<f32> {
        self.direction
    }

    fn position(&self) -> Point3<f32> {
        self.position
    }
}
