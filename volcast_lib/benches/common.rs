pub use criterion::{black_box, Criterion};

pub use nalgebra::{point, vector, Point3, Vector2};
pub use volcast_lib::{
    camera::PerspectiveCamera,
    render::{RenderConfig, RenderMode, Renderer, Scheduling, Tf2dRegion},
    test_helpers,
    volumetric::{GradientVolume, InterpolationMode, Volume},
};

pub const RESOLUTION: Vector2<usize> = vector![256, 256];

pub const POSITION: Point3<f32> = point![-40.0, -40.0, -40.0];
pub const TARGET: Point3<f32> = point![32.0, 32.0, 32.0];

/// Synthetic dataset, ball inside a noise free cube
pub fn get_volume() -> Volume {
    test_helpers::sphere_volume(vector![64, 64, 64], 24.0, 180)
}

pub fn get_camera() -> PerspectiveCamera {
    PerspectiveCamera::look_at(POSITION, TARGET)
}

pub fn bench_config(mode: RenderMode, scheduling: Scheduling, max_magnitude: f32) -> RenderConfig {
    RenderConfig::builder()
        .resolution(RESOLUTION)
        .render_mode(mode)
        .iso_value(90.0)
        .volume_shading(true)
        .tf_2d(vec![Tf2dRegion::editor_default(max_magnitude)])
        .early_ray_termination(true)
        .scheduling(scheduling)
        .build_unchecked()
}
