use std::{error::Error, path::Path, time::Instant};

use log::info;
use nalgebra::{vector, Point3, Vector2};
use volcast_lib::{
    color::{self, RGBA},
    common::BoundBox,
    render::{PointLight, RenderConfig, Renderer, Tf2dRegion, TransferFunction1D},
    volumetric::{GradientVolume, Volume},
    Camera, ConfigError, OrthographicCamera, PerspectiveCamera,
};

use crate::config::RenderSettings;

/// Load volume, render one frame and save it as PNG
pub fn render_volume(settings: &RenderSettings) -> Result<(), Box<dyn Error>> {
    let volume = Volume::from_file(&settings.file)?;
    volume.set_interpolation_mode(settings.interpolation);
    let gradient = GradientVolume::new(&volume);

    let config = build_config(settings, &volume, &gradient)?;
    let resolution = config.resolution;

    let bounds = volume.bound_box();
    let target = bounds.center();
    let position = settings
        .camera_pos
        .unwrap_or_else(|| default_camera_position(&bounds));

    let start = Instant::now();
    let pixels = if settings.orthographic {
        let height = bounds.dims().norm();
        let aspect = resolution.x as f32 / resolution.y as f32;
        let plane = vector![height * aspect, height];
        let camera = OrthographicCamera::new(position, target - position, plane);
        render_frame(&volume, &gradient, &camera, config)
    } else {
        let mut camera = PerspectiveCamera::look_at(position, target);
        camera.change_aspect_from_resolution(resolution.x, resolution.y);
        camera.change_fov(settings.fov);
        render_frame(&volume, &gradient, &camera, config)
    };
    info!("Frame rendered in {} ms", start.elapsed().as_millis());

    save_png(&settings.output, resolution, &pixels)?;
    info!("Image saved to {}", settings.output.display());
    Ok(())
}

/// Config for the loaded volume, transfer functions span its value and gradient ranges
pub fn build_config(
    settings: &RenderSettings,
    volume: &Volume,
    gradient: &GradientVolume,
) -> Result<RenderConfig, ConfigError> {
    let min = volume.minimum();
    let range = f32::max(volume.maximum() - min, 1.0);

    RenderConfig::builder()
        .render_mode(settings.mode)
        .shading_mode(settings.shading)
        .volume_shading(settings.volume_shading)
        .resolution(settings.resolution)
        .iso_value(settings.iso_value.unwrap_or(min + range / 2.0))
        .tf_1d(TransferFunction1D::grey_ramp(min, range))
        .tf_2d(vec![Tf2dRegion::editor_default(gradient.max_magnitude())])
        .lights(settings.lights.iter().map(|&p| PointLight::white(p)).collect())
        .include_camera_light(settings.camera_light)
        .sample_step(settings.sample_step)
        .scheduling(settings.scheduling)
        .build()
}

/// Looking at the volume center from the (+x, +y, +z) diagonal
fn default_camera_position(bounds: &BoundBox) -> Point3<f32> {
    let diagonal = bounds.dims().norm();
    bounds.center() + vector![1.0, 1.0, 1.0].normalize() * (1.5 * diagonal)
}

fn render_frame<C>(
    volume: &Volume,
    gradient: &GradientVolume,
    camera: &C,
    config: RenderConfig,
) -> Vec<RGBA>
where
    C: Camera + Sync,
{
    let mut renderer = Renderer::new(volume, gradient, camera, config);
    renderer.render();
    renderer.frame_buffer().to_vec()
}

fn save_png<P>(path: P, resolution: Vector2<usize>, pixels: &[RGBA]) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
{
    let bytes = color::to_rgba8(pixels);
    image::save_buffer(
        path,
        &bytes,
        resolution.x as u32,
        resolution.y as u32,
        image::ColorType::Rgba8,
    )?;
    Ok(())
}
