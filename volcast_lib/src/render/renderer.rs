use std::time::Instant;

use log::debug;
use nalgebra::{vector, Point2, Point3, Vector3};

use crate::{
    camera::Camera,
    color::{self, RGBA},
    common::{BoundBox, Ray},
    volumetric::{GradientVolume, GradientVoxel, Volume},
};

use super::{
    config::{classify_tf2d, PointLight, RenderConfig, RenderMode, Scheduling, ShadingMode},
    scheduler,
    shading::{compute_gooch_shading, compute_phong_shading},
};

/// Isosurface refinement stops once the sample is this close to the iso value
pub const BISECTION_EPSILON: f32 = 0.01;
pub const BISECTION_ITERATIONS: usize = 100;

/// Accumulated opacity at which compositing stops, if enabled
pub const ERT_THRESHOLD: f32 = 0.99;

/// Per pass constants, shared by all pixels
struct FrameSetup {
    bounds: BoundBox,
    volume_center: Point3<f32>,
    plane_normal: Vector3<f32>,
}

/// Raycasting renderer.
///
/// Borrows the volume, its gradients and a camera, owns the config and the framebuffer.
/// Framebuffer is row-major, pixel `[0,0]` is the upper left corner.
pub struct Renderer<'a, C>
where
    C: Camera,
{
    volume: &'a Volume,
    gradient: &'a GradientVolume,
    camera: &'a C,
    config: RenderConfig,
    frame_buffer: Vec<RGBA>,
}

impl<'a, C> Renderer<'a, C>
where
    C: Camera,
{
    pub fn new(
        volume: &'a Volume,
        gradient: &'a GradientVolume,
        camera: &'a C,
        config: RenderConfig,
    ) -> Renderer<'a, C> {
        let frame_buffer = vec![color::zero(); config.resolution.x * config.resolution.y];
        Renderer {
            volume,
            gradient,
            camera,
            config,
            frame_buffer,
        }
    }

    /// Replace config, framebuffer is cleared only if resolution changes
    pub fn set_config(&mut self, config: RenderConfig) {
        if config.resolution != self.config.resolution {
            self.frame_buffer = vec![color::zero(); config.resolution.x * config.resolution.y];
        }
        self.config = config;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_camera(&mut self, camera: &'a C) {
        self.camera = camera;
    }

    /// Result of the last [`Renderer::render`] call
    pub fn frame_buffer(&self) -> &[RGBA] {
        &self.frame_buffer
    }

    pub fn fill_color(&mut self, x: usize, y: usize, color: RGBA) {
        scheduler::fill_color(&mut self.frame_buffer, self.config.resolution.x, x, y, color);
    }

    /// Render one frame into the framebuffer
    pub fn render(&mut self)
    where
        C: Sync,
    {
        let start = Instant::now();

        // Taken out so pixels can borrow the renderer while the buffer is written
        let mut frame_buffer = std::mem::take(&mut self.frame_buffer);
        frame_buffer.fill(color::zero());

        let frame = FrameSetup {
            bounds: self.volume.bound_box(),
            volume_center: Point3::from(self.volume.dims().cast::<f32>() / 2.0),
            plane_normal: -self.camera.forward(),
        };

        let resolution = self.config.resolution;
        {
            let this = &*self;
            let pixel = |x: usize, y: usize| this.render_pixel(x, y, &frame);

            match self.config.scheduling {
                Scheduling::Sequential => {
                    scheduler::render_sequential(resolution, &mut frame_buffer, pixel)
                }
                Scheduling::Tiled { tile_size, threads } => {
                    scheduler::render_tiled(resolution, tile_size, threads, &mut frame_buffer, pixel)
                }
            }
        }
        self.frame_buffer = frame_buffer;

        debug!(
            "{:?} pass {}x{} ({:?}) took {} ms",
            self.config.render_mode,
            resolution.x,
            resolution.y,
            self.config.scheduling,
            start.elapsed().as_millis()
        );
    }

    fn render_pixel(&self, x: usize, y: usize, frame: &FrameSetup) -> RGBA {
        let resolution = self.config.resolution;
        let pixel = vector![
            x as f32 / resolution.x as f32,
            y as f32 / resolution.y as f32
        ];
        let ndc = Point2::from(pixel * 2.0 - vector![1.0, 1.0]);

        let mut ray = self.camera.generate_ray(ndc);
        if !Self::intersect_ray_volume_bounds(&mut ray, &frame.bounds) {
            return color::zero();
        }
        // Volume is behind the camera
        if ray.tmax < 0.0 {
            return color::zero();
        }
        // Camera inside the volume
        ray.tmin = f32::max(ray.tmin, 0.0);

        let step = self.config.sample_step;
        match self.config.render_mode {
            RenderMode::Slicer => {
                self.trace_ray_slice(&ray, &frame.volume_center, &frame.plane_normal)
            }
            RenderMode::Mip => self.trace_ray_mip(&ray, step),
            RenderMode::Iso => self.trace_ray_iso(&ray, step),
            RenderMode::Composite => self.trace_ray_composite(&ray, step),
            RenderMode::Tf2d => self.trace_ray_tf2d(&ray, step),
        }
    }

    /// Clip the ray by `bounds`, on hit `ray.tmin` and `ray.tmax` are overwritten
    pub fn intersect_ray_volume_bounds(ray: &mut Ray, bounds: &BoundBox) -> bool {
        match bounds.intersect(ray) {
            Some((tmin, tmax)) => {
                ray.tmin = tmin;
                ray.tmax = tmax;
                true
            }
            None => false,
        }
    }

    /// Single sample where the ray crosses the plane given by `volume_center` and `plane_normal`
    pub fn trace_ray_slice(
        &self,
        ray: &Ray,
        volume_center: &Point3<f32>,
        plane_normal: &Vector3<f32>,
    ) -> RGBA {
        let t = (volume_center - ray.origin).dot(plane_normal) / ray.direction.dot(plane_normal);
        let val = self.volume.get_sample_interpolate(ray.point_from_t(t));
        color::mono(self.normalize_sample(val), 1.0)
    }

    pub fn trace_ray_mip(&self, ray: &Ray, step: f32) -> RGBA {
        let mut max = 0.0f32;
        let mut t = ray.tmin;
        while t <= ray.tmax {
            max = max.max(self.volume.get_sample_interpolate(ray.point_from_t(t)));
            t += step;
        }
        color::mono(self.normalize_sample(max), 1.0)
    }

    /// First crossing of `iso_value` along the ray, transparent if there is none
    pub fn trace_ray_iso(&self, ray: &Ray, step: f32) -> RGBA {
        let iso = self.config.iso_value;

        let mut prev_t: Option<f32> = None;
        let mut hit = None;
        let mut t = ray.tmin;
        while t <= ray.tmax {
            let val = self.volume.get_sample_interpolate(ray.point_from_t(t));
            if val >= iso {
                hit = Some(match prev_t {
                    // Ray starts inside the surface
                    None => t,
                    Some(t0) => self.bisection_accuracy(ray, t0, t, iso),
                });
                break;
            }
            prev_t = Some(t);
            t += step;
        }

        let t = match hit {
            Some(t) => t,
            None => return color::zero(),
        };

        let iso_color = self.config.iso_color;
        if !self.config.shading_enabled() {
            return color::from_rgb(iso_color, 1.0);
        }

        let pos = ray.point_from_t(t);
        let gradient = self.gradient.get_gradient_interpolate(pos);
        color::from_rgb(self.shade(&iso_color, &gradient, &pos), 1.0)
    }

    /// Front to back compositing, color and opacity from the 1D transfer function
    pub fn trace_ray_composite(&self, ray: &Ray, step: f32) -> RGBA {
        let shading = self.config.shading_enabled();
        self.accumulate(ray, step, |pos, val| {
            let rgba = self.get_tf_value(val);
            if rgba.w <= 0.0 {
                return None;
            }
            let mut rgb = rgba.xyz();
            if shading {
                let gradient = self.gradient.get_gradient_interpolate(*pos);
                rgb = self.shade(&rgb, &gradient, pos);
            }
            Some((rgb, rgba.w))
        })
    }

    /// Front to back compositing classified by intensity and gradient magnitude
    pub fn trace_ray_tf2d(&self, ray: &Ray, step: f32) -> RGBA {
        let shading = self.config.shading_enabled();
        self.accumulate(ray, step, |pos, val| {
            let gradient = self.gradient.get_gradient_interpolate(*pos);
            let (opacity, region) = classify_tf2d(&self.config.tf_2d, val, gradient.magnitude)?;
            if opacity <= 0.0 {
                return None;
            }
            let mut rgb = region.color.xyz();
            if shading {
                rgb = self.shade(&rgb, &gradient, pos);
            }
            Some((rgb, opacity))
        })
    }

    /// Refine the iso crossing inside `<t0;t1>`, sample at `t0` is below `iso`.
    /// Returns the ray parameter of the crossing.
    pub fn bisection_accuracy(&self, ray: &Ray, t0: f32, t1: f32, iso: f32) -> f32 {
        let (mut lo, mut hi) = (t0, t1);
        for _ in 0..BISECTION_ITERATIONS {
            let mid = (lo + hi) / 2.0;
            let val = self.volume.get_sample_interpolate(ray.point_from_t(mid));
            if (val - iso).abs() < BISECTION_EPSILON {
                return mid;
            }
            if val < iso {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        (lo + hi) / 2.0
    }

    pub fn get_tf_value(&self, val: f32) -> RGBA {
        self.config.tf_1d.lookup(val)
    }

    pub fn get_tf2d_opacity(&self, intensity: f32, gradient_magnitude: f32) -> f32 {
        classify_tf2d(&self.config.tf_2d, intensity, gradient_magnitude)
            .map_or(0.0, |(opacity, _)| opacity)
    }

    fn accumulate<F>(&self, ray: &Ray, step: f32, mut classify: F) -> RGBA
    where
        F: FnMut(&Point3<f32>, f32) -> Option<(Vector3<f32>, f32)>,
    {
        let mut accum = color::zero();
        let mut t = ray.tmin;
        while t <= ray.tmax {
            let pos = ray.point_from_t(t);
            let val = self.volume.get_sample_interpolate(pos);

            if let Some((rgb, opacity)) = classify(&pos, val) {
                let weight = (1.0 - accum.w) * opacity;
                accum += color::from_rgb(rgb * weight, weight);

                if self.config.early_ray_termination && accum.w >= ERT_THRESHOLD {
                    break;
                }
            }
            t += step;
        }
        accum
    }

    /// Sum of contributions of all lights, clamped to `<0;1>`
    fn shade(&self, color: &Vector3<f32>, gradient: &GradientVoxel, pos: &Point3<f32>) -> Vector3<f32> {
        let camera_pos = self.camera.position();
        let view_dir = (camera_pos - pos)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -self.camera.forward());

        // Two-sided surface, normal faces the viewer
        let mut gradient = *gradient;
        if gradient.dir.dot(&view_dir) < 0.0 {
            gradient.dir = -gradient.dir;
        }

        let camera_light = PointLight::white(camera_pos);
        let use_camera_light = self.config.include_camera_light || self.config.lights.is_empty();
        let lights = use_camera_light
            .then_some(&camera_light)
            .into_iter()
            .chain(self.config.lights.iter());

        let mut total = Vector3::<f32>::zeros();
        for light in lights {
            let light_dir = (light.position - pos)
                .try_normalize(f32::EPSILON)
                .unwrap_or(view_dir);
            let shaded = match self.config.shading_mode {
                ShadingMode::Phong => compute_phong_shading(color, &gradient, &light_dir, &view_dir),
                ShadingMode::Gooch => {
                    compute_gooch_shading(color, &gradient, &light_dir, &self.config.gooch)
                }
                ShadingMode::None => *color,
            };
            total += light.color.component_mul(&shaded);
        }
        total.map(|c| c.clamp(0.0, 1.0))
    }

    fn normalize_sample(&self, val: f32) -> f32 {
        let max = self.volume.maximum();
        if max > 0.0 {
            f32::max(val / max, 0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, Vector2};

    use super::*;
    use crate::{
        camera::OrthographicCamera,
        render::{Tf2dRegion, TransferFunction1D},
        test_helpers::*,
        volumetric::InterpolationMode,
    };

    fn assert_close(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    fn front_camera(dims: Vector3<usize>) -> OrthographicCamera {
        let center = (dims.cast::<f32>() - vector![1.0, 1.0, 1.0]) / 2.0;
        OrthographicCamera::new(
            point![center.x, center.y, -10.0],
            vector![0.0, 0.0, 1.0],
            vector![dims.x as f32, dims.y as f32],
        )
    }

    /// Ray along z through the middle of the volume, clipped by its bounds
    fn axis_ray(volume: &Volume) -> Ray {
        let dims = volume.dims().cast::<f32>();
        let mut ray = Ray::new(
            point![(dims.x - 1.0) / 2.0, (dims.y - 1.0) / 2.0, -5.0],
            vector![0.0, 0.0, 1.0],
        );
        assert!(Renderer::<OrthographicCamera>::intersect_ray_volume_bounds(
            &mut ray,
            &volume.bound_box()
        ));
        ray
    }

    fn config(mode: RenderMode) -> RenderConfig {
        RenderConfig::builder()
            .render_mode(mode)
            .resolution(vector![4, 4])
            .build()
            .unwrap()
    }

    #[test]
    fn ray_volume_intersection() {
        let bounds = BoundBox::from_volume_size(vector![5, 5, 5]);

        let mut ray = Ray::new(point![2.0, 2.0, -3.0], vector![0.0, 0.0, 1.0]);
        assert!(Renderer::<OrthographicCamera>::intersect_ray_volume_bounds(&mut ray, &bounds));
        assert_eq!((ray.tmin, ray.tmax), (3.0, 7.0));

        let mut ray = Ray::new(point![7.0, 2.0, -3.0], vector![0.0, 0.0, 1.0]);
        assert!(!Renderer::<OrthographicCamera>::intersect_ray_volume_bounds(&mut ray, &bounds));
        // Untouched on miss
        assert_eq!((ray.tmin, ray.tmax), (0.0, f32::INFINITY));
    }

    #[test]
    fn bisection_converges() {
        // Value is 10 * z
        let volume = z_ramp_volume(vector![4, 4, 8], 10);
        volume.set_interpolation_mode(InterpolationMode::Linear);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let renderer = Renderer::new(&volume, &gradient, &camera, config(RenderMode::Iso));

        let ray = Ray::new(point![1.5, 1.5, -1.0], vector![0.0, 0.0, 1.0]);
        // Crossing of 35 at z = 3.5, t = 4.5
        let t = renderer.bisection_accuracy(&ray, 4.0, 5.0, 35.0);
        assert_close(t, 4.5, 0.001);

        let val = volume.get_sample_interpolate(ray.point_from_t(t));
        assert!((val - 35.0).abs() < BISECTION_EPSILON);
    }

    #[test]
    fn slice_of_uniform_volume() {
        let volume = uniform_volume(vector![4, 4, 4], 100);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let renderer = Renderer::new(&volume, &gradient, &camera, config(RenderMode::Slicer));

        let ray = axis_ray(&volume);
        let center = point![2.0, 2.0, 2.0];
        let color = renderer.trace_ray_slice(&ray, &center, &vector![0.0, 0.0, -1.0]);
        assert_eq!(color, color::mono(1.0, 1.0));
    }

    #[test]
    fn slice_of_empty_volume() {
        // Maximum is zero, no division
        let volume = uniform_volume(vector![3, 3, 3], 0);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let renderer = Renderer::new(&volume, &gradient, &camera, config(RenderMode::Slicer));

        let ray = axis_ray(&volume);
        let color = renderer.trace_ray_slice(&ray, &point![1.5, 1.5, 1.5], &vector![0.0, 0.0, -1.0]);
        assert_eq!(color, color::mono(0.0, 1.0));
    }

    #[test]
    fn mip_finds_maximum() {
        let volume = spike_volume(vector![5, 5, 5], point![2, 2, 3], 80);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let renderer = Renderer::new(&volume, &gradient, &camera, config(RenderMode::Mip));

        let ray = axis_ray(&volume);
        assert_eq!(renderer.trace_ray_mip(&ray, 1.0), color::mono(1.0, 1.0));

        // Step larger than the segment, only the entry sample is taken
        assert_eq!(renderer.trace_ray_mip(&ray, 10.0), color::mono(0.0, 1.0));
    }

    #[test]
    fn iso_flat_color() {
        let volume = z_ramp_volume(vector![4, 4, 8], 10);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let config = RenderConfig::builder()
            .render_mode(RenderMode::Iso)
            .iso_value(35.0)
            .iso_color(vector![0.1, 0.2, 0.3])
            .build()
            .unwrap();
        let renderer = Renderer::new(&volume, &gradient, &camera, config);

        let ray = axis_ray(&volume);
        assert_eq!(renderer.trace_ray_iso(&ray, 1.0), color::new(0.1, 0.2, 0.3, 1.0));

        let mut renderer = renderer;
        renderer.set_config(
            RenderConfig::builder()
                .render_mode(RenderMode::Iso)
                .iso_value(1000.0)
                .build()
                .unwrap(),
        );
        assert_eq!(renderer.trace_ray_iso(&ray, 1.0), color::zero());
    }

    #[test]
    fn iso_shading_sums_lights() {
        // Zero gradient everywhere, every light adds its ambient term
        let volume = uniform_volume(vector![4, 4, 4], 100);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let iso_color = vector![0.8, 0.8, 0.2];

        let builder = || {
            RenderConfig::builder()
                .render_mode(RenderMode::Iso)
                .iso_value(95.0)
                .iso_color(iso_color)
                .volume_shading(true)
        };

        let ray = axis_ray(&volume);

        // Camera light alone
        let renderer = Renderer::new(&volume, &gradient, &camera, builder().build().unwrap());
        let c = renderer.trace_ray_iso(&ray, 1.0);
        assert_close(c.x, 0.08, 1e-6);
        assert_close(c.z, 0.02, 1e-6);
        assert_eq!(c.w, 1.0);

        // Without lights the camera light is used anyway
        let renderer = Renderer::new(
            &volume,
            &gradient,
            &camera,
            builder().include_camera_light(false).build().unwrap(),
        );
        assert_close(renderer.trace_ray_iso(&ray, 1.0).x, 0.08, 1e-6);

        // Camera light and one more
        let renderer = Renderer::new(
            &volume,
            &gradient,
            &camera,
            builder()
                .light(PointLight::white(point![10.0, 0.0, 0.0]))
                .build()
                .unwrap(),
        );
        assert_close(renderer.trace_ray_iso(&ray, 1.0).x, 0.16, 1e-6);

        // Clamped
        let renderer = Renderer::new(
            &volume,
            &gradient,
            &camera,
            builder()
                .lights(vec![PointLight::white(point![10.0, 0.0, 0.0]); 20])
                .build()
                .unwrap(),
        );
        let c = renderer.trace_ray_iso(&ray, 1.0);
        assert_eq!(c.x, 1.0);
        assert_close(c.z, 0.42, 1e-5);
    }

    #[test]
    fn iso_shading_uses_gradient() {
        let volume = sphere_volume(vector![16, 16, 16], 5.0, 200);
        volume.set_interpolation_mode(InterpolationMode::Linear);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let config = RenderConfig::builder()
            .render_mode(RenderMode::Iso)
            .iso_value(100.0)
            .volume_shading(true)
            .build()
            .unwrap();
        let renderer = Renderer::new(&volume, &gradient, &camera, config.clone());

        let ray = axis_ray(&volume);
        let lit = renderer.trace_ray_iso(&ray, 0.5);

        // Facing the camera light, diffuse term dominates
        assert!(lit.x > config.iso_color.x * 0.5);
        assert!(lit.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn composite_accumulation() {
        let volume = uniform_volume(vector![4, 4, 32], 200);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let renderer = Renderer::new(&volume, &gradient, &camera, config(RenderMode::Composite));

        let ray = axis_ray(&volume);
        let terminated = renderer.trace_ray_composite(&ray, 1.0);
        assert!(terminated.w >= ERT_THRESHOLD && terminated.w <= 1.0);

        // Grey ramp, color equals opacity of a single sample
        let sample = renderer.get_tf_value(200.0);
        assert_close(terminated.x, sample.x * terminated.w, 1e-5);

        let mut renderer = renderer;
        let mut config = renderer.config().clone();
        config.early_ray_termination = false;
        renderer.set_config(config);

        let full = renderer.trace_ray_composite(&ray, 1.0);
        assert!(full.w >= terminated.w);
        assert!(full.w <= 1.0);
    }

    #[test]
    fn composite_skips_transparent() {
        let volume = uniform_volume(vector![4, 4, 4], 10);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let config = RenderConfig::builder()
            .render_mode(RenderMode::Composite)
            // Values below 100 are transparent
            .tf_1d(TransferFunction1D::grey_ramp(100.0, 100.0))
            .build()
            .unwrap();
        let renderer = Renderer::new(&volume, &gradient, &camera, config);

        assert_eq!(renderer.get_tf_value(10.0), color::zero());
        assert_eq!(renderer.trace_ray_composite(&axis_ray(&volume), 1.0), color::zero());
    }

    #[test]
    fn tf2d_classification() {
        let volume = uniform_volume(vector![4, 4, 4], 68);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let config = RenderConfig::builder()
            .render_mode(RenderMode::Tf2d)
            .tf_2d(vec![Tf2dRegion::editor_default(gradient.max_magnitude())])
            .build()
            .unwrap();
        let renderer = Renderer::new(&volume, &gradient, &camera, config);

        assert_close(renderer.get_tf2d_opacity(68.0, 0.0), 0.3, 1e-6);
        assert_eq!(renderer.get_tf2d_opacity(200.0, 0.0), 0.0);

        let c = renderer.trace_ray_tf2d(&axis_ray(&volume), 1.0);
        assert!(c.w > 0.3);
        // Region color is (0, 0.8, 0.6)
        assert_eq!(c.x, 0.0);
        assert_close(c.y / c.w, 0.8, 1e-5);
        assert_close(c.z / c.w, 0.6, 1e-5);
    }

    #[test]
    fn tf2d_without_regions() {
        let volume = uniform_volume(vector![4, 4, 4], 68);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let renderer = Renderer::new(&volume, &gradient, &camera, config(RenderMode::Tf2d));

        assert_eq!(renderer.get_tf2d_opacity(68.0, 0.0), 0.0);
        assert_eq!(renderer.trace_ray_tf2d(&axis_ray(&volume), 1.0), color::zero());
    }

    #[test]
    fn set_config_resizes() {
        let volume = uniform_volume(vector![4, 4, 4], 100);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());
        let mut renderer = Renderer::new(&volume, &gradient, &camera, config(RenderMode::Mip));
        assert_eq!(renderer.frame_buffer().len(), 16);

        renderer.fill_color(1, 2, color::mono(0.5, 1.0));
        assert_eq!(renderer.frame_buffer()[9], color::mono(0.5, 1.0));

        // Same resolution keeps the contents
        renderer.set_config(config(RenderMode::Slicer));
        assert_eq!(renderer.frame_buffer()[9], color::mono(0.5, 1.0));
        assert_eq!(renderer.config().render_mode, RenderMode::Slicer);

        let resized = RenderConfig::builder()
            .resolution(vector![3, 2])
            .build()
            .unwrap();
        renderer.set_config(resized);
        assert_eq!(renderer.frame_buffer(), &[color::zero(); 6]);
    }

    #[test]
    fn camera_inside_volume() {
        let volume = uniform_volume(vector![4, 4, 4], 100);
        let gradient = GradientVolume::new(&volume);
        let inside =
            OrthographicCamera::new(point![1.5, 1.5, 1.5], vector![0.0, 0.0, 1.0], vector![2.0, 2.0]);
        let mut renderer = Renderer::new(&volume, &gradient, &inside, config(RenderMode::Mip));

        renderer.render();
        assert!(renderer.frame_buffer().iter().all(|&c| c == color::mono(1.0, 1.0)));

        // Volume behind the camera
        let past =
            OrthographicCamera::new(point![1.5, 1.5, 10.0], vector![0.0, 0.0, 1.0], vector![2.0, 2.0]);
        renderer.set_camera(&past);
        renderer.render();
        assert!(renderer.frame_buffer().iter().all(|&c| c == color::zero()));
    }

    #[test]
    fn every_mode_renders() {
        let volume = sphere_volume(vector![12, 12, 12], 4.0, 150);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());

        for mode in RenderMode::ALL {
            let config = RenderConfig::builder()
                .render_mode(mode)
                .resolution(vector![12, 12])
                .iso_value(100.0)
                .tf_2d(vec![Tf2dRegion::new(
                    150.0,
                    0.0,
                    gradient.max_magnitude(),
                    100.0,
                    color::new(1.0, 0.0, 0.0, 0.5),
                )])
                .volume_shading(true)
                .build()
                .unwrap();
            let mut renderer = Renderer::new(&volume, &gradient, &camera, config);
            renderer.render();

            let center = renderer.frame_buffer()[6 + 12 * 6];
            assert!(center.w > 0.0, "{mode:?} center pixel is empty");
            assert!(center.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn sequential_equals_tiled() {
        let volume = sphere_volume(vector![10, 10, 10], 3.5, 120);
        let gradient = GradientVolume::new(&volume);
        let camera = front_camera(volume.dims());

        let build = |scheduling| {
            RenderConfig::builder()
                .render_mode(RenderMode::Composite)
                .resolution(Vector2::new(23, 17))
                .volume_shading(true)
                .scheduling(scheduling)
                .build()
                .unwrap()
        };

        let mut renderer = Renderer::new(&volume, &gradient, &camera, build(Scheduling::Sequential));
        renderer.render();
        let sequential = renderer.frame_buffer().to_vec();

        renderer.set_config(build(Scheduling::Tiled {
            tile_size: 5,
            threads: 3,
        }));
        renderer.render();
        assert_eq!(renderer.frame_buffer(), &sequential[..]);
    }
}
