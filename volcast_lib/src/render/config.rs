use nalgebra::{vector, Point3, Vector2, Vector3};

use crate::{
    color::{self, RGBA},
    error::ConfigError,
};

/// Upper bound of scene lights in [`RenderConfig::lights`]
pub const MAX_LIGHTS: usize = 25;

/// Algorithm evaluated along every ray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Single sample on a plane through the volume center, facing the camera
    #[default]
    Slicer,
    /// Maximum intensity projection
    Mip,
    /// First hit of the isosurface
    Iso,
    /// Compositing with the 1D transfer function
    Composite,
    /// Compositing with the 2D (intensity, gradient magnitude) transfer function
    Tf2d,
}

impl RenderMode {
    pub const ALL: [RenderMode; 5] = [
        RenderMode::Slicer,
        RenderMode::Mip,
        RenderMode::Iso,
        RenderMode::Composite,
        RenderMode::Tf2d,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    None,
    #[default]
    Phong,
    /// Cool to warm tone shading
    Gooch,
}

/// Point light, `color` is its intensity per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
}

impl PointLight {
    pub fn new(position: Point3<f32>, color: Vector3<f32>) -> PointLight {
        PointLight { position, color }
    }

    pub fn white(position: Point3<f32>) -> PointLight {
        PointLight {
            position,
            color: vector![1.0, 1.0, 1.0],
        }
    }
}

/// Coefficients of Gooch shading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoochParams {
    pub blue: f32,
    pub yellow: f32,
    pub cool_diffuse: f32,
    pub warm_diffuse: f32,
}

impl Default for GoochParams {
    fn default() -> Self {
        GoochParams {
            blue: 0.4,
            yellow: 0.4,
            cool_diffuse: 0.2,
            warm_diffuse: 0.6,
        }
    }
}

pub const TF_SIZE: usize = 256;

/// Lookup table mapping scalar value to color and opacity.
///
/// Value `index_start` maps to the first entry, `index_start + index_range` past the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction1D {
    pub table: [RGBA; TF_SIZE],
    pub index_start: f32,
    pub index_range: f32,
}

impl TransferFunction1D {
    pub fn new(table: [RGBA; TF_SIZE], index_start: f32, index_range: f32) -> TransferFunction1D {
        TransferFunction1D {
            table,
            index_start,
            index_range,
        }
    }

    /// Linear ramp from transparent black to opaque white
    pub fn grey_ramp(index_start: f32, index_range: f32) -> TransferFunction1D {
        let mut table = [color::zero(); TF_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            let v = i as f32 / (TF_SIZE - 1) as f32;
            *entry = color::mono(v, v);
        }
        TransferFunction1D::new(table, index_start, index_range)
    }

    pub fn index(&self, value: f32) -> usize {
        let range01 = (value - self.index_start) / self.index_range;
        // Float to int casts saturate, negative and NaN end up at 0
        let i = (range01 * TF_SIZE as f32) as usize;
        i.min(TF_SIZE - 1)
    }

    pub fn lookup(&self, value: f32) -> RGBA {
        self.table[self.index(value)]
    }
}

impl Default for TransferFunction1D {
    fn default() -> Self {
        TransferFunction1D::grey_ramp(0.0, TF_SIZE as f32)
    }
}

/// Triangle in (intensity, gradient magnitude) space.
///
/// Apex sits at (`intensity`, `magnitude`), the triangle opens towards higher
/// magnitudes and is `2 * radius` wide at `magnitude + height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tf2dRegion {
    pub intensity: f32,
    pub magnitude: f32,
    pub height: f32,
    pub radius: f32,
    pub color: RGBA,
}

impl Tf2dRegion {
    pub fn new(intensity: f32, magnitude: f32, height: f32, radius: f32, color: RGBA) -> Tf2dRegion {
        Tf2dRegion {
            intensity,
            magnitude,
            height,
            radius,
            color,
        }
    }

    /// Region of the 2D transfer function editor when first opened,
    /// spanning magnitudes `<0;max_magnitude>`
    pub fn editor_default(max_magnitude: f32) -> Tf2dRegion {
        Tf2dRegion::new(68.0, 0.0, max_magnitude, 38.0, color::new(0.0, 0.8, 0.6, 0.3))
    }

    /// Tent weighted opacity, `None` outside of the triangle.
    /// Full `color.a` at the apex, falling linearly to zero at the far edge
    /// and at the slanted sides.
    pub fn opacity(&self, intensity: f32, gradient_magnitude: f32) -> Option<f32> {
        let dm = gradient_magnitude - self.magnitude;
        if !(0.0..=self.height).contains(&dm) {
            return None;
        }

        let dv = (intensity - self.intensity).abs();
        let (half_width, along) = if self.height > 0.0 {
            (self.radius * dm / self.height, 1.0 - dm / self.height)
        } else {
            (self.radius, 1.0)
        };

        if dv > half_width {
            return None;
        }

        if half_width <= 0.0 {
            // Apex
            return Some(self.color.w * along);
        }

        Some(self.color.w * (1.0 - dv / half_width) * along)
    }
}

/// Region with the greatest opacity at (`intensity`, `gradient_magnitude`).
/// Ties go to the region listed first.
pub fn classify_tf2d(
    regions: &[Tf2dRegion],
    intensity: f32,
    gradient_magnitude: f32,
) -> Option<(f32, &Tf2dRegion)> {
    let mut best: Option<(f32, &Tf2dRegion)> = None;
    for region in regions {
        if let Some(opacity) = region.opacity(intensity, gradient_magnitude) {
            match best {
                Some((best_opacity, _)) if best_opacity >= opacity => (),
                _ => best = Some((opacity, region)),
            }
        }
    }
    best
}

/// How pixels of one pass are distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduling {
    /// All pixels on the calling thread
    Sequential,
    /// Square tiles rendered by worker threads, `threads == 0` means available parallelism
    Tiled { tile_size: usize, threads: usize },
}

impl Default for Scheduling {
    fn default() -> Self {
        Scheduling::Tiled {
            tile_size: 32,
            threads: 0,
        }
    }
}

/// Settings of a render pass.
/// Build with [`RenderConfig::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub render_mode: RenderMode,
    pub shading_mode: ShadingMode,
    pub resolution: Vector2<usize>,
    /// Shade samples using gradient, enables `shading_mode`
    pub volume_shading: bool,
    pub iso_value: f32,
    pub iso_color: Vector3<f32>,
    pub tf_1d: TransferFunction1D,
    pub tf_2d: Vec<Tf2dRegion>,
    pub lights: Vec<PointLight>,
    /// Add white light at camera position
    pub include_camera_light: bool,
    pub gooch: GoochParams,
    /// Distance between samples along ray
    pub sample_step: f32,
    pub early_ray_termination: bool,
    pub scheduling: Scheduling,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            render_mode: RenderMode::default(),
            shading_mode: ShadingMode::default(),
            resolution: vector![700, 700],
            volume_shading: false,
            iso_value: 95.0,
            iso_color: vector![0.8, 0.8, 0.2],
            tf_1d: TransferFunction1D::default(),
            tf_2d: vec![],
            lights: vec![],
            include_camera_light: true,
            gooch: GoochParams::default(),
            sample_step: 1.0,
            early_ray_termination: true,
            scheduling: Scheduling::default(),
        }
    }
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: RenderConfig::default(),
        }
    }

    /// Gradient based shading is applied to samples
    pub fn shading_enabled(&self) -> bool {
        self.volume_shading && self.shading_mode != ShadingMode::None
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.x == 0 || self.resolution.y == 0 {
            return Err(ConfigError::ZeroResolution(
                self.resolution.x,
                self.resolution.y,
            ));
        }
        if !(self.sample_step > 0.0) {
            return Err(ConfigError::InvalidSampleStep(self.sample_step));
        }
        if !(self.tf_1d.index_range > 0.0) {
            return Err(ConfigError::InvalidIndexRange(self.tf_1d.index_range));
        }
        if let Scheduling::Tiled { tile_size: 0, .. } = self.scheduling {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.lights.len() > MAX_LIGHTS {
            return Err(ConfigError::TooManyLights(self.lights.len()));
        }
        Ok(())
    }
}

pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn render_mode(mut self, render_mode: RenderMode) -> Self {
        self.config.render_mode = render_mode;
        self
    }

    pub fn shading_mode(mut self, shading_mode: ShadingMode) -> Self {
        self.config.shading_mode = shading_mode;
        self
    }

    pub fn resolution(mut self, resolution: Vector2<usize>) -> Self {
        self.config.resolution = resolution;
        self
    }

    pub fn volume_shading(mut self, enable: bool) -> Self {
        self.config.volume_shading = enable;
        self
    }

    pub fn iso_value(mut self, iso_value: f32) -> Self {
        self.config.iso_value = iso_value;
        self
    }

    pub fn iso_color(mut self, iso_color: Vector3<f32>) -> Self {
        self.config.iso_color = iso_color;
        self
    }

    pub fn tf_1d(mut self, tf: TransferFunction1D) -> Self {
        self.config.tf_1d = tf;
        self
    }

    pub fn tf_2d(mut self, regions: Vec<Tf2dRegion>) -> Self {
        self.config.tf_2d = regions;
        self
    }

    pub fn light(mut self, light: PointLight) -> Self {
        self.config.lights.push(light);
        self
    }

    pub fn lights(mut self, lights: Vec<PointLight>) -> Self {
        self.config.lights = lights;
        self
    }

    pub fn include_camera_light(mut self, include: bool) -> Self {
        self.config.include_camera_light = include;
        self
    }

    pub fn gooch(mut self, gooch: GoochParams) -> Self {
        self.config.gooch = gooch;
        self
    }

    pub fn sample_step(mut self, step: f32) -> Self {
        self.config.sample_step = step;
        self
    }

    pub fn early_ray_termination(mut self, enable: bool) -> Self {
        self.config.early_ray_termination = enable;
        self
    }

    pub fn scheduling(mut self, scheduling: Scheduling) -> Self {
        self.config.scheduling = scheduling;
        self
    }

    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Skips validation
    pub fn build_unchecked(self) -> RenderConfig {
        self.config
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;

    use super::*;

    fn light_at(x: f32, y: f32, z: f32) -> PointLight {
        PointLight::white(point![x, y, z])
    }

    #[test]
    fn builder_validates() {
        let res = RenderConfig::builder().resolution(vector![0, 10]).build();
        assert_eq!(res, Err(ConfigError::ZeroResolution(0, 10)));

        let res = RenderConfig::builder().sample_step(0.0).build();
        assert_eq!(res, Err(ConfigError::InvalidSampleStep(0.0)));

        let res = RenderConfig::builder()
            .tf_1d(TransferFunction1D::grey_ramp(0.0, -1.0))
            .build();
        assert_eq!(res, Err(ConfigError::InvalidIndexRange(-1.0)));

        let res = RenderConfig::builder()
            .scheduling(Scheduling::Tiled {
                tile_size: 0,
                threads: 2,
            })
            .build();
        assert_eq!(res, Err(ConfigError::ZeroTileSize));

        let res = RenderConfig::builder()
            .lights(vec![light_at(0.0, 0.0, 0.0); MAX_LIGHTS + 1])
            .build();
        assert_eq!(res, Err(ConfigError::TooManyLights(MAX_LIGHTS + 1)));

        // Unchecked build lets anything through
        let config = RenderConfig::builder()
            .resolution(vector![0, 0])
            .build_unchecked();
        assert_eq!(config.resolution, vector![0, 0]);
    }

    #[test]
    fn config_equality_is_fieldwise() {
        let a = RenderConfig::default();
        let mut b = a.clone();
        assert_eq!(a, b);

        b.tf_1d.table[17].w = 0.5;
        assert_ne!(a, b);

        let c = RenderConfig::builder().light(light_at(1.0, 2.0, 3.0)).build_unchecked();
        assert_ne!(a, c);
    }

    #[test]
    fn tf_index_mapping() {
        let tf = TransferFunction1D::grey_ramp(100.0, 512.0);

        assert_eq!(tf.index(100.0), 0);
        assert_eq!(tf.index(102.0), 1);
        assert_eq!(tf.index(356.0), 128);
        assert_eq!(tf.index(611.9), 255);
        // Clamped on both sides
        assert_eq!(tf.index(5000.0), 255);
        assert_eq!(tf.index(-3.0), 0);
        assert_eq!(tf.index(f32::NAN), 0);

        assert_eq!(tf.lookup(5000.0), color::mono(1.0, 1.0));
        assert_eq!(tf.lookup(0.0), color::zero());
    }

    #[test]
    fn tent_opacity() {
        let region = Tf2dRegion::new(100.0, 10.0, 20.0, 40.0, color::new(1.0, 0.0, 0.0, 0.8));

        // Below the apex
        assert_eq!(region.opacity(100.0, 5.0), None);
        // Above the far edge
        assert_eq!(region.opacity(100.0, 31.0), None);
        // Apex
        assert_eq!(region.opacity(100.0, 10.0), Some(0.8));
        assert_eq!(region.opacity(100.5, 10.0), None);
        // Center line decays toward the far edge
        let o = region.opacity(100.0, 20.0).unwrap();
        assert!((o - 0.4).abs() < 1e-6);
        let o = region.opacity(100.0, 25.0).unwrap();
        assert!((o - 0.2).abs() < 1e-6);
        assert_eq!(region.opacity(100.0, 30.0), Some(0.0));
        // Half width at dm = 10 is 20
        let o = region.opacity(110.0, 20.0).unwrap();
        assert!((o - 0.2).abs() < 1e-6);
        assert_eq!(region.opacity(121.0, 20.0), None);
        assert_eq!(region.opacity(79.0, 20.0), None);
    }

    #[test]
    fn overlapping_regions() {
        let red = Tf2dRegion::new(100.0, 0.0, 10.0, 50.0, color::new(1.0, 0.0, 0.0, 0.5));
        let green = Tf2dRegion::new(120.0, 0.0, 10.0, 50.0, color::new(0.0, 1.0, 0.0, 0.5));
        let regions = [red, green];

        // Half width at dm = 5 is 25
        let (o, winner) = classify_tf2d(&regions, 105.0, 5.0).unwrap();
        assert_eq!(winner.color, red.color);
        assert!((o - 0.2).abs() < 1e-6);

        let (_, winner) = classify_tf2d(&regions, 118.0, 5.0).unwrap();
        assert_eq!(winner.color, green.color);

        // Equidistant, first one wins
        let (o, winner) = classify_tf2d(&regions, 110.0, 5.0).unwrap();
        assert_eq!(winner.color, red.color);
        assert!((o - 0.15).abs() < 1e-6);

        assert!(classify_tf2d(&regions, 300.0, 5.0).is_none());
        assert!(classify_tf2d(&[], 100.0, 5.0).is_none());
    }

    #[test]
    fn flat_region() {
        // Volume without gradients, region collapses to a band
        let region = Tf2dRegion::editor_default(0.0);

        let o = region.opacity(68.0 + 19.0, 0.0).unwrap();
        assert!((o - 0.15).abs() < 1e-6);
        assert_eq!(region.opacity(68.0, 0.5), None);
    }
}
