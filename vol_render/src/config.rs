use std::{path::PathBuf, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Point3, Vector2, Vector3};
use volcast_lib::{
    render::{RenderMode, Scheduling, ShadingMode},
    volumetric::{parse::DataType, InterpolationMode},
};

/// Parse all values of `key`
fn parse_values<T>(args: &ArgMatches, key: &str) -> Result<Vec<T>, String>
where
    T: FromStr,
{
    match args.values_of(key) {
        Some(values) => values
            .map(|v| v.parse::<T>().map_err(|_| format!("invalid value '{v}' of --{key}")))
            .collect(),
        None => Ok(vec![]),
    }
}

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Option<Vector3<T>>, String>
where
    T: FromStr + Copy + std::fmt::Debug + PartialEq + 'static,
{
    let vals: Vec<T> = parse_values(args, key)?;
    match vals[..] {
        [] => Ok(None),
        [x, y, z] => Ok(Some(vector![x, y, z])),
        _ => Err(format!("--{key} expects 3 values")),
    }
}

fn parse_one<T>(args: &ArgMatches, key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
{
    args.value_of(key)
        .map(|v| v.parse::<T>().map_err(|_| format!("invalid value '{v}' of --{key}")))
        .transpose()
}

fn path_of(args: &ArgMatches, key: &str) -> Result<PathBuf, String> {
    args.value_of_os(key)
        .map(PathBuf::from)
        .ok_or_else(|| format!("missing --{key}"))
}

/// Settings of the `render` subcommand
#[derive(Debug)]
pub struct RenderSettings {
    /// Volume to render
    pub file: PathBuf,
    pub mode: RenderMode,
    pub interpolation: InterpolationMode,
    pub resolution: Vector2<usize>,
    /// Perspective camera position, `None` for the default view
    pub camera_pos: Option<Point3<f32>>,
    pub orthographic: bool,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// `None` means middle of the value range
    pub iso_value: Option<f32>,
    pub shading: ShadingMode,
    pub volume_shading: bool,
    pub lights: Vec<Point3<f32>>,
    pub camera_light: bool,
    pub sample_step: f32,
    pub scheduling: Scheduling,
    pub output: PathBuf,
}

impl RenderSettings {
    pub fn from_args(args: &ArgMatches) -> Result<RenderSettings, String> {
        let mode = match args.value_of("mode") {
            Some("slice") => RenderMode::Slicer,
            Some("mip") => RenderMode::Mip,
            Some("iso") => RenderMode::Iso,
            Some("composite") | None => RenderMode::Composite,
            Some("tf2d") => RenderMode::Tf2d,
            Some(other) => return Err(format!("unknown render mode {other}")),
        };

        let interpolation = match args.value_of("interpolation") {
            Some("nearest") => InterpolationMode::NearestNeighbour,
            Some("linear") | None => InterpolationMode::Linear,
            Some("cubic") => InterpolationMode::Cubic,
            Some(other) => return Err(format!("unknown interpolation {other}")),
        };

        let shading = match args.value_of("shading") {
            Some("none") => ShadingMode::None,
            Some("phong") | None => ShadingMode::Phong,
            Some("gooch") => ShadingMode::Gooch,
            Some(other) => return Err(format!("unknown shading {other}")),
        };

        let resolution = match parse_values::<usize>(args, "resolution")?[..] {
            [w, h] => vector![w, h],
            _ => vector![700, 700],
        };

        let lights = parse_values::<f32>(args, "light")?
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();

        let scheduling = if args.is_present("sequential") {
            Scheduling::Sequential
        } else {
            Scheduling::Tiled {
                tile_size: 32,
                threads: parse_one(args, "threads")?.unwrap_or(0),
            }
        };

        Ok(RenderSettings {
            file: path_of(args, "file")?,
            mode,
            interpolation,
            resolution,
            camera_pos: values_to_vector3::<f32>(args, "camera-pos")?.map(Point3::from),
            orthographic: args.is_present("orthographic"),
            fov: parse_one(args, "fov")?.unwrap_or(60.0),
            iso_value: parse_one(args, "iso")?,
            shading,
            volume_shading: args.is_present("volume-shading"),
            lights,
            camera_light: !args.is_present("no-camera-light"),
            sample_step: parse_one(args, "sample-step")?.unwrap_or(0.5),
            scheduling,
            output: path_of(args, "output-file")?,
        })
    }
}

/// Settings of the `generate` subcommand
#[derive(Debug)]
pub struct GenerateSettings {
    /// Dimensions of volume
    pub dims: Vector3<usize>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    pub data_type: DataType,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
    // Output file name
    pub file_name: PathBuf,
}

impl GenerateSettings {
    pub fn from_args(args: &ArgMatches) -> Result<GenerateSettings, String> {
        let dims = values_to_vector3::<usize>(args, "dims")?.ok_or("missing --dims")?;

        let data_type = match args.value_of("data") {
            Some("short") => DataType::Short,
            Some("byte") | None => DataType::Byte,
            Some(other) => return Err(format!("unknown data type {other}")),
        };

        let generator = GeneratorConfig::from_args(args, data_type)?;

        Ok(GenerateSettings {
            dims,
            generator,
            data_type,
            seed: parse_one(args, "seed")?,
            file_name: path_of(args, "output-file")?,
        })
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorConfig {
    /// Cube of one value
    Solid { sample: u16 },
    /// Ball of one value in the center
    Sphere { sample: u16 },
    /// Values growing along z, full range of the data type
    Ramp,
    /// Random data
    Noise,
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches, data_type: DataType) -> Result<GeneratorConfig, String> {
        let sample = || -> Result<u16, String> {
            let sample: u16 = parse_one(args, "sample")?.ok_or("generator requires --sample")?;
            if sample > max_sample(data_type) {
                return Err(format!(
                    "sample {sample} does not fit into {}",
                    data_type.name()
                ));
            }
            Ok(sample)
        };

        match args.value_of("generator") {
            Some("solid") => Ok(GeneratorConfig::Solid { sample: sample()? }),
            Some("sphere") => Ok(GeneratorConfig::Sphere { sample: sample()? }),
            Some("ramp") => Ok(GeneratorConfig::Ramp),
            Some("noise") => Ok(GeneratorConfig::Noise),
            Some(other) => Err(format!("unknown generator {other}")),
            None => Err("missing --generator".into()),
        }
    }
}

/// Largest value representable by `data_type`
pub fn max_sample(data_type: DataType) -> u16 {
    match data_type {
        DataType::Byte => u8::MAX as u16,
        DataType::Short => u16::MAX,
    }
}
