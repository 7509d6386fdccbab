use std::{path::Path, time::Instant};

use log::info;
use nalgebra::{Point3, Vector3};

use crate::{
    common::{BoundBox, ValueRange},
    error::VolumeError,
};

use super::{
    data_source::DataSource,
    interpolation::{
        cubic_interpolate, cubic_neighbours, in_volume, linear_interpolate, sample_nearest,
        sample_trilinear, Grid, InterpolationMode, ModeCell,
    },
    parse,
};

/// Regular grid of 16-bit scalar samples.
/// Voxel `(x, y, z)` is stored at `x + dims.x * (y + dims.y * z)`.
pub struct Volume {
    dims: Vector3<usize>,
    data: Vec<u16>,
    range: ValueRange,
    /// `histogram[v]` is the number of voxels with value `v`
    histogram: Vec<usize>,
    file_name: Option<String>,
    interpolation: ModeCell,
}

impl std::fmt::Debug for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("dims", &self.dims)
            .field("data len", &self.data.len())
            .field("range", &self.range)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl Volume {
    /// Build volume from samples.
    ///
    /// Fails if any dimension is zero, the voxel count overflows or `data` does not hold exactly one sample per voxel.
    pub fn new(data: Vec<u16>, dims: Vector3<usize>) -> Result<Volume, VolumeError> {
        let expected = match parse::voxel_count(dims) {
            Some(count) if count > 0 => count,
            _ => {
                return Err(VolumeError::InvalidDimensions {
                    x: dims.x,
                    y: dims.y,
                    z: dims.z,
                })
            }
        };
        if data.len() != expected {
            return Err(VolumeError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let range = ValueRange::from_samples(data.iter().copied());
        let histogram = compute_histogram(&data, range.high as usize);

        Ok(Volume {
            dims,
            data,
            range,
            histogram,
            file_name: None,
            interpolation: ModeCell::new(InterpolationMode::default()),
        })
    }

    /// Load `.fld` file
    pub fn from_file<P>(path: P) -> Result<Volume, VolumeError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let start = Instant::now();

        let ds = DataSource::from_file(path)?;
        let mut volume = Volume::from_bytes(ds.get_slice())?;
        volume.file_name = Some(path.to_string_lossy().into_owned());

        info!(
            "Loaded {} ({}x{}x{}) in {} ms",
            path.display(),
            volume.dims.x,
            volume.dims.y,
            volume.dims.z,
            start.elapsed().as_millis()
        );
        Ok(volume)
    }

    /// Parse `.fld` file from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Volume, VolumeError> {
        let (header, samples) = parse::parse_fld(bytes)?;
        Volume::new(samples, header.dims)
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.dims.x * (y + self.dims.y * z)
    }

    /// Raw sample, coordinates must be inside the volume
    pub fn get_voxel(&self, x: usize, y: usize, z: usize) -> f32 {
        self.data[self.index(x, y, z)] as f32
    }

    /// Sample at continuous position using the current interpolation mode.
    /// Positions outside of the volume yield `0`.
    pub fn get_sample_interpolate(&self, coord: Point3<f32>) -> f32 {
        match self.interpolation.get() {
            InterpolationMode::NearestNeighbour => sample_nearest(self, coord),
            InterpolationMode::Linear => sample_trilinear(self, coord),
            InterpolationMode::Cubic => self.sample_tricubic(coord),
        }
    }

    fn sample_tricubic(&self, coord: Point3<f32>) -> f32 {
        if !in_volume(&coord, &self.dims) {
            return 0.0;
        }

        let t_z = coord.z - coord.z.floor();
        let planes = cubic_neighbours(coord.z, self.dims.z - 1)
            .map(|z| z.map_or(0.0, |z| self.bicubic(coord.x, coord.y, z)));

        cubic_interpolate(planes[0], planes[1], planes[2], planes[3], t_z)
    }

    /// Bicubic interpolation in plane `z`, along y first
    fn bicubic(&self, x: f32, y: f32, z: usize) -> f32 {
        let xs = cubic_neighbours(x, self.dims.x - 1);
        let ys = cubic_neighbours(y, self.dims.y - 1);

        let t_x = x - x.floor();
        let t_y = y - y.floor();

        let columns = xs.map(|x| match x {
            Some(x) => {
                let g = ys.map(|y| y.map_or(0.0, |y| self.get_voxel(x, y, z)));
                cubic_interpolate(g[0], g[1], g[2], g[3], t_y)
            }
            None => 0.0,
        });

        cubic_interpolate(columns[0], columns[1], columns[2], columns[3], t_x)
    }

    pub fn dims(&self) -> Vector3<usize> {
        self.dims
    }

    /// Box spanned by sample positions, `<0;dims-1>`
    pub fn bound_box(&self) -> BoundBox {
        BoundBox::from_volume_size(self.dims)
    }

    pub fn minimum(&self) -> f32 {
        self.range.low
    }

    pub fn maximum(&self) -> f32 {
        self.range.high
    }

    pub fn histogram(&self) -> &[usize] {
        &self.histogram
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation.get()
    }

    /// Switch sampling scheme, takes effect from the next sample.
    /// Gradient volumes computed from this volume switch with it.
    pub fn set_interpolation_mode(&self, mode: InterpolationMode) {
        self.interpolation.set(mode);
    }

    pub(crate) fn interpolation_cell(&self) -> &ModeCell {
        &self.interpolation
    }
}

impl Grid for Volume {
    type Sample = f32;

    fn grid_dims(&self) -> Vector3<usize> {
        self.dims
    }

    fn at(&self, x: usize, y: usize, z: usize) -> f32 {
        self.get_voxel(x, y, z)
    }

    fn zero() -> f32 {
        0.0
    }

    fn lerp(g0: f32, g1: f32, t: f32) -> f32 {
        linear_interpolate(g0, g1, t)
    }
}

fn compute_histogram(data: &[u16], max: usize) -> Vec<usize> {
    let mut histogram = vec![0; max + 1];
    for &v in data {
        histogram[v as usize] += 1;
    }
    histogram
}
