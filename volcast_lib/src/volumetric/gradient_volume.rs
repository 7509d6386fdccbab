use std::time::Instant;

use log::info;
use nalgebra::{vector, Point3, Vector3};

use crate::common::ValueRange;

use super::{
    interpolation::{sample_nearest, sample_trilinear, Grid, InterpolationMode, ModeCell},
    Volume,
};

/// Gradient of the scalar field at a voxel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientVoxel {
    /// Not normalized
    pub dir: Vector3<f32>,
    /// Length of `dir`
    pub magnitude: f32,
}

impl GradientVoxel {
    pub fn new(dir: Vector3<f32>) -> GradientVoxel {
        GradientVoxel {
            dir,
            magnitude: dir.norm(),
        }
    }

    pub fn zero() -> GradientVoxel {
        GradientVoxel {
            dir: vector![0.0, 0.0, 0.0],
            magnitude: 0.0,
        }
    }

    /// Direction and magnitude are interpolated independently
    pub fn linear_interpolate(g0: GradientVoxel, g1: GradientVoxel, t: f32) -> GradientVoxel {
        GradientVoxel {
            dir: g0.dir.lerp(&g1.dir, t),
            magnitude: g0.magnitude * (1.0 - t) + g1.magnitude * t,
        }
    }
}

/// Gradient field of a [`Volume`], computed once by central differences.
/// Voxels on the border of the volume have zero gradient.
///
/// The interpolation mode is shared with the source volume.
pub struct GradientVolume {
    dims: Vector3<usize>,
    data: Vec<GradientVoxel>,
    magnitude_range: ValueRange,
    interpolation: ModeCell,
}

impl std::fmt::Debug for GradientVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientVolume")
            .field("dims", &self.dims)
            .field("magnitude_range", &self.magnitude_range)
            .finish()
    }
}

impl GradientVolume {
    pub fn new(volume: &Volume) -> GradientVolume {
        let start = Instant::now();

        let dims = volume.dims();
        let mut data = vec![GradientVoxel::zero(); dims.x * dims.y * dims.z];

        for z in 1..dims.z.saturating_sub(1) {
            for y in 1..dims.y.saturating_sub(1) {
                for x in 1..dims.x.saturating_sub(1) {
                    let gx = (volume.get_voxel(x + 1, y, z) - volume.get_voxel(x - 1, y, z)) / 2.0;
                    let gy = (volume.get_voxel(x, y + 1, z) - volume.get_voxel(x, y - 1, z)) / 2.0;
                    let gz = (volume.get_voxel(x, y, z + 1) - volume.get_voxel(x, y, z - 1)) / 2.0;

                    data[x + dims.x * (y + dims.y * z)] = GradientVoxel::new(vector![gx, gy, gz]);
                }
            }
        }

        let magnitude_range = ValueRange::from_samples(data.iter().map(|g| g.magnitude));

        info!(
            "Gradient volume computed in {} ms, magnitude {:?}",
            start.elapsed().as_millis(),
            magnitude_range
        );

        GradientVolume {
            dims,
            data,
            magnitude_range,
            interpolation: volume.interpolation_cell().clone(),
        }
    }

    /// Gradient at voxel, coordinates must be inside the volume
    pub fn get_gradient(&self, x: usize, y: usize, z: usize) -> GradientVoxel {
        self.data[x + self.dims.x * (y + self.dims.y * z)]
    }

    /// Gradient at continuous position, zero outside of the volume.
    /// Cubic mode samples linearly.
    pub fn get_gradient_interpolate(&self, coord: Point3<f32>) -> GradientVoxel {
        match self.interpolation.get() {
            InterpolationMode::NearestNeighbour => sample_nearest(self, coord),
            InterpolationMode::Linear | InterpolationMode::Cubic => sample_trilinear(self, coord),
        }
    }

    pub fn dims(&self) -> Vector3<usize> {
        self.dims
    }

    pub fn min_magnitude(&self) -> f32 {
        self.magnitude_range.low
    }

    pub fn max_magnitude(&self) -> f32 {
        self.magnitude_range.high
    }

    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation.get()
    }

    pub fn set_interpolation_mode(&self, mode: InterpolationMode) {
        self.interpolation.set(mode);
    }
}

impl Grid for GradientVolume {
    type Sample = GradientVoxel;

    fn grid_dims(&self) -> Vector3<usize> {
        self.dims
    }

    fn at(&self, x: usize, y: usize, z: usize) -> GradientVoxel {
        self.get_gradient(x, y, z)
    }

    fn zero() -> GradientVoxel {
        GradientVoxel::zero()
    }

    fn lerp(g0: GradientVoxel, g1: GradientVoxel, t: f32) -> GradientVoxel {
        GradientVoxel::linear_interpolate(g0, g1, t)
    }
}
