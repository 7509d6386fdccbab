use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use nalgebra::{vector, Point3, Vector3};

/// Sampling scheme used between voxel centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum InterpolationMode {
    #[default]
    NearestNeighbour = 0,
    Linear = 1,
    Cubic = 2,
}

impl InterpolationMode {
    pub const ALL: [InterpolationMode; 3] = [
        InterpolationMode::NearestNeighbour,
        InterpolationMode::Linear,
        InterpolationMode::Cubic,
    ];

    fn from_u8(val: u8) -> InterpolationMode {
        match val {
            0 => InterpolationMode::NearestNeighbour,
            1 => InterpolationMode::Linear,
            2 => InterpolationMode::Cubic,
            _ => unreachable!("invalid interpolation mode {val}"),
        }
    }
}

/// Interpolation mode, switchable through a shared reference.
/// Clones refer to the same mode.
#[derive(Debug, Clone)]
pub(crate) struct ModeCell(Arc<AtomicU8>);

impl ModeCell {
    pub fn new(mode: InterpolationMode) -> ModeCell {
        ModeCell(Arc::new(AtomicU8::new(mode as u8)))
    }

    pub fn get(&self) -> InterpolationMode {
        InterpolationMode::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, mode: InterpolationMode) {
        self.0.store(mode as u8, Ordering::Relaxed);
    }
}

/// Linear interpolation between `g0` (`t == 0`) and `g1` (`t == 1`)
///
/// ```
/// use volcast_lib::volumetric::linear_interpolate;
///
/// assert_eq!(linear_interpolate(10.0, 20.0, 0.25), 12.5);
/// ```
pub fn linear_interpolate(g0: f32, g1: f32, t: f32) -> f32 {
    g0 * (1.0 - t) + g1 * t
}

/// Keys cubic convolution kernel, `a = -0.75`
pub fn weight(x: f32) -> f32 {
    const A: f32 = -0.75;

    let x = x.abs();
    let x2 = x * x;
    let x3 = x2 * x;

    if x < 1.0 {
        (A + 2.0) * x3 - (A + 3.0) * x2 + 1.0
    } else if x < 2.0 {
        A * x3 - 5.0 * A * x2 + 8.0 * A * x - 4.0 * A
    } else {
        0.0
    }
}

/// Cubic interpolation of equally spaced samples, `t` is the offset from `g1` towards `g2`
///
/// g0-----g1-----g2-----g3
///         |--t--|
pub fn cubic_interpolate(g0: f32, g1: f32, g2: f32, g3: f32, t: f32) -> f32 {
    g0 * weight(-1.0 - t) + g1 * weight(-t) + g2 * weight(1.0 - t) + g3 * weight(2.0 - t)
}

/// Regular grid of samples, shared by scalar and gradient volumes
pub(crate) trait Grid {
    type Sample: Copy;

    fn grid_dims(&self) -> Vector3<usize>;

    /// Sample at integer position, caller guarantees it is inside
    fn at(&self, x: usize, y: usize, z: usize) -> Self::Sample;

    /// Value returned outside of the grid
    fn zero() -> Self::Sample;

    fn lerp(g0: Self::Sample, g1: Self::Sample, t: f32) -> Self::Sample;
}

/// `coord` lies in `<0;dims)` on every axis
pub(crate) fn in_volume(coord: &Point3<f32>, dims: &Vector3<usize>) -> bool {
    (0..3).all(|i| coord[i] >= 0.0 && coord[i] < dims[i] as f32)
}

pub(crate) fn sample_nearest<G: Grid>(grid: &G, coord: Point3<f32>) -> G::Sample {
    // Rounding is adding 0.5 and truncating
    let coord = coord + vector![0.5, 0.5, 0.5];
    if !in_volume(&coord, &grid.grid_dims()) {
        return G::zero();
    }

    grid.at(coord.x as usize, coord.y as usize, coord.z as usize)
}

pub(crate) fn sample_trilinear<G: Grid>(grid: &G, coord: Point3<f32>) -> G::Sample {
    if !in_volume(&coord, &grid.grid_dims()) {
        return G::zero();
    }

    let t_z = coord.z - coord.z.floor();
    let near = bilinear(grid, coord.x, coord.y, coord.z.floor() as usize);
    let far = bilinear(grid, coord.x, coord.y, coord.z.ceil() as usize);
    G::lerp(near, far, t_z)
}

/// Bilinear interpolation in plane `z`, horizontally then vertically.
/// Ceil neighbours are clamped to the last sample.
fn bilinear<G: Grid>(grid: &G, x: f32, y: f32, z: usize) -> G::Sample {
    let dims = grid.grid_dims();

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x.ceil() as usize).min(dims.x - 1);
    let y1 = (y.ceil() as usize).min(dims.y - 1);
    let z = z.min(dims.z - 1);

    let t_x = x - x0 as f32;
    let t_y = y - y0 as f32;

    let bottom = G::lerp(grid.at(x0, y0, z), grid.at(x1, y0, z), t_x);
    let top = G::lerp(grid.at(x0, y1, z), grid.at(x1, y1, z), t_x);
    G::lerp(bottom, top, t_y)
}

/// Indices of the four samples around `pos` along one axis, `None` if outside `<0;max>`
pub(crate) fn cubic_neighbours(pos: f32, max: usize) -> [Option<usize>; 4] {
    let floor = pos.floor() as isize;
    let ceil = pos.ceil() as isize;
    let max = max as isize;

    let check = |i: isize| (0..=max).contains(&i).then(|| i as usize);

    [check(floor - 1), check(floor), check(ceil), check(ceil + 1)]
}
