use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Generate solid volume
/// All samples except for a zero border have the same value
pub struct SolidGenerator {
    /// The sample value
    sample: u16,
    pad: usize,
    dims: Vector3<usize>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<usize>, sample: u16) -> SolidGenerator {
        // Border of empty space, so the cube has visible faces
        let pad = dims.min() / 8;
        SolidGenerator { sample, pad, dims }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16 {
        let pad_end = self.dims - vector![self.pad, self.pad, self.pad];
        if coords.x < self.pad
            || coords.y < self.pad
            || coords.z < self.pad
            || coords.x >= pad_end.x
            || coords.y >= pad_end.y
            || coords.z >= pad_end.z
        {
            0
        } else {
            self.sample
        }
    }
}
