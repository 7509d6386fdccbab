use nalgebra::Vector3;

use super::SampleGenerator;

/// Value grows linearly with z, from 0 in the first slice to `max` in the last
pub struct RampGenerator {
    last_slice: usize,
    max: u16,
}

impl RampGenerator {
    pub fn new(dims: Vector3<usize>, max: u16) -> RampGenerator {
        RampGenerator {
            last_slice: dims.z.saturating_sub(1),
            max,
        }
    }
}

impl SampleGenerator for RampGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16 {
        if self.last_slice == 0 {
            return 0;
        }
        (coords.z * self.max as usize / self.last_slice) as u16
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn ramp_spans_range() {
        let gen = RampGenerator::new(vector![2, 2, 6], 255);

        assert_eq!(gen.sample_at(vector![0, 0, 0]), 0);
        assert_eq!(gen.sample_at(vector![1, 1, 1]), 51);
        assert_eq!(gen.sample_at(vector![0, 1, 5]), 255);

        let flat = RampGenerator::new(vector![2, 2, 1], 255);
        assert_eq!(flat.sample_at(vector![1, 1, 0]), 0);
    }
}
