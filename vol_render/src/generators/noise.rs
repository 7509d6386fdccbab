use nalgebra::Vector3;

use super::SampleGenerator;

/// Uniform random samples in `<0;max>`
pub struct NoiseGenerator {
    rng: fastrand::Rng,
    max: u16,
}

impl NoiseGenerator {
    pub fn new(max: u16, seed: Option<u64>) -> NoiseGenerator {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        NoiseGenerator { rng, max }
    }
}

impl SampleGenerator for NoiseGenerator {
    fn sample_at(&self, _coords: Vector3<usize>) -> u16 {
        self.rng.u16(..=self.max)
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn seed_replicates() {
        let a = NoiseGenerator::new(255, Some(42));
        let b = NoiseGenerator::new(255, Some(42));

        for i in 0..100 {
            let coords = vector![i, 0, 0];
            let sample = a.sample_at(coords);
            assert_eq!(sample, b.sample_at(coords));
            assert!(sample <= 255);
        }
    }
}
