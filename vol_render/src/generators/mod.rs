//! Sample generators, one sample at a time

use nalgebra::Vector3;

use crate::config::{max_sample, GenerateSettings, GeneratorConfig};

mod noise;
mod ramp;
mod solid;
mod sphere;

pub use noise::NoiseGenerator;
pub use ramp::RampGenerator;
pub use solid::SolidGenerator;
pub use sphere::SphereGenerator;

// Generates one sample at a time, at any location
pub trait SampleGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u16;
}

pub fn get_sample_generator(settings: &GenerateSettings) -> Box<dyn SampleGenerator> {
    let dims = settings.dims;
    match settings.generator {
        GeneratorConfig::Solid { sample } => Box::new(SolidGenerator::new(dims, sample)),
        GeneratorConfig::Sphere { sample } => Box::new(SphereGenerator::new(dims, sample)),
        GeneratorConfig::Ramp => Box::new(RampGenerator::new(dims, max_sample(settings.data_type))),
        GeneratorConfig::Noise => Box::new(NoiseGenerator::new(
            max_sample(settings.data_type),
            settings.seed,
        )),
    }
}
