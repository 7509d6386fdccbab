mod data_source;
mod gradient_volume;
mod interpolation;
pub mod parse;
mod volume;

pub use data_source::DataSource;
pub use gradient_volume::{GradientVolume, GradientVoxel};
pub use interpolation::{cubic_interpolate, linear_interpolate, weight, InterpolationMode};
pub use volume::Volume;
