//! CPU raycaster for regular scalar volumes.
//!
//! A [`volumetric::Volume`] is loaded (or built from raw samples) once, a
//! [`volumetric::GradientVolume`] is derived from it once, and a
//! [`render::Renderer`] borrows both together with a [`camera::Camera`] to
//! produce a framebuffer every frame.
//!
//! ```
//! use nalgebra::{point, vector};
//! use volcast_lib::{
//!     camera::OrthographicCamera,
//!     render::{RenderConfig, RenderMode, Renderer},
//!     volumetric::{GradientVolume, Volume},
//! };
//!
//! let volume = Volume::new(vec![100; 4 * 4 * 4], vector![4, 4, 4]).unwrap();
//! let gradient = GradientVolume::new(&volume);
//! let camera = OrthographicCamera::new(
//!     point![1.5, 1.5, -10.0],
//!     vector![0.0, 0.0, 1.0],
//!     vector![4.0, 4.0],
//! );
//!
//! let config = RenderConfig::builder()
//!     .resolution(vector![8, 8])
//!     .render_mode(RenderMode::Mip)
//!     .build()
//!     .unwrap();
//!
//! let mut renderer = Renderer::new(&volume, &gradient, &camera, config);
//! renderer.render();
//! assert_eq!(renderer.frame_buffer().len(), 64);
//! ```

pub mod camera;
pub mod color;
pub mod common;
pub mod error;
pub mod render;
pub mod test_helpers;
pub mod volumetric;

pub use camera::{Camera, OrthographicCamera, PerspectiveCamera};
pub use error::{ConfigError, VolumeError};
