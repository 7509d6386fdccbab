//! Rendering of a volume into a framebuffer.
//!
//! [`Renderer`] evaluates one of the [`RenderMode`]s for every pixel,
//! pixels are distributed according to [`Scheduling`].

mod config;
mod renderer;
pub mod scheduler;
pub mod shading;

pub use config::{
    classify_tf2d, GoochParams, PointLight, RenderConfig, RenderConfigBuilder, RenderMode,
    Scheduling, ShadingMode, Tf2dRegion, TransferFunction1D, MAX_LIGHTS, TF_SIZE,
};
pub use renderer::{Renderer, BISECTION_EPSILON, BISECTION_ITERATIONS, ERT_THRESHOLD};
