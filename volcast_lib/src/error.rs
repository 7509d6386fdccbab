//! Error types of the library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or constructing a volume.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path exists but is not a regular file (or does not exist).
    #[error("path {0:?} does not lead to a file")]
    NotAFile(PathBuf),

    /// Header was never terminated by a form feed.
    #[error("header is not terminated by a form feed")]
    MissingHeaderTerminator,

    /// At least one dimension is zero or the voxel count overflows.
    #[error("invalid volume dimensions {x}x{y}x{z}")]
    InvalidDimensions { x: usize, y: usize, z: usize },

    /// Number of samples does not match the dimensions.
    #[error("data size mismatch: expected {expected} samples, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Payload ends before all samples were read.
    #[error("payload truncated: expected {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },
}

/// Errors raised by [`crate::render::RenderConfigBuilder::build`].
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("resolution must be non-zero, got {0}x{1}")]
    ZeroResolution(usize, usize),

    #[error("sample step must be positive, got {0}")]
    InvalidSampleStep(f32),

    #[error("transfer function index range must be positive, got {0}")]
    InvalidIndexRange(f32),

    #[error("tile size must be non-zero")]
    ZeroTileSize,

    #[error("too many lights, {0} given, at most {max} allowed", max = crate::render::MAX_LIGHTS)]
    TooManyLights(usize),
}
