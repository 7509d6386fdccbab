use nalgebra::{vector, Vector3, Vector4};

/// Color with opacity, every channel in `<0;1>`
pub type RGBA = Vector4<f32>;

pub fn new(r: f32, g: f32, b: f32, a: f32) -> RGBA {
    vector![r, g, b, a]
}

/// Transparent black, the framebuffer background
pub fn zero() -> RGBA {
    vector![0.0, 0.0, 0.0, 0.0]
}

pub fn mono(v: f32, opacity: f32) -> RGBA {
    vector![v, v, v, opacity]
}

pub fn from_rgb(rgb: Vector3<f32>, opacity: f32) -> RGBA {
    vector![rgb.x, rgb.y, rgb.z, opacity]
}

/// Quantize framebuffer into 8-bit RGBA, 4 bytes per pixel.
/// Channels are clamped to `<0;1>` first.
pub fn to_rgba8(pixels: &[RGBA]) -> Vec<u8> {
    pixels
        .iter()
        .flat_map(|px| px.iter().map(|&c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
        .collect()
}
