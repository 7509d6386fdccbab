//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use nalgebra::{Point3, Vector3};

use crate::volumetric::{
    parse::{DataType, FldHeader, FORM_FEED},
    Volume,
};

/// Every voxel has `value`
pub fn uniform_volume(dims: Vector3<usize>, value: u16) -> Volume {
    Volume::new(vec![value; dims.x * dims.y * dims.z], dims).unwrap()
}

/// Voxel value is `x + 10y + 100z`
pub fn ramp_volume(dims: Vector3<usize>) -> Volume {
    let mut data = Vec::with_capacity(dims.x * dims.y * dims.z);
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                data.push((x + 10 * y + 100 * z) as u16);
            }
        }
    }
    Volume::new(data, dims).unwrap()
}

/// Voxel value is `z * step`, constant in x and y
pub fn z_ramp_volume(dims: Vector3<usize>, step: u16) -> Volume {
    let plane = dims.x * dims.y;
    let data = (0..dims.z)
        .flat_map(|z| std::iter::repeat(z as u16 * step).take(plane))
        .collect();
    Volume::new(data, dims).unwrap()
}

/// Zero volume with single voxel set to `value`
pub fn spike_volume(dims: Vector3<usize>, spike: Point3<usize>, value: u16) -> Volume {
    let mut data = vec![0; dims.x * dims.y * dims.z];
    data[spike.x + dims.x * (spike.y + dims.y * spike.z)] = value;
    Volume::new(data, dims).unwrap()
}

/// Solid ball of `value` in the middle of the volume
pub fn sphere_volume(dims: Vector3<usize>, radius: f32, value: u16) -> Volume {
    let center = dims.map(|d| (d as f32 - 1.0) / 2.0);
    let mut data = Vec::with_capacity(dims.x * dims.y * dims.z);
    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                let dx = x as f32 - center.x;
                let dy = y as f32 - center.y;
                let dz = z as f32 - center.z;
                let inside = dx * dx + dy * dy + dz * dz <= radius * radius;
                data.push(if inside { value } else { 0 });
            }
        }
    }
    Volume::new(data, dims).unwrap()
}

/// Complete `.fld` file, header terminated by two form feeds
pub fn fld_bytes(dims: Vector3<usize>, samples: &[u16], data_type: DataType) -> Vec<u8> {
    let header = FldHeader::new(dims, data_type);
    let mut bytes = header.to_string().into_bytes();
    bytes.extend_from_slice(&[FORM_FEED, FORM_FEED]);

    for &s in samples {
        match data_type {
            DataType::Byte => bytes.push(s as u8),
            DataType::Short => bytes.extend_from_slice(&s.to_le_bytes()),
        }
    }
    bytes
}
