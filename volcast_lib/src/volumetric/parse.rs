//! Parser of AVS field files (`.fld`).
//!
//! Textual header of `key=value` lines terminated by a form feed, followed by
//! raw samples. Everything after `#` on a line is a comment, whitespace is
//! insignificant.
//!
//! ```text
//! # AVS field file
//! ndim=3
//! dim1=256
//! dim2=256
//! dim3=128
//! nspace=3
//! veclen=1
//! data=byte
//! field=uniform
//! \f\f<samples>
//! ```

use std::fmt;

use log::warn;
use nalgebra::{vector, Vector3};
use nom::{
    bytes::complete::{tag, take_till, take_till1},
    character::complete::digit1,
    combinator::{all_consuming, map_res, rest},
    multi::count,
    number::complete::le_u16,
    sequence::{separated_pair, terminated},
    IResult,
};

use crate::error::VolumeError;

pub const FORM_FEED: u8 = 0x0c;

/// Type of a single sample in the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 1 byte
    Byte,
    /// 2 bytes, little endian
    Short,
}

impl DataType {
    pub fn element_size(self) -> usize {
        match self {
            DataType::Byte => 1,
            DataType::Short => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Byte => "byte",
            DataType::Short => "short",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FldHeader {
    pub dims: Vector3<usize>,
    pub data_type: DataType,
}

impl Default for FldHeader {
    fn default() -> Self {
        FldHeader {
            dims: vector![0, 0, 0],
            data_type: DataType::Byte,
        }
    }
}

impl FldHeader {
    pub fn new(dims: Vector3<usize>, data_type: DataType) -> FldHeader {
        FldHeader { dims, data_type }
    }

    /// `None` if the dimensions overflow
    pub fn voxel_count(&self) -> Option<usize> {
        voxel_count(self.dims)
    }

    /// Expected payload length in bytes
    pub fn payload_size(&self) -> Option<usize> {
        self.voxel_count()?
            .checked_mul(self.data_type.element_size())
    }

    fn invalid_dimensions(&self) -> VolumeError {
        VolumeError::InvalidDimensions {
            x: self.dims.x,
            y: self.dims.y,
            z: self.dims.z,
        }
    }

    fn apply(&mut self, key: &[u8], value: &[u8]) {
        match key {
            b"ndim" => {
                if parse_number(value) != Some(3) {
                    warn!("Only 3D files are supported, got ndim={}", lossy(value));
                }
            }
            b"dim1" => self.set_dim(0, value),
            b"dim2" => self.set_dim(1, value),
            b"dim3" => self.set_dim(2, value),
            b"nspace" => {}
            b"veclen" => {
                if parse_number(value) != Some(1) {
                    warn!("Only scalar data are supported, got veclen={}", lossy(value));
                }
            }
            b"data" => match value {
                b"byte" => self.data_type = DataType::Byte,
                b"short" => self.data_type = DataType::Short,
                _ => warn!("Data type {} not recognized", lossy(value)),
            },
            b"field" => {
                if value != b"uniform" {
                    warn!("Only uniform fields are supported, got field={}", lossy(value));
                }
            }
            _ => warn!("Invalid AVS keyword {}", lossy(key)),
        }
    }

    fn set_dim(&mut self, axis: usize, value: &[u8]) {
        match parse_number(value) {
            Some(n) => self.dims[axis] = n,
            None => warn!("Invalid dim{} value {}", axis + 1, lossy(value)),
        }
    }
}

/// Header text, without the terminating form feeds
impl fmt::Display for FldHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# AVS field file")?;
        writeln!(f, "ndim=3")?;
        writeln!(f, "dim1={}", self.dims.x)?;
        writeln!(f, "dim2={}", self.dims.y)?;
        writeln!(f, "dim3={}", self.dims.z)?;
        writeln!(f, "nspace=3")?;
        writeln!(f, "veclen=1")?;
        writeln!(f, "data={}", self.data_type.name())?;
        writeln!(f, "field=uniform")
    }
}

/// Product of dimensions, `None` on overflow
pub fn voxel_count(dims: Vector3<usize>) -> Option<usize> {
    dims.x.checked_mul(dims.y)?.checked_mul(dims.z)
}

fn lossy(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn header_section(input: &[u8]) -> IResult<&[u8], &[u8]> {
    terminated(take_till(|c| c == FORM_FEED), tag(&[FORM_FEED][..]))(input)
}

fn key_value(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    separated_pair(take_till1(|c| c == b'='), tag("="), rest)(input)
}

fn number(input: &[u8]) -> IResult<&[u8], usize> {
    map_res(map_res(digit1, std::str::from_utf8), |s: &str| {
        s.parse::<usize>()
    })(input)
}

fn parse_number(value: &[u8]) -> Option<usize> {
    all_consuming(number)(value).ok().map(|(_, n)| n)
}

/// Strip comment and all whitespace
fn clean_line(line: &[u8]) -> Vec<u8> {
    let line = match line.iter().position(|&c| c == b'#') {
        Some(comment_start) => &line[..comment_start],
        None => line,
    };
    line.iter()
        .copied()
        .filter(|c| !c.is_ascii_whitespace())
        .collect()
}

/// Parse header, returns it together with the rest of input after the first form feed.
///
/// Problems inside the header are only logged.
pub fn parse_header(bytes: &[u8]) -> Result<(FldHeader, &[u8]), VolumeError> {
    let (payload, header_bytes) = header_section(bytes)
        .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| VolumeError::MissingHeaderTerminator)?;

    let mut header = FldHeader::default();

    for (line_idx, line) in header_bytes.split(|&c| c == b'\n').enumerate() {
        let line = clean_line(line);
        if line.is_empty() {
            continue;
        }

        match key_value(line.as_slice()) {
            Ok((_, (key, value))) => header.apply(key, value),
            Err(_) => warn!("Malformed header line {}: {}", line_idx + 1, lossy(&line)),
        }
    }

    Ok((header, payload))
}

/// Convert payload into samples.
///
/// `payload` starts right after the first form feed. A second form feed is
/// skipped if the payload is longer than expected.
pub fn parse_payload(header: &FldHeader, payload: &[u8]) -> Result<Vec<u16>, VolumeError> {
    let voxels = header
        .voxel_count()
        .ok_or_else(|| header.invalid_dimensions())?;
    let expected = header
        .payload_size()
        .ok_or_else(|| header.invalid_dimensions())?;

    let payload = match payload.split_first() {
        Some((&FORM_FEED, samples)) if payload.len() > expected => samples,
        _ => payload,
    };

    if payload.len() < expected {
        return Err(VolumeError::TruncatedPayload {
            expected,
            actual: payload.len(),
        });
    }

    if payload.len() > expected {
        warn!("Ignoring {} trailing bytes", payload.len() - expected);
    }

    let payload = &payload[..expected];

    let samples = match header.data_type {
        DataType::Byte => payload.iter().map(|&b| u16::from(b)).collect(),
        DataType::Short => {
            let (_, samples) = count(le_u16, voxels)(payload).map_err(
                |_: nom::Err<nom::error::Error<&[u8]>>| VolumeError::TruncatedPayload {
                    expected,
                    actual: payload.len(),
                },
            )?;
            samples
        }
    };

    Ok(samples)
}

/// Parse whole `.fld` file
pub fn parse_fld(bytes: &[u8]) -> Result<(FldHeader, Vec<u16>), VolumeError> {
    let (header, payload) = parse_header(bytes)?;

    if header.dims.iter().any(|&d| d == 0) || header.payload_size().is_none() {
        return Err(header.invalid_dimensions());
    }

    let samples = parse_payload(&header, payload)?;
    Ok((header, samples))
}
