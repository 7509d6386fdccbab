use std::{
    error::Error,
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use byteorder::{LittleEndian, WriteBytesExt};
use nalgebra::Vector3;
use volcast_lib::volumetric::parse::{DataType, FldHeader, FORM_FEED};

use crate::{generators::SampleGenerator, order::LinearCoordIterator};

pub fn open_create_file<P>(path: P) -> Result<File, std::io::Error>
where
    P: AsRef<Path>,
{
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Write `.fld` volume: text header, two form feeds, samples in linear order.
/// Shorts are little-endian.
pub fn write_fld<W>(
    writer: &mut W,
    dims: Vector3<usize>,
    data_type: DataType,
    generator: &dyn SampleGenerator,
) -> Result<(), Box<dyn Error>>
where
    W: Write,
{
    let header = FldHeader::new(dims, data_type);
    writer.write_all(header.to_string().as_bytes())?;
    writer.write_all(&[FORM_FEED, FORM_FEED])?;

    for coords in LinearCoordIterator::from_dims(dims) {
        let sample = generator.sample_at(coords);
        match data_type {
            DataType::Byte => writer.write_u8(sample as u8)?,
            DataType::Short => writer.write_u16::<LittleEndian>(sample)?,
        }
    }

    writer.flush()?;
    Ok(())
}

pub fn write_fld_file<P>(
    path: P,
    dims: Vector3<usize>,
    data_type: DataType,
    generator: &dyn SampleGenerator,
) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
{
    let file = open_create_file(path)?;
    let mut writer = BufWriter::new(file);
    write_fld(&mut writer, dims, data_type, generator)
}

#[cfg(test)]
mod test {

    use nalgebra::vector;
    use volcast_lib::volumetric::Volume;

    use super::*;
    use crate::generators::{RampGenerator, SphereGenerator};

    #[test]
    fn written_file_loads() {
        let dims = vector![5, 4, 3];
        let gen = RampGenerator::new(dims, 1000);

        let mut bytes = vec![];
        write_fld(&mut bytes, dims, DataType::Short, &gen).unwrap();

        let volume = Volume::from_bytes(&bytes).unwrap();
        assert_eq!(volume.dims(), dims);
        assert_eq!(volume.get_voxel(4, 3, 0), 0.0);
        assert_eq!(volume.get_voxel(2, 1, 1), 500.0);
        assert_eq!(volume.get_voxel(0, 0, 2), 1000.0);
    }

    #[test]
    fn byte_samples() {
        let dims = vector![9, 9, 9];
        let gen = SphereGenerator::new(dims, 77);

        let mut bytes = vec![];
        write_fld(&mut bytes, dims, DataType::Byte, &gen).unwrap();

        let volume = Volume::from_bytes(&bytes).unwrap();
        assert_eq!(volume.get_voxel(4, 4, 4), 77.0);
        assert_eq!(volume.get_voxel(0, 0, 0), 0.0);
        assert_eq!(volume.maximum(), 77.0);
    }
}
