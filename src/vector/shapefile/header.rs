/*
This file is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT

Notes: The 100-byte main file header. Only the file code and the file length
are big-endian; everything from the version onward is little-endian.
*/
use super::error::{Result, ShapefileError};
use super::geometry::{shape_type_name, ShapeType};
use crate::io_utils::{ByteOrderReader, Endianness};
use crate::structures::BoundingBox;
use std::fmt;
use std::io::prelude::*;

pub const FILE_CODE: i32 = 9994;
pub const HEADER_LENGTH: usize = 100;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShapefileHeader {
    pub file_code: i32,   // BigEndian; value is 9994
    pub file_length: i32, // BigEndian; in 16-bit words
    pub version: i32,     // LittleEndian
    pub shape_type: i32,  // LittleEndian
    pub bounding_box: BoundingBox,
    pub z_min: f64, // LittleEndian; meaningful only for Z types
    pub z_max: f64,
    pub m_min: f64, // LittleEndian; meaningful only for Z and M types
    pub m_max: f64,
}

impl ShapefileHeader {
    /// Reads the header from the start of the stream and leaves the cursor at
    /// the first record.
    pub fn read<R: Read + Seek>(bor: &mut ByteOrderReader<R>) -> Result<ShapefileHeader> {
        let mut header = ShapefileHeader::default();
        bor.seek(0)?;
        header.file_code = read_i32(bor, Endianness::BigEndian)?;
        if header.file_code != FILE_CODE {
            return Err(ShapefileError::InvalidFormat {
                found: header.file_code,
            });
        }
        // five unused big-endian integers
        bor.seek(24)?;
        header.file_length = read_i32(bor, Endianness::BigEndian)?;

        header.version = read_i32(bor, Endianness::LittleEndian)?;
        header.shape_type = read_i32(bor, Endianness::LittleEndian)?;

        let x_min = read_f64(bor)?;
        let y_min = read_f64(bor)?;
        let x_max = read_f64(bor)?;
        let y_max = read_f64(bor)?;
        header.bounding_box = BoundingBox {
            min_x: x_min,
            min_y: y_min,
            max_x: x_max,
            max_y: y_max,
        };

        // The Z and M slots exist whatever the shape type.
        header.z_min = read_f64(bor)?;
        header.z_max = read_f64(bor)?;
        header.m_min = read_f64(bor)?;
        header.m_max = read_f64(bor)?;

        bor.seek(HEADER_LENGTH)?;
        Ok(header)
    }

    pub fn get_shape_type(&self) -> Option<ShapeType> {
        ShapeType::from_int(self.shape_type)
    }

    pub fn z_range(&self) -> Option<(f64, f64)> {
        match self.get_shape_type() {
            Some(st) if st.has_z() => Some((self.z_min, self.z_max)),
            _ => None,
        }
    }

    pub fn m_range(&self) -> Option<(f64, f64)> {
        match self.get_shape_type() {
            Some(st) if st.may_have_m() => Some((self.m_min, self.m_max)),
            _ => None,
        }
    }
}

fn read_i32<R: Read + Seek>(bor: &mut ByteOrderReader<R>, byte_order: Endianness) -> Result<i32> {
    let offset = bor.pos();
    bor.read_i32(byte_order)
        .map_err(|e| ShapefileError::from_read(e, offset))
}

fn read_f64<R: Read + Seek>(bor: &mut ByteOrderReader<R>) -> Result<f64> {
    let offset = bor.pos();
    bor.read_f64(Endianness::LittleEndian)
        .map_err(|e| ShapefileError::from_read(e, offset))
}

impl fmt::Display for ShapefileHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = format!(
            "file_code: {}
file_length: {}
version: {}
shape_type: {} ({})
x_min: {}
x_max: {}
y_min: {}
y_max: {}
z_min: {}
z_max: {}
m_min: {}
m_max: {}",
            self.file_code,
            self.file_length,
            self.version,
            self.shape_type,
            shape_type_name(self.shape_type),
            self.bounding_box.min_x,
            self.bounding_box.max_x,
            self.bounding_box.min_y,
            self.bounding_box.max_y,
            self.z_min,
            self.z_max,
            self.m_min,
            self.m_max
        );
        write!(f, "{}", s)
    }
}
