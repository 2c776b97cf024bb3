/*
This code is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT

Notes: Shapefiles mix big-endian record headers with little-endian payloads,
so every numeric read names its byte order explicitly rather than relying on
reader-wide state.
*/
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::prelude::*;
use std::io::{Result, SeekFrom};

pub struct ByteOrderReader<R: Read + Seek> {
    reader: R,
    pos: usize,
    len: usize,
}

impl<R: Read + Seek> ByteOrderReader<R> {
    pub fn new(mut reader: R) -> Result<ByteOrderReader<R>> {
        let len = reader.seek(SeekFrom::End(0))? as usize;
        reader.seek(SeekFrom::Start(0))?;
        Ok(ByteOrderReader {
            reader: reader,
            pos: 0usize,
            len: len,
        })
    }

    pub fn seek(&mut self, position: usize) -> Result<()> {
        self.pos = position;
        self.reader.seek(SeekFrom::Start(self.pos as u64))?;
        Ok(())
    }

    pub fn inc_pos(&mut self, skip: usize) -> Result<()> {
        let pos = self.pos + skip;
        self.seek(pos)
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of bytes between the cursor and the end of the stream.
    pub fn remaining(&self) -> usize {
        self.len.saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn read_utf8(&mut self, length: usize) -> Result<String> {
        let mut bytes = vec![0u8; length];
        self.reader.read_exact(&mut bytes)?;
        self.pos += length;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf)?;
        self.pos += buf.len();
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        // There's really no need for endian issues when reading single bytes.
        let val = self.reader.read_u8()?;
        self.pos += 1;
        Ok(val)
    }

    pub fn peek_u8(&mut self) -> Result<u8> {
        let val = self.reader.read_u8()?;
        self.reader.seek(SeekFrom::Start(self.pos as u64))?;
        Ok(val)
    }

    pub fn read_u16(&mut self, byte_order: Endianness) -> Result<u16> {
        let val = match byte_order {
            Endianness::LittleEndian => self.reader.read_u16::<LittleEndian>()?,
            Endianness::BigEndian => self.reader.read_u16::<BigEndian>()?,
        };
        self.pos += 2;
        Ok(val)
    }

    pub fn read_u32(&mut self, byte_order: Endianness) -> Result<u32> {
        let val = match byte_order {
            Endianness::LittleEndian => self.reader.read_u32::<LittleEndian>()?,
            Endianness::BigEndian => self.reader.read_u32::<BigEndian>()?,
        };
        self.pos += 4;
        Ok(val)
    }

    pub fn read_i32(&mut self, byte_order: Endianness) -> Result<i32> {
        let val = match byte_order {
            Endianness::LittleEndian => self.reader.read_i32::<LittleEndian>()?,
            Endianness::BigEndian => self.reader.read_i32::<BigEndian>()?,
        };
        self.pos += 4;
        Ok(val)
    }

    pub fn read_f64(&mut self, byte_order: Endianness) -> Result<f64> {
        let val = match byte_order {
            Endianness::LittleEndian => self.reader.read_f64::<LittleEndian>()?,
            Endianness::BigEndian => self.reader.read_f64::<BigEndian>()?,
        };
        self.pos += 8;
        Ok(val)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Endianness {
    LittleEndian,
    BigEndian,
}

impl Default for Endianness {
    fn default() -> Endianness {
        Endianness::LittleEndian
    }
}
