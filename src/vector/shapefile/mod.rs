/*
This code is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT

Notes: The logic behind reading the ESRI Shapefile format. Records are
decoded strictly in sequence, since each record's position follows from the
content length of the one before it.
*/
pub mod attributes;
pub mod error;
pub mod geometry;
pub mod header;
pub mod record;

pub use self::attributes::{AttributeField, AttributeHeader, AttributeRow, AttributeSource, AttributeTable};
pub use self::error::{Result, ShapefileError};
pub use self::geometry::*;
pub use self::header::ShapefileHeader;
pub use self::record::RecordReader;

use crate::configs::Configs;
use crate::io_utils::{ByteOrderReader, Endianness};
use crate::structures::{BoundingBox, Point2D};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::io::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// One decoded geometry joined with its attribute row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub record_number: i32,
    pub shape: Shape,
    pub attributes: AttributeRow,
    /// Set when the attribute row carries a dBASE deletion flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

/// Everything a parse produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    /// The header's overall shape type code.
    pub shape_type: i32,
    pub bounding_box: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m_range: Option<(f64, f64)>,
    pub features: Vec<Feature>,
}

impl ParseResult {
    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    /// Midpoint of the dataset bounding box.
    pub fn header_bounds_center(&self) -> Point2D {
        self.bounding_box.center()
    }

    /// Comma-delimited dump of the feature attributes: a line of field
    /// names taken from the first feature, then one line per feature, with
    /// CRLF line endings.
    pub fn dump_feature_info(&self) -> String {
        let fields: Vec<&str> = match self.features.first() {
            Some(f) => f.attributes.field_names().collect(),
            None => return String::new(),
        };
        let mut rows = Vec::with_capacity(self.features.len() + 1);
        rows.push(fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(","));
        for feature in &self.features {
            let cols: Vec<String> = fields
                .iter()
                .map(|f| csv_field(feature.attributes.get(f).unwrap_or("")))
                .collect();
            rows.push(cols.join(","));
        }
        rows.join("\r\n")
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(|c| c == ',' || c == '"' || c == '\r' || c == '\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Entry points for a parse session. Both streams are read to the end and
/// released before a result is returned.
pub struct ShapeFile;

impl ShapeFile {
    /// Reads a .shp file and its sibling .dbf table using default settings.
    pub fn read<P: AsRef<Path>>(file_name: P) -> Result<ParseResult> {
        ShapeFile::read_with_configs(file_name, &Configs::default())
    }

    pub fn read_with_configs<P: AsRef<Path>>(file_name: P, configs: &Configs) -> Result<ParseResult> {
        let file_name = file_name.as_ref();
        let buffer = fs::read(file_name)?;
        let mut bor = ByteOrderReader::new(Cursor::new(buffer))?;
        // a bad file code aborts before the table is touched
        let header = ShapefileHeader::read(&mut bor)?;

        let dbf_file = file_name.with_extension("dbf");
        let dbf_buffer = fs::read(&dbf_file)?;
        let table = AttributeTable::read_dbf(Cursor::new(dbf_buffer))?;

        decode_records(bor, header, &table, configs)
    }

    /// Parses a geometry stream against any attribute source.
    pub fn parse<R: Read + Seek, A: AttributeSource>(
        geometry: R,
        attributes: &A,
        configs: &Configs,
    ) -> Result<ParseResult> {
        let mut bor = ByteOrderReader::new(geometry)?;
        let header = ShapefileHeader::read(&mut bor)?;
        decode_records(bor, header, attributes, configs)
    }
}

fn decode_records<R: Read + Seek, A: AttributeSource>(
    bor: ByteOrderReader<R>,
    header: ShapefileHeader,
    attributes: &A,
    configs: &Configs,
) -> Result<ParseResult> {
    info!(
        "Reading {} records from a {}-byte shapefile",
        shape_type_name(header.shape_type),
        bor.len()
    );
    let mut assembler = RecordAssembler::new(bor, attributes, configs, header.shape_type);
    let mut features = vec![];
    while let Some(feature) = assembler.next_feature()? {
        features.push(feature);
    }
    info!("Decoded {} features", features.len());

    Ok(ParseResult {
        shape_type: header.shape_type,
        bounding_box: header.bounding_box,
        z_range: header.z_range(),
        m_range: header.m_range(),
        features: features,
    })
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum AssemblerState {
    AwaitingRecord,
    Done,
}

/// Walks the records that follow the header, pairing each decoded shape
/// with its attribute row.
struct RecordAssembler<'a, R: Read + Seek, A: AttributeSource> {
    bor: ByteOrderReader<R>,
    attributes: &'a A,
    configs: &'a Configs,
    file_shape_type: i32,
    last_record_number: i32,
    state: AssemblerState,
}

impl<'a, R: Read + Seek, A: AttributeSource> RecordAssembler<'a, R, A> {
    fn new(
        bor: ByteOrderReader<R>,
        attributes: &'a A,
        configs: &'a Configs,
        file_shape_type: i32,
    ) -> RecordAssembler<'a, R, A> {
        RecordAssembler {
            bor: bor,
            attributes: attributes,
            configs: configs,
            file_shape_type: file_shape_type,
            last_record_number: 0,
            state: AssemblerState::AwaitingRecord,
        }
    }

    /// Returns the next feature, or `None` once the stream ends cleanly at a
    /// record boundary.
    fn next_feature(&mut self) -> Result<Option<Feature>> {
        if self.state == AssemblerState::Done {
            return Ok(None);
        }
        if self.bor.remaining() == 0 {
            self.state = AssemblerState::Done;
            return Ok(None);
        }

        let record_number = self.read_header_int()?;
        let content_length = self.read_header_int()?;
        self.check_record_number(record_number)?;

        let mut shape = RecordReader::new(&mut self.bor, record_number, content_length).read_shape()?;
        shape.process_parts();

        let row = if record_number > 0 {
            self.attributes.row(record_number as usize)
        } else {
            None
        };
        let attributes = match row {
            Some(row) => row,
            None => {
                return Err(ShapefileError::MissingAttributes {
                    record_number: record_number,
                    rows: self.attributes.row_count(),
                })
            }
        };

        let deleted = self.attributes.is_deleted(record_number as usize);
        if deleted {
            debug!("Record {} has a deleted attribute row", record_number);
        }
        debug!(
            "Record {}: {} with {} points",
            record_number,
            shape.shape_type,
            shape.num_points()
        );
        self.last_record_number = record_number;
        Ok(Some(Feature {
            record_number: record_number,
            shape: shape,
            attributes: attributes,
            deleted: deleted,
        }))
    }

    fn read_header_int(&mut self) -> Result<i32> {
        let offset = self.bor.pos();
        self.bor
            .read_i32(Endianness::BigEndian)
            .map_err(|e| ShapefileError::from_read(e, offset))
    }

    fn check_record_number(&self, record_number: i32) -> Result<()> {
        let expected = self.last_record_number + 1;
        if record_number == expected {
            return Ok(());
        }
        if self.configs.strict_record_numbers {
            return Err(ShapefileError::CorruptRecord {
                what: "record number".to_string(),
                found: record_number as i64,
                expected: expected as i64,
                shape_type: self.file_shape_type,
                record_number: record_number,
            });
        }
        warn!(
            "Record number {} follows record {}; expected {}",
            record_number, self.last_record_number, expected
        );
        Ok(())
    }
}
