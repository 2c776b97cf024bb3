/*
This file is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT

NOTE: Structures and functions for handling the Shapefile attribute table info
contained with the associated .dbf file. The decoder only needs rows of
strings, so every field value is kept as trimmed text.
*/
use super::error::{Result, ShapefileError};
use crate::io_utils::{ByteOrderReader, Endianness};
use chrono::NaiveDate;
use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::prelude::*;

/// Anything that can supply attribute rows for record numbers. Row 0 is the
/// field-name row, so `row_count()` is one more than the number of features
/// it can describe.
pub trait AttributeSource {
    fn field_names(&self) -> &[String];

    /// Number of rows, including the field-name row.
    fn row_count(&self) -> usize;

    /// Values for a 1-based record number, aligned with `field_names()`.
    fn values(&self, record_number: usize) -> Option<&[String]>;

    /// Whether the row for a record number carries a deletion flag. The row
    /// still occupies its position.
    fn is_deleted(&self, _record_number: usize) -> bool {
        false
    }

    /// Joins the field names with a record's values.
    fn row(&self, record_number: usize) -> Option<AttributeRow> {
        let values = self.values(record_number)?;
        Some(AttributeRow::new(
            self.field_names()
                .iter()
                .cloned()
                .zip(values.iter().cloned())
                .collect(),
        ))
    }
}

/// Field values of one feature, keyed by field name in table order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributeRow {
    fields: Vec<(String, String)>,
}

impl AttributeRow {
    pub fn new(fields: Vec<(String, String)>) -> AttributeRow {
        AttributeRow { fields: fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for AttributeRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Default, Clone)]
pub struct AttributeHeader {
    pub version: u8,
    pub last_update: Option<NaiveDate>,
    pub num_records: u32,
    pub bytes_in_header: u16,
    pub bytes_in_record: u16,
}

#[derive(Debug, Default, Clone)]
pub struct AttributeField {
    pub name: String,
    pub field_type: char,
    pub field_length: u8,
    pub decimal_count: u8,
}

/// An attribute table held in memory as rows of strings, the first row
/// being the field names.
#[derive(Debug, Default, Clone)]
pub struct AttributeTable {
    pub header: AttributeHeader,
    pub fields: Vec<AttributeField>,
    rows: Vec<Vec<String>>,
    deleted: Vec<bool>,
}

impl AttributeTable {
    /// Builds a table from an already-decoded row sequence.
    pub fn from_rows(rows: Vec<Vec<String>>) -> AttributeTable {
        let fields = rows
            .first()
            .map(|names| {
                names
                    .iter()
                    .map(|n| AttributeField {
                        name: n.clone(),
                        field_type: 'C',
                        ..Default::default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        AttributeTable {
            header: AttributeHeader {
                num_records: rows.len().saturating_sub(1) as u32,
                ..Default::default()
            },
            fields: fields,
            deleted: vec![false; rows.len()],
            rows: rows,
        }
    }

    /// Reads a dBASE table. Rows flagged as deleted keep their position so
    /// that row k still belongs to record k.
    pub fn read_dbf<R: Read + Seek>(reader: R) -> Result<AttributeTable> {
        let mut bor = ByteOrderReader::new(reader)?;
        let mut table = AttributeTable::default();
        table.header = read_dbf_header(&mut bor)?;
        table.fields = read_dbf_fields(&mut bor)?;

        let names = table.fields.iter().map(|f| f.name.clone()).collect();
        table.rows.push(names);
        table.deleted.push(false);

        if table.header.bytes_in_header > 0 {
            bor.seek(table.header.bytes_in_header as usize)?;
        }

        let mut num_deleted = 0;
        for i in 0..table.header.num_records {
            let flag = bor.read_u8().map_err(|e| dbf_read_error(e, i))?;
            let mut values = Vec::with_capacity(table.fields.len());
            for field in &table.fields {
                let mut bytes = vec![0u8; field.field_length as usize];
                bor.read_exact(&mut bytes)
                    .map_err(|e| dbf_read_error(e, i))?;
                values.push(field_value(&bytes));
            }
            let deleted = flag == 0x2a;
            if deleted {
                num_deleted += 1;
            }
            table.rows.push(values);
            table.deleted.push(deleted);
        }
        debug!(
            "Read {} attribute records ({} flagged deleted) with {} fields",
            table.rows.len() - 1,
            num_deleted,
            table.fields.len()
        );
        Ok(table)
    }

    pub fn get_field_num(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl AttributeSource for AttributeTable {
    fn field_names(&self) -> &[String] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn values(&self, record_number: usize) -> Option<&[String]> {
        if record_number == 0 {
            return None;
        }
        self.rows.get(record_number).map(|r| r.as_slice())
    }

    fn is_deleted(&self, record_number: usize) -> bool {
        self.deleted.get(record_number).copied().unwrap_or(false)
    }
}

fn read_dbf_header<R: Read + Seek>(bor: &mut ByteOrderReader<R>) -> Result<AttributeHeader> {
    let mut header = AttributeHeader::default();
    header.version = bor.read_u8()?;
    let year = 1900i32 + bor.read_u8()? as i32;
    let month = bor.read_u8()? as u32;
    let day = bor.read_u8()? as u32;
    header.last_update = NaiveDate::from_ymd_opt(year, month, day);
    header.num_records = bor.read_u32(Endianness::LittleEndian)?;
    header.bytes_in_header = bor.read_u16(Endianness::LittleEndian)?;
    header.bytes_in_record = bor.read_u16(Endianness::LittleEndian)?;
    // reserved, transaction, encryption, multi-user, mdx and language bytes
    bor.seek(32)?;
    Ok(header)
}

fn read_dbf_fields<R: Read + Seek>(bor: &mut ByteOrderReader<R>) -> Result<Vec<AttributeField>> {
    let mut fields = vec![];
    loop {
        // Valid .dbf files end the field descriptor array with 0x0d.
        match bor.peek_u8() {
            Ok(0x0d) => {
                bor.inc_pos(1)?;
                break;
            }
            Ok(_) => {}
            Err(_) => {
                return Err(ShapefileError::InvalidAttributes(
                    "field descriptor array is not terminated".to_string(),
                ))
            }
        }
        let start = bor.pos();
        let name = bor.read_utf8(11)?.replace(char::from(0), "").trim().to_string();
        let field_type = char::from(bor.read_u8()?);
        bor.inc_pos(4)?;
        let field_length = bor.read_u8()?;
        let decimal_count = bor.read_u8()?;
        bor.seek(start + 32)?;
        fields.push(AttributeField {
            name: name,
            field_type: field_type,
            field_length: field_length,
            decimal_count: decimal_count,
        });
    }
    Ok(fields)
}

fn dbf_read_error(err: std::io::Error, record: u32) -> ShapefileError {
    ShapefileError::InvalidAttributes(format!("record {} is incomplete: {}", record + 1, err))
}

/// A value whose first byte is NUL is empty; anything else is trimmed.
fn field_value(bytes: &[u8]) -> String {
    if bytes.first() == Some(&0u8) {
        return String::new();
    }
    String::from_utf8_lossy(bytes).trim().to_string()
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    /// Builds a dBASE III table of character fields. Each record is a
    /// deletion flag and its values.
    pub(crate) fn dbf_bytes(fields: &[(&str, u8)], records: &[(bool, Vec<&str>)]) -> Vec<u8> {
        let header_len = 32 + 32 * fields.len() + 1;
        let record_len: usize = 1 + fields.iter().map(|f| f.1 as usize).sum::<usize>();
        let mut buf = vec![3u8, 124, 10, 18];
        buf.write_u32::<LittleEndian>(records.len() as u32).unwrap();
        buf.write_u16::<LittleEndian>(header_len as u16).unwrap();
        buf.write_u16::<LittleEndian>(record_len as u16).unwrap();
        buf.extend_from_slice(&[0u8; 20]);
        for (name, len) in fields {
            let mut n = name.as_bytes().to_vec();
            n.resize(11, 0);
            buf.extend_from_slice(&n);
            buf.push(b'C');
            buf.extend_from_slice(&[0u8; 4]);
            buf.push(*len);
            buf.push(0);
            buf.extend_from_slice(&[0u8; 14]);
        }
        buf.push(0x0d);
        for (deleted, values) in records {
            buf.push(if *deleted { b'*' } else { b' ' });
            for (value, (_, len)) in values.iter().zip(fields.iter()) {
                let mut v = value.as_bytes().to_vec();
                v.resize(*len as usize, b' ');
                buf.extend_from_slice(&v);
            }
        }
        buf.push(0x1a);
        buf
    }

    #[test]
    fn test_read_dbf() {
        let bytes = dbf_bytes(
            &[("NAME", 10), ("CODE", 4)],
            &[(false, vec!["Ontario", "ON"]), (false, vec!["Quebec", "QC"])],
        );
        let table = AttributeTable::read_dbf(Cursor::new(bytes)).unwrap();
        assert_eq!(table.header.num_records, 2);
        assert_eq!(
            table.header.last_update,
            NaiveDate::from_ymd_opt(2024, 10, 18)
        );
        assert_eq!(table.field_names(), &["NAME".to_string(), "CODE".to_string()]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.get_field_num("CODE"), Some(1));
        let row = table.row(2).unwrap();
        assert_eq!(row.get("NAME"), Some("Quebec"));
        assert_eq!(row.get("CODE"), Some("QC"));
        assert!(table.row(0).is_none());
        assert!(table.row(3).is_none());
    }

    #[test]
    fn test_deleted_rows() {
        let records = [(true, vec!["gone"]), (false, vec!["kept"])];
        let bytes = dbf_bytes(&[("NAME", 6)], &records);
        let table = AttributeTable::read_dbf(Cursor::new(bytes)).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.row(1).unwrap().get("NAME"), Some("gone"));
        assert!(table.is_deleted(1));
        assert_eq!(table.row(2).unwrap().get("NAME"), Some("kept"));
        assert!(!table.is_deleted(2));
        assert!(!table.is_deleted(3));
    }

    #[test]
    fn test_nul_values_are_empty() {
        assert_eq!(field_value(&[0u8, b'a', b'b']), "");
        assert_eq!(field_value(b"  padded  "), "padded");
    }

    #[test]
    fn test_unterminated_descriptors() {
        let mut bytes = dbf_bytes(&[("NAME", 6)], &[]);
        // drop the terminator and the end-of-file marker
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            AttributeTable::read_dbf(Cursor::new(bytes)),
            Err(ShapefileError::InvalidAttributes(_))
        ));
    }

    #[test]
    fn test_from_rows() {
        let table = AttributeTable::from_rows(vec![
            vec!["ID".to_string(), "LABEL".to_string()],
            vec!["1".to_string(), "first".to_string()],
        ]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.header.num_records, 1);
        let row = table.row(1).unwrap();
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![("ID", "1"), ("LABEL", "first")]);
        assert_eq!(row.len(), 2);
    }
}
