/*
This file is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT

Notes: Decoding of a single record's content. The content length declared in
the record header is counted in 16-bit words and covers everything from the
shape type onward, so a RecordReader tallies the words it consumes and
compares the tally against the declared length once the shape is decoded.
Whether a trailing measure block is present is decided the same way.
*/
use super::error::{Result, ShapefileError};
use super::geometry::*;
use crate::algorithms::part_point_counts;
use crate::io_utils::{ByteOrderReader, Endianness};
use crate::structures::{BoundingBox, ShapePoint};
use std::io::prelude::*;

const INT_WORDS: i32 = 2;
const DOUBLE_WORDS: i32 = 4;

/// Decode state for one record, borrowed over the shared file cursor.
pub struct RecordReader<'a, R: Read + Seek> {
    bor: &'a mut ByteOrderReader<R>,
    record_number: i32,
    content_length: i32,
    words_read: i32,
    shape_type: i32,
}

impl<'a, R: Read + Seek> RecordReader<'a, R> {
    /// `content_length` is the record header's declared length in words.
    pub fn new(
        bor: &'a mut ByteOrderReader<R>,
        record_number: i32,
        content_length: i32,
    ) -> RecordReader<'a, R> {
        RecordReader {
            bor: bor,
            record_number: record_number,
            content_length: content_length,
            words_read: 0,
            shape_type: 0,
        }
    }

    pub fn words_read(&self) -> i32 {
        self.words_read
    }

    /// Decodes the record's shape and validates its content length.
    pub fn read_shape(mut self) -> Result<Shape> {
        let code = self.read_int()?;
        self.shape_type = code;
        let shape_type = match ShapeType::from_int(code) {
            Some(st) => st,
            None => {
                return Err(ShapefileError::UnsupportedShapeType {
                    code: code,
                    name: shape_type_name(code),
                })
            }
        };

        let geometry = match shape_type.family() {
            ShapeFamily::Null => Geometry::Null,
            ShapeFamily::Point => Geometry::Point(self.read_point(shape_type)?),
            ShapeFamily::MultiPoint => Geometry::MultiPoint(self.read_multi_point(shape_type)?),
            ShapeFamily::PolyLine | ShapeFamily::Polygon | ShapeFamily::MultiPatch => {
                Geometry::MultiPart(self.read_multi_part(shape_type)?)
            }
        };

        self.check_content_length()?;
        Ok(Shape {
            shape_type: shape_type,
            geometry: geometry,
        })
    }

    /// Compares the words consumed against the declared content length.
    pub fn check_content_length(&self) -> Result<()> {
        if self.words_read != self.content_length {
            return Err(self.corrupt(
                "content length",
                self.words_read as i64,
                self.content_length as i64,
            ));
        }
        Ok(())
    }

    fn has_remaining(&self) -> bool {
        self.words_read < self.content_length
    }

    fn corrupt(&self, what: &str, found: i64, expected: i64) -> ShapefileError {
        ShapefileError::CorruptRecord {
            what: what.to_string(),
            found: found,
            expected: expected,
            shape_type: self.shape_type,
            record_number: self.record_number,
        }
    }

    fn read_int(&mut self) -> Result<i32> {
        let offset = self.bor.pos();
        let val = self
            .bor
            .read_i32(Endianness::LittleEndian)
            .map_err(|e| ShapefileError::from_read(e, offset))?;
        self.words_read += INT_WORDS;
        Ok(val)
    }

    fn read_double(&mut self) -> Result<f64> {
        let offset = self.bor.pos();
        let val = self
            .bor
            .read_f64(Endianness::LittleEndian)
            .map_err(|e| ShapefileError::from_read(e, offset))?;
        self.words_read += DOUBLE_WORDS;
        Ok(val)
    }

    fn read_doubles(&mut self, n: usize) -> Result<Vec<f64>> {
        let mut vals = Vec::with_capacity(n);
        for _ in 0..n {
            vals.push(self.read_double()?);
        }
        Ok(vals)
    }

    fn read_bounding_box(&mut self) -> Result<BoundingBox> {
        Ok(BoundingBox {
            min_x: self.read_double()?,
            min_y: self.read_double()?,
            max_x: self.read_double()?,
            max_y: self.read_double()?,
        })
    }

    fn read_range(&mut self) -> Result<(f64, f64)> {
        Ok((self.read_double()?, self.read_double()?))
    }

    /// Reads a count field and checks that `count` items of
    /// `words_per_item` words each can fit in what is left of the record.
    fn read_count(&mut self, what: &str, words_per_item: i32) -> Result<usize> {
        let count = self.read_int()?;
        if count < 0 {
            return Err(self.corrupt(what, count as i64, 0));
        }
        let needed = self.words_read as i64 + count as i64 * words_per_item as i64;
        if needed > self.content_length as i64 {
            return Err(self.corrupt("content length", needed, self.content_length as i64));
        }
        Ok(count as usize)
    }

    fn read_point(&mut self, shape_type: ShapeType) -> Result<ShapePoint> {
        let mut point = ShapePoint::new(self.read_double()?, self.read_double()?);
        if shape_type.has_z() {
            point.z = Some(self.read_double()?);
        }
        if shape_type.may_have_m() && self.has_remaining() {
            point.m = Some(self.read_double()?);
        }
        Ok(point)
    }

    fn read_multi_point(&mut self, shape_type: ShapeType) -> Result<MultiPointGeometry> {
        let bounding_box = self.read_bounding_box()?;
        let num_points = self.read_count("number of points", 2 * DOUBLE_WORDS)?;
        let mut points = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            points.push(ShapePoint::new(self.read_double()?, self.read_double()?));
        }

        let mut z_range = None;
        if shape_type.has_z() {
            z_range = Some(self.read_range()?);
            for point in points.iter_mut() {
                point.z = Some(self.read_double()?);
            }
        }

        let mut m_range = None;
        let mut measures = None;
        if shape_type.may_have_m() && self.has_remaining() {
            m_range = Some(self.read_range()?);
            measures = Some(self.read_doubles(num_points)?);
        }

        Ok(MultiPointGeometry {
            bounding_box: bounding_box,
            points: points,
            z_range: z_range,
            m_range: m_range,
            measures: measures,
        })
    }

    fn read_multi_part(&mut self, shape_type: ShapeType) -> Result<MultiPartGeometry> {
        let bounding_box = self.read_bounding_box()?;
        let num_parts = self.read_count("number of parts", INT_WORDS)?;
        let num_points = self.read_int()?;
        if num_points < 0 {
            return Err(self.corrupt("number of points", num_points as i64, 0));
        }

        let mut offsets = Vec::with_capacity(num_parts);
        for _ in 0..num_parts {
            offsets.push(self.read_int()?);
        }
        let counts = part_point_counts(&offsets, num_points);
        let mut total = 0i64;
        for (i, &count) in counts.iter().enumerate() {
            if count < 0 {
                return Err(self.corrupt(&format!("point count in part {}", i), count, 0));
            }
            total += count;
        }
        if total != num_points as i64 {
            return Err(self.corrupt("total point count", total, num_points as i64));
        }
        let needed = self.words_read as i64 + num_points as i64 * 2 * DOUBLE_WORDS as i64;
        if needed > self.content_length as i64 {
            return Err(self.corrupt("content length", needed, self.content_length as i64));
        }

        let part_types = if shape_type == ShapeType::MultiPatch {
            let mut types = Vec::with_capacity(num_parts);
            for _ in 0..num_parts {
                types.push(self.read_int()?);
            }
            Some(types)
        } else {
            None
        };

        let mut parts = Vec::with_capacity(num_parts);
        for &count in counts.iter() {
            let mut points = Vec::with_capacity(count as usize);
            for _ in 0..count {
                points.push(ShapePoint::new(self.read_double()?, self.read_double()?));
            }
            parts.push(Part::new(points));
        }

        let mut z_range = None;
        if shape_type.has_z() {
            z_range = Some(self.read_range()?);
            for (i, &count) in counts.iter().enumerate() {
                let z_values = self.read_doubles(count as usize)?;
                let part = &mut parts[i];
                if z_values.len() != part.points.len() {
                    return Err(self.corrupt(
                        &format!("Z value count in part {}", i),
                        z_values.len() as i64,
                        part.points.len() as i64,
                    ));
                }
                for (point, z) in part.points.iter_mut().zip(z_values) {
                    point.z = Some(z);
                }
            }
        }

        let mut m_range = None;
        if shape_type.may_have_m() && self.has_remaining() {
            m_range = Some(self.read_range()?);
            for (i, &count) in counts.iter().enumerate() {
                let measures = self.read_doubles(count as usize)?;
                let part = &mut parts[i];
                if measures.len() != part.points.len() {
                    return Err(self.corrupt(
                        &format!("measure count in part {}", i),
                        measures.len() as i64,
                        part.points.len() as i64,
                    ));
                }
                part.measures = Some(measures);
            }
        }

        Ok(MultiPartGeometry {
            bounding_box: bounding_box,
            parts: parts,
            part_types: part_types,
            z_range: z_range,
            m_range: m_range,
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
    use std::io::Cursor;

    /// Little-endian record content, starting with the shape type.
    pub(crate) struct Content {
        pub(crate) bytes: Vec<u8>,
    }

    impl Content {
        pub(crate) fn new(shape_type: i32) -> Content {
            let mut c = Content { bytes: vec![] };
            c.int(shape_type);
            c
        }

        pub(crate) fn int(&mut self, v: i32) -> &mut Content {
            self.bytes.write_i32::<LittleEndian>(v).unwrap();
            self
        }

        pub(crate) fn double(&mut self, v: f64) -> &mut Content {
            self.bytes.write_f64::<LittleEndian>(v).unwrap();
            self
        }

        pub(crate) fn doubles(&mut self, vs: &[f64]) -> &mut Content {
            for v in vs {
                self.double(*v);
            }
            self
        }

        pub(crate) fn words(&self) -> i32 {
            self.bytes.len() as i32 / 2
        }

        /// The full record: big-endian record number and content length,
        /// then the content.
        pub(crate) fn record(&self, record_number: i32, content_length: i32) -> Vec<u8> {
            let mut buf = vec![];
            buf.write_i32::<BigEndian>(record_number).unwrap();
            buf.write_i32::<BigEndian>(content_length).unwrap();
            buf.extend_from_slice(&self.bytes);
            buf
        }
    }

    fn decode(content: &Content, content_length: i32) -> Result<Shape> {
        let mut bor = ByteOrderReader::new(Cursor::new(content.bytes.clone())).unwrap();
        RecordReader::new(&mut bor, 1, content_length).read_shape()
    }

    fn square_polygon(shape_type: i32) -> Content {
        let mut c = Content::new(shape_type);
        c.doubles(&[0.0, 0.0, 1.0, 1.0]).int(1).int(5).int(0);
        c.doubles(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        c
    }

    #[test]
    fn test_null_record() {
        let c = Content::new(0);
        assert_eq!(c.words(), 2);
        assert_eq!(decode(&c, 2).unwrap(), Shape::null());
        assert!(matches!(
            decode(&c, 4),
            Err(ShapefileError::CorruptRecord { found: 2, expected: 4, .. })
        ));
    }

    #[test]
    fn test_point_record() {
        let mut c = Content::new(1);
        c.doubles(&[10.0, 20.0]);
        // the shape type word pair is part of the content
        assert_eq!(c.words(), 10);
        let shape = decode(&c, 10).unwrap();
        assert_eq!(shape.shape_type, ShapeType::Point);
        assert_eq!(shape.geometry, Geometry::Point(ShapePoint::new(10.0, 20.0)));
    }

    #[test]
    fn test_content_length_mismatch_names_both_values() {
        let mut c = Content::new(1);
        c.doubles(&[10.0, 20.0]);
        match decode(&c, 8) {
            Err(ShapefileError::CorruptRecord {
                what,
                found,
                expected,
                shape_type,
                record_number,
            }) => {
                assert_eq!(what, "content length");
                assert_eq!((found, expected), (10, 8));
                assert_eq!((shape_type, record_number), (1, 1));
            }
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn test_point_z_measure_is_length_driven() {
        let mut c = Content::new(11);
        c.doubles(&[1.0, 2.0, 3.0]);
        let shape = decode(&c, 14).unwrap();
        assert_eq!(
            shape.geometry,
            Geometry::Point(ShapePoint::new(1.0, 2.0).with_z(3.0))
        );

        c.double(4.0);
        let shape = decode(&c, 18).unwrap();
        assert_eq!(
            shape.geometry,
            Geometry::Point(ShapePoint::new(1.0, 2.0).with_z(3.0).with_m(4.0))
        );
    }

    #[test]
    fn test_point_m() {
        let mut c = Content::new(21);
        c.doubles(&[1.0, 2.0, 7.5]);
        let shape = decode(&c, 14).unwrap();
        assert_eq!(
            shape.geometry,
            Geometry::Point(ShapePoint::new(1.0, 2.0).with_m(7.5))
        );
    }

    #[test]
    fn test_multi_point_z_with_measures() {
        let mut c = Content::new(18);
        c.doubles(&[0.0, 0.0, 2.0, 2.0]).int(2);
        c.doubles(&[0.0, 0.0, 2.0, 2.0]);
        c.doubles(&[5.0, 6.0]).doubles(&[5.0, 6.0]);
        c.doubles(&[1.0, 9.0]).doubles(&[1.0, 9.0]);
        let shape = decode(&c, c.words()).unwrap();
        match shape.geometry {
            Geometry::MultiPoint(mp) => {
                assert_eq!(mp.bounding_box, BoundingBox::new(0.0, 2.0, 0.0, 2.0));
                assert_eq!(
                    mp.points,
                    vec![
                        ShapePoint::new(0.0, 0.0).with_z(5.0),
                        ShapePoint::new(2.0, 2.0).with_z(6.0)
                    ]
                );
                assert_eq!(mp.z_range, Some((5.0, 6.0)));
                assert_eq!(mp.m_range, Some((1.0, 9.0)));
                assert_eq!(mp.measures, Some(vec![1.0, 9.0]));
            }
            g => panic!("unexpected geometry {:?}", g),
        }
    }

    #[test]
    fn test_multi_point_m_without_measures() {
        let mut c = Content::new(28);
        c.doubles(&[3.0, 4.0, 3.0, 4.0]).int(1).doubles(&[3.0, 4.0]);
        let shape = decode(&c, c.words()).unwrap();
        match shape.geometry {
            Geometry::MultiPoint(mp) => {
                assert_eq!(mp.points.len(), 1);
                assert!(mp.m_range.is_none());
                assert!(mp.measures.is_none());
            }
            g => panic!("unexpected geometry {:?}", g),
        }
    }

    #[test]
    fn test_polygon_record() {
        let c = square_polygon(5);
        let shape = decode(&c, c.words()).unwrap();
        assert_eq!(shape.shape_type, ShapeType::Polygon);
        let parts = shape.parts();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].num_points(), 5);
        assert!(parts[0].metrics.is_none());
    }

    #[test]
    fn test_polyline_z_m_two_parts() {
        let mut c = Content::new(13);
        c.doubles(&[0.0, 0.0, 4.0, 4.0]).int(2).int(5).int(0).int(3);
        c.doubles(&[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
        c.doubles(&[3.0, 3.0, 4.0, 4.0]);
        c.doubles(&[10.0, 14.0]).doubles(&[10.0, 11.0, 12.0]).doubles(&[13.0, 14.0]);
        c.doubles(&[0.0, 4.0]).doubles(&[0.0, 1.0, 2.0]).doubles(&[3.0, 4.0]);
        let shape = decode(&c, c.words()).unwrap();
        match &shape.geometry {
            Geometry::MultiPart(mp) => {
                assert_eq!(mp.z_range, Some((10.0, 14.0)));
                assert_eq!(mp.m_range, Some((0.0, 4.0)));
                assert!(mp.part_types.is_none());
                assert_eq!(mp.parts[0].num_points(), 3);
                assert_eq!(mp.parts[1].num_points(), 2);
                assert_eq!(mp.parts[1].points[0], ShapePoint::new(3.0, 3.0).with_z(13.0));
                assert_eq!(mp.parts[0].measures, Some(vec![0.0, 1.0, 2.0]));
                assert_eq!(mp.parts[1].measures, Some(vec![3.0, 4.0]));
            }
            g => panic!("unexpected geometry {:?}", g),
        }
        assert_eq!(shape.num_points(), 5);
    }

    #[test]
    fn test_multipatch_part_types_and_z() {
        let mut c = Content::new(31);
        c.doubles(&[0.0, 0.0, 1.0, 1.0]).int(1).int(3).int(0).int(1);
        c.doubles(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        c.doubles(&[2.0, 2.0]).doubles(&[2.0, 2.0, 2.0]);
        let shape = decode(&c, c.words()).unwrap();
        match shape.geometry {
            Geometry::MultiPart(mp) => {
                assert_eq!(mp.part_types, Some(vec![1]));
                assert_eq!(mp.z_range, Some((2.0, 2.0)));
                assert!(mp.parts[0].points.iter().all(|p| p.z == Some(2.0)));
                assert!(mp.m_range.is_none());
            }
            g => panic!("unexpected geometry {:?}", g),
        }
    }

    #[test]
    fn test_offsets_past_point_total_are_corrupt() {
        let mut c = Content::new(3);
        c.doubles(&[0.0, 0.0, 1.0, 1.0]).int(2).int(2).int(0).int(5);
        c.doubles(&[0.0, 0.0, 1.0, 1.0]);
        match decode(&c, c.words()) {
            Err(ShapefileError::CorruptRecord {
                what,
                found,
                expected,
                ..
            }) => {
                assert_eq!(what, "point count in part 1");
                assert_eq!((found, expected), (-3, 0));
            }
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn test_point_count_larger_than_record() {
        let mut c = Content::new(8);
        c.doubles(&[0.0, 0.0, 1.0, 1.0]).int(1_000_000);
        assert!(matches!(
            decode(&c, c.words()),
            Err(ShapefileError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_unsupported_shape_type() {
        let c = Content::new(7);
        match decode(&c, 2) {
            Err(ShapefileError::UnsupportedShapeType { code, name }) => {
                assert_eq!(code, 7);
                assert_eq!(name, "Unknown");
            }
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn test_truncated_point() {
        let mut c = Content::new(1);
        c.double(10.0);
        c.bytes.extend_from_slice(&[0u8; 3]);
        assert!(matches!(
            decode(&c, 10),
            Err(ShapefileError::TruncatedStream { offset: 12 })
        ));
    }

    #[test]
    fn test_words_read_tally() {
        let c = square_polygon(5);
        let mut bor = ByteOrderReader::new(Cursor::new(c.bytes.clone())).unwrap();
        let mut rr = RecordReader::new(&mut bor, 3, c.words());
        assert_eq!(rr.words_read(), 0);
        rr.read_int().unwrap();
        rr.read_double().unwrap();
        assert_eq!(rr.words_read(), 6);
        assert!(rr.check_content_length().is_err());
    }
}
