/*
This file is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT
*/
use crate::algorithms::{part_metrics, remove_consecutive_duplicates, PartMetrics};
use crate::structures::{BoundingBox, ShapePoint};
use log::warn;
use serde::Serialize;
use std::fmt;

/// One ring or segment of a PolyLine, Polygon, or MultiPatch.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Part {
    pub points: Vec<ShapePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measures: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<PartMetrics>,
}

impl Part {
    pub fn new(points: Vec<ShapePoint>) -> Part {
        Part {
            points: points,
            ..Default::default()
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Drops consecutive duplicate vertices, keeping any measure array in
    /// step. Returns the number of vertices removed.
    pub fn remove_duplicate_vertices(&mut self) -> usize {
        remove_consecutive_duplicates(&mut self.points, self.measures.as_mut())
    }

    /// Recomputes the part's metrics from its current vertices.
    pub fn update_metrics(&mut self) {
        self.metrics = part_metrics(&self.points);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MultiPointGeometry {
    pub bounding_box: BoundingBox,
    pub points: Vec<ShapePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measures: Option<Vec<f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MultiPartGeometry {
    pub bounding_box: BoundingBox,
    pub parts: Vec<Part>,
    /// MultiPatch part type codes, carried through uninterpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_types: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m_range: Option<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Null,
    Point(ShapePoint),
    MultiPoint(MultiPointGeometry),
    MultiPart(MultiPartGeometry),
}

/// A decoded record geometry tagged with the record's own shape type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    pub shape_type: ShapeType,
    pub geometry: Geometry,
}

impl Shape {
    pub fn null() -> Shape {
        Shape {
            shape_type: ShapeType::Null,
            geometry: Geometry::Null,
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match &self.geometry {
            Geometry::Null => None,
            Geometry::Point(p) => Some(BoundingBox::new(p.x, p.x, p.y, p.y)),
            Geometry::MultiPoint(mp) => Some(mp.bounding_box),
            Geometry::MultiPart(mp) => Some(mp.bounding_box),
        }
    }

    pub fn num_points(&self) -> usize {
        match &self.geometry {
            Geometry::Null => 0,
            Geometry::Point(_) => 1,
            Geometry::MultiPoint(mp) => mp.points.len(),
            Geometry::MultiPart(mp) => mp.parts.iter().map(|p| p.num_points()).sum(),
        }
    }

    pub fn parts(&self) -> &[Part] {
        match &self.geometry {
            Geometry::MultiPart(mp) => &mp.parts,
            _ => &[],
        }
    }

    /// Removes consecutive duplicate vertices from every part and, for the
    /// PolyLine and Polygon families, attaches per-part metrics computed
    /// from the filtered vertices.
    pub fn process_parts(&mut self) {
        let with_metrics = matches!(
            self.shape_type.family(),
            ShapeFamily::PolyLine | ShapeFamily::Polygon
        );
        if let Geometry::MultiPart(mp) = &mut self.geometry {
            for part in mp.parts.iter_mut() {
                part.remove_duplicate_vertices();
                if with_metrics {
                    part.update_metrics();
                    if part.metrics.is_none() {
                        warn!("{} part with no points has no metrics", self.shape_type);
                    }
                }
            }
        }
    }
}

/// The decoding routine a shape type dispatches to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeFamily {
    Null,
    Point,
    MultiPoint,
    PolyLine,
    Polygon,
    MultiPatch,
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeType {
    Null = 0,
    Point = 1,
    PolyLine = 3,
    Polygon = 5,
    MultiPoint = 8,
    PointZ = 11,
    PolyLineZ = 13,
    PolygonZ = 15,
    MultiPointZ = 18,
    PointM = 21,
    PolyLineM = 23,
    PolygonM = 25,
    MultiPointM = 28,
    MultiPatch = 31,
}

/// Shape type codes defined by the format, with their display names.
const SHAPE_TYPE_NAMES: [(i32, &str); 14] = [
    (0, "NullShape"),
    (1, "Point"),
    (3, "PolyLine"),
    (5, "Polygon"),
    (8, "MultiPoint"),
    (11, "PointZ"),
    (13, "PolyLineZ"),
    (15, "PolygonZ"),
    (18, "MultiPointZ"),
    (21, "PointM"),
    (23, "PolyLineM"),
    (25, "PolygonM"),
    (28, "MultiPointM"),
    (31, "MultiPatch"),
];

/// Display name for any shape type code, including ones with no decoder.
pub fn shape_type_name(code: i32) -> &'static str {
    SHAPE_TYPE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

impl ShapeType {
    /// Looks up the shape type for a code read from a file. `None` means no
    /// decoder is registered for the code.
    pub fn from_int(value: i32) -> Option<ShapeType> {
        match value {
            0 => Some(ShapeType::Null),
            1 => Some(ShapeType::Point),
            3 => Some(ShapeType::PolyLine),
            5 => Some(ShapeType::Polygon),
            8 => Some(ShapeType::MultiPoint),
            11 => Some(ShapeType::PointZ),
            13 => Some(ShapeType::PolyLineZ),
            15 => Some(ShapeType::PolygonZ),
            18 => Some(ShapeType::MultiPointZ),
            21 => Some(ShapeType::PointM),
            23 => Some(ShapeType::PolyLineM),
            25 => Some(ShapeType::PolygonM),
            28 => Some(ShapeType::MultiPointM),
            31 => Some(ShapeType::MultiPatch),
            _ => None,
        }
    }

    pub fn to_int(&self) -> i32 {
        *self as i32
    }

    pub fn name(&self) -> &'static str {
        shape_type_name(self.to_int())
    }

    pub fn family(&self) -> ShapeFamily {
        match self {
            ShapeType::Null => ShapeFamily::Null,
            ShapeType::Point | ShapeType::PointZ | ShapeType::PointM => ShapeFamily::Point,
            ShapeType::MultiPoint | ShapeType::MultiPointZ | ShapeType::MultiPointM => {
                ShapeFamily::MultiPoint
            }
            ShapeType::PolyLine | ShapeType::PolyLineZ | ShapeType::PolyLineM => {
                ShapeFamily::PolyLine
            }
            ShapeType::Polygon | ShapeType::PolygonZ | ShapeType::PolygonM => ShapeFamily::Polygon,
            ShapeType::MultiPatch => ShapeFamily::MultiPatch,
        }
    }

    /// Whether records of this type store a Z range and Z array.
    pub fn has_z(&self) -> bool {
        matches!(
            self,
            ShapeType::PointZ
                | ShapeType::PolyLineZ
                | ShapeType::PolygonZ
                | ShapeType::MultiPointZ
                | ShapeType::MultiPatch
        )
    }

    /// Whether records of this type may carry a trailing measure block. The
    /// block is only read when the record's content length leaves room for it.
    pub fn may_have_m(&self) -> bool {
        self.has_z()
            || matches!(
                self,
                ShapeType::PointM
                    | ShapeType::PolyLineM
                    | ShapeType::PolygonM
                    | ShapeType::MultiPointM
            )
    }
}

impl Default for ShapeType {
    fn default() -> ShapeType {
        ShapeType::Null
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
