use super::Point2D;
use serde::Serialize;
use std::fmt;

/// A decoded shapefile vertex. `z` is present for the Z variants and `m` for
/// point records that carry a trailing measure.
#[derive(Default, Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ShapePoint {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m: Option<f64>,
}

impl ShapePoint {
    pub fn new(x: f64, y: f64) -> ShapePoint {
        ShapePoint {
            x: x,
            y: y,
            z: None,
            m: None,
        }
    }

    pub fn with_z(mut self, z: f64) -> ShapePoint {
        self.z = Some(z);
        self
    }

    pub fn with_m(mut self, m: f64) -> ShapePoint {
        self.m = Some(m);
        self
    }

    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl fmt::Display for ShapePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x: {}, y: {}", self.x, self.y)?;
        if let Some(z) = self.z {
            write!(f, ", z: {}", z)?;
        }
        if let Some(m) = self.m {
            write!(f, ", m: {}", m)?;
        }
        write!(f, ")")
    }
}
