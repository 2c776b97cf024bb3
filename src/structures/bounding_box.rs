use super::Point2D;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> BoundingBox {
        let (x1, x2) = if min_x < max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let (y1, y2) = if min_y < max_y {
            (min_y, max_y)
        } else {
            (max_y, min_y)
        };
        BoundingBox {
            min_x: x1,
            min_y: y1,
            max_x: x2,
            max_y: y2,
        }
    }

    /// An inverted box that any call to `expand_to_point` will collapse onto
    /// the first point added.
    pub fn empty() -> BoundingBox {
        BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn get_height(&self) -> f64 {
        (self.max_y - self.min_y).abs()
    }

    pub fn get_width(&self) -> f64 {
        (self.max_x - self.min_x).abs()
    }

    /// Midpoint of the box. This is not the area-weighted centroid.
    pub fn center(&self) -> Point2D {
        Point2D::midpoint(
            &Point2D::new(self.min_x, self.min_y),
            &Point2D::new(self.max_x, self.max_y),
        )
    }

    pub fn expand_to_point(&mut self, x: f64, y: f64) {
        if x < self.min_x {
            self.min_x = x;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        }
        if y > self.max_y {
            self.max_y = y;
        }
    }
}

impl Default for BoundingBox {
    fn default() -> BoundingBox {
        BoundingBox {
            min_x: 0f64,
            min_y: 0f64,
            max_x: 0f64,
            max_y: 0f64,
        }
    }
}
