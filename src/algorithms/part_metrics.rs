use crate::structures::{BoundingBox, Point2D, ShapePoint};
use serde::Serialize;

/// Derived measurements for one ring or segment of a PolyLine or Polygon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PartMetrics {
    pub bounding_box: BoundingBox,
    /// Magnitude of the shoelace area; winding direction is discarded.
    pub area: f64,
    /// Area-weighted centroid, `None` for degenerate (zero-area) rings.
    pub centroid: Option<Point2D>,
    /// Midpoint of the bounding box.
    pub center: Point2D,
    /// Width and height of the bounding box.
    pub extent: (f64, f64),
}

/// Shoelace signed area and centroid of a vertex sequence treated as a
/// closed ring. The centroid is `None` when the signed area is zero.
pub fn signed_area_and_centroid(vertices: &[Point2D]) -> (f64, Option<Point2D>) {
    let num_vertices = vertices.len();
    if num_vertices == 0 {
        return (0f64, None);
    }

    let mut area = 0f64;
    let mut cx = 0f64;
    let mut cy = 0f64;
    let mut prev = vertices[num_vertices - 1];
    for curr in vertices {
        let a = prev.x * curr.y - curr.x * prev.y;
        area += a;
        cx += (curr.x + prev.x) * a;
        cy += (curr.y + prev.y) * a;
        prev = *curr;
    }
    area /= 2f64;

    if area != 0f64 {
        (area, Some(Point2D::new(cx / (area * 6f64), cy / (area * 6f64))))
    } else {
        (area, None)
    }
}

/// Computes the metrics of a part. Returns `None` for a part with no points.
pub fn part_metrics(points: &[ShapePoint]) -> Option<PartMetrics> {
    if points.is_empty() {
        return None;
    }
    let mut bounding_box = BoundingBox::empty();
    let mut vertices = Vec::with_capacity(points.len());
    for p in points {
        bounding_box.expand_to_point(p.x, p.y);
        vertices.push(p.xy());
    }
    let (area, centroid) = signed_area_and_centroid(&vertices);

    Some(PartMetrics {
        bounding_box: bounding_box,
        area: area.abs(),
        centroid: centroid,
        center: bounding_box.center(),
        extent: (bounding_box.get_width(), bounding_box.get_height()),
    })
}
