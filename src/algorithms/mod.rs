// private sub-module defined in other files
mod duplicate_vertices;
mod part_counts;
mod part_metrics;

// exports identifiers from private sub-modules in the current module namespace
pub use self::duplicate_vertices::{find_consecutive_duplicates, remove_consecutive_duplicates};
pub use self::part_counts::part_point_counts;
pub use self::part_metrics::{part_metrics, signed_area_and_centroid, PartMetrics};
