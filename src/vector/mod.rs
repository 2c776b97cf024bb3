/*
This code is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT
*/

pub mod shapefile;

pub use self::shapefile::attributes::{AttributeRow, AttributeSource, AttributeTable};
pub use self::shapefile::geometry::*;
pub use self::shapefile::{Feature, ParseResult, ShapeFile};
