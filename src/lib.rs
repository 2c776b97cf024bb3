/*
This code is part of the shapefile_reader library.
Created: 18/10/2026
License: MIT
*/

pub mod algorithms;
pub mod configs;
pub mod io_utils;
pub mod structures;
pub mod vector;

pub use crate::configs::Configs;
pub use crate::vector::shapefile::{
    Feature, ParseResult, Result, Shape, ShapeFile, ShapeType, ShapefileError,
};
