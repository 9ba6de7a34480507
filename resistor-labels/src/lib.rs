pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod sequence;
pub mod series;
pub mod tiler;
pub mod value;
