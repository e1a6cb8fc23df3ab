pub mod geometry;
pub mod layer;
