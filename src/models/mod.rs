pub mod catalog;
pub mod image;

pub use catalog::*;
pub use image::*;
