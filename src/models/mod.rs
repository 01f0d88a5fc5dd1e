pub mod api;
pub mod common;
pub mod image;
pub mod text;

pub use api::*;
pub use common::*;
pub use image::*;
pub use text::*;
