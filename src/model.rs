//! Typed views over the result tree

pub mod assumption;
pub mod image;
pub mod pod;
pub mod result;
pub mod subpod;
pub mod warning;

pub use assumption::Assumption;
pub use image::Image;
pub use pod::Pod;
pub use result::{Info, QueryResult};
pub use subpod::Subpod;
pub use warning::Warning;
