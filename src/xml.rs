//! Minimal XML reader and the generic tree builder fed by it

pub mod cursor;
pub mod model;
pub mod parser;
pub mod tree;

pub use cursor::Cursor;
pub use model::{Content, Document, Element};
pub use parser::{ParseConfig, Parser};
pub use tree::{build, Hook};
