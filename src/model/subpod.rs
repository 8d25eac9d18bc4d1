//! A single answer within a pod

use crate::error::{Error, Result};
use crate::model::image::Image;
use crate::node::Node;
use crate::value::Value;

/// `<subpod>` element: plain text plus optional images
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subpod<'a> {
    node: &'a Node,
}

impl<'a> Subpod<'a> {
    pub(crate) const fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn title(&self) -> Result<&'a str> {
        self.node.str_attr("title")
    }

    /// Plain text answer; an empty `<plaintext/>` reads as `""`
    pub fn plaintext(&self) -> Result<&'a str> {
        match self.node.attr("plaintext")? {
            Value::Null => Ok(""),
            Value::String(text) => Ok(text),
            Value::Node(node) => Ok(node.text().unwrap_or_default()),
            _ => Err(Error::unexpected_type("plaintext", "string")),
        }
    }

    pub fn images(&self) -> Vec<Image<'a>> {
        self.node
            .children_of("imgs")
            .into_iter()
            .map(Image::new)
            .collect()
    }
}
