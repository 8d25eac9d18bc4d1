//! Image attached to a subpod

use crate::error::Result;
use crate::node::Node;

/// `<img>` element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Image<'a> {
    node: &'a Node,
}

impl<'a> Image<'a> {
    pub(crate) const fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn title(&self) -> Result<&'a str> {
        self.node.str_attr("title")
    }

    pub fn alt(&self) -> Result<&'a str> {
        self.node.str_attr("alt")
    }

    pub fn src(&self) -> Result<&'a str> {
        self.node.str_attr("src")
    }

    pub fn height(&self) -> Result<i64> {
        self.node.int_attr("height")
    }

    pub fn width(&self) -> Result<i64> {
        self.node.int_attr("width")
    }
}
