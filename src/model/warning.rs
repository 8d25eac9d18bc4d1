//! Input warnings

use crate::node::Node;
use crate::value::Value;

/// Opaque warning about the query input, e.g. a spelling correction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Warning<'a> {
    node: &'a Node,
}

impl<'a> Warning<'a> {
    pub(crate) const fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.node.get(name)
    }
}
