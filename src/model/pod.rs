//! Pods: titled groups of related answers

use crate::error::{Error, Result};
use crate::model::subpod::Subpod;
use crate::node::Node;

/// `<pod>` element. Construction already failed if the pod reported an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pod<'a> {
    node: &'a Node,
}

impl<'a> Pod<'a> {
    pub(crate) const fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn title(&self) -> Result<&'a str> {
        self.node.str_attr("title")
    }

    pub fn scanner(&self) -> Result<&'a str> {
        self.node.str_attr("scanner")
    }

    pub fn id(&self) -> Result<&'a str> {
        self.node.str_attr("id")
    }

    pub fn position(&self) -> Result<f64> {
        self.node.float_attr("position")
    }

    /// Subpod count as declared by the API
    pub fn numsubpods(&self) -> Result<i64> {
        self.node.int_attr("numsubpods")
    }

    /// Whether the API flagged this pod as the principal answer; absent means `false`
    pub fn primary(&self) -> Result<bool> {
        if self.node.get("primary").is_none() {
            return Ok(false);
        }
        self.node.bool_attr("primary")
    }

    pub fn subpods(&self) -> Vec<Subpod<'a>> {
        self.node
            .children_of("subpods")
            .into_iter()
            .map(Subpod::new)
            .collect()
    }

    /// Plain text of every subpod, in order
    pub fn texts(&self) -> Result<Vec<&'a str>> {
        self.subpods().iter().map(Subpod::plaintext).collect()
    }

    /// Plain text of the first subpod
    pub fn text(&self) -> Result<&'a str> {
        match self.subpods().first() {
            Some(subpod) => subpod.plaintext(),
            None => Err(Error::NoSubpods {
                title: self.title().unwrap_or_default().to_string(),
            }),
        }
    }

    /// Number of subpods actually present, not the `numsubpods` attribute
    pub fn len(&self) -> usize {
        self.subpods().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Subpod<'a>> {
        self.subpods().into_iter()
    }
}
