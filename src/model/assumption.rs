//! Interpretive assumptions made about the input

use crate::error::{Error, Result};
use crate::node::Node;
use crate::value::{to_sequence, Value};

/// `<assumption>` element with a templated explanation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assumption<'a> {
    node: &'a Node,
}

impl<'a> Assumption<'a> {
    pub(crate) const fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn template(&self) -> Result<&'a str> {
        self.node.str_attr("template")
    }

    /// The `description` attribute, else the `desc` of the first `<value>`
    pub fn description(&self) -> Result<&'a str> {
        if self.node.get("description").is_some() {
            return self.node.str_attr("description");
        }
        let value = self
            .node
            .get("value")
            .and_then(|value| to_sequence(value).into_iter().next())
            .and_then(Value::as_node)
            .ok_or_else(|| Error::not_found("description"))?;
        value.str_attr("desc")
    }

    pub fn word(&self) -> Option<&'a str> {
        self.node.get("word").and_then(Value::as_str)
    }

    /// The template's first sentence with placeholders filled in, including
    /// the trailing `". "`
    pub fn text(&self) -> Result<String> {
        let mut text = self.template()?.replace("${desc1}", self.description()?);
        if let Some(word) = self.word() {
            text = text.replace("${word}", word);
        }
        let end = text.find(". ").ok_or(Error::NoSentence)? + 2;
        text.truncate(end);
        Ok(text)
    }
}
