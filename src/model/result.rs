//! Root of a query response

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Assumption, Pod, Warning};
use crate::node::Node;
use crate::registry::{self, Kind};
use crate::signal::raise_for_root_error;
use crate::value::Value;
use crate::xml::{self, ParseConfig, Parser};

/// Title that marks a pod as a short answer regardless of its primary flag
const RESULT_TITLE: &str = "Result";

/// `<queryresult>` root. Owns the whole tree; every other view borrows from it.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    node: Node,
}

/// One item of [`QueryResult::info`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Info<'a> {
    Pod(Pod<'a>),
    Assumption(Assumption<'a>),
    Warning(Warning<'a>),
}

impl QueryResult {
    /// Parse a response body. Fails on the first API error found in the
    /// document or in any pod.
    pub fn parse(body: &[u8], config: ParseConfig) -> Result<Self> {
        let doc = Parser::with_config(body, config).parse()?;
        if doc.root.name == Kind::QueryResult.key() {
            raise_for_root_error(&doc.root)?;
        }
        let (root, value) = xml::build(&doc, &registry::construct)?;
        let result = Self::from_root(&root, value)?;
        debug!(fields = result.node.len(), "parsed query result");
        Ok(result)
    }

    fn from_root(name: &str, value: Value) -> Result<Self> {
        match value {
            Value::Node(node) if node.kind() == Some(Kind::QueryResult) => Ok(Self { node }),
            _ => Err(Error::UnexpectedRoot {
                found: name.to_string(),
            }),
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn success(&self) -> Result<bool> {
        self.node.bool_attr("success")
    }

    pub fn pods(&self) -> Vec<Pod<'_>> {
        self.node
            .children_of("pods")
            .into_iter()
            .map(Pod::new)
            .collect()
    }

    pub fn assumptions(&self) -> Vec<Assumption<'_>> {
        self.node
            .children_of("assumptions")
            .into_iter()
            .map(Assumption::new)
            .collect()
    }

    pub fn warnings(&self) -> Vec<Warning<'_>> {
        self.node
            .children_of("warnings")
            .into_iter()
            .map(Warning::new)
            .collect()
    }

    /// Pods, then assumptions, then warnings
    pub fn info(&self) -> Vec<Info<'_>> {
        let pods = self.pods().into_iter().map(Info::Pod);
        let assumptions = self.assumptions().into_iter().map(Info::Assumption);
        let warnings = self.warnings().into_iter().map(Info::Warning);
        pods.chain(assumptions).chain(warnings).collect()
    }

    /// Pods holding the short answer: flagged primary or titled `Result`
    pub fn results(&self) -> Result<Vec<Pod<'_>>> {
        let mut results = Vec::new();
        for pod in self.pods() {
            if pod.primary()? || pod.title()? == RESULT_TITLE {
                results.push(pod);
            }
        }
        Ok(results)
    }

    /// Pod title to first-subpod text. A repeated title keeps the later pod's text.
    pub fn details(&self) -> Result<IndexMap<String, String>> {
        let mut details = IndexMap::new();
        for pod in self.pods() {
            details.insert(pod.title()?.to_string(), pod.text()?.to_string());
        }
        Ok(details)
    }

    pub fn len(&self) -> usize {
        self.info().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Info<'_>> {
        self.info().into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = Info<'a>;
    type IntoIter = std::vec::IntoIter<Info<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.info().into_iter()
    }
}
