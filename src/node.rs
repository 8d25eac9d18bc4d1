//! Generic document node with attribute and children access

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::registry::Kind;
use crate::signal::raise_for_error;
use crate::value::{to_sequence, Value};

/// Key under which mixed character data is kept
pub const TEXT_KEY: &str = "#text";

/// Ordered mapping of attributes (`@name`) and child elements (`name`).
///
/// Nodes are built once, bottom-up, while the response is parsed and are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    kind: Option<Kind>,
    fields: IndexMap<String, Value>,
}

impl Node {
    /// Untyped node over raw fields
    pub fn new(fields: IndexMap<String, Value>) -> Self {
        Self { kind: None, fields }
    }

    /// Wrap an element value as `kind`, failing if it carries an API error
    pub fn wrap(kind: Kind, value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Node(node) => node.fields,
            Value::Null => IndexMap::new(),
            Value::String(text) => IndexMap::from([(TEXT_KEY.to_string(), Value::String(text))]),
            _ => return Err(Error::unexpected_type(kind.key(), "node")),
        };
        for plural in kind.children() {
            if let Some(Value::Node(container)) = fields.get_mut(*plural) {
                container.promote_entries();
            }
        }

        let node = Self {
            kind: Some(kind),
            fields,
        };
        if kind.signals_errors() {
            raise_for_error(&node)?;
        }
        Ok(node)
    }

    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// Raw fields in document order
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Attributes by bare name, in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter_map(|(key, value)| key.strip_prefix('@').map(|name| (name, value)))
    }

    /// Look up `name`, then `@name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .get(name)
            .or_else(|| self.fields.get(&format!("@{name}")))
    }

    /// Like [`Node::get`], failing when neither form exists
    pub fn attr(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| Error::not_found(name))
    }

    pub fn str_attr(&self, name: &str) -> Result<&str> {
        self.attr(name)?
            .as_str()
            .ok_or_else(|| Error::unexpected_type(name, "string"))
    }

    pub fn int_attr(&self, name: &str) -> Result<i64> {
        self.attr(name)?
            .as_int()
            .ok_or_else(|| Error::unexpected_type(name, "int"))
    }

    pub fn float_attr(&self, name: &str) -> Result<f64> {
        self.attr(name)?
            .as_float()
            .ok_or_else(|| Error::unexpected_type(name, "float"))
    }

    pub fn bool_attr(&self, name: &str) -> Result<bool> {
        self.attr(name)?
            .as_bool()
            .ok_or_else(|| Error::unexpected_type(name, "bool"))
    }

    /// Character data of a text-only or mixed element
    pub fn text(&self) -> Option<&str> {
        self.fields.get(TEXT_KEY).and_then(Value::as_str)
    }

    /// Children exposed under a plural name this node's kind declares.
    ///
    /// Absent children yield an empty sequence; a single child yields a
    /// sequence of one.
    pub fn children(&self, plural: &str) -> Result<Vec<&Self>> {
        let declared = self.kind.map(Kind::children).unwrap_or_default();
        if !declared.iter().any(|name| *name == plural) {
            return Err(Error::NotAChildrenKey {
                kind: self.kind.map_or("Node", Kind::name),
                name: plural.to_string(),
            });
        }
        Ok(self.children_of(plural))
    }

    /// Normalized children for a declared plural name.
    ///
    /// The singular key is tried first. Failing that, a container element
    /// named by the plural (as in `<assumptions><assumption/></assumptions>`)
    /// supplies its singular children, or all of its child elements when it
    /// holds none under the singular key.
    pub(crate) fn children_of(&self, plural: &str) -> Vec<&Self> {
        let singular = plural.strip_suffix('s').unwrap_or(plural);

        let values = match (self.get(singular), self.fields.get(plural)) {
            (Some(value), _) => to_sequence(value),
            (None, Some(Value::Node(container))) => match container.get(singular) {
                Some(value) => to_sequence(value),
                None => container
                    .fields
                    .iter()
                    .filter(|(key, _)| !key.starts_with('@') && key.as_str() != TEXT_KEY)
                    .flat_map(|(_, value)| to_sequence(value))
                    .collect(),
            },
            _ => Vec::new(),
        };

        values
            .into_iter()
            .filter_map(|value| {
                let node = value.as_node();
                if node.is_none() {
                    debug!(plural, found = value.type_name(), "skipping non-element child");
                }
                node
            })
            .collect()
    }

    /// Turn text-only and empty child entries into untyped nodes, so a
    /// container lists every entry it holds
    fn promote_entries(&mut self) {
        for (key, value) in &mut self.fields {
            if !key.starts_with('@') && key.as_str() != TEXT_KEY {
                *value = promote(std::mem::take(value));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn promote(value: Value) -> Value {
    match value {
        Value::Null => Value::Node(Node::default()),
        Value::String(text) => Value::Node(Node::new(IndexMap::from([(
            TEXT_KEY.to_string(),
            Value::String(text),
        )]))),
        Value::List(items) => Value::List(items.into_iter().map(promote).collect()),
        other => other,
    }
}
