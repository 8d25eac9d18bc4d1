//! Values held by a document node

use crate::node::Node;

/// A coerced attribute, text content, child node or list of children
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Empty element
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Element with attributes or children
    Node(Node),
    /// Repeated sibling elements sharing one tag
    List(Vec<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Floating point view; integers widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => i32::try_from(*n).ok().map(f64::from),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, used in type mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Node(_) => "node",
            Self::List(_) => "list",
        }
    }
}

/// Undo the XML layer's single-element collapsing.
///
/// A list yields its items; any other value is a sequence of one.
pub fn to_sequence(value: &Value) -> Vec<&Value> {
    match value {
        Value::List(items) => items.iter().collect(),
        other => vec![other],
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Node> for Value {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_as_methods() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Null.as_bool(), None);
        assert_eq!(Value::Int(3).as_int(), Some(3));
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
        assert_eq!(Value::from("pod").as_str(), Some("pod"));
        assert!(Value::Node(Node::default()).as_node().is_some());
        assert_eq!(Value::Null.type_name(), "null");
    }

    #[test]
    fn test_to_sequence_single_value() {
        let value = Value::Node(Node::default());
        let seq = to_sequence(&value);
        assert_eq!(seq.len(), 1);
        assert!(seq.first().is_some_and(|v| v.as_node().is_some()));
    }

    #[test]
    fn test_to_sequence_list() {
        let value = Value::List(vec![Value::from("a"), Value::from("b"), Value::from("c")]);
        let seq: Vec<_> = to_sequence(&value).into_iter().filter_map(Value::as_str).collect();
        assert_eq!(seq, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_to_sequence_empty_list() {
        assert!(to_sequence(&Value::List(Vec::new())).is_empty());
    }
}
