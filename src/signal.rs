//! API error signaling for nodes that can report a failure

use indexmap::IndexMap;
use tracing::warn;

use crate::error::{Error, Result};
use crate::node::Node;
use crate::value::Value;
use crate::xml::tree::lower;
use crate::xml::Element;

/// Fail if `node` carries an API error.
///
/// An `<error>` child element is always a failure. An `error="true"` flag
/// without one is also a failure, reported as the missing error structure.
pub(crate) fn raise_for_error(node: &Node) -> Result<()> {
    let error = match node.fields().get("error") {
        Some(Value::Node(error)) => error,
        _ if flagged(node) => return Err(Error::not_found("error")),
        _ => return Ok(()),
    };

    let code = scalar(error, "code")?;
    let msg = scalar(error, "msg")?;
    warn!(kind = ?node.kind(), %code, %msg, "api reported an error");
    Err(Error::Api { code, msg })
}

/// Check a root element before its children are built, so a document error
/// is reported ahead of any pod error
pub(crate) fn raise_for_root_error(root: &Element) -> Result<()> {
    let mut fields = IndexMap::new();
    if let Some(flag) = root.attributes.get("error") {
        fields.insert("@error".to_string(), Value::String(flag.clone()));
    }
    if let Some(error) = root.elements().find(|child| child.name == "error") {
        fields.insert("error".to_string(), lower(error, &keep)?);
    }
    raise_for_error(&Node::new(fields))
}

fn keep(_: &str, value: Value) -> Result<Value> {
    Ok(value)
}

fn flagged(node: &Node) -> bool {
    matches!(
        node.fields().get("@error"),
        Some(Value::String(flag)) if flag == "true"
    ) || matches!(node.fields().get("@error"), Some(Value::Bool(true)))
}

fn scalar(error: &Node, name: &str) -> Result<String> {
    match error.attr(name)? {
        Value::String(text) => Ok(text.clone()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(Error::unexpected_type(format!("error.{name}"), "string")),
    }
}
