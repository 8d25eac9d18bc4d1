//! Lowering of an element tree into generic nodes
//!
//! Attributes are keyed `@name` and child elements by tag. Repeated sibling
//! tags collapse into a [`Value::List`], a single occurrence stays bare. An
//! element holding only text becomes that text and an empty element becomes
//! [`Value::Null`].

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::Result;
use crate::node::{Node, TEXT_KEY};
use crate::value::Value;
use crate::xml::model::{Document, Element};

/// Callback invoked for every key/value pair before insertion into its parent
pub trait Hook {
    fn construct(&self, key: &str, value: Value) -> Result<Value>;
}

impl<F> Hook for F
where
    F: Fn(&str, Value) -> Result<Value>,
{
    fn construct(&self, key: &str, value: Value) -> Result<Value> {
        self(key, value)
    }
}

/// Build the generic tree for `doc`, returning the root tag and its value
pub fn build<H: Hook + ?Sized>(doc: &Document, hook: &H) -> Result<(String, Value)> {
    let value = lower(&doc.root, hook)?;
    let value = hook.construct(&doc.root.name, value)?;
    Ok((doc.root.name.clone(), value))
}

/// Lower one element without running `hook` on the element itself
pub(crate) fn lower<H: Hook + ?Sized>(element: &Element, hook: &H) -> Result<Value> {
    let text = element.text();
    let text = text.trim();

    if element.attributes.is_empty() && element.elements().next().is_none() {
        return Ok(if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_string())
        });
    }

    let mut fields = IndexMap::with_capacity(element.attributes.len());
    for (name, raw) in &element.attributes {
        let key = format!("@{name}");
        let value = hook.construct(&key, Value::String(raw.clone()))?;
        fields.insert(key, value);
    }

    for child in element.elements() {
        let value = hook.construct(&child.name, lower(child, hook)?)?;
        insert_collapsing(&mut fields, &child.name, value);
    }

    if !text.is_empty() {
        fields.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }

    Ok(Value::Node(Node::new(fields)))
}

fn insert_collapsing(fields: &mut IndexMap<String, Value>, key: &str, value: Value) {
    match fields.entry(key.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::List(items) => items.push(value),
            existing => {
                let first = std::mem::take(existing);
                *existing = Value::List(vec![first, value]);
            }
        },
    }
}
