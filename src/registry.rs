//! Tag-to-wrapper registry and the per-key construction hook

use std::fmt;

use tracing::trace;

use crate::coerce::coerce;
use crate::error::Result;
use crate::node::Node;
use crate::value::Value;

/// Domain node kinds, in resolution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    QueryResult,
    Pod,
    Subpod,
    Assumption,
    Warning,
    Image,
}

impl Kind {
    /// Every kind in declaration order; [`resolve`] returns the first match
    pub const ALL: [Self; 6] = [
        Self::QueryResult,
        Self::Pod,
        Self::Subpod,
        Self::Assumption,
        Self::Warning,
        Self::Image,
    ];

    /// Tag this kind wraps. Derived from the lower-cased type name except for images.
    pub const fn key(self) -> &'static str {
        match self {
            Self::QueryResult => "queryresult",
            Self::Pod => "pod",
            Self::Subpod => "subpod",
            Self::Assumption => "assumption",
            Self::Warning => "warning",
            Self::Image => "img",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::QueryResult => "QueryResult",
            Self::Pod => "Pod",
            Self::Subpod => "Subpod",
            Self::Assumption => "Assumption",
            Self::Warning => "Warning",
            Self::Image => "Image",
        }
    }

    /// Plural names exposed as normalized child sequences
    pub const fn children(self) -> &'static [&'static str] {
        match self {
            Self::QueryResult => &["pods", "assumptions", "warnings"],
            Self::Pod => &["subpods"],
            Self::Subpod => &["imgs"],
            Self::Assumption | Self::Warning | Self::Image => &[],
        }
    }

    /// Whether construction must fail when the node carries an API error
    pub const fn signals_errors(self) -> bool {
        matches!(self, Self::QueryResult | Self::Pod)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrapper kind for a tag, or `None` to keep the value untyped
pub fn resolve(key: &str) -> Option<Kind> {
    Kind::ALL.into_iter().find(|kind| kind.key() == key)
}

/// Construction hook run for every key/value pair while building the tree.
///
/// Attribute keys (`@name`) are coerced by their bare name. Element keys are
/// wrapped into the registered kind, which runs that kind's error check.
pub fn construct(key: &str, value: Value) -> Result<Value> {
    if let Some(name) = key.strip_prefix('@') {
        return match value {
            Value::String(raw) => coerce(name, raw),
            other => Ok(other),
        };
    }

    match resolve(key) {
        Some(kind) => {
            trace!(key, %kind, "wrapping node");
            Node::wrap(kind, value).map(Value::Node)
        }
        None => Ok(value),
    }
}
