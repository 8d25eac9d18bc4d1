//! wolframalpha - async client for the Wolfram|Alpha v2 query API
//!
//! Responses are decoded into a tree of generic [`Node`]s while they are
//! parsed. Attribute strings are coerced to typed [`Value`]s, registered tags
//! are wrapped as pods, subpods, assumptions, warnings and images, and API
//! errors fail construction immediately.
//!
//! # Quick Start
//!
//! ```
//! use wolframalpha::from_xml_str;
//! # fn main() -> Result<(), wolframalpha::Error> {
//! let result = from_xml_str(
//!     r#"<queryresult success="true" error="false">
//!          <pod title="Result" id="Result" scanner="Simplification"
//!               position="200" numsubpods="1" error="false">
//!            <subpod title=""><plaintext>2</plaintext></subpod>
//!          </pod>
//!        </queryresult>"#,
//! )?;
//! let answers: Vec<_> = result.results()?;
//! assert_eq!(answers.len(), 1);
//! assert_eq!(result.details()?.get("Result").map(String::as_str), Some("2"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod coerce;
pub mod config;
pub mod error;
pub mod model;
pub mod node;
pub mod registry;
mod signal;
pub mod transport;
pub mod value;
pub mod xml;

pub use client::{check_content_type, Client};
pub use coerce::{coerce, parse_bool, Coercion};
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{Error, Pos, Result, Span, XmlError, XmlErrorKind};
pub use model::{Assumption, Image, Info, Pod, QueryResult, Subpod, Warning};
pub use node::Node;
pub use registry::Kind;
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use value::{to_sequence, Value};
pub use xml::ParseConfig;

/// Decode a query response from a string
pub fn from_xml_str(s: &str) -> Result<QueryResult> {
    QueryResult::parse(s.as_bytes(), ParseConfig::default())
}

/// Decode a query response from bytes
pub fn from_xml_bytes(bytes: &[u8]) -> Result<QueryResult> {
    QueryResult::parse(bytes, ParseConfig::default())
}

/// Decode with custom parser limits
pub fn from_xml_bytes_with_config(bytes: &[u8], config: ParseConfig) -> Result<QueryResult> {
    QueryResult::parse(bytes, config)
}
