//! Error types for the Wolfram|Alpha client

use std::fmt;
use thiserror::Error;

/// Position in an XML response body
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in the response body
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }
}

/// Categorized XML syntax failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlErrorKind {
    UnexpectedToken,
    UnexpectedEof,
    MismatchedTag { expected: String, found: String },
    DuplicateAttribute { name: String },
    InvalidEntity,
    InvalidUtf8,
    TrailingContent,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for XmlErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::MismatchedTag { expected, found } => {
                write!(f, "expected </{expected}>, found </{found}>")
            }
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::InvalidEntity => write!(f, "invalid xml entity"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::TrailingContent => write!(f, "content after root element"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// XML syntax error with location
#[derive(Error, Clone, Debug, PartialEq)]
pub struct XmlError {
    kind: XmlErrorKind,
    span: Span,
}

impl XmlError {
    pub fn new(kind: XmlErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create error at specific position
    pub fn at(kind: XmlErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::new(pos, pos))
    }

    pub fn kind(&self) -> &XmlErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xml error at {}: {}", self.span.start, self.kind)
    }
}

/// Main error type for the client and the result model
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected http status {status}")]
    Status { status: u16 },

    #[error("unexpected content type {found:?}, expected text/xml")]
    ContentType { found: String },

    #[error("unexpected charset {found:?}, expected utf-8")]
    Charset { found: String },

    /// Failure reported by the API itself, for the whole document or a single pod
    #[error("Error {code}: {msg}")]
    Api { code: String, msg: String },

    #[error("attribute not found: {name}")]
    AttributeNotFound { name: String },

    #[error("{name} is not a children key of {kind}")]
    NotAChildrenKey { kind: &'static str, name: String },

    #[error("invalid boolean for {name}: {value:?}")]
    InvalidBool { name: String, value: String },

    #[error("invalid number for {name}: {value:?}")]
    InvalidNumber { name: String, value: String },

    #[error("attribute {name} is not a {expected}")]
    UnexpectedType {
        name: String,
        expected: &'static str,
    },

    #[error("unexpected document root {found:?}, expected queryresult")]
    UnexpectedRoot { found: String },

    #[error("pod {title:?} has no subpods")]
    NoSubpods { title: String },

    #[error("assumption text has no sentence break")]
    NoSentence,

    #[error("missing configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Self::AttributeNotFound { name: name.into() }
    }

    pub(crate) fn unexpected_type(name: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedType {
            name: name.into(),
            expected,
        }
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
