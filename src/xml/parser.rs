//! XML parser producing an [`Element`] tree

use indexmap::IndexMap;

use crate::error::{Pos, XmlError, XmlErrorKind};
use crate::xml::cursor::Cursor;
use crate::xml::model::{Content, Document, Element};

type Result<T> = std::result::Result<T, XmlError>;

/// Limits applied while reading a response body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_size: 10 * 1024 * 1024, // 10 MB default
        }
    }
}

impl ParseConfig {
    /// Create a new config with unlimited depth and size
    pub const fn unlimited() -> Self {
        Self {
            max_depth: 0,
            max_size: 0,
        }
    }

    pub const fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
        }
    }
}

/// XML parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    config: ParseConfig,
    depth: u16,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, ParseConfig::default())
    }

    pub fn with_config(input: &'a [u8], config: ParseConfig) -> Self {
        Self {
            cursor: Cursor::new(input),
            config,
            depth: 0,
        }
    }

    /// Parse a complete document with exactly one root element
    pub fn parse(&mut self) -> Result<Document> {
        if self.config.max_size > 0 && self.cursor.remaining().len() > self.config.max_size {
            return Err(XmlError::at(
                XmlErrorKind::MaxSizeExceeded {
                    max: self.config.max_size,
                },
                self.cursor.position(),
            ));
        }

        self.skip_prolog()?;
        let root = self.parse_element()?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(XmlError::at(
                XmlErrorKind::TrailingContent,
                self.cursor.position(),
            ));
        }

        Ok(Document { root })
    }

    /// Skip declaration, doctype, comments and whitespace before the root
    fn skip_prolog(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.eat(b"<?") {
                self.skip_until(b"?>")?;
            } else if self.cursor.eat(b"<!--") {
                self.skip_until(b"-->")?;
            } else if self.cursor.starts_with(b"<!") {
                self.skip_until(b">")?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.eat(b"<!--") {
                self.skip_until(b"-->")?;
            } else if self.cursor.eat(b"<?") {
                self.skip_until(b"?>")?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_element(&mut self) -> Result<Element> {
        self.expect_byte(b'<')?;

        self.depth = self.depth.saturating_add(1);
        if self.config.max_depth > 0 && self.depth > self.config.max_depth {
            return Err(XmlError::at(
                XmlErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                self.cursor.position(),
            ));
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.eat(b"/>") {
            self.depth = self.depth.saturating_sub(1);
            return Ok(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }
        self.expect_byte(b'>')?;

        let mut children = Vec::new();
        loop {
            if self.cursor.eat(b"</") {
                let close_name = self.parse_name()?;
                if close_name != name {
                    return Err(self.error_here(XmlErrorKind::MismatchedTag {
                        expected: name,
                        found: close_name,
                    }));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.eat(b"<!--") {
                self.skip_until(b"-->")?;
                continue;
            }

            if self.cursor.eat(b"<![CDATA[") {
                let (start, pos) = (self.cursor.offset(), self.cursor.position());
                while !self.cursor.starts_with(b"]]>") {
                    if self.cursor.is_eof() {
                        return Err(self.error_here(XmlErrorKind::UnexpectedEof));
                    }
                    self.cursor.advance();
                }
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(3);
                children.push(Content::Text(bytes_to_string(raw, pos)?));
                continue;
            }

            if self.cursor.eat(b"<?") {
                self.skip_until(b"?>")?;
                continue;
            }

            if self.cursor.current() == Some(b'<') {
                children.push(Content::Element(self.parse_element()?));
                continue;
            }

            if self.cursor.is_eof() {
                return Err(self.error_here(XmlErrorKind::UnexpectedEof));
            }

            if let Some(text) = self.parse_text()? {
                children.push(Content::Text(text));
            }
        }

        self.depth = self.depth.saturating_sub(1);
        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/' | b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here(XmlErrorKind::UnexpectedEof)),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here(XmlErrorKind::DuplicateAttribute { name }));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.error_here(XmlErrorKind::UnexpectedToken)),
        };
        self.cursor.advance();

        let (start, pos) = (self.cursor.offset(), self.cursor.position());
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                return decode_entities(&bytes_to_string(raw, pos)?, self.cursor.position());
            }
            self.cursor.advance();
        }

        Err(self.error_here(XmlErrorKind::UnexpectedEof))
    }

    fn parse_text(&mut self) -> Result<Option<String>> {
        let (start, pos) = (self.cursor.offset(), self.cursor.position());
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = decode_entities(&bytes_to_string(raw, pos)?, self.cursor.position())?;

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        let pos = self.cursor.position();
        match self.cursor.current() {
            Some(first) if is_name_start(first) => self.cursor.advance(),
            Some(_) => return Err(self.error_here(XmlErrorKind::UnexpectedToken)),
            None => return Err(self.error_here(XmlErrorKind::UnexpectedEof)),
        }

        let start = self.cursor.offset().saturating_sub(1);
        while let Some(b) = self.cursor.current() {
            if !is_name_char(b) {
                break;
            }
            self.cursor.advance();
        }

        bytes_to_string(self.cursor.slice_from(start), pos)
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while !self.cursor.is_eof() {
            if self.cursor.eat(pattern) {
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here(XmlErrorKind::UnexpectedEof))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        match self.cursor.current() {
            Some(b) if b == expected => {
                self.cursor.advance();
                Ok(())
            }
            Some(_) => Err(self.error_here(XmlErrorKind::UnexpectedToken)),
            None => Err(self.error_here(XmlErrorKind::UnexpectedEof)),
        }
    }

    fn error_here(&self, kind: XmlErrorKind) -> XmlError {
        XmlError::at(kind, self.cursor.position())
    }
}

/// Decode `bytes` read from `pos`, reporting the offending byte's position
fn bytes_to_string(bytes: &[u8], pos: Pos) -> Result<String> {
    std::str::from_utf8(bytes).map(str::to_string).map_err(|err| {
        let head = bytes.get(..err.valid_up_to()).unwrap_or_default();
        XmlError::at(XmlErrorKind::InvalidUtf8, advance_pos(pos, head))
    })
}

fn advance_pos(pos: Pos, bytes: &[u8]) -> Pos {
    bytes.iter().fold(pos, |pos, &b| {
        if b == b'\n' {
            Pos::new(pos.offset + 1, pos.line + 1, 1)
        } else {
            Pos::new(pos.offset + 1, pos.line, pos.col + 1)
        }
    })
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str, pos: Pos) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (head, tail) = rest.split_at(amp);
        result.push_str(head);

        let Some(semi) = tail.find(';') else {
            return Err(XmlError::at(XmlErrorKind::InvalidEntity, pos));
        };
        let entity = tail.get(1..semi).unwrap_or_default();
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };
        match decoded {
            Some(ch) => result.push(ch),
            None => return Err(XmlError::at(XmlErrorKind::InvalidEntity, pos)),
        }
        rest = tail.get(semi + 1..).unwrap_or_default();
    }
    result.push_str(rest);

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declaration_and_attributes() -> Result<()> {
        let input = br#"<?xml version='1.0' encoding='UTF-8'?>
<queryresult success='true' error='false'></queryresult>"#;
        let doc = Parser::new(input).parse()?;

        assert_eq!(doc.root.name, "queryresult");
        assert_eq!(doc.root.attributes.get("success"), Some(&"true".to_string()));
        assert_eq!(doc.root.attributes.get("error"), Some(&"false".to_string()));
        assert!(doc.root.children.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_nested_text_and_self_closing() -> Result<()> {
        let input = b"<subpod title=''><plaintext>x = 1</plaintext><img src='a.gif' /></subpod>";
        let doc = Parser::new(input).parse()?;

        let children: Vec<_> = doc.root.elements().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children.first().map(|e| e.text()), Some("x = 1".to_string()));
        assert_eq!(children.get(1).map(|e| e.name.as_str()), Some("img"));
        Ok(())
    }

    #[test]
    fn test_entities_and_cdata() -> Result<()> {
        let input = b"<a t='&quot;pi&quot;'>1 &lt; 2<![CDATA[ & <raw>]]></a>";
        let doc = Parser::new(input).parse()?;

        assert_eq!(doc.root.attributes.get("t"), Some(&"\"pi\"".to_string()));
        assert_eq!(doc.root.text(), "1 < 2 & <raw>");
        Ok(())
    }

    #[test]
    fn test_mismatched_tag() {
        let err = Parser::new(b"<pod></subpod>").parse();
        assert!(matches!(
            err.map_err(|e| e.kind().clone()),
            Err(XmlErrorKind::MismatchedTag { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut parser = Parser::with_config(b"<a><b><c/></b></a>", ParseConfig::new(2, 0));
        let err = parser.parse().map_err(|e| e.kind().clone());
        assert_eq!(err, Err(XmlErrorKind::MaxDepthExceeded { max: 2 }));
    }

    #[test]
    fn test_size_limit() {
        let mut parser = Parser::with_config(b"<queryresult/>", ParseConfig::new(0, 4));
        let err = parser.parse().map_err(|e| e.kind().clone());
        assert_eq!(err, Err(XmlErrorKind::MaxSizeExceeded { max: 4 }));
    }

    #[test]
    fn test_invalid_utf8_reports_position() {
        let err = Parser::new(b"<a>\nok \xff</a>").parse();
        let err = err.map_err(|e| (e.kind().clone(), e.span().start));
        assert_eq!(err, Err((XmlErrorKind::InvalidUtf8, Pos::new(7, 2, 4))));
    }

    #[test]
    fn test_trailing_content() {
        let err = Parser::new(b"<a/><b/>").parse().map_err(|e| e.kind().clone());
        assert_eq!(err, Err(XmlErrorKind::TrailingContent));
    }
}
