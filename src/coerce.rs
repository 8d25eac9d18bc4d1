//! Typed coercion of raw attribute strings

use crate::error::{Error, Result};
use crate::value::Value;

/// Conversion applied to an attribute's raw text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    Int,
    Float,
    Bool,
    Identity,
}

const CONVERSIONS: &[(&str, Coercion)] = &[
    ("height", Coercion::Int),
    ("width", Coercion::Int),
    ("numsubpods", Coercion::Int),
    ("position", Coercion::Float),
    ("primary", Coercion::Bool),
    ("success", Coercion::Bool),
];

impl Coercion {
    /// Converter registered for a bare attribute name
    pub fn for_name(name: &str) -> Self {
        CONVERSIONS
            .iter()
            .find(|(key, _)| *key == name)
            .map_or(Self::Identity, |(_, coercion)| *coercion)
    }

    pub fn apply(self, name: &str, raw: String) -> Result<Value> {
        match self {
            Self::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| invalid_number(name, raw)),
            Self::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| invalid_number(name, raw)),
            Self::Bool => parse_bool(name, &raw).map(Value::Bool),
            Self::Identity => Ok(Value::String(raw)),
        }
    }
}

/// Coerce `raw` by the converter registered for `name`
pub fn coerce(name: &str, raw: String) -> Result<Value> {
    Coercion::for_name(name).apply(name, raw)
}

/// Accepts exactly `true` or `false`
pub fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Error::InvalidBool {
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

fn invalid_number(name: &str, raw: String) -> Error {
    Error::InvalidNumber {
        name: name.to_string(),
        value: raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_conversions() -> Result<()> {
        assert_eq!(coerce("height", "20".to_string())?, Value::Int(20));
        assert_eq!(coerce("numsubpods", "3".to_string())?, Value::Int(3));
        assert_eq!(coerce("position", "200".to_string())?, Value::Float(200.0));
        assert_eq!(coerce("primary", "true".to_string())?, Value::Bool(true));
        assert_eq!(coerce("success", "false".to_string())?, Value::Bool(false));
        Ok(())
    }

    #[test]
    fn test_unregistered_is_identity() -> Result<()> {
        assert_eq!(coerce("title", "Result".to_string())?, Value::from("Result"));
        assert_eq!(coerce("error", "false".to_string())?, Value::from("false"));
        Ok(())
    }

    #[test]
    fn test_bool_is_case_sensitive() {
        assert!(matches!(
            parse_bool("primary", "TRUE"),
            Err(Error::InvalidBool { .. })
        ));
        assert!(matches!(
            parse_bool("primary", "1"),
            Err(Error::InvalidBool { .. })
        ));
    }

    #[test]
    fn test_invalid_number() {
        let err = coerce("width", "wide".to_string());
        assert!(matches!(err, Err(Error::InvalidNumber { name, .. }) if name == "width"));
    }
}
