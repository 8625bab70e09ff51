//! Core types for the options system

use super::error::OptionError;
use std::fmt;

/// Partition of the option key space
///
/// `Setting` entries are user preferences and are subject to restore-defaults.
/// `Persist` entries are maintained by the application itself (tokens, counters,
/// timestamps) and are never touched by a defaults reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Setting,
    Persist,
}

impl Namespace {
    pub const ALL: [Namespace; 2] = [Namespace::Setting, Namespace::Persist];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Setting => "setting",
            Namespace::Persist => "persist",
        }
    }

    /// Parse a namespace name as used in the database and on the command line
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "setting" => Some(Namespace::Setting),
            "persist" => Some(Namespace::Persist),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strongly-typed option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl OptionValue {
    /// Type tag of this value
    pub fn ty(&self) -> OptionType {
        match self {
            OptionValue::Bool(_) => OptionType::Bool,
            OptionValue::Int(_) => OptionType::Int,
            OptionValue::Text(_) => OptionType::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Serialize to the raw form kept by configuration stores
    pub fn to_raw(&self) -> String {
        match self {
            OptionValue::Bool(v) => v.to_string(),
            OptionValue::Int(v) => v.to_string(),
            OptionValue::Text(v) => v.clone(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{}", v),
            OptionValue::Int(v) => write!(f, "{}", v),
            OptionValue::Text(v) => write!(f, "\"{}\"", v),
        }
    }
}

/// Declared type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Bool,
    Int,
    Text,
}

impl OptionType {
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::Bool => "bool",
            OptionType::Int => "int",
            OptionType::Text => "text",
        }
    }

    /// Check if a value matches this type
    pub fn matches(&self, value: &OptionValue) -> bool {
        value.ty() == *self
    }

    /// Parse a raw stored string as this type
    ///
    /// Booleans accept the forms older releases wrote (`1`/`0`, any case of
    /// `true`/`false`).
    pub fn parse(&self, key: &str, raw: &str) -> Result<OptionValue, OptionError> {
        let mismatch = || OptionError::TypeMismatch {
            key: key.to_string(),
            expected: self.name(),
            found: raw.to_string(),
        };

        match self {
            OptionType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(OptionValue::Bool(true)),
                "false" | "0" => Ok(OptionValue::Bool(false)),
                _ => Err(mismatch()),
            },
            OptionType::Int => raw
                .trim()
                .parse::<i64>()
                .map(OptionValue::Int)
                .map_err(|_| mismatch()),
            OptionType::Text => Ok(OptionValue::Text(raw.to_string())),
        }
    }
}

/// Complete definition of an option
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDefinition {
    /// Namespace the key lives in
    pub namespace: Namespace,

    /// Key, unique within the namespace (e.g. "server_host")
    pub key: String,

    /// Human-readable title, untranslated (e.g. "Server address")
    pub title: Option<String>,

    /// Declared type
    pub ty: OptionType,

    /// Default value, always of the declared type
    pub default: OptionValue,
}

impl OptionDefinition {
    /// Fully qualified name, `namespace/key`
    pub fn path(&self) -> String {
        format!("{}/{}", self.namespace, self.key)
    }

    /// Check that a value can be written for this option
    pub fn check(&self, value: &OptionValue) -> Result<(), OptionError> {
        if self.ty.matches(value) {
            Ok(())
        } else {
            Err(OptionError::TypeMismatch {
                key: self.path(),
                expected: self.ty.name(),
                found: format!("{:?}", value),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_forms() {
        assert_eq!(OptionType::Bool.parse("k", "true").unwrap(), OptionValue::Bool(true));
        assert_eq!(OptionType::Bool.parse("k", "False").unwrap(), OptionValue::Bool(false));
        assert_eq!(OptionType::Bool.parse("k", "1").unwrap(), OptionValue::Bool(true));
        assert!(OptionType::Bool.parse("k", "yes please").is_err());
    }

    #[test]
    fn test_parse_int_rejects_text() {
        assert_eq!(OptionType::Int.parse("k", " 42 ").unwrap(), OptionValue::Int(42));

        let err = OptionType::Int.parse("setting/server_port", "https").unwrap_err();
        assert!(matches!(err, OptionError::TypeMismatch { expected: "int", .. }));
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        assert_eq!(
            OptionType::Text.parse("k", "  spaced  ").unwrap(),
            OptionValue::Text("  spaced  ".to_string())
        );
    }

    #[test]
    fn test_namespace_round_trip() {
        for ns in Namespace::ALL {
            assert_eq!(Namespace::parse(ns.as_str()), Some(ns));
        }
        assert_eq!(Namespace::parse("profile"), None);
    }
}
