//! Error types for the options system

use super::types::Namespace;
use thiserror::Error;

/// Errors raised by option declaration, lookup and typed access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// Value type disagrees with the declared type
    #[error("type mismatch for '{key}': expected {expected}, got {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// Value is well-typed but outside the currently valid set
    #[error("value {value} is not valid for '{key}'")]
    OutOfDomain { key: String, value: i64 },

    #[error("option '{namespace}/{key}' is already registered")]
    Duplicate { namespace: Namespace, key: String },

    #[error("option '{namespace}/{key}' is not registered")]
    NotRegistered { namespace: Namespace, key: String },
}
