//! Debug formatting helpers.
//!
//! Turns any `Serialize` value into a plain `serde_json::Value` tree, renders
//! that tree the way Python's `pprint` would, and flattens it into strings.
//! The document clients use this to log request batches.

pub mod flatten;
pub mod plain_serializer;
pub mod pretty_printer;

pub use flatten::value_to_list;
pub use plain_serializer::{object_to_value, PlainOptions};
pub use pretty_printer::{repr, value_to_string, PrettyPrinter};

use serde::Serialize;
use thiserror::Error;

/// Errors raised while converting or flattening values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("{0}")]
    Custom(String),
    #[error("Key not found: {0}")]
    MissingKey(String),
    #[error("Expected a mapping")]
    NotAMapping,
}

impl serde::ser::Error for FormatError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        FormatError::Custom(msg.to_string())
    }
}

/// Converts `obj` to a plain tree and pretty prints it.
///
/// Sequences longer than `abbreviation` are replaced with a placeholder.
/// With `framed` the result is wrapped in a leading and trailing newline.
/// Never fails: a `Serialize` error is rendered in place of the value.
pub fn object_to_string<T: Serialize + ?Sized>(
    obj: &T,
    abbreviation: Option<usize>,
    framed: bool,
) -> String {
    let options = PlainOptions {
        abbreviation,
        class_key: None,
    };
    let value = object_to_value(obj, &options)
        .unwrap_or_else(|e| serde_json::Value::String(format!("<unserializable: {}>", e)));
    value_to_string(&value, framed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u32,
    }

    #[test]
    fn test_object_to_string() {
        let bob = Person {
            name: "Bob".to_string(),
            age: 50,
        };
        assert_eq!(object_to_string(&bob, None, false), "{'age': 50, 'name': 'Bob'}");
        assert_eq!(
            object_to_string(&bob, None, true),
            "\n{'age': 50, 'name': 'Bob'}\n"
        );
    }

    #[test]
    fn test_object_to_string_matches_value_to_string() {
        let bob = Person {
            name: "Bob".to_string(),
            age: 50,
        };
        let value = object_to_value(&bob, &PlainOptions::default()).unwrap();
        assert_eq!(object_to_string(&bob, None, false), value_to_string(&value, false));
        assert_eq!(
            object_to_string(&bob, None, true),
            format!("\n{}\n", value_to_string(&value, false))
        );
    }
}
