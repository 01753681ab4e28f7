//! Validation errors raised while resolving settings against a schema.

use blockkit_core::ValueKind;

/// Settings did not satisfy the declared schema.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("undefined option(s) {}; defined options are: {}", quoted(.options), quoted(.defined))]
    UndefinedOptions {
        options: Vec<String>,
        defined: Vec<String>,
    },

    #[error("the required option \"{option}\" is missing")]
    MissingOption { option: String },

    #[error("the option \"{option}\" expected a value of kind {}, got {actual}", kinds(.expected))]
    InvalidType {
        option: String,
        expected: Vec<ValueKind>,
        actual: ValueKind,
    },

    #[error("the option \"{option}\" has an invalid value: {message}")]
    InvalidValue { option: String, message: String },
}

impl ValidationError {
    /// The option this error is about, when it concerns a single option.
    pub fn option(&self) -> Option<&str> {
        match self {
            ValidationError::UndefinedOptions { .. } => None,
            ValidationError::MissingOption { option }
            | ValidationError::InvalidType { option, .. }
            | ValidationError::InvalidValue { option, .. } => Some(option),
        }
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn kinds(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ValueKind::to_string)
        .collect::<Vec<_>>()
        .join("|")
}
