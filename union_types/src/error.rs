// union_types/src/error.rs

use thiserror::Error;

/// Failures at the boundary where outside data becomes a union value.
#[derive(Error, Debug)]
pub enum UnionError {
    #[error("Unable to deserialize instance of {type_name} as no case was specified.")]
    MissingCase { type_name: &'static str },

    #[error("Unable to deserialize instance of {type_name} as case '{case}' is unrecognised.")]
    UnknownCase { type_name: &'static str, case: String },

    #[error("No case of {type_name} has index {index}.")]
    UnknownIndex { type_name: &'static str, index: usize },

    #[error("Unable to deserialize instance of {type_name} as no value for '{field}' was specified.")]
    MissingField { type_name: &'static str, field: String },

    #[cfg(feature = "serde")]
    #[error("Unable to deserialize instance of {type_name} as the value for '{field}' is invalid: {source}")]
    InvalidField {
        type_name: &'static str,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to deserialize instance of {type_name} from null as it has no default case.")]
    UnexpectedNull { type_name: &'static str },
}

impl UnionError {
    pub const fn missing_case(type_name: &'static str) -> Self {
        UnionError::MissingCase { type_name }
    }

    pub fn unknown_case(type_name: &'static str, case: impl Into<String>) -> Self {
        UnionError::UnknownCase {
            type_name,
            case: case.into(),
        }
    }

    pub const fn unknown_index(type_name: &'static str, index: usize) -> Self {
        UnionError::UnknownIndex { type_name, index }
    }

    pub fn missing_field(type_name: &'static str, field: impl Into<String>) -> Self {
        UnionError::MissingField {
            type_name,
            field: field.into(),
        }
    }

    pub const fn unexpected_null(type_name: &'static str) -> Self {
        UnionError::UnexpectedNull { type_name }
    }

    /// The union type the error was raised for.
    pub const fn type_name(&self) -> &'static str {
        match self {
            UnionError::MissingCase { type_name }
            | UnionError::UnknownCase { type_name, .. }
            | UnionError::UnknownIndex { type_name, .. }
            | UnionError::MissingField { type_name, .. }
            | UnionError::UnexpectedNull { type_name } => *type_name,
            #[cfg(feature = "serde")]
            UnionError::InvalidField { type_name, .. } => *type_name,
        }
    }
}

pub type Result<T> = std::result::Result<T, UnionError>;
