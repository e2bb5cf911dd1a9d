// union_types/src/de.rs

//! Support for generated `Deserialize` impls: the object is buffered once,
//! then the case field and each argument are read out by name.

use std::str::FromStr;

use serde::de::{DeserializeOwned, Deserializer, Error};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::UnionError;

/// A buffered JSON object for one union value.
#[derive(Debug)]
pub struct CaseFields {
    type_name: &'static str,
    case_field: String,
    fields: Map<String, Value>,
}

impl CaseFields {
    /// Buffers the next value. `null` yields `None`; anything other than an
    /// object is an error.
    pub fn read<'de, D>(
        deserializer: D,
        type_name: &'static str,
        case_field: &str,
    ) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Option::<Map<String, Value>>::deserialize(deserializer).map_err(|e| {
            D::Error::custom(format_args!(
                "Unable to deserialize instance of {type_name}: {e}"
            ))
        })?;
        Ok(fields.map(|fields| CaseFields {
            type_name,
            case_field: case_field.to_string(),
            fields,
        }))
    }

    /// Parses the case field into the tag type.
    pub fn case<C>(&self) -> Result<C, UnionError>
    where
        C: FromStr<Err = UnionError>,
    {
        match self.fields.get(&self.case_field) {
            Some(Value::String(name)) => name.parse(),
            Some(Value::Null) | None => Err(UnionError::missing_case(self.type_name)),
            Some(other) => Err(UnionError::unknown_case(self.type_name, other.to_string())),
        }
    }

    /// Reads a required argument.
    pub fn field<V>(&self, name: &str) -> Result<V, UnionError>
    where
        V: DeserializeOwned,
    {
        match self.fields.get(name) {
            Some(value) => self.decode(name, value),
            None => Err(UnionError::missing_field(self.type_name, name)),
        }
    }

    /// Reads an optional argument; absence yields `V::default()`.
    pub fn field_or_default<V>(&self, name: &str) -> Result<V, UnionError>
    where
        V: DeserializeOwned + Default,
    {
        match self.fields.get(name) {
            Some(value) => self.decode(name, value),
            None => Ok(V::default()),
        }
    }

    fn decode<V>(&self, name: &str, value: &Value) -> Result<V, UnionError>
    where
        V: DeserializeOwned,
    {
        V::deserialize(value).map_err(|source| UnionError::InvalidField {
            type_name: self.type_name,
            field: name.to_string(),
            source,
        })
    }
}
