/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use serde::de::value::MapDeserializer;
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};

use crate::error::Error;
use crate::types::{OptionValue, Options};

/// Populate `T` from an endpoint's option bag.
///
/// Every option key is matched against the field of `T` with the same serde name. Keys `T`
/// doesn't declare are ignored, and fields with no matching key keep their default as long as
/// `T` is `#[serde(default)]`. String fields accept any scalar as its text. Any other value whose
/// shape doesn't fit its field (e.g. a string for a `bool`) fails with
/// [`ErrorKind::Serialization`] naming the option key.
///
/// [`ErrorKind::Serialization`]: crate::error::ErrorKind::Serialization
pub fn project<T>(options: &Options) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let entries = options.iter().map(|(key, value)| {
        (
            key.clone(),
            OptionDeserializer {
                key: key.clone(),
                value: value.clone(),
            },
        )
    });
    let deserializer: MapDeserializer<'_, _, ProjectionError> = MapDeserializer::new(entries);
    let projected = T::deserialize(deserializer)?;
    Ok(projected)
}

/// Failure to project a single option.
#[derive(Debug)]
pub struct ProjectionError {
    key: Option<String>,
    message: String,
}

impl ProjectionError {
    /// The option key that failed to project, if it is known
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn at(mut self, key: String) -> Self {
        self.key.get_or_insert(key);
        self
    }
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "option `{key}`: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProjectionError {}

impl de::Error for ProjectionError {
    fn custom<M: fmt::Display>(msg: M) -> Self {
        ProjectionError {
            key: None,
            message: msg.to_string(),
        }
    }
}

/// Deserializer for one option value that remembers which key it came from.
struct OptionDeserializer {
    key: String,
    value: OptionValue,
}

impl<'de> IntoDeserializer<'de, ProjectionError> for OptionDeserializer {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

impl<'de> de::Deserializer<'de> for OptionDeserializer {
    type Error = ProjectionError;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let OptionDeserializer { key, value } = self;
        let result: Result<V::Value, ProjectionError> = match value {
            OptionValue::Bool(v) => visitor.visit_bool(v),
            OptionValue::Integer(v) => visitor.visit_i64(v),
            OptionValue::Float(v) => visitor.visit_f64(v),
            OptionValue::String(v) => visitor.visit_string(v),
        };
        result.map_err(|err| err.at(key))
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    /// Any scalar fits a string field as its text, e.g. `bucket_name: 20240101`.
    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let OptionDeserializer { key, value } = self;
        let text = match value {
            OptionValue::Bool(v) => v.to_string(),
            OptionValue::Integer(v) => v.to_string(),
            OptionValue::Float(v) => v.to_string(),
            OptionValue::String(v) => v,
        };
        let result: Result<V::Value, ProjectionError> = visitor.visit_string(text);
        result.map_err(|err| err.at(key))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct enum
        identifier ignored_any
    }
}
