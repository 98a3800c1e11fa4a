/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Which side of a migration task an endpoint client is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The endpoint objects are read from.
    Source,

    /// The endpoint objects are written to.
    Destination,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Source => write!(f, "source"),
            Direction::Destination => write!(f, "destination"),
        }
    }
}

/// Object storage service an endpoint is hosted on.
///
/// Deserialized from the endpoint's `type` tag in a persisted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[non_exhaustive]
pub enum Provider {
    /// Aliyun Object Storage Service
    #[serde(rename = "aliyun")]
    AliyunOss,

    /// Amazon S3 or any S3-compatible service
    #[serde(rename = "s3")]
    S3,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::AliyunOss => write!(f, "aliyun"),
            Provider::S3 => write!(f, "s3"),
        }
    }
}

/// A single untyped endpoint option value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean toggle, e.g. `path_style: true`
    Bool(bool),

    /// Whole number
    Integer(i64),

    /// Floating point number
    Float(f64),

    /// Free-form string
    String(String),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_owned())
    }
}

/// Provider-agnostic option bag attached to an endpoint.
pub type Options = HashMap<String, OptionValue>;
