/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use crate::types::Provider;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of client construction errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The task could not be retrieved from the task source
    TaskLookup,

    /// An option value does not have the shape its settings field expects
    Serialization {
        /// The option key that failed to project, when known
        key: Option<String>,
    },

    /// A required endpoint setting is empty
    EndpointInvalid {
        /// Name of the first empty required setting
        field: &'static str,
    },

    /// The endpoint is tagged for a different provider than the builder it was handed to
    ProviderMismatch {
        /// Provider the builder constructs clients for
        expected: Provider,
        /// Provider the endpoint is tagged with
        found: Provider,
    },

    /// The underlying provider client could not be constructed
    ClientConstruction,
}

impl Error {
    /// Creates a new [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::TaskLookup => write!(f, "failed to look up task"),
            ErrorKind::Serialization { key: Some(key) } => {
                write!(f, "failed to project endpoint option `{key}`")
            }
            ErrorKind::Serialization { key: None } => write!(f, "failed to project endpoint options"),
            ErrorKind::EndpointInvalid { field } => {
                write!(f, "invalid endpoint: `{field}` can't be empty")
            }
            ErrorKind::ProviderMismatch { expected, found } => {
                write!(f, "expected a {expected} endpoint but found a {found} endpoint")
            }
            ErrorKind::ClientConstruction => write!(f, "failed to construct storage client"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<crate::config::projector::ProjectionError> for Error {
    fn from(value: crate::config::projector::ProjectionError) -> Self {
        let key = value.key().map(str::to_owned);
        Self::new(ErrorKind::Serialization { key }, value)
    }
}

impl From<opendal::Error> for Error {
    fn from(value: opendal::Error) -> Self {
        Self::new(ErrorKind::ClientConstruction, value)
    }
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Self {
        Self::new(ErrorKind::ClientConstruction, value)
    }
}

pub(crate) fn task_lookup<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::TaskLookup, err)
}

pub(crate) fn endpoint_invalid(provider: Provider, field: &'static str) -> Error {
    Error::new(
        ErrorKind::EndpointInvalid { field },
        format!("{provider} endpoint setting `{field}` can't be empty"),
    )
}

pub(crate) fn provider_mismatch(expected: Provider, found: Provider) -> Error {
    Error::new(
        ErrorKind::ProviderMismatch { expected, found },
        format!("endpoint is tagged `{found}`"),
    )
}

pub(crate) fn construction_failed<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ClientConstruction, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = endpoint_invalid(Provider::S3, "bucket_name");
        assert_eq!(
            &ErrorKind::EndpointInvalid {
                field: "bucket_name"
            },
            err.kind()
        );
        assert_eq!(
            "invalid endpoint: `bucket_name` can't be empty",
            err.to_string()
        );
    }

    #[test]
    fn test_source_is_preserved() {
        let err = task_lookup("store offline");
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!("store offline", source.to_string());
    }
}
