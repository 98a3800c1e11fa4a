/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use serde::de::DeserializeOwned;

use crate::error::{self, Error};
use crate::types::Provider;

/// Projection of untyped endpoint options onto typed settings
pub mod projector;

pub use projector::project;

/// Presence checks for settings a provider can't work without.
pub trait Validate {
    /// Provider the settings belong to, used for diagnostics.
    const PROVIDER: Provider;

    /// Required settings as `(option name, value)` pairs, in the order they are checked.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    /// Check every required setting is non-empty.
    ///
    /// Stops at the first empty setting and returns [`ErrorKind::EndpointInvalid`] naming it.
    ///
    /// [`ErrorKind::EndpointInvalid`]: crate::error::ErrorKind::EndpointInvalid
    fn validate(&self) -> Result<(), Error> {
        for (field, value) in self.required_fields() {
            if value.is_empty() {
                let provider = Self::PROVIDER;
                tracing::error!(%provider, field, "endpoint setting can't be empty");
                return Err(error::endpoint_invalid(Self::PROVIDER, field));
            }
        }
        Ok(())
    }
}

/// Typed provider settings that can be projected from an endpoint's options.
pub trait Settings: DeserializeOwned + Validate {
    /// Record the endpoint's path prefix.
    fn set_path(&mut self, path: String);
}
