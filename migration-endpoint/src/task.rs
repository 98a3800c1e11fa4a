/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use serde::Deserialize;

use crate::error::BoxError;
use crate::types::{Direction, OptionValue, Options, Provider};

/// A single migration run between a source and a destination endpoint.
///
/// Tasks are owned by the task store; this crate only ever reads them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    #[serde(default)]
    name: String,
    src: Endpoint,
    dst: Endpoint,
}

impl Task {
    /// Create a new task from its two endpoints.
    pub fn new(name: impl Into<String>, src: Endpoint, dst: Endpoint) -> Self {
        Self {
            name: name.into(),
            src,
            dst,
        }
    }

    /// The task name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The endpoint objects are read from
    pub fn src(&self) -> &Endpoint {
        &self.src
    }

    /// The endpoint objects are written to
    pub fn dst(&self) -> &Endpoint {
        &self.dst
    }

    /// Returns the endpoint for the given direction.
    pub fn endpoint(&self, direction: Direction) -> &Endpoint {
        match direction {
            Direction::Source => &self.src,
            Direction::Destination => &self.dst,
        }
    }
}

/// Description of one side of a migration task.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "type")]
    provider: Provider,
    #[serde(default)]
    path: String,
    #[serde(default)]
    options: Options,
}

impl Endpoint {
    /// Create a new endpoint description.
    pub fn new(provider: Provider, path: impl Into<String>) -> Self {
        Self {
            provider,
            path: path.into(),
            options: Options::new(),
        }
    }

    /// Set a single option, replacing any previous value for `key`.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The provider this endpoint is hosted on
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Prefix scoping every object key accessed through this endpoint
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw provider options
    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// Source of the task a client is built for.
///
/// Implemented by the task store; [`Task`] implements it for callers that already hold one.
pub trait TaskSource {
    /// Look up the current task.
    fn task(&self) -> Result<Task, BoxError>;
}

impl TaskSource for Task {
    fn task(&self) -> Result<Task, BoxError> {
        Ok(self.clone())
    }
}
