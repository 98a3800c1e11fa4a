/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{self, Error};
use crate::provider::{aliyun, s3};
use crate::task::{Task, TaskSource};
use crate::types::{Direction, Provider};

/// Capability shared by every provider adapter: build a ready-to-use client for one side of a
/// migration task.
///
/// Construction is one-shot. Either a fully configured client is returned or an error is, and
/// nothing is retried.
pub trait EndpointClientBuilder {
    /// Network transport the provider client can be configured with, e.g. to share a
    /// connection pool or to intercept requests in tests.
    type Transport;

    /// The client this builder produces.
    type Client;

    /// Build a client for the endpoint `direction` selects from `task`.
    ///
    /// When `transport` is `None` the provider's default transport is used.
    fn build(
        &self,
        task: &Task,
        direction: Direction,
        transport: Option<Self::Transport>,
    ) -> Result<Self::Client, Error>;
}

/// A storage client for any supported provider.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum StorageClient {
    /// Aliyun OSS client
    AliyunOss(aliyun::Client),

    /// S3 client
    S3(s3::Client),
}

impl StorageClient {
    /// Path prefix scoping every object accessed through this client
    pub fn path(&self) -> &str {
        match self {
            StorageClient::AliyunOss(client) => client.path(),
            StorageClient::S3(client) => client.path(),
        }
    }

    /// The provider this client talks to
    pub fn provider(&self) -> Provider {
        match self {
            StorageClient::AliyunOss(_) => Provider::AliyunOss,
            StorageClient::S3(_) => Provider::S3,
        }
    }

    /// Returns the Aliyun OSS client, if this is one.
    pub fn as_aliyun_oss(&self) -> Option<&aliyun::Client> {
        match self {
            StorageClient::AliyunOss(client) => Some(client),
            _ => None,
        }
    }

    /// Returns the S3 client, if this is one.
    pub fn as_s3(&self) -> Option<&s3::Client> {
        match self {
            StorageClient::S3(client) => Some(client),
            _ => None,
        }
    }
}

impl From<aliyun::Client> for StorageClient {
    fn from(value: aliyun::Client) -> Self {
        StorageClient::AliyunOss(value)
    }
}

impl From<s3::Client> for StorageClient {
    fn from(value: s3::Client) -> Self {
        StorageClient::S3(value)
    }
}

/// Build a client for one side of `task`, choosing the adapter from the endpoint's provider tag.
///
/// Every provider uses its default transport. Use the provider builders directly to supply one.
pub fn build_client(task: &Task, direction: Direction) -> Result<StorageClient, Error> {
    let client = match task.endpoint(direction).provider() {
        Provider::AliyunOss => aliyun::AliyunOssBuilder
            .build(task, direction, None)?
            .into(),
        Provider::S3 => s3::S3Builder.build(task, direction, None)?.into(),
    };
    Ok(client)
}

/// Look up the current task from `source` and build a client for one side of it.
///
/// Lookup failures are reported as [`ErrorKind::TaskLookup`](crate::error::ErrorKind::TaskLookup).
pub fn build_from_source<S>(source: &S, direction: Direction) -> Result<StorageClient, Error>
where
    S: TaskSource + ?Sized,
{
    let task = source.task().map_err(error::task_lookup)?;
    build_client(&task, direction)
}
