/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use opendal::raw::HttpClient;
use opendal::services::Oss;
use opendal::Operator;
use serde::Deserialize;

use crate::client::EndpointClientBuilder;
use crate::config::{Settings, Validate};
use crate::error::Error;
use crate::provider;
use crate::task::Task;
use crate::types::{Direction, Provider};

/// Settings for an Aliyun OSS endpoint.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AliyunOssSettings {
    endpoint: String,
    bucket_name: String,
    access_key_id: String,
    access_key_secret: String,

    #[serde(skip)]
    path: String,
}

impl AliyunOssSettings {
    /// OSS endpoint, e.g. `oss-cn-hangzhou.aliyuncs.com`
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Bucket the endpoint is scoped to
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Access key ID
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Path prefix copied from the endpoint description
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for AliyunOssSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliyunOssSettings")
            .field("endpoint", &self.endpoint)
            .field("bucket_name", &self.bucket_name)
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"** redacted **")
            .field("path", &self.path)
            .finish()
    }
}

impl Validate for AliyunOssSettings {
    const PROVIDER: Provider = Provider::AliyunOss;

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("endpoint", self.endpoint.as_str()),
            ("bucket_name", self.bucket_name.as_str()),
            ("access_key_id", self.access_key_id.as_str()),
            ("access_key_secret", self.access_key_secret.as_str()),
        ]
    }
}

impl Settings for AliyunOssSettings {
    fn set_path(&mut self, path: String) {
        self.path = path;
    }
}

/// Client for one Aliyun OSS endpoint of a migration task.
#[derive(Debug, Clone)]
pub struct Client {
    settings: AliyunOssSettings,
    bucket: Operator,
}

impl Client {
    /// Path prefix scoping every object accessed through this client
    pub fn path(&self) -> &str {
        self.settings.path()
    }

    /// The validated settings this client was built from
    pub fn settings(&self) -> &AliyunOssSettings {
        &self.settings
    }

    /// Operator bound to the configured bucket
    pub fn bucket(&self) -> &Operator {
        &self.bucket
    }
}

/// Builds [`Client`]s for endpoints tagged [`Provider::AliyunOss`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AliyunOssBuilder;

impl EndpointClientBuilder for AliyunOssBuilder {
    type Transport = HttpClient;
    type Client = Client;

    #[tracing::instrument(skip_all, level = "debug", name = "build-aliyun-oss-client", fields(
        task = task.name(),
        %direction,
    ))]
    fn build(
        &self,
        task: &Task,
        direction: Direction,
        transport: Option<HttpClient>,
    ) -> Result<Client, Error> {
        let settings: AliyunOssSettings = provider::prepare(task, direction)?;

        let builder = Oss::default()
            .endpoint(&settings.endpoint)
            .bucket(&settings.bucket_name)
            .access_key_id(&settings.access_key_id)
            .access_key_secret(&settings.access_key_secret);

        let builder = match transport {
            // allow deprecated api here for compatibility
            #[allow(deprecated)]
            Some(http_client) => builder.http_client(http_client),
            None => builder,
        };

        let bucket = Operator::new(builder)?.finish();
        Ok(Client { settings, bucket })
    }
}
