/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::config::{BehaviorVersion, Credentials};
use aws_smithy_runtime_api::client::http::SharedHttpClient;
use aws_types::region::Region;
use serde::Deserialize;
use url::Url;

use crate::client::EndpointClientBuilder;
use crate::config::{Settings, Validate};
use crate::error::{self, Error};
use crate::provider;
use crate::signing::SigningChain;
use crate::task::Task;
use crate::types::{Direction, Provider};

/// Region used when an endpoint doesn't configure one.
pub const DEFAULT_REGION: &str = "us-east-1";

const CREDENTIALS_PROVIDER_NAME: &str = "migration-endpoint";

/// Settings for an S3 or S3-compatible endpoint.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct S3Settings {
    bucket_name: String,
    endpoint: String,
    region: String,
    access_key_id: String,
    secret_access_key: String,
    disable_ssl: bool,
    use_accelerate: bool,
    path_style: bool,
    enable_list_objects_v2: bool,
    enable_signature_v2: bool,
    disable_uri_cleaning: bool,

    #[serde(skip)]
    path: String,
}

impl S3Settings {
    /// Bucket the endpoint is scoped to
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Service endpoint. Empty selects the SDK's endpoint for [`region`](Self::region).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Signing region, [`DEFAULT_REGION`] when unset
    pub fn region(&self) -> &str {
        if self.region.is_empty() {
            DEFAULT_REGION
        } else {
            &self.region
        }
    }

    /// Access key ID
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Use `http` for endpoints configured without a scheme
    pub fn disable_ssl(&self) -> bool {
        self.disable_ssl
    }

    /// Use the S3 transfer acceleration endpoint
    pub fn use_accelerate(&self) -> bool {
        self.use_accelerate
    }

    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    pub fn path_style(&self) -> bool {
        self.path_style
    }

    /// Whether listings should use `ListObjectsV2`
    pub fn enable_list_objects_v2(&self) -> bool {
        self.enable_list_objects_v2
    }

    /// Sign requests with the legacy signature version 2
    pub fn enable_signature_v2(&self) -> bool {
        self.enable_signature_v2
    }

    /// Keep object keys exactly as given, e.g. `a//b` is not collapsed to `a/b`.
    ///
    /// The Rust SDK never rewrites key separators, so this is always honored; it is kept so the
    /// transfer engine can apply the same rule to keys it derives itself.
    pub fn disable_uri_cleaning(&self) -> bool {
        self.disable_uri_cleaning
    }

    /// Path prefix copied from the endpoint description
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fully qualified endpoint URL, or `None` when the SDK should resolve one.
    fn endpoint_url(&self) -> Result<Option<String>, Error> {
        if self.endpoint.is_empty() {
            return Ok(None);
        }

        let endpoint = if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else {
            let scheme = if self.disable_ssl { "http" } else { "https" };
            format!("{scheme}://{}", self.endpoint)
        };

        let url = Url::parse(&endpoint)?;
        if url.host_str().is_none() {
            return Err(error::construction_failed(format!(
                "endpoint `{endpoint}` has no host"
            )));
        }
        Ok(Some(endpoint))
    }
}

impl fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Settings")
            .field("bucket_name", &self.bucket_name)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("disable_ssl", &self.disable_ssl)
            .field("use_accelerate", &self.use_accelerate)
            .field("path_style", &self.path_style)
            .field("enable_list_objects_v2", &self.enable_list_objects_v2)
            .field("enable_signature_v2", &self.enable_signature_v2)
            .field("disable_uri_cleaning", &self.disable_uri_cleaning)
            .field("path", &self.path)
            .finish()
    }
}

impl Validate for S3Settings {
    const PROVIDER: Provider = Provider::S3;

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("bucket_name", self.bucket_name.as_str()),
            ("access_key_id", self.access_key_id.as_str()),
            ("secret_access_key", self.secret_access_key.as_str()),
        ]
    }
}

impl Settings for S3Settings {
    fn set_path(&mut self, path: String) {
        self.path = path;
    }
}

/// Client for one S3 endpoint of a migration task.
#[derive(Debug, Clone)]
pub struct Client {
    settings: S3Settings,
    signing_chain: SigningChain,
    inner: aws_sdk_s3::Client,
}

impl Client {
    /// Path prefix scoping every object accessed through this client
    pub fn path(&self) -> &str {
        self.settings.path()
    }

    /// The validated settings this client was built from
    pub fn settings(&self) -> &S3Settings {
        &self.settings
    }

    /// The signing pipeline installed on [`inner`](Self::inner)
    pub fn signing_chain(&self) -> &SigningChain {
        &self.signing_chain
    }

    /// The Amazon S3 client instance that will be used to send requests to S3.
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Builds [`Client`]s for endpoints tagged [`Provider::S3`].
#[derive(Debug, Clone, Copy, Default)]
pub struct S3Builder;

impl EndpointClientBuilder for S3Builder {
    type Transport = SharedHttpClient;
    type Client = Client;

    #[tracing::instrument(skip_all, level = "debug", name = "build-s3-client", fields(
        task = task.name(),
        %direction,
    ))]
    fn build(
        &self,
        task: &Task,
        direction: Direction,
        transport: Option<SharedHttpClient>,
    ) -> Result<Client, Error> {
        let settings: S3Settings = provider::prepare(task, direction)?;
        let endpoint_url = settings.endpoint_url()?;

        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );
        let mut config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(settings.region().to_owned()))
            .force_path_style(settings.path_style)
            .accelerate(settings.use_accelerate);

        if let Some(endpoint_url) = endpoint_url {
            config = config.endpoint_url(endpoint_url);
        }
        if let Some(http_client) = transport {
            config = config.http_client(http_client);
        }

        let signing_chain = SigningChain::resolve(settings.enable_signature_v2);
        let config = signing_chain.apply(config, &settings);

        let inner = aws_sdk_s3::Client::from_conf(config.build());
        Ok(Client {
            settings,
            signing_chain,
            inner,
        })
    }
}
