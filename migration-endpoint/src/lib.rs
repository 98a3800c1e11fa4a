/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Endpoint clients for object storage migrations.
//!
//! A migration [`Task`] names a source and a destination endpoint. This crate turns one of those
//! endpoint descriptions into a ready-to-use storage client: it projects the endpoint's untyped
//! options onto typed provider settings, checks the settings a provider can't work without, and
//! constructs the provider client with the right request signing pipeline.
//!
//! Supported providers:
//!
//! * Aliyun OSS, see [`provider::aliyun`]
//! * Amazon S3 and S3-compatible services, see [`provider::s3`]
//!
//! # Examples
//!
//! Build the destination client of a task, whatever its provider:
//!
//! ```no_run
//! # fn example(task: &migration_endpoint::Task) -> Result<(), migration_endpoint::error::Error> {
//! use migration_endpoint::types::Direction;
//!
//! let client = migration_endpoint::build_client(task, Direction::Destination)?;
//! println!("writing under {}", client.path());
//! # Ok(())
//! # }
//! ```
//!
//! Build an S3 client that shares a connection pool with the rest of the process:
//!
//! ```no_run
//! # fn example(
//! #     task: &migration_endpoint::Task,
//! #     http_client: aws_smithy_runtime_api::client::http::SharedHttpClient,
//! # ) -> Result<(), migration_endpoint::error::Error> {
//! use migration_endpoint::provider::s3::S3Builder;
//! use migration_endpoint::types::Direction;
//! use migration_endpoint::EndpointClientBuilder;
//!
//! let client = S3Builder.build(task, Direction::Source, Some(http_client))?;
//! let _s3 = client.inner();
//! # Ok(())
//! # }
//! ```

/// Error types emitted by `migration-endpoint`
pub mod error;

/// Common types used by `migration-endpoint`
pub mod types;

/// Migration tasks and their endpoint descriptions
pub mod task;

/// Typed endpoint settings
pub mod config;

/// Request signing pipelines
pub mod signing;

/// Provider client adapters
pub mod provider;

/// Provider-agnostic client construction
pub mod client;

pub use self::client::{build_client, build_from_source, EndpointClientBuilder, StorageClient};
pub use self::task::{Endpoint, Task, TaskSource};
