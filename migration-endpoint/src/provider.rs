/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::config::{self, Settings};
use crate::error::{self, Error};
use crate::task::Task;
use crate::types::Direction;

/// Aliyun Object Storage Service clients
pub mod aliyun;

/// Amazon S3 and S3-compatible clients
pub mod s3;

/// Resolve, project and validate the settings for one side of `task`.
///
/// On success the settings carry the endpoint's path prefix.
pub(crate) fn prepare<S>(task: &Task, direction: Direction) -> Result<S, Error>
where
    S: Settings,
{
    let provider = S::PROVIDER;
    let endpoint = task.endpoint(direction);
    if endpoint.provider() != provider {
        return Err(error::provider_mismatch(provider, endpoint.provider()));
    }

    let mut settings: S = config::project(endpoint.options())?;
    settings.validate()?;
    settings.set_path(endpoint.path().to_owned());
    tracing::debug!(%provider, %direction, "endpoint settings validated");
    Ok(settings)
}
