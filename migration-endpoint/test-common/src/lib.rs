/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use migration_endpoint::types::Provider;
use migration_endpoint::{Endpoint, Task};

/// An S3 endpoint with every required setting present.
pub fn s3_endpoint(path: &str) -> Endpoint {
    Endpoint::new(Provider::S3, path)
        .option("endpoint", "s3.example.com")
        .option("bucket_name", "b")
        .option("access_key_id", "AK")
        .option("secret_access_key", "SK")
}

/// An Aliyun OSS endpoint with every required setting present.
pub fn aliyun_endpoint(path: &str) -> Endpoint {
    Endpoint::new(Provider::AliyunOss, path)
        .option("endpoint", "oss-cn.example.com")
        .option("bucket_name", "b")
        .option("access_key_id", "AK")
        .option("access_key_secret", "SK")
}

/// Create a task migrating from `src` to `dst`
pub fn task(src: Endpoint, dst: Endpoint) -> Task {
    Task::new("test-task", src, dst)
}

/// Load a task from its persisted JSON form, panicking on malformed input.
pub fn task_from_json(json: &str) -> Task {
    serde_json::from_str(json).expect("valid task json")
}
