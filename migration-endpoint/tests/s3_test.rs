/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_http_client::test_util::capture_request;
use aws_smithy_runtime::test_util::capture_test_logs::capture_test_logs;
use aws_smithy_runtime_api::client::http::SharedHttpClient;
use aws_smithy_runtime_api::client::orchestrator::HttpRequest;
use aws_smithy_types::error::display::DisplayErrorContext;
use bytes::Bytes;
use http_body_1x::{Body, Frame, SizeHint};
use migration_endpoint::error::ErrorKind;
use migration_endpoint::provider::s3::S3Builder;
use migration_endpoint::signing::SigningStage;
use migration_endpoint::types::{Direction, Provider};
use migration_endpoint::{Endpoint, EndpointClientBuilder};
use test_common::{aliyun_endpoint, s3_endpoint, task};

/// Single-frame body that doesn't report its length up front.
struct UnsizedBody(Option<Bytes>);

impl Body for UnsizedBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, Infallible>>> {
        Poll::Ready(self.0.take().map(|data| Ok(Frame::data(data))))
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::default()
    }
}

/// Send a single `PutObject` through a client built for `endpoint` and return the request that
/// would have gone over the wire.
async fn captured_put_object(endpoint: Endpoint) -> HttpRequest {
    let (http_client, rx) = capture_request(None);
    let task = task(endpoint, s3_endpoint("/unused"));
    let client = S3Builder
        .build(
            &task,
            Direction::Source,
            Some(SharedHttpClient::new(http_client)),
        )
        .unwrap();

    let _ = client
        .inner()
        .put_object()
        .bucket(client.settings().bucket_name())
        .key("photos/puppy.jpg")
        .body(ByteStream::from_static(b"hello"))
        .send()
        .await;

    rx.expect_request()
}

#[test]
fn test_empty_bucket_name() {
    let (_guard, rx) = capture_test_logs();
    let src = Endpoint::new(Provider::S3, "/")
        .option("bucket_name", "")
        .option("access_key_id", "AK")
        .option("secret_access_key", "SK");
    let task = task(src, s3_endpoint("/"));

    let err = S3Builder.build(&task, Direction::Source, None).unwrap_err();
    assert_eq!(
        &ErrorKind::EndpointInvalid {
            field: "bucket_name"
        },
        err.kind()
    );
    assert!(rx.contents().contains("bucket_name"));
}

#[test]
fn test_each_required_field() {
    let required = ["bucket_name", "access_key_id", "secret_access_key"];
    for field in required {
        let mut src = Endpoint::new(Provider::S3, "/");
        for other in required.iter().filter(|other| **other != field) {
            src = src.option(*other, "x");
        }
        let task = task(src, s3_endpoint("/"));

        let err = S3Builder.build(&task, Direction::Source, None).unwrap_err();
        assert_eq!(&ErrorKind::EndpointInvalid { field }, err.kind());
    }
}

#[test]
fn test_endpoint_may_be_empty() {
    let src = Endpoint::new(Provider::S3, "/data")
        .option("bucket_name", "b")
        .option("access_key_id", "AK")
        .option("secret_access_key", "SK")
        .option("region", "ap-northeast-1");
    let task = task(src, s3_endpoint("/"));

    let client = S3Builder.build(&task, Direction::Source, None).unwrap();
    assert_eq!("/data", client.path());
    assert_eq!(
        Some("ap-northeast-1"),
        client.inner().config().region().map(|r| r.as_ref())
    );
}

#[test]
fn test_wrong_shape_names_option() {
    let src = s3_endpoint("/").option("enable_signature_v2", "yes");
    let task = task(src, s3_endpoint("/"));

    let err = S3Builder.build(&task, Direction::Source, None).unwrap_err();
    assert_eq!(
        &ErrorKind::Serialization {
            key: Some("enable_signature_v2".to_owned())
        },
        err.kind()
    );
}

#[test]
fn test_numeric_bucket_name() {
    let src = s3_endpoint("/").option("bucket_name", 20240101i64);
    let task = task(src, s3_endpoint("/"));

    let client = S3Builder.build(&task, Direction::Source, None).unwrap();
    assert_eq!("20240101", client.settings().bucket_name());
}

#[test]
fn test_malformed_endpoint() {
    let src = s3_endpoint("/").option("endpoint", "bad host");
    let task = task(src, s3_endpoint("/"));

    let err = S3Builder.build(&task, Direction::Source, None).unwrap_err();
    assert_eq!(&ErrorKind::ClientConstruction, err.kind());
}

#[test]
fn test_provider_mismatch() {
    let task = task(aliyun_endpoint("/"), s3_endpoint("/"));

    let err = S3Builder.build(&task, Direction::Source, None).unwrap_err();
    assert_eq!(
        &ErrorKind::ProviderMismatch {
            expected: Provider::S3,
            found: Provider::AliyunOss,
        },
        err.kind()
    );
}

#[test]
fn test_direction_reads_only_its_endpoint() {
    let broken = Endpoint::new(Provider::S3, "/broken").option("bucket_name", "b");
    let task = task(s3_endpoint("/src"), broken);

    let client = S3Builder.build(&task, Direction::Source, None).unwrap();
    assert_eq!("/src", client.path());

    let err = S3Builder
        .build(&task, Direction::Destination, None)
        .unwrap_err();
    assert_eq!(
        &ErrorKind::EndpointInvalid {
            field: "access_key_id"
        },
        err.kind()
    );
}

#[test]
fn test_swapping_endpoints_and_direction() {
    let a = s3_endpoint("/a").option("region", "eu-west-1");
    let b = s3_endpoint("/b").option("enable_signature_v2", true);

    let forward = S3Builder
        .build(&task(a.clone(), b.clone()), Direction::Source, None)
        .unwrap();
    let swapped = S3Builder
        .build(&task(b, a), Direction::Destination, None)
        .unwrap();

    assert_eq!(forward.settings(), swapped.settings());
    assert_eq!(forward.signing_chain(), swapped.signing_chain());
    assert_eq!("/a", swapped.path());
}

#[test]
fn test_default_signing_chain() {
    let task = task(s3_endpoint("/"), s3_endpoint("/"));
    let client = S3Builder.build(&task, Direction::Source, None).unwrap();

    let chain = client.signing_chain();
    assert_eq!(SigningStage::SigV4, chain.signer());
    assert!(!chain.contains(SigningStage::SigV2));
    assert!(!chain.contains(SigningStage::ContentLength));
}

#[test]
fn test_legacy_signing_chain() {
    let src = s3_endpoint("/").option("enable_signature_v2", true);
    let task = task(src, s3_endpoint("/"));
    let client = S3Builder.build(&task, Direction::Source, None).unwrap();

    let chain = client.signing_chain();
    assert_eq!(
        &[SigningStage::SigV2, SigningStage::ContentLength],
        chain.stages()
    );
    assert!(!chain.contains(SigningStage::SigV4));
}

#[tokio::test]
async fn test_default_requests_use_sigv4() {
    let request = captured_put_object(s3_endpoint("/")).await;

    let authorization = request.headers().get("authorization").unwrap();
    assert!(
        authorization.starts_with("AWS4-HMAC-SHA256 Credential=AK/"),
        "{authorization}"
    );
}

#[tokio::test]
async fn test_legacy_requests_use_sigv2() {
    let endpoint = s3_endpoint("/").option("enable_signature_v2", true);
    let request = captured_put_object(endpoint).await;

    let authorization = request.headers().get("authorization").unwrap();
    assert!(authorization.starts_with("AWS AK:"), "{authorization}");
    assert!(!authorization.contains("AWS4-HMAC-SHA256"));
    assert!(request.headers().get("date").is_some());
    assert_eq!(Some("5"), request.headers().get("content-length"));
}

#[tokio::test]
async fn test_legacy_requests_path_style() {
    let endpoint = s3_endpoint("/")
        .option("enable_signature_v2", true)
        .option("path_style", true);
    let request = captured_put_object(endpoint).await;

    assert!(
        request.uri().starts_with("https://s3.example.com/b/photos/puppy.jpg"),
        "{}",
        request.uri()
    );
    assert!(request
        .headers()
        .get("authorization")
        .unwrap()
        .starts_with("AWS AK:"));
}

#[tokio::test]
async fn test_legacy_requests_need_known_length() {
    let (http_client, _rx) = capture_request(None);
    let src = s3_endpoint("/").option("enable_signature_v2", true);
    let task = task(src, s3_endpoint("/"));
    let client = S3Builder
        .build(
            &task,
            Direction::Source,
            Some(SharedHttpClient::new(http_client)),
        )
        .unwrap();

    let err = client
        .inner()
        .put_object()
        .bucket("b")
        .key("stream")
        .body(ByteStream::from_body_1_x(UnsizedBody(Some(
            Bytes::from_static(b"hello"),
        ))))
        .send()
        .await
        .unwrap_err();
    let message = format!("{}", DisplayErrorContext(&err));
    assert!(message.contains("length is unknown"), "{message}");
}
