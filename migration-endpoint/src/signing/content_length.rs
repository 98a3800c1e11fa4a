/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::context::BeforeTransmitInterceptorContextMut;
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::orchestrator::HttpRequest;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::config_bag::ConfigBag;

const CONTENT_LENGTH: &str = "content-length";

/// Sets an explicit `Content-Length` on every signed request.
///
/// SigV2 services don't accept chunked or unset lengths, so a body whose length can't be
/// determined fails the request before it is sent.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ContentLengthInterceptor;

impl Intercept for ContentLengthInterceptor {
    fn name(&self) -> &'static str {
        "ContentLengthInterceptor"
    }

    fn modify_before_transmit(
        &self,
        context: &mut BeforeTransmitInterceptorContextMut<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        ensure_content_length(context.request_mut())
    }
}

fn ensure_content_length(request: &mut HttpRequest) -> Result<(), BoxError> {
    if request.headers().get(CONTENT_LENGTH).is_some() {
        return Ok(());
    }
    let length = request
        .body()
        .content_length()
        .ok_or("request body length is unknown, legacy signing requires an explicit Content-Length")?;
    request
        .headers_mut()
        .insert(CONTENT_LENGTH, length.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use aws_smithy_runtime_api::client::orchestrator::HttpRequest;
    use aws_smithy_types::body::SdkBody;

    use super::ensure_content_length;

    fn request(body: SdkBody) -> HttpRequest {
        let request = http::Request::builder()
            .method("PUT")
            .uri("https://bucket.s3.example.com/key")
            .body(body)
            .unwrap();
        HttpRequest::try_from(request).unwrap()
    }

    #[test]
    fn test_sets_length_from_body() {
        let mut req = request(SdkBody::from("hello"));
        ensure_content_length(&mut req).unwrap();
        assert_eq!(Some("5"), req.headers().get("content-length"));
    }

    #[test]
    fn test_empty_body_gets_zero_length() {
        let mut req = request(SdkBody::empty());
        ensure_content_length(&mut req).unwrap();
        assert_eq!(Some("0"), req.headers().get("content-length"));
    }

    #[test]
    fn test_existing_length_is_kept() {
        let mut req = request(SdkBody::from("hello"));
        req.headers_mut().insert("content-length", "5");
        ensure_content_length(&mut req).unwrap();
        assert_eq!(Some("5"), req.headers().get("content-length"));
    }
}
