/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::BTreeMap;

use aws_runtime::auth::sigv4::SCHEME_ID as SIGV4_SCHEME_ID;
use aws_sdk_s3::config::Credentials;
use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::auth::{
    AuthScheme, AuthSchemeEndpointConfig, AuthSchemeId, Sign,
};
use aws_smithy_runtime_api::client::identity::{Identity, SharedIdentityResolver};
use aws_smithy_runtime_api::client::orchestrator::HttpRequest;
use aws_smithy_runtime_api::client::runtime_components::{
    GetIdentityResolver, RuntimeComponents,
};
use aws_smithy_types::config_bag::ConfigBag;
use aws_smithy_types::date_time::{DateTime, Format};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// Query parameters that identify an S3 sub-resource and take part in the signature.
///
/// Sorted, so the canonical resource can be built by filtering in order.
const SUB_RESOURCES: &[&str] = &[
    "acl",
    "cors",
    "delete",
    "lifecycle",
    "location",
    "logging",
    "notification",
    "partNumber",
    "policy",
    "requestPayment",
    "response-cache-control",
    "response-content-disposition",
    "response-content-encoding",
    "response-content-language",
    "response-content-type",
    "response-expires",
    "restore",
    "tagging",
    "torrent",
    "uploadId",
    "uploads",
    "versionId",
    "versioning",
    "versions",
    "website",
];

/// Auth scheme that signs S3 requests with signature version 2.
///
/// Registered under the SigV4 scheme ID so it takes the default signer's place in the
/// client's auth scheme table instead of running next to it. Credentials come from the
/// identity resolver configured for that scheme.
#[derive(Debug)]
pub(crate) struct SigV2AuthScheme {
    signer: SigV2Signer,
}

impl SigV2AuthScheme {
    pub(crate) fn new(bucket: &str, path_style: bool) -> Self {
        Self {
            signer: SigV2Signer {
                bucket: bucket.to_owned(),
                path_style,
            },
        }
    }
}

impl AuthScheme for SigV2AuthScheme {
    fn scheme_id(&self) -> AuthSchemeId {
        SIGV4_SCHEME_ID
    }

    fn identity_resolver(
        &self,
        identity_resolvers: &dyn GetIdentityResolver,
    ) -> Option<SharedIdentityResolver> {
        identity_resolvers.identity_resolver(self.scheme_id())
    }

    fn signer(&self) -> &dyn Sign {
        &self.signer
    }
}

/// Signature version 2 request signer.
#[derive(Debug)]
pub(crate) struct SigV2Signer {
    bucket: String,
    path_style: bool,
}

impl Sign for SigV2Signer {
    fn sign_http_request(
        &self,
        request: &mut HttpRequest,
        identity: &Identity,
        _auth_scheme_endpoint_config: AuthSchemeEndpointConfig<'_>,
        runtime_components: &RuntimeComponents,
        _config_bag: &ConfigBag,
    ) -> Result<(), BoxError> {
        let credentials = identity
            .data::<Credentials>()
            .ok_or("wrong identity type for SigV2, expected AWS credentials")?;
        let now = runtime_components
            .time_source()
            .ok_or("a time source is required to sign requests")?
            .now();
        let date = DateTime::from(now).fmt(Format::HttpDate)?;
        self.sign(request, credentials, &date)
    }
}

impl SigV2Signer {
    fn sign(
        &self,
        request: &mut HttpRequest,
        credentials: &Credentials,
        date: &str,
    ) -> Result<(), BoxError> {
        if let Some(token) = credentials.session_token() {
            request
                .headers_mut()
                .insert("x-amz-security-token", token.to_owned());
        }
        request.headers_mut().insert("date", date.to_owned());

        let url = Url::parse(request.uri())?;
        let resource = self.canonical_resource(&url);
        let string_to_sign = string_to_sign(request, &resource);
        tracing::trace!(%string_to_sign, "signing request with SigV2");

        let signature = signature(credentials.secret_access_key(), &string_to_sign)?;
        request.headers_mut().insert(
            "authorization",
            format!("AWS {}:{}", credentials.access_key_id(), signature),
        );
        Ok(())
    }

    /// `/bucket/key?sub-resources`, with the bucket recovered from the host for
    /// virtual-hosted style requests.
    fn canonical_resource(&self, url: &Url) -> String {
        let mut resource = String::new();
        let virtual_host = url
            .host_str()
            .and_then(|host| host.strip_prefix(self.bucket.as_str()))
            .is_some_and(|rest| rest.starts_with('.'));
        if !self.path_style && virtual_host {
            resource.push('/');
            resource.push_str(&self.bucket);
        }
        resource.push_str(url.path());

        let mut sub_resources: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| SUB_RESOURCES.contains(&key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        sub_resources.sort();
        for (i, (key, value)) in sub_resources.iter().enumerate() {
            resource.push(if i == 0 { '?' } else { '&' });
            resource.push_str(key);
            if !value.is_empty() {
                resource.push('=');
                resource.push_str(value);
            }
        }
        resource
    }
}

fn string_to_sign(request: &HttpRequest, resource: &str) -> String {
    let headers = request.headers();
    let mut amz_headers: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for (name, value) in headers.iter() {
        let name = name.to_ascii_lowercase();
        if name.starts_with("x-amz-") {
            amz_headers.entry(name).or_default().push(value.trim());
        }
    }

    // Date is left empty when x-amz-date is present, it is signed with the amz headers instead
    let date = if amz_headers.contains_key("x-amz-date") {
        ""
    } else {
        headers.get("date").unwrap_or_default()
    };

    let mut out = format!(
        "{}\n{}\n{}\n{}\n",
        request.method(),
        headers.get("content-md5").unwrap_or_default(),
        headers.get("content-type").unwrap_or_default(),
        date,
    );
    for (name, values) in &amz_headers {
        out.push_str(name);
        out.push(':');
        out.push_str(&values.join(","));
        out.push('\n');
    }
    out.push_str(resource);
    out
}

fn signature(secret: &str, string_to_sign: &str) -> Result<String, BoxError> {
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes()).map_err(|err| err.to_string())?;
    mac.update(string_to_sign.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
