/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::config::{Builder, RequestChecksumCalculation};

use crate::provider::s3::S3Settings;

mod content_length;
mod sigv2;

use content_length::ContentLengthInterceptor;
use sigv2::SigV2AuthScheme;

/// A single stage of the request signing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningStage {
    /// AWS signature version 4, installed by the SDK by default
    SigV4,

    /// Legacy S3 signature version 2
    SigV2,

    /// Sets `Content-Length` on every request after it is signed
    ContentLength,
}

impl SigningStage {
    fn is_signer(&self) -> bool {
        matches!(self, SigningStage::SigV4 | SigningStage::SigV2)
    }
}

/// Ordered signing pipeline for an S3 client.
///
/// The chain is resolved once from the endpoint settings and attached to the client
/// configuration at construction time. It can't be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningChain {
    stages: Vec<SigningStage>,
}

impl SigningChain {
    /// Resolve the pipeline for the given legacy signing toggle.
    ///
    /// The legacy pipeline replaces the whole default chain rather than just the signer.
    pub fn resolve(enable_signature_v2: bool) -> Self {
        let stages = if enable_signature_v2 {
            vec![SigningStage::SigV2, SigningStage::ContentLength]
        } else {
            vec![SigningStage::SigV4]
        };
        Self { stages }
    }

    /// The stages in the order they run.
    pub fn stages(&self) -> &[SigningStage] {
        &self.stages
    }

    /// Returns true if `stage` is part of this chain.
    pub fn contains(&self, stage: SigningStage) -> bool {
        self.stages.contains(&stage)
    }

    /// The signer every request made with this chain is authenticated with.
    pub fn signer(&self) -> SigningStage {
        self.stages
            .iter()
            .copied()
            .find(SigningStage::is_signer)
            .expect("signing chain has a signer")
    }

    /// Install the chain on an S3 config builder.
    ///
    /// # Panics
    ///
    /// Panics if the chain does not hold exactly one signer ahead of every other stage. Chains
    /// built with [`SigningChain::resolve`] always do.
    pub(crate) fn apply(&self, mut config: Builder, settings: &S3Settings) -> Builder {
        let signers = self.stages.iter().filter(|s| s.is_signer()).count();
        assert_eq!(1, signers, "signing chain must hold exactly one signer");
        assert!(
            self.stages.first().is_some_and(SigningStage::is_signer),
            "signer must run before any other signing stage"
        );

        for stage in &self.stages {
            config = match stage {
                SigningStage::SigV4 => config,
                SigningStage::SigV2 => config
                    .push_auth_scheme(SigV2AuthScheme::new(
                        settings.bucket_name(),
                        settings.path_style(),
                    ))
                    // SigV2 services reject aws-chunked bodies, only send checksums S3 demands
                    .request_checksum_calculation(RequestChecksumCalculation::WhenRequired),
                SigningStage::ContentLength => config.interceptor(ContentLengthInterceptor),
            };
        }
        tracing::debug!(stages = ?self.stages, "installed signing chain");
        config
    }
}
