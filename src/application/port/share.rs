// SPDX-License-Identifier: MPL-2.0
//! Share sheet port definition.

use futures_util::future::BoxFuture;

/// Content handed to the platform share surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub message: String,
    pub media_url: String,
}

/// How the user left the share surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("Share surface unavailable")]
    Unavailable,

    #[error("Share failed: {0}")]
    Failed(String),
}

/// Port for the platform share surface.
///
/// Every outcome, including errors, is non-fatal to the caller.
pub trait ShareSheet: Send + Sync {
    fn share(&self, request: ShareRequest) -> BoxFuture<'static, Result<ShareOutcome, ShareError>>;
}
