//! Submission gateway trait.
//!
//! The form layer submits through this seam so tests can stand in
//! for the network.

use std::sync::Arc;

use async_trait::async_trait;

use yeka_core::{MultipartBody, SubmissionResult};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::progress::ProgressFn;

/// Accepts encoded submissions and returns the issued ticket.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(
        &self,
        endpoint: &str,
        body: &MultipartBody,
        on_progress: Option<ProgressFn>,
    ) -> ApiResult<SubmissionResult>;
}

/// Gateway that posts to the live API.
pub struct HttpSubmissionGateway {
    api: Arc<ApiClient>,
}

impl HttpSubmissionGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit(
        &self,
        endpoint: &str,
        body: &MultipartBody,
        on_progress: Option<ProgressFn>,
    ) -> ApiResult<SubmissionResult> {
        self.api
            .resource::<SubmissionResult>(endpoint)
            .post_multipart(body, on_progress)
            .await
    }
}
