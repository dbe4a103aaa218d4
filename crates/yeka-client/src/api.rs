//! Typed HTTP client for the Yeka submission API.
//!
//! `ApiClient` owns the connection settings; `Resource` binds an
//! endpoint to a response type and exposes the verbs the portal
//! uses. Non-2xx responses become [`ApiError::Status`] with the body
//! preserved for message extraction.

use std::marker::PhantomData;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use yeka_core::{FetchPage, MultipartBody, YEKA_VERSION};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::progress::{tracked_body, ProgressFn};

/// Corruption report submissions.
pub const REPORTS_ENDPOINT: &str = "/reports";

/// Service complaint submissions.
pub const COMPLAINTS_ENDPOINT: &str = "/complaints";

/// Extra headers and query parameters for a single call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    params: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Ask the server to localize response content.
    pub fn accept_language(self, locale: &str) -> Self {
        self.header("Accept-Language", locale)
    }
}

/// HTTP client bound to one API root.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("yeka/{}", YEKA_VERSION));
        if config.with_credentials {
            builder = builder.cookie_store(true);
        }
        let http = builder.build().map_err(|e| ApiError::config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Client against the configured or default API root.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind an endpoint to a response type.
    pub fn resource<T: DeserializeOwned>(&self, endpoint: impl Into<String>) -> Resource<'_, T> {
        Resource {
            api: self,
            endpoint: endpoint.into(),
            _marker: PhantomData,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn send<R: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ApiResult<R> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "request failed");
            Err(ApiError::status(status.as_u16(), body))
        }
    }
}

/// One endpoint with a fixed response type.
pub struct Resource<'a, T> {
    api: &'a ApiClient,
    endpoint: String,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Resource<'a, T> {
    /// Fetch one page of results.
    pub async fn get_all(&self, options: &RequestOptions) -> ApiResult<FetchPage<T>> {
        let request = self.apply(self.api.http.get(self.api.url(&self.endpoint)), options);
        self.api.send(request).await
    }

    /// Fetch the full collection as a bare list.
    pub async fn get_all_non_paginated(&self, options: &RequestOptions) -> ApiResult<Vec<T>> {
        let request = self.apply(self.api.http.get(self.api.url(&self.endpoint)), options);
        self.api.send(request).await
    }

    /// Fetch the endpoint itself.
    pub async fn get(&self, options: &RequestOptions) -> ApiResult<T> {
        let request = self.apply(self.api.http.get(self.api.url(&self.endpoint)), options);
        self.api.send(request).await
    }

    /// Fetch one record by identifier.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<T> {
        let url = format!("{}/{}", self.api.url(&self.endpoint), id);
        self.api.send(self.api.http.get(url)).await
    }

    /// Post an encoded multipart body, reporting upload progress when
    /// a callback is given.
    pub async fn post_multipart(
        &self,
        body: &MultipartBody,
        on_progress: Option<ProgressFn>,
    ) -> ApiResult<T> {
        let bytes = body.encode();
        tracing::debug!(
            endpoint = %self.endpoint,
            parts = body.parts().len(),
            bytes = bytes.len(),
            "posting multipart submission"
        );

        let request = self
            .api
            .http
            .post(self.api.url(&self.endpoint))
            .header(CONTENT_TYPE, body.content_type());
        let request = match on_progress {
            Some(on_progress) => request.body(tracked_body(bytes, on_progress)),
            None => request.body(bytes),
        };

        self.api.send(request).await
    }

    /// Post a JSON payload.
    pub async fn post_json<D: Serialize>(&self, data: &D) -> ApiResult<T> {
        let request = self.api.http.post(self.api.url(&self.endpoint)).json(data);
        self.api.send(request).await
    }

    /// Replace a record. JSON is the only representation the API
    /// updates with.
    pub async fn put<D: Serialize>(&self, id: &str, data: &D) -> ApiResult<T> {
        self.put_json(id, data).await
    }

    pub async fn put_json<D: Serialize>(&self, id: &str, data: &D) -> ApiResult<T> {
        let url = format!("{}/{}", self.api.url(&self.endpoint), id);
        let request = self.api.http.put(url).json(data);
        self.api.send(request).await
    }

    fn apply(
        &self,
        mut request: reqwest::RequestBuilder,
        options: &RequestOptions,
    ) -> reqwest::RequestBuilder {
        for (name, value) in &options.headers {
            request = request.header(name, value);
        }
        if !options.params.is_empty() {
            request = request.query(&options.params);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_endpoint() {
        let client = ApiClient::new(ClientConfig::new("http://localhost:3000/api")).unwrap();
        assert_eq!(client.url(REPORTS_ENDPOINT), "http://localhost:3000/api/reports");
    }

    #[test]
    fn test_default_base_url_is_production() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.base_url(), crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_request_options_accumulate() {
        let options = RequestOptions::new()
            .accept_language("am")
            .param("page", "2");
        assert_eq!(options.headers, vec![("Accept-Language".to_string(), "am".to_string())]);
        assert_eq!(options.params, vec![("page".to_string(), "2".to_string())]);
    }
}
