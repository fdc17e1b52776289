//! Shared HTTP transport.
//!
//! One `reqwest` client is reused across all service clients; every call
//! takes the [`Configuration`] of the service it targets, so a single
//! transport can reach registries, repositories, and hosts derived from
//! descriptor endpoints.

use crate::config::Configuration;
use crate::error::ClientError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP transport for AAS Part 2 APIs.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new transport.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ClientError> {
        let client = Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ClientError::Init(e.to_string()))?;

        Ok(Self { client })
    }

    fn request(&self, config: &Configuration, method: Method, path: &str) -> RequestBuilder {
        let url = config.url(path);
        tracing::debug!(%method, %url, "AAS request");

        let mut request = self
            .client
            .request(method, &url)
            .timeout(config.timeout)
            .header("Accept", "application/json");

        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &config.bearer_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        request
    }

    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            tracing::debug!(status, %message, "AAS request failed");
            return Err(ClientError::Api { status, message });
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ClientError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        Self::read_json(response)
            .await?
            .ok_or_else(|| ClientError::Parse("empty response body".to_string()))
    }

    /// `GET` a JSON document.
    ///
    /// # Errors
    ///
    /// Returns error on network, API, or parse errors.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        config: &Configuration,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let request = self.request(config, Method::GET, path).query(query);
        let response = Self::send(request).await?;
        Self::expect_json(response).await
    }

    /// `POST` a JSON document and read the created entity back.
    ///
    /// # Errors
    ///
    /// Returns error on network, API, or parse errors.
    pub async fn post_json<B, T>(
        &self,
        config: &Configuration,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(config, Method::POST, path).json(body);
        let response = Self::send(request).await?;
        Self::expect_json(response).await
    }

    /// `PUT` a JSON document. Servers may answer without a body.
    ///
    /// # Errors
    ///
    /// Returns error on network, API, or parse errors.
    pub async fn put_json<B, T>(
        &self,
        config: &Configuration,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(config, Method::PUT, path).json(body);
        let response = Self::send(request).await?;
        Self::read_json(response).await
    }

    /// `DELETE` a resource.
    ///
    /// # Errors
    ///
    /// Returns error on network or API errors.
    pub async fn delete(&self, config: &Configuration, path: &str) -> Result<(), ClientError> {
        let request = self.request(config, Method::DELETE, path);
        Self::send(request).await.map(drop)
    }
}
