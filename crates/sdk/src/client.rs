//! The authenticated HTTP client underneath every generated client.
//!
//! Request/response bodies are JSON throughout. Each call declares the
//! status codes the service documents for it; anything else is an error
//! rather than something to interpret.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::Authorizer;
use crate::error::Error;
use crate::poller::Poller;

/// Metadata exposed by every generated client.
#[derive(Debug, Clone, Default)]
pub struct ClientMetaData {
    /// The resource provider namespace, present only for control-plane
    /// (resource manager) clients.
    pub resource_provider: Option<String>,
}

/// Implemented by every generated client.
pub trait ApiClient {
    fn meta_data(&self) -> ClientMetaData;
}

/// A decoded JSON response paired with the transport-level details.
#[derive(Debug)]
pub struct JsonResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: T,
}

#[derive(Debug, Clone)]
pub struct GetRequest {
    pub expected_status_codes: Vec<u16>,
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub expected_status_codes: Vec<u16>,
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct PutRequest<B> {
    pub body: B,
    pub expected_status_codes: Vec<u16>,
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct PatchRequest<B> {
    pub body: B,
    pub expected_status_codes: Vec<u16>,
    pub uri: String,
}

/// Shared transport for generated clients: owns the endpoint, the
/// authorizer, and the underlying HTTP client.
#[derive(Clone)]
pub struct BaseClient {
    authorizer: Arc<dyn Authorizer>,
    endpoint: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for BaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl BaseClient {
    pub fn new(endpoint: impl Into<String>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            authorizer,
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Issues a GET and returns the raw response once the status code has
    /// been checked against the expected set.
    pub async fn get(&self, input: GetRequest) -> Result<Response, Error> {
        self.send(Method::GET, &input.uri, None::<&()>, &input.expected_status_codes)
            .await
    }

    /// Issues a GET and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        input: GetRequest,
    ) -> Result<JsonResponse<T>, Error> {
        let response = self.get(input.clone()).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.contains("application/json") {
            return Err(Error::Decode {
                uri: input.uri,
                message: format!("expected `application/json` but got {content_type:?}"),
            });
        }

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.json::<T>().await.map_err(|err| Error::Decode {
            uri: input.uri,
            message: err.to_string(),
        })?;

        Ok(JsonResponse {
            status,
            headers,
            body,
        })
    }

    pub async fn put_json<B: Serialize>(&self, input: PutRequest<B>) -> Result<Response, Error> {
        self.send(
            Method::PUT,
            &input.uri,
            Some(&input.body),
            &input.expected_status_codes,
        )
        .await
    }

    pub async fn patch_json<B: Serialize>(
        &self,
        input: PatchRequest<B>,
    ) -> Result<Response, Error> {
        self.send(
            Method::PATCH,
            &input.uri,
            Some(&input.body),
            &input.expected_status_codes,
        )
        .await
    }

    pub async fn delete(&self, input: DeleteRequest) -> Result<Response, Error> {
        self.send(
            Method::DELETE,
            &input.uri,
            None::<&()>,
            &input.expected_status_codes,
        )
        .await
    }

    /// PUT, then hand back a poller tracking the resulting operation.
    pub async fn put_json_then_poll<B: Serialize>(
        &self,
        input: PutRequest<B>,
    ) -> Result<Poller, Error> {
        let response = self.put_json(input).await?;
        Poller::from_response(self.clone(), response)
    }

    /// PATCH, then hand back a poller tracking the resulting operation.
    pub async fn patch_json_then_poll<B: Serialize>(
        &self,
        input: PatchRequest<B>,
    ) -> Result<Poller, Error> {
        let response = self.patch_json(input).await?;
        Poller::from_response(self.clone(), response)
    }

    /// DELETE, then hand back a poller tracking the resulting operation.
    pub async fn delete_then_poll(&self, input: DeleteRequest) -> Result<Poller, Error> {
        let response = self.delete(input).await?;
        Poller::from_response(self.clone(), response)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        uri: &str,
        body: Option<&B>,
        expected_status_codes: &[u16],
    ) -> Result<Response, Error> {
        let url = self.build_uri(uri);
        debug!(%method, %url, "sending request");

        let token = self
            .authorizer
            .token(&format!("https://{}", self.endpoint));

        let mut request = self
            .http
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, token.authorization_header())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/json; charset=utf-8",
            );
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        if !expected_status_codes.contains(&status.as_u16()) {
            return Err(Error::UnexpectedStatus {
                status,
                allowed: expected_status_codes.to_vec(),
            });
        }

        Ok(response)
    }

    /// Absolute URIs (e.g. polling locations handed back by the service)
    /// pass through untouched; relative request paths are rooted at the
    /// client's endpoint.
    fn build_uri(&self, input: &str) -> String {
        if Url::parse(input).is_ok() {
            return input.to_string();
        }

        format!("https://{}{}", self.endpoint, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenAuthorizer;

    fn client() -> BaseClient {
        BaseClient::new(
            "management.azure.com",
            Arc::new(StaticTokenAuthorizer::new("token")),
        )
    }

    #[test]
    fn build_uri_roots_relative_paths_at_the_endpoint() {
        assert_eq!(
            client().build_uri("/subscriptions/1234?api-version=1.0"),
            "https://management.azure.com/subscriptions/1234?api-version=1.0"
        );
    }

    #[test]
    fn build_uri_passes_absolute_uris_through() {
        assert_eq!(
            client().build_uri("http://127.0.0.1:8080/operations/op1"),
            "http://127.0.0.1:8080/operations/op1"
        );
    }
}
