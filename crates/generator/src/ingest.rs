//! HTTP client for the schema metadata service.
//!
//! The service is a consumed collaborator: five JSON endpoint shapes,
//! walked catalog → versions → types → operations/schema. Any non-200
//! response or decode failure aborts the fetch.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::schema::{
    CatalogEntry, CatalogResponse, OperationMetaData, OperationsResponse, SchemaResponse,
    TypeEntry, TypesResponse, VersionDetails, VersionsResponse,
};

/// Which half of the API surface a client walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
    /// Control-plane APIs; versions declare a resource provider.
    ResourceManager,
    /// Data-plane APIs.
    DataPlane,
}

impl ApiFlavor {
    fn segment(self) -> &'static str {
        match self {
            ApiFlavor::ResourceManager => "resource-manager",
            ApiFlavor::DataPlane => "data-plane",
        }
    }
}

/// Fetches catalog, version, operation, and schema metadata over HTTP.
#[derive(Debug, Clone)]
pub struct SchemaClient {
    endpoint: String,
    flavor: ApiFlavor,
    http: reqwest::Client,
}

impl SchemaClient {
    pub fn resource_manager(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, ApiFlavor::ResourceManager)
    }

    pub fn data_plane(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, ApiFlavor::DataPlane)
    }

    fn new(endpoint: impl Into<String>, flavor: ApiFlavor) -> Self {
        Self {
            endpoint: endpoint.into(),
            flavor,
            http: reqwest::Client::new(),
        }
    }

    pub fn flavor(&self) -> ApiFlavor {
        self.flavor
    }

    /// The catalog of APIs for this flavor.
    pub async fn catalog(&self) -> Result<CatalogResponse, Error> {
        let uri = format!("{}/apis/v1/{}", self.endpoint, self.flavor.segment());
        self.get_json(&uri).await
    }

    /// The version list for one catalog entry.
    pub async fn versions(&self, api: &CatalogEntry) -> Result<VersionsResponse, Error> {
        self.get_json(&format!("{}{}", self.endpoint, api.uri)).await
    }

    /// The operation catalog (resource types) for one version.
    pub async fn types_for_version(&self, version: &VersionDetails) -> Result<TypesResponse, Error> {
        self.get_json(&format!("{}{}", self.endpoint, version.uri))
            .await
    }

    /// Metadata for one resource type: where its operations and schema live.
    pub async fn metadata_for_type(&self, entry: &TypeEntry) -> Result<OperationMetaData, Error> {
        self.get_json(&format!("{}{}", self.endpoint, entry.uri))
            .await
    }

    /// The operations supported by one resource type.
    pub async fn operations_for_type(
        &self,
        metadata: &OperationMetaData,
    ) -> Result<OperationsResponse, Error> {
        self.get_json(&format!("{}{}", self.endpoint, metadata.operations_uri))
            .await
    }

    /// The schema (models and constants) for one resource type.
    pub async fn schema_for_type(
        &self,
        metadata: &OperationMetaData,
    ) -> Result<SchemaResponse, Error> {
        self.get_json(&format!("{}{}", self.endpoint, metadata.schema_uri))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> Result<T, Error> {
        debug!(%uri, "fetching schema metadata");

        let response = self
            .http
            .get(uri)
            .send()
            .await
            .map_err(|err| Error::SchemaFetch {
                uri: uri.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::SchemaFetch {
                uri: uri.to_string(),
                message: format!("unexpected status code {status}"),
            });
        }

        response.json::<T>().await.map_err(|err| Error::SchemaFetch {
            uri: uri.to_string(),
            message: format!("decoding JSON: {err}"),
        })
    }
}
