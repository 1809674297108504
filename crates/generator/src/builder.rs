//! Assembles the in-memory service tree the renderers consume.
//!
//! All reads happen here, before anything is written: the full tree is
//! built for every generate-flagged service, then handed to the package
//! generator. Fetches are sequential, in catalog order.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::Error;
use crate::ingest::SchemaClient;
use crate::schema::{
    ConstantDefinition, ModelDefinition, OperationDefinition, ResourceIdDefinition,
    VersionDetails, VersionsResponse,
};
use crate::util::pascal_case;

/// One service at its chosen API version. Immutable once built.
#[derive(Debug)]
pub struct ServiceDefinition {
    pub service_name: String,
    pub api_version: String,
    /// Present only for control-plane services; its absence routes
    /// templating to the data-plane client shape.
    pub resource_provider: Option<String>,
    pub packages: Vec<PackageDefinition>,
}

impl ServiceDefinition {
    /// Relative output directory for this service, e.g. `eventhubs/2018-01-01-preview`.
    pub fn output_path(&self) -> String {
        format!("{}/{}", self.service_name, self.api_version)
    }
}

/// One operation group (resource type) within a service.
#[derive(Debug)]
pub struct PackageDefinition {
    pub package_name: String,
    pub type_name: String,
    pub resource_id: ResourceIdDefinition,
    pub models: BTreeMap<String, ModelDefinition>,
    pub constants: BTreeMap<String, ConstantDefinition>,
    pub operations: BTreeMap<String, OperationDefinition>,
}

/// Walks the schema service and builds a definition per generate-flagged
/// API. Any fetch or build error aborts the whole run; there is no
/// partial-success mode.
pub async fn build_service_definitions(
    client: &SchemaClient,
) -> Result<Vec<ServiceDefinition>, Error> {
    debug!("retrieving supported APIs");
    let catalog = client.catalog().await?;

    let mut services = Vec::new();
    for (service_name, details) in &catalog.apis {
        if !details.generate {
            debug!(service = %service_name, "generation disabled, skipping");
            continue;
        }

        debug!(service = %service_name, "retrieving available API versions");
        let versions = client.versions(details).await?;

        let (api_version, version_details) = determine_api_version(service_name, &versions)?;
        info!(service = %service_name, version = %api_version, "building service definition");

        debug!(service = %service_name, "retrieving resource types");
        let types = client.types_for_version(version_details).await?;

        let mut packages = Vec::new();
        for (type_name, entry) in &types.types {
            debug!(package = %type_name, "retrieving metadata");
            let metadata = client.metadata_for_type(entry).await?;

            debug!(package = %type_name, "retrieving operations");
            let operations = client.operations_for_type(&metadata).await?;

            debug!(package = %type_name, "retrieving schema");
            let schema = client.schema_for_type(&metadata).await?;

            packages.push(PackageDefinition {
                package_name: type_name.clone(),
                type_name: pascal_case(type_name),
                resource_id: entry.resource_id.clone(),
                models: schema.models,
                constants: schema.constants,
                operations: operations.operations,
            });
        }

        services.push(ServiceDefinition {
            service_name: service_name.clone(),
            api_version: api_version.clone(),
            resource_provider: versions
                .resource_provider
                .clone()
                .filter(|provider| !provider.is_empty()),
            packages,
        });
    }

    Ok(services)
}

/// Picks the version to generate. Exactly one version must carry the flag:
/// zero is an error, and so is more than one, so the outcome never depends
/// on iteration order.
fn determine_api_version<'a>(
    service_name: &str,
    versions: &'a VersionsResponse,
) -> Result<(&'a String, &'a VersionDetails), Error> {
    let mut flagged: Vec<(&String, &VersionDetails)> = versions
        .versions
        .iter()
        .filter(|(_, details)| details.generate)
        .collect();

    match flagged.len() {
        0 => Err(Error::NoVersionToGenerate {
            service: service_name.to_string(),
        }),
        1 => Ok(flagged.remove(0)),
        _ => Err(Error::AmbiguousVersions {
            service: service_name.to_string(),
            versions: flagged.iter().map(|(version, _)| (*version).clone()).collect(),
        }),
    }
}
