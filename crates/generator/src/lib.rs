//! Generates strongly-typed REST clients for cloud management APIs from
//! the schema metadata service.
//!
//! The pipeline is strictly read-then-write: the full service tree is
//! ingested and assembled in memory first, then the output directory is
//! claimed and each package's artifacts are rendered into it, one package
//! at a time, in sorted order. A failure anywhere aborts the run — stale
//! or partial generated code is worse than a failed build.

pub mod builder;
pub mod emit;
pub mod error;
pub mod ingest;
pub mod mapper;
pub mod output;
pub mod reference;
pub mod schema;
pub mod util;

use tracing::{debug, info};

use crate::builder::{build_service_definitions, PackageDefinition, ServiceDefinition};
use crate::ingest::SchemaClient;
use crate::output::OutputRoot;

pub use crate::error::Error;

/// Drives one generation run against one schema-service flavor.
#[derive(Debug)]
pub struct Generator {
    client: SchemaClient,
    output_dir: std::path::PathBuf,
}

impl Generator {
    pub fn new(client: SchemaClient, output_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    /// Builds the full in-memory tree, then renders every package.
    pub async fn run(&self) -> Result<(), Error> {
        debug!("populating API information into service definitions");
        let services = build_service_definitions(&self.client).await?;

        let output = OutputRoot::prepare(&self.output_dir)?;

        for service in &services {
            info!(
                service = %service.service_name,
                version = %service.api_version,
                "generating service"
            );
            for package in &service.packages {
                debug!(package = %package.package_name, "generating package");
                let dir = output.package_dir(&format!(
                    "{}/{}",
                    service.output_path(),
                    package.package_name
                ))?;
                generate_package(service, package, &output, &dir).map_err(|err| {
                    Error::Package {
                        package: package.package_name.clone(),
                        source: Box::new(err),
                    }
                })?;
            }
        }

        Ok(())
    }
}

/// Renders the artifacts for one package. The constants file and the
/// model-test scaffold are conditional; the rest always exist.
fn generate_package(
    service: &ServiceDefinition,
    package: &PackageDefinition,
    output: &OutputRoot,
    dir: &std::path::Path,
) -> Result<(), Error> {
    if let Some(constants) = emit::constants::render_constants(&package.constants) {
        output.write_file(dir, "constants.rs", &constants)?;
    }

    let models = emit::models::render_models(&package.models)?;
    output.write_file(dir, "models.rs", &models)?;

    let ids = emit::resource_id::render_resource_id(&package.type_name, &package.resource_id)?;
    output.write_file(dir, "ids.rs", &ids)?;

    let client = emit::client::render_client(service, package)?;
    output.write_file(dir, "client.rs", &client)?;

    if let Some(model_tests) = emit::model_tests::render_model_tests(&package.models)? {
        output.write_file(dir, "models_test.rs", &model_tests)?;
    }

    Ok(())
}
