//! Generator entrypoint: walks the schema service and emits client
//! packages for the resource-manager and data-plane API surfaces.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use strata_generator::ingest::SchemaClient;
use strata_generator::{Error, Generator};

#[derive(Debug, Parser)]
#[command(name = "strata-generator", about, version)]
struct Args {
    /// Base URL of the schema metadata service.
    #[arg(long, default_value = "http://localhost:5000")]
    endpoint: String,

    /// Directory the generated packages are written into. Cleared at the
    /// start of the run.
    #[arg(long, default_value = "./generated")]
    output_dir: String,

    /// Skip the resource-manager surface.
    #[arg(long)]
    skip_resource_manager: bool,

    /// Skip the data-plane surface.
    #[arg(long)]
    skip_data_plane: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if !args.skip_resource_manager {
        info!("generating resource manager");
        let client = SchemaClient::resource_manager(&args.endpoint);
        let output = format!("{}/resource-manager", args.output_dir);
        Generator::new(client, output).run().await?;
    }

    if !args.skip_data_plane {
        info!("generating data plane");
        let client = SchemaClient::data_plane(&args.endpoint);
        let output = format!("{}/data-plane", args.output_dir);
        Generator::new(client, output).run().await?;
    }

    info!("done");
    Ok(())
}
