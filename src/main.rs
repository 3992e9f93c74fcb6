use k8s_propagate_node_status::{run, Config, Error};
use tracing::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::build() {
        Ok(config) => config,
        // --help and --version land here too; clap prints and picks the exit code.
        Err(Error::Usage(err)) => err.exit(),
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };
    debug!("Parsed CLI arguments: {:?}", config);

    if let Err(err) = run(config).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
