//! Start the HTTP trigger.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::config::{env_lookup, resolve_function_key, resolve_port, ImporterConfig};
use crate::importer::Importer;
use crate::rest::{self, AppState};

/// Options for `wcl-importer serve`.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub port: Option<u16>,
    pub bind: IpAddr,
    pub function_key: Option<String>,
    pub out_dir: Option<PathBuf>,
}

/// Load configuration, build the pipeline and serve until stopped.
pub async fn run(opts: ServeOptions) -> Result<()> {
    let config = ImporterConfig::from_env()?;
    let publisher = super::build_publisher(&config, opts.out_dir.as_deref())?;
    let importer = Importer::from_config(&config, publisher)?;

    let port = resolve_port(opts.port, env_lookup)?;
    let function_key = resolve_function_key(opts.function_key, env_lookup);
    if function_key.is_none() {
        warn!("no function key configured; authorization is left to the Functions host");
    }

    info!(
        "starting wcl-importer v{} (source {}, container {})",
        env!("CARGO_PKG_VERSION"),
        config.source_url,
        config.container
    );

    let state = Arc::new(AppState {
        importer,
        function_key,
    });
    rest::start(SocketAddr::new(opts.bind, port), state).await
}
