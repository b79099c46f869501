//! netbox-enrich
//!
//! Prints what NetBox knows about an IP address: the VRFs of the prefixes
//! containing it, the device or VM holding it with its bound services, and
//! optionally a manufacturer guessed from a vendor string.

use anyhow::{Context, Result};
use clap::Parser;
use netbox_client::NetBoxClient;
use netbox_enrich::backoff::{wait_for_netbox, FibonacciBackoff};
use netbox_enrich::config::init_tracing;
use netbox_enrich::{Config, Enricher};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing();
    config.validate()?;

    info!("Starting NetBox lookup");
    info!("  NetBox URL: {}", config.url);
    info!("  IP address: {}", config.ip().unwrap_or("(all)"));

    let client = NetBoxClient::with_timeout(config.url.clone(), config.token.clone(), config.timeout())
        .context("failed to create NetBox client")?;

    if config.wait {
        wait_for_netbox(&client, FibonacciBackoff::default())
            .await
            .context("NetBox rejected the API token")?;
    }

    let enricher = Enricher::new(Box::new(client), config.verbose);
    let summary = enricher.run(config.ip(), config.oui()).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("failed to render summary")?
    );
    Ok(())
}
