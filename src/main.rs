use anyhow::Context;
use tokio::sync::oneshot;
use tracing::info;

use aaisp_exporter::client::ChaosClient;
use aaisp_exporter::config;
use aaisp_exporter::gauges::LineGauges;
use aaisp_exporter::logging;
use aaisp_exporter::poller::Poller;
use aaisp_exporter::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let port = config::listen_port().context("invalid exposition port")?;

    // Credentials are re-resolved every cycle, but a misconfigured deployment
    // should fail here, before the exposition port is ever bound.
    config::resolve_credentials().context("credentials not configured")?;

    let gauges = LineGauges::new().context("failed to register gauges")?;
    let client = ChaosClient::new().context("failed to build CHAOS client")?;
    let poller = Poller::new(client, gauges.clone());

    // The sender lives for the whole of main; in production the loop only
    // stops when the process does.
    let (_shutdown_tx, shutdown_rx) = oneshot::channel();
    let poll_task = tokio::spawn(async move { poller.run(shutdown_rx).await });

    info!(port, "starting aaisp-exporter");

    tokio::select! {
        result = server::start_server(gauges, port) => {
            result.context("exposition server failed")?;
            anyhow::bail!("exposition server exited unexpectedly");
        }
        result = poll_task => {
            result.context("poll loop panicked")??;
            anyhow::bail!("poll loop exited unexpectedly");
        }
    }
}
