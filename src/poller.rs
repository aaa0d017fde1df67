use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, info, warn};

use crate::client::InfoSource;
use crate::coerce::coerce;
use crate::config::{self, Credentials, POLL_INTERVAL_SECS};
use crate::error::{ExporterError, Result};
use crate::gauges::{LineGauges, LineMetric};
use crate::types::ChaosResponse;

/// Where each cycle gets its credentials. Env-backed in production; tests
/// inject a stub so the core never has to touch process state.
pub type CredentialSource = Arc<dyn Fn() -> Result<Credentials> + Send + Sync>;

/// The poll loop: fetch the CHAOS line info on a fixed interval and publish
/// every reading into the shared gauge set.
///
/// Strictly sequential; the sleep runs between cycle completions, so a slow
/// upstream stretches the effective period instead of overlapping cycles.
pub struct Poller<S: InfoSource> {
    source: S,
    gauges: LineGauges,
    credentials: CredentialSource,
    interval: Duration,
}

impl<S: InfoSource> Poller<S> {
    pub fn new(source: S, gauges: LineGauges) -> Self {
        Self {
            source,
            gauges,
            credentials: Arc::new(config::resolve_credentials),
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
        }
    }

    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// One fetch-and-publish pass. Returns the number of lines applied.
    ///
    /// Gauges are only touched after a fully successful fetch with at least
    /// one record, so a failed cycle leaves every previously exposed value in
    /// place.
    pub async fn run_cycle(&self) -> Result<usize> {
        let credentials = (self.credentials)()?;
        let response = self.source.fetch(&credentials).await?;
        if response.info.is_empty() {
            return Err(ExporterError::EmptyResponse);
        }
        Ok(apply_response(&self.gauges, &response))
    }

    /// Runs cycles until `shutdown` fires. Transient upstream failures are
    /// logged and skipped; a configuration failure is returned to the caller,
    /// which is expected to terminate the process.
    pub async fn run(&self, mut shutdown: oneshot::Receiver<()>) -> Result<()> {
        loop {
            match shutdown.try_recv() {
                Err(TryRecvError::Empty) => {}
                _ => return Ok(()),
            }

            match self.run_cycle().await {
                Ok(lines) => info!(lines, "poll cycle complete"),
                Err(err @ ExporterError::Config(_)) => {
                    return Err(err);
                }
                Err(err) => {
                    warn!(error = %err, "poll cycle failed, previous values remain exposed");
                }
            }

            tokio::select! {
                _ = &mut shutdown => return Ok(()),
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}

/// Publishes every coercible field of every line. A malformed field skips
/// that one update and leaves the rest of the batch untouched.
fn apply_response(gauges: &LineGauges, response: &ChaosResponse) -> usize {
    for line in &response.info {
        for metric in LineMetric::ALL {
            let raw = line.raw_value(metric);
            match coerce(raw) {
                Some(value) => gauges.set(metric, &line.line_id, value),
                None => {
                    debug!(line_id = %line.line_id, metric = metric.name(), raw, "skipping unparseable value");
                }
            }
        }
    }
    response.info.len()
}
