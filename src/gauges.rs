use prometheus::{Gauge, GaugeVec, Opts, Registry, TextEncoder};

use crate::error::Result;

/// Label distinguishing one broadband line's series from another.
pub const LINE_ID_LABEL: &str = "LineID";

/// The five per-line gauge families exposed by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMetric {
    QuotaMonthly,
    QuotaRemaining,
    RxRate,
    TxRate,
    TxRateAdjusted,
}

impl LineMetric {
    pub const ALL: [LineMetric; 5] = [
        LineMetric::QuotaMonthly,
        LineMetric::QuotaRemaining,
        LineMetric::RxRate,
        LineMetric::TxRate,
        LineMetric::TxRateAdjusted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LineMetric::QuotaMonthly => "monthly_allowance",
            LineMetric::QuotaRemaining => "monthly_allowance_remaining",
            LineMetric::RxRate => "upstream_sync_rate",
            LineMetric::TxRate => "downstream_sync_rate",
            LineMetric::TxRateAdjusted => "downstream_rate_adjusted",
        }
    }

    fn help(&self) -> &'static str {
        match self {
            LineMetric::QuotaMonthly => "Monthly quota (bytes)",
            LineMetric::QuotaRemaining => {
                "Quota remaining, may exceed monthly_allowance due to rollover of unused quota (bytes)"
            }
            LineMetric::RxRate => "Raw upstream sync rate (bits/sec)",
            LineMetric::TxRate => "Raw downstream sync rate (bits/sec)",
            LineMetric::TxRateAdjusted => {
                "Adjusted downstream rate after optional rate limiting (bits/sec)"
            }
        }
    }
}

/// Long-lived gauge state shared between the poll loop and the scrape handler.
///
/// Each family maps a `LineID` label value to its last-set reading. A line
/// that stops appearing upstream keeps its last value (stale-but-present);
/// series are never removed for the life of the process.
#[derive(Clone)]
pub struct LineGauges {
    registry: Registry,
    quota_monthly: GaugeVec,
    quota_remaining: GaugeVec,
    rx_rate: GaugeVec,
    tx_rate: GaugeVec,
    tx_rate_adjusted: GaugeVec,
}

impl LineGauges {
    /// Builds the gauge set against a fresh registry.
    pub fn new() -> Result<Self> {
        Self::with_registry(Registry::new())
    }

    /// Builds the gauge set and registers every family with `registry`.
    /// Registering the same family twice is an error surfaced to the caller;
    /// registration happens exactly once at startup.
    pub fn with_registry(registry: Registry) -> Result<Self> {
        let new_family = |metric: LineMetric| -> Result<GaugeVec> {
            let vec = GaugeVec::new(Opts::new(metric.name(), metric.help()), &[LINE_ID_LABEL])?;
            registry.register(Box::new(vec.clone()))?;
            Ok(vec)
        };

        let quota_monthly = new_family(LineMetric::QuotaMonthly)?;
        let quota_remaining = new_family(LineMetric::QuotaRemaining)?;
        let rx_rate = new_family(LineMetric::RxRate)?;
        let tx_rate = new_family(LineMetric::TxRate)?;
        let tx_rate_adjusted = new_family(LineMetric::TxRateAdjusted)?;

        let build_info = Gauge::with_opts(
            Opts::new("aaisp_exporter_build_info", "Exporter build information")
                .const_label("version", env!("CARGO_PKG_VERSION")),
        )?;
        build_info.set(1.0);
        registry.register(Box::new(build_info))?;

        Ok(Self {
            registry,
            quota_monthly,
            quota_remaining,
            rx_rate,
            tx_rate,
            tx_rate_adjusted,
        })
    }

    fn family(&self, metric: LineMetric) -> &GaugeVec {
        match metric {
            LineMetric::QuotaMonthly => &self.quota_monthly,
            LineMetric::QuotaRemaining => &self.quota_remaining,
            LineMetric::RxRate => &self.rx_rate,
            LineMetric::TxRate => &self.tx_rate,
            LineMetric::TxRateAdjusted => &self.tx_rate_adjusted,
        }
    }

    /// Sets the current value for one line's series. Last write wins; a
    /// first-seen `line_id` implicitly creates the series.
    pub fn set(&self, metric: LineMetric, line_id: &str, value: f64) {
        self.family(metric).with_label_values(&[line_id]).set(value);
    }

    /// Current stored value for one series (creates it at zero if absent).
    pub fn value(&self, metric: LineMetric, line_id: &str) -> f64 {
        self.family(metric).with_label_values(&[line_id]).get()
    }

    /// Renders the registry in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        Ok(encoder.encode_to_string(&self.registry.gather())?)
    }
}
