use serde::Deserialize;

use crate::gauges::LineMetric;

/// One line's snapshot as reported by the CHAOS API. All numeric quantities
/// arrive string-encoded; missing fields default to the empty string so they
/// fail coercion for that field alone rather than failing the whole decode.
#[derive(Debug, Clone, Deserialize)]
pub struct LineInfo {
    #[serde(rename = "LineID")]
    pub line_id: String,

    #[serde(rename = "monthly_allowance", default)]
    pub quota_monthly: String,

    #[serde(rename = "monthly_allowance_remaining", default)]
    pub quota_remaining: String,

    #[serde(rename = "upstream_sync_rate", default)]
    pub rx_rate: String,

    #[serde(rename = "downstream_sync_rate", default)]
    pub tx_rate: String,

    #[serde(rename = "downstream_rate_adjusted", default)]
    pub tx_rate_adjusted: String,
}

impl LineInfo {
    /// Raw string value backing the given gauge family.
    pub fn raw_value(&self, metric: LineMetric) -> &str {
        match metric {
            LineMetric::QuotaMonthly => &self.quota_monthly,
            LineMetric::QuotaRemaining => &self.quota_remaining,
            LineMetric::RxRate => &self.rx_rate,
            LineMetric::TxRate => &self.tx_rate,
            LineMetric::TxRateAdjusted => &self.tx_rate_adjusted,
        }
    }
}

/// Decoded CHAOS API payload. An empty `Info` array signals a degraded
/// response and is treated as a cycle failure, never as "zero lines".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChaosResponse {
    #[serde(rename = "Info", default)]
    pub info: Vec<LineInfo>,
}
