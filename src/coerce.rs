/// Parses a string-encoded decimal from the CHAOS API into a gauge value.
///
/// Returns `None` on malformed input; the caller skips that single update and
/// the previously exposed value for the series stays in place.
pub fn coerce(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok()
}
