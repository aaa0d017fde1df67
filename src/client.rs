use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::config::Credentials;
use crate::error::{ExporterError, Result};
use crate::types::ChaosResponse;

/// The single upstream endpoint this exporter polls.
pub const CHAOS_INFO_URL: &str = "https://chaos2.aa.net.uk/broadband/info/json";

/// The upstream has no documented response-time bound; cap the request so a
/// hanging connection delays at most one poll cycle.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of per-line info records. The poll loop depends on this seam so
/// tests can substitute canned responses for the live API.
#[async_trait]
pub trait InfoSource: Send + Sync {
    async fn fetch(&self, credentials: &Credentials) -> Result<ChaosResponse>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    control_login: &'a str,
    control_password: &'a str,
}

/// CHAOS API client. No internal retry; the poll loop's fixed interval is the
/// retry mechanism.
pub struct ChaosClient {
    http: reqwest::Client,
    url: String,
}

impl ChaosClient {
    pub fn new() -> Result<Self> {
        Self::with_url(CHAOS_INFO_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ExporterError::Transport)?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl InfoSource for ChaosClient {
    async fn fetch(&self, credentials: &Credentials) -> Result<ChaosResponse> {
        let body = LoginBody {
            control_login: &credentials.username,
            control_password: &credentials.password,
        };

        // A send() failure means no usable response was obtained; anything
        // after that point means the upstream answered but unusably.
        let response = self
            .http
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(ExporterError::Transport)?;

        let response = response
            .error_for_status()
            .map_err(ExporterError::InvalidResponse)?;

        response
            .json::<ChaosResponse>()
            .await
            .map_err(ExporterError::InvalidResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body_uses_chaos_field_names() {
        let body = LoginBody {
            control_login: "user",
            control_password: "secret",
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded["control_login"], "user");
        assert_eq!(encoded["control_password"], "secret");
    }
}
