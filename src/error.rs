use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No response obtained from CHAOS API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid response from CHAOS API: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("CHAOS API returned no line records")]
    EmptyResponse,

    #[error("Metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("HTTP server error: {0}")]
    Server(#[from] hyper::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
