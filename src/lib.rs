pub mod client;
pub mod coerce;
pub mod config;
pub mod error;
pub mod gauges;
pub mod logging;
pub mod poller;
pub mod server;
pub mod types;
