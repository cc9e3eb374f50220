pub mod common;

mod bearer_transport;
mod concurrent_refresh;
mod exec_credential_output;
mod provider_metrics;
