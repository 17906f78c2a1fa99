//! Client library of the Flink AppManager REST API.
//!
//! [AppManagerClient] owns the HTTP transport and the [ClientConfig](appmanager_common::config::ClientConfig)
//! it was built from. Operations are grouped by resource collection, one module each, and the
//! `wait_*` operations are built on the polling primitive in [wait].

mod artifact;
mod client;
mod deployment;
mod deployment_defaults;
mod deployment_target;
mod job;
mod namespace;
mod savepoint;
mod session_cluster;
mod system_info;
pub mod wait;

pub use client::{ApiException, AppManagerClient};
pub use savepoint::SavepointFilter;
pub use session_cluster::FlinkImageInfo;
