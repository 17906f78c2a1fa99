//! Configuration and command line arguments of the `appmanager` binary.

use ::std::num::NonZeroU64;

use ::appmanager_common::{
    anyhow::anyhow,
    config::ClientConfig,
    error::{AppManagerError, Result},
    serde::Deserialize,
};
use ::clap::{Parser, Subcommand};

/// Environment variable read when the config file does not set an endpoint.
pub const ENDPOINT_ENV_VAR: &str = "FLINK_APPMANAGER_ENDPOINT";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Apply, update, read or destroy a Flink AppManager resource.
pub struct Args {
    /// path to the config file
    #[arg(long)]
    pub config_path: String,
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// helper function for exporting the `clap::Parser::parse` function
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the resource and wait until it is ready
    Apply {
        /// path to the resource definition file
        #[arg(long)]
        resource: String,
    },
    /// Bring an existing resource in line with its definition
    Update {
        #[arg(long)]
        resource: String,
    },
    /// Print the current state of the resource
    Read {
        #[arg(long)]
        resource: String,
    },
    /// Delete the resource
    Destroy {
        #[arg(long)]
        resource: String,
    },
}

impl Command {
    pub fn resource_path(&self) -> &str {
        match self {
            Self::Apply { resource }
            | Self::Update { resource }
            | Self::Read { resource }
            | Self::Destroy { resource } => resource,
        }
    }
}

/// Configuration of the `appmanager` binary.
/// Unset fields fall back to the defaults of [ClientConfig].
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[serde(crate = "appmanager_common::serde")]
pub struct ProviderConfig {
    /// Root URL of the AppManager service. Read from `FLINK_APPMANAGER_ENDPOINT` when unset.
    pub endpoint: Option<String>,
    pub api_version: Option<String>,
    pub wait_interval_secs: Option<NonZeroU64>,
    pub wait_timeout_secs: Option<NonZeroU64>,
}

impl ProviderConfig {
    pub fn client_config(self) -> Result<ClientConfig> {
        let env_endpoint = ::std::env::var(ENDPOINT_ENV_VAR).ok();
        self.client_config_with(env_endpoint)
    }

    fn client_config_with(self, env_endpoint: Option<String>) -> Result<ClientConfig> {
        let endpoint = self.endpoint.or(env_endpoint).unwrap_or_default();
        if endpoint.trim().is_empty() {
            return Err(AppManagerError::illegal_argument(anyhow!(
                "Missing Flink AppManager endpoint, set it in the config file or in {}",
                ENDPOINT_ENV_VAR
            )));
        }

        let mut config = ClientConfig::new(endpoint);
        if let Some(api_version) = self.api_version {
            config.api_version = api_version;
        }
        if let Some(interval) = self.wait_interval_secs {
            config.wait_interval_secs = interval;
        }
        if let Some(timeout) = self.wait_timeout_secs {
            config.wait_timeout_secs = timeout;
        }
        Ok(config)
    }
}
