//! Configuration for the AppManager client.

use ::std::{fs::File, io::BufReader, num::NonZeroU64, path::Path, time::Duration};

use ::anyhow::anyhow;
use ::serde::{de::DeserializeOwned, Deserialize};
use ::serde_json::from_reader;

use crate::error::{AppManagerError, Result};

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_WAIT_INTERVAL_SECS: u64 = 3;
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 180;

/// Immutable configuration of an AppManager client.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Root URL of the AppManager service, e.g. `http://appmanager:8080`
    pub endpoint: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Time interval in seconds between two state checks
    #[serde(default = "default_wait_interval_secs")]
    pub wait_interval_secs: NonZeroU64,
    /// Time in seconds to wait for a resource to reach its target state
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: NonZeroU64,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_owned()
}

fn default_wait_interval_secs() -> NonZeroU64 {
    NonZeroU64::new(DEFAULT_WAIT_INTERVAL_SECS).unwrap_or(NonZeroU64::MIN)
}

fn default_wait_timeout_secs() -> NonZeroU64 {
    NonZeroU64::new(DEFAULT_WAIT_TIMEOUT_SECS).unwrap_or(NonZeroU64::MIN)
}

impl ClientConfig {
    /// Config pointing at `endpoint` with every other field at its default.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_version: default_api_version(),
            wait_interval_secs: default_wait_interval_secs(),
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }

    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig {
            interval: Duration::from_secs(self.wait_interval_secs.get()),
            timeout: Duration::from_secs(self.wait_timeout_secs.get()),
        }
    }
}

/// Timing of the state-wait loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    interval: Duration,
    timeout: Duration,
}

impl WaitConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self> {
        if interval.is_zero() || timeout.is_zero() {
            return Err(AppManagerError::illegal_argument(anyhow!(
                "wait interval and timeout must be greater than zero, got {:?} and {:?}",
                interval,
                timeout
            )));
        }
        Ok(Self { interval, timeout })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_WAIT_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
        }
    }
}

/// Load a JSON configuration file.
pub fn load_config<C: DeserializeOwned>(path: impl AsRef<Path>) -> Result<C> {
    let file = File::open(path).map_err(AppManagerError::fail_to_load_config)?;
    let reader = BufReader::new(file);
    let config = from_reader(reader).map_err(AppManagerError::fail_to_load_config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::serde_json::{from_value, json};

    #[test]
    fn missing_field_endpoint() {
        let config = json!({ "api_version": "v1" });
        let result = from_value::<ClientConfig>(config);
        assert_eq!(result.unwrap_err().to_string(), "missing field `endpoint`");
    }

    #[test]
    fn deny_unknown_fields() {
        let config = json!(
            {
                "endpoint": "http://localhost:8080",
                "unknown_field": "unknown"
            }
        );
        let result = from_value::<ClientConfig>(config);
        assert_eq!(
            result.unwrap_err().to_string(),
            "unknown field `unknown_field`, expected one of `endpoint`, `api_version`, `wait_interval_secs`, `wait_timeout_secs`"
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = json!(
            {
                "endpoint": "http://localhost:8080",
                "wait_interval_secs": 0
            }
        );
        assert!(from_value::<ClientConfig>(config).is_err());
    }

    #[test]
    fn deserialize_with_defaults() -> anyhow::Result<()> {
        let config = json!({ "endpoint": "http://localhost:8080" });
        let result = from_value::<ClientConfig>(config)?;
        assert_eq!(result, ClientConfig::new("http://localhost:8080"));
        assert_eq!(result.api_version, "v1");
        assert_eq!(
            result.wait_config(),
            WaitConfig::new(Duration::from_secs(3), Duration::from_secs(180))?
        );
        Ok(())
    }

    #[test]
    fn deserialize_client_config() -> anyhow::Result<()> {
        let config = json!(
            {
                "endpoint": "http://localhost:8080",
                "api_version": "v2",
                "wait_interval_secs": 1,
                "wait_timeout_secs": 30
            }
        );
        let result = from_value::<ClientConfig>(config)?;
        assert_eq!(result.api_version, "v2");
        assert_eq!(result.wait_config().interval(), Duration::from_secs(1));
        assert_eq!(result.wait_config().timeout(), Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn wait_config_rejects_zero_durations() {
        let result = WaitConfig::new(Duration::ZERO, Duration::from_secs(1));
        assert!(result.is_err_and(|e| e
            .to_string()
            .starts_with("Illegal argument: wait interval and timeout must be greater than zero")));
    }

    #[test]
    fn load_missing_config_file() {
        let result = load_config::<ClientConfig>("/definitely/not/here.json");
        assert!(result.is_err_and(|e| e.to_string().starts_with("Fail to load config:")));
    }
}
