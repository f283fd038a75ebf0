//! Launch configuration with TOML file support.

use std::time::Duration;

use lplock_allocation::AllocationByPercentage;
use lplock_amm::{PoolCreationParams, ProgramIds};
use lplock_rpc::RpcClientConfig;
use lplock_types::{Pubkey, DEVNET_RPC_URL};
use lplock_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::launch::LaunchPlan;

/// Configuration for one launch.
///
/// Can be loaded from a TOML file via [`LaunchConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so
/// an empty file reproduces the devnet launch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// JSON-RPC endpoint of the cluster.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Delay between signature status polls, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The pool to create and its initial deposit.
    #[serde(default = "default_pool")]
    pub pool: PoolCreationParams,

    /// Who receives the locked LP tokens, by relative weight.
    #[serde(default = "default_allocations")]
    pub allocations: Vec<AllocationByPercentage>,

    /// Program addresses; override to target a fork.
    #[serde(default)]
    pub program_ids: ProgramIds,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    DEVNET_RPC_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn devnet_key(s: &str) -> Pubkey {
    s.parse().expect("built-in devnet address is valid base58")
}

fn default_pool() -> PoolCreationParams {
    PoolCreationParams {
        token_a_mint: devnet_key("CfmVE9LQqRAHmSGDVkUoRbtiHbPKERUDaZ7Skw8DT4zN"),
        token_b_mint: devnet_key("BXTou3CvPxpFVAJvzvEZcAnRLGCHqT1LHKsFTSQft7s"),
        token_a_amount: 100_000_000,
        token_b_amount: 6_000_000_000,
        config: devnet_key("21PjsfQVgrn56jSypUT5qXwwSjwKWvuoBCKbVZrgTLz4"),
    }
}

fn default_allocations() -> Vec<AllocationByPercentage> {
    vec![
        AllocationByPercentage::new(devnet_key("4sBMz7zmDWPzdEnECJW3NA9mEcNwkjYtVnL2KySaWYAf"), 80),
        AllocationByPercentage::new(devnet_key("CVV5MxfwA24PsM7iuS2ddssYgySf5SxVJ8PpAwGN2yVy"), 20),
    ]
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LaunchConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("LaunchConfig is always serializable to TOML")
    }

    pub fn plan(&self) -> LaunchPlan {
        LaunchPlan {
            pool: self.pool.clone(),
            allocations: self.allocations.clone(),
        }
    }

    pub fn rpc_client_config(&self) -> RpcClientConfig {
        RpcClientConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            ..RpcClientConfig::default()
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            poll_interval_ms: default_poll_interval_ms(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            pool: default_pool(),
            allocations: default_allocations(),
            program_ids: ProgramIds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = LaunchConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = LaunchConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_is_the_devnet_launch() {
        let config = LaunchConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.pool.token_b_amount, 6_000_000_000);
        let weights: Vec<u64> = config.allocations.iter().map(|a| a.percentage).collect();
        assert_eq!(weights, vec![80, 20]);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            rpc_url = "http://127.0.0.1:8899"
            log_format = "json"

            [[allocations]]
            address = "CVV5MxfwA24PsM7iuS2ddssYgySf5SxVJ8PpAwGN2yVy"
            percentage = 1
        "#;
        let config = LaunchConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.allocations.len(), 1);
        assert_eq!(config.pool, default_pool()); // default
        assert_eq!(config.rpc_client_config().poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn bad_address_is_a_parse_error() {
        let toml = r#"
            [pool]
            token_a_mint = "not-base58-0OIl"
            token_b_mint = "BXTou3CvPxpFVAJvzvEZcAnRLGCHqT1LHKsFTSQft7s"
            token_a_amount = 1
            token_b_amount = 1
            config = "21PjsfQVgrn56jSypUT5qXwwSjwKWvuoBCKbVZrgTLz4"
        "#;
        assert!(matches!(
            LaunchConfig::from_toml_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_ms = 250").unwrap();
        let config = LaunchConfig::from_toml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.poll_interval_ms, 250);
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = LaunchConfig::from_toml_file("/nonexistent/lplock.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
