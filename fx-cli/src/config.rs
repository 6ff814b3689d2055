//! Configuration loading from flags and environment.

use std::time::Duration;

use clap::Args;
use fx_client::{DEFAULT_BASE_URL, Endpoint};

/// Connection settings shared by all subcommands.
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Latest-rates endpoint of the quote API
    #[arg(long, env = "FXCALC_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// API key for the quote API
    #[arg(long, env = "FXCALC_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Seconds between reachability checks while offline
    #[arg(long, env = "FXCALC_POLL_INTERVAL_SECS", default_value_t = 3, global = true)]
    pub poll_interval_secs: u64,

    /// Connect timeout in seconds
    #[arg(long, env = "FXCALC_CONNECT_TIMEOUT_SECS", default_value_t = 120, global = true)]
    pub connect_timeout_secs: u64,

    /// Overall request timeout in seconds
    #[arg(long, env = "FXCALC_REQUEST_TIMEOUT_SECS", default_value_t = 300, global = true)]
    pub request_timeout_secs: u64,

    /// Skip the network interface check and treat the device as online
    #[arg(long, env = "FXCALC_ASSUME_ONLINE", global = true)]
    pub assume_online: bool,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub endpoint: Endpoint,
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub assume_online: bool,
}

impl Config {
    /// Validates the connection arguments.
    pub fn from_args(args: &ConnectionArgs) -> anyhow::Result<Self> {
        let api_key = args
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("FXCALC_API_KEY environment variable is required"))?;

        if args.poll_interval_secs == 0 {
            anyhow::bail!("Poll interval must be at least one second");
        }

        Ok(Self {
            endpoint: Endpoint::new(&args.api_url, api_key)?,
            poll_interval: Duration::from_secs(args.poll_interval_secs),
            connect_timeout: Duration::from_secs(args.connect_timeout_secs),
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            assume_online: args.assume_online,
        })
    }
}
