//! Gateway configuration, loaded from the environment (and `.env` if present)

use std::env;
use std::net::SocketAddr;

/// Highest accepted ORDER_SEQUENCE_START; keeps room for 2^63 admissions and fills
pub const MAX_SEQUENCE_START: u64 = u64::MAX / 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// First admission/fill sequence number handed out by the engine
    pub sequence_start: u64,
    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
    /// Depth returned by /depth when no `levels` parameter is given
    pub default_depth: usize,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            host: env::var("GATEWAY_HOST").unwrap_or(defaults.host),
            port: parse_var("GATEWAY_PORT", defaults.port)?,
            sequence_start: check_sequence_start(parse_var(
                "ORDER_SEQUENCE_START",
                defaults.sequence_start,
            )?)?,
            log_filter: env::var("LOG_FILTER").unwrap_or(defaults.log_filter),
            default_depth: parse_var("DEFAULT_DEPTH", defaults.default_depth)?,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            sequence_start: 1,
            log_filter: "info,gateway=debug,matching_engine=info".to_string(),
            default_depth: 20,
        }
    }
}

fn check_sequence_start(start: u64) -> anyhow::Result<u64> {
    if start > MAX_SEQUENCE_START {
        anyhow::bail!(
            "ORDER_SEQUENCE_START={start} leaves no sequence headroom (max {MAX_SEQUENCE_START})"
        );
    }
    Ok(start)
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {name}={raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}
