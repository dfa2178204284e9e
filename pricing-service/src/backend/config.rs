//! Process configuration read from the environment.

use anyhow::{anyhow, Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "GYM_PRICING_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "GYM_PRICING_BIND_ADDR";
pub const ALLOWED_ORIGIN_VAR: &str = "GYM_PRICING_ALLOWED_ORIGIN";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Holds `pricing_config.yaml` and `discounts.csv`
    pub data_directory: PathBuf,
    pub bind_addr: SocketAddr,
    /// Origin allowed by the CORS layer
    pub allowed_origin: HeaderValue,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset or blank variables take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let data_directory = PathBuf::from(value(DATA_DIR_VAR, DEFAULT_DATA_DIR));

        let bind_addr = value(BIND_ADDR_VAR, DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("{} '{}' is not a socket address", BIND_ADDR_VAR, bind_addr))?;

        let allowed_origin = value(ALLOWED_ORIGIN_VAR, DEFAULT_ALLOWED_ORIGIN);
        let allowed_origin = allowed_origin
            .parse::<HeaderValue>()
            .map_err(|_| anyhow!("{} '{}' is not a valid origin", ALLOWED_ORIGIN_VAR, allowed_origin))?;

        Ok(Self {
            data_directory,
            bind_addr,
            allowed_origin,
        })
    }
}
