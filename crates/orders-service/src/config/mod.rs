//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use orders_common::error::{ApiError, Result};

pub use schema::{ServiceConfig, ServiceSection, StoreSection};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDERS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "orders.yaml";

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ApiError::service(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| ApiError::bad_request(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Config path from `ORDERS_CONFIG`, falling back to `orders.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
