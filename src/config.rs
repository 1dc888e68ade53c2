use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::{DEFAULT_PROFILE_KEY, DEFAULT_WEAK_THRESHOLD};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub profile_key: String,
    pub flush_on_write: bool,
    pub weak_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile_key: DEFAULT_PROFILE_KEY.to_string(),
            flush_on_write: true,
            weak_threshold: DEFAULT_WEAK_THRESHOLD,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/mastery.sled"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            engine: EngineConfig {
                profile_key: env_or("PROFILE_KEY", DEFAULT_PROFILE_KEY),
                flush_on_write: env_or_bool("FLUSH_ON_WRITE", true),
                weak_threshold: env_or_parse("WEAK_THRESHOLD", DEFAULT_WEAK_THRESHOLD),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
