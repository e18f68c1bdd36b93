use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct CourseApiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
}

impl CourseApiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("COURSE_API_BASE_URL")
            .map_err(|_| AppError::Config("COURSE_API_BASE_URL is not set".to_string()))?;
        let api_token = env::var("COURSE_API_TOKEN").ok().filter(|t| !t.is_empty());
        let request_timeout = secs_from_env("REQUEST_TIMEOUT_SECS")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            request_timeout,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub allocation_timeout: Duration,
}

impl ServerConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;
        let allocation_timeout = secs_from_env("ALLOCATION_TIMEOUT_SECS")?;

        Ok(Self {
            bind_addr,
            allocation_timeout,
        })
    }
}

fn secs_from_env(key: &str) -> Result<Duration, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| AppError::Config(format!("{} must be a positive number of seconds", key))),
        Err(_) => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    }
}
