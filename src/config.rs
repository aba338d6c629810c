use std::net::IpAddr;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub submit_rate_limit: u32,
    pub submit_rate_window_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5001,
            max_body_size: 1_048_576,
            trusted_proxies: vec![],
            submit_rate_limit: 60,
            submit_rate_window_secs: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("CBAM_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CBAM_HOST: {e}"))?;

        let port: u16 = env_or("CBAM_PORT", "5001")
            .parse()
            .map_err(|e| format!("Invalid CBAM_PORT: {e}"))?;

        let max_body_size: usize = env_or("CBAM_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid CBAM_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies = parse_trusted_proxies(&env_or("CBAM_TRUSTED_PROXIES", ""))?;

        let submit_rate_limit: u32 = env_or("CBAM_SUBMIT_RATE_LIMIT", "60")
            .parse()
            .map_err(|e| format!("Invalid CBAM_SUBMIT_RATE_LIMIT: {e}"))?;

        let submit_rate_window_secs: u64 = env_or("CBAM_SUBMIT_RATE_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid CBAM_SUBMIT_RATE_WINDOW_SECS: {e}"))?;

        let log_level = env_or("CBAM_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            max_body_size,
            trusted_proxies,
            submit_rate_limit,
            submit_rate_window_secs,
            log_level,
        })
    }
}

fn parse_trusted_proxies(raw: &str) -> Result<Vec<IpNet>, String> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse()
                .map_err(|e| format!("Invalid CBAM_TRUSTED_PROXIES entry '{s}': {e}"))
        })
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
