//! HTTP listener and CORS configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:5173",
        "http://127.0.0.1:3000",
        "http://localhost:8080",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

const fn default_allow_localhost_any_port() -> bool {
    true
}

/// 5 MiB.
const fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Exact origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Also allow `http://localhost:*` and `http://127.0.0.1:*`.
    #[serde(default = "default_allow_localhost_any_port")]
    pub allow_localhost_any_port: bool,

    /// Largest accepted persona photo upload.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            allow_localhost_any_port: default_allow_localhost_any_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether `origin` may receive CORS headers.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.iter().any(|o| o == origin) {
            return true;
        }
        self.allow_localhost_any_port && is_local_dev_origin(origin)
    }
}

/// `http(s)://localhost[:port]` or `http(s)://127.0.0.1[:port]`.
fn is_local_dev_origin(origin: &str) -> bool {
    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };
    let host_end = rest.find(':').unwrap_or(rest.len());
    let (host, port) = rest.split_at(host_end);
    if host != "localhost" && host != "127.0.0.1" {
        return false;
    }
    match port.strip_prefix(':') {
        None => port.is_empty(),
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
    }
}
