use serde::{Deserialize, Serialize};

const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// HTTP host configuration (`modules.api_ingress`)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// "host:port"; empty means take it from the `server` section.
    #[serde(default)]
    pub bind_addr: String,
    #[serde(default)]
    pub cors_enabled: bool,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    /// Per-request handler timeout; unset falls back to `server.timeout_sec`, 0 disables.
    #[serde(default)]
    pub request_timeout_sec: Option<u64>,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            cors_enabled: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            request_timeout_sec: None,
        }
    }
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

impl ApiIngressConfig {
    /// Fill the unset values from the server-wide settings.
    pub fn with_server_defaults(mut self, host: &str, port: u16, timeout_sec: u64) -> Self {
        if self.bind_addr.trim().is_empty() {
            self.bind_addr = format!("{host}:{port}");
        }
        if self.request_timeout_sec.is_none() {
            self.request_timeout_sec = Some(timeout_sec);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults_only_fill_gaps() {
        let cfg = ApiIngressConfig::default().with_server_defaults("127.0.0.1", 8080, 30);
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.request_timeout_sec, Some(30));

        let cfg = ApiIngressConfig {
            bind_addr: "0.0.0.0:9000".into(),
            request_timeout_sec: Some(0),
            ..Default::default()
        }
        .with_server_defaults("127.0.0.1", 8080, 30);
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.request_timeout_sec, Some(0));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let cfg: ApiIngressConfig = serde_json::from_str("{\"cors_enabled\": true}").unwrap();
        assert!(cfg.cors_enabled);
        assert_eq!(cfg.body_limit_bytes, 16 * 1024 * 1024);
        assert!(cfg.bind_addr.is_empty());
    }
}
