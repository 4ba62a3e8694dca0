use std::env;

/// Runtime configuration for the newsletter HTTP client.
/// Values are sourced from environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Config {
    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - POLLKIT_API_URL (default: http://localhost:3000)
    /// - POLLKIT_HTTP_TIMEOUT_SECS (default: 30)
    /// - POLLKIT_USER_AGENT (default: pollkit/<version>)
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("POLLKIT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = raw_url.trim_end_matches('/').to_string();
        url::Url::parse(&api_url)
            .map_err(|e| format!("Invalid POLLKIT_API_URL {:?}: {}", raw_url, e))?;

        let timeout_secs = lookup("POLLKIT_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let user_agent = lookup("POLLKIT_USER_AGENT")
            .unwrap_or_else(|| format!("pollkit/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            api_url,
            user_agent,
            timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(cfg.user_agent.starts_with("pollkit/"));
    }

    #[test]
    fn trailing_slash_trimmed_and_bad_timeout_ignored() {
        let cfg = load(&[
            ("POLLKIT_API_URL", "https://stats.example.org/"),
            ("POLLKIT_HTTP_TIMEOUT_SECS", "soon"),
        ])
        .unwrap();
        assert_eq!(cfg.api_url, "https://stats.example.org");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn relative_api_url_rejected() {
        let err = load(&[("POLLKIT_API_URL", "/api")]).unwrap_err();
        assert!(err.contains("POLLKIT_API_URL"));
    }
}
