use crate::config::Config;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

pub fn build_client(cfg: &Config) -> reqwest::Result<Client> {
    let mut default_headers = HeaderMap::new();
    // An unrepresentable agent string falls back to reqwest's own.
    if let Ok(ua) = HeaderValue::from_str(&cfg.user_agent) {
        default_headers.insert(USER_AGENT, ua);
    }
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .use_rustls_tls()
        .build()
}

/// Join an API base URL and an absolute path without doubling the slash.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("http://localhost:3000/", "/api/newsletter/subscribe"),
            "http://localhost:3000/api/newsletter/subscribe"
        );
        assert_eq!(endpoint("https://a.example", "x"), "https://a.example/x");
    }

    #[test]
    fn client_builds_from_defaults() {
        let cfg = Config {
            api_url: "http://localhost:3000".into(),
            user_agent: "pollkit/test".into(),
            timeout_secs: 5,
        };
        assert!(build_client(&cfg).is_ok());
    }
}
