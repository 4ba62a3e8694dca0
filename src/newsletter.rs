//! Client for the newsletter subscription endpoint used by the signup form.
//!
//! One POST per submission, no retry. Every failure maps to a message the
//! form can show in a transient notification.

use crate::config::Config;
use crate::http;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const SUBSCRIBE_PATH: &str = "/api/newsletter/subscribe";
pub const SUBSCRIBE_SUCCESS_MESSAGE: &str = "Thanks for subscribing! Check your inbox to confirm.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub email: String,
    pub name: String,
}

impl Subscription {
    /// Trim the form fields and reject obviously unusable addresses.
    pub fn new(email: &str, name: &str) -> Result<Self, SubscribeError> {
        let email = email.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid {
            return Err(SubscribeError::InvalidEmail);
        }
        Ok(Self {
            email: email.to_string(),
            name: name.trim().to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("subscription rejected with status {status}")]
    Rejected {
        status: StatusCode,
        /// `error` field from the response body, when the server sent one.
        message: Option<String>,
    },
    #[error("subscription request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SubscribeError {
    /// Text for the notification shown to the person submitting the form.
    pub fn user_message(&self) -> &str {
        match self {
            SubscribeError::InvalidEmail => INVALID_EMAIL_MESSAGE,
            SubscribeError::Rejected {
                message: Some(m), ..
            } => m.as_str(),
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }

    pub fn is_retryable(&self) -> bool {
        !matches!(self, SubscribeError::InvalidEmail)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
}

// Only a string `error` field counts; anything else gets the generic message.
fn extract_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.error? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct NewsletterClient {
    client: Client,
    endpoint: String,
}

impl NewsletterClient {
    pub fn new(client: Client, api_url: &str) -> Self {
        Self {
            client,
            endpoint: http::endpoint(api_url, SUBSCRIBE_PATH),
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, SubscribeError> {
        let client = http::build_client(cfg)?;
        Ok(Self::new(client, &cfg.api_url))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn subscribe(&self, sub: &Subscription) -> Result<(), SubscribeError> {
        debug!("POST {}", self.endpoint);
        let res = self
            .client
            .post(&self.endpoint)
            .json(sub)
            .send()
            .await
            .map_err(|e| {
                warn!("newsletter request failed: {}", e);
                SubscribeError::Transport(e)
            })?;

        let status = res.status();
        if status.is_success() {
            info!("newsletter subscription accepted ({})", status);
            return Ok(());
        }
        let body = res.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        warn!(
            "newsletter subscription rejected: status={} message={:?}",
            status, message
        );
        Err(SubscribeError::Rejected { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_trims_and_validates() {
        let sub = Subscription::new("  voter@example.org ", " Ada ").unwrap();
        assert_eq!(sub.email, "voter@example.org");
        assert_eq!(sub.name, "Ada");

        for bad in ["", "   ", "voter", "@example.org", "voter@"] {
            assert!(matches!(
                Subscription::new(bad, "x"),
                Err(SubscribeError::InvalidEmail)
            ));
        }
    }

    #[test]
    fn request_body_shape() {
        let sub = Subscription::new("a@b.c", "").unwrap();
        let v = serde_json::to_value(&sub).unwrap();
        assert_eq!(v, serde_json::json!({"email": "a@b.c", "name": ""}));
    }

    #[test]
    fn error_field_extraction() {
        assert_eq!(
            extract_error_message(r#"{"error":"Already subscribed"}"#).as_deref(),
            Some("Already subscribed")
        );
        assert_eq!(extract_error_message(r#"{"message":"nope"}"#), None);
        assert_eq!(extract_error_message(r#"{"error":42}"#), None);
        assert_eq!(extract_error_message(r#"{"error":""}"#), None);
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(""), None);
    }

    #[test]
    fn user_messages() {
        let rejected = SubscribeError::Rejected {
            status: StatusCode::CONFLICT,
            message: Some("Already subscribed".into()),
        };
        assert_eq!(rejected.user_message(), "Already subscribed");
        assert!(rejected.is_retryable());

        let bare = SubscribeError::Rejected {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(bare.user_message(), GENERIC_FAILURE_MESSAGE);

        assert_eq!(
            SubscribeError::InvalidEmail.user_message(),
            INVALID_EMAIL_MESSAGE
        );
        assert!(!SubscribeError::InvalidEmail.is_retryable());
    }
}
