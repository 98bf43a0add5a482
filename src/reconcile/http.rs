//! Twitter-style user lookup over HTTP.
//!
//! `GET {endpoint}/2/users/by?usernames=a,b,c` with a bearer token. Names the
//! service does not know come back under `errors` and are treated as misses.

use std::time::Duration;

use serde::Deserialize;
use ureq::{Agent, AgentBuilder};
use url::Url;

use super::{IdentityInfo, IdentityLookup, IdentityMatches};
use crate::config::LookupConfig;
use crate::error::LookupError;

const USERS_BY_PATH: &str = "2/users/by";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    data: Vec<UserObject>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct UserObject {
    username: String,
    #[serde(default)]
    name: String,
}

pub struct HttpIdentityLookup {
    agent: Agent,
    endpoint: String,
    token: Option<String>,
    timeout_ms: u64,
    max_batch_size: usize,
}

impl HttpIdentityLookup {
    pub fn new(config: &LookupConfig, token: Option<String>) -> Self {
        let agent = AgentBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build();

        Self {
            agent,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token,
            timeout_ms: config.timeout_ms,
            max_batch_size: config.max_batch_size.max(1),
        }
    }

    fn request_url(&self, handles: &[String]) -> Result<Url, LookupError> {
        let base = format!("{}/{}", self.endpoint, USERS_BY_PATH);
        Url::parse_with_params(
            &base,
            &[("usernames", handles.join(",")), ("user.fields", "name".to_string())],
        )
        .map_err(|e| LookupError::Transport(format!("invalid lookup URL {}: {}", base, e)))
    }

    fn fetch_page(&self, token: &str, handles: &[String]) -> Result<Vec<IdentityInfo>, LookupError> {
        let url = self.request_url(handles)?;
        tracing::debug!(count = handles.len(), "sending lookup request");

        let response = self
            .agent
            .request_url("GET", &url)
            .set("Authorization", &format!("Bearer {}", token))
            .call()
            .map_err(|e| self.classify(e))?;

        let body = response
            .into_string()
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        parse_lookup_response(&body)
    }

    fn classify(&self, error: ureq::Error) -> LookupError {
        match error {
            ureq::Error::Status(code @ (401 | 403), _) => LookupError::Unauthorized { code },
            ureq::Error::Status(code, response) => LookupError::Status {
                code,
                message: response.status_text().to_string(),
            },
            ureq::Error::Transport(transport) => {
                let message = transport.to_string();
                if message.contains("timed out") {
                    LookupError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    LookupError::Transport(message)
                }
            }
        }
    }
}

impl IdentityLookup for HttpIdentityLookup {
    /// Sends one request per `max_batch_size` handles. Any failing page
    /// fails the whole lookup.
    fn lookup(&self, handles: &[String]) -> Result<IdentityMatches, LookupError> {
        let token = self.token.as_deref().ok_or(LookupError::MissingToken)?;

        let mut matches = IdentityMatches::new();
        for page in handles.chunks(self.max_batch_size) {
            for info in self.fetch_page(token, page)? {
                matches.insert(info);
            }
        }
        Ok(matches)
    }
}

/// Parse a `users/by` response body into identities.
pub fn parse_lookup_response(body: &str) -> Result<Vec<IdentityInfo>, LookupError> {
    let response: LookupResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    if !response.errors.is_empty() {
        tracing::debug!(misses = response.errors.len(), "lookup reported unknown names");
    }

    Ok(response
        .data
        .into_iter()
        .map(|user| IdentityInfo {
            handle: user.username,
            display_name: user.name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_found_and_missing() {
        let body = r#"{
            "data": [{"id": "12", "name": "Alice A", "username": "ALICE"}],
            "errors": [{"value": "bob", "detail": "Could not find user with usernames: [bob].", "title": "Not Found Error"}]
        }"#;
        let users = parse_lookup_response(body).unwrap();
        assert_eq!(
            users,
            vec![IdentityInfo {
                handle: "ALICE".to_string(),
                display_name: "Alice A".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_all_missing() {
        let body = r#"{"errors": [{"value": "nobody"}]}"#;
        assert!(parse_lookup_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_is_decode_error() {
        let err = parse_lookup_response("<html>").unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_request_url() {
        let config = LookupConfig {
            endpoint: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        let lookup = HttpIdentityLookup::new(&config, None);
        let url = lookup
            .request_url(&["alice".to_string(), "bob_2".to_string()])
            .unwrap();
        assert_eq!(url.path(), "/2/users/by");
        let usernames = url
            .query_pairs()
            .find(|(k, _)| k == "usernames")
            .map(|(_, v)| v.into_owned());
        assert_eq!(usernames.as_deref(), Some("alice,bob_2"));
    }

    #[test]
    fn test_missing_token_fails_before_request() {
        let config = LookupConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let lookup = HttpIdentityLookup::new(&config, None);
        let err = lookup.lookup(&["alice".to_string()]).unwrap_err();
        assert!(matches!(err, LookupError::MissingToken));
    }
}
