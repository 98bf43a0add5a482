//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::FieldKey;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_endpoint, String, "https://api.twitter.com".to_string());
default_fn!(default_lookup_timeout_ms, u64, 10_000);
default_fn!(default_max_batch_size, usize, 100);
default_fn!(default_max_retries, usize, 3);
default_fn!(default_retry_delay_ms, u64, 1_000);
default_fn!(default_backoff_multiplier, f64, 2.0);
default_fn!(default_probe_timeout_ms, u64, 5_000);
default_fn!(default_description_short_width, usize, 60);
default_fn!(
    default_preview_base_url,
    String,
    "/preview/event-detail/".to_string()
);
default_fn!(
    default_enabled_fields,
    Vec<FieldKey>,
    vec![
        FieldKey::Twitter,
        FieldKey::Facebook,
        FieldKey::Instagram,
        FieldKey::Website,
        FieldKey::DescriptionShort,
    ]
);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Retry policy for the batch identity lookup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Retries after the first failed attempt (default: 3)
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Delay before the first retry in milliseconds (default: 1000)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Multiplier applied per retry (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// External identity lookup settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// API base URL (default: https://api.twitter.com)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer token. Usually injected from the command line instead.
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// Per-request timeout (default: 10s)
    #[serde(default = "default_lookup_timeout_ms")]
    pub timeout_ms: u64,
    /// Most usernames sent in one HTTP request (default: 100)
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            bearer_token: None,
            timeout_ms: default_lookup_timeout_ms(),
            max_batch_size: default_max_batch_size(),
            retry: RetryConfig::default(),
        }
    }
}

/// Website reachability probing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Probe websites during reconcile/export (default: false)
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// Which normalizers run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Field keys whose normalizer is enabled
    #[serde(default = "default_enabled_fields")]
    pub enabled: Vec<FieldKey>,
    /// Category alias or form label -> field keys disabled for that category
    #[serde(default)]
    pub disabled_for: BTreeMap<String, Vec<FieldKey>>,
    /// Column budget for the short description (default: 60)
    #[serde(default = "default_description_short_width")]
    pub description_short_width: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_fields(),
            disabled_for: BTreeMap::new(),
            description_short_width: default_description_short_width(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Prefix for review preview links; the event ID is appended
    #[serde(default = "default_preview_base_url")]
    pub preview_base_url: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            preview_base_url: default_preview_base_url(),
        }
    }
}
