//! Validation logic for configuration sections.

use anyhow::Result;

use super::defaults::{LookupConfig, ProbeConfig, RetryConfig, ValidationConfig};
use crate::record::{Category, FieldKey};
use crate::validator::NormalizerTable;

impl LookupConfig {
    /// Validate lookup configuration
    pub fn validate(&self) -> Result<()> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            anyhow::bail!("lookup.endpoint must be an http(s) URL, got {}", self.endpoint);
        }

        if self.timeout_ms == 0 {
            anyhow::bail!("lookup.timeout_ms must be greater than 0");
        }

        if self.max_batch_size == 0 {
            anyhow::bail!("lookup.max_batch_size must be greater than 0");
        }

        self.retry.validate()
    }

    /// Bearer token with an explicit override taking precedence.
    pub fn token_or(&self, override_token: Option<&str>) -> Option<String> {
        override_token
            .map(|t| t.to_string())
            .or_else(|| self.bearer_token.clone())
            .filter(|t| !t.is_empty())
    }
}

impl RetryConfig {
    /// Validate retry configuration
    pub fn validate(&self) -> Result<()> {
        if self.backoff_multiplier.is_nan() || self.backoff_multiplier < 1.0 {
            anyhow::bail!(
                "lookup.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            );
        }

        Ok(())
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            anyhow::bail!("probe.timeout_ms must be greater than 0");
        }
        Ok(())
    }
}

impl ValidationConfig {
    /// Validate the enablement table and resolve category names.
    pub fn validate(&self) -> Result<()> {
        self.normalizer_table().map(|_| ())
    }

    /// Build the normalizer enablement table described by this section.
    pub fn normalizer_table(&self) -> Result<NormalizerTable> {
        if self.description_short_width == 0 {
            anyhow::bail!("validation.description_short_width must be greater than 0");
        }

        let mut table = NormalizerTable::none()
            .with_description_short_width(self.description_short_width);

        for key in &self.enabled {
            if !key.is_verification_field() {
                anyhow::bail!(
                    "validation.enabled: field '{}' has no normalizer (expected one of: {})",
                    key,
                    normalizable_keys().join(", ")
                );
            }
            table = table.enable(*key);
        }

        for (label, keys) in &self.disabled_for {
            let category = Category::from_label(label).ok_or_else(|| {
                anyhow::anyhow!("validation.disabled_for: unknown category '{}'", label)
            })?;
            for key in keys {
                table = table.disable_for(category, *key);
            }
        }

        Ok(table)
    }
}

/// Keys accepted in `validation.enabled`, for error hints.
pub fn normalizable_keys() -> Vec<&'static str> {
    FieldKey::ALL
        .into_iter()
        .filter(|k| k.is_verification_field())
        .map(FieldKey::as_str)
        .collect()
}
