//! Memory backend configuration.
//!
//! ```toml
//! relative_expiry_limit_secs = 2592000
//! initial_capacity = 1024
//! ```

use serde::Deserialize;

use castore_core::{Error, Result};

/// Default relative-expiry limit: 30 days
pub const DEFAULT_RELATIVE_EXPIRY_LIMIT_SECS: i64 = 2_592_000;

/// How an expiry argument is turned into an expiration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// Expiries above this are absolute Unix timestamps
    pub relative_limit_secs: i64,
}

impl ExpiryPolicy {
    /// Expiration timestamp for `expiry` written at `now`; 0 means never.
    pub fn expires_at(&self, expiry: i64, now: i64) -> i64 {
        if expiry <= 0 {
            0
        } else if expiry > self.relative_limit_secs {
            expiry
        } else {
            now.saturating_add(expiry)
        }
    }

    /// Check if an entry with expiration `expires_at` is live at `now`
    pub fn is_live(expires_at: i64, now: i64) -> bool {
        expires_at <= 0 || now <= expires_at
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            relative_limit_secs: DEFAULT_RELATIVE_EXPIRY_LIMIT_SECS,
        }
    }
}

/// Settings for [`crate::MemoryBackend`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Expiries above this many seconds are absolute timestamps
    pub relative_expiry_limit_secs: i64,
    /// Entries to pre-allocate
    pub initial_capacity: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            relative_expiry_limit_secs: DEFAULT_RELATIVE_EXPIRY_LIMIT_SECS,
            initial_capacity: 0,
        }
    }
}

impl MemoryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: MemoryConfig = toml::from_str(s).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.relative_expiry_limit_secs < 0 {
            return Err(Error::Config {
                message: format!(
                    "relative_expiry_limit_secs must not be negative, got {}",
                    self.relative_expiry_limit_secs
                ),
            });
        }
        Ok(())
    }

    /// Expiry policy described by this config
    pub fn policy(&self) -> ExpiryPolicy {
        ExpiryPolicy {
            relative_limit_secs: self.relative_expiry_limit_secs,
        }
    }
}
