#![forbid(unsafe_code)]

//! Engine-wide policy knobs.
//!
//! With the `policy-config` feature (on by default) an [`EngineConfig`] can
//! be loaded from a TOML policy file. Missing keys take their defaults.
//!
//! ```toml
//! invalid_date = "store-none"
//! bind_nested = false
//! narrow_breakpoint_px = 600
//! max_chars = 80
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::InvalidDatePolicy;

/// Viewport width (px) below which list templates use abbreviated dates.
pub const DEFAULT_NARROW_BREAKPOINT_PX: u32 = 740;

/// Default truncation length for list cell text.
pub const DEFAULT_MAX_CHARS: usize = 120;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "policy-config")]
    #[error("malformed policy file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid policy: {0}")]
    Invalid(String),
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// What binding stores when a date input fails to parse.
    pub invalid_date: InvalidDatePolicy,
    /// Whether whole-form bind descends into swapper panels flagged
    /// `bind_with_form`.
    pub bind_nested: bool,
    /// Viewport width below which list templates switch to short dates.
    pub narrow_breakpoint_px: u32,
    /// Truncation length used by list cell text helpers.
    pub max_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            invalid_date: InvalidDatePolicy::default(),
            bind_nested: true,
            narrow_breakpoint_px: DEFAULT_NARROW_BREAKPOINT_PX,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_invalid_date(mut self, policy: InvalidDatePolicy) -> Self {
        self.invalid_date = policy;
        self
    }

    #[must_use]
    pub fn with_bind_nested(mut self, bind_nested: bool) -> Self {
        self.bind_nested = bind_nested;
        self
    }

    #[must_use]
    pub fn with_narrow_breakpoint(mut self, px: u32) -> Self {
        self.narrow_breakpoint_px = px;
        self
    }

    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Reject values the engines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chars == 0 {
            return Err(ConfigError::Invalid("max_chars must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse a TOML policy file.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(?config, "loaded engine policy");
        Ok(config)
    }
}
