//! Layout configuration
//!
//! Constants that shape class-object layout and class-variable storage keys.
//! The defaults match the runtime's class-object header; a driver may load
//! overrides from TOML when targeting a different runtime.

use serde::Deserialize;

use crate::error::{ScopeError, ScopeResult};

/// Number of class-object header slots ahead of the dispatch table:
/// self descriptor, instance size, name, superclass.
pub const RESERVED_FIELD_SLOTS: usize = 4;

/// Prefix of the global key that stores a class variable.
pub const CLASS_VAR_PREFIX: &str = "__classvar__";

/// Layout settings for one compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Header slots reserved before the built-in dispatch entries
    pub reserved_field_slots: usize,
    /// Prefix for mangled class-variable keys
    pub class_var_prefix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reserved_field_slots: RESERVED_FIELD_SLOTS,
            class_var_prefix: CLASS_VAR_PREFIX.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Parse a flat TOML table. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> ScopeResult<Self> {
        let config: LayoutConfig = toml::from_str(source).map_err(|err| ScopeError::Config {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> ScopeResult<()> {
        if self.class_var_prefix.is_empty() {
            return Err(ScopeError::Config {
                message: "class_var_prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
