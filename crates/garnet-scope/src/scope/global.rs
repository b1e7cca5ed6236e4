//! Module-level scope
//!
//! Root of every scope chain. Holds the compilation unit's registered globals
//! and layout configuration.

use std::cell::RefCell;

use indexmap::IndexSet;
use tracing::trace;

use super::Resolve;
use crate::config::LayoutConfig;
use crate::resolution::Resolution;

/// Language constants registered on construction
pub const PREDEFINED_GLOBALS: [&str; 3] = ["true", "false", "nil"];

/// Registry of module-level names
///
/// Globals are added through a shared reference so that nested scopes can keep
/// a handle to the root while declarations are still being processed.
#[derive(Debug)]
pub struct GlobalScope {
    globals: RefCell<IndexSet<String>>,
    config: LayoutConfig,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        let globals: IndexSet<String> = PREDEFINED_GLOBALS
            .iter()
            .map(|name| name.to_string())
            .collect();
        GlobalScope {
            globals: RefCell::new(globals),
            config,
        }
    }

    /// Register a global. Returns false if it was already present.
    pub fn add_global(&self, name: impl Into<String>) -> bool {
        self.globals.borrow_mut().insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.globals.borrow().contains(name)
    }

    /// Registered names in registration order
    pub fn globals(&self) -> Vec<String> {
        self.globals.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.globals.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.borrow().is_empty()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}

impl Default for GlobalScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolve for GlobalScope {
    fn resolve(&self, name: &str) -> Resolution {
        if self.contains(name) {
            Resolution::GlobalVar(name.to_string())
        } else {
            // Methods are not known yet during this pass
            trace!(name, "deferring unknown identifier as method call");
            Resolution::PossibleMethodCall(name.to_string())
        }
    }
}
