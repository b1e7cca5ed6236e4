//! Scope and layout errors
//!
//! Resolving an identifier never fails. These errors cover the few places
//! where the compiler itself broke an invariant, plus class declaration and
//! configuration problems reported by the driver.

use thiserror::Error;

pub type ScopeResult<T> = Result<T, ScopeError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// A dispatch offset was requested before it was allocated
    #[error("Internal compiler error: no dispatch slot allocated for '{name}'")]
    UnallocatedSlot { name: String },

    /// A parent class was referenced before being declared
    #[error("Undefined class: {name}")]
    UnknownClass { name: String },

    /// A class was reopened with a different superclass
    #[error("Superclass mismatch for class {class}: declared {declared}, got {requested}")]
    ParentMismatch {
        class: String,
        declared: String,
        requested: String,
    },

    /// A field was added to a class whose layout a subclass already copied
    #[error("Cannot add field {field} to class {class}: a subclass already fixed its layout")]
    LayoutFrozen { class: String, field: String },

    #[error("Invalid layout configuration: {message}")]
    Config { message: String },
}
