//! Garnet Scope Resolution
//!
//! Identifier resolution and dispatch slot layout for the Garnet compiler.
//!
//! This crate provides:
//! - Scope chains (global, function, local, class) that decide what a free
//!   identifier denotes
//! - Instance-field layout with single inheritance
//! - Dispatch slot allocation shared across a class hierarchy
//! - A class table that wires subclasses to their parent's layout
//!
//! # Usage
//!
//! ```ignore
//! use std::rc::Rc;
//! use garnet_scope::{ClassTable, Function, FunctionScope, GlobalScope, Scope};
//!
//! let global = Rc::new(GlobalScope::new());
//! let mut classes = ClassTable::new(global.clone());
//!
//! let point = classes.declare("Point", None)?;
//! point.add_field("@x")?;
//! point.add_vtable_entry("move");
//!
//! let method = Function::with_args(Some("move".into()), ["dx"], point.into());
//! let scope = Scope::from(FunctionScope::new(method));
//! let resolved = scope.resolve("@x"); // Resolution::InstanceVar(1)
//! ```

pub mod classes;
pub mod config;
pub mod error;
pub mod function;
pub mod resolution;
pub mod scope;
pub mod slots;

// Re-export main types
pub use classes::ClassTable;
pub use config::{LayoutConfig, CLASS_VAR_PREFIX, RESERVED_FIELD_SLOTS};
pub use error::{ScopeError, ScopeResult};
pub use function::{Function, Param, ParamKind};
pub use resolution::Resolution;
pub use scope::{
    ClassScope, FunctionScope, GlobalScope, LocalScope, Resolve, Scope, ScopeKind, VTableEntry,
    CLASS_FIELD,
};
pub use slots::{
    CallDescriptor, ReceiverKind, SharedSlots, SlotAllocator, BUILTIN_DISPATCH_SLOTS, BUILTIN_NEW,
    BUILTIN_SEND,
};
