//! Lexical scopes for identifier resolution
//!
//! While walking the AST the code generator holds the [`Scope`] for its current
//! position and asks it to [`resolve`](Scope::resolve) each free identifier.
//! A scope answers from its own bindings or forwards the question outward:
//!
//! ```text
//! LocalScope -> FunctionScope -> ClassScope -> GlobalScope
//! ```
//!
//! Each kind has its own policy for names it does not bind. The chain always
//! ends in a [`GlobalScope`], which defers anything unknown as a possible
//! method call. A parentless [`LocalScope`] is the only other terminal.

pub mod class;
pub mod function;
pub mod global;
pub mod local;

use std::rc::Rc;

use crate::resolution::Resolution;

pub use class::{ClassScope, VTableEntry, CLASS_FIELD};
pub use function::FunctionScope;
pub use global::GlobalScope;
pub use local::LocalScope;

/// Common resolution capability of every scope kind
pub trait Resolve {
    /// Decide what `name` denotes from this point in the program
    fn resolve(&self, name: &str) -> Resolution;
}

/// Scope kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Local,
    Class,
}

/// Handle to one scope in a chain
///
/// Cloning is cheap; all variants are reference-counted.
#[derive(Debug, Clone)]
pub enum Scope {
    Global(Rc<GlobalScope>),
    Function(Rc<FunctionScope>),
    Local(Rc<LocalScope>),
    Class(Rc<ClassScope>),
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Scope::Global(_) => ScopeKind::Global,
            Scope::Function(_) => ScopeKind::Function,
            Scope::Local(_) => ScopeKind::Local,
            Scope::Class(_) => ScopeKind::Class,
        }
    }

    /// Resolve `name`, walking outward until some scope answers
    pub fn resolve(&self, name: &str) -> Resolution {
        match self {
            Scope::Global(scope) => scope.resolve(name),
            Scope::Function(scope) => scope.resolve(name),
            Scope::Local(scope) => scope.resolve(name),
            Scope::Class(scope) => scope.resolve(name),
        }
    }
}

impl Resolve for Scope {
    fn resolve(&self, name: &str) -> Resolution {
        Scope::resolve(self, name)
    }
}

macro_rules! impl_scope_from {
    ($variant:ident, $ty:ty) => {
        impl From<Rc<$ty>> for Scope {
            fn from(scope: Rc<$ty>) -> Self {
                Scope::$variant(scope)
            }
        }

        impl From<$ty> for Scope {
            fn from(scope: $ty) -> Self {
                Scope::$variant(Rc::new(scope))
            }
        }
    };
}

impl_scope_from!(Global, GlobalScope);
impl_scope_from!(Function, FunctionScope);
impl_scope_from!(Local, LocalScope);
impl_scope_from!(Class, ClassScope);
