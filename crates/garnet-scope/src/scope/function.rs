//! Function parameter scope

use tracing::trace;

use super::{Resolve, Scope};
use crate::function::Function;
use crate::resolution::Resolution;

/// Resolves parameters by position and passes everything else to the scope
/// the function was defined in.
#[derive(Debug, Clone)]
pub struct FunctionScope {
    function: Function,
}

impl FunctionScope {
    pub fn new(function: Function) -> Self {
        FunctionScope { function }
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Lexically enclosing scope of the declaration
    pub fn defining_scope(&self) -> &Scope {
        &self.function.scope
    }

    /// Whether the prologue must adjust for a `*rest` parameter
    pub fn has_rest_parameter(&self) -> bool {
        self.function.is_variadic()
    }
}

impl Resolve for FunctionScope {
    fn resolve(&self, name: &str) -> Resolution {
        match self.function.param_index(name) {
            Some(index) => {
                trace!(name, index, "resolved function argument");
                Resolution::Arg(index)
            }
            None => self.function.scope.resolve(name),
        }
    }
}
