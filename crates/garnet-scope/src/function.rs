//! Function descriptors
//!
//! The parser hands the compiler one [`Function`] per `def` or block. Only the
//! parts scope resolution needs are modeled here: the ordered parameters and
//! the scope the function was defined in.

use crate::scope::Scope;

/// How a parameter binds call arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Binds exactly one argument
    Required,
    /// Collects all remaining arguments (`*rest`)
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
}

impl Param {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Required,
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Rest,
        }
    }
}

/// A parsed function, method, or block
#[derive(Debug, Clone)]
pub struct Function {
    /// `None` for blocks and lambdas
    pub name: Option<String>,
    pub params: Vec<Param>,
    /// Scope active where the function was declared, not where it is called
    pub scope: Scope,
}

impl Function {
    pub fn new(name: Option<String>, params: Vec<Param>, scope: Scope) -> Self {
        Self {
            name,
            params,
            scope,
        }
    }

    /// Convenience constructor for fixed-arity functions
    pub fn with_args<I, S>(name: Option<String>, args: I, scope: Scope) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params = args.into_iter().map(Param::required).collect();
        Self::new(name, params, scope)
    }

    /// True if the last parameter collects remaining arguments
    pub fn is_variadic(&self) -> bool {
        self.params
            .last()
            .is_some_and(|param| param.kind == ParamKind::Rest)
    }

    /// Number of arguments a caller must supply
    pub fn arity(&self) -> usize {
        self.params
            .iter()
            .filter(|param| param.kind == ParamKind::Required)
            .count()
    }

    /// Position of a parameter; the first match wins
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|param| param.name == name)
    }
}
