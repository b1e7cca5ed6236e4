//! Block-local scope

use indexmap::IndexMap;
use tracing::trace;

use super::{Resolve, Scope};
use crate::resolution::Resolution;

/// Local bindings of one block or method body
///
/// Nested blocks chain through `parent`, each adding its own bindings.
#[derive(Debug, Clone)]
pub struct LocalScope {
    locals: IndexMap<String, usize>,
    parent: Option<Scope>,
}

impl LocalScope {
    /// Create from explicit `(name, index)` pairs. A repeated name keeps its
    /// first index.
    pub fn new<I, S>(locals: I, parent: Option<Scope>) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut map: IndexMap<String, usize> = IndexMap::new();
        for (name, index) in locals {
            map.entry(name.into()).or_insert(index);
        }
        LocalScope {
            locals: map,
            parent,
        }
    }

    /// Create with indices assigned in order of first appearance
    pub fn from_names<I, S>(names: I, parent: Option<Scope>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map: IndexMap<String, usize> = IndexMap::new();
        for name in names {
            let next = map.len();
            map.entry(name.into()).or_insert(next);
        }
        LocalScope {
            locals: map,
            parent,
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.locals.get(name).copied()
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.parent.as_ref()
    }

    pub fn len(&self) -> usize {
        self.locals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locals.is_empty()
    }
}

impl Resolve for LocalScope {
    fn resolve(&self, name: &str) -> Resolution {
        if let Some(index) = self.get(name) {
            trace!(name, index, "resolved local variable");
            return Resolution::LocalVar(index);
        }

        match &self.parent {
            Some(parent) => parent.resolve(name),
            // FIXME: only reachable without an enclosing scope; confirm whether
            // top-level script bodies ever compile this way.
            None => {
                trace!(name, "no enclosing scope, resolving to address");
                Resolution::Address(name.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use crate::scope::{FunctionScope, GlobalScope};

    fn local_scope() -> LocalScope {
        let f = Function::with_args(None, ["arg1", "arg2", "arg3"], GlobalScope::new().into());
        let fs: Scope = FunctionScope::new(f).into();
        LocalScope::new([("local1", 0), ("local2", 1)], Some(fs))
    }

    #[test]
    fn test_no_locals_no_parent() {
        let ls = LocalScope::new(Vec::<(String, usize)>::new(), None);
        assert!(ls.is_empty());
        assert_eq!(ls.resolve("some_var"), Resolution::Address("some_var".into()));
    }

    #[test]
    fn test_find_locals() {
        let ls = local_scope();
        assert_eq!(ls.resolve("local1"), Resolution::LocalVar(0));
        assert_eq!(ls.resolve("local2"), Resolution::LocalVar(1));
    }

    #[test]
    fn test_unknown_reaches_global_fallback() {
        let ls = local_scope();
        assert_eq!(
            ls.resolve("undefined_arg"),
            Resolution::PossibleMethodCall("undefined_arg".into())
        );
        // The function was defined in a scope that never saw `my_global`
        assert_eq!(
            ls.resolve("my_global"),
            Resolution::PossibleMethodCall("my_global".into())
        );
        assert_eq!(ls.resolve("arg2"), Resolution::Arg(1));
    }

    #[test]
    fn test_nested_blocks_shadow() {
        let outer: Scope = LocalScope::from_names(["a", "b"], None).into();
        let inner = LocalScope::from_names(["b"], Some(outer));
        assert_eq!(inner.resolve("b"), Resolution::LocalVar(0));
        assert_eq!(inner.resolve("a"), Resolution::LocalVar(0));
        assert_eq!(inner.resolve("c"), Resolution::Address("c".into()));
    }

    #[test]
    fn test_from_names_skips_duplicates() {
        let ls = LocalScope::from_names(["x", "y", "x", "z"], None);
        assert_eq!(ls.len(), 3);
        assert_eq!(ls.get("z"), Some(2));
    }
}
