//! Class declaration registry
//!
//! The compiler declares classes in source order. Each root class starts a new
//! hierarchy with its own slot allocator; a subclass is built from its parent's
//! scope and therefore shares the parent's allocator.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ScopeError, ScopeResult};
use crate::scope::{ClassScope, GlobalScope};

#[derive(Debug)]
pub struct ClassTable {
    global: Rc<GlobalScope>,
    classes: IndexMap<String, Rc<ClassScope>>,
}

impl ClassTable {
    pub fn new(global: Rc<GlobalScope>) -> Self {
        ClassTable {
            global,
            classes: IndexMap::new(),
        }
    }

    pub fn global(&self) -> &Rc<GlobalScope> {
        &self.global
    }

    /// Declare or reopen a class.
    ///
    /// Reopening returns the existing scope. Naming a parent on reopen is
    /// allowed only if it matches the original parent.
    pub fn declare(&mut self, name: &str, parent: Option<&str>) -> ScopeResult<Rc<ClassScope>> {
        if let Some(existing) = self.classes.get(name) {
            if let Some(requested) = parent {
                let declared = existing.parent().map(|p| p.name()).unwrap_or("(none)");
                if declared != requested {
                    return Err(ScopeError::ParentMismatch {
                        class: name.to_string(),
                        declared: declared.to_string(),
                        requested: requested.to_string(),
                    });
                }
            }
            debug!(class = name, "reopening class");
            return Ok(existing.clone());
        }

        let scope = match parent {
            Some(parent_name) => {
                let parent_scope = self.classes.get(parent_name).ok_or_else(|| {
                    ScopeError::UnknownClass {
                        name: parent_name.to_string(),
                    }
                })?;
                ClassScope::subclass(name, parent_scope)
            }
            None => ClassScope::new(name, self.global.clone()),
        };

        debug!(class = name, parent = ?parent, "declared class");
        self.global.add_global(name);
        let scope = Rc::new(scope);
        self.classes.insert(name.to_string(), scope.clone());
        Ok(scope)
    }

    pub fn get(&self, name: &str) -> Option<&Rc<ClassScope>> {
        self.classes.get(name)
    }

    /// Classes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<ClassScope>> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
