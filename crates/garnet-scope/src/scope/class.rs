//! Class body scope and object layout
//!
//! A [`ClassScope`] owns the instance-field layout of one class and its own
//! dispatch entries. Subclasses start from a copy of the parent's fields, read
//! inherited methods through the parent, and share the parent's
//! [`SlotAllocator`], so:
//!
//! - inherited fields keep their indices
//! - an overriding method reuses the parent's dispatch offset
//! - a method new to the subclass gets an offset above every offset already
//!   allocated anywhere in the hierarchy
//!
//! Once a class has a subclass its field layout is frozen: a new field would
//! take a slot the subclass has already handed out.
//!
//! [`SlotAllocator`]: crate::slots::SlotAllocator

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use super::{GlobalScope, Resolve};
use crate::error::{ScopeError, ScopeResult};
use crate::resolution::Resolution;
use crate::slots::{SharedSlots, SlotAllocator};

/// Hidden self-descriptor field present at slot 0 of every instance
pub const CLASS_FIELD: &str = "@__class__";

/// One method in a class's dispatch table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VTableEntry {
    pub name: String,
    pub offset: usize,
    /// Code label of the implementation; `None` until the body is compiled
    pub function: Option<String>,
}

#[derive(Debug)]
pub struct ClassScope {
    name: String,
    global: Rc<GlobalScope>,
    parent: Option<Rc<ClassScope>>,
    slots: SharedSlots,
    fields: RefCell<IndexSet<String>>,
    /// Methods defined in this class only
    vtable: RefCell<IndexMap<String, VTableEntry>>,
    subclasses: Cell<usize>,
}

impl ClassScope {
    /// Root class of a new hierarchy, with a fresh slot allocator
    pub fn new(name: impl Into<String>, global: Rc<GlobalScope>) -> Self {
        let slots = SlotAllocator::with_config(global.config()).shared();
        let mut fields = IndexSet::new();
        fields.insert(CLASS_FIELD.to_string());

        ClassScope {
            name: name.into(),
            global,
            parent: None,
            slots,
            fields: RefCell::new(fields),
            vtable: RefCell::new(IndexMap::new()),
            subclasses: Cell::new(0),
        }
    }

    /// Subclass of `parent`: copies its field layout and shares its allocator
    pub fn subclass(name: impl Into<String>, parent: &Rc<ClassScope>) -> Self {
        let name = name.into();
        let fields = parent.fields.borrow().clone();
        parent.subclasses.set(parent.subclasses.get() + 1);
        debug!(
            class = %name,
            parent = %parent.name,
            inherited_fields = fields.len(),
            "seeding subclass layout"
        );

        ClassScope {
            name,
            global: parent.global.clone(),
            parent: Some(parent.clone()),
            slots: parent.slots.clone(),
            fields: RefCell::new(fields),
            vtable: RefCell::new(IndexMap::new()),
            subclasses: Cell::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<ClassScope>> {
        self.parent.as_ref()
    }

    pub fn global(&self) -> &Rc<GlobalScope> {
        &self.global
    }

    /// Handle to the hierarchy's shared allocator
    pub fn slots(&self) -> SharedSlots {
        self.slots.clone()
    }

    /// Whether any subclass has copied this class's layout
    pub fn has_subclasses(&self) -> bool {
        self.subclasses.get() > 0
    }

    /// Number of fields, including the hidden self descriptor
    pub fn instance_size(&self) -> usize {
        self.fields.borrow().len()
    }

    /// Field names in slot order
    pub fn fields(&self) -> Vec<String> {
        self.fields.borrow().iter().cloned().collect()
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.borrow().get_index_of(name)
    }

    /// Register an instance field.
    ///
    /// Returns `Ok(false)` if it already exists, in which case no slot is
    /// consumed. A new field on a class that already has subclasses is
    /// rejected with [`ScopeError::LayoutFrozen`].
    pub fn add_field(&self, name: impl Into<String>) -> ScopeResult<bool> {
        let name = name.into();
        let mut fields = self.fields.borrow_mut();
        if fields.contains(&name) {
            return Ok(false);
        }
        if self.has_subclasses() {
            return Err(ScopeError::LayoutFrozen {
                class: self.name.clone(),
                field: name,
            });
        }
        trace!(class = %self.name, field = %name, index = fields.len(), "added field");
        Ok(fields.insert(name))
    }

    /// Global storage key for class variable `bare` (without the `@@`)
    pub fn class_var_key(&self, bare: &str) -> String {
        format!(
            "{}{}__{}",
            self.global.config().class_var_prefix,
            self.name,
            bare
        )
    }

    /// Allocate a dispatch slot for a method defined in this class
    pub fn add_vtable_entry(&self, name: &str) -> usize {
        let offset = self.slots.borrow_mut().alloc_offset(name);
        self.vtable
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| VTableEntry {
                name: name.to_string(),
                offset,
                function: None,
            });
        offset
    }

    /// Bind a method to its compiled implementation, allocating if needed
    pub fn set_vtable_entry(&self, name: &str, function: impl Into<String>) -> usize {
        let offset = self.add_vtable_entry(name);
        if let Some(entry) = self.vtable.borrow_mut().get_mut(name) {
            entry.function = Some(function.into());
        }
        offset
    }

    /// Entry for `name`, from this class or the nearest ancestor defining it
    pub fn lookup_vtable_entry(&self, name: &str) -> Option<VTableEntry> {
        if let Some(entry) = self.vtable.borrow().get(name) {
            return Some(entry.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.lookup_vtable_entry(name))
    }

    /// Effective dispatch entries, inherited ones included, ordered by offset
    pub fn vtable(&self) -> Vec<VTableEntry> {
        let mut merged: IndexMap<String, VTableEntry> = match &self.parent {
            Some(parent) => parent
                .vtable()
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
            None => IndexMap::new(),
        };
        for entry in self.vtable.borrow().values() {
            merged.insert(entry.name.clone(), entry.clone());
        }

        let mut entries: Vec<VTableEntry> = merged.into_values().collect();
        entries.sort_by_key(|entry| entry.offset);
        entries
    }

    /// Slots needed by the class object, header and dispatch table included
    pub fn klass_size(&self) -> usize {
        self.slots.borrow().max()
    }
}

fn is_instance_var(name: &str) -> bool {
    name.starts_with('@') && !name.starts_with("@@")
}

impl Resolve for ClassScope {
    fn resolve(&self, name: &str) -> Resolution {
        if is_instance_var(name) {
            if let Some(index) = self.field_index(name) {
                trace!(class = %self.name, name, index, "resolved instance field");
                return Resolution::InstanceVar(index);
            }
        }

        if let Some(bare) = name.strip_prefix("@@") {
            let key = self.class_var_key(bare);
            trace!(class = %self.name, name, key = %key, "resolved class variable");
            return Resolution::ClassVarGlobal(key);
        }

        trace!(class = %self.name, name, "forwarding to global scope");
        self.global.resolve(name)
    }
}
