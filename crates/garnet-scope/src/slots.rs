//! Dispatch slot allocation
//!
//! Every method name used anywhere in a class hierarchy gets one fixed offset
//! in the class object's dispatch table. Offsets are handed out in the order
//! names are first requested and are never reassigned, so an override in a
//! subclass always lands on the slot of the method it replaces.
//!
//! Layout of a class object:
//!
//! ```text
//! [0 .. reserved)            header fields (self descriptor, size, name, superclass)
//! reserved + 0               new
//! reserved + 1               __send__
//! reserved + 2               reserved for a future built-in
//! reserved + 3 ..            user methods, first-requested order
//! ```
//!
//! One allocator belongs to exactly one hierarchy. Classes in the hierarchy
//! hold it through [`SharedSlots`]; it is never shared across hierarchies.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{ScopeError, ScopeResult};

/// Built-in construction entry point
pub const BUILTIN_NEW: &str = "new";

/// Built-in dynamic send entry point
pub const BUILTIN_SEND: &str = "__send__";

/// Dispatch entries every object supports: `new`, `__send__`, and one spare
pub const BUILTIN_DISPATCH_SLOTS: usize = 3;

/// Allocator handle shared by every class of one hierarchy
pub type SharedSlots = Rc<RefCell<SlotAllocator>>;

/// How the receiver of a compiled call site is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    /// Bare call on `self`, e.g. `foo(1)`
    Implicit,
    /// Call on an evaluated receiver, e.g. `x.foo(1)`
    Explicit,
    /// `super` call into the parent's implementation
    Super,
}

/// Compiled call-site record: receiver kind, method name, extra data.
///
/// Slot allocation keys on the method name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    pub receiver: ReceiverKind,
    pub method: String,
    pub extra: Vec<String>,
}

impl CallDescriptor {
    pub fn new(receiver: ReceiverKind, method: impl Into<String>) -> Self {
        Self {
            receiver,
            method: method.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra.push(extra.into());
        self
    }
}

/// Append-only map from dispatch name to offset
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    offsets: FxHashMap<String, usize>,
    /// Lowest offset not yet handed out
    max: usize,
    reserved_field_slots: usize,
}

impl SlotAllocator {
    /// Create an allocator with the default header size
    pub fn new() -> Self {
        Self::with_config(&LayoutConfig::default())
    }

    pub fn with_config(config: &LayoutConfig) -> Self {
        let reserved = config.reserved_field_slots;
        let mut offsets = FxHashMap::default();
        offsets.insert(BUILTIN_NEW.to_string(), reserved);
        offsets.insert(BUILTIN_SEND.to_string(), reserved + 1);

        SlotAllocator {
            offsets,
            max: reserved + BUILTIN_DISPATCH_SLOTS,
            reserved_field_slots: reserved,
        }
    }

    /// Wrap into a handle for sharing across a hierarchy
    pub fn shared(self) -> SharedSlots {
        Rc::new(RefCell::new(self))
    }

    /// High-water mark: the lowest offset guaranteed unallocated
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn reserved_field_slots(&self) -> usize {
        self.reserved_field_slots
    }

    /// Normalize a bare dispatch name (identity)
    pub fn clean_name<'n>(&self, name: &'n str) -> &'n str {
        name
    }

    /// Normalize a call descriptor to its method-name component
    pub fn clean_call_name<'d>(&self, call: &'d CallDescriptor) -> &'d str {
        &call.method
    }

    /// Allocate an offset for `name`, or return the one it already has
    pub fn alloc_offset(&mut self, name: &str) -> usize {
        let name = self.clean_name(name);
        if let Some(&offset) = self.offsets.get(name) {
            return offset;
        }

        let offset = self.max;
        self.offsets.insert(name.to_string(), offset);
        self.max += 1;
        debug!(name, offset, "allocated dispatch slot");
        offset
    }

    pub fn alloc_call_offset(&mut self, call: &CallDescriptor) -> usize {
        let name = self.clean_call_name(call);
        self.alloc_offset(name)
    }

    /// Look up the offset of an allocated name.
    ///
    /// `new` and `__send__` are always present. Any other name must have gone
    /// through [`alloc_offset`](Self::alloc_offset) first.
    pub fn get_offset(&self, name: &str) -> ScopeResult<usize> {
        let name = self.clean_name(name);
        self.offsets
            .get(name)
            .copied()
            .ok_or_else(|| ScopeError::UnallocatedSlot {
                name: name.to_string(),
            })
    }

    pub fn get_call_offset(&self, call: &CallDescriptor) -> ScopeResult<usize> {
        self.get_offset(self.clean_call_name(call))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.offsets.contains_key(self.clean_name(name))
    }

    /// All allocated names, ordered by offset
    pub fn entries(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .offsets
            .iter()
            .map(|(name, &offset)| (name.as_str(), offset))
            .collect();
        entries.sort_by_key(|&(_, offset)| offset);
        entries
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}
