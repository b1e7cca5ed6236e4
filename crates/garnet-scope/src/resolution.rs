//! Resolution results handed to the code generator

use std::fmt;

/// What a free identifier denotes at a given point in the program
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Local binding at this index in the current block
    LocalVar(usize),
    /// Function parameter at this position
    Arg(usize),
    /// Instance field at this slot
    InstanceVar(usize),
    /// Module-level global
    GlobalVar(String),
    /// Class variable, stored as a global under a mangled key
    ClassVarGlobal(String),
    /// Raw storage cell keyed by name, used when there is no scope context
    Address(String),
    /// Unknown binding; emitted as an implicit method send and resolved later
    PossibleMethodCall(String),
}

impl Resolution {
    /// True when the decision is deferred to method-call resolution
    pub fn is_deferred(&self) -> bool {
        matches!(self, Resolution::PossibleMethodCall(_))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::LocalVar(index) => write!(f, "lvar {}", index),
            Resolution::Arg(index) => write!(f, "arg {}", index),
            Resolution::InstanceVar(index) => write!(f, "ivar {}", index),
            Resolution::GlobalVar(name) => write!(f, "global {}", name),
            Resolution::ClassVarGlobal(key) => write!(f, "classvar {}", key),
            Resolution::Address(name) => write!(f, "addr {}", name),
            Resolution::PossibleMethodCall(name) => write!(f, "callm {}", name),
        }
    }
}
