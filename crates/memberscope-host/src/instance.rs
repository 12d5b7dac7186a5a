//! Host instances

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::registry::{SlotKey, TypeId};

/// Object of a registered type.
///
/// Slots are keyed by declaring type and raw member name, so a derived type
/// and its ancestor can each hold a value for the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_id: TypeId,
    slots: FxHashMap<SlotKey, Value>,
}

impl Instance {
    pub(crate) fn new(type_id: TypeId, slots: FxHashMap<SlotKey, Value>) -> Self {
        Self { type_id, slots }
    }

    /// Runtime type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Value stored for a member declared on `declaring`
    pub fn slot(&self, declaring: TypeId, name: &str) -> Option<&Value> {
        self.slots.get(&(declaring, name.to_string()))
    }

    pub(crate) fn slot_mut(&mut self, declaring: TypeId, name: &str) -> Option<&mut Value> {
        self.slots.get_mut(&(declaring, name.to_string()))
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
