//! In-memory backend. Nothing survives the process; that is the point.

use std::cell::RefCell;
use std::collections::HashMap;

use super::KvBackend;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents of a slot, for assertions in tests.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl KvBackend for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
