//! # Storage Layer
//!
//! The durable state of the board core is tiny: one JSON document per named
//! slot (today only `"savedSearches"`). In the browser original this was
//! `localStorage`; here it is the [`KvBackend`] trait so the saved-search
//! store can be exercised against memory in tests and against files in the
//! binary.
//!
//! Backends store opaque strings. Encoding and schema belong to the caller
//! (see [`crate::saved`]); a backend never inspects the payload.
//!
//! Write semantics are last-writer-wins for the whole slot. There is no
//! incremental update and no concurrent writer — all mutation is serialized
//! through the single-threaded event flow.
//!
//! ## Implementations
//!
//! - [`mem_backend::MemBackend`]: in-process map, for tests and ephemeral
//!   sessions.
//! - [`file_backend::FileBackend`]: one `<slot>.json` file per key under a
//!   data directory, written atomically (tmp file then rename).

use crate::error::Result;

pub mod file_backend;
pub mod mem_backend;

pub use file_backend::FileBackend;
pub use mem_backend::MemBackend;

/// Abstract interface for the durable key-value slot.
pub trait KvBackend {
    /// Read a slot. `Ok(None)` when the slot has never been written;
    /// `Err` only on real I/O failures.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace a slot's full contents.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KvBackend + ?Sized> KvBackend for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KvBackend + ?Sized> KvBackend for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
