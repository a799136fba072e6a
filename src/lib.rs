//! # Corkboard Architecture
//!
//! Corkboard is the **browsing core of a community board**: faceted
//! filtering, sorting and saved searches over a post collection. It is a
//! library first — the bundled binary is just one client driving it from a
//! terminal the way the original web pages drive it from browser events.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Client (main.rs, or any other UI)                       │
//! │  - turns user events into controller calls               │
//! │  - prints what render/ builds                            │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Controller (controller.rs)                              │
//! │  - owns the live FacetSelection and the dirty flag       │
//! │  - recomputes the visible list on every mutation         │
//! │  - guards saved-search switches behind a confirmation    │
//! └──────────────────────────────────────────────────────────┘
//!            │                               │
//!            ▼                               ▼
//! ┌───────────────────────┐   ┌──────────────────────────────┐
//! │  Engines              │   │  Saved searches (saved.rs)   │
//! │  filter.rs, sort.rs   │   │  - named selection snapshots │
//! │  - pure functions     │   │  - persisted via store/      │
//! └───────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Key principle: synchronous, single-owner state
//!
//! Filter state has exactly one writer (the controller) and the saved list
//! has exactly one writer (the store). Mutation and derived recomputation
//! happen synchronously on the caller's thread; there is no background work
//! and no cache to go stale.
//!
//! ## Module Overview
//!
//! - [`model`]: entities (`Post`, `Comment`, `Category`, …)
//! - [`selection`]: the `FacetSelection` query value and its set semantics
//! - [`filter`]: the pure predicate engine
//! - [`sort`]: sort modes and the stable sorter
//! - [`controller`]: live state owner, dirty tracking, pending-switch flow
//! - [`saved`]: the saved-search store
//! - [`store`]: the key-value persistence port (memory / file backends)
//! - [`vocab`]: facet catalogs offered by the panel
//! - [`render`]: string builders for panel, picker, rows and cards
//! - [`samples`]: the in-memory sample collection
//! - [`error`]: error types

pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod render;
pub mod samples;
pub mod saved;
pub mod selection;
pub mod sort;
pub mod store;
pub mod vocab;
