//! Repository layer over the local key-value store.
//!
//! # Responsibility
//! - Define the key-value access contract used by UI-state services.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Keys are non-blank and stored trimmed.

pub mod kv_repo;
