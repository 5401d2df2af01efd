//! UI-state services over the local key-value store.
//!
//! # Responsibility
//! - Own per-feature local state (checklists, theme) and its persistence.
//! - Keep views decoupled from storage details.
//!
//! # Invariants
//! - Local state never writes back into a loaded `ProjectData`.
//! - Storage failures degrade to initial state; they are logged, not raised.

pub mod checklist_service;
pub mod theme_service;
