//! Dashboard document model.
//!
//! # Responsibility
//! - Hold the `ProjectData` root document and the sync summary document.
//! - Offer lenient typed views over their sections.
//! - Classify raw status strings into closed display categories.
//! - Provide the built-in "no data available" document.
//!
//! # Invariants
//! - Documents are plain data; nothing in this module performs I/O.
//! - Any JSON object is a valid document; nothing is schema-checked.

pub mod fallback;
pub mod project;
pub mod record;
pub mod status;
pub mod sync_doc;
