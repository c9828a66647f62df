//! # modelcheck
//!
//! Referential integrity checker for UML model and diagram documents.
//!
//! A model project manifest lists model documents (an element catalog) and
//! diagram documents whose shapes reference those elements. This crate
//! loads the whole corpus, extracts every cross-reference, and reports each
//! one that does not resolve to exactly one defining node.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! check     → reference extraction, resolution, diagnostics
//!   ↓
//! corpus    → loaded model/diagram document sets
//!   ↓
//! manifest  → project manifest reading, item classification
//!   ↓
//! document  → XML document store: tree, namespace context, selectors
//!   ↓
//! error     → CheckError
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use modelcheck::check::check_project;
//!
//! let diagnostics = check_project(Path::new("project.modelproj"))?;
//! for diagnostic in &diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

/// Integrity checks: reference extraction, resolution, diagnostics
pub mod check;

/// Loaded model/diagram document sets
pub mod corpus;

/// XML document store: tree, namespace context, selector queries
pub mod document;

/// Error types
pub mod error;

/// Project manifest reading and item classification
pub mod manifest;

// Re-export the types most callers need
pub use check::{Diagnostic, check_corpus, check_project};
pub use corpus::Corpus;
pub use document::{Document, NodeId, Selector};
pub use error::CheckError;
pub use manifest::Manifest;
