//! Referential-integrity checks.
//!
//! The core of the tool: walk the loaded corpus, extract element-definition
//! and moniker references, and verify each resolves to exactly one defining
//! node. Zero or multiple candidates become [`Diagnostic`]s; resolution
//! failures never stop the pass.

mod diagnostic;
mod extract;
mod resolve;

pub use diagnostic::{Diagnostic, report};
pub use extract::{
    MONIKER_SUFFIX, RefKind, Reference, extract_element_refs, extract_moniker_refs,
};
pub use resolve::resolve;

use std::path::Path;

use crate::corpus::Corpus;
use crate::error::CheckError;
use crate::manifest::Manifest;

/// Loads the project behind `manifest_path` and checks it.
///
/// Any load or parse failure aborts with an error and no diagnostics; a
/// completed pass returns every failed resolution, however many there are.
pub fn check_project(manifest_path: &Path) -> Result<Vec<Diagnostic>, CheckError> {
    let manifest = Manifest::load(manifest_path)?;
    let corpus = Corpus::load(&manifest)?;
    Ok(check_corpus(&corpus))
}

/// Checks an already-loaded corpus.
///
/// Element-definition references are checked first (diagrams in manifest
/// order), then moniker references (models, then diagrams). Within a
/// document, references are visited in document order, so diagnostics come
/// back deterministically and repeated runs over an unchanged corpus
/// produce identical output.
pub fn check_corpus(corpus: &Corpus) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for diagram in corpus.diagrams() {
        for reference in extract_element_refs(diagram) {
            check_reference(&reference, corpus, &mut diagnostics);
        }
    }
    for doc in corpus.all() {
        for reference in extract_moniker_refs(doc) {
            check_reference(&reference, corpus, &mut diagnostics);
        }
    }

    tracing::debug!(failures = diagnostics.len(), "check complete");
    diagnostics
}

/// Exactly one match is a successful resolution and stays silent; zero or
/// several matches become one diagnostic carrying the exact count.
fn check_reference(reference: &Reference, corpus: &Corpus, out: &mut Vec<Diagnostic>) {
    let found = resolve(reference, corpus).len();
    if found != 1 {
        out.push(Diagnostic::new(reference, found));
    }
}
