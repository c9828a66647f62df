//! Failed-resolution diagnostics.

use std::fmt;
use std::io;
use std::sync::Arc;

use super::extract::{RefKind, Reference};

/// One failed resolution: a reference that matched zero or several defining
/// nodes.
///
/// Dangling references (target deleted or renamed) and duplicate
/// definitions (several nodes sharing one identifier) surface through this
/// same shape, distinguished only by the count. That keeps the report
/// uniform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Which reference shape failed to resolve.
    pub kind: RefKind,
    /// Root tag of the document containing the failing reference.
    pub source_doc_type: Arc<str>,
    /// Root `name` attribute of that document.
    pub source_doc_name: Arc<str>,
    /// Tag name the definition was expected to have.
    pub expected_type: Arc<str>,
    /// The identifier that failed to resolve.
    pub id: Arc<str>,
    /// Number of candidate definitions found — never exactly 1.
    pub found: usize,
}

impl Diagnostic {
    pub(crate) fn new(reference: &Reference, found: usize) -> Diagnostic {
        Diagnostic {
            kind: reference.kind,
            source_doc_type: reference.source_doc_type.clone(),
            source_doc_name: reference.source_doc_name.clone(),
            expected_type: reference.expected_type.clone(),
            id: reference.id.clone(),
            found,
        }
    }
}

impl fmt::Display for Diagnostic {
    /// Renders the one-line report shape, e.g.
    /// `classDiagram OrderOverview / ClassShape E2 --> 0 found!`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} / {} {} --> {} found!",
            self.source_doc_type, self.source_doc_name, self.expected_type, self.id, self.found
        )
    }
}

/// Writes one diagnostic line to the given stream.
///
/// Successful resolutions produce no output, and there is nothing else to
/// emit: no summary counts and no exit-code signaling of the failure count.
pub fn report(out: &mut impl io::Write, diagnostic: &Diagnostic) -> io::Result<()> {
    writeln!(out, "{diagnostic}")
}
