//! Candidate search for extracted references.

use crate::corpus::Corpus;
use crate::document::{Document, NodeId};

use super::extract::{MONIKER_SUFFIX, RefKind, Reference};

/// Searches the corpus for defining nodes matching `reference`.
///
/// Returns every match, in corpus order, with no early exit — the caller
/// classifies the outcome (exactly one match is a successful resolution).
///
/// Element references search model documents only; a candidate needs a
/// matching `Id` and must not itself be a moniker node, so monikers sharing
/// an `Id` with their definition don't create false multiplicity. Moniker
/// references search the entire corpus for nodes whose tag equals the
/// expected type exactly. Both searches match by local name, in any
/// namespace.
pub fn resolve<'c>(reference: &Reference, corpus: &'c Corpus) -> Vec<(&'c Document, NodeId)> {
    match reference.kind {
        RefKind::Element => corpus
            .models()
            .iter()
            .flat_map(|doc| {
                doc.descendants()
                    .filter(|&node| {
                        doc.attr(node, "Id") == Some(reference.id.as_ref())
                            && !doc.local_name(node).ends_with(MONIKER_SUFFIX)
                    })
                    .map(move |node| (doc, node))
            })
            .collect(),
        RefKind::Moniker => corpus
            .all()
            .flat_map(|doc| {
                doc.descendants()
                    .filter(|&node| {
                        doc.local_name(node) == reference.expected_type.as_ref()
                            && doc.attr(node, "Id") == Some(reference.id.as_ref())
                    })
                    .map(move |node| (doc, node))
            })
            .collect(),
    }
}
