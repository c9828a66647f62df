//! The loaded document corpus.
//!
//! Documents are partitioned into two roles — models (element definitions)
//! and diagrams (shapes referencing them) — and held in memory, read-only,
//! for the whole run. Element references resolve against models only;
//! moniker references resolve against the entire corpus.

use crate::document::Document;
use crate::error::CheckError;
use crate::manifest::Manifest;

/// All documents of one project, loaded up front.
pub struct Corpus {
    models: Vec<Document>,
    diagrams: Vec<Document>,
}

impl Corpus {
    /// Loads every model and diagram document the manifest declares.
    ///
    /// Any single load failure aborts the whole run; there is no
    /// partial-results mode.
    pub fn load(manifest: &Manifest) -> Result<Corpus, CheckError> {
        let models = manifest
            .model_paths()
            .iter()
            .map(Document::load)
            .collect::<Result<Vec<_>, _>>()?;
        let diagrams = manifest
            .diagram_paths()
            .iter()
            .map(Document::load)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            models = models.len(),
            diagrams = diagrams.len(),
            "corpus loaded"
        );
        Ok(Corpus::new(models, diagrams))
    }

    /// Assembles a corpus from already-parsed documents.
    pub fn new(models: Vec<Document>, diagrams: Vec<Document>) -> Corpus {
        Corpus { models, diagrams }
    }

    /// Model documents, in manifest order.
    pub fn models(&self) -> &[Document] {
        &self.models
    }

    /// Diagram documents, in manifest order.
    pub fn diagrams(&self) -> &[Document] {
        &self.diagrams
    }

    /// Every document: models first, then diagrams.
    pub fn all(&self) -> impl Iterator<Item = &Document> {
        self.models.iter().chain(self.diagrams.iter())
    }
}
