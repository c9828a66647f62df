//! Project manifest reading.
//!
//! A model project manifest lists the documents that make up the project as
//! `Include` attributes on `/Project/ItemGroup/*` entries. Items grouped
//! under a `Folder` entry type are organizational only and contribute no
//! files. Item paths are relative to the manifest's own directory; that
//! directory is resolved once at load time and threaded through explicitly.

use std::path::{Path, PathBuf};

use crate::document::{Document, Selector};
use crate::error::CheckError;

const MODEL_SUFFIX: &str = ".uml";
const DIAGRAM_SUFFIX: &str = "diagram";

/// A loaded project manifest: its directory plus the declared item paths.
#[derive(Debug)]
pub struct Manifest {
    dir: PathBuf,
    /// `Include` values of non-`Folder` items, in manifest order.
    items: Vec<String>,
}

impl Manifest {
    /// Loads the manifest at `path`.
    ///
    /// No well-formedness validation beyond the XML parse is performed;
    /// a malformed manifest surfaces as a fatal load error.
    pub fn load(path: impl AsRef<Path>) -> Result<Manifest, CheckError> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| CheckError::io(path, e))?;
        let dir = absolute.parent().map(Path::to_path_buf).unwrap_or_default();

        let doc = Document::load(path)?;
        let mut items = Vec::new();
        for node in doc.query(&Selector::parse("/Project/ItemGroup/*")?) {
            if doc.local_name(node) == "Folder" {
                continue;
            }
            if let Some(include) = doc.attr(node, "Include") {
                items.push(include.to_owned());
            }
        }
        tracing::debug!(
            manifest = %path.display(),
            items = items.len(),
            "manifest loaded"
        );

        Ok(Manifest { dir, items })
    }

    /// The manifest's directory; item paths resolve relative to it.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Declared item paths (non-`Folder`), in manifest order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Absolute paths of the model documents (`.uml` items).
    pub fn model_paths(&self) -> Vec<PathBuf> {
        self.paths_ending_with(MODEL_SUFFIX)
    }

    /// Absolute paths of the diagram documents (`…diagram` items).
    pub fn diagram_paths(&self) -> Vec<PathBuf> {
        self.paths_ending_with(DIAGRAM_SUFFIX)
    }

    /// `suffix` must be lowercase; items match ASCII case-insensitively.
    fn paths_ending_with(&self, suffix: &str) -> Vec<PathBuf> {
        self.items
            .iter()
            .filter(|item| item.to_ascii_lowercase().ends_with(suffix))
            // Manifests authored on Windows use `\` item separators.
            .map(|item| self.dir.join(item.replace('\\', "/")))
            .collect()
    }
}
