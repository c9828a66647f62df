//! XML document store.
//!
//! Loads a structured XML document into an immutable in-memory tree and
//! answers queries against it. Documents are parsed once, held for the whole
//! run, and never mutated.
//!
//! Querying is namespace-aware: each document carries its own namespace
//! context (the root element's namespace URI), and named selector steps
//! match only within that namespace. See [`Selector`] for the query forms.

mod selector;

pub use selector::Selector;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use crate::error::CheckError;

/// Index of a node within its owning [`Document`].
///
/// Node ids are only meaningful together with the document that produced
/// them. Ids are assigned in document order (start-tag encounter order),
/// with the root at index 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One element node in a document tree.
#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) local_name: Arc<str>,
    pub(crate) namespace: Option<Arc<str>>,
    /// Attributes in document order, keyed by prefix-stripped name.
    pub(crate) attributes: IndexMap<Arc<str>, Arc<str>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A parsed, read-only XML document.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    pub(crate) nodes: Vec<NodeData>,
    /// The root element's namespace URI — the document's namespace context.
    namespace: Option<Arc<str>>,
}

impl Document {
    /// Loads and parses the file at `path`.
    ///
    /// Any IO or XML error is fatal; there is no partial or recovered parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Document, CheckError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CheckError::io(path, e))?;
        Self::parse(&text, path)
    }

    /// Parses a document from in-memory text. `path` identifies the source
    /// in error messages only.
    pub fn parse(text: &str, path: impl Into<PathBuf>) -> Result<Document, CheckError> {
        let path = path.into();
        let mut reader = NsReader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut builder = TreeBuilder::default();

        loop {
            match reader.read_resolved_event() {
                Ok((ns, event)) => match event {
                    Event::Start(e) => {
                        let id = builder.open_element(&e, ns, &path)?;
                        builder.stack.push(id);
                    }
                    Event::Empty(e) => {
                        // Self-closing element: opened and closed in one event.
                        builder.open_element(&e, ns, &path)?;
                    }
                    Event::End(_) => {
                        builder.stack.pop();
                    }
                    Event::Eof => break,
                    _ => {}
                },
                Err(e) => {
                    return Err(CheckError::xml(format!(
                        "{}: parse error at position {}: {e}",
                        path.display(),
                        reader.error_position()
                    )));
                }
            }
        }

        if builder.nodes.is_empty() {
            return Err(CheckError::missing_element(format!(
                "document root in {}",
                path.display()
            )));
        }

        let namespace = builder.nodes[0].namespace.clone();
        Ok(Document {
            path,
            nodes: builder.nodes,
            namespace,
        })
    }

    /// The path this document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document's namespace context (root element namespace URI).
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Tag name of the root element.
    pub fn root_type(&self) -> &str {
        self.local_name(self.root())
    }

    /// The root element's `name` attribute, or `""` when absent.
    pub fn root_name(&self) -> &str {
        self.attr(self.root(), "name").unwrap_or("")
    }

    /// Tag name of `node`, without namespace prefix.
    pub fn local_name(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].local_name
    }

    /// Namespace URI of `node`, if it is in a namespace.
    pub fn node_namespace(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.index()].namespace.as_deref()
    }

    /// Attribute value of `node` by prefix-stripped attribute name.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.index()].attributes.get(name).map(Arc::as_ref)
    }

    /// Parent of `node`; `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    /// Child nodes of `node`, in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    /// All element nodes (root included) in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Evaluates a selector against this document.
    ///
    /// Results are in document order; querying never mutates the tree and
    /// repeated queries see identical results.
    pub fn query(&self, selector: &Selector) -> Vec<NodeId> {
        selector.evaluate(self)
    }
}

/// Incremental tree construction state for the event loop.
#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<NodeData>,
    /// Open elements; the top is the parent of the next node.
    stack: Vec<NodeId>,
    /// Namespace URIs seen so far, shared between nodes.
    namespaces: Vec<Arc<str>>,
}

impl TreeBuilder {
    fn open_element(
        &mut self,
        e: &BytesStart<'_>,
        ns: ResolveResult<'_>,
        path: &Path,
    ) -> Result<NodeId, CheckError> {
        let local_name = std::str::from_utf8(e.local_name().into_inner())
            .map_err(|e| CheckError::xml(format!("{}: invalid tag name: {e}", path.display())))?
            .to_owned();

        let namespace = match ns {
            ResolveResult::Bound(uri) => {
                let uri = std::str::from_utf8(uri.into_inner()).map_err(|e| {
                    CheckError::xml(format!("{}: invalid namespace URI: {e}", path.display()))
                })?;
                Some(self.intern_namespace(uri))
            }
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(CheckError::xml(format!(
                    "{}: undeclared namespace prefix {:?} on <{}>",
                    path.display(),
                    String::from_utf8_lossy(&prefix),
                    local_name
                )));
            }
        };

        let mut attributes = IndexMap::new();
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|e| CheckError::xml(format!("{}: attribute error: {e}", path.display())))?;
            let raw_key = attr.key.as_ref();
            if raw_key == b"xmlns" || raw_key.starts_with(b"xmlns:") {
                continue;
            }
            let key = std::str::from_utf8(attr.key.local_name().into_inner()).map_err(|e| {
                CheckError::xml(format!("{}: invalid attribute name: {e}", path.display()))
            })?;
            let value = attr.unescape_value().map_err(|e| {
                CheckError::xml(format!("{}: invalid attribute value: {e}", path.display()))
            })?;
            attributes.insert(Arc::from(key), Arc::from(value.as_ref()));
        }

        let parent = self.stack.last().copied();
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            local_name: Arc::from(local_name.as_str()),
            namespace,
            attributes,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        Ok(id)
    }

    fn intern_namespace(&mut self, uri: &str) -> Arc<str> {
        if let Some(known) = self.namespaces.iter().find(|ns| ns.as_ref() == uri) {
            return known.clone();
        }
        let ns: Arc<str> = Arc::from(uri);
        self.namespaces.push(ns.clone());
        ns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <modelStoreModel xmlns="http://schemas.example.com/uml" name="CoreModel">
          <packagedElements>
            <Class Id="c1" name="Order">
              <ClassMoniker Id="c2" />
            </Class>
          </packagedElements>
        </modelStoreModel>"#;

    #[test]
    fn test_parse_builds_tree_in_document_order() {
        let doc = Document::parse(MODEL, "model.uml").unwrap();

        let names: Vec<_> = doc.descendants().map(|n| doc.local_name(n)).collect();
        assert_eq!(
            names,
            vec!["modelStoreModel", "packagedElements", "Class", "ClassMoniker"]
        );
    }

    #[test]
    fn test_root_accessors() {
        let doc = Document::parse(MODEL, "model.uml").unwrap();

        assert_eq!(doc.root_type(), "modelStoreModel");
        assert_eq!(doc.root_name(), "CoreModel");
        assert_eq!(doc.namespace(), Some("http://schemas.example.com/uml"));
    }

    #[test]
    fn test_root_name_defaults_to_empty() {
        let doc = Document::parse("<root/>", "bare.uml").unwrap();
        assert_eq!(doc.root_name(), "");
        assert_eq!(doc.namespace(), None);
    }

    #[test]
    fn test_parent_and_children() {
        let doc = Document::parse(MODEL, "model.uml").unwrap();

        let class = doc
            .descendants()
            .find(|&n| doc.local_name(n) == "Class")
            .unwrap();
        let moniker = doc.children(class)[0];
        assert_eq!(doc.local_name(moniker), "ClassMoniker");
        assert_eq!(doc.parent(moniker), Some(class));
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn test_attributes_strip_prefixes_and_unescape() {
        let doc = Document::parse(
            r#"<r xmlns:x="urn:x" x:Id="a&amp;b" name="n"/>"#,
            "attr.uml",
        )
        .unwrap();

        assert_eq!(doc.attr(doc.root(), "Id"), Some("a&b"));
        assert_eq!(doc.attr(doc.root(), "name"), Some("n"));
        assert_eq!(doc.attr(doc.root(), "missing"), None);
    }

    #[test]
    fn test_malformed_xml_is_fatal() {
        let err = Document::parse("<a><b></a>", "broken.uml").unwrap_err();
        assert!(matches!(err, CheckError::Xml(_)), "got: {err:?}");
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let err = Document::parse("", "empty.uml").unwrap_err();
        assert!(matches!(err, CheckError::Missing { .. }), "got: {err:?}");
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = Document::load("/nonexistent/model.uml").unwrap_err();
        assert!(matches!(err, CheckError::Io { .. }), "got: {err:?}");
    }
}
