//! Reference extraction.
//!
//! References are classified into a closed set of kinds once, here, at
//! extraction time; resolution never inspects tag strings again. Both
//! shapes require an `Id` attribute — a node without one is not a
//! reference.

use std::sync::Arc;

use crate::document::{Document, Selector};

/// Tag-name suffix marking a node as a moniker reference.
pub const MONIKER_SUFFIX: &str = "Moniker";

/// The two reference shapes the corpus can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefKind {
    /// An `elementDefinition` node under a diagram shape, claiming the
    /// shape represents a model element. Resolves against models only.
    Element,
    /// A typed pointer node (`<ClassMoniker Id="…"/>`) anywhere in any
    /// document. Resolves against the entire corpus.
    Moniker,
}

/// A cross-reference extracted from a document.
#[derive(Clone, Debug)]
pub struct Reference {
    pub kind: RefKind,
    /// Identifier of the definition being referenced.
    pub id: Arc<str>,
    /// Tag name the defining node is expected to have.
    pub expected_type: Arc<str>,
    /// Root tag of the document the reference was found in.
    pub source_doc_type: Arc<str>,
    /// Root `name` attribute of that document, `""` when absent.
    pub source_doc_name: Arc<str>,
}

/// Extracts every element-definition reference from a diagram, in document
/// order.
///
/// The expected type is the tag of the `elementDefinition`'s immediate
/// parent — the shape that owns it. A root-level `elementDefinition` has no
/// owning shape and is skipped.
pub fn extract_element_refs(diagram: &Document) -> Vec<Reference> {
    let doc_type: Arc<str> = Arc::from(diagram.root_type());
    let doc_name: Arc<str> = Arc::from(diagram.root_name());

    let mut refs = Vec::new();
    for node in diagram.query(&Selector::descendant("elementDefinition")) {
        let Some(id) = diagram.attr(node, "Id") else {
            continue;
        };
        let Some(shape) = diagram.parent(node) else {
            continue;
        };
        refs.push(Reference {
            kind: RefKind::Element,
            id: Arc::from(id),
            expected_type: Arc::from(diagram.local_name(shape)),
            source_doc_type: doc_type.clone(),
            source_doc_name: doc_name.clone(),
        });
    }
    refs
}

/// Extracts every moniker reference from a document (model or diagram), in
/// document order.
///
/// Any node whose tag ends in [`MONIKER_SUFFIX`] is a moniker, whatever its
/// namespace; the expected type is the tag with the suffix stripped.
pub fn extract_moniker_refs(doc: &Document) -> Vec<Reference> {
    let doc_type: Arc<str> = Arc::from(doc.root_type());
    let doc_name: Arc<str> = Arc::from(doc.root_name());

    let mut refs = Vec::new();
    for node in doc.descendants() {
        let Some(expected_type) = doc.local_name(node).strip_suffix(MONIKER_SUFFIX) else {
            continue;
        };
        let Some(id) = doc.attr(node, "Id") else {
            continue;
        };
        refs.push(Reference {
            kind: RefKind::Moniker,
            id: Arc::from(id),
            expected_type: Arc::from(expected_type),
            source_doc_type: doc_type.clone(),
            source_doc_name: doc_name.clone(),
        });
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGRAM: &str = r#"
        <classDiagram xmlns="urn:diagram" name="OrderOverview">
          <shapes>
            <ClassShape Id="s1">
              <elementDefinition Id="E1" />
            </ClassShape>
            <InterfaceShape Id="s2">
              <elementDefinition Id="E2" />
            </InterfaceShape>
            <CommentShape Id="s3">
              <elementDefinition />
            </CommentShape>
          </shapes>
        </classDiagram>"#;

    #[test]
    fn test_element_refs_take_expected_type_from_parent_shape() {
        let doc = Document::parse(DIAGRAM, "d.classdiagram").unwrap();
        let refs = extract_element_refs(&doc);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, RefKind::Element);
        assert_eq!(refs[0].id.as_ref(), "E1");
        assert_eq!(refs[0].expected_type.as_ref(), "ClassShape");
        assert_eq!(refs[1].id.as_ref(), "E2");
        assert_eq!(refs[1].expected_type.as_ref(), "InterfaceShape");
        assert_eq!(refs[0].source_doc_type.as_ref(), "classDiagram");
        assert_eq!(refs[0].source_doc_name.as_ref(), "OrderOverview");
    }

    #[test]
    fn test_element_refs_require_id() {
        let doc = Document::parse(DIAGRAM, "d.classdiagram").unwrap();
        // The CommentShape's elementDefinition has no Id and is skipped.
        assert!(
            extract_element_refs(&doc)
                .iter()
                .all(|r| r.expected_type.as_ref() != "CommentShape")
        );
    }

    #[test]
    fn test_element_refs_are_namespace_bound() {
        let doc = Document::parse(
            r#"<classDiagram xmlns="urn:diagram" xmlns:x="urn:other" name="D">
                 <ClassShape><x:elementDefinition Id="E1"/></ClassShape>
               </classDiagram>"#,
            "d.classdiagram",
        )
        .unwrap();
        assert!(extract_element_refs(&doc).is_empty());
    }

    #[test]
    fn test_moniker_refs_strip_suffix_for_expected_type() {
        let doc = Document::parse(
            r#"<modelStoreModel xmlns="urn:uml" name="Core">
                 <Class Id="c1" name="Order">
                   <baseTypes><ClassMoniker Id="c9" /></baseTypes>
                 </Class>
                 <UseCaseMoniker Id="u1" />
                 <InterfaceMoniker />
               </modelStoreModel>"#,
            "m.uml",
        )
        .unwrap();
        let refs = extract_moniker_refs(&doc);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].kind, RefKind::Moniker);
        assert_eq!(refs[0].expected_type.as_ref(), "Class");
        assert_eq!(refs[0].id.as_ref(), "c9");
        assert_eq!(refs[1].expected_type.as_ref(), "UseCase");
    }

    #[test]
    fn test_moniker_refs_span_namespaces() {
        let doc = Document::parse(
            r#"<model xmlns="urn:a" xmlns:b="urn:b" name="M">
                 <b:ClassMoniker Id="c1" />
               </model>"#,
            "m.uml",
        )
        .unwrap();
        assert_eq!(extract_moniker_refs(&doc).len(), 1);
    }

    #[test]
    fn test_bare_moniker_tag_expects_empty_type() {
        let doc = Document::parse(r#"<model name="M"><Moniker Id="x"/></model>"#, "m.uml").unwrap();
        let refs = extract_moniker_refs(&doc);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].expected_type.as_ref(), "");
    }
}
