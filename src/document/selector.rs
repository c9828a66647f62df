//! Path-like node selectors.
//!
//! Two query forms cover everything the checker needs:
//!
//! - `/a/b/*` — a root-anchored child path; each named step descends one
//!   level, `*` matches any child.
//! - `//name` (or `//*`) — every element at any depth.
//!
//! Named steps are bound to the queried document's own namespace context:
//! they match only elements whose namespace URI equals the document root's.
//! `*` matches elements in any namespace.

use std::fmt;

use super::{Document, NodeId};
use crate::error::CheckError;

/// A parsed selector, evaluated via [`Document::query`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    axis: Axis,
    steps: Vec<Step>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Root-anchored child path (`/a/b`).
    Child,
    /// Any-depth descendant query (`//a`), single step.
    Descendant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Step {
    Named(String),
    Any,
}

impl Step {
    fn parse(text: &str) -> Step {
        if text == "*" {
            Step::Any
        } else {
            Step::Named(text.to_owned())
        }
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        match self {
            Step::Any => true,
            Step::Named(name) => {
                doc.local_name(node) == name && doc.node_namespace(node) == doc.namespace()
            }
        }
    }
}

impl Selector {
    /// Parses a selector string.
    pub fn parse(text: &str) -> Result<Selector, CheckError> {
        if let Some(rest) = text.strip_prefix("//") {
            if rest.is_empty() || rest.contains('/') {
                return Err(CheckError::selector(format!(
                    "descendant form takes exactly one step: {text:?}"
                )));
            }
            return Ok(Selector {
                axis: Axis::Descendant,
                steps: vec![Step::parse(rest)],
            });
        }
        let Some(rest) = text.strip_prefix('/') else {
            return Err(CheckError::selector(format!(
                "selector must start with '/' or '//': {text:?}"
            )));
        };
        let steps: Vec<Step> = rest
            .split('/')
            .map(|segment| {
                if segment.is_empty() {
                    Err(CheckError::selector(format!("empty step in {text:?}")))
                } else {
                    Ok(Step::parse(segment))
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(Selector {
            axis: Axis::Child,
            steps,
        })
    }

    /// A `//name` selector, namespace-bound to the queried document.
    pub fn descendant(name: impl Into<String>) -> Selector {
        Selector {
            axis: Axis::Descendant,
            steps: vec![Step::Named(name.into())],
        }
    }

    pub(crate) fn evaluate(&self, doc: &Document) -> Vec<NodeId> {
        match self.axis {
            Axis::Descendant => doc
                .descendants()
                .filter(|&node| self.steps[0].matches(doc, node))
                .collect(),
            Axis::Child => {
                let mut current: Vec<NodeId> = vec![doc.root()];
                for (depth, step) in self.steps.iter().enumerate() {
                    if depth == 0 {
                        current.retain(|&node| step.matches(doc, node));
                    } else {
                        current = current
                            .iter()
                            .flat_map(|&node| doc.children(node).iter().copied())
                            .filter(|&node| step.matches(doc, node))
                            .collect();
                    }
                }
                // Node ids are document order; child traversal can interleave
                // siblings from different parents, so restore order here.
                current.sort_unstable_by_key(|node| node.index());
                current
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            Axis::Descendant => write!(f, "/")?,
            Axis::Child => {}
        }
        for step in &self.steps {
            match step {
                Step::Named(name) => write!(f, "/{name}")?,
                Step::Any => write!(f, "/*")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <Project xmlns="urn:proj">
          <PropertyGroup />
          <ItemGroup>
            <None Include="a.uml" />
            <Folder Include="Sub" />
          </ItemGroup>
          <ItemGroup>
            <None Include="b.diagram" />
          </ItemGroup>
        </Project>"#;

    #[test]
    fn test_child_path_with_wildcard() {
        let doc = Document::parse(DOC, "p.modelproj").unwrap();
        let items = doc.query(&Selector::parse("/Project/ItemGroup/*").unwrap());

        let names: Vec<_> = items.iter().map(|&n| doc.local_name(n)).collect();
        assert_eq!(names, vec!["None", "Folder", "None"]);
    }

    #[test]
    fn test_named_steps_are_namespace_bound() {
        // Root in urn:proj, but ItemGroup in a different namespace: the
        // named step must not match it.
        let doc = Document::parse(
            r#"<Project xmlns="urn:proj" xmlns:o="urn:other">
                 <o:ItemGroup><None Include="a.uml"/></o:ItemGroup>
               </Project>"#,
            "p.modelproj",
        )
        .unwrap();

        assert!(doc.query(&Selector::parse("/Project/ItemGroup/*").unwrap()).is_empty());
    }

    #[test]
    fn test_descendant_by_name() {
        let doc = Document::parse(DOC, "p.modelproj").unwrap();
        let folders = doc.query(&Selector::descendant("Folder"));
        assert_eq!(folders.len(), 1);
        assert_eq!(doc.attr(folders[0], "Include"), Some("Sub"));
    }

    #[test]
    fn test_descendant_wildcard_spans_namespaces() {
        let doc = Document::parse(
            r#"<r xmlns="urn:a" xmlns:b="urn:b"><x/><b:y/></r>"#,
            "d.uml",
        )
        .unwrap();
        assert_eq!(doc.query(&Selector::parse("//*").unwrap()).len(), 3);
    }

    #[test]
    fn test_rejects_malformed_selectors() {
        for bad in ["", "Project", "//a/b", "//", "/a//b"] {
            assert!(
                Selector::parse(bad).is_err(),
                "selector {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["/Project/ItemGroup/*", "//elementDefinition", "//*"] {
            assert_eq!(Selector::parse(text).unwrap().to_string(), text);
        }
    }
}
