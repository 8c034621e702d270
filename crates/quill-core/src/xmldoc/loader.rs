//! Loading compiler-generated XML doc files

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};
use thiserror::Error;
use tracing::{debug, warn};

use super::node::{DocElement, DocNode};

/// Errors that can occur when loading an XML doc file
#[derive(Error, Debug)]
pub enum DocLoadError {
    #[error("failed to read doc file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid XML: {0}")]
    Xml(String),

    #[error("expected a <doc> root element, found <{0}>")]
    UnexpectedRoot(String),

    #[error("document has no root element")]
    MissingRoot,
}

/// Raw cref text mapped to the `<member>` element documenting it
pub type DocSource = BTreeMap<String, DocElement>;

/// Read and parse an XML doc file
pub fn load_xml_doc_file(path: &Path) -> Result<DocSource, DocLoadError> {
    let xml = fs::read_to_string(path).map_err(|source| DocLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let docs = load_xml_docs(&xml)?;
    debug!(path = %path.display(), members = docs.len(), "loaded xml docs");
    Ok(docs)
}

/// Parse the `<doc><members><member name="...">` structure the compiler emits
///
/// Members without a `name` attribute are skipped. Whitespace in text is
/// collapsed except inside `<code>` blocks.
pub fn load_xml_docs(xml: &str) -> Result<DocSource, DocLoadError> {
    let package =
        sxd_document::parser::parse(xml).map_err(|err| DocLoadError::Xml(format!("{err:?}")))?;
    let document = package.as_document();
    let root = document
        .root()
        .children()
        .into_iter()
        .find_map(|child| match child {
            ChildOfRoot::Element(element) => Some(element),
            _ => None,
        })
        .ok_or(DocLoadError::MissingRoot)?;

    let root_name = root.name().local_part();
    if root_name != "doc" {
        return Err(DocLoadError::UnexpectedRoot(root_name.to_string()));
    }

    let mut docs = DocSource::new();
    for members in child_elements(root).filter(|e| e.name().local_part() == "members") {
        for member in child_elements(members).filter(|e| e.name().local_part() == "member") {
            match member.attribute_value("name") {
                Some(name) if !name.trim().is_empty() => {
                    let mut content = convert_element(member, false);
                    // Indentation between top-level sections carries no meaning
                    content
                        .children
                        .retain(|child| !matches!(child, DocNode::Text(text) if text.trim().is_empty()));
                    docs.insert(name.trim().to_string(), content);
                }
                _ => warn!("skipping <member> without a name attribute"),
            }
        }
    }
    Ok(docs)
}

fn child_elements<'d>(element: Element<'d>) -> impl Iterator<Item = Element<'d>> {
    element.children().into_iter().filter_map(|child| match child {
        ChildOfElement::Element(e) => Some(e),
        _ => None,
    })
}

fn convert_element(element: Element<'_>, preserve: bool) -> DocElement {
    let name = element.name().local_part().to_string();
    let preserve = preserve || name == "code";

    let mut converted = DocElement::new(name);
    for attribute in element.attributes() {
        converted.attributes.insert(
            attribute.name().local_part().to_string(),
            attribute.value().to_string(),
        );
    }

    for child in element.children() {
        match child {
            ChildOfElement::Element(e) => converted
                .children
                .push(DocNode::Element(convert_element(e, preserve))),
            ChildOfElement::Text(text) => {
                let text = if preserve {
                    text.text().to_string()
                } else {
                    collapse_whitespace(text.text())
                };
                // Adjacent text nodes appear around entities; merge them
                if let Some(DocNode::Text(previous)) = converted.children.last_mut() {
                    previous.push_str(&text);
                } else {
                    converted.children.push(DocNode::Text(text));
                }
            }
            _ => {}
        }
    }

    if !preserve {
        trim_edges(&mut converted.children);
    }
    converted
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Trim leading space of the first text node and trailing space of the last, then drop empty text
fn trim_edges(children: &mut Vec<DocNode>) {
    if let Some(DocNode::Text(first)) = children.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(DocNode::Text(last)) = children.last_mut() {
        *last = last.trim_end().to_string();
    }
    children.retain(|child| !matches!(child, DocNode::Text(text) if text.is_empty()));
}
