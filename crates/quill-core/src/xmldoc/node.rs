//! Doc comment content trees

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node of doc comment content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocNode {
    Text(String),
    Element(DocElement),
}

impl DocNode {
    pub fn text(text: impl Into<String>) -> Self {
        DocNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&DocElement> {
        match self {
            DocNode::Element(element) => Some(element),
            DocNode::Text(_) => None,
        }
    }

    /// Plain text of this node and its descendants
    pub fn plain_text(&self) -> String {
        match self {
            DocNode::Text(text) => text.clone(),
            DocNode::Element(element) => element.plain_text(),
        }
    }
}

/// Recognized doc comment tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocElementKind {
    Summary,
    Remarks,
    Param,
    TypeParam,
    Returns,
    Exception,
    Value,
    InheritDoc,
    See,
    SeeAlso,
    Example,
    Code,
    Para,
    ParamRef,
    TypeParamRef,
    Other,
}

impl DocElementKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "summary" => DocElementKind::Summary,
            "remarks" => DocElementKind::Remarks,
            "param" => DocElementKind::Param,
            "typeparam" => DocElementKind::TypeParam,
            "returns" => DocElementKind::Returns,
            "exception" => DocElementKind::Exception,
            "value" => DocElementKind::Value,
            "inheritdoc" => DocElementKind::InheritDoc,
            "see" => DocElementKind::See,
            "seealso" => DocElementKind::SeeAlso,
            "example" => DocElementKind::Example,
            "code" => DocElementKind::Code,
            "para" => DocElementKind::Para,
            "paramref" => DocElementKind::ParamRef,
            "typeparamref" => DocElementKind::TypeParamRef,
            _ => DocElementKind::Other,
        }
    }
}

/// An element of doc comment content such as `<summary>` or `<see cref="..."/>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocNode>,
}

impl DocElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(DocNode::Text(text.into()));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: DocElement) -> Self {
        self.children.push(DocNode::Element(child));
        self
    }

    pub fn kind(&self) -> DocElementKind {
        DocElementKind::from_tag(&self.name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &DocElement> {
        self.children.iter().filter_map(DocNode::as_element)
    }

    /// First direct child element with the given kind
    pub fn find(&self, kind: DocElementKind) -> Option<&DocElement> {
        self.elements().find(|e| e.kind() == kind)
    }

    /// All direct child elements with the given kind
    pub fn find_all(&self, kind: DocElementKind) -> impl Iterator<Item = &DocElement> {
        self.elements().filter(move |e| e.kind() == kind)
    }

    /// The `<inheritdoc>` element, if this content asks to inherit
    pub fn inheritdoc(&self) -> Option<&DocElement> {
        self.find(DocElementKind::InheritDoc)
    }

    /// Whether there is any content besides an `<inheritdoc>` request
    pub fn has_own_content(&self) -> bool {
        self.children.iter().any(|child| match child {
            DocNode::Text(text) => !text.trim().is_empty(),
            DocNode::Element(element) => element.kind() != DocElementKind::InheritDoc,
        })
    }

    /// Concatenated text content; `see` references contribute their target
    pub fn plain_text(&self) -> String {
        if self.children.is_empty() {
            if let Some(target) = self.attribute("cref").or_else(|| self.attribute("langword")) {
                return target.to_string();
            }
        }
        self.children.iter().map(DocNode::plain_text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(DocElement::new("summary").kind(), DocElementKind::Summary);
        assert_eq!(DocElement::new("typeparam").kind(), DocElementKind::TypeParam);
        assert_eq!(DocElement::new("para").kind(), DocElementKind::Para);
        assert_eq!(DocElement::new("list").kind(), DocElementKind::Other);
    }

    #[test]
    fn test_inheritdoc_only_has_no_own_content() {
        let member = DocElement::new("member").with_child(DocElement::new("inheritdoc"));
        assert!(member.inheritdoc().is_some());
        assert!(!member.has_own_content());

        let mixed = member.with_child(DocElement::new("remarks").with_text("extra"));
        assert!(mixed.has_own_content());
    }

    #[test]
    fn test_plain_text_includes_references() {
        let summary = DocElement::new("summary")
            .with_text("Returns ")
            .with_child(DocElement::new("see").with_attribute("langword", "null"))
            .with_text(" when empty.");
        assert_eq!(summary.plain_text(), "Returns null when empty.");
    }
}
