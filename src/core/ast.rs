use super::diagnostic::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used for a parameter string that carries no `key="value"` pairs.
pub const DEFAULT_PARAM: &str = "_default";

/// Parameters attached to an inline element.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub records: Vec<LineRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// One non-blank input line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub tag: String,
    pub tag_class: String,
    #[serde(rename = "num", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(rename = "contentRaw", default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
}

impl LineRecord {
    /// Creates a record whose tag class is the tag itself.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            tag_class: tag.clone(),
            tag,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(InlineElement),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&InlineElement> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<InlineElement> for Node {
    fn from(element: InlineElement) -> Self {
        Node::Element(element)
    }
}

/// A character-level marker pair and everything between its opener and closer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineElement {
    #[serde(rename = "tag")]
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
    #[serde(rename = "content", default)]
    pub children: Vec<Node>,
}

impl InlineElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Merges `params` into the element, overwriting existing keys.
    pub fn merge_params(&mut self, params: Params) {
        self.params.extend(params);
    }
}

/// Unlinks descendants onto a heap stack so a deep tree drops without recursing.
impl Drop for InlineElement {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}
