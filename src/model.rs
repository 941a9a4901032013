//! # Styled Tree Model
//!
//! Read-only tree of styled nodes produced by the parse backend, plus the
//! request/response wire contract.
//!
//! ## Wire shape
//!
//! ```json
//! {
//!   "type": "element",
//!   "tagName": "div",
//!   "attributes": { "id": "x" },
//!   "styles": { "color": "red" },
//!   "children": [ { "type": "text", "text": "Hello", "styles": {} } ]
//! }
//! ```
//!
//! Nodes are addressed by [`NodePath`]: the child indices walked from the
//! root. All transient UI state (expanded, selected) is keyed by path and
//! kept outside the tree.
//!
//! Documents may nest arbitrarily deep. Decoding, traversal and drop all use
//! explicit stacks; the derived `Clone`, `PartialEq` and `Debug` do not, and
//! are meant for shallow trees.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Computed styles: property name → value. Source order is meaningless.
pub type StyleMap = HashMap<String, String>;

/// Element attributes in document order.
pub type AttributeMap = IndexMap<String, String>;

// ============================================================================
// STYLED NODE
// ============================================================================

/// One node of the styled tree: an element or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyledNode {
    Element {
        tag_name: String,
        attributes: AttributeMap,
        styles: StyleMap,
        children: Vec<StyledNode>,
    },
    Text {
        text: String,
        styles: StyleMap,
    },
}

impl Drop for StyledNode {
    fn drop(&mut self) {
        let Self::Element { children, .. } = self else {
            return;
        };
        // Flatten so every node drops with no children left
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Self::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

impl StyledNode {
    /// Element with no attributes, styles or children
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::Element {
            tag_name: tag_name.into(),
            attributes: AttributeMap::new(),
            styles: StyleMap::new(),
            children: Vec::new(),
        }
    }

    /// Text node with no styles
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            styles: StyleMap::new(),
        }
    }

    /// Append an attribute (element only; ignored on text)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Set a computed style
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Element { styles, .. } | Self::Text { styles, .. } => {
                styles.insert(property.into(), value.into());
            }
        }
        self
    }

    /// Append a child (element only; text nodes never have children)
    pub fn with_child(mut self, child: StyledNode) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn styles(&self) -> &StyleMap {
        match self {
            Self::Element { styles, .. } | Self::Text { styles, .. } => styles,
        }
    }

    /// Children in document order. Always empty for text.
    pub fn children(&self) -> &[StyledNode] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text { .. } => &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Element { tag_name, .. } => Some(tag_name),
            Self::Text { .. } => None,
        }
    }

    /// Resolve a path relative to this node
    pub fn node_at(&self, path: &NodePath) -> Option<&StyledNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    /// Pre-order walk in document order
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, NodePath::root())],
        }
    }

    /// Total nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Decode a wire node (see the module docs) without recursing.
    ///
    /// Missing or `null` `attributes`, `styles` and `children` are empty.
    /// Fields that do not belong to the node's `type` are ignored.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let (root, children) = shallow_node(value)?;
        let mut stack = vec![(root, children.into_iter())];
        loop {
            let Some((_, pending)) = stack.last_mut() else {
                return Err(serde_json::Error::custom("empty decode stack"));
            };
            if let Some(child) = pending.next() {
                let (node, children) = shallow_node(child)?;
                stack.push((node, children.into_iter()));
                continue;
            }
            let Some((done, _)) = stack.pop() else {
                return Err(serde_json::Error::custom("empty decode stack"));
            };
            match stack.last_mut() {
                Some((StyledNode::Element { children, .. }, _)) => children.push(done),
                Some((StyledNode::Text { .. }, _)) => {
                    return Err(serde_json::Error::custom("text nodes cannot have children"))
                }
                None => return Ok(done),
            }
        }
    }
}

impl<'de> Deserialize<'de> for StyledNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

/// One node with its children still undecoded
fn shallow_node(value: Value) -> Result<(StyledNode, Vec<Value>), serde_json::Error> {
    let Value::Object(mut fields) = value else {
        return Err(serde_json::Error::custom("expected a node object"));
    };
    let styles: StyleMap = optional(&mut fields, "styles")?;

    match required_str(&mut fields, "type")?.as_str() {
        "element" => {
            let node = StyledNode::Element {
                tag_name: required_str(&mut fields, "tagName")?,
                attributes: optional(&mut fields, "attributes")?,
                styles,
                children: Vec::new(),
            };
            // Taking the array keeps dropping `fields` shallow
            let children: Vec<Value> = match fields.remove("children") {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items,
                Some(_) => return Err(serde_json::Error::custom("`children` must be an array")),
            };
            Ok((node, children))
        }
        "text" => {
            let node = StyledNode::Text {
                text: required_str(&mut fields, "text")?,
                styles,
            };
            Ok((node, Vec::new()))
        }
        other => Err(serde_json::Error::custom(format!(
            "unknown variant `{}`, expected `element` or `text`",
            other
        ))),
    }
}

fn required_str(fields: &mut Map<String, Value>, key: &str) -> Result<String, serde_json::Error> {
    match fields.remove(key) {
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(serde_json::Error::custom(format!("`{}` must be a string", key))),
        None => Err(serde_json::Error::custom(format!("missing field `{}`", key))),
    }
}

/// Flat map field; absent or `null` decodes as empty
fn optional<T>(fields: &mut Map<String, Value>, key: &str) -> Result<T, serde_json::Error>
where
    T: Default + for<'de> Deserialize<'de>,
{
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value),
    }
}

// ============================================================================
// NODE PATH
// ============================================================================

/// Structural address of a node: child indices from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of this node's `index`-th child
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of ancestors (0 for the root)
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// True when `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

// ============================================================================
// TRAVERSAL
// ============================================================================

/// Iterative pre-order traversal. Depth is bounded only by the heap.
pub struct Walk<'a> {
    stack: Vec<(&'a StyledNode, NodePath)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (NodePath, &'a StyledNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, path) = self.stack.pop()?;
        for (index, child) in node.children().iter().enumerate().rev() {
            self.stack.push((child, path.child(index)));
        }
        Some((path, node))
    }
}

// ============================================================================
// SNAPSHOT + WIRE CONTRACT
// ============================================================================

/// Raw HTML paired with its styled tree, from one successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub html: String,
    pub root: StyledNode,
}

impl Snapshot {
    pub fn new(html: impl Into<String>, root: StyledNode) -> Self {
        Self {
            html: html.into(),
            root,
        }
    }

    pub fn node_at(&self, path: &NodePath) -> Option<&StyledNode> {
        self.root.node_at(path)
    }
}

/// `POST /parse` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    pub file_path: String,
}

/// `POST /parse` success body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResponse {
    pub html_content: String,
    pub styled_tree: StyledNode,
}

impl ParseResponse {
    /// Decode a response body of any nesting depth.
    ///
    /// The recursion limit is lifted and the stack grows on the heap as
    /// needed, so deep documents load instead of failing.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let mut json = serde_json::Deserializer::from_str(body);
        json.disable_recursion_limit();
        let response = Self::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(response)
    }
}

impl From<ParseResponse> for Snapshot {
    fn from(response: ParseResponse) -> Self {
        Self::new(response.html_content, response.styled_tree)
    }
}

/// Failure body the backend sends with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
