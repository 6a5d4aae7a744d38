//! Host document abstraction.
//!
//! The spawner only needs five DOM operations, captured by the [`Document`]
//! trait. Two implementations exist:
//!
//! - [`VirtualDocument`]: an in-memory element tree used by tests and the CLI
//! - `WebDocument` (feature `wasm`): the browser DOM through `web-sys`

use crate::error::SpawnError;

/// The DOM operations the particle spawner performs on its host.
///
/// # Example
///
/// ```
/// use particlefield::document::{Document, VirtualDocument};
///
/// let mut doc = VirtualDocument::with_container("particles");
/// let container = doc.get_element_by_id("particles").unwrap();
/// let child = doc.create_element("div").unwrap();
/// doc.add_class(&child, "particle").unwrap();
/// doc.append_child(&container, &child).unwrap();
///
/// assert_eq!(doc.children(container).len(), 1);
/// ```
pub trait Document {
    /// Handle to an element owned by this document
    type Element;

    /// Find a connected element by its `id` attribute.
    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> Result<Self::Element, SpawnError>;

    /// Add a class to the element's class list.
    fn add_class(&mut self, element: &Self::Element, class: &str) -> Result<(), SpawnError>;

    /// Set one inline style property.
    fn set_style(
        &mut self,
        element: &Self::Element,
        property: &str,
        value: &str,
    ) -> Result<(), SpawnError>;

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent.
    fn append_child(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), SpawnError>;
}

/// Index of a node inside a [`VirtualDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// An element in a [`VirtualDocument`]
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualNode {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Inline style declarations in insertion order
    pub styles: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl VirtualNode {
    fn new(tag: &str, id: Option<&str>) -> Self {
        Self {
            tag: tag.to_string(),
            id: id.map(str::to_string),
            classes: Vec::new(),
            styles: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.iter().find(|(p, _)| p == property).map(|(_, v)| v.as_str())
    }
}

/// In-memory element tree rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct VirtualDocument {
    nodes: Vec<VirtualNode>,
}

impl Default for VirtualDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualDocument {
    /// Create a document containing only an empty `body`.
    pub fn new() -> Self {
        Self { nodes: vec![VirtualNode::new("body", None)] }
    }

    /// Create a document whose body holds one empty `div` with the given id.
    pub fn with_container(id: &str) -> Self {
        let mut doc = Self::new();
        let body = doc.body();
        doc.insert_element(body, "div", Some(id));
        doc
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Build host markup: create an element and attach it under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn insert_element(&mut self, parent: NodeId, tag: &str, id: Option<&str>) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "parent node {:?} not in document", parent);
        let node = NodeId(self.nodes.len());
        let mut element = VirtualNode::new(tag, id);
        element.parent = Some(parent);
        self.nodes.push(element);
        self.nodes[parent.0].children.push(node);
        node
    }

    pub fn node(&self, id: NodeId) -> Option<&VirtualNode> {
        self.nodes.get(id.0)
    }

    /// Children of `id` in DOM order (empty for unknown nodes).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Total number of elements, attached or not, including `body`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.style(property))
    }

    /// Whether the node is reachable from `body`.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.body() {
                return true;
            }
            match self.node(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Serialize the subtree rooted at `id` as HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        out.push('<');
        out.push_str(&node.tag);
        if let Some(ref element_id) = node.id {
            push_attribute(out, "id", element_id);
        }
        if !node.classes.is_empty() {
            push_attribute(out, "class", &node.classes.join(" "));
        }
        if !node.styles.is_empty() {
            let style = node
                .styles
                .iter()
                .map(|(p, v)| format!("{}: {};", p, v))
                .collect::<Vec<_>>()
                .join(" ");
            push_attribute(out, "style", &style);
        }
        out.push('>');

        if !node.children.is_empty() {
            for child in &node.children {
                out.push('\n');
                self.write_html(*child, out);
            }
            out.push('\n');
        }

        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }

    fn node_mut(&mut self, id: NodeId, operation: &'static str) -> Result<&mut VirtualNode, SpawnError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| SpawnError::dom(operation, format!("unknown node {}", id.0)))
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }
}

impl Document for VirtualDocument {
    type Element = NodeId;

    fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.id.as_deref() == Some(id))
            .map(|(index, _)| NodeId(index))
            .find(|node| self.is_connected(*node))
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, SpawnError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SpawnError::dom("createElement", format!("invalid tag name '{}'", tag)));
        }
        let node = NodeId(self.nodes.len());
        self.nodes.push(VirtualNode::new(tag, None));
        Ok(node)
    }

    fn add_class(&mut self, element: &NodeId, class: &str) -> Result<(), SpawnError> {
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(SpawnError::dom("classList.add", format!("invalid token '{}'", class)));
        }
        let node = self.node_mut(*element, "classList.add")?;
        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) -> Result<(), SpawnError> {
        let node = self.node_mut(*element, "style.setProperty")?;
        match node.styles.iter_mut().find(|(p, _)| p == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => node.styles.push((property.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), SpawnError> {
        self.node_mut(*parent, "appendChild")?;
        self.node_mut(*child, "appendChild")?;
        if self.is_inclusive_ancestor(*child, *parent) {
            return Err(SpawnError::dom(
                "appendChild",
                "the new child is an ancestor of the parent",
            ));
        }

        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|c| c != child);
        }
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
        Ok(())
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_container_is_findable() {
        let doc = VirtualDocument::with_container("particles");
        let container = doc.get_element_by_id("particles").expect("container should exist");
        assert_eq!(doc.node(container).map(|n| n.tag.as_str()), Some("div"));
        assert!(doc.children(container).is_empty());
    }

    #[test]
    fn test_get_element_by_id_missing() {
        let doc = VirtualDocument::new();
        assert_eq!(doc.get_element_by_id("particles"), None);
    }

    #[test]
    fn test_detached_element_not_found_by_id() {
        let mut doc = VirtualDocument::new();
        let body = doc.body();
        let wrapper = doc.insert_element(body, "section", None);
        let inner = doc.insert_element(wrapper, "div", Some("particles"));
        // Detach the wrapper by moving it under a fresh, unattached element
        let limbo = doc.create_element("div").unwrap();
        doc.append_child(&limbo, &wrapper).unwrap();

        assert!(!doc.is_connected(inner));
        assert_eq!(doc.get_element_by_id("particles"), None);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut doc = VirtualDocument::with_container("c");
        let container = doc.get_element_by_id("c").unwrap();
        let a = doc.create_element("div").unwrap();
        let b = doc.create_element("span").unwrap();
        doc.append_child(&container, &a).unwrap();
        doc.append_child(&container, &b).unwrap();
        assert_eq!(doc.children(container), &[a, b]);
        assert_eq!(doc.node(b).and_then(|n| n.parent()), Some(container));
    }

    #[test]
    fn test_append_moves_child() {
        let mut doc = VirtualDocument::new();
        let body = doc.body();
        let first = doc.insert_element(body, "div", Some("first"));
        let second = doc.insert_element(body, "div", Some("second"));
        let child = doc.insert_element(first, "p", None);

        doc.append_child(&second, &child).unwrap();
        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[child]);
    }

    #[test]
    fn test_append_ancestor_rejected() {
        let mut doc = VirtualDocument::new();
        let body = doc.body();
        let outer = doc.insert_element(body, "div", None);
        let inner = doc.insert_element(outer, "div", None);
        let err = doc.append_child(&inner, &outer).unwrap_err();
        assert!(matches!(err, SpawnError::Dom { operation: "appendChild", .. }));
    }

    #[test]
    fn test_invalid_tag_rejected() {
        let mut doc = VirtualDocument::new();
        assert!(doc.create_element("").is_err());
        assert!(doc.create_element("not a tag").is_err());
    }

    #[test]
    fn test_add_class_dedupes() {
        let mut doc = VirtualDocument::new();
        let el = doc.create_element("div").unwrap();
        doc.add_class(&el, "particle").unwrap();
        doc.add_class(&el, "particle").unwrap();
        assert_eq!(doc.node(el).unwrap().classes, vec!["particle".to_string()]);
        assert!(doc.add_class(&el, "two words").is_err());
    }

    #[test]
    fn test_set_style_overwrites() {
        let mut doc = VirtualDocument::new();
        let el = doc.create_element("div").unwrap();
        doc.set_style(&el, "width", "2px").unwrap();
        doc.set_style(&el, "width", "4px").unwrap();
        assert_eq!(doc.style(el, "width"), Some("4px"));
        assert_eq!(doc.node(el).unwrap().styles.len(), 1);
    }

    #[test]
    fn test_to_html() {
        let mut doc = VirtualDocument::with_container("particles");
        let container = doc.get_element_by_id("particles").unwrap();
        let el = doc.create_element("div").unwrap();
        doc.add_class(&el, "particle").unwrap();
        doc.set_style(&el, "left", "10vw").unwrap();
        doc.set_style(&el, "width", "3px").unwrap();
        doc.append_child(&container, &el).unwrap();

        assert_eq!(
            doc.to_html(container),
            "<div id=\"particles\">\n<div class=\"particle\" style=\"left: 10vw; width: 3px;\"></div>\n</div>"
        );
    }

    #[test]
    fn test_to_html_escapes_attributes() {
        let mut doc = VirtualDocument::new();
        let body = doc.body();
        let el = doc.insert_element(body, "div", Some("a\"b<c>&"));
        assert_eq!(doc.to_html(el), "<div id=\"a&quot;b&lt;c&gt;&amp;\"></div>");
    }
}
