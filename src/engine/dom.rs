//! A small arena-backed DOM.
//!
//! Only what the character engine touches is modelled: element/text nodes, class lists, inline
//! style, attributes, parent/child links and a layout rectangle per element. Layout is not
//! computed; callers place elements with [`Document::set_rect`] in page coordinates.

use std::collections::{BTreeMap, HashMap};

use crate::foundation::{
    core::Rect,
    error::{LetterfxError, LetterfxResult},
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Handle of a node inside one [`Document`].
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq)]
/// Payload of a node.
pub enum NodeData {
    /// An element.
    Element(Element),
    /// A text node.
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Element payload.
pub struct Element {
    /// Lower-case tag name.
    pub tag: String,
    /// Class list in insertion order.
    pub classes: Vec<String>,
    /// Attributes other than `class` and `style`.
    pub attrs: BTreeMap<String, String>,
    /// Inline style declarations.
    pub style: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Option<Rect>,
}

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Clone, Debug)]
/// A document with a single `body` root.
pub struct Document {
    nodes: Vec<Node>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document holding only `body`.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };
        doc.body = doc.create_element("body");
        doc
    }

    /// Parse an HTML fragment into the body.
    pub fn from_html(source: &str) -> LetterfxResult<Self> {
        let html = scraper::Html::parse_fragment(source);
        let mut doc = Self::new();
        let root = *html.root_element();

        let mut mapped = HashMap::new();
        mapped.insert(root.id(), doc.body);

        for node in root.descendants().skip(1) {
            let Some(parent) = node.parent().and_then(|p| mapped.get(&p.id()).copied()) else {
                continue;
            };
            let created = match node.value() {
                scraper::Node::Element(e) => {
                    let id = doc.create_element(e.name());
                    for (name, value) in e.attrs() {
                        doc.set_attr(id, name, value)?;
                    }
                    id
                }
                scraper::Node::Text(t) => doc.create_text(&**t),
                _ => continue,
            };
            doc.append_child(parent, created)?;
            mapped.insert(node.id(), created);
        }

        Ok(doc)
    }

    /// The body element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of nodes ever created (detached ones included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
            rect: None,
        });
        id
    }

    fn node(&self, id: NodeId) -> LetterfxResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| LetterfxError::runtime(format!("unknown node {}", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> LetterfxResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| LetterfxError::runtime(format!("unknown node {}", id.0)))
    }

    /// Payload of `id`.
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|n| &n.data)
    }

    /// Element payload of `id`, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id)? {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> LetterfxResult<&mut Element> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(e) => Ok(e),
            NodeData::Text(_) => Err(LetterfxError::runtime(format!(
                "node {} is a text node, not an element",
                id.0
            ))),
        }
    }

    /// Tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Children of `id` in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Append `child` to `parent`, detaching it from any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> LetterfxResult<()> {
        if self.element(parent).is_none() {
            return Err(LetterfxError::runtime(format!(
                "cannot append to node {}: not an element",
                parent.0
            )));
        }
        self.node(child)?;
        let mut cursor = Some(parent);
        while let Some(c) = cursor {
            if c == child {
                return Err(LetterfxError::runtime(
                    "cannot append a node to its own subtree",
                ));
            }
            cursor = self.parent(c);
        }
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove `id` from its parent; the node stays in the arena.
    pub fn detach(&mut self, id: NodeId) -> LetterfxResult<()> {
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Detach every child of `id` (`innerHTML = ''`).
    pub fn remove_children(&mut self, id: NodeId) -> LetterfxResult<()> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in children {
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    /// Replace the content of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> LetterfxResult<()> {
        self.remove_children(id)?;
        let t = self.create_text(text);
        self.append_child(id, t)
    }

    /// Concatenated text of `id`'s subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeData::Text(t)) = self.data(id) {
            out.push_str(t);
        }
        for d in self.descendants(id) {
            if let Some(NodeData::Text(t)) = self.data(d) {
                out.push_str(t);
            }
        }
        out
    }

    /// Descendants of `id` in document (pre-)order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// True when `id` is attached under the body.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            if c == self.body {
                return true;
            }
            cursor = self.parent(c);
        }
        false
    }

    /// Connected elements carrying `class`, in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants_by_class(self.body, class)
    }

    /// Descendant elements of `id` carrying `class`, in document order.
    pub fn descendants_by_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.has_class(*d, class))
            .collect()
    }

    /// Add `class` to an element (no-op when present).
    pub fn add_class(&mut self, id: NodeId, class: &str) -> LetterfxResult<()> {
        let e = self.element_mut(id)?;
        if !e.classes.iter().any(|c| c == class) {
            e.classes.push(class.to_string());
        }
        Ok(())
    }

    /// True when `id` is an element carrying `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Set an inline style declaration.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> LetterfxResult<()> {
        self.element_mut(id)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    /// Inline style declaration of `id`.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?.style.get(property).map(String::as_str)
    }

    /// Set an attribute. `class` and `style` are routed to the class list and inline style.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> LetterfxResult<()> {
        let e = self.element_mut(id)?;
        match name {
            "class" => {
                e.classes = value.split_ascii_whitespace().map(str::to_string).collect();
            }
            "style" => {
                e.style.clear();
                for decl in value.split(';') {
                    if let Some((k, v)) = decl.split_once(':') {
                        let (k, v) = (k.trim(), v.trim());
                        if !k.is_empty() {
                            e.style.insert(k.to_ascii_lowercase(), v.to_string());
                        }
                    }
                }
            }
            _ => {
                e.attrs.insert(name.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    /// Attribute value (not `class`/`style`).
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attrs.get(name).map(String::as_str)
    }

    /// Place an element in page coordinates (at scroll offset 0).
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> LetterfxResult<()> {
        self.node_mut(id)?.rect = Some(rect);
        Ok(())
    }

    /// Page rectangle of `id`; unplaced nodes report an empty rectangle at the origin.
    pub fn rect(&self, id: NodeId) -> Rect {
        self.nodes
            .get(id.0)
            .and_then(|n| n.rect)
            .unwrap_or(Rect::ZERO)
    }

    /// Deep-copy `id`'s subtree into a detached tree and return its root.
    pub fn clone_subtree(&mut self, id: NodeId) -> LetterfxResult<NodeId> {
        let data = self.node(id)?.data.clone();
        let copy = self.push(data);
        let children = self.children(id).to_vec();
        for child in children {
            let c = self.clone_subtree(child)?;
            self.append_child(copy, c)?;
        }
        Ok(copy)
    }

    /// Serialized markup of `id`'s children.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut out);
        }
        out
    }

    /// Serialized markup of `id` itself.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            Some(NodeData::Text(t)) => out.push_str(&escape_text(t)),
            Some(NodeData::Element(e)) => {
                out.push('<');
                out.push_str(&e.tag);
                if !e.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", escape_attr(&e.classes.join(" "))));
                }
                for (k, v) in &e.attrs {
                    out.push_str(&format!(" {k}=\"{}\"", escape_attr(v)));
                }
                if !e.style.is_empty() {
                    let decls: Vec<String> =
                        e.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                    out.push_str(&format!(" style=\"{}\"", escape_attr(&decls.join("; "))));
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag.as_str()) {
                    return;
                }
                for child in self.children(id) {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", e.tag));
            }
            None => {}
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../../tests/unit/engine/dom.rs"]
mod tests;
