use crate::{
    engine::dom::{Document, NodeData, NodeId},
    foundation::error::LetterfxResult,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// One atomic render unit extracted from an element's original content.
pub enum Unit {
    /// A single character.
    Char(char),
    /// An explicit `<br>`.
    LineBreak,
}

impl Unit {
    /// The character, if this unit is one.
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            Self::LineBreak => None,
        }
    }
}

/// Decompose `element`'s content into characters and line breaks.
///
/// The subtree is cloned first so the caller may clear the live element right away. Text nodes
/// that are whitespace-only are skipped; the first kept text node loses its leading
/// whitespace. Markup other than `<br>` is dropped and only its text descendants survive.
pub fn segment(doc: &mut Document, element: NodeId) -> LetterfxResult<Vec<Unit>> {
    let copy = doc.clone_subtree(element)?;
    Ok(segment_detached(doc, copy))
}

/// Walk an already-detached subtree without cloning it.
pub fn segment_detached(doc: &Document, root: NodeId) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut first_text = true;

    for node in doc.descendants(root) {
        match doc.data(node) {
            Some(NodeData::Text(text)) => {
                if text.trim().is_empty() {
                    continue;
                }
                let kept = if first_text {
                    first_text = false;
                    text.trim_start()
                } else {
                    text.as_str()
                };
                units.extend(kept.chars().map(Unit::Char));
            }
            Some(NodeData::Element(e)) if e.tag == "br" => units.push(Unit::LineBreak),
            _ => {}
        }
    }

    units
}

/// Number of character units (line breaks excluded).
pub fn char_count(units: &[Unit]) -> usize {
    units.iter().filter(|u| matches!(u, Unit::Char(_))).count()
}

#[cfg(test)]
#[path = "../../tests/unit/engine/segment.rs"]
mod tests;
