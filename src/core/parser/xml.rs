//! XML navigation helpers
//!
//! Small wrappers over `roxmltree` for the `parent/child/leaf` paths the DSP
//! export uses. Paths are `/`-separated element names relative to a node.

use crate::domain::ParseError;
use roxmltree::Node;

/// First child element with the given tag name
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name(name))
}

/// Walk a `/`-separated path of child element names
pub fn descend<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for name in path.split('/') {
        current = child(current, name)?;
    }
    Some(current)
}

/// Text content at a path, empty for a missing or empty element
pub fn optional_text(node: Node, path: &str) -> String {
    descend(node, path)
        .and_then(|n| n.text())
        .unwrap_or_default()
        .to_string()
}

/// Text content at a path, failing when the element is missing or empty
pub fn required_text(node: Node, path: &str) -> Result<String, ParseError> {
    let text = optional_text(node, path);
    if text.is_empty() {
        Err(ParseError(format!(
            "the element with path {path} is empty"
        )))
    } else {
        Ok(text)
    }
}

/// All child elements with the given tag name, in document order
pub fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.has_tag_name(name))
}
