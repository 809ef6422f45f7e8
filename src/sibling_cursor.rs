//! A forward-only cursor over the siblings following a node.
//!
//! The export binds a title to its channel and date only by position, so the
//! extractor walks siblings instead of matching on attributes.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

#[derive(Clone, Copy, Debug)]
pub struct SiblingCursor<'a> {
    next: Option<NodeRef<'a, Node>>,
}

impl<'a> SiblingCursor<'a> {
    /// Starts right after `node`; `node` itself is never yielded.
    pub fn after(node: NodeRef<'a, Node>) -> Self {
        Self {
            next: node.next_sibling(),
        }
    }

    pub fn peek(&self) -> Option<NodeRef<'a, Node>> {
        self.next
    }

    /// Yields the immediately following node, whatever kind it is.
    pub fn next_node(&mut self) -> Option<NodeRef<'a, Node>> {
        let node = self.next?;
        self.next = node.next_sibling();
        Some(node)
    }

    /// Advances past every sibling until an element named `name` is found.
    /// Text and other elements in between are skipped.
    pub fn next_element_named(&mut self, name: &str) -> Option<ElementRef<'a>> {
        while let Some(node) = self.next_node() {
            if let Some(element) = ElementRef::wrap(node) {
                if element.value().name() == name {
                    return Some(element);
                }
            }
        }
        None
    }

    /// Steps over a single `<br>` if it is the next sibling.
    pub fn skip_line_break(&mut self) {
        if self.peek().is_some_and(is_line_break) {
            self.next_node();
        }
    }
}

impl<'a> Iterator for SiblingCursor<'a> {
    type Item = NodeRef<'a, Node>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node()
    }
}

pub fn is_line_break(node: NodeRef<'_, Node>) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.name() == "br")
}
