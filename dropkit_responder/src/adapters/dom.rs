// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Dropkit DOM.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.

use alloc::vec::Vec;

use dropkit_dom::{Document, NodeId};

use crate::router::Router;
use crate::types::{Dispatch, ParentLookup};

/// Parent links read from a borrowed [`Document`].
#[derive(Copy, Clone, Debug)]
pub struct DomParents<'a>(pub &'a Document);

impl ParentLookup<NodeId> for DomParents<'_> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.0.parent_of(*node)
    }
}

/// Build the capture → target → bubble sequence for an element of `doc`.
///
/// Stale targets produce a singleton sequence.
pub fn dispatch_in<M: Clone>(doc: &Document, target: NodeId, meta: Option<M>) -> Vec<Dispatch<NodeId, M>> {
    Router::with_parent(DomParents(doc)).dispatch_for_with(target, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use dropkit_dom::Element;

    #[test]
    fn sequence_follows_document_ancestry() {
        let mut doc = Document::new();
        let group = doc.insert(doc.body(), Element::new("div"));
        let button = doc.insert(group, Element::new("button"));
        let seq = dispatch_in::<()>(&doc, button, None);
        let bubbling: Vec<NodeId> = seq
            .iter()
            .filter(|d| d.is_bubbling())
            .map(|d| d.node)
            .collect();
        assert_eq!(bubbling, [button, group, doc.body(), doc.root()]);
        assert_eq!(seq.first().map(|d| d.phase), Some(Phase::Capture));
    }
}
