// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global dismissal: closing open dropdowns when the user interacts elsewhere.

use dropkit_dom::{Document, NodeId};

use crate::context::DropdownContext;
use crate::dropdown::{CLASS_SHOW, container_of, toggle_selector};
use crate::event::{EventKind, InputEvent, Key, MouseButton};

/// Text entry elements (`input`, `textarea`), matched by tag substring.
pub(crate) fn is_text_entry(doc: &Document, node: NodeId) -> bool {
    doc.tag_name(node)
        .is_some_and(|t| t.contains("input") || t.contains("textarea"))
}

impl DropdownContext {
    /// Close every open dropdown, honoring `hide` vetoes.
    ///
    /// With an event, secondary-button clicks and non-Tab keyups are ignored entirely, and a
    /// dropdown stays open when the event targets something inside its container and is
    /// either a click on a text entry or a Tab keyup.
    pub fn clear_menus(&mut self, event: Option<&InputEvent>) {
        if let Some(ev) = event
            && (ev.button == Some(MouseButton::Secondary)
                || (ev.kind == EventKind::KeyUp && !ev.is_key(Key::Tab)))
        {
            return;
        }
        self.prune_detached();

        let root = self.document.root();
        for toggle in self.document.find_all(root, &toggle_selector()) {
            if !self.registry.contains_key(&toggle) {
                continue;
            }
            let container = container_of(&self.document, toggle);
            if !self.document.has_class(container, CLASS_SHOW) {
                continue;
            }
            if let Some(ev) = event
                && ((ev.kind == EventKind::Click && is_text_entry(&self.document, ev.target))
                    || (ev.kind == EventKind::KeyUp && ev.is_key(Key::Tab)))
                && self.document.contains(container, ev.target)
            {
                tracing::trace!(?toggle, "interaction inside open dropdown; kept open");
                continue;
            }
            self.close(toggle, true);
        }
    }
}
