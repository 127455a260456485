// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatch table: which handler runs for which event on which element.
//!
//! Input handlers are plain values of [`Handler`]; the context interprets them. Lifecycle
//! listeners are caller closures that only see the event.

use std::fmt;

use dropkit_dom::{NodeId, Selector};

use crate::event::{EventKind, LifecycleEvent, LifecycleKind};

/// Built-in input handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Handler {
    /// Keyboard navigation (delegated keydown).
    Keydown,
    /// Global dismissal (document click/keyup).
    ClearMenus,
    /// Page-level click on a toggle: create the instance if needed and toggle it.
    ToggleClick,
    /// Swallow the event so it never reaches document-level dismissal.
    StopPropagation,
    /// Per-instance click listener on its host.
    InstanceClick,
    /// Does nothing; used for the touch `mouseover` accommodation.
    Noop,
}

#[derive(Clone, Debug)]
struct ElementListener {
    node: NodeId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Clone, Debug)]
struct DocumentListener {
    kind: EventKind,
    selector: Option<Selector>,
    handler: Handler,
}

/// Identifier returned by [`DropdownContext::on_lifecycle`](crate::DropdownContext::on_lifecycle).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type LifecycleCallback = Box<dyn FnMut(&mut LifecycleEvent)>;

struct LifecycleListener {
    id: ListenerId,
    node: NodeId,
    kind: LifecycleKind,
    callback: LifecycleCallback,
}

/// Registrations for input handlers and lifecycle listeners.
#[derive(Default)]
pub(crate) struct EventTable {
    element: Vec<ElementListener>,
    document: Vec<DocumentListener>,
    lifecycle: Vec<LifecycleListener>,
    next_id: u64,
}

impl fmt::Debug for EventTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTable")
            .field("element", &self.element.len())
            .field("document", &self.document.len())
            .field("lifecycle", &self.lifecycle.len())
            .finish_non_exhaustive()
    }
}

impl EventTable {
    /// A table holding the page-level data API registrations.
    pub(crate) fn with_data_api() -> Self {
        let toggle = Selector::attr_eq("data-toggle", "dropdown");
        let mut table = Self::default();
        table.delegate(EventKind::KeyDown, toggle.clone(), Handler::Keydown);
        table.delegate(EventKind::KeyDown, Selector::class("dropdown-menu"), Handler::Keydown);
        table.direct(EventKind::Click, Handler::ClearMenus);
        table.direct(EventKind::KeyUp, Handler::ClearMenus);
        table.delegate(EventKind::Click, toggle, Handler::ToggleClick);
        table.delegate(
            EventKind::Click,
            Selector::Descendant {
                ancestor: Box::new(Selector::class("dropdown")),
                subject: Box::new(Selector::tag("form")),
            },
            Handler::StopPropagation,
        );
        table
    }

    pub(crate) fn delegate(&mut self, kind: EventKind, selector: Selector, handler: Handler) {
        self.document.push(DocumentListener {
            kind,
            selector: Some(selector),
            handler,
        });
    }

    pub(crate) fn direct(&mut self, kind: EventKind, handler: Handler) {
        self.document.push(DocumentListener {
            kind,
            selector: None,
            handler,
        });
    }

    pub(crate) fn on(&mut self, node: NodeId, kind: EventKind, handler: Handler) {
        self.element.push(ElementListener {
            node,
            kind,
            handler,
        });
    }

    /// Remove every registration of `handler` for `kind` on `node`.
    pub(crate) fn off(&mut self, node: NodeId, kind: EventKind, handler: Handler) {
        self.element
            .retain(|l| !(l.node == node && l.kind == kind && l.handler == handler));
    }

    /// Drop element-level registrations and lifecycle listeners whose node fails `alive`.
    pub(crate) fn retain_nodes(&mut self, alive: impl Fn(NodeId) -> bool) {
        self.element.retain(|l| alive(l.node));
        self.lifecycle.retain(|l| alive(l.node));
    }

    /// Element-level handlers for `kind` on `node`, in registration order.
    pub(crate) fn element_handlers(&self, node: NodeId, kind: EventKind) -> Vec<Handler> {
        self.element
            .iter()
            .filter(|l| l.node == node && l.kind == kind)
            .map(|l| l.handler)
            .collect()
    }

    /// Delegated document-level handlers for `kind`, with their selectors.
    pub(crate) fn delegated(&self, kind: EventKind) -> Vec<(Selector, Handler)> {
        self.document
            .iter()
            .filter(|l| l.kind == kind)
            .filter_map(|l| l.selector.clone().map(|s| (s, l.handler)))
            .collect()
    }

    /// Direct document-level handlers for `kind`.
    pub(crate) fn direct_handlers(&self, kind: EventKind) -> Vec<Handler> {
        self.document
            .iter()
            .filter(|l| l.kind == kind && l.selector.is_none())
            .map(|l| l.handler)
            .collect()
    }

    /// Number of element-level registrations for `kind` on `node`.
    pub(crate) fn count(&self, node: NodeId, kind: EventKind) -> usize {
        self.element
            .iter()
            .filter(|l| l.node == node && l.kind == kind)
            .count()
    }

    pub(crate) fn add_lifecycle(
        &mut self,
        node: NodeId,
        kind: LifecycleKind,
        callback: LifecycleCallback,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.lifecycle.push(LifecycleListener {
            id,
            node,
            kind,
            callback,
        });
        id
    }

    pub(crate) fn remove_lifecycle(&mut self, id: ListenerId) -> bool {
        let before = self.lifecycle.len();
        self.lifecycle.retain(|l| l.id != id);
        self.lifecycle.len() != before
    }

    /// Deliver `event` along `path` (target first), honoring stop requests.
    pub(crate) fn emit(&mut self, path: &[NodeId], event: &mut LifecycleEvent) {
        let kind = event.kind;
        for &node in path {
            event.current_target = node;
            for listener in self
                .lifecycle
                .iter_mut()
                .filter(|l| l.node == node && l.kind == kind)
            {
                (listener.callback)(event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropkit_dom::{Document, Element};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn data_api_registrations_in_order() {
        let table = EventTable::with_data_api();
        let keydown: Vec<Handler> = table
            .delegated(EventKind::KeyDown)
            .into_iter()
            .map(|(_, h)| h)
            .collect();
        assert_eq!(keydown, [Handler::Keydown, Handler::Keydown]);
        assert_eq!(table.direct_handlers(EventKind::Click), [Handler::ClearMenus]);
        assert_eq!(table.direct_handlers(EventKind::KeyUp), [Handler::ClearMenus]);
        let click: Vec<Handler> = table
            .delegated(EventKind::Click)
            .into_iter()
            .map(|(_, h)| h)
            .collect();
        assert_eq!(click, [Handler::ToggleClick, Handler::StopPropagation]);
    }

    #[test]
    fn off_removes_only_matching_registrations() {
        let mut doc = Document::new();
        let a = doc.insert(doc.body(), Element::new("div"));
        let b = doc.insert(doc.body(), Element::new("div"));
        let mut table = EventTable::default();
        table.on(a, EventKind::MouseOver, Handler::Noop);
        table.on(b, EventKind::MouseOver, Handler::Noop);
        table.on(a, EventKind::Click, Handler::InstanceClick);
        table.off(a, EventKind::MouseOver, Handler::Noop);
        assert_eq!(table.count(a, EventKind::MouseOver), 0);
        assert_eq!(table.count(b, EventKind::MouseOver), 1);
        table.off(b, EventKind::MouseOver, Handler::Noop);
        assert_eq!(table.count(b, EventKind::MouseOver), 0);
        assert_eq!(table.element_handlers(a, EventKind::Click), [Handler::InstanceClick]);
    }

    #[test]
    fn retain_nodes_drops_removed_elements() {
        let mut doc = Document::new();
        let kept = doc.insert(doc.body(), Element::new("div"));
        let gone = doc.insert(doc.body(), Element::new("div"));
        let mut table = EventTable::default();
        table.on(kept, EventKind::Click, Handler::InstanceClick);
        table.on(gone, EventKind::Click, Handler::InstanceClick);
        table.add_lifecycle(gone, LifecycleKind::Show, Box::new(|_| {}));
        doc.remove(gone);

        table.retain_nodes(|n| doc.is_alive(n));
        assert_eq!(table.count(kept, EventKind::Click), 1);
        assert_eq!(table.count(gone, EventKind::Click), 0);
        assert!(table.lifecycle.is_empty());
    }

    #[test]
    fn lifecycle_emit_bubbles_and_stops() {
        let mut doc = Document::new();
        let outer = doc.insert(doc.body(), Element::new("div"));
        let inner = doc.insert(outer, Element::new("div"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut table = EventTable::default();

        let log = Rc::clone(&seen);
        table.add_lifecycle(
            inner,
            LifecycleKind::Show,
            Box::new(move |e| log.borrow_mut().push(("inner", e.current_target))),
        );
        let log = Rc::clone(&seen);
        let stopper = table.add_lifecycle(
            outer,
            LifecycleKind::Show,
            Box::new(move |e| {
                log.borrow_mut().push(("outer", e.current_target));
                e.stop_propagation();
            }),
        );
        let log = Rc::clone(&seen);
        table.add_lifecycle(
            doc.body(),
            LifecycleKind::Show,
            Box::new(move |e| log.borrow_mut().push(("body", e.current_target))),
        );

        let path = [inner, outer, doc.body()];
        let mut ev = LifecycleEvent::new(LifecycleKind::Show, inner, inner);
        table.emit(&path, &mut ev);
        assert_eq!(*seen.borrow(), [("inner", inner), ("outer", outer)]);

        assert!(table.remove_lifecycle(stopper));
        assert!(!table.remove_lifecycle(stopper));
        seen.borrow_mut().clear();
        let mut ev = LifecycleEvent::new(LifecycleKind::Show, inner, inner);
        table.emit(&path, &mut ev);
        assert_eq!(seen.borrow().len(), 2);
    }
}
