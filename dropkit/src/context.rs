// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page-level context: document, registry, dispatch table, and positioning engine.

use dropkit_dom::{Document, NodeId};
use dropkit_responder::adapters::dom::dispatch_in;
use dropkit_responder::dispatcher;
use dropkit_responder::types::Outcome;
use hashbrown::HashMap;

use crate::dropdown::{CLASS_SHOW, Dropdown};
use crate::error::{Error, Result};
use crate::event::{EventKind, InputEvent, Key, LifecycleEvent, LifecycleKind};
use crate::listeners::{EventTable, Handler, ListenerId};
use crate::positioning::{GeometryEngine, PositioningEngine};

/// Builder for [`DropdownContext`].
///
/// A positioning engine is required; [`ContextBuilder::build`] fails without one.
#[derive(Debug)]
pub struct ContextBuilder {
    document: Document,
    engine: Option<Box<dyn PositioningEngine>>,
    touch: bool,
}

impl ContextBuilder {
    /// Use `engine` to place menus.
    #[must_use]
    pub fn engine(mut self, engine: impl PositioningEngine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    /// Whether the environment has touch input.
    #[must_use]
    pub fn touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    /// Build the context and install the page-level handlers.
    pub fn build(self) -> Result<DropdownContext> {
        let engine = self.engine.ok_or(Error::MissingPositioningEngine)?;
        tracing::debug!(touch = self.touch, "dropdown context initialized");
        Ok(DropdownContext {
            document: self.document,
            registry: HashMap::new(),
            table: EventTable::with_data_api(),
            engine,
            touch: self.touch,
        })
    }
}

/// Owns a document and every dropdown on it.
///
/// Instances and listeners belonging to elements removed from the document are dropped on
/// the next [`dispatch`](DropdownContext::dispatch) or
/// [`clear_menus`](DropdownContext::clear_menus).
///
/// All interaction goes through the context: input events via [`DropdownContext::dispatch`]
/// (or the [`click`](DropdownContext::click) / [`key_down`](DropdownContext::key_down) /
/// [`key_up`](DropdownContext::key_up) shorthands) and programmatic operations such as
/// [`DropdownContext::toggle`].
///
/// ```
/// use dropkit::DropdownContext;
/// use dropkit_dom::{Document, Element};
///
/// let mut doc = Document::new();
/// let group = doc.insert(doc.body(), Element::new("div").with_class("dropdown"));
/// let toggle = doc.insert(group, Element::new("button").with_attr("data-toggle", "dropdown"));
/// doc.insert(group, Element::new("div").with_class("dropdown-menu"));
/// let outside = doc.insert(doc.body(), Element::new("p"));
///
/// let mut cx = DropdownContext::new(doc);
/// cx.click(toggle)?;
/// assert!(cx.is_open(toggle));
/// cx.click(outside)?;
/// assert!(!cx.is_open(toggle));
/// # Ok::<(), dropkit::Error>(())
/// ```
#[derive(Debug)]
pub struct DropdownContext {
    pub(crate) document: Document,
    pub(crate) registry: HashMap<NodeId, Dropdown>,
    pub(crate) table: EventTable,
    pub(crate) engine: Box<dyn PositioningEngine>,
    pub(crate) touch: bool,
}

struct DispatchState<'a> {
    event: &'a mut InputEvent,
    error: Option<Error>,
}

impl DropdownContext {
    /// Start building a context over `document`.
    pub fn builder(document: Document) -> ContextBuilder {
        ContextBuilder {
            document,
            engine: None,
            touch: false,
        }
    }

    /// A context with the default [`GeometryEngine`] and no touch input.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            registry: HashMap::new(),
            table: EventTable::with_data_api(),
            engine: Box::new(GeometryEngine),
            touch: false,
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The document, mutably. Hosts use this to update bounds and structure.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The instance attached to `element`, if one was created.
    pub fn instance(&self, element: NodeId) -> Option<&Dropdown> {
        self.registry.get(&element)
    }

    /// Whether the dropdown of `element` is shown.
    pub fn is_open(&self, element: NodeId) -> bool {
        self.registry
            .get(&element)
            .and_then(Dropdown::menu)
            .is_some_and(|m| self.document.has_class(m, CLASS_SHOW))
    }

    /// Number of element-level input listeners of `kind` on `node`.
    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.table.count(node, kind)
    }

    /// Listen for a lifecycle event on `node` (it also sees events bubbling from descendants).
    pub fn on_lifecycle(
        &mut self,
        node: NodeId,
        kind: LifecycleKind,
        listener: impl FnMut(&mut LifecycleEvent) + 'static,
    ) -> ListenerId {
        self.table.add_lifecycle(node, kind, Box::new(listener))
    }

    /// Remove a lifecycle listener. Returns false when `id` is unknown.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.table.remove_lifecycle(id)
    }

    /// Dispose every instance.
    pub fn shutdown(&mut self) {
        let elements: Vec<NodeId> = self.registry.keys().copied().collect();
        for element in elements {
            self.dispose(element);
        }
        tracing::debug!("dropdown context shut down");
    }

    /// Click `target` with the primary button. Returns the event after dispatch.
    pub fn click(&mut self, target: NodeId) -> Result<InputEvent> {
        let mut event = InputEvent::click(target);
        self.dispatch(&mut event)?;
        Ok(event)
    }

    /// Press `key` on `target`.
    pub fn key_down(&mut self, target: NodeId, key: Key) -> Result<InputEvent> {
        let mut event = InputEvent::key_down(target, key);
        self.dispatch(&mut event)?;
        Ok(event)
    }

    /// Release `key` on `target`.
    pub fn key_up(&mut self, target: NodeId, key: Key) -> Result<InputEvent> {
        let mut event = InputEvent::key_up(target, key);
        self.dispatch(&mut event)?;
        Ok(event)
    }

    /// Route an input event.
    ///
    /// Element-level handlers run on the target and then on each ancestor. When the event
    /// reaches the document, delegated handlers run for each element on the path (deepest
    /// first) that matches their selector, followed by direct document handlers. A handler
    /// that stops propagation ends the walk; a handler error aborts it and is returned.
    pub fn dispatch(&mut self, event: &mut InputEvent) -> Result<()> {
        self.prune_detached();
        if !self.document.is_alive(event.target) {
            tracing::warn!(target = ?event.target, "dispatch to stale element ignored");
            return Ok(());
        }
        let kind = event.kind;
        let seq = dispatch_in::<()>(&self.document, event.target, None);
        let path: Vec<NodeId> = seq
            .iter()
            .filter(|d| d.is_bubbling())
            .map(|d| d.node)
            .collect();

        let mut state = DispatchState { event, error: None };
        let stopped = dispatcher::run(&seq, &mut state, |d, state| {
            if !d.is_bubbling() {
                return Outcome::Continue;
            }
            for handler in self.table.element_handlers(d.node, kind) {
                if let Err(err) = self.run_handler(handler, d.node, state.event) {
                    state.error = Some(err);
                    return Outcome::Stop;
                }
                if state.event.is_propagation_stopped() {
                    return Outcome::Stop;
                }
            }
            Outcome::Continue
        })
        .is_some();
        let DispatchState { event, error } = state;
        if let Some(err) = error {
            return Err(err);
        }
        if stopped {
            return Ok(());
        }

        let delegated = self.table.delegated(kind);
        for &node in &path {
            for (selector, handler) in &delegated {
                if !self.document.matches(node, selector) {
                    continue;
                }
                self.run_handler(*handler, node, event)?;
                if event.is_propagation_stopped() {
                    return Ok(());
                }
            }
        }

        let root = self.document.root();
        for handler in self.table.direct_handlers(kind) {
            self.run_handler(handler, root, event)?;
            if event.is_propagation_stopped() {
                break;
            }
        }
        Ok(())
    }

    fn run_handler(
        &mut self,
        handler: Handler,
        current: NodeId,
        event: &mut InputEvent,
    ) -> Result<()> {
        match handler {
            Handler::Keydown => self.handle_keydown(current, event),
            Handler::ClearMenus => {
                self.clear_menus(Some(event));
                Ok(())
            }
            Handler::ToggleClick => {
                event.prevent_default();
                event.stop_propagation();
                self.invoke(current, "toggle")
            }
            Handler::StopPropagation => {
                event.stop_propagation();
                Ok(())
            }
            Handler::InstanceClick => {
                event.prevent_default();
                event.stop_propagation();
                self.toggle(current)
            }
            Handler::Noop => Ok(()),
        }
    }

    /// Fire a lifecycle event on `container`, bubbling to the root.
    pub(crate) fn emit_lifecycle(
        &mut self,
        kind: LifecycleKind,
        container: NodeId,
        related: NodeId,
    ) -> LifecycleEvent {
        let mut event = LifecycleEvent::new(kind, container, related);
        let path: Vec<NodeId> = core::iter::once(container)
            .chain(self.document.ancestors(container))
            .collect();
        self.table.emit(&path, &mut event);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use crate::testing::{Fixture, RecordingEngine};

    #[test]
    fn build_requires_an_engine() {
        let err = DropdownContext::builder(Document::new()).build().unwrap_err();
        assert_eq!(err, Error::MissingPositioningEngine);
        let cx = DropdownContext::builder(Document::new())
            .engine(RecordingEngine::default())
            .touch(true)
            .build()
            .unwrap();
        assert!(cx.touch);
    }

    #[test]
    fn click_on_toggle_opens_and_prevents_default() {
        let mut f = Fixture::new();
        let ev = f.cx.click(f.first).unwrap();
        assert!(ev.is_default_prevented());
        assert!(ev.is_propagation_stopped());
        assert!(f.cx.is_open(f.first));

        // Second click goes through the instance's own listener.
        assert_eq!(f.cx.listener_count(f.first, EventKind::Click), 1);
        f.cx.click(f.first).unwrap();
        assert!(!f.cx.is_open(f.first));
    }

    #[test]
    fn outside_click_closes() {
        let mut f = Fixture::new();
        f.cx.click(f.first).unwrap();
        f.cx.click(f.outside).unwrap();
        assert!(!f.cx.is_open(f.first));
    }

    #[test]
    fn right_click_never_dismisses() {
        let mut f = Fixture::new();
        f.cx.click(f.first).unwrap();
        let mut ev = InputEvent::click_with(f.outside, MouseButton::Secondary);
        f.cx.dispatch(&mut ev).unwrap();
        assert!(f.cx.is_open(f.first));
    }

    #[test]
    fn vetoed_hide_survives_outside_click() {
        let mut f = Fixture::new();
        f.cx.click(f.first).unwrap();
        let id = f
            .cx
            .on_lifecycle(f.first_group, LifecycleKind::Hide, |e| e.prevent_default());
        f.cx.click(f.outside).unwrap();
        assert!(f.cx.is_open(f.first));

        assert!(f.cx.off(id));
        f.cx.click(f.outside).unwrap();
        assert!(!f.cx.is_open(f.first));
    }

    #[test]
    fn clicks_inside_forms_and_inputs_do_not_dismiss() {
        let mut f = Fixture::new();
        f.cx.click(f.first).unwrap();
        let ev = f.cx.click(f.form_button).unwrap();
        assert!(ev.is_propagation_stopped());
        assert!(f.cx.is_open(f.first));

        f.cx.click(f.input).unwrap();
        assert!(f.cx.is_open(f.first));

        // A plain item click is an ordinary click and dismisses.
        f.cx.click(f.items[0]).unwrap();
        assert!(!f.cx.is_open(f.first));
    }

    #[test]
    fn tab_keyup_inside_keeps_open_outside_closes() {
        let mut f = Fixture::new();
        f.cx.click(f.first).unwrap();
        f.cx.key_up(f.items[0], Key::Tab).unwrap();
        assert!(f.cx.is_open(f.first));
        f.cx.key_up(f.outside, Key::Escape).unwrap();
        assert!(f.cx.is_open(f.first), "non-Tab keyup is ignored");
        f.cx.key_up(f.outside, Key::Tab).unwrap();
        assert!(!f.cx.is_open(f.first));
    }

    #[test]
    fn config_errors_propagate_through_dispatch() {
        let mut f = Fixture::new();
        f.cx.document_mut().set_attr(f.second, "data-offset", "null");
        assert!(matches!(
            f.cx.click(f.second),
            Err(Error::ConfigType { .. })
        ));
    }

    #[test]
    fn shutdown_disposes_everything() {
        let mut f = Fixture::new();
        f.cx.toggle(f.second).unwrap();
        f.cx.toggle(f.first).unwrap();
        f.cx.shutdown();
        assert!(f.cx.instance(f.first).is_none());
        assert!(f.cx.instance(f.second).is_none());
        assert!(!f.cx.document().has_class(f.first_group, CLASS_SHOW));
        assert_eq!(f.cx.listener_count(f.first, EventKind::Click), 0);
    }

    #[test]
    fn removed_toggles_are_forgotten() {
        let mut f = Fixture::with_touch();
        let lifecycle = f.cx.on_lifecycle(f.first_group, LifecycleKind::Hide, |_| {});
        f.cx.click(f.first).unwrap();
        f.cx.document_mut().remove(f.first_group);

        f.cx.click(f.outside).unwrap();
        assert!(f.cx.instance(f.first).is_none());
        assert_eq!(f.cx.listener_count(f.first, EventKind::Click), 0);
        assert_eq!(f.engine.destroyed(), 1);
        assert!(!f.cx.off(lifecycle), "listener on a removed element is dropped");
        let body = f.cx.document().body();
        for &child in f.cx.document().children_of(body) {
            assert_eq!(f.cx.listener_count(child, EventKind::MouseOver), 0);
        }
    }

    #[test]
    fn stale_targets_are_ignored() {
        let mut f = Fixture::new();
        let body = f.cx.document().body();
        let gone = f
            .cx
            .document_mut()
            .insert(body, dropkit_dom::Element::new("span"));
        f.cx.document_mut().remove(gone);
        assert!(f.cx.click(gone).is_ok());
    }
}
