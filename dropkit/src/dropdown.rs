// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget instance and the public operations on it.

use dropkit_dom::{Document, ElementFlags, NodeId, Selector};
use dropkit_placement::Placement;

use crate::config::{Config, Options};
use crate::context::DropdownContext;
use crate::error::{Error, Result};
use crate::event::{EventKind, LifecycleKind};
use crate::listeners::Handler;
use crate::positioning::{PositionConfig, Positioner};

pub(crate) const CLASS_SHOW: &str = "show";
pub(crate) const CLASS_DISABLED: &str = "disabled";
const CLASS_DROPUP: &str = "dropup";
const CLASS_MENU_RIGHT: &str = "dropdown-menu-right";
const CLASS_MENU_LEFT: &str = "dropdown-menu-left";
const ARIA_EXPANDED: &str = "aria-expanded";

/// `[data-toggle="dropdown"]`
pub(crate) fn toggle_selector() -> Selector {
    Selector::attr_eq("data-toggle", "dropdown")
}

/// Structural wrapper of a toggle: the first match of its `data-target` (or `href`)
/// selector, falling back to the parent element.
pub(crate) fn container_of(doc: &Document, toggle: NodeId) -> NodeId {
    let target = doc
        .attr(toggle, "data-target")
        .filter(|s| !s.is_empty() && *s != "#")
        .or_else(|| doc.attr(toggle, "href"));
    target
        .and_then(Selector::parse)
        .and_then(|sel| doc.query(&sel))
        .or_else(|| doc.parent_of(toggle))
        .unwrap_or(toggle)
}

/// Native `disabled` state or the `disabled` class.
pub(crate) fn is_disabled(doc: &Document, node: NodeId) -> bool {
    doc.flags(node)
        .is_some_and(|f| f.contains(ElementFlags::DISABLED))
        || doc.has_class(node, CLASS_DISABLED)
}

/// One dropdown, attached to its toggle element.
#[derive(Debug)]
pub struct Dropdown {
    element: Option<NodeId>,
    menu: Option<NodeId>,
    config: Config,
    in_navbar: bool,
    pub(crate) positioner: Option<Box<dyn Positioner>>,
}

impl Dropdown {
    pub(crate) fn new(doc: &Document, element: NodeId, options: Option<&Options>) -> Result<Self> {
        let config = Config::resolve(doc, element, options)?;
        let container = container_of(doc, element);
        let menu = doc.find_one(container, &Selector::class("dropdown-menu"));
        if menu.is_none() {
            tracing::warn!(?element, "dropdown has no .dropdown-menu; operations will be no-ops");
        }
        Ok(Self {
            element: Some(element),
            menu,
            config,
            in_navbar: detect_navbar(doc, element),
            positioner: None,
        })
    }

    /// The toggle element.
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    /// The menu panel, if one was found.
    pub fn menu(&self) -> Option<NodeId> {
        self.menu
    }

    /// Merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the toggle sits inside a `.navbar`.
    pub fn in_navbar(&self) -> bool {
        self.in_navbar
    }

    /// The live positioner; present exactly while the menu is shown.
    pub fn positioner(&self) -> Option<&dyn Positioner> {
        self.positioner.as_deref()
    }

    /// Placement from the dropup marker on the toggle's parent and the
    /// right-alignment marker on the menu.
    pub fn placement(&self, doc: &Document) -> Placement {
        let dropup = self
            .element
            .and_then(|e| doc.parent_of(e))
            .is_some_and(|p| doc.has_class(p, CLASS_DROPUP));
        let align_end = self
            .menu
            .is_some_and(|m| doc.has_class(m, CLASS_MENU_RIGHT));
        Placement::for_markers(dropup, align_end)
    }

    fn position_config(&self, doc: &Document) -> PositionConfig {
        PositionConfig {
            placement: self.placement(doc),
            offset: self.config.offset.clone(),
            flip: self.config.flip,
            apply_style: !self.in_navbar,
        }
    }
}

fn detect_navbar(doc: &Document, element: NodeId) -> bool {
    doc.closest(element, &Selector::class("navbar")).is_some()
}

impl DropdownContext {
    /// Open the dropdown if closed, close it if open.
    ///
    /// Opening first closes every other open dropdown. Disabled toggles are ignored.
    pub fn toggle(&mut self, element: NodeId) -> Result<()> {
        self.ensure_instance(element, None)?;
        self.toggle_instance(element);
        Ok(())
    }

    /// Open the dropdown unless it is disabled or already open.
    pub fn show(&mut self, element: NodeId) -> Result<()> {
        self.ensure_instance(element, None)?;
        if is_disabled(&self.document, element) || self.is_open(element) {
            return Ok(());
        }
        self.toggle_instance(element);
        Ok(())
    }

    /// Close this dropdown unless it is disabled or already closed.
    pub fn hide(&mut self, element: NodeId) -> Result<()> {
        self.ensure_instance(element, None)?;
        if is_disabled(&self.document, element) || !self.is_open(element) {
            return Ok(());
        }
        self.close(element, true);
        Ok(())
    }

    /// Recompute the navbar flag and, while open, the menu position.
    pub fn update(&mut self, element: NodeId) -> Result<()> {
        self.ensure_instance(element, None)?;
        let in_navbar = detect_navbar(&self.document, element);
        if let Some(instance) = self.registry.get_mut(&element) {
            instance.in_navbar = in_navbar;
            if let Some(positioner) = instance.positioner.as_mut() {
                positioner.update(&mut self.document);
            }
        }
        Ok(())
    }

    /// Drop the instance attached to `element`.
    ///
    /// An open dropdown is closed without lifecycle events. No-op when there is no instance.
    pub fn dispose(&mut self, element: NodeId) {
        if !self.registry.contains_key(&element) {
            return;
        }
        if self.is_open(element) {
            self.close(element, false);
        }
        self.table.off(element, EventKind::Click, Handler::InstanceClick);
        if let Some(mut instance) = self.registry.remove(&element) {
            if let Some(mut positioner) = instance.positioner.take() {
                positioner.destroy(&mut self.document);
            }
            instance.element = None;
            instance.menu = None;
        }
        tracing::debug!(?element, "dropdown disposed");
    }

    /// Run an operation by name (`toggle`, `show`, `hide`, `update`, `dispose`).
    ///
    /// The instance is created first, so even a failing call leaves one behind.
    pub fn invoke(&mut self, element: NodeId, name: &str) -> Result<()> {
        self.ensure_instance(element, None)?;
        match name {
            "toggle" => self.toggle(element),
            "show" => self.show(element),
            "hide" => self.hide(element),
            "update" => self.update(element),
            "dispose" => {
                self.dispose(element);
                Ok(())
            }
            _ => Err(Error::UnknownMethod {
                name: name.to_owned(),
            }),
        }
    }

    /// Create the instance for `element` with `options`.
    ///
    /// Options are ignored when an instance already exists.
    pub fn dropdown(&mut self, element: NodeId, options: &Options) -> Result<()> {
        self.ensure_instance(element, Some(options))
    }

    pub(crate) fn ensure_instance(
        &mut self,
        element: NodeId,
        options: Option<&Options>,
    ) -> Result<()> {
        if self.registry.contains_key(&element) {
            return Ok(());
        }
        let instance = Dropdown::new(&self.document, element, options)?;
        self.table.on(element, EventKind::Click, Handler::InstanceClick);
        self.registry.insert(element, instance);
        tracing::debug!(?element, "dropdown created");
        Ok(())
    }

    fn toggle_instance(&mut self, element: NodeId) {
        if is_disabled(&self.document, element) {
            tracing::trace!(?element, "toggle ignored on disabled element");
            return;
        }
        let container = container_of(&self.document, element);
        let Some(menu) = self.registry.get(&element).and_then(Dropdown::menu) else {
            tracing::warn!(?element, "toggle ignored: dropdown has no menu");
            return;
        };
        let was_open = self.document.has_class(menu, CLASS_SHOW);

        self.clear_menus(None);
        if was_open {
            return;
        }

        let show = self.emit_lifecycle(LifecycleKind::Show, container, element);
        if show.is_default_prevented() {
            tracing::debug!(?element, "show vetoed");
            return;
        }

        let mut anchor = element;
        if self.document.has_class(container, CLASS_DROPUP)
            && (self.document.has_class(menu, CLASS_MENU_LEFT)
                || self.document.has_class(menu, CLASS_MENU_RIGHT))
        {
            anchor = container;
        }

        let Some(config) = self
            .registry
            .get(&element)
            .map(|d| d.position_config(&self.document))
        else {
            return;
        };
        let positioner = self.engine.attach(&mut self.document, anchor, menu, config);
        if let Some(instance) = self.registry.get_mut(&element) {
            instance.positioner = Some(positioner);
        }

        if self.touch
            && self
                .document
                .closest(container, &Selector::class("navbar-nav"))
                .is_none()
        {
            self.add_touch_handlers();
        }

        self.document.focus(element);
        self.document.set_attr(element, ARIA_EXPANDED, "true");
        self.document.add_class(menu, CLASS_SHOW);
        self.document.add_class(container, CLASS_SHOW);
        self.emit_lifecycle(LifecycleKind::Shown, container, element);
        tracing::debug!(?element, ?menu, "dropdown shown");
    }

    /// Run `Open -> Closed` for one toggle. With `notify` unset no lifecycle events
    /// fire and nothing can veto. Returns whether the dropdown closed.
    pub(crate) fn close(&mut self, toggle: NodeId, notify: bool) -> bool {
        let container = container_of(&self.document, toggle);
        if notify {
            let hide = self.emit_lifecycle(LifecycleKind::Hide, container, toggle);
            if hide.is_default_prevented() {
                tracing::debug!(?toggle, "hide vetoed");
                return false;
            }
        }
        if self.touch {
            self.remove_touch_handlers();
        }
        self.document.set_attr(toggle, ARIA_EXPANDED, "false");
        if let Some(instance) = self.registry.get_mut(&toggle) {
            if let Some(menu) = instance.menu {
                self.document.remove_class(menu, CLASS_SHOW);
            }
            if let Some(mut positioner) = instance.positioner.take() {
                positioner.destroy(&mut self.document);
            }
        }
        self.document.remove_class(container, CLASS_SHOW);
        if notify {
            self.emit_lifecycle(LifecycleKind::Hidden, container, toggle);
        }
        tracing::debug!(?toggle, notify, "dropdown hidden");
        true
    }

    /// Forget instances whose toggle was removed from the document, along with listeners
    /// attached to removed elements. An instance that was open releases its positioner and
    /// touch handlers.
    pub(crate) fn prune_detached(&mut self) {
        let detached: Vec<NodeId> = self
            .registry
            .keys()
            .copied()
            .filter(|&e| !self.document.is_alive(e))
            .collect();
        for element in detached {
            let Some(mut instance) = self.registry.remove(&element) else {
                continue;
            };
            if let Some(mut positioner) = instance.positioner.take() {
                positioner.destroy(&mut self.document);
                if self.touch {
                    self.remove_touch_handlers();
                }
            }
            tracing::debug!(?element, "dropped instance of removed element");
        }
        let document = &self.document;
        self.table.retain_nodes(|n| document.is_alive(n));
    }

    fn add_touch_handlers(&mut self) {
        for child in self.document.children_of(self.document.body()) {
            self.table.on(*child, EventKind::MouseOver, Handler::Noop);
        }
    }

    fn remove_touch_handlers(&mut self) {
        for child in self.document.children_of(self.document.body()) {
            self.table.off(*child, EventKind::MouseOver, Handler::Noop);
        }
    }
}
