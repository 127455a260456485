// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events fed to the context and lifecycle events emitted by dropdowns.

use dropkit_dom::NodeId;

/// Keyboard keys the dropdown cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Space bar.
    Space,
    /// Tab.
    Tab,
    /// Enter.
    Enter,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Any other key.
    Other,
}

/// Mouse button of a click.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Usually the left button.
    #[default]
    Primary,
    /// Wheel button.
    Middle,
    /// Usually the right button.
    Secondary,
}

/// Kind of an input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Mouse click (or synthetic click).
    Click,
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Pointer entered an element.
    MouseOver,
}

/// An input event routed through [`DropdownContext::dispatch`](crate::DropdownContext::dispatch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// Kind.
    pub kind: EventKind,
    /// Element the event is aimed at.
    pub target: NodeId,
    /// Key for keyboard events.
    pub key: Option<Key>,
    /// Button for clicks.
    pub button: Option<MouseButton>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl InputEvent {
    fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            key: None,
            button: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// A primary-button click.
    pub fn click(target: NodeId) -> Self {
        Self::click_with(target, MouseButton::Primary)
    }

    /// A click with an explicit button.
    pub fn click_with(target: NodeId, button: MouseButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(EventKind::Click, target)
        }
    }

    /// A key press.
    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    /// A key release.
    pub fn key_up(target: NodeId, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::KeyUp, target)
        }
    }

    /// A pointer entering `target`.
    pub fn mouse_over(target: NodeId) -> Self {
        Self::new(EventKind::MouseOver, target)
    }

    /// Ask the host to skip its default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop delivery to later handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler called [`InputEvent::prevent_default`].
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a handler called [`InputEvent::stop_propagation`].
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn is_key(&self, key: Key) -> bool {
        self.key == Some(key)
    }
}

/// The four lifecycle notifications of a dropdown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    /// Before opening; cancelable.
    Show,
    /// After opening.
    Shown,
    /// Before closing; cancelable.
    Hide,
    /// After closing.
    Hidden,
}

impl LifecycleKind {
    /// Event name as seen by page scripts, e.g. `show.bs.dropdown`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Show => "show.bs.dropdown",
            Self::Shown => "shown.bs.dropdown",
            Self::Hide => "hide.bs.dropdown",
            Self::Hidden => "hidden.bs.dropdown",
        }
    }

    /// Whether listeners can veto the transition.
    pub const fn is_cancelable(self) -> bool {
        matches!(self, Self::Show | Self::Hide)
    }
}

/// A lifecycle notification delivered to listeners registered with
/// [`DropdownContext::on_lifecycle`](crate::DropdownContext::on_lifecycle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Which notification.
    pub kind: LifecycleKind,
    /// The dropdown container the event fires on.
    pub target: NodeId,
    /// Element currently receiving the event while it bubbles.
    pub current_target: NodeId,
    /// The toggle that caused the transition.
    pub related_target: NodeId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl LifecycleEvent {
    pub(crate) fn new(kind: LifecycleKind, target: NodeId, related_target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            related_target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Veto the transition. Ignored on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.kind.is_cancelable() {
            self.default_prevented = true;
        }
    }

    /// Keep the event from reaching further ancestors.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether the transition was vetoed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a listener stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
