// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropkit: a headless dropdown widget.
//!
//! A dropdown is a toggle element (`[data-toggle="dropdown"]`) paired with a
//! `.dropdown-menu` panel inside a container. This crate runs the whole interaction model
//! against a [`dropkit_dom::Document`]:
//!
//! - **State machine.** [`DropdownContext::toggle`], [`show`](DropdownContext::show), and
//!   [`hide`](DropdownContext::hide) move a dropdown between closed and open, with at most
//!   one open at a time. Cancelable [`LifecycleKind::Show`] / [`LifecycleKind::Hide`] events
//!   let listeners veto a transition.
//! - **Dismissal.** Clicks and Tab keyups elsewhere on the page close open menus, except for
//!   text entry inside the menu, forms inside a dropdown, and secondary-button clicks.
//! - **Keyboard.** Arrow keys move focus through enabled `.dropdown-item`s; Escape closes and
//!   returns focus to the toggle.
//! - **Placement.** Opening attaches a [`Positioner`] from the context's
//!   [`PositioningEngine`]; closing destroys it. [`GeometryEngine`] is the default.
//! - **Configuration.** `offset` and `flip`, read from `data-*` attributes and
//!   programmatic [`Options`], merged and type-checked into a [`Config`].
//!
//! ## Minimal example
//!
//! ```rust
//! use dropkit::{DropdownContext, Key, LifecycleKind};
//! use dropkit_dom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let group = doc.insert(doc.body(), Element::new("div").with_class("dropdown"));
//! let toggle = doc.insert(group, Element::new("button").with_attr("data-toggle", "dropdown"));
//! let menu = doc.insert(group, Element::new("div").with_class("dropdown-menu"));
//! let item = doc.insert(menu, Element::new("a").with_class("dropdown-item"));
//!
//! let mut cx = DropdownContext::new(doc);
//! cx.on_lifecycle(group, LifecycleKind::Shown, |e| {
//!     assert_eq!(e.kind.name(), "shown.bs.dropdown");
//! });
//!
//! // Arrow down on a closed toggle opens it; the next one enters the menu.
//! cx.key_down(toggle, Key::ArrowDown)?;
//! assert!(cx.is_open(toggle));
//! cx.key_down(toggle, Key::ArrowDown)?;
//! assert_eq!(cx.document().active_element(), Some(item));
//!
//! // Escape closes and hands focus back.
//! cx.key_down(item, Key::Escape)?;
//! assert!(!cx.is_open(toggle));
//! assert_eq!(cx.document().active_element(), Some(toggle));
//! # Ok::<(), dropkit::Error>(())
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events: `debug` for transitions and instance lifetime, `trace`
//! for ignored input, and `warn` for malformed markup. Install any subscriber to see them.

mod config;
mod context;
mod dismiss;
mod dropdown;
mod error;
mod event;
mod keyboard;
mod listeners;
mod positioning;

#[cfg(test)]
mod testing;

pub use config::{Config, Offset, OffsetFn, OptionValue, Options};
pub use context::{ContextBuilder, DropdownContext};
pub use dropdown::Dropdown;
pub use error::{Error, Result};
pub use event::{EventKind, InputEvent, Key, LifecycleEvent, LifecycleKind, MouseButton};
pub use listeners::ListenerId;
pub use positioning::{GeometryEngine, PLACEMENT_ATTR, PositionConfig, Positioner, PositioningEngine};
