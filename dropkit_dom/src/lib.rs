// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropkit DOM: a small in-memory element document for headless widgets.
//!
//! Widgets such as the dropdown in the `dropkit` crate need a tree of elements with classes,
//! attributes, bounds, and a focus cursor, but not a browser. This crate provides exactly that.
//!
//! - Represents a hierarchy of elements under a fixed `html` root and `body`.
//! - Answers the queries widgets ask: [`Document::closest`], [`Document::find_one`],
//!   [`Document::find_all`], [`Document::contains`], and [`Document::matches`].
//! - Tracks the focused element and clears it when that element goes away.
//!
//! ## Not a layout engine
//!
//! The document does not measure or arrange anything. Hosts set each element's world-space
//! [`Element::bounds`]; positioning code reads and writes them.
//!
//! ## API overview
//!
//! - [`Document`]: container managing elements, focus, and the viewport.
//! - [`Element`]: per-element data (tag, classes, attributes, bounds, flags).
//! - [`ElementFlags`]: visibility, disabled state, and focusability.
//! - [`NodeId`]: generational handle of an element.
//! - [`Selector`]: the small selector language used by queries.
//!
//! Key operations:
//! - [`Document::insert`](Document::insert) → [`NodeId`]
//! - [`Document::add_class`] / [`Document::remove_class`] / [`Document::toggle_class`]
//! - [`Document::attr`] / [`Document::set_attr`] / [`Document::data`]
//! - [`Document::focus`] / [`Document::active_element`]
//! - [`Document::next_depth_first`](Document::next_depth_first) and
//!   [`Document::prev_depth_first`](Document::prev_depth_first) provide depth-first traversal.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod selector;
mod types;

pub use document::{Ancestors, Descendants, Document};
pub use selector::Selector;
pub use types::{Element, ElementFlags, NodeId};
