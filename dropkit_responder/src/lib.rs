// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropkit Responder: a deterministic, `no_std` router for widget events.
//!
//! ## Overview
//!
//! This crate builds the responder chain sequence (capture → target → bubble) for a known
//! event target. It does not perform hit testing: the caller names the target, and a
//! [`ParentLookup`](crate::types::ParentLookup) supplies the ancestry.
//!
//! The router only computes the traversal order. A higher‑level dispatcher executes
//! handlers, honors stop requests, and applies widget policies.
//!
//! ## Dispatcher
//!
//! Execute handlers over the responder sequence and honor stop outcomes with [`dispatcher::run`].
//!
//! ```
//! use dropkit_responder::dispatcher;
//! use dropkit_responder::router::Router;
//! use dropkit_responder::types::{Outcome, ParentLookup};
//!
//! #[derive(Default)]
//! struct Chain;
//! impl ParentLookup<u32> for Chain {
//!     fn parent_of(&self, n: &u32) -> Option<u32> {
//!         n.checked_sub(1)
//!     }
//! }
//!
//! let router: Router<u32, Chain> = Router::new();
//! let seq = router.dispatch_for::<()>(2);
//! let mut bubbled = Vec::new();
//! dispatcher::run(&seq, &mut bubbled, |d, seen| {
//!     if d.is_bubbling() {
//!         seen.push(d.node);
//!     }
//!     Outcome::Continue
//! });
//! assert_eq!(bubbled, vec![2, 1, 0]);
//! ```
//!
//! ## Adapters
//!
//! - **DOM Adapter** (`dom_adapter` feature): parent links over a `dropkit_dom::Document`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod router;
pub mod types;
