// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a dispatch sequence and honor stop outcomes.
//!
//! - [`Outcome`] only controls propagation (`Continue` vs `Stop`).
//! - The return value from [`run`] reports where propagation stopped (if at all).
//! - Higher‑level semantics such as "default prevented" or a handler error live on
//!   the event payload you pass to [`run`], not in [`Outcome`].
//!
//! ## Minimal example
//!
//! ```
//! use dropkit_responder::dispatcher;
//! use dropkit_responder::types::{Dispatch, Outcome, Phase};
//! #[derive(Copy, Clone, Debug)] struct Node(u32);
//!
//! let seq: Vec<Dispatch<Node>> = vec![
//!     Dispatch::capture(Node(1)),
//!     Dispatch::target(Node(2)),
//!     Dispatch::bubble(Node(1)),
//! ];
//!
//! let mut handled: Vec<(Phase, u32)> = Vec::new();
//! let stop_at = dispatcher::run(&seq, &mut (), |d, _| {
//!     handled.push((d.phase, d.node.0));
//!     Outcome::Continue
//! });
//!
//! assert!(stop_at.is_none());
//! assert_eq!(handled, vec![(Phase::Capture, 1), (Phase::Target, 2), (Phase::Bubble, 1)]);
//! ```
//!
//! ### Carrying a failure out of a handler
//!
//! ```
//! use dropkit_responder::dispatcher;
//! use dropkit_responder::types::{Dispatch, Outcome};
//! #[derive(Copy, Clone, Debug)] struct Node(u32);
//!
//! #[derive(Default)]
//! struct Ev {
//!     error: Option<&'static str>,
//! }
//!
//! let seq: Vec<Dispatch<Node>> = vec![Dispatch::target(Node(2)), Dispatch::bubble(Node(1))];
//! let mut ev = Ev::default();
//! let stopped = dispatcher::run(&seq, &mut ev, |d, e| {
//!     if d.node.0 == 2 {
//!         e.error = Some("boom");
//!         return Outcome::Stop;
//!     }
//!     Outcome::Continue
//! });
//! assert!(stopped.is_some());
//! assert_eq!(ev.error, Some("boom"));
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// - [`Outcome::Continue`]: keep going.
/// - [`Outcome::Stop`]: abort propagation immediately (no later phases).
///
/// Returns `None` if the full sequence was visited, or the entry at which a
/// handler stopped propagation.
pub fn run<'a, K, M, E>(
    seq: &'a [Dispatch<K, M>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K, M>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K, M>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}
