// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the root→target path of an event target and emits a
//! capture → target → bubble sequence for it.
//!
//! Target selection is the caller's job. Widget documents already know which
//! element an input event is aimed at, so the router only answers "in which
//! order do the ancestors see it".

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup, Phase};

/// Deterministic responder chain router.
///
/// ## Usage
///
/// - Construct with [`Router::new`] for singleton paths, or with
///   [`Router::with_parent`] to enable path reconstruction via a [`ParentLookup`].
/// - Call [`Router::dispatch_for`] per event to obtain the sequence, then walk it with
///   [`dispatcher::run`](crate::dispatcher::run).
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    pub(crate) parent: P,
    _marker: core::marker::PhantomData<fn(K)>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self::with_parent(P::default())
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with a parent lookup for path reconstruction.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _marker: core::marker::PhantomData,
        }
    }

    /// Emit a dispatch sequence for a specific target node by reconstructing its path.
    pub fn dispatch_for<M: Clone>(&self, target: K) -> Vec<Dispatch<K, M>> {
        self.dispatch_for_with(target, None)
    }

    /// Emit a dispatch sequence for a specific target with an explicit payload.
    pub fn dispatch_for_with<M: Clone>(&self, target: K, meta: Option<M>) -> Vec<Dispatch<K, M>> {
        let path = Self::reconstruct_path(target, &self.parent);
        Self::emit_path(&path, meta)
    }

    /// Root→target path of `target`.
    pub fn path_of(&self, target: K) -> Vec<K> {
        Self::reconstruct_path(target, &self.parent)
    }

    fn reconstruct_path(target: K, parent_lookup: &impl ParentLookup<K>) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match parent_lookup.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn emit_path<M: Clone>(path: &[K], meta: Option<M>) -> Vec<Dispatch<K, M>> {
        let mut out = Vec::with_capacity(path.len() * 2);
        let Some((target, ancestors)) = path.split_last() else {
            return out;
        };

        // Capture: root→(excluding target)
        for &n in ancestors {
            out.push(make_dispatch(Phase::Capture, n, meta.clone()));
        }

        // Target: only the target element
        out.push(make_dispatch(Phase::Target, *target, meta.clone()));

        // Bubble: parent→root (excluding target)
        for &n in ancestors.iter().rev() {
            out.push(make_dispatch(Phase::Bubble, n, meta.clone()));
        }
        out
    }
}

fn make_dispatch<K, M>(phase: Phase, node: K, meta: Option<M>) -> Dispatch<K, M> {
    Dispatch { phase, node, meta }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher;
    use crate::types::Outcome;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct Node(u32);

    #[derive(Default)]
    struct Parents;

    impl ParentLookup<Node> for Parents {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                _ => None,
            }
        }
    }

    // dispatch_for reconstructs a path via ParentLookup and emits capture→target→bubble.
    #[test]
    fn dispatch_for_reconstructs_path() {
        let router: Router<Node, Parents> = Router::new();
        let out = router.dispatch_for::<()>(Node(3));
        let phases: Vec<(Phase, u32)> = out.iter().map(|d| (d.phase, d.node.0)).collect();
        assert_eq!(
            phases,
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Target, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
    }

    // dispatch_for without parent lookup falls back to singleton path.
    #[test]
    fn dispatch_for_singleton_without_parent() {
        let router: Router<Node> = Router::new();
        let out = router.dispatch_for::<()>(Node(42));
        let phases: Vec<(Phase, u32)> = out.iter().map(|d| (d.phase, d.node.0)).collect();
        assert_eq!(phases, vec![(Phase::Target, 42)]);
    }

    #[test]
    fn meta_is_shared_by_every_step() {
        let router: Router<Node, Parents> = Router::new();
        let out = router.dispatch_for_with(Node(2), Some("click"));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|d| d.meta == Some("click")));
    }

    #[test]
    fn path_of_is_root_first() {
        let router: Router<Node, Parents> = Router::new();
        assert_eq!(router.path_of(Node(3)), vec![Node(1), Node(2), Node(3)]);
    }

    #[test]
    fn router_dispatch_and_dispatcher_stop_skips_remaining_bubble() {
        let router: Router<Node, Parents> = Router::new();
        let seq = router.dispatch_for::<()>(Node(3));
        let mut seen: Vec<u32> = Vec::new();
        let stopped = dispatcher::run(&seq, &mut (), |d, _| {
            if !d.is_bubbling() {
                return Outcome::Continue;
            }
            seen.push(d.node.0);
            if d.node.0 == 2 {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        assert_eq!(stopped.map(|d| d.node), Some(Node(2)));
        assert_eq!(seen, vec![3, 2]);
    }
}
