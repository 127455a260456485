// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for routing: phases, outcomes, dispatch entries, and parent lookup.

/// Propagation phase of a dispatch entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root→target, excluding the target.
    Capture,
    /// The target itself.
    Target,
    /// Target's parent→root.
    Bubble,
}

/// Result of a handler: continue or stop propagation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Keep propagating.
    #[default]
    Continue,
    /// Stop propagation immediately.
    Stop,
}

/// A single step in a responder sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch<K, M = ()> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node receiving this step.
    pub node: K,
    /// Optional payload shared by every step of the sequence.
    pub meta: Option<M>,
}

impl<K, M> Dispatch<K, M> {
    /// A capture-phase step.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
            meta: None,
        }
    }

    /// A target-phase step.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
            meta: None,
        }
    }

    /// A bubble-phase step.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
            meta: None,
        }
    }

    /// Attach a payload.
    #[must_use]
    pub fn with_meta(mut self, meta: M) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Returns true for target and bubble steps, the phases ordinary listeners observe.
    pub fn is_bubbling(&self) -> bool {
        matches!(self.phase, Phase::Target | Phase::Bubble)
    }
}

/// Source of parent links used to reconstruct a root→target path.
pub trait ParentLookup<K> {
    /// Parent of `node`, or `None` at the root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A [`ParentLookup`] that knows no parents; paths collapse to the target alone.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}
