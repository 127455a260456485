// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropkit Focus: focus traversal over a list of candidates.
//!
//! This crate models focus navigation as a combination of:
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Down`] or [`Navigation::Prev`].
//! - A **view of candidates** ([`FocusEntry`] / [`FocusSpace`]) describing focusable nodes,
//!   their bounds, explicit order, and enabled state.
//! - Pluggable **policies** ([`FocusPolicy`]) that select the next focused node given an
//!   origin, a direction, and the candidates.
//!
//! [`MenuPolicy`] implements the linear traversal used by menus: candidates are ordered by
//! their explicit `order` (typically document order) and then by reading order, disabled
//! entries are skipped, and movement either clamps at the ends or wraps.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use dropkit_focus::{FocusEntry, FocusPolicy, FocusSpace, MenuPolicy, Navigation};
//!
//! let items = [
//!     FocusEntry::new(1_u32, Rect::new(0.0, 0.0, 80.0, 20.0)).with_order(0),
//!     FocusEntry::new(2_u32, Rect::new(0.0, 20.0, 80.0, 40.0)).with_order(1).disabled(),
//!     FocusEntry::new(3_u32, Rect::new(0.0, 40.0, 80.0, 60.0)).with_order(2),
//! ];
//! let space = FocusSpace { nodes: &items };
//! let policy = MenuPolicy::default();
//!
//! assert_eq!(policy.next(Some(1), Navigation::Down, &space), Some(3));
//! assert_eq!(policy.next(Some(3), Navigation::Down, &space), Some(3));
//! assert_eq!(policy.next(None, Navigation::Up, &space), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use kurbo::Rect;

/// Direction of focus navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Forward in the container's order (for example, Tab).
    Next,
    /// Backward in the container's order (for example, Shift+Tab).
    Prev,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
}

impl Navigation {
    fn step(self) -> Step {
        match self {
            Self::Next | Self::Down => Step::Forward,
            Self::Prev | Self::Up => Step::Backward,
        }
    }
}

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug)]
pub struct FocusEntry<K> {
    /// Identifier for this focusable node.
    pub id: K,
    /// Bounds; every entry of one space should share a coordinate space.
    pub rect: Rect,
    /// Optional explicit ordering key.
    pub order: Option<i32>,
    /// Whether this node is enabled for focus.
    pub enabled: bool,
}

impl<K> FocusEntry<K> {
    /// An enabled entry with no explicit order.
    pub fn new(id: K, rect: Rect) -> Self {
        Self {
            id,
            rect,
            order: None,
            enabled: true,
        }
    }

    /// Set the explicit ordering key.
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Mark the entry as disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A read-only view of focusable candidates.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Focusable candidates.
    pub nodes: &'a [FocusEntry<K>],
}

/// Behavior at either end of the candidate sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Stay on the first/last candidate.
    #[default]
    Clamp,
    /// Wrap around to the other end.
    Wrap,
}

/// Trait for focus traversal policies.
///
/// `origin` is the currently focused node, or `None` when focus is outside the space.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target.
    fn next(&self, origin: Option<K>, direction: Navigation, space: &FocusSpace<'_, K>)
    -> Option<K>;
}

/// Linear traversal for menus and lists.
///
/// - Returns `None` when no candidate is enabled.
/// - When `origin` is not an enabled candidate, both directions land on the first candidate.
/// - Otherwise moves one step, clamping or wrapping at the ends per [`WrapMode`].
#[derive(Copy, Clone, Debug, Default)]
pub struct MenuPolicy {
    /// End-of-sequence behavior.
    pub wrap: WrapMode,
}

impl<K> FocusPolicy<K> for MenuPolicy
where
    K: Copy + Eq,
{
    fn next(
        &self,
        origin: Option<K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        let nodes = space.nodes;
        let mut indices: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.enabled.then_some(i))
            .collect();
        if indices.is_empty() {
            return None;
        }
        indices.sort_by(|&ia, &ib| compare_linear(&nodes[ia], &nodes[ib]));

        let last = indices.len() - 1;
        let Some(pos) = origin.and_then(|o| indices.iter().position(|&i| nodes[i].id == o))
        else {
            return Some(nodes[indices[0]].id);
        };

        let target = match (direction.step(), self.wrap) {
            (Step::Forward, _) if pos < last => pos + 1,
            (Step::Forward, WrapMode::Wrap) => 0,
            (Step::Backward, _) if pos > 0 => pos - 1,
            (Step::Backward, WrapMode::Wrap) => last,
            (_, WrapMode::Clamp) => pos,
        };
        Some(nodes[indices[target]].id)
    }
}

#[derive(Copy, Clone)]
enum Step {
    Forward,
    Backward,
}

fn compare_linear<K>(a: &FocusEntry<K>, b: &FocusEntry<K>) -> Ordering {
    // First, honor explicit order when present.
    match (a.order, b.order) {
        (Some(ao), Some(bo)) => ao
            .cmp(&bo)
            .then_with(|| compare_rect_reading(&a.rect, &b.rect)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_rect_reading(&a.rect, &b.rect),
    }
}

fn compare_rect_reading(a: &Rect, b: &Rect) -> Ordering {
    const RELATIVE_EPS: f64 = 1e-6;
    let ay = a.y0;
    let by = b.y0;
    if (ay - by).abs() > f64::max(ay.abs(), by.abs()) * RELATIVE_EPS {
        return ay.partial_cmp(&by).unwrap_or(Ordering::Equal);
    }
    a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn column(ids: &[u32]) -> Vec<FocusEntry<u32>> {
        ids.iter()
            .enumerate()
            .map(|(i, &id)| {
                let y = i as f64 * 20.0;
                FocusEntry::new(id, Rect::new(0.0, y, 80.0, y + 20.0))
            })
            .collect()
    }

    #[test]
    fn clamps_at_both_ends() {
        let entries = column(&[1, 2, 3]);
        let space = FocusSpace { nodes: &entries };
        let policy = MenuPolicy::default();

        assert_eq!(policy.next(Some(1), Navigation::Down, &space), Some(2));
        assert_eq!(policy.next(Some(3), Navigation::Down, &space), Some(3));
        assert_eq!(policy.next(Some(1), Navigation::Up, &space), Some(1));
        assert_eq!(policy.next(Some(2), Navigation::Up, &space), Some(1));
    }

    #[test]
    fn wraps_when_asked() {
        let entries = column(&[1, 2]);
        let space = FocusSpace { nodes: &entries };
        let policy = MenuPolicy {
            wrap: WrapMode::Wrap,
        };
        assert_eq!(policy.next(Some(2), Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(Some(1), Navigation::Prev, &space), Some(2));
    }

    #[test]
    fn skips_disabled_entries() {
        let mut entries = column(&[1, 2, 3]);
        entries[1].enabled = false;
        let space = FocusSpace { nodes: &entries };
        let policy = MenuPolicy::default();

        assert_eq!(policy.next(Some(1), Navigation::Down, &space), Some(3));
        assert_eq!(policy.next(Some(3), Navigation::Up, &space), Some(1));
    }

    #[test]
    fn unknown_origin_lands_on_first() {
        let entries = column(&[1, 2, 3]);
        let space = FocusSpace { nodes: &entries };
        let policy = MenuPolicy::default();
        assert_eq!(policy.next(None, Navigation::Down, &space), Some(1));
        assert_eq!(policy.next(Some(99), Navigation::Up, &space), Some(1));

        // A disabled origin counts as unknown.
        let mut entries = column(&[1, 2, 3]);
        entries[1].enabled = false;
        let space = FocusSpace { nodes: &entries };
        assert_eq!(policy.next(Some(2), Navigation::Down, &space), Some(1));
    }

    #[test]
    fn empty_or_all_disabled_yields_none() {
        let policy = MenuPolicy::default();
        let empty: Vec<FocusEntry<u32>> = vec![];
        assert_eq!(
            policy.next(None, Navigation::Down, &FocusSpace { nodes: &empty }),
            None
        );
        let entries = vec![FocusEntry::new(1_u32, Rect::ZERO).disabled()];
        assert_eq!(
            policy.next(Some(1), Navigation::Down, &FocusSpace { nodes: &entries }),
            None
        );
    }

    #[test]
    fn explicit_order_beats_geometry() {
        let entries = vec![
            FocusEntry::new(1_u32, Rect::new(0.0, 40.0, 10.0, 50.0)).with_order(0),
            FocusEntry::new(2_u32, Rect::new(0.0, 0.0, 10.0, 10.0)).with_order(1),
        ];
        let space = FocusSpace { nodes: &entries };
        let policy = MenuPolicy::default();
        assert_eq!(policy.next(Some(1), Navigation::Down, &space), Some(2));
    }

    #[test]
    fn reading_order_without_explicit_order() {
        let entries = vec![
            FocusEntry::new(1_u32, Rect::new(20.0, 0.0, 30.0, 10.0)),
            FocusEntry::new(2_u32, Rect::new(0.0, 0.0, 10.0, 10.0)),
        ];
        let space = FocusSpace { nodes: &entries };
        let policy = MenuPolicy::default();
        assert_eq!(policy.next(None, Navigation::Down, &space), Some(2));
    }
}
