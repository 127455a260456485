// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement computation: base boxes, offset modifiers, and flipping.

use kurbo::{Rect, Size};

use crate::offset::Offsets;
use crate::placement::Placement;

/// Inputs of a layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutRequest {
    /// Reference (anchor) box.
    pub reference: Rect,
    /// Size of the floating box.
    pub popper: Size,
    /// Requested placement.
    pub placement: Placement,
    /// Region the floating box should stay inside (usually the viewport).
    pub boundary: Rect,
    /// Whether the placement may flip to the other side.
    pub flip: bool,
}

/// Result of a layout pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    /// Effective placement after flipping.
    pub placement: Placement,
    /// Final boxes.
    pub offsets: Offsets,
    /// Whether the placement was flipped.
    pub flipped: bool,
}

/// The floating box placed flush against the reference, before any modifier.
pub fn base_offsets(reference: Rect, popper: Size, placement: Placement) -> Offsets {
    let x0 = if placement.is_end() {
        reference.x1 - popper.width
    } else {
        reference.x0
    };
    let y0 = if placement.is_top() {
        reference.y0 - popper.height
    } else {
        reference.y1
    };
    Offsets {
        popper: Rect::from_origin_size((x0, y0), popper),
        reference,
    }
}

/// Run a layout pass.
///
/// `modifier` receives the placement and the base offsets and returns adjusted
/// offsets; pass `|_, o| o` for none. With `flip` set, a floating box that
/// overflows the boundary on its side is moved to the opposite side when that
/// side has more room; the modifier then runs again for the new placement.
///
/// ```
/// use kurbo::{Rect, Size};
/// use dropkit_placement::{compute, LayoutRequest, Placement};
///
/// let req = LayoutRequest {
///     reference: Rect::new(10.0, 560.0, 90.0, 590.0),
///     popper: Size::new(120.0, 100.0),
///     placement: Placement::BottomStart,
///     boundary: Rect::new(0.0, 0.0, 800.0, 600.0),
///     flip: true,
/// };
/// let layout = compute(&req, |_, o| o);
/// assert!(layout.flipped);
/// assert_eq!(layout.placement, Placement::TopStart);
/// assert_eq!(layout.offsets.popper.y1, 560.0);
/// ```
pub fn compute(req: &LayoutRequest, modifier: impl Fn(Placement, Offsets) -> Offsets) -> Layout {
    let run = |placement| modifier(placement, base_offsets(req.reference, req.popper, placement));
    let offsets = run(req.placement);
    if req.flip && should_flip(req, offsets.popper) {
        let placement = req.placement.opposite();
        return Layout {
            placement,
            offsets: run(placement),
            flipped: true,
        };
    }
    Layout {
        placement: req.placement,
        offsets,
        flipped: false,
    }
}

fn should_flip(req: &LayoutRequest, popper: Rect) -> bool {
    let above = req.reference.y0 - req.boundary.y0;
    let below = req.boundary.y1 - req.reference.y1;
    if req.placement.is_top() {
        popper.y0 < req.boundary.y0 && below > above
    } else {
        popper.y1 > req.boundary.y1 && above > below
    }
}
