// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning engine contract and the default geometry engine.
//!
//! A dropdown never computes coordinates itself. When it opens it hands the anchor, the menu,
//! and a [`PositionConfig`] to a [`PositioningEngine`], and keeps the returned [`Positioner`]
//! until it closes.

use std::fmt;

use dropkit_dom::{Document, NodeId};
use dropkit_placement::{LayoutRequest, OffsetExpr, Offsets, Placement, compute};
use kurbo::Rect;

use crate::config::Offset;

/// Attribute written on the floating element with the effective placement.
pub const PLACEMENT_ATTR: &str = "x-placement";

/// Everything an engine needs to place one floating element.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionConfig {
    /// Requested placement.
    pub placement: Placement,
    /// Offset modifier.
    pub offset: Offset,
    /// Whether the placement may flip.
    pub flip: bool,
    /// Whether computed coordinates are written to the floating element.
    pub apply_style: bool,
}

impl PositionConfig {
    /// Apply the offset modifier to `offsets`.
    ///
    /// Numbers shift along the cross axis, expressions are parsed per
    /// [`OffsetExpr`], and callbacks are merged as patches. An unparsable
    /// expression counts as no offset.
    pub fn apply_offset(&self, placement: Placement, offsets: Offsets) -> Offsets {
        match &self.offset {
            Offset::Number(n) => OffsetExpr::px(*n).apply(placement, offsets),
            Offset::Expr(expr) => match OffsetExpr::parse(expr) {
                Ok(parsed) => parsed.apply(placement, offsets),
                Err(err) => {
                    tracing::warn!(expr = %expr, %err, "ignoring offset expression");
                    offsets
                }
            },
            Offset::Computed(f) => offsets.merge(f.call(&offsets)),
        }
    }
}

/// Creates positioners.
pub trait PositioningEngine: fmt::Debug {
    /// Place `floating` against `anchor` now and return a handle that keeps it placed.
    fn attach(
        &self,
        doc: &mut Document,
        anchor: NodeId,
        floating: NodeId,
        config: PositionConfig,
    ) -> Box<dyn Positioner>;
}

/// A live placement owned by an open dropdown.
pub trait Positioner: fmt::Debug {
    /// Recompute coordinates now.
    fn update(&mut self, doc: &mut Document);

    /// Tear down and undo any changes made to the floating element.
    fn destroy(&mut self, doc: &mut Document);

    /// Effective placement after the last computation.
    fn placement(&self) -> Placement;
}

/// Default engine: computes coordinates from element bounds with `dropkit_placement`.
///
/// The boundary is the document viewport; flipping is skipped while the viewport is empty.
#[derive(Copy, Clone, Debug, Default)]
pub struct GeometryEngine;

impl PositioningEngine for GeometryEngine {
    fn attach(
        &self,
        doc: &mut Document,
        anchor: NodeId,
        floating: NodeId,
        config: PositionConfig,
    ) -> Box<dyn Positioner> {
        let original = doc.bounds(floating).unwrap_or(Rect::ZERO);
        let mut positioner = GeometryPositioner {
            anchor,
            floating,
            placement: config.placement,
            config,
            original,
            applied: false,
        };
        positioner.update(doc);
        Box::new(positioner)
    }
}

#[derive(Debug)]
struct GeometryPositioner {
    anchor: NodeId,
    floating: NodeId,
    config: PositionConfig,
    placement: Placement,
    original: Rect,
    applied: bool,
}

impl Positioner for GeometryPositioner {
    fn update(&mut self, doc: &mut Document) {
        let Some(reference) = doc.bounds(self.anchor) else {
            return;
        };
        let boundary = doc.viewport();
        let request = LayoutRequest {
            reference,
            popper: self.original.size(),
            placement: self.config.placement,
            boundary,
            flip: self.config.flip && !boundary.is_zero_area(),
        };
        let layout = compute(&request, |p, o| self.config.apply_offset(p, o));
        self.placement = layout.placement;
        if layout.flipped {
            tracing::debug!(from = %self.config.placement, to = %layout.placement, "menu flipped");
        }
        if self.config.apply_style {
            doc.set_bounds(self.floating, layout.offsets.popper);
            doc.set_attr(self.floating, PLACEMENT_ATTR, layout.placement.as_str());
            self.applied = true;
        }
    }

    fn destroy(&mut self, doc: &mut Document) {
        if self.applied {
            doc.set_bounds(self.floating, self.original);
            doc.remove_attr(self.floating, PLACEMENT_ATTR);
            self.applied = false;
        }
    }

    fn placement(&self) -> Placement {
        self.placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OffsetFn;
    use dropkit_dom::Element;
    use dropkit_placement::OffsetsPatch;

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::with_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
        let anchor = doc.insert(
            doc.body(),
            Element::new("button").with_bounds(Rect::new(100.0, 100.0, 200.0, 130.0)),
        );
        let menu = doc.insert(
            doc.body(),
            Element::new("div").with_bounds(Rect::new(0.0, 0.0, 160.0, 120.0)),
        );
        (doc, anchor, menu)
    }

    fn config(placement: Placement) -> PositionConfig {
        PositionConfig {
            placement,
            offset: Offset::Number(0.0),
            flip: true,
            apply_style: true,
        }
    }

    #[test]
    fn attach_applies_and_destroy_restores() {
        let (mut doc, anchor, menu) = page();
        let mut p = GeometryEngine.attach(&mut doc, anchor, menu, config(Placement::BottomEnd));
        assert_eq!(doc.bounds(menu), Some(Rect::new(40.0, 130.0, 200.0, 250.0)));
        assert_eq!(doc.attr(menu, PLACEMENT_ATTR), Some("bottom-end"));
        p.destroy(&mut doc);
        assert_eq!(doc.bounds(menu), Some(Rect::new(0.0, 0.0, 160.0, 120.0)));
        assert_eq!(doc.attr(menu, PLACEMENT_ATTR), None);
    }

    #[test]
    fn update_follows_the_anchor() {
        let (mut doc, anchor, menu) = page();
        let mut p = GeometryEngine.attach(&mut doc, anchor, menu, config(Placement::BottomStart));
        doc.set_bounds(anchor, Rect::new(300.0, 100.0, 400.0, 130.0));
        p.update(&mut doc);
        assert_eq!(doc.bounds(menu).map(|r| r.x0), Some(300.0));
    }

    #[test]
    fn flips_near_the_viewport_edge() {
        let (mut doc, anchor, menu) = page();
        doc.set_bounds(anchor, Rect::new(100.0, 540.0, 200.0, 570.0));
        let p = GeometryEngine.attach(&mut doc, anchor, menu, config(Placement::BottomStart));
        assert_eq!(p.placement(), Placement::TopStart);
        assert_eq!(doc.attr(menu, PLACEMENT_ATTR), Some("top-start"));

        let mut no_flip = config(Placement::BottomStart);
        no_flip.flip = false;
        let p = GeometryEngine.attach(&mut doc, anchor, menu, no_flip);
        assert_eq!(p.placement(), Placement::BottomStart);
    }

    #[test]
    fn apply_style_disabled_leaves_the_menu_alone() {
        let (mut doc, anchor, menu) = page();
        let mut cfg = config(Placement::BottomStart);
        cfg.apply_style = false;
        let mut p = GeometryEngine.attach(&mut doc, anchor, menu, cfg);
        assert_eq!(doc.bounds(menu), Some(Rect::new(0.0, 0.0, 160.0, 120.0)));
        assert_eq!(doc.attr(menu, PLACEMENT_ATTR), None);
        p.destroy(&mut doc);
        assert_eq!(doc.bounds(menu), Some(Rect::new(0.0, 0.0, 160.0, 120.0)));
    }

    #[test]
    fn offset_variants() {
        let (mut doc, anchor, menu) = page();
        let mut cfg = config(Placement::BottomStart);
        cfg.offset = Offset::Expr("10, 5".into());
        GeometryEngine.attach(&mut doc, anchor, menu, cfg.clone());
        assert_eq!(doc.bounds(menu).map(|r| (r.x0, r.y0)), Some((110.0, 135.0)));

        cfg.offset = Offset::Expr("sideways".into());
        GeometryEngine.attach(&mut doc, anchor, menu, cfg.clone());
        assert_eq!(doc.bounds(menu).map(|r| (r.x0, r.y0)), Some((100.0, 130.0)));

        cfg.offset = Offset::Computed(OffsetFn::new(|o| OffsetsPatch {
            popper: Some(o.popper + kurbo::Vec2::new(-7.0, 0.0)),
            reference: None,
        }));
        GeometryEngine.attach(&mut doc, anchor, menu, cfg);
        assert_eq!(doc.bounds(menu).map(|r| r.x0), Some(93.0));
    }
}
