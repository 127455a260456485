// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu placement with the default geometry engine.
//!
//! Opens the same dropdown at several positions in a small viewport and prints where the
//! menu lands, including a flip to the top near the bottom edge and an offset expression.
//!
//! Run:
//! - `cargo run -p dropkit_demos --example placement`

use dropkit::{DropdownContext, Options, PLACEMENT_ATTR};
use dropkit_dom::{Document, Element};
use kurbo::Rect;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), dropkit::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::with_viewport(Rect::new(0.0, 0.0, 400.0, 300.0));
    let body = doc.body();
    let group = doc.insert(body, Element::new("div").with_class("dropdown"));
    let toggle = doc.insert(
        group,
        Element::new("button").with_attr("data-toggle", "dropdown"),
    );
    let menu = doc.insert(
        group,
        Element::new("div")
            .with_class("dropdown-menu")
            .with_bounds(Rect::new(0.0, 0.0, 120.0, 100.0)),
    );

    let mut cx = DropdownContext::new(doc);
    cx.dropdown(toggle, &Options::new().offset_expr("10px, 4"))?;

    for (label, anchor) in [
        ("top left", Rect::new(20.0, 20.0, 100.0, 50.0)),
        ("bottom left", Rect::new(20.0, 240.0, 100.0, 270.0)),
        ("top right", Rect::new(300.0, 20.0, 380.0, 50.0)),
    ] {
        cx.document_mut().set_bounds(toggle, anchor);
        cx.show(toggle)?;
        let doc = cx.document();
        println!(
            "{label:>12}: anchor {anchor:?} -> menu {:?} [{}]",
            doc.bounds(menu).unwrap_or_default(),
            doc.attr(menu, PLACEMENT_ATTR).unwrap_or("none"),
        );
        cx.hide(toggle)?;
    }

    // After closing, the menu is back where the host put it.
    println!("closed: menu {:?}", cx.document().bounds(menu).unwrap_or_default());
    Ok(())
}
