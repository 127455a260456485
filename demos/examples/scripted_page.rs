// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted session on a page with two dropdowns.
//!
//! This example shows:
//! - opening and closing through clicks on toggles and on the page,
//! - keyboard navigation that skips disabled items,
//! - a `hide.bs.dropdown` listener that vetoes closing while a flag is set.
//!
//! Run:
//! - `cargo run -p dropkit_demos --example scripted_page`
//! - `RUST_LOG=dropkit=debug cargo run -p dropkit_demos --example scripted_page`

use std::cell::Cell;
use std::rc::Rc;

use dropkit::{DropdownContext, Key, LifecycleKind};
use dropkit_dom::{Document, Element, NodeId};
use kurbo::Rect;
use tracing_subscriber::EnvFilter;

fn dropdown(doc: &mut Document, label: &str, items: &[(&str, bool)]) -> (NodeId, Vec<NodeId>) {
    let body = doc.body();
    let group = doc.insert(body, Element::new("div").with_class("dropdown"));
    let toggle = doc.insert(
        group,
        Element::new("button")
            .with_id(label)
            .with_attr("data-toggle", "dropdown")
            .with_attr("aria-expanded", "false"),
    );
    let menu = doc.insert(group, Element::new("div").with_class("dropdown-menu"));
    let items = items
        .iter()
        .map(|&(text, disabled)| {
            let mut item = Element::new("a")
                .with_class("dropdown-item")
                .with_attr("title", text);
            if disabled {
                item = item.with_class("disabled");
            }
            doc.insert(menu, item)
        })
        .collect();
    (toggle, items)
}

fn describe(cx: &DropdownContext, toggles: &[(&str, NodeId)]) {
    let open: Vec<&str> = toggles
        .iter()
        .filter(|&&(_, t)| cx.is_open(t))
        .map(|&(name, _)| name)
        .collect();
    let focused = cx
        .document()
        .active_element()
        .and_then(|id| cx.document().attr(id, "title").or_else(|| cx.document().attr(id, "id")));
    println!("  open: {open:?}, focus: {focused:?}");
}

fn main() -> Result<(), dropkit::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::with_viewport(Rect::new(0.0, 0.0, 1024.0, 768.0));
    let (file, file_items) = dropdown(
        &mut doc,
        "file",
        &[("New", false), ("Open", false), ("Recent", true), ("Quit", false)],
    );
    let (edit, _) = dropdown(&mut doc, "edit", &[("Undo", false), ("Redo", false)]);
    let body = doc.body();
    let page = doc.insert(body, Element::new("main"));

    let mut cx = DropdownContext::new(doc);
    let toggles = [("file", file), ("edit", edit)];

    let pinned = Rc::new(Cell::new(false));
    let flag = Rc::clone(&pinned);
    let file_group = cx.document().parent_of(file).unwrap_or(body);
    cx.on_lifecycle(file_group, LifecycleKind::Hide, move |e| {
        if flag.get() {
            println!("  ({} vetoed)", e.kind.name());
            e.prevent_default();
        }
    });

    println!("click file");
    cx.click(file)?;
    describe(&cx, &toggles);

    println!("click edit (closes file first)");
    cx.click(edit)?;
    describe(&cx, &toggles);

    println!("click page");
    cx.click(page)?;
    describe(&cx, &toggles);

    println!("ArrowDown on file, then walk the menu");
    cx.key_down(file, Key::ArrowDown)?;
    cx.key_down(file, Key::ArrowDown)?;
    describe(&cx, &toggles);
    for _ in 0..2 {
        let at = cx.document().active_element().unwrap_or(file_items[0]);
        cx.key_down(at, Key::ArrowDown)?;
        describe(&cx, &toggles);
    }

    println!("pin file open and click page");
    pinned.set(true);
    cx.click(page)?;
    describe(&cx, &toggles);

    println!("unpin and press Escape");
    pinned.set(false);
    let at = cx.document().active_element().unwrap_or(file);
    cx.key_down(at, Key::Escape)?;
    describe(&cx, &toggles);

    cx.shutdown();
    Ok(())
}
