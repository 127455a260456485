// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared page fixture and a recording positioning engine for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use dropkit_dom::{Document, Element, ElementFlags, NodeId};
use dropkit_placement::Placement;
use kurbo::Rect;
use tracing_subscriber::EnvFilter;

use crate::context::DropdownContext;
use crate::positioning::{PositionConfig, Positioner, PositioningEngine};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// One `attach` call seen by [`RecordingEngine`].
#[derive(Clone, Debug)]
pub(crate) struct Call {
    pub(crate) anchor: NodeId,
    pub(crate) floating: NodeId,
    pub(crate) config: PositionConfig,
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<Call>,
    updated: usize,
    destroyed: usize,
}

/// Engine that records calls instead of computing geometry. Clones share state.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingEngine {
    state: Rc<RefCell<Recorded>>,
}

impl RecordingEngine {
    pub(crate) fn attached(&self) -> usize {
        self.state.borrow().calls.len()
    }

    pub(crate) fn updated(&self) -> usize {
        self.state.borrow().updated
    }

    pub(crate) fn destroyed(&self) -> usize {
        self.state.borrow().destroyed
    }

    pub(crate) fn last_call(&self) -> Option<Call> {
        self.state.borrow().calls.last().cloned()
    }
}

impl PositioningEngine for RecordingEngine {
    fn attach(
        &self,
        _doc: &mut Document,
        anchor: NodeId,
        floating: NodeId,
        config: PositionConfig,
    ) -> Box<dyn Positioner> {
        let placement = config.placement;
        self.state.borrow_mut().calls.push(Call {
            anchor,
            floating,
            config,
        });
        Box::new(RecordingPositioner {
            state: Rc::clone(&self.state),
            placement,
        })
    }
}

#[derive(Debug)]
struct RecordingPositioner {
    state: Rc<RefCell<Recorded>>,
    placement: Placement,
}

impl Positioner for RecordingPositioner {
    fn update(&mut self, _doc: &mut Document) {
        self.state.borrow_mut().updated += 1;
    }

    fn destroy(&mut self, _doc: &mut Document) {
        self.state.borrow_mut().destroyed += 1;
    }

    fn placement(&self) -> Placement {
        self.placement
    }
}

/// Two dropdowns and an unrelated paragraph:
///
/// ```text
/// body
///   div.dropdown            first_group
///     button[data-toggle]   first
///     div.dropdown-menu     first_menu
///       a.dropdown-item     items[0]
///       a.dropdown-item     items[1] (.disabled)
///       a.dropdown-item     items[2]
///       input               input
///       form > button       form_button
///   div.dropdown            second_group
///     button[data-toggle]   second
///     div.dropdown-menu     second_menu
///       a.dropdown-item     second_item
///   p                       outside
/// ```
pub(crate) struct Fixture {
    pub(crate) cx: DropdownContext,
    pub(crate) engine: RecordingEngine,
    pub(crate) first: NodeId,
    pub(crate) second: NodeId,
    pub(crate) first_group: NodeId,
    pub(crate) second_group: NodeId,
    pub(crate) first_menu: NodeId,
    pub(crate) second_menu: NodeId,
    pub(crate) items: [NodeId; 3],
    pub(crate) second_item: NodeId,
    pub(crate) input: NodeId,
    pub(crate) form_button: NodeId,
    pub(crate) outside: NodeId,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::build(RecordingEngine::default(), false)
    }

    pub(crate) fn with_touch() -> Self {
        Self::build(RecordingEngine::default(), true)
    }

    pub(crate) fn with_engine(engine: RecordingEngine) -> Self {
        Self::build(engine, false)
    }

    fn build(engine: RecordingEngine, touch: bool) -> Self {
        init_tracing();
        let mut doc = Document::with_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
        let body = doc.body();

        let toggle = |label: &str| {
            Element::new("button")
                .with_attr("data-toggle", "dropdown")
                .with_attr("aria-expanded", "false")
                .with_id(label)
        };
        let item = || Element::new("a").with_class("dropdown-item");

        let first_group = doc.insert(body, Element::new("div").with_class("dropdown"));
        let first = doc.insert(
            first_group,
            toggle("first").with_bounds(Rect::new(10.0, 10.0, 90.0, 40.0)),
        );
        let first_menu = doc.insert(
            first_group,
            Element::new("div")
                .with_class("dropdown-menu")
                .with_bounds(Rect::new(0.0, 0.0, 160.0, 120.0)),
        );
        let items = [
            doc.insert(first_menu, item()),
            doc.insert(first_menu, item().with_class("disabled")),
            doc.insert(first_menu, item()),
        ];
        let input = doc.insert(first_menu, Element::new("input"));
        let form = doc.insert(first_menu, Element::new("form"));
        let form_button = doc.insert(form, Element::new("button"));

        let second_group = doc.insert(body, Element::new("div").with_class("dropdown"));
        let second = doc.insert(
            second_group,
            toggle("second").with_bounds(Rect::new(200.0, 10.0, 280.0, 40.0)),
        );
        let second_menu = doc.insert(
            second_group,
            Element::new("div")
                .with_class("dropdown-menu")
                .with_bounds(Rect::new(0.0, 0.0, 160.0, 40.0)),
        );
        let second_item = doc.insert(second_menu, item());

        let outside = doc.insert(
            body,
            Element::new("p").with_flags(ElementFlags::VISIBLE),
        );

        let cx = DropdownContext::builder(doc)
            .engine(engine.clone())
            .touch(touch)
            .build()
            .expect("engine is set");

        Self {
            cx,
            engine,
            first,
            second,
            first_group,
            second_group,
            first_menu,
            second_menu,
            items,
            second_item,
            input,
            form_button,
            outside,
        }
    }
}
