// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard handling for toggles and open menus.

use dropkit_dom::{ElementFlags, NodeId, Selector};
use dropkit_focus::{FocusEntry, FocusPolicy, FocusSpace, MenuPolicy, Navigation};

use crate::context::DropdownContext;
use crate::dismiss::is_text_entry;
use crate::dropdown::{CLASS_DISABLED, CLASS_SHOW, container_of, is_disabled, toggle_selector};
use crate::error::Result;
use crate::event::{InputEvent, Key};

/// `.dropdown-menu .dropdown-item`
fn item_selector() -> Selector {
    Selector::Descendant {
        ancestor: Box::new(Selector::class("dropdown-menu")),
        subject: Box::new(Selector::class("dropdown-item")),
    }
}

impl DropdownContext {
    /// Keydown on a toggle or menu (`delegate`).
    pub(crate) fn handle_keydown(&mut self, delegate: NodeId, event: &mut InputEvent) -> Result<()> {
        let Some(key) = event.key else {
            return Ok(());
        };
        if !matches!(key, Key::ArrowUp | Key::ArrowDown | Key::Escape) {
            return Ok(());
        }
        let on_button = self
            .document
            .tag_name(event.target)
            .is_some_and(|t| t.contains("button"));
        if (on_button && key == Key::Space) || is_text_entry(&self.document, event.target) {
            return Ok(());
        }

        event.prevent_default();
        event.stop_propagation();

        if is_disabled(&self.document, delegate) {
            return Ok(());
        }

        let container = container_of(&self.document, delegate);
        let is_active = self.document.has_class(container, CLASS_SHOW);

        #[allow(
            clippy::nonminimal_bool,
            clippy::overly_complex_bool_expr,
            reason = "the left disjunct is always true for a closed dropdown"
        )]
        let activate = (!is_active && (key != Key::Escape || key != Key::Space))
            || (is_active && (key == Key::Escape || key == Key::Space));

        if activate {
            if key == Key::Escape
                && let Some(toggle) = self.document.find_one(container, &toggle_selector())
            {
                self.document.focus(toggle);
            }
            let mut click = InputEvent::click(delegate);
            return self.dispatch(&mut click);
        }

        let items = self.document.find_all(container, &item_selector());
        let entries: Vec<FocusEntry<NodeId>> = items
            .iter()
            .enumerate()
            .map(|(i, &item)| {
                let mut entry = FocusEntry::new(item, self.document.bounds(item).unwrap_or_default())
                    .with_order(i32::try_from(i).unwrap_or(i32::MAX));
                entry.enabled = self.item_enabled(item);
                entry
            })
            .collect();
        let direction = match key {
            Key::ArrowUp => Navigation::Up,
            Key::ArrowDown => Navigation::Down,
            _ => return Ok(()),
        };
        let space = FocusSpace { nodes: &entries };
        if let Some(next) = MenuPolicy::default().next(Some(event.target), direction, &space) {
            self.document.focus(next);
        }
        Ok(())
    }

    fn item_enabled(&self, item: NodeId) -> bool {
        !self.document.has_class(item, CLASS_DISABLED)
            && self.document.flags(item).is_some_and(|f| {
                f.contains(ElementFlags::VISIBLE) && !f.contains(ElementFlags::DISABLED)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LifecycleKind;
    use crate::testing::Fixture;

    fn open(f: &mut Fixture) {
        f.cx.click(f.first).unwrap();
        assert!(f.cx.is_open(f.first));
    }

    #[test]
    fn arrows_skip_disabled_items_and_clamp() {
        let mut f = Fixture::new();
        open(&mut f);
        let [a, _b, c] = f.items;

        f.cx.document_mut().focus(a);
        let ev = f.cx.key_down(a, Key::ArrowDown).unwrap();
        assert!(ev.is_default_prevented());
        assert_eq!(f.cx.document().active_element(), Some(c));

        f.cx.key_down(c, Key::ArrowDown).unwrap();
        assert_eq!(f.cx.document().active_element(), Some(c));

        f.cx.key_down(c, Key::ArrowUp).unwrap();
        assert_eq!(f.cx.document().active_element(), Some(a));

        f.cx.key_down(a, Key::ArrowUp).unwrap();
        assert_eq!(f.cx.document().active_element(), Some(a));
    }

    #[test]
    fn arrow_from_toggle_enters_the_menu() {
        let mut f = Fixture::new();
        open(&mut f);
        f.cx.key_down(f.first, Key::ArrowUp).unwrap();
        assert_eq!(f.cx.document().active_element(), Some(f.items[0]));
    }

    #[test]
    fn arrow_down_on_closed_toggle_opens() {
        let mut f = Fixture::new();
        f.cx.key_down(f.first, Key::ArrowDown).unwrap();
        assert!(f.cx.is_open(f.first));
    }

    #[test]
    fn escape_closes_and_refocuses_toggle() {
        let mut f = Fixture::new();
        open(&mut f);
        f.cx.document_mut().focus(f.items[2]);
        f.cx.key_down(f.items[2], Key::Escape).unwrap();
        assert!(!f.cx.is_open(f.first));
        assert_eq!(f.cx.document().active_element(), Some(f.first));
    }

    #[test]
    fn escape_on_closed_toggle_opens() {
        let mut f = Fixture::new();
        let ev = f.cx.key_down(f.first, Key::Escape).unwrap();
        assert!(ev.is_default_prevented());
        assert!(f.cx.is_open(f.first), "Escape on a closed toggle takes the toggle branch");
        assert_eq!(f.cx.document().active_element(), Some(f.first));
    }

    #[test]
    fn escape_on_open_toggle_closes() {
        let mut f = Fixture::new();
        open(&mut f);
        f.cx.key_down(f.first, Key::Escape).unwrap();
        assert!(!f.cx.is_open(f.first));
    }

    #[test]
    fn ignored_keys_and_targets() {
        let mut f = Fixture::new();
        open(&mut f);
        let ev = f.cx.key_down(f.items[0], Key::Enter).unwrap();
        assert!(!ev.is_default_prevented());
        let ev = f.cx.key_down(f.first, Key::Space).unwrap();
        assert!(!ev.is_default_prevented());
        let ev = f.cx.key_down(f.input, Key::ArrowDown).unwrap();
        assert!(!ev.is_default_prevented());
        assert!(f.cx.is_open(f.first));
    }

    #[test]
    fn disabled_delegate_swallows_the_key() {
        let mut f = Fixture::new();
        f.cx.document_mut().add_class(f.first, CLASS_DISABLED);
        let ev = f.cx.key_down(f.first, Key::ArrowDown).unwrap();
        assert!(ev.is_default_prevented());
        assert!(!f.cx.is_open(f.first));
    }

    #[test]
    fn no_enabled_items_leaves_focus() {
        let mut f = Fixture::new();
        f.cx.click(f.second).unwrap();
        let only = f.second_item;
        f.cx.document_mut().add_class(only, CLASS_DISABLED);
        f.cx.key_down(f.second, Key::ArrowDown).unwrap();
        assert_eq!(f.cx.document().active_element(), Some(f.second));
    }

    #[test]
    fn hidden_items_are_skipped() {
        let mut f = Fixture::new();
        open(&mut f);
        let [a, b, c] = f.items;
        f.cx.document_mut().remove_class(b, CLASS_DISABLED);
        f.cx.document_mut().set_flags(b, ElementFlags::FOCUSABLE);
        f.cx.key_down(a, Key::ArrowDown).unwrap();
        assert_eq!(f.cx.document().active_element(), Some(c));
    }

    #[test]
    fn escape_honors_hide_veto() {
        let mut f = Fixture::new();
        open(&mut f);
        f.cx.on_lifecycle(f.first_group, LifecycleKind::Hide, |e| e.prevent_default());
        f.cx.key_down(f.items[0], Key::Escape).unwrap();
        assert!(f.cx.is_open(f.first));
    }
}
