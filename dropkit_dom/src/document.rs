// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, queries, class/attribute mutation, focus.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;

use crate::selector::Selector;
use crate::types::{Element, ElementFlags, NodeId};

/// An element tree with a fixed `html` root and `body` child.
///
/// Every inserted element lives below the root. Identifiers are generational, so a
/// [`NodeId`] held across a [`Document::remove`] becomes stale rather than aliasing a
/// later element; all accessors return `None` (or do nothing) for stale identifiers.
///
/// ## Example
///
/// ```rust
/// use dropkit_dom::{Document, Element, Selector};
///
/// let mut doc = Document::new();
/// let group = doc.insert(doc.body(), Element::new("div").with_class("dropdown"));
/// let toggle = doc.insert(group, Element::new("button").with_attr("data-toggle", "dropdown"));
///
/// assert_eq!(doc.closest(toggle, &Selector::class("dropdown")), Some(group));
/// assert!(doc.contains(group, toggle));
/// ```
pub struct Document {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    body: NodeId,
    active: Option<NodeId>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        }
    }
}

impl Document {
    /// Create a document with an empty viewport.
    pub fn new() -> Self {
        Self::with_viewport(Rect::ZERO)
    }

    /// Create a document whose root bounds (the viewport) are `viewport`.
    ///
    /// The body shares the viewport bounds.
    pub fn with_viewport(viewport: Rect) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            body: NodeId::new(0, 1),
            active: None,
        };
        let root = doc.alloc(Element::new("html").with_bounds(viewport));
        let body = doc.alloc(Element::new("body").with_bounds(viewport));
        doc.root = root;
        doc.body = body;
        doc.link_parent(body, root);
        doc
    }

    /// The root (`html`) element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// The viewport, i.e. the bounds of the root element.
    pub fn viewport(&self) -> Rect {
        self.node(self.root).element.bounds
    }

    /// Insert a new element as the last child of `parent`.
    ///
    /// If `parent` is stale the element is attached to the body instead.
    pub fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        let parent = if self.is_alive(parent) {
            parent
        } else {
            self.body
        };
        let id = self.alloc(element);
        self.link_parent(id, parent);
        id
    }

    /// Remove an element and its subtree.
    ///
    /// The root and body cannot be removed. If the active element is inside the
    /// removed subtree, focus is cleared.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root || id == self.body {
            return;
        }
        if self.active.is_some_and(|a| self.contains(id, a)) {
            self.active = None;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.free_subtree(id);
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// generation currently stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Returns the element data for a live identifier.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Returns the lowercase tag name of a live element.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Returns the parent of an element, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of an element, or an empty slice if the id is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Iterate over the proper ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent_of(id),
        }
    }

    /// Iterate over the descendants of `scope` in document (depth-first) order.
    ///
    /// `scope` itself is not yielded.
    pub fn descendants(&self, scope: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            scope,
            next: self.children_of(scope).first().copied(),
        }
    }

    /// Get the next element in depth-first traversal order.
    ///
    /// Returns `None` if no next element exists or if the id is stale.
    /// This is a standard tree traversal that does not wrap around.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        self.next_in_order(current, None)
    }

    /// Get the previous element in reverse depth-first traversal order.
    ///
    /// Returns `None` if no previous element exists or if the id is stale.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        match self.prev_sibling(current) {
            Some(prev) => Some(self.last_in_subtree(prev)),
            None => self.parent_of(current),
        }
    }

    /// Returns true if `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Returns true if the element matches `selector`.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        match selector {
            Selector::Descendant { ancestor, subject } => {
                self.matches(id, subject) && self.ancestors(id).any(|a| self.matches(a, ancestor))
            }
            other => other.matches_element(element),
        }
    }

    /// The nearest element, starting with `id` itself, that matches `selector`.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        core::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.matches(n, selector))
    }

    /// The first descendant of `scope` (document order) that matches `selector`.
    pub fn find_one(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope).find(|&n| self.matches(n, selector))
    }

    /// All descendants of `scope` that match `selector`, in document order.
    pub fn find_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| self.matches(n, selector))
            .collect()
    }

    /// The first element in the whole document that matches `selector`.
    pub fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.find_one(self.root, selector)
    }

    /// Returns true if the element's class list contains `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add `class` if it is not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id)
            && !e.has_class(class)
        {
            e.classes.push(class.to_string());
        }
    }

    /// Remove `class` if present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            e.classes.retain(|c| c != class);
        }
    }

    /// Toggle `class`; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.is_alive(id)
        }
    }

    /// Returns an attribute value.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attributes.remove(name);
        }
    }

    /// Returns the raw value of the `data-<key>` attribute.
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        let name: String = format!("data-{key}");
        self.attr(id, &name)
    }

    /// Returns the flags of a live element.
    pub fn flags(&self, id: NodeId) -> Option<ElementFlags> {
        self.element(id).map(|e| e.flags)
    }

    /// Replace the flags of a live element.
    ///
    /// Disabling or hiding the active element clears focus.
    pub fn set_flags(&mut self, id: NodeId, flags: ElementFlags) {
        if let Some(e) = self.element_mut(id) {
            e.flags = flags;
        }
        if self.active == Some(id) && !self.is_focusable(id) {
            self.active = None;
        }
    }

    /// Returns the world-space bounds of a live element.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.element(id).map(|e| e.bounds)
    }

    /// Update world-space bounds.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(e) = self.element_mut(id) {
            e.bounds = bounds;
        }
    }

    /// Returns true if the element can currently take focus.
    ///
    /// Focusable elements carry [`ElementFlags::FOCUSABLE`] and [`ElementFlags::VISIBLE`]
    /// and not [`ElementFlags::DISABLED`].
    pub fn is_focusable(&self, id: NodeId) -> bool {
        self.flags(id).is_some_and(|f| {
            f.contains(ElementFlags::FOCUSABLE | ElementFlags::VISIBLE)
                && !f.contains(ElementFlags::DISABLED)
        })
    }

    /// Move focus to `id`. Returns false (and leaves focus unchanged) when the
    /// element cannot take focus.
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// The focused element, if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    // --- internals ---

    fn alloc(&mut self, element: Element) -> NodeId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "element slots are indexed with u32"
            )]
            NodeId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "element slots are indexed with u32"
            )]
            NodeId::new((self.nodes.len() - 1) as u32, generation)
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Access a live node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(&mut n.element)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Depth-first successor of `current`, never leaving the subtree of `boundary`.
    fn next_in_order(&self, current: NodeId, boundary: Option<NodeId>) -> Option<NodeId> {
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        loop {
            if Some(node) == boundary {
                return None;
            }
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = self.parent_of(node)?;
        }
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = &self.node(self.parent_of(node)?).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = &self.node(self.parent_of(node)?).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    fn last_in_subtree(&self, node: NodeId) -> NodeId {
        let mut node = node;
        while let Some(&last) = self.node(node).children.last() {
            node = last;
        }
        node
    }
}

/// Iterator over proper ancestors, nearest first. See [`Document::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent_of(current);
        Some(current)
    }
}

/// Depth-first iterator over a subtree. See [`Document::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    scope: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.next_in_order(current, Some(self.scope));
        Some(current)
    }
}
