// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: node identifiers, flags, and element data.

use alloc::string::{String, ToString};

use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

/// Identifier for an element in the document (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags for state that is not expressed through classes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is rendered (participates in keyboard navigation candidates).
        const VISIBLE   = 0b0000_0001;
        /// Element carries the native `disabled` state.
        const DISABLED  = 0b0000_0010;
        /// Element can receive focus.
        const FOCUSABLE = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::FOCUSABLE
    }
}

/// Class list storage; most elements carry only a handful of classes.
pub(crate) type ClassList = SmallVec<[String; 4]>;

/// Data for a single element.
///
/// Use the `with_*` builders to describe an element before inserting it with
/// [`Document::insert`](crate::Document::insert).
#[derive(Clone, Debug)]
pub struct Element {
    /// Lowercase tag name (for example `button`, `div`, `input`).
    pub tag: String,
    pub(crate) classes: ClassList,
    pub(crate) attributes: HashMap<String, String>,
    /// World-space bounds. The document does not perform layout; hosts set these.
    pub bounds: Rect,
    /// State flags.
    pub flags: ElementFlags,
}

impl Element {
    /// Create an element with the given tag and default flags.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: ClassList::new(),
            attributes: HashMap::new(),
            bounds: Rect::ZERO,
            flags: ElementFlags::default(),
        }
    }

    /// Add one or more whitespace-separated classes.
    #[must_use]
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_ascii_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    /// Set world-space bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replace the state flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns true if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterate over the class list in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}
