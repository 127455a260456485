// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deliberately small selector language.
//!
//! Supported forms: `tag`, `#id`, `.class`, `[attr]`, `[attr="value"]`, and a
//! whitespace-separated descendant chain of those (for example `.dropdown form`).
//! Compound selectors such as `a.item` and pseudo-classes are not supported;
//! [`Selector::parse`] returns `None` for them.

use alloc::boxed::Box;
use alloc::string::{String, ToString};

use crate::types::Element;

/// A parsed selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Matches the tag name (ASCII case-insensitive).
    Tag(String),
    /// Matches the `id` attribute.
    Id(String),
    /// Matches an entry in the class list.
    Class(String),
    /// Matches an attribute by presence, or by exact value when `value` is set.
    Attribute {
        /// Attribute name.
        name: String,
        /// Required value, if any.
        value: Option<String>,
    },
    /// Matches `subject` when some proper ancestor matches `ancestor`.
    Descendant {
        /// Selector applied to an ancestor.
        ancestor: Box<Selector>,
        /// Selector applied to the element itself.
        subject: Box<Selector>,
    },
}

impl Selector {
    /// Shorthand for [`Selector::Class`].
    pub fn class(class: &str) -> Self {
        Self::Class(class.to_string())
    }

    /// Shorthand for [`Selector::Tag`].
    pub fn tag(tag: &str) -> Self {
        Self::Tag(tag.to_ascii_lowercase())
    }

    /// Shorthand for an attribute selector with an exact value.
    pub fn attr_eq(name: &str, value: &str) -> Self {
        Self::Attribute {
            name: name.to_string(),
            value: Some(value.to_string()),
        }
    }

    /// Parse a selector string.
    ///
    /// ```
    /// use dropkit_dom::Selector;
    ///
    /// assert_eq!(Selector::parse("#menu"), Some(Selector::Id("menu".into())));
    /// assert_eq!(
    ///     Selector::parse("[data-toggle=\"dropdown\"]"),
    ///     Some(Selector::attr_eq("data-toggle", "dropdown")),
    /// );
    /// assert!(Selector::parse("#").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split_ascii_whitespace();
        let mut selector = parse_simple(parts.next()?)?;
        for part in parts {
            selector = Self::Descendant {
                ancestor: Box::new(selector),
                subject: Box::new(parse_simple(part)?),
            };
        }
        Some(selector)
    }

    /// Match the parts of this selector that only need the element itself.
    ///
    /// Descendant selectors need ancestry and are resolved by
    /// [`Document::matches`](crate::Document::matches); here they only check the subject.
    pub fn matches_element(&self, element: &Element) -> bool {
        match self {
            Self::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Self::Id(id) => element.attr("id") == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute { name, value } => match (element.attr(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
            Self::Descendant { subject, .. } => subject.matches_element(element),
        }
    }
}

fn parse_simple(part: &str) -> Option<Selector> {
    if let Some(id) = part.strip_prefix('#') {
        return is_ident(id).then(|| Selector::Id(id.to_string()));
    }
    if let Some(class) = part.strip_prefix('.') {
        return is_ident(class).then(|| Selector::Class(class.to_string()));
    }
    if let Some(inner) = part.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        return match inner.split_once('=') {
            Some((name, value)) => {
                let value = unquote(value)?;
                is_ident(name).then(|| Selector::attr_eq(name, value))
            }
            None => is_ident(inner).then(|| Selector::Attribute {
                name: inner.to_string(),
                value: None,
            }),
        };
    }
    is_ident(part).then(|| Selector::tag(part))
}

fn unquote(value: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if let Some(rest) = value.strip_prefix(quote) {
            return rest.strip_suffix(quote);
        }
    }
    Some(value)
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
