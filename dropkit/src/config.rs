// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown configuration: defaults, declarative `data-*` attributes, and programmatic options.
//!
//! A [`Config`] is produced by a three-stage merge (defaults, then the host's `data-offset` /
//! `data-flip` attributes, then caller [`Options`]; later stages win) followed by a type check
//! against a fixed schema.
//!
//! ```
//! use dropkit::{Config, Offset, Options};
//! use dropkit_dom::{Document, Element};
//!
//! let mut doc = Document::new();
//! let toggle = doc.insert(
//!     doc.body(),
//!     Element::new("button").with_attr("data-offset", "4").with_attr("data-flip", "false"),
//! );
//!
//! let config = Config::resolve(&doc, toggle, Some(&Options::new().offset_expr("0, 8")))?;
//! assert_eq!(config.offset, Offset::Expr("0, 8".into()));
//! assert!(!config.flip);
//! # Ok::<(), dropkit::Error>(())
//! ```

use std::fmt;
use std::rc::Rc;

use dropkit_dom::{Document, NodeId};
use dropkit_placement::{Offsets, OffsetsPatch};
use hashbrown::HashMap;

use crate::error::{Error, Result};

/// Names of the options in the schema, in check order.
const SCHEMA: [(&str, &[&str]); 2] = [
    ("offset", &["number", "string", "function"]),
    ("flip", &["boolean"]),
];

/// Accepted type names for `option`, joined for error messages.
fn expected_types(option: &str) -> &'static str {
    match option {
        "offset" => "(number|string|function)",
        _ => "boolean",
    }
}

/// A callback computing an offsets patch from the current offsets.
#[derive(Clone)]
pub struct OffsetFn(Rc<dyn Fn(&Offsets) -> OffsetsPatch>);

impl OffsetFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Offsets) -> OffsetsPatch + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, offsets: &Offsets) -> OffsetsPatch {
        (self.0)(offsets)
    }
}

impl fmt::Debug for OffsetFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OffsetFn(..)")
    }
}

impl PartialEq for OffsetFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A loosely typed option value, as read from attributes or passed by callers.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// `true` / `false`.
    Bool(bool),
    /// A finite number.
    Number(f64),
    /// Any other text.
    Str(String),
    /// A callback.
    Func(OffsetFn),
    /// The literal `null`.
    Null,
}

impl OptionValue {
    /// Type name used in configuration errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Func(_) => "function",
            Self::Null => "null",
        }
    }

    /// Normalize a raw `data-*` attribute value.
    ///
    /// `"true"`/`"false"` become booleans, `"null"` becomes [`OptionValue::Null`], a string
    /// that parses entirely as a finite number becomes a number, anything else stays text.
    pub fn from_data(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            "null" => Self::Null,
            _ => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() && raw.trim() == raw => Self::Number(n),
                _ => Self::Str(raw.to_owned()),
            },
        }
    }
}

/// Caller-supplied options, applied last in the merge.
#[derive(Clone, Debug, Default)]
pub struct Options {
    entries: Vec<(String, OptionValue)>,
}

impl Options {
    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a numeric offset.
    #[must_use]
    pub fn offset(self, px: f64) -> Self {
        self.set("offset", OptionValue::Number(px))
    }

    /// Set an offset expression such as `"0, 8px"`.
    #[must_use]
    pub fn offset_expr(self, expr: &str) -> Self {
        self.set("offset", OptionValue::Str(expr.to_owned()))
    }

    /// Set a computed offset.
    #[must_use]
    pub fn offset_fn(self, f: impl Fn(&Offsets) -> OffsetsPatch + 'static) -> Self {
        self.set("offset", OptionValue::Func(OffsetFn::new(f)))
    }

    /// Enable or disable flipping.
    #[must_use]
    pub fn flip(self, flip: bool) -> Self {
        self.set("flip", OptionValue::Bool(flip))
    }

    /// Set any option by name. Names outside the schema fail at resolve time.
    #[must_use]
    pub fn set(mut self, name: &str, value: OptionValue) -> Self {
        self.entries.push((name.to_owned(), value));
        self
    }
}

/// How the menu is shifted relative to its computed position.
#[derive(Clone, Debug, PartialEq)]
pub enum Offset {
    /// Pixels along the cross axis.
    Number(f64),
    /// An offset expression, parsed by the positioning engine.
    Expr(String),
    /// A callback returning an offsets patch.
    Computed(OffsetFn),
}

/// Validated dropdown configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Menu offset.
    pub offset: Offset,
    /// Whether the menu may flip to the other side of its anchor.
    pub flip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offset: Offset::Number(0.0),
            flip: true,
        }
    }
}

impl Config {
    /// Merge defaults, the host's declarative attributes, and `options`, then type-check.
    pub fn resolve(doc: &Document, host: NodeId, options: Option<&Options>) -> Result<Self> {
        let mut merged: HashMap<String, OptionValue> = HashMap::new();
        merged.insert("offset".into(), OptionValue::Number(0.0));
        merged.insert("flip".into(), OptionValue::Bool(true));

        for (name, _) in SCHEMA {
            if let Some(raw) = doc.data(host, name) {
                merged.insert(name.to_owned(), OptionValue::from_data(raw));
            }
        }

        for (name, value) in options.map(|o| o.entries.as_slice()).unwrap_or_default() {
            if !SCHEMA.iter().any(|(known, _)| known == name) {
                return Err(Error::UnknownOption {
                    option: name.clone(),
                });
            }
            merged.insert(name.clone(), value.clone());
        }

        for (name, accepted) in SCHEMA {
            if let Some(value) = merged.get(name)
                && !accepted.contains(&value.type_name())
            {
                return Err(Error::ConfigType {
                    option: name.to_owned(),
                    actual: value.type_name(),
                    expected: expected_types(name),
                });
            }
        }

        let offset = match merged.remove("offset") {
            Some(OptionValue::Number(n)) => Offset::Number(n),
            Some(OptionValue::Str(s)) => Offset::Expr(s),
            Some(OptionValue::Func(f)) => Offset::Computed(f),
            _ => Offset::Number(0.0),
        };
        let flip = !matches!(merged.get("flip"), Some(OptionValue::Bool(false)));
        Ok(Self { offset, flip })
    }
}
