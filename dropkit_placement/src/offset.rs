// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offsets and offset expressions.

use core::fmt;

use kurbo::{Rect, Vec2};

use crate::placement::Placement;

/// Current boxes of the floating element (`popper`) and its reference.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Offsets {
    /// Floating box.
    pub popper: Rect,
    /// Reference box.
    pub reference: Rect,
}

impl Offsets {
    /// Merge a patch; fields left `None` keep their current value.
    #[must_use]
    pub fn merge(self, patch: OffsetsPatch) -> Self {
        Self {
            popper: patch.popper.unwrap_or(self.popper),
            reference: patch.reference.unwrap_or(self.reference),
        }
    }
}

/// Partial replacement for [`Offsets`], as returned by offset functions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OffsetsPatch {
    /// Replacement floating box.
    pub popper: Option<Rect>,
    /// Replacement reference box.
    pub reference: Option<Rect>,
}

/// Unit of one offset part.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Absolute pixels.
    Px,
    /// Percent of the reference size along the part's axis (`%` or `%r`).
    Reference,
    /// Percent of the floating box size along the part's axis (`%p`).
    Popper,
}

/// One number with its unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OffsetPart {
    /// Magnitude.
    pub value: f64,
    /// Unit.
    pub unit: Unit,
}

/// A parsed offset expression such as `10`, `"0, 8px"` or `"-50%p 4"`.
///
/// The first part shifts along the cross axis (horizontally for top/bottom
/// placements); the optional second part pushes away from the reference.
///
/// ```
/// use dropkit_placement::{OffsetExpr, Unit};
///
/// let expr = OffsetExpr::parse("10%, 4px").unwrap();
/// assert_eq!(expr.cross.unit, Unit::Reference);
/// assert_eq!(expr.main.map(|p| p.value), Some(4.0));
/// assert!(OffsetExpr::parse("ten").is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OffsetExpr {
    /// Cross-axis part.
    pub cross: OffsetPart,
    /// Main-axis part, if given.
    pub main: Option<OffsetPart>,
}

/// Error returned by [`OffsetExpr::parse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseOffsetError;

impl fmt::Display for ParseOffsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("offset expression must be one or two numbers with an optional px, %, %r or %p unit")
    }
}

impl core::error::Error for ParseOffsetError {}

impl OffsetExpr {
    /// A pure cross-axis pixel shift.
    pub const fn px(value: f64) -> Self {
        Self {
            cross: OffsetPart {
                value,
                unit: Unit::Px,
            },
            main: None,
        }
    }

    /// Parse one or two comma- or whitespace-separated parts.
    pub fn parse(input: &str) -> Result<Self, ParseOffsetError> {
        let mut parts = input
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|s| !s.is_empty());
        let cross = parse_part(parts.next().ok_or(ParseOffsetError)?)?;
        let main = parts.next().map(parse_part).transpose()?;
        if parts.next().is_some() {
            return Err(ParseOffsetError);
        }
        Ok(Self { cross, main })
    }

    /// Shift the floating box of `offsets` for `placement`.
    #[must_use]
    pub fn apply(&self, placement: Placement, offsets: Offsets) -> Offsets {
        let cross = resolve(self.cross, offsets.reference.width(), offsets.popper.width());
        let main = self.main.map_or(0.0, |p| {
            resolve(p, offsets.reference.height(), offsets.popper.height())
        });
        let main = if placement.is_top() { -main } else { main };
        Offsets {
            popper: offsets.popper + Vec2::new(cross, main),
            reference: offsets.reference,
        }
    }
}

fn resolve(part: OffsetPart, reference_len: f64, popper_len: f64) -> f64 {
    match part.unit {
        Unit::Px => part.value,
        Unit::Reference => reference_len * part.value / 100.0,
        Unit::Popper => popper_len * part.value / 100.0,
    }
}

fn parse_part(s: &str) -> Result<OffsetPart, ParseOffsetError> {
    let (number, unit) = if let Some(n) = s.strip_suffix("%p") {
        (n, Unit::Popper)
    } else if let Some(n) = s.strip_suffix("%r") {
        (n, Unit::Reference)
    } else if let Some(n) = s.strip_suffix('%') {
        (n, Unit::Reference)
    } else if let Some(n) = s.strip_suffix("px") {
        (n, Unit::Px)
    } else {
        (s, Unit::Px)
    };
    let value: f64 = number.parse().map_err(|_| ParseOffsetError)?;
    if !value.is_finite() {
        return Err(ParseOffsetError);
    }
    Ok(OffsetPart { value, unit })
}
