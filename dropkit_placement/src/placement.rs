// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbolic placements.

use core::fmt;

/// Where a floating box sits relative to its reference box.
///
/// The side is `top` or `bottom`; the variation aligns the floating box's
/// start (left) or end (right) edge with the reference's.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Above, left edges aligned.
    TopStart,
    /// Above, right edges aligned.
    TopEnd,
    /// Below, left edges aligned.
    #[default]
    BottomStart,
    /// Below, right edges aligned.
    BottomEnd,
}

impl Placement {
    /// Pick the placement for a menu from its two markers.
    ///
    /// ```
    /// use dropkit_placement::Placement;
    ///
    /// assert_eq!(Placement::for_markers(false, false), Placement::BottomStart);
    /// assert_eq!(Placement::for_markers(true, true), Placement::TopEnd);
    /// ```
    pub const fn for_markers(dropup: bool, align_end: bool) -> Self {
        match (dropup, align_end) {
            (false, false) => Self::BottomStart,
            (false, true) => Self::BottomEnd,
            (true, false) => Self::TopStart,
            (true, true) => Self::TopEnd,
        }
    }

    /// The canonical name, e.g. `bottom-start`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
        }
    }

    /// Parse a canonical name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "top-start" => Some(Self::TopStart),
            "top-end" => Some(Self::TopEnd),
            "bottom-start" => Some(Self::BottomStart),
            "bottom-end" => Some(Self::BottomEnd),
            _ => None,
        }
    }

    /// Returns true for the two `top` placements.
    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopStart | Self::TopEnd)
    }

    /// Returns true for the two `end` variations.
    pub const fn is_end(self) -> bool {
        matches!(self, Self::TopEnd | Self::BottomEnd)
    }

    /// The same variation on the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::TopStart => Self::BottomStart,
            Self::TopEnd => Self::BottomEnd,
            Self::BottomStart => Self::TopStart,
            Self::BottomEnd => Self::TopEnd,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
