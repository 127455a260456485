// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropkit Placement: pure geometry for floating menus.
//!
//! Given a reference box, the size of a floating box, and a symbolic [`Placement`], this crate
//! computes where the floating box goes:
//!
//! - [`base_offsets`] places it flush below or above the reference, aligned to the start or end edge.
//! - [`OffsetExpr`] shifts it by pixels or percentages (`px`, `%`, `%r`, `%p`).
//! - [`compute`] runs a full pass, flipping between top and bottom when the preferred side
//!   overflows the boundary and the other side has more room.
//!
//! Nothing here touches a document; callers read bounds from wherever they live and write
//! the result back.
//!
//! This crate is `no_std`.

#![no_std]

mod layout;
mod offset;
mod placement;

pub use layout::{Layout, LayoutRequest, base_offsets, compute};
pub use offset::{OffsetExpr, OffsetPart, Offsets, OffsetsPatch, ParseOffsetError, Unit};
pub use placement::Placement;
