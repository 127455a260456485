// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Dropkit crates.
//!
//! Each adapter is gated behind a feature flag to keep the core responder lightweight and `no_std` by default.
//!
//! ## Available Adapters
//!
//! - [`dom`] (`dom_adapter` feature): parent links and routers over a [`dropkit_dom::Document`].

#[cfg(feature = "dom_adapter")]
pub mod dom;
