// Copyright 2025 the Dropkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// Errors raised by dropdown operations.
///
/// Vetoed lifecycle transitions are not errors; they simply leave the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The context was built without a positioning engine.
    #[error("Dropdown requires a positioning engine; none was configured")]
    MissingPositioningEngine,

    /// A merged configuration value has the wrong type.
    #[error(
        "DROPDOWN: Option \"{option}\" provided type \"{actual}\" but expected type \"{expected}\"."
    )]
    ConfigType {
        /// Option name.
        option: String,
        /// Type name of the provided value.
        actual: &'static str,
        /// Accepted type names, `|`-separated.
        expected: &'static str,
    },

    /// A programmatic option outside the schema.
    #[error("DROPDOWN: Unknown option \"{option}\"")]
    UnknownOption {
        /// Option name.
        option: String,
    },

    /// The string interface was asked for a method that does not exist.
    #[error("No method named \"{name}\"")]
    UnknownMethod {
        /// Requested method name.
        name: String,
    },
}

/// Result alias for dropdown operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
