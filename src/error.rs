// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `fah_lib` library.
//!
//! Failures are grouped by where they originate: value validation, bus
//! communication, parsing of SysAP payloads, and device construction.

use thiserror::Error;

use crate::types::DeviceIdentity;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the bus.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a SysAP payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while building or addressing a device.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A raw datapoint value could not be read as a number.
    #[error("invalid numeric value: {0:?}")]
    InvalidNumber(String),

    /// A function or pairing identifier is not valid hexadecimal.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Errors related to bus communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the system access point failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The system access point refused the datapoint write.
    #[error("datapoint write rejected: {0}")]
    Rejected(String),
}

/// Errors related to parsing SysAP payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected payload format.
    #[error("unexpected payload format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to device construction and lookup.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The channel lacks a datapoint the light needs.
    #[error("{identity} is missing datapoint for {role}")]
    IncompleteDatapoints {
        /// The channel being built.
        identity: DeviceIdentity,
        /// Name of the missing parameter role.
        role: &'static str,
    },

    /// The channel's function is not exposed as a light.
    #[error("function {0} is not a light")]
    UnsupportedFunction(String),

    /// No light with this identity is known.
    #[error("unknown device {0}")]
    UnknownDevice(DeviceIdentity),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
