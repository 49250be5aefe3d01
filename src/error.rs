// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `lampgrid` library.
//!
//! Errors are only produced by constructors that validate input and by the
//! low-level transport. The [`Dispatcher`](crate::dispatcher::Dispatcher) and
//! [`LightSession`](crate::session::LightSession) absorb them: a failed call
//! is logged and the registry keeps its last good value.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An endpoint was built from empty input.
    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    /// An endpoint could not be understood.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// An invalid light state string was provided.
    #[error("invalid light state: {0}")]
    InvalidLightState(String),
}

/// Errors related to HTTP communication with the device service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status other than 200.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// No connection could be made to the service (refused, DNS failure).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Errors related to parsing service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
