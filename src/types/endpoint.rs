// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolved address of the device service.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

// ============================================================================
// Endpoint - validated base URL
// ============================================================================

/// Fully resolved base address of the device-control service.
///
/// An `Endpoint` is always non-empty and always carries an `http` or `https`
/// scheme, so request URLs can be built by plain concatenation.
///
/// # Examples
///
/// ```
/// use lampgrid::types::Endpoint;
///
/// let endpoint = Endpoint::parse("192.168.0.20:3000").unwrap();
/// assert_eq!(endpoint.as_str(), "http://192.168.0.20:3000");
///
/// let endpoint = Endpoint::parse("https://lights.local/").unwrap();
/// assert_eq!(endpoint.as_str(), "https://lights.local");
///
/// assert!(Endpoint::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    base_url: String,
}

impl Endpoint {
    /// Parses user input into an endpoint.
    ///
    /// Accepts either a base URL (`http://host:port`) or a bare `host[:port]`,
    /// in which case `http://` is assumed. Surrounding whitespace and trailing
    /// slashes are removed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyEndpoint` for blank input and
    /// `ValueError::InvalidEndpoint` for an unsupported scheme, a missing host,
    /// embedded whitespace or a port that is not a number in `0..=65535`.
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyEndpoint);
        }

        let (scheme, rest) = match trimmed.split_once("://") {
            Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
            None => ("http".to_string(), trimmed),
        };

        if scheme != "http" && scheme != "https" {
            return Err(ValueError::InvalidEndpoint(format!(
                "unsupported scheme '{scheme}'"
            )));
        }

        let rest = rest.trim_end_matches('/');
        if rest.is_empty() || rest.starts_with('/') {
            return Err(ValueError::InvalidEndpoint(format!(
                "missing host in '{trimmed}'"
            )));
        }
        if rest.chars().any(char::is_whitespace) {
            return Err(ValueError::InvalidEndpoint(format!(
                "whitespace in '{trimmed}'"
            )));
        }

        let authority = rest.split_once('/').map_or(rest, |(authority, _)| authority);
        if let Some(port) = port_suffix(authority)
            && port.parse::<u16>().is_err()
        {
            return Err(ValueError::InvalidEndpoint(format!(
                "invalid port '{port}' in '{trimmed}'"
            )));
        }

        Ok(Self {
            base_url: format!("{scheme}://{rest}"),
        })
    }

    /// Returns the base URL, without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base_url
    }

    /// Joins a path onto the base URL.
    ///
    /// `path` is expected to start with `/`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Returns the text after the port separator, skipping a bracketed IPv6 host.
fn port_suffix(authority: &str) -> Option<&str> {
    let host_end = if authority.starts_with('[') {
        authority.find(']')?
    } else {
        0
    };
    authority[host_end..].rsplit_once(':').map(|(_, port)| port)
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url)
    }
}

impl FromStr for Endpoint {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// EndpointConfig - host/port composition
// ============================================================================

/// Host and port pieces an [`Endpoint`] is assembled from.
///
/// # Examples
///
/// ```
/// use lampgrid::types::EndpointConfig;
///
/// // Defaults to localhost:3000
/// let endpoint = EndpointConfig::new().resolve().unwrap();
/// assert_eq!(endpoint.as_str(), "http://localhost:3000");
///
/// let endpoint = EndpointConfig::new()
///     .with_host("192.168.0.20")
///     .with_port(8080)
///     .resolve()
///     .unwrap();
/// assert_eq!(endpoint.as_str(), "http://192.168.0.20:8080");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    host: String,
    port: u16,
    use_https: bool,
}

impl EndpointConfig {
    /// Default host.
    pub const DEFAULT_HOST: &'static str = "localhost";
    /// Default port.
    pub const DEFAULT_PORT: u16 = 3000;

    /// Creates a configuration pointing at `localhost:3000`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            use_https: false,
        }
    }

    /// Sets the host. Blank input leaves the current host unchanged.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        let host = host.trim();
        if !host.is_empty() {
            self.host = host.to_string();
        }
        self
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Builds the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidEndpoint` if the host cannot form a valid
    /// address.
    pub fn resolve(&self) -> Result<Endpoint, ValueError> {
        let scheme = if self.use_https { "https" } else { "http" };
        Endpoint::parse(&format!("{scheme}://{}:{}", self.host, self.port))
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new()
    }
}
