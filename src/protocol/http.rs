// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the device service.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::command::{Command, Method};
use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Transport};
use crate::types::Endpoint;

/// HTTP client for the device service.
///
/// The client is endpoint-agnostic: the endpoint is supplied per request, so
/// a single client can follow the operator from one service to another.
///
/// # Examples
///
/// ```no_run
/// use lampgrid::command::ListDevicesCommand;
/// use lampgrid::protocol::{HttpClient, Transport};
/// use lampgrid::types::Endpoint;
///
/// # async fn example() -> lampgrid::Result<()> {
/// let client = HttpClient::new()?;
/// let endpoint = Endpoint::parse("localhost:3000")?;
/// let response = client.send(&endpoint, &ListDevicesCommand).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProtocolError> {
        HttpClientBuilder::new().build()
    }

    /// Returns a builder for a client with custom settings.
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpClient {
    async fn send<C: Command + Sync>(
        &self,
        endpoint: &Endpoint,
        command: &C,
    ) -> Result<CommandResponse, ProtocolError> {
        let url = endpoint.url(&command.path());
        let method = command.method();

        tracing::debug!(%method, url = %url, "Sending HTTP request");

        let request = match method {
            Method::Get => self.client.get(&url),
            Method::Put => self.client.put(&url),
        };

        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(status, body = %body, "Received HTTP response");

        Ok(CommandResponse::new(status, body))
    }
}

/// Keeps unreachable services apart from other request failures.
fn request_error(url: &str, error: reqwest::Error) -> ProtocolError {
    if error.is_connect() {
        ProtocolError::ConnectionFailed(format!("{url}: {error}"))
    } else {
        ProtocolError::Http(error)
    }
}

/// Builder for creating an HTTP client with custom configuration.
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    ///
    /// A request that exceeds it is reported as a transport failure.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if client creation fails.
    pub fn build(self) -> Result<HttpClient, ProtocolError> {
        let timeout = self.timeout.unwrap_or(HttpClient::DEFAULT_TIMEOUT);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient { client, timeout })
    }
}
