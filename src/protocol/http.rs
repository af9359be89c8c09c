// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP bus client for the SysAP local REST API.

use std::time::Duration;

use reqwest::Client;
use uuid::Uuid;

use crate::error::ProtocolError;
use crate::protocol::BusClient;
use crate::types::{DatapointId, DeviceIdentity};

// ============================================================================
// SysApConfig - Connection parameters for a system access point
// ============================================================================

/// Configuration for reaching a free@home system access point (SysAP).
///
/// # Examples
///
/// ```
/// use fah_lib::protocol::SysApConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = SysApConfig::new("192.168.1.20");
///
/// // With all options
/// let config = SysApConfig::new("192.168.1.20")
///     .with_https()
///     .with_credentials("installer", "secret")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct SysApConfig {
    host: String,
    port: u16,
    use_https: bool,
    credentials: Option<(String, String)>,
    timeout: Duration,
    sysap_id: Uuid,
}

impl SysApConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// SysAP ID the local API accepts for the access point it runs on.
    pub const LOCAL_SYSAP_ID: Uuid = Uuid::nil();

    /// Creates a configuration for the SysAP at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
            sysap_id: Self::LOCAL_SYSAP_ID,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets basic-auth credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Addresses a specific SysAP instead of the local one.
    #[must_use]
    pub fn with_sysap_id(mut self, sysap_id: Uuid) -> Self {
        self.sysap_id = sysap_id;
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

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the SysAP ID used in request paths.
    #[must_use]
    pub fn sysap_id(&self) -> Uuid {
        self.sysap_id
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpBusClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` for an empty host, or an
    /// HTTP error if the client cannot be created.
    pub fn into_client(self) -> Result<HttpBusClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("empty host".to_string()));
        }
        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        let credentials = self
            .credentials
            .map(|(username, password)| Credentials { username, password });

        Ok(HttpBusClient {
            base_url,
            sysap_id: self.sysap_id,
            client,
            credentials,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpBusClient
// ============================================================================

/// Bus client writing datapoints through the SysAP local REST API.
///
/// Each write is a `PUT` to
/// `/fhapi/v1/api/rest/datapoint/<sysap>/<serial>.<channel>.<datapoint>`
/// with the raw value as the request body.
///
/// # Examples
///
/// ```no_run
/// use fah_lib::protocol::{BusClient, SysApConfig};
/// use fah_lib::types::{DatapointId, DeviceIdentity};
///
/// # async fn example() -> fah_lib::Result<()> {
/// let client = SysApConfig::new("192.168.1.20")
///     .with_credentials("installer", "secret")
///     .into_client()?;
///
/// let light = DeviceIdentity::new("ABB700D9C0A4", "ch0000");
/// client.set_datapoint(&light, &DatapointId::new("idp0000"), "1").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBusClient {
    base_url: String,
    sysap_id: Uuid,
    client: Client,
    credentials: Option<Credentials>,
    timeout: Duration,
}

/// HTTP basic-auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Username for authentication.
    pub username: String,
    /// Password for authentication.
    pub password: String,
}

impl HttpBusClient {
    /// Returns the base URL of the SysAP.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout in milliseconds.
    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// Builds the URL for a datapoint write.
    fn datapoint_url(&self, identity: &DeviceIdentity, datapoint: &DatapointId) -> String {
        format!(
            "{}/fhapi/v1/api/rest/datapoint/{}/{}.{}.{}",
            self.base_url,
            self.sysap_id,
            urlencoding::encode(identity.serial_number()),
            urlencoding::encode(identity.channel_id()),
            urlencoding::encode(datapoint.as_str()),
        )
    }

    /// Checks the SysAP's answer to a write.
    ///
    /// The reply is keyed by SysAP ID and carries `"result": "OK"` on
    /// success. Bodies without a `result` field are accepted.
    fn check_reply(body: &str) -> Result<(), ProtocolError> {
        let Ok(reply) = serde_json::from_str::<serde_json::Value>(body) else {
            tracing::trace!(body = %body, "Non-JSON reply to datapoint write");
            return Ok(());
        };

        let results = reply
            .as_object()
            .into_iter()
            .flat_map(|sysaps| sysaps.values())
            .filter_map(|sysap| sysap.get("result"));

        for result in results {
            if result.as_str() != Some("OK") {
                return Err(ProtocolError::Rejected(result.to_string()));
            }
        }
        Ok(())
    }
}

impl BusClient for HttpBusClient {
    async fn set_datapoint(
        &self,
        identity: &DeviceIdentity,
        datapoint: &DatapointId,
        value: &str,
    ) -> Result<(), ProtocolError> {
        let url = self.datapoint_url(identity, datapoint);

        tracing::debug!(url = %url, value = %value, "Writing datapoint");

        let mut request = self.client.put(&url).body(value.to_string());
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProtocolError::Timeout(self.timeout_ms())
            } else {
                ProtocolError::Http(e)
            }
        })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received datapoint write reply");

        Self::check_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpBusClient {
        SysApConfig::new("192.168.1.20").into_client().unwrap()
    }

    #[test]
    fn datapoint_url_uses_local_sysap() {
        let url = client().datapoint_url(
            &DeviceIdentity::new("ABB700D9C0A4", "ch0000"),
            &DatapointId::new("idp0000"),
        );
        assert_eq!(
            url,
            "http://192.168.1.20/fhapi/v1/api/rest/datapoint/\
             00000000-0000-0000-0000-000000000000/ABB700D9C0A4.ch0000.idp0000"
        );
    }

    #[test]
    fn datapoint_url_encodes_segments() {
        let url = client().datapoint_url(
            &DeviceIdentity::new("ABB 7", "ch/0"),
            &DatapointId::new("idp0000"),
        );
        assert!(url.ends_with("/ABB%207.ch%2F0.idp0000"));
    }

    #[test]
    fn check_reply_accepts_ok() {
        let body = r#"{"00000000-0000-0000-0000-000000000000":{"result":"OK"}}"#;
        assert!(HttpBusClient::check_reply(body).is_ok());
    }

    #[test]
    fn check_reply_rejects_failure() {
        let body = r#"{"00000000-0000-0000-0000-000000000000":{"result":"ERROR"}}"#;
        assert!(matches!(
            HttpBusClient::check_reply(body),
            Err(ProtocolError::Rejected(_))
        ));
    }

    #[test]
    fn check_reply_tolerates_plain_bodies() {
        assert!(HttpBusClient::check_reply("").is_ok());
        assert!(HttpBusClient::check_reply("{}").is_ok());
    }

    #[test]
    fn config_default_values() {
        let config = SysApConfig::new("192.168.1.20");
        assert_eq!(config.host(), "192.168.1.20");
        assert_eq!(config.port(), 80);
        assert!(!config.use_https());
        assert!(config.credentials().is_none());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.sysap_id().is_nil());
    }

    #[test]
    fn config_with_https() {
        let config = SysApConfig::new("192.168.1.20").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
        assert_eq!(config.base_url(), "https://192.168.1.20");
    }

    #[test]
    fn config_with_https_custom_port() {
        let config = SysApConfig::new("192.168.1.20")
            .with_port(8443)
            .with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://192.168.1.20:8443");
    }

    #[test]
    fn empty_host_is_rejected() {
        assert!(matches!(
            SysApConfig::new(" ").into_client(),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }

    #[test]
    fn config_with_credentials_and_sysap() {
        let id = Uuid::new_v4();
        let config = SysApConfig::new("sysap.local")
            .with_credentials("installer", "secret")
            .with_sysap_id(id);
        assert_eq!(config.credentials(), Some(("installer", "secret")));
        assert_eq!(config.sysap_id(), id);

        let client = config.into_client().unwrap();
        assert!(client.credentials.is_some());
        assert_eq!(client.sysap_id, id);
    }
}
