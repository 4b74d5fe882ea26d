//! # Client Configuration
//!
//! The immutable record a client session is built from. Values are supplied
//! by the caller (normally the CLI) and never change after construction.

use std::time::Duration;

use crate::endpoint::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SERVICE, DEFAULT_VERSION, ServiceEndpoint};
use crate::transport::{Credentials, TransportOptions};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Explicit base URI. When set, `host`, `port` and `secure` are unused.
    pub base: Option<String>,
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub gateway: Option<String>,
    pub service: String,
    pub version: String,
    pub credentials: Option<Credentials>,
    pub verify_tls: bool,
    pub proxy: Option<String>,
    pub timeout: Option<Duration>,
    /// Log the headers of every issued request at debug level.
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            secure: false,
            gateway: None,
            service: DEFAULT_SERVICE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            credentials: None,
            verify_tls: true,
            proxy: None,
            timeout: None,
            verbose: false,
        }
    }
}

impl ClientConfig {
    pub fn endpoint(&self) -> ServiceEndpoint {
        let endpoint = match &self.base {
            Some(base) => ServiceEndpoint::from_base(base),
            None => ServiceEndpoint::from_host(Some(&self.host), Some(self.port), self.secure),
        };
        endpoint
            .with_gateway(self.gateway.as_deref())
            .with_service(&self.service)
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            credentials: self.credentials.clone(),
            verify_tls: self.verify_tls,
            proxy: self.proxy.clone(),
            timeout: self.timeout,
        }
    }

    /// Builds a client over HTTP, wrapped in the header logger.
    #[cfg(feature = "reqwest")]
    pub fn connect(
        &self,
    ) -> crate::Result<crate::WebHdfsClient<crate::transport::HeaderLog<crate::http::HttpTransport>>>
    {
        let transport = crate::http::HttpTransport::new(&self.transport_options())?;
        Ok(crate::WebHdfsClient::new(
            self.endpoint(),
            crate::transport::HeaderLog::new(transport, self.verbose),
        )
        .with_version(&self.version))
    }
}

/// Parses a `user:pass` string. Only the first colon separates; a value
/// without one is a user with no password. Empty input means no credentials.
pub fn parse_auth(value: &str) -> Option<Credentials> {
    if value.is_empty() {
        return None;
    }
    Some(match value.split_once(':') {
        Some((user, pass)) => Credentials {
            username: user.to_string(),
            password: Some(pass.to_string()),
        },
        None => Credentials {
            username: value.to_string(),
            password: None,
        },
    })
}
