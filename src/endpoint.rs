//! # Service Endpoint
//!
//! Builds the base URL every WebHDFS call is issued against, either from an
//! explicit base URI or from a host/port pair, optionally routed through a
//! named gateway.

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 50070;
pub const DEFAULT_SERVICE: &str = "webhdfs";
pub const DEFAULT_VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base: Option<String>,
    secure: bool,
    host: String,
    port: u16,
    gateway: Option<String>,
    service: String,
}

impl Default for ServiceEndpoint {
    fn default() -> Self {
        ServiceEndpoint {
            base: None,
            secure: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            gateway: None,
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl ServiceEndpoint {
    /// Endpoint rooted at an explicit base URI such as `https://knox:8443/`.
    pub fn from_base(base: &str) -> Self {
        ServiceEndpoint {
            base: Some(format!("{}/", base.trim_end_matches('/'))),
            ..Default::default()
        }
    }

    /// Endpoint built from `<scheme>://<host>:<port>/`.
    pub fn from_host(host: Option<&str>, port: Option<u16>, secure: bool) -> Self {
        ServiceEndpoint {
            secure,
            host: host
                .filter(|h| !h.is_empty())
                .unwrap_or(DEFAULT_HOST)
                .to_string(),
            port: port.unwrap_or(DEFAULT_PORT),
            ..Default::default()
        }
    }

    pub fn with_gateway(mut self, gateway: Option<&str>) -> Self {
        self.gateway = gateway.filter(|g| !g.is_empty()).map(str::to_string);
        self
    }

    pub fn with_service(mut self, service: &str) -> Self {
        self.service = service.trim_matches('/').to_string();
        self
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn scheme(&self) -> &'static str {
        if self.secure { "https" } else { "http" }
    }

    /// `<root>[gateway/<name>/]<service>/<version>`
    pub fn resolve(&self, version: &str) -> String {
        let root = match &self.base {
            Some(base) => base.clone(),
            None => format!("{}://{}:{}/", self.scheme(), self.host, self.port),
        };
        match &self.gateway {
            Some(gateway) => format!("{}gateway/{}/{}/{}", root, gateway, self.service, version),
            None => format!("{}{}/{}", root, self.service, version),
        }
    }
}
