use std::net::IpAddr;
use std::sync::Arc;

/// Per-request client metadata. Resolvers that only route queries pass it on
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub source_ip: Option<IpAddr>,
    pub doh_path: Option<Arc<str>>,
    pub tls_server_name: Option<Arc<str>>,
    pub listener: Option<Arc<str>>,
}

impl ClientInfo {
    pub fn new(source_ip: IpAddr) -> Self {
        Self {
            source_ip: Some(source_ip),
            ..Self::default()
        }
    }

    pub fn with_listener(mut self, listener: impl Into<Arc<str>>) -> Self {
        self.listener = Some(listener.into());
        self
    }

    pub fn with_tls_server_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.tls_server_name = Some(name.into());
        self
    }

    pub fn with_doh_path(mut self, path: impl Into<Arc<str>>) -> Self {
        self.doh_path = Some(path.into());
        self
    }
}
