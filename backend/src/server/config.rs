//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::ports::Storage;

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Arc<dyn Storage>,
}

impl ServerConfig {
    /// Construct a configuration serving `storage` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, storage: Arc<dyn Storage>) -> Self {
        Self { bind_addr, storage }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
