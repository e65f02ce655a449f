// src/net.rs
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("association with {ssid:?} failed: {reason}")]
    Association { ssid: String, reason: String },
    #[error("no network interface available")]
    Unavailable,
}

/// Capability seam for bringing the radio up before a fetch and dropping
/// it afterwards to save power. A failed `connect` is the TransportFailure
/// path; `disconnect` is best-effort and infallible.
pub trait NetworkLink: Send {
    fn connect(&mut self) -> Result<(), NetworkError>;
    fn disconnect(&mut self);
}

/// Software link: the host OS already owns connectivity, so association
/// is a no-op beyond logging which network the config points at.
#[derive(Debug, Clone)]
pub struct HostNetwork {
    ssid: String,
}

impl HostNetwork {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self { ssid: ssid.into() }
    }
}

impl NetworkLink for HostNetwork {
    fn connect(&mut self) -> Result<(), NetworkError> {
        info!("using host connectivity (configured network {:?})", self.ssid);
        Ok(())
    }

    fn disconnect(&mut self) {
        debug!("host connectivity left up");
    }
}
