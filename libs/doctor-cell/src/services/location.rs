use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::models::{
    LocationCoords, LocationError, PageSecurity, PermissionState, PositionError, PositionOptions,
};

/// Host positioning capability.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    fn is_supported(&self) -> bool;

    fn page_security(&self) -> PageSecurity;

    /// `None` when the host has no permission query or the query failed.
    async fn query_permission(&self) -> Option<PermissionState>;

    async fn current_position(&self, options: &PositionOptions) -> Result<LocationCoords, PositionError>;
}

pub struct LocationResolver<P> {
    provider: P,
    options: PositionOptions,
}

impl<P: PositionProvider> LocationResolver<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, PositionOptions::default())
    }

    pub fn with_options(provider: P, options: PositionOptions) -> Self {
        Self { provider, options }
    }

    /// Resolves the device position once. Nothing is cached and nothing is retried.
    pub async fn get_current_location(&self) -> Result<LocationCoords, LocationError> {
        if !self.provider.is_supported() {
            return Err(LocationError::NotSupported);
        }

        let security = self.provider.page_security();
        if !security.allows_geolocation() {
            warn!("Location requested from insecure page {}//{}", security.protocol, security.hostname);
            return Err(LocationError::InsecureContext);
        }

        match self.provider.query_permission().await {
            Some(PermissionState::Denied) => return Err(LocationError::PermissionDenied),
            Some(state) => debug!("Location permission state: {:?}", state),
            None => debug!("Location permission state unknown, requesting position"),
        }

        let request = self.provider.current_position(&self.options);
        let coords = match tokio::time::timeout(self.options.timeout, request).await {
            Ok(Ok(coords)) => coords,
            Ok(Err(err)) => {
                warn!("Position request failed with code {}: {}", err.code, err.message);
                return Err(LocationError::from(err));
            }
            Err(_) => {
                warn!("Position request exceeded {:?}", self.options.timeout);
                return Err(LocationError::Timeout);
            }
        };

        info!("Location resolved");
        Ok(coords)
    }
}

/// What a client reports about its own positioning attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientPositionReport {
    #[serde(default = "default_supported")]
    pub supported: bool,
    #[serde(default)]
    pub is_secure_context: bool,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub protocol: String,
    pub permission: Option<PermissionState>,
    pub coords: Option<LocationCoords>,
    pub error_code: Option<u16>,
    pub error_message: Option<String>,
}

fn default_supported() -> bool {
    true
}

#[async_trait]
impl PositionProvider for ClientPositionReport {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn page_security(&self) -> PageSecurity {
        PageSecurity {
            is_secure_context: self.is_secure_context,
            hostname: self.hostname.clone(),
            protocol: self.protocol.clone(),
        }
    }

    async fn query_permission(&self) -> Option<PermissionState> {
        self.permission
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<LocationCoords, PositionError> {
        if let Some(code) = self.error_code {
            let message = self.error_message.clone().unwrap_or_default();
            return Err(PositionError::new(code, message));
        }

        self.coords
            .ok_or_else(|| PositionError::new(0, "client reported neither a position nor an error"))
    }
}
