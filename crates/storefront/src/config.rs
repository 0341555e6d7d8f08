//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `SACOLA_HOST` - Bind address (default: 127.0.0.1)
//! - `SACOLA_PORT` - Listen port (default: 3000)
//! - `SACOLA_DATA_DIR` - Directory holding the stored cart (default: data)
//! - `SACOLA_CART_KEY` - Storage key of the cart (default: cartData)
//! - `SACOLA_WHATSAPP_PHONE` - Number orders are sent to, digits only (default: 5511999999999)
//! - `SACOLA_PIX_PAGE` - Pix payment page (default: /pix)
//! - `SACOLA_CATALOG_PATH` - JSON product list replacing the built-in catalog
//! - `SACOLA_STATIC_DIR` - Stylesheet directory (default: the crate's `static/`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use sacola_core::checkout::DEFAULT_WHATSAPP_PHONE;
use sacola_core::{DEFAULT_CART_KEY, FileStore, PixCheckout, WhatsAppCheckout};
use thiserror::Error;

/// Pix page served by the storefront itself.
pub const DEFAULT_PIX_PAGE: &str = "/pix";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the stored cart
    pub data_dir: PathBuf,
    /// Storage key of the cart
    pub cart_key: String,
    /// WhatsApp order link builder
    pub whatsapp: WhatsAppCheckout,
    /// Pix redirect builder
    pub pix: PixCheckout,
    /// Optional catalog file
    pub catalog_path: Option<PathBuf>,
    /// Stylesheet directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_or_default(&lookup, "SACOLA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SACOLA_HOST".to_string(), e.to_string()))?;
        let port = get_or_default(&lookup, "SACOLA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SACOLA_PORT".to_string(), e.to_string()))?;

        let data_dir = PathBuf::from(get_or_default(&lookup, "SACOLA_DATA_DIR", "data"));

        let cart_key = get_or_default(&lookup, "SACOLA_CART_KEY", DEFAULT_CART_KEY);
        // Validate now so a bad key fails at startup, not on the first write.
        FileStore::new(&data_dir).path_for(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("SACOLA_CART_KEY".to_string(), e.to_string())
        })?;

        let whatsapp = WhatsAppCheckout::new(&get_or_default(
            &lookup,
            "SACOLA_WHATSAPP_PHONE",
            DEFAULT_WHATSAPP_PHONE,
        ))
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SACOLA_WHATSAPP_PHONE".to_string(), e.to_string())
        })?;
        let pix = PixCheckout::new(&get_or_default(&lookup, "SACOLA_PIX_PAGE", DEFAULT_PIX_PAGE))
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SACOLA_PIX_PAGE".to_string(), e.to_string())
            })?;

        let catalog_path = lookup("SACOLA_CATALOG_PATH").map(PathBuf::from);
        let static_dir = lookup("SACOLA_STATIC_DIR").map_or_else(default_static_dir, PathBuf::from);

        Ok(Self {
            host,
            port,
            data_dir,
            cart_key,
            whatsapp,
            pix,
            catalog_path,
            static_dir,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: PathBuf::from("data"),
            cart_key: DEFAULT_CART_KEY.to_string(),
            whatsapp: WhatsAppCheckout::default(),
            pix: PixCheckout::new(DEFAULT_PIX_PAGE).unwrap_or_default(),
            catalog_path: None,
            static_dir: default_static_dir(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}
