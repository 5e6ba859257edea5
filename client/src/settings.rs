//! Service target and bus client construction from configuration
use crate::bus_client::BusClient;
use crate::dbus_client::{BusScope, DBusClient};
use crate::error::FetchError;
use anyhow::anyhow;
use config::Config;
use std::sync::Arc;
use tracing::info;

/// Well-known name of the configuration service
const DEFAULT_SERVICE: &str = "net.confbus.configuration";

/// Where the configuration service lives on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    /// Bus name the service owns
    pub service: String,

    /// Interface the properties and the Fetch method live on
    pub interface: String,
}

impl Default for ServiceTarget {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            interface: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl ServiceTarget {
    /// Read [service] from the config - the interface defaults to the
    /// service name, which is how the configuration service names its own
    pub fn from_config(config: &Config) -> Self {
        let service = config
            .get_string("service.name")
            .unwrap_or(DEFAULT_SERVICE.to_string());
        let interface = config
            .get_string("service.interface")
            .unwrap_or(service.clone());

        Self { service, interface }
    }
}

/// Create a bus client of the configured class. An unknown class means
/// no session can ever be established, so it reports as a connect error.
pub fn create_client(config: &Config) -> Result<Arc<dyn BusClient>, FetchError> {
    let class = config
        .get_string("bus.class")
        .unwrap_or("system".to_string());
    info!("Creating {class} bus client");

    match class.as_str() {
        "system" => Ok(Arc::new(DBusClient::new(BusScope::System))),
        "session" => Ok(Arc::new(DBusClient::new(BusScope::Session))),
        _ => Err(FetchError::Connection(anyhow!("Unknown bus class {class}"))),
    }
}
