// confbus client library - main exports
pub mod bus_client;
pub mod dbus_client;
pub mod error;
pub mod handle;
pub mod mock_client;
pub mod pipeline;
pub mod properties;
pub mod settings;

// Flattened re-exports
pub use self::bus_client::BusClient;
pub use self::bus_client::BusSession;
pub use self::bus_client::PropertyMap;
pub use self::dbus_client::DBusClient;
pub use self::error::FetchError;
pub use self::handle::ObjectHandle;
pub use self::pipeline::FetchOutcome;
pub use self::pipeline::FetchPipeline;
pub use self::properties::ConfigProperties;
pub use self::settings::ServiceTarget;
