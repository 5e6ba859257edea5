//! Generic bus client traits for the configuration service collaborator
use anyhow::Result;
use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;

/// Property map returned by a property query - values keep the dynamic
/// tag (string/boolean/number) the wire variant carried
pub type PropertyMap = HashMap<String, Value>;

/// Factory for authenticated bus sessions
pub trait BusClient: Send + Sync {
    /// Open a session against the bus using the platform's default
    /// authentication - note async but not defined as such because this
    /// is used dynamically
    fn connect(&self) -> BoxFuture<'static, Result<Box<dyn BusSession>>>;
}

/// One authenticated session on the bus
pub trait BusSession: Send + Sync {
    /// Query the full property map of an object
    fn get_all_properties(
        &self,
        service: &str,
        object: &str,
        interface: &str,
    ) -> BoxFuture<'static, Result<PropertyMap>>;

    /// Invoke a zero-argument method on an object, returning its values
    fn call(
        &self,
        service: &str,
        object: &str,
        interface: &str,
        method: &str,
    ) -> BoxFuture<'static, Result<Vec<Value>>>;

    /// Release the session - called exactly once per run
    fn disconnect(&self) -> BoxFuture<'static, Result<()>>;
}
