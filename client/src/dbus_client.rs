//! Bus client backed by zbus - the real transport
use crate::bus_client::{BusClient, BusSession, PropertyMap};
use anyhow::Result;
use futures::future::{ready, BoxFuture};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;
use zbus::zvariant;

/// Which bus to attach to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusScope {
    System,
    Session,
}

/// Client for the platform message bus. Authentication uses the
/// platform default mechanism, handled inside zbus.
pub struct DBusClient {
    scope: BusScope,
}

impl DBusClient {
    pub fn new(scope: BusScope) -> Self {
        Self { scope }
    }
}

impl BusClient for DBusClient {
    fn connect(&self) -> BoxFuture<'static, Result<Box<dyn BusSession>>> {
        let scope = self.scope;

        Box::pin(async move {
            let connection = match scope {
                BusScope::System => zbus::Connection::system().await?,
                BusScope::Session => zbus::Connection::session().await?,
            };
            debug!("connected to {scope:?} bus");

            Ok(Box::new(DBusSession { connection }) as Box<dyn BusSession>)
        })
    }
}

struct DBusSession {
    connection: zbus::Connection,
}

impl BusSession for DBusSession {
    fn get_all_properties(
        &self,
        service: &str,
        object: &str,
        interface: &str,
    ) -> BoxFuture<'static, Result<PropertyMap>> {
        let connection = self.connection.clone();
        let service = service.to_string();
        let object = object.to_string();
        let interface = interface.to_string();

        Box::pin(async move {
            let reply = connection
                .call_method(
                    Some(service.as_str()),
                    object.as_str(),
                    Some("org.freedesktop.DBus.Properties"),
                    "GetAll",
                    &(interface.as_str(),),
                )
                .await?;

            // The reply carries an a{sv} - one tagged variant per key
            let map: HashMap<String, zvariant::OwnedValue> = reply.body().deserialize()?;
            Ok(map
                .iter()
                .map(|(key, value)| (key.clone(), variant_to_json(value)))
                .collect())
        })
    }

    fn call(
        &self,
        service: &str,
        object: &str,
        interface: &str,
        method: &str,
    ) -> BoxFuture<'static, Result<Vec<Value>>> {
        let connection = self.connection.clone();
        let service = service.to_string();
        let object = object.to_string();
        let interface = interface.to_string();
        let method = method.to_string();

        Box::pin(async move {
            let reply = connection
                .call_method(
                    Some(service.as_str()),
                    object.as_str(),
                    Some(interface.as_str()),
                    method.as_str(),
                    &(),
                )
                .await?;

            // Every configuration service method used here returns a
            // single string payload
            let payload: String = reply.body().deserialize()?;
            Ok(vec![Value::String(payload)])
        })
    }

    fn disconnect(&self) -> BoxFuture<'static, Result<()>> {
        debug!("releasing bus session");
        // zbus closes the wire connection when the last Connection handle
        // drops, which happens when the session box is dropped after this
        Box::pin(ready(Ok(())))
    }
}

/// Collapse a wire variant to a tagged JSON value. Only the scalar tags
/// the configuration service uses are mapped; anything else decodes to
/// null and is ignored downstream.
fn variant_to_json(value: &zvariant::Value) -> Value {
    match value {
        zvariant::Value::Bool(b) => json!(b),
        zvariant::Value::Str(s) => json!(s.as_str()),
        zvariant::Value::U8(n) => json!(n),
        zvariant::Value::I16(n) => json!(n),
        zvariant::Value::U16(n) => json!(n),
        zvariant::Value::I32(n) => json!(n),
        zvariant::Value::U32(n) => json!(n),
        zvariant::Value::I64(n) => json!(n),
        zvariant::Value::U64(n) => json!(n),
        zvariant::Value::F64(n) => json!(n),
        zvariant::Value::Value(inner) => variant_to_json(inner),
        _ => Value::Null,
    }
}
