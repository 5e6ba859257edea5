//! Mock bus client for tests
use crate::bus_client::{BusClient, BusSession, PropertyMap};
use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Record of one call made through the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Connect,
    GetAllProperties {
        service: String,
        object: String,
        interface: String,
    },
    Call {
        service: String,
        object: String,
        interface: String,
        method: String,
    },
    Disconnect,
}

/// Scriptable mock client - records every call in order so tests can
/// assert exact sequencing, and injects failures at each boundary
pub struct MockBusClient {
    /// Everything called through the client and its sessions, in order
    pub calls: Arc<Mutex<Vec<MockCall>>>,

    /// Disconnect count - just count them
    pub disconnects: Arc<Mutex<u16>>,

    connect_ok: bool,
    properties: Option<PropertyMap>,
    payload: Option<Value>,
}

impl MockBusClient {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            disconnects: Arc::new(Mutex::new(0)),
            connect_ok: true,
            properties: Some(PropertyMap::new()),
            payload: Some(Value::String(String::new())),
        }
    }

    /// Script the property map returned by property queries
    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Script the single value returned by method calls
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Simulate a transport failure at the connect boundary
    pub fn failing_connect(mut self) -> Self {
        self.connect_ok = false;
        self
    }

    /// Simulate a transport failure at the property query boundary
    pub fn failing_properties(mut self) -> Self {
        self.properties = None;
        self
    }

    /// Simulate a transport failure at the method call boundary
    pub fn failing_call(mut self) -> Self {
        self.payload = None;
        self
    }
}

impl BusClient for MockBusClient {
    fn connect(&self) -> BoxFuture<'static, Result<Box<dyn BusSession>>> {
        debug!("Mock connect");
        let connect_ok = self.connect_ok;
        let session = MockBusSession {
            calls: self.calls.clone(),
            disconnects: self.disconnects.clone(),
            properties: self.properties.clone(),
            payload: self.payload.clone(),
        };

        Box::pin(async move {
            session.calls.lock().await.push(MockCall::Connect);
            if !connect_ok {
                return Err(anyhow!("simulated connect failure"));
            }
            Ok(Box::new(session) as Box<dyn BusSession>)
        })
    }
}

struct MockBusSession {
    calls: Arc<Mutex<Vec<MockCall>>>,
    disconnects: Arc<Mutex<u16>>,
    properties: Option<PropertyMap>,
    payload: Option<Value>,
}

impl BusSession for MockBusSession {
    fn get_all_properties(
        &self,
        service: &str,
        object: &str,
        interface: &str,
    ) -> BoxFuture<'static, Result<PropertyMap>> {
        debug!("Mock property query on {object}");
        let calls = self.calls.clone();
        let properties = self.properties.clone();
        let record = MockCall::GetAllProperties {
            service: service.to_string(),
            object: object.to_string(),
            interface: interface.to_string(),
        };

        Box::pin(async move {
            calls.lock().await.push(record);
            properties.ok_or_else(|| anyhow!("simulated property query failure"))
        })
    }

    fn call(
        &self,
        service: &str,
        object: &str,
        interface: &str,
        method: &str,
    ) -> BoxFuture<'static, Result<Vec<Value>>> {
        debug!("Mock call of {method} on {object}");
        let calls = self.calls.clone();
        let payload = self.payload.clone();
        let record = MockCall::Call {
            service: service.to_string(),
            object: object.to_string(),
            interface: interface.to_string(),
            method: method.to_string(),
        };

        Box::pin(async move {
            calls.lock().await.push(record);
            match payload {
                Some(value) => Ok(vec![value]),
                None => Err(anyhow!("simulated method call failure")),
            }
        })
    }

    fn disconnect(&self) -> BoxFuture<'static, Result<()>> {
        debug!("Mock disconnect");
        let calls = self.calls.clone();
        let disconnects = self.disconnects.clone();

        Box::pin(async move {
            calls.lock().await.push(MockCall::Disconnect);
            let mut disconnects = disconnects.lock().await;
            *disconnects += 1;
            Ok(())
        })
    }
}
