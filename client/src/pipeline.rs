//! The config fetch pipeline - connect, query, validate, fetch, render
use crate::bus_client::{BusClient, BusSession};
use crate::error::FetchError;
use crate::handle::ObjectHandle;
use crate::properties::ConfigProperties;
use crate::settings::ServiceTarget;
use anyhow::anyhow;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Separator line printed around the raw content
const RULE: &str = "--------------------------------------------------";

/// Outcome of a successful run - decoded metadata, the object's
/// serialized content, and the console form rendered while the session
/// was still open
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub properties: ConfigProperties,
    pub content: String,
    pub rendered: String,
}

impl FetchOutcome {
    /// Render for the console - metadata first, then the raw content
    fn new(properties: ConfigProperties, content: String) -> Self {
        let mut out = String::new();

        out.push_str("Configuration:\n");
        out.push_str(&format!("  - Name:       {}\n", properties.name));
        out.push_str(&format!("  - Read only:  {}\n", yes_no(properties.readonly)));
        out.push_str(&format!("  - Persistent: {}\n", yes_no(properties.persistent)));
        out.push_str(&format!("  - Usage:      {}\n", properties.usage()));
        out.push_str(&format!("{RULE}\n{content}\n{RULE}\n"));

        Self {
            properties,
            content,
            rendered: out,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Single-shot fetch pipeline against one configuration service.
///
/// Steps are strictly sequential with one bus operation in flight at a
/// time; any step's failure aborts the rest of the chain. No retries
/// and no timeouts - a hung remote call hangs the run until the process
/// is terminated.
pub struct FetchPipeline {
    client: Arc<dyn BusClient>,
    target: ServiceTarget,
}

impl FetchPipeline {
    pub fn new(client: Arc<dyn BusClient>, target: ServiceTarget) -> Self {
        Self { client, target }
    }

    /// Run the full sequence for one object handle
    pub async fn run(&self, handle: &ObjectHandle) -> Result<FetchOutcome, FetchError> {
        debug!("connecting");
        let session = self
            .client
            .connect()
            .await
            .map_err(FetchError::Connection)?;

        let outcome = self.execute(session.as_ref(), handle).await;
        if let Err(e) = &outcome {
            error!("aborting fetch of {handle}: {e}");
        }

        // Session teardown happens exactly once, before any error
        // propagates to the caller
        debug!("disconnecting");
        if let Err(e) = session.disconnect().await {
            warn!("failed to release bus session: {e}");
        }

        outcome
    }

    /// Everything between connect and disconnect - factored out so run()
    /// can release the session on the success path and every abort path
    async fn execute(
        &self,
        session: &dyn BusSession,
        handle: &ObjectHandle,
    ) -> Result<FetchOutcome, FetchError> {
        debug!("querying properties of {handle}");
        let map = session
            .get_all_properties(&self.target.service, handle.as_str(), &self.target.interface)
            .await
            .map_err(FetchError::PropertyQuery)?;

        let properties = ConfigProperties::from_map(&map);

        debug!("validating {handle}");
        match properties.valid {
            Some(true) => {}
            Some(false) => {
                return Err(FetchError::Validation(
                    "configuration is not valid".to_string(),
                ))
            }
            None => {
                return Err(FetchError::Validation(
                    "service did not report a validity flag".to_string(),
                ))
            }
        }

        debug!("fetching content of {handle}");
        let values = session
            .call(&self.target.service, handle.as_str(), &self.target.interface, "Fetch")
            .await
            .map_err(FetchError::Fetch)?;

        let content = values
            .first()
            .and_then(|v| v.as_str())
            .ok_or_else(|| FetchError::Fetch(anyhow!("Fetch returned no string payload")))?
            .to_string();

        debug!("rendering {handle}");
        Ok(FetchOutcome::new(properties, content))
    }
}
