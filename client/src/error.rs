//! Error taxonomy for the fetch pipeline
use thiserror::Error;

/// One category per pipeline stage. All of these are fatal for the run;
/// the bus session is still released before any of them propagate.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Session establishment failed
    #[error("connect: {0}")]
    Connection(anyhow::Error),

    /// Property query failed at the transport or service layer
    #[error("property query: {0}")]
    PropertyQuery(anyhow::Error),

    /// Property map retrieved but the object is unusable
    #[error("validation: {0}")]
    Validation(String),

    /// Content retrieval failed after validation passed
    #[error("fetch: {0}")]
    Fetch(anyhow::Error),
}

impl FetchError {
    /// Stable category label, used in reporting and tests
    pub fn category(&self) -> &'static str {
        match self {
            FetchError::Connection(_) => "connect",
            FetchError::PropertyQuery(_) => "property query",
            FetchError::Validation(_) => "validation",
            FetchError::Fetch(_) => "fetch",
        }
    }
}

// -- Tests --
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn messages_carry_the_category() {
        let e = FetchError::Connection(anyhow!("no bus"));
        assert_eq!(e.to_string(), "connect: no bus");
        assert_eq!(e.category(), "connect");

        let e = FetchError::Validation("configuration is not valid".to_string());
        assert_eq!(e.to_string(), "validation: configuration is not valid");
        assert_eq!(e.category(), "validation");
    }
}
