//! confbus fetch tool
//!
//! Dumps a specific configuration object stored in the configuration
//! service, calling the service's bus methods directly and rendering
//! the result.

use anyhow::Result;
use config::{Config, Environment, File};
use confbus_client::settings::create_client;
use confbus_client::{FetchPipeline, ObjectHandle, ServiceTarget};
use std::env;
use std::process::ExitCode;
use tracing::debug;

/// Standard main
#[tokio::main]
pub async fn main() -> ExitCode {
    // Log to stderr so stdout carries only the rendered configuration
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit with 1, before any bus interaction
    let handle = match parse_args(env::args()) {
        Ok(handle) => handle,
        Err(usage) => {
            println!("{usage}");
            return ExitCode::from(1);
        }
    };

    match run(&handle).await {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("** ERROR ** {e}");
            ExitCode::from(2)
        }
    }
}

/// Check the command line - exactly one argument, a well-formed object
/// path. Anything else is a usage error carrying the message to print.
fn parse_args<I>(mut args: I) -> Result<ObjectHandle, String>
where
    I: Iterator<Item = String>,
{
    let program = args.next().unwrap_or("confbus-fetch".to_string());
    let usage = format!("Usage: {program} <config obj path>");

    match (args.next(), args.next()) {
        (Some(handle), None) => {
            ObjectHandle::parse(&handle).map_err(|e| format!("{usage}\n** ERROR ** {e}"))
        }
        _ => Err(usage),
    }
}

/// Everything past argument handling - any failure here is a pipeline
/// failure reported with exit code 2
async fn run(handle: &ObjectHandle) -> Result<String> {
    // Read the config
    let config = Config::builder()
        .add_source(File::with_name("confbus").required(false))
        .add_source(Environment::with_prefix("CONFBUS"))
        .build()?;

    let client = create_client(&config)?;
    let target = ServiceTarget::from_config(&config);
    debug!("fetching {handle} from {}", target.service);

    let pipeline = FetchPipeline::new(client, target);
    let outcome = pipeline.run(handle).await?;

    Ok(outcome.rendered)
}

// -- Tests --
#[cfg(test)]
mod tests {
    use super::*;

    // parse_args is the whole usage path - no bus client exists until
    // run() is reached with a well-formed handle
    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn missing_argument_is_a_usage_error() {
        let result = parse_args(args(&["confbus-fetch"]));
        assert_eq!(
            result.unwrap_err(),
            "Usage: confbus-fetch <config obj path>"
        );
    }

    #[test]
    fn extra_arguments_are_a_usage_error() {
        let result = parse_args(args(&["confbus-fetch", "/net/a", "/net/b"]));
        assert_eq!(
            result.unwrap_err(),
            "Usage: confbus-fetch <config obj path>"
        );
    }

    #[test]
    fn malformed_handle_is_a_usage_error() {
        let result = parse_args(args(&["confbus-fetch", "not-a-path"]));
        let message = result.unwrap_err();
        assert!(message.starts_with("Usage: confbus-fetch <config obj path>"));
        assert!(message.contains("** ERROR **"));
    }

    #[test]
    fn well_formed_handle_is_accepted() {
        let handle = parse_args(args(&["confbus-fetch", "/net/confbus/configuration/vpn1"]))
            .unwrap();
        assert_eq!(handle.as_str(), "/net/confbus/configuration/vpn1");
    }
}
