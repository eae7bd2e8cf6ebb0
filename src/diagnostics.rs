//! Console diagnostics
//!
//! The shim's only failure surface is its diagnostics: a learner never sees
//! an error dialog, progress just silently fails to persist. Embedding hosts
//! call [`init`] once at startup to get those diagnostics onto the console.

use eyre::Result;
use tracing_subscriber::EnvFilter;

/// Install the console subscriber. Honors `RUST_LOG`, defaulting to `info`.
///
/// Errors if a global subscriber is already set - embedders with their own
/// tracing setup should simply not call this.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("failed to install tracing subscriber: {e}"))?;
    Ok(())
}
