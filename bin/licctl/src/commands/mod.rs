//! Command implementations.

pub mod activation;
pub mod context;
pub mod licenses;
pub mod login;
pub mod orders;

use std::path::Path;

use anyhow::Result;
use licctl_client::{ApiClient, Session};
use tracing::debug;

use crate::config::ClientConfig;

/// Build a client for the current context.
///
/// The on-unauthorized hook erases the persisted token, so the next
/// invocation starts logged out instead of retrying a dead session.
pub fn build_client(config_path: &Path) -> Result<ApiClient> {
    let config = ClientConfig::load(config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `licctl use context <name>`."))?;

    let server = ctx.resolve_server().ok_or_else(|| {
        anyhow::anyhow!(
            "No server URL set for context \"{}\". Run `licctl context set {} --server <url>` or set LICCTL_SERVER.",
            ctx.name,
            ctx.name
        )
    })?;

    debug!(context = %ctx.name, "building client");
    let session = Session::new(server).with_token(ctx.token.clone());

    let ctx_name = ctx.name.clone();
    let path = config_path.to_path_buf();
    let client = ApiClient::new(session)?.on_unauthorized(move || {
        if let Ok(mut config) = ClientConfig::load(&path) {
            if let Some(ctx) = config.get_mut(&ctx_name) {
                ctx.token = String::new();
                let _ = config.save(&path);
            }
        }
        eprintln!("Session expired, logged out. Run `licctl login` to sign in again.");
    });

    Ok(client)
}

/// Pretty-print any serializable value.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
