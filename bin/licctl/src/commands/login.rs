//! Login / logout commands.

use anyhow::Result;
use licctl_client::{ApiClient, Session};

use crate::config::ClientConfig;

/// Login to the current context's server and persist the token.
pub fn login(
    username: &str,
    password: &str,
    client_config_path: &std::path::Path,
) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `licctl use context <name>`."))?
        .clone();

    let server = ctx.resolve_server().ok_or_else(|| {
        anyhow::anyhow!(
            "No server URL set for context \"{}\". Run `licctl context set {} --server <url>`.",
            ctx.name,
            ctx.name
        )
    })?;

    // Login is unauthenticated; no token on this session.
    let client = ApiClient::new(Session::new(server))?;
    let token = client
        .login(username, password)
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;

    let ctx_mut = config
        .get_mut(&ctx.name)
        .ok_or_else(|| anyhow::anyhow!("Context disappeared"))?;
    ctx_mut.token = token;
    config.save(client_config_path)?;

    println!("Logged in as {}.", username);
    println!("Token saved to context \"{}\".", ctx.name);
    Ok(())
}

/// Logout — clear token from current context.
pub fn logout(client_config_path: &std::path::Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    let current_name = config.current_context.clone();
    if current_name.is_empty() {
        anyhow::bail!("No current context.");
    }

    let ctx = config
        .get_mut(&current_name)
        .ok_or_else(|| anyhow::anyhow!("Current context not found."))?;

    ctx.token = String::new();
    config.save(client_config_path)?;
    println!("Logged out from context \"{}\".", current_name);
    Ok(())
}
