//! Activation commands: info, history, mode switch, code regeneration.
//!
//! The two mutating commands drive a `DialogState` through
//! Editing → Submitting → Closed, so a workflow instance fires exactly
//! one request and always closes whatever the outcome.

use std::path::Path;

use anyhow::Result;
use licctl_core::{
    ActivationChange, ActivationInfo, ChangeActivationRequest, ChangeKind, DialogState,
    RegenerateRequest,
};

use super::{build_client, print_json};

/// Show the activation state of a license.
pub fn info(license_id: &str, json_output: bool, config_path: &Path) -> Result<()> {
    let client = build_client(config_path)?;
    let info = client.activation_info(license_id)?;

    if json_output {
        return print_json(&info);
    }
    print_info(&info);
    Ok(())
}

/// Show the activation history of a license, in service order.
pub fn history(license_id: &str, json_output: bool, config_path: &Path) -> Result<()> {
    let client = build_client(config_path)?;
    let info = client.activation_info(license_id)?;

    if json_output {
        return print_json(&info.activation_history);
    }

    let lines = format_history(info.history());
    if lines.is_empty() {
        println!("No activation changes recorded for license {}.", license_id);
        return Ok(());
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// Toggle the activation mode of a license.
///
/// The target is always the opposite of the current mode: a cluster ID
/// is required when going OFFLINE and cleared when going ONLINE. On
/// success the printed state is the response's, not the old cache.
pub fn switch(
    license_id: &str,
    cluster_id: Option<&str>,
    reason: Option<&str>,
    json_output: bool,
    config_path: &Path,
) -> Result<()> {
    let client = build_client(config_path)?;
    let mut cached = client.activation_info(license_id)?;

    let request =
        ChangeActivationRequest::toggle(cached.activation_mode, cluster_id, reason)?;

    let mut dialog = DialogState::default();
    dialog.open();
    if !dialog.submit() {
        anyhow::bail!("A mode change is already in flight.");
    }
    let result = client.change_activation(license_id, &request);
    dialog.finish();

    match result {
        Ok(response) => {
            cached.apply_change(&response);
            if json_output {
                return print_json(&cached);
            }
            if !response.message.is_empty() {
                println!("{}", response.message);
            }
            print_info(&cached);
            Ok(())
        }
        Err(e) => {
            // Cache stays at its last-known-good values.
            Err(anyhow::anyhow!("Mode change failed: {}", e))
        }
    }
}

/// Regenerate the offline activation code. Only meaningful while the
/// license is OFFLINE; the mode is left untouched.
pub fn regenerate(
    license_id: &str,
    cluster_id: &str,
    reason: Option<&str>,
    json_output: bool,
    config_path: &Path,
) -> Result<()> {
    let request = RegenerateRequest::new(cluster_id, reason)?;
    let client = build_client(config_path)?;
    let mut cached = client.activation_info(license_id)?;

    let mut dialog = DialogState::default();
    dialog.open();
    if !dialog.submit() {
        anyhow::bail!("A regeneration is already in flight.");
    }
    let result = client.regenerate_offline_code(license_id, &request);
    dialog.finish();

    match result {
        Ok(response) => {
            cached.apply_regenerated(&response);
            if json_output {
                return print_json(&cached);
            }
            if !response.message.is_empty() {
                println!("{}", response.message);
            }
            print_info(&cached);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Regeneration failed: {}", e)),
    }
}

fn print_info(info: &ActivationInfo) {
    println!("License:      {}", info.license_id);
    println!("Mode:         {}", info.activation_mode.style().label);
    if let Some(cluster) = &info.cluster_id {
        println!("Cluster:      {}", cluster);
    }
    if let Some(code) = &info.offline_code {
        println!("Offline code: {}", code);
    }
    match info.last_activation_change {
        Some(at) => println!("Last change:  {}", at.to_rfc3339()),
        None => println!("Last change:  never"),
    }
}

/// One line per history entry; input order preserved.
fn format_history(changes: &[ActivationChange]) -> Vec<String> {
    changes
        .iter()
        .map(|change| {
            let marker = match change.kind() {
                ChangeKind::Regeneration => "regen ",
                ChangeKind::Switch => "switch",
            };
            let mut line = format!(
                "{}  {}  {}",
                change.timestamp.to_rfc3339(),
                marker,
                change.describe()
            );
            if let Some(cluster) = &change.cluster_id {
                line.push_str(&format!(" [cluster {}]", cluster));
            }
            if let Some(reason) = &change.reason {
                line.push_str(&format!(" ({})", reason));
            }
            line
        })
        .collect()
}
