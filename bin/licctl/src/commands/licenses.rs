//! License commands: detail view and lifecycle timeline.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use licctl_core::{project_timeline, TimelineEntry, TimelineEvent, UsageGauge};

use super::{build_client, print_json};

/// Show one license.
pub fn get(license_id: &str, json_output: bool, config_path: &Path) -> Result<()> {
    let client = build_client(config_path)?;
    let license = client.get_license(license_id)?;

    if json_output {
        return print_json(&license);
    }

    println!("License:      {}", license.license_id);
    println!(
        "Product:      {} {}",
        license.product_name,
        license.product_version.as_deref().unwrap_or("")
    );
    println!("Type:         {}", license.license_type);
    println!("Status:       {}", license.license_status.style().label);
    println!("Deployment:   {}", license.deployment_status.style().label);
    println!("Start date:   {}", license.start_date);
    if let Some(expiry) = license.expiry_date {
        println!("Expiry date:  {}", expiry);
    }
    print_usage("Workspaces", license.workspace_usage());
    print_usage("Users", license.user_usage());
    Ok(())
}

/// Render the lifecycle timeline of a license.
pub fn timeline(license_id: &str, json_output: bool, config_path: &Path) -> Result<()> {
    let client = build_client(config_path)?;
    let license = client.get_license(license_id)?;
    let entries = project_timeline(&license, Utc::now());

    if json_output {
        let values: Vec<_> = entries.iter().map(entry_json).collect();
        return print_json(&values);
    }

    if entries.is_empty() {
        println!("No lifecycle events for license {}.", license.license_id);
        return Ok(());
    }

    for entry in &entries {
        println!("{}", render_entry(entry));
    }
    Ok(())
}

fn print_usage(label: &str, gauge: UsageGauge) {
    let flag = if gauge.over_quota { "  OVER QUOTA" } else { "" };
    println!(
        "{:13} {}/{} ({}%){}",
        format!("{}:", label),
        gauge.actual,
        gauge.authorized,
        gauge.percent,
        flag
    );
}

/// One line per entry, date column first.
fn render_entry(entry: &TimelineEntry) -> String {
    let date = entry
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "latest".to_string());

    let text = match &entry.event {
        TimelineEvent::Created { license_id, sales_rep } => match sales_rep {
            Some(rep) => format!("license {} created (sales rep: {})", license_id, rep),
            None => format!("license {} created", license_id),
        },
        TimelineEvent::Deployment { status } => {
            format!("deployment {}", status.style().label)
        }
        TimelineEvent::Usage { workspaces, users } => {
            format!(
                "usage: workspaces {}/{}{}, users {}/{}{}",
                workspaces.actual,
                workspaces.authorized,
                if workspaces.over_quota { " (over quota)" } else { "" },
                users.actual,
                users.authorized,
                if users.over_quota { " (over quota)" } else { "" },
            )
        }
        TimelineEvent::Purchase {
            purchase_type,
            order_number,
            previous_expiry,
            new_expiry,
            workspaces_added,
            users_added,
        } => {
            let mut text = purchase_type.style().label.to_string();
            if let Some(po) = order_number {
                text.push_str(&format!(" (order {})", po));
            }
            if let (Some(prev), Some(new)) = (previous_expiry, new_expiry) {
                text.push_str(&format!(", expiry {} -> {}", prev, new));
            }
            if *workspaces_added > 0 {
                text.push_str(&format!(", +{} workspaces", workspaces_added));
            }
            if *users_added > 0 {
                text.push_str(&format!(", +{} users", users_added));
            }
            text
        }
        TimelineEvent::Expiry { expired, days_remaining, status } => {
            if *expired {
                format!("expired ({})", status.style().label)
            } else {
                match days_remaining {
                    Some(days) => format!("expires in {} days", days),
                    None => "expiry".to_string(),
                }
            }
        }
    };

    format!("{:12} {}", date, text)
}

fn entry_json(entry: &TimelineEntry) -> serde_json::Value {
    let (kind, detail) = match &entry.event {
        TimelineEvent::Created { license_id, sales_rep } => (
            "created",
            serde_json::json!({"license_id": license_id, "sales_rep": sales_rep}),
        ),
        TimelineEvent::Deployment { status } => (
            "deployment",
            serde_json::json!({"status": status.as_str()}),
        ),
        TimelineEvent::Usage { workspaces, users } => (
            "usage",
            serde_json::json!({
                "workspaces": {
                    "actual": workspaces.actual,
                    "authorized": workspaces.authorized,
                    "percent": workspaces.percent,
                    "over_quota": workspaces.over_quota,
                },
                "users": {
                    "actual": users.actual,
                    "authorized": users.authorized,
                    "percent": users.percent,
                    "over_quota": users.over_quota,
                },
            }),
        ),
        TimelineEvent::Purchase {
            purchase_type,
            order_number,
            previous_expiry,
            new_expiry,
            workspaces_added,
            users_added,
        } => (
            "purchase",
            serde_json::json!({
                "purchase_type": purchase_type.as_str(),
                "order_number": order_number,
                "previous_expiry": previous_expiry,
                "new_expiry": new_expiry,
                "workspaces_added": workspaces_added,
                "users_added": users_added,
            }),
        ),
        TimelineEvent::Expiry { expired, days_remaining, status } => (
            "expiry",
            serde_json::json!({
                "expired": expired,
                "days_remaining": days_remaining,
                "status": status.as_str(),
            }),
        ),
    };

    serde_json::json!({
        "kind": kind,
        "date": entry.date,
        "color": entry.color,
        "detail": detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use licctl_core::License;

    fn license_with_everything() -> License {
        serde_json::from_value(serde_json::json!({
            "LicenseID": "LIC-1",
            "CustomerID": 1,
            "ProductName": "Widget Server",
            "LicenseType": "enterprise",
            "OrderDate": "2025-01-01",
            "StartDate": "2025-01-01",
            "ExpiryDate": "2026-01-01",
            "AuthorizedWorkspaces": 100,
            "ActualWorkspaces": 120,
            "LicenseStatus": "ACTIVE",
            "DeploymentStatus": "COMPLETED",
            "SalesRepName": "Dana"
        }))
        .unwrap()
    }

    #[test]
    fn rendering_is_stable_for_same_input() {
        let license = license_with_everything();
        let now: DateTime<Utc> = "2025-06-01T00:00:00Z".parse().unwrap();
        let first: Vec<String> = project_timeline(&license, now)
            .iter()
            .map(render_entry)
            .collect();
        let second: Vec<String> = project_timeline(&license, now)
            .iter()
            .map(render_entry)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn over_quota_usage_is_visible() {
        let license = license_with_everything();
        let now: DateTime<Utc> = "2025-06-01T00:00:00Z".parse().unwrap();
        let lines: Vec<String> = project_timeline(&license, now)
            .iter()
            .map(render_entry)
            .collect();
        assert!(lines.iter().any(|l| l.contains("over quota")));
    }

    #[test]
    fn undated_usage_renders_latest() {
        let mut license = license_with_everything();
        license.order_date = None;
        license.expiry_date = None;
        license.last_check_date = None;
        let now: DateTime<Utc> = "2025-06-01T00:00:00Z".parse().unwrap();
        let entries = project_timeline(&license, now);
        assert_eq!(entries.len(), 1);
        assert!(render_entry(&entries[0]).starts_with("latest"));
    }
}
