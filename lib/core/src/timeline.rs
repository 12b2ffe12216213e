//! Lifecycle timeline projection.
//!
//! Pure derivation from a license record; no network calls and no
//! clock access — `now` is injected. Entries are emitted in a fixed
//! order (creation, deployment, usage, purchases in record order,
//! expiry), not re-sorted by time.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::license::{DeploymentStatus, License, LicenseStatus, PurchaseType, UsageGauge};

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    /// License issued from its order.
    Created {
        license_id: String,
        sales_rep: Option<String>,
    },
    Deployment {
        status: DeploymentStatus,
    },
    /// Snapshot of current usage; dated by the last check when known.
    Usage {
        workspaces: UsageGauge,
        users: UsageGauge,
    },
    Purchase {
        purchase_type: PurchaseType,
        order_number: Option<String>,
        previous_expiry: Option<NaiveDate>,
        new_expiry: Option<NaiveDate>,
        workspaces_added: u32,
        users_added: u32,
    },
    Expiry {
        expired: bool,
        /// Whole calendar days left; absent once expired.
        days_remaining: Option<i64>,
        status: LicenseStatus,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    /// Usage entries may be undated when no check has run yet.
    pub date: Option<NaiveDate>,
    pub color: &'static str,
    pub event: TimelineEvent,
}

/// Derive the lifecycle timeline for a license.
pub fn project_timeline(license: &License, now: DateTime<Utc>) -> Vec<TimelineEntry> {
    let mut entries = Vec::new();

    if let Some(order_date) = license.order_date {
        entries.push(TimelineEntry {
            date: Some(order_date),
            color: "blue",
            event: TimelineEvent::Created {
                license_id: license.license_id.clone(),
                sales_rep: license.sales_rep_name.clone(),
            },
        });
    }

    if let Some(deployment_date) = license.deployment_date {
        entries.push(TimelineEntry {
            date: Some(deployment_date),
            color: license.deployment_status.style().color,
            event: TimelineEvent::Deployment {
                status: license.deployment_status,
            },
        });
    }

    if license.actual_workspaces > 0 || license.actual_users > 0 {
        entries.push(TimelineEntry {
            date: license.last_check_date,
            color: "green",
            event: TimelineEvent::Usage {
                workspaces: license.workspace_usage(),
                users: license.user_usage(),
            },
        });
    }

    for record in &license.purchase_records {
        entries.push(TimelineEntry {
            date: Some(record.purchase_date),
            color: record.purchase_type.style().color,
            event: TimelineEvent::Purchase {
                purchase_type: record.purchase_type,
                order_number: record.order_number.clone(),
                previous_expiry: record.previous_expiry_date,
                new_expiry: record.new_expiry_date,
                workspaces_added: record.workspaces_purchased,
                users_added: record.users_purchased,
            },
        });
    }

    if let Some(expiry) = license.expiry_date {
        let expired = is_expired(expiry, now);
        let days_remaining = if expired { None } else { Some(days_until(expiry, now)) };
        entries.push(TimelineEntry {
            date: Some(expiry),
            color: if expired { "red" } else { "orange" },
            event: TimelineEvent::Expiry {
                expired,
                days_remaining,
                status: license.license_status,
            },
        });
    }

    entries
}

/// Expired once `now` has passed the expiry date's midnight — a
/// license already counts as expired during its expiry day.
pub fn is_expired(expiry: NaiveDate, now: DateTime<Utc>) -> bool {
    expiry.and_time(NaiveTime::MIN).and_utc() < now
}

/// Whole calendar days from `now` until the expiry midnight.
pub fn days_until(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    (expiry.and_time(NaiveTime::MIN).and_utc() - now).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::PurchaseRecord;

    fn base_license() -> License {
        serde_json::from_value(serde_json::json!({
            "LicenseID": "LIC-1",
            "CustomerID": 1,
            "ProductName": "Widget Server",
            "LicenseType": "enterprise",
            "StartDate": "2025-01-01",
            "LicenseStatus": "ACTIVE",
            "DeploymentStatus": "COMPLETED"
        }))
        .unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn emission_order_is_fixed() {
        let mut license = base_license();
        license.order_date = Some("2025-01-01".parse().unwrap());
        license.deployment_date = Some("2025-01-10".parse().unwrap());
        license.expiry_date = Some("2026-01-01".parse().unwrap());
        license.actual_workspaces = 5;
        license.authorized_workspaces = 10;
        // Purchase dated before deployment — must still come after the
        // usage entry: emission order is positional, not chronological.
        license.purchase_records = vec![PurchaseRecord {
            purchase_id: 1,
            license_id: "LIC-1".into(),
            purchase_type: PurchaseType::Renewal,
            purchase_date: "2025-01-05".parse().unwrap(),
            order_number: None,
            amount: 0.0,
            currency: "USD".into(),
            workspaces_purchased: 0,
            users_purchased: 0,
            previous_expiry_date: None,
            new_expiry_date: None,
        }];

        let entries = project_timeline(&license, at("2025-06-01T00:00:00Z"));
        assert_eq!(entries.len(), 5);
        assert!(matches!(entries[0].event, TimelineEvent::Created { .. }));
        assert!(matches!(entries[1].event, TimelineEvent::Deployment { .. }));
        assert!(matches!(entries[2].event, TimelineEvent::Usage { .. }));
        assert!(matches!(entries[3].event, TimelineEvent::Purchase { .. }));
        assert!(matches!(entries[4].event, TimelineEvent::Expiry { .. }));
    }

    #[test]
    fn entries_are_guarded_by_presence() {
        // No order date, no deployment, no usage, no purchases, no expiry.
        let license = base_license();
        let entries = project_timeline(&license, at("2025-06-01T00:00:00Z"));
        assert!(entries.is_empty());
    }

    #[test]
    fn usage_entry_requires_some_usage() {
        let mut license = base_license();
        license.authorized_workspaces = 100;
        license.authorized_users = 50;
        let entries = project_timeline(&license, at("2025-06-01T00:00:00Z"));
        assert!(entries.is_empty());

        license.actual_users = 1;
        let entries = project_timeline(&license, at("2025-06-01T00:00:00Z"));
        assert_eq!(entries.len(), 1);
        match &entries[0].event {
            TimelineEvent::Usage { users, .. } => {
                assert_eq!(users.actual, 1);
                assert!(!users.over_quota);
            }
            other => panic!("expected usage entry, got {:?}", other),
        }
        // Undated: no check has run.
        assert_eq!(entries[0].date, None);
    }

    #[test]
    fn over_quota_usage_is_flagged() {
        let mut license = base_license();
        license.authorized_workspaces = 100;
        license.actual_workspaces = 120;
        let entries = project_timeline(&license, at("2025-06-01T00:00:00Z"));
        match &entries[0].event {
            TimelineEvent::Usage { workspaces, .. } => {
                assert_eq!(workspaces.percent, 100);
                assert!(workspaces.over_quota);
            }
            other => panic!("expected usage entry, got {:?}", other),
        }
    }

    #[test]
    fn future_expiry_reports_remaining_days() {
        let mut license = base_license();
        license.expiry_date = Some("2025-06-11".parse().unwrap());
        let entries = project_timeline(&license, at("2025-06-01T00:00:00Z"));
        match &entries[0].event {
            TimelineEvent::Expiry { expired, days_remaining, .. } => {
                assert!(!expired);
                assert_eq!(*days_remaining, Some(10));
            }
            other => panic!("expected expiry entry, got {:?}", other),
        }
        assert_eq!(entries[0].color, "orange");
    }

    #[test]
    fn past_expiry_is_expired() {
        let mut license = base_license();
        license.expiry_date = Some("2025-05-01".parse().unwrap());
        let entries = project_timeline(&license, at("2025-06-01T00:00:00Z"));
        match &entries[0].event {
            TimelineEvent::Expiry { expired, days_remaining, .. } => {
                assert!(expired);
                assert_eq!(*days_remaining, None);
            }
            other => panic!("expected expiry entry, got {:?}", other),
        }
        assert_eq!(entries[0].color, "red");
    }

    #[test]
    fn expiry_day_itself_counts_as_expired() {
        // Midnight of the expiry date is strictly before any later
        // instant that same day.
        let mut license = base_license();
        license.expiry_date = Some("2025-06-01".parse().unwrap());
        let entries = project_timeline(&license, at("2025-06-01T10:00:00Z"));
        match &entries[0].event {
            TimelineEvent::Expiry { expired, .. } => assert!(expired),
            other => panic!("expected expiry entry, got {:?}", other),
        }
    }

    #[test]
    fn projection_is_idempotent() {
        let mut license = base_license();
        license.order_date = Some("2025-01-01".parse().unwrap());
        license.expiry_date = Some("2026-01-01".parse().unwrap());
        let now = at("2025-06-01T00:00:00Z");
        assert_eq!(project_timeline(&license, now), project_timeline(&license, now));
    }
}
