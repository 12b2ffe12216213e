//! License records and their child collections.
//!
//! Licenses use PascalCase wire names (with `LicenseID`-style ID
//! fields), unlike orders and activation info which are snake_case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseStatus {
    Active,
    Expired,
    Terminated,
    Pending,
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Active => "ACTIVE",
            LicenseStatus::Expired => "EXPIRED",
            LicenseStatus::Terminated => "TERMINATED",
            LicenseStatus::Pending => "PENDING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    Planned,
    InProgress,
    Completed,
    Failed,
}

impl Default for DeploymentStatus {
    fn default() -> Self {
        Self::Planned
    }
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Planned => "PLANNED",
            DeploymentStatus::InProgress => "IN_PROGRESS",
            DeploymentStatus::Completed => "COMPLETED",
            DeploymentStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseType {
    New,
    Renewal,
    Upgrade,
    Expansion,
}

impl PurchaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::New => "NEW",
            PurchaseType::Renewal => "RENEWAL",
            PurchaseType::Upgrade => "UPGRADE",
            PurchaseType::Expansion => "EXPANSION",
        }
    }
}

/// A renewal/upgrade/expansion event on a license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseRecord {
    #[serde(rename = "PurchaseID", default)]
    pub purchase_id: i64,
    #[serde(rename = "LicenseID", default)]
    pub license_id: String,

    pub purchase_type: PurchaseType,
    pub purchase_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub workspaces_purchased: u32,
    #[serde(default)]
    pub users_purchased: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_expiry_date: Option<NaiveDate>,
}

fn default_currency() -> String {
    "USD".into()
}

/// A deployment attempt on a license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentRecord {
    #[serde(rename = "DeploymentID", default)]
    pub deployment_id: i64,
    #[serde(rename = "LicenseID", default)]
    pub license_id: String,

    pub deployment_date: NaiveDate,
    pub deployed_by: String,

    #[serde(default)]
    pub deployment_status: DeploymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A software license as the service returns it.
///
/// Usage (`Actual*`) may exceed capacity (`Authorized*`); that is
/// reported as over-quota, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct License {
    #[serde(rename = "LicenseID")]
    pub license_id: String,
    #[serde(rename = "CustomerID", default)]
    pub customer_id: i64,
    #[serde(rename = "SalesRepID", default, skip_serializing_if = "Option::is_none")]
    pub sales_rep_id: Option<i64>,
    #[serde(rename = "ResellerID", default, skip_serializing_if = "Option::is_none")]
    pub reseller_id: Option<i64>,

    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    pub license_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_date: Option<NaiveDate>,

    #[serde(default)]
    pub authorized_workspaces: u32,
    #[serde(default)]
    pub authorized_users: u32,
    #[serde(default)]
    pub actual_workspaces: u32,
    #[serde(default)]
    pub actual_users: u32,

    pub license_status: LicenseStatus,
    #[serde(default)]
    pub deployment_status: DeploymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_rep_name: Option<String>,

    #[serde(default)]
    pub purchase_records: Vec<PurchaseRecord>,
    #[serde(default)]
    pub deployment_records: Vec<DeploymentRecord>,
}

/// Capacity vs usage for one resource dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageGauge {
    pub actual: u32,
    pub authorized: u32,
    /// Capped at 100; 0 when nothing is authorized.
    pub percent: u8,
    /// Usage exceeds capacity.
    pub over_quota: bool,
}

/// Compute a usage gauge. Percent is rounded, then capped at 100.
pub fn usage_gauge(actual: u32, authorized: u32) -> UsageGauge {
    let percent = if authorized > 0 {
        ((actual as f64 / authorized as f64) * 100.0).round().min(100.0) as u8
    } else {
        0
    };
    UsageGauge {
        actual,
        authorized,
        percent,
        over_quota: actual > authorized,
    }
}

impl License {
    pub fn workspace_usage(&self) -> UsageGauge {
        usage_gauge(self.actual_workspaces, self.authorized_workspaces)
    }

    pub fn user_usage(&self) -> UsageGauge {
        usage_gauge(self.actual_users, self.authorized_users)
    }
}

impl std::str::FromStr for LicenseStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(LicenseStatus::Active),
            "EXPIRED" => Ok(LicenseStatus::Expired),
            "TERMINATED" => Ok(LicenseStatus::Terminated),
            "PENDING" => Ok(LicenseStatus::Pending),
            other => Err(ApiError::Validation(format!("unknown license status: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_within_quota() {
        let gauge = usage_gauge(45, 100);
        assert_eq!(gauge.percent, 45);
        assert!(!gauge.over_quota);
    }

    #[test]
    fn usage_over_quota_caps_percent() {
        let gauge = usage_gauge(120, 100);
        assert_eq!(gauge.percent, 100);
        assert!(gauge.over_quota);
    }

    #[test]
    fn zero_capacity_is_zero_percent() {
        let gauge = usage_gauge(0, 0);
        assert_eq!(gauge.percent, 0);
        assert!(!gauge.over_quota);

        // Any usage against zero capacity is over-quota.
        let gauge = usage_gauge(3, 0);
        assert_eq!(gauge.percent, 0);
        assert!(gauge.over_quota);
    }

    #[test]
    fn wire_names_are_pascal_case() {
        let json = serde_json::json!({
            "LicenseID": "LIC-9",
            "CustomerID": 3,
            "ProductName": "Widget Server",
            "LicenseType": "enterprise",
            "StartDate": "2025-01-01",
            "ExpiryDate": "2026-01-01",
            "OrderDate": "2024-12-15",
            "AuthorizedWorkspaces": 100,
            "ActualWorkspaces": 45,
            "LicenseStatus": "ACTIVE",
            "DeploymentStatus": "IN_PROGRESS",
            "PurchaseRecords": [{
                "PurchaseID": 1,
                "LicenseID": "LIC-9",
                "PurchaseType": "RENEWAL",
                "PurchaseDate": "2025-06-01",
                "OrderNumber": "PO-77",
                "Amount": 500.0,
                "PreviousExpiryDate": "2026-01-01",
                "NewExpiryDate": "2027-01-01"
            }]
        });
        let license: License = serde_json::from_value(json).unwrap();
        assert_eq!(license.license_id, "LIC-9");
        assert_eq!(license.license_status, LicenseStatus::Active);
        assert_eq!(license.deployment_status, DeploymentStatus::InProgress);
        assert_eq!(license.purchase_records.len(), 1);
        assert_eq!(license.purchase_records[0].purchase_type, PurchaseType::Renewal);
        assert_eq!(license.purchase_records[0].order_number.as_deref(), Some("PO-77"));

        let back = serde_json::to_value(&license).unwrap();
        assert_eq!(back["LicenseID"], "LIC-9");
        assert!(back.get("license_id").is_none());
    }
}
