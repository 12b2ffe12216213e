//! Centralized status→(label, color) mapping tables.
//!
//! Every place a status enum is displayed consumes these tables; the
//! colors are the console's palette names, not terminal escapes.

use crate::activation::ActivationMode;
use crate::license::{DeploymentStatus, LicenseStatus, PurchaseType};
use crate::order::OrderStatus;

/// Display attributes of one enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub color: &'static str,
}

impl OrderStatus {
    pub const fn style(&self) -> StatusStyle {
        match self {
            OrderStatus::Pending => StatusStyle { label: "pending review", color: "gold" },
            OrderStatus::Approved => StatusStyle { label: "approved", color: "green" },
            OrderStatus::Rejected => StatusStyle { label: "rejected", color: "red" },
            OrderStatus::Completed => StatusStyle { label: "completed", color: "blue" },
        }
    }
}

impl LicenseStatus {
    pub const fn style(&self) -> StatusStyle {
        match self {
            LicenseStatus::Active => StatusStyle { label: "active", color: "green" },
            LicenseStatus::Expired => StatusStyle { label: "expired", color: "red" },
            LicenseStatus::Terminated => StatusStyle { label: "terminated", color: "volcano" },
            LicenseStatus::Pending => StatusStyle { label: "pending activation", color: "gold" },
        }
    }
}

impl DeploymentStatus {
    pub const fn style(&self) -> StatusStyle {
        match self {
            DeploymentStatus::Planned => StatusStyle { label: "planned", color: "gold" },
            DeploymentStatus::InProgress => StatusStyle { label: "in progress", color: "blue" },
            DeploymentStatus::Completed => StatusStyle { label: "completed", color: "green" },
            DeploymentStatus::Failed => StatusStyle { label: "failed", color: "red" },
        }
    }
}

impl PurchaseType {
    pub const fn style(&self) -> StatusStyle {
        match self {
            PurchaseType::New => StatusStyle { label: "initial purchase", color: "blue" },
            PurchaseType::Renewal => StatusStyle { label: "renewal", color: "blue" },
            PurchaseType::Upgrade => StatusStyle { label: "upgrade", color: "green" },
            PurchaseType::Expansion => StatusStyle { label: "expansion", color: "purple" },
        }
    }
}

impl ActivationMode {
    pub const fn style(&self) -> StatusStyle {
        match self {
            ActivationMode::Online => StatusStyle { label: "online activation", color: "blue" },
            ActivationMode::Offline => StatusStyle { label: "offline activation", color: "purple" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_styles() {
        assert_eq!(OrderStatus::Pending.style().color, "gold");
        assert_eq!(OrderStatus::Approved.style().color, "green");
        assert_eq!(OrderStatus::Rejected.style().color, "red");
        assert_eq!(OrderStatus::Completed.style().color, "blue");
    }

    #[test]
    fn license_status_styles() {
        assert_eq!(LicenseStatus::Active.style().color, "green");
        assert_eq!(LicenseStatus::Expired.style().color, "red");
        assert_eq!(LicenseStatus::Terminated.style().color, "volcano");
        assert_eq!(LicenseStatus::Pending.style().color, "gold");
    }

    #[test]
    fn deployment_status_styles() {
        assert_eq!(DeploymentStatus::Completed.style().color, "green");
        assert_eq!(DeploymentStatus::InProgress.style().color, "blue");
        assert_eq!(DeploymentStatus::Planned.style().color, "gold");
        assert_eq!(DeploymentStatus::Failed.style().color, "red");
    }
}
