//! Purchase orders and the review workflow.
//!
//! An order is created PENDING (manually or via the partner API) and is
//! moved to APPROVED or REJECTED by a reviewer. COMPLETED is reached
//! asynchronously once the service finishes license creation — the
//! client never sets it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::activation::ActivationMode;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "APPROVED" => Ok(OrderStatus::Approved),
            "REJECTED" => Ok(OrderStatus::Rejected),
            "COMPLETED" => Ok(OrderStatus::Completed),
            other => Err(ApiError::Validation(format!("unknown order status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSource {
    Api,
    Manual,
    Partner,
}

impl OrderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSource::Api => "API",
            OrderSource::Manual => "MANUAL",
            OrderSource::Partner => "PARTNER",
        }
    }
}

impl std::str::FromStr for OrderSource {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "API" => Ok(OrderSource::Api),
            "MANUAL" => Ok(OrderSource::Manual),
            "PARTNER" => Ok(OrderSource::Partner),
            other => Err(ApiError::Validation(format!("unknown order source: {}", other))),
        }
    }
}

/// A purchase order as the service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub order_id: i64,

    /// Unique business key.
    pub po_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    pub customer_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    pub license_type: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub authorized_workspaces: u32,
    #[serde(default)]
    pub authorized_users: u32,

    pub order_date: NaiveDate,

    #[serde(default)]
    pub order_status: OrderStatus,
    pub order_source: OrderSource,

    #[serde(default)]
    pub activation_mode: ActivationMode,

    /// Required iff `activation_mode` is OFFLINE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Set once an approved order has produced its license.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_quantity() -> u32 {
    1
}

fn default_currency() -> String {
    "USD".into()
}

/// One page of an order listing.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPage {
    pub items: Vec<Order>,
    pub total: i64,
}

/// Filters for the order listing endpoint.
#[derive(Debug, Clone)]
pub struct OrderQuery {
    pub skip: usize,
    pub limit: usize,
    pub po_number: Option<String>,
    pub customer_name: Option<String>,
    pub order_status: Option<OrderStatus>,
    pub order_source: Option<OrderSource>,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 10,
            po_number: None,
            customer_name: None,
            order_status: None,
            order_source: None,
        }
    }
}

impl OrderQuery {
    /// Assemble query pairs; unset filters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("skip", self.skip.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(ref po) = self.po_number {
            pairs.push(("po_number", po.clone()));
        }
        if let Some(ref name) = self.customer_name {
            pairs.push(("customer_name", name.clone()));
        }
        if let Some(status) = self.order_status {
            pairs.push(("order_status", status.as_str().to_string()));
        }
        if let Some(source) = self.order_source {
            pairs.push(("order_source", source.as_str().to_string()));
        }
        pairs
    }
}

/// A reviewer's decision. The two shortcut actions pre-fill the target
/// status before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Outgoing payload for the update-status endpoint. Submitted
/// atomically as one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRequest {
    pub order_status: OrderStatus,
    pub review_notes: String,
}

impl ReviewRequest {
    /// Review notes are mandatory regardless of the decision.
    pub fn new(decision: ReviewDecision, notes: &str) -> Result<Self, ApiError> {
        let notes = notes.trim();
        if notes.is_empty() {
            return Err(ApiError::Validation("review notes are required".into()));
        }
        let order_status = match decision {
            ReviewDecision::Approve => OrderStatus::Approved,
            ReviewDecision::Reject => OrderStatus::Rejected,
        };
        Ok(Self {
            order_status,
            review_notes: notes.to_string(),
        })
    }
}

/// Payload for manual order creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub po_number: String,
    pub customer_id: i64,
    pub customer_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    pub license_type: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub authorized_workspaces: u32,
    #[serde(default)]
    pub authorized_users: u32,

    pub order_date: NaiveDate,

    #[serde(default)]
    pub activation_mode: ActivationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    #[serde(default = "manual_source")]
    pub order_source: OrderSource,
}

fn manual_source() -> OrderSource {
    OrderSource::Manual
}

impl OrderCreate {
    /// Client-side validation, run before any request is sent.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.po_number.trim().is_empty() {
            return Err(ApiError::Validation("po_number is required".into()));
        }
        if self.customer_name.trim().is_empty() {
            return Err(ApiError::Validation("customer_name is required".into()));
        }
        if self.activation_mode == ActivationMode::Offline
            && self.cluster_id.as_deref().map_or(true, |c| c.trim().is_empty())
        {
            return Err(ApiError::Validation(
                "cluster_id is required for OFFLINE activation".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(mode: ActivationMode, cluster: Option<&str>) -> OrderCreate {
        OrderCreate {
            po_number: "PO-2025-001".into(),
            customer_id: 7,
            customer_name: "Acme".into(),
            contact_person: None,
            contact_email: None,
            contact_phone: None,
            product_name: "Widget Server".into(),
            product_version: Some("3.1".into()),
            license_type: "enterprise".into(),
            quantity: 1,
            amount: 1200.0,
            currency: "USD".into(),
            authorized_workspaces: 10,
            authorized_users: 100,
            order_date: "2025-03-01".parse().unwrap(),
            activation_mode: mode,
            cluster_id: cluster.map(String::from),
            order_source: OrderSource::Manual,
        }
    }

    #[test]
    fn approve_sets_approved_status() {
        let req = ReviewRequest::new(ReviewDecision::Approve, "looks good").unwrap();
        assert_eq!(req.order_status, OrderStatus::Approved);
        assert_eq!(req.review_notes, "looks good");
    }

    #[test]
    fn reject_sets_rejected_status() {
        let req = ReviewRequest::new(ReviewDecision::Reject, "missing PO scan").unwrap();
        assert_eq!(req.order_status, OrderStatus::Rejected);
    }

    #[test]
    fn review_notes_are_mandatory() {
        assert!(ReviewRequest::new(ReviewDecision::Approve, "").is_err());
        assert!(ReviewRequest::new(ReviewDecision::Reject, "   ").is_err());
    }

    #[test]
    fn review_payload_shape() {
        let req = ReviewRequest::new(ReviewDecision::Approve, "ok").unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"order_status": "APPROVED", "review_notes": "ok"})
        );
    }

    #[test]
    fn offline_order_requires_cluster() {
        assert!(create_payload(ActivationMode::Offline, None).validate().is_err());
        assert!(create_payload(ActivationMode::Offline, Some(""))
            .validate()
            .is_err());
        assert!(create_payload(ActivationMode::Offline, Some("c1"))
            .validate()
            .is_ok());
        // ONLINE orders do not need a cluster.
        assert!(create_payload(ActivationMode::Online, None).validate().is_ok());
    }

    #[test]
    fn query_pairs_include_only_set_filters() {
        let query = OrderQuery::default();
        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![("skip", "0".to_string()), ("limit", "10".to_string())]
        );

        let query = OrderQuery {
            skip: 20,
            limit: 10,
            po_number: Some("PO-1".into()),
            customer_name: None,
            order_status: Some(OrderStatus::Pending),
            order_source: Some(OrderSource::Partner),
        };
        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("po_number", "PO-1".to_string())));
        assert!(pairs.contains(&("order_status", "PENDING".to_string())));
        assert!(pairs.contains(&("order_source", "PARTNER".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "customer_name"));
    }

    #[test]
    fn order_roundtrip() {
        let json = serde_json::json!({
            "order_id": 42,
            "po_number": "PO-2025-001",
            "customer_name": "Acme",
            "product_name": "Widget Server",
            "license_type": "enterprise",
            "amount": 1200.0,
            "order_date": "2025-03-01",
            "order_status": "PENDING",
            "order_source": "PARTNER",
            "activation_mode": "OFFLINE",
            "cluster_id": "c1"
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.order_id, 42);
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.quantity, 1);
        assert_eq!(order.currency, "USD");
        assert_eq!(order.activation_mode, ActivationMode::Offline);
        assert_eq!(order.cluster_id.as_deref(), Some("c1"));
    }
}
