//! License activation: modes, history, and the two mutating workflows
//! (mode toggle and offline-code regeneration).
//!
//! The service owns all persisted state. The client assembles request
//! payloads, and on success replaces its cached copy of the three
//! activation fields with exactly what the response carried. History is
//! append-only on the service side and observed only by re-fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// How a license validates itself: against the central service (ONLINE)
/// or via a signed code bound to a cluster (OFFLINE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationMode {
    Online,
    Offline,
}

impl Default for ActivationMode {
    fn default() -> Self {
        Self::Online
    }
}

impl ActivationMode {
    /// Wire spelling, also used in query strings and plain output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationMode::Online => "ONLINE",
            ActivationMode::Offline => "OFFLINE",
        }
    }

    /// The other mode. Toggling is binary by contract.
    pub fn toggled(&self) -> Self {
        match self {
            ActivationMode::Online => ActivationMode::Offline,
            ActivationMode::Offline => ActivationMode::Online,
        }
    }
}

impl std::str::FromStr for ActivationMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ONLINE" => Ok(ActivationMode::Online),
            "OFFLINE" => Ok(ActivationMode::Offline),
            other => Err(ApiError::Validation(format!(
                "unknown activation mode: {}",
                other
            ))),
        }
    }
}

/// One entry of a license's activation history. Recorded by the
/// service, never synthesized or mutated by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationChange {
    pub from_mode: ActivationMode,
    pub to_mode: ActivationMode,
    pub timestamp: DateTime<Utc>,

    /// Present when `to_mode` is OFFLINE — the cluster the code was
    /// bound to at that point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Classification of a history entry for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A genuine mode switch.
    Switch,
    /// `from_mode == to_mode`: the code was regenerated, the mode did
    /// not change.
    Regeneration,
}

impl ActivationChange {
    pub fn kind(&self) -> ChangeKind {
        if self.from_mode == self.to_mode {
            ChangeKind::Regeneration
        } else {
            ChangeKind::Switch
        }
    }

    /// Human-readable one-line description.
    pub fn describe(&self) -> String {
        match self.kind() {
            ChangeKind::Regeneration => format!(
                "regenerated {} activation code",
                self.to_mode.as_str().to_lowercase()
            ),
            ChangeKind::Switch => format!(
                "switched from {} to {} activation",
                self.from_mode.as_str().to_lowercase(),
                self.to_mode.as_str().to_lowercase()
            ),
        }
    }
}

/// Wrapper the service uses for the history collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivationHistory {
    #[serde(default)]
    pub changes: Vec<ActivationChange>,
}

/// Activation state of one license, as returned by the
/// activation-info endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationInfo {
    #[serde(default)]
    pub license_id: String,
    pub activation_mode: ActivationMode,

    /// Meaningful only for OFFLINE.
    #[serde(default)]
    pub cluster_id: Option<String>,

    /// Present only for OFFLINE; a switch to ONLINE invalidates it.
    #[serde(default)]
    pub offline_code: Option<String>,

    #[serde(default)]
    pub last_activation_change: Option<DateTime<Utc>>,

    #[serde(default)]
    pub activation_history: Option<ActivationHistory>,
}

impl ActivationInfo {
    /// History entries in the order the service sent them. The client
    /// never re-sorts; missing history is an empty slice.
    pub fn history(&self) -> &[ActivationChange] {
        self.activation_history
            .as_ref()
            .map(|h| h.changes.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the cached activation fields with the response values.
    /// Called only after a 2xx; a failed transition leaves the cache at
    /// its last-known-good values.
    pub fn apply_change(&mut self, resp: &ActivationChangeResponse) {
        self.activation_mode = resp.activation_mode;
        self.cluster_id = resp.cluster_id.clone();
        self.offline_code = resp.offline_code.clone();
    }

    /// Replace cluster binding and code after a regeneration. The mode
    /// is deliberately untouched.
    pub fn apply_regenerated(&mut self, resp: &RegenerateResponse) {
        self.cluster_id = Some(resp.cluster_id.clone());
        self.offline_code = Some(resp.offline_code.clone());
    }
}

/// Outgoing payload for the change-activation endpoint.
///
/// `cluster_id` serializes as an explicit null when clearing the
/// binding on a switch to ONLINE.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeActivationRequest {
    pub activation_mode: ActivationMode,
    pub from_mode: ActivationMode,
    pub cluster_id: Option<String>,
    pub reason: Option<String>,
}

impl ChangeActivationRequest {
    /// Build the binary toggle request.
    ///
    /// ONLINE → OFFLINE requires a non-empty cluster for the new
    /// offline binding; OFFLINE → ONLINE clears the cluster.
    pub fn toggle(
        current: ActivationMode,
        cluster_id: Option<&str>,
        reason: Option<&str>,
    ) -> Result<Self, ApiError> {
        let target = current.toggled();
        let cluster_id = match target {
            ActivationMode::Offline => {
                let cluster = cluster_id.map(str::trim).unwrap_or("");
                if cluster.is_empty() {
                    return Err(ApiError::Validation(
                        "cluster_id is required when switching to OFFLINE".into(),
                    ));
                }
                Some(cluster.to_string())
            }
            ActivationMode::Online => None,
        };

        Ok(Self {
            activation_mode: target,
            from_mode: current,
            cluster_id,
            reason: reason.map(String::from),
        })
    }
}

/// Response of the change-activation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivationChangeResponse {
    pub activation_mode: ActivationMode,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub offline_code: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Outgoing payload for the regenerate-offline-code endpoint.
/// Only meaningful while the license is OFFLINE.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegenerateRequest {
    pub cluster_id: String,
    pub reason: Option<String>,
}

impl RegenerateRequest {
    pub fn new(cluster_id: &str, reason: Option<&str>) -> Result<Self, ApiError> {
        let cluster = cluster_id.trim();
        if cluster.is_empty() {
            return Err(ApiError::Validation(
                "cluster_id is required to regenerate an offline code".into(),
            ));
        }
        Ok(Self {
            cluster_id: cluster.to_string(),
            reason: reason.map(String::from),
        })
    }
}

/// Response of the regenerate-offline-code endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RegenerateResponse {
    pub cluster_id: String,
    pub offline_code: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(mode: ActivationMode) -> ActivationInfo {
        ActivationInfo {
            license_id: "LIC-1".into(),
            activation_mode: mode,
            cluster_id: Some("c0".into()),
            offline_code: Some("old-code".into()),
            last_activation_change: None,
            activation_history: None,
        }
    }

    #[test]
    fn toggle_online_to_offline_requires_cluster() {
        let err = ChangeActivationRequest::toggle(ActivationMode::Online, None, None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = ChangeActivationRequest::toggle(ActivationMode::Online, Some("  "), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let req =
            ChangeActivationRequest::toggle(ActivationMode::Online, Some("c1"), Some("move"))
                .unwrap();
        assert_eq!(req.activation_mode, ActivationMode::Offline);
        assert_eq!(req.from_mode, ActivationMode::Online);
        assert_eq!(req.cluster_id.as_deref(), Some("c1"));
    }

    #[test]
    fn toggle_offline_to_online_clears_cluster() {
        // A supplied cluster is ignored — the binding is being removed.
        let req =
            ChangeActivationRequest::toggle(ActivationMode::Offline, Some("c1"), None).unwrap();
        assert_eq!(req.activation_mode, ActivationMode::Online);
        assert_eq!(req.from_mode, ActivationMode::Offline);
        assert_eq!(req.cluster_id, None);
    }

    #[test]
    fn cluster_serializes_as_explicit_null() {
        let req =
            ChangeActivationRequest::toggle(ActivationMode::Offline, None, None).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("cluster_id").unwrap().is_null());
    }

    #[test]
    fn apply_change_replaces_all_three_fields() {
        let mut cached = info(ActivationMode::Online);
        let resp = ActivationChangeResponse {
            activation_mode: ActivationMode::Offline,
            cluster_id: Some("c9".into()),
            offline_code: Some("fresh".into()),
            message: "ok".into(),
        };
        cached.apply_change(&resp);
        assert_eq!(cached.activation_mode, ActivationMode::Offline);
        assert_eq!(cached.cluster_id.as_deref(), Some("c9"));
        assert_eq!(cached.offline_code.as_deref(), Some("fresh"));
    }

    #[test]
    fn switch_to_online_drops_offline_code() {
        let mut cached = info(ActivationMode::Offline);
        let resp = ActivationChangeResponse {
            activation_mode: ActivationMode::Online,
            cluster_id: None,
            offline_code: None,
            message: "ok".into(),
        };
        cached.apply_change(&resp);
        assert_eq!(cached.activation_mode, ActivationMode::Online);
        assert_eq!(cached.cluster_id, None);
        assert_eq!(cached.offline_code, None);
    }

    #[test]
    fn regeneration_keeps_mode() {
        let mut cached = info(ActivationMode::Offline);
        let resp = RegenerateResponse {
            cluster_id: "c2".into(),
            offline_code: "new-code".into(),
            message: "ok".into(),
        };
        cached.apply_regenerated(&resp);
        assert_eq!(cached.activation_mode, ActivationMode::Offline);
        assert_eq!(cached.cluster_id.as_deref(), Some("c2"));
        assert_eq!(cached.offline_code.as_deref(), Some("new-code"));
    }

    #[test]
    fn regenerate_requires_cluster() {
        assert!(RegenerateRequest::new("", None).is_err());
        assert!(RegenerateRequest::new("   ", None).is_err());
        assert!(RegenerateRequest::new("c1", Some("rotate")).is_ok());
    }

    #[test]
    fn same_mode_entry_is_regeneration() {
        let t1: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        let t2: DateTime<Utc> = "2025-02-01T00:00:00Z".parse().unwrap();
        let switch = ActivationChange {
            from_mode: ActivationMode::Online,
            to_mode: ActivationMode::Offline,
            timestamp: t1,
            cluster_id: Some("c1".into()),
            reason: None,
        };
        let regen = ActivationChange {
            from_mode: ActivationMode::Offline,
            to_mode: ActivationMode::Offline,
            timestamp: t2,
            cluster_id: Some("c1".into()),
            reason: None,
        };
        assert_eq!(switch.kind(), ChangeKind::Switch);
        assert_eq!(regen.kind(), ChangeKind::Regeneration);

        // Input order is preserved by the history accessor.
        let info = ActivationInfo {
            license_id: "L".into(),
            activation_mode: ActivationMode::Offline,
            cluster_id: Some("c1".into()),
            offline_code: Some("x".into()),
            last_activation_change: Some(t2),
            activation_history: Some(ActivationHistory {
                changes: vec![switch.clone(), regen.clone()],
            }),
        };
        let history = info.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], switch);
        assert_eq!(history[1], regen);
    }

    #[test]
    fn missing_history_is_empty_slice() {
        let info = info(ActivationMode::Online);
        assert!(info.history().is_empty());

        // An explicit empty wrapper behaves the same.
        let parsed: ActivationInfo = serde_json::from_value(serde_json::json!({
            "license_id": "L",
            "activation_mode": "ONLINE",
            "activation_history": {"changes": []}
        }))
        .unwrap();
        assert!(parsed.history().is_empty());
    }

    #[test]
    fn history_projection_is_idempotent() {
        let parsed: ActivationInfo = serde_json::from_value(serde_json::json!({
            "license_id": "L",
            "activation_mode": "OFFLINE",
            "activation_history": {"changes": [
                {"from_mode": "ONLINE", "to_mode": "OFFLINE",
                 "timestamp": "2025-01-01T00:00:00Z", "cluster_id": "c1"},
                {"from_mode": "OFFLINE", "to_mode": "OFFLINE",
                 "timestamp": "2025-02-01T00:00:00Z", "cluster_id": "c1"}
            ]}
        }))
        .unwrap();
        let first: Vec<_> = parsed.history().iter().map(|c| c.describe()).collect();
        let second: Vec<_> = parsed.history().iter().map(|c| c.describe()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "switched from online to offline activation");
        assert_eq!(first[1], "regenerated offline activation code");
    }
}
