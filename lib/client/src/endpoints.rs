//! Typed wrappers over the service endpoints, one method per console
//! operation.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use licctl_core::{
    ActivationChangeResponse, ActivationInfo, ApiError, ChangeActivationRequest, License,
    Order, OrderCreate, OrderPage, OrderQuery, RegenerateRequest, RegenerateResponse,
    ReviewRequest,
};

use crate::http::ApiClient;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

fn decode<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(format!("unexpected response: {}", e)))
}

impl ApiClient {
    /// Exchange credentials for a bearer token. The caller decides
    /// where to persist it.
    pub fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });
        let response: LoginResponse = decode(self.post("/auth/login", &body)?)?;
        Ok(response.access_token)
    }

    /// Service reachability probe.
    pub fn health(&self) -> Result<(), ApiError> {
        self.get("/health", &[])?;
        Ok(())
    }

    // ── Activation ──

    pub fn activation_info(&self, license_id: &str) -> Result<ActivationInfo, ApiError> {
        let path = format!("/activation/licenses/{}/activation-info", license_id);
        decode(self.get(&path, &[])?)
    }

    pub fn change_activation(
        &self,
        license_id: &str,
        request: &ChangeActivationRequest,
    ) -> Result<ActivationChangeResponse, ApiError> {
        let path = format!("/activation/licenses/{}/change-activation", license_id);
        decode(self.post(&path, request)?)
    }

    pub fn regenerate_offline_code(
        &self,
        license_id: &str,
        request: &RegenerateRequest,
    ) -> Result<RegenerateResponse, ApiError> {
        let path = format!("/activation/licenses/{}/regenerate-offline-code", license_id);
        decode(self.post(&path, request)?)
    }

    // ── Orders ──

    pub fn list_orders(&self, query: &OrderQuery) -> Result<OrderPage, ApiError> {
        decode(self.get("/orders/", &query.to_query_pairs())?)
    }

    pub fn get_order(&self, order_id: i64) -> Result<Order, ApiError> {
        decode(self.get(&format!("/orders/{}", order_id), &[])?)
    }

    pub fn get_order_by_po(&self, po_number: &str) -> Result<Order, ApiError> {
        decode(self.get(&format!("/orders/by-po-number/{}", po_number), &[])?)
    }

    pub fn review_order(
        &self,
        order_id: i64,
        request: &ReviewRequest,
    ) -> Result<Order, ApiError> {
        decode(self.post(&format!("/orders/{}/update-status", order_id), request)?)
    }

    /// Manual order creation. Validated client-side before any request
    /// is sent.
    pub fn create_order(&self, request: &OrderCreate) -> Result<Order, ApiError> {
        request.validate()?;
        decode(self.post("/orders/manual-create", request)?)
    }

    // ── Licenses ──

    pub fn get_license(&self, license_id: &str) -> Result<License, ApiError> {
        decode(self.get(&format!("/licenses/{}", license_id), &[])?)
    }
}
