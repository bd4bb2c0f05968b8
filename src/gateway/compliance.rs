//! Compliance dashboard, audit log and report data.
//!
//! Payload shapes are owned by the backend's reporting service and change
//! independently of this crate, so they are returned as raw JSON.

use serde_json::Value;

use super::types::AuditLogQuery;
use super::{Gateway, GatewayError};
use crate::transport::{Method, WireRequest};

pub const DASHBOARD_PATH: &str = "/api/compliance/dashboard";
pub const AUDIT_LOGS_PATH: &str = "/api/compliance/audit-logs";
pub const REPORTS_PATH: &str = "/api/compliance/reports";

pub struct Compliance<'a> {
    gateway: &'a Gateway,
}

impl<'a> Compliance<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// `AuthExpired`, `Network`, `Business` for non-2xx.
    pub async fn dashboard(&self) -> Result<Value, GatewayError> {
        self.fetch(WireRequest::new(Method::GET, DASHBOARD_PATH)).await
    }

    /// # Errors
    ///
    /// `AuthExpired`, `Network`, `Business` for non-2xx.
    pub async fn audit_logs(&self, query: &AuditLogQuery) -> Result<Value, GatewayError> {
        self.fetch(WireRequest::new(Method::GET, AUDIT_LOGS_PATH).with_query(query.to_pairs()))
            .await
    }

    /// # Errors
    ///
    /// `AuthExpired`, `Network`, `Business` for non-2xx.
    pub async fn reports(&self) -> Result<Value, GatewayError> {
        self.fetch(WireRequest::new(Method::GET, REPORTS_PATH)).await
    }

    async fn fetch(&self, request: WireRequest) -> Result<Value, GatewayError> {
        self.gateway.dispatch(request).await?.into_result()
    }
}
