//! Read-only widget and workflow listings.

use super::types::{Widget, Workflow};
use super::{Gateway, GatewayError, require_id};
use crate::transport::{Method, WireRequest};

pub const WIDGETS_PATH: &str = "/api/widgets";
pub const WORKFLOWS_PATH: &str = "/api/workflows";

pub struct Widgets<'a> {
    gateway: &'a Gateway,
}

impl<'a> Widgets<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/widgets`.
    ///
    /// # Errors
    ///
    /// `AuthExpired`, `Network`, `Business` for non-2xx, `Decode`.
    pub async fn list(&self) -> Result<Vec<Widget>, GatewayError> {
        self.gateway
            .dispatch(WireRequest::new(Method::GET, WIDGETS_PATH))
            .await?
            .into_result()
    }

    /// `GET /api/widgets/{id}`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty id, otherwise as [`Widgets::list`].
    pub async fn get(&self, id: &str) -> Result<Widget, GatewayError> {
        let id = require_id("widget", id)?;
        self.gateway
            .dispatch(WireRequest::new(Method::GET, format!("{WIDGETS_PATH}/{id}")))
            .await?
            .into_result()
    }
}

pub struct Workflows<'a> {
    gateway: &'a Gateway,
}

impl<'a> Workflows<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/workflows`.
    ///
    /// # Errors
    ///
    /// `AuthExpired`, `Network`, `Business` for non-2xx, `Decode`.
    pub async fn list(&self) -> Result<Vec<Workflow>, GatewayError> {
        self.gateway
            .dispatch(WireRequest::new(Method::GET, WORKFLOWS_PATH))
            .await?
            .into_result()
    }

    /// `GET /api/workflows/{id}`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty id, otherwise as [`Workflows::list`].
    pub async fn get(&self, id: &str) -> Result<Workflow, GatewayError> {
        let id = require_id("workflow", id)?;
        self.gateway
            .dispatch(WireRequest::new(Method::GET, format!("{WORKFLOWS_PATH}/{id}")))
            .await?
            .into_result()
    }
}
