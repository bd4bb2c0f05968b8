//! Client (tenant) CRUD over `/api/clients`.

use super::types::{ClientDetail, ClientFields, ClientSummary};
use super::{Gateway, GatewayError, require_id};
use crate::transport::{Method, WireRequest};

pub const CLIENTS_PATH: &str = "/api/clients";

fn client_path(id: &str) -> String {
    format!("{CLIENTS_PATH}/{id}")
}

pub struct Clients<'a> {
    gateway: &'a Gateway,
}

impl<'a> Clients<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/clients`.
    ///
    /// # Errors
    ///
    /// `AuthExpired`, `Network`, `Business` for non-2xx, `Decode` for an
    /// unexpected body.
    pub async fn list(&self) -> Result<Vec<ClientSummary>, GatewayError> {
        self.gateway
            .dispatch(WireRequest::new(Method::GET, CLIENTS_PATH))
            .await?
            .into_result()
    }

    /// `GET /api/clients/{id}`. A 404 surfaces as `Business { status: 404 }`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty id, otherwise as [`Clients::list`].
    pub async fn get(&self, id: &str) -> Result<ClientDetail, GatewayError> {
        let id = require_id("client", id)?;
        self.gateway
            .dispatch(WireRequest::new(Method::GET, client_path(id)))
            .await?
            .into_result()
    }

    /// `POST /api/clients`, returning the created record with its tenant
    /// token.
    ///
    /// # Errors
    ///
    /// As [`Clients::list`].
    pub async fn create(&self, fields: &ClientFields) -> Result<ClientDetail, GatewayError> {
        let body = serde_json::to_value(fields).map_err(|e| GatewayError::Encode(e.to_string()))?;
        self.gateway
            .dispatch(WireRequest::new(Method::POST, CLIENTS_PATH).with_body(body))
            .await?
            .into_result()
    }

    /// `PUT /api/clients/{id}`, returning the updated record.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty id, otherwise as [`Clients::list`].
    pub async fn update(&self, id: &str, fields: &ClientFields) -> Result<ClientDetail, GatewayError> {
        let id = require_id("client", id)?;
        let body = serde_json::to_value(fields).map_err(|e| GatewayError::Encode(e.to_string()))?;
        self.gateway
            .dispatch(WireRequest::new(Method::PUT, client_path(id)).with_body(body))
            .await?
            .into_result()
    }

    /// `DELETE /api/clients/{id}`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty id, otherwise as [`Clients::list`].
    pub async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let id = require_id("client", id)?;
        self.gateway
            .dispatch(WireRequest::new(Method::DELETE, client_path(id)))
            .await?
            .into_unit()
    }
}
