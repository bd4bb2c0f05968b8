//! Installation invites over `/api/invites`.

use super::types::{InviteReceipt, InviteRequest};
use super::{Gateway, GatewayError, require_id};
use crate::transport::{Method, WireRequest};

pub const INSTALLATION_INVITE_PATH: &str = "/api/invites/installation";

pub struct Invites<'a> {
    gateway: &'a Gateway,
}

impl<'a> Invites<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// `POST /api/invites/installation`: email the client's contact a link
    /// to their installer package.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty client id, recipient or download link
    /// (nothing is sent), otherwise `AuthExpired`, `Network`, `Business` for
    /// non-2xx, `Decode`.
    pub async fn send_installation(&self, invite: &InviteRequest) -> Result<InviteReceipt, GatewayError> {
        require_id("client", &invite.client_id)?;
        if invite.email.trim().is_empty() {
            return Err(GatewayError::InvalidArgument("invite recipient email is required".into()));
        }
        if invite.download_link.trim().is_empty() {
            return Err(GatewayError::InvalidArgument("invite download link is required".into()));
        }
        let body = serde_json::to_value(invite).map_err(|e| GatewayError::Encode(e.to_string()))?;
        self.gateway
            .dispatch(WireRequest::new(Method::POST, INSTALLATION_INVITE_PATH).with_body(body))
            .await?
            .into_result()
    }
}
