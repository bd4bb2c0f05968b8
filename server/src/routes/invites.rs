//! Installation invite routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::auth::AuthUser;
use crate::state::{AppState, InviteRecord, rfc3339_now};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub download_link: String,
    #[serde(default)]
    pub client_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteAccepted {
    pub success: bool,
    pub invite_id: String,
    pub message: String,
}

/// `POST /api/invites/installation`: queue an installer invite for a known
/// client. Delivery is simulated; the invite is kept in memory.
pub async fn send_installation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<InviteInput>,
) -> Result<(StatusCode, Json<InviteAccepted>), ApiError> {
    let email = input.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::BadRequest("A valid invite email is required".into()));
    }
    if input.download_link.trim().is_empty() {
        return Err(ApiError::BadRequest("Download link is required".into()));
    }
    if !state.clients.read().await.contains_key(&input.client_id) {
        return Err(ApiError::NotFound("Client"));
    }

    let invite = {
        let mut invites = state.invites.write().await;
        let invite = InviteRecord {
            id: format!("invite_{}", invites.len() + 1),
            client_id: input.client_id,
            email: email.to_owned(),
            name: input.name,
            company: input.company,
            download_link: input.download_link,
            sent_at: rfc3339_now(),
        };
        invites.push(invite.clone());
        invite
    };

    state.record("invite.installation", Some(&invite.client_id)).await;
    tracing::info!(client_id = %invite.client_id, invite_id = %invite.id, "installation invite queued");
    Ok((
        StatusCode::ACCEPTED,
        Json(InviteAccepted {
            success: true,
            message: format!("Installation invite sent to {}", invite.email),
            invite_id: invite.id,
        }),
    ))
}

#[cfg(test)]
#[path = "invites_test.rs"]
mod tests;
