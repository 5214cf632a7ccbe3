//! Invitation endpoints.

use desk_core::entities::Invitation;
use desk_core::enums::InvitationStatus;
use desk_core::errors::CoreError;
use desk_core::page::CursorPage;
use serde::Serialize;

use crate::{ApiClient, ApiError, Query, seg};

/// Minimum password length accepted when registering through an invitation.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Filters of `GET /invitations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InvitationFilter {
    pub email: Option<String>,
    pub status: Option<InvitationStatus>,
}

impl InvitationFilter {
    fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

#[derive(Serialize)]
struct InviteBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct AcceptBody<'a> {
    password: &'a str,
}

/// Check an acceptance locally before anything is sent.
///
/// # Errors
///
/// Returns [`CoreError::NotAllowed`] when the invitation is no longer pending
/// and [`CoreError::Validation`] for a short or unconfirmed password.
pub fn validate_acceptance(
    invitation: &Invitation,
    password: &str,
    confirmation: &str,
) -> Result<(), CoreError> {
    if !invitation.status.is_acceptable() {
        return Err(CoreError::NotAllowed {
            entity: "invitation".into(),
            id: invitation.uid.clone(),
            reason: format!("is {} and can no longer be accepted", invitation.status),
        });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirmation {
        return Err(CoreError::Validation("Passwords do not match".into()));
    }
    Ok(())
}

impl ApiClient {
    /// `GET /invitations`. `cursor` is omitted for the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn list_invitations(
        &self,
        limit: u32,
        cursor: Option<&str>,
        filter: &InvitationFilter,
    ) -> Result<CursorPage<Invitation>, ApiError> {
        let query = Query::new()
            .with("limit", limit)
            .with_opt("cursor", cursor.filter(|c| !c.is_empty()))
            .with_opt("email", filter.email())
            .with_opt("status", filter.status.map(InvitationStatus::as_str));
        self.get("/invitations", &query).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the invitation does not exist.
    pub async fn get_invitation(&self, uid: &str) -> Result<Invitation, ApiError> {
        self.get(&format!("/invitations/{}", seg(uid)), &Query::new())
            .await
    }

    /// `POST /invitations` with `{email}`. Resending is the same request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn send_invitation(&self, email: &str) -> Result<Invitation, ApiError> {
        self.post("/invitations", &InviteBody { email: email.trim() })
            .await
    }

    /// `POST /invitations/{uid}/accept` with `{password}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn accept_invitation(&self, uid: &str, password: &str) -> Result<(), ApiError> {
        self.execute(
            reqwest::Method::POST,
            &format!("/invitations/{}/accept", seg(uid)),
            Some(&AcceptBody { password }),
        )
        .await
    }
}
