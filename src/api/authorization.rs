//! OAuth authorization creation
//!
//! Exchanges username/password (and an OTP when 2FA is enabled) for a token
//! scoped to gists.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{check_status, GitHub};
use crate::error::GistError;

const GIST_SCOPE: &str = "gist";

#[derive(Serialize, Debug)]
struct AuthorizationRequest<'a> {
    scopes: Vec<&'a str>,
    note: &'a str,
    note_url: &'a str,
}

#[derive(Deserialize, Debug)]
struct AuthorizationResponse {
    token: String,
}

impl GitHub {
    /// Create a gist-scoped authorization and return its token.
    ///
    /// `note` identifies the authorization in the user's GitHub settings;
    /// `note_url` points at the application that requested it.
    pub async fn create_authorization(
        &self,
        note: &str,
        note_url: &str,
    ) -> Result<String, GistError> {
        let body = AuthorizationRequest {
            scopes: vec![GIST_SCOPE],
            note,
            note_url,
        };

        let response = self
            .request(Method::POST, "/authorizations")
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let authorization: AuthorizationResponse = response.json().await?;
        Ok(authorization.token)
    }
}
