//! Gist listing and creation

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{check_status, GitHub};
use crate::collect::FileMap;
use crate::error::GistError;

/// A gist as returned by the API. Only the fields gogist uses are kept.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Gist {
    pub id: String,
    pub html_url: String,
    pub description: Option<String>,
    pub public: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewGistFile {
    pub content: String,
}

/// Request body for creating a gist
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewGist {
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, NewGistFile>,
}

impl NewGist {
    pub fn new(description: &str, public: bool, files: FileMap) -> NewGist {
        NewGist {
            description: description.to_string(),
            public,
            files: files
                .into_iter()
                .map(|(name, content)| (name, NewGistFile { content }))
                .collect(),
        }
    }
}

impl GitHub {
    /// List gists.
    ///
    /// With no user this is the authenticated user's gists, public and
    /// secret; with a user it is that user's public gists.
    pub async fn list_gists(&self, user: Option<&str>) -> Result<Vec<Gist>, GistError> {
        let path = match user.filter(|u| !u.is_empty()) {
            Some(user) => format!("/users/{}/gists", user),
            None => "/gists".to_string(),
        };

        let response = self.request(Method::GET, &path).send().await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    pub async fn create_gist(&self, gist: &NewGist) -> Result<Gist, GistError> {
        let response = self
            .request(Method::POST, "/gists")
            .json(gist)
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }
}
