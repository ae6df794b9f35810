//! GitHub API Client
//!
//! Module for issuing single label CRUD operations against the GitHub REST API

use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed API version header sent with every request
const API_VERSION: &str = "2022-11-28";

/// Encode a string for use in URL path segments (RFC 3986 with UTF-8 support)
///
/// This function properly encodes UTF-8 characters including Japanese text.
/// Only unreserved characters (A-Z, a-z, 0-9, -, ., _, ~) are left unencoded.
///
/// # Arguments
/// - `input`: The string to encode
///
/// # Returns
/// URL-encoded string safe for use in path segments
pub fn encode_path_segment(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            // RFC 3986 unreserved characters
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.' | '_' | '~' => c.to_string(),
            // Everything else gets percent-encoded as UTF-8 bytes
            _ => c
                .to_string()
                .bytes()
                .map(|b| format!("%{:02X}", b))
                .collect::<String>(),
        })
        .collect()
}

/// GitHub Label Information
///
/// Represents label information retrieved from the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    /// Label ID (never serialized; snapshots identify labels by name)
    #[serde(default, skip_serializing)]
    pub id: u64,

    /// Label name (unique per repository, case-insensitive)
    pub name: String,

    /// Label color (6-digit hexadecimal, without #)
    pub color: String,

    /// Label description
    pub description: Option<String>,

    /// Whether this is a repository-default label
    #[serde(default)]
    pub default: bool,
}

/// Request body for label creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLabel {
    pub name: String,
    pub color: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Sparse request body for label updates
///
/// Only the fields that are `Some` are sent; GitHub leaves the rest untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LabelPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LabelPatch {
    /// Whether the patch carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none() && self.color.is_none() && self.description.is_none()
    }
}

/// GitHub API Client
///
/// Client responsible for label interactions with one repository
pub struct LabelClient {
    http: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl LabelClient {
    /// Create a new client targeting api.github.com
    ///
    /// # Arguments
    /// - `token`: GitHub access token
    /// - `owner`: Repository owner
    /// - `repo`: Repository name
    pub fn new(token: &str, owner: &str, repo: &str) -> Self {
        Self::with_base_url("https://api.github.com", token, owner, repo)
    }

    /// Create a new client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(base_url: &str, token: &str, owner: &str, repo: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.to_string(),
        }
    }

    /// Get the owner for this client
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repo for this client
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build a labels-scoped URL
    fn labels_url(&self, name: Option<&str>) -> String {
        match name {
            Some(name) => format!(
                "{}/repos/{}/{}/labels/{}",
                self.base_url,
                self.owner,
                self.repo,
                encode_path_segment(name)
            ),
            None => format!("{}/repos/{}/{}/labels", self.base_url, self.owner, self.repo),
        }
    }

    /// Start a request with the standard GitHub headers attached
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", concat!("gh-labels/", env!("CARGO_PKG_VERSION")))
    }

    /// Check response status, surfacing non-2xx as a structured API error
    ///
    /// The raw response body is carried in the error so callers can classify
    /// specific conditions such as `already_exists`.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let body = response.text().await.unwrap_or_default();

        Err(Error::Api {
            status: status.as_u16(),
            status_text,
            body,
        })
    }

    /// Get all labels from the repository
    ///
    /// Returns the labels in GitHub's response order; the sequence may be
    /// empty. Only the first page is fetched (no pagination).
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        let response = self
            .request(Method::GET, &self.labels_url(None))
            .send()
            .await?;

        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Create a new label
    ///
    /// # Errors
    /// Returns an error if the API call fails, including a 422 with an
    /// `already_exists` code when a label of the same name is present.
    pub async fn create_label(&self, label: &NewLabel) -> Result<Label> {
        let response = self
            .request(Method::POST, &self.labels_url(None))
            .json(label)
            .send()
            .await?;

        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Get a single label by name
    pub async fn get_label(&self, name: &str) -> Result<Label> {
        let response = self
            .request(Method::GET, &self.labels_url(Some(name)))
            .send()
            .await?;

        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Update an existing label, addressed by its current name
    ///
    /// # Arguments
    /// - `name`: Current label name
    /// - `patch`: Fields to change; `None` fields are left untouched
    pub async fn update_label(&self, name: &str, patch: &LabelPatch) -> Result<Label> {
        let response = self
            .request(Method::PATCH, &self.labels_url(Some(name)))
            .json(patch)
            .send()
            .await?;

        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Delete a label by name
    pub async fn delete_label(&self, name: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &self.labels_url(Some(name)))
            .send()
            .await?;

        self.check_response(response).await?;
        Ok(())
    }
}
