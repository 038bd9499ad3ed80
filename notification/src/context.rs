//! The release descriptor handed to the assembler.
//!
//! A [`ReleaseContext`] is built once at the process boundary, either from a
//! GitHub `release` event payload or from a variable lookup, and is read-only
//! afterwards. Nothing in this crate reads the process environment itself.

use serde::Deserialize;

use crate::error::{NotifyError, Result};

const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Immutable description of the published release
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseContext {
    tag: String,
    repository: String,
    author: String,
    html_url: String,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseEvent {
    release: Option<ReleasePayload>,
    repository: Option<RepositoryPayload>,
    sender: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct ReleasePayload {
    tag_name: Option<String>,
    html_url: Option<String>,
    body: Option<String>,
    author: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: Option<String>,
}

impl ReleaseContext {
    pub fn new(
        tag: impl Into<String>,
        repository: impl Into<String>,
        author: impl Into<String>,
        html_url: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            repository: repository.into(),
            author: author.into(),
            html_url: html_url.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Parses a GitHub `release` event payload
    pub fn from_event_json(json: &str) -> Result<Self> {
        let event: ReleaseEvent = serde_json::from_str(json)
            .map_err(|e| NotifyError::invalid_event(format!("malformed event JSON: {e}")))?;

        let release = event
            .release
            .ok_or_else(|| NotifyError::invalid_event("payload has no `release` object"))?;

        let author = release
            .author
            .and_then(|a| a.login)
            .or_else(|| event.sender.and_then(|s| s.login))
            .unwrap_or_default();

        Ok(Self {
            tag: release.tag_name.unwrap_or_default(),
            repository: event
                .repository
                .and_then(|r| r.full_name)
                .unwrap_or_default(),
            author,
            html_url: release.html_url.unwrap_or_default(),
            body: release.body,
        })
    }

    /// Builds a context from CI variables: `GITHUB_REF`, `GITHUB_REPOSITORY`,
    /// `GITHUB_ACTOR`, `GITHUB_SERVER_URL` and `RELEASE_BODY`.
    ///
    /// `lookup` is usually a snapshot of the process environment taken by the
    /// caller.
    pub fn from_env_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let tag = var("GITHUB_REF")
            .and_then(|r| r.rsplit('/').next().map(str::to_string))
            .unwrap_or_default();
        let repository = var("GITHUB_REPOSITORY").unwrap_or_default();
        let server = var("GITHUB_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let html_url = if tag.is_empty() || repository.is_empty() {
            String::new()
        } else {
            format!(
                "{}/{repository}/releases/tag/{tag}",
                server.trim_end_matches('/')
            )
        };

        Self {
            tag,
            repository,
            author: var("GITHUB_ACTOR").unwrap_or_default(),
            html_url,
            body: lookup("RELEASE_BODY"),
        }
    }

    /// Fills every empty field from `fallback`, keeping the values already set
    #[must_use]
    pub fn fill_missing_from(self, fallback: ReleaseContext) -> Self {
        let pick = |own: String, other: String| if own.is_empty() { other } else { own };

        Self {
            tag: pick(self.tag, fallback.tag),
            repository: pick(self.repository, fallback.repository),
            author: pick(self.author, fallback.author),
            html_url: pick(self.html_url, fallback.html_url),
            body: self.body.or(fallback.body),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn html_url(&self) -> &str {
        &self.html_url
    }

    /// The changelog body. Absent or blank bodies are `MissingInput`.
    pub fn body(&self) -> Result<&str> {
        match self.body.as_deref() {
            Some(body) if !body.trim().is_empty() => Ok(body),
            _ => Err(NotifyError::MissingInput),
        }
    }

    /// Whether any of version, repository or author is known
    #[must_use]
    pub fn has_release_information(&self) -> bool {
        !(self.tag.is_empty() && self.repository.is_empty() && self.author.is_empty())
    }
}
