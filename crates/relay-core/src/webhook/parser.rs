//! GitHub `pull_request` webhook payload parsing.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{RelayError, Result};

/// The subset of a `pull_request` delivery the relay cares about.
///
/// Only `action` is read before filtering. The other fields stay untyped
/// until [`PullRequestEvent::into_target`], so an ignored delivery is never
/// rejected over a field the relay would not use.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// Missing for deliveries such as `ping`.
    pub action: Option<Value>,
    pub number: Option<Value>,
    pub pull_request: Option<Value>,
    pub repository: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestLinks {
    pub diff_url: String,
    pub comments_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    pub full_name: String,
}

/// Typed view of the `action` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    Opened,
    Synchronize,
    Other(String),
}

impl ReviewAction {
    pub fn parse(action: Option<&str>) -> Self {
        match action {
            Some("opened") => ReviewAction::Opened,
            Some("synchronize") => ReviewAction::Synchronize,
            Some(other) => ReviewAction::Other(other.to_string()),
            None => ReviewAction::Other(String::new()),
        }
    }

    /// Only freshly opened pull requests and new pushes get a review.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, ReviewAction::Opened | ReviewAction::Synchronize)
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewAction::Opened => write!(f, "opened"),
            ReviewAction::Synchronize => write!(f, "synchronize"),
            ReviewAction::Other(action) if action.is_empty() => write!(f, "<none>"),
            ReviewAction::Other(action) => write!(f, "{}", action),
        }
    }
}

/// Where to read the diff from and where to post the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTarget {
    pub diff_url: Url,
    pub comments_url: Url,
    pub number: Option<u64>,
    pub repository: Option<String>,
}

impl fmt::Display for ReviewTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.repository, self.number) {
            (Some(repo), Some(number)) => write!(f, "{}#{}", repo, number),
            _ => write!(f, "{}", self.comments_url),
        }
    }
}

impl PullRequestEvent {
    pub fn review_action(&self) -> ReviewAction {
        ReviewAction::parse(self.action.as_ref().and_then(Value::as_str))
    }

    pub fn is_reviewable(&self) -> bool {
        self.review_action().is_reviewable()
    }

    /// Extracts the review target. Only meaningful once the event passed the
    /// action filter; ignored events never need a `pull_request` object.
    pub fn into_target(self) -> Result<ReviewTarget> {
        let links = self.pull_request.ok_or_else(|| {
            RelayError::InvalidWebhookPayload("missing pull_request object".to_string())
        })?;
        let links: PullRequestLinks = serde_json::from_value(links).map_err(|e| {
            RelayError::InvalidWebhookPayload(format!("invalid pull_request object: {}", e))
        })?;

        // Only used for log context; a surprising shape just drops it.
        let number = self.number.as_ref().and_then(Value::as_u64);
        let repository = self
            .repository
            .and_then(|r| serde_json::from_value::<RepositoryRef>(r).ok())
            .map(|r| r.full_name);

        Ok(ReviewTarget {
            diff_url: parse_link("diff_url", &links.diff_url)?,
            comments_url: parse_link("comments_url", &links.comments_url)?,
            number,
            repository,
        })
    }
}

/// Parses a GitHub `pull_request` webhook body.
pub fn parse_pull_request_event(payload: &[u8]) -> Result<PullRequestEvent> {
    serde_json::from_slice(payload)
        .map_err(|e| RelayError::InvalidWebhookPayload(format!("malformed JSON: {}", e)))
}

fn parse_link(field: &str, value: &str) -> Result<Url> {
    Url::parse(value)
        .map_err(|e| RelayError::InvalidWebhookPayload(format!("invalid {}: {}", field, e)))
}
