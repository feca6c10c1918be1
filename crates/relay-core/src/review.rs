//! The review pipeline: fetch diff, generate review, post comment.

use crate::config::RelayConfig;
use crate::error::Result;
use crate::llm::GeminiClient;
use crate::providers::{GitHubClient, build_http_client, format_review_comment};
use crate::webhook::ReviewTarget;

/// What a completed pipeline run posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    /// Full markdown body of the posted comment.
    pub comment: String,
    /// The model returned no text and the fallback message was posted.
    pub used_fallback: bool,
}

/// Runs the three outbound calls for one pull request.
///
/// Cloning is cheap; both clients share one connection pool.
#[derive(Debug, Clone)]
pub struct ReviewPipeline {
    github: GitHubClient,
    gemini: GeminiClient,
}

impl ReviewPipeline {
    pub fn new(github: GitHubClient, gemini: GeminiClient) -> Self {
        Self { github, gemini }
    }

    /// Builds both clients from the relay configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let client = build_http_client(&config.github_user_agent)?;

        let github = GitHubClient::new(client.clone(), config.github_token.clone());
        let gemini = GeminiClient::new(
            client,
            config.llm_api_base.clone(),
            config.llm_model.clone(),
            config.llm_api_key.clone(),
        );

        Ok(Self::new(github, gemini))
    }

    /// Steps run strictly in order; the first error stops the run.
    pub async fn run(&self, target: &ReviewTarget) -> Result<ReviewOutcome> {
        tracing::info!("Fetching diff for {}", target);
        let diff = self.github.fetch_diff(&target.diff_url).await?;
        tracing::debug!("Fetched {} bytes of diff for {}", diff.len(), target);

        tracing::info!("Requesting review for {}", target);
        let review = self.gemini.generate_review(&diff).await?;
        if review.is_fallback {
            tracing::warn!("Model returned no text for {}, posting fallback", target);
        }

        let comment = format_review_comment(&review.text);
        tracing::info!("Posting review comment for {}", target);
        self.github.post_comment(&target.comments_url, &comment).await?;

        tracing::info!("Review posted for {}", target);
        Ok(ReviewOutcome {
            comment,
            used_fallback: review.is_fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelayError;
    use crate::llm::FALLBACK_REVIEW;
    use secrecy::SecretString;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DIFF: &str = "diff --git a/src/main.rs b/src/main.rs\n+println!(\"hi\");\n";

    /// GitHub URLs come from the event payload, so only the model needs a base.
    fn pipeline(gemini: &MockServer) -> ReviewPipeline {
        let client = reqwest::Client::new();
        ReviewPipeline::new(
            GitHubClient::new(client.clone(), SecretString::from("ghp_test")),
            GeminiClient::new(client, gemini.uri(), "gemini-2.5-flash", SecretString::from("llm-key")),
        )
    }

    fn target(github: &MockServer) -> ReviewTarget {
        ReviewTarget {
            diff_url: Url::parse(&format!("{}/octo/demo/pull/3.diff", github.uri())).unwrap(),
            comments_url: Url::parse(&format!("{}/repos/octo/demo/issues/3/comments", github.uri()))
                .unwrap(),
            number: Some(3),
            repository: Some("octo/demo".to_string()),
        }
    }

    async fn mount_diff(github: &MockServer, status: u16) {
        Mock::given(method("GET"))
            .and(path("/octo/demo/pull/3.diff"))
            .respond_with(ResponseTemplate::new(status).set_body_string(DIFF))
            .expect(1)
            .mount(github)
            .await;
    }

    #[tokio::test]
    async fn test_full_pipeline_posts_review() {
        let github = MockServer::start().await;
        let gemini = MockServer::start().await;

        mount_diff(&github, 200).await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Consider logging." }] } }]
            })))
            .expect(1)
            .mount(&gemini)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octo/demo/issues/3/comments"))
            .and(body_json(json!({ "body": "🤖 **AI Review:**\nConsider logging." })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&github)
            .await;

        let outcome = pipeline(&gemini).run(&target(&github)).await.unwrap();
        assert_eq!(outcome.comment, "🤖 **AI Review:**\nConsider logging.");
        assert!(!outcome.used_fallback);

        let prompts = gemini.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&prompts[0].body).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains(&format!("```diff\n{}\n```", DIFF)));
    }

    #[tokio::test]
    async fn test_diff_failure_skips_generation_and_post() {
        let github = MockServer::start().await;
        let gemini = MockServer::start().await;

        mount_diff(&github, 502).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&gemini)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&github)
            .await;

        let err = pipeline(&gemini).run(&target(&github)).await.unwrap_err();
        assert!(matches!(err, RelayError::DiffFetch(_)));
    }

    #[tokio::test]
    async fn test_generation_failure_skips_post() {
        let github = MockServer::start().await;
        let gemini = MockServer::start().await;

        mount_diff(&github, 200).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
            .expect(1)
            .mount(&gemini)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&github)
            .await;

        let err = pipeline(&gemini).run(&target(&github)).await.unwrap_err();
        assert!(matches!(err, RelayError::Generation(_)));
    }

    #[tokio::test]
    async fn test_missing_text_posts_fallback() {
        let github = MockServer::start().await;
        let gemini = MockServer::start().await;

        mount_diff(&github, 200).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&gemini)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octo/demo/issues/3/comments"))
            .and(body_json(json!({ "body": format!("🤖 **AI Review:**\n{}", FALLBACK_REVIEW) })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&github)
            .await;

        let outcome = pipeline(&gemini).run(&target(&github)).await.unwrap();
        assert!(outcome.used_fallback);
        assert!(outcome.comment.contains(FALLBACK_REVIEW));
    }

    #[tokio::test]
    async fn test_post_failure_is_reported() {
        let github = MockServer::start().await;
        let gemini = MockServer::start().await;

        mount_diff(&github, 200).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .mount(&gemini)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&github)
            .await;

        let err = pipeline(&gemini).run(&target(&github)).await.unwrap_err();
        assert!(matches!(err, RelayError::CommentPost(_)));
    }

    #[tokio::test]
    async fn test_replay_posts_twice() {
        let github = MockServer::start().await;
        let gemini = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DIFF))
            .expect(2)
            .mount(&github)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .mount(&gemini)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(2)
            .mount(&github)
            .await;

        let relay = pipeline(&gemini);
        let target = target(&github);
        relay.run(&target).await.unwrap();
        relay.run(&target).await.unwrap();
    }
}
