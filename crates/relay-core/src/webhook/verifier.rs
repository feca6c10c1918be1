//! Webhook signature verification.

use secrecy::{ExposeSecret, SecretString};

use crate::crypto::verify_github_signature;
use crate::error::{RelayError, Result};

/// Name of the header GitHub uses for the HMAC-SHA256 body signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Verifier for GitHub webhook signatures.
pub struct GitHubVerifier<'a> {
    secret: &'a str,
}

impl<'a> GitHubVerifier<'a> {
    /// Creates a new GitHub verifier with the webhook secret.
    pub fn new(secret: &'a str) -> Self {
        Self { secret }
    }

    /// Verifies a GitHub webhook signature.
    ///
    /// # Arguments
    /// * `signature` - The X-Hub-Signature-256 header value
    /// * `body` - The raw request body
    pub fn verify(&self, signature: &str, body: &[u8]) -> bool {
        verify_github_signature(self.secret, signature, body)
    }
}

/// Authenticates an inbound delivery before anything else looks at the body.
///
/// Fails closed: a missing secret, a missing header, or a digest mismatch are
/// all authentication errors.
pub fn verify_request(
    secret: Option<&SecretString>,
    signature: Option<&str>,
    body: &[u8],
) -> Result<()> {
    let secret = secret
        .ok_or_else(|| RelayError::Authentication("webhook secret is not configured".to_string()))?;
    let signature = signature
        .ok_or_else(|| RelayError::Authentication(format!("missing {} header", SIGNATURE_HEADER)))?;

    if !GitHubVerifier::new(secret.expose_secret()).verify(signature, body) {
        return Err(RelayError::Authentication("invalid signature".to_string()));
    }

    Ok(())
}
