//! Cryptographic helpers for webhook signature verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest in `X-Hub-Signature-256`.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Maximum webhook payload size (10MB).
pub const MAX_WEBHOOK_SIZE: usize = 10 * 1024 * 1024;

/// Computes HMAC-SHA256 of data with the given key and returns as hex string.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Builds the full `sha256=<hex>` header value GitHub would send for `body`.
pub fn github_signature(secret: &str, body: &[u8]) -> String {
    format!("{}{}", SIGNATURE_PREFIX, hmac_sha256_hex(secret.as_bytes(), body))
}

/// Verifies a GitHub webhook signature using constant-time comparison.
///
/// GitHub sends signatures in the format `sha256=<hex>`.
pub fn verify_github_signature(secret: &str, signature: &str, body: &[u8]) -> bool {
    let Some(provided) = signature.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let computed = hmac_sha256_hex(secret.as_bytes(), body);
    constant_time_eq(provided.as_bytes(), computed.as_bytes())
}

/// Constant-time equality comparison.
///
/// Differing lengths return early; that leaks only the length, which is fixed
/// for a SHA-256 hex digest anyway.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
