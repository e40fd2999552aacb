//! Content digest and request signature.
//!
//! # Design
//! Every outbound call carries two derived headers: `Content-MD5`, an MD5
//! hex digest of the whitespace-stripped body, and `X_STILT_HMAC`, an
//! HMAC-SHA256 over `url + digest + epoch` keyed by the shared secret. The
//! concatenation order and the algorithms are part of the wire contract —
//! the server recomputes the identical string, and webhook validation runs
//! the same computation in reverse.

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// MD5 hex digest of the body with all whitespace removed. An empty body
/// (or one that is nothing but whitespace) digests to `""`, not to the
/// hash of the empty string.
pub fn content_digest(body: &str) -> String {
    let stripped: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() {
        return String::new();
    }
    let mut hasher = Md5::new();
    hasher.update(stripped.as_bytes());
    hex::encode(hasher.finalize())
}

/// HMAC-SHA256 over `full_url + digest + epoch`, hex-encoded. The epoch is
/// taken as the exact string sent in (or received from) the `EPOCH` header.
pub fn signature(full_url: &str, digest: &str, epoch: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(full_url.as_bytes());
    mac.update(digest.as_bytes());
    mac.update(epoch.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
