//! The top-level client object and its configuration.

use std::sync::Arc;

use secrecy::SecretString;

use crate::engine::Engine;
use crate::loc::LineOfCreditApi;
use crate::user::UserApi;
use crate::webhook::WebhookApi;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.stilt.com/v1";

/// Client configuration: the credential pair issued per integration plus
/// an overridable base URL (tests point it at a local mock).
///
/// The secret is both the HMAC signing key and the source of the PII
/// encryption key; it is held in a `SecretString` so it never shows up in
/// debug output.
#[derive(Debug, Clone)]
pub struct OnboConfig {
    pub base_url: String,
    pub client_id: String,
    pub secret: SecretString,
}

impl OnboConfig {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: client_id.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// The Onbo client.
///
/// Resource APIs hang off public fields; every method on them is one
/// signed HTTP call. The client is cheap to share: resource modules hold
/// the same engine behind an `Arc` and nothing is mutated after
/// construction.
///
/// ```no_run
/// use onbo_core::Onbo;
///
/// let onbo = Onbo::new("client-uuid", "client-secret");
/// let users = onbo.user.list(None)?;
/// # Ok::<(), onbo_core::OnboError>(())
/// ```
pub struct Onbo {
    pub user: UserApi,
    pub loc: LineOfCreditApi,
    pub webhook: WebhookApi,
}

impl Onbo {
    /// Build a client against the production host.
    pub fn new(client_id: &str, secret: &str) -> Self {
        Self::with_config(OnboConfig::new(client_id, secret))
    }

    /// Build a client from explicit configuration.
    pub fn with_config(config: OnboConfig) -> Self {
        let engine = Arc::new(Engine::new(config));
        Self {
            user: UserApi::new(Arc::clone(&engine)),
            loc: LineOfCreditApi::new(Arc::clone(&engine)),
            webhook: WebhookApi::new(engine),
        }
    }
}
