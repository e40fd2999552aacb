//! The request engine: one signed request/response cycle.
//!
//! # Design
//! `prepare` builds a fully signed `PreparedRequest` — URL with query,
//! canonical body, digest, epoch, authentication headers — without touching
//! the network, so the signing pipeline is testable as data. `dispatch`
//! executes it with ureq and never errors: transport and decode failures
//! come back as an `Exchange` with no payload, which the resource modules
//! treat as failure alongside HTTP >= 400.

use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::client::OnboConfig;
use crate::error::OnboError;
use crate::http::{HttpMethod, PreparedRequest, RequestBody};
use crate::{sign, transform};

/// Version string advertised in the `X-Onbo-Client-Ver` header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The outcome of one dispatch: the HTTP status when a response was
/// obtained, and the decoded, locally-cased payload when the body was
/// valid JSON. Both absent means the transport failed.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: Option<u16>,
    pub payload: Option<Value>,
}

impl Exchange {
    /// Apply the uniform error contract: status >= 400 or a non-empty
    /// `message` field in the payload is a remote rejection; no payload at
    /// all is a transport failure.
    pub fn into_result(self) -> Result<Value, OnboError> {
        let message = self
            .payload
            .as_ref()
            .and_then(|p| p.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        if self.status.is_some_and(|s| s >= 400) || message.is_some() {
            return Err(OnboError::Api { message });
        }
        self.payload.ok_or(OnboError::Transport)
    }
}

/// Immutable per-process context plus the HTTP agent.
///
/// Constructed once and handed to every resource module behind an `Arc`;
/// never mutated afterwards, so concurrent calls need no coordination.
pub struct Engine {
    base_url: String,
    client_id: String,
    secret: SecretString,
    agent: ureq::Agent,
}

impl Engine {
    pub fn new(config: OnboConfig) -> Self {
        // 4xx/5xx come back as data; status interpretation happens in the
        // resource modules. Redirects are followed (ureq default).
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id,
            secret: config.secret,
            agent,
        }
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Build the signed request. Pure apart from the timestamp and the
    /// fresh IVs drawn during body encryption; no I/O.
    pub fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&RequestBody>,
    ) -> Result<PreparedRequest, OnboError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| OnboError::InvalidRequest(format!("bad url: {e}")))?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        let full_url = url.to_string();

        let (content, content_type) = match body {
            Some(RequestBody::Json(value)) if !transform::is_empty(value) => {
                let serialized = serde_json::to_string(&transform::to_wire(value))
                    .map_err(|e| OnboError::InvalidRequest(format!("unserializable body: {e}")))?;
                (Some(serialized), Some("application/json".to_string()))
            }
            Some(RequestBody::Form(form)) => (Some(form.encode()), Some(form.content_type())),
            _ => (None, None),
        };

        let epoch = epoch_millis();
        let digest = sign::content_digest(content.as_deref().unwrap_or(""));
        let hmac = sign::signature(&full_url, &digest, &epoch, self.secret());

        let mut headers = vec![
            ("X_CLIENT_UUID".to_string(), self.client_id.clone()),
            ("EPOCH".to_string(), epoch.clone()),
            ("X_STILT_HMAC".to_string(), hmac),
            ("Content-MD5".to_string(), digest),
            ("Accept".to_string(), "application/json".to_string()),
            ("X-Onbo-Client-Ver".to_string(), CLIENT_VERSION.to_string()),
        ];
        if let Some(content_type) = content_type {
            headers.push(("Content-Type".to_string(), content_type));
        }

        Ok(PreparedRequest {
            method,
            url: full_url,
            epoch,
            headers,
            body: content,
        })
    }

    /// Execute a prepared request over HTTP.
    pub fn dispatch(&self, request: &PreparedRequest) -> Exchange {
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => {
                let mut rb = self.agent.get(&request.url);
                for (k, v) in &request.headers {
                    rb = rb.header(k.as_str(), v.as_str());
                }
                rb.call()
            }
            (HttpMethod::Delete, _) => {
                let mut rb = self.agent.delete(&request.url);
                for (k, v) in &request.headers {
                    rb = rb.header(k.as_str(), v.as_str());
                }
                rb.call()
            }
            (HttpMethod::Post, body) => {
                let mut rb = self.agent.post(&request.url);
                for (k, v) in &request.headers {
                    rb = rb.header(k.as_str(), v.as_str());
                }
                match body {
                    Some(content) => rb.send(content.as_bytes()),
                    None => rb.send_empty(),
                }
            }
            (HttpMethod::Put, body) => {
                let mut rb = self.agent.put(&request.url);
                for (k, v) in &request.headers {
                    rb = rb.header(k.as_str(), v.as_str());
                }
                match body {
                    Some(content) => rb.send(content.as_bytes()),
                    None => rb.send_empty(),
                }
            }
            (HttpMethod::Patch, body) => {
                let mut rb = self.agent.patch(&request.url);
                for (k, v) in &request.headers {
                    rb = rb.header(k.as_str(), v.as_str());
                }
                match body {
                    Some(content) => rb.send(content.as_bytes()),
                    None => rb.send_empty(),
                }
            }
        };

        let mut response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, url = %request.url, "transport failure");
                return Exchange {
                    status: None,
                    payload: None,
                };
            }
        };
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        let payload = serde_json::from_str::<Value>(&body)
            .ok()
            .map(|decoded| transform::to_local(&decoded));
        if payload.is_none() {
            debug!(status, "response body was not JSON");
        }
        Exchange {
            status: Some(status),
            payload,
        }
    }

    /// One full request/response cycle.
    pub fn fire(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&RequestBody>,
    ) -> Result<Exchange, OnboError> {
        let request = self.prepare(method, path, query, body)?;
        debug!(method = method.as_str(), url = %request.url, "firing request");
        Ok(self.dispatch(&request))
    }
}

fn epoch_millis() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .to_string()
}
