//! Request descriptions as plain data.
//!
//! # Design
//! The engine builds a `PreparedRequest` — URL, signed headers, serialized
//! body — before any I/O happens, so the whole signing pipeline can be
//! inspected in tests without a network. Body kinds are a closed variant:
//! a structured JSON payload gets the outbound casing transform, a
//! multipart form is transmitted (and digested) verbatim.

use rand::{distr::Alphanumeric, Rng};
use serde::Serialize;
use serde_json::Value;

use crate::error::OnboError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// The two body kinds the engine knows how to sign and transmit.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Structured payload; keys are re-cased to the wire convention before
    /// serialization.
    Json(Value),
    /// Pre-built multipart form; transmitted byte-for-byte, no casing.
    Form(MultipartForm),
}

impl RequestBody {
    /// Serialize a payload into a JSON body.
    pub fn json<T: Serialize>(data: &T) -> Result<Self, OnboError> {
        serde_json::to_value(data)
            .map(RequestBody::Json)
            .map_err(|e| OnboError::InvalidRequest(e.to_string()))
    }
}

/// A minimal multipart/form-data builder with a random boundary.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<(String, String)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        Self {
            boundary: format!("onbo-{suffix}"),
            parts: Vec::new(),
        }
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), value.into()));
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// The form's string representation — used both as the transmitted body
    /// and as the digest input.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.parts {
            out.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            ));
        }
        out.push_str(&format!("--{}--\r\n", self.boundary));
        out
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully built, signed request ready for dispatch.
///
/// `epoch` is the exact string sent in the `EPOCH` header and folded into
/// the signature; `body` is the serialized content (already wire-cased for
/// JSON payloads), `None` when the call carries no body.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub epoch: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Look up a header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
