//! Webhook endpoint management.

use std::sync::Arc;

use serde_json::json;

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::{HttpMethod, RequestBody};
use crate::types;
use crate::webhook::Endpoint;

/// Resource methods under `webhooks/endpoints`.
pub struct EndpointApi {
    engine: Arc<Engine>,
}

impl EndpointApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    /// List every endpoint registered for this account. Unlike the other
    /// list calls this one is not paginated; the payload is a bare array.
    pub fn list(&self) -> Result<Vec<Endpoint>, OnboError> {
        let payload = self
            .engine
            .fire(HttpMethod::Get, "webhooks/endpoints", &[], None)?
            .into_result()?;
        types::decode(payload)
    }

    pub fn by_id(&self, endpoint_id: &str) -> Result<Endpoint, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("webhooks/endpoints/{endpoint_id}"),
                &[],
                None,
            )?
            .into_result()?;
        types::decode(payload)
    }

    /// Find an endpoint by its registered URL. The remote API has no
    /// lookup for this, so it is a list plus a linear scan.
    pub fn by_url(&self, endpoint_url: &str) -> Result<Option<Endpoint>, OnboError> {
        let endpoints = self.list()?;
        Ok(endpoints
            .into_iter()
            .find(|ep| ep.url.as_deref() == Some(endpoint_url)))
    }

    pub fn create(&self, data: &Endpoint) -> Result<Endpoint, OnboError> {
        let body = RequestBody::json(data)?;
        let payload = self
            .engine
            .fire(HttpMethod::Post, "webhooks/endpoints", &[], Some(&body))?
            .into_result()?;
        types::decode(payload)
    }

    pub fn update(&self, endpoint_id: &str, data: &Endpoint) -> Result<Endpoint, OnboError> {
        let body = RequestBody::json(data)?;
        let payload = self
            .engine
            .fire(
                HttpMethod::Put,
                &format!("webhooks/endpoints/{endpoint_id}"),
                &[],
                Some(&body),
            )?
            .into_result()?;
        types::decode(payload)
    }

    pub fn delete(&self, endpoint_id: &str) -> Result<(), OnboError> {
        self.engine
            .fire(
                HttpMethod::Delete,
                &format!("webhooks/endpoints/{endpoint_id}"),
                &[],
                None,
            )?
            .into_result()?;
        Ok(())
    }

    /// Ask the service to resend every failed message for an endpoint,
    /// optionally starting from a `YYYY-MM-DD` date.
    pub fn recover_failed_messages(
        &self,
        endpoint_id: &str,
        start_date: Option<&str>,
    ) -> Result<(), OnboError> {
        let body = start_date.map(|date| RequestBody::Json(json!({ "startDate": date })));
        self.engine
            .fire(
                HttpMethod::Post,
                &format!("webhooks/endpoints/{endpoint_id}/resend"),
                &[],
                body.as_ref(),
            )?
            .into_result()?;
        Ok(())
    }
}
