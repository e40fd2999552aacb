//! Webhook message history and recovery.

use std::sync::Arc;

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::HttpMethod;
use crate::types::{self, MessageFilter, Page};
use crate::webhook::Message;

/// Resource methods under `webhooks/endpoints/messages`.
pub struct MessageApi {
    engine: Arc<Engine>,
}

impl MessageApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn by_id(&self, message_id: &str) -> Result<Message, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("webhooks/endpoints/messages/{message_id}"),
                &[],
                None,
            )?
            .into_result()?;
        types::decode(payload)
    }

    /// List messages sent to any endpoint on this account, filtered by
    /// date window, event type, and the standard paging parameters.
    pub fn list(&self, filter: Option<&MessageFilter>) -> Result<Page<Message>, OnboError> {
        let query = filter.map(|f| f.to_query()).unwrap_or_default();
        let payload = self
            .engine
            .fire(HttpMethod::Get, "webhooks/endpoints/messages", &query, None)?
            .into_result()?;
        Page::from_payload(payload)
    }

    /// Ask the service to queue one failed message for redelivery.
    pub fn recover_failed_message(&self, message_id: &str) -> Result<(), OnboError> {
        self.engine
            .fire(
                HttpMethod::Post,
                &format!("webhooks/endpoints/messages/{message_id}/resend"),
                &[],
                None,
            )?
            .into_result()?;
        Ok(())
    }
}
