//! Webhooks: endpoint management, message history, and validation of
//! incoming deliveries.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::Engine;
use crate::sign;

pub mod endpoint;
pub mod message;

pub use endpoint::EndpointApi;
pub use message::MessageApi;

/// A registered webhook endpoint. Without an explicit `events` list the
/// endpoint receives every event type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
}

/// One delivery sent (or attempted) to an endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub uuid: Option<String>,
    pub event: Option<String>,
    pub payload: Option<MessagePayload>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// The event payload carried by a message. Most events describe payment
/// movement, so the fields mirror the repayment shape; loosely typed
/// fields come through as raw values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub uuid: Option<String>,
    pub status: Option<String>,
    pub product: Option<String>,
    pub amount: Option<f64>,
    pub principal: Option<Value>,
    pub interest: Option<Value>,
    pub fees: Option<Value>,
    pub suspense: Option<Value>,
    pub payment_type: Option<Value>,
    pub effective_date: Option<String>,
    pub ending_balance: Option<f64>,
    pub ach_id: Option<String>,
    pub ach_batch_id: Option<String>,
    pub completion_date: Option<String>,
    pub initiation_date: Option<String>,
    pub error_description: Option<String>,
    pub borrower_bank_account_uuid: Option<String>,
}

/// Webhook APIs plus delivery validation.
pub struct WebhookApi {
    engine: Arc<Engine>,
    pub endpoint: EndpointApi,
    pub message: MessageApi,
}

impl WebhookApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self {
            endpoint: EndpointApi::new(Arc::clone(&engine)),
            message: MessageApi::new(Arc::clone(&engine)),
            engine,
        }
    }

    /// Verify an incoming webhook delivery.
    ///
    /// `url` is the endpoint URL as registered, `headers` the delivery's
    /// headers, and `body` the raw request body. The signature is
    /// recomputed from the URL, the canonical body digest, and the `EPOCH`
    /// header exactly as sent, then compared to `X_STILT_HMAC`. A missing
    /// header fails validation; the epoch is not checked for freshness, so
    /// replay protection is the receiver's concern.
    pub fn is_valid(&self, url: &str, headers: &HashMap<String, String>, body: &str) -> bool {
        let (Some(epoch), Some(claimed)) = (headers.get("EPOCH"), headers.get("X_STILT_HMAC"))
        else {
            return false;
        };
        let digest = sign::content_digest(body);
        let expected = sign::signature(url, &digest, epoch, self.engine.secret());
        *claimed == expected
    }
}
