//! Shared wire shapes: pagination envelopes and list-call options.
//!
//! # Design
//! These types are defined independently of the mock-server crate;
//! integration tests catch schema drift. List endpoints respond with
//! `{data: [...], pagination: {...}}`; the options structs translate into
//! query parameters, dropping absent fields (but an explicit `0` is a real
//! value and is sent).

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::OnboError;

/// Pagination data returned on list calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub total: Option<u64>,
}

/// One page of a list response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    // `default = "Vec::new"` keeps the derive from demanding `T: Default`
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T: DeserializeOwned> Page<T> {
    pub(crate) fn from_payload(payload: Value) -> Result<Self, OnboError> {
        decode(payload)
    }
}

/// Decode a payload into a concrete response type.
pub(crate) fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, OnboError> {
    serde_json::from_value(payload).map_err(|e| OnboError::Decode(e.to_string()))
}

/// Standard paging options. The remote defaults are offset 0, limit 25.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl PageOptions {
    pub fn limit(limit: u64) -> Self {
        Self {
            offset: None,
            limit: Some(limit),
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        query
    }
}

/// Filtering options for the webhook message list: paging plus a date
/// window and an event type. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub event: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl MessageFilter {
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(event) = &self.event {
            query.push(("event".to_string(), event.clone()));
        }
        if let Some(start) = &self.start_date {
            query.push(("start_date".to_string(), start.clone()));
        }
        if let Some(end) = &self.end_date {
            query.push(("end_date".to_string(), end.clone()));
        }
        query
    }
}
