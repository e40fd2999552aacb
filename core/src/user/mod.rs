//! Users: the consumers and businesses that hold lines of credit.
//!
//! # Design
//! `User` is a tagged enum discriminated by the `userType` field so a
//! decoded user is always one concrete shape. Outbound user payloads run
//! through the full PII pass (country and phone formatting, SSN and EIN
//! encryption); inbound payloads get the reverse formatting before they
//! are decoded into these types.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::{HttpMethod, RequestBody};
use crate::transform;
use crate::types::{Page, PageOptions};

pub mod key_person;

pub use key_person::KeyPersonApi;

/// A postal address.
///
/// `line1`..`line3` are spelled `line_1`..`line_3` on the wire; the casing
/// layer handles the rename, so callers use the plain spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Identity fields shared by consumers and the key people of a business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Plain SSN on the way in; encrypted before it leaves the process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizenship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// An individual borrower.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    #[serde(flatten)]
    pub person: Person,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dwolla_customer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_report_json_gzip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_report_xml_gzip: Option<String>,
}

/// A business borrower. `first_name` carries the business name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Plain EIN on the way in; encrypted before it leaves the process.
    #[serde(rename = "EIN", alias = "ein", skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,
    /// Incorporation date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Legal entity kind, e.g. `LLC` or `C_CORP`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Officers and beneficial owners; also manageable individually via
    /// [`KeyPersonApi`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_people: Option<Vec<Person>>,
}

/// A user, discriminated by the `userType` field on the wire.
///
/// The tag is mandatory in both directions; lowercase spellings are
/// accepted on input for compatibility with older payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "userType")]
pub enum User {
    #[serde(rename = "CONSUMER", alias = "consumer")]
    Consumer(Consumer),
    #[serde(rename = "BUSINESS", alias = "business")]
    Business(Business),
}

impl User {
    /// The server-assigned identifier, once the user has been created.
    pub fn uuid(&self) -> Option<&str> {
        match self {
            User::Consumer(c) => c.person.uuid.as_deref(),
            User::Business(b) => b.uuid.as_deref(),
        }
    }
}

/// Resource methods under `users`.
pub struct UserApi {
    engine: Arc<Engine>,
    pub key_person: KeyPersonApi,
}

impl UserApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self {
            key_person: KeyPersonApi::new(Arc::clone(&engine)),
            engine,
        }
    }

    /// List users. Remote paging defaults are offset 0, limit 25.
    pub fn list(&self, options: Option<&PageOptions>) -> Result<Page<User>, OnboError> {
        let query = options.map(|o| o.to_query()).unwrap_or_default();
        let payload = self
            .engine
            .fire(HttpMethod::Get, "users", &query, None)?
            .into_result()?;
        decode_page(payload)
    }

    pub fn by_id(&self, user_id: &str) -> Result<User, OnboError> {
        let payload = self
            .engine
            .fire(HttpMethod::Get, &format!("users/{user_id}"), &[], None)?
            .into_result()?;
        decode(payload)
    }

    pub fn create(&self, data: &User) -> Result<User, OnboError> {
        let body = prepare(data, self.engine.secret())?;
        let payload = self
            .engine
            .fire(HttpMethod::Post, "users", &[], Some(&body))?
            .into_result()?;
        decode(payload)
    }

    pub fn update(&self, user_id: &str, data: &User) -> Result<User, OnboError> {
        let body = prepare(data, self.engine.secret())?;
        let payload = self
            .engine
            .fire(HttpMethod::Put, &format!("users/{user_id}"), &[], Some(&body))?
            .into_result()?;
        decode(payload)
    }

    /// Permanently delete a user. The server refuses while the user holds
    /// an outstanding balance; that surfaces here as an [`OnboError::Api`].
    /// Returns the server's confirmation string when it sends one.
    pub fn delete(&self, user_id: &str) -> Result<Option<String>, OnboError> {
        let payload = self
            .engine
            .fire(HttpMethod::Delete, &format!("users/{user_id}"), &[], None)?
            .into_result()?;
        Ok(payload.as_str().map(str::to_string))
    }
}

/// Serialize a user-shaped value and run the outbound PII pass over it.
pub(crate) fn prepare<T: Serialize>(data: &T, secret: &str) -> Result<RequestBody, OnboError> {
    let value = serde_json::to_value(data).map_err(|e| OnboError::InvalidRequest(e.to_string()))?;
    Ok(RequestBody::Json(transform::prepare_outbound(&value, secret)))
}

/// Undo inbound wire formatting, then decode.
pub(crate) fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, OnboError> {
    crate::types::decode(transform::restore_inbound(&payload))
}

pub(crate) fn decode_page<T: DeserializeOwned>(payload: Value) -> Result<Page<T>, OnboError> {
    let page: Page<Value> = Page::from_payload(payload)?;
    let data = page
        .data
        .iter()
        .map(|item| decode(item.clone()))
        .collect::<Result<Vec<T>, _>>()?;
    Ok(Page {
        data,
        pagination: page.pagination,
    })
}
