//! Key people: officers and beneficial owners of a business user.
//!
//! A business can carry its key people inline on create, or manage them
//! one at a time here. Each key person is a [`Person`] and gets the same
//! outbound PII treatment as a consumer.

use std::sync::Arc;

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::HttpMethod;
use crate::types::{Page, PageOptions};
use crate::user::{self, Person};

/// Resource methods under `users/{user_id}/key_people`.
pub struct KeyPersonApi {
    engine: Arc<Engine>,
}

impl KeyPersonApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn list(
        &self,
        user_id: &str,
        options: Option<&PageOptions>,
    ) -> Result<Page<Person>, OnboError> {
        let query = options.map(|o| o.to_query()).unwrap_or_default();
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/key_people"),
                &query,
                None,
            )?
            .into_result()?;
        user::decode_page(payload)
    }

    pub fn by_id(&self, user_id: &str, key_person_id: &str) -> Result<Person, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/key_people/{key_person_id}"),
                &[],
                None,
            )?
            .into_result()?;
        user::decode(payload)
    }

    pub fn create(&self, user_id: &str, data: &Person) -> Result<Person, OnboError> {
        let body = user::prepare(data, self.engine.secret())?;
        let payload = self
            .engine
            .fire(
                HttpMethod::Post,
                &format!("users/{user_id}/key_people"),
                &[],
                Some(&body),
            )?
            .into_result()?;
        user::decode(payload)
    }

    pub fn update(
        &self,
        user_id: &str,
        key_person_id: &str,
        data: &Person,
    ) -> Result<Person, OnboError> {
        let body = user::prepare(data, self.engine.secret())?;
        let payload = self
            .engine
            .fire(
                HttpMethod::Put,
                &format!("users/{user_id}/key_people/{key_person_id}"),
                &[],
                Some(&body),
            )?
            .into_result()?;
        user::decode(payload)
    }

    /// Returns the server's confirmation string when it sends one.
    pub fn delete(
        &self,
        user_id: &str,
        key_person_id: &str,
    ) -> Result<Option<String>, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Delete,
                &format!("users/{user_id}/key_people/{key_person_id}"),
                &[],
                None,
            )?
            .into_result()?;
        Ok(payload.as_str().map(str::to_string))
    }
}
