//! Statements: the balance and billing picture for a line of credit.

use std::sync::Arc;

use serde_json::Value;

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::HttpMethod;
use crate::loc::Statement;
use crate::types;

/// Resource methods under `users/{user_id}/loc/{loc_id}/statements`.
pub struct StatementApi {
    engine: Arc<Engine>,
}

impl StatementApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    /// Fetch the current statement. The endpoint wraps the statement in a
    /// `data` envelope even though it is a single object, not a list.
    pub fn get(&self, user_id: &str, loc_id: &str) -> Result<Statement, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/loc/{loc_id}/statements"),
                &[],
                None,
            )?
            .into_result()?;
        let data = payload.get("data").cloned().unwrap_or(Value::Null);
        types::decode(data)
    }
}
