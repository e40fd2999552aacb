//! Draw-downs: disbursements against an activated line of credit.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::{HttpMethod, RequestBody};
use crate::loc::{BankInfo, DrawDown};
use crate::types::{self, Page, PageOptions};

/// A new disbursement. When `disbursement_bank_info` is absent the account
/// registered at activation is used.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disbursement_bank_info: Option<BankInfo>,
}

/// Credit position after a draw or repayment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    pub available_credit: Option<f64>,
    pub current_credit: Option<f64>,
}

/// Resource methods under `users/{user_id}/loc/{loc_id}`: draws post to
/// `draw`, history reads from `disbursements`.
pub struct DrawDownApi {
    engine: Arc<Engine>,
}

impl DrawDownApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn list(
        &self,
        user_id: &str,
        loc_id: &str,
        options: Option<&PageOptions>,
    ) -> Result<Page<DrawDown>, OnboError> {
        let query = options.map(|o| o.to_query()).unwrap_or_default();
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/loc/{loc_id}/disbursements"),
                &query,
                None,
            )?
            .into_result()?;
        Page::from_payload(payload)
    }

    pub fn create(
        &self,
        user_id: &str,
        loc_id: &str,
        data: &DrawRequest,
    ) -> Result<CreditSummary, OnboError> {
        let body = RequestBody::json(data)?;
        let payload = self
            .engine
            .fire(
                HttpMethod::Post,
                &format!("users/{user_id}/loc/{loc_id}/draw"),
                &[],
                Some(&body),
            )?
            .into_result()?;
        types::decode(payload)
    }
}
