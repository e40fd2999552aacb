//! Repayments against an activated line of credit.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::{HttpMethod, RequestBody};
use crate::loc::{BankInfo, Repayment};
use crate::types::{self, Page, PageOptions};

/// A new repayment. When `repayment_bank_info` is absent the account
/// registered at activation is used.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentRequest {
    pub amount: f64,
    /// e.g. `ACH` or `CHECK`.
    pub payment_type: String,
    pub payment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_bank_info: Option<BankInfo>,
}

/// Credit position plus the identifier of the recorded repayment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentReceipt {
    pub available_credit: Option<f64>,
    pub current_credit: Option<f64>,
    pub repayment_uuid: Option<String>,
}

/// Resource methods under `users/{user_id}/loc/{loc_id}/payments`.
pub struct RepaymentApi {
    engine: Arc<Engine>,
}

impl RepaymentApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn list(
        &self,
        user_id: &str,
        loc_id: &str,
        options: Option<&PageOptions>,
    ) -> Result<Page<Repayment>, OnboError> {
        let query = options.map(|o| o.to_query()).unwrap_or_default();
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/loc/{loc_id}/payments"),
                &query,
                None,
            )?
            .into_result()?;
        Page::from_payload(payload)
    }

    pub fn by_id(
        &self,
        user_id: &str,
        loc_id: &str,
        payment_id: &str,
    ) -> Result<Repayment, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/loc/{loc_id}/payments/{payment_id}"),
                &[],
                None,
            )?
            .into_result()?;
        types::decode(payload)
    }

    pub fn create(
        &self,
        user_id: &str,
        loc_id: &str,
        data: &RepaymentRequest,
    ) -> Result<RepaymentReceipt, OnboError> {
        let body = RequestBody::json(data)?;
        let payload = self
            .engine
            .fire(
                HttpMethod::Post,
                &format!("users/{user_id}/loc/{loc_id}/payments"),
                &[],
                Some(&body),
            )?
            .into_result()?;
        types::decode(payload)
    }
}
