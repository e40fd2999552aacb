//! Line-of-credit applications: create, inspect, and activate.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::{HttpMethod, RequestBody};
use crate::loc::{BankInfo, LineOfCredit, Offer};
use crate::types::{self, Page, PageOptions};

/// A new application. `decision` and `offers` let an integration that runs
/// its own underwriting submit pre-decisioned terms; leaving them out
/// defers to the remote decisioning engine.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offers: Option<Vec<Offer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
}

/// Activation of an accepted offer: the signed promissory note plus the
/// accounts to disburse from and repay into.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    pub status: String,
    pub document_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disbursement_bank_info: Option<BankInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_bank_info: Option<BankInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationStatus {
    pub status: Option<String>,
}

/// A link to the hosted promissory note PDF. After activation the URL
/// serves the executed document; the uuid expires after 24 hours.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromissoryNote {
    pub document_uuid: Option<String>,
    pub document_url: Option<String>,
}

/// Resource methods under `users/{user_id}/loc/applications`.
pub struct ApplicationApi {
    engine: Arc<Engine>,
}

impl ApplicationApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    /// List applications for one user, or across the whole account when
    /// `user_id` is `None`.
    pub fn list(
        &self,
        user_id: Option<&str>,
        options: Option<&PageOptions>,
    ) -> Result<Page<LineOfCredit>, OnboError> {
        let path = match user_id {
            Some(user_id) => format!("users/{user_id}/loc/applications"),
            None => "users/loc/applications".to_string(),
        };
        let query = options.map(|o| o.to_query()).unwrap_or_default();
        let payload = self
            .engine
            .fire(HttpMethod::Get, &path, &query, None)?
            .into_result()?;
        Page::from_payload(payload)
    }

    pub fn by_id(&self, user_id: &str, application_id: &str) -> Result<LineOfCredit, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/loc/applications/{application_id}"),
                &[],
                None,
            )?
            .into_result()?;
        types::decode(payload)
    }

    pub fn create(
        &self,
        user_id: &str,
        data: &ApplicationRequest,
    ) -> Result<LineOfCredit, OnboError> {
        let body = RequestBody::json(data)?;
        let payload = self
            .engine
            .fire(
                HttpMethod::Post,
                &format!("users/{user_id}/loc/applications"),
                &[],
                Some(&body),
            )?
            .into_result()?;
        types::decode(payload)
    }

    /// Fetch the promissory note document link for an offer.
    pub fn promissory_note(
        &self,
        user_id: &str,
        offer_id: &str,
    ) -> Result<PromissoryNote, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/loc/{offer_id}/documents/promissory_note"),
                &[],
                None,
            )?
            .into_result()?;
        types::decode(payload)
    }

    /// Activate the line of credit behind an accepted offer.
    pub fn activate(
        &self,
        user_id: &str,
        offer_id: &str,
        data: &ActivationRequest,
    ) -> Result<ActivationStatus, OnboError> {
        let body = RequestBody::json(data)?;
        let payload = self
            .engine
            .fire(
                HttpMethod::Patch,
                &format!("users/{user_id}/loc/{offer_id}"),
                &[],
                Some(&body),
            )?
            .into_result()?;
        types::decode(payload)
    }
}
