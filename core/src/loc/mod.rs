//! Lines of credit and the operations that live under them.
//!
//! A line of credit starts life as an application, gains offers, and is
//! activated against one of them; draw-downs, repayments, and statements
//! then hang off the activated line. The sub-APIs are fields on
//! [`LineOfCreditApi`], mirroring the URL structure under
//! `users/{user_id}/loc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::OnboError;
use crate::http::HttpMethod;
use crate::types::{self, Page, PageOptions};

pub mod application;
pub mod draw_down;
pub mod repayment;
pub mod statement;

pub use application::ApplicationApi;
pub use draw_down::DrawDownApi;
pub use repayment::RepaymentApi;
pub use statement::StatementApi;

/// A line of credit, from application through activation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOfCredit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score_consent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_report_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offers: Vec<Offer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LocStatus>,
}

/// The lifecycle state of a line of credit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// One priced offer attached to an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origination_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_only_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_only_installment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<String>,
}

/// ACH account details for disbursement or repayment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ach_routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// A disbursement made against an activated line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawDown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower_bank_account_uuid: Option<String>,
}

/// A repayment made against an activated line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repayment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspense: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_commit_to_nls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_nls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower_bank_account_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ach_batch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ach_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The balance and billing picture for one line of credit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_billing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_past_due: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_due_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_payment_amount_due: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_payment_due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspense_balance: Option<f64>,
    /// Links to the monthly statement PDFs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<StatementEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_credit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_credit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amortization_schedule: Option<Vec<AmortizationPayment>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One row of the amortization schedule. These come off the loan servicing
/// backend in PascalCase and are not re-cased on the wire, so the renames
/// here are literal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmortizationPayment {
    #[serde(rename = "IsHistory", skip_serializing_if = "Option::is_none")]
    pub is_history: Option<i64>,
    #[serde(rename = "PaymentDate", skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(rename = "LoanAmount", skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
    #[serde(rename = "InterestAmount", skip_serializing_if = "Option::is_none")]
    pub interest_amount: Option<f64>,
    #[serde(rename = "PrincipalAmount", skip_serializing_if = "Option::is_none")]
    pub principal_amount: Option<f64>,
    #[serde(rename = "OtherAmount", skip_serializing_if = "Option::is_none")]
    pub other_amount: Option<f64>,
    #[serde(rename = "PaymentAmount", skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<f64>,
    #[serde(rename = "BalanceAmount", skip_serializing_if = "Option::is_none")]
    pub balance_amount: Option<f64>,
    #[serde(rename = "PaymentNumber", skip_serializing_if = "Option::is_none")]
    pub payment_number: Option<i64>,
    #[serde(rename = "ACHTransactionIds", skip_serializing_if = "Option::is_none")]
    pub ach_transaction_ids: Option<Vec<String>>,
}

/// Resource methods under `users/{user_id}/loc`.
pub struct LineOfCreditApi {
    engine: Arc<Engine>,
    pub application: ApplicationApi,
    pub draw_down: DrawDownApi,
    pub repayment: RepaymentApi,
    pub statement: StatementApi,
}

impl LineOfCreditApi {
    pub(crate) fn new(engine: Arc<Engine>) -> Self {
        Self {
            application: ApplicationApi::new(Arc::clone(&engine)),
            draw_down: DrawDownApi::new(Arc::clone(&engine)),
            repayment: RepaymentApi::new(Arc::clone(&engine)),
            statement: StatementApi::new(Arc::clone(&engine)),
            engine,
        }
    }

    /// List lines of credit for one user, or across the whole account when
    /// `user_id` is `None`.
    pub fn list(
        &self,
        user_id: Option<&str>,
        options: Option<&PageOptions>,
    ) -> Result<Page<LineOfCredit>, OnboError> {
        let path = match user_id {
            Some(user_id) => format!("users/{user_id}/loc"),
            None => "users/loc".to_string(),
        };
        let query = options.map(|o| o.to_query()).unwrap_or_default();
        let payload = self
            .engine
            .fire(HttpMethod::Get, &path, &query, None)?
            .into_result()?;
        Page::from_payload(payload)
    }

    pub fn by_id(&self, user_id: &str, loc_id: &str) -> Result<LineOfCredit, OnboError> {
        let payload = self
            .engine
            .fire(
                HttpMethod::Get,
                &format!("users/{user_id}/loc/{loc_id}"),
                &[],
                None,
            )?
            .into_result()?;
        types::decode(payload)
    }
}
