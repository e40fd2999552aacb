//! Synchronous client for the Onbo lending API.
//!
//! # Overview
//! Onbo fronts loan origination and servicing behind a REST API with an
//! unusual amount of per-request ceremony: every call carries an MD5
//! digest of its canonicalized body, an epoch timestamp, and an
//! HMAC-SHA256 signature over the three; bodies are snake_cased on the
//! wire but camelCased locally; and sensitive identifiers (SSN, EIN) must
//! be AES-encrypted before they leave the process. This crate wraps all of
//! that behind resource-oriented methods: users and their key people,
//! lines of credit with applications, draw-downs, repayments and
//! statements, and webhook endpoints and messages.
//!
//! # Design
//! - [`Onbo`] holds one immutable engine shared by every resource module;
//!   construction is cheap and calls are safe to make concurrently.
//! - The engine splits each call into `prepare` (build the signed request,
//!   no I/O) and `dispatch` (execute it), so the signing pipeline is
//!   testable as plain data.
//! - One error contract everywhere: HTTP >= 400, a `message` field in the
//!   payload, or a missing payload all surface as [`OnboError`]. Nothing
//!   panics across the API boundary.

pub mod cipher;
pub mod client;
pub mod engine;
pub mod error;
pub mod http;
pub mod loc;
pub mod sign;
pub mod transform;
pub mod types;
pub mod user;
pub mod webhook;

pub use client::{Onbo, OnboConfig, DEFAULT_BASE_URL};
pub use error::OnboError;
pub use http::{HttpMethod, MultipartForm, PreparedRequest, RequestBody};
pub use types::{MessageFilter, Page, PageOptions, Pagination};
pub use user::{Address, Business, Consumer, Person, User};
