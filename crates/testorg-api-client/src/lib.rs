//! Typed async client for the TestOrg movie API
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod auth;
pub mod base_client;
pub mod client;
pub mod environments;
pub mod errors;
pub mod exports;
mod transport;

pub use base_client::{
    BaseClientOptions,
    BaseRequestOptions,
};
pub use client::TestOrgApiClient;
pub use environments::TestOrgApiEnvironment;
pub use errors::{
    TestOrgApiError,
    TestOrgApiTimeoutError,
};
pub use exports::*;
