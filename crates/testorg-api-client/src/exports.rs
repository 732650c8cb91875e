//! Helpers exported from the crate root alongside the client

pub use crate::{
    auth::AuthConfig,
    errors::{
        Error,
        Result,
    },
    transport::{
        RawResponse,
        WithRawResponse,
    },
};
