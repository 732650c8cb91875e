//! Transport shared by every resource client

mod fetcher;
mod raw_response;
mod request_url;
mod retry;

pub(crate) use fetcher::{
    FetchArgs,
    Fetcher,
};
pub use raw_response::{
    RawResponse,
    WithRawResponse,
};
