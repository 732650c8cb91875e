//! Entry point of the SDK

use crate::{
    api::ImdbClient,
    base_client::BaseClientOptions,
    errors::Result,
    transport::Fetcher,
};
use std::sync::Arc;

/// Client for the TestOrg API
///
/// Cheap to clone; clones share one connection pool.
///
/// ``` no_run
/// use testorg_api_client::{BaseClientOptions, TestOrgApiClient, TestOrgApiEnvironment, api};
///
/// #[tokio::main]
/// async fn main() -> testorg_api_client::Result<()> {
///     let client = TestOrgApiClient::new(
///         BaseClientOptions::from_environment(TestOrgApiEnvironment::Staging),
///     )?;
///     let id = client
///         .imdb()
///         .create_movie(&api::CreateMovieRequest::new("Heat", 8.3), None)
///         .await?;
///     let movie = client.imdb().get_movie(&id, None).await?;
///     println!("{} rated {}", movie.title, movie.rating);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TestOrgApiClient {
    options: BaseClientOptions,
    fetcher: Arc<Fetcher>,
    imdb: ImdbClient,
}

impl TestOrgApiClient {
    /// Validate `options` and build the client
    pub fn new(options: BaseClientOptions) -> Result<Self> {
        let fetcher = Arc::new(Fetcher::new(&options)?);
        tracing::debug!(base_url = %fetcher.base_url(), "Created TestOrg API client");

        Ok(Self {
            options,
            imdb: ImdbClient::new(Arc::clone(&fetcher)),
            fetcher,
        })
    }

    /// Build a client from `TESTORG_API_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(BaseClientOptions::from_env())
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.fetcher.base_url().as_str()
    }

    pub fn options(&self) -> &BaseClientOptions {
        &self.options
    }

    pub fn imdb(&self) -> &ImdbClient {
        &self.imdb
    }
}
