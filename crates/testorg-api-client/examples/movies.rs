//! Create a movie and read it back
//!
//! Configure with `TESTORG_API_ENV`, `TESTORG_API_BASE_URL` and
//! `TESTORG_API_TOKEN`; set `RUST_LOG=testorg_api_client=debug` to see
//! each attempt.

use anyhow::Context;
use testorg_api_client::{
    BaseClientOptions,
    Error,
    TestOrgApiClient,
    api::{
        CreateMovieRequest,
        MovieDoesNotExistError,
        MovieId,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("testorg_api_client=info,info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let options = BaseClientOptions::from_env();
    let client = TestOrgApiClient::new(options).context("invalid client options")?;
    tracing::info!(base_url = client.base_url(), "Connected");

    let id = client
        .imdb()
        .create_movie(&CreateMovieRequest::new("The Matrix", 8.7), None)
        .await
        .context("create_movie failed")?;
    let movie = client.imdb().get_movie(&id, None).await?;
    tracing::info!(id = %movie.id, title = %movie.title, rating = movie.rating, "Fetched movie");

    match client.imdb().get_movie(&MovieId::new("does-not-exist"), None).await {
        Err(Error::ApiError(err)) => {
            match MovieDoesNotExistError::try_from(&err) {
                Ok(not_found) => tracing::info!("{not_found}"),
                Err(()) => return Err(Error::ApiError(err).into()),
            }
        }
        Err(err) => return Err(err.into()),
        Ok(movie) => tracing::warn!(title = %movie.title, "Unexpectedly found a movie"),
    }

    Ok(())
}
