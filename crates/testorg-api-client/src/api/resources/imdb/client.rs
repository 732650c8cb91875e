use super::{
    CreateMovieRequest,
    Movie,
    MovieId,
};
use crate::{
    base_client::BaseRequestOptions,
    errors::Result,
    transport::{
        FetchArgs,
        Fetcher,
        WithRawResponse,
    },
};
use reqwest::Method;
use std::sync::Arc;

/// Client for the `imdb` resource, obtained from [`crate::TestOrgApiClient::imdb`]
#[derive(Debug, Clone)]
pub struct ImdbClient {
    fetcher: Arc<Fetcher>,
}

impl ImdbClient {
    pub(crate) fn new(fetcher: Arc<Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Add a movie to the database and return its id
    ///
    /// `POST /movies/create-movie`
    pub async fn create_movie(
        &self,
        request: &CreateMovieRequest,
        options: Option<BaseRequestOptions>,
    ) -> Result<MovieId> {
        self.create_movie_with_raw_response(request, options)
            .await
            .map(WithRawResponse::into_data)
    }

    pub async fn create_movie_with_raw_response(
        &self,
        request: &CreateMovieRequest,
        options: Option<BaseRequestOptions>,
    ) -> Result<WithRawResponse<MovieId>> {
        let args = FetchArgs::new(Method::POST, &["movies", "create-movie"])
            .json_body(serde_json::to_value(request)?)
            .options(options);
        self.fetcher.fetch(args).await
    }

    /// Fetch a movie by id
    ///
    /// `GET /movies/{movieId}`. A 404 carrying the id converts into
    /// [`super::MovieDoesNotExistError`].
    pub async fn get_movie(
        &self,
        movie_id: &MovieId,
        options: Option<BaseRequestOptions>,
    ) -> Result<Movie> {
        self.get_movie_with_raw_response(movie_id, options)
            .await
            .map(WithRawResponse::into_data)
    }

    pub async fn get_movie_with_raw_response(
        &self,
        movie_id: &MovieId,
        options: Option<BaseRequestOptions>,
    ) -> Result<WithRawResponse<Movie>> {
        let path = ["movies", movie_id.as_str()];
        let args = FetchArgs::new(Method::GET, &path).options(options);
        self.fetcher.fetch(args).await
    }
}
