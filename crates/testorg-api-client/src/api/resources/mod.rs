pub mod imdb;

pub use imdb::{
    CreateMovieRequest,
    ImdbClient,
    Movie,
    MovieDoesNotExistError,
    MovieId,
};
