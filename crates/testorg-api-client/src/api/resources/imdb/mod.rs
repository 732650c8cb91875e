//! The `imdb` resource: a catalogue of rated movies

mod client;
mod errors;
mod types;

pub use client::ImdbClient;
pub use errors::MovieDoesNotExistError;
pub use types::{
    CreateMovieRequest,
    Movie,
    MovieId,
};
