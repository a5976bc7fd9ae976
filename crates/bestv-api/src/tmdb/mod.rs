//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints
//! and retrieves movie, TV show, and cast data.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, GenreResponse, MovieCreditResponse, MovieCreditsResponse,
    MovieResponse, PageParams, PageResponse, PersonResponse, SearchMovieParams, SearchTvParams,
    TmdbErrorResponse, TvShowResponse,
};
