//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    DiscoverMovieParams, MovieCreditsResponse, MovieResponse, PageParams, PageResponse,
    PersonResponse, SearchMovieParams, SearchTvParams, TvShowResponse,
};

/// TMDB API trait.
///
/// One method per remote resource. Abstracts API operations for mock
/// substitution in tests. Uses `trait_variant::make` to generate a
/// `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches a single movie (`movie/{movie_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie(&self, movie_id: u64, language: &str) -> Result<MovieResponse>;

    /// Discovers movies of a genre (`discover/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movies_by_genre(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<PageResponse<MovieResponse>>;

    /// Lists movies now in theatres (`movie/now_playing`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn now_playing_movies(&self, params: &PageParams)
    -> Result<PageResponse<MovieResponse>>;

    /// Lists popular movies (`movie/popular`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_movies(&self, params: &PageParams) -> Result<PageResponse<MovieResponse>>;

    /// Lists top rated movies (`movie/top_rated`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated_movies(&self, params: &PageParams) -> Result<PageResponse<MovieResponse>>;

    /// Lists upcoming movies (`movie/upcoming`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn upcoming_movies(&self, params: &PageParams) -> Result<PageResponse<MovieResponse>>;

    /// Searches for movies (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams)
    -> Result<PageResponse<MovieResponse>>;

    /// Searches for TV shows (`search/tv`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_tv(&self, params: &SearchTvParams) -> Result<PageResponse<TvShowResponse>>;

    /// Fetches a single TV show (`tv/{series_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_show(&self, series_id: u64, language: &str) -> Result<TvShowResponse>;

    /// Fetches a person's details (`person/{person_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person(&self, person_id: u64, language: &str) -> Result<PersonResponse>;

    /// Fetches the movies a person acted in (`person/{person_id}/movie_credits`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person_movie_credits(
        &self,
        person_id: u64,
        language: &str,
    ) -> Result<MovieCreditsResponse>;
}
