//! `MediaRepository` - uniform access to movies and TV shows.
#![allow(clippy::future_not_send)]

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use bestv_api::tmdb::{
    DiscoverMovieParams, PageParams, SearchMovieParams, SearchTvParams, TmdbApi,
};
use tracing::instrument;

use crate::work::{CastMember, Movie, Page, TvShow};

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Media repository trait.
///
/// The "search by query, page N" contract the search presenter depends on.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MediaRepository: Send)]
pub trait LocalMediaRepository {
    /// Searches movies matching `text`, returning page `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying API request fails.
    async fn search_movies_by_query(&self, text: &str, page: u32) -> Result<Page<Movie>>;

    /// Searches TV shows matching `text`, returning page `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying API request fails.
    async fn search_tv_shows_by_query(&self, text: &str, page: u32) -> Result<Page<TvShow>>;
}

/// Curated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieCategory {
    /// Currently in theatres.
    NowPlaying,
    /// Popular right now.
    Popular,
    /// Highest rated.
    TopRated,
    /// Coming soon.
    Upcoming,
}

impl MovieCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 4] = [Self::NowPlaying, Self::Popular, Self::TopRated, Self::Upcoming];

    /// Kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NowPlaying => "now-playing",
            Self::Popular => "popular",
            Self::TopRated => "top-rated",
            Self::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "now-playing" => Ok(Self::NowPlaying),
            "popular" => Ok(Self::Popular),
            "top-rated" => Ok(Self::TopRated),
            "upcoming" => Ok(Self::Upcoming),
            other => bail!("unknown movie category: {other}"),
        }
    }
}

/// `MediaRepository` backed by the TMDB API.
///
/// Pure delegation: builds request params from the repository's language and
/// adult-content settings and normalizes responses into domain [`Page`]s.
#[derive(Debug, Clone)]
pub struct TmdbMediaRepository<A> {
    /// API client.
    api: A,
    /// Response language.
    language: String,
    /// Include adult content in searches and discovery.
    include_adult: bool,
}

impl<A> TmdbMediaRepository<A> {
    /// Creates a repository over `api` with "en-US" and no adult content.
    pub fn new(api: A) -> Self {
        Self {
            api,
            language: String::from(DEFAULT_LANGUAGE),
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the include-adult flag.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }
}

impl<A: TmdbApi + Sync> TmdbMediaRepository<A> {
    /// Loads one page of a curated movie list.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying API request fails.
    #[instrument(skip(self))]
    pub async fn movies_by_category(
        &self,
        category: MovieCategory,
        page: u32,
    ) -> Result<Page<Movie>> {
        let params = PageParams::new(page).language(self.language.as_str());
        let response = match category {
            MovieCategory::NowPlaying => self.api.now_playing_movies(&params).await?,
            MovieCategory::Popular => self.api.popular_movies(&params).await?,
            MovieCategory::TopRated => self.api.top_rated_movies(&params).await?,
            MovieCategory::Upcoming => self.api.upcoming_movies(&params).await?,
        };
        Ok(response.into())
    }

    /// Loads one page of movies of a genre.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying API request fails.
    #[instrument(skip(self))]
    pub async fn movies_by_genre(&self, genre_id: u32, page: u32) -> Result<Page<Movie>> {
        let params = DiscoverMovieParams::new(genre_id)
            .language(self.language.as_str())
            .include_adult(self.include_adult)
            .page(page);
        Ok(self.api.movies_by_genre(&params).await?.into())
    }

    /// Loads a single movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying API request fails.
    #[instrument(skip(self))]
    pub async fn movie(&self, movie_id: u64) -> Result<Movie> {
        Ok(self.api.movie(movie_id, &self.language).await?.into())
    }

    /// Loads a single TV show.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying API request fails.
    #[instrument(skip(self))]
    pub async fn tv_show(&self, series_id: u64) -> Result<TvShow> {
        Ok(self.api.tv_show(series_id, &self.language).await?.into())
    }

    /// Loads a cast member and the movies they acted in.
    ///
    /// Both requests are issued concurrently; either failing fails the whole.
    ///
    /// # Errors
    ///
    /// Returns an error if either API request fails.
    #[instrument(skip(self))]
    pub async fn cast_details(&self, person_id: u64) -> Result<CastMember> {
        let (person, credits) = tokio::try_join!(
            self.api.person(person_id, &self.language),
            self.api.person_movie_credits(person_id, &self.language),
        )?;
        let movies = credits
            .cast
            .into_iter()
            .map(|credit| Movie::from(credit.movie))
            .collect();
        Ok(CastMember::new(person, movies))
    }
}

impl<A: TmdbApi + Sync> MediaRepository for TmdbMediaRepository<A> {
    #[instrument(skip(self))]
    async fn search_movies_by_query(&self, text: &str, page: u32) -> Result<Page<Movie>> {
        let params = SearchMovieParams::new(text)
            .language(self.language.as_str())
            .include_adult(self.include_adult)
            .page(page);
        Ok(self.api.search_movie(&params).await?.into())
    }

    #[instrument(skip(self))]
    async fn search_tv_shows_by_query(&self, text: &str, page: u32) -> Result<Page<TvShow>> {
        let params = SearchTvParams::new(text)
            .language(self.language.as_str())
            .include_adult(self.include_adult)
            .page(page);
        Ok(self.api.search_tv(&params).await?.into())
    }
}
