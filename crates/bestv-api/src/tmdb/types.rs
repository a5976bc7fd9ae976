//! TMDB API response types and request parameters.

use serde::Deserialize;

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

// --- Pages ---

/// A page of results, as returned by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse<T> {
    /// Current page number.
    pub page: u32,
    /// Results on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Total number of pages (0 when nothing matched).
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

// --- Movies ---

/// A movie, either as a list entry or as a `movie/{id}` document.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieResponse {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Release date (YYYY-MM-DD, may be empty).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs (list endpoints only).
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Genres (detail endpoint only).
    #[serde(default)]
    pub genres: Vec<GenreResponse>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Runtime in minutes (detail endpoint only).
    pub runtime: Option<u32>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreResponse {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- TV shows ---

/// A TV show, either as a list entry or as a `tv/{id}` document.
#[derive(Debug, Clone, Deserialize)]
pub struct TvShowResponse {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    #[serde(default)]
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Origin countries (ISO 3166-1).
    #[serde(default)]
    pub origin_country: Vec<String>,
    /// First air date.
    pub first_air_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs (list endpoints only).
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Number of seasons (detail endpoint only).
    pub number_of_seasons: Option<u32>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

// --- People ---

/// Response from `person/{person_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonResponse {
    /// TMDB person ID.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Biography text.
    pub biography: Option<String>,
    /// Birthday (YYYY-MM-DD).
    pub birthday: Option<String>,
    /// Day of death (YYYY-MM-DD).
    pub deathday: Option<String>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Department the person is known for (e.g. "Acting").
    pub known_for_department: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
}

/// Response from `person/{person_id}/movie_credits`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieCreditsResponse {
    /// TMDB person ID.
    pub id: u64,
    /// Movies the person appeared in.
    #[serde(default)]
    pub cast: Vec<MovieCreditResponse>,
}

/// A single acting credit.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieCreditResponse {
    /// Character played.
    pub character: Option<String>,
    /// Credit ID.
    pub credit_id: Option<String>,
    /// The movie itself.
    #[serde(flatten)]
    pub movie: MovieResponse,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
}

// --- Request parameters ---

/// Parameters shared by the paginated movie list endpoints
/// (`now_playing`, `popular`, `top_rated`, `upcoming`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
        }
    }
}

impl PageParams {
    /// Creates params for the given page.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Parameters for `discover/movie` filtered by genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Genre to filter by (`with_genres`).
    pub genre_id: u32,
    /// Response language (default: "en-US").
    pub language: String,
    /// Include adult content.
    pub include_adult: bool,
    /// Result page (1-500, default: 1).
    pub page: u32,
}

impl DiscoverMovieParams {
    /// Creates params for the given genre.
    #[must_use]
    pub fn new(genre_id: u32) -> Self {
        Self {
            genre_id,
            language: String::from(DEFAULT_LANGUAGE),
            include_adult: false,
            page: 1,
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

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Parameters for `search/movie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by year.
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the include-adult flag.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }
}

/// Parameters for `search/tv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTvParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by first air date year.
    pub first_air_date_year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
            first_air_date_year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the first air date year filter.
    #[must_use]
    pub const fn first_air_date_year(mut self, year: u32) -> Self {
        self.first_air_date_year = Some(year);
        self
    }

    /// Sets the include-adult flag.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }
}
