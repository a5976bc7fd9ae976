//! Works (movies and TV shows) and result pages.

use bestv_api::tmdb::{MovieResponse, PageResponse, PersonResponse, TvShowResponse};

/// A movie.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// A TV show.
#[derive(Debug, Clone, PartialEq)]
pub struct TvShow {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    pub original_name: String,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    pub overview: Option<String>,
    /// First air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Vote average (0-10).
    pub vote_average: f64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

/// A movie or a TV show, as shown side by side in search results.
#[derive(Debug, Clone, PartialEq)]
pub enum Work {
    /// A movie.
    Movie(Movie),
    /// A TV show.
    TvShow(TvShow),
}

impl Work {
    /// TMDB ID (unique per kind only).
    #[must_use]
    pub const fn id(&self) -> u64 {
        match self {
            Self::Movie(movie) => movie.id,
            Self::TvShow(show) => show.id,
        }
    }

    /// Localized title or name.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Movie(movie) => &movie.title,
            Self::TvShow(show) => &show.name,
        }
    }

    /// Backdrop image path, if TMDB has one.
    #[must_use]
    pub fn backdrop_path(&self) -> Option<&str> {
        match self {
            Self::Movie(movie) => movie.backdrop_path.as_deref(),
            Self::TvShow(show) => show.backdrop_path.as_deref(),
        }
    }

    /// Poster image path, if TMDB has one.
    #[must_use]
    pub fn poster_path(&self) -> Option<&str> {
        match self {
            Self::Movie(movie) => movie.poster_path.as_deref(),
            Self::TvShow(show) => show.poster_path.as_deref(),
        }
    }

    /// Vote average.
    #[must_use]
    pub const fn rating(&self) -> f64 {
        match self {
            Self::Movie(movie) => movie.vote_average,
            Self::TvShow(show) => show.vote_average,
        }
    }

    /// Overview text.
    #[must_use]
    pub fn overview(&self) -> Option<&str> {
        match self {
            Self::Movie(movie) => movie.overview.as_deref(),
            Self::TvShow(show) => show.overview.as_deref(),
        }
    }

    /// Release date for movies, first air date for TV shows.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        match self {
            Self::Movie(movie) => movie.release_date.as_deref(),
            Self::TvShow(show) => show.first_air_date.as_deref(),
        }
    }
}

impl From<Movie> for Work {
    fn from(movie: Movie) -> Self {
        Self::Movie(movie)
    }
}

impl From<TvShow> for Work {
    fn from(show: TvShow) -> Self {
        Self::TvShow(show)
    }
}

impl From<MovieResponse> for Movie {
    fn from(r: MovieResponse) -> Self {
        Self {
            id: r.id,
            title: r.title,
            original_title: r.original_title,
            original_language: r.original_language,
            overview: r.overview,
            release_date: r.release_date.filter(|d| !d.is_empty()),
            vote_average: r.vote_average,
            poster_path: r.poster_path,
            backdrop_path: r.backdrop_path,
        }
    }
}

impl From<TvShowResponse> for TvShow {
    fn from(r: TvShowResponse) -> Self {
        Self {
            id: r.id,
            name: r.name,
            original_name: r.original_name,
            original_language: r.original_language,
            overview: r.overview,
            first_air_date: r.first_air_date.filter(|d| !d.is_empty()),
            vote_average: r.vote_average,
            poster_path: r.poster_path,
            backdrop_path: r.backdrop_path,
        }
    }
}

/// A numbered slice of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Page number (1-based).
    pub page: u32,
    /// Declared total page count.
    pub total_pages: u32,
    /// Declared total result count.
    pub total_results: u32,
    /// Works on this page, in API order.
    pub works: Vec<T>,
}

impl<T> Page<T> {
    /// Returns `true` if the page lies within the declared page count.
    ///
    /// An invalid page marks the end of the results; it is not an error.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.page <= self.total_pages
    }
}

impl<R, T: From<R>> From<PageResponse<R>> for Page<T> {
    fn from(r: PageResponse<R>) -> Self {
        Self {
            page: r.page,
            total_pages: r.total_pages,
            total_results: r.total_results,
            works: r.results.into_iter().map(T::from).collect(),
        }
    }
}

/// A cast member with the movies they appeared in.
#[derive(Debug, Clone, PartialEq)]
pub struct CastMember {
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
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Movies the person acted in.
    pub movies: Vec<Movie>,
}

impl CastMember {
    /// Combines a person document with their movie credits.
    #[must_use]
    pub fn new(person: PersonResponse, movies: Vec<Movie>) -> Self {
        Self {
            id: person.id,
            name: person.name,
            biography: person.biography.filter(|b| !b.is_empty()),
            birthday: person.birthday,
            deathday: person.deathday,
            place_of_birth: person.place_of_birth,
            profile_path: person.profile_path,
            movies,
        }
    }
}
