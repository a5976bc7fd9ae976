//! Media repository and search coordination for bestv.
//!
//! Wraps the TMDB client behind a uniform "search by query, page N"
//! contract and drives a passive [`SearchView`] from a [`SearchPresenter`]
//! that tracks per-category page cursors.

/// Backdrop image loading.
pub mod image;
/// Search presenter (coordinator).
pub mod presenter;
/// Query normalization and page cursors.
pub mod query;
/// Media repository over the TMDB API.
pub mod repository;
/// Display surface callbacks.
pub mod view;
/// Domain model: works and pages.
pub mod work;

pub use image::{BackdropImage, HttpImageLoader, ImageLoader, LocalImageLoader};
pub use presenter::{BACKDROP_DEBOUNCE, SearchPresenter};
pub use query::{QueryState, encode_query};
pub use repository::{LocalMediaRepository, MediaRepository, MovieCategory, TmdbMediaRepository};
pub use view::SearchView;
pub use work::{CastMember, Movie, Page, TvShow, Work};
