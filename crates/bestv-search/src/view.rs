//! `SearchView` - the passive display surface.

use std::sync::Arc;

use crate::image::BackdropImage;
use crate::work::Work;

/// Receives search results from a [`SearchPresenter`](crate::SearchPresenter).
///
/// `None` means "nothing to show": either the end of the results or a failed
/// request. Callbacks run on a runtime worker while the presenter's state is
/// locked, so they must not call back into the presenter synchronously.
#[allow(clippy::module_name_repetitions)]
pub trait SearchView: Send + Sync {
    /// A combined search completed. Each side is `None` when that category
    /// has no more results; both are `None` when the search failed.
    fn on_result_loaded(&self, movies: Option<Vec<Work>>, tv_shows: Option<Vec<Work>>);

    /// The next movie page loaded, or `None` for end of results / failure.
    fn on_movies_loaded(&self, movies: Option<Vec<Work>>);

    /// The next TV show page loaded, or `None` for end of results / failure.
    fn on_tv_shows_loaded(&self, tv_shows: Option<Vec<Work>>);

    /// The debounced backdrop image loaded, or `None` on failure.
    fn on_backdrop_image_loaded(&self, image: Option<BackdropImage>);
}

impl<T: SearchView + ?Sized> SearchView for Arc<T> {
    fn on_result_loaded(&self, movies: Option<Vec<Work>>, tv_shows: Option<Vec<Work>>) {
        (**self).on_result_loaded(movies, tv_shows);
    }

    fn on_movies_loaded(&self, movies: Option<Vec<Work>>) {
        (**self).on_movies_loaded(movies);
    }

    fn on_tv_shows_loaded(&self, tv_shows: Option<Vec<Work>>) {
        (**self).on_tv_shows_loaded(tv_shows);
    }

    fn on_backdrop_image_loaded(&self, image: Option<BackdropImage>) {
        (**self).on_backdrop_image_loaded(image);
    }
}
