//! `ConsoleView` - a `SearchView` that logs results and forwards them to
//! the command driving the search.

use bestv_search::{BackdropImage, SearchView, Work};
use tokio::sync::mpsc::UnboundedSender;

/// A view callback, forwarded to the `search` command.
#[derive(Debug)]
pub enum ViewEvent {
    /// Combined search completed.
    ResultLoaded {
        /// Movies, or `None` at end of results / on failure.
        movies: Option<Vec<Work>>,
        /// TV shows, or `None` at end of results / on failure.
        tv_shows: Option<Vec<Work>>,
    },
    /// Next movie page loaded.
    MoviesLoaded(Option<Vec<Work>>),
    /// Next TV show page loaded.
    TvShowsLoaded(Option<Vec<Work>>),
    /// Backdrop image loaded.
    BackdropLoaded(Option<BackdropImage>),
}

/// Logs every callback with `tracing` and forwards it over a channel.
#[derive(Debug)]
pub struct ConsoleView {
    events: UnboundedSender<ViewEvent>,
}

impl ConsoleView {
    /// Creates a view forwarding to `events`.
    pub const fn new(events: UnboundedSender<ViewEvent>) -> Self {
        Self { events }
    }

    fn forward(&self, event: ViewEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("View event dropped: receiver closed");
        }
    }
}

/// Logs one category of works, one line per work.
fn log_works(label: &str, works: Option<&[Work]>) {
    let Some(works) = works else {
        tracing::info!("No more {}", label);
        return;
    };
    tracing::info!("{} {}:", works.len(), label);
    for work in works {
        tracing::info!(
            "  {}\t{}\t{}\t{:.1}",
            work.id(),
            work.title(),
            work.date().unwrap_or("-"),
            work.rating(),
        );
    }
}

impl SearchView for ConsoleView {
    fn on_result_loaded(&self, movies: Option<Vec<Work>>, tv_shows: Option<Vec<Work>>) {
        log_works("movies", movies.as_deref());
        log_works("TV shows", tv_shows.as_deref());
        self.forward(ViewEvent::ResultLoaded { movies, tv_shows });
    }

    fn on_movies_loaded(&self, movies: Option<Vec<Work>>) {
        log_works("movies", movies.as_deref());
        self.forward(ViewEvent::MoviesLoaded(movies));
    }

    fn on_tv_shows_loaded(&self, tv_shows: Option<Vec<Work>>) {
        log_works("TV shows", tv_shows.as_deref());
        self.forward(ViewEvent::TvShowsLoaded(tv_shows));
    }

    fn on_backdrop_image_loaded(&self, image: Option<BackdropImage>) {
        match image {
            Some(ref image) => tracing::info!(
                "Backdrop: {} ({}, {} bytes)",
                image.url,
                image.content_type.as_deref().unwrap_or("-"),
                image.bytes.len(),
            ),
            None => tracing::warn!("Backdrop image unavailable"),
        }
        self.forward(ViewEvent::BackdropLoaded(image));
    }
}
