//! `SearchPresenter` - coordinates paginated searches for a [`SearchView`].

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::image::{ImageLoader, backdrop_url};
use crate::query::QueryState;
use crate::repository::MediaRepository;
use crate::view::SearchView;
use crate::work::Work;

/// Delay before a backdrop image is fetched; a newer request within the
/// window replaces the pending one.
pub const BACKDROP_DEBOUNCE: Duration = Duration::from_millis(300);

/// State shared between the presenter and its tasks.
#[derive(Debug, Default)]
struct PresenterState {
    /// Current query and page cursors.
    query: QueryState,
    /// Bumped on every combined search; older searches may not report.
    search_generation: u64,
    /// Bumped on every backdrop request; older requests may not report.
    image_generation: u64,
    /// Set once by `dispose`.
    disposed: bool,
}

/// Everything a spawned task needs.
struct Shared<R, I, V> {
    repository: R,
    image_loader: I,
    view: V,
    image_base_url: String,
    state: Mutex<PresenterState>,
}

impl<R, I, V> Shared<R, I, V> {
    fn lock_state(&self) -> MutexGuard<'_, PresenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handles of in-flight work, aborted on restart or disposal.
#[derive(Debug, Default)]
struct Tasks {
    search: Option<JoinHandle<()>>,
    image: Option<JoinHandle<()>>,
    pages: Vec<JoinHandle<()>>,
}

/// Search coordinator.
///
/// Holds the current query and per-category page cursors, issues movie and
/// TV show searches through a [`MediaRepository`], and reports results to a
/// [`SearchView`]. Methods return immediately; the work runs on the tokio
/// runtime the presenter was created on.
///
/// - At most one combined search is in flight: a new one cancels the old.
/// - At most one backdrop fetch is pending or in flight.
/// - `load_movies` / `load_tv_shows` are independent of each other and of
///   the combined search.
/// - After [`dispose`](Self::dispose) (or drop) no callback fires.
pub struct SearchPresenter<R, I, V> {
    shared: Arc<Shared<R, I, V>>,
    tasks: Mutex<Tasks>,
    runtime: Handle,
}

impl<R, I, V> fmt::Debug for SearchPresenter<R, I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchPresenter")
            .field("state", &*self.shared.lock_state())
            .field("image_base_url", &self.shared.image_base_url)
            .finish_non_exhaustive()
    }
}

impl<R, I, V> SearchPresenter<R, I, V>
where
    R: MediaRepository + Sync + 'static,
    I: ImageLoader + Sync + 'static,
    V: SearchView + 'static,
{
    /// Creates a presenter bound to the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a tokio runtime.
    pub fn new(
        repository: R,
        image_loader: I,
        view: V,
        image_base_url: impl Into<String>,
    ) -> Result<Self> {
        let runtime = Handle::try_current().context("search presenter requires a tokio runtime")?;
        Ok(Self {
            shared: Arc::new(Shared {
                repository,
                image_loader,
                view,
                image_base_url: image_base_url.into(),
                state: Mutex::new(PresenterState::default()),
            }),
            tasks: Mutex::new(Tasks::default()),
            runtime,
        })
    }

    /// Searches movies and TV shows for `text`.
    ///
    /// Cancels any in-flight combined search. A query whose normalized form
    /// differs from the current one restarts both categories at page 1;
    /// repeating the same query fetches the next page of each.
    pub fn search_works_by_query(&self, text: &str) {
        let mut tasks = self.lock_tasks();
        if let Some(handle) = tasks.search.take() {
            handle.abort();
        }

        let (generation, query, movie_page, tv_show_page) = {
            let mut state = self.shared.lock_state();
            if state.disposed {
                tracing::debug!("Search ignored: presenter disposed");
                return;
            }
            state.search_generation = state.search_generation.wrapping_add(1);
            if state.query.update(text) {
                tracing::debug!(query = state.query.encoded(), "New query, page cursors reset");
            }
            (
                state.search_generation,
                String::from(state.query.text()),
                state.query.next_movie_page(),
                state.query.next_tv_show_page(),
            )
        };

        let shared = Arc::clone(&self.shared);
        tasks.search = Some(self.runtime.spawn(async move {
            shared
                .search_works(generation, query, movie_page, tv_show_page)
                .await;
        }));
    }

    /// Loads the next page of movies for the current query.
    pub fn load_movies(&self) {
        let mut tasks = self.lock_tasks();
        tasks.pages.retain(|handle| !handle.is_finished());

        let (query, page) = {
            let state = self.shared.lock_state();
            if state.disposed {
                tracing::debug!("Movie page load ignored: presenter disposed");
                return;
            }
            (String::from(state.query.text()), state.query.next_movie_page())
        };

        let shared = Arc::clone(&self.shared);
        tasks.pages.push(self.runtime.spawn(async move {
            shared.load_movies(query, page).await;
        }));
    }

    /// Loads the next page of TV shows for the current query.
    pub fn load_tv_shows(&self) {
        let mut tasks = self.lock_tasks();
        tasks.pages.retain(|handle| !handle.is_finished());

        let (query, page) = {
            let state = self.shared.lock_state();
            if state.disposed {
                tracing::debug!("TV show page load ignored: presenter disposed");
                return;
            }
            (
                String::from(state.query.text()),
                state.query.next_tv_show_page(),
            )
        };

        let shared = Arc::clone(&self.shared);
        tasks.pages.push(self.runtime.spawn(async move {
            shared.load_tv_shows(query, page).await;
        }));
    }

    /// Loads the backdrop image of `work` after [`BACKDROP_DEBOUNCE`],
    /// replacing any pending or in-flight backdrop request.
    pub fn load_backdrop_image(&self, work: &Work) {
        let mut tasks = self.lock_tasks();
        if let Some(handle) = tasks.image.take() {
            handle.abort();
        }

        let generation = {
            let mut state = self.shared.lock_state();
            if state.disposed {
                tracing::debug!("Backdrop load ignored: presenter disposed");
                return;
            }
            state.image_generation = state.image_generation.wrapping_add(1);
            state.image_generation
        };

        let url = work
            .backdrop_path()
            .map(|path| backdrop_url(&self.shared.image_base_url, path));
        let title = String::from(work.title());
        let shared = Arc::clone(&self.shared);
        tasks.image = Some(self.runtime.spawn(async move {
            tokio::time::sleep(BACKDROP_DEBOUNCE).await;
            shared.load_backdrop_image(generation, &title, url).await;
        }));
    }
}

impl<R, I, V> SearchPresenter<R, I, V> {
    /// Cancels all in-flight work. Idempotent; no view callback fires after
    /// the first call returns.
    pub fn dispose(&self) {
        let mut tasks = self.lock_tasks();
        {
            let mut state = self.shared.lock_state();
            if !state.disposed {
                tracing::debug!("Disposing search presenter");
                state.disposed = true;
            }
        }

        if let Some(handle) = tasks.search.take() {
            handle.abort();
        }
        if let Some(handle) = tasks.image.take() {
            handle.abort();
        }
        for handle in tasks.pages.drain(..) {
            handle.abort();
        }
    }

    /// Returns the current (un-normalized) query text.
    #[must_use]
    pub fn query(&self) -> String {
        String::from(self.shared.lock_state().query.text())
    }

    /// Returns the last successfully fetched movie page.
    #[must_use]
    pub fn movie_page(&self) -> u32 {
        self.shared.lock_state().query.movie_page()
    }

    /// Returns the last successfully fetched TV show page.
    #[must_use]
    pub fn tv_show_page(&self) -> u32 {
        self.shared.lock_state().query.tv_show_page()
    }

    fn lock_tasks(&self) -> MutexGuard<'_, Tasks> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R, I, V> Drop for SearchPresenter<R, I, V> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<R, I, V> Shared<R, I, V>
where
    R: MediaRepository + Sync,
    I: ImageLoader + Sync,
    V: SearchView,
{
    #[instrument(skip(self))]
    async fn search_works(
        &self,
        generation: u64,
        query: String,
        movie_page: u32,
        tv_show_page: u32,
    ) {
        let result = tokio::try_join!(
            self.repository.search_movies_by_query(&query, movie_page),
            self.repository.search_tv_shows_by_query(&query, tv_show_page),
        );

        let mut state = self.lock_state();
        if state.disposed || state.search_generation != generation {
            tracing::debug!("Search superseded, result dropped");
            return;
        }
        match result {
            Ok((movies, tv_shows)) => {
                let movies = state.query.accept_movie_page(movies);
                let tv_shows = state.query.accept_tv_show_page(tv_shows);
                tracing::debug!(
                    movie_page = state.query.movie_page(),
                    tv_show_page = state.query.tv_show_page(),
                    movies = movies.as_ref().map(Vec::len),
                    tv_shows = tv_shows.as_ref().map(Vec::len),
                    "Search completed"
                );
                self.view.on_result_loaded(movies, tv_shows);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Error while searching works by query");
                self.view.on_result_loaded(None, None);
            }
        }
    }

    #[instrument(skip(self))]
    async fn load_movies(&self, query: String, page: u32) {
        let result = self.repository.search_movies_by_query(&query, page).await;

        let mut state = self.lock_state();
        if state.disposed {
            return;
        }
        match result {
            Ok(movies) => {
                let movies = state.query.accept_movie_page(movies);
                if movies.is_none() {
                    tracing::debug!(page, "No more movies");
                }
                self.view.on_movies_loaded(movies);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Error while loading movies by query");
                self.view.on_movies_loaded(None);
            }
        }
    }

    #[instrument(skip(self))]
    async fn load_tv_shows(&self, query: String, page: u32) {
        let result = self.repository.search_tv_shows_by_query(&query, page).await;

        let mut state = self.lock_state();
        if state.disposed {
            return;
        }
        match result {
            Ok(tv_shows) => {
                let tv_shows = state.query.accept_tv_show_page(tv_shows);
                if tv_shows.is_none() {
                    tracing::debug!(page, "No more TV shows");
                }
                self.view.on_tv_shows_loaded(tv_shows);
            }
            Err(err) => {
                tracing::error!(error = ?err, "Error while loading TV shows by query");
                self.view.on_tv_shows_loaded(None);
            }
        }
    }

    #[instrument(skip(self, url))]
    async fn load_backdrop_image(&self, generation: u64, title: &str, url: Option<String>) {
        let result = match url {
            Some(url) => self.image_loader.load_image(&url).await,
            None => Err(anyhow!("work has no backdrop image")),
        };

        let state = self.lock_state();
        if state.disposed || state.image_generation != generation {
            return;
        }
        match result {
            Ok(image) => self.view.on_backdrop_image_loaded(Some(image)),
            Err(err) => {
                tracing::warn!(error = %err, "Error while loading backdrop image");
                self.view.on_backdrop_image_loaded(None);
            }
        }
    }
}
