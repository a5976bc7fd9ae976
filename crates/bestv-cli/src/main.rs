//! bestv - browse and search movies and TV shows on TMDB.

/// Application configuration (TOML).
mod config;
/// Logging search view.
mod view;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bestv_api::tmdb::TmdbClient;
use bestv_search::{HttpImageLoader, MovieCategory, SearchPresenter, TmdbMediaRepository, Work};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::view::{ConsoleView, ViewEvent};

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show a single movie.
    Movie(IdArgs),
    /// Show a single TV show.
    Tv(IdArgs),
    /// Show a cast member and the movies they acted in.
    Person(IdArgs),
    /// List a curated movie category.
    Movies(MoviesArgs),
    /// List movies of a genre.
    Genre(GenreArgs),
    /// Search movies and TV shows side by side.
    Search(SearchArgs),
}

/// Arguments for subcommands taking a TMDB ID.
#[derive(clap::Args)]
struct IdArgs {
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesArgs {
    /// Category: now-playing, popular, top-rated or upcoming.
    #[arg(long, required = true)]
    category: MovieCategory,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `genre` subcommand.
#[derive(clap::Args)]
struct GenreArgs {
    /// TMDB genre ID (e.g. 28 for Action).
    #[arg(long, required = true)]
    id: u32,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "the matrix").
    #[arg(long, required = true)]
    query: String,
    /// Additional movie pages to load after the first.
    #[arg(long, default_value_t = 0)]
    more_movies: u32,
    /// Additional TV show pages to load after the first.
    #[arg(long, default_value_t = 0)]
    more_tv_shows: u32,
    /// Fetch the backdrop image of the first result that has one.
    #[arg(long)]
    backdrop: bool,
}

/// Builds a `TmdbClient` from the `TMDB_API_KEY` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_KEY` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client() -> Result<TmdbClient> {
    let api_key =
        std::env::var("TMDB_API_KEY").context("TMDB_API_KEY environment variable is required")?;

    TmdbClient::builder()
        .api_key(api_key)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build TMDB client")
}

/// Loads the config and builds a repository configured from it.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
fn build_repository(
    dir: Option<&PathBuf>,
) -> Result<(AppConfig, TmdbMediaRepository<TmdbClient>)> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;
    let repository = TmdbMediaRepository::new(build_tmdb_client()?)
        .language(config.tmdb.language.as_str())
        .include_adult(config.tmdb.include_adult);
    Ok((config, repository))
}

/// Logs a page of works.
fn log_page(label: &str, page: u32, total_pages: u32, works: &[Work]) {
    tracing::info!("{} (page {}/{})", label, page, total_pages);
    tracing::info!("ID\tTitle\t\t\tDate\t\tRating");
    for work in works {
        tracing::info!(
            "{}\t{}\t{}\t{:.1}",
            work.id(),
            work.title(),
            work.date().unwrap_or("-"),
            work.rating(),
        );
    }
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the repository fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movie(args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, repository) = build_repository(dir)?;

    let movie = repository
        .movie(args.id)
        .await
        .context("TMDB movie request failed")?;

    tracing::info!("ID: {}", movie.id);
    tracing::info!("Title: {}", movie.title);
    tracing::info!("Original Title: {}", movie.original_title);
    tracing::info!(
        "Release Date: {}",
        movie.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Rating: {:.1}", movie.vote_average);
    tracing::info!("Overview: {}", movie.overview.as_deref().unwrap_or("-"));

    Ok(())
}

/// Runs the `tv` subcommand.
///
/// # Errors
///
/// Returns an error if the repository fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tv(args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, repository) = build_repository(dir)?;

    let show = repository
        .tv_show(args.id)
        .await
        .context("TMDB tv request failed")?;

    tracing::info!("ID: {}", show.id);
    tracing::info!("Name: {}", show.name);
    tracing::info!("Original Name: {}", show.original_name);
    tracing::info!(
        "First Air Date: {}",
        show.first_air_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Rating: {:.1}", show.vote_average);
    tracing::info!("Overview: {}", show.overview.as_deref().unwrap_or("-"));

    Ok(())
}

/// Runs the `person` subcommand.
///
/// # Errors
///
/// Returns an error if the repository fails to build or either API request fails.
#[instrument(skip_all)]
async fn run_person(args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, repository) = build_repository(dir)?;

    let person = repository
        .cast_details(args.id)
        .await
        .context("TMDB person request failed")?;

    tracing::info!("ID: {}", person.id);
    tracing::info!("Name: {}", person.name);
    tracing::info!("Born: {}", person.birthday.as_deref().unwrap_or("-"));
    tracing::info!(
        "Place of Birth: {}",
        person.place_of_birth.as_deref().unwrap_or("-")
    );
    if let Some(ref deathday) = person.deathday {
        tracing::info!("Died: {}", deathday);
    }
    tracing::info!("---");
    tracing::info!("Movies ({}):", person.movies.len());
    for movie in &person.movies {
        tracing::info!(
            "  {}\t{}\t{}",
            movie.id,
            movie.title,
            movie.release_date.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `movies` subcommand.
///
/// # Errors
///
/// Returns an error if the repository fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movies(args: &MoviesArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, repository) = build_repository(dir)?;

    let page = repository
        .movies_by_category(args.category, args.page)
        .await
        .with_context(|| format!("TMDB {} request failed", args.category))?;

    let works: Vec<Work> = page.works.into_iter().map(Work::from).collect();
    log_page(args.category.as_str(), page.page, page.total_pages, &works);

    Ok(())
}

/// Runs the `genre` subcommand.
///
/// # Errors
///
/// Returns an error if the repository fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_genre(args: &GenreArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (_, repository) = build_repository(dir)?;

    let page = repository
        .movies_by_genre(args.id, args.page)
        .await
        .context("TMDB discover/movie request failed")?;

    let works: Vec<Work> = page.works.into_iter().map(Work::from).collect();
    log_page(
        &format!("genre {}", args.id),
        page.page,
        page.total_pages,
        &works,
    );

    Ok(())
}

/// Waits for the next view event.
///
/// # Errors
///
/// Returns an error if the presenter dropped the view.
async fn next_event(events: &mut UnboundedReceiver<ViewEvent>) -> Result<ViewEvent> {
    events
        .recv()
        .await
        .context("search presenter stopped before reporting")
}

/// Returns the first work, movies before TV shows, that has a backdrop.
fn first_with_backdrop<'a>(movies: &'a [Work], tv_shows: &'a [Work]) -> Option<&'a Work> {
    movies
        .iter()
        .chain(tv_shows)
        .find(|work| work.backdrop_path().is_some())
}

/// Runs the `search` subcommand by driving a `SearchPresenter` with a
/// `ConsoleView`.
///
/// # Errors
///
/// Returns an error if the presenter cannot be built or the view channel
/// closes unexpectedly. Request failures are reported by the view instead.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (config, repository) = build_repository(dir)?;
    let image_loader = HttpImageLoader::new(USER_AGENT)?;
    let (tx, mut events) = mpsc::unbounded_channel();
    let presenter = SearchPresenter::new(
        repository,
        image_loader,
        ConsoleView::new(tx),
        config.tmdb.image_base_url,
    )?;

    presenter.search_works_by_query(&args.query);
    let ViewEvent::ResultLoaded { movies, tv_shows } = next_event(&mut events).await? else {
        bail!("unexpected view event while searching");
    };
    let movies = movies.unwrap_or_default();
    let tv_shows = tv_shows.unwrap_or_default();

    for _ in 0..args.more_movies {
        presenter.load_movies();
        if !matches!(
            next_event(&mut events).await?,
            ViewEvent::MoviesLoaded(Some(_))
        ) {
            break;
        }
    }

    for _ in 0..args.more_tv_shows {
        presenter.load_tv_shows();
        if !matches!(
            next_event(&mut events).await?,
            ViewEvent::TvShowsLoaded(Some(_))
        ) {
            break;
        }
    }

    if args.backdrop {
        match first_with_backdrop(&movies, &tv_shows) {
            Some(work) => {
                tracing::info!("Loading backdrop of {}", work.title());
                presenter.load_backdrop_image(work);
                next_event(&mut events).await?;
            }
            None => tracing::info!("No result has a backdrop image"),
        }
    }

    presenter.dispose();
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Movie(args) => run_movie(&args, dir).await,
        Commands::Tv(args) => run_tv(&args, dir).await,
        Commands::Person(args) => run_person(&args, dir).await,
        Commands::Movies(args) => run_movies(&args, dir).await,
        Commands::Genre(args) => run_genre(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
    }
}

#[cfg(test)]
mod tests {
    use bestv_search::{Movie, TvShow};

    use super::*;

    fn movie(id: u64, backdrop_path: Option<&str>) -> Work {
        Work::from(Movie {
            id,
            title: format!("Movie {id}"),
            original_title: String::new(),
            original_language: String::from("en"),
            overview: None,
            release_date: None,
            vote_average: 0.0,
            poster_path: None,
            backdrop_path: backdrop_path.map(String::from),
        })
    }

    fn tv_show(id: u64, backdrop_path: Option<&str>) -> Work {
        Work::from(TvShow {
            id,
            name: format!("Show {id}"),
            original_name: String::new(),
            original_language: String::from("en"),
            overview: None,
            first_air_date: None,
            vote_average: 0.0,
            poster_path: None,
            backdrop_path: backdrop_path.map(String::from),
        })
    }

    #[test]
    fn test_first_with_backdrop_prefers_movies() {
        // Arrange
        let movies = vec![movie(1, None), movie(2, Some("/two.jpg"))];
        let tv_shows = vec![tv_show(3, Some("/three.jpg"))];

        // Act
        let work = first_with_backdrop(&movies, &tv_shows);

        // Assert
        assert_eq!(work.map(Work::id), Some(2));
    }

    #[test]
    fn test_first_with_backdrop_falls_back_to_tv_shows() {
        // Arrange
        let movies = vec![movie(1, None)];
        let tv_shows = vec![tv_show(3, Some("/three.jpg"))];

        // Act
        let work = first_with_backdrop(&movies, &tv_shows);

        // Assert
        assert_eq!(work.map(Work::title), Some("Show 3"));
    }

    #[test]
    fn test_first_with_backdrop_none() {
        // Arrange & Act & Assert
        assert!(first_with_backdrop(&[], &[tv_show(3, None)]).is_none());
    }

    #[test]
    fn test_cli_parses_search_flags() {
        // Arrange & Act
        let cli = Cli::try_parse_from([
            "bestv",
            "search",
            "--query",
            "the matrix",
            "--more-movies",
            "2",
            "--backdrop",
        ])
        .ok();

        // Assert
        assert!(matches!(
            cli,
            Some(Cli {
                command: Commands::Search(ref args),
                ..
            }) if args.query == "the matrix"
                && args.more_movies == 2
                && args.more_tv_shows == 0
                && args.backdrop
        ));
    }

    #[test]
    fn test_cli_parses_movie_category() {
        // Arrange & Act
        let cli = Cli::try_parse_from(["bestv", "movies", "--category", "top-rated"]).ok();

        // Assert
        assert!(matches!(
            cli,
            Some(Cli {
                command: Commands::Movies(MoviesArgs {
                    category: MovieCategory::TopRated,
                    page: 1,
                }),
                ..
            })
        ));
    }
}
