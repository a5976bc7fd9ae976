//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::types::{
    DiscoverMovieParams, MovieCreditsResponse, MovieResponse, PageParams, PageResponse,
    PersonResponse, SearchMovieParams, SearchTvParams, TmdbErrorResponse, TvShowResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// A direct typed mapping onto the HTTP endpoints: every request carries the
/// `api_key` query parameter, and failures are returned as-is without retry.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key (v3 auth).
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with the API key and query params, and decodes
    /// the JSON body.
    #[instrument(skip_all, fields(path = %path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(path, ?query, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        raw_result.with_context(|| format!("failed to decode JSON response: {path}"))
    }

    /// Fetches one of the language + page movie lists.
    async fn movie_list(
        &self,
        path: &str,
        params: &PageParams,
    ) -> Result<PageResponse<MovieResponse>> {
        let query = [
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json(path, &query).await
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn movie(&self, movie_id: u64, language: &str) -> Result<MovieResponse> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn movies_by_genre(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<PageResponse<MovieResponse>> {
        let query = [
            ("with_genres", params.genre_id.to_string()),
            ("language", params.language.clone()),
            ("include_adult", params.include_adult.to_string()),
            ("page", params.page.to_string()),
        ];
        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn now_playing_movies(
        &self,
        params: &PageParams,
    ) -> Result<PageResponse<MovieResponse>> {
        self.movie_list("movie/now_playing", params).await
    }

    #[instrument(skip_all)]
    async fn popular_movies(&self, params: &PageParams) -> Result<PageResponse<MovieResponse>> {
        self.movie_list("movie/popular", params).await
    }

    #[instrument(skip_all)]
    async fn top_rated_movies(&self, params: &PageParams) -> Result<PageResponse<MovieResponse>> {
        self.movie_list("movie/top_rated", params).await
    }

    #[instrument(skip_all)]
    async fn upcoming_movies(&self, params: &PageParams) -> Result<PageResponse<MovieResponse>> {
        self.movie_list("movie/upcoming", params).await
    }

    #[instrument(skip_all)]
    async fn search_movie(
        &self,
        params: &SearchMovieParams,
    ) -> Result<PageResponse<MovieResponse>> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn search_tv(&self, params: &SearchTvParams) -> Result<PageResponse<TvShowResponse>> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.first_air_date_year {
            query.push(("first_air_date_year", year.to_string()));
        }

        self.get_json("search/tv", &query).await
    }

    #[instrument(skip_all)]
    async fn tv_show(&self, series_id: u64, language: &str) -> Result<TvShowResponse> {
        let path = format!("tv/{series_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn person(&self, person_id: u64, language: &str) -> Result<PersonResponse> {
        let path = format!("person/{person_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn person_movie_credits(
        &self,
        person_id: u64,
        language: &str,
    ) -> Result<MovieCreditsResponse> {
        let path = format!("person/{person_id}/movie_credits");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    /// Builds a client pointed at the mock server.
    fn mock_client(mock_server: &wiremock::MockServer, api_key: &str) -> TmdbClient {
        let base_url = format!("{}/3/", mock_server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key(api_key)
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_key() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_key is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_key("test-key").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_with_custom_base_url() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/3/").unwrap();

        // Act
        let client = TmdbClient::builder()
            .base_url(custom_url.clone())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url, custom_url);
    }

    #[test]
    fn test_parse_search_movie_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_movie_matrix.json");

        // Act
        let response: PageResponse<MovieResponse> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.page, 1);
        assert_eq!(response.total_pages, 2);
        let first = &response.results[0];
        assert_eq!(first.id, 603);
        assert_eq!(first.title, "The Matrix");
        assert_eq!(
            first.backdrop_path.as_deref(),
            Some("/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg")
        );
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_603.json");

        // Act
        let movie: MovieResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 603);
        assert_eq!(movie.runtime, Some(136));
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.genres[0].name, "Action");
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(!error.success);
        assert!(error.status_message.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_api_key_is_sent_as_query_param() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("api_key", "my-secret-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "my-secret-key");

        // Act & Assert (mock expect(1) verifies the api_key param)
        client
            .search_movie(&SearchMovieParams::new("nothing"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_movie_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_603.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/603"))
            .and(wiremock::matchers::query_param("language", "pt-BR"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-key");

        // Act
        let movie = client.movie(603, "pt-BR").await.unwrap();

        // Assert
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
    }

    #[tokio::test]
    async fn test_movies_by_genre_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_list_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/discover/movie"))
            .and(wiremock::matchers::query_param("with_genres", "28"))
            .and(wiremock::matchers::query_param("include_adult", "false"))
            .and(wiremock::matchers::query_param("page", "2"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-key");
        let params = DiscoverMovieParams::new(28).page(2);

        // Act
        let page = client.movies_by_genre(&params).await.unwrap();

        // Assert
        assert!(!page.results.is_empty());
    }

    #[tokio::test]
    async fn test_movie_lists_hit_their_paths() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_list_popular.json");

        for path in [
            "/3/movie/now_playing",
            "/3/movie/popular",
            "/3/movie/top_rated",
            "/3/movie/upcoming",
        ] {
            wiremock::Mock::given(wiremock::matchers::method("GET"))
                .and(wiremock::matchers::path(path))
                .and(wiremock::matchers::query_param("page", "1"))
                .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = mock_client(&mock_server, "test-key");
        let params = PageParams::new(1);

        // Act
        let now_playing = client.now_playing_movies(&params).await.unwrap();
        let popular = client.popular_movies(&params).await.unwrap();
        let top_rated = client.top_rated_movies(&params).await.unwrap();
        let upcoming = client.upcoming_movies(&params).await.unwrap();

        // Assert
        assert_eq!(now_playing.page, 1);
        assert_eq!(popular.page, 1);
        assert_eq!(top_rated.page, 1);
        assert_eq!(upcoming.page, 1);
    }

    #[tokio::test]
    async fn test_search_tv_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_tv_office.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/tv"))
            .and(wiremock::matchers::query_param("query", "the office"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-key");
        let params = SearchTvParams::new("the office");

        // Act
        let page = client.search_tv(&params).await.unwrap();

        // Assert
        assert_eq!(page.results[0].id, 2316);
        assert_eq!(page.results[0].name, "The Office");
    }

    #[tokio::test]
    async fn test_person_and_credits_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/person/6384"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string(include_str!("../../../../fixtures/tmdb/person_6384.json")),
            )
            .mount(&mock_server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/person/6384/movie_credits"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(include_str!(
                "../../../../fixtures/tmdb/person_6384_movie_credits.json"
            )))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-key");

        // Act
        let person = client.person(6384, "en-US").await.unwrap();
        let credits = client.person_movie_credits(6384, "en-US").await.unwrap();

        // Assert
        assert_eq!(person.name, "Keanu Reeves");
        assert_eq!(credits.id, 6384);
        assert_eq!(credits.cast[0].movie.id, 603);
        assert_eq!(credits.cast[0].character.as_deref(), Some("Neo"));
    }

    #[tokio::test]
    async fn test_http_error_returns_tmdb_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "invalid-key");

        // Act
        let result = client.popular_movies(&PageParams::default()).await;

        // Assert
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("TMDB API error"));
        assert!(err.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_http_429_is_not_retried() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":25,"status_message":"Your request count is over the allowed limit.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-key");

        // Act
        let result = client.search_tv(&SearchTvParams::new("test")).await;

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_reported() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server, "test-key");

        // Act
        let result = client.tv_show(2316, "en-US").await;

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to decode JSON response: tv/2316")
        );
    }
}
