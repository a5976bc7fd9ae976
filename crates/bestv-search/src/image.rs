//! Backdrop image loading.
#![allow(clippy::future_not_send)]

use anyhow::{Context, Result, bail};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::instrument;

/// Default base URL for TMDB images (original size).
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// A fetched backdrop image, ready for the display surface to decode.
#[derive(Clone, PartialEq, Eq)]
pub struct BackdropImage {
    /// URL the image was fetched from.
    pub url: String,
    /// `Content-Type` reported by the server.
    pub content_type: Option<String>,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for BackdropImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackdropImage")
            .field("url", &self.url)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Joins the image base URL and a TMDB image path (which starts with `/`).
#[must_use]
pub fn backdrop_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Image loader trait.
///
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(ImageLoader: Send)]
pub trait LocalImageLoader {
    /// Fetches the image at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not an image.
    async fn load_image(&self, url: &str) -> Result<BackdropImage>;
}

/// `ImageLoader` over plain HTTP GET.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct HttpImageLoader {
    /// HTTP client.
    http_client: Client,
}

impl HttpImageLoader {
    /// Creates a loader sending the given User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the `reqwest::Client` build fails.
    pub fn new(user_agent: &str) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http_client })
    }
}

impl ImageLoader for HttpImageLoader {
    #[instrument(skip(self))]
    async fn load_image(&self, url: &str) -> Result<BackdropImage> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request failed: {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("image request failed (HTTP {status}): {url}");
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        if let Some(ref ct) = content_type
            && !ct.starts_with("image/")
        {
            bail!("unexpected content type {ct}: {url}");
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read image body: {url}"))?;
        if bytes.is_empty() {
            bail!("empty image body: {url}");
        }

        tracing::debug!(len = bytes.len(), "Backdrop image fetched");
        Ok(BackdropImage {
            url: String::from(url),
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::{HttpImageLoader, ImageLoader, backdrop_url};

    /// PNG signature, enough for a content check.
    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_backdrop_url_joins_path() {
        assert_eq!(
            backdrop_url("https://image.tmdb.org/t/p/w1280", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w1280/abc.jpg"
        );
        assert_eq!(
            backdrop_url("https://image.tmdb.org/t/p/w1280/", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w1280/abc.jpg"
        );
    }

    #[tokio::test]
    async fn test_load_image_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/t/p/original/abc.png"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"),
            )
            .mount(&mock_server)
            .await;
        let loader = HttpImageLoader::new("test/0.0.0").unwrap();
        let url = format!("{}/t/p/original/abc.png", mock_server.uri());

        // Act
        let image = loader.load_image(&url).await.unwrap();

        // Assert
        assert_eq!(image.url, url);
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, PNG_BYTES);
    }

    #[tokio::test]
    async fn test_load_image_not_found() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        let loader = HttpImageLoader::new("test/0.0.0").unwrap();

        // Act
        let result = loader
            .load_image(&format!("{}/missing.jpg", mock_server.uri()))
            .await;

        // Assert
        assert!(result.unwrap_err().to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn test_load_image_rejects_non_image() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"),
            )
            .mount(&mock_server)
            .await;
        let loader = HttpImageLoader::new("test/0.0.0").unwrap();

        // Act
        let result = loader
            .load_image(&format!("{}/page.jpg", mock_server.uri()))
            .await;

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("unexpected content type")
        );
    }
}
