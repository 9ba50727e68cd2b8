use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::place::{ImageSearchFn, PlaceImage};

const IMAGE_SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Placeholder when a provider was asked but everything failed.
pub const IMAGE_UNAVAILABLE_URL: &str = "https://placehold.co/300x200?text=Image+Unavailable";
/// Placeholder when the model produced no usable tool call at all.
pub const IMAGE_NOT_FOUND_URL: &str = "https://placehold.co/300x200?text=Image+Not+Found";

#[derive(Debug)]
pub enum ImageSearchError {
    MissingKey(&'static str),
    NoResults(String),
    Request(String),
}

impl fmt::Display for ImageSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSearchError::MissingKey(name) => write!(f, "{} is not configured", name),
            ImageSearchError::NoResults(query) => write!(f, "no image found for '{}'", query),
            ImageSearchError::Request(msg) => write!(f, "image search request failed: {}", msg),
        }
    }
}

impl std::error::Error for ImageSearchError {}

impl From<reqwest::Error> for ImageSearchError {
    fn from(err: reqwest::Error) -> Self {
        ImageSearchError::Request(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
struct PixabayHit {
    #[serde(rename = "webformatURL")]
    webformat_url: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashResponse {
    #[serde(default)]
    results: Vec<UnsplashResult>,
}

#[derive(Debug, Deserialize)]
struct UnsplashResult {
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

/// Stock-image lookup over Pixabay (primary) and Unsplash (secondary).
#[derive(Clone)]
pub struct ImageSearchService {
    client: Client,
    pixabay_api_key: Option<String>,
    pixabay_base_url: String,
    unsplash_access_key: Option<String>,
    unsplash_base_url: String,
}

impl ImageSearchService {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::builder().timeout(IMAGE_SEARCH_TIMEOUT).build()?;

        Ok(Self {
            client,
            pixabay_api_key: config.pixabay_api_key.clone(),
            pixabay_base_url: config.pixabay_base_url.clone(),
            unsplash_access_key: config.unsplash_access_key.clone(),
            unsplash_base_url: config.unsplash_base_url.clone(),
        })
    }

    /// Turn a decoded image field into a final URL string.
    ///
    /// Pixabay tool calls fall back to Unsplash once; Unsplash tool calls
    /// get no fallback. An unknown function or a missing query skips the
    /// providers entirely. The result is always a URL, never an error.
    pub async fn resolve(&self, image: Option<PlaceImage>, title: &str) -> String {
        let call = match image {
            Some(PlaceImage::Url(url)) => return url,
            Some(PlaceImage::ToolCall { call }) => call,
            Some(PlaceImage::Other(_)) | None => {
                println!(
                    "No valid image tool call found for '{}'. Using default placeholder.",
                    title
                );
                return IMAGE_NOT_FOUND_URL.to_string();
            }
        };

        let query = match call.args.query {
            Some(query) if !query.is_empty() => query,
            _ => {
                println!(
                    "Image tool call for '{}' is missing a query. Using default placeholder.",
                    title
                );
                return IMAGE_NOT_FOUND_URL.to_string();
            }
        };

        match call.function {
            ImageSearchFn::SearchPixabayImage => match self.search_pixabay(&query).await {
                Ok(url) => url,
                Err(err) => {
                    eprintln!(
                        "Pixabay failed for '{}' ({}). Attempting Unsplash fallback...",
                        query, err
                    );
                    match self.search_unsplash(&query).await {
                        Ok(url) => url,
                        Err(err) => {
                            eprintln!(
                                "All image searches failed for '{}' ({}). Using generic placeholder.",
                                query, err
                            );
                            IMAGE_UNAVAILABLE_URL.to_string()
                        }
                    }
                }
            },
            ImageSearchFn::SearchUnsplashImage => match self.search_unsplash(&query).await {
                Ok(url) => url,
                Err(err) => {
                    eprintln!(
                        "Unsplash failed for '{}' ({}). Using generic placeholder.",
                        query, err
                    );
                    IMAGE_UNAVAILABLE_URL.to_string()
                }
            },
            ImageSearchFn::Unknown => {
                println!(
                    "Unknown image tool call for '{}'. Using default placeholder.",
                    title
                );
                IMAGE_NOT_FOUND_URL.to_string()
            }
        }
    }

    /// Search Pixabay and return the first hit's web-format URL.
    pub async fn search_pixabay(&self, query: &str) -> Result<String, ImageSearchError> {
        let api_key = self
            .pixabay_api_key
            .as_deref()
            .ok_or(ImageSearchError::MissingKey("PIXABAY_API_KEY"))?;

        let url = format!("{}/api/", self.pixabay_base_url);
        // Pixabay expects '+' for spaces in the query term.
        let q = query.replace(' ', "+");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", api_key),
                ("q", q.as_str()),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("per_page", "3"),
                ("safesearch", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageSearchError::Request(format!(
                "Pixabay returned status {}",
                status
            )));
        }

        let parsed: PixabayResponse = response.json().await?;
        match parsed.hits.into_iter().next() {
            Some(hit) => {
                println!("Found Pixabay image for '{}': {}", query, hit.webformat_url);
                Ok(hit.webformat_url)
            }
            None => Err(ImageSearchError::NoResults(query.to_string())),
        }
    }

    /// Search Unsplash and return the first result's regular-size URL.
    pub async fn search_unsplash(&self, query: &str) -> Result<String, ImageSearchError> {
        let access_key = self
            .unsplash_access_key
            .as_deref()
            .ok_or(ImageSearchError::MissingKey("UNSPLASH_ACCESS_KEY"))?;

        let url = format!("{}/search/photos", self.unsplash_base_url);
        // The suffix steers generic queries toward relevant results.
        let q = format!("{} tourist attraction", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", q.as_str()),
                ("orientation", "landscape"),
                ("per_page", "1"),
                ("client_id", access_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageSearchError::Request(format!(
                "Unsplash returned status {}",
                status
            )));
        }

        let parsed: UnsplashResponse = response.json().await?;
        match parsed.results.into_iter().next() {
            Some(result) => {
                println!("Found Unsplash image for '{}': {}", query, result.urls.regular);
                Ok(result.urls.regular)
            }
            None => Err(ImageSearchError::NoResults(query.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::{ToolCallArgs, ToolCallSpec};

    fn keyless_service() -> ImageSearchService {
        ImageSearchService {
            client: Client::builder()
                .timeout(IMAGE_SEARCH_TIMEOUT)
                .build()
                .unwrap(),
            pixabay_api_key: None,
            pixabay_base_url: "http://127.0.0.1:1".to_string(),
            unsplash_access_key: None,
            unsplash_base_url: "http://127.0.0.1:1".to_string(),
        }
    }

    #[actix_web::test]
    async fn resolved_url_passes_through() {
        let service = keyless_service();
        let image = Some(PlaceImage::Url("https://example.com/a.jpg".to_string()));

        let url = service.resolve(image, "Gateway of India").await;
        assert_eq!(url, "https://example.com/a.jpg");
    }

    #[actix_web::test]
    async fn missing_image_field_gets_not_found_placeholder() {
        let service = keyless_service();

        let url = service.resolve(None, "Gateway of India").await;
        assert_eq!(url, IMAGE_NOT_FOUND_URL);
    }

    #[actix_web::test]
    async fn unknown_function_skips_providers() {
        let service = keyless_service();
        let image = Some(PlaceImage::ToolCall {
            call: ToolCallSpec {
                function: ImageSearchFn::Unknown,
                args: ToolCallArgs {
                    query: Some("Elephanta Caves".to_string()),
                },
            },
        });

        let url = service.resolve(image, "Elephanta Caves").await;
        assert_eq!(url, IMAGE_NOT_FOUND_URL);
    }

    #[actix_web::test]
    async fn missing_query_skips_providers() {
        let service = keyless_service();
        let image = Some(PlaceImage::ToolCall {
            call: ToolCallSpec {
                function: ImageSearchFn::SearchPixabayImage,
                args: ToolCallArgs { query: None },
            },
        });

        let url = service.resolve(image, "Elephanta Caves").await;
        assert_eq!(url, IMAGE_NOT_FOUND_URL);
    }

    #[actix_web::test]
    async fn pixabay_call_with_both_providers_failing_degrades_to_placeholder() {
        // No keys configured, so both lookups fail before any request is
        // made and the fallback chain lands on the generic placeholder.
        let service = keyless_service();
        let image = Some(PlaceImage::ToolCall {
            call: ToolCallSpec {
                function: ImageSearchFn::SearchPixabayImage,
                args: ToolCallArgs {
                    query: Some("Elephanta Caves".to_string()),
                },
            },
        });

        let url = service.resolve(image, "Elephanta Caves").await;
        assert_eq!(url, IMAGE_UNAVAILABLE_URL);
    }

    #[actix_web::test]
    async fn missing_pixabay_key_is_reported_as_cause() {
        let service = keyless_service();

        let err = service.search_pixabay("Elephanta Caves").await.unwrap_err();
        assert!(matches!(err, ImageSearchError::MissingKey("PIXABAY_API_KEY")));
    }

    #[actix_web::test]
    async fn unreachable_unsplash_is_a_request_error() {
        let mut service = keyless_service();
        service.unsplash_access_key = Some("test-key".to_string());

        let err = service.search_unsplash("Elephanta Caves").await.unwrap_err();
        assert!(matches!(err, ImageSearchError::Request(_)));
    }
}
