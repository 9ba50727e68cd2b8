use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::nearby::NearbyPlace;

const WIKIPEDIA_TIMEOUT: Duration = Duration::from_secs(10);
const THUMBNAIL_SIZE: &str = "400";

pub const DEFAULT_RADIUS_METERS: u32 = 20000;
pub const DEFAULT_RESULT_LIMIT: u32 = 8;

#[derive(Debug, Deserialize)]
struct GeosearchResponse {
    query: Option<GeosearchQuery>,
}

#[derive(Debug, Deserialize)]
struct GeosearchQuery {
    #[serde(default)]
    geosearch: Vec<GeosearchHit>,
}

#[derive(Debug, Deserialize)]
struct GeosearchHit {
    pageid: u64,
    title: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct PageImagesResponse {
    query: Option<PageImagesQuery>,
}

#[derive(Debug, Deserialize)]
struct PageImagesQuery {
    #[serde(default)]
    pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

/// Geo-tagged article search against the Wikipedia API. Independent of the
/// suggestion flow.
#[derive(Clone)]
pub struct WikipediaService {
    client: Client,
    base_url: String,
}

impl WikipediaService {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::builder().timeout(WIKIPEDIA_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.wikipedia_base_url.clone(),
        })
    }

    /// List geo-tagged articles around a coordinate pair, each with a
    /// thumbnail where one exists. Best effort: a failed geosearch yields an
    /// empty list, a failed thumbnail lookup leaves that entry's image empty.
    pub async fn nearby(&self, lat: f64, lng: f64, radius: u32, limit: u32) -> Vec<NearbyPlace> {
        let hits = match self.geosearch(lat, lng, radius, limit).await {
            Ok(hits) => hits,
            Err(err) => {
                eprintln!("Wikipedia geosearch failed: {}", err);
                return Vec::new();
            }
        };

        let mut places = Vec::with_capacity(hits.len());
        for hit in hits {
            let image = self.thumbnail(hit.pageid).await.unwrap_or_else(|err| {
                eprintln!("Thumbnail lookup failed for page {}: {}", hit.pageid, err);
                String::new()
            });

            places.push(NearbyPlace {
                name: hit.title,
                address: String::new(),
                latitude: hit.lat,
                longitude: hit.lon,
                image,
                wiki: format!("https://en.wikipedia.org/?curid={}", hit.pageid),
            });
        }

        places
    }

    async fn geosearch(
        &self,
        lat: f64,
        lng: f64,
        radius: u32,
        limit: u32,
    ) -> Result<Vec<GeosearchHit>, reqwest::Error> {
        let url = format!("{}/w/api.php", self.base_url);
        let coord = format!("{}|{}", lat, lng);
        let radius = radius.to_string();
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("list", "geosearch"),
                ("gsradius", radius.as_str()),
                ("gscoord", coord.as_str()),
                ("gslimit", limit.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: GeosearchResponse = response.json().await?;
        Ok(parsed.query.map(|query| query.geosearch).unwrap_or_default())
    }

    async fn thumbnail(&self, pageid: u64) -> Result<String, reqwest::Error> {
        let url = format!("{}/w/api.php", self.base_url);
        let pageids = pageid.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("pageids", pageids.as_str()),
                ("prop", "pageimages"),
                ("pithumbsize", THUMBNAIL_SIZE),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let parsed: PageImagesResponse = response.json().await?;
        let source = parsed
            .query
            .and_then(|query| query.pages.get(&pageids).and_then(|page| page.thumbnail.as_ref().map(|t| t.source.clone())))
            .unwrap_or_default();

        Ok(source)
    }
}
