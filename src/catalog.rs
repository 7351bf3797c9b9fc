//! TMDB catalog client and the wire types it returns.
//!
//! Search results and detail lookups produce two shapes of the same movie; both
//! deserialize into [`Movie`] with absent fields defaulted.

use anyhow::{Context, Result, anyhow};
use image::DynamicImage;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::config::CatalogConfig;

// --- Types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
  pub id: u64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
  #[serde(default)]
  pub iso_3166_1: String,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
  pub id: u64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub poster_path: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub release_date: Option<String>,
  #[serde(default)]
  pub vote_average: f64,
  /// Search shape only.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub genre_ids: Vec<u64>,
  /// Detail shape only.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub genres: Vec<Genre>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub production_countries: Vec<Country>,
  #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
  pub overview: Option<String>,
}

impl Movie {
  /// The leading four characters of the release date, if it has that many.
  pub fn year(&self) -> Option<&str> {
    self.release_date.as_deref().and_then(|d| d.get(..4))
  }

  pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
    self.poster_path.as_deref().filter(|p| !p.is_empty()).map(|p| format!("{}{}", image_base_url, p))
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
  pub key: String,
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default)]
  pub site: String,
}

/// TMDB sends `""` for unknown dates and overviews.
fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  let value: Option<String> = Option::deserialize(deserializer)?;
  Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
struct GenreListResponse {
  #[serde(default)]
  genres: Vec<Genre>,
}

#[derive(Deserialize)]
struct ResultsResponse<T> {
  #[serde(default = "Vec::new")]
  results: Vec<T>,
}

// --- Client ---

#[derive(Clone)]
pub struct CatalogClient {
  http: Client,
  config: CatalogConfig,
}

impl CatalogClient {
  pub fn new(config: CatalogConfig) -> Self {
    Self { http: Client::new(), config }
  }

  pub fn image_base_url(&self) -> &str {
    &self.config.image_base_url
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
    let url = self.endpoint(path);
    debug!(url = %url, "catalog request");
    let response = self
      .http
      .get(&url)
      .query(&[("api_key", self.config.api_key.as_str())])
      .query(params)
      .send()
      .await
      .with_context(|| format!("Request to {} failed", path))?;

    if !response.status().is_success() {
      return Err(anyhow!("TMDB API error on {}: {}", path, response.status()));
    }

    response.json::<T>().await.with_context(|| format!("Failed to decode response from {}", path))
  }

  /// `GET /genre/movie/list`
  pub async fn genres(&self) -> Result<Vec<Genre>> {
    let body: GenreListResponse = self.get_json("genre/movie/list", &[]).await?;
    Ok(body.genres)
  }

  /// `GET /search/movie?query=Q`
  pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
    let body: ResultsResponse<Movie> = self.get_json("search/movie", &[("query", query)]).await?;
    Ok(body.results)
  }

  /// `GET /movie/{id}`
  pub async fn movie_details(&self, movie_id: u64) -> Result<Movie> {
    self.get_json(&format!("movie/{}", movie_id), &[]).await
  }

  /// `GET /movie/{id}/videos`
  pub async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>> {
    let body: ResultsResponse<Video> = self.get_json(&format!("movie/{}/videos", movie_id), &[]).await?;
    Ok(body.results)
  }

  pub async fn fetch_poster(&self, poster_url: &str) -> Result<DynamicImage> {
    let response = self.http.get(poster_url).send().await.with_context(|| format!("Failed to fetch {}", poster_url))?;
    if !response.status().is_success() {
      return Err(anyhow!("Poster request failed: {}", response.status()));
    }
    let bytes = response.bytes().await.with_context(|| format!("Failed to read image bytes from {}", poster_url))?;
    image::load_from_memory(&bytes).with_context(|| format!("Failed to decode image from memory (URL: {})", poster_url))
  }
}
