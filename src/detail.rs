use anyhow::{Context, Result};
use image::DynamicImage;
use tracing::{info, warn};

use crate::catalog::{CatalogClient, Movie, Video};
use crate::constants::constants;

/// Pick the video to offer as a trailer: a YouTube "Trailer", else a YouTube
/// "Teaser", else any YouTube video.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
  let youtube = || videos.iter().filter(|v| v.site == "YouTube");
  youtube()
    .find(|v| v.kind == "Trailer")
    .or_else(|| youtube().find(|v| v.kind == "Teaser"))
    .or_else(|| youtube().next())
}

pub fn trailer_url(key: &str) -> String {
  format!("{}{}", constants().youtube_watch_url, key)
}

/// Everything the detail screen shows once both lookups are back.
#[derive(Debug, Clone)]
pub struct DetailInfo {
  pub movie: Movie,
  pub trailer_key: Option<String>,
}

pub type DetailResult = (u64, Result<DetailInfo>);

/// Fetch the movie and its videos concurrently. A failed videos call only
/// means there is no trailer; a failed detail call fails the load.
pub async fn load_detail(client: &CatalogClient, movie_id: u64) -> Result<DetailInfo> {
  let (movie, videos) = futures::join!(client.movie_details(movie_id), client.movie_videos(movie_id));
  let videos = videos.unwrap_or_else(|e| {
    warn!(movie_id, err = %format!("{:#}", e), "detail: video listing failed");
    Vec::new()
  });
  let movie = movie.with_context(|| format!("Failed to load movie {}", movie_id))?;
  let trailer_key = select_trailer(&videos).map(|v| v.key.clone());
  info!(movie_id, has_trailer = trailer_key.is_some(), "detail: loaded");
  Ok(DetailInfo { movie, trailer_key })
}

#[derive(Debug, Default)]
pub enum DetailStatus {
  #[default]
  Loading,
  Ready(Box<DetailInfo>),
}

/// State of the detail screen for one movie.
#[derive(Debug, Default)]
pub struct DetailState {
  pub movie_id: u64,
  pub status: DetailStatus,
  pub poster: Option<DynamicImage>,
}

impl DetailState {
  pub fn loading(movie_id: u64) -> Self {
    Self { movie_id, status: DetailStatus::Loading, poster: None }
  }

  pub fn info(&self) -> Option<&DetailInfo> {
    match &self.status {
      DetailStatus::Ready(info) => Some(info),
      DetailStatus::Loading => None,
    }
  }

  pub fn is_loading(&self) -> bool {
    matches!(self.status, DetailStatus::Loading)
  }

  /// Install a finished load. Results for another movie are ignored, and a
  /// failed load keeps the screen in Loading.
  pub fn finish(&mut self, movie_id: u64, result: Result<DetailInfo>) -> Result<bool> {
    if movie_id != self.movie_id {
      return Ok(false);
    }
    let info = result?;
    self.status = DetailStatus::Ready(Box::new(info));
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::CatalogConfig;
  use anyhow::anyhow;
  use mockito::{Matcher, Server, ServerGuard};

  fn video(key: &str, kind: &str, site: &str) -> Video {
    Video { key: key.into(), kind: kind.into(), site: site.into() }
  }

  fn info(id: u64) -> DetailInfo {
    let movie = serde_json::from_value(serde_json::json!({ "id": id, "title": "T" })).unwrap();
    DetailInfo { movie, trailer_key: None }
  }

  #[test]
  fn trailer_beats_teaser() {
    let videos = [video("t1", "Teaser", "YouTube"), video("tr", "Trailer", "YouTube")];
    assert_eq!(select_trailer(&videos).unwrap().key, "tr");
  }

  #[test]
  fn teaser_beats_other_youtube() {
    let videos = [video("c", "Clip", "YouTube"), video("t", "Teaser", "YouTube")];
    assert_eq!(select_trailer(&videos).unwrap().key, "t");
  }

  #[test]
  fn any_youtube_as_last_resort() {
    let videos = [video("v", "Trailer", "Vimeo"), video("c", "Featurette", "YouTube")];
    assert_eq!(select_trailer(&videos).unwrap().key, "c");
  }

  #[test]
  fn no_youtube_means_no_trailer() {
    assert!(select_trailer(&[video("v", "Trailer", "Vimeo")]).is_none());
    assert!(select_trailer(&[]).is_none());
  }

  #[test]
  fn first_matching_trailer_wins() {
    let videos = [video("a", "Trailer", "YouTube"), video("b", "Trailer", "YouTube")];
    assert_eq!(select_trailer(&videos).unwrap().key, "a");
  }

  #[test]
  fn trailer_url_uses_watch_prefix() {
    assert!(trailer_url("abc").ends_with("abc"));
    assert!(trailer_url("abc").starts_with("https://"));
  }

  #[test]
  fn failed_load_stays_loading() {
    let mut state = DetailState::loading(5);
    assert!(state.finish(5, Err(anyhow!("boom"))).is_err());
    assert!(state.is_loading());
  }

  #[test]
  fn load_for_other_movie_is_ignored() {
    let mut state = DetailState::loading(5);
    assert!(!state.finish(6, Ok(info(6))).unwrap());
    assert!(state.is_loading());
    assert!(state.finish(5, Ok(info(5))).unwrap());
    assert_eq!(state.info().unwrap().movie.id, 5);
  }

  // --- load_detail ---

  fn client(server: &ServerGuard) -> CatalogClient {
    CatalogClient::new(CatalogConfig {
      api_key: "k".into(),
      base_url: server.url(),
      image_base_url: format!("{}/img", server.url()),
    })
  }

  async fn mock_json(server: &mut ServerGuard, path: &str, status: usize, body: &str) -> mockito::Mock {
    server
      .mock("GET", path)
      .match_query(Matcher::UrlEncoded("api_key".into(), "k".into()))
      .with_status(status)
      .with_header("content-type", "application/json")
      .with_body(body)
      .create_async()
      .await
  }

  #[tokio::test]
  async fn load_picks_trailer_from_videos() {
    let mut server = Server::new_async().await;
    let _movie = mock_json(&mut server, "/movie/603", 200, r#"{"id":603,"title":"The Matrix"}"#).await;
    let _videos = mock_json(
      &mut server,
      "/movie/603/videos",
      200,
      r#"{"results":[{"key":"tz","type":"Teaser","site":"YouTube"},{"key":"tr","type":"Trailer","site":"YouTube"}]}"#,
    )
    .await;

    let info = load_detail(&client(&server), 603).await.unwrap();
    assert_eq!(info.movie.title, "The Matrix");
    assert_eq!(info.trailer_key.as_deref(), Some("tr"));
  }

  #[tokio::test]
  async fn failed_videos_means_no_trailer() {
    let mut server = Server::new_async().await;
    let _movie = mock_json(&mut server, "/movie/603", 200, r#"{"id":603,"title":"The Matrix"}"#).await;
    let _videos = mock_json(&mut server, "/movie/603/videos", 500, "{}").await;

    let info = load_detail(&client(&server), 603).await.unwrap();
    assert_eq!(info.movie.id, 603);
    assert_eq!(info.trailer_key, None);
  }

  #[tokio::test]
  async fn failed_detail_fails_the_load() {
    let mut server = Server::new_async().await;
    let _movie = mock_json(&mut server, "/movie/603", 404, r#"{"success":false}"#).await;
    let _videos = mock_json(&mut server, "/movie/603/videos", 200, r#"{"results":[]}"#).await;

    let err = load_detail(&client(&server), 603).await.unwrap_err();
    assert!(format!("{:#}", err).contains("603"));
  }
}
