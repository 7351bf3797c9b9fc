//! Which screen is showing, and how navigation moves between screens.

use anyhow::{Result, anyhow};
use std::fmt;

/// Screen a detail view was opened from; the back action returns there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
  #[default]
  Home,
  Watchlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
  #[default]
  Home,
  Watchlist,
  Detail { movie_id: u64, origin: Origin },
}

impl View {
  pub fn path(self) -> String {
    match self {
      View::Home => "/".to_string(),
      View::Watchlist => "/watchlist".to_string(),
      View::Detail { movie_id, .. } => format!("/movie/{}", movie_id),
    }
  }

  /// Parse a navigation path. A bare `/movie/{id}` has no history, so its origin is Home.
  pub fn parse(path: &str) -> Result<Self> {
    let trimmed = path.trim();
    let trimmed = if trimmed.len() > 1 { trimmed.trim_end_matches('/') } else { trimmed };
    match trimmed {
      "" | "/" => Ok(View::Home),
      "/watchlist" => Ok(View::Watchlist),
      other => {
        let id = other
          .strip_prefix("/movie/")
          .ok_or_else(|| anyhow!("Unknown route '{}' (expected /, /watchlist or /movie/<id>)", path))?;
        let movie_id = id.parse::<u64>().map_err(|_| anyhow!("Invalid movie id in route '{}'", path))?;
        Ok(View::Detail { movie_id, origin: Origin::Home })
      }
    }
  }
}

impl fmt::Display for View {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path())
  }
}

/// Navigation requests a screen can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
  /// Open the detail screen for a movie listed on the current screen.
  Select(u64),
  /// Watchlist badge.
  OpenWatchlist,
  Back,
  /// Title action; the caller also resets the search.
  Title,
}

/// Next screen for `nav`, or `None` when the request does not apply here.
pub fn transition(current: View, nav: Nav) -> Option<View> {
  match (current, nav) {
    (View::Home, Nav::Select(movie_id)) => Some(View::Detail { movie_id, origin: Origin::Home }),
    (View::Watchlist, Nav::Select(movie_id)) => Some(View::Detail { movie_id, origin: Origin::Watchlist }),
    (View::Home, Nav::OpenWatchlist) => Some(View::Watchlist),
    (View::Detail { origin: Origin::Home, .. }, Nav::Back) => Some(View::Home),
    (View::Detail { origin: Origin::Watchlist, .. }, Nav::Back) => Some(View::Watchlist),
    (View::Watchlist, Nav::Back) => Some(View::Home),
    (_, Nav::Title) => Some(View::Home),
    _ => None,
  }
}
