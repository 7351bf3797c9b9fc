use std::time::{Duration, Instant};
use tracing::info;

use crate::catalog::Movie;

/// Text shown after a movie is saved.
pub const ADDED_NOTICE: &str = "Added to Watchlist ✔";

/// Saved movies in insertion order, unique by id.
#[derive(Debug, Default, Clone)]
pub struct Watchlist {
  entries: Vec<Movie>,
}

impl Watchlist {
  /// Build from persisted entries, dropping repeated ids (first one wins).
  pub fn from_entries(movies: Vec<Movie>) -> Self {
    let mut watchlist = Self::default();
    for movie in movies {
      watchlist.add(movie);
    }
    watchlist
  }

  /// Append `movie` unless one with the same id is already saved.
  pub fn add(&mut self, movie: Movie) -> bool {
    if self.contains(movie.id) {
      return false;
    }
    info!(id = movie.id, title = %movie.title, "watchlist: added");
    self.entries.push(movie);
    true
  }

  /// Remove the entry with `id`. Unknown ids are ignored.
  pub fn remove(&mut self, id: u64) -> bool {
    let before = self.entries.len();
    self.entries.retain(|m| m.id != id);
    let removed = self.entries.len() != before;
    if removed {
      info!(id, "watchlist: removed");
    }
    removed
  }

  pub fn contains(&self, id: u64) -> bool {
    self.entries.iter().any(|m| m.id == id)
  }

  pub fn count(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[Movie] {
    &self.entries
  }

  pub fn get(&self, index: usize) -> Option<&Movie> {
    self.entries.get(index)
  }
}

/// One-shot message that disappears after a fixed delay.
/// Showing a new one replaces the current text and restarts the clock.
#[derive(Debug, Clone)]
pub struct Notice {
  text: Option<String>,
  deadline: Option<Instant>,
  ttl: Duration,
}

impl Notice {
  pub fn new(ttl: Duration) -> Self {
    Self { text: None, deadline: None, ttl }
  }

  pub fn show(&mut self, text: impl Into<String>, now: Instant) {
    self.text = Some(text.into());
    self.deadline = Some(now + self.ttl);
  }

  /// Drop the notice once its deadline has passed.
  pub fn expire(&mut self, now: Instant) {
    if let Some(deadline) = self.deadline
      && now >= deadline
    {
      self.clear();
    }
  }

  pub fn clear(&mut self) {
    self.text = None;
    self.deadline = None;
  }

  pub fn text(&self) -> Option<&str> {
    self.text.as_deref()
  }
}
