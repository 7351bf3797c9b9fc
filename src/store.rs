//! Durable key-value store mirroring the session state.
//!
//! Every key holds a string. Booleans and movie lists are JSON-encoded inside that
//! string; the query and filter keys are stored raw. Reads never fail: a missing or
//! malformed value falls back to its default and is logged.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::catalog::Movie;
use crate::search::SearchState;
use crate::watchlist::Watchlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  HasSearched,
  Movies,
  FilteredMovies,
  Search,
  YearFilter,
  GenreFilter,
  Watchlist,
}

impl Key {
  #[cfg(test)]
  pub const ALL: [Key; 7] =
    [Key::HasSearched, Key::Movies, Key::FilteredMovies, Key::Search, Key::YearFilter, Key::GenreFilter, Key::Watchlist];

  pub fn as_str(self) -> &'static str {
    match self {
      Key::HasSearched => "hasSearched",
      Key::Movies => "movies",
      Key::FilteredMovies => "filteredMovies",
      Key::Search => "search",
      Key::YearFilter => "yearFilter",
      Key::GenreFilter => "genreFilter",
      Key::Watchlist => "watchlist",
    }
  }
}

/// Synchronous string store. No transactions.
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: String) -> Result<()>;
}

// --- Backends ---

/// All keys in one JSON object file, rewritten on every `set`.
pub struct FileStore {
  path: PathBuf,
  entries: BTreeMap<String, String>,
}

impl FileStore {
  /// Open the store at `path`. An absent or unreadable file starts empty.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let entries = match std::fs::read_to_string(&path) {
      Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), err = %e, "store: unreadable state file, starting empty");
        BTreeMap::new()
      }),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
      Err(e) => {
        warn!(path = %path.display(), err = %e, "store: failed to read state file, starting empty");
        BTreeMap::new()
      }
    };
    Self { path, entries }
  }

  fn flush(&self) -> Result<()> {
    if let Some(dir) = self.path.parent()
      && !dir.as_os_str().is_empty()
    {
      std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let content = serde_json::to_string_pretty(&self.entries).context("Failed to encode state")?;
    let tmp = self.path.with_extension("json.tmp");
    std::fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, &self.path).with_context(|| format!("Failed to replace {}", self.path.display()))?;
    Ok(())
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: String) -> Result<()> {
    if self.entries.get(key) == Some(&value) {
      return Ok(());
    }
    self.entries.insert(key.to_string(), value);
    self.flush()
  }
}

/// Non-durable backend used by unit tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
  entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: String) -> Result<()> {
    self.entries.insert(key.to_string(), value);
    Ok(())
  }
}

// --- Typed adapter ---

pub struct StateStore {
  backend: Box<dyn KeyValueStore + Send>,
}

impl StateStore {
  pub fn new(backend: impl KeyValueStore + Send + 'static) -> Self {
    Self { backend: Box::new(backend) }
  }

  #[cfg(test)]
  pub fn in_memory() -> Self {
    Self::new(MemoryStore::default())
  }

  pub fn raw(&self, key: Key) -> Option<String> {
    self.backend.get(key.as_str())
  }

  fn get_json<T: DeserializeOwned + Default>(&self, key: Key) -> T {
    let Some(raw) = self.raw(key) else { return T::default() };
    match serde_json::from_str(&raw) {
      Ok(value) => value,
      Err(e) => {
        warn!(key = key.as_str(), err = %e, "store: malformed value, using default");
        T::default()
      }
    }
  }

  fn set_json<T: Serialize + ?Sized>(&mut self, key: Key, value: &T) -> Result<()> {
    let encoded = serde_json::to_string(value).with_context(|| format!("Failed to encode {}", key.as_str()))?;
    self.backend.set(key.as_str(), encoded)
  }

  pub fn has_searched(&self) -> bool {
    // JSON `null` decodes to the default too.
    self.get_json::<Option<bool>>(Key::HasSearched).unwrap_or(false)
  }

  pub fn set_has_searched(&mut self, value: bool) -> Result<()> {
    self.set_json(Key::HasSearched, &value)
  }

  pub fn movies(&self, key: Key) -> Vec<Movie> {
    self.get_json::<Option<Vec<Movie>>>(key).unwrap_or_default()
  }

  pub fn set_movies(&mut self, key: Key, movies: &[Movie]) -> Result<()> {
    self.set_json(key, movies)
  }

  pub fn text(&self, key: Key) -> String {
    self.raw(key).unwrap_or_default()
  }

  pub fn set_text(&mut self, key: Key, value: &str) -> Result<()> {
    self.backend.set(key.as_str(), value.to_string())
  }

  // --- Whole-state helpers ---

  pub fn load_search(&self) -> SearchState {
    SearchState::restore(
      self.text(Key::Search),
      self.movies(Key::Movies),
      self.movies(Key::FilteredMovies),
      self.text(Key::YearFilter),
      self.text(Key::GenreFilter),
      self.has_searched(),
    )
  }

  pub fn save_search(&mut self, search: &SearchState) -> Result<()> {
    self.set_has_searched(search.has_searched())?;
    self.set_movies(Key::Movies, search.results())?;
    self.set_movies(Key::FilteredMovies, search.filtered())?;
    self.set_text(Key::Search, search.query())?;
    self.set_text(Key::YearFilter, search.year_filter())?;
    self.set_text(Key::GenreFilter, search.genre_filter())?;
    debug!(results = search.results().len(), "store: search state mirrored");
    Ok(())
  }

  pub fn load_watchlist(&self) -> Watchlist {
    Watchlist::from_entries(self.movies(Key::Watchlist))
  }

  pub fn save_watchlist(&mut self, watchlist: &Watchlist) -> Result<()> {
    self.set_movies(Key::Watchlist, watchlist.entries())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn movie(id: u64, date: &str) -> Movie {
    serde_json::from_value(serde_json::json!({ "id": id, "title": format!("M{}", id), "release_date": date }))
      .unwrap()
  }

  #[test]
  fn empty_store_yields_defaults() {
    let store = StateStore::in_memory();
    let search = store.load_search();
    assert!(!search.has_searched());
    assert!(search.results().is_empty());
    assert!(search.filtered().is_empty());
    assert_eq!(search.query(), "");
    assert_eq!(search.year_filter(), "");
    assert_eq!(store.load_watchlist().count(), 0);
  }

  #[test]
  fn malformed_values_fall_back_per_key() {
    let mut backend = MemoryStore::default();
    backend.set("hasSearched", "maybe".to_string()).unwrap();
    backend.set("movies", "[{\"broken\"".to_string()).unwrap();
    backend.set("watchlist", serde_json::to_string(&vec![movie(3, "2001-01-01")]).unwrap()).unwrap();
    backend.set("search", "matrix".to_string()).unwrap();
    let store = StateStore::new(backend);

    assert!(!store.has_searched());
    assert!(store.movies(Key::Movies).is_empty());
    assert_eq!(store.load_watchlist().count(), 1);
    assert_eq!(store.text(Key::Search), "matrix");
  }

  #[test]
  fn malformed_flag_with_stored_results_restores_searched() {
    let movies = serde_json::json!([{ "id": 1, "title": "A" }]).to_string();
    let mut backend = MemoryStore::default();
    backend.set("hasSearched", "garbage".to_string()).unwrap();
    backend.set("movies", movies.clone()).unwrap();
    backend.set("filteredMovies", movies).unwrap();
    let search = StateStore::new(backend).load_search();

    assert!(search.has_searched());
    assert_eq!(search.visible().len(), 1);
  }

  #[test]
  fn null_values_fall_back() {
    let mut backend = MemoryStore::default();
    backend.set("hasSearched", "null".to_string()).unwrap();
    backend.set("watchlist", "null".to_string()).unwrap();
    let store = StateStore::new(backend);
    assert!(!store.has_searched());
    assert_eq!(store.load_watchlist().count(), 0);
  }

  #[test]
  fn every_key_written_on_save() {
    let mut store = StateStore::in_memory();
    store.save_search(&SearchState::default()).unwrap();
    store.save_watchlist(&Watchlist::default()).unwrap();
    for key in Key::ALL {
      assert!(store.raw(key).is_some(), "missing {}", key.as_str());
    }
    assert_eq!(store.raw(Key::HasSearched).as_deref(), Some("false"));
    assert_eq!(store.raw(Key::Movies).as_deref(), Some("[]"));
    assert_eq!(store.raw(Key::Search).as_deref(), Some(""));
  }

  #[test]
  fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let mut store = StateStore::new(FileStore::open(&path));
    let mut watchlist = Watchlist::default();
    watchlist.add(movie(9, "1999-05-01"));
    store.save_watchlist(&watchlist).unwrap();
    store.set_text(Key::Search, "heat").unwrap();
    drop(store);

    let reopened = StateStore::new(FileStore::open(&path));
    assert_eq!(reopened.load_watchlist().entries()[0].id, 9);
    assert_eq!(reopened.text(Key::Search), "heat");
  }

  #[test]
  fn corrupt_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json at all").unwrap();
    let store = FileStore::open(&path);
    assert_eq!(store.get("watchlist"), None);
  }
}
