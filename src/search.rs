//! Search results, the year/genre filter over them, and the genre name cache.

use tracing::{debug, info};

use crate::catalog::{Genre, Movie};

// --- Genre cache ---

/// Genre list fetched once per session. Empty until the load succeeds.
#[derive(Debug, Default, Clone)]
pub struct GenreCache {
  genres: Vec<Genre>,
}

impl GenreCache {
  pub fn new(genres: Vec<Genre>) -> Self {
    Self { genres }
  }

  pub fn is_empty(&self) -> bool {
    self.genres.is_empty()
  }

  pub fn name_of(&self, id: u64) -> Option<&str> {
    self.genres.iter().find(|g| g.id == id).map(|g| g.name.as_str())
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.genres.iter().map(|g| g.name.as_str())
  }

  pub fn len(&self) -> usize {
    self.genres.len()
  }
}

// --- Filtering ---

/// Whether `movie` passes the year and genre filters. Empty filters match everything.
pub fn matches_filters(movie: &Movie, year: &str, genre: &str, genres: &GenreCache) -> bool {
  if !year.is_empty() && movie.year() != Some(year) {
    return false;
  }
  if !genre.is_empty() && !movie.genre_ids.iter().any(|id| genres.name_of(*id) == Some(genre)) {
    return false;
  }
  true
}

// --- Search state ---

/// Handle for one outgoing search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
  pub seq: u64,
  pub query: String,
}

#[derive(Debug, Default, Clone)]
pub struct SearchState {
  query: String,
  results: Vec<Movie>,
  filtered: Vec<Movie>,
  year_filter: String,
  genre_filter: String,
  has_searched: bool,
  /// Sequence number of the most recently issued ticket.
  latest_seq: u64,
}

impl SearchState {
  /// Rebuild state from persisted values. A filtered list that is not drawn from
  /// `results` is discarded in favour of the full list. Stored results imply a
  /// completed search; without one, filters are dropped.
  pub fn restore(
    query: String,
    results: Vec<Movie>,
    filtered: Vec<Movie>,
    year_filter: String,
    genre_filter: String,
    has_searched: bool,
  ) -> Self {
    let has_searched = has_searched || !results.is_empty();
    if !has_searched {
      return Self { query, ..Self::default() };
    }
    let filtered = if is_subsequence(&filtered, &results) { filtered } else { results.clone() };
    Self { query, results, filtered, year_filter, genre_filter, has_searched, latest_seq: 0 }
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn results(&self) -> &[Movie] {
    &self.results
  }

  pub fn filtered(&self) -> &[Movie] {
    &self.filtered
  }

  /// Movies the results view lists.
  pub fn visible(&self) -> &[Movie] {
    &self.filtered
  }

  pub fn year_filter(&self) -> &str {
    &self.year_filter
  }

  pub fn genre_filter(&self) -> &str {
    &self.genre_filter
  }

  pub fn has_searched(&self) -> bool {
    self.has_searched
  }

  pub fn latest_seq(&self) -> u64 {
    self.latest_seq
  }

  /// Track the query text as it is edited, before any search is issued.
  pub fn set_query(&mut self, text: &str) {
    self.query = text.to_string();
  }

  pub fn has_active_filter(&self) -> bool {
    !self.year_filter.is_empty() || !self.genre_filter.is_empty()
  }

  /// Start a search. Returns `None` for a blank query, which is ignored.
  pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
    let query = query.trim();
    if query.is_empty() {
      return None;
    }
    self.latest_seq += 1;
    self.query = query.to_string();
    debug!(seq = self.latest_seq, query, "search: ticket issued");
    Some(SearchTicket { seq: self.latest_seq, query: query.to_string() })
  }

  /// Install results for `ticket`. Results for any ticket other than the latest are dropped.
  pub fn complete_search(&mut self, ticket: &SearchTicket, results: Vec<Movie>) -> bool {
    if ticket.seq != self.latest_seq {
      debug!(seq = ticket.seq, latest = self.latest_seq, "search: stale results discarded");
      return false;
    }
    info!(query = %ticket.query, count = results.len(), "search: results installed");
    self.filtered = results.clone();
    self.results = results;
    self.year_filter.clear();
    self.genre_filter.clear();
    self.has_searched = true;
    true
  }

  /// Recompute `filtered` from the full result set.
  pub fn apply_filters(&mut self, year: &str, genre: &str, genres: &GenreCache) -> &[Movie] {
    self.year_filter = year.trim().to_string();
    self.genre_filter = genre.trim().to_string();
    self.filtered = self
      .results
      .iter()
      .filter(|m| matches_filters(m, &self.year_filter, &self.genre_filter, genres))
      .cloned()
      .collect();
    debug!(
      year = %self.year_filter,
      genre = %self.genre_filter,
      shown = self.filtered.len(),
      total = self.results.len(),
      "search: filters applied"
    );
    &self.filtered
  }

  /// Back to the initial state. In-flight searches become stale.
  pub fn reset(&mut self) {
    let latest_seq = self.latest_seq + 1;
    *self = Self { latest_seq, ..Self::default() };
  }
}

fn is_subsequence(sub: &[Movie], full: &[Movie]) -> bool {
  let mut it = full.iter();
  sub.iter().all(|m| it.any(|f| f.id == m.id))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn movie(id: u64, date: Option<&str>, genre_ids: &[u64]) -> Movie {
    serde_json::from_value(serde_json::json!({
      "id": id,
      "title": format!("Movie {}", id),
      "release_date": date,
      "genre_ids": genre_ids,
    }))
    .unwrap()
  }

  fn searched(results: Vec<Movie>) -> SearchState {
    let mut state = SearchState::default();
    let ticket = state.begin_search("q").unwrap();
    assert!(state.complete_search(&ticket, results));
    state
  }

  fn ids(movies: &[Movie]) -> Vec<u64> {
    movies.iter().map(|m| m.id).collect()
  }

  fn genres() -> GenreCache {
    GenreCache::new(vec![Genre { id: 35, name: "Comedy".into() }, Genre { id: 18, name: "Drama".into() }])
  }

  #[test]
  fn blank_query_is_ignored() {
    let mut state = SearchState::default();
    assert!(state.begin_search("   ").is_none());
    assert!(state.begin_search("").is_none());
    assert!(!state.has_searched());
  }

  #[test]
  fn completing_search_sets_results_and_clears_filters() {
    let mut state = searched(vec![movie(1, Some("1999-05-01"), &[35])]);
    state.apply_filters("1999", "Comedy", &genres());
    let ticket = state.begin_search("  heat ").unwrap();
    assert_eq!(ticket.query, "heat");
    state.complete_search(&ticket, vec![movie(2, None, &[]), movie(3, None, &[])]);

    assert!(state.has_searched());
    assert_eq!(state.query(), "heat");
    assert_eq!(ids(state.results()), vec![2, 3]);
    assert_eq!(ids(state.filtered()), vec![2, 3]);
    assert_eq!(state.year_filter(), "");
    assert_eq!(state.genre_filter(), "");
  }

  #[test]
  fn empty_results_still_count_as_searched() {
    let state = searched(Vec::new());
    assert!(state.has_searched());
    assert!(state.visible().is_empty());
  }

  #[test]
  fn year_filter_keeps_matching_year() {
    let mut state = searched(vec![movie(1, Some("1999-05-01"), &[]), movie(2, Some("2001-01-01"), &[])]);
    assert_eq!(ids(state.apply_filters("1999", "", &GenreCache::default())), vec![1]);
  }

  #[test]
  fn genre_filter_resolves_through_cache() {
    let mut state = searched(vec![movie(1, None, &[35]), movie(2, None, &[18])]);
    assert_eq!(ids(state.apply_filters("", "Comedy", &genres())), vec![1]);
  }

  #[test]
  fn filters_combine() {
    let mut state = searched(vec![
      movie(1, Some("1999-01-01"), &[35]),
      movie(2, Some("1999-02-01"), &[18]),
      movie(3, Some("2005-02-01"), &[35]),
    ]);
    assert_eq!(ids(state.apply_filters("1999", "Comedy", &genres())), vec![1]);
  }

  #[test]
  fn apply_filters_is_idempotent() {
    let mut state = searched(vec![movie(1, Some("1999-05-01"), &[35]), movie(2, Some("2001-01-01"), &[18])]);
    let first = ids(state.apply_filters("1999", "Comedy", &genres()));
    let second = ids(state.apply_filters("1999", "Comedy", &genres()));
    assert_eq!(first, second);
  }

  #[test]
  fn changing_one_filter_recomputes_from_full_results() {
    let mut state = searched(vec![movie(1, Some("1999-05-01"), &[35]), movie(2, Some("2001-01-01"), &[35])]);
    assert_eq!(ids(state.apply_filters("1999", "", &genres())), vec![1]);
    assert_eq!(ids(state.apply_filters("2001", "", &genres())), vec![2]);
    assert_eq!(ids(state.apply_filters("", "", &genres())), vec![1, 2]);
    assert_eq!(state.results().len(), 2);
  }

  #[test]
  fn missing_release_date_never_matches_year() {
    let mut state = searched(vec![movie(1, None, &[])]);
    assert!(state.apply_filters("1999", "", &genres()).is_empty());
  }

  #[test]
  fn unresolvable_genres_never_match() {
    let mut state = searched(vec![movie(1, None, &[99])]);
    assert!(state.apply_filters("", "Comedy", &genres()).is_empty());
    assert!(state.apply_filters("", "Comedy", &GenreCache::default()).is_empty());
  }

  #[test]
  fn stale_results_are_discarded() {
    let mut state = SearchState::default();
    let first = state.begin_search("alien").unwrap();
    let second = state.begin_search("aliens").unwrap();

    assert!(state.complete_search(&second, vec![movie(2, None, &[])]));
    assert!(!state.complete_search(&first, vec![movie(1, None, &[])]));
    assert_eq!(ids(state.results()), vec![2]);
  }

  #[test]
  fn reset_clears_everything() {
    let mut state = searched(vec![movie(1, Some("1999-05-01"), &[35])]);
    state.apply_filters("1999", "Comedy", &genres());
    state.reset();

    assert!(!state.has_searched());
    assert_eq!(state.query(), "");
    assert!(state.results().is_empty());
    assert!(state.filtered().is_empty());
    assert_eq!(state.year_filter(), "");
    assert_eq!(state.genre_filter(), "");
  }

  #[test]
  fn reset_invalidates_in_flight_search() {
    let mut state = SearchState::default();
    let ticket = state.begin_search("alien").unwrap();
    state.reset();
    assert!(!state.complete_search(&ticket, vec![movie(1, None, &[])]));
    assert!(!state.has_searched());
  }

  #[test]
  fn restore_rejects_foreign_filtered_list() {
    let state = SearchState::restore(
      "q".into(),
      vec![movie(1, None, &[]), movie(2, None, &[])],
      vec![movie(7, None, &[])],
      String::new(),
      String::new(),
      true,
    );
    assert_eq!(ids(state.filtered()), vec![1, 2]);
  }

  #[test]
  fn restore_with_results_counts_as_searched() {
    let state = SearchState::restore(
      "q".into(),
      vec![movie(1, None, &[])],
      vec![movie(1, None, &[])],
      String::new(),
      String::new(),
      false,
    );
    assert!(state.has_searched());
    assert_eq!(ids(state.visible()), vec![1]);
  }

  #[test]
  fn restore_without_search_drops_filters() {
    let state = SearchState::restore("q".into(), Vec::new(), Vec::new(), "1999".into(), "Comedy".into(), false);
    assert!(!state.has_searched());
    assert!(!state.has_active_filter());
    assert_eq!(state.query(), "q");
  }

  #[test]
  fn restore_keeps_valid_filtered_list() {
    let state = SearchState::restore(
      "q".into(),
      vec![movie(1, None, &[]), movie(2, None, &[]), movie(3, None, &[])],
      vec![movie(1, None, &[]), movie(3, None, &[])],
      "1999".into(),
      String::new(),
      true,
    );
    assert_eq!(ids(state.filtered()), vec![1, 3]);
    assert!(state.has_active_filter());
  }
}
