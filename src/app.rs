use anyhow::Result;
use image::DynamicImage;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::catalog::{CatalogClient, Genre, Movie};
use crate::config::Config;
use crate::constants::constants;
use crate::detail::{self, DetailResult, DetailState};
use crate::display::DisplayMode;
use crate::search::{GenreCache, SearchState, SearchTicket};
use crate::store::{Key, StateStore};
use crate::theme::{THEMES, Theme, theme_index};
use crate::view::{Nav, Origin, View, transition};
use crate::watchlist::{ADDED_NOTICE, Notice, Watchlist};

// --- Types ---

pub type SearchOutcome = (SearchTicket, Result<Vec<Movie>>);
pub type PosterResult = (u64, Result<DynamicImage>);

/// Keyboard focus on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  Input,
  Results,
  Filter,
}

/// Which field of the filter panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
  #[default]
  Year,
  Genre,
}

/// Filter panel contents. Not persisted; reset whenever a screen is entered.
#[derive(Debug, Default, Clone)]
pub struct FilterPanel {
  pub visible: bool,
  pub field: FilterField,
  pub year: String,
  pub year_cursor: usize,
  /// Index into the genre cache; `None` means all genres.
  pub genre_index: Option<usize>,
}

impl FilterPanel {
  pub fn genre_name<'a>(&self, genres: &'a GenreCache) -> &'a str {
    self.genre_index.and_then(|i| genres.names().nth(i)).unwrap_or("")
  }

  /// Step through "All genres" followed by each cached genre.
  pub fn cycle_genre(&mut self, genres: &GenreCache, forward: bool) {
    let total = genres.len() + 1;
    let current = self.genre_index.map_or(0, |i| i + 1);
    let next = if forward { (current + 1) % total } else { (current + total - 1) % total };
    self.genre_index = next.checked_sub(1);
  }
}

/// Cached resized poster keyed by movie id and target size.
#[derive(Default)]
pub struct PosterCache {
  pub resized: Option<(u64, u16, u16, DynamicImage)>,
}

/// In-flight async task receivers and handles.
pub(crate) struct AsyncTasks {
  pub(crate) search_tx: mpsc::UnboundedSender<SearchOutcome>,
  pub(crate) search_rx: mpsc::UnboundedReceiver<SearchOutcome>,
  pub(crate) search_handle: Option<JoinHandle<()>>,
  pub(crate) genres_rx: Option<oneshot::Receiver<Result<Vec<Genre>>>>,
  pub(crate) detail_rx: Option<oneshot::Receiver<DetailResult>>,
  pub(crate) poster_rx: Option<oneshot::Receiver<PosterResult>>,
}

impl Default for AsyncTasks {
  fn default() -> Self {
    let (search_tx, search_rx) = mpsc::unbounded_channel();
    Self { search_tx, search_rx, search_handle: None, genres_rx: None, detail_rx: None, poster_rx: None }
  }
}

pub struct App {
  pub input: String,
  pub cursor_position: usize,
  pub input_scroll: usize,
  pub mode: AppMode,
  pub view: View,
  pub theme_index: usize,
  pub display_mode: DisplayMode,
  pub search: SearchState,
  pub genres: GenreCache,
  pub watchlist: Watchlist,
  pub detail: Option<DetailState>,
  /// Selection within the visible search results.
  pub list_state: ListState,
  /// Selection within the watchlist screen.
  pub watchlist_state: ListState,
  pub filter: FilterPanel,
  pub notice: Notice,
  pub last_error: Option<String>,
  pub status_message: Option<String>,
  pub should_quit: bool,
  pub poster_cache: PosterCache,
  catalog: CatalogClient,
  store: StateStore,
  pub(crate) tasks: AsyncTasks,
  /// When the last error was set, for auto-dismiss.
  error_time: Option<Instant>,
}

impl App {
  /// Build the session from persisted state.
  pub fn new(catalog: CatalogClient, store: StateStore, config: &Config, display_mode: DisplayMode) -> Self {
    let search = store.load_search();
    let watchlist = store.load_watchlist();
    let input = search.query().to_string();
    let cursor_position = input.chars().count();
    let has_rows = search.has_searched() && !search.visible().is_empty();
    let mode = if has_rows { AppMode::Results } else { AppMode::Input };
    let mut list_state = ListState::default();
    if has_rows {
      list_state.select(Some(0));
    }
    info!(
      has_searched = search.has_searched(),
      results = search.results().len(),
      watchlist = watchlist.count(),
      "session restored"
    );

    Self {
      input,
      cursor_position,
      input_scroll: 0,
      mode,
      view: View::Home,
      theme_index: theme_index(config.theme_name.as_deref()),
      display_mode,
      search,
      genres: GenreCache::default(),
      watchlist,
      detail: None,
      list_state,
      watchlist_state: ListState::default(),
      filter: FilterPanel::default(),
      notice: Notice::new(constants().notice_duration()),
      last_error: None,
      status_message: None,
      should_quit: false,
      poster_cache: PosterCache::default(),
      catalog,
      store,
      tasks: AsyncTasks::default(),
      error_time: None,
    }
  }

  pub fn theme(&self) -> &'static Theme {
    // Safety: theme_index is produced by theme_index() or modular arithmetic in next_theme().
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    let mut config = Config::load();
    config.theme_name = Some(self.theme().name.to_string());
    config.save();
  }

  // --- Messages ---

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Expire the notice and stale errors.
  pub fn tick(&mut self, now: Instant) {
    self.notice.expire(now);
    if let Some(t) = self.error_time
      && now.saturating_duration_since(t) >= constants().error_duration()
    {
      self.clear_error();
    }
  }

  // --- Persistence ---

  fn persist_search(&mut self) {
    if let Err(e) = self.store.save_search(&self.search) {
      error!(err = %format!("{:#}", e), "store: failed to save search state");
      self.set_error(format!("Could not save state: {:#}", e));
    }
  }

  fn persist_watchlist(&mut self) {
    if let Err(e) = self.store.save_watchlist(&self.watchlist) {
      error!(err = %format!("{:#}", e), "store: failed to save watchlist");
      self.set_error(format!("Could not save watchlist: {:#}", e));
    }
  }

  /// Mirror the edited query text.
  pub fn on_input_changed(&mut self) {
    self.search.set_query(&self.input);
    if let Err(e) = self.store.set_text(Key::Search, self.search.query()) {
      warn!(err = %format!("{:#}", e), "store: failed to save query");
    }
  }

  // --- Navigation ---

  pub fn navigate(&mut self, nav: Nav) {
    if nav == Nav::OpenWatchlist && !self.search.has_searched() {
      return;
    }
    let Some(next) = transition(self.view, nav) else { return };
    if nav == Nav::Title {
      self.reset_search();
    }
    self.enter_view(next);
  }

  /// Switch screens. Ephemeral UI state is cleared on every entry.
  pub fn enter_view(&mut self, view: View) {
    debug!(from = %self.view, to = %view, "view: enter");
    self.view = view;
    self.filter = FilterPanel::default();
    self.notice.clear();
    match view {
      View::Home => {
        self.detail = None;
        self.mode = if self.search.visible().is_empty() { AppMode::Input } else { AppMode::Results };
        self.clamp_results_selection();
      }
      View::Watchlist => {
        self.detail = None;
        self.clamp_watchlist_selection();
      }
      View::Detail { movie_id, .. } => self.trigger_detail(movie_id),
    }
  }

  pub fn back(&mut self) {
    self.navigate(Nav::Back);
  }

  /// Title action: back to an empty home screen.
  fn reset_search(&mut self) {
    info!("search: reset");
    if let Some(handle) = self.tasks.search_handle.take() {
      handle.abort();
    }
    self.search.reset();
    self.input.clear();
    self.cursor_position = 0;
    self.input_scroll = 0;
    self.status_message = None;
    self.list_state.select(None);
    self.persist_search();
  }

  // --- Search ---

  pub fn trigger_search(&mut self) {
    let Some(ticket) = self.search.begin_search(&self.input) else { return };
    info!(query = %ticket.query, seq = ticket.seq, "search triggered");
    self.clear_error();
    self.persist_search();
    self.status_message = Some(format!("Searching '{}'…", ticket.query));

    if let Some(handle) = self.tasks.search_handle.take() {
      handle.abort();
    }
    let client = self.catalog.clone();
    let tx = self.tasks.search_tx.clone();
    self.tasks.search_handle = Some(tokio::spawn(async move {
      let result = client.search_movies(&ticket.query).await;
      let _ = tx.send((ticket, result));
    }));
  }

  /// Install the outcome of a search. Failures count as "no results".
  pub fn finish_search(&mut self, ticket: SearchTicket, result: Result<Vec<Movie>>) {
    let results = match result {
      Ok(results) => results,
      Err(e) => {
        warn!(query = %ticket.query, err = %format!("{:#}", e), "search failed");
        if ticket.seq == self.search.latest_seq() {
          self.set_error(format!("Search failed: {:#}", e));
        }
        Vec::new()
      }
    };
    if !self.search.complete_search(&ticket, results) {
      return;
    }
    self.status_message = None;
    self.filter = FilterPanel::default();
    self.persist_search();
    if self.search.visible().is_empty() {
      self.list_state.select(None);
      self.mode = AppMode::Input;
    } else {
      self.list_state.select(Some(0));
      self.mode = AppMode::Results;
    }
  }

  // --- Filters ---

  pub fn toggle_filter_panel(&mut self) {
    if !self.search.has_searched() {
      return;
    }
    if self.filter.visible {
      self.filter.visible = false;
      self.mode = if self.search.visible().is_empty() { AppMode::Input } else { AppMode::Results };
    } else {
      let year = self.search.year_filter().to_string();
      let genre_index = self.genres.names().position(|n| n == self.search.genre_filter());
      self.filter = FilterPanel {
        visible: true,
        field: FilterField::Year,
        year_cursor: year.chars().count(),
        year,
        genre_index,
      };
      self.mode = AppMode::Filter;
    }
  }

  pub fn apply_filters(&mut self) {
    let year = self.filter.year.clone();
    let genre = self.filter.genre_name(&self.genres).to_string();
    self.search.apply_filters(&year, &genre, &self.genres);
    self.persist_search();
    self.clamp_results_selection();
  }

  // --- Watchlist ---

  pub fn selected_result(&self) -> Option<&Movie> {
    self.list_state.selected().and_then(|i| self.search.visible().get(i))
  }

  pub fn selected_watchlist_entry(&self) -> Option<&Movie> {
    self.watchlist_state.selected().and_then(|i| self.watchlist.get(i))
  }

  pub fn add_selected_to_watchlist(&mut self) {
    let Some(movie) = self.selected_result().cloned() else { return };
    self.add_to_watchlist(movie);
  }

  pub fn add_to_watchlist(&mut self, movie: Movie) {
    if self.watchlist.add(movie) {
      self.persist_watchlist();
      self.notice.show(ADDED_NOTICE, Instant::now());
    }
  }

  pub fn remove_selected_from_watchlist(&mut self) {
    let Some(id) = self.selected_watchlist_entry().map(|m| m.id) else { return };
    if self.watchlist.remove(id) {
      self.persist_watchlist();
      self.clamp_watchlist_selection();
    }
  }

  fn clamp_results_selection(&mut self) {
    clamp_selection(&mut self.list_state, self.search.visible().len());
  }

  fn clamp_watchlist_selection(&mut self) {
    clamp_selection(&mut self.watchlist_state, self.watchlist.count());
  }

  // --- Background loads ---

  /// Fetch the genre list. Runs once at startup and again on manual retry.
  pub fn trigger_genres(&mut self) {
    if self.tasks.genres_rx.is_some() {
      return;
    }
    let client = self.catalog.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send(client.genres().await);
    });
    self.tasks.genres_rx = Some(rx);
  }

  fn trigger_detail(&mut self, movie_id: u64) {
    info!(movie_id, "detail: loading");
    self.detail = Some(DetailState::loading(movie_id));
    self.tasks.poster_rx = None;
    let client = self.catalog.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let result = detail::load_detail(&client, movie_id).await;
      let _ = tx.send((movie_id, result));
    });
    self.tasks.detail_rx = Some(rx);
  }

  fn trigger_poster(&mut self, movie: &Movie) {
    let Some(url) = movie.poster_url(self.catalog.image_base_url()) else { return };
    let movie_id = movie.id;
    let client = self.catalog.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send((movie_id, client.fetch_poster(&url).await));
    });
    self.tasks.poster_rx = Some(rx);
  }

  pub fn finish_detail(&mut self, movie_id: u64, result: Result<detail::DetailInfo>) {
    let Some(state) = self.detail.as_mut() else { return };
    match state.finish(movie_id, result) {
      Ok(true) => {
        if let Some(movie) = state.info().map(|i| i.movie.clone()) {
          self.trigger_poster(&movie);
        }
      }
      Ok(false) => debug!(movie_id, "detail: result for another movie dropped"),
      Err(e) => {
        error!(movie_id, err = %format!("{:#}", e), "detail: load failed");
        self.set_error(format!("Failed to load movie: {:#}", e));
      }
    }
  }

  pub fn check_pending(&mut self) {
    while let Ok((ticket, result)) = self.tasks.search_rx.try_recv() {
      self.finish_search(ticket, result);
    }

    if let Some(mut rx) = self.tasks.genres_rx.take() {
      match rx.try_recv() {
        Ok(Ok(genres)) => {
          info!(count = genres.len(), "genres loaded");
          self.genres = GenreCache::new(genres);
        }
        Ok(Err(e)) => {
          warn!(err = %format!("{:#}", e), "genre list failed; genre filter unavailable");
        }
        Err(oneshot::error::TryRecvError::Empty) => {
          self.tasks.genres_rx = Some(rx);
        }
        Err(oneshot::error::TryRecvError::Closed) => {
          warn!("genre task ended without a result");
        }
      }
    }

    if let Some(mut rx) = self.tasks.detail_rx.take() {
      match rx.try_recv() {
        Ok((movie_id, result)) => self.finish_detail(movie_id, result),
        Err(oneshot::error::TryRecvError::Empty) => {
          self.tasks.detail_rx = Some(rx);
        }
        Err(oneshot::error::TryRecvError::Closed) => {
          self.set_error("Detail task failed.".to_string());
        }
      }
    }

    if let Some(mut rx) = self.tasks.poster_rx.take() {
      match rx.try_recv() {
        Ok((movie_id, Ok(image))) => {
          if let Some(state) = self.detail.as_mut()
            && state.movie_id == movie_id
          {
            state.poster = Some(image);
            self.poster_cache.resized = None;
          }
        }
        Ok((movie_id, Err(e))) => {
          // The placeholder card stays up.
          debug!(movie_id, err = %format!("{:#}", e), "poster fetch failed");
        }
        Err(oneshot::error::TryRecvError::Empty) => {
          self.tasks.poster_rx = Some(rx);
        }
        Err(oneshot::error::TryRecvError::Closed) => {}
      }
    }
  }

  /// URL of the trailer on the detail screen, if one was found.
  pub fn trailer_url(&self) -> Option<String> {
    let info = self.detail.as_ref()?.info()?;
    info.trailer_key.as_deref().map(detail::trailer_url)
  }

  /// Badge count shown next to the watchlist entry point.
  pub fn badge(&self) -> usize {
    self.watchlist.count()
  }

  /// Origin of the current detail screen, if any.
  pub fn detail_origin(&self) -> Option<Origin> {
    match self.view {
      View::Detail { origin, .. } => Some(origin),
      _ => None,
    }
  }
}

fn clamp_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
  } else {
    let sel = state.selected().unwrap_or(0);
    state.select(Some(sel.min(len - 1)));
  }
}

/// Poll interval for the event loop.
pub fn tick_rate() -> Duration {
  constants().tick()
}
