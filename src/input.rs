use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode, FilterField};
use crate::view::{Nav, View};

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

/// Apply a line-editing key to `text`. Returns true if the text changed.
fn edit_line(text: &mut String, cursor: &mut usize, key: KeyCode, accept: impl Fn(char) -> bool) -> bool {
  match key {
    KeyCode::Char(c) if accept(c) => {
      let byte_idx = char_to_byte_index(text, *cursor);
      text.insert(byte_idx, c);
      *cursor += 1;
      true
    }
    KeyCode::Backspace if *cursor > 0 => {
      *cursor -= 1;
      let byte_idx = char_to_byte_index(text, *cursor);
      text.remove(byte_idx);
      true
    }
    KeyCode::Delete if *cursor < text.chars().count() => {
      let byte_idx = char_to_byte_index(text, *cursor);
      text.remove(byte_idx);
      true
    }
    KeyCode::Left => {
      *cursor = cursor.saturating_sub(1);
      false
    }
    KeyCode::Right => {
      if *cursor < text.chars().count() {
        *cursor += 1;
      }
      false
    }
    KeyCode::Home => {
      *cursor = 0;
      false
    }
    KeyCode::End => {
      *cursor = text.chars().count();
      false
    }
    _ => false,
  }
}

fn select_next(state: &mut ratatui::widgets::ListState, count: usize) {
  if count > 0 {
    let i = state.selected().map_or(0, |i| (i + 1) % count);
    state.select(Some(i));
  }
}

fn select_prev(state: &mut ratatui::widgets::ListState, count: usize) {
  if count > 0 {
    let i = state.selected().map_or(0, |i| if i == 0 { count.saturating_sub(1) } else { i.saturating_sub(1) });
    state.select(Some(i));
  }
}

// --- Event Handling ---

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
  let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

  if ctrl && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return;
  }

  if ctrl && key.code == KeyCode::Char('t') {
    app.next_theme();
    return;
  }

  // Title action: reset and go home from anywhere.
  if ctrl && key.code == KeyCode::Char('r') {
    app.navigate(Nav::Title);
    return;
  }

  if ctrl && key.code == KeyCode::Char('o') {
    open_trailer(app);
    return;
  }

  match app.view {
    View::Home => match app.mode {
      AppMode::Input => handle_input_key(app, key),
      AppMode::Results => handle_results_key(app, key),
      AppMode::Filter => handle_filter_key(app, key),
    },
    View::Watchlist => handle_watchlist_key(app, key),
    View::Detail { .. } => handle_detail_key(app, key),
  }
}

fn handle_input_key(app: &mut App, key: KeyEvent) {
  let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
  match key.code {
    KeyCode::Enter => {
      app.trigger_search();
    }
    KeyCode::Char('f') if ctrl => app.toggle_filter_panel(),
    KeyCode::Char('w') if ctrl => app.navigate(Nav::OpenWatchlist),
    KeyCode::Esc => {
      if !app.input.is_empty() {
        app.input.clear();
        app.cursor_position = 0;
        app.input_scroll = 0;
        app.on_input_changed();
      } else if !app.search.visible().is_empty() {
        app.mode = AppMode::Results;
      } else {
        app.should_quit = true;
      }
    }
    KeyCode::Down | KeyCode::Tab => {
      if !app.search.visible().is_empty() {
        app.mode = AppMode::Results;
      }
    }
    code if !ctrl => {
      app.clear_error();
      if edit_line(&mut app.input, &mut app.cursor_position, code, |_| true) {
        app.on_input_changed();
      }
    }
    _ => {}
  }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
  let count = app.search.visible().len();
  match key.code {
    KeyCode::Enter => {
      if let Some(id) = app.selected_result().map(|m| m.id) {
        app.navigate(Nav::Select(id));
      }
    }
    KeyCode::Char('a') | KeyCode::Char('+') => app.add_selected_to_watchlist(),
    KeyCode::Char('f') => app.toggle_filter_panel(),
    KeyCode::Char('w') => app.navigate(Nav::OpenWatchlist),
    KeyCode::Char('q') => app.should_quit = true,
    KeyCode::Down | KeyCode::Char('j') => select_next(&mut app.list_state, count),
    KeyCode::Up | KeyCode::Char('k') => select_prev(&mut app.list_state, count),
    KeyCode::Esc | KeyCode::Char('/') | KeyCode::Tab => {
      app.mode = AppMode::Input;
    }
    _ => {}
  }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
  match key.code {
    KeyCode::Enter => {
      app.apply_filters();
      app.mode = if app.search.visible().is_empty() { AppMode::Input } else { AppMode::Results };
    }
    KeyCode::Esc => app.toggle_filter_panel(),
    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
      app.filter.field = match app.filter.field {
        FilterField::Year => FilterField::Genre,
        FilterField::Genre => FilterField::Year,
      };
    }
    KeyCode::Char('r') if app.genres.is_empty() => app.trigger_genres(),
    code => match app.filter.field {
      FilterField::Year => {
        let full = app.filter.year.chars().count() >= 4;
        edit_line(&mut app.filter.year, &mut app.filter.year_cursor, code, |c| c.is_ascii_digit() && !full);
      }
      FilterField::Genre => match code {
        KeyCode::Right | KeyCode::Char('l') => app.filter.cycle_genre(&app.genres, true),
        KeyCode::Left | KeyCode::Char('h') => app.filter.cycle_genre(&app.genres, false),
        KeyCode::Backspace | KeyCode::Delete => app.filter.genre_index = None,
        _ => {}
      },
    },
  }
}

fn handle_watchlist_key(app: &mut App, key: KeyEvent) {
  let count = app.watchlist.count();
  match key.code {
    KeyCode::Enter => {
      if let Some(id) = app.selected_watchlist_entry().map(|m| m.id) {
        app.navigate(Nav::Select(id));
      }
    }
    KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => app.remove_selected_from_watchlist(),
    KeyCode::Down | KeyCode::Char('j') => select_next(&mut app.watchlist_state, count),
    KeyCode::Up | KeyCode::Char('k') => select_prev(&mut app.watchlist_state, count),
    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.back(),
    KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
  match key.code {
    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.back(),
    KeyCode::Char('o') => open_trailer(app),
    KeyCode::Char('a') | KeyCode::Char('+') => {
      if let Some(movie) = app.detail.as_ref().and_then(|d| d.info()).map(|i| i.movie.clone()) {
        app.add_to_watchlist(movie);
      }
    }
    KeyCode::Char('q') => app.should_quit = true,
    _ => {}
  }
}

fn open_trailer(app: &mut App) {
  let Some(url) = app.trailer_url() else { return };
  // Use platform-appropriate command to open URL in default browser.
  #[cfg(target_os = "macos")]
  let cmd = "open";
  #[cfg(not(target_os = "macos"))]
  let cmd = "xdg-open";
  match std::process::Command::new(cmd)
    .arg(&url)
    .stdin(std::process::Stdio::null())
    .stdout(std::process::Stdio::null())
    .stderr(std::process::Stdio::null())
    .spawn()
  {
    Ok(mut child) => {
      tracing::info!(url = %url, "opening trailer");
      // Reap the child in a background thread to avoid zombie processes.
      std::thread::spawn(move || {
        let _ = child.wait();
      });
    }
    Err(e) => {
      app.set_error(format!("Failed to open browser: {}", e));
    }
  }
}
