use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{Block, BorderType, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, AppMode, FilterField};
use crate::catalog::Movie;
use crate::detail::DetailInfo;
use crate::poster::{PosterWidget, fit_poster};
use crate::theme::Theme;
use crate::view::{Origin, View};

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` terminal cells, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
  if s.width() <= max_width {
    return s.to_string();
  }
  let budget = max_width.saturating_sub(1);
  let mut used = 0;
  let truncated: String = s
    .chars()
    .take_while(|c| {
      used += c.width().unwrap_or(0);
      used <= budget
    })
    .collect();
  format!("{}…", truncated)
}

/// Human form of a release date; partial dates are shown as-is.
pub fn format_release(date: &str) -> String {
  chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map(|d| d.format("%B %-d, %Y").to_string()).unwrap_or_else(|_| date.to_string())
}

fn rounded(theme: &Theme) -> Block<'static> {
  Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(theme.border))
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();
  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let input_height = if app.view == View::Home { 3 } else { 0 };
  let [header_area, main_area, status_area, input_area, footer_area] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Min(3),
    Constraint::Length(1),
    Constraint::Length(input_height),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  render_header(frame, app, header_area);
  match app.view {
    View::Home => render_home(frame, app, main_area),
    View::Watchlist => render_watchlist(frame, app, main_area),
    View::Detail { .. } => render_detail(frame, app, main_area),
  }
  render_notice(frame, app, main_area);
  render_status(frame, app, status_area);
  if app.view == View::Home {
    render_input(frame, app, input_area);
  }
  render_footer(frame, app, footer_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let left = Line::from(vec![
    Span::styled(" 🎬 reel ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    Span::styled(app.view.path(), Style::default().fg(theme.muted)),
  ]);
  frame.render_widget(left, area);

  let mut right_spans = Vec::new();
  if app.search.has_searched() {
    right_spans.push(Span::styled("📌 Watchlist", Style::default().fg(theme.fg)));
    if app.badge() > 0 {
      right_spans.push(Span::raw(" "));
      right_spans.push(Span::styled(
        format!(" {} ", app.badge()),
        Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD),
      ));
    }
    right_spans.push(Span::raw("  "));
  }
  right_spans.push(Span::styled(format!("v{} ", env!("CARGO_PKG_VERSION")), Style::default().fg(theme.muted)));
  let right = Line::from(right_spans);
  let width = right.width() as u16;
  let right_area = Rect { x: area.x + area.width.saturating_sub(width), width: width.min(area.width), ..area };
  frame.render_widget(right, right_area);
}

fn render_home(frame: &mut Frame, app: &mut App, area: Rect) {
  if !app.search.has_searched() {
    render_welcome(frame, app.theme(), area);
    return;
  }
  let results_area = if app.filter.visible {
    let [filter_area, rest] = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);
    render_filter_panel(frame, app, filter_area);
    rest
  } else {
    area
  };
  render_results(frame, app, results_area);
}

fn render_welcome(frame: &mut Frame, theme: &Theme, area: Rect) {
  let text = vec![
    Line::from(""),
    Line::from(Span::styled("🎬  Movie Search", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))),
    Line::from(""),
    Line::from(Span::styled("Find films. Keep a watchlist. In the terminal.", Style::default().fg(theme.fg))),
    Line::from(""),
    Line::from(Span::styled("Type a title below and press Enter.", Style::default().fg(theme.muted))),
  ];
  let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(rounded(theme));
  frame.render_widget(paragraph, area);
}

fn render_filter_panel(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let focused = app.mode == AppMode::Filter;
  let field_style = |field: FilterField| {
    if focused && app.filter.field == field {
      Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg)
    } else {
      Style::default().fg(theme.fg)
    }
  };
  let year = if app.filter.year.is_empty() { "any".to_string() } else { app.filter.year.clone() };
  let genre = if app.genres.is_empty() {
    "unavailable (r to retry)".to_string()
  } else {
    match app.filter.genre_name(&app.genres) {
      "" => "All Genres".to_string(),
      name => name.to_string(),
    }
  };
  let line = Line::from(vec![
    Span::styled("Release Year ", Style::default().fg(theme.muted)),
    Span::styled(format!(" {} ", year), field_style(FilterField::Year)),
    Span::raw("   "),
    Span::styled("Genre ", Style::default().fg(theme.muted)),
    Span::styled(format!(" ‹ {} › ", genre), field_style(FilterField::Genre)),
  ]);
  let border = if focused { theme.accent } else { theme.border };
  let block = Block::bordered()
    .title(" ⚙ Filter ")
    .title_style(Style::default().fg(border))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border))
    .padding(Padding::horizontal(1));
  frame.render_widget(Paragraph::new(line).block(block), area);

  if focused && app.filter.field == FilterField::Year {
    let offset = "Release Year ".len() + 1 + app.filter.year_cursor;
    let x = area.x + 2 + offset as u16;
    if x < area.x + area.width.saturating_sub(1) {
      frame.set_cursor_position((x, area.y + 1));
    }
  }
}

/// One list row: title on the left, year (and a saved marker) on the right.
fn movie_line<'a>(movie: &Movie, saved: bool, inner_w: usize, theme: &Theme, fg: ratatui::style::Color) -> Line<'a> {
  let year = movie.year().unwrap_or("");
  let marker = if saved { "✔ " } else { "" };
  let right = format!("{}{}", marker, year);
  let right_w = unicode_width::UnicodeWidthStr::width(right.as_str());
  let title_max = if right_w == 0 { inner_w } else { inner_w.saturating_sub(right_w + 2) };
  let title = truncate_str(&movie.title, title_max);
  let gap = inner_w.saturating_sub(unicode_width::UnicodeWidthStr::width(title.as_str()) + right_w);
  Line::from(vec![
    Span::styled(title, Style::default().fg(fg)),
    Span::raw(" ".repeat(gap)),
    Span::styled(right, Style::default().fg(theme.muted)),
  ])
}

fn striped_items<'a>(movies: &[Movie], app: &App, selected: Option<usize>, inner_w: usize) -> Vec<ListItem<'a>> {
  let theme = app.theme();
  movies
    .iter()
    .enumerate()
    .map(|(i, movie)| {
      let is_selected = Some(i) == selected;
      let fg = if is_selected { theme.highlight_fg } else { theme.fg };
      let bg = if is_selected {
        theme.highlight_bg
      } else if i % 2 == 1 {
        theme.stripe_bg
      } else {
        theme.bg
      };
      let saved = app.view == View::Home && app.watchlist.contains(movie.id);
      ListItem::new(movie_line(movie, saved, inner_w, theme, fg)).bg(bg)
    })
    .collect()
}

fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let visible = app.search.visible();
  let title = if app.search.has_active_filter() {
    let mut parts = Vec::new();
    if !app.search.year_filter().is_empty() {
      parts.push(app.search.year_filter().to_string());
    }
    if !app.search.genre_filter().is_empty() {
      parts.push(app.search.genre_filter().to_string());
    }
    format!(" Results · {} of {} · {} ", visible.len(), app.search.results().len(), parts.join(", "))
  } else {
    format!(" Results · {} ", visible.len())
  };
  let border = if app.mode == AppMode::Results { theme.accent } else { theme.border };
  let block = Block::bordered()
    .title(title)
    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border));

  if visible.is_empty() {
    let text = Paragraph::new(vec![Line::from(""), Line::from("No movies found 😢")])
      .style(Style::default().fg(theme.muted))
      .alignment(Alignment::Center)
      .block(block);
    frame.render_widget(text, area);
    return;
  }

  let inner_w = area.width.saturating_sub(4) as usize;
  let items = striped_items(visible, app, app.list_state.selected(), inner_w);
  let list = List::new(items)
    .block(block)
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));
  frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_watchlist(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let block = Block::bordered()
    .title(format!(" 📌 My Watchlist · {} ", app.watchlist.count()))
    .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(theme.accent));

  if app.watchlist.is_empty() {
    let text = Paragraph::new(vec![Line::from(""), Line::from("You haven't added any movies yet 😢")])
      .style(Style::default().fg(theme.muted))
      .alignment(Alignment::Center)
      .block(block);
    frame.render_widget(text, area);
    return;
  }

  if app.watchlist_state.selected().is_none() {
    app.watchlist_state.select(Some(0));
  }
  let inner_w = area.width.saturating_sub(4) as usize;
  let items = striped_items(app.watchlist.entries(), app, app.watchlist_state.selected(), inner_w);
  let list = List::new(items)
    .block(block)
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));
  frame.render_stateful_widget(list, area, &mut app.watchlist_state);
}

fn render_detail(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let info = app.detail.as_ref().and_then(|d| d.info()).cloned();
  let Some(info) = info else {
    let text = Paragraph::new(vec![Line::from(""), Line::from("Loading…")])
      .style(Style::default().fg(theme.status))
      .alignment(Alignment::Center)
      .block(rounded(theme));
    frame.render_widget(text, area);
    return;
  };

  let [poster_area, info_area] = Layout::horizontal([Constraint::Percentage(36), Constraint::Percentage(64)]).areas(area);
  render_poster(frame, app, &info.movie, poster_area);
  render_detail_info(frame, app.theme(), &info, info_area);
}

fn render_poster(frame: &mut Frame, app: &mut App, movie: &Movie, area: Rect) {
  let theme = app.theme();
  let inner = Rect { x: area.x + 1, y: area.y + 1, width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) };
  let source = app.detail.as_ref().and_then(|d| d.poster.as_ref());

  if let Some(image) = source {
    let needs_resize = match &app.poster_cache.resized {
      Some((id, w, h, _)) => *id != movie.id || *w != inner.width || *h != inner.height,
      None => true,
    };
    if needs_resize {
      let fitted = fit_poster(image, inner, app.display_mode);
      app.poster_cache.resized = Some((movie.id, inner.width, inner.height, fitted));
    }
  }

  let image = match (&app.poster_cache.resized, source.is_some()) {
    (Some((id, _, _, fitted)), true) if *id == movie.id => Some(fitted),
    _ => None,
  };
  let widget = PosterWidget { image, title: &movie.title, display_mode: app.display_mode, fg: theme.fg, border: theme.border };
  frame.render_widget(widget, inner);
}

fn render_detail_info(frame: &mut Frame, theme: &Theme, info: &DetailInfo, area: Rect) {
  let movie = &info.movie;
  let label = |s: &'static str| Span::styled(s, Style::default().fg(theme.muted));
  let value = |s: String| Span::styled(s, Style::default().fg(theme.fg));

  let countries = movie.production_countries.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ");
  let genres = movie.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>().join(", ");

  let mut lines = vec![
    Line::from(Span::styled(movie.title.clone(), Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))),
    Line::from(""),
    Line::from(vec![label("Rating    ⭐ "), value(format!("{:.1}", movie.vote_average))]),
    Line::from(vec![label("Released  📅 "), value(movie.release_date.as_deref().map(format_release).unwrap_or_default())]),
    Line::from(vec![label("Country      "), value(if countries.is_empty() { "N/A".to_string() } else { countries })]),
    Line::from(vec![label("Genre     🎬 "), value(genres)]),
    Line::from(""),
    Line::from(Span::styled("📖 Overview", Style::default().fg(theme.accent))),
    Line::from(value(movie.overview.clone().unwrap_or_default())),
    Line::from(""),
  ];
  match &info.trailer_key {
    Some(key) => {
      lines.push(Line::from(Span::styled("🎞 Official Trailer", Style::default().fg(theme.accent))));
      lines.push(Line::from(Span::styled(
        crate::detail::trailer_url(key),
        Style::default().fg(theme.status).add_modifier(Modifier::UNDERLINED),
      )));
    }
    None => lines.push(Line::from(Span::styled("Trailer not available", Style::default().fg(theme.muted)))),
  }

  let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(rounded(theme).padding(Padding::horizontal(1)));
  frame.render_widget(paragraph, area);
}

/// Transient confirmation, drawn over the top-right of the main area.
fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
  let Some(text) = app.notice.text() else { return };
  let theme = app.theme();
  let width = (display_width(text, text.chars().count()) as u16 + 4).min(area.width);
  if width == 0 || area.height < 3 {
    return;
  }
  let popup = Rect { x: area.x + area.width - width, y: area.y, width, height: 3 };
  frame.render_widget(Clear, popup);
  let block = Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(theme.notice));
  frame.render_widget(
    Paragraph::new(text).style(Style::default().fg(theme.notice).bg(theme.bg)).alignment(Alignment::Center).block(block),
    popup,
  );
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(msg) = &app.status_message {
    (format!(" ⏳ {}", msg), Style::default().fg(theme.status))
  } else if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else if app.detail.as_ref().is_some_and(|d| d.is_loading()) {
    (" ⏳ Loading…".to_string(), Style::default().fg(theme.status))
  } else {
    (" Ready".to_string(), Style::default().fg(theme.muted))
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let border_color = if app.mode == AppMode::Input { theme.accent } else { theme.border };
  let input_block = Block::bordered()
    .title(" 🔍 Search movies ")
    .title_style(Style::default().fg(border_color))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(border_color))
    .padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&app.input, app.cursor_position);

  if cursor_col < app.input_scroll {
    app.input_scroll = cursor_col;
  } else if inner_w > 0 && cursor_col >= app.input_scroll + inner_w {
    app.input_scroll = cursor_col.saturating_sub(inner_w) + 1;
  }

  let visible: String = app
    .input
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= app.input_scroll)
    .take_while(|(start, _, _)| *start < app.input_scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  let paragraph = Paragraph::new(visible).style(Style::default().fg(theme.fg)).block(input_block);
  frame.render_widget(paragraph, area);

  if app.mode == AppMode::Input {
    let cursor_x = area.x + 2 + (cursor_col - app.input_scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let searched = app.search.has_searched();
  let keys: Vec<(&str, &str)> = match app.view {
    View::Home => match app.mode {
      AppMode::Input => {
        let mut k = vec![("Enter", "Search")];
        if searched {
          k.push(("^f", "Filter"));
          k.push(("^w", "Watchlist"));
        }
        if !app.search.visible().is_empty() {
          k.push(("↓", "Results"));
        }
        k.push(("^r", "Reset"));
        k.push(("Esc", if app.input.is_empty() && app.search.visible().is_empty() { "Quit" } else { "Clear" }));
        k
      }
      AppMode::Results => vec![
        ("Enter", "Details"),
        ("a", "Add"),
        ("f", "Filter"),
        ("w", "Watchlist"),
        ("j/k", "Navigate"),
        ("Esc", "Search"),
      ],
      AppMode::Filter => vec![("Tab", "Field"), ("←/→", "Genre"), ("Enter", "Apply"), ("Esc", "Close")],
    },
    View::Watchlist => vec![("Enter", "Details"), ("d", "Remove"), ("j/k", "Navigate"), ("Esc", "Back")],
    View::Detail { .. } => {
      let mut k = vec![("a", "Add")];
      if app.trailer_url().is_some() {
        k.push(("o", "Trailer"));
      }
      k.push(("Esc", if app.detail_origin() == Some(Origin::Watchlist) { "Watchlist" } else { "Back" }));
      k
    }
  };

  let mut spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();
  spans.push(Span::raw("  "));
  spans.push(Span::styled(" ^t ", Style::default().fg(theme.key_fg).bg(theme.key_bg)));
  spans.push(Span::styled(format!(" {} ", theme.name), Style::default().fg(theme.muted)));

  frame.render_widget(Line::from(spans), area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::CatalogClient;
  use crate::config::{CatalogConfig, Config};
  use crate::detail::DetailState;
  use crate::display::DisplayMode;
  use crate::store::StateStore;
  use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

  fn app() -> App {
    let catalog = CatalogClient::new(CatalogConfig {
      api_key: "test".into(),
      base_url: "http://127.0.0.1:9".into(),
      image_base_url: "http://127.0.0.1:9/img".into(),
    });
    App::new(catalog, StateStore::in_memory(), &Config::default(), DisplayMode::Ascii)
  }

  fn movie(json: serde_json::Value) -> Movie {
    serde_json::from_value(json).unwrap()
  }

  fn draw(app: &mut App) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| ui(frame, app)).unwrap();
    terminal.backend().buffer().clone()
  }

  fn text(buf: &Buffer) -> String {
    let area = buf.area;
    (0..area.height)
      .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
      .collect::<Vec<_>>()
      .join("\n")
  }

  #[test]
  fn truncate_adds_ellipsis() {
    assert_eq!(truncate_str("abcdef", 4), "abc…");
    assert_eq!(truncate_str("abc", 4), "abc");
  }

  #[test]
  fn truncate_counts_wide_chars_as_two_cells() {
    use unicode_width::UnicodeWidthStr;
    let title = "千と千尋の神隠し";
    let cut = truncate_str(title, 10);
    assert!(cut.ends_with('…'));
    assert!(cut.width() <= 10);
    assert_eq!(cut, "千と千尋…");
    assert_eq!(truncate_str(title, 16), title);
  }

  #[test]
  fn wide_title_leaves_year_column_intact() {
    let movie = movie(serde_json::json!({"id": 1, "title": "千と千尋の神隠し", "release_date": "2001-07-20"}));
    let line = movie_line(&movie, false, 14, &crate::theme::THEMES[0], ratatui::style::Color::White);
    assert_eq!(line.width(), 14);
    assert!(line.to_string().ends_with("2001"));
  }

  #[test]
  fn release_dates_format() {
    assert_eq!(format_release("1999-03-30"), "March 30, 1999");
    assert_eq!(format_release("1999"), "1999");
  }

  #[test]
  fn welcome_before_first_search() {
    let mut app = app();
    assert!(text(&draw(&mut app)).contains("Type a title below"));
  }

  #[test]
  fn results_list_shows_titles_and_years() {
    let mut app = app();
    app.input = "matrix".into();
    let ticket = app.search.begin_search("matrix").unwrap();
    app.finish_search(ticket, Ok(vec![movie(serde_json::json!({"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}))]));
    let screen = text(&draw(&mut app));
    assert!(screen.contains("The Matrix"));
    assert!(screen.contains("1999"));
    assert!(screen.contains("Watchlist"));
  }

  #[test]
  fn empty_results_say_so() {
    let mut app = app();
    let ticket = app.search.begin_search("zzzz").unwrap();
    app.finish_search(ticket, Ok(Vec::new()));
    assert!(text(&draw(&mut app)).contains("No movies found"));
  }

  #[test]
  fn empty_watchlist_message() {
    let mut app = app();
    app.view = View::Watchlist;
    assert!(text(&draw(&mut app)).contains("You haven't added any movies yet"));
  }

  #[test]
  fn detail_loading_indicator() {
    let mut app = app();
    app.view = View::Detail { movie_id: 1, origin: Origin::Home };
    app.detail = Some(DetailState::loading(1));
    assert!(text(&draw(&mut app)).contains("Loading…"));
  }

  #[test]
  fn detail_without_poster_shows_title_card() {
    let mut app = app();
    app.view = View::Detail { movie_id: 2, origin: Origin::Watchlist };
    let mut state = DetailState::loading(2);
    let info = DetailInfo {
      movie: movie(serde_json::json!({
        "id": 2, "title": "Posterless", "vote_average": 7.25, "overview": "Nothing to see.",
        "genres": [{"id": 18, "name": "Drama"}], "production_countries": []
      })),
      trailer_key: None,
    };
    state.finish(2, Ok(info)).unwrap();
    app.detail = Some(state);

    let screen = text(&draw(&mut app));
    assert!(screen.matches("Posterless").count() >= 2);
    assert!(screen.contains("N/A"));
    assert!(screen.contains("Trailer not available"));
    assert!(screen.contains("Drama"));
  }

  #[test]
  fn notice_is_drawn() {
    let mut app = app();
    app.notice.show("Added to Watchlist ✔", std::time::Instant::now());
    assert!(text(&draw(&mut app)).contains("Added to Watchlist"));
  }
}
