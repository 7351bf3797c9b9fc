mod app;
mod catalog;
mod config;
mod constants;
mod detail;
mod display;
mod input;
mod poster;
mod search;
mod store;
mod theme;
mod ui;
mod view;
mod watchlist;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use catalog::CatalogClient;
use config::{API_KEY_ENV, CatalogConfig, Config};
use constants::constants;
use display::CliDisplayMode;
use store::{FileStore, StateStore};
use view::View;

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Poster display mode: 'auto', 'direct', or 'ascii' (default: auto-detect)
  #[arg(short, long, default_value = "auto")]
  display_mode: CliDisplayMode,

  /// Start on a route: '/', '/watchlist' or '/movie/<id>'
  #[arg(long, value_name = "ROUTE")]
  open: Option<String>,

  /// Catalog API key (overrides TMDB_API_KEY and prefs.toml)
  #[arg(long)]
  api_key: Option<String>,

  /// Session state file (default: state.json in the data directory)
  #[arg(long, value_name = "PATH")]
  state_file: Option<PathBuf>,

  /// Print shell completions and exit
  #[arg(long, value_name = "SHELL")]
  completions: Option<Shell>,
}

// --- Logging ---

/// Log to a daily rolling file; the terminal belongs to the UI.
fn init_logging() -> Result<WorkerGuard> {
  let dir = config::data_dir();
  std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
  let appender = RollingFileAppender::new(Rotation::DAILY, &dir, &constants().log_file_prefix);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reel=info"));
  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_ansi(false).with_target(false).with_writer(writer))
    .init();
  Ok(guard)
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    clap_complete::generate(shell, &mut Args::command(), constants().app_name.as_str(), &mut std::io::stdout());
    return Ok(());
  }

  // Everything that can fail before the terminal is taken over.
  let start_view = args.open.as_deref().map(View::parse).transpose()?.unwrap_or_default();
  let prefs = Config::load();
  let env_key = std::env::var(API_KEY_ENV).ok();
  let api_key = config::resolve_api_key(args.api_key.as_deref(), env_key.as_deref(), prefs.api_key.as_deref())?;
  let _guard = init_logging()?;

  let display_mode = display::resolve_display_mode(args.display_mode);
  let state_path = args.state_file.unwrap_or_else(config::default_state_path);
  info!(state = %state_path.display(), display = display_mode.label(), start = %start_view, "starting");

  let catalog = CatalogClient::new(CatalogConfig::new(api_key));
  let store = StateStore::new(FileStore::open(state_path));
  let mut app = App::new(catalog, store, &prefs, display_mode);

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, &mut app, start_view);
  ratatui::restore();
  info!("exiting");
  result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App, start_view: View) -> Result<()> {
  app.trigger_genres();
  if start_view != View::Home {
    app.enter_view(start_view);
  }

  loop {
    app.check_pending();
    app.tick(Instant::now());

    terminal.draw(|frame| ui::ui(frame, app))?;

    if event::poll(app::tick_rate())? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(app, key);
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }
  Ok(())
}
