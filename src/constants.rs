//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` and parsed once on first access.

use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // Catalog
  pub api_base_url: String,
  pub image_base_url: String,
  pub youtube_watch_url: String,

  // Transient messages
  pub notice_secs: u64,
  pub error_secs: u64,

  // Files
  pub app_name: String,
  pub state_file: String,
  pub log_file_prefix: String,

  // Event loop
  pub tick_ms: u64,
}

impl Constants {
  pub fn notice_duration(&self) -> Duration {
    Duration::from_secs(self.notice_secs)
  }

  pub fn error_duration(&self) -> Duration {
    Duration::from_secs(self.error_secs)
  }

  pub fn tick(&self) -> Duration {
    Duration::from_millis(self.tick_ms)
  }
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed this is caught by the test below.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
