use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliDisplayMode {
  Auto,
  Direct,
  Ascii,
}

/// How posters are drawn into terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
  Ascii,
  Direct,
}

impl DisplayMode {
  pub fn label(self) -> &'static str {
    match self {
      DisplayMode::Ascii => "ASCII",
      DisplayMode::Direct => "Half-block",
    }
  }
}

/// True-color half-blocks when `COLORTERM` advertises 24-bit color, ASCII otherwise.
pub fn detect_display_mode() -> DisplayMode {
  let colorterm = std::env::var("COLORTERM").unwrap_or_default();
  display_mode_for(&colorterm)
}

fn display_mode_for(colorterm: &str) -> DisplayMode {
  match colorterm.to_lowercase().as_str() {
    "truecolor" | "24bit" => DisplayMode::Direct,
    _ => DisplayMode::Ascii,
  }
}

pub fn resolve_display_mode(cli: CliDisplayMode) -> DisplayMode {
  match cli {
    CliDisplayMode::Auto => detect_display_mode(),
    CliDisplayMode::Direct => DisplayMode::Direct,
    CliDisplayMode::Ascii => DisplayMode::Ascii,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truecolor_terminals_get_half_blocks() {
    assert_eq!(display_mode_for("truecolor"), DisplayMode::Direct);
    assert_eq!(display_mode_for("24BIT"), DisplayMode::Direct);
  }

  #[test]
  fn everything_else_gets_ascii() {
    assert_eq!(display_mode_for(""), DisplayMode::Ascii);
    assert_eq!(display_mode_for("8bit"), DisplayMode::Ascii);
  }
}
