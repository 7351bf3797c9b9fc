use ratatui::style::Color;

/// A named color palette for the whole UI.
#[derive(Debug)]
pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub muted: Color,
  pub accent: Color,
  pub border: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub status: Color,
  pub error: Color,
  pub notice: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub static THEMES: [Theme; 3] = [
  Theme {
    name: "Marquee",
    bg: Color::Rgb(20, 18, 24),
    fg: Color::Rgb(232, 228, 220),
    muted: Color::Rgb(128, 122, 136),
    accent: Color::Rgb(244, 190, 82),
    border: Color::Rgb(70, 64, 82),
    highlight_fg: Color::Rgb(20, 18, 24),
    highlight_bg: Color::Rgb(244, 190, 82),
    stripe_bg: Color::Rgb(28, 26, 34),
    status: Color::Rgb(140, 200, 230),
    error: Color::Rgb(236, 104, 96),
    notice: Color::Rgb(128, 214, 140),
    key_fg: Color::Rgb(20, 18, 24),
    key_bg: Color::Rgb(128, 122, 136),
  },
  Theme {
    name: "Matinee",
    bg: Color::Rgb(248, 245, 238),
    fg: Color::Rgb(40, 38, 44),
    muted: Color::Rgb(130, 126, 120),
    accent: Color::Rgb(178, 44, 56),
    border: Color::Rgb(200, 194, 184),
    highlight_fg: Color::Rgb(248, 245, 238),
    highlight_bg: Color::Rgb(178, 44, 56),
    stripe_bg: Color::Rgb(240, 236, 226),
    status: Color::Rgb(40, 100, 160),
    error: Color::Rgb(190, 40, 40),
    notice: Color::Rgb(40, 140, 70),
    key_fg: Color::Rgb(248, 245, 238),
    key_bg: Color::Rgb(130, 126, 120),
  },
  Theme {
    name: "Noir",
    bg: Color::Black,
    fg: Color::Gray,
    muted: Color::DarkGray,
    accent: Color::White,
    border: Color::DarkGray,
    highlight_fg: Color::Black,
    highlight_bg: Color::White,
    stripe_bg: Color::Rgb(16, 16, 16),
    status: Color::Gray,
    error: Color::Red,
    notice: Color::Green,
    key_fg: Color::Black,
    key_bg: Color::Gray,
  },
];

/// Index of the theme called `name`, falling back to the first one.
pub fn theme_index(name: Option<&str>) -> usize {
  name.and_then(|n| THEMES.iter().position(|t| t.name.eq_ignore_ascii_case(n))).unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn theme_lookup_is_case_insensitive() {
    assert_eq!(theme_index(Some("noir")), 2);
    assert_eq!(theme_index(Some("Matinee")), 1);
  }

  #[test]
  fn unknown_theme_falls_back_to_first() {
    assert_eq!(theme_index(Some("Sepia")), 0);
    assert_eq!(theme_index(None), 0);
  }
}
