use image::{DynamicImage, imageops::FilterType};
use ratatui::{
  buffer::Buffer,
  layout::{Alignment, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::display::DisplayMode;

// --- Poster Widget ---

/// Draws a poster image, or a title-only card when there is no image.
pub struct PosterWidget<'a> {
  pub image: Option<&'a DynamicImage>,
  pub title: &'a str,
  pub display_mode: DisplayMode,
  pub fg: Color,
  pub border: Color,
}

const ASCII_CHARS: [&str; 10] = [" ", ".", ":", "-", "=", "+", "*", "#", "%", "@"];

impl Widget for PosterWidget<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
      return;
    }
    match (self.image, self.display_mode) {
      (Some(image), DisplayMode::Direct) => render_direct(image, area, buf),
      (Some(image), DisplayMode::Ascii) => render_ascii(image, area, buf),
      (None, _) => render_placeholder(self.title, self.fg, self.border, area, buf),
    }
  }
}

/// Scale `image` to fit `area` for the given mode. Half-blocks pack two pixel
/// rows per cell; ASCII cells are roughly twice as tall as wide.
pub fn fit_poster(image: &DynamicImage, area: Rect, mode: DisplayMode) -> DynamicImage {
  let w = (area.width as u32).max(1);
  let h = (area.height as u32 * 2).max(1);
  let fitted = image.resize(w, h, FilterType::Triangle);
  match mode {
    DisplayMode::Direct => fitted,
    DisplayMode::Ascii => fitted.resize_exact(fitted.width(), (fitted.height() / 2).max(1), FilterType::Triangle),
  }
}

fn render_placeholder(title: &str, fg: Color, border: Color, area: Rect, buf: &mut Buffer) {
  let block = Block::bordered().border_type(BorderType::Rounded).border_style(Style::default().fg(border));
  let inner = block.inner(area);
  block.render(area, buf);
  if inner.is_empty() {
    return;
  }
  // Vertically centre the (possibly wrapped) title.
  let lines = (title.chars().count() as u16).div_ceil(inner.width.max(1)).max(1);
  let top = inner.height.saturating_sub(lines) / 2;
  let text_area = Rect { y: inner.y + top, height: inner.height - top, ..inner };
  Paragraph::new(title)
    .style(Style::default().fg(fg).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(text_area, buf);
}

fn render_direct(image: &DynamicImage, area: Rect, buf: &mut Buffer) {
  // Image is already resized by the caller; just convert to RGB8.
  let rgb = image.to_rgb8();
  let img_w = rgb.width().min(area.width as u32);
  let img_h = rgb.height();
  let cell_h = img_h.div_ceil(2).min(area.height as u32);
  let offset_x = (area.width as u32).saturating_sub(img_w) / 2;
  let offset_y = (area.height as u32).saturating_sub(cell_h) / 2;

  for y in 0..cell_h {
    for x in 0..img_w {
      let upper = rgb.get_pixel(x, y * 2);
      let lower_y = y * 2 + 1;
      let fg = Color::Rgb(upper[0], upper[1], upper[2]);
      let bg = if lower_y < img_h {
        let lower = rgb.get_pixel(x, lower_y);
        Color::Rgb(lower[0], lower[1], lower[2])
      } else {
        Color::Reset
      };
      buf.set_string(cell_x(area, offset_x + x), cell_y(area, offset_y + y), "▀", Style::default().fg(fg).bg(bg));
    }
  }
}

fn render_ascii(image: &DynamicImage, area: Rect, buf: &mut Buffer) {
  let luma = image.to_luma8();
  let img_w = luma.width().min(area.width as u32);
  let img_h = luma.height().min(area.height as u32);
  let offset_x = (area.width as u32).saturating_sub(img_w) / 2;
  let offset_y = (area.height as u32).saturating_sub(img_h) / 2;

  for y in 0..img_h {
    for x in 0..img_w {
      let pixel = luma.get_pixel(x, y)[0];
      let idx = ((pixel as f32 / 255.0) * (ASCII_CHARS.len() - 1) as f32).round() as usize;
      let idx = idx.min(ASCII_CHARS.len() - 1);
      buf.set_string(cell_x(area, offset_x + x), cell_y(area, offset_y + y), ASCII_CHARS[idx], Style::default());
    }
  }
}

fn cell_x(area: Rect, dx: u32) -> u16 {
  area.x.saturating_add(dx.min(u16::MAX as u32) as u16)
}

fn cell_y(area: Rect, dy: u32) -> u16 {
  area.y.saturating_add(dy.min(u16::MAX as u32) as u16)
}
