use std::io::IsTerminal;

use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// One role's color on each background.
#[derive(Clone, Copy)]
struct Swatch {
  dark: (u8, u8, u8),
  light: (u8, u8, u8),
}

const TIMESTAMP: Swatch = Swatch {
  dark: (118, 166, 166),
  light: (92, 62, 38),
};
const PRIMARY: Swatch = Swatch {
  dark: (191, 126, 4),
  light: (70, 42, 25),
};
const ACCENT: Swatch = Swatch {
  dark: (166, 84, 55),
  light: (211, 99, 70),
};
const INFO: Swatch = Swatch {
  dark: (118, 166, 166),
  light: (40, 111, 170),
};
const SUCCESS: Swatch = Swatch {
  dark: (118, 166, 166),
  light: (34, 142, 90),
};
const LABEL: Swatch = Swatch {
  dark: (217, 164, 4),
  light: (176, 103, 66),
};
const VALUE: Swatch = Swatch {
  dark: (242, 211, 56),
  light: (199, 146, 76),
};

/// Terminal palette. Every role resolves to `Color::Reset` when color is off.
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, swatch: Swatch) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = match self.theme {
      Theme::Dark => swatch.dark,
      Theme::Light => swatch.light,
    };
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(TIMESTAMP)
  }

  pub const fn primary(&self) -> Color {
    self.pick(PRIMARY)
  }

  pub const fn accent(&self) -> Color {
    self.pick(ACCENT)
  }

  pub const fn info(&self) -> Color {
    self.pick(INFO)
  }

  pub const fn success(&self) -> Color {
    self.pick(SUCCESS)
  }

  pub const fn label(&self) -> Color {
    self.pick(LABEL)
  }

  pub const fn value(&self) -> Color {
    self.pick(VALUE)
  }

  /// Help styling for clap, always using the dark palette.
  pub const fn clap_styles() -> Styles {
    const fn rgb(swatch: Swatch) -> Option<ClapColor> {
      let (r, g, b) = swatch.dark;
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(rgb(LABEL)))
      .usage(Style::new().bold().fg_color(rgb(LABEL)))
      .literal(Style::new().fg_color(rgb(SUCCESS)))
      .placeholder(Style::new().fg_color(rgb(INFO)))
      .error(Style::new().bold().fg_color(rgb(ACCENT)))
      .valid(Style::new().fg_color(rgb(SUCCESS)))
      .invalid(Style::new().bold().fg_color(Some(ClapColor::Ansi(AnsiColor::Red))))
  }
}

/// Converts a crossterm color for use in `comfy-table` cells.
pub fn comfy(color: Color) -> ComfyColor {
  match color {
    Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
    Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
    Color::Black => ComfyColor::Black,
    Color::DarkGrey => ComfyColor::DarkGrey,
    Color::Red => ComfyColor::Red,
    Color::DarkRed => ComfyColor::DarkRed,
    Color::Green => ComfyColor::Green,
    Color::DarkGreen => ComfyColor::DarkGreen,
    Color::Yellow => ComfyColor::Yellow,
    Color::DarkYellow => ComfyColor::DarkYellow,
    Color::Blue => ComfyColor::Blue,
    Color::DarkBlue => ComfyColor::DarkBlue,
    Color::Magenta => ComfyColor::Magenta,
    Color::DarkMagenta => ComfyColor::DarkMagenta,
    Color::Cyan => ComfyColor::Cyan,
    Color::DarkCyan => ComfyColor::DarkCyan,
    Color::White => ComfyColor::White,
    Color::Grey => ComfyColor::Grey,
    Color::Reset => ComfyColor::Reset,
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()),
  }
}

/// `COLORFGBG` is `fg;bg`; background indices 8 and above are light.
fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
  value
    .and_then(|value| value.rsplit(';').next())
    .and_then(|bg| bg.parse::<u8>().ok())
    .map_or(Theme::Dark, |bg| if bg >= 8 { Theme::Light } else { Theme::Dark })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_disabled_colors_reset() {
    let colors = Colors::new(false, Theme::Light);
    assert_eq!(colors.primary(), Color::Reset);
    assert_eq!(colors.value(), Color::Reset);
  }

  #[test]
  fn test_theme_from_colorfgbg() {
    assert_eq!(theme_from_colorfgbg(Some("0;15")), Theme::Light);
    assert_eq!(theme_from_colorfgbg(Some("15;0")), Theme::Dark);
    assert_eq!(theme_from_colorfgbg(Some("garbage")), Theme::Dark);
    assert_eq!(theme_from_colorfgbg(None), Theme::Dark);
  }
}
